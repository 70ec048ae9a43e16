/// Runner - drives an Application through its lifecycle

use crate::app::{AppContext, Application};
use crate::config::AppConfig;
use crate::engine::Engine;
use crate::error::Result;
use crate::renderer::BackendRegistry;

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed (including skipped frames)
    pub ticks: u64,
    /// Ticks whose frame was dropped after a backend failure
    pub frames_skipped: u64,
}

/// Tick driver
///
/// Resolves the backend once at construction, then runs the application loop
/// single-threaded: one `update` per tick until the close signal is raised,
/// `max_ticks` is reached, or a non-recoverable error occurs.
///
/// # Example
///
/// ```ignore
/// let mut registry = BackendRegistry::new();
/// artifact_engine_renderer_headless::register(&mut registry);
///
/// let mut runner = Runner::new(AppConfig::default().with_max_ticks(60), &registry)?;
/// let summary = runner.run(&mut Sandbox::default())?;
/// ```
pub struct Runner {
    context: AppContext,
}

impl Runner {
    /// Apply the log level and create the configured backend
    pub fn new(config: AppConfig, registry: &BackendRegistry) -> Result<Self> {
        Engine::set_min_severity(config.log_level);
        let backend = registry.create(&config)?;
        Ok(Self {
            context: AppContext::new(config, backend),
        })
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    /// Run `app` to completion
    ///
    /// Each tick first lets the input source pump its events, then calls
    /// `update`. A tick failing with a backend error is logged and its frame skipped,
    /// unless `stop_on_backend_error` is set. Any other error ends the loop and
    /// is returned after `shutdown` ran.
    pub fn run<A: Application>(&mut self, app: &mut A) -> Result<RunSummary> {
        let app_name = self.context.config.app_name.clone();

        crate::engine_info!("artifact::Runner", "{} init", app_name);
        app.init(&mut self.context).inspect_err(|error| {
            crate::engine_error!("artifact::Runner", "{} init failed: {}", app_name, error);
        })?;

        let mut summary = RunSummary::default();
        let result = loop {
            if self.context.close.is_requested() {
                crate::engine_info!("artifact::Runner", "Close requested after {} tick(s)", summary.ticks);
                break Ok(());
            }
            if let Some(max_ticks) = self.context.config.max_ticks {
                if summary.ticks >= max_ticks {
                    break Ok(());
                }
            }

            let outcome = self.context.input
                .begin_tick(self.context.tick)
                .and_then(|()| app.update(&mut self.context));
            summary.ticks += 1;
            self.context.tick += 1;

            match outcome {
                Ok(()) => {}
                Err(error) if error.is_fatal() && !self.context.config.stop_on_backend_error => {
                    summary.frames_skipped += 1;
                    crate::engine_warn!(
                        "artifact::Runner",
                        "Tick {} skipped: {}", summary.ticks - 1, error
                    );
                }
                Err(error) => {
                    crate::engine_error!(
                        "artifact::Runner",
                        "Tick {} failed, stopping: {}", summary.ticks - 1, error
                    );
                    break Err(error);
                }
            }
        };

        app.shutdown(&mut self.context);
        crate::engine_info!(
            "artifact::Runner",
            "{} shutdown ({} tick(s), {} skipped)", app_name, summary.ticks, summary.frames_skipped
        );

        result.map(|()| summary)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
