/// Backend registry - render API tag to backend factory lookup

use rustc_hash::FxHashMap;
use crate::config::{AppConfig, RenderApi};
use crate::error::{Error, Result};
use crate::renderer::Backend;

/// Backend factory function type
type BackendFactory = Box<dyn Fn(&AppConfig) -> Result<Backend>>;

/// Registry of backend factories keyed by render API
///
/// Built explicitly at startup and resolved once when the application runner
/// is created. There is no process-wide instance.
///
/// # Example
///
/// ```ignore
/// let mut registry = BackendRegistry::new();
/// registry.register(RenderApi::Headless, |config| HeadlessBackend::create(config));
/// let backend = registry.create(&AppConfig::default())?;
/// ```
#[derive(Default)]
pub struct BackendRegistry {
    factories: FxHashMap<RenderApi, BackendFactory>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for `api`, replacing any previous one
    pub fn register<F>(&mut self, api: RenderApi, factory: F) -> &mut Self
    where
        F: Fn(&AppConfig) -> Result<Backend> + 'static,
    {
        if self.factories.insert(api, Box::new(factory)).is_some() {
            crate::engine_debug!("artifact::BackendRegistry", "Replaced backend factory for {}", api);
        }
        self
    }

    pub fn contains(&self, api: RenderApi) -> bool {
        self.factories.contains_key(&api)
    }

    /// Registered render APIs (unordered)
    pub fn apis(&self) -> impl Iterator<Item = RenderApi> + '_ {
        self.factories.keys().copied()
    }

    /// Create the backend selected by `config.render_api`
    pub fn create(&self, config: &AppConfig) -> Result<Backend> {
        let factory = self.factories.get(&config.render_api).ok_or_else(|| {
            crate::engine_error!(
                "artifact::BackendRegistry",
                "No backend registered for {}", config.render_api
            );
            Error::InitializationFailed(format!(
                "No backend registered for '{}'", config.render_api
            ))
        })?;

        let backend = factory(config)?;
        crate::engine_info!(
            "artifact::BackendRegistry",
            "Selected {} backend '{}'", config.render_api, backend.renderer.name()
        );
        Ok(backend)
    }
}

#[cfg(test)]
#[path = "backend_registry_tests.rs"]
mod tests;
