/*!
# Artifact Engine - Headless Renderer Backend

Headless implementation of the Artifact engine backend interfaces.

No GPU and no window are involved: shaders and drawables live in slot maps,
every activation, uniform upload and draw call is validated, logged and counted,
and keyboard input comes from a tick-based key-press script. Used for tests,
CI runs and the sandbox demo.

The backend is registered in a `BackendRegistry` under `RenderApi::Headless`.
*/

mod headless_backend;
mod scripted_input;

pub use headless_backend::{HeadlessBackend, HeadlessFrameStats, HeadlessStats, HeadlessStatsHandle};
pub use scripted_input::{KeyPress, ScriptedInput};

use std::rc::Rc;
use artifact_engine::artifact::{
    AppConfig, RenderApi, Result,
    input::KeyChord,
    render::{Backend, BackendRegistry},
};
use artifact_engine::engine_info;

/// Headless backend settings
#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    /// Key presses replayed by the input source
    pub key_script: Vec<KeyPress>,
    /// Simulated device loss after this many presented frames
    pub lose_device_at_frame: Option<u64>,
}

impl HeadlessOptions {
    pub fn with_key_press(mut self, chord: impl Into<KeyChord>, at_tick: u64, ticks: u64) -> Self {
        self.key_script.push(KeyPress::new(chord, at_tick, ticks));
        self
    }

    pub fn with_device_lost_at(mut self, frames: u64) -> Self {
        self.lose_device_at_frame = Some(frames);
        self
    }
}

/// Register the headless backend with default options
///
/// # Example
///
/// ```no_run
/// use artifact_engine::artifact::render::BackendRegistry;
///
/// let mut registry = BackendRegistry::new();
/// artifact_engine_renderer_headless::register(&mut registry);
/// ```
pub fn register(registry: &mut BackendRegistry) {
    register_with(registry, HeadlessOptions::default());
}

/// Register the headless backend with `options`
pub fn register_with(registry: &mut BackendRegistry, options: HeadlessOptions) {
    registry.register(RenderApi::Headless, move |config| create_backend(config, &options));
}

/// Build a headless renderer and its scripted input for `config`
pub fn create_backend(config: &AppConfig, options: &HeadlessOptions) -> Result<Backend> {
    engine_info!(
        "artifact::headless",
        "Headless backend for '{}' ({}x{}, {} scripted key press(es))",
        config.window.title, config.window.width, config.window.height, options.key_script.len()
    );

    let renderer = HeadlessBackend::new(config.window.clone())
        .with_device_lost_at(options.lose_device_at_frame);
    let input = Rc::new(ScriptedInput::new(options.key_script.clone()));
    Ok(Backend::new(renderer, input))
}
