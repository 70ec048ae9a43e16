/// Application trait and the context handed to it

use std::cell::Cell;
use std::rc::Rc;
use crate::config::AppConfig;
use crate::error::Result;
use crate::flow::RenderContext;
use crate::input::InputSource;
use crate::renderer::Backend;

/// Shared "please stop the loop" flag
///
/// Cheap to clone; key actions capture a clone and call `request()`.
#[derive(Debug, Clone, Default)]
pub struct CloseSignal {
    requested: Rc<Cell<bool>>,
}

impl CloseSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.set(true);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }
}

/// Everything an application can reach during init / update / shutdown
pub struct AppContext {
    pub config: AppConfig,
    pub render: RenderContext,
    pub input: Rc<dyn InputSource>,
    pub close: CloseSignal,
    pub(crate) tick: u64,
}

impl AppContext {
    pub fn new(config: AppConfig, backend: Backend) -> Self {
        Self {
            config,
            render: RenderContext::new(backend.renderer),
            input: backend.input,
            close: CloseSignal::new(),
            tick: 0,
        }
    }

    /// Index of the current (or next) tick
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

/// A program driven by the `Runner`
///
/// `update` runs once per tick and typically polls a `KeyActionMap`, then
/// records one frame with `context.render.render_flow(...)`.
pub trait Application {
    /// Create resources and bindings
    fn init(&mut self, context: &mut AppContext) -> Result<()>;

    /// One tick
    fn update(&mut self, context: &mut AppContext) -> Result<()>;

    /// Release resources; called once if `init` succeeded
    fn shutdown(&mut self, _context: &mut AppContext) {}
}
