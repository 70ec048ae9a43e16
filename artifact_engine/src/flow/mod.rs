/// Flow module - deferred per-frame command recording
///
/// A frame is recorded into a `FrameSession` and flushed to the backend in
/// recorded order when the session closes.

// Module declarations
pub mod parameter;
pub mod command;
pub mod render_context;
pub mod frame_session;

pub use parameter::*;
pub use command::*;
pub use render_context::*;
pub use frame_session::*;
