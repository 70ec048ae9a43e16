/*!
# Artifact Engine

Deferred per-frame render-command pipeline for Artifact applications.

Application code describes what to draw this frame as a sequence of declarative
commands (bind a shader with named parameters, submit a drawable) recorded into a
short-lived frame session. When the session closes, the queue is flushed to the
rendering backend in exactly the recorded order.

## Architecture

- **ParameterSet**: named, typed uniform values for one bind command
- **FrameSession**: scoped command recording with guaranteed flush on exit
- **RenderContext**: explicit per-application rendering context (no globals)
- **KeyActionMap**: key chords bound to actions, polled once per tick
- **RenderBackend / InputSource**: narrow interfaces implemented by backends
- **BackendRegistry**: render-API tag to backend factory lookup
- **Runner**: drives an `Application` through init / update / shutdown

Backend implementations (headless, OpenGL, ...) live in separate crates and are
registered by tag at startup.
*/

// Internal modules
mod error;
mod engine;
mod config;
pub mod log;
pub mod renderer;
pub mod flow;
pub mod input;
pub mod app;

// Main artifact namespace module
pub mod artifact {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging entry points
    pub use crate::engine::Engine;

    // Application configuration
    pub use crate::config::{AppConfig, RenderApi, WindowConfig};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Backend interfaces and resource descriptors
    pub mod render {
        pub use crate::renderer::*;
    }

    // Frame recording
    pub mod flow {
        pub use crate::flow::*;
    }

    // Key chords and polling
    pub mod input {
        pub use crate::input::*;
    }

    // Application lifecycle
    pub mod app {
        pub use crate::app::*;
    }
}

// Re-export math library at crate root
pub use glam;
