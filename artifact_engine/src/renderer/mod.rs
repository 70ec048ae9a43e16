/// Renderer module - backend interfaces, handles and resource descriptors

// Module declarations
pub mod handle;
pub mod backend;
pub mod resource_desc;
pub mod backend_registry;

// Test doubles (no GPU, no window)
#[cfg(test)]
pub mod mock_backend;

// Re-export everything from backend.rs
pub use backend::*;

// Re-export from other modules
pub use handle::*;
pub use resource_desc::*;
pub use backend_registry::*;
