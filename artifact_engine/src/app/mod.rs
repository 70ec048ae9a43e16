/// App module - application lifecycle and the tick driver

// Module declarations
pub mod application;
pub mod runner;

pub use application::*;
pub use runner::*;
