/// Input module - keys, chords and chord-to-action polling

// Module declarations
pub mod key;
pub mod input_source;
pub mod key_action_map;

pub use key::*;
pub use input_source::*;
pub use key_action_map::*;
