/// InputSource trait - key state queries from the backend window

use crate::error::Result;
use crate::input::Key;

/// Current keyboard state, owned by the backend
///
/// Queried read-only once per tick by `KeyActionMap::poll`. An `Err` means the
/// backend could not answer (device or window lost) and aborts the tick.
pub trait InputSource {
    fn is_key_pressed(&self, key: Key) -> Result<bool>;

    /// Pump pending window events; called by the runner at the start of each tick
    fn begin_tick(&self, _tick: u64) -> Result<()> {
        Ok(())
    }
}
