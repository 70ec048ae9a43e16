/// ScriptedInput - InputSource driven by a key-press script
///
/// Stands in for a window's keyboard: each scripted press holds a chord for a
/// number of ticks. Keys can also be held manually, which is what tests use.

use std::cell::{Cell, RefCell};
use rustc_hash::FxHashSet;
use artifact_engine::artifact::{
    Result,
    input::{InputSource, Key, KeyChord},
};
use artifact_engine::engine_debug;

/// Hold `chord` during ticks `[at_tick, at_tick + ticks)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub chord: KeyChord,
    pub at_tick: u64,
    pub ticks: u64,
}

impl KeyPress {
    pub fn new(chord: impl Into<KeyChord>, at_tick: u64, ticks: u64) -> Self {
        Self {
            chord: chord.into(),
            at_tick,
            ticks,
        }
    }

    pub fn is_active(&self, tick: u64) -> bool {
        tick >= self.at_tick && tick - self.at_tick < self.ticks
    }
}

#[derive(Default)]
pub struct ScriptedInput {
    script: Vec<KeyPress>,
    tick: Cell<u64>,
    /// Keys held by the script for the current tick
    scripted: RefCell<FxHashSet<Key>>,
    /// Keys held until released
    held: RefCell<FxHashSet<Key>>,
}

impl ScriptedInput {
    pub fn new(script: Vec<KeyPress>) -> Self {
        let input = Self {
            script,
            ..Default::default()
        };
        input.apply_script(0);
        input
    }

    pub fn hold(&self, key: Key) {
        self.held.borrow_mut().insert(key);
    }

    pub fn release(&self, key: Key) {
        self.held.borrow_mut().remove(&key);
    }

    pub fn current_tick(&self) -> u64 {
        self.tick.get()
    }

    pub fn script(&self) -> &[KeyPress] {
        &self.script
    }

    fn apply_script(&self, tick: u64) {
        let mut scripted = self.scripted.borrow_mut();
        scripted.clear();
        for press in self.script.iter().filter(|press| press.is_active(tick)) {
            if press.at_tick == tick {
                engine_debug!("artifact::headless", "Scripted press {} at tick {}", press.chord, tick);
            }
            scripted.extend(press.chord.keys().iter().copied());
        }
        self.tick.set(tick);
    }
}

impl InputSource for ScriptedInput {
    fn is_key_pressed(&self, key: Key) -> Result<bool> {
        Ok(self.scripted.borrow().contains(&key) || self.held.borrow().contains(&key))
    }

    fn begin_tick(&self, tick: u64) -> Result<()> {
        self.apply_script(tick);
        Ok(())
    }
}

#[cfg(test)]
#[path = "scripted_input_tests.rs"]
mod tests;
