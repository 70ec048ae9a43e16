/// KeyActionMap - key chords bound to actions, polled once per tick

use std::rc::Rc;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::input::{InputSource, KeyChord};

/// Zero-argument action fired when its chord is held
pub type KeyAction = Box<dyn Fn()>;

/// Chord to action bindings over an explicit input source
///
/// Built at application init, then polled read-only every tick. Actions that
/// need to change application state capture shared handles (e.g. `CloseSignal`).
///
/// # Example
///
/// ```ignore
/// let close = context.close.clone();
/// let mut keys = KeyActionMap::new(context.input.clone());
/// keys.bind(Key::LeftControl.with(Key::Q), move || close.request());
/// // every tick:
/// keys.poll()?;
/// ```
pub struct KeyActionMap {
    input: Rc<dyn InputSource>,
    /// Registration order
    bindings: Vec<(KeyChord, KeyAction)>,
    chord_index: FxHashMap<KeyChord, usize>,
}

impl KeyActionMap {
    pub fn new(input: Rc<dyn InputSource>) -> Self {
        Self {
            input,
            bindings: Vec::new(),
            chord_index: FxHashMap::default(),
        }
    }

    /// Bind `action` to `chord`
    ///
    /// Binding an already bound chord replaces its action and keeps its
    /// original position in the poll order. An empty chord is stored but never
    /// fires.
    pub fn bind<F>(&mut self, chord: impl Into<KeyChord>, action: F) -> &mut Self
    where
        F: Fn() + 'static,
    {
        let chord = chord.into();
        if chord.is_empty() {
            crate::engine_warn!("artifact::KeyActionMap", "Empty key chord bound; it will never fire");
        }

        match self.chord_index.get(&chord) {
            Some(&index) => {
                crate::engine_debug!("artifact::KeyActionMap", "Rebinding chord {}", chord);
                self.bindings[index].1 = Box::new(action);
            }
            None => {
                self.chord_index.insert(chord.clone(), self.bindings.len());
                self.bindings.push((chord, Box::new(action)));
            }
        }
        self
    }

    /// Fire the action of every fully held chord, in registration order
    ///
    /// All chords are evaluated before any action runs, so a failing input
    /// query aborts the tick with no action fired. Returns the number of
    /// actions fired.
    pub fn poll(&self) -> Result<usize> {
        let mut held = Vec::new();
        for (index, (chord, _)) in self.bindings.iter().enumerate() {
            if chord.is_empty() {
                continue;
            }
            let is_held = self.chord_held(chord).inspect_err(|error| {
                crate::engine_error!(
                    "artifact::KeyActionMap",
                    "Input query failed for chord {}, tick aborted: {}", chord, error
                );
            })?;
            if is_held {
                held.push(index);
            }
        }

        for &index in &held {
            let (chord, action) = &self.bindings[index];
            crate::engine_debug!("artifact::KeyActionMap", "Chord {} triggered", chord);
            action();
        }

        Ok(held.len())
    }

    fn chord_held(&self, chord: &KeyChord) -> Result<bool> {
        for &key in chord.keys() {
            if !self.input.is_key_pressed(key)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn contains(&self, chord: &KeyChord) -> bool {
        self.chord_index.contains_key(chord)
    }

    /// Bound chords in registration order
    pub fn chords(&self) -> impl Iterator<Item = &KeyChord> + '_ {
        self.bindings.iter().map(|(chord, _)| chord)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
#[path = "key_action_map_tests.rs"]
mod tests;
