//! Keyboard input state.
//!
//! A per-key tri-state table: held (`is_down`), pressed this frame
//! (`went_down`), released this frame (`went_up`). The loop driver feeds it
//! from window events and clears the per-frame edges once per frame, after
//! all update callbacks have run. Callbacks read input; they never write it.

use std::collections::HashSet;
use std::hash::Hash;

pub use winit::keyboard::KeyCode;

/// Tri-state input table, generic over the key type.
pub struct Input<T: Eq + Hash + Copy> {
    down: HashSet<T>,
    went_down: HashSet<T>,
    went_up: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self {
            down: HashSet::new(),
            went_down: HashSet::new(),
            went_up: HashSet::new(),
        }
    }

    /// Currently held down.
    pub fn is_down(&self, key: T) -> bool {
        self.down.contains(&key)
    }

    /// Went from up to down this frame.
    pub fn went_down(&self, key: T) -> bool {
        self.went_down.contains(&key)
    }

    /// Went from down to up this frame.
    pub fn went_up(&self, key: T) -> bool {
        self.went_up.contains(&key)
    }

    /// Record a key-down event. Repeats while held do not re-trigger the
    /// `went_down` edge.
    pub(crate) fn press(&mut self, key: T) {
        if self.down.insert(key) {
            self.went_down.insert(key);
        }
    }

    /// Record a key-up event.
    pub(crate) fn release(&mut self, key: T) {
        if self.down.remove(&key) {
            self.went_up.insert(key);
        }
    }

    /// Clear the per-frame edges. Called once per frame by the loop driver,
    /// after updates; `is_down` persists across frames.
    pub(crate) fn clear_frame(&mut self) {
        self.went_down.clear();
        self.went_up.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_down_and_edge() {
        let mut input = Input::new();
        input.press('a');
        assert!(input.is_down('a'));
        assert!(input.went_down('a'));
        assert!(!input.went_up('a'));
    }

    #[test]
    fn edges_clear_but_held_persists() {
        let mut input = Input::new();
        input.press('a');
        input.clear_frame();
        assert!(input.is_down('a'));
        assert!(!input.went_down('a'));
    }

    #[test]
    fn os_key_repeat_does_not_retrigger_edge() {
        let mut input = Input::new();
        input.press('a');
        input.clear_frame();
        input.press('a'); // auto-repeat while held
        assert!(!input.went_down('a'));
    }

    #[test]
    fn release_sets_up_edge_once() {
        let mut input = Input::new();
        input.press('a');
        input.clear_frame();
        input.release('a');
        assert!(!input.is_down('a'));
        assert!(input.went_up('a'));

        input.clear_frame();
        input.release('a'); // spurious release of an up key
        assert!(!input.went_up('a'));
    }
}
