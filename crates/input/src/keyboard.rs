use mallspace_common::MoveIntent;
use std::collections::HashSet;

/// Logical keys the storefront cares about. Both WASD and the arrow
/// cluster are bound by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    E,
}

/// Binding table from keys to intent slots.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: Vec<Key>,
    pub back: Vec<Key>,
    pub left: Vec<Key>,
    pub right: Vec<Key>,
    pub interact: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: vec![Key::W, Key::ArrowUp],
            back: vec![Key::S, Key::ArrowDown],
            left: vec![Key::A, Key::ArrowLeft],
            right: vec![Key::D, Key::ArrowRight],
            interact: vec![Key::E],
        }
    }
}

/// Tracks currently pressed keys and produces the per-frame intent.
///
/// Interact is reported only on the press edge, not while held, so a
/// single press toggles a door exactly once no matter how many frames
/// the key stays down.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,
    pressed: HashSet<Key>,
    interact_was_down: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
            interact_was_down: false,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.pressed.contains(k))
    }

    /// Directional intent for this frame.
    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.any_down(&self.bindings.forward),
            back: self.any_down(&self.bindings.back),
            left: self.any_down(&self.bindings.left),
            right: self.any_down(&self.bindings.right),
        }
    }

    /// True exactly once per interact key press. Call once per frame.
    pub fn take_interact(&mut self) -> bool {
        let down = self.any_down(&self.bindings.interact);
        let edge = down && !self.interact_was_down;
        self.interact_was_down = down;
        edge
    }
}
