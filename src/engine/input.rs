use std::collections::HashSet;

use glutin::event::{ElementState, VirtualKeyCode};

/// Keys the demos react to. Everything else coming from the window is ignored.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    Space,
    Escape,
}

impl Key {
    pub fn from_virtual(code: VirtualKeyCode) -> Option<Self> {
        let key = match code {
            VirtualKeyCode::Left => Key::Left,
            VirtualKeyCode::Right => Key::Right,
            VirtualKeyCode::Up => Key::Up,
            VirtualKeyCode::Down => Key::Down,
            VirtualKeyCode::W => Key::W,
            VirtualKeyCode::A => Key::A,
            VirtualKeyCode::S => Key::S,
            VirtualKeyCode::D => Key::D,
            VirtualKeyCode::Space => Key::Space,
            VirtualKeyCode::Escape => Key::Escape,
            _ => return None,
        };
        Some(key)
    }
}

/// Set of currently held keys, fed from window keyboard events.
#[derive(Debug, Default, Clone)]
pub struct KeyboardState {
    keys_down: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys_down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys_down.remove(&key);
    }

    /// Applies a raw window key event. Returns the mapped key, if any.
    pub fn apply(&mut self, code: Option<VirtualKeyCode>, state: ElementState) -> Option<Key> {
        let key = Key::from_virtual(code?)?;
        match state {
            ElementState::Pressed => self.press(key),
            ElementState::Released => self.release(key),
        }
        Some(key)
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Drops every held key. Used on focus loss so keys released elsewhere don't stick.
    pub fn clear(&mut self) {
        self.keys_down.clear();
    }

    /// First held key in `order`.
    pub fn first_down(&self, order: &[Key]) -> Option<Key> {
        order.iter().copied().find(|key| self.is_down(*key))
    }
}
