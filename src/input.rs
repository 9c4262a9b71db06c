//! Window and input event payloads.

use crate::vec::Vec2;

/// Window dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        WindowSize { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Phase of a touch point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointState {
    Started,
    Motion,
    Finished,
    Interrupted,
    Stationary,
    Leave,
}

impl PointState {
    /// Finished or Interrupted.
    pub fn is_end(self) -> bool {
        matches!(self, PointState::Finished | PointState::Interrupted)
    }
}

/// A single-point touch or mouse event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub state: PointState,
    /// Window pixels, origin top-left.
    pub screen: Vec2<f32>,
}

impl TouchEvent {
    pub fn new(state: PointState, x: f32, y: f32) -> Self {
        TouchEvent { state, screen: Vec2::new(x, y) }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    Down,
    Up,
}

/// Hardware key codes the demos care about (X11 numbering).
pub mod keycode {
    pub const ESCAPE: i32 = 9;
    pub const CONTROL_LEFT: i32 = 37;
    pub const SHIFT_LEFT: i32 = 50;
    pub const SHIFT_RIGHT: i32 = 62;
    pub const ALT_LEFT: i32 = 64;
    pub const CONTROL_RIGHT: i32 = 105;
    pub const ALT_RIGHT: i32 = 108;
    pub const BACK: i32 = 166;
}

/// A key press or release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub state: KeyState,
    pub code: i32,
    /// Symbolic key name, e.g. `"Escape"`, `"1"`.
    pub name: String,
    /// Text the key produces, e.g. `" "`, `"m"`. Empty for modifiers.
    pub text: String,
}

impl KeyEvent {
    pub fn new(state: KeyState, code: i32, name: impl Into<String>, text: impl Into<String>) -> Self {
        KeyEvent { state, code, name: name.into(), text: text.into() }
    }

    /// A key that produces `text` and is named after it.
    pub fn text(state: KeyState, text: &str) -> Self {
        KeyEvent::new(state, 0, text, text)
    }

    pub fn is_down(&self) -> bool {
        self.state == KeyState::Down
    }

    /// Escape or Back.
    pub fn is_quit(&self) -> bool {
        self.code == keycode::ESCAPE || self.code == keycode::BACK
    }
}

/// Held modifier keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Track a key event. Returns true when the key was a modifier.
    pub fn apply(&mut self, event: &KeyEvent) -> bool {
        let held = event.is_down();
        match event.code {
            keycode::CONTROL_LEFT | keycode::CONTROL_RIGHT => self.ctrl = held,
            keycode::ALT_LEFT | keycode::ALT_RIGHT => self.alt = held,
            keycode::SHIFT_LEFT | keycode::SHIFT_RIGHT => self.shift = held,
            _ => return false,
        }
        true
    }
}
