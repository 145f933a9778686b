//! # Input snapshot
//!
//! The host drains its event queue once per frame into an [`InputState`]:
//!
//! ```rust
//! use trellis_core::*;
//!
//! let mut input = InputState::new();
//! input.start_frame();
//! input.push_input(InputEvent::PointerMove(PixelPoint::new(10, 20)));
//! input.push_input(InputEvent::MouseDown(MouseButton::Left));
//! assert!(input.mouse_pressed(MouseButton::Left));
//! assert_eq!(input.mouse_down_pos, Some(PixelPoint::new(10, 20)));
//! ```
//!
//! Edge flags (`pressed`, `released`), the scroll delta and the key list live
//! for exactly one frame. The mouse-down anchor survives until the frame after
//! the left button is released, so widgets can still see where a drag started
//! on the frame it ends.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::{PixelBBox, PixelPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT = 1 << 2;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(b: MouseButton) -> Self {
        match b {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Middle => MouseButtons::MIDDLE,
            MouseButton::Right => MouseButtons::RIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win key on Windows
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Character(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    F(u8), // F1-F12
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub is_repeat: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            is_repeat: false,
        }
    }
}

/// One discrete event from the host's input queue.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent {
    PointerMove(PixelPoint),
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Wheel delta in pixels; positive values move content up (offset grows).
    Scroll(f32),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    ModifiersChanged(Modifiers),
}

/// Per-frame aggregation of pointer and keyboard input.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub mouse_pos: PixelPoint,
    /// Where the left button went down; cleared the frame after release.
    pub mouse_down_pos: Option<PixelPoint>,
    pub pressed: MouseButtons,
    pub released: MouseButtons,
    pub held: MouseButtons,
    pub scroll: f32,
    pub modifiers: Modifiers,
    key_events: SmallVec<[KeyEvent; 8]>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears edge-triggered state left over from the previous frame.
    pub fn start_frame(&mut self) {
        if self.released.contains(MouseButtons::LEFT) && !self.held.contains(MouseButtons::LEFT) {
            self.mouse_down_pos = None;
        }
        self.pressed = MouseButtons::empty();
        self.released = MouseButtons::empty();
        self.scroll = 0.0;
        self.key_events.clear();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove(p) => self.mouse_pos = p,
            InputEvent::MouseDown(b) => {
                self.pressed |= MouseButtons::from(b);
                self.held |= MouseButtons::from(b);
                if b == MouseButton::Left {
                    self.mouse_down_pos = Some(self.mouse_pos);
                }
            }
            InputEvent::MouseUp(b) => {
                self.released |= MouseButtons::from(b);
                self.held -= MouseButtons::from(b);
            }
            InputEvent::Scroll(dy) => self.scroll += dy,
            InputEvent::KeyDown(ev) => {
                self.modifiers = ev.modifiers;
                self.key_events.push(ev);
            }
            InputEvent::KeyUp(ev) => self.modifiers = ev.modifiers,
            InputEvent::ModifiersChanged(m) => self.modifiers = m,
        }
    }

    pub fn mouse_pressed(&self, b: MouseButton) -> bool {
        self.pressed.contains(b.into())
    }

    pub fn mouse_released(&self, b: MouseButton) -> bool {
        self.released.contains(b.into())
    }

    pub fn mouse_held(&self, b: MouseButton) -> bool {
        self.held.contains(b.into())
    }

    /// Key-down events received this frame, in arrival order.
    pub fn key_events(&self) -> &[KeyEvent] {
        &self.key_events
    }

    pub fn key_pressed(&self, key: &Key) -> bool {
        self.key_events.iter().any(|ev| &ev.key == key)
    }

    /// True when `region` holds either the pointer or the mouse-down anchor.
    pub fn is_consumed_by(&self, region: &PixelBBox) -> bool {
        region.contains(self.mouse_pos) || self.mouse_down_pos.is_some_and(|a| region.contains(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_at(input: &mut InputState, x: i32, y: i32) {
        input.push_input(InputEvent::PointerMove(PixelPoint::new(x, y)));
        input.push_input(InputEvent::MouseDown(MouseButton::Left));
    }

    #[test]
    fn anchor_survives_release_frame() {
        let mut input = InputState::new();
        click_at(&mut input, 5, 5);
        input.start_frame();
        assert!(!input.mouse_pressed(MouseButton::Left));
        assert!(input.mouse_held(MouseButton::Left));
        assert_eq!(input.mouse_down_pos, Some(PixelPoint::new(5, 5)));

        input.push_input(InputEvent::PointerMove(PixelPoint::new(9, 9)));
        input.push_input(InputEvent::MouseUp(MouseButton::Left));
        assert!(input.mouse_released(MouseButton::Left));
        assert_eq!(input.mouse_down_pos, Some(PixelPoint::new(5, 5)));

        input.start_frame();
        assert_eq!(input.mouse_down_pos, None);
        assert!(!input.mouse_released(MouseButton::Left));
    }

    #[test]
    fn release_then_press_in_one_frame_keeps_new_anchor() {
        let mut input = InputState::new();
        click_at(&mut input, 1, 1);
        input.start_frame();
        input.push_input(InputEvent::MouseUp(MouseButton::Left));
        click_at(&mut input, 7, 3);
        input.start_frame();
        assert_eq!(input.mouse_down_pos, Some(PixelPoint::new(7, 3)));
    }

    #[test]
    fn right_button_does_not_anchor() {
        let mut input = InputState::new();
        input.push_input(InputEvent::MouseDown(MouseButton::Right));
        assert!(input.mouse_pressed(MouseButton::Right));
        assert_eq!(input.mouse_down_pos, None);
    }

    #[test]
    fn scroll_and_keys_reset_each_frame() {
        let mut input = InputState::new();
        input.push_input(InputEvent::Scroll(3.0));
        input.push_input(InputEvent::Scroll(2.5));
        input.push_input(InputEvent::KeyDown(KeyEvent::new(Key::Character('a'))));
        assert_eq!(input.scroll, 5.5);
        assert!(input.key_pressed(&Key::Character('a')));

        input.start_frame();
        assert_eq!(input.scroll, 0.0);
        assert!(input.key_events().is_empty());
    }

    #[test]
    fn consumption_checks_pointer_and_anchor() {
        let mut input = InputState::new();
        let region = PixelBBox::new(0, 10, 0, 10);
        click_at(&mut input, 5, 5);
        input.push_input(InputEvent::PointerMove(PixelPoint::new(50, 50)));
        assert!(input.is_consumed_by(&region));

        input.push_input(InputEvent::MouseUp(MouseButton::Left));
        input.start_frame();
        assert!(!input.is_consumed_by(&region));
    }
}
