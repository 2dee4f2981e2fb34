//! Input events consumed by the header manipulators.
//!
//! The visual layer translates its native pointer and keyboard input into
//! [`HeaderEvent`]s. Positions are element-local; manipulators convert them
//! into layout space through
//! [`HeaderSurface::to_layout_space`](crate::HeaderSurface::to_layout_space).

/// A point in element-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

/// Identifier of a pointer (mouse, pen or touch contact).
pub type PointerId = u32;

/// A pointer press, move or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The pointer that produced the event.
    pub pointer_id: PointerId,
    /// The button involved; for moves, the button held, if any.
    pub button: Option<MouseButton>,
    /// Position in element-local coordinates.
    pub position: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// A primary-button event of pointer `0` with no modifiers.
    pub fn primary(x: f32) -> Self {
        Self {
            pointer_id: 0,
            button: Some(MouseButton::Left),
            position: Point::new(x, 0.0),
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Sets the pointer id.
    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Sets the button.
    pub fn with_button(mut self, button: Option<MouseButton>) -> Self {
        self.button = button;
        self
    }

    /// Sets the modifiers.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Keys the manipulators react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// Any other key.
    Other,
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
}

impl KeyEvent {
    /// Create a key event with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// Input delivered to a manipulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// The pointer capture held for `PointerId` was taken away.
    PointerCaptureLost(PointerId),
    KeyDown(KeyEvent),
}

impl HeaderEvent {
    /// The pointer id of a pointer event.
    pub fn pointer_id(&self) -> Option<PointerId> {
        match self {
            Self::PointerDown(e) | Self::PointerMove(e) | Self::PointerUp(e) => Some(e.pointer_id),
            Self::PointerCaptureLost(id) => Some(*id),
            Self::KeyDown(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers() {
        assert!(KeyboardModifiers::NONE.none());
        assert!(KeyboardModifiers::SHIFT.any());
        assert_eq!(KeyboardModifiers::default(), KeyboardModifiers::NONE);
    }

    #[test]
    fn test_event_pointer_id() {
        let down = HeaderEvent::PointerDown(PointerEvent::primary(10.0).with_pointer_id(3));
        assert_eq!(down.pointer_id(), Some(3));
        assert_eq!(HeaderEvent::PointerCaptureLost(7).pointer_id(), Some(7));
        assert_eq!(HeaderEvent::KeyDown(KeyEvent::new(Key::Escape)).pointer_id(), None);
    }
}
