//! Pointer-driven state machines that resize and reorder columns.
//!
//! Manipulators turn [`HeaderEvent`](crate::HeaderEvent)s into calls on
//! [`ColumnLayout`](crate::ColumnLayout) and
//! [`ColumnCollection`](crate::ColumnCollection). They hold no widths of
//! their own; all visual feedback goes through a
//! [`HeaderSurface`](crate::HeaderSurface).

mod reorder;
mod resize;

pub use reorder::{ColumnMoveManipulator, MOVE_THRESHOLD};
pub use resize::ColumnResizeManipulator;

use crate::events::{KeyboardModifiers, MouseButton, PointerEvent};

/// Decides which pointer presses start a manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationFilter {
    /// The button that must be pressed.
    pub button: MouseButton,
    /// Modifiers that must be held exactly, or `None` to accept any.
    pub modifiers: Option<KeyboardModifiers>,
}

impl Default for ActivationFilter {
    fn default() -> Self {
        Self::new(MouseButton::Left)
    }
}

impl ActivationFilter {
    /// Accepts `button` with no modifiers held.
    pub fn new(button: MouseButton) -> Self {
        Self {
            button,
            modifiers: Some(KeyboardModifiers::NONE),
        }
    }

    /// Requires exactly `modifiers`.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = Some(modifiers);
        self
    }

    /// Accepts the button regardless of modifiers.
    pub fn with_any_modifiers(mut self) -> Self {
        self.modifiers = None;
        self
    }

    /// Whether `event` starts a manipulation.
    pub fn matches(&self, event: &PointerEvent) -> bool {
        event.button == Some(self.button) && self.modifiers.is_none_or(|m| m == event.modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_plain_left_button() {
        let filter = ActivationFilter::default();
        assert!(filter.matches(&PointerEvent::primary(0.0)));
        let shifted = PointerEvent::primary(0.0).with_modifiers(KeyboardModifiers::SHIFT);
        assert!(!filter.matches(&shifted));
        assert!(!filter.matches(&PointerEvent::primary(0.0).with_button(Some(MouseButton::Right))));
        assert!(!filter.matches(&PointerEvent::primary(0.0).with_button(None)));
    }

    #[test]
    fn test_any_modifiers() {
        let filter = ActivationFilter::new(MouseButton::Middle).with_any_modifiers();
        let event = PointerEvent::primary(0.0)
            .with_button(Some(MouseButton::Middle))
            .with_modifiers(KeyboardModifiers::CTRL);
        assert!(filter.matches(&event));
    }
}
