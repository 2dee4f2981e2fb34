//! The seam between the manipulators and the visual/input layer.

use crate::column::ColumnId;
use crate::events::{Point, PointerId};

/// Which side of the destination column a dragged column would land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropSide {
    Before,
    After,
}

/// Services the header manipulators need from the element hosting them.
///
/// Implemented by the visual layer. Every method that shows an indicator has
/// a matching `hide_*`; the manipulators call it on every exit path.
pub trait HeaderSurface {
    /// Routes all further events of `pointer` to the caller.
    ///
    /// Returns `false` if the capture could not be taken.
    fn capture_pointer(&mut self, pointer: PointerId) -> bool;

    /// Releases a capture taken with [`capture_pointer`](Self::capture_pointer).
    fn release_pointer(&mut self, pointer: PointerId);

    /// Whether `pointer` is currently captured.
    fn has_pointer_capture(&self, pointer: PointerId) -> bool;

    /// Converts an element-local position into the layout's horizontal
    /// coordinate space (accounting for scrolling).
    fn to_layout_space(&self, position: Point) -> f32;

    /// Shows the line tracking the dragged boundary of a preview resize.
    fn show_resize_preview(&mut self, column: ColumnId, x: f32);

    /// Moves the resize preview line.
    fn move_resize_preview(&mut self, x: f32);

    /// Removes the resize preview line.
    fn hide_resize_preview(&mut self);

    /// Shows the floating copy of the column being reordered.
    fn show_move_preview(&mut self, column: ColumnId, x: f32, width: f32);

    /// Moves the floating copy and the drop location indicator.
    fn move_move_preview(&mut self, x: f32, drop_x: f32, side: DropSide);

    /// Removes the floating copy and the drop location indicator.
    fn hide_move_preview(&mut self);
}
