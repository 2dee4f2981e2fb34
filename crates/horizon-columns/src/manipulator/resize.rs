//! Drag-resize of a single column through its resize handle.

use std::sync::Arc;

use horizon_columns_core::logging::targets;

use super::ActivationFilter;
use crate::column::Column;
use crate::events::{HeaderEvent, Key, PointerEvent, PointerId};
use crate::layout::ColumnLayout;
use crate::surface::HeaderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResizeState {
    Idle,
    Active {
        pointer_id: PointerId,
        /// Set once the pointer has moved after the press.
        dragging: bool,
        preview: bool,
    },
}

/// Turns presses and drags on a column's resize handle into a drag-resize
/// session on [`ColumnLayout`].
///
/// `Idle -> Active (not dragging) -> Active (dragging) -> Idle`. Every exit
/// path ends the session, hides the preview line and releases the pointer.
#[derive(Debug)]
pub struct ColumnResizeManipulator {
    column: Arc<Column>,
    filter: ActivationFilter,
    state: ResizeState,
}

impl ColumnResizeManipulator {
    /// Creates a manipulator for `column`'s resize handle.
    pub fn new(column: Arc<Column>) -> Self {
        Self {
            column,
            filter: ActivationFilter::default(),
            state: ResizeState::Idle,
        }
    }

    /// Replaces the activation filter.
    pub fn with_filter(mut self, filter: ActivationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The column this manipulator resizes.
    pub fn column(&self) -> &Arc<Column> {
        &self.column
    }

    /// Whether a resize session is running.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ResizeState::Active { .. })
    }

    /// Whether the pointer has moved since the session started.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ResizeState::Active { dragging: true, .. })
    }

    /// Feeds one event. Returns `true` if the event was consumed.
    pub fn handle_event(
        &mut self,
        event: &HeaderEvent,
        layout: &mut ColumnLayout,
        surface: &mut dyn HeaderSurface,
    ) -> bool {
        match *event {
            HeaderEvent::PointerDown(ref e) => self.pointer_down(e, layout, surface),
            HeaderEvent::PointerMove(ref e) => self.pointer_move(e, layout, surface),
            HeaderEvent::PointerUp(ref e) => {
                if !self.holds(e.pointer_id, surface) {
                    return false;
                }
                self.finish(layout, surface, false);
                true
            }
            HeaderEvent::PointerCaptureLost(pointer_id) => match self.state {
                ResizeState::Active { pointer_id: p, .. } if p == pointer_id => {
                    self.finish(layout, surface, true);
                    true
                }
                _ => false,
            },
            HeaderEvent::KeyDown(key) => match self.state {
                ResizeState::Active {
                    dragging: true,
                    preview: true,
                    ..
                } if key.key == Key::Escape => {
                    self.finish(layout, surface, true);
                    true
                }
                _ => false,
            },
        }
    }

    /// Ends a running session as cancelled. Does nothing when idle.
    pub fn cancel(&mut self, layout: &mut ColumnLayout, surface: &mut dyn HeaderSurface) {
        if self.is_active() {
            self.finish(layout, surface, true);
        }
    }

    fn pointer_down(
        &mut self,
        event: &PointerEvent,
        layout: &mut ColumnLayout,
        surface: &mut dyn HeaderSurface,
    ) -> bool {
        if self.state != ResizeState::Idle || !self.filter.matches(event) {
            return false;
        }
        if !self.column.resizable() || !layout.columns().resizable() {
            tracing::trace!(
                target: targets::RESIZE,
                column = ?self.column.id(),
                "column not resizable"
            );
            return false;
        }

        let x = surface.to_layout_space(event.position);
        let preview = layout.columns().resize_preview();
        if let Err(err) = layout.begin_drag_resize(&self.column, x, preview) {
            tracing::warn!(
                target: targets::RESIZE,
                column = ?self.column.id(),
                %err,
                "cannot start resize"
            );
            return false;
        }

        if !surface.capture_pointer(event.pointer_id) {
            tracing::warn!(
                target: targets::RESIZE,
                pointer = event.pointer_id,
                "pointer capture refused"
            );
            if let Err(err) = layout.end_drag_resize(&self.column, true) {
                tracing::warn!(target: targets::RESIZE, %err, "failed to end resize");
            }
            return false;
        }

        if preview {
            surface.show_resize_preview(self.column.id(), self.boundary(layout));
        }
        self.state = ResizeState::Active {
            pointer_id: event.pointer_id,
            dragging: false,
            preview,
        };
        tracing::trace!(
            target: targets::RESIZE,
            column = ?self.column.id(),
            x,
            preview,
            "resize armed"
        );
        true
    }

    fn pointer_move(
        &mut self,
        event: &PointerEvent,
        layout: &mut ColumnLayout,
        surface: &mut dyn HeaderSurface,
    ) -> bool {
        if !self.holds(event.pointer_id, surface) {
            return false;
        }
        let ResizeState::Active {
            ref mut dragging,
            preview,
            ..
        } = self.state
        else {
            return false;
        };

        let x = surface.to_layout_space(event.position);
        if let Err(err) = layout.drag_resize(&self.column, x) {
            tracing::warn!(target: targets::RESIZE, %err, "drag resize rejected");
            return false;
        }
        *dragging = true;

        if preview {
            surface.move_resize_preview(self.boundary(layout));
        }
        true
    }

    /// Whether a session is running for `pointer` and the capture is still held.
    fn holds(&self, pointer: PointerId, surface: &dyn HeaderSurface) -> bool {
        match self.state {
            ResizeState::Active { pointer_id, .. } => {
                pointer_id == pointer && surface.has_pointer_capture(pointer)
            }
            ResizeState::Idle => false,
        }
    }

    /// The right edge of the column as currently rendered.
    fn boundary(&self, layout: &ColumnLayout) -> f32 {
        let start = layout.get_desired_position(&self.column).unwrap_or(0.0);
        start + layout.get_desired_width(&self.column)
    }

    fn finish(
        &mut self,
        layout: &mut ColumnLayout,
        surface: &mut dyn HeaderSurface,
        cancelled: bool,
    ) {
        let ResizeState::Active {
            pointer_id, preview, ..
        } = std::mem::replace(&mut self.state, ResizeState::Idle)
        else {
            return;
        };

        if let Err(err) = layout.end_drag_resize(&self.column, cancelled) {
            tracing::warn!(target: targets::RESIZE, %err, "failed to end resize");
        }
        if preview {
            surface.hide_resize_preview();
        }
        if surface.has_pointer_capture(pointer_id) {
            surface.release_pointer(pointer_id);
        }
        tracing::trace!(
            target: targets::RESIZE,
            column = ?self.column.id(),
            cancelled,
            "resize finished"
        );
    }
}
