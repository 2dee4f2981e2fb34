//! Drag-reorder of columns by their headers.

use std::sync::Arc;

use horizon_columns_core::logging::targets;

use super::ActivationFilter;
use crate::column::Column;
use crate::events::{HeaderEvent, Key, Point, PointerEvent, PointerId};
use crate::layout::ColumnLayout;
use crate::surface::{DropSide, HeaderSurface};

/// Distance the pointer must travel before a press becomes a drag.
pub const MOVE_THRESHOLD: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DropTarget {
    /// Display index of the destination column.
    display_index: usize,
    side: DropSide,
}

#[derive(Debug)]
enum MoveState {
    Idle,
    Armed {
        pointer_id: PointerId,
        down: Point,
        down_x: f32,
    },
    Moving {
        pointer_id: PointerId,
        source: Arc<Column>,
        /// Pointer offset from the left edge of the dragged column.
        grab_offset: f32,
        target: Option<DropTarget>,
    },
}

/// Turns a press-and-drag on a column header into a display reorder.
///
/// `Idle -> Armed -> Moving -> Idle`. A press only becomes a drag after the
/// pointer has travelled more than [`MOVE_THRESHOLD`]; a release before that
/// is left to the caller as a click.
#[derive(Debug)]
pub struct ColumnMoveManipulator {
    filter: ActivationFilter,
    threshold: f32,
    state: MoveState,
}

impl Default for ColumnMoveManipulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnMoveManipulator {
    pub fn new() -> Self {
        Self {
            filter: ActivationFilter::default(),
            threshold: MOVE_THRESHOLD,
            state: MoveState::Idle,
        }
    }

    /// Replaces the activation filter.
    pub fn with_filter(mut self, filter: ActivationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Whether a press is being tracked or a column is being dragged.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, MoveState::Idle)
    }

    /// Whether a column is being dragged.
    pub fn is_moving(&self) -> bool {
        matches!(self.state, MoveState::Moving { .. })
    }

    /// Feeds one event. Returns `true` if the event was consumed.
    ///
    /// The layout is only queried; the reorder itself goes through the
    /// layout's collection.
    pub fn handle_event(
        &mut self,
        event: &HeaderEvent,
        layout: &ColumnLayout,
        surface: &mut dyn HeaderSurface,
    ) -> bool {
        match *event {
            HeaderEvent::PointerDown(ref e) => self.pointer_down(e, layout, surface),
            HeaderEvent::PointerMove(ref e) => self.pointer_move(e, layout, surface),
            HeaderEvent::PointerUp(ref e) => self.pointer_up(e, layout, surface),
            HeaderEvent::PointerCaptureLost(pointer_id) => match self.state {
                MoveState::Moving { pointer_id: p, .. } | MoveState::Armed { pointer_id: p, .. }
                    if p == pointer_id =>
                {
                    self.cancel(surface);
                    true
                }
                _ => false,
            },
            HeaderEvent::KeyDown(key) if key.key == Key::Escape => match self.state {
                MoveState::Moving { .. } => {
                    self.cancel(surface);
                    true
                }
                MoveState::Armed { .. } => {
                    self.state = MoveState::Idle;
                    false
                }
                MoveState::Idle => false,
            },
            HeaderEvent::KeyDown(_) => false,
        }
    }

    /// Aborts any press or drag without reordering.
    pub fn cancel(&mut self, surface: &mut dyn HeaderSurface) {
        match std::mem::replace(&mut self.state, MoveState::Idle) {
            MoveState::Moving { pointer_id, source, .. } => {
                surface.hide_move_preview();
                if surface.has_pointer_capture(pointer_id) {
                    surface.release_pointer(pointer_id);
                }
                tracing::debug!(
                    target: targets::MOVE,
                    column = ?source.id(),
                    "column move cancelled"
                );
            }
            MoveState::Armed { .. } | MoveState::Idle => {}
        }
    }

    fn pointer_down(
        &mut self,
        event: &PointerEvent,
        layout: &ColumnLayout,
        surface: &mut dyn HeaderSurface,
    ) -> bool {
        if !matches!(self.state, MoveState::Idle) || !self.filter.matches(event) {
            return false;
        }
        if !layout.columns().reorderable() {
            return false;
        }

        let down_x = surface.to_layout_space(event.position);
        self.state = MoveState::Armed {
            pointer_id: event.pointer_id,
            down: event.position,
            down_x,
        };
        tracing::trace!(target: targets::MOVE, x = down_x, "column move armed");
        // Left unconsumed so the press can still become a click.
        false
    }

    fn pointer_move(
        &mut self,
        event: &PointerEvent,
        layout: &ColumnLayout,
        surface: &mut dyn HeaderSurface,
    ) -> bool {
        match self.state {
            MoveState::Armed {
                pointer_id,
                down,
                down_x,
            } if pointer_id == event.pointer_id => {
                let dx = event.position.x - down.x;
                let dy = event.position.y - down.y;
                if (dx * dx + dy * dy).sqrt() <= self.threshold {
                    return false;
                }
                self.start_moving(event, down_x, layout, surface)
            }
            MoveState::Moving { pointer_id, .. }
                if pointer_id == event.pointer_id && surface.has_pointer_capture(pointer_id) =>
            {
                let x = surface.to_layout_space(event.position);
                self.track(x, layout, surface);
                true
            }
            _ => false,
        }
    }

    fn start_moving(
        &mut self,
        event: &PointerEvent,
        down_x: f32,
        layout: &ColumnLayout,
        surface: &mut dyn HeaderSurface,
    ) -> bool {
        let Some((source, start)) = layout.column_at(down_x) else {
            self.state = MoveState::Idle;
            return false;
        };
        if !surface.capture_pointer(event.pointer_id) {
            tracing::warn!(
                target: targets::MOVE,
                pointer = event.pointer_id,
                "pointer capture refused"
            );
            self.state = MoveState::Idle;
            return false;
        }

        let width = layout.get_desired_width(&source);
        surface.show_move_preview(source.id(), start, width);
        tracing::debug!(target: targets::MOVE, column = ?source.id(), "column move started");

        self.state = MoveState::Moving {
            pointer_id: event.pointer_id,
            source,
            grab_offset: down_x - start,
            target: None,
        };
        let x = surface.to_layout_space(event.position);
        self.track(x, layout, surface);
        true
    }

    /// Recomputes the drop target for pointer `x` and moves the indicators.
    fn track(&mut self, x: f32, layout: &ColumnLayout, surface: &mut dyn HeaderSurface) {
        let MoveState::Moving {
            grab_offset,
            ref mut target,
            ..
        } = self.state
        else {
            return;
        };

        let Some((column, start, side)) = drop_location(layout, x) else {
            *target = None;
            return;
        };
        let width = layout.get_desired_width(&column);
        let drop_x = match side {
            DropSide::Before => start,
            DropSide::After => start + width,
        };

        *target = column.display_index().map(|display_index| DropTarget { display_index, side });
        surface.move_move_preview(x - grab_offset, drop_x, side);
    }

    fn pointer_up(
        &mut self,
        event: &PointerEvent,
        layout: &ColumnLayout,
        surface: &mut dyn HeaderSurface,
    ) -> bool {
        match self.state {
            MoveState::Armed { pointer_id, .. } if pointer_id == event.pointer_id => {
                self.state = MoveState::Idle;
                false
            }
            MoveState::Moving { pointer_id, .. }
                if pointer_id == event.pointer_id && surface.has_pointer_capture(pointer_id) =>
            {
                let x = surface.to_layout_space(event.position);
                self.track(x, layout, surface);

                let MoveState::Moving {
                    pointer_id,
                    source,
                    target,
                    ..
                } = std::mem::replace(&mut self.state, MoveState::Idle)
                else {
                    return false;
                };
                surface.hide_move_preview();
                surface.release_pointer(pointer_id);

                if let (Some(target), Some(from)) = (target, source.display_index()) {
                    commit_move(layout, &source, from, target);
                }
                true
            }
            _ => false,
        }
    }
}

/// The visible column under `x` and which half of it `x` falls in.
///
/// Positions left of the first column drop before it; positions past the last
/// column drop after it.
fn drop_location(layout: &ColumnLayout, x: f32) -> Option<(Arc<Column>, f32, DropSide)> {
    if let Some((column, start)) = layout.column_at(x.max(0.0)) {
        let width = layout.get_desired_width(&column);
        let side = if x < start + width / 2.0 {
            DropSide::Before
        } else {
            DropSide::After
        };
        return Some((column, start, side));
    }

    let last = layout.columns().visible_list().pop()?;
    let start = layout.get_desired_position(&last)?;
    Some((last, start, DropSide::After))
}

/// Display index the source lands on once it is removed from `from`.
pub(crate) fn destination_index(from: usize, target_index: usize, side: DropSide) -> usize {
    let mut to = match side {
        DropSide::Before => target_index,
        DropSide::After => target_index + 1,
    };
    if from < to {
        to -= 1;
    }
    to
}

fn commit_move(layout: &ColumnLayout, source: &Column, from: usize, target: DropTarget) {
    let to = destination_index(from, target.display_index, target.side);
    if to == from {
        tracing::trace!(target: targets::MOVE, column = ?source.id(), "column dropped in place");
        return;
    }
    if layout.columns().reorder_display(from, to) {
        tracing::debug!(target: targets::MOVE, column = ?source.id(), from, to, "column moved");
    }
}
