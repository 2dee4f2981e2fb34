//! Glue between a column collection, its layout, the manipulators and the
//! visual layer.
//!
//! [`HeaderController`] decides when layout passes run. Geometry changes run
//! a pass right away, up to [`MAX_LAYOUT_PASSES_PER_FRAME`] per frame; further
//! passes and passes requested by column changes are deferred to the next
//! [`begin_frame`](HeaderController::begin_frame) or
//! [`update`](HeaderController::update). No pass runs while a drag is in
//! progress; a deferred one runs as soon as the drag ends.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use horizon_columns_core::logging::targets;
use horizon_columns_core::{ConnectionId, Signal};
use parking_lot::Mutex;

use crate::collection::ColumnCollection;
use crate::column::{Column, ColumnId};
use crate::events::HeaderEvent;
use crate::layout::ColumnLayout;
use crate::manipulator::{ColumnMoveManipulator, ColumnResizeManipulator};
use crate::surface::HeaderSurface;

/// Layout passes allowed per frame before further passes are deferred.
pub const MAX_LAYOUT_PASSES_PER_FRAME: u32 = 2;

/// The part of the header an event was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderTarget {
    /// The resize handle on the right edge of a column.
    ResizeHandle(ColumnId),
    /// A column header body.
    Header,
}

enum ManipulatorChange {
    Added(Arc<Column>),
    Removed(ColumnId),
}

/// Written from signal slots, drained by the controller.
struct HeaderShared {
    layout_pending: AtomicBool,
    changes: Mutex<Vec<ManipulatorChange>>,
}

/// Drives a [`ColumnLayout`] and the header manipulators for one view.
pub struct HeaderController<S: HeaderSurface> {
    columns: Arc<ColumnCollection>,
    layout: ColumnLayout,
    surface: S,
    resizers: Vec<ColumnResizeManipulator>,
    mover: ColumnMoveManipulator,
    shared: Arc<HeaderShared>,
    layout_requested: ConnectionId,
    column_added: ConnectionId,
    column_removed: ConnectionId,
    viewport_width: f32,
    passes_this_frame: u32,
}

impl<S: HeaderSurface> std::fmt::Debug for HeaderController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderController")
            .field("viewport_width", &self.viewport_width)
            .field("passes_this_frame", &self.passes_this_frame)
            .field("layout_pending", &self.is_layout_pending())
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl<S: HeaderSurface> HeaderController<S> {
    /// Creates a controller for `columns`, rendering through `surface`.
    pub fn new(columns: Arc<ColumnCollection>, surface: S) -> Self {
        let layout = ColumnLayout::new(columns.clone());
        let shared = Arc::new(HeaderShared {
            layout_pending: AtomicBool::new(true),
            changes: Mutex::new(Vec::new()),
        });

        let weak = Arc::downgrade(&shared);
        let layout_requested = layout.layout_requested().connect(move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.layout_pending.store(true, Ordering::SeqCst);
            }
        });

        let weak = Arc::downgrade(&shared);
        let column_added = columns.column_added.connect(move |(column, _)| {
            if let Some(shared) = weak.upgrade() {
                shared.changes.lock().push(ManipulatorChange::Added(column.clone()));
            }
        });

        let weak = Arc::downgrade(&shared);
        let column_removed = columns.column_removed.connect(move |column: &Arc<Column>| {
            if let Some(shared) = weak.upgrade() {
                shared.changes.lock().push(ManipulatorChange::Removed(column.id()));
            }
        });

        let resizers = columns
            .columns()
            .into_iter()
            .map(ColumnResizeManipulator::new)
            .collect();

        Self {
            columns,
            layout,
            surface,
            resizers,
            mover: ColumnMoveManipulator::new(),
            shared,
            layout_requested,
            column_added,
            column_removed,
            viewport_width: f32::NAN,
            passes_this_frame: 0,
        }
    }

    pub fn columns(&self) -> &Arc<ColumnCollection> {
        &self.columns
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Emitted whenever a column's rendered width changes. Row virtualizers
    /// subscribe here to re-measure their cells.
    pub fn column_resized(&self) -> &Signal<(ColumnId, f32)> {
        self.layout.column_resized()
    }

    /// The last width passed to [`set_viewport_width`](Self::set_viewport_width).
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Whether a layout pass is waiting to run.
    pub fn is_layout_pending(&self) -> bool {
        self.shared.layout_pending.load(Ordering::SeqCst)
    }

    /// Whether a resize or move drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.layout.is_dragging()
            || self.resizers.iter().any(ColumnResizeManipulator::is_active)
            || self.mover.is_moving()
    }

    /// Layout passes run since the last [`begin_frame`](Self::begin_frame).
    pub fn passes_this_frame(&self) -> u32 {
        self.passes_this_frame
    }

    /// The container width changed.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
        self.shared.layout_pending.store(true, Ordering::SeqCst);
        self.run_pending_layout(false);
    }

    /// Starts a new frame: resets the pass budget and runs deferred work.
    pub fn begin_frame(&mut self) {
        self.passes_this_frame = 0;
        self.update();
    }

    /// Applies queued column additions/removals and runs a pending layout
    /// pass if the frame budget allows it.
    pub fn update(&mut self) {
        self.sync_manipulators();
        self.run_pending_layout(false);
    }

    /// Resizes every visible column so they exactly fill the viewport.
    pub fn resize_to_fit(&mut self) {
        self.sync_manipulators();
        if self.viewport_width.is_nan() {
            tracing::debug!(target: targets::HEADER, "resize to fit before the viewport is known");
            return;
        }
        self.run_pending_layout(true);
        self.layout.resize_to_fit(self.viewport_width);
    }

    /// Routes an input event. Returns `true` if a manipulator consumed it.
    pub fn handle_event(&mut self, target: HeaderTarget, event: &HeaderEvent) -> bool {
        self.sync_manipulators();

        if matches!(event, HeaderEvent::PointerDown(_)) {
            // A drag must start from an up-to-date layout.
            self.run_pending_layout(true);
        }

        let consumed = if let Some(resizer) = self.resizers.iter_mut().find(|r| r.is_active()) {
            resizer.handle_event(event, &mut self.layout, &mut self.surface)
        } else if self.mover.is_active() {
            self.mover.handle_event(event, &self.layout, &mut self.surface)
        } else {
            match target {
                HeaderTarget::ResizeHandle(id) => {
                    match self.resizers.iter_mut().find(|r| r.column().id() == id) {
                        Some(resizer) => {
                            resizer.handle_event(event, &mut self.layout, &mut self.surface)
                        }
                        None => false,
                    }
                }
                HeaderTarget::Header => {
                    self.mover.handle_event(event, &self.layout, &mut self.surface)
                }
            }
        };

        if !self.is_dragging() {
            self.run_pending_layout(false);
        }
        consumed
    }

    fn sync_manipulators(&mut self) {
        let changes = std::mem::take(&mut *self.shared.changes.lock());
        for change in changes {
            match change {
                ManipulatorChange::Added(column) => {
                    if !self.resizers.iter().any(|r| r.column().id() == column.id()) {
                        self.resizers.push(ColumnResizeManipulator::new(column));
                    }
                }
                ManipulatorChange::Removed(id) => {
                    if let Some(index) = self.resizers.iter().position(|r| r.column().id() == id) {
                        let mut resizer = self.resizers.remove(index);
                        resizer.cancel(&mut self.layout, &mut self.surface);
                    }
                }
            }
        }
    }

    /// Runs a pending pass unless a drag holds it or the viewport is unknown.
    /// `force` ignores the per-frame budget.
    fn run_pending_layout(&mut self, force: bool) {
        if !self.is_layout_pending() || self.viewport_width.is_nan() {
            return;
        }
        if self.is_dragging() {
            tracing::trace!(target: targets::HEADER, "layout pass held during drag");
            return;
        }
        if !force && self.passes_this_frame >= MAX_LAYOUT_PASSES_PER_FRAME {
            tracing::debug!(
                target: targets::HEADER,
                passes = self.passes_this_frame,
                "layout pass deferred to next frame"
            );
            return;
        }

        self.shared.layout_pending.store(false, Ordering::SeqCst);
        self.layout.do_layout(self.viewport_width);
        self.passes_this_frame += 1;
    }
}

impl<S: HeaderSurface> Drop for HeaderController<S> {
    fn drop(&mut self) {
        self.layout.layout_requested().disconnect(self.layout_requested);
        self.columns.column_added.disconnect(self.column_added);
        self.columns.column_removed.disconnect(self.column_removed);
    }
}
