//! Column width allocation.
//!
//! [`ColumnLayout`] observes a [`ColumnCollection`] and computes the desired
//! width of every visible column for a given container width. It also owns
//! the interactive drag-resize session used by
//! [`ColumnResizeManipulator`](crate::ColumnResizeManipulator).
//!
//! # Layout Algorithm
//!
//! 1. Rebuild the stretchable/fixed partitions if the layout is dirty
//! 2. Clamp every visible column into its bounds, starting from its nominal
//!    width if it was never sized. In grow-and-fill mode, unsized stretchable
//!    columns are deferred
//! 3. Split the space left by fixed columns evenly over the deferred columns,
//!    smallest maximum first
//! 4. Spread any unassigned remainder over the already sized stretchable
//!    columns, proportionally to their widths
//! 5. Distribute the surplus or deficit against the container width with
//!    [`stretch_resize_columns`](distribute::stretch_resize_columns)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_columns::{Column, ColumnCollection, ColumnLayout};
//!
//! let columns = Arc::new(ColumnCollection::new());
//! let a = columns.add(Column::new().with_stretchable(true));
//! let b = columns.add(Column::new().with_width(100.0).with_max_width(200.0));
//! let c = columns.add(Column::new().with_stretchable(true));
//!
//! let mut layout = ColumnLayout::new(columns);
//! layout.do_layout(400.0);
//!
//! assert_eq!(b.desired_width(), 100.0);
//! assert_eq!(a.desired_width(), 150.0);
//! assert_eq!(c.desired_width(), 150.0);
//! ```

mod distribute;
mod drag;

use std::cell::Cell;
use std::cmp::Ordering as CmpOrdering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use horizon_columns_core::logging::targets;
use horizon_columns_core::{ConnectionId, PerfSpan, Signal};
use parking_lot::Mutex;

use crate::collection::{CollectionDataType, ColumnCollection, StretchMode};
use crate::column::{Column, ColumnDataType, ColumnId};

use distribute::{Bounds, Committed, clamp_width, stretch_resize_columns};
use drag::DragSession;
pub use drag::DragSessionInfo;

/// Surplus below which a layout pass leaves the columns alone.
///
/// Keeps repeated passes at the same width from shuffling rounding noise.
const LAYOUT_EPSILON: f32 = 0.01;

/// Per-column subscriptions held by the layout.
struct ColumnWatch {
    column: Weak<Column>,
    changed: ConnectionId,
    resized: ConnectionId,
}

/// State reachable from signal slots.
///
/// Slots only flip flags and forward notifications; all width computation
/// happens on `&mut ColumnLayout`.
struct LayoutShared {
    dirty: AtomicBool,
    generation: AtomicU64,
    columns_width_dirty: AtomicBool,
    /// Columns whose nominal width the layout itself is writing.
    writing: Mutex<HashSet<ColumnId>>,
    layout_requested: Signal<()>,
    column_resized: Signal<(ColumnId, f32)>,
    watched: Mutex<HashMap<ColumnId, ColumnWatch>>,
}

impl LayoutShared {
    fn new() -> Self {
        Self {
            dirty: AtomicBool::new(true),
            generation: AtomicU64::new(0),
            columns_width_dirty: AtomicBool::new(true),
            writing: Mutex::new(HashSet::new()),
            layout_requested: Signal::new(),
            column_resized: Signal::new(),
            watched: Mutex::new(HashMap::new()),
        }
    }

    fn mark_dirty(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if self.dirty.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::debug!(target: targets::LAYOUT, "layout marked dirty");
        self.layout_requested.emit(());
    }

    fn on_column_changed(&self, id: ColumnId, kind: ColumnDataType) {
        if !kind.affects_layout() {
            return;
        }
        if kind == ColumnDataType::Width && self.writing.lock().contains(&id) {
            return;
        }
        self.mark_dirty();
    }

    /// Runs `write` with width changes of `columns` kept from dirtying the
    /// layout. Changes to any other column still mark it dirty.
    fn write_widths<R>(
        &self,
        columns: impl IntoIterator<Item = ColumnId>,
        write: impl FnOnce() -> R,
    ) -> R {
        *self.writing.lock() = columns.into_iter().collect();
        let result = write();
        self.writing.lock().clear();
        result
    }

    fn on_column_resized(&self, id: ColumnId, width: f32) {
        self.columns_width_dirty.store(true, Ordering::SeqCst);
        self.column_resized.emit((id, width));
    }

    fn watch(self: &Arc<Self>, column: &Arc<Column>) {
        let weak = Arc::downgrade(self);
        let changed = column.changed.connect(move |&(id, kind)| {
            if let Some(shared) = weak.upgrade() {
                shared.on_column_changed(id, kind);
            }
        });

        let weak = Arc::downgrade(self);
        let resized = column.resized.connect(move |&(id, width)| {
            if let Some(shared) = weak.upgrade() {
                shared.on_column_resized(id, width);
            }
        });

        let previous = self.watched.lock().insert(
            column.id(),
            ColumnWatch {
                column: Arc::downgrade(column),
                changed,
                resized,
            },
        );
        if let Some(previous) = previous {
            Self::disconnect(previous);
        }
    }

    fn unwatch(&self, id: ColumnId) {
        let watch = self.watched.lock().remove(&id);
        if let Some(watch) = watch {
            Self::disconnect(watch);
        }
    }

    fn unwatch_all(&self) {
        let watches: Vec<ColumnWatch> = self.watched.lock().drain().map(|(_, w)| w).collect();
        for watch in watches {
            Self::disconnect(watch);
        }
    }

    fn disconnect(watch: ColumnWatch) {
        if let Some(column) = watch.column.upgrade() {
            column.changed.disconnect(watch.changed);
            column.resized.disconnect(watch.resized);
        }
    }
}

/// Connections to the observed collection.
struct CollectionConnections {
    added: ConnectionId,
    removed: ConnectionId,
    reordered: ConnectionId,
    changed: ConnectionId,
}

/// Cached partition of the visible columns.
#[derive(Default)]
struct Partitions {
    /// Generation of the dirty counter these were built at.
    generation: Option<u64>,
    /// Reference width the bound sums were resolved with.
    reference: f32,
    stretchable: Vec<Arc<Column>>,
    fixed: Vec<Arc<Column>>,
    min_columns_width: f32,
    max_columns_width: f32,
}

/// Computes and maintains the widths of the visible columns of a collection.
///
/// # Signals
///
/// - `layout_requested()`: Emitted when the layout becomes dirty
/// - `column_resized((ColumnId, f32))`: Emitted when an observed column's desired width changes
pub struct ColumnLayout {
    columns: Arc<ColumnCollection>,
    shared: Arc<LayoutShared>,
    connections: CollectionConnections,
    partitions: Partitions,
    columns_width: Cell<f32>,
    /// Container width of the last completed layout pass.
    previous_width: f32,
    /// Container width percentages are resolved against.
    reference_width: f32,
    drag: Option<DragSession>,
}

impl std::fmt::Debug for ColumnLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnLayout")
            .field("dirty", &self.is_dirty())
            .field("previous_width", &self.previous_width)
            .field("dragging", &self.drag.is_some())
            .finish_non_exhaustive()
    }
}

impl ColumnLayout {
    /// Creates a layout observing `columns`.
    ///
    /// The layout starts dirty; call [`do_layout`](Self::do_layout) before
    /// reading widths.
    pub fn new(columns: Arc<ColumnCollection>) -> Self {
        let shared = Arc::new(LayoutShared::new());
        for column in columns.columns() {
            shared.watch(&column);
        }

        let weak = Arc::downgrade(&shared);
        let added = columns.column_added.connect(move |(column, _)| {
            if let Some(shared) = weak.upgrade() {
                shared.watch(column);
                shared.mark_dirty();
            }
        });

        let weak = Arc::downgrade(&shared);
        let removed = columns.column_removed.connect(move |column: &Arc<Column>| {
            if let Some(shared) = weak.upgrade() {
                shared.unwatch(column.id());
                shared.mark_dirty();
            }
        });

        let weak = Arc::downgrade(&shared);
        let reordered = columns.column_reordered.connect(move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.mark_dirty();
            }
        });

        let weak = Arc::downgrade(&shared);
        let changed = columns.changed.connect(move |&kind| {
            if kind == CollectionDataType::StretchMode
                && let Some(shared) = weak.upgrade()
            {
                shared.mark_dirty();
            }
        });

        Self {
            columns,
            shared,
            connections: CollectionConnections {
                added,
                removed,
                reordered,
                changed,
            },
            partitions: Partitions::default(),
            columns_width: Cell::new(0.0),
            previous_width: f32::NAN,
            reference_width: f32::NAN,
            drag: None,
        }
    }

    /// The observed collection.
    pub fn columns(&self) -> &Arc<ColumnCollection> {
        &self.columns
    }

    /// Emitted whenever the layout becomes dirty.
    pub fn layout_requested(&self) -> &Signal<()> {
        &self.shared.layout_requested
    }

    /// Emitted whenever an observed column's desired width changes.
    pub fn column_resized(&self) -> &Signal<(ColumnId, f32)> {
        &self.shared.column_resized
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Marks cached partitions invalid and requests a layout pass.
    ///
    /// Requesting again while already dirty does not emit a second request.
    pub fn dirty(&self) {
        self.shared.mark_dirty();
    }

    /// Returns whether a layout pass is needed.
    pub fn is_dirty(&self) -> bool {
        self.shared.dirty.load(Ordering::SeqCst)
    }

    /// Container width of the last layout pass (`NaN` before the first one).
    pub fn previous_width(&self) -> f32 {
        self.previous_width
    }

    fn ensure_partitions(&mut self) {
        let generation = self.shared.generation.load(Ordering::SeqCst);
        let reference = self.reference_width;
        let p = &self.partitions;
        if p.generation == Some(generation) && p.reference.to_bits() == reference.to_bits() {
            return;
        }

        let mut partitions = Partitions {
            generation: Some(generation),
            reference,
            ..Partitions::default()
        };
        for column in self.columns.visible_list() {
            let bounds = Bounds::of(&column, reference);
            partitions.min_columns_width += bounds.min;
            partitions.max_columns_width += bounds.max;
            if column.stretchable() {
                partitions.stretchable.push(column);
            } else {
                partitions.fixed.push(column);
            }
        }

        tracing::trace!(
            target: targets::LAYOUT,
            stretchable = partitions.stretchable.len(),
            fixed = partitions.fixed.len(),
            min = partitions.min_columns_width,
            max = partitions.max_columns_width,
            "rebuilt column partitions"
        );
        self.partitions = partitions;
    }

    /// Sum of the minimum widths of the visible columns.
    pub fn min_columns_width(&mut self) -> f32 {
        self.ensure_partitions();
        self.partitions.min_columns_width
    }

    /// Sum of the maximum widths of the visible columns.
    pub fn max_columns_width(&mut self) -> f32 {
        self.ensure_partitions();
        self.partitions.max_columns_width
    }

    /// Whether any visible column is stretchable.
    pub fn has_stretchable_columns(&mut self) -> bool {
        self.ensure_partitions();
        !self.partitions.stretchable.is_empty()
    }

    // =========================================================================
    // Layout passes
    // =========================================================================

    /// Recomputes the desired width of every visible column for a container
    /// of `width`.
    ///
    /// Skipped while a drag-resize session is active; the caller re-runs the
    /// pass once the session ends.
    pub fn do_layout(&mut self, width: f32) {
        if let Some(session) = &self.drag {
            tracing::debug!(
                target: targets::LAYOUT,
                column = ?session.column.id(),
                "layout pass skipped during drag resize"
            );
            return;
        }

        let _span = PerfSpan::new("do_layout");
        self.reference_width = width;
        self.ensure_partitions();

        let mode = self.columns.stretch_mode();
        let mut total = 0.0_f32;
        let mut fixed_total = 0.0_f32;
        let mut pending = Vec::new();
        let mut sized = Vec::new();

        for column in self.columns.visible_list() {
            let desired = column.desired_width();
            if desired.is_nan() && mode == StretchMode::GrowAndFill && column.stretchable() {
                pending.push(column);
                continue;
            }

            let bounds = Bounds::of(&column, width);
            let start = if desired.is_nan() {
                column.width().resolve(width)
            } else {
                desired
            };
            let clamped = bounds.clamp(start);
            column.set_desired_width(clamped);
            total += clamped;

            if column.stretchable() {
                sized.push((column, bounds));
            } else {
                fixed_total += clamped;
            }
        }

        if !pending.is_empty() {
            let mut pool = (width - fixed_total).max(0.0);
            let mut pending: Vec<_> = pending
                .into_iter()
                .map(|c| {
                    let bounds = Bounds::of(&c, width);
                    (c, bounds)
                })
                .collect();
            pending.sort_by(|a, b| a.1.max.partial_cmp(&b.1.max).unwrap_or(CmpOrdering::Equal));

            let mut left = pending.len();
            for (column, bounds) in &pending {
                let assigned = bounds.clamp(pool / left as f32);
                column.set_desired_width(assigned);
                pool = (pool - assigned).max(0.0);
                total += assigned;
                left -= 1;
            }

            if pool > 0.0 && !sized.is_empty() {
                total += Self::spread_pool(&mut sized, pool);
            }
        }

        if !self.partitions.stretchable.is_empty() {
            let mut delta = match mode {
                StretchMode::GrowAndFill => {
                    let target = clamp_width(
                        width,
                        self.partitions.min_columns_width,
                        self.partitions.max_columns_width,
                    );
                    total - target
                }
                StretchMode::Grow if self.previous_width.is_nan() => 0.0,
                StretchMode::Grow => self.previous_width - width,
            };

            if delta.abs() > LAYOUT_EPSILON {
                stretch_resize_columns(
                    &mut Committed,
                    &self.partitions.stretchable,
                    &self.partitions.fixed,
                    &mut delta,
                    width,
                    false,
                    true,
                );
                if delta != 0.0 {
                    tracing::trace!(
                        target: targets::LAYOUT,
                        remainder = delta,
                        "unabsorbed layout delta"
                    );
                }
            }
        }

        tracing::debug!(
            target: targets::LAYOUT,
            width,
            previous_width = self.previous_width,
            ?mode,
            "layout pass complete"
        );
        self.previous_width = width;
        self.shared.dirty.store(false, Ordering::SeqCst);
    }

    /// Grows already sized stretchable columns by `pool`, proportionally to
    /// their widths and smallest maximum first. Returns the width handed out.
    fn spread_pool(sized: &mut [(Arc<Column>, Bounds)], mut pool: f32) -> f32 {
        sized.sort_by(|a, b| a.1.max.partial_cmp(&b.1.max).unwrap_or(CmpOrdering::Equal));

        let mut weight: f32 = sized.iter().map(|(c, _)| c.desired_width().max(0.0)).sum();
        let mut left = sized.len();
        let mut handed_out = 0.0;

        for (column, bounds) in sized.iter() {
            if pool <= 0.0 {
                break;
            }
            let current = column.desired_width();
            let share = if weight > 0.0 {
                pool * current.max(0.0) / weight
            } else {
                pool / left as f32
            };
            weight -= current.max(0.0);
            left -= 1;

            let grown = bounds.clamp(current + share) - current;
            if grown > 0.0 {
                column.set_desired_width(current + grown);
                pool -= grown;
                handed_out += grown;
            }
        }

        handed_out
    }

    /// Shrinks or grows every visible column so the total matches `width`,
    /// within the column bounds.
    ///
    /// Unlike [`do_layout`](Self::do_layout) this also pushes fixed columns
    /// past their nominal widths and persists the resulting widths. The
    /// baseline used by [`StretchMode::Grow`] is left untouched.
    pub fn resize_to_fit(&mut self, width: f32) {
        if self.drag.is_some() {
            tracing::debug!(target: targets::LAYOUT, "resize to fit ignored during drag resize");
            return;
        }

        let _span = PerfSpan::new("resize_to_fit");
        self.reference_width = width;
        self.ensure_partitions();

        let mut delta = self.columns_width() - width;
        if delta.abs() <= LAYOUT_EPSILON {
            return;
        }

        let partitions = &self.partitions;
        let written = partitions.stretchable.iter().chain(&partitions.fixed).map(|c| c.id());
        self.shared.write_widths(written, || {
            stretch_resize_columns(
                &mut Committed,
                &partitions.stretchable,
                &partitions.fixed,
                &mut delta,
                width,
                true,
                false,
            );
        });

        tracing::debug!(
            target: targets::LAYOUT,
            width,
            remainder = delta,
            "resized columns to fit"
        );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of the desired widths of the visible columns.
    ///
    /// During a preview drag session this includes the tentative widths.
    pub fn columns_width(&self) -> f32 {
        if self.preview_active() {
            return self.sum_widths();
        }
        if self.shared.columns_width_dirty.swap(false, Ordering::SeqCst) {
            self.columns_width.set(self.sum_widths());
        }
        self.columns_width.get()
    }

    fn sum_widths(&self) -> f32 {
        self.columns
            .visible_list()
            .iter()
            .map(|c| self.get_desired_width(c))
            .filter(|w| !w.is_nan())
            .sum()
    }

    /// The width `column` is currently rendered at.
    ///
    /// During a preview drag session this is the tentative width.
    pub fn get_desired_width(&self, column: &Arc<Column>) -> f32 {
        match &self.drag {
            Some(session) => session.desired_width(column),
            None => column.desired_width(),
        }
    }

    /// Left edge of `column` in layout space, or `None` if it is not visible.
    pub fn get_desired_position(&self, column: &Arc<Column>) -> Option<f32> {
        let mut position = 0.0;
        for visible in self.columns.visible_list() {
            if visible.id() == column.id() {
                return Some(position);
            }
            let width = self.get_desired_width(&visible);
            if !width.is_nan() {
                position += width;
            }
        }
        None
    }

    /// The visible column under `position` together with its left edge.
    ///
    /// Widths are accumulated left to right until they pass `position`.
    pub fn column_at(&self, position: f32) -> Option<(Arc<Column>, f32)> {
        if position < 0.0 {
            return None;
        }
        let mut start = 0.0;
        for column in self.columns.visible_list() {
            let width = self.get_desired_width(&column);
            let width = if width.is_nan() { 0.0 } else { width };
            if position < start + width {
                return Some((column, start));
            }
            start += width;
        }
        None
    }
}

impl Drop for ColumnLayout {
    fn drop(&mut self) {
        self.columns.column_added.disconnect(self.connections.added);
        self.columns.column_removed.disconnect(self.connections.removed);
        self.columns.column_reordered.disconnect(self.connections.reordered);
        self.columns.changed.disconnect(self.connections.changed);
        self.shared.unwatch_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::Length;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    /// A(stretchable), B(fixed, width 100, max 200), C(stretchable).
    fn three_columns() -> (Arc<ColumnCollection>, [Arc<Column>; 3]) {
        let columns = Arc::new(ColumnCollection::new());
        let a = columns.add(Column::new().with_name("a").with_stretchable(true));
        let b = columns.add(
            Column::new()
                .with_name("b")
                .with_width(100.0)
                .with_max_width(200.0),
        );
        let c = columns.add(Column::new().with_name("c").with_stretchable(true));
        (columns, [a, b, c])
    }

    #[test]
    fn test_fixed_honors_width_and_stretchables_split_rest() {
        let (columns, [a, b, c]) = three_columns();
        let mut layout = ColumnLayout::new(columns);
        layout.do_layout(400.0);

        assert_eq!(b.desired_width(), 100.0);
        assert_eq!(a.desired_width(), 150.0);
        assert_eq!(c.desired_width(), 150.0);
        assert!(!layout.is_dirty());
        assert!(approx(layout.columns_width(), 400.0));
    }

    #[test]
    fn test_shrinking_container_keeps_minimums() {
        let (columns, cols) = three_columns();
        let mut layout = ColumnLayout::new(columns);
        layout.do_layout(400.0);
        layout.do_layout(150.0);

        for column in &cols {
            assert!(column.desired_width() >= 35.0);
        }
        assert!(approx(layout.columns_width(), 150.0));
    }

    #[test]
    fn test_positions_accumulate_visible_widths() {
        let (columns, [a, b, c]) = three_columns();
        let mut layout = ColumnLayout::new(columns);
        layout.do_layout(400.0);

        assert_eq!(layout.get_desired_position(&a), Some(0.0));
        assert_eq!(layout.get_desired_position(&b), Some(150.0));
        assert_eq!(layout.get_desired_position(&c), Some(250.0));

        let (hit, start) = layout.column_at(260.0).unwrap();
        assert_eq!(hit.id(), c.id());
        assert_eq!(start, 250.0);
        assert!(layout.column_at(400.0).is_none());
    }

    #[test]
    fn test_structural_change_marks_dirty_once() {
        let (columns, [a, ..]) = three_columns();
        let mut layout = ColumnLayout::new(columns.clone());
        layout.do_layout(400.0);

        let requests = Arc::new(Mutex::new(0));
        let requests_clone = requests.clone();
        layout
            .layout_requested()
            .connect(move |_| *requests_clone.lock() += 1);

        a.set_visible(false);
        columns.add(Column::new());
        assert!(layout.is_dirty());
        assert_eq!(*requests.lock(), 1);

        layout.do_layout(400.0);
        a.set_title("ignored");
        assert!(!layout.is_dirty());
    }

    #[test]
    fn test_hidden_column_excluded() {
        let (columns, [a, b, c]) = three_columns();
        let mut layout = ColumnLayout::new(columns);
        layout.do_layout(400.0);
        b.set_visible(false);
        layout.do_layout(400.0);

        assert!(b.desired_width().is_nan());
        assert!(approx(a.desired_width() + c.desired_width(), 400.0));
        assert_eq!(layout.get_desired_position(&b), None);
    }

    #[test]
    fn test_removed_column_is_unwatched() {
        let (columns, [a, ..]) = three_columns();
        let layout = ColumnLayout::new(columns.clone());
        assert_eq!(a.changed.connection_count(), 1);
        columns.remove(&a);
        assert_eq!(a.changed.connection_count(), 0);
        assert_eq!(a.resized.connection_count(), 0);
        drop(layout);
    }

    #[test]
    fn test_drop_disconnects_everything() {
        let (columns, [a, ..]) = three_columns();
        let layout = ColumnLayout::new(columns.clone());
        drop(layout);
        assert_eq!(columns.column_added.connection_count(), 0);
        assert_eq!(a.resized.connection_count(), 0);
    }

    #[test]
    fn test_grow_mode_tracks_container_delta() {
        let (columns, [a, b, c]) = three_columns();
        columns.set_stretch_mode(StretchMode::Grow);
        a.set_width(100.0);
        c.set_width(100.0);
        let mut layout = ColumnLayout::new(columns);

        layout.do_layout(400.0);
        // First pass has no baseline: nominal widths only.
        assert_eq!(a.desired_width(), 100.0);
        assert_eq!(b.desired_width(), 100.0);
        assert_eq!(c.desired_width(), 100.0);

        layout.do_layout(500.0);
        assert!(approx(a.desired_width() + c.desired_width(), 300.0));
        assert_eq!(b.desired_width(), 100.0);
    }

    #[test]
    fn test_percent_width_resolves_against_container() {
        let columns = Arc::new(ColumnCollection::new());
        let fixed = columns.add(Column::new().with_width(Length::percent(25.0)));
        let fill = columns.add(Column::new().with_stretchable(true));
        let mut layout = ColumnLayout::new(columns);
        layout.do_layout(800.0);

        assert_eq!(fixed.desired_width(), 200.0);
        assert_eq!(fill.desired_width(), 600.0);
    }

    #[test]
    fn test_container_below_minimums_pins_to_min() {
        let (columns, cols) = three_columns();
        let mut layout = ColumnLayout::new(columns);
        layout.do_layout(400.0);
        layout.do_layout(50.0);

        for column in &cols {
            assert!(approx(column.desired_width(), 35.0));
        }
    }

    #[test]
    fn test_resize_to_fit_includes_fixed_columns() {
        let columns = Arc::new(ColumnCollection::new());
        let a = columns.add(Column::new().with_width(100.0));
        let b = columns.add(Column::new().with_width(300.0));
        let mut layout = ColumnLayout::new(columns);
        layout.do_layout(1000.0);
        assert!(approx(layout.columns_width(), 400.0));

        layout.resize_to_fit(800.0);
        assert!(approx(a.desired_width(), 200.0));
        assert!(approx(b.desired_width(), 600.0));
        assert!(approx(a.width().value(), 200.0));
        assert!(!layout.is_dirty());
        assert!(approx(layout.previous_width(), 1000.0));
    }

    #[test]
    fn test_new_stretchable_column_takes_a_share() {
        let columns = Arc::new(ColumnCollection::new());
        let a = columns.add(Column::new().with_stretchable(true));
        let mut layout = ColumnLayout::new(columns.clone());
        layout.do_layout(400.0);
        assert_eq!(a.desired_width(), 400.0);

        let b = columns.add(Column::new().with_stretchable(true));
        layout.do_layout(400.0);
        assert!(approx(a.desired_width(), 200.0));
        assert!(approx(b.desired_width(), 200.0));
    }
}
