//! Ordered collection of columns.
//!
//! [`ColumnCollection`] owns the columns of a view. It keeps two orders:
//! the storage order (insertion order, addressed by `index`) and the display
//! order (what the user sees, changed by drag-reordering). The visible list is
//! the display order filtered to visible columns.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_columns::{Column, ColumnCollection};
//!
//! let columns = Arc::new(ColumnCollection::new());
//! let name = columns.add(Column::new().with_name("name"));
//! let size = columns.add(Column::new().with_name("size"));
//!
//! columns.reorder_display(1, 0);
//! assert_eq!(size.display_index(), Some(0));
//! assert_eq!(name.index(), Some(0));
//! ```

use std::sync::Arc;

use horizon_columns_core::Signal;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnId};

/// How stretchable columns absorb container slack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StretchMode {
    /// Only the change in container width since the previous layout pass is
    /// distributed.
    Grow,
    /// All slack between the column total and the container width is
    /// redistributed on every pass.
    #[default]
    GrowAndFill,
}

/// Which collection-level setting changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionDataType {
    StretchMode,
    ResizePreview,
    Reorderable,
    Resizable,
}

#[derive(Debug)]
struct CollectionState {
    columns: Vec<Arc<Column>>,
    display: Vec<Arc<Column>>,
    stretch_mode: StretchMode,
    resize_preview: bool,
    reorderable: bool,
    resizable: bool,
}

/// The ordered set of columns of a multi-column view.
///
/// # Signals
///
/// - `column_added((Arc<Column>, usize))`: Emitted after a column is inserted at a storage index
/// - `column_removed(Arc<Column>)`: Emitted after a column is removed
/// - `column_reordered((Arc<Column>, usize, usize))`: Emitted after a display
///   move (column, from, to)
/// - `changed(CollectionDataType)`: Emitted when a collection-level setting changes
pub struct ColumnCollection {
    state: RwLock<CollectionState>,

    /// Emitted when a column is added.
    pub column_added: Signal<(Arc<Column>, usize)>,

    /// Emitted when a column is removed.
    pub column_removed: Signal<Arc<Column>>,

    /// Emitted when a column moves in display order.
    pub column_reordered: Signal<(Arc<Column>, usize, usize)>,

    /// Emitted when a collection-level setting changes.
    pub changed: Signal<CollectionDataType>,
}

impl Default for ColumnCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ColumnCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnCollection")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

impl ColumnCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(CollectionState {
                columns: Vec::new(),
                display: Vec::new(),
                stretch_mode: StretchMode::default(),
                resize_preview: false,
                reorderable: true,
                resizable: true,
            }),
            column_added: Signal::new(),
            column_removed: Signal::new(),
            column_reordered: Signal::new(),
            changed: Signal::new(),
        }
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Appends a column and returns the shared handle to it.
    pub fn add(self: &Arc<Self>, column: Column) -> Arc<Column> {
        let index = self.len();
        self.insert(index, column)
    }

    /// Inserts a column at a storage index (clamped to the collection size).
    ///
    /// The column is placed at the same position in display order.
    pub fn insert(self: &Arc<Self>, index: usize, column: Column) -> Arc<Column> {
        let column = Arc::new(column);
        column.set_collection(Arc::downgrade(self));

        let index = {
            let mut state = self.state.write();
            let index = index.min(state.columns.len());
            state.columns.insert(index, column.clone());
            let display_index = index.min(state.display.len());
            state.display.insert(display_index, column.clone());
            index
        };

        self.column_added.emit((column.clone(), index));
        column
    }

    /// Removes a column. Returns `false` if it was not part of the collection.
    pub fn remove(&self, column: &Arc<Column>) -> bool {
        match self.index_of(column.id()) {
            Some(index) => self.remove_at(index).is_some(),
            None => false,
        }
    }

    /// Removes the column at a storage index.
    pub fn remove_at(&self, index: usize) -> Option<Arc<Column>> {
        let column = {
            let mut state = self.state.write();
            if index >= state.columns.len() {
                return None;
            }
            let column = state.columns.remove(index);
            state.display.retain(|c| c.id() != column.id());
            column
        };

        column.set_collection(std::sync::Weak::new());
        self.column_removed.emit(column.clone());
        Some(column)
    }

    /// Removes every column.
    pub fn clear(&self) {
        while !self.is_empty() {
            let last = self.len() - 1;
            self.remove_at(last);
        }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.state.read().columns.len()
    }

    /// Returns `true` if the collection has no columns.
    pub fn is_empty(&self) -> bool {
        self.state.read().columns.is_empty()
    }

    /// Column at a storage index.
    pub fn get(&self, index: usize) -> Option<Arc<Column>> {
        self.state.read().columns.get(index).cloned()
    }

    /// Finds a column by name.
    pub fn find(&self, name: &str) -> Option<Arc<Column>> {
        self.state
            .read()
            .columns
            .iter()
            .find(|c| c.name().as_deref() == Some(name))
            .cloned()
    }

    /// Finds a column by id.
    pub fn by_id(&self, id: ColumnId) -> Option<Arc<Column>> {
        self.state
            .read()
            .columns
            .iter()
            .find(|c| c.id() == id)
            .cloned()
    }

    /// All columns in storage order.
    pub fn columns(&self) -> Vec<Arc<Column>> {
        self.state.read().columns.clone()
    }

    /// All columns in display order.
    pub fn display_list(&self) -> Vec<Arc<Column>> {
        self.state.read().display.clone()
    }

    /// Visible columns in display order.
    pub fn visible_list(&self) -> Vec<Arc<Column>> {
        self.state
            .read()
            .display
            .iter()
            .filter(|c| c.visible())
            .cloned()
            .collect()
    }

    // =========================================================================
    // Positions
    // =========================================================================

    /// Storage index of a column.
    pub fn index_of(&self, id: ColumnId) -> Option<usize> {
        self.state.read().columns.iter().position(|c| c.id() == id)
    }

    /// Display index of a column among all columns.
    pub fn display_index_of(&self, id: ColumnId) -> Option<usize> {
        self.state.read().display.iter().position(|c| c.id() == id)
    }

    /// Display index of a column among the visible columns.
    pub fn visible_index_of(&self, id: ColumnId) -> Option<usize> {
        self.state
            .read()
            .display
            .iter()
            .filter(|c| c.visible())
            .position(|c| c.id() == id)
    }

    /// Moves the column at display index `from` so that it ends up at
    /// display index `to`.
    ///
    /// Returns `false` (and emits nothing) when either index is out of range
    /// or the indices are equal.
    pub fn reorder_display(&self, from: usize, to: usize) -> bool {
        let column = {
            let mut state = self.state.write();
            let count = state.display.len();
            if from >= count || to >= count || from == to {
                return false;
            }
            let column = state.display.remove(from);
            state.display.insert(to, column.clone());
            column
        };

        self.column_reordered.emit((column, from, to));
        true
    }

    /// Replaces the display order wholesale. Ids not in the collection are
    /// ignored and columns missing from `order` keep their relative order at
    /// the end.
    pub(crate) fn set_display_order(&self, order: &[ColumnId]) {
        let moved = {
            let mut state = self.state.write();
            let mut display: Vec<Arc<Column>> = order
                .iter()
                .filter_map(|id| state.columns.iter().find(|c| c.id() == *id).cloned())
                .collect();
            for column in &state.display {
                if !display.iter().any(|c| c.id() == column.id()) {
                    display.push(column.clone());
                }
            }

            let old: Vec<ColumnId> = state.display.iter().map(|c| c.id()).collect();
            let moved: Vec<(Arc<Column>, usize, usize)> = display
                .iter()
                .enumerate()
                .filter_map(|(to, c)| {
                    let from = old.iter().position(|id| *id == c.id())?;
                    (from != to).then(|| (c.clone(), from, to))
                })
                .collect();
            state.display = display;
            moved
        };

        for event in moved {
            self.column_reordered.emit(event);
        }
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Returns the stretch mode.
    pub fn stretch_mode(&self) -> StretchMode {
        self.state.read().stretch_mode
    }

    /// Sets the stretch mode.
    pub fn set_stretch_mode(&self, mode: StretchMode) {
        self.set_setting(CollectionDataType::StretchMode, |s| {
            std::mem::replace(&mut s.stretch_mode, mode) != mode
        });
    }

    /// Returns whether interactive resizes are previewed before commit.
    pub fn resize_preview(&self) -> bool {
        self.state.read().resize_preview
    }

    /// Sets whether interactive resizes are previewed before commit.
    pub fn set_resize_preview(&self, preview: bool) {
        self.set_setting(CollectionDataType::ResizePreview, |s| {
            std::mem::replace(&mut s.resize_preview, preview) != preview
        });
    }

    /// Returns whether columns can be reordered by dragging.
    pub fn reorderable(&self) -> bool {
        self.state.read().reorderable
    }

    /// Sets whether columns can be reordered by dragging.
    pub fn set_reorderable(&self, reorderable: bool) {
        self.set_setting(CollectionDataType::Reorderable, |s| {
            std::mem::replace(&mut s.reorderable, reorderable) != reorderable
        });
    }

    /// Returns whether columns can be resized interactively at all.
    pub fn resizable(&self) -> bool {
        self.state.read().resizable
    }

    /// Sets whether columns can be resized interactively at all.
    pub fn set_resizable(&self, resizable: bool) {
        self.set_setting(CollectionDataType::Resizable, |s| {
            std::mem::replace(&mut s.resizable, resizable) != resizable
        });
    }

    fn set_setting(
        &self,
        kind: CollectionDataType,
        apply: impl FnOnce(&mut CollectionState) -> bool,
    ) {
        let changed = apply(&mut self.state.write());
        if changed {
            self.changed.emit(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn names(list: &[Arc<Column>]) -> Vec<String> {
        list.iter().map(|c| c.name().unwrap_or_default()).collect()
    }

    fn collection(names: &[&str]) -> Arc<ColumnCollection> {
        let columns = Arc::new(ColumnCollection::new());
        for name in names {
            columns.add(Column::new().with_name(*name));
        }
        columns
    }

    #[test]
    fn test_add_and_indices() {
        let columns = collection(&["a", "b", "c"]);
        assert_eq!(columns.len(), 3);
        let b = columns.find("b").unwrap();
        assert_eq!(b.index(), Some(1));
        assert_eq!(b.display_index(), Some(1));
        assert_eq!(b.visible_index(), Some(1));
    }

    #[test]
    fn test_visible_index_skips_hidden() {
        let columns = collection(&["a", "b", "c"]);
        columns.find("a").unwrap().set_visible(false);

        let c = columns.find("c").unwrap();
        assert_eq!(c.display_index(), Some(2));
        assert_eq!(c.visible_index(), Some(1));
        assert_eq!(names(&columns.visible_list()), vec!["b", "c"]);
        assert_eq!(columns.find("a").unwrap().visible_index(), None);
    }

    #[test]
    fn test_reorder_display_keeps_storage_order() {
        let columns = collection(&["a", "b", "c", "d"]);
        assert!(columns.reorder_display(0, 2));
        assert_eq!(names(&columns.display_list()), vec!["b", "c", "a", "d"]);
        assert_eq!(names(&columns.columns()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_reorder_same_position_is_noop() {
        let columns = collection(&["a", "b"]);
        let events = Arc::new(Mutex::new(0));
        let events_clone = events.clone();
        columns.column_reordered.connect(move |_| *events_clone.lock() += 1);

        assert!(!columns.reorder_display(1, 1));
        assert!(!columns.reorder_display(0, 5));
        assert_eq!(*events.lock(), 0);
    }

    #[test]
    fn test_remove_detaches_column() {
        let columns = collection(&["a", "b"]);
        let a = columns.find("a").unwrap();
        let removed = Arc::new(Mutex::new(Vec::new()));
        let removed_clone = removed.clone();
        columns
            .column_removed
            .connect(move |c: &Arc<Column>| removed_clone.lock().push(c.id()));

        assert!(columns.remove(&a));
        assert!(!columns.remove(&a));
        assert_eq!(a.display_index(), None);
        assert!(a.collection().is_none());
        assert_eq!(*removed.lock(), vec![a.id()]);
        assert_eq!(names(&columns.display_list()), vec!["b"]);
    }

    #[test]
    fn test_settings_emit_changes() {
        let columns = ColumnCollection::new();
        let kinds = Arc::new(Mutex::new(Vec::new()));
        let kinds_clone = kinds.clone();
        columns.changed.connect(move |&k| kinds_clone.lock().push(k));

        columns.set_stretch_mode(StretchMode::Grow);
        columns.set_stretch_mode(StretchMode::Grow);
        columns.set_resize_preview(true);
        columns.set_reorderable(false);

        assert_eq!(
            *kinds.lock(),
            vec![
                CollectionDataType::StretchMode,
                CollectionDataType::ResizePreview,
                CollectionDataType::Reorderable
            ]
        );
    }

    #[test]
    fn test_set_display_order() {
        let columns = collection(&["a", "b", "c"]);
        let ids: Vec<ColumnId> = ["c", "a"]
            .iter()
            .map(|n| columns.find(n).unwrap().id())
            .collect();
        columns.set_display_order(&ids);
        assert_eq!(names(&columns.display_list()), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_clear() {
        let columns = collection(&["a", "b", "c"]);
        columns.clear();
        assert!(columns.is_empty());
        assert!(columns.display_list().is_empty());
    }
}
