//! A single column's configuration and live layout state.
//!
//! A [`Column`] carries its identity, display data, width constraints and
//! behavior flags, plus the computed `desired_width` written by
//! [`ColumnLayout`](crate::ColumnLayout). Every mutation is announced through
//! [`Column::changed`]; changes to the desired width are additionally
//! announced through [`Column::resized`].
//!
//! # Example
//!
//! ```
//! use horizon_columns::{Column, Length};
//!
//! let column = Column::new()
//!     .with_name("size")
//!     .with_title("Size")
//!     .with_width(Length::px(100.0))
//!     .with_max_width(Length::px(200.0));
//!
//! assert_eq!(column.min_width(), Length::px(35.0));
//! assert!(column.desired_width().is_nan());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use horizon_columns_core::Signal;
use parking_lot::RwLock;

use crate::collection::ColumnCollection;
use crate::length::Length;

/// Default minimum width of a column.
pub const DEFAULT_MIN_WIDTH: f32 = 35.0;

static NEXT_COLUMN_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(u64);

impl ColumnId {
    fn next() -> Self {
        Self(NEXT_COLUMN_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value of this id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Which property of a column changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnDataType {
    Name,
    Title,
    Icon,
    Visibility,
    Width,
    MinWidth,
    MaxWidth,
    Stretchable,
    Sortable,
    Optional,
    Resizable,
}

impl ColumnDataType {
    /// Whether a change of this kind invalidates the column layout.
    pub fn affects_layout(self) -> bool {
        matches!(
            self,
            Self::Width | Self::MinWidth | Self::MaxWidth | Self::Stretchable | Self::Visibility
        )
    }
}

#[derive(Debug, Clone)]
struct ColumnState {
    name: Option<String>,
    title: String,
    icon: Option<String>,
    visible: bool,
    width: Length,
    min_width: Length,
    max_width: Length,
    desired_width: f32,
    stretchable: bool,
    sortable: bool,
    optional: bool,
    resizable: bool,
}

impl Default for ColumnState {
    fn default() -> Self {
        Self {
            name: None,
            title: String::new(),
            icon: None,
            visible: true,
            width: Length::ZERO,
            min_width: Length::px(DEFAULT_MIN_WIDTH),
            max_width: Length::UNBOUNDED,
            desired_width: f32::NAN,
            stretchable: false,
            sortable: true,
            optional: true,
            resizable: true,
        }
    }
}

/// A column of a multi-column view.
///
/// Columns are shared as `Arc<Column>`: the owning [`ColumnCollection`]
/// holds the strong references, while layouts and headers observe them.
///
/// # Signals
///
/// - `changed((ColumnId, ColumnDataType))`: Emitted on any property mutation
/// - `resized((ColumnId, f32))`: Emitted when the desired width changes
pub struct Column {
    id: ColumnId,
    state: RwLock<ColumnState>,
    owner: RwLock<Weak<ColumnCollection>>,

    /// Emitted when any property changes.
    pub changed: Signal<(ColumnId, ColumnDataType)>,

    /// Emitted when the computed desired width changes.
    pub resized: Signal<(ColumnId, f32)>,
}

static_assertions::assert_impl_all!(Column: Send, Sync);

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("name", &state.name)
            .field("visible", &state.visible)
            .field("width", &state.width)
            .field("desired_width", &state.desired_width)
            .finish_non_exhaustive()
    }
}

/// `NaN`-aware float equality for "did it change" checks.
fn same_width(a: f32, b: f32) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

impl Column {
    /// Create a column with default constraints.
    pub fn new() -> Self {
        Self {
            id: ColumnId::next(),
            state: RwLock::new(ColumnState::default()),
            owner: RwLock::new(Weak::new()),
            changed: Signal::new(),
            resized: Signal::new(),
        }
    }

    /// Sets the stable name of the column.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.state.write().name = Some(name.into());
        self
    }

    /// Sets the header title.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.state.write().title = title.into();
        self
    }

    /// Sets the header icon.
    pub fn with_icon(self, icon: impl Into<String>) -> Self {
        self.state.write().icon = Some(icon.into());
        self
    }

    /// Sets the nominal width.
    pub fn with_width(self, width: impl Into<Length>) -> Self {
        self.state.write().width = width.into();
        self
    }

    /// Sets the minimum width.
    pub fn with_min_width(self, min_width: impl Into<Length>) -> Self {
        self.state.write().min_width = min_width.into();
        self
    }

    /// Sets the maximum width.
    pub fn with_max_width(self, max_width: impl Into<Length>) -> Self {
        self.state.write().max_width = max_width.into();
        self
    }

    /// Sets whether the column absorbs container slack.
    pub fn with_stretchable(self, stretchable: bool) -> Self {
        self.state.write().stretchable = stretchable;
        self
    }

    /// Sets the initial visibility.
    pub fn with_visible(self, visible: bool) -> Self {
        self.state.write().visible = visible;
        self
    }

    /// Sets whether the column can be sorted.
    pub fn with_sortable(self, sortable: bool) -> Self {
        self.state.write().sortable = sortable;
        self
    }

    /// Sets whether the user may toggle the column's visibility.
    pub fn with_optional(self, optional: bool) -> Self {
        self.state.write().optional = optional;
        self
    }

    /// Sets whether the column can be resized interactively.
    pub fn with_resizable(self, resizable: bool) -> Self {
        self.state.write().resizable = resizable;
        self
    }

    /// Returns the process-unique id of this column.
    #[inline]
    pub fn id(&self) -> ColumnId {
        self.id
    }

    // =========================================================================
    // Identity and display
    // =========================================================================

    /// Returns the stable name, if any.
    pub fn name(&self) -> Option<String> {
        self.state.read().name.clone()
    }

    /// Sets the stable name.
    pub fn set_name(&self, name: Option<String>) {
        self.update(ColumnDataType::Name, |s| {
            if s.name == name {
                return false;
            }
            s.name = name;
            true
        });
    }

    /// Returns the header title.
    pub fn title(&self) -> String {
        self.state.read().title.clone()
    }

    /// Sets the header title.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.update(ColumnDataType::Title, |s| {
            if s.title == title {
                return false;
            }
            s.title = title;
            true
        });
    }

    /// Returns the header icon, if any.
    pub fn icon(&self) -> Option<String> {
        self.state.read().icon.clone()
    }

    /// Sets the header icon.
    pub fn set_icon(&self, icon: Option<String>) {
        self.update(ColumnDataType::Icon, |s| {
            if s.icon == icon {
                return false;
            }
            s.icon = icon;
            true
        });
    }

    /// Returns whether the column is visible.
    pub fn visible(&self) -> bool {
        self.state.read().visible
    }

    /// Shows or hides the column.
    ///
    /// Hiding a column forgets its computed width, so it is sized afresh the
    /// next time it becomes visible.
    pub fn set_visible(&self, visible: bool) {
        let mut resized = None;
        let changed = {
            let mut state = self.state.write();
            if state.visible == visible {
                false
            } else {
                state.visible = visible;
                if !visible && !state.desired_width.is_nan() {
                    state.desired_width = f32::NAN;
                    resized = Some(f32::NAN);
                }
                true
            }
        };

        if changed {
            self.changed.emit((self.id, ColumnDataType::Visibility));
        }
        if let Some(width) = resized {
            self.resized.emit((self.id, width));
        }
    }

    // =========================================================================
    // Width constraints
    // =========================================================================

    /// Returns the nominal (configured) width.
    pub fn width(&self) -> Length {
        self.state.read().width
    }

    /// Sets the nominal width.
    ///
    /// The computed width is reset, so the next layout pass sizes the column
    /// from the new value.
    pub fn set_width(&self, width: impl Into<Length>) {
        let width = width.into();
        let mut resized = None;
        let changed = {
            let mut state = self.state.write();
            if state.width == width {
                false
            } else {
                state.width = width;
                if !state.desired_width.is_nan() {
                    state.desired_width = f32::NAN;
                    resized = Some(f32::NAN);
                }
                true
            }
        };

        if changed {
            self.changed.emit((self.id, ColumnDataType::Width));
        }
        if let Some(width) = resized {
            self.resized.emit((self.id, width));
        }
    }

    /// Returns the minimum width.
    pub fn min_width(&self) -> Length {
        self.state.read().min_width
    }

    /// Sets the minimum width. Not validated against the maximum.
    pub fn set_min_width(&self, min_width: impl Into<Length>) {
        let min_width = min_width.into();
        self.update(ColumnDataType::MinWidth, |s| {
            if s.min_width == min_width {
                return false;
            }
            s.min_width = min_width;
            true
        });
    }

    /// Returns the maximum width.
    pub fn max_width(&self) -> Length {
        self.state.read().max_width
    }

    /// Sets the maximum width. Not validated against the minimum.
    pub fn set_max_width(&self, max_width: impl Into<Length>) {
        let max_width = max_width.into();
        self.update(ColumnDataType::MaxWidth, |s| {
            if s.max_width == max_width {
                return false;
            }
            s.max_width = max_width;
            true
        });
    }

    /// Returns the computed width, or `NaN` if no layout pass has sized it yet.
    pub fn desired_width(&self) -> f32 {
        self.state.read().desired_width
    }

    /// Writes the computed width. Only the layout engine does this.
    pub(crate) fn set_desired_width(&self, desired_width: f32) {
        let changed = {
            let mut state = self.state.write();
            if same_width(state.desired_width, desired_width) {
                false
            } else {
                state.desired_width = desired_width;
                true
            }
        };

        if changed {
            self.resized.emit((self.id, desired_width));
        }
    }

    /// Writes both the nominal and the computed width without resetting the
    /// computed width the way [`set_width`](Self::set_width) does.
    pub(crate) fn apply_resize(&self, width: f32) {
        let (width_changed, desired_changed) = {
            let mut state = self.state.write();
            let new_width = Length::px(width);
            let width_changed = state.width != new_width;
            let desired_changed = !same_width(state.desired_width, width);
            state.width = new_width;
            state.desired_width = width;
            (width_changed, desired_changed)
        };

        if width_changed {
            self.changed.emit((self.id, ColumnDataType::Width));
        }
        if desired_changed {
            self.resized.emit((self.id, width));
        }
    }

    // =========================================================================
    // Behavior flags
    // =========================================================================

    /// Returns whether the column absorbs container slack.
    pub fn stretchable(&self) -> bool {
        self.state.read().stretchable
    }

    /// Sets whether the column absorbs container slack.
    pub fn set_stretchable(&self, stretchable: bool) {
        self.update(ColumnDataType::Stretchable, |s| {
            if s.stretchable == stretchable {
                return false;
            }
            s.stretchable = stretchable;
            true
        });
    }

    /// Returns whether the column can be sorted.
    pub fn sortable(&self) -> bool {
        self.state.read().sortable
    }

    /// Sets whether the column can be sorted.
    pub fn set_sortable(&self, sortable: bool) {
        self.update(ColumnDataType::Sortable, |s| {
            if s.sortable == sortable {
                return false;
            }
            s.sortable = sortable;
            true
        });
    }

    /// Returns whether the user may toggle the column's visibility.
    pub fn optional(&self) -> bool {
        self.state.read().optional
    }

    /// Sets whether the user may toggle the column's visibility.
    pub fn set_optional(&self, optional: bool) {
        self.update(ColumnDataType::Optional, |s| {
            if s.optional == optional {
                return false;
            }
            s.optional = optional;
            true
        });
    }

    /// Returns whether the column can be resized interactively.
    pub fn resizable(&self) -> bool {
        self.state.read().resizable
    }

    /// Sets whether the column can be resized interactively.
    pub fn set_resizable(&self, resizable: bool) {
        self.update(ColumnDataType::Resizable, |s| {
            if s.resizable == resizable {
                return false;
            }
            s.resizable = resizable;
            true
        });
    }

    // =========================================================================
    // Positions in the owning collection
    // =========================================================================

    /// Returns the owning collection, if the column has been added to one.
    pub fn collection(&self) -> Option<Arc<ColumnCollection>> {
        self.owner.read().upgrade()
    }

    pub(crate) fn set_collection(&self, owner: Weak<ColumnCollection>) {
        *self.owner.write() = owner;
    }

    /// Position in storage order.
    pub fn index(&self) -> Option<usize> {
        self.collection()?.index_of(self.id)
    }

    /// Position among all columns in display order.
    pub fn display_index(&self) -> Option<usize> {
        self.collection()?.display_index_of(self.id)
    }

    /// Position among the visible columns in display order.
    pub fn visible_index(&self) -> Option<usize> {
        self.collection()?.visible_index_of(self.id)
    }

    fn update(&self, kind: ColumnDataType, apply: impl FnOnce(&mut ColumnState) -> bool) {
        let changed = apply(&mut self.state.write());
        if changed {
            self.changed.emit((self.id, kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_defaults() {
        let column = Column::new();
        assert_eq!(column.min_width(), Length::px(DEFAULT_MIN_WIDTH));
        assert!(column.max_width().is_unbounded());
        assert!(column.desired_width().is_nan());
        assert!(column.visible());
        assert!(column.resizable());
        assert!(!column.stretchable());
        assert_eq!(column.display_index(), None);
    }

    #[test]
    fn test_unique_ids() {
        let a = Column::new();
        let b = Column::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_changed_signal_reports_kind() {
        let column = Column::new();
        let kinds = Arc::new(Mutex::new(Vec::new()));

        let kinds_clone = kinds.clone();
        column.changed.connect(move |&(_, kind)| {
            kinds_clone.lock().push(kind);
        });

        column.set_title("Name");
        column.set_title("Name");
        column.set_min_width(50.0);
        column.set_sortable(false);

        assert_eq!(
            *kinds.lock(),
            vec![
                ColumnDataType::Title,
                ColumnDataType::MinWidth,
                ColumnDataType::Sortable
            ]
        );
    }

    #[test]
    fn test_layout_affecting_kinds() {
        assert!(ColumnDataType::Width.affects_layout());
        assert!(ColumnDataType::Visibility.affects_layout());
        assert!(ColumnDataType::Stretchable.affects_layout());
        assert!(!ColumnDataType::Title.affects_layout());
        assert!(!ColumnDataType::Sortable.affects_layout());
    }

    #[test]
    fn test_set_width_resets_desired_width() {
        let column = Column::new().with_width(100.0);
        column.set_desired_width(100.0);

        let resized = Arc::new(Mutex::new(Vec::new()));
        let resized_clone = resized.clone();
        column.resized.connect(move |&(_, w)| resized_clone.lock().push(w));

        column.set_width(150.0);
        assert_eq!(column.width(), Length::px(150.0));
        assert!(column.desired_width().is_nan());
        assert_eq!(resized.lock().len(), 1);
    }

    #[test]
    fn test_apply_resize_keeps_desired_width() {
        let column = Column::new().with_width(100.0);
        column.apply_resize(120.0);
        assert_eq!(column.width(), Length::px(120.0));
        assert_eq!(column.desired_width(), 120.0);
    }

    #[test]
    fn test_hiding_forgets_desired_width() {
        let column = Column::new();
        column.set_desired_width(80.0);
        column.set_visible(false);
        assert!(column.desired_width().is_nan());
    }

    #[test]
    fn test_desired_width_signal_only_on_change() {
        let column = Column::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        column.resized.connect(move |_| *count_clone.lock() += 1);

        column.set_desired_width(50.0);
        column.set_desired_width(50.0);
        column.set_desired_width(60.0);
        assert_eq!(*count.lock(), 2);
    }
}
