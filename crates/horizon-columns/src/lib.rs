//! Column layout, resize and reorder for multi-column views.
//!
//! This crate computes how the columns of a header share the available
//! width and drives the interactive manipulations of that state:
//!
//! - **Columns**: [`Column`] constraints and [`ColumnCollection`] ordering
//! - **Layout**: [`ColumnLayout`] distributes the container width over the
//!   visible columns and runs drag-resize sessions, optionally buffered in a
//!   preview until release
//! - **Manipulators**: [`ColumnResizeManipulator`] and
//!   [`ColumnMoveManipulator`] turn pointer input into resizes and reorders
//! - **Header**: [`HeaderController`] schedules layout passes and routes
//!   input to the manipulators through a [`HeaderSurface`]
//! - **Configuration**: [`ColumnsConfig`] from TOML and [`LayoutState`]
//!   persisted as JSON
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_columns::{Column, ColumnCollection, ColumnLayout};
//!
//! let columns = Arc::new(ColumnCollection::new());
//! let name = columns.add(Column::new().with_title("Name").with_stretchable(true));
//! let size = columns.add(Column::new().with_title("Size").with_width(80.0));
//!
//! let mut layout = ColumnLayout::new(columns.clone());
//! layout.do_layout(500.0);
//! assert_eq!(size.desired_width(), 80.0);
//! assert_eq!(name.desired_width(), 420.0);
//!
//! // Drag the boundary between the two columns 40 pixels to the left.
//! layout.begin_drag_resize(&name, 420.0, false).unwrap();
//! layout.drag_resize(&name, 380.0).unwrap();
//! layout.end_drag_resize(&name, false).unwrap();
//! assert_eq!(name.desired_width(), 380.0);
//! ```

pub mod collection;
pub mod column;
pub mod config;
pub mod error;
pub mod events;
pub mod header;
pub mod layout;
pub mod length;
pub mod manipulator;
pub mod state;
pub mod surface;

pub use collection::{CollectionDataType, ColumnCollection, StretchMode};
pub use column::{Column, ColumnDataType, ColumnId, DEFAULT_MIN_WIDTH};
pub use config::{ColumnDefinition, ColumnsConfig};
pub use error::{ConfigError, ConfigResult, LayoutError, LayoutResult, LengthParseError};
pub use events::{
    HeaderEvent, Key, KeyEvent, KeyboardModifiers, MouseButton, Point, PointerEvent, PointerId,
};
pub use header::{HeaderController, HeaderTarget, MAX_LAYOUT_PASSES_PER_FRAME};
pub use layout::{ColumnLayout, DragSessionInfo};
pub use length::Length;
pub use manipulator::{
    ActivationFilter, ColumnMoveManipulator, ColumnResizeManipulator, MOVE_THRESHOLD,
};
pub use state::{ColumnStateEntry, LayoutState};
pub use surface::{DropSide, HeaderSurface};
