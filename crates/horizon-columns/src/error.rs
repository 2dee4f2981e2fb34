//! Error types for the column engine.

use crate::column::ColumnId;

/// Result type alias for layout operations.
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

/// Result type alias for configuration and persisted-state operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Sequencing errors raised by [`ColumnLayout`](crate::ColumnLayout).
///
/// These signal a programming error in the caller: the operation refuses to
/// proceed instead of computing on stale state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A drag session was requested while the layout still needs a pass.
    #[error("cannot begin a drag resize while the layout is dirty")]
    LayoutDirty,

    /// A drag session is already running.
    #[error("a drag resize session is already active for column {0:?}")]
    DragInProgress(ColumnId),

    /// The column is not part of the visible set.
    #[error("column {0:?} is not visible")]
    ColumnNotVisible(ColumnId),

    /// A drag operation was requested with no active session.
    #[error("no drag resize session is active")]
    NoDragSession,

    /// A drag operation named a column other than the one being dragged.
    #[error("column {requested:?} is not the column being dragged ({active:?})")]
    WrongDragColumn {
        requested: ColumnId,
        active: ColumnId,
    },
}

/// Errors raised while loading configuration or persisted layout state.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML configuration could not be parsed.
    #[error("failed to parse column configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON layout state could not be parsed or written.
    #[error("failed to (de)serialize layout state: {0}")]
    Json(#[from] serde_json::Error),

    /// A column declares a minimum width larger than its maximum width.
    #[error("column '{name}' has min width {min} greater than max width {max}")]
    InvalidConstraints { name: String, min: f32, max: f32 },

    /// Two columns share the same name.
    #[error("duplicate column name '{0}'")]
    DuplicateColumnName(String),

    /// Persisted state refers to a column the collection does not have.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

/// A length literal could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid length '{literal}', expected a number, '<n>px' or '<n>%'")]
pub struct LengthParseError {
    literal: String,
}

impl LengthParseError {
    pub(crate) fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }

    /// The literal that failed to parse.
    pub fn literal(&self) -> &str {
        &self.literal
    }
}
