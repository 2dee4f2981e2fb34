//! Declarative column configuration.
//!
//! A [`ColumnsConfig`] describes the collection-level options and the initial
//! columns of a view. It is usually loaded from TOML:
//!
//! ```toml
//! stretch_mode = "grow-and-fill"
//! resize_preview = true
//!
//! [[columns]]
//! name = "name"
//! title = "Name"
//! stretchable = true
//!
//! [[columns]]
//! name = "size"
//! title = "Size"
//! width = "120px"
//! max_width = 200
//! ```
//!
//! Constraints are validated here, once. Programmatic setters on
//! [`Column`] accept any values.

use std::collections::HashSet;
use std::sync::Arc;

use horizon_columns_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::collection::{ColumnCollection, StretchMode};
use crate::column::{Column, DEFAULT_MIN_WIDTH};
use crate::error::{ConfigError, ConfigResult};
use crate::length::Length;

fn default_true() -> bool {
    true
}

fn default_min_width() -> Length {
    Length::px(DEFAULT_MIN_WIDTH)
}

fn default_max_width() -> Length {
    Length::UNBOUNDED
}

/// Options and columns of one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    pub stretch_mode: StretchMode,
    pub resize_preview: bool,
    pub reorderable: bool,
    pub resizable: bool,
    pub columns: Vec<ColumnDefinition>,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            stretch_mode: StretchMode::GrowAndFill,
            resize_preview: false,
            reorderable: true,
            resizable: true,
            columns: Vec::new(),
        }
    }
}

/// One `[[columns]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub width: Length,
    #[serde(default = "default_min_width")]
    pub min_width: Length,
    #[serde(default = "default_max_width")]
    pub max_width: Length,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub stretchable: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub optional: bool,
    #[serde(default = "default_true")]
    pub resizable: bool,
}

impl ColumnDefinition {
    /// A definition with default constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: String::new(),
            icon: None,
            width: Length::ZERO,
            min_width: default_min_width(),
            max_width: default_max_width(),
            visible: true,
            stretchable: false,
            sortable: true,
            optional: true,
            resizable: true,
        }
    }

    /// Fails if the minimum exceeds the maximum. Bounds of different units
    /// are only compared when both are pixels.
    fn validate(&self) -> ConfigResult<()> {
        if let (Length::Pixels(min), Length::Pixels(max)) = (self.min_width, self.max_width)
            && min > max
        {
            return Err(ConfigError::InvalidConstraints {
                name: self.name.clone(),
                min,
                max,
            });
        }
        if let (Length::Percent(min), Length::Percent(max)) = (self.min_width, self.max_width)
            && min > max
        {
            return Err(ConfigError::InvalidConstraints {
                name: self.name.clone(),
                min,
                max,
            });
        }
        Ok(())
    }

    fn to_column(&self) -> Column {
        let mut column = Column::new()
            .with_name(self.name.clone())
            .with_title(self.title.clone())
            .with_width(self.width)
            .with_min_width(self.min_width)
            .with_max_width(self.max_width)
            .with_visible(self.visible)
            .with_stretchable(self.stretchable)
            .with_sortable(self.sortable)
            .with_optional(self.optional)
            .with_resizable(self.resizable);
        if let Some(icon) = &self.icon {
            column = column.with_icon(icon.clone());
        }
        column
    }
}

impl ColumnsConfig {
    /// Parses a TOML document.
    pub fn from_toml(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks column names and width constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut names = HashSet::new();
        for definition in &self.columns {
            if !names.insert(definition.name.as_str()) {
                return Err(ConfigError::DuplicateColumnName(definition.name.clone()));
            }
            definition.validate()?;
        }
        Ok(())
    }
}

impl ColumnCollection {
    /// Builds a populated collection from a configuration.
    ///
    /// # Errors
    ///
    /// Fails without building anything if the configuration is invalid.
    pub fn from_config(config: &ColumnsConfig) -> ConfigResult<Arc<Self>> {
        config.validate()?;

        let collection = Arc::new(Self::new());
        collection.set_stretch_mode(config.stretch_mode);
        collection.set_resize_preview(config.resize_preview);
        collection.set_reorderable(config.reorderable);
        collection.set_resizable(config.resizable);
        for definition in &config.columns {
            collection.add(definition.to_column());
        }

        tracing::debug!(
            target: targets::CONFIG,
            columns = config.columns.len(),
            stretch_mode = ?config.stretch_mode,
            "column collection built from configuration"
        );
        Ok(collection)
    }
}
