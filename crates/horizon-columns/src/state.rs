//! Persisted layout state: widths, visibility and display order by name.

use std::sync::Arc;

use horizon_columns_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::collection::ColumnCollection;
use crate::column::{Column, ColumnId};
use crate::error::{ConfigError, ConfigResult};
use crate::length::Length;

/// Saved state of one named column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStateEntry {
    pub name: String,
    pub width: Length,
    pub visible: bool,
}

/// Saved state of a collection, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutState {
    pub columns: Vec<ColumnStateEntry>,
}

impl LayoutState {
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(source: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

impl ColumnCollection {
    /// Captures the state of every named column in display order.
    ///
    /// Columns sized by a layout pass are saved with their rendered width;
    /// others with their nominal width.
    pub fn save_state(&self) -> LayoutState {
        let columns = self
            .display_list()
            .into_iter()
            .filter_map(|column| {
                let name = column.name()?;
                let desired = column.desired_width();
                let width = if desired.is_nan() {
                    column.width()
                } else {
                    Length::px(desired)
                };
                Some(ColumnStateEntry {
                    name,
                    width,
                    visible: column.visible(),
                })
            })
            .collect();
        LayoutState { columns }
    }

    /// Applies saved widths, visibility and display order.
    ///
    /// Pixel widths of visible columns are also taken as their rendered
    /// width; the next layout pass clamps them into the column's bounds.
    ///
    /// Columns not mentioned in `state` keep their settings and follow the
    /// restored ones in display order.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::UnknownColumn`] before changing anything if
    /// an entry names a column this collection does not have.
    pub fn restore_state(&self, state: &LayoutState) -> ConfigResult<()> {
        let resolved: Vec<(Arc<Column>, &ColumnStateEntry)> = state
            .columns
            .iter()
            .map(|entry| {
                self.find(&entry.name)
                    .map(|column| (column, entry))
                    .ok_or_else(|| ConfigError::UnknownColumn(entry.name.clone()))
            })
            .collect::<ConfigResult<_>>()?;

        for (column, entry) in &resolved {
            column.set_visible(entry.visible);
            match entry.width {
                // Sized columns are not split again by the next pass.
                Length::Pixels(width) if entry.visible => column.apply_resize(width),
                width => column.set_width(width),
            }
        }
        let order: Vec<ColumnId> = resolved.iter().map(|(c, _)| c.id()).collect();
        self.set_display_order(&order);

        tracing::debug!(target: targets::CONFIG, columns = resolved.len(), "layout state restored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Arc<ColumnCollection> {
        let columns = Arc::new(ColumnCollection::new());
        columns.add(Column::new().with_name("name").with_width(200.0));
        columns.add(Column::new().with_name("size").with_width(80.0));
        columns.add(Column::new().with_name("kind").with_width(120.0));
        columns.add(Column::new().with_title("unnamed"));
        columns
    }

    #[test]
    fn test_save_skips_unnamed_columns() {
        let columns = collection();
        columns.reorder_display(2, 0);
        let state = columns.save_state();

        let names: Vec<_> = state.columns.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["kind", "name", "size"]);
        assert_eq!(state.columns[0].width, Length::px(120.0));
    }

    #[test]
    fn test_restore_applies_order_widths_and_visibility() {
        let source = collection();
        source.reorder_display(0, 2);
        source.find("size").unwrap().set_visible(false);
        source.find("kind").unwrap().set_width(150.0);
        let json = source.save_state().to_json().unwrap();

        let target = collection();
        target
            .restore_state(&LayoutState::from_json(&json).unwrap())
            .unwrap();

        let order: Vec<_> = target
            .display_list()
            .iter()
            .filter_map(|c| c.name())
            .collect();
        assert_eq!(order, ["size", "kind", "name"]);
        assert!(!target.find("size").unwrap().visible());
        assert_eq!(target.find("kind").unwrap().width(), Length::px(150.0));
    }

    #[test]
    fn test_restore_unknown_column_changes_nothing() {
        let columns = collection();
        let state = LayoutState {
            columns: vec![
                ColumnStateEntry {
                    name: "name".into(),
                    width: Length::px(10.0),
                    visible: false,
                },
                ColumnStateEntry {
                    name: "missing".into(),
                    width: Length::px(10.0),
                    visible: true,
                },
            ],
        };

        let err = columns.restore_state(&state).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownColumn(ref n) if n == "missing"));
        let name = columns.find("name").unwrap();
        assert!(name.visible());
        assert_eq!(name.width(), Length::px(200.0));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(LayoutState::from_json("{"), Err(ConfigError::Json(_))));
    }
}
