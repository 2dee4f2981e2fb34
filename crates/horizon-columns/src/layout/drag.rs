//! Interactive drag-resize sessions.
//!
//! A session lives between [`ColumnLayout::begin_drag_resize`] and
//! [`ColumnLayout::end_drag_resize`]. It snapshots the visible columns after
//! the dragged one as the pool that absorbs the push or pull of the drag.
//!
//! In preview mode all width writes go into a [`PreviewWidths`] buffer owned
//! by the session; the buffer is committed on a regular end and dropped on a
//! cancelled one, so the columns never see the intermediate widths.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use horizon_columns_core::logging::targets;

use super::ColumnLayout;
use super::distribute::{
    Bounds, Committed, WidthTarget, nominal_width, stretch_resize_columns,
};
use crate::collection::StretchMode;
use crate::column::{Column, ColumnId};
use crate::error::{LayoutError, LayoutResult};

/// Tentative widths of the columns touched by a preview drag.
#[derive(Debug, Default)]
struct PreviewWidths {
    widths: HashMap<ColumnId, (Arc<Column>, f32)>,
}

impl PreviewWidths {
    fn seed(columns: impl IntoIterator<Item = Arc<Column>>) -> Self {
        let widths = columns
            .into_iter()
            .map(|c| (c.id(), (c.clone(), c.desired_width())))
            .collect();
        Self { widths }
    }

    /// Writes the buffered widths back. The dragged column keeps its new
    /// width as its nominal width; the columns it pushed only change the
    /// rendered width.
    fn commit(self, dragged: &Column) {
        for (id, (column, width)) in self.widths {
            if width.is_nan() {
                continue;
            }
            if id == dragged.id() {
                column.apply_resize(width);
            } else {
                column.set_desired_width(width);
            }
        }
    }
}

impl WidthTarget for PreviewWidths {
    fn desired_width(&self, column: &Arc<Column>) -> f32 {
        self.widths
            .get(&column.id())
            .map_or_else(|| column.desired_width(), |(_, w)| *w)
    }

    fn resize_column(&mut self, column: &Arc<Column>, width: f32, _desired_width_only: bool) {
        self.widths
            .entry(column.id())
            .and_modify(|(_, w)| *w = width)
            .or_insert_with(|| (column.clone(), width));
    }
}

/// Read-only view of the active drag-resize session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSessionInfo {
    /// The column being dragged.
    pub column: ColumnId,
    /// Its desired width when the drag started.
    pub start_width: f32,
    /// Whether width changes are buffered until the drag ends.
    pub preview: bool,
}

/// State of an active drag-resize.
pub(super) struct DragSession {
    pub(super) column: Arc<Column>,
    start_width: f32,
    start_pos: f32,
    last_pos: f32,
    stretchable_after: Vec<Arc<Column>>,
    fixed_after: Vec<Arc<Column>>,
    preview: Option<PreviewWidths>,
}

impl DragSession {
    /// The width of `column` as rendered during the session.
    pub(super) fn desired_width(&self, column: &Arc<Column>) -> f32 {
        match &self.preview {
            Some(preview) => preview.desired_width(column),
            None => column.desired_width(),
        }
    }

    fn info(&self) -> DragSessionInfo {
        DragSessionInfo {
            column: self.column.id(),
            start_width: self.start_width,
            preview: self.preview.is_some(),
        }
    }

    /// Every column the session may write.
    fn column_ids(&self) -> Vec<ColumnId> {
        std::iter::once(&self.column)
            .chain(&self.stretchable_after)
            .chain(&self.fixed_after)
            .map(|c| c.id())
            .collect()
    }

    fn drag_to(&mut self, position: f32, redistribute: bool, reference: f32) {
        let bounds = Bounds::of(&self.column, reference);
        let mut committed = Committed;
        let target: &mut dyn WidthTarget = match self.preview.as_mut() {
            Some(preview) => preview,
            None => &mut committed,
        };
        let current = target.desired_width(&self.column);

        if redistribute {
            let new_width = bounds.clamp(current + (position - self.last_pos));
            let mut delta = new_width - current;
            if delta != 0.0 {
                stretch_resize_columns(
                    target,
                    &self.stretchable_after,
                    &self.fixed_after,
                    &mut delta,
                    reference,
                    false,
                    true,
                );
                target.resize_column(&self.column, new_width, false);
            }
        } else {
            let new_width = bounds.clamp(self.start_width + (position - self.start_pos));
            if new_width != current {
                target.resize_column(&self.column, new_width, false);
            }
        }

        tracing::trace!(
            target: targets::RESIZE,
            column = ?self.column.id(),
            position,
            width = target.desired_width(&self.column),
            "drag resize step"
        );
        self.last_pos = position;
    }
}

impl ColumnLayout {
    /// Starts an interactive resize of `column` with the pointer at
    /// `position` (layout space).
    ///
    /// # Errors
    ///
    /// Fails without side effects if a session is already active, if the
    /// layout needs a pass, or if `column` is not visible.
    pub fn begin_drag_resize(
        &mut self,
        column: &Arc<Column>,
        position: f32,
        preview: bool,
    ) -> LayoutResult<()> {
        if let Some(session) = &self.drag {
            return Err(LayoutError::DragInProgress(session.column.id()));
        }
        if self.is_dirty() {
            return Err(LayoutError::LayoutDirty);
        }

        let visible = self.columns.visible_list();
        let Some(index) = visible.iter().position(|c| c.id() == column.id()) else {
            return Err(LayoutError::ColumnNotVisible(column.id()));
        };

        let (stretchable_after, fixed_after): (Vec<_>, Vec<_>) = visible[index + 1..]
            .iter()
            .cloned()
            .partition(|c| c.stretchable());

        let mut start_width = column.desired_width();
        if start_width.is_nan() {
            start_width = nominal_width(column, self.reference_width);
        }

        let preview = preview.then(|| {
            PreviewWidths::seed(
                std::iter::once(column.clone())
                    .chain(stretchable_after.iter().cloned())
                    .chain(fixed_after.iter().cloned()),
            )
        });

        let session = DragSession {
            column: column.clone(),
            start_width,
            start_pos: position,
            last_pos: position,
            stretchable_after,
            fixed_after,
            preview,
        };

        tracing::debug!(
            target: targets::RESIZE,
            column = ?column.id(),
            start_width,
            position,
            preview = session.preview.is_some(),
            "drag resize started"
        );
        self.drag = Some(session);
        Ok(())
    }

    /// Moves the dragged boundary to `position` (layout space).
    ///
    /// In [`StretchMode::GrowAndFill`] with stretchable columns present, the
    /// change since the previous step is pushed into the columns after the
    /// dragged one. Otherwise only the dragged column changes, following the
    /// total displacement since the drag started.
    ///
    /// # Errors
    ///
    /// Fails if no session is active or another column is being dragged.
    pub fn drag_resize(&mut self, column: &Arc<Column>, position: f32) -> LayoutResult<()> {
        let redistribute = self.columns.stretch_mode() == StretchMode::GrowAndFill
            && !self.partitions.stretchable.is_empty();
        let reference = self.reference_width;
        let shared = self.shared.clone();
        let session = self.session_for(column)?;
        let written = session.column_ids();
        shared.write_widths(written, || session.drag_to(position, redistribute, reference));
        Ok(())
    }

    /// Ends the session.
    ///
    /// A preview session commits its buffered widths unless `cancelled`.
    /// Without preview the widths were written as the drag went and stay as
    /// they are, cancelled or not.
    ///
    /// # Errors
    ///
    /// Fails if no session is active or another column is being dragged.
    pub fn end_drag_resize(&mut self, column: &Arc<Column>, cancelled: bool) -> LayoutResult<()> {
        self.session_for(column)?;
        let Some(session) = self.drag.take() else {
            return Err(LayoutError::NoDragSession);
        };

        let preview = session.preview.is_some();
        let written = session.column_ids();
        if let Some(widths) = session.preview
            && !cancelled
        {
            self.shared.write_widths(written, || widths.commit(&session.column));
        }

        self.shared.columns_width_dirty.store(true, Ordering::SeqCst);

        tracing::debug!(
            target: targets::RESIZE,
            column = ?session.column.id(),
            width = session.column.desired_width(),
            preview,
            cancelled,
            "drag resize ended"
        );
        Ok(())
    }

    /// Whether a drag-resize session is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The active drag-resize session, if any.
    pub fn drag_session(&self) -> Option<DragSessionInfo> {
        self.drag.as_ref().map(DragSession::info)
    }

    pub(super) fn preview_active(&self) -> bool {
        self.drag.as_ref().is_some_and(|s| s.preview.is_some())
    }

    fn session_for(&mut self, column: &Column) -> LayoutResult<&mut DragSession> {
        let session = self.drag.as_mut().ok_or(LayoutError::NoDragSession)?;
        if session.column.id() != column.id() {
            return Err(LayoutError::WrongDragColumn {
                requested: column.id(),
                active: session.column.id(),
            });
        }
        Ok(session)
    }
}
