//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use horizon_columns::{
    Column, ColumnCollection, ColumnId, DropSide, HeaderEvent, HeaderSurface, Key, KeyEvent,
    Point, PointerEvent, PointerId,
};

/// A call made on [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Capture(PointerId),
    Release(PointerId),
    ShowResizePreview(ColumnId, f32),
    MoveResizePreview(f32),
    HideResizePreview,
    ShowMovePreview(ColumnId, f32, f32),
    MoveMovePreview(f32, f32, DropSide),
    HideMovePreview,
}

/// A [`HeaderSurface`] that records every call and tracks capture state.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub captured: HashSet<PointerId>,
    /// Horizontal scroll offset added when converting to layout space.
    pub scroll: f32,
    pub refuse_capture: bool,
    pub resize_preview_visible: bool,
    pub move_preview_visible: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the platform taking the capture away.
    pub fn steal_capture(&mut self, pointer: PointerId) {
        self.captured.remove(&pointer);
    }

    pub fn count(&self, call: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| call(c)).count()
    }

    /// Nothing left behind by a finished manipulation.
    pub fn is_clean(&self) -> bool {
        self.captured.is_empty() && !self.resize_preview_visible && !self.move_preview_visible
    }
}

impl HeaderSurface for RecordingSurface {
    fn capture_pointer(&mut self, pointer: PointerId) -> bool {
        if self.refuse_capture {
            return false;
        }
        self.calls.push(SurfaceCall::Capture(pointer));
        self.captured.insert(pointer);
        true
    }

    fn release_pointer(&mut self, pointer: PointerId) {
        self.calls.push(SurfaceCall::Release(pointer));
        self.captured.remove(&pointer);
    }

    fn has_pointer_capture(&self, pointer: PointerId) -> bool {
        self.captured.contains(&pointer)
    }

    fn to_layout_space(&self, position: Point) -> f32 {
        position.x + self.scroll
    }

    fn show_resize_preview(&mut self, column: ColumnId, x: f32) {
        self.resize_preview_visible = true;
        self.calls.push(SurfaceCall::ShowResizePreview(column, x));
    }

    fn move_resize_preview(&mut self, x: f32) {
        self.calls.push(SurfaceCall::MoveResizePreview(x));
    }

    fn hide_resize_preview(&mut self) {
        self.resize_preview_visible = false;
        self.calls.push(SurfaceCall::HideResizePreview);
    }

    fn show_move_preview(&mut self, column: ColumnId, x: f32, width: f32) {
        self.move_preview_visible = true;
        self.calls.push(SurfaceCall::ShowMovePreview(column, x, width));
    }

    fn move_move_preview(&mut self, x: f32, drop_x: f32, side: DropSide) {
        self.calls.push(SurfaceCall::MoveMovePreview(x, drop_x, side));
    }

    fn hide_move_preview(&mut self) {
        self.move_preview_visible = false;
        self.calls.push(SurfaceCall::HideMovePreview);
    }
}

pub fn down(x: f32) -> HeaderEvent {
    HeaderEvent::PointerDown(PointerEvent::primary(x))
}

pub fn moved(x: f32) -> HeaderEvent {
    HeaderEvent::PointerMove(PointerEvent::primary(x))
}

pub fn up(x: f32) -> HeaderEvent {
    HeaderEvent::PointerUp(PointerEvent::primary(x))
}

pub fn escape() -> HeaderEvent {
    HeaderEvent::KeyDown(KeyEvent::new(Key::Escape))
}

/// `count` fixed columns of `width`, named `c0`, `c1`, ...
pub fn fixed_columns(count: usize, width: f32) -> (Arc<ColumnCollection>, Vec<Arc<Column>>) {
    let collection = Arc::new(ColumnCollection::new());
    let columns = (0..count)
        .map(|i| collection.add(Column::new().with_name(format!("c{i}")).with_width(width)))
        .collect();
    (collection, columns)
}

pub fn display_names(collection: &ColumnCollection) -> Vec<String> {
    collection
        .display_list()
        .iter()
        .filter_map(|c| c.name())
        .collect()
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}
