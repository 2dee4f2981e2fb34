//! Distribution of a width delta across a set of columns.
//!
//! [`stretch_resize_columns`] is shared by the layout pass, "resize to fit"
//! and interactive drag-resize. A positive delta means the columns must give
//! back that much width (shrink); a negative delta means they must take it
//! (grow). Shrinking and growing run the same phases with a mirrored
//! [`Direction`]:
//!
//! 1. Fixed columns snap back toward their nominal width (skipped when growing
//!    in resize-to-fit mode). Shrink walks right-to-left, grow left-to-right.
//! 2. Stretchable columns absorb the rest proportionally to their current
//!    width, bounded by their min (shrink) or max (grow).
//! 3. Fixed columns take whatever is left: proportionally in resize-to-fit
//!    mode, otherwise one after the other in the phase 1 order.
//!
//! Whatever cannot be absorbed is written back into `delta`.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::column::Column;

/// Where width reads and writes of a distribution go.
///
/// The layout writes straight into the columns; a preview drag session
/// buffers them instead.
pub(crate) trait WidthTarget {
    /// The current width of `column` as seen by this target.
    fn desired_width(&self, column: &Arc<Column>) -> f32;

    /// Writes a new width. With `desired_width_only` the nominal width of the
    /// column is left as configured.
    fn resize_column(&mut self, column: &Arc<Column>, width: f32, desired_width_only: bool);
}

/// Writes directly into the columns.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Committed;

impl WidthTarget for Committed {
    fn desired_width(&self, column: &Arc<Column>) -> f32 {
        column.desired_width()
    }

    fn resize_column(&mut self, column: &Arc<Column>, width: f32, desired_width_only: bool) {
        if desired_width_only {
            column.set_desired_width(width);
        } else {
            column.apply_resize(width);
        }
    }
}

/// Resolved width bounds of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub fn of(column: &Column, reference: f32) -> Self {
        Self {
            min: column.min_width().resolve(reference),
            max: column.max_width().resolve(reference),
        }
    }

    /// Clamps into the bounds. With `min > max` the result is pinned to `min`.
    #[inline]
    pub fn clamp(self, width: f32) -> f32 {
        clamp_width(width, self.min, self.max)
    }
}

/// Clamp that never panics: `min` wins over `max` when they are inverted.
#[inline]
pub(crate) fn clamp_width(width: f32, min: f32, max: f32) -> f32 {
    width.min(max).max(min)
}

/// The nominal width of a column clamped into its bounds.
pub(crate) fn nominal_width(column: &Column, reference: f32) -> f32 {
    Bounds::of(column, reference).clamp(column.width().resolve(reference))
}

/// Which way a distribution moves column widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Shrink,
    Grow,
}

impl Direction {
    /// Direction for a signed delta, `None` for zero.
    pub fn of(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Shrink)
        } else if delta < 0.0 {
            Some(Self::Grow)
        } else {
            None
        }
    }

    /// The bound a column moves toward.
    #[inline]
    fn limit(self, bounds: Bounds) -> f32 {
        match self {
            Self::Shrink => bounds.min,
            Self::Grow => bounds.max,
        }
    }

    /// How far `current` can move before reaching `limit`.
    #[inline]
    fn room(self, current: f32, limit: f32) -> f32 {
        match self {
            Self::Shrink => current - limit,
            Self::Grow => limit - current,
        }
        .max(0.0)
    }

    #[inline]
    fn step(self, current: f32, amount: f32) -> f32 {
        match self {
            Self::Shrink => current - amount,
            Self::Grow => current + amount,
        }
    }

    #[inline]
    fn sign(self) -> f32 {
        match self {
            Self::Shrink => 1.0,
            Self::Grow => -1.0,
        }
    }

    /// Processing order for proportional phases: when shrinking, the columns
    /// with the largest minimum go first; when growing, the smallest maximum.
    fn sort(self, columns: &mut [(Arc<Column>, Bounds)]) {
        match self {
            Self::Shrink => {
                columns.sort_by(|a, b| b.1.min.partial_cmp(&a.1.min).unwrap_or(Ordering::Equal))
            }
            Self::Grow => {
                columns.sort_by(|a, b| a.1.max.partial_cmp(&b.1.max).unwrap_or(Ordering::Equal))
            }
        }
    }

    /// Sequential phases walk fixed columns from the right when shrinking and
    /// from the left when growing.
    fn sequential<'a>(
        self,
        columns: &'a [Arc<Column>],
    ) -> Box<dyn Iterator<Item = &'a Arc<Column>> + 'a> {
        match self {
            Self::Shrink => Box::new(columns.iter().rev()),
            Self::Grow => Box::new(columns.iter()),
        }
    }
}

/// Distributes `delta` over `stretchable` and `fixed` columns.
///
/// On return `delta` holds the part that could not be absorbed, with the
/// original sign.
pub(crate) fn stretch_resize_columns(
    target: &mut dyn WidthTarget,
    stretchable: &[Arc<Column>],
    fixed: &[Arc<Column>],
    delta: &mut f32,
    reference: f32,
    resize_to_fit: bool,
    desired_width_only: bool,
) {
    let Some(direction) = Direction::of(*delta) else {
        return;
    };
    if stretchable.is_empty() && fixed.is_empty() {
        return;
    }

    let mut remaining = delta.abs();

    // Phase 1: fixed columns back toward their nominal width.
    if direction == Direction::Shrink || !resize_to_fit {
        for column in direction.sequential(fixed) {
            if remaining <= 0.0 {
                break;
            }
            if column.width().value() == 0.0 {
                continue;
            }
            let limit = nominal_width(column, reference);
            move_toward(target, column, direction, limit, &mut remaining, desired_width_only);
        }
    }

    // Phase 2: stretchable columns, proportionally.
    if remaining > 0.0 {
        let mut sorted = with_bounds(stretchable, reference);
        direction.sort(&mut sorted);
        distribute_proportionally(target, &sorted, direction, &mut remaining, desired_width_only);
    }

    // Phase 3: fixed columns all the way to their bounds.
    if remaining > 0.0 {
        if resize_to_fit {
            let mut sorted = with_bounds(fixed, reference);
            direction.sort(&mut sorted);
            distribute_proportionally(
                target,
                &sorted,
                direction,
                &mut remaining,
                desired_width_only,
            );
        } else {
            for column in direction.sequential(fixed) {
                if remaining <= 0.0 {
                    break;
                }
                let limit = direction.limit(Bounds::of(column, reference));
                move_toward(target, column, direction, limit, &mut remaining, desired_width_only);
            }
        }
    }

    *delta = remaining.max(0.0) * direction.sign();
}

fn with_bounds(columns: &[Arc<Column>], reference: f32) -> Vec<(Arc<Column>, Bounds)> {
    columns
        .iter()
        .map(|c| (c.clone(), Bounds::of(c, reference)))
        .collect()
}

/// Moves one column toward `limit` by at most `remaining`.
fn move_toward(
    target: &mut dyn WidthTarget,
    column: &Arc<Column>,
    direction: Direction,
    limit: f32,
    remaining: &mut f32,
    desired_width_only: bool,
) {
    let current = target.desired_width(column);
    let amount = direction.room(current, limit).min(*remaining);
    if amount <= 0.0 {
        return;
    }
    target.resize_column(column, direction.step(current, amount), desired_width_only);
    *remaining -= amount;
}

/// Splits `remaining` across `columns` in proportion to their current widths.
///
/// Each pass hands every column a share of what is still left, weighted by the
/// widths of the columns not yet served, so a column stopped by its bound
/// passes its surplus on to the next one. Columns served early in a pass that
/// still have room pick up any leftover on the following pass.
fn distribute_proportionally(
    target: &mut dyn WidthTarget,
    columns: &[(Arc<Column>, Bounds)],
    direction: Direction,
    remaining: &mut f32,
    desired_width_only: bool,
) {
    loop {
        if *remaining <= 0.0 {
            return;
        }

        let active: Vec<&(Arc<Column>, Bounds)> = columns
            .iter()
            .filter(|(c, b)| direction.room(target.desired_width(c), direction.limit(*b)) > 0.0)
            .collect();
        if active.is_empty() {
            return;
        }

        let mut weight: f32 = active.iter().map(|(c, _)| target.desired_width(c).max(0.0)).sum();
        let mut left = active.len();
        let pass_start = *remaining;

        for (column, bounds) in active {
            if *remaining <= 0.0 {
                break;
            }
            let current = target.desired_width(column);
            let share = if weight > 0.0 {
                *remaining * current.max(0.0) / weight
            } else {
                *remaining / left as f32
            };
            weight -= current.max(0.0);
            left -= 1;

            let room = direction.room(current, direction.limit(*bounds));
            let amount = share.min(room).min(*remaining);
            if amount > 0.0 {
                target.resize_column(column, direction.step(current, amount), desired_width_only);
                *remaining -= amount;
            }
        }

        if pass_start - *remaining <= f32::EPSILON * pass_start.max(1.0) {
            return;
        }
    }
}
