use gpui::{Bounds, Pixels, Point, px};

/// Width of the close/unpin button at the right edge of every file row.
///
/// The row renderer lays the button out with exactly this width.
pub const ACTION_BUTTON_WIDTH: Pixels = px(22.);

/// Row bounds of the list as of the last frame, in window coordinates.
#[derive(Clone, Debug, Default)]
pub struct RowLayout {
    rows: Vec<Bounds<Pixels>>,
}

impl RowLayout {
    /// Rows recorded before scrolling, moved by the container's scroll `offset`.
    pub fn scrolled(rows: impl IntoIterator<Item = Bounds<Pixels>>, offset: Point<Pixels>) -> Self {
        let rows = rows
            .into_iter()
            .map(|bounds| Bounds {
                origin: bounds.origin + offset,
                size: bounds.size,
            })
            .collect();
        Self { rows }
    }

    /// Stack rows of the given heights below `origin`, all `width` wide.
    pub fn stacked(origin: Point<Pixels>, width: Pixels, heights: &[Pixels]) -> Self {
        let mut y = origin.y;
        let rows = heights
            .iter()
            .map(|&height| {
                let bounds = Bounds {
                    origin: gpui::point(origin.x, y),
                    size: gpui::size(width, height),
                };
                y += height;
                bounds
            })
            .collect();
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_bounds(&self, ix: usize) -> Option<Bounds<Pixels>> {
        self.rows.get(ix).copied().filter(is_usable)
    }

    /// Index of the row vertically closest to `position`.
    ///
    /// Positions above the first row resolve to the first row and positions
    /// below the last row resolve to the last row.
    pub fn index_for_y(&self, position: Point<Pixels>) -> Option<usize> {
        let last = self.rows.len().checked_sub(1)?;
        let y: f32 = position.y.into();
        if !y.is_finite() {
            return None;
        }

        // Rows are laid out top to bottom, so `bottom()` is non-decreasing.
        let ix = self.rows.partition_point(|row| row.bottom() <= position.y);
        Some(ix.min(last))
    }
}

fn is_usable(bounds: &Bounds<Pixels>) -> bool {
    bounds.size.width > Pixels::ZERO && bounds.size.height > Pixels::ZERO
}

/// A row under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub ix: usize,
    pub bounds: Bounds<Pixels>,
}

/// Resolve the row that actually contains `position`.
///
/// Returns `None` for positions in the gap below the last row, outside the
/// list horizontally, or while the layout is not available yet.
pub fn hit_test(position: Point<Pixels>, layout: &RowLayout) -> Option<Hit> {
    let ix = layout.index_for_y(position)?;
    let bounds = layout.row_bounds(ix)?;
    bounds.contains(&position).then_some(Hit { ix, bounds })
}

pub fn is_over_action_button(position: Point<Pixels>, bounds: Bounds<Pixels>) -> bool {
    position.x >= bounds.right() - ACTION_BUTTON_WIDTH
}

/// Insertion gap for a drag hovering at `position`: before the closest row
/// when above its vertical midpoint, after it otherwise.
pub fn drop_gap_at(position: Point<Pixels>, layout: &RowLayout) -> Option<usize> {
    let ix = layout.index_for_y(position)?;
    let bounds = layout.row_bounds(ix)?;
    let mid_y = bounds.origin.y + bounds.size.height / 2.0;
    if position.y < mid_y {
        Some(ix)
    } else {
        Some(ix + 1)
    }
}
