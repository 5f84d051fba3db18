//! Visible-window math: which grid rows and columns intersect the viewport.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Inclusive range of grid rows and columns to materialize. Row 0 is the
/// header row, column 0 the row-header column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub first_row: usize,
    pub last_row: usize,
    pub first_col: usize,
    pub last_col: usize,
}

impl VisibleWindow {
    #[inline]
    pub fn rows(&self) -> RangeInclusive<usize> {
        self.first_row..=self.last_row
    }

    #[inline]
    pub fn cols(&self) -> RangeInclusive<usize> {
        self.first_col..=self.last_col
    }

    /// Number of grid positions covered; never zero.
    pub fn item_count(&self) -> usize {
        (self.last_row - self.first_row + 1) * (self.last_col - self.first_col + 1)
    }

    /// Iterate `(grid_row, grid_col)` in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows()
            .flat_map(move |row| self.cols().map(move |col| (row, col)))
    }
}

/// Visible grid rows for a vertical scroll offset, clamped to `[0, row_count]`.
///
/// The table body starts below the top decoration, so scrolling through the
/// decoration does not move the row window. There are `row_count + 1` grid
/// rows, making `row_count` the last valid grid row.
pub fn vertical_window(
    scroll_y: f32,
    top_height: f32,
    viewport_height: f32,
    cell_height: i32,
    row_count: usize,
) -> (usize, usize) {
    let cell_height = cell_height.max(1) as f32;
    let table_scroll = (scroll_y - top_height).max(0.0);
    let first = (table_scroll / cell_height).floor() as usize;
    let last = ((table_scroll + viewport_height) / cell_height).floor() as usize;
    (first.min(row_count), last.min(row_count))
}

/// Visible grid columns for a horizontal scroll offset.
///
/// `cumulative` holds the left edge of every column followed by the right
/// edge of the last one. Returns `None` when there are no columns.
pub fn horizontal_window(
    cumulative: &[f32],
    scroll_x: f32,
    viewport_width: f32,
) -> Option<(usize, usize)> {
    let column_count = cumulative.len().checked_sub(1)?;
    if column_count == 0 {
        return None;
    }
    let last_index = column_count - 1;

    // The first edge at or past the scroll offset closes the column that
    // contains it.
    let first = cumulative
        .partition_point(|&edge| edge < scroll_x)
        .saturating_sub(1)
        .min(last_index);

    let end = scroll_x + viewport_width;
    let mut last = first;
    for (i, &edge) in cumulative.iter().enumerate().skip(first) {
        if edge >= end {
            break;
        }
        last = i;
    }

    Some((first, last.min(last_index)))
}
