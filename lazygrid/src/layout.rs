//! The virtualized layout pass.
//!
//! Given bounded viewport constraints, the current scroll offsets and cached
//! column widths, decide which grid items intersect the viewport, have the
//! host measure them at their fixed cell size, and place them at pixel
//! positions. Decorations above and below the table are measured every pass
//! (their height depends on the viewport width) and always placed.

use std::fmt::Display;

use serde::Serialize;

use crate::config::GridConfig;
use crate::constraints::LayoutConstraints;
use crate::content::TableContent;
use crate::error::{GridError, Result};
use crate::gesture::ScrollController;
use crate::index::ItemSlot;
use crate::measure::{ColumnWidths, Measurer};
use crate::primitives::{IntPoint, IntSize, Point, Size};
use crate::window::{VisibleWindow, horizontal_window, vertical_window};

/// One materialized item, ready for the host to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem<R> {
    /// Linear item index.
    pub index: usize,
    pub slot: ItemSlot,
    pub node: R,
    pub size: IntSize,
    /// Top-left corner relative to the viewport.
    pub position: IntPoint,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridFrame<R> {
    /// Viewport size.
    pub size: Size,
    /// Grid rows/columns that were materialized; `None` with no columns or
    /// when the pass was skipped.
    pub window: Option<VisibleWindow>,
    /// Top decoration first, then grid items row by row, bottom decoration last.
    pub items: Vec<PlacedItem<R>>,
    /// Full scrollable content size.
    pub extent: Size,
    /// Published scroll bounds (`x` horizontal, `y` vertical).
    pub max_offset: Point,
    /// Effective scroll offsets the items were placed with.
    pub scroll: Point,
}

impl<R> GridFrame<R> {
    /// A frame that renders nothing.
    pub fn empty(size: Size) -> Self {
        Self {
            size,
            window: None,
            items: Vec::new(),
            extent: Size::ZERO,
            max_offset: Point::ORIGIN,
            scroll: Point::ORIGIN,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The placed item for a slot, if it was materialized.
    pub fn find(&self, slot: ItemSlot) -> Option<&PlacedItem<R>> {
        self.items.iter().find(|item| item.slot == slot)
    }
}

/// A measured decoration.
struct Decoration<R> {
    node: R,
    size: IntSize,
}

/// Run one layout pass.
///
/// Measures column widths on first use (or after new content), publishes the
/// scroll bounds to `scroll`, and places every visible item. Returns an empty
/// frame while the host cannot measure yet.
pub fn layout_grid<T, K, S, R, M>(
    content: &TableContent<T, K, S, R>,
    widths: &mut ColumnWidths,
    scroll: &mut ScrollController,
    config: &GridConfig,
    viewport: LayoutConstraints,
    host: &mut M,
) -> Result<GridFrame<R>>
where
    T: Display,
    K: Display,
    S: Display,
    M: Measurer<R> + ?Sized,
{
    if !viewport.has_bounded_width() || !viewport.has_bounded_height() {
        return Err(GridError::UnboundedViewport {
            width: viewport.max_width,
            height: viewport.max_height,
        });
    }
    let size = viewport.biggest();

    if !widths.ensure_measured(content, host) {
        tracing::debug!("column widths pending, skipping layout pass");
        return Ok(GridFrame::empty(size));
    }
    let (Some(column_widths), Some(cumulative)) = (widths.widths(), widths.cumulative()) else {
        return Ok(GridFrame::empty(size));
    };

    // 1. Decorations: viewport width, natural height.
    let decoration = viewport.with_unbounded_height();
    let top = match measure_decoration(content, ItemSlot::TopContent, decoration, host) {
        Ok(top) => top,
        Err(Pending) => return Ok(GridFrame::empty(size)),
    };
    let bottom = match measure_decoration(content, ItemSlot::BottomContent, decoration, host) {
        Ok(bottom) => bottom,
        Err(Pending) => return Ok(GridFrame::empty(size)),
    };
    let top_height = top.as_ref().map_or(0, |d| d.size.height) as f32;
    let bottom_height = bottom.as_ref().map_or(0, |d| d.size.height) as f32;

    // 2-3. Extent and scroll bounds.
    let cell_height = config.cell_height;
    let space = content.index_space();
    let table_height = space.grid_rows() as f32 * cell_height as f32;
    let total_width = cumulative.last().copied().unwrap_or(0.0);
    let total_height = top_height + table_height + bottom_height;
    let max_offset = Point::new(
        (total_width - size.width).max(0.0),
        (total_height - size.height).max(0.0),
    );
    scroll.update_bounds(max_offset.x, max_offset.y);
    scroll.set_layout_extent(top_height, table_height);

    // 4. Effective scroll.
    let (scroll_x, scroll_y) = scroll.effective_offsets();

    // 5-6. Visible window.
    let (first_row, last_row) = vertical_window(
        scroll_y,
        top_height,
        size.height,
        cell_height,
        space.row_count(),
    );
    let window = horizontal_window(cumulative, scroll_x, size.width).map(|(first_col, last_col)| {
        VisibleWindow {
            first_row,
            last_row,
            first_col,
            last_col,
        }
    });

    let mut items = Vec::with_capacity(window.map_or(0, |w| w.item_count()) + 2);

    if let Some(Decoration { node, size }) = top {
        items.push(PlacedItem {
            index: space.top_content_index(),
            slot: ItemSlot::TopContent,
            node,
            size,
            position: IntPoint::rounded(0.0, -scroll_y),
        });
    }

    // 7-8. Materialize and place the visible grid items.
    if let Some(window) = window {
        for (grid_row, grid_col) in window.positions() {
            let Some(index) = space.grid_index(grid_row, grid_col) else {
                continue;
            };
            let Some(slot) = space.slot(index) else {
                continue;
            };
            let Some(node) = content.render_slot(slot) else {
                tracing::trace!(index, ?slot, "no item at index, skipping");
                continue;
            };
            let fixed = IntSize::new(column_widths[grid_col], cell_height);
            let constraints = LayoutConstraints::fixed(fixed);
            let measured = host.measure(&node, constraints).unwrap_or(fixed);
            items.push(PlacedItem {
                index,
                slot,
                node,
                size: constraints.constrain_int(measured),
                position: IntPoint::rounded(
                    cumulative[grid_col] - scroll_x,
                    top_height + grid_row as f32 * cell_height as f32 - scroll_y,
                ),
            });
        }
    }

    if let Some(Decoration { node, size }) = bottom {
        items.push(PlacedItem {
            index: space.bottom_content_index(),
            slot: ItemSlot::BottomContent,
            node,
            size,
            position: IntPoint::rounded(0.0, top_height + table_height - scroll_y),
        });
    }

    tracing::debug!(
        rows = ?window.map(|w| w.rows()),
        cols = ?window.map(|w| w.cols()),
        items = items.len(),
        scroll_x,
        scroll_y,
        max_x = max_offset.x,
        max_y = max_offset.y,
        "layout pass"
    );

    Ok(GridFrame {
        size,
        window,
        items,
        extent: Size::new(total_width, total_height),
        max_offset,
        scroll: Point::new(scroll_x, scroll_y),
    })
}

/// The host declined to measure.
struct Pending;

fn measure_decoration<T, K, S, R, M>(
    content: &TableContent<T, K, S, R>,
    slot: ItemSlot,
    constraints: LayoutConstraints,
    host: &mut M,
) -> std::result::Result<Option<Decoration<R>>, Pending>
where
    M: Measurer<R> + ?Sized,
{
    let Some(node) = content.render_slot(slot) else {
        return Ok(None);
    };
    match host.measure(&node, constraints) {
        Some(measured) => Ok(Some(Decoration {
            size: constraints.constrain_int(measured),
            node,
        })),
        None => {
            tracing::debug!(?slot, "decoration not measurable yet, skipping layout pass");
            Err(Pending)
        }
    }
}
