//! Linear item index space.
//!
//! Every renderable item (column headers, row headers, cells and the two
//! decorations) is addressed by one integer. The table part is laid out as a
//! grid of `row_count + 1` rows by `column_count` columns:
//!
//! ```text
//!            col 0          col 1 ..
//! row 0      column hdr 0   column hdr 1 ..       (indices 0..column_count)
//! row r>0    row hdr r-1    cell (r-1, 0) ..      (index r * column_count + c)
//!
//! table_item_count      -> top content
//! table_item_count + 1  -> bottom content
//! ```
//!
//! Grid column 0 is the row-header column, so grid column `c > 0` renders
//! matrix column `c - 1`. Indices are always derived from
//! `(grid_row, grid_col, column_count)`; nothing stores them.

use serde::{Deserialize, Serialize};

/// What a linear index refers to. Row/column numbers are data coordinates:
/// `RowHeader { row }` is the header of data row `row`, `Cell { row, col }`
/// is `cells[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemSlot {
    ColumnHeader { col: usize },
    RowHeader { row: usize },
    Cell { row: usize, col: usize },
    TopContent,
    BottomContent,
}

/// Index arithmetic for a table of a given shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexSpace {
    row_count: usize,
    column_count: usize,
}

impl IndexSpace {
    pub const fn new(row_count: usize, column_count: usize) -> Self {
        Self {
            row_count,
            column_count,
        }
    }

    #[inline]
    pub const fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub const fn column_count(&self) -> usize {
        self.column_count
    }

    /// Number of grid rows, header row included.
    #[inline]
    pub const fn grid_rows(&self) -> usize {
        self.row_count + 1
    }

    /// Items in the table part (headers + cells).
    #[inline]
    pub const fn table_item_count(&self) -> usize {
        (self.row_count + 1) * self.column_count
    }

    /// Total addressable items, including the two decoration slots.
    #[inline]
    pub const fn item_count(&self) -> usize {
        self.table_item_count() + 2
    }

    #[inline]
    pub const fn top_content_index(&self) -> usize {
        self.table_item_count()
    }

    #[inline]
    pub const fn bottom_content_index(&self) -> usize {
        self.table_item_count() + 1
    }

    /// Linear index of a grid position, or `None` when it lies outside the table.
    pub fn grid_index(&self, grid_row: usize, grid_col: usize) -> Option<usize> {
        if grid_row < self.grid_rows() && grid_col < self.column_count {
            Some(grid_row * self.column_count + grid_col)
        } else {
            None
        }
    }

    /// Inverse of [`grid_index`](Self::grid_index). Decoration indices have no
    /// grid position.
    pub fn grid_position(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.table_item_count() {
            return None;
        }
        Some((index / self.column_count, index % self.column_count))
    }

    /// Resolve a linear index to the item it addresses.
    pub fn slot(&self, index: usize) -> Option<ItemSlot> {
        if index == self.top_content_index() {
            return Some(ItemSlot::TopContent);
        }
        if index == self.bottom_content_index() {
            return Some(ItemSlot::BottomContent);
        }
        let (grid_row, grid_col) = self.grid_position(index)?;
        Some(match (grid_row, grid_col) {
            (0, col) => ItemSlot::ColumnHeader { col },
            (row, 0) => ItemSlot::RowHeader { row: row - 1 },
            (row, col) => ItemSlot::Cell {
                row: row - 1,
                col: col - 1,
            },
        })
    }

    /// Linear index of a slot; `None` when the slot does not exist in this shape.
    pub fn index_of(&self, slot: ItemSlot) -> Option<usize> {
        match slot {
            ItemSlot::TopContent => Some(self.top_content_index()),
            ItemSlot::BottomContent => Some(self.bottom_content_index()),
            ItemSlot::ColumnHeader { col } => self.grid_index(0, col),
            ItemSlot::RowHeader { row } if row < self.row_count => self.grid_index(row + 1, 0),
            ItemSlot::Cell { row, col } if row < self.row_count => {
                self.grid_index(row + 1, col.checked_add(1)?)
            }
            ItemSlot::RowHeader { .. } | ItemSlot::Cell { .. } => None,
        }
    }
}
