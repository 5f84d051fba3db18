//! Content provider: the logical table data and its render callbacks.
//!
//! `TableContent` owns the column headers (`T`), row headers (`K`), the cell
//! matrix (`S`), optional decorations, and one render callback per role. A
//! callback turns a value into the host's opaque render output `R`; the
//! engine never looks inside `R`, it only hands it back to the host to
//! measure and place.
//!
//! Content is immutable once built. New data means a new `TableContent`
//! (with a new [`ContentId`]), which is what invalidates cached column
//! widths.

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{GridError, Result};
use crate::index::{IndexSpace, ItemSlot};

/// Render callback for a value of type `V`.
pub type Renderer<V, R> = Box<dyn Fn(&V) -> R>;

/// Render callback for a decoration region.
pub type DecorationRenderer<R> = Box<dyn Fn() -> R>;

/// Counter for content identities.
static CONTENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of one built `TableContent`. Used as the column-width cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(u64);

impl ContentId {
    fn next() -> Self {
        Self(CONTENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

// =========================================================================
// TableContent
// =========================================================================

pub struct TableContent<T, K, S, R> {
    id: ContentId,
    column_headers: Vec<T>,
    row_headers: Vec<K>,
    cells: Vec<Vec<S>>,
    column_header_renderer: Renderer<T, R>,
    row_header_renderer: Renderer<K, R>,
    cell_renderer: Renderer<S, R>,
    top_content: Option<DecorationRenderer<R>>,
    bottom_content: Option<DecorationRenderer<R>>,
}

impl<T, K, S, R> fmt::Debug for TableContent<T, K, S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableContent")
            .field("id", &self.id)
            .field("rows", &self.row_count())
            .field("columns", &self.column_count())
            .field("top_content", &self.top_content.is_some())
            .field("bottom_content", &self.bottom_content.is_some())
            .finish()
    }
}

impl<T, K, S, R> TableContent<T, K, S, R> {
    pub fn builder() -> TableBuilder<T, K, S, R> {
        TableBuilder::new()
    }

    pub fn id(&self) -> ContentId {
        self.id
    }

    /// Number of data rows (row headers).
    pub fn row_count(&self) -> usize {
        self.row_headers.len()
    }

    /// Number of grid columns (column headers), row-header column included.
    pub fn column_count(&self) -> usize {
        self.column_headers.len()
    }

    pub fn index_space(&self) -> IndexSpace {
        IndexSpace::new(self.row_count(), self.column_count())
    }

    pub fn has_top_content(&self) -> bool {
        self.top_content.is_some()
    }

    pub fn has_bottom_content(&self) -> bool {
        self.bottom_content.is_some()
    }

    pub fn column_headers(&self) -> &[T] {
        &self.column_headers
    }

    pub fn row_headers(&self) -> &[K] {
        &self.row_headers
    }

    pub fn cells(&self) -> &[Vec<S>] {
        &self.cells
    }

    /// Render the item at a linear index.
    ///
    /// Returns `None` for an absent decoration or an index that does not
    /// address anything in the current shape (e.g. a stale index after the
    /// data shrank).
    pub fn item(&self, index: usize) -> Option<R> {
        self.render_slot(self.index_space().slot(index)?)
    }

    /// Render the item in a slot, if it exists.
    pub fn render_slot(&self, slot: ItemSlot) -> Option<R> {
        match slot {
            ItemSlot::TopContent => self.top_content.as_ref().map(|render| render()),
            ItemSlot::BottomContent => self.bottom_content.as_ref().map(|render| render()),
            ItemSlot::ColumnHeader { col } => self
                .column_headers
                .get(col)
                .map(|value| (self.column_header_renderer)(value)),
            ItemSlot::RowHeader { row } => self
                .row_headers
                .get(row)
                .map(|value| (self.row_header_renderer)(value)),
            ItemSlot::Cell { row, col } => self
                .cells
                .get(row)
                .and_then(|cells| cells.get(col))
                .map(|value| (self.cell_renderer)(value)),
        }
    }

    /// Render the representative chosen for a column.
    pub fn render_representative(&self, representative: &Representative<'_, T, K, S>) -> R {
        match representative {
            Representative::ColumnHeader(value) => (self.column_header_renderer)(value),
            Representative::RowHeader(value) => (self.row_header_renderer)(value),
            Representative::Cell(value) => (self.cell_renderer)(value),
        }
    }
}

// =========================================================================
// Representative content per column
// =========================================================================

/// The value picked to stand in for a column when measuring its width.
///
/// Every column has a header, so a column without rows (or without row
/// headers) is always represented by its header.
#[derive(Debug)]
pub enum Representative<'a, T, K, S> {
    ColumnHeader(&'a T),
    RowHeader(&'a K),
    Cell(&'a S),
}

/// Length of a value's string representation, in chars.
fn display_len<V: Display>(value: &V) -> usize {
    value.to_string().chars().count()
}

impl<T: Display, K: Display, S: Display, R> TableContent<T, K, S, R> {
    /// Pick, for each column, the content with the longest string form.
    ///
    /// Column 0 compares row headers, column `c > 0` compares matrix column
    /// `c - 1`; ties keep the first value in scan order. The column header
    /// wins whenever it is at least as long as the best candidate.
    pub fn longest_content_per_column(&self) -> Vec<Representative<'_, T, K, S>> {
        self.column_headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let candidate = if col == 0 {
                    longest(self.row_headers.iter(), Representative::RowHeader)
                } else {
                    longest(
                        self.cells.iter().filter_map(|row| row.get(col - 1)),
                        Representative::Cell,
                    )
                };
                match candidate {
                    Some((len, candidate)) if len > display_len(header) => candidate,
                    _ => Representative::ColumnHeader(header),
                }
            })
            .collect()
    }
}

/// Longest value by display length, first one on ties.
fn longest<'a, V, T, K, S>(
    values: impl Iterator<Item = &'a V>,
    wrap: impl Fn(&'a V) -> Representative<'a, T, K, S>,
) -> Option<(usize, Representative<'a, T, K, S>)>
where
    V: Display + 'a,
{
    let mut best: Option<(usize, &'a V)> = None;
    for value in values {
        let len = display_len(value);
        match best {
            Some((best_len, _)) if len <= best_len => {}
            _ => best = Some((len, value)),
        }
    }
    best.map(|(len, value)| (len, wrap(value)))
}

// =========================================================================
// TableBuilder
// =========================================================================

/// Collects headers, cells and decorations, then validates them in `build()`.
///
/// ```
/// use lazygrid::TableBuilder;
///
/// let content = TableBuilder::new()
///     .column_headers(vec!["", "price"], |h: &&str| h.to_string())
///     .row_headers(vec!["apple", "pear"], |h: &&str| h.to_string())
///     .cells(vec![vec![1, 3], vec![2, 4]], |c: &i32| c.to_string())
///     .top_content(|| "Fruit".to_string())
///     .build()
///     .unwrap();
/// assert_eq!(content.row_count(), 2);
/// assert_eq!(content.column_count(), 2);
/// ```
pub struct TableBuilder<T, K, S, R> {
    column_headers: Option<(Vec<T>, Renderer<T, R>)>,
    row_headers: Option<(Vec<K>, Renderer<K, R>)>,
    cells: Option<(Vec<Vec<S>>, Renderer<S, R>)>,
    top_content: Option<DecorationRenderer<R>>,
    bottom_content: Option<DecorationRenderer<R>>,
}

impl<T, K, S, R> Default for TableBuilder<T, K, S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K, S, R> TableBuilder<T, K, S, R> {
    pub fn new() -> Self {
        Self {
            column_headers: None,
            row_headers: None,
            cells: None,
            top_content: None,
            bottom_content: None,
        }
    }

    pub fn column_headers(mut self, values: Vec<T>, renderer: impl Fn(&T) -> R + 'static) -> Self {
        self.column_headers = Some((values, Box::new(renderer)));
        self
    }

    pub fn row_headers(mut self, values: Vec<K>, renderer: impl Fn(&K) -> R + 'static) -> Self {
        self.row_headers = Some((values, Box::new(renderer)));
        self
    }

    pub fn cells(mut self, matrix: Vec<Vec<S>>, renderer: impl Fn(&S) -> R + 'static) -> Self {
        self.cells = Some((matrix, Box::new(renderer)));
        self
    }

    /// Decoration above the table. A second call replaces the first.
    pub fn top_content(mut self, renderer: impl Fn() -> R + 'static) -> Self {
        self.top_content = Some(Box::new(renderer));
        self
    }

    /// Decoration below the table. A second call replaces the first.
    pub fn bottom_content(mut self, renderer: impl Fn() -> R + 'static) -> Self {
        self.bottom_content = Some(Box::new(renderer));
        self
    }

    /// Validate and freeze the content.
    pub fn build(self) -> Result<TableContent<T, K, S, R>> {
        let (column_headers, column_header_renderer) = self
            .column_headers
            .ok_or(GridError::Uninitialized("column headers"))?;
        let (row_headers, row_header_renderer) = self
            .row_headers
            .ok_or(GridError::Uninitialized("row headers"))?;
        let (cells, cell_renderer) = self.cells.ok_or(GridError::Uninitialized("cells"))?;

        if cells.len() != row_headers.len() {
            return Err(GridError::RowCountMismatch {
                row_headers: row_headers.len(),
                cell_rows: cells.len(),
            });
        }
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != column_headers.len())
        {
            return Err(GridError::RowLengthMismatch {
                row,
                expected: column_headers.len(),
                found,
            });
        }

        let content = TableContent {
            id: ContentId::next(),
            column_headers,
            row_headers,
            cells,
            column_header_renderer,
            row_header_renderer,
            cell_renderer,
            top_content: self.top_content,
            bottom_content: self.bottom_content,
        };
        tracing::debug!(
            id = content.id.raw(),
            rows = content.row_count(),
            columns = content.column_count(),
            "built table content"
        );
        Ok(content)
    }
}
