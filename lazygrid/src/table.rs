//! The data-table component: content, cached widths, scroll state and config
//! bundled behind one handle the host drives.
//!
//! ```
//! use lazygrid::{DataTable, GridConfig, IntSize, LayoutConstraints, TableBuilder};
//!
//! let content = TableBuilder::new()
//!     .column_headers(vec!["", "a", "b"], |h: &&str| h.to_string())
//!     .row_headers(vec!["r0", "r1"], |h: &&str| h.to_string())
//!     .cells(vec![vec![1, 2, 3], vec![4, 5, 6]], |c: &i32| c.to_string())
//!     .build()
//!     .unwrap();
//! let mut table = DataTable::new(GridConfig::default()).unwrap().with_content(content);
//!
//! // 8px per character, 20px tall.
//! let mut host = |node: &String, c: LayoutConstraints| {
//!     Some(c.constrain_int(IntSize::new(node.len() as i32 * 8, 20)))
//! };
//! let frame = table.layout(LayoutConstraints::loose(400.0, 600.0), &mut host).unwrap();
//! assert!(!frame.items.is_empty());
//! ```

use std::fmt::Display;
use std::time::Duration;

use crate::config::GridConfig;
use crate::constraints::LayoutConstraints;
use crate::content::TableContent;
use crate::error::{GridError, Result};
use crate::gesture::{DragEvent, ScrollController, ScrollSnapshot};
use crate::layout::{GridFrame, layout_grid};
use crate::measure::{ColumnWidths, Measurer};

pub struct DataTable<T, K, S, R> {
    config: GridConfig,
    content: Option<TableContent<T, K, S, R>>,
    widths: ColumnWidths,
    scroll: ScrollController,
}

impl<T, K, S, R> std::fmt::Debug for DataTable<T, K, S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("config", &self.config)
            .field("content", &self.content)
            .field("widths", &self.widths)
            .field("scroll", &self.scroll)
            .finish()
    }
}

impl<T, K, S, R> DataTable<T, K, S, R> {
    /// A table with no content yet. Layout fails until content is set.
    ///
    /// Fails with [`GridError::InvalidConfig`] when `config` does not pass
    /// [`GridConfig::validate`].
    pub fn new(config: GridConfig) -> Result<Self> {
        let scroll = ScrollController::new(&config)?;
        Ok(Self {
            config,
            content: None,
            widths: ColumnWidths::new(),
            scroll,
        })
    }

    pub fn with_content(mut self, content: TableContent<T, K, S, R>) -> Self {
        self.set_content(content);
        self
    }

    /// Replace the content wholesale. Column widths are measured again on
    /// the next layout pass; scroll offsets are kept and re-clamped then.
    pub fn set_content(&mut self, content: TableContent<T, K, S, R>) {
        tracing::info!(
            content = content.id().raw(),
            rows = content.row_count(),
            columns = content.column_count(),
            "table content replaced"
        );
        self.widths.invalidate();
        self.content = Some(content);
    }

    pub fn content(&self) -> Result<&TableContent<T, K, S, R>> {
        self.content
            .as_ref()
            .ok_or(GridError::Uninitialized("table content"))
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    #[inline]
    pub fn column_widths(&self) -> &ColumnWidths {
        &self.widths
    }

    #[inline]
    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn handle_drag(&mut self, event: DragEvent) {
        self.scroll.handle_drag(event);
    }

    /// Advance fling and spring-back animations. Returns `true` while any is
    /// running; the host should lay out again after every tick.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.scroll.tick(dt)
    }

    pub fn scroll_snapshot(&self) -> ScrollSnapshot {
        self.scroll.snapshot()
    }

    pub fn restore_scroll(&mut self, snapshot: ScrollSnapshot) {
        tracing::debug!(?snapshot, "restoring scroll offsets");
        self.scroll.restore(snapshot);
    }
}

impl<T, K, S, R> DataTable<T, K, S, R>
where
    T: Display,
    K: Display,
    S: Display,
{
    /// Lay out the visible part of the table for a viewport.
    pub fn layout<M>(&mut self, viewport: LayoutConstraints, host: &mut M) -> Result<GridFrame<R>>
    where
        M: Measurer<R> + ?Sized,
    {
        let content = self
            .content
            .as_ref()
            .ok_or(GridError::Uninitialized("table content"))?;
        layout_grid(
            content,
            &mut self.widths,
            &mut self.scroll,
            &self.config,
            viewport,
            host,
        )
    }
}
