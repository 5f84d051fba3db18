//! lazygrid: a virtualized two-dimensional data-table layout engine.
//!
//! A table has a row of column headers, a column of row headers, a cell
//! matrix and optional decorations above and below. Only the items that
//! intersect the viewport are materialized on each layout pass.
//!
//! # Architecture
//!
//! - `TableContent` holds the data and one render callback per role; the
//!   render output `R` is opaque and belongs to the host.
//! - `ColumnWidths` measures one representative per column, once per content.
//! - `ScrollController` turns drag gestures into per-axis settled offsets and
//!   overscroll, with fling and spring-back animations advanced by `tick`.
//! - `layout_grid` computes the visible window and places items.
//!
//! `DataTable` ties the four together. The host supplies a [`Measurer`] and
//! draws the `GridFrame` it gets back.

// Core primitives
pub mod primitives;
pub mod constraints;
pub mod error;
pub mod config;

// Table data
pub mod index;
pub mod content;
pub mod measure;

// Scroll physics and gestures
pub mod spring;
pub mod decay;
pub mod velocity;
pub mod animation;
pub mod scroll;
pub mod gesture;

// Layout
pub mod window;
pub mod layout;
pub mod table;

// Re-export core types
pub use primitives::{IntPoint, IntSize, Point, Size, round_half_up};
pub use constraints::LayoutConstraints;
pub use error::{GridError, Result};
pub use config::GridConfig;
pub use index::{IndexSpace, ItemSlot};
pub use content::{ContentId, Representative, TableBuilder, TableContent};
pub use measure::{ColumnWidths, Measurer};
pub use animation::Animatable;
pub use scroll::{AxisPhase, AxisScroll};
pub use gesture::{Axis, DragEvent, ScrollController, ScrollSnapshot};
pub use window::VisibleWindow;
pub use layout::{GridFrame, PlacedItem, layout_grid};
pub use table::DataTable;
