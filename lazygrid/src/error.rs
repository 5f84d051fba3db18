//! Grid error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// Mandatory table data was never configured.
    #[error("table content not configured: missing {0}")]
    Uninitialized(&'static str),

    #[error("row header count {row_headers} does not match cell row count {cell_rows}")]
    RowCountMismatch { row_headers: usize, cell_rows: usize },

    #[error("cell row {row} has {found} entries, expected {expected} (one per column header)")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("viewport must be bounded on both axes, got {width}x{height}")]
    UnboundedViewport { width: f32, height: f32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
