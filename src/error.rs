//! Error types for table extraction.
//!
//! Malformed-table errors are scoped to a single table and are caught at the
//! per-table boundary by the extractor; unknown-column errors surface directly
//! to the caller of [`search`](crate::table::NormalizedTable::search).

use thiserror::Error;

/// Result type alias for table extraction operations.
pub type TableResult<T> = Result<T, TableError>;

/// Error types for table extraction operations.
#[derive(Debug, Error)]
pub enum TableError {
    /// Colspan bookkeeping or a row/cell lookup failed while merging a
    /// spanning header cell.
    #[error("malformed table: {detail}")]
    MalformedTable { detail: String },

    /// A search asked for a column that is not among the header labels.
    #[error("'{column}' is not a valid header. Valid headers are {valid:?}")]
    UnknownColumn {
        column: String,
        valid: Vec<String>,
    },
}

impl TableError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedTable {
            detail: detail.into(),
        }
    }
}
