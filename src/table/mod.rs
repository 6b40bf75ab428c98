//! Table extraction core: row classification, colspan-aware text resolution,
//! and normalization into named-column records.

pub mod classify;
pub mod normalized;
pub mod raw;
pub mod resolve;

pub use classify::is_header_row;
pub use normalized::{NormalizedTable, Record};
pub use raw::RawTable;
pub use resolve::{CellResolver, EMPTY_CELL_TEXT};
