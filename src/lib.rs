//! Extract tabular data from HTML documents.
//!
//! Given a parsed document, `tablescrape` locates every `<table>` element,
//! classifies rows as header or data, resolves column-spanning header cells
//! into merged `level1/level2` column labels, and produces named-column
//! records that can be searched or serialized.
//!
//! ```
//! use tablescrape::TableExtractor;
//!
//! let html = "<table>\
//!     <tr><th>Name</th><th>Age</th></tr>\
//!     <tr><td>Alice</td><td>30</td></tr>\
//! </table>";
//!
//! let extractor = TableExtractor::from_html(html, None);
//! let tables = extractor.normalized_tables();
//! let (_, table) = &tables[0];
//! assert_eq!(table.records()[0].get("Name"), Some("Alice"));
//! ```

pub mod error;
pub mod extractor;
pub mod table;

pub use error::{TableError, TableResult};
pub use extractor::TableExtractor;
pub use table::{is_header_row, CellResolver, NormalizedTable, RawTable, Record};
