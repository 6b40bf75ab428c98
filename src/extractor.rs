//! Document-level table extraction.
//!
//! Thin orchestration over the table core: parse a document, find every
//! `<table>` element, build a raw table per element, and normalize each one.
//! One malformed table never aborts extraction of a well-formed document; it
//! is logged and dropped while the remaining tables go through.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::table::{NormalizedTable, RawTable};

static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
});

static CANONICAL_LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"link[rel="canonical"]"#)
        .expect("BUG: hardcoded canonical link selector is statically valid")
});

/// Extracts every table from one HTML document.
///
/// Tables are keyed `table_0`, `table_1`, … in document order unless a
/// `<caption>` names them.
pub struct TableExtractor {
    document: Html,
    url: Option<String>,
}

impl TableExtractor {
    /// Parse a document from an HTML string.
    ///
    /// When no `url` is supplied, a `<link rel="canonical">` in the document
    /// is adopted as the page URL.
    pub fn from_html(html: &str, url: Option<&str>) -> Self {
        let document = Html::parse_document(html);
        let url = url.map(str::to_owned).or_else(|| {
            document
                .select(&CANONICAL_LINK_SELECTOR)
                .next()
                .and_then(|link| link.value().attr("href"))
                .map(str::to_owned)
        });
        Self { document, url }
    }

    /// The page URL, supplied by the caller or taken from the canonical link.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Classified tables with cells still borrowed from the document tree.
    ///
    /// Tables whose caption cannot be resolved are logged and skipped.
    pub fn raw_tables(&self) -> Vec<(String, RawTable<'_>)> {
        let mut tables = Vec::new();
        for (index, element) in self.document.select(&TABLE_SELECTOR).enumerate() {
            let default_name = format!("table_{index}");
            match RawTable::from_table_element(element, Some(&default_name), true) {
                Ok(raw) => {
                    let key = raw.name().map_or_else(|| default_name.clone(), str::to_owned);
                    tables.push((key, raw));
                }
                Err(error) => {
                    warn!(table = %default_name, %error, "skipping table with unresolvable caption");
                }
            }
        }
        tables
    }

    /// Normalized plain-text tables, in document order.
    ///
    /// Per-table normalization failures are logged with the table's key and
    /// omitted from the result; extraction continues with the rest.
    pub fn normalized_tables(&self) -> Vec<(String, NormalizedTable)> {
        self.raw_tables()
            .into_iter()
            .filter_map(|(key, raw)| match NormalizedTable::from_raw(&raw) {
                Ok(table) => {
                    debug!(table = %key, records = table.records().len(), "normalized table");
                    Some((key, table))
                }
                Err(error) => {
                    warn!(table = %key, %error, "skipping malformed table");
                    None
                }
            })
            .collect()
    }
}
