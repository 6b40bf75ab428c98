//! Raw table construction from a `<table>` element.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::error::TableResult;
use crate::table::classify::is_header_row;
use crate::table::resolve::CellResolver;

static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("tr").expect("BUG: hardcoded selector 'tr' is statically valid")
});

/// One `<table>` element's rows, classified but not yet flattened to text.
///
/// Rows are borrowed from the parsed document; a `RawTable` never outlives it.
/// `header_rows` and `data_rows` partition the table's rows in document order.
#[derive(Debug, Clone)]
pub struct RawTable<'a> {
    name: Option<String>,
    header_rows: Vec<ElementRef<'a>>,
    data_rows: Vec<ElementRef<'a>>,
}

impl<'a> RawTable<'a> {
    /// Build a raw table from a `<table>` element.
    ///
    /// A `<caption>` child names the table; otherwise `default_name` is used
    /// unless `prefer_caption` reserves the name for captions only. Rows are
    /// collected from all `<tr>` descendants, falling back to direct `<tr>`
    /// children for tables without a body wrapper.
    ///
    /// The only failure mode is caption text resolution.
    pub fn from_table_element(
        table: ElementRef<'a>,
        default_name: Option<&str>,
        prefer_caption: bool,
    ) -> TableResult<Self> {
        let caption = table
            .children()
            .filter_map(ElementRef::wrap)
            .find(|child| child.value().name() == "caption");

        let name = match caption {
            Some(caption) => Some(CellResolver::new().resolve(caption, false)?),
            None if !prefer_caption => default_name.map(str::to_owned),
            None => None,
        };

        let mut rows: Vec<ElementRef<'a>> = table.select(&TR_SELECTOR).collect();
        if rows.is_empty() {
            rows = table
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|child| child.value().name() == "tr")
                .collect();
        }

        let mut header_rows = Vec::new();
        let mut data_rows = Vec::new();
        for row in rows {
            if is_header_row(row) {
                header_rows.push(row);
            } else {
                data_rows.push(row);
            }
        }

        Ok(Self {
            name,
            header_rows,
            data_rows,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn header_rows(&self) -> &[ElementRef<'a>] {
        &self.header_rows
    }

    pub fn data_rows(&self) -> &[ElementRef<'a>] {
        &self.data_rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    static TABLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("table").expect("BUG: hardcoded selector 'table' is statically valid")
    });

    fn first_table(doc: &Html) -> ElementRef<'_> {
        doc.select(&TABLE_SELECTOR).next().unwrap()
    }

    #[test]
    fn test_rows_partitioned_in_document_order() {
        let doc = Html::parse_fragment(
            "<table>\
                <tr><th>Name</th><th>Age</th></tr>\
                <tr><td>Alice</td><td>30</td></tr>\
                <tr><td>Bob</td><td>25</td></tr>\
            </table>",
        );
        let raw = RawTable::from_table_element(first_table(&doc), None, false).unwrap();
        assert_eq!(raw.header_rows().len(), 1);
        assert_eq!(raw.data_rows().len(), 2);
    }

    #[test]
    fn test_caption_becomes_name() {
        let doc = Html::parse_fragment(
            "<table><caption>Monthly stats</caption><tr><td>1</td></tr></table>",
        );
        let raw =
            RawTable::from_table_element(first_table(&doc), Some("table_0"), true).unwrap();
        assert_eq!(raw.name(), Some("Monthly stats"));
    }

    #[test]
    fn test_default_name_used_without_caption() {
        let doc = Html::parse_fragment("<table><tr><td>1</td></tr></table>");
        let raw =
            RawTable::from_table_element(first_table(&doc), Some("fallback"), false).unwrap();
        assert_eq!(raw.name(), Some("fallback"));
    }

    #[test]
    fn test_prefer_caption_leaves_name_unset() {
        let doc = Html::parse_fragment("<table><tr><td>1</td></tr></table>");
        let raw =
            RawTable::from_table_element(first_table(&doc), Some("table_0"), true).unwrap();
        assert_eq!(raw.name(), None);
    }

    #[test]
    fn test_rows_found_inside_tbody() {
        let doc = Html::parse_fragment(
            "<table><tbody><tr><td>a</td></tr><tr><td>b</td></tr></tbody></table>",
        );
        let raw = RawTable::from_table_element(first_table(&doc), None, false).unwrap();
        assert_eq!(raw.data_rows().len(), 2);
    }
}
