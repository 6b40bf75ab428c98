//! Plain-text table normalization and search.

use std::collections::BTreeSet;

use scraper::ElementRef;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{TableError, TableResult};
use crate::table::raw::RawTable;
use crate::table::resolve::{parse_colspan, CellResolver};

/// One data row as an insertion-ordered label-to-text mapping.
///
/// Inserting a duplicate label overwrites the value but keeps the label's
/// original position, mirroring ordered-map semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, String)>,
}

impl Record {
    fn insert(&mut self, label: String, value: String) {
        match self.entries.iter_mut().find(|(key, _)| *key == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Value for a label, if the record has one.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A fully extracted table: flattened column labels and plain-text records.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedTable {
    name: Option<String>,
    header_labels: Vec<String>,
    records: Vec<Record>,
}

impl NormalizedTable {
    /// Normalize a raw table into plain text.
    ///
    /// Header rows are flattened first, in order, then data rows. Each cell's
    /// resolved text is emitted `colspan` times; for spanning header cells
    /// only the first resolution performs the merge, the repetitions are
    /// positional placeholders carrying the same label. Cells claimed by a
    /// merge in the row above are skipped.
    ///
    /// Without any header rows, records are keyed `col_0`, `col_1`, …
    /// positionally and the label set is the sorted union of those keys
    /// across all rows. Otherwise the first flattened header row is zipped
    /// with each data row up to the row's own length.
    pub fn from_raw(raw: &RawTable<'_>) -> TableResult<Self> {
        let mut resolver = CellResolver::new();
        let mut header_out: Vec<Vec<String>> = Vec::new();
        let mut data_out: Vec<Vec<String>> = Vec::new();

        let rows = raw
            .header_rows()
            .iter()
            .map(|&row| (row, true))
            .chain(raw.data_rows().iter().map(|&row| (row, false)));

        for (row, header_mode) in rows {
            let flattened = flatten_row(row, header_mode, &mut resolver)?;
            if header_mode {
                header_out.push(flattened);
            } else {
                data_out.push(flattened);
            }
        }

        let (header_labels, records) = if header_out.is_empty() {
            synthesize_records(data_out)
        } else {
            let labels = header_out.swap_remove(0);
            let records = data_out
                .into_iter()
                .map(|row| {
                    let mut record = Record::default();
                    for (label, value) in labels.iter().zip(row) {
                        record.insert(label.clone(), value);
                    }
                    record
                })
                .collect();
            (labels, records)
        };

        Ok(Self {
            name: raw.name().map(str::to_owned),
            header_labels,
            records,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Flattened column labels, one per logical column, left to right.
    /// Empty when the source table had no header rows.
    pub fn header_labels(&self) -> &[String] {
        &self.header_labels
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Find records containing `query`.
    ///
    /// With a column, matches only that column's value and fails with
    /// [`TableError::UnknownColumn`] when the column is not among the header
    /// labels. Without one, matches any value in the record.
    pub fn search(&self, query: &str, column: Option<&str>) -> TableResult<Vec<&Record>> {
        match column {
            Some(column) => {
                if !self.header_labels.iter().any(|label| label == column) {
                    return Err(TableError::UnknownColumn {
                        column: column.to_owned(),
                        valid: self.header_labels.clone(),
                    });
                }
                Ok(self
                    .records
                    .iter()
                    .filter(|record| record.get(column) == Some(query))
                    .collect())
            }
            None => Ok(self
                .records
                .iter()
                .filter(|record| record.values().any(|value| value == query))
                .collect()),
        }
    }
}

/// Flatten one row to text, expanding colspan by repetition.
fn flatten_row(
    row: ElementRef<'_>,
    header_mode: bool,
    resolver: &mut CellResolver,
) -> TableResult<Vec<String>> {
    let mut out = Vec::new();
    for cell in row.children().filter_map(ElementRef::wrap) {
        if resolver.is_consumed(cell.id()) {
            continue;
        }
        let colspan = parse_colspan(&cell)?;
        if colspan <= 0 {
            continue;
        }
        let text = resolver.resolve(cell, header_mode)?;
        for _ in 0..colspan {
            out.push(text.clone());
        }
    }
    Ok(out)
}

/// Headerless fallback: positional `col_N` keys per row, label set as the
/// sorted union of keys across all rows.
fn synthesize_records(data_out: Vec<Vec<String>>) -> (Vec<String>, Vec<Record>) {
    let mut labels = BTreeSet::new();
    let mut records = Vec::with_capacity(data_out.len());
    for row in data_out {
        let mut record = Record::default();
        for (index, value) in row.into_iter().enumerate() {
            let label = format!("col_{index}");
            labels.insert(label.clone());
            record.insert(label, value);
        }
        records.push(record);
    }
    (labels.into_iter().collect(), records)
}
