//! Cell text resolution with colspan-aware header merging.
//!
//! A header cell spanning N columns visually owns the leading cells of the
//! row beneath it. The resolver walks that relationship: each merge step
//! claims the first unclaimed cell of the next row and joins both levels'
//! text with `/`, producing one compound label per spanned column.
//!
//! Merge progress lives in explicit resolver state (a claimed-cell set plus a
//! remaining-span map keyed by [`NodeId`]) rather than in the DOM, so the
//! document tree is never mutated and resolution over a fresh resolver is
//! repeatable. Repeated calls on the same multi-span cell walk the spanned
//! columns one at a time.

use std::collections::{HashMap, HashSet};

use ego_tree::NodeId;
use scraper::ElementRef;

use crate::error::{TableError, TableResult};

/// Placeholder emitted for cells with no text content.
pub const EMPTY_CELL_TEXT: &str = "n/a";

/// Resolves cell text, tracking colspan-merge progress across calls.
///
/// One resolver instance covers one table; sharing it across tables would let
/// a runaway merge claim cells in an unrelated row.
#[derive(Debug, Default)]
pub struct CellResolver {
    /// Cells currently walking a multi-column merge.
    merging: HashSet<NodeId>,
    /// Spans decremented below their `colspan` attribute value.
    remaining_span: HashMap<NodeId, i64>,
    /// Cells claimed by a spanning header in the row above.
    consumed: HashSet<NodeId>,
}

impl CellResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a cell has been claimed by a header merge and must be skipped
    /// when iterating its row.
    pub fn is_consumed(&self, id: NodeId) -> bool {
        self.consumed.contains(&id)
    }

    /// Resolve the logical text of one cell.
    ///
    /// `header` selects merge behavior for this cell; recursive resolution of
    /// claimed cells derives it from their own tag. Fails with
    /// [`TableError::MalformedTable`] when the `colspan` attribute is
    /// non-numeric, or when a merge finds no row below or no remaining cell
    /// in it.
    pub fn resolve(&mut self, cell: ElementRef<'_>, header: bool) -> TableResult<String> {
        let id = cell.id();
        let span = match self.remaining_span.get(&id) {
            Some(&span) => span,
            None => parse_colspan(&cell)?,
        };
        let text = base_text(cell);

        if header && (span > 1 || self.merging.contains(&id)) {
            self.merging.insert(id);
            self.remaining_span.insert(id, span - 1);
            let below = self.claim_cell_below(cell)?;
            let below_header = below.value().name() == "th";
            let below_text = self.resolve(below, below_header)?;
            return Ok(format!("{text}/{below_text}"));
        }

        Ok(text)
    }

    /// Claim the first unclaimed cell of the row following `cell`'s row.
    fn claim_cell_below<'a>(&mut self, cell: ElementRef<'a>) -> TableResult<ElementRef<'a>> {
        let tag = cell.value().name().to_owned();
        let row = cell
            .parent()
            .and_then(ElementRef::wrap)
            .ok_or_else(|| {
                TableError::malformed(format!("spanning <{tag}> cell has no parent row"))
            })?;
        let next_row = row
            .next_siblings()
            .find_map(ElementRef::wrap)
            .ok_or_else(|| {
                TableError::malformed(format!(
                    "spanning <{tag}> cell '{}' has no row below to merge with",
                    base_text(cell)
                ))
            })?;
        let below = next_row
            .children()
            .filter_map(ElementRef::wrap)
            .find(|candidate| !self.consumed.contains(&candidate.id()))
            .ok_or_else(|| {
                TableError::malformed(format!(
                    "row below spanning <{tag}> cell '{}' has no remaining cells",
                    base_text(cell)
                ))
            })?;
        self.consumed.insert(below.id());
        Ok(below)
    }
}

/// Parse a cell's `colspan` attribute, defaulting to 1 when absent.
pub(crate) fn parse_colspan(cell: &ElementRef<'_>) -> TableResult<i64> {
    match cell.value().attr("colspan") {
        None => Ok(1),
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            TableError::malformed(format!(
                "non-numeric colspan {raw:?} on <{}> cell",
                cell.value().name()
            ))
        }),
    }
}

/// Concatenate all text fragments under a cell.
///
/// Fragments equal to the literal two-character sequence `\n` are dropped;
/// the rest are joined with single spaces and trimmed. Empty cells yield
/// [`EMPTY_CELL_TEXT`].
fn base_text(cell: ElementRef<'_>) -> String {
    let joined = cell
        .text()
        .filter(|fragment| *fragment != "\\n")
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        EMPTY_CELL_TEXT.to_owned()
    } else {
        trimmed.to_owned()
    }
}
