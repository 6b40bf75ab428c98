//! Header-row classification.

use scraper::ElementRef;

/// Check whether a `<tr>` element is a header row.
///
/// A row is a header row iff it has at least one child element and every
/// child element is a `<th>`. Rows mixing `<th>` and `<td>` are data rows,
/// as are rows with no cells at all.
pub fn is_header_row(row: ElementRef<'_>) -> bool {
    let mut cells = row.children().filter_map(ElementRef::wrap).peekable();
    if cells.peek().is_none() {
        return false;
    }
    cells.all(|cell| cell.value().name() == "th")
}
