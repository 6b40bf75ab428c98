use tablescrape::{TableError, TableExtractor};

#[test]
fn test_simple_document_end_to_end() {
    let html = r#"
        <html>
        <head><link rel="canonical" href="https://example.com/people"></head>
        <body>
            <table>
                <tr><th>Name</th><th>Age</th></tr>
                <tr><td>Alice</td><td>30</td></tr>
                <tr><td>Bob</td><td>25</td></tr>
            </table>
        </body>
        </html>
    "#;

    let extractor = TableExtractor::from_html(html, None);
    assert_eq!(extractor.url(), Some("https://example.com/people"));

    let tables = extractor.normalized_tables();
    assert_eq!(tables.len(), 1);
    let (key, table) = &tables[0];
    assert_eq!(key, "table_0");
    assert_eq!(table.header_labels(), ["Name", "Age"]);
    assert_eq!(table.records().len(), 2);
    assert_eq!(table.records()[0].get("Name"), Some("Alice"));
    assert_eq!(table.records()[1].get("Age"), Some("25"));
}

#[test]
fn test_malformed_table_is_skipped_not_fatal() {
    // Three tables; the middle one has a spanning header with nothing below
    // it to merge with. Extraction must keep tables one and three.
    let html = r#"
        <table>
            <tr><th>A</th></tr>
            <tr><td>1</td></tr>
        </table>
        <table>
            <tr><td>data</td></tr>
            <tr><th colspan="2">dangling</th></tr>
        </table>
        <table>
            <tr><th>B</th></tr>
            <tr><td>2</td></tr>
        </table>
    "#;

    let extractor = TableExtractor::from_html(html, None);
    let tables = extractor.normalized_tables();
    let keys: Vec<_> = tables.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, ["table_0", "table_2"]);
    assert_eq!(tables[0].1.records()[0].get("A"), Some("1"));
    assert_eq!(tables[1].1.records()[0].get("B"), Some("2"));
}

#[test]
fn test_non_numeric_colspan_drops_only_that_table() {
    let html = r#"
        <table><tr><th>Ok</th></tr><tr><td>yes</td></tr></table>
        <table><tr><td colspan="wat">broken</td></tr></table>
    "#;

    let extractor = TableExtractor::from_html(html, None);
    let tables = extractor.normalized_tables();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].0, "table_0");
}

#[test]
fn test_caption_named_table_with_merged_headers() {
    let html = r#"
        <table>
            <caption>Roster</caption>
            <tr><th colspan="2">Name</th><th>Age</th></tr>
            <tr><th>First</th><th>Last</th></tr>
            <tr><td>Ada</td><td>Lovelace</td><td>36</td></tr>
        </table>
    "#;

    let extractor = TableExtractor::from_html(html, None);
    let tables = extractor.normalized_tables();
    let (key, table) = &tables[0];
    assert_eq!(key, "Roster");
    assert_eq!(table.name(), Some("Roster"));
    assert_eq!(table.header_labels(), ["Name/First", "Name/First", "Age"]);
    assert_eq!(table.records()[0].get("Age"), Some("36"));
}

#[test]
fn test_headerless_ragged_rows_synthesize_sorted_label_union() {
    let html = r#"
        <table>
            <tr><td>a</td></tr>
            <tr><td>b</td><td>c</td><td>d</td></tr>
            <tr><td>e</td><td>f</td></tr>
        </table>
    "#;

    let extractor = TableExtractor::from_html(html, None);
    let tables = extractor.normalized_tables();
    let table = &tables[0].1;
    assert_eq!(table.header_labels(), ["col_0", "col_1", "col_2"]);
    assert_eq!(table.records()[0].len(), 1);
    assert_eq!(table.records()[1].len(), 3);
    assert_eq!(table.records()[2].get("col_1"), Some("f"));
}

#[test]
fn test_search_across_extracted_table() {
    let html = r#"
        <table>
            <tr><th>Name</th><th>City</th></tr>
            <tr><td>Alice</td><td>Paris</td></tr>
            <tr><td>Bob</td><td>Alice</td></tr>
        </table>
    "#;

    let extractor = TableExtractor::from_html(html, None);
    let tables = extractor.normalized_tables();
    let table = &tables[0].1;

    // Column-scoped search matches only that column.
    let by_name = table.search("Alice", Some("Name")).unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].get("City"), Some("Paris"));

    // Unscoped search matches any value.
    let anywhere = table.search("Alice", None).unwrap();
    assert_eq!(anywhere.len(), 2);

    let error = table.search("Alice", Some("Country")).unwrap_err();
    assert!(matches!(error, TableError::UnknownColumn { .. }));
}

#[test]
fn test_empty_cells_become_placeholders() {
    let html = r#"
        <table>
            <tr><th>Name</th><th>Note</th></tr>
            <tr><td>Alice</td><td></td></tr>
        </table>
    "#;

    let extractor = TableExtractor::from_html(html, None);
    let tables = extractor.normalized_tables();
    assert_eq!(tables[0].1.records()[0].get("Note"), Some("n/a"));
}

#[test]
fn test_normalized_table_serializes_to_json() {
    let html = r#"
        <table>
            <caption>People</caption>
            <tr><th>Name</th><th>Age</th></tr>
            <tr><td>Alice</td><td>30</td></tr>
        </table>
    "#;

    let extractor = TableExtractor::from_html(html, None);
    let tables = extractor.normalized_tables();
    let value = serde_json::to_value(&tables[0].1).unwrap();
    assert_eq!(value["name"], "People");
    assert_eq!(value["header_labels"][1], "Age");
    assert_eq!(value["records"][0]["Name"], "Alice");
}
