use kuching::application::services::{resolve, ParsedTable, OMITTED_CONFIDENCE};
use kuching::domain::{Cell, HeaderSpec, Row};

fn parsed(headers: &[&str], rows: &[&[&str]]) -> ParsedTable {
    ParsedTable {
        headers: headers.iter().map(|header| header.to_string()).collect(),
        rows: rows
            .iter()
            .map(|values| {
                Row::new(
                    values
                        .iter()
                        .map(|value| Cell::new(value.to_string(), 0.9))
                        .collect(),
                )
            })
            .collect(),
    }
}

#[test]
fn given_user_headers_when_model_returns_extra_columns_then_truncates_positionally() {
    let spec = HeaderSpec::from_list(vec!["name".to_string(), "email".to_string()]);
    let table = resolve(
        &spec,
        parsed(
            &["col1", "col2", "col3"],
            &[&["alice", "alice@example.com", "extra"]],
        ),
    )
    .unwrap();

    assert_eq!(table.headers, vec!["name", "email"]);
    assert_eq!(table.rows[0].cells.len(), 2);
    assert_eq!(table.rows[0].cells[0].value, "alice");
    assert_eq!(table.rows[0].cells[1].value, "alice@example.com");
}

#[test]
fn given_user_headers_when_model_returns_fewer_columns_then_pads_with_empty_cells() {
    let spec = HeaderSpec::from_list(vec![
        "name".to_string(),
        "email".to_string(),
        "phone".to_string(),
    ]);
    let table = resolve(&spec, parsed(&["col1"], &[&["alice"]])).unwrap();

    assert_eq!(table.headers.len(), 3);
    assert_eq!(table.rows[0].cells.len(), 3);
    assert_eq!(table.rows[0].cells[1].value, "");
    assert_eq!(table.rows[0].cells[1].confidence, OMITTED_CONFIDENCE);
}

#[test]
fn given_auto_detect_when_headers_unique_then_used_verbatim() {
    let table = resolve(
        &HeaderSpec::AutoDetect,
        parsed(&["Name", "Age"], &[&["Alice", "30"]]),
    )
    .unwrap();

    assert_eq!(table.headers, vec!["Name", "Age"]);
}

#[test]
fn given_auto_detect_when_duplicate_headers_then_suffixes_deterministically() {
    let table = resolve(
        &HeaderSpec::AutoDetect,
        parsed(&["a", "a", "b", "a"], &[&["1", "2", "3", "4"]]),
    )
    .unwrap();

    assert_eq!(table.headers, vec!["a", "a_2", "b", "a_3"]);
    assert_eq!(table.rows[0].cells.len(), 4);
}

#[test]
fn given_duplicate_user_headers_then_same_suffix_rule_applies() {
    let spec = HeaderSpec::from_list(vec!["x".to_string(), "x".to_string()]);
    let table = resolve(&spec, parsed(&["a", "b"], &[&["1", "2"]])).unwrap();

    assert_eq!(table.headers, vec!["x", "x_2"]);
}

#[test]
fn given_no_headers_from_either_source_then_resolution_fails() {
    let result = resolve(
        &HeaderSpec::AutoDetect,
        ParsedTable {
            headers: Vec::new(),
            rows: Vec::new(),
        },
    );

    assert!(result.is_err());
}

#[test]
fn given_blank_user_columns_then_spec_falls_back_to_auto_detect() {
    let spec = HeaderSpec::from_list(vec!["  ".to_string(), String::new()]);

    assert_eq!(spec, HeaderSpec::AutoDetect);
}

#[test]
fn given_any_resolution_then_every_row_has_exactly_header_count_cells() {
    let shapes: Vec<(HeaderSpec, ParsedTable)> = vec![
        (
            HeaderSpec::from_list(vec!["a".to_string(), "b".to_string()]),
            parsed(&["x", "y", "z"], &[&["1", "2", "3"], &["4"]]),
        ),
        (
            HeaderSpec::AutoDetect,
            parsed(&["x", "y", "z"], &[&["1"], &[], &["1", "2", "3", "4"]]),
        ),
    ];

    for (spec, table) in shapes {
        let resolved = resolve(&spec, table).unwrap();
        let width = resolved.column_count();
        for row in &resolved.rows {
            assert_eq!(row.cells.len(), width);
        }
    }
}
