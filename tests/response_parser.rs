use kuching::application::services::{parse_table_response, OMITTED_CONFIDENCE};

const BARE_TABLE: &str =
    r#"{"headers": ["Name", "Age"], "rows": [{"Name": "Alice", "Age": "30"}]}"#;

#[test]
fn given_json_embedded_in_prose_when_parsing_then_matches_bare_json() {
    let wrapped = format!(
        "Sure! Here is the extracted table you asked for:\n{BARE_TABLE}\nLet me know if you need anything else."
    );

    let bare = parse_table_response(BARE_TABLE).unwrap();
    let prose = parse_table_response(&wrapped).unwrap();

    assert_eq!(bare, prose);
}

#[test]
fn given_fenced_json_when_parsing_then_matches_bare_json() {
    let fenced = format!("Here you go:\n```json\n{BARE_TABLE}\n```\nDone.");

    let bare = parse_table_response(BARE_TABLE).unwrap();
    let parsed = parse_table_response(&fenced).unwrap();

    assert_eq!(bare, parsed);
}

#[test]
fn given_rows_without_confidence_when_parsing_then_cells_get_omitted_default() {
    let parsed = parse_table_response(BARE_TABLE).unwrap();

    assert_eq!(parsed.headers, vec!["Name", "Age"]);
    assert_eq!(parsed.rows.len(), 1);
    let cells = &parsed.rows[0].cells;
    assert_eq!(cells[0].value, "Alice");
    assert_eq!(cells[0].confidence, OMITTED_CONFIDENCE);
    assert_eq!(cells[1].value, "30");
    assert_eq!(cells[1].confidence, OMITTED_CONFIDENCE);
}

#[test]
fn given_data_and_confidence_shape_when_parsing_then_scores_attach_by_header() {
    let raw = r#"{
        "data": [{"Name": "Alice", "Age": "30"}, {"Name": "Bob", "Age": "41"}],
        "confidence": [{"Name": 0.95, "Age": 0.6}, {"Name": 0.88, "Age": 0.91}]
    }"#;

    let parsed = parse_table_response(raw).unwrap();

    assert_eq!(parsed.headers, vec!["Name", "Age"]);
    assert_eq!(parsed.rows[0].cells[0].confidence, 0.95);
    assert_eq!(parsed.rows[0].cells[1].confidence, 0.6);
    assert_eq!(parsed.rows[1].cells[0].value, "Bob");
    assert_eq!(parsed.rows[1].cells[1].confidence, 0.91);
}

#[test]
fn given_positional_rows_when_parsing_then_aligns_by_index_and_pads_short_rows() {
    let raw = r#"{
        "headers": ["a", "b"],
        "rows": [["1", "2"], ["3"]],
        "confidence": [[0.9, 0.8], [0.7]]
    }"#;

    let parsed = parse_table_response(raw).unwrap();

    assert_eq!(parsed.rows[0].cells[0].value, "1");
    assert_eq!(parsed.rows[0].cells[1].confidence, 0.8);
    assert_eq!(parsed.rows[1].cells[0].value, "3");
    assert_eq!(parsed.rows[1].cells[0].confidence, 0.7);
    assert_eq!(parsed.rows[1].cells[1].value, "");
    assert_eq!(parsed.rows[1].cells[1].confidence, OMITTED_CONFIDENCE);
}

#[test]
fn given_keyed_rows_without_header_list_when_parsing_then_derives_headers_in_order() {
    let raw = r#"{"rows": [{"first": "x", "second": "y"}, {"second": "z", "third": "w"}]}"#;

    let parsed = parse_table_response(raw).unwrap();

    assert_eq!(parsed.headers, vec!["first", "second", "third"]);
    assert_eq!(parsed.rows[1].cells[0].value, "");
    assert_eq!(parsed.rows[1].cells[1].value, "z");
    assert_eq!(parsed.rows[1].cells[2].value, "w");
}

#[test]
fn given_cell_objects_with_inline_scores_when_parsing_then_inline_wins() {
    let raw = r#"{
        "headers": ["a"],
        "rows": [[{"value": "x", "confidence": 0.4}]],
        "confidence": [[0.99]]
    }"#;

    let parsed = parse_table_response(raw).unwrap();

    assert_eq!(parsed.rows[0].cells[0].value, "x");
    assert_eq!(parsed.rows[0].cells[0].confidence, 0.4);
}

#[test]
fn given_out_of_range_scores_when_parsing_then_clamps_to_unit_interval() {
    let raw = r#"{
        "headers": ["a", "b", "c"],
        "rows": [["1", "2", "3"]],
        "confidence": [[1.5, -2.0, "0.66"]]
    }"#;

    let parsed = parse_table_response(raw).unwrap();

    assert_eq!(parsed.rows[0].cells[0].confidence, 1.0);
    assert_eq!(parsed.rows[0].cells[1].confidence, 0.0);
    assert_eq!(parsed.rows[0].cells[2].confidence, 0.66);
}

#[test]
fn given_non_string_scalars_when_parsing_then_renders_strings() {
    let raw = r#"{"headers": ["a", "b", "c"], "rows": [[1.5, null, true]]}"#;

    let parsed = parse_table_response(raw).unwrap();

    let cells = &parsed.rows[0].cells;
    assert_eq!(cells[0].value, "1.5");
    assert_eq!(cells[1].value, "");
    assert_eq!(cells[2].value, "true");
}

#[test]
fn given_braces_inside_string_values_when_parsing_then_span_scan_survives() {
    let raw = r#"noise {"headers": ["a"], "rows": [["curly } brace { soup"]]} noise"#;

    let parsed = parse_table_response(raw).unwrap();

    assert_eq!(parsed.rows[0].cells[0].value, "curly } brace { soup");
}

#[test]
fn given_plain_prose_when_parsing_then_fails() {
    let result = parse_table_response("I could not read the image, sorry.");

    assert!(result.is_err());
}

#[test]
fn given_object_without_rows_or_data_when_parsing_then_fails() {
    let result = parse_table_response(r#"{"columns": ["a"], "values": []}"#);

    assert!(result.is_err());
}

#[test]
fn given_empty_object_when_parsing_then_fails() {
    let result = parse_table_response("{}");

    assert!(result.is_err());
}

#[test]
fn given_headers_with_empty_rows_when_parsing_then_yields_empty_table() {
    let parsed = parse_table_response(r#"{"headers": ["a", "b"], "rows": []}"#).unwrap();

    assert_eq!(parsed.headers, vec!["a", "b"]);
    assert!(parsed.rows.is_empty());
}
