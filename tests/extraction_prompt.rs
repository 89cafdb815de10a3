use kuching::infrastructure::llm::build_extraction_prompt;

#[test]
fn given_no_columns_then_prompt_asks_for_header_detection() {
    let prompt = build_extraction_prompt(&[], None);

    assert!(prompt.contains("header row detected in the image"));
    assert!(!prompt.contains("Required columns"));
}

#[test]
fn given_columns_then_prompt_lists_them_in_order() {
    let columns = vec!["name".to_string(), "email".to_string()];
    let prompt = build_extraction_prompt(&columns, None);

    assert!(prompt.contains("Required columns: name, email"));
}

#[test]
fn given_instructions_then_prompt_includes_them() {
    let prompt = build_extraction_prompt(&[], Some("dates are in DD/MM/YYYY"));

    assert!(prompt.contains("Additional instructions: dates are in DD/MM/YYYY"));
}

#[test]
fn given_blank_instructions_then_prompt_omits_the_section() {
    let prompt = build_extraction_prompt(&[], Some("   "));

    assert!(!prompt.contains("Additional instructions"));
}

#[test]
fn given_any_variant_then_prompt_demands_json_only_output() {
    for prompt in [
        build_extraction_prompt(&[], None),
        build_extraction_prompt(&["a".to_string()], None),
    ] {
        assert!(prompt.contains("Return ONLY a JSON object"));
        assert!(prompt.contains("\"confidence\""));
    }
}
