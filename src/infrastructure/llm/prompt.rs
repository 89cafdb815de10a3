/// Builds the single-call OCR-and-format prompt.
///
/// With an empty column list the model detects the header row itself;
/// otherwise extracted values are mapped onto exactly the given columns.
/// Free-text instructions, when present, are folded into either variant.
pub fn build_extraction_prompt(headers: &[String], instructions: Option<&str>) -> String {
    let extra = instructions
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| format!("\nAdditional instructions: {text}\n"))
        .unwrap_or_default();

    if headers.is_empty() {
        format!(
            r#"Perform optical character recognition on this handwritten spreadsheet image and convert it to tabular data.

Your task:
1. Read all text content in the image
2. Identify the table structure with its rows and columns
3. Use the header row detected in the image as the column names
4. Score how legible each cell is
{extra}
Return ONLY a JSON object in this exact format, using the real headers found in the image:
{{"headers": ["header1", "header2"], "rows": [{{"header1": "value", "header2": "value"}}], "confidence": [{{"header1": 0.95, "header2": 0.72}}]}}

Rules:
- Every cell value must be a string
- Confidence scores are between 0.0 and 1.0: 0.8 and above for clear text, 0.5 to 0.7 for smudged or ambiguous text, below 0.5 for barely legible text
- Do not add explanations or markdown outside the JSON object"#
        )
    } else {
        let columns = headers.join(", ");
        format!(
            r#"Perform optical character recognition on this handwritten spreadsheet image and convert it to tabular data.

Your task:
1. Read all text content in the image
2. Identify the table structure with its rows and columns
3. Map the extracted values onto the required columns, in order
4. Score how legible each cell is

Required columns: {columns}
{extra}
Return ONLY a JSON object in this exact format, keyed by the required columns:
{{"headers": ["header1", "header2"], "rows": [{{"header1": "value", "header2": "value"}}], "confidence": [{{"header1": 0.95, "header2": 0.72}}]}}

Rules:
- Every required column must be present in every row
- Every cell value must be a string
- Confidence scores are between 0.0 and 1.0: 0.8 and above for clear text, 0.5 to 0.7 for smudged or ambiguous text, below 0.5 for barely legible text
- Do not add explanations or markdown outside the JSON object"#
        )
    }
}
