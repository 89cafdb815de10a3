use kuching::application::services::annotate;
use kuching::domain::{Cell, Row, Table};

fn table_with_confidences(confidences: &[f64]) -> Table {
    Table::new(
        confidences
            .iter()
            .enumerate()
            .map(|(index, _)| format!("col{index}"))
            .collect(),
        vec![Row::new(
            confidences
                .iter()
                .map(|confidence| Cell::new("value".to_string(), *confidence))
                .collect(),
        )],
    )
}

#[test]
fn given_threshold_when_annotating_then_flags_cells_strictly_below() {
    let table = annotate(table_with_confidences(&[0.2, 0.69, 0.71, 1.0]), 0.7);

    let flags: Vec<bool> = table.rows[0]
        .cells
        .iter()
        .map(|cell| cell.low_confidence)
        .collect();

    assert_eq!(flags, vec![true, true, false, false]);
}

#[test]
fn given_cell_exactly_at_threshold_when_annotating_then_not_flagged() {
    let table = annotate(table_with_confidences(&[0.7]), 0.7);

    assert!(!table.rows[0].cells[0].low_confidence);
}

#[test]
fn given_annotated_table_when_annotated_again_then_result_is_identical() {
    let once = annotate(table_with_confidences(&[0.1, 0.5, 0.9]), 0.6);
    let twice = annotate(once.clone(), 0.6);

    assert_eq!(once, twice);
}

#[test]
fn given_annotation_when_applied_then_values_and_scores_are_untouched() {
    let original = table_with_confidences(&[0.3, 0.8]);
    let annotated = annotate(original.clone(), 0.5);

    for (before, after) in original.rows[0].cells.iter().zip(&annotated.rows[0].cells) {
        assert_eq!(before.value, after.value);
        assert_eq!(before.confidence, after.confidence);
    }
}

#[test]
fn given_zero_threshold_when_annotating_then_nothing_is_flagged() {
    let table = annotate(table_with_confidences(&[0.0, 0.5]), 0.0);

    assert!(table.rows[0].cells.iter().all(|cell| !cell.low_confidence));
}
