use std::collections::HashMap;

use crate::domain::{Cell, HeaderSpec, Row, Table};

use super::response_parser::{ParsedTable, OMITTED_CONFIDENCE};

#[derive(Debug, thiserror::Error)]
#[error("no headers resolved: neither the request nor the model supplied any columns")]
pub struct NoHeadersResolved;

/// Decides the effective column set and realigns the parsed rows to it.
///
/// User-specified columns win outright: rows keep their positional order,
/// extra model columns are discarded and missing ones padded with empty
/// cells. Auto-detect takes the model's headers verbatim. Either way the
/// resolved headers are deduplicated and every row leaves with exactly one
/// cell per column.
pub fn resolve(spec: &HeaderSpec, parsed: ParsedTable) -> Result<Table, NoHeadersResolved> {
    let headers = match spec {
        HeaderSpec::UserSpecified(columns) => columns.clone(),
        HeaderSpec::AutoDetect => parsed.headers.clone(),
    };

    if headers.is_empty() {
        return Err(NoHeadersResolved);
    }

    let headers = dedup_headers(headers);
    let width = headers.len();
    let rows = parsed
        .rows
        .into_iter()
        .map(|row| normalize_row(row, width))
        .collect();

    Ok(Table::new(headers, rows))
}

fn normalize_row(mut row: Row, width: usize) -> Row {
    row.cells.truncate(width);
    while row.cells.len() < width {
        row.cells.push(Cell::new(String::new(), OMITTED_CONFIDENCE));
    }
    row
}

/// First occurrence keeps its name; later duplicates get `_2`, `_3`, ... in
/// order of appearance.
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    headers
        .into_iter()
        .map(|header| {
            let occurrence = {
                let count = seen.entry(header.clone()).or_insert(0);
                *count += 1;
                *count
            };
            if occurrence == 1 {
                header
            } else {
                format!("{header}_{occurrence}")
            }
        })
        .collect()
}
