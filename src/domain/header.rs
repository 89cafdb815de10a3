/// Where the authoritative column set for an extraction comes from.
///
/// Selected once per request; the resolver is the only stage that branches
/// on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSpec {
    /// Caller-supplied columns; model output is realigned to these.
    UserSpecified(Vec<String>),
    /// Columns are whatever the model detects in the image.
    AutoDetect,
}

impl HeaderSpec {
    /// Whitespace-only entries are dropped; an empty list means auto-detect.
    pub fn from_list(columns: Vec<String>) -> Self {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|column| column.trim().to_string())
            .filter(|column| !column.is_empty())
            .collect();

        if columns.is_empty() {
            Self::AutoDetect
        } else {
            Self::UserSpecified(columns)
        }
    }
}
