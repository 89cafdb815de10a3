use async_trait::async_trait;

use crate::domain::Table;

/// Persistent CSV store accumulating accepted rows across sessions.
///
/// The header line is written once, on first save, and never rewritten.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Appends the table's rows, creating the store and its header line on
    /// first save. Returns the number of rows written.
    async fn append(&self, table: &Table) -> Result<usize, TableStoreError>;

    /// Raw CSV bytes of the store.
    async fn export(&self) -> Result<Vec<u8>, TableStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TableStoreError {
    #[error("store not writable: {0}")]
    StoreUnwritable(String),
    #[error("incoming headers {incoming:?} do not match stored headers {expected:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        incoming: Vec<String>,
    },
    #[error("store has no saved rows")]
    StoreMissing,
}
