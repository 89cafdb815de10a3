use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Mutex as WriteLock;

use crate::application::ports::{TableStore, TableStoreError};
use crate::domain::Table;

/// One write lock per store path, shared across every adapter instance in
/// the process. Independent stores append concurrently; writers on the same
/// path take turns.
static STORE_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<WriteLock<()>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn lock_for(path: &Path) -> Arc<WriteLock<()>> {
    let key = lock_key(path);
    let mut locks = STORE_LOCKS
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

/// Canonicalizes the parent directory so different spellings of one store
/// path share a lock. The file itself may not exist yet.
fn lock_key(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => parent
            .canonicalize()
            .map(|parent| parent.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

/// File-backed [`TableStore`].
///
/// The header line is written once, when the file is created (a zero-length
/// file counts as uninitialized), and saves whose headers differ from the
/// stored line are rejected outright. Rows are encoded into a buffer first
/// and appended with a single write, so a failure mid-save never leaves a
/// partial row behind.
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TableStore for CsvFileStore {
    #[tracing::instrument(
        skip(self, table),
        fields(path = %self.path.display(), rows = table.rows.len())
    )]
    async fn append(&self, table: &Table) -> Result<usize, TableStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(unwritable)?;
            }
        }

        let header_line = encode_record(&table.headers)?;
        let row_lines = encode_rows(table)?;
        let incoming = table.headers.clone();
        let rows_written = table.rows.len();
        let path = self.path.clone();

        let lock = lock_for(&self.path);
        let _guard = lock.lock().await;

        tokio::task::spawn_blocking(move || append_locked(&path, &incoming, header_line, row_lines))
            .await
            .map_err(|e| TableStoreError::StoreUnwritable(format!("task join error: {e}")))??;

        tracing::info!(rows = rows_written, "Rows appended to store");
        Ok(rows_written)
    }

    async fn export(&self) -> Result<Vec<u8>, TableStoreError> {
        let lock = lock_for(&self.path);
        let _guard = lock.lock().await;

        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Err(TableStoreError::StoreMissing),
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(TableStoreError::StoreMissing),
            Err(e) => Err(unwritable(e)),
        }
    }
}

fn append_locked(
    path: &Path,
    incoming: &[String],
    header_line: Vec<u8>,
    row_lines: Vec<u8>,
) -> Result<(), TableStoreError> {
    let include_header = match stored_headers(path)? {
        None => true,
        Some(stored) if stored == incoming => false,
        Some(stored) => {
            return Err(TableStoreError::HeaderMismatch {
                expected: stored,
                incoming: incoming.to_vec(),
            });
        }
    };

    let mut buffer = row_lines;
    if include_header {
        let mut with_header = header_line;
        with_header.extend_from_slice(&buffer);
        buffer = with_header;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(unwritable)?;
    file.write_all(&buffer).map_err(unwritable)?;
    file.sync_all().map_err(unwritable)?;

    Ok(())
}

/// Header names from the store's first line, CSV-unquoted. `None` when the
/// store does not exist yet or is zero-length.
fn stored_headers(path: &Path) -> Result<Option<Vec<String>>, TableStoreError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return Ok(None),
    };
    if metadata.len() == 0 {
        return Ok(None);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| TableStoreError::StoreUnwritable(e.to_string()))?;

    let mut record = csv::StringRecord::new();
    let read = reader
        .read_record(&mut record)
        .map_err(|e| TableStoreError::StoreUnwritable(e.to_string()))?;
    if !read {
        return Ok(None);
    }

    Ok(Some(record.iter().map(str::to_string).collect()))
}

fn encode_record(fields: &[String]) -> Result<Vec<u8>, TableStoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| TableStoreError::StoreUnwritable(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| TableStoreError::StoreUnwritable(e.to_string()))
}

fn encode_rows(table: &Table) -> Result<Vec<u8>, TableStoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in &table.rows {
        writer
            .write_record(row.values())
            .map_err(|e| TableStoreError::StoreUnwritable(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| TableStoreError::StoreUnwritable(e.to_string()))
}

fn unwritable(e: std::io::Error) -> TableStoreError {
    TableStoreError::StoreUnwritable(e.to_string())
}
