use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use crate::errors::StoreResult;

/// A JSON object keyed by username, as it sits on disk.
pub type Table<V> = BTreeMap<String, V>;

/// Reads the table at `path`.
///
/// Never fails: a missing, empty or malformed file (including valid JSON of the
/// wrong shape) yields an empty table. Anything other than a missing file is
/// logged as a warning, since it means existing data is being ignored.
pub fn load<V: DeserializeOwned>(path: &Path) -> Table<V> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No data file at {}, starting empty", path.display());
            return Table::new();
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}, starting empty", path.display(), e);
            return Table::new();
        }
    };

    if content.trim().is_empty() {
        return Table::new();
    }

    match serde_json::from_str(&content) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("Ignoring malformed data in {}: {}", path.display(), e);
            Table::new()
        }
    }
}

/// Overwrites `path` with the whole table as 4-space indented JSON.
///
/// The data goes to a temporary file in the same directory first and is renamed
/// over the target, so readers see either the old or the new contents.
pub fn save<V: Serialize>(table: &Table<V>, path: &Path) -> StoreResult<()> {
    let bytes = encode(table)?;
    write_atomically(path, &bytes)
}

fn encode<V: Serialize>(table: &Table<V>) -> StoreResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut bytes, PrettyFormatter::with_indent(b"    "));
    table.serialize(&mut serializer)?;
    Ok(bytes)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    file.as_file().sync_all()?;
    file.persist(path)?;

    tracing::trace!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Key-value view over one JSON file. Every write is persisted before it returns.
#[derive(Debug)]
pub struct JsonTable<V> {
    path: PathBuf,
    rows: Table<V>,
}

impl<V> JsonTable<V>
where
    V: Serialize + DeserializeOwned,
{
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let rows = load(&path);
        Self { path, rows }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.rows.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inserts or replaces `key`. On a failed write the previous value is restored.
    pub async fn put(&mut self, key: impl Into<String>, value: V) -> StoreResult<Option<V>> {
        let key = key.into();
        let previous = self.rows.insert(key.clone(), value);

        if let Err(e) = self.flush().await {
            match previous {
                Some(old) => self.rows.insert(key, old),
                None => self.rows.remove(&key),
            };
            return Err(e);
        }
        Ok(previous)
    }

    pub async fn delete(&mut self, key: &str) -> StoreResult<Option<V>> {
        let Some(removed) = self.rows.remove(key) else {
            return Ok(None);
        };

        if let Err(e) = self.flush().await {
            self.rows.insert(key.to_string(), removed);
            return Err(e);
        }
        Ok(Some(removed))
    }

    /// Encodes on the caller's task; the file write and fsync run on the blocking pool.
    pub async fn flush(&self) -> StoreResult<()> {
        let bytes = encode(&self.rows)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes)).await?
    }
}
