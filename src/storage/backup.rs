use crate::core::{DOCUMENT_VERSION, Document};
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// A retained snapshot of the whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: Document,
}

impl Backup {
    #[must_use]
    pub fn new(data: Document, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            version: DOCUMENT_VERSION.to_string(),
            data,
        }
    }

    /// Whether `key` names this backup, by id or by timestamp
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        if self.id.to_string() == key {
            return true;
        }
        key.parse::<DateTime<Utc>>()
            .is_ok_and(|timestamp| timestamp == self.timestamp)
    }
}

/// Bounded ring of document snapshots stored as a JSON array
///
/// Holds at most `retention` snapshots; pushing past that drops the oldest.
#[derive(Debug, Clone)]
pub struct BackupStorage {
    path: PathBuf,
    retention: usize,
}

impl BackupStorage {
    pub fn new(path: impl Into<PathBuf>, retention: usize) -> Self {
        Self {
            path: path.into(),
            retention: retention.max(1),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Retained snapshots, oldest first
    pub fn list(&self) -> Result<Vec<Backup>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| HelpdeskError::ParseError(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(HelpdeskError::storage(&self.path, e)),
        }
    }

    /// Append a snapshot, evicting the oldest beyond the retention limit
    pub fn push(&self, backup: Backup) -> Result<()> {
        let mut backups = self.list()?;
        backups.push(backup);
        let excess = backups.len().saturating_sub(self.retention);
        if excess > 0 {
            backups.drain(..excess);
            debug!(evicted = excess, "Evicted old backups");
        }
        self.write_all(&backups)?;
        info!(retained = backups.len(), "Stored backup");
        Ok(())
    }

    /// Find a snapshot by id or timestamp
    pub fn find(&self, key: &str) -> Result<Option<Backup>> {
        Ok(self.list()?.into_iter().find(|b| b.matches(key)))
    }

    fn write_all(&self, backups: &[Backup]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| HelpdeskError::storage(parent, e))?;
            }
        }
        let content = serde_json::to_string_pretty(backups)?;
        fs::write(&self.path, content).map_err(|e| HelpdeskError::storage(&self.path, e))
    }
}

/// Write `document` to `path` as pretty JSON
pub fn export_document(document: &Document, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    fs::write(path, content).map_err(|e| HelpdeskError::storage(path, e))
}

/// Read a document previously written by [`export_document`]
pub fn import_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path).map_err(|e| HelpdeskError::storage(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| HelpdeskError::ParseError(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn test_ring_keeps_latest_five() {
        let temp_dir = TempDir::new().unwrap();
        let storage = BackupStorage::new(temp_dir.path().join("backups.json"), 5);

        for i in 0..7 {
            storage
                .push(Backup::new(Document::new(at(i)), at(i)))
                .expect("Failed to push backup");
        }

        let backups = storage.list().expect("Failed to list");
        assert_eq!(backups.len(), 5);
        assert_eq!(backups[0].timestamp, at(2));
        assert_eq!(backups[4].timestamp, at(6));
    }

    #[test]
    fn test_find_by_timestamp_and_id() {
        let temp_dir = TempDir::new().unwrap();
        let storage = BackupStorage::new(temp_dir.path().join("backups.json"), 5);
        let backup = Backup::new(Document::new(at(0)), at(0));
        let id = backup.id.to_string();
        storage.push(backup).unwrap();

        assert!(storage.find(&at(0).to_rfc3339()).unwrap().is_some());
        assert!(storage.find(&id).unwrap().is_some());
        assert!(storage.find(&at(1).to_rfc3339()).unwrap().is_none());
        assert!(storage.find("garbage").unwrap().is_none());
    }

    #[test]
    fn test_export_import_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        let document = Document::with_sample_data(at(0)).unwrap();

        export_document(&document, &path).unwrap();
        assert_eq!(import_document(&path).unwrap(), document);
    }
}
