use super::DocumentBackend;
use crate::core::Document;
use crate::error::{HelpdeskError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON file backend
///
/// The document is written to a temporary sibling file and renamed into
/// place, so a crash mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DocumentBackend for FileStorage {
    fn read(&self) -> Result<Option<Document>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No helpdesk document on disk");
                return Ok(None);
            },
            Err(e) => return Err(HelpdeskError::storage(&self.path, e)),
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            HelpdeskError::ParseError(format!("{}: {e}", self.path.display()))
        })
    }

    fn write(&self, document: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| HelpdeskError::storage(parent, e))?;
            }
        }

        let content = serde_json::to_string_pretty(document)?;
        let temp = self.temp_path();
        fs::write(&temp, content).map_err(|e| HelpdeskError::storage(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| HelpdeskError::storage(&self.path, e))?;
        Ok(())
    }
}
