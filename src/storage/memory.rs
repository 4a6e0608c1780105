use super::DocumentBackend;
use crate::core::Document;
use crate::error::Result;
use std::cell::{Cell, RefCell};

/// In-process backend holding the document in memory
///
/// Used by tests and benchmarks. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: RefCell<Option<Document>>,
    writes: Cell<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already-persisted document
    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self {
            document: RefCell::new(Some(document)),
            writes: Cell::new(0),
        }
    }

    /// Number of successful writes so far
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Copy of the currently persisted document
    #[must_use]
    pub fn snapshot(&self) -> Option<Document> {
        self.document.borrow().clone()
    }
}

impl DocumentBackend for MemoryStorage {
    fn read(&self) -> Result<Option<Document>> {
        Ok(self.document.borrow().clone())
    }

    fn write(&self, document: &Document) -> Result<()> {
        *self.document.borrow_mut() = Some(document.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
