//! Persistence for the helpdesk document
//!
//! The [`Store`] is the only writer of persisted state. It sits on top of a
//! [`DocumentBackend`], which knows how to read and write the raw document:
//! [`FileStorage`] for JSON on disk and [`MemoryStorage`] for tests.

mod backup;
mod file;
mod memory;
mod repository;

pub use backup::{Backup, BackupStorage, export_document, import_document};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use repository::{DocumentBackend, SeedMode, Store};

#[cfg(test)]
pub use repository::MockDocumentBackend;
