use crate::core::{Clock, Document, SystemClock};
use crate::error::{DATABASE_KIND, HelpdeskError, Result};
use tracing::{debug, info};

/// Raw read/write access to the persisted document
///
/// Implementations only move bytes; seeding and statistics belong to
/// [`Store`]. A backend that cannot reach its storage reports
/// [`HelpdeskError::StorageUnavailable`].
#[cfg_attr(test, mockall::automock)]
pub trait DocumentBackend {
    /// Read the persisted document, or `None` if nothing has been written yet
    fn read(&self) -> Result<Option<Document>>;

    /// Replace the persisted document
    fn write(&self, document: &Document) -> Result<()>;
}

/// What a fresh store is seeded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Seed admins and default settings only
    #[default]
    Empty,
    /// Also seed the demo users and tickets
    SampleData,
}

impl SeedMode {
    fn document(self, now: chrono::DateTime<chrono::Utc>) -> Result<Document> {
        match self {
            Self::Empty => Ok(Document::new(now)),
            Self::SampleData => Document::with_sample_data(now),
        }
    }
}

/// The persistence boundary holding the single aggregate document
///
/// `load` hands out a private copy of the document; `save` recomputes the
/// statistics and writes the whole document back. There is no partial-update
/// path.
pub struct Store<B, C = SystemClock> {
    backend: B,
    clock: C,
    seed: SeedMode,
}

impl<B: DocumentBackend, C: Clock> Store<B, C> {
    pub fn new(backend: B, clock: C) -> Self {
        Self {
            backend,
            clock,
            seed: SeedMode::default(),
        }
    }

    /// Choose what a missing document is seeded with
    #[must_use]
    pub const fn with_seed(mut self, seed: SeedMode) -> Self {
        self.seed = seed;
        self
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Load the persisted document, seeding one if none exists
    ///
    /// Seeding only happens when the backend has nothing stored; an existing
    /// document is never replaced.
    pub fn load(&self) -> Result<Document> {
        if let Some(document) = self.backend.read()? {
            debug!(tickets = document.tickets.len(), "Loaded helpdesk document");
            return Ok(document);
        }

        let mut document = self.seed.document(self.now())?;
        self.save(&mut document)?;
        info!(seed = ?self.seed, "Seeded new helpdesk document");
        Ok(document)
    }

    /// Recompute statistics and persist the whole document
    pub fn save(&self, document: &mut Document) -> Result<()> {
        document.refresh_statistics(self.now());
        self.backend.write(document)?;
        debug!(
            tickets = document.tickets.len(),
            users = document.users.len(),
            "Saved helpdesk document"
        );
        Ok(())
    }

    /// Write a freshly seeded document
    ///
    /// Refuses to overwrite an existing document unless `force` is set.
    pub fn initialize(&self, force: bool) -> Result<Document> {
        if !force && self.backend.read()?.is_some() {
            return Err(HelpdeskError::AlreadyExists {
                kind: DATABASE_KIND.to_string(),
                name: "document".to_string(),
            });
        }

        let mut document = self.seed.document(self.now())?;
        self.save(&mut document)?;
        info!(seed = ?self.seed, force, "Initialized helpdesk document");
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, TicketBuilder};
    use crate::storage::MemoryStorage;
    use chrono::{Duration, TimeZone, Utc};

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_load_seeds_once() {
        let clock = clock();
        let store = Store::new(MemoryStorage::new(), &clock);

        let first = store.load().expect("Failed to load");
        assert_eq!(store.backend().write_count(), 1);

        clock.advance(Duration::hours(1));
        let second = store.load().expect("Failed to load");
        assert_eq!(store.backend().write_count(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_never_reseeds_existing_document() {
        let clock = clock();
        let mut existing = Document::new(clock.now());
        existing.settings.system_name = "Library Desk".to_string();
        let store = Store::new(MemoryStorage::with_document(existing), &clock)
            .with_seed(SeedMode::SampleData);

        let loaded = store.load().expect("Failed to load");
        assert_eq!(loaded.settings.system_name, "Library Desk");
        assert!(loaded.tickets.is_empty());
        assert_eq!(store.backend().write_count(), 0);
    }

    #[test]
    fn test_sample_seed() {
        let store = Store::new(MemoryStorage::new(), clock()).with_seed(SeedMode::SampleData);
        let document = store.load().expect("Failed to load");
        assert_eq!(document.tickets.len(), 5);
    }

    #[test]
    fn test_save_recomputes_statistics() {
        let clock = clock();
        let store = Store::new(MemoryStorage::new(), &clock);
        let mut document = store.load().expect("Failed to load");

        document.tickets.push(TicketBuilder::new().number(1001).build());
        clock.advance(Duration::minutes(5));
        store.save(&mut document).expect("Failed to save");

        let reloaded = store.load().expect("Failed to load");
        assert_eq!(reloaded.statistics.total_tickets, 1);
        assert_eq!(reloaded.statistics.pending_tickets, 1);
        assert_eq!(reloaded.statistics.last_updated, clock.now());
    }

    #[test]
    fn test_initialize_refuses_overwrite() {
        let store = Store::new(MemoryStorage::new(), clock());
        store.initialize(false).expect("Failed to initialize");

        let err = store.initialize(false).unwrap_err();
        assert!(matches!(err, HelpdeskError::AlreadyExists { .. }));

        store.initialize(true).expect("Forced initialize should succeed");
    }

    #[test]
    fn test_unavailable_backend_is_reported() {
        let mut backend = MockDocumentBackend::new();
        backend
            .expect_read()
            .returning(|| Err(HelpdeskError::storage("/data/helpdesk.json", "disk gone")));
        backend.expect_write().never();

        let store = Store::new(backend, clock());
        let err = store.load().unwrap_err();
        assert!(matches!(err, HelpdeskError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_seed_write_failure_is_reported() {
        let mut backend = MockDocumentBackend::new();
        backend.expect_read().times(1).returning(|| Ok(None));
        backend
            .expect_write()
            .times(1)
            .returning(|_| Err(HelpdeskError::storage("/data/helpdesk.json", "read-only")));

        let store = Store::new(backend, clock());
        assert!(store.load().is_err());
    }
}
