//! Test utilities for campus-helpdesk
//!
//! Shared fixtures so unit tests across modules build drafts, clocks and
//! file-backed stores the same way.

#![cfg(test)]

use crate::core::{
    Clock, ManualClock, Mobile, Status, Ticket, TicketBuilder, TicketDraft, TicketDraftBuilder,
    Urgency,
};
use crate::service::TicketService;
use crate::storage::{BackupStorage, FileStorage, Store};
use chrono::{TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

/// A clock fixed at 2024-01-15 12:00 UTC
pub fn fixed_clock() -> ManualClock {
    ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
            .single()
            .expect("Invalid fixture timestamp"),
    )
}

/// A valid laptop ticket draft from `mobile`
pub fn draft(mobile: &str) -> TicketDraft {
    TicketDraftBuilder::new()
        .name("Rajesh Kumar")
        .mobile(Mobile::parse(mobile).expect("Invalid fixture mobile"))
        .department("cse")
        .category("laptop")
        .description("Laptop not booting")
        .urgency(Urgency::High)
        .build()
        .expect("Failed to build draft")
}

/// Create a stored ticket fixture with the given number and status
pub fn create_test_ticket(number: u64, status: Status) -> Ticket {
    TicketBuilder::new()
        .number(number)
        .status(status)
        .created_at(fixed_clock().now())
        .build()
}

/// Test fixture for a file-backed helpdesk in a temporary directory
pub struct TestProject {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
    pub backups: BackupStorage,
    pub clock: ManualClock,
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().join("helpdesk.json");
        let backups = BackupStorage::new(temp_dir.path().join("backups.json"), 5);

        Self {
            temp_dir,
            data_path,
            backups,
            clock: fixed_clock(),
        }
    }

    /// A service over this project's data file
    pub fn service(&self) -> TicketService<FileStorage, &ManualClock> {
        TicketService::new(Store::new(FileStorage::new(self.data_path.clone()), &self.clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_persists_between_services() {
        let project = TestProject::new();
        let ticket = project.service().create(draft("9876543210")).unwrap();

        let reopened = project.service();
        assert_eq!(reopened.get_ticket(&ticket.id).unwrap(), Some(ticket));
        assert!(project.data_path.exists());
    }

    #[test]
    fn test_create_test_ticket() {
        let ticket = create_test_ticket(1042, Status::Resolved);
        assert_eq!(ticket.id.as_str(), "TICKET-1042");
        assert!(ticket.resolved_at.is_some());
    }

    #[test]
    fn test_project_backups_live_beside_data() {
        let project = TestProject::new();
        let service = project.service();
        service.create(draft("9876543210")).unwrap();

        service.create_backup(&project.backups).unwrap();
        assert_eq!(project.backups.list().unwrap().len(), 1);
        assert_eq!(project.backups.path().parent(), project.data_path.parent());
    }
}
