//! Admin-side operations: login, settings management and snapshots

use super::TicketService;
use crate::core::{Admin, Clock, Settings};
use crate::error::{HelpdeskError, Result};
use crate::storage::{Backup, BackupStorage, DocumentBackend, export_document, import_document};
use std::path::Path;
use tracing::{info, warn};

impl<B: DocumentBackend, C: Clock> TicketService<B, C> {
    /// Check admin credentials, stamping `last_login` on success
    pub fn admin_login(&self, username: &str, password: &str) -> Result<Option<Admin>> {
        let mut document = self.store.load()?;
        let now = self.store.now();

        let Some(admin) = document
            .admins
            .iter_mut()
            .find(|a| a.credentials_match(username, password))
        else {
            warn!(username, "Rejected admin login");
            return Ok(None);
        };

        admin.last_login = Some(now);
        let admin = admin.clone();
        self.store.save(&mut document)?;
        info!(username, role = %admin.role, "Admin logged in");
        Ok(Some(admin))
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.store.load()?.settings)
    }

    /// Add an issue category; names are stored lower-cased
    pub fn add_category(&self, name: &str) -> Result<String> {
        let name = required("category", name)?.to_lowercase();
        self.edit_settings(|settings| {
            if settings.categories.contains(&name) {
                return Err(HelpdeskError::AlreadyExists {
                    kind: "Category".to_string(),
                    name: name.clone(),
                });
            }
            settings.categories.push(name.clone());
            Ok(())
        })?;
        info!(category = %name, "Category added");
        Ok(name)
    }

    /// Remove a category; existing tickets keep their value
    pub fn remove_category(&self, name: &str) -> Result<bool> {
        let name = name.trim().to_lowercase();
        let removed =
            self.edit_settings(|settings| Ok(remove_value(&mut settings.categories, &name)))?;
        if removed {
            info!(category = %name, "Category removed");
        }
        Ok(removed)
    }

    pub fn add_technician(&self, name: &str) -> Result<String> {
        let name = required("technician", name)?.to_string();
        self.edit_settings(|settings| {
            if settings.technicians.contains(&name) {
                return Err(HelpdeskError::AlreadyExists {
                    kind: "Technician".to_string(),
                    name: name.clone(),
                });
            }
            settings.technicians.push(name.clone());
            Ok(())
        })?;
        info!(technician = %name, "Technician added");
        Ok(name)
    }

    pub fn remove_technician(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        let removed =
            self.edit_settings(|settings| Ok(remove_value(&mut settings.technicians, name)))?;
        if removed {
            info!(technician = %name, "Technician removed");
        }
        Ok(removed)
    }

    /// Update the scalar settings; `None` leaves a value unchanged
    pub fn update_settings(
        &self,
        system_name: Option<&str>,
        auto_close_days: Option<u32>,
    ) -> Result<Settings> {
        let system_name = system_name.map(|n| required("system name", n)).transpose()?;
        let mut updated = Settings::default();
        self.edit_settings(|settings| {
            if let Some(name) = system_name {
                name.clone_into(&mut settings.system_name);
            }
            if let Some(days) = auto_close_days {
                settings.auto_close_days = days;
            }
            updated = settings.clone();
            Ok(())
        })?;
        info!(
            system_name = %updated.system_name,
            auto_close_days = updated.auto_close_days,
            "Settings updated"
        );
        Ok(updated)
    }

    /// Snapshot the current document into the backup ring
    pub fn create_backup(&self, backups: &BackupStorage) -> Result<Backup> {
        let document = self.store.load()?;
        let backup = Backup::new(document, self.store.now());
        backups.push(backup.clone())?;
        info!(id = %backup.id, timestamp = %backup.timestamp, "Backup created");
        Ok(backup)
    }

    /// Replace the current document with a snapshot, if `key` names one
    pub fn restore_backup(&self, backups: &BackupStorage, key: &str) -> Result<bool> {
        let Some(backup) = backups.find(key)? else {
            warn!(key, "No backup matches");
            return Ok(false);
        };
        self.replace_document(backup.data)?;
        info!(id = %backup.id, timestamp = %backup.timestamp, "Backup restored");
        Ok(true)
    }

    /// Write the whole document to `path` as JSON
    pub fn export_document(&self, path: &Path) -> Result<()> {
        export_document(&self.store.load()?, path)?;
        info!(path = %path.display(), "Document exported");
        Ok(())
    }

    /// Replace the whole document with one read from `path`
    pub fn import_document(&self, path: &Path) -> Result<()> {
        let document = import_document(path)?;
        self.replace_document(document)?;
        info!(path = %path.display(), "Document imported");
        Ok(())
    }

    fn edit_settings<T>(&self, edit: impl FnOnce(&mut Settings) -> Result<T>) -> Result<T> {
        let mut document = self.store.load()?;
        let result = edit(&mut document.settings)?;
        self.store.save(&mut document)?;
        Ok(result)
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(HelpdeskError::MissingRequiredField(field.to_string()));
    }
    Ok(value)
}

fn remove_value(values: &mut Vec<String>, value: &str) -> bool {
    let before = values.len();
    values.retain(|v| v != value);
    values.len() != before
}

#[cfg(test)]
mod tests {
    use crate::core::{AdminRole, Clock, ManualClock, Status};
    use crate::error::HelpdeskError;
    use crate::service::TicketService;
    use crate::storage::{MemoryStorage, Store};
    use crate::test_utils::{TestProject, draft, fixed_clock};
    use chrono::Duration;

    fn service(clock: &ManualClock) -> TicketService<MemoryStorage, &ManualClock> {
        TicketService::new(Store::new(MemoryStorage::new(), clock))
    }

    #[test]
    fn test_admin_login() {
        let clock = fixed_clock();
        let service = service(&clock);
        clock.advance(Duration::hours(3));

        let admin = service
            .admin_login("tech", "tech123")
            .unwrap()
            .expect("Login should succeed");
        assert_eq!(admin.role, AdminRole::Technician);
        assert_eq!(admin.last_login, Some(clock.now()));

        let stored = service.document().unwrap();
        let tech = stored.admins.iter().find(|a| a.username == "tech").unwrap();
        assert_eq!(tech.last_login, Some(clock.now()));
    }

    #[test]
    fn test_admin_login_rejects_bad_password() {
        let clock = fixed_clock();
        let service = service(&clock);
        service.document().unwrap();
        let writes = service.store().backend().write_count();

        assert!(service.admin_login("admin", "wrong").unwrap().is_none());
        assert!(service.admin_login("nobody", "admin123").unwrap().is_none());
        assert_eq!(service.store().backend().write_count(), writes);
    }

    #[test]
    fn test_category_management() {
        let clock = fixed_clock();
        let service = service(&clock);

        assert_eq!(service.add_category("  Projector ").unwrap(), "projector");
        assert!(service.settings().unwrap().categories.contains(&"projector".to_string()));

        let err = service.add_category("PROJECTOR").unwrap_err();
        assert!(matches!(err, HelpdeskError::AlreadyExists { .. }));
        let err = service.add_category("   ").unwrap_err();
        assert!(matches!(err, HelpdeskError::MissingRequiredField(_)));

        assert!(service.remove_category("projector").unwrap());
        assert!(!service.remove_category("projector").unwrap());
    }

    #[test]
    fn test_removing_category_keeps_tickets() {
        let clock = fixed_clock();
        let service = service(&clock);
        let ticket = service.create(draft("9876543210")).unwrap();

        assert!(service.remove_category(&ticket.issue_type).unwrap());
        let kept = service.get_ticket(&ticket.id).unwrap().unwrap();
        assert_eq!(kept.issue_type, ticket.issue_type);
    }

    #[test]
    fn test_technician_management() {
        let clock = fixed_clock();
        let service = service(&clock);

        service.add_technician("Priya").unwrap();
        assert!(matches!(
            service.add_technician("Priya").unwrap_err(),
            HelpdeskError::AlreadyExists { .. }
        ));
        assert!(service.remove_technician("Priya").unwrap());
        assert!(!service.remove_technician("Priya").unwrap());
    }

    #[test]
    fn test_update_settings() {
        let clock = fixed_clock();
        let service = service(&clock);

        let settings = service.update_settings(Some("Library Desk"), None).unwrap();
        assert_eq!(settings.system_name, "Library Desk");

        let settings = service.update_settings(None, Some(14)).unwrap();
        assert_eq!(settings.system_name, "Library Desk");
        assert_eq!(settings.auto_close_days, 14);

        assert!(service.update_settings(Some(""), None).is_err());
    }

    #[test]
    fn test_backup_and_restore() {
        let project = TestProject::new();
        let service = project.service();

        let ticket = service.create(draft("9876543210")).unwrap();
        let backup = service.create_backup(&project.backups).unwrap();
        assert_eq!(backup.timestamp, project.clock.now());

        project.clock.advance(Duration::minutes(10));
        service
            .update_status(&ticket.id, Status::Resolved, None, None)
            .unwrap();
        service.create(draft("8765432109")).unwrap();

        assert!(
            service
                .restore_backup(&project.backups, &backup.id.to_string())
                .unwrap()
        );
        let restored = project.service().get_ticket(&ticket.id).unwrap().unwrap();
        assert_eq!(restored.status, Status::Pending);
        assert_eq!(service.statistics().unwrap().total_tickets, 1);

        assert!(
            !service
                .restore_backup(&project.backups, "2001-01-01T00:00:00Z")
                .unwrap()
        );
    }

    #[test]
    fn test_export_then_import() {
        let project = TestProject::new();
        let path = project.temp_dir.path().join("helpdesk-export.json");
        let source = project.service();
        source.create(draft("9876543210")).unwrap();
        source.export_document(&path).unwrap();

        let clock = fixed_clock();
        let target = service(&clock);
        target.import_document(&path).unwrap();
        assert_eq!(target.all_tickets().unwrap(), source.all_tickets().unwrap());
    }
}
