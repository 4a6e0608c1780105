use crate::config::Config;
use crate::core::{SystemClock, Ticket, TicketId};
use crate::error::Result;
use crate::service::TicketService;
use crate::storage::{BackupStorage, FileStorage, SeedMode, Store};

/// Service type every handler runs against
pub type FileService = TicketService<FileStorage, SystemClock>;

/// Common context for all handler operations
pub struct HandlerContext {
    config: Config,
    service: FileService,
}

impl HandlerContext {
    /// Build a context over the configured data file
    pub fn new(config: Config) -> Self {
        let seed = if config.storage.sample_data {
            SeedMode::SampleData
        } else {
            SeedMode::Empty
        };
        let store = Store::new(FileStorage::new(config.data_path()), SystemClock).with_seed(seed);

        Self {
            config,
            service: TicketService::new(store),
        }
    }

    pub const fn service(&self) -> &FileService {
        &self.service
    }

    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The configured backup ring
    pub fn backups(&self) -> BackupStorage {
        BackupStorage::new(self.config.backup_path(), self.config.storage.backup_retention)
    }
}

/// Parse a ticket reference given on the command line
pub fn parse_ticket_id(value: &str) -> Result<TicketId> {
    value.parse()
}

/// Look up a ticket, failing when it does not exist
pub fn load_ticket(service: &FileService, id: &TicketId) -> Result<Ticket> {
    service
        .get_ticket(id)?
        .ok_or_else(|| crate::error::HelpdeskError::TicketNotFound { id: id.to_string() })
}
