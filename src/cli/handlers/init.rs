//! Handler for the `init` command

use crate::cli::OutputFormatter;
use crate::config::Config;
use crate::core::SystemClock;
use crate::error::Result;
use crate::storage::{FileStorage, SeedMode, Store};

/// Create the data file, optionally seeded with demo data
///
/// # Errors
///
/// Returns an error if a data file already exists and `force` is not set,
/// or if the file cannot be written.
pub fn handle_init_command(
    sample_data: bool,
    force: bool,
    config: &Config,
    output: &OutputFormatter,
) -> Result<()> {
    let seed = if sample_data || config.storage.sample_data {
        SeedMode::SampleData
    } else {
        SeedMode::Empty
    };
    let path = config.data_path();
    let store = Store::new(FileStorage::new(path.clone()), SystemClock).with_seed(seed);
    let document = store.initialize(force)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "path": path,
            "tickets": document.tickets.len(),
            "users": document.users.len(),
            "system_name": document.settings.system_name,
        }))?;
    } else {
        output.success(&format!("Initialized helpdesk at {}", path.display()));
        if !document.tickets.is_empty() {
            output.info(&format!(
                "Seeded {} sample tickets and {} users",
                document.tickets.len(),
                document.users.len()
            ));
        }
        output.info("");
        output.info("Next steps:");
        output.info("  Submit a ticket:  campus-helpdesk submit --help");
        output.info("  Log in as admin:  campus-helpdesk admin admin");
    }

    Ok(())
}
