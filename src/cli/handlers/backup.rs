//! Handlers for snapshots and whole-document import

use super::common::HandlerContext;
use crate::cli::{BackupCommands, OutputFormatter};
use crate::error::{HelpdeskError, Result};
use std::path::Path;

/// Handler for the `backup` subcommands
///
/// # Errors
///
/// `restore` returns [`HelpdeskError::BackupNotFound`] when no snapshot
/// matches the given id or timestamp.
pub fn handle_backup_command(
    command: BackupCommands,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let backups = ctx.backups();
    match command {
        BackupCommands::Create => {
            let backup = ctx.service().create_backup(&backups)?;
            if output.is_json() {
                output.print_json(&serde_json::json!({
                    "id": backup.id,
                    "timestamp": backup.timestamp,
                    "tickets": backup.data.tickets.len(),
                }))?;
            } else {
                output.success(&format!(
                    "Created backup {} at {}",
                    backup.id,
                    backup.timestamp.to_rfc3339()
                ));
            }
        },
        BackupCommands::List => {
            let snapshots = backups.list()?;
            if output.is_json() {
                let summary: Vec<_> = snapshots
                    .iter()
                    .map(|b| {
                        serde_json::json!({
                            "id": b.id,
                            "timestamp": b.timestamp,
                            "version": b.version,
                            "tickets": b.data.tickets.len(),
                        })
                    })
                    .collect();
                output.print_json(&summary)?;
            } else if snapshots.is_empty() {
                output.warning("No backups yet");
            } else {
                for backup in &snapshots {
                    output.info(&format!(
                        "{}  {}  {} tickets",
                        backup.timestamp.to_rfc3339(),
                        backup.id,
                        backup.data.tickets.len()
                    ));
                }
            }
        },
        BackupCommands::Restore { key } => {
            if !ctx.service().restore_backup(&backups, &key)? {
                return Err(HelpdeskError::BackupNotFound { timestamp: key });
            }
            if output.is_json() {
                output.print_json(&serde_json::json!({
                    "status": "success",
                    "restored": key,
                }))?;
            } else {
                output.success(&format!("Restored backup {key}"));
            }
        },
    }
    Ok(())
}

/// Handler for the `import` command
pub fn handle_import_command(
    file: &Path,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    ctx.service().import_document(file)?;
    let statistics = ctx.service().statistics()?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "file": file,
            "tickets": statistics.total_tickets,
        }))?;
    } else {
        output.success(&format!(
            "Imported {} tickets from {}",
            statistics.total_tickets,
            file.display()
        ));
    }
    Ok(())
}
