//! Handlers that move tickets through their lifecycle

use super::common::{HandlerContext, parse_ticket_id};
use crate::cli::OutputFormatter;
use crate::core::{Status, Ticket};
use crate::error::Result;

/// Handler for the `update` command
pub fn handle_update_command(
    id: &str,
    status: &str,
    resolution: Option<&str>,
    assign: Option<&str>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let status: Status = status.parse()?;
    let ticket = ctx
        .service()
        .update_status(&parse_ticket_id(id)?, status, resolution, assign)?;
    report_update(&ticket, output)
}

/// Handler for the `assign` command
///
/// Assigning a technician also moves the ticket to `in-progress`.
pub fn handle_assign_command(
    id: &str,
    technician: &str,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket = ctx.service().update_status(
        &parse_ticket_id(id)?,
        Status::InProgress,
        None,
        Some(technician),
    )?;
    report_update(&ticket, output)
}

/// Handler for the `resolve` command
pub fn handle_resolve_command(
    id: &str,
    resolution: Option<&str>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let ticket =
        ctx.service()
            .update_status(&parse_ticket_id(id)?, Status::Resolved, resolution, None)?;
    report_update(&ticket, output)
}

/// Handler for the `delete` command
pub fn handle_delete_command(
    id: &str,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let id = parse_ticket_id(id)?;
    let deleted = ctx.service().delete(&id)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "id": id,
            "deleted": deleted,
        }))?;
    } else if deleted {
        output.success(&format!("Deleted ticket {id}"));
    } else {
        output.warning(&format!("Ticket {id} does not exist"));
    }
    Ok(())
}

fn report_update(ticket: &Ticket, output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        return output.print_json(&serde_json::json!({
            "status": "success",
            "ticket": ticket,
        }));
    }

    output.success(&format!("Ticket {} is now {}", ticket.id, ticket.status));
    if let Some(technician) = &ticket.assigned_to {
        output.info(&format!("Assigned to: {technician}"));
    }
    if let Some(resolution) = &ticket.resolution {
        output.info(&format!("Resolution: {resolution}"));
    }
    Ok(())
}
