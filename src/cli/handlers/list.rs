//! Handlers for the `show` and `list` commands

use super::common::{HandlerContext, load_ticket, parse_ticket_id};
use crate::cli::OutputFormatter;
use crate::core::Mobile;
use crate::error::Result;

/// Handler for the `show` command
pub fn handle_show_command(id: &str, ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    let ticket = load_ticket(ctx.service(), &parse_ticket_id(id)?)?;

    if output.is_json() {
        output.print_json(&ticket)?;
    } else {
        output.print_ticket(&ticket);
    }
    Ok(())
}

/// Handler for the `list` command
///
/// Lists every ticket, or only those from `mobile`, most recent first.
pub fn handle_list_command(
    mobile: Option<&str>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let tickets = match mobile {
        Some(mobile) => ctx.service().user_tickets(&Mobile::parse(mobile)?)?,
        None => ctx.service().all_tickets()?,
    };

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "tickets": tickets,
            "count": tickets.len(),
        }))?;
        return Ok(());
    }

    if tickets.is_empty() {
        output.warning("No tickets found");
        return Ok(());
    }
    for ticket in &tickets {
        output.print_ticket_line(ticket);
    }
    output.info("");
    output.info(&format!("Total: {} tickets", tickets.len()));
    Ok(())
}
