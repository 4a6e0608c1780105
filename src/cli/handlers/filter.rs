//! Handler for the `search` command

use super::common::HandlerContext;
use crate::cli::{OutputFormatter, SearchArgs};
use crate::error::Result;
use crate::service::SearchFilters;
use chrono::Utc;

/// Handler for the `search` command
///
/// The text query and every filter are optional; omitted filters, or
/// filters set to `all`, do not restrict the result.
///
/// # Errors
///
/// Returns an error if a status, urgency or date filter cannot be parsed.
pub fn handle_search_command(
    args: &SearchArgs,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let filters = SearchFilters::from_raw(
        args.status.as_deref(),
        args.category.as_deref(),
        args.urgency.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
        Utc::now().date_naive(),
    )?;
    if filters.date_from.is_some() != filters.date_to.is_some() {
        output.warning("Date filters apply only when both --from and --to are given");
    }

    let query = args.query.as_deref().unwrap_or_default();
    let tickets = ctx.service().search(query, &filters)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "query": query,
            "tickets": tickets,
            "count": tickets.len(),
        }))?;
        return Ok(());
    }

    if tickets.is_empty() {
        output.warning("No tickets match the search");
        return Ok(());
    }
    for ticket in &tickets {
        output.print_ticket_line(ticket);
    }
    output.info("");
    output.info(&format!("{} matching tickets", tickets.len()));
    Ok(())
}
