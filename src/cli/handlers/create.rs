//! Handlers for submitting tickets and registering users

use super::common::HandlerContext;
use crate::cli::{OutputFormatter, SubmitArgs};
use crate::core::{Mobile, TicketDraftBuilder};
use crate::error::Result;

/// Handler for the `submit` command
///
/// Validates the submission, stores it as a new pending ticket and prints
/// the assigned id.
///
/// # Errors
///
/// Returns an error if the mobile number is invalid, a required field is
/// empty, the urgency is unknown, or the data file cannot be written.
pub fn handle_submit_command(
    args: SubmitArgs,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let mut builder = TicketDraftBuilder::new()
        .name(args.name)
        .mobile(Mobile::parse(&args.mobile)?)
        .department(args.department)
        .category(args.category)
        .description(args.description)
        .urgency(args.urgency.parse()?);

    if let Some(roll_number) = args.roll_number {
        builder = builder.roll_number(roll_number);
    }
    if let Some(email) = args.email {
        builder = builder.email(email);
    }
    if let Some(location) = args.location {
        builder = builder.location(location);
    }
    if let Some(screenshot) = args.screenshot {
        builder = builder.screenshot(screenshot);
    }

    let ticket = ctx.service().create(builder.build()?)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "ticket": ticket,
        }))?;
    } else {
        output.success(&format!("Submitted ticket {}", ticket.id));
        output.info(&format!(
            "Track it with: campus-helpdesk show {}",
            ticket.id
        ));
    }

    Ok(())
}

/// Handler for the `login` command
///
/// Registers the mobile number as a user, or refreshes the profile of an
/// existing one, then lists the user's tickets.
pub fn handle_login_command(
    mobile: &str,
    name: Option<&str>,
    department: Option<&str>,
    email: Option<&str>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let mobile = Mobile::parse(mobile)?;
    let user = ctx.service().register_user(
        &mobile,
        name.unwrap_or_default(),
        department.unwrap_or_default(),
        email.unwrap_or_default(),
    )?;
    let tickets = ctx.service().user_tickets(&mobile)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "user": user,
            "tickets": tickets,
        }))?;
        return Ok(());
    }

    let greeting = if user.name.is_empty() {
        mobile.to_string()
    } else {
        user.name.clone()
    };
    output.success(&format!("Logged in as {greeting}"));
    if tickets.is_empty() {
        output.info("No tickets submitted yet");
    } else {
        output.info(&format!("Your tickets ({}):", tickets.len()));
        for ticket in &tickets {
            output.print_ticket_line(ticket);
        }
    }

    Ok(())
}
