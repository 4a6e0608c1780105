//! Terminal output for the CLI
//!
//! Human-readable messages are colored with `colored` unless disabled;
//! in JSON mode handlers emit a single JSON value through
//! [`OutputFormatter::print_json`] instead.

use crate::core::{Status, Ticket, Urgency};
use crate::error::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color || json {
            colored::control::set_override(false);
        }
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: &str) {
        println!("{} {message}", "✓".green().bold());
    }

    pub fn info(&self, message: &str) {
        println!("{message}");
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {message}", "warning:".yellow().bold());
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {message}", "error:".red().bold());
    }

    /// Print a value as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// One summary line per ticket
    pub fn print_ticket_line(&self, ticket: &Ticket) {
        println!(
            "{} {} {} {} {}",
            ticket.id.as_str().bold(),
            status_label(ticket.status),
            urgency_label(ticket.urgency),
            ticket.name,
            ticket.issue_type.dimmed()
        );
    }

    /// Full ticket details
    pub fn print_ticket(&self, ticket: &Ticket) {
        println!("{}", ticket.id.as_str().bold());
        println!("  Status:      {}", status_label(ticket.status));
        println!("  Urgency:     {}", urgency_label(ticket.urgency));
        println!("  Submitter:   {} ({})", ticket.name, ticket.mobile);
        println!("  Department:  {}", ticket.department);
        println!("  Category:    {}", ticket.issue_type);
        if let Some(location) = &ticket.location {
            println!("  Location:    {location}");
        }
        println!("  Description: {}", ticket.description);
        if let Some(technician) = &ticket.assigned_to {
            println!("  Assigned to: {technician}");
        }
        if let Some(resolution) = &ticket.resolution {
            println!("  Resolution:  {resolution}");
        }
        println!("  Created:     {}", format_time(ticket.created_at));
        println!("  Updated:     {}", format_time(ticket.updated_at));
        if let Some(resolved_at) = ticket.resolved_at {
            println!("  Resolved:    {}", format_time(resolved_at));
        }
    }
}

fn status_label(status: Status) -> ColoredString {
    match status {
        Status::Pending => status.as_str().yellow(),
        Status::InProgress => status.as_str().blue(),
        Status::Resolved => status.as_str().green(),
    }
}

fn urgency_label(urgency: Urgency) -> ColoredString {
    match urgency {
        Urgency::Low => urgency.as_str().normal(),
        Urgency::Medium => urgency.as_str().cyan(),
        Urgency::High => urgency.as_str().magenta(),
        Urgency::Urgent => urgency.as_str().red().bold(),
    }
}

fn format_time(time: chrono::DateTime<chrono::Utc>) -> String {
    time.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_disables_colorizing() {
        let formatter = OutputFormatter::new(false, true);
        assert!(!formatter.is_json());
        assert_eq!(status_label(Status::Resolved).to_string(), "resolved");
        colored::control::unset_override();
    }

    #[test]
    #[serial]
    fn test_json_mode_is_uncolored() {
        let formatter = OutputFormatter::new(true, false);
        assert!(formatter.is_json());
        assert_eq!(urgency_label(Urgency::Urgent).to_string(), "urgent");
        colored::control::unset_override();
    }
}
