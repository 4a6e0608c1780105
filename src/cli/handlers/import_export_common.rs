//! Export formats and the `export` command

use super::common::HandlerContext;
use crate::cli::{ExportData, ExportFormat, OutputFormatter};
use crate::core::{Ticket, User};
use crate::error::{HelpdeskError, Result};
use std::fs;
use std::path::Path;

const TICKET_HEADERS: [&str; 11] = [
    "ID",
    "Name",
    "Mobile",
    "Department",
    "Issue Type",
    "Description",
    "Urgency",
    "Status",
    "Created At",
    "Resolved At",
    "Resolution",
];

const USER_HEADERS: [&str; 7] = [
    "Mobile",
    "Name",
    "Department",
    "Email",
    "Tickets Count",
    "Created At",
    "Last Active",
];

/// Serialization helpers for exported data
pub struct FormatUtils;

impl FormatUtils {
    /// Tickets as CSV, one row per ticket
    pub fn tickets_csv(tickets: &[Ticket]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(TICKET_HEADERS)?;
        for ticket in tickets {
            writer.write_record([
                ticket.id.to_string(),
                ticket.name.clone(),
                ticket.mobile.to_string(),
                ticket.department.clone(),
                ticket.issue_type.clone(),
                ticket.description.clone(),
                ticket.urgency.to_string(),
                ticket.status.to_string(),
                ticket.created_at.to_rfc3339(),
                ticket
                    .resolved_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                ticket.resolution.clone().unwrap_or_default(),
            ])?;
        }
        Self::finish_csv(writer)
    }

    /// Users as CSV, one row per user
    pub fn users_csv(users: &[User]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(USER_HEADERS)?;
        for user in users {
            writer.write_record([
                user.mobile.to_string(),
                user.name.clone(),
                user.department.clone(),
                user.email.clone(),
                user.tickets.len().to_string(),
                user.created_at.to_rfc3339(),
                user.last_active.to_rfc3339(),
            ])?;
        }
        Self::finish_csv(writer)
    }

    fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
        let bytes = writer
            .into_inner()
            .map_err(|e| HelpdeskError::SerializationError(format!("Failed to flush CSV: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| HelpdeskError::SerializationError(format!("Invalid UTF-8 in CSV: {e}")))
    }

    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).map_err(|e| {
            HelpdeskError::SerializationError(format!("Failed to serialize to JSON: {e}"))
        })
    }

    pub fn yaml<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
        serde_yaml::to_string(value).map_err(|e| {
            HelpdeskError::SerializationError(format!("Failed to serialize to YAML: {e}"))
        })
    }
}

impl ExportFormat {
    /// File extension for the format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Render the selected data in the selected format
pub fn render_export(
    ctx: &HandlerContext,
    format: ExportFormat,
    data: ExportData,
) -> Result<String> {
    let service = ctx.service();
    match (format, data) {
        (ExportFormat::Csv, ExportData::Tickets) => {
            FormatUtils::tickets_csv(&service.all_tickets()?)
        },
        (ExportFormat::Csv, ExportData::Users) => FormatUtils::users_csv(&service.all_users()?),
        (ExportFormat::Csv, ExportData::Document) => Err(HelpdeskError::InvalidInput(
            "The whole document can only be exported as json or yaml".to_string(),
        )),
        (ExportFormat::Json, ExportData::Tickets) => FormatUtils::json(&service.all_tickets()?),
        (ExportFormat::Json, ExportData::Users) => FormatUtils::json(&service.all_users()?),
        (ExportFormat::Json, ExportData::Document) => FormatUtils::json(&service.document()?),
        (ExportFormat::Yaml, ExportData::Tickets) => FormatUtils::yaml(&service.all_tickets()?),
        (ExportFormat::Yaml, ExportData::Users) => FormatUtils::yaml(&service.all_users()?),
        (ExportFormat::Yaml, ExportData::Document) => FormatUtils::yaml(&service.document()?),
    }
}

/// Handler for the `export` command
///
/// Writes to `output_path` when given, otherwise to stdout.
pub fn handle_export_command(
    format: ExportFormat,
    data: ExportData,
    output_path: Option<&Path>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let content = render_export(ctx, format, data)?;

    let Some(path) = output_path else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
        return Ok(());
    };

    fs::write(path, &content).map_err(|e| HelpdeskError::storage(path, e))?;
    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "path": path,
            "format": format.extension(),
            "bytes": content.len(),
        }))?;
    } else {
        output.success(&format!("Exported to {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Clock, Document, Status, TicketBuilder};
    use crate::test_utils::fixed_clock;

    #[test]
    fn test_tickets_csv_columns() {
        let ticket = TicketBuilder::new()
            .number(1001)
            .description("Screen flickers, then \"goes black\"")
            .status(Status::Resolved)
            .resolution("Replaced cable")
            .created_at(fixed_clock().now())
            .build();

        let csv = FormatUtils::tickets_csv(&[ticket]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Name,Mobile,Department,Issue Type,Description,Urgency,Status,Created At,Resolved At,Resolution"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("TICKET-1001,Test User,9876543210,cse,other,"));
        assert!(row.contains("\"Screen flickers, then \"\"goes black\"\"\""));
        assert!(row.ends_with(
            ",resolved,2024-01-15T12:00:00+00:00,2024-01-15T12:00:00+00:00,Replaced cable"
        ));
    }

    #[test]
    fn test_users_csv_counts_tickets() {
        let document = Document::with_sample_data(fixed_clock().now()).unwrap();
        let csv = FormatUtils::users_csv(&document.users).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("9876543210,Rajesh Kumar,cse,rajesh@campus.edu,2,"));
        assert!(rows[2].starts_with("8765432109,Priya Sharma,it,priya@campus.edu,1,"));
    }

    #[test]
    fn test_yaml_export_lists_tickets() {
        let ticket = TicketBuilder::new().number(1001).build();
        let yaml = FormatUtils::yaml(&[ticket]).unwrap();
        assert!(yaml.contains("id: TICKET-1001"));
        assert!(yaml.contains("status: pending"));
    }
}
