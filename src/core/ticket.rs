use super::Mobile;
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TICKET_PREFIX: &str = "TICKET-";

/// Ticket identifier of the form `TICKET-<n>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Build an id from its numeric part
    #[must_use]
    pub fn from_number(number: u64) -> Self {
        Self(format!("{TICKET_PREFIX}{number}"))
    }

    /// Numeric part of the id, if it has one
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        self.0.strip_prefix(TICKET_PREFIX)?.parse().ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TicketId {
    type Err = HelpdeskError;

    /// Accepts `TICKET-1001`, `ticket-1001` or a bare `1001`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let digits = match s.get(..TICKET_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(TICKET_PREFIX) => {
                &s[TICKET_PREFIX.len()..]
            },
            _ => s,
        };

        digits
            .parse::<u64>()
            .map(Self::from_number)
            .map_err(|_| HelpdeskError::InvalidInput(format!("Invalid ticket id: '{s}'")))
    }
}

/// Lifecycle status of a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Resolved,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Resolved];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            other => Err(HelpdeskError::InvalidInput(format!(
                "Invalid status '{other}'. Valid values: pending, in-progress, resolved"
            ))),
        }
    }
}

/// Caller-declared urgency, independent of status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Urgency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(HelpdeskError::InvalidInput(format!(
                "Invalid urgency '{other}'. Valid values: low, medium, high, urgent"
            ))),
        }
    }
}

/// Validated submission data for a new ticket
///
/// Produced by [`super::TicketDraftBuilder::build`]; the service turns it into
/// a [`Ticket`] by assigning an id, status and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    pub name: String,
    pub mobile: Mobile,
    pub roll_number: Option<String>,
    pub department: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub issue_type: String,
    pub description: String,
    pub urgency: Urgency,
    pub screenshot: Option<String>,
}

/// A single reported issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub name: String,
    pub mobile: Mobile,
    #[serde(default)]
    pub roll_number: Option<String>,
    pub department: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Issue category, one of the configured settings categories
    pub issue_type: String,
    pub description: String,
    pub urgency: Urgency,
    pub status: Status,
    /// Data URI of an attached screenshot
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Create a pending ticket from a validated draft
    #[must_use]
    pub fn from_draft(id: TicketId, draft: TicketDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            mobile: draft.mobile,
            roll_number: draft.roll_number,
            department: draft.department,
            email: draft.email,
            location: draft.location,
            issue_type: draft.issue_type,
            description: draft.description,
            urgency: draft.urgency,
            status: Status::Pending,
            screenshot: draft.screenshot,
            assigned_to: None,
            resolution: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }

    /// Move the ticket to `status`
    ///
    /// `resolved_at` is stamped the first time the ticket becomes resolved
    /// and is never cleared afterwards, even if the ticket is reopened.
    pub fn set_status(&mut self, status: Status, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
        if status == Status::Resolved && self.resolved_at.is_none() {
            self.resolved_at = Some(now);
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == Status::Resolved
    }

    /// Time between creation and first resolution
    #[must_use]
    pub fn resolution_span(&self) -> Option<Duration> {
        self.resolved_at.map(|resolved| resolved - self.created_at)
    }

    /// Case-insensitive match against id, name, mobile and description
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_query(&self, needle: &str) -> bool {
        self.id.as_str().to_lowercase().contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self.mobile.as_str().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TicketBuilder;
    use chrono::TimeZone;

    #[test]
    fn test_ticket_id_parsing() {
        assert_eq!("TICKET-1001".parse::<TicketId>().unwrap().number(), Some(1001));
        assert_eq!("ticket-1002".parse::<TicketId>().unwrap().as_str(), "TICKET-1002");
        assert_eq!("1003".parse::<TicketId>().unwrap().as_str(), "TICKET-1003");
        assert!("TICKET-".parse::<TicketId>().is_err());
        assert!("bogus".parse::<TicketId>().is_err());
    }

    #[test]
    fn test_status_round_trip_names() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert!("closed".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_resolved_at_stamped_once() {
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let first = created + Duration::hours(2);
        let second = created + Duration::hours(5);
        let mut ticket = TicketBuilder::new().created_at(created).build();

        ticket.set_status(Status::Resolved, first);
        ticket.set_status(Status::InProgress, second);
        ticket.set_status(Status::Resolved, second);

        assert_eq!(ticket.resolved_at, Some(first));
        assert_eq!(ticket.updated_at, second);
        assert_eq!(ticket.resolution_span(), Some(Duration::hours(2)));
    }

    #[test]
    fn test_matches_query_fields() {
        let ticket = TicketBuilder::new()
            .number(1042)
            .name("Priya Sharma")
            .description("Printer not connecting to WiFi")
            .build();

        assert!(ticket.matches_query("ticket-1042"));
        assert!(ticket.matches_query("priya"));
        assert!(ticket.matches_query("wifi"));
        assert!(ticket.matches_query("98765"));
        assert!(!ticket.matches_query("laptop"));
    }

    #[test]
    fn test_ticket_json_uses_camel_case() {
        let ticket = TicketBuilder::new().number(1001).build();
        let value = serde_json::to_value(&ticket).unwrap();
        assert!(value.get("issueType").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("resolvedAt").is_some());
    }
}
