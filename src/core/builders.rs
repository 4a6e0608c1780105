use super::{Mobile, Status, Ticket, TicketDraft, TicketId, Urgency};
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, Utc};

/// Builder for validated ticket submissions
///
/// Required fields are name, mobile, department, category and description.
/// Optional text fields that are blank after trimming are stored as absent.
#[derive(Default)]
pub struct TicketDraftBuilder {
    name: Option<String>,
    mobile: Option<Mobile>,
    roll_number: Option<String>,
    department: Option<String>,
    email: Option<String>,
    location: Option<String>,
    issue_type: Option<String>,
    description: Option<String>,
    urgency: Option<Urgency>,
    screenshot: Option<String>,
}

impl TicketDraftBuilder {
    /// Create a new draft builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the submitter name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the submitter mobile
    #[must_use]
    pub fn mobile(mut self, mobile: Mobile) -> Self {
        self.mobile = Some(mobile);
        self
    }

    #[must_use]
    pub fn roll_number(mut self, roll_number: impl Into<String>) -> Self {
        self.roll_number = Some(roll_number.into());
        self
    }

    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the issue category
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.issue_type = Some(category.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    /// Attach a screenshot as a data URI
    #[must_use]
    pub fn screenshot(mut self, data_uri: impl Into<String>) -> Self {
        self.screenshot = Some(data_uri.into());
        self
    }

    /// Validate and build the draft
    pub fn build(self) -> Result<TicketDraft> {
        let mobile = self
            .mobile
            .ok_or_else(|| HelpdeskError::MissingRequiredField("mobile".to_string()))?;

        Ok(TicketDraft {
            name: required("name", self.name)?,
            mobile,
            roll_number: optional(self.roll_number),
            department: required("department", self.department)?,
            email: optional(self.email),
            location: optional(self.location),
            issue_type: required("category", self.issue_type)?,
            description: required("description", self.description)?,
            urgency: self.urgency.unwrap_or_default(),
            screenshot: optional(self.screenshot),
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    optional(value).ok_or_else(|| HelpdeskError::MissingRequiredField(field.to_string()))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builder for fully-formed tickets
///
/// Used for seed data and fixtures where the lifecycle fields are known up
/// front. Normal submissions go through [`TicketDraftBuilder`] and the
/// service instead.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    name: Option<String>,
    mobile: Option<Mobile>,
    roll_number: Option<String>,
    department: Option<String>,
    email: Option<String>,
    location: Option<String>,
    issue_type: Option<String>,
    description: Option<String>,
    urgency: Option<Urgency>,
    status: Option<Status>,
    assigned_to: Option<String>,
    resolution: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    resolved_at: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the ticket ID from its number
    #[must_use]
    pub fn number(self, number: u64) -> Self {
        self.id(TicketId::from_number(number))
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn mobile(mut self, mobile: Mobile) -> Self {
        self.mobile = Some(mobile);
        self
    }

    #[must_use]
    pub fn roll_number(mut self, roll_number: impl Into<String>) -> Self {
        self.roll_number = Some(roll_number.into());
        self
    }

    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.issue_type = Some(category.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, technician: impl Into<String>) -> Self {
        self.assigned_to = Some(technician.into());
        self
    }

    #[must_use]
    pub fn resolution(mut self, resolution: impl Into<String>) -> Self {
        self.resolution = Some(resolution.into());
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set `updated_at` timestamp
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Set `resolved_at` timestamp
    #[must_use]
    pub const fn resolved_at(mut self, resolved_at: DateTime<Utc>) -> Self {
        self.resolved_at = Some(resolved_at);
        self
    }

    /// Build the ticket
    ///
    /// A resolved ticket without an explicit `resolved_at` is stamped with
    /// its `updated_at`.
    pub fn build(self) -> Ticket {
        let status = self.status.unwrap_or_default();
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        let updated_at = self.updated_at.unwrap_or(created_at);
        let resolved_at = match (status, self.resolved_at) {
            (_, Some(at)) => Some(at),
            (Status::Resolved, None) => Some(updated_at),
            _ => None,
        };

        Ticket {
            id: self.id.unwrap_or_else(|| TicketId::from_number(super::FIRST_TICKET_NUMBER)),
            name: self.name.unwrap_or_else(|| "Test User".to_string()),
            mobile: self.mobile.unwrap_or_else(Mobile::demo),
            roll_number: self.roll_number,
            department: self.department.unwrap_or_else(|| "cse".to_string()),
            email: self.email,
            location: self.location,
            issue_type: self.issue_type.unwrap_or_else(|| "other".to_string()),
            description: self.description.unwrap_or_default(),
            urgency: self.urgency.unwrap_or_default(),
            status,
            screenshot: None,
            assigned_to: self.assigned_to,
            resolution: self.resolution,
            created_at,
            updated_at,
            resolved_at,
        }
    }
}
