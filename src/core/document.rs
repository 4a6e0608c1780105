use super::{
    Admin, Mobile, Settings, Statistics, Status, Ticket, TicketBuilder, TicketId, Urgency, User,
};
use crate::error::{HelpdeskError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written into every document
pub const DOCUMENT_VERSION: &str = "2.0.0";

/// Number assigned to the first ticket of an empty store
pub const FIRST_TICKET_NUMBER: u64 = 1001;

/// The single persisted aggregate
///
/// Tickets are kept most-recent-first: new tickets are inserted at index 0
/// and the list is never re-sorted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: String,
    /// Next ticket number to hand out; absent in documents from older writers
    #[serde(default)]
    pub next_ticket_number: u64,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub admins: Vec<Admin>,
    #[serde(default)]
    pub settings: Settings,
    pub statistics: Statistics,
}

impl Document {
    /// A fresh document with the seed admins and default settings
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            next_ticket_number: FIRST_TICKET_NUMBER,
            users: Vec::new(),
            tickets: Vec::new(),
            admins: Admin::seed(now),
            settings: Settings::default(),
            statistics: Statistics::compute(&[], now),
        }
    }

    /// A fresh document populated with demo users and tickets
    pub fn with_sample_data(now: DateTime<Utc>) -> Result<Self> {
        let mut document = Self::new(now);
        let rajesh = Mobile::parse("9876543210")?;
        let priya = Mobile::parse("8765432109")?;
        let amit = Mobile::parse("7654321098")?;
        let sneha = Mobile::parse("6543210987")?;

        let mut user = User::new(rajesh.clone(), at(2024, 1, 1, 10, 0)?);
        user.update_profile("Rajesh Kumar", "cse", "rajesh@campus.edu");
        user.tickets = vec![TicketId::from_number(1001), TicketId::from_number(1005)];
        user.touch(now);
        document.users.push(user);

        let mut user = User::new(priya.clone(), at(2024, 1, 5, 14, 30)?);
        user.update_profile("Priya Sharma", "it", "priya@campus.edu");
        user.tickets = vec![TicketId::from_number(1002)];
        user.touch(now);
        document.users.push(user);

        document.tickets = vec![
            TicketBuilder::new()
                .number(1001)
                .name("Rajesh Kumar")
                .mobile(rajesh.clone())
                .roll_number("CS2021001")
                .department("cse")
                .email("rajesh@campus.edu")
                .location("lab1")
                .category("laptop")
                .description("Laptop not booting, shows blue screen error")
                .urgency(Urgency::High)
                .created_at(at(2024, 1, 10, 9, 15)?)
                .build(),
            TicketBuilder::new()
                .number(1002)
                .name("Priya Sharma")
                .mobile(priya)
                .roll_number("IT2021005")
                .department("it")
                .email("priya@campus.edu")
                .location("library")
                .category("printer")
                .description("Printer not connecting to WiFi network")
                .urgency(Urgency::Medium)
                .status(Status::InProgress)
                .assigned_to("John")
                .resolution("Checking network configuration")
                .created_at(at(2024, 1, 11, 11, 30)?)
                .updated_at(at(2024, 1, 11, 14, 45)?)
                .build(),
            TicketBuilder::new()
                .number(1003)
                .name("Amit Patel")
                .mobile(amit)
                .roll_number("ME2021012")
                .department("mech")
                .email("amit@campus.edu")
                .location("lab2")
                .category("networking")
                .description("No internet connection in Computer Lab 2")
                .urgency(Urgency::Urgent)
                .status(Status::Resolved)
                .assigned_to("Sarah")
                .resolution("Router restarted, connection restored")
                .created_at(at(2024, 1, 9, 8, 45)?)
                .updated_at(at(2024, 1, 9, 16, 20)?)
                .build(),
            TicketBuilder::new()
                .number(1004)
                .name("Sneha Reddy")
                .mobile(sneha)
                .roll_number("CE2021008")
                .department("civil")
                .email("sneha@campus.edu")
                .location("office")
                .category("software")
                .description("AutoCAD software not opening")
                .urgency(Urgency::High)
                .created_at(at(2024, 1, 12, 13, 20)?)
                .build(),
            TicketBuilder::new()
                .number(1005)
                .name("Rajesh Kumar")
                .mobile(rajesh)
                .roll_number("CS2021001")
                .department("cse")
                .email("rajesh@campus.edu")
                .location("lab1")
                .category("software")
                .description("Microsoft Office activation error")
                .urgency(Urgency::Medium)
                .status(Status::Resolved)
                .assigned_to("Mike")
                .resolution("Re-activated with new license key")
                .created_at(at(2024, 1, 8, 10, 45)?)
                .updated_at(at(2024, 1, 8, 15, 30)?)
                .build(),
        ];
        document.next_ticket_number = 1006;
        document.refresh_statistics(now);
        Ok(document)
    }

    /// Reserve the next ticket id
    ///
    /// Ids come from a monotonic counter so a deleted ticket's id is never
    /// handed out again. The counter is bumped past any id already present,
    /// which covers documents written before the counter existed.
    pub fn allocate_ticket_id(&mut self) -> TicketId {
        let past_existing = self
            .tickets
            .iter()
            .filter_map(|t| t.id.number())
            .max()
            .map_or(0, |n| n + 1);
        let number = self
            .next_ticket_number
            .max(past_existing)
            .max(FIRST_TICKET_NUMBER);
        self.next_ticket_number = number + 1;
        TicketId::from_number(number)
    }

    /// Recompute the derived statistics from the current ticket set
    pub fn refresh_statistics(&mut self, now: DateTime<Utc>) {
        self.statistics = Statistics::compute(&self.tickets, now);
    }

    #[must_use]
    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.id == id)
    }

    pub fn ticket_mut(&mut self, id: &TicketId) -> Option<&mut Ticket> {
        self.tickets.iter_mut().find(|t| &t.id == id)
    }

    #[must_use]
    pub fn user(&self, mobile: &Mobile) -> Option<&User> {
        self.users.iter().find(|u| &u.mobile == mobile)
    }

    pub fn user_mut(&mut self, mobile: &Mobile) -> Option<&mut User> {
        self.users.iter_mut().find(|u| &u.mobile == mobile)
    }

    /// Look up a user, creating an empty record on first sight
    pub fn user_or_insert(&mut self, mobile: &Mobile, now: DateTime<Utc>) -> &mut User {
        let index = match self.users.iter().position(|u| &u.mobile == mobile) {
            Some(index) => index,
            None => {
                self.users.push(User::new(mobile.clone(), now));
                self.users.len() - 1
            },
        };
        &mut self.users[index]
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .ok_or_else(|| HelpdeskError::custom("invalid sample timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_empty() {
        let document = Document::new(Utc::now());
        assert_eq!(document.version, DOCUMENT_VERSION);
        assert!(document.tickets.is_empty());
        assert!(document.users.is_empty());
        assert_eq!(document.admins.len(), 2);
        assert_eq!(document.statistics.total_tickets, 0);
    }

    #[test]
    fn test_sample_data_statistics() {
        let document = Document::with_sample_data(Utc::now()).unwrap();
        assert_eq!(document.tickets.len(), 5);
        assert_eq!(document.statistics.pending_tickets, 2);
        assert_eq!(document.statistics.in_progress_tickets, 1);
        assert_eq!(document.statistics.resolved_tickets, 2);
        // 7h35m and 4h45m average to 6h10m
        assert_eq!(document.statistics.average_resolution_time, "6.2 hours");
    }

    #[test]
    fn test_allocate_ids_are_monotonic() {
        let mut document = Document::new(Utc::now());
        assert_eq!(document.allocate_ticket_id().as_str(), "TICKET-1001");
        assert_eq!(document.allocate_ticket_id().as_str(), "TICKET-1002");
    }

    #[test]
    fn test_allocate_skips_past_existing_ids() {
        let mut document = Document::new(Utc::now());
        document.next_ticket_number = 0;
        document.tickets.push(TicketBuilder::new().number(1010).build());
        assert_eq!(document.allocate_ticket_id().as_str(), "TICKET-1011");
    }

    #[test]
    fn test_legacy_document_without_counter() {
        let json = serde_json::json!({
            "version": "2.0.0",
            "tickets": [],
            "statistics": {
                "totalTickets": 0,
                "pendingTickets": 0,
                "inProgressTickets": 0,
                "resolvedTickets": 0,
                "averageResolutionTime": "N/A",
                "lastUpdated": "2024-01-10T09:15:00Z"
            }
        });
        let mut document: Document = serde_json::from_value(json).unwrap();
        assert_eq!(document.next_ticket_number, 0);
        assert_eq!(document.allocate_ticket_id().as_str(), "TICKET-1001");
    }

    #[test]
    fn test_user_or_insert() {
        let mut document = Document::new(Utc::now());
        let mobile = Mobile::parse("9876543210").unwrap();
        document.user_or_insert(&mobile, Utc::now()).name = "Rajesh".to_string();
        document.user_or_insert(&mobile, Utc::now());

        assert_eq!(document.users.len(), 1);
        assert_eq!(document.user(&mobile).unwrap().name, "Rajesh");
    }
}
