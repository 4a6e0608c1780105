//! Core domain types for the helpdesk
//!
//! Tickets, users, admins, settings and the derived statistics all live in a
//! single [`Document`], which is the unit of persistence.

mod admin;
mod builders;
mod clock;
mod document;
mod mobile;
mod settings;
mod statistics;
mod ticket;
mod user;

pub use admin::{Admin, AdminRole};
pub use builders::{TicketBuilder, TicketDraftBuilder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use document::{DOCUMENT_VERSION, Document, FIRST_TICKET_NUMBER};
pub use mobile::Mobile;
pub use settings::{NotificationSettings, Settings};
pub use statistics::{
    GroupStats, MAX_TREND_DAYS, NOT_AVAILABLE, Statistics, TrendCounts,
    average_resolution_hours, daily_trends, format_resolution_time, group_stats,
};
pub use ticket::{Status, Ticket, TicketDraft, TicketId, Urgency};
pub use user::User;
