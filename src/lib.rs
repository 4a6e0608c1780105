//! campus-helpdesk - IT helpdesk ticketing for a campus support desk
//!
//! This crate provides:
//! - Ticket submission, status tracking and deletion
//! - Text search with status, category, urgency and date filters
//! - Statistics, department/category breakdowns and daily trends
//! - Admin login, settings management, backups and exports
//!
//! All state lives in a single [`core::Document`] that is loaded and saved
//! whole through a [`storage::Store`]; every save recomputes the statistics.

// Allow missing error documentation for internal implementations
#![allow(clippy::missing_errors_doc)]
// Allow some pedantic lints that don't improve code quality
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_self)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::fn_params_excessive_bools)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::map_unwrap_or)]

//! # Example
//!
//! ```rust,ignore
//! use campus_helpdesk::core::{Mobile, SystemClock, TicketDraftBuilder};
//! use campus_helpdesk::service::TicketService;
//! use campus_helpdesk::storage::{FileStorage, Store};
//!
//! let store = Store::new(FileStorage::new("helpdesk.json"), SystemClock);
//! let service = TicketService::new(store);
//!
//! let draft = TicketDraftBuilder::new()
//!     .name("Rajesh Kumar")
//!     .mobile(Mobile::parse("9876543210")?)
//!     .department("cse")
//!     .category("laptop")
//!     .description("Laptop not booting")
//!     .build()?;
//! let ticket = service.create(draft)?;
//! assert_eq!(ticket.id.as_str(), "TICKET-1001");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod service;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{HelpdeskError, Result};
