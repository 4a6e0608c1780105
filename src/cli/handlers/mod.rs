//! Command handlers
//!
//! Each handler takes its parsed arguments, a [`HandlerContext`] and the
//! [`OutputFormatter`](crate::cli::OutputFormatter), and prints either
//! human-readable text or a single JSON value.

mod admin;
mod backup;
mod common;
mod create;
mod filter;
mod import_export_common;
mod init;
mod list;
mod stats;
mod workflow;

pub use admin::{
    handle_admin_command, handle_category_command, handle_settings_command,
    handle_technician_command,
};
pub use backup::{handle_backup_command, handle_import_command};
pub use common::{FileService, HandlerContext, parse_ticket_id};
pub use create::{handle_login_command, handle_submit_command};
pub use filter::handle_search_command;
pub use import_export_common::{FormatUtils, handle_export_command, render_export};
pub use init::handle_init_command;
pub use list::{handle_list_command, handle_show_command};
pub use stats::handle_stats_command;
pub use workflow::{
    handle_assign_command, handle_delete_command, handle_resolve_command, handle_update_command,
};
