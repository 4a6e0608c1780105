//! Command-line interface for campus-helpdesk
//!
//! Argument definitions live here; each command's logic lives in
//! [`handlers`], and all terminal output goes through [`OutputFormatter`].

pub mod handlers;
pub mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// IT helpdesk ticketing from the command line
#[derive(Parser, Debug)]
#[command(name = "campus-helpdesk", version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the helpdesk data file
    Init {
        /// Seed demo users and tickets
        #[arg(long)]
        sample_data: bool,

        /// Overwrite an existing data file
        #[arg(short, long)]
        force: bool,
    },

    /// Register or refresh a user by mobile number
    Login {
        mobile: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Submit a new ticket
    Submit(SubmitArgs),

    /// Show a single ticket
    Show {
        /// Ticket id, e.g. TICKET-1001 or 1001
        id: String,
    },

    /// List tickets, most recent first
    List {
        /// Only tickets submitted from this mobile number
        #[arg(long)]
        mobile: Option<String>,
    },

    /// Search tickets by text and filters
    Search(SearchArgs),

    /// Change a ticket's status
    Update {
        id: String,

        #[arg(short, long)]
        status: String,

        #[arg(short, long)]
        resolution: Option<String>,

        /// Technician to assign
        #[arg(short, long)]
        assign: Option<String>,
    },

    /// Assign a technician and mark the ticket in progress
    Assign { id: String, technician: String },

    /// Mark a ticket resolved
    Resolve {
        id: String,

        #[arg(short, long)]
        resolution: Option<String>,
    },

    /// Delete a ticket
    Delete { id: String },

    /// Show ticket statistics
    Stats {
        /// Break down by department
        #[arg(long)]
        departments: bool,

        /// Break down by issue category
        #[arg(long)]
        categories: bool,

        /// Daily new/resolved counts for the last N days
        #[arg(long, value_name = "DAYS")]
        trends: Option<u32>,
    },

    /// Log in as an administrator
    Admin {
        username: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Manage issue categories
    #[command(subcommand)]
    Category(NameCommands),

    /// Manage technicians
    #[command(subcommand)]
    Technician(NameCommands),

    /// Show or change system settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Manage document snapshots
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Export tickets, users or the whole document
    Export {
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(short, long, value_enum, default_value = "tickets")]
        data: ExportData,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the whole document with an exported one
    Import {
        file: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub mobile: String,

    #[arg(long)]
    pub department: String,

    /// Issue category, e.g. laptop or printer
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub description: String,

    #[arg(long, default_value = "medium")]
    pub urgency: String,

    #[arg(long)]
    pub roll_number: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Screenshot reference
    #[arg(long)]
    pub screenshot: Option<String>,
}

#[derive(clap::Args, Debug, Default)]
pub struct SearchArgs {
    /// Matches id, name, mobile or description
    pub query: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub urgency: Option<String>,

    /// Start date: YYYY-MM-DD, today, yesterday or last-N
    #[arg(long)]
    pub from: Option<String>,

    /// End date, inclusive
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum NameCommands {
    Add { name: String },
    Remove { name: String },
    List,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    Show,
    Set {
        #[arg(long)]
        system_name: Option<String>,

        #[arg(long)]
        auto_close_days: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Snapshot the current document
    Create,
    List,
    /// Restore a snapshot by id or timestamp
    Restore { key: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportData {
    Tickets,
    Users,
    /// The whole persisted document
    Document,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_with_filters() {
        let cli = Cli::try_parse_from([
            "campus-helpdesk",
            "search",
            "printer",
            "--status",
            "pending",
            "--from",
            "last-7",
            "--to",
            "today",
            "--json",
        ])
        .expect("Failed to parse");

        assert!(cli.json);
        let Commands::Search(args) = cli.command else {
            panic!("Expected search command");
        };
        assert_eq!(args.query.as_deref(), Some("printer"));
        assert_eq!(args.status.as_deref(), Some("pending"));
    }

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::try_parse_from(["campus-helpdesk", "export"]).expect("Failed to parse");
        assert!(matches!(
            cli.command,
            Commands::Export {
                format: ExportFormat::Json,
                data: ExportData::Tickets,
                output: None,
            }
        ));
    }
}
