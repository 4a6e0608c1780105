//! campus-helpdesk - IT helpdesk ticketing
//!
//! This is the main entry point for the campus-helpdesk CLI application.
//! It parses arguments, loads configuration, sets up logging and dispatches
//! to the command handlers.

use campus_helpdesk::cli::handlers::{
    HandlerContext, handle_admin_command, handle_assign_command, handle_backup_command,
    handle_category_command, handle_delete_command, handle_export_command, handle_import_command,
    handle_init_command, handle_list_command, handle_login_command, handle_resolve_command,
    handle_search_command, handle_settings_command, handle_show_command, handle_stats_command,
    handle_submit_command, handle_technician_command, handle_update_command,
};
use campus_helpdesk::cli::{Cli, Commands, OutputFormatter};
use campus_helpdesk::config::Config;
use campus_helpdesk::error::{HelpdeskError, Result};
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Load configuration, initialise logging and run the requested command
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    init_logging(cli.verbose, &config);
    tracing::debug!(data = %config.data_path().display(), "Configuration loaded");

    dispatch_command(cli.command, config, formatter)
}

/// `--verbose` wins over `RUST_LOG`, which wins over `log.level`
fn init_logging(verbose: bool, config: &Config) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch_command(command: Commands, config: Config, formatter: &OutputFormatter) -> Result<()> {
    let ctx = HandlerContext::new(config);
    match command {
        Commands::Init { sample_data, force } => {
            handle_init_command(sample_data, force, ctx.config(), formatter)
        },
        Commands::Login {
            mobile,
            name,
            department,
            email,
        } => handle_login_command(
            &mobile,
            name.as_deref(),
            department.as_deref(),
            email.as_deref(),
            &ctx,
            formatter,
        ),
        Commands::Submit(args) => handle_submit_command(args, &ctx, formatter),
        Commands::Show { id } => handle_show_command(&id, &ctx, formatter),
        Commands::List { mobile } => handle_list_command(mobile.as_deref(), &ctx, formatter),
        Commands::Search(args) => handle_search_command(&args, &ctx, formatter),
        Commands::Update {
            id,
            status,
            resolution,
            assign,
        } => handle_update_command(
            &id,
            &status,
            resolution.as_deref(),
            assign.as_deref(),
            &ctx,
            formatter,
        ),
        Commands::Assign { id, technician } => {
            handle_assign_command(&id, &technician, &ctx, formatter)
        },
        Commands::Resolve { id, resolution } => {
            handle_resolve_command(&id, resolution.as_deref(), &ctx, formatter)
        },
        Commands::Delete { id } => handle_delete_command(&id, &ctx, formatter),
        Commands::Stats {
            departments,
            categories,
            trends,
        } => handle_stats_command(departments, categories, trends, &ctx, formatter),
        Commands::Admin { username, password } => {
            handle_admin_command(&username, password, &ctx, formatter)
        },
        Commands::Category(command) => handle_category_command(command, &ctx, formatter),
        Commands::Technician(command) => handle_technician_command(command, &ctx, formatter),
        Commands::Settings(command) => handle_settings_command(command, &ctx, formatter),
        Commands::Backup(command) => handle_backup_command(command, &ctx, formatter),
        Commands::Export {
            format,
            data,
            output,
        } => handle_export_command(format, data, output.as_deref(), &ctx, formatter),
        Commands::Import { file } => handle_import_command(&file, &ctx, formatter),
    }
}

/// Print an error with its suggestions, as JSON in `--json` mode
fn handle_error(error: &HelpdeskError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() && !formatter.is_json() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "error_type": format!("{error:?}"),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        }));
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
