//! Handlers for admin login and settings management

use super::common::HandlerContext;
use crate::cli::{NameCommands, OutputFormatter, SettingsCommands};
use crate::error::{HelpdeskError, Result};
use dialoguer::{Password, theme::ColorfulTheme};

/// Handler for the `admin` command
///
/// Prompts for the password when it was not given on the command line.
///
/// # Errors
///
/// Returns [`HelpdeskError::InvalidCredentials`] if the username and
/// password do not match an admin account.
pub fn handle_admin_command(
    username: &str,
    password: Option<String>,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Password for {username}"))
            .interact()?,
    };

    let admin = ctx
        .service()
        .admin_login(username, &password)?
        .ok_or(HelpdeskError::InvalidCredentials)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "username": admin.username,
            "name": admin.name,
            "role": admin.role,
            "last_login": admin.last_login,
        }))?;
    } else {
        output.success(&format!("Welcome, {} ({})", admin.name, admin.role));
    }
    Ok(())
}

/// Handler for the `category` subcommands
pub fn handle_category_command(
    command: NameCommands,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let service = ctx.service();
    match command {
        NameCommands::Add { name } => {
            let name = service.add_category(&name)?;
            report_change("category", &name, true, output)
        },
        NameCommands::Remove { name } => {
            let removed = service.remove_category(&name)?;
            report_change("category", &name, removed, output)
        },
        NameCommands::List => print_names("Categories", &service.settings()?.categories, output),
    }
}

/// Handler for the `technician` subcommands
pub fn handle_technician_command(
    command: NameCommands,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let service = ctx.service();
    match command {
        NameCommands::Add { name } => {
            let name = service.add_technician(&name)?;
            report_change("technician", &name, true, output)
        },
        NameCommands::Remove { name } => {
            let removed = service.remove_technician(&name)?;
            report_change("technician", &name, removed, output)
        },
        NameCommands::List => {
            print_names("Technicians", &service.settings()?.technicians, output)
        },
    }
}

/// Handler for the `settings` subcommands
pub fn handle_settings_command(
    command: SettingsCommands,
    ctx: &HandlerContext,
    output: &OutputFormatter,
) -> Result<()> {
    let settings = match command {
        SettingsCommands::Show => ctx.service().settings()?,
        SettingsCommands::Set {
            system_name,
            auto_close_days,
        } => {
            if system_name.is_none() && auto_close_days.is_none() {
                return Err(HelpdeskError::InvalidInput(
                    "Nothing to change. Pass --system-name or --auto-close-days".to_string(),
                ));
            }
            let settings = ctx
                .service()
                .update_settings(system_name.as_deref(), auto_close_days)?;
            if !output.is_json() {
                output.success("Settings updated");
            }
            settings
        },
    };

    if output.is_json() {
        return output.print_json(&settings);
    }

    output.info(&format!("System name:     {}", settings.system_name));
    output.info(&format!("Auto-close days: {}", settings.auto_close_days));
    output.info(&format!("Categories:      {}", settings.categories.join(", ")));
    output.info(&format!("Technicians:     {}", settings.technicians.join(", ")));
    output.info(&format!("Departments:     {}", settings.departments.join(", ")));
    output.info(&format!("Locations:       {}", settings.locations.join(", ")));
    let notifications = &settings.notification_settings;
    output.info(&format!(
        "Notifications:   email={} sms={} urgent_alerts={} daily_reports={}",
        notifications.email,
        notifications.sms,
        notifications.urgent_alerts,
        notifications.daily_reports
    ));
    Ok(())
}

fn report_change(kind: &str, name: &str, changed: bool, output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        return output.print_json(&serde_json::json!({
            "kind": kind,
            "name": name,
            "changed": changed,
        }));
    }
    if changed {
        output.success(&format!("Updated {kind} '{name}'"));
    } else {
        output.warning(&format!("No {kind} named '{name}'"));
    }
    Ok(())
}

fn print_names(title: &str, names: &[String], output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        return output.print_json(names);
    }
    output.info(&format!("{title}:"));
    for name in names {
        output.info(&format!("  - {name}"));
    }
    Ok(())
}
