//! `campusvault audit` — display the audit log.
//!
//! Usage:
//!   campusvault audit               # show last 50 entries
//!   campusvault audit --last 20     # show last 20

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::{AuditEntry, AuditLog};
use crate::cli::{load_settings, output, Cli};
use crate::errors::{CampusVaultError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize) -> Result<()> {
    let (cwd, settings) = load_settings(cli)?;
    let data_dir = settings.data_path(&cwd);

    if !AuditLog::db_path(&data_dir).exists() {
        output::info("No audit entries found.");
        output::tip("Run `campusvault session` to start recording.");
        return Ok(());
    }

    let audit = AuditLog::open(&data_dir)
        .ok_or_else(|| CampusVaultError::AuditError("failed to open audit database".into()))?;

    let entries = audit.query(last)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Print audit entries in a formatted table.
pub fn print_audit_table(entries: &[AuditEntry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "User", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            colorize_operation(&entry.operation),
            entry.username.as_deref().unwrap_or("-").to_string(),
            entry.details.as_deref().unwrap_or("-").to_string(),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
fn colorize_operation(op: &str) -> String {
    match op {
        "sign-up" | "log-in" => style(op).green().to_string(),
        "seal" => style(op).blue().to_string(),
        "open" => style(op).cyan().to_string(),
        "open-failed" | "log-in-failed" => style(op).red().to_string(),
        _ => op.to_string(),
    }
}
