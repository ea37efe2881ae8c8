//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::Result;

/// CampusVault CLI: campus directory with a passphrase-sealed message slot.
#[derive(Parser)]
#[command(
    name = "campusvault",
    about = "Campus directory with a passphrase-sealed secret message",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory for local state (overrides .campusvault.toml)
    #[arg(long, global = true, env = "CAMPUSVAULT_DATA_DIR")]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Start an interactive session (sign up, find friends, send/view a message)
    Session,

    /// View the audit log of session operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the working directory and apply CLI overrides.
///
/// Returns the working directory alongside the settings.
pub fn load_settings(cli: &Cli) -> Result<(PathBuf, Settings)> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }
    Ok((cwd, settings))
}

/// Install the stderr `tracing` subscriber.
///
/// The filter comes from `CAMPUSVAULT_LOG` (e.g. `debug`,
/// `campusvault=trace`) and defaults to `warn`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("CAMPUSVAULT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn audit_defaults_to_fifty_entries() {
        let cli = Cli::try_parse_from(["campusvault", "audit"]).unwrap();
        assert!(matches!(cli.command, Commands::Audit { last: 50 }));
    }

    #[test]
    fn completions_takes_a_known_shell() {
        let cli = Cli::try_parse_from(["campusvault", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions {
                shell: clap_complete::Shell::Zsh
            }
        ));
        assert!(Cli::try_parse_from(["campusvault", "completions", "csh"]).is_err());
    }

    #[test]
    fn data_dir_is_global() {
        let cli =
            Cli::try_parse_from(["campusvault", "session", "--data-dir", "/tmp/cv"]).unwrap();
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/cv"));
    }
}
