use campusvault::cli::{Cli, Commands};
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    campusvault::cli::init_tracing();

    let result = match cli.command {
        Commands::Session => campusvault::cli::commands::session::execute(&cli),
        Commands::Audit { last } => audit(&cli, last),
        Commands::Completions { shell } => {
            campusvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        campusvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(feature = "audit-log")]
fn audit(cli: &Cli, last: usize) -> campusvault::errors::Result<()> {
    campusvault::cli::commands::audit_cmd::execute(cli, last)
}

#[cfg(not(feature = "audit-log"))]
fn audit(_cli: &Cli, _last: usize) -> campusvault::errors::Result<()> {
    Err(campusvault::errors::CampusVaultError::AuditError(
        "built without the `audit-log` feature".into(),
    ))
}
