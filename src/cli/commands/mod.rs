//! One module per subcommand.  Each exposes an `execute` function.

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod session;
