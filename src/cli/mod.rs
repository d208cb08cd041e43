// CLI module
// Subcommands and dispatch for the gstc binary

mod commands;

pub use commands::{format_envelope, run_command, Command};
