use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `pis` binary.
#[derive(Debug, Parser)]
#[command(name = "pis", version, about = "Property information system")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Name recorded as the editor in the edit history
    #[arg(short, long, global = true)]
    pub actor: Option<String>,

    /// Database file (overrides database.path)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            actor: self.actor.clone(),
            database: self.database.clone(),
            quiet: self.quiet,
        }
    }
}
