use clap::{Args, Subcommand};
use pis_core::enums::OwnerType;

use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::parse::parse_enum;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Properties (keyed by yardi code).
    Property {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Suites.
    Suite {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Vendor services.
    Service {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Utility accounts.
    Utility {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Building codes.
    Code {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Permits.
    Permit {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Contacts.
    Contact {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Property photos (not audited).
    Photo {
        #[command(subcommand)]
        action: EntityCommands,
    },
    /// Link a contact to a suite, service, or utility.
    Link(LinkArgs),
    /// Remove links between a contact and an owner.
    Unlink(LinkArgs),
    /// View the edit history.
    History(HistoryArgs),
}

/// Arguments for `pis link` and `pis unlink`.
#[derive(Clone, Debug, Args)]
pub struct LinkArgs {
    /// suite, service, or utility
    #[arg(value_parser = parse_owner_type)]
    pub owner_type: OwnerType,
    pub owner_id: i64,
    pub contact_id: i64,
}

/// Arguments for `pis history`.
#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
    #[arg(long)]
    pub edited_by: Option<String>,
    /// Max rows (defaults to general.default_limit)
    #[arg(long)]
    pub limit: Option<u32>,
}

fn parse_owner_type(raw: &str) -> Result<OwnerType, String> {
    parse_enum(raw, "owner type").map_err(|error| error.to_string())
}
