use clap::Subcommand;

/// Operations shared by every entity command.
///
/// Ids are strings so properties can be addressed by yardi code; the other
/// entities parse them as integers.
#[derive(Clone, Debug, Subcommand)]
pub enum EntityCommands {
    /// Create from a JSON object.
    Create {
        #[arg(long)]
        json: String,
    },
    /// Update whitelisted fields from a JSON object.
    Update {
        id: String,
        #[arg(long)]
        json: String,
    },
    /// Delete by id.
    Delete { id: String },
    /// Get by id.
    Get { id: String },
    /// List, optionally for one property.
    List {
        #[arg(long)]
        property: Option<String>,
    },
}
