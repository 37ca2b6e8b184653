use pis_core::entities::NewSuite;
use pis_core::enums::EntityType;
use pis_db::updates::suite::SuiteUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::mutation::{finish, finish_delete};
use crate::commands::shared::parse::{parse_id, parse_json};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pis suite`.
///
/// `get` and `list` embed the contacts linked to each suite.
pub async fn handle(
    action: &EntityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    match action {
        EntityCommands::Create { json } => {
            let new: NewSuite = parse_json(json, "suite")?;
            finish(uow.create_suite(new).await?, flags)
        }
        EntityCommands::Update { id, json } => {
            let id = parse_id(id, "suite")?;
            let update: SuiteUpdate = parse_json(json, "suite")?;
            finish(uow.update_suite(id, update).await?, flags)
        }
        EntityCommands::Delete { id: raw } => {
            let id = parse_id(raw, "suite")?;
            let mutation = uow.delete_suite(id).await?;
            finish_delete(EntityType::Suite, raw, &mutation, flags)
        }
        EntityCommands::Get { id } => {
            let id = parse_id(id, "suite")?;
            output(&uow.get_suite_with_contacts(id).await?, flags.format)
        }
        EntityCommands::List { property } => {
            output(&uow.list_suites_with_contacts(property.as_deref()).await?, flags.format)
        }
    }
}
