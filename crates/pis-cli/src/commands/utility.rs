use pis_core::entities::NewUtility;
use pis_core::enums::EntityType;
use pis_db::updates::utility::UtilityUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::mutation::{finish, finish_delete};
use crate::commands::shared::parse::{parse_id, parse_json};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pis utility`.
///
/// `get` and `list` embed the contacts linked to each utility.
pub async fn handle(
    action: &EntityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    match action {
        EntityCommands::Create { json } => {
            let new: NewUtility = parse_json(json, "utility")?;
            finish(uow.create_utility(new).await?, flags)
        }
        EntityCommands::Update { id, json } => {
            let id = parse_id(id, "utility")?;
            let update: UtilityUpdate = parse_json(json, "utility")?;
            finish(uow.update_utility(id, update).await?, flags)
        }
        EntityCommands::Delete { id: raw } => {
            let id = parse_id(raw, "utility")?;
            let mutation = uow.delete_utility(id).await?;
            finish_delete(EntityType::Utility, raw, &mutation, flags)
        }
        EntityCommands::Get { id } => {
            let id = parse_id(id, "utility")?;
            output(&uow.get_utility_with_contacts(id).await?, flags.format)
        }
        EntityCommands::List { property } => {
            output(&uow.list_utilities_with_contacts(property.as_deref()).await?, flags.format)
        }
    }
}
