use pis_core::entities::NewPermit;
use pis_core::enums::EntityType;
use pis_db::updates::permit::PermitUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::mutation::{finish, finish_delete};
use crate::commands::shared::parse::{parse_id, parse_json};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pis permit`.
///
/// Listings are ordered by municipality.
pub async fn handle(
    action: &EntityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    match action {
        EntityCommands::Create { json } => {
            let new: NewPermit = parse_json(json, "permit")?;
            finish(uow.create_permit(new).await?, flags)
        }
        EntityCommands::Update { id, json } => {
            let id = parse_id(id, "permit")?;
            let update: PermitUpdate = parse_json(json, "permit")?;
            finish(uow.update_permit(id, update).await?, flags)
        }
        EntityCommands::Delete { id: raw } => {
            let id = parse_id(raw, "permit")?;
            let mutation = uow.delete_permit(id).await?;
            finish_delete(EntityType::Permit, raw, &mutation, flags)
        }
        EntityCommands::Get { id } => {
            let id = parse_id(id, "permit")?;
            output(&uow.get_permit(id).await?, flags.format)
        }
        EntityCommands::List { property } => {
            output(&uow.list_permits(property.as_deref()).await?, flags.format)
        }
    }
}
