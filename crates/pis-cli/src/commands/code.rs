use pis_core::entities::NewCode;
use pis_core::enums::EntityType;
use pis_db::updates::code::CodeUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::mutation::{finish, finish_delete};
use crate::commands::shared::parse::{parse_id, parse_json};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pis code`.
pub async fn handle(
    action: &EntityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    match action {
        EntityCommands::Create { json } => {
            let new: NewCode = parse_json(json, "code")?;
            finish(uow.create_code(new).await?, flags)
        }
        EntityCommands::Update { id, json } => {
            let id = parse_id(id, "code")?;
            let update: CodeUpdate = parse_json(json, "code")?;
            finish(uow.update_code(id, update).await?, flags)
        }
        EntityCommands::Delete { id: raw } => {
            let id = parse_id(raw, "code")?;
            let mutation = uow.delete_code(id).await?;
            finish_delete(EntityType::Code, raw, &mutation, flags)
        }
        EntityCommands::Get { id } => {
            let id = parse_id(id, "code")?;
            output(&uow.get_code(id).await?, flags.format)
        }
        EntityCommands::List { property } => {
            output(&uow.list_codes(property.as_deref()).await?, flags.format)
        }
    }
}
