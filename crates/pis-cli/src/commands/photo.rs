use anyhow::bail;
use pis_core::entities::NewPropertyPhoto;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::parse::{parse_id, parse_json};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, serde::Serialize)]
struct PhotoDeleted {
    photo_id: i64,
    deleted: bool,
}

/// Handle `pis photo`. Photos are never written to the edit history.
pub async fn handle(
    action: &EntityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    match action {
        EntityCommands::Create { json } => {
            let new: NewPropertyPhoto = parse_json(json, "photo")?;
            output(&uow.create_photo(new).await?, flags.format)
        }
        EntityCommands::Update { .. } => {
            bail!("photos cannot be updated; delete and re-create instead")
        }
        EntityCommands::Delete { id } => {
            let photo_id = parse_id(id, "photo")?;
            uow.delete_photo(photo_id).await?;
            output(
                &PhotoDeleted {
                    photo_id,
                    deleted: true,
                },
                flags.format,
            )
        }
        EntityCommands::Get { id } => {
            let id = parse_id(id, "photo")?;
            output(&uow.get_photo(id).await?, flags.format)
        }
        EntityCommands::List { property } => {
            output(&uow.list_photos(property.as_deref()).await?, flags.format)
        }
    }
}
