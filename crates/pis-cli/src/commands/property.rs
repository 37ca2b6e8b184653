use anyhow::bail;
use pis_core::entities::NewProperty;
use pis_core::enums::EntityType;
use pis_db::updates::property::PropertyUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::mutation::{finish, finish_delete};
use crate::commands::shared::parse::parse_json;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pis property`.
///
/// `get` returns the property with every child record nested under it.
pub async fn handle(
    action: &EntityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    match action {
        EntityCommands::Create { json } => {
            let new: NewProperty = parse_json(json, "property")?;
            finish(uow.create_property(new).await?, flags)
        }
        EntityCommands::Update { id, json } => {
            let update: PropertyUpdate = parse_json(json, "property")?;
            finish(uow.update_property(id, update).await?, flags)
        }
        EntityCommands::Delete { id } => {
            let mutation = uow.delete_property(id).await?;
            finish_delete(EntityType::Property, id, &mutation, flags)
        }
        EntityCommands::Get { id } => output(&uow.get_property_detail(id).await?, flags.format),
        EntityCommands::List { property: Some(_) } => {
            bail!("--property does not apply to `pis property list`; use `pis property get <yardi>`")
        }
        EntityCommands::List { property: None } => {
            output(&uow.list_properties().await?, flags.format)
        }
    }
}
