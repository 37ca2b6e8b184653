use pis_core::entities::NewService;
use pis_core::enums::EntityType;
use pis_db::updates::service::ServiceUpdate;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::mutation::{finish, finish_delete};
use crate::commands::shared::parse::{parse_id, parse_json};
use crate::context::AppContext;
use crate::output::output;

/// Handle `pis service`.
///
/// `get` and `list` embed the contacts linked to each service.
pub async fn handle(
    action: &EntityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    match action {
        EntityCommands::Create { json } => {
            let new: NewService = parse_json(json, "service")?;
            finish(uow.create_service(new).await?, flags)
        }
        EntityCommands::Update { id, json } => {
            let id = parse_id(id, "service")?;
            let update: ServiceUpdate = parse_json(json, "service")?;
            finish(uow.update_service(id, update).await?, flags)
        }
        EntityCommands::Delete { id: raw } => {
            let id = parse_id(raw, "service")?;
            let mutation = uow.delete_service(id).await?;
            finish_delete(EntityType::Service, raw, &mutation, flags)
        }
        EntityCommands::Get { id } => {
            let id = parse_id(id, "service")?;
            output(&uow.get_service_with_contacts(id).await?, flags.format)
        }
        EntityCommands::List { property } => {
            output(&uow.list_services_with_contacts(property.as_deref()).await?, flags.format)
        }
    }
}
