use anyhow::bail;
use pis_core::entities::{Contact, ContactLink, NewContact};
use pis_core::enums::EntityType;
use pis_db::updates::contact::ContactUpdate;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EntityCommands;
use crate::commands::shared::mutation::{finish, finish_delete};
use crate::commands::shared::parse::{parse_id, parse_json};
use crate::context::AppContext;
use crate::output::output;

/// A contact with the owners it is linked to.
#[derive(Debug, Serialize)]
struct ContactView {
    #[serde(flatten)]
    contact: Contact,
    links: Vec<ContactLink>,
}

/// Handle `pis contact`.
///
/// `create` accepts optional `suite_id`, `service_id` and `utility_id` keys
/// and links the new contact to each of them.
pub async fn handle(
    action: &EntityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    match action {
        EntityCommands::Create { json } => {
            let new: NewContact = parse_json(json, "contact")?;
            finish(uow.create_contact(new).await?, flags)
        }
        EntityCommands::Update { id, json } => {
            let id = parse_id(id, "contact")?;
            let update: ContactUpdate = parse_json(json, "contact")?;
            finish(uow.update_contact(id, update).await?, flags)
        }
        EntityCommands::Delete { id: raw } => {
            let id = parse_id(raw, "contact")?;
            let mutation = uow.delete_contact(id).await?;
            finish_delete(EntityType::Contact, raw, &mutation, flags)
        }
        EntityCommands::Get { id } => {
            let id = parse_id(id, "contact")?;
            let view = ContactView {
                contact: uow.get_contact(id).await?,
                links: uow.links_for_contact(id).await?,
            };
            output(&view, flags.format)
        }
        EntityCommands::List { property: Some(_) } => {
            bail!("contacts are not owned by a property; `pis contact list` takes no --property")
        }
        EntityCommands::List { property: None } => output(&uow.list_contacts().await?, flags.format),
    }
}
