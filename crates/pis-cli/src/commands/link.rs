use serde::Serialize;
use tracing::debug;

use pis_core::enums::OwnerType;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LinkArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct Unlinked {
    owner_type: OwnerType,
    owner_id: i64,
    contact_id: i64,
    removed: u64,
}

/// Handle `pis link`. Linking the same pair twice adds a second link row.
pub async fn handle_link(
    args: &LinkArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    let link = uow
        .link(args.owner_type, args.owner_id, args.contact_id)
        .await?;
    debug!(link_id = link.link_id, owner_type = %link.owner_type, "contact linked");
    output(&link, flags.format)
}

/// Handle `pis unlink`.
pub async fn handle_unlink(
    args: &LinkArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uow = ctx.unit_of_work().await?;
    let removed = uow
        .unlink(args.owner_type, args.owner_id, args.contact_id)
        .await?;
    output(
        &Unlinked {
            owner_type: args.owner_type,
            owner_id: args.owner_id,
            contact_id: args.contact_id,
            removed,
        },
        flags.format,
    )
}
