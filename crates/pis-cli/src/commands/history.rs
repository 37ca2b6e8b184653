use pis_core::enums::{AuditAction, EntityType};
use pis_db::repos::history::HistoryFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pis history`.
pub async fn handle(
    args: &HistoryArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = build_filter(args, ctx.default_limit)?;
    let uow = ctx.unit_of_work().await?;
    let entries = uow.history(&filter).await?;
    output(&entries, flags.format)
}

fn build_filter(args: &HistoryArgs, default_limit: u32) -> anyhow::Result<HistoryFilter> {
    Ok(HistoryFilter {
        entity_type: args
            .entity_type
            .as_deref()
            .map(|value| parse_enum::<EntityType>(value, "entity-type"))
            .transpose()?,
        action: args
            .action
            .as_deref()
            .map(|value| parse_enum::<AuditAction>(value, "action"))
            .transpose()?,
        edited_by: args.edited_by.clone(),
        limit: Some(effective_limit(args.limit, default_limit)),
    })
}

#[cfg(test)]
mod tests {
    use pis_core::enums::{AuditAction, EntityType};

    use super::build_filter;
    use crate::cli::root_commands::HistoryArgs;

    fn args() -> HistoryArgs {
        HistoryArgs {
            entity_type: None,
            action: None,
            edited_by: None,
            limit: None,
        }
    }

    #[test]
    fn configured_limit_applies_by_default() {
        let filter = build_filter(&args(), 100).expect("filter should build");
        assert_eq!(filter.limit, Some(100));
        assert!(filter.entity_type.is_none());
    }

    #[test]
    fn parses_entity_type_and_action() {
        let filter = build_filter(
            &HistoryArgs {
                entity_type: Some("suite".into()),
                action: Some("edit".into()),
                limit: Some(3),
                ..args()
            },
            100,
        )
        .expect("filter should build");
        assert_eq!(filter.entity_type, Some(EntityType::Suite));
        assert_eq!(filter.action, Some(AuditAction::Edit));
        assert_eq!(filter.limit, Some(3));
    }

    #[test]
    fn photo_is_not_a_history_entity_type() {
        let err = build_filter(
            &HistoryArgs {
                entity_type: Some("photo".into()),
                ..args()
            },
            100,
        )
        .expect_err("photo should be rejected");
        assert!(err.to_string().contains("invalid entity-type 'photo'"));
    }
}
