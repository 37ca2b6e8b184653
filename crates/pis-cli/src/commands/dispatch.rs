use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Property { action } => commands::property::handle(&action, ctx, flags).await,
        Commands::Suite { action } => commands::suite::handle(&action, ctx, flags).await,
        Commands::Service { action } => commands::service::handle(&action, ctx, flags).await,
        Commands::Utility { action } => commands::utility::handle(&action, ctx, flags).await,
        Commands::Code { action } => commands::code::handle(&action, ctx, flags).await,
        Commands::Permit { action } => commands::permit::handle(&action, ctx, flags).await,
        Commands::Contact { action } => commands::contact::handle(&action, ctx, flags).await,
        Commands::Photo { action } => commands::photo::handle(&action, ctx, flags).await,
        Commands::Link(args) => commands::link::handle_link(&args, ctx, flags).await,
        Commands::Unlink(args) => commands::link::handle_unlink(&args, ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, ctx, flags).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pis_db::PisDb;
    use pis_db::repos::history::HistoryFilter;
    use pretty_assertions::assert_eq;

    use super::dispatch;
    use crate::cli::Cli;
    use crate::context::AppContext;

    async fn test_ctx(dir: &tempfile::TempDir) -> AppContext {
        let path = dir.path().join("pis.db");
        let db = PisDb::open_local(&path.to_string_lossy()).await.unwrap();
        AppContext {
            db,
            actor: String::from("cli-test"),
            default_limit: 100,
        }
    }

    async fn run(ctx: &AppContext, args: &[&str]) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(std::iter::once("pis").chain(args.iter().copied()))?;
        let flags = cli.global_flags();
        dispatch(cli.command, ctx, &flags).await
    }

    #[tokio::test]
    async fn suite_commands_write_history() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_ctx(&dir).await;

        run(&ctx, &["property", "create", "--json", r#"{"yardi":"P1"}"#])
            .await
            .unwrap();
        run(
            &ctx,
            &["suite", "create", "--json", r#"{"property_yardi":"P1","suite":"101"}"#],
        )
        .await
        .unwrap();
        run(&ctx, &["suite", "update", "1", "--json", r#"{"suite":"102"}"#])
            .await
            .unwrap();
        run(&ctx, &["-f", "table", "suite", "list", "--property", "P1"])
            .await
            .unwrap();

        let uow = ctx.unit_of_work().await.unwrap();
        assert_eq!(uow.get_suite(1).await.unwrap().suite.as_deref(), Some("102"));

        let history = uow.history(&HistoryFilter::default()).await.unwrap();
        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|row| row.edited_by == "cli-test"));
    }

    #[tokio::test]
    async fn link_then_suite_get_shows_contact() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_ctx(&dir).await;

        run(&ctx, &["property", "create", "--json", r#"{"yardi":"P1"}"#])
            .await
            .unwrap();
        run(
            &ctx,
            &["suite", "create", "--json", r#"{"property_yardi":"P1"}"#],
        )
        .await
        .unwrap();
        run(&ctx, &["contact", "create", "--json", r#"{"name":"Jane"}"#])
            .await
            .unwrap();
        run(&ctx, &["link", "suite", "1", "1"]).await.unwrap();
        run(&ctx, &["suite", "get", "1"]).await.unwrap();

        let uow = ctx.unit_of_work().await.unwrap();
        let suite = uow.get_suite_with_contacts(1).await.unwrap();
        assert_eq!(suite.contacts.len(), 1);
        assert_eq!(suite.contacts[0].name.as_deref(), Some("Jane"));
    }

    #[tokio::test]
    async fn unknown_update_key_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_ctx(&dir).await;

        run(&ctx, &["property", "create", "--json", r#"{"yardi":"P1"}"#])
            .await
            .unwrap();
        let err = run(&ctx, &["property", "update", "P1", "--json", r#"{"yardi":"P2"}"#])
            .await
            .expect_err("yardi is not updatable");
        assert!(format!("{err:#}").contains("yardi"));

        let uow = ctx.unit_of_work().await.unwrap();
        let history = uow.history(&HistoryFilter::default()).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn non_integer_suite_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_ctx(&dir).await;

        let err = run(&ctx, &["suite", "get", "abc"]).await.expect_err("should fail");
        assert!(err.to_string().contains("invalid suite id 'abc'"));
    }
}
