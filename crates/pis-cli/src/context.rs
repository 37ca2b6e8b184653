use anyhow::Context;
use pis_config::PisConfig;
use pis_db::PisDb;
use pis_db::service::UnitOfWork;

use crate::bootstrap;
use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub db: PisDb,
    pub actor: String,
    pub default_limit: u32,
}

impl AppContext {
    /// Open the configured database and resolve the acting user.
    pub async fn init(config: &PisConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let path = bootstrap::database_path(flags, config);
        let db = PisDb::open_local(&path)
            .await
            .with_context(|| format!("failed to open database at {path}"))?;

        Ok(Self {
            db,
            actor: bootstrap::resolve_actor(flags, config),
            default_limit: config.general.default_limit,
        })
    }

    /// One unit of work per command invocation.
    pub async fn unit_of_work(&self) -> anyhow::Result<UnitOfWork> {
        self.db
            .unit_of_work(self.actor.clone())
            .await
            .context("failed to start unit of work")
    }
}
