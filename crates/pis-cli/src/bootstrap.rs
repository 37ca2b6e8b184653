use pis_config::PisConfig;

use crate::cli::GlobalFlags;

/// Load `.env` and the layered config files.
pub fn load_config() -> anyhow::Result<PisConfig> {
    PisConfig::load_with_dotenv().map_err(anyhow::Error::from)
}

/// Database path with precedence: `--database` flag -> config.
#[must_use]
pub fn database_path(flags: &GlobalFlags, config: &PisConfig) -> String {
    flags
        .database
        .clone()
        .unwrap_or_else(|| config.database.path.clone())
}

/// Actor recorded in the edit history.
///
/// Precedence: `--actor` flag -> `general.actor` -> `$USER` -> `"unknown"`.
#[must_use]
pub fn resolve_actor(flags: &GlobalFlags, config: &PisConfig) -> String {
    resolve_actor_from(flags.actor.as_deref(), config, std::env::var("USER").ok())
}

fn resolve_actor_from(flag: Option<&str>, config: &PisConfig, user: Option<String>) -> String {
    flag.map(str::trim)
        .filter(|actor| !actor.is_empty())
        .or_else(|| config.general.actor())
        .map(str::to_string)
        .or_else(|| user.filter(|user| !user.trim().is_empty()))
        .unwrap_or_else(|| String::from("unknown"))
}

#[cfg(test)]
mod tests {
    use pis_config::PisConfig;
    use pretty_assertions::assert_eq;

    use super::resolve_actor_from;

    fn config_with_actor(actor: &str) -> PisConfig {
        let mut config = PisConfig::default();
        config.general.actor = actor.to_string();
        config
    }

    #[test]
    fn flag_takes_precedence() {
        let config = config_with_actor("from-config");
        let actor = resolve_actor_from(Some("alice"), &config, Some("shell".into()));
        assert_eq!(actor, "alice");
    }

    #[test]
    fn config_used_when_flag_missing() {
        let config = config_with_actor("from-config");
        let actor = resolve_actor_from(None, &config, Some("shell".into()));
        assert_eq!(actor, "from-config");
    }

    #[test]
    fn blank_values_fall_through_to_user() {
        let config = config_with_actor("  ");
        let actor = resolve_actor_from(Some(""), &config, Some("shell".into()));
        assert_eq!(actor, "shell");
    }

    #[test]
    fn unknown_when_nothing_set() {
        let actor = resolve_actor_from(None, &PisConfig::default(), None);
        assert_eq!(actor, "unknown");
    }
}
