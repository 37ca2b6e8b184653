//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of history rows shown.
const fn default_limit() -> u32 {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Actor recorded as `edited_by` when no `--actor` flag is given.
    #[serde(default)]
    pub actor: String,

    /// Default row limit for history queries.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            actor: String::new(),
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    /// The configured actor, if one was set.
    #[must_use]
    pub fn actor(&self) -> Option<&str> {
        let actor = self.actor.trim();
        (!actor.is_empty()).then_some(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.actor.is_empty());
        assert_eq!(config.actor(), None);
        assert_eq!(config.default_limit, 100);
    }

    #[test]
    fn blank_actor_is_unset() {
        let config = GeneralConfig {
            actor: "   ".into(),
            ..Default::default()
        };
        assert_eq!(config.actor(), None);
    }
}
