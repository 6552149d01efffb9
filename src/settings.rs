use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment prefix for overrides: CANCAN__CACHE=true, etc.
pub const ENV_PREFIX: &str = "CANCAN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Memoize decisions for the lifetime of each ability.
    #[serde(default)]
    pub cache: bool,
    /// Send every decision to the decision log.
    #[serde(default)]
    pub log: bool,
    /// Name of the scope field holding the current actor.
    #[serde(default = "default_context_user_method")]
    pub context_user_method: String,
}

fn default_context_user_method() -> String {
    "user".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache: false,
            log: false,
            context_user_method: default_context_user_method(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Defaults, then the file at `path` if it exists, then `<prefix>__*` env vars.
    pub fn load_with_prefix(path: &str, prefix: &str) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = config::Config::builder()
            .set_default("cache", defaults.cache)
            .into_diagnostic()?
            .set_default("log", defaults.log)
            .into_diagnostic()?
            .set_default("context_user_method", defaults.context_user_method)
            .into_diagnostic()?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(config::Environment::with_prefix(prefix).separator("__"));

        let cfg = builder.build().into_diagnostic()?;
        let s: Settings = cfg.try_deserialize().into_diagnostic()?;
        tracing::debug!(?s, "Loaded ability settings");
        Ok(s)
    }
}
