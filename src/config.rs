//! Relation settings.
//!
//! Applications load [`RelationSettings`] from the `[relations]` section of
//! `config/config.toml` or from `RELATA__`-prefixed environment variables using
//! `RelationSettings::load()`.

use crate::query::SqlDialect;
use crate::relation::{RelationDef, DEFAULT_SUBQUERY_ALIAS};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

const CONFIG_FILE: &str = "config/config.toml";
const ENV_PREFIX: &str = "RELATA";
const SECTION: &str = "relations";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationSettings {
    /// Dialect used to render relation statements
    #[serde(default)]
    pub dialect: SqlDialect,
    /// Alias of the foreign table inside count subqueries
    #[serde(default = "default_subquery_alias")]
    pub subquery_alias: String,
}

fn default_subquery_alias() -> String {
    DEFAULT_SUBQUERY_ALIAS.to_string()
}

impl Default for RelationSettings {
    fn default() -> Self {
        Self {
            dialect: SqlDialect::default(),
            subquery_alias: default_subquery_alias(),
        }
    }
}

impl RelationSettings {
    /// Load settings from `config/config.toml`, falling back to env vars.
    ///
    /// A missing `[relations]` section yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // A file that exists but cannot be read or parsed is not fatal
                if std::path::Path::new(CONFIG_FILE).exists() {
                    log::warn!("failed to load {CONFIG_FILE}, falling back to env: {err}");
                }
                Config::builder()
                    .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        Self::from_config(&settings)
    }

    /// Parse settings from an inline TOML document
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?;
        Self::from_config(&settings)
    }

    fn from_config(settings: &Config) -> Result<Self, ConfigError> {
        match settings.get::<RelationSettings>(SECTION) {
            Ok(parsed) => Ok(parsed),
            Err(ConfigError::NotFound(_)) => {
                log::debug!("no [{SECTION}] configuration, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Message(format!(
                "Relation configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }

    /// Stamp the configured subquery alias onto a relation definition
    pub fn apply(&self, def: RelationDef) -> RelationDef {
        def.with_subquery_alias(&self.subquery_alias)
    }
}
