//! Engine configuration.
//!
//! A [`PermalinkConfig`] selects the [`Profile`] and the [`OriginTables`]. It
//! can be built in code or deserialized from JSON or YAML; every field falls
//! back to the built-in default.
//!
//! ```yaml
//! profile: strict
//! tables:
//!   countryToLanguage:
//!     ca: fr
//! ```

use std::sync::Arc;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::PermalinkEngine;
use crate::profile::Profile;
use crate::tables::OriginTables;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermalinkConfig {
    pub profile: Profile,
    pub tables: OriginTables,
}

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("invalid JSON configuration")]
    #[diagnostic(code(permalink::config::json))]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML configuration")]
    #[diagnostic(code(permalink::config::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid entry `{entry}` in {table}: {reason}")]
    #[diagnostic(code(permalink::config::table))]
    InvalidTable {
        table: &'static str,
        entry: String,
        reason: String,
    },
}

impl PermalinkConfig {
    pub fn new(profile: Profile, tables: OriginTables) -> Self {
        Self { profile, tables }
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Validate the tables and build an engine that owns them.
    pub fn into_engine(self) -> Result<PermalinkEngine, ConfigError> {
        let tables = self.tables.normalized();
        tables.validate()?;
        Ok(PermalinkEngine::with_tables(self.profile, Arc::new(tables)))
    }
}
