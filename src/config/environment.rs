//! Runtime environment descriptor.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::schema::EnvironmentConfig;

/// Deployment environment name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentName {
    #[default]
    Development,
    Staging,
    Production,
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnvironmentName::Development => "development",
            EnvironmentName::Staging => "staging",
            EnvironmentName::Production => "production",
        };
        f.write_str(name)
    }
}

/// Environment passed unchanged to every module's `configure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub name: EnvironmentName,
    pub application_name: String,
    pub content_root: PathBuf,
}

impl Environment {
    pub fn new(name: EnvironmentName, application_name: impl Into<String>) -> Self {
        Self {
            name,
            application_name: application_name.into(),
            content_root: PathBuf::from("."),
        }
    }

    pub fn is_development(&self) -> bool {
        self.name == EnvironmentName::Development
    }

    pub fn is_staging(&self) -> bool {
        self.name == EnvironmentName::Staging
    }

    pub fn is_production(&self) -> bool {
        self.name == EnvironmentName::Production
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::from(&EnvironmentConfig::default())
    }
}

impl From<&EnvironmentConfig> for Environment {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            name: config.name,
            application_name: config.application_name.clone(),
            content_root: PathBuf::from(&config.content_root),
        }
    }
}
