//! Suite files: named assertions declared in YAML or JSON.
//!
//! ```yaml
//! settings:
//!   body_preview_limit: 256
//! assertions:
//!   json_ok:
//!     type: content_type
//!     kind: json
//!   healthy:
//!     type: status
//!     expected: ok
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vouch_application::AssertionRegistry;
use vouch_domain::{AssertionSpec, ReportSettings};

use crate::assertions::compile;

/// Error type for suite file loading.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A set of named assertions plus report settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteFile {
    /// Report settings for runs using this suite.
    #[serde(default)]
    pub settings: ReportSettings,
    /// Assertions keyed by the name they are registered under.
    #[serde(default)]
    pub assertions: BTreeMap<String, AssertionSpec>,
}

impl SuiteFile {
    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or does not describe a suite.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SuiteError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or does not describe a suite.
    pub fn from_json_str(json: &str) -> Result<Self, SuiteError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a suite file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let suite = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        debug!(path = %path.display(), assertions = suite.assertions.len(), "Loaded suite file");
        Ok(suite)
    }

    /// Compiles every assertion and registers it under its name.
    ///
    /// Existing entries with the same name are replaced.
    pub fn register_into(&self, registry: &AssertionRegistry) {
        for (name, spec) in &self.assertions {
            debug!(name = %name, assertion = %spec.description(), "Registering assertion");
            registry.register_shared(name.clone(), compile(spec));
        }
    }
}
