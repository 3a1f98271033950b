//! Failure report settings.

use serde::{Deserialize, Serialize};

/// Controls how much of the exchange is shown alongside a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Attach a dump of the exchange to reported failures.
    pub dump_on_failure: bool,
    /// Maximum number of body bytes shown in a dump.
    pub body_preview_limit: usize,
    /// Include the request line and headers in a dump.
    pub include_request: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dump_on_failure: true,
            body_preview_limit: 1024,
            include_request: true,
        }
    }
}

impl ReportSettings {
    /// Settings that never attach a dump.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            dump_on_failure: false,
            ..Self::default()
        }
    }
}
