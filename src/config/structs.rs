//! Configuration struct definitions.

use crate::pattern::DEFAULT_PATTERN;
use serde::Deserialize;

/// Settings shared by every sink unless the sink overrides them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default sink threshold.
    pub level: String,
    /// Default `%`-pattern.
    pub pattern: String,
    /// Time zone for rendered timestamps (`local` or `utc`).
    pub time_zone: String,
    /// Threshold for the crate's own diagnostics on stderr.
    pub internal_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "trace".to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
            time_zone: "local".to_string(),
            internal_level: "warn".to_string(),
        }
    }
}

/// One `[[sinks]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Target stream (`console` for stdout, `stderr`).
    pub kind: String,
    /// Overrides `general.level`.
    pub level: Option<String>,
    /// Overrides `general.pattern`.
    pub pattern: Option<String>,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: "console".to_string(),
            level: None,
            pattern: None,
        }
    }
}
