//! Configuration file parsing for `gremlin-filters.toml`.
//!
//! ```toml
//! [filters]
//! comparison = "case-insensitive"
//! escape_strings = true
//!
//! [debug]
//! log_fragments = false
//! ```
//!
//! Values may reference environment variables as `${VAR_NAME}`.

use std::path::Path;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dialect::ComparisonMode;
use crate::error::{QueryError, QueryResult};
use crate::render::FilterFormatter;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("environment variable pattern is valid"));

/// Main configuration structure for `gremlin-filters.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GremlinConfig {
    /// Filter rendering settings.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,
}

impl GremlinConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            QueryError::configuration(format!("failed to read {}", path.display())).with_source(e)
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// The comparison mode is checked here, so a loaded config always
    /// yields a formatter.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> QueryResult<Self> {
        let expanded = expand_env_vars(content);

        let config: Self = toml::from_str(&expanded)
            .map_err(|e| QueryError::configuration(e.message().to_string()).with_source(e))?;
        config.comparison_mode()?;

        debug!(comparison = %config.filters.comparison, "Loaded filter configuration");
        Ok(config)
    }

    /// The configured comparison mode.
    pub fn comparison_mode(&self) -> QueryResult<ComparisonMode> {
        self.filters.comparison.parse()
    }

    /// Build a formatter from this configuration.
    pub fn formatter(&self) -> QueryResult<FilterFormatter> {
        Ok(FilterFormatter::new(self.comparison_mode()?)
            .escape_strings(self.filters.escape_strings)
            .log_fragments(self.debug.log_fragments))
    }
}

/// Filter rendering configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    /// Comparison mode name (`exact` or `case-insensitive`).
    #[serde(default = "default_comparison")]
    pub comparison: String,

    /// Escape quotes and backslashes in names and text values.
    #[serde(default = "default_true")]
    pub escape_strings: bool,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            comparison: default_comparison(),
            escape_strings: true,
        }
    }
}

fn default_comparison() -> String {
    ComparisonMode::Exact.as_str().to_string()
}

fn default_true() -> bool {
    true
}

/// Debug/logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Log every rendered fragment.
    #[serde(default)]
    pub log_fragments: bool,
}

/// Expand environment variables in the format `${VAR_NAME}`.
///
/// Unset variables are left untouched.
fn expand_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex_lite::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
