//! Configuration types for beepulse.

use super::defaults::{default_cdn_patterns, default_required_headers};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or
/// config files.
///
/// CLI arguments are layered over the file configuration with
/// [`AppConfig::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
    /// Provider payload interpretation
    pub providers: ProviderConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Fail (exit code 1) when any score is below this threshold.
    pub const fn min_score(mut self, min_score: Option<u8>) -> Self {
        self.config.behavior.min_score = min_score;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Include the weighted breakdown in summary output.
    pub const fn show_breakdown(mut self, show: bool) -> Self {
        self.config.behavior.show_breakdown = show;
        self
    }

    /// Replace the list of required security headers.
    pub fn required_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.providers.required_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the CDN detection patterns.
    pub fn cdn_patterns(mut self, patterns: Vec<CdnPattern>) -> Self {
        self.config.providers.cdn_patterns = patterns;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

// ============================================================================
// Behavior Configuration
// ============================================================================

/// Behavior flags for scoring runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any final score is below this value (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub min_score: Option<u8>,
    /// Suppress non-essential output
    pub quiet: bool,
    /// Show the weighted contribution of each sub-score
    pub show_breakdown: bool,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// How raw provider payloads are interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ProviderConfig {
    /// Security headers every site is expected to send
    pub required_headers: Vec<String>,
    /// CDN detection markers, checked in order against DNS answer data
    pub cdn_patterns: Vec<CdnPattern>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            required_headers: default_required_headers(),
            cdn_patterns: default_cdn_patterns(),
        }
    }
}

/// A CDN and the substrings that betray it in DNS answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CdnPattern {
    /// Name reported as the inferred CDN
    pub name: String,
    /// Case-insensitive substrings searched for in A/AAAA/CNAME data
    pub markers: Vec<String>,
}

impl CdnPattern {
    pub fn new<I, S>(name: impl Into<String>, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .output_format(ReportFormat::Json)
            .min_score(Some(70))
            .quiet(true)
            .required_headers(["Content-Security-Policy"])
            .build();

        assert_eq!(config.output.format, ReportFormat::Json);
        assert_eq!(config.behavior.min_score, Some(70));
        assert!(config.behavior.quiet);
        assert_eq!(config.providers.required_headers.len(), 1);
        assert!(!config.providers.cdn_patterns.is_empty());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("behavior:\n  min_score: 60\n").expect("parse");
        assert_eq!(config.behavior.min_score, Some(60));
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.providers, ProviderConfig::default());
    }
}
