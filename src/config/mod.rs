//! Configuration module for beepulse.
//!
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.beepulse.yaml` file in your project root or `~/.config/beepulse/`:
//!
//! ```yaml
//! output:
//!   format: json
//! behavior:
//!   min_score: 70
//! providers:
//!   required_headers:
//!     - Content-Security-Policy
//!     - Strict-Transport-Security
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    default_cdn_patterns, default_required_headers, DEFAULT_CDN_MARKERS, DEFAULT_REQUIRED_HEADERS,
};
pub use file::{
    default_config_path, discover_config_file, CONFIG_FILE_NAMES, generate_example_config, load_config_file,
    load_or_default, ConfigFileError,
};
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, CdnPattern, OutputConfig, ProviderConfig,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it for validation and autocompletion of `.beepulse.yaml`.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_mentions_sections() {
        let schema = generate_json_schema().expect("schema");
        assert!(schema.contains("\"behavior\""));
        assert!(schema.contains("\"providers\""));
        assert!(schema.contains("CdnPattern"));
    }
}
