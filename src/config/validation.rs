//! Configuration validation for beepulse.

use super::types::{AppConfig, BehaviorConfig, CdnPattern, OutputConfig, ProviderConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.providers.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_ref().and_then(|f| f.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(min) = self.min_score {
            if min > 100 {
                errors.push(ConfigError::new(
                    "behavior.min_score",
                    format!("Minimum score must be between 0 and 100, got {min}"),
                ));
            }
        }
        errors
    }
}

impl Validatable for ProviderConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (i, header) in self.required_headers.iter().enumerate() {
            if header.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("providers.required_headers[{i}]"),
                    "Header name must not be empty",
                ));
            }
        }

        for (i, pattern) in self.cdn_patterns.iter().enumerate() {
            errors.extend(validate_cdn_pattern(i, pattern));
        }

        errors
    }
}

fn validate_cdn_pattern(index: usize, pattern: &CdnPattern) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    let field = format!("providers.cdn_patterns[{index}]");

    if pattern.name.trim().is_empty() {
        errors.push(ConfigError::new(
            format!("{field}.name"),
            "CDN name must not be empty",
        ));
    }
    if !pattern.markers.iter().any(|m| !m.trim().is_empty()) {
        errors.push(ConfigError::new(
            format!("{field}.markers"),
            format!(
                "CDN '{}' needs at least one non-empty marker",
                pattern.name
            ),
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_min_score_range() {
        let valid = BehaviorConfig {
            min_score: Some(100),
            ..Default::default()
        };
        assert!(valid.is_valid());

        let invalid = BehaviorConfig {
            min_score: Some(101),
            ..Default::default()
        };
        let errors = invalid.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "behavior.min_score");
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/beepulse/report.json")),
            ..Default::default()
        };
        assert!(!config.is_valid());

        let bare = OutputConfig {
            file: Some(PathBuf::from("report.json")),
            ..Default::default()
        };
        assert!(bare.is_valid());
    }

    #[test]
    fn test_provider_validation() {
        let config = ProviderConfig {
            required_headers: vec!["Content-Security-Policy".to_string(), "  ".to_string()],
            cdn_patterns: vec![
                CdnPattern::new("", ["edge"]),
                CdnPattern::new("blank", [" "]),
            ],
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "providers.required_headers[1]".to_string(),
                "providers.cdn_patterns[0].name".to_string(),
                "providers.cdn_patterns[1].markers".to_string(),
            ]
        );
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::new("behavior.min_score", "too high");
        assert_eq!(err.to_string(), "behavior.min_score: too high");
    }
}
