//! Report type definitions.

use crate::scoring::ScoreResult;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable terminal summary
    #[default]
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Options shared by every reporter.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Include the weighted contribution of each sub-score
    pub show_breakdown: bool,
}

/// A scored website, labelled by the input it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredSite {
    /// Input file name or site URL
    pub label: String,
    #[serde(flatten)]
    pub result: ScoreResult,
}

impl ScoredSite {
    pub fn new(label: impl Into<String>, result: ScoreResult) -> Self {
        Self {
            label: label.into(),
            result,
        }
    }
}
