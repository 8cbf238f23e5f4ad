//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ScoredSite};
use crate::scoring::SCORING_ENGINE_VERSION;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_score_report(
        &self,
        sites: &[ScoredSite],
        _config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonScoreReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME"),
                    version: env!("CARGO_PKG_VERSION"),
                },
                scoring_engine_version: SCORING_ENGINE_VERSION,
                generated_at: Utc::now().to_rfc3339(),
            },
            sites,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        rendered.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonScoreReport<'a> {
    metadata: JsonReportMetadata,
    sites: &'a [ScoredSite],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReportMetadata {
    tool: ToolInfo,
    scoring_engine_version: &'static str,
    generated_at: String,
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}
