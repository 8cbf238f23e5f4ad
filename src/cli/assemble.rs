//! Assemble command handler.
//!
//! Implements the `assemble` subcommand: turn raw provider payloads into a
//! measurement bundle, optionally scoring it right away.

use super::{ensure_valid, report_and_check};
use crate::config::AppConfig;
use crate::pipeline::{exit_codes, write_output, OutputTarget, PayloadPaths};
use crate::providers::assemble;
use crate::reports::ScoredSite;
use crate::scoring::PulseScorer;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Options for the assemble command
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    pub paths: PayloadPaths,
    /// Reference time for domain age; defaults to now
    pub as_of: Option<DateTime<Utc>>,
    /// Score the assembled bundle instead of printing it
    pub score: bool,
}

/// Run the assemble command, returning the desired exit code.
pub fn run_assemble(options: &AssembleOptions, config: &AppConfig) -> Result<i32> {
    ensure_valid(config)?;

    let payloads = options.paths.load()?;
    let as_of = options.as_of.unwrap_or_else(Utc::now);
    let bundle = assemble(&payloads, &config.providers, as_of)
        .context("Failed to assemble measurement bundle")?;

    if !config.behavior.quiet {
        tracing::info!(
            "Assembled bundle with {} missing signal(s)",
            bundle.missing_data_flags.len()
        );
    }

    if options.score {
        let label = options.paths.page_speed.display().to_string();
        let site = ScoredSite::new(label, PulseScorer::score(&bundle));
        return report_and_check(&[site], config);
    }

    let json = serde_json::to_string_pretty(&bundle).context("Failed to serialize bundle")?;
    let target = OutputTarget::from_option(config.output.file.clone());
    write_output(&json, &target, config.behavior.quiet)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MeasurementBundle, MissingSignal};
    use std::path::PathBuf;
    use tempfile::TempDir;

    const PSI: &str = r#"{"lighthouseResult": {"categories": {
        "performance": {"score": 0.5},
        "seo": {"score": 0.9},
        "accessibility": {"score": 0.9},
        "best-practices": {"score": 0.9}
    }}}"#;

    fn options(dir: &std::path::Path) -> AssembleOptions {
        let psi = dir.join("psi.json");
        std::fs::write(&psi, PSI).unwrap();
        AssembleOptions {
            paths: PayloadPaths {
                page_speed: psi,
                ..PayloadPaths::default()
            },
            as_of: None,
            score: false,
        }
    }

    #[test]
    fn test_assemble_writes_bundle_with_flags() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("bundle.json");
        let config = AppConfig::builder()
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        let code = run_assemble(&options(tmp.path()), &config).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let bundle: MeasurementBundle =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(bundle.audit.performance, 50);
        assert!(bundle.is_missing(MissingSignal::TlsGrade));
        assert!(bundle.is_missing(MissingSignal::Dns));
    }

    #[test]
    fn test_assemble_and_score() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("report.json");
        let mut opts = options(tmp.path());
        opts.score = true;
        let config = AppConfig::builder()
            .output_format(crate::reports::ReportFormat::Json)
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();

        assert_eq!(run_assemble(&opts, &config).unwrap(), exit_codes::SUCCESS);
        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert!(report["sites"][0]["finalScore"].is_u64());
    }

    #[test]
    fn test_assemble_reports_unreadable_payload() {
        let tmp = TempDir::new().unwrap();
        let mut opts = options(tmp.path());
        opts.paths.ssl_labs = Some(PathBuf::from("/nonexistent/ssllabs.json"));

        let err = run_assemble(&opts, &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("SSL Labs"));
    }
}
