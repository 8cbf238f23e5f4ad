//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler receives the effective (file merged with flags) configuration
//! and returns the process exit code.

mod assemble;
mod score;

pub use assemble::{run_assemble, AssembleOptions};
pub use score::{run_score, score_bundles};

use crate::config::{AppConfig, Validatable};
use crate::pipeline::exit_codes;
use crate::reports::{create_reporter_with_options, ReportConfig, ScoredSite};
use crate::pipeline::{should_use_color, write_output, OutputTarget};
use anyhow::{bail, Result};

/// Reject an invalid effective configuration before doing any work.
fn ensure_valid(config: &AppConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
    bail!("Invalid configuration:\n  {}", details.join("\n  "))
}

/// Render scored sites in the configured format and apply the threshold.
fn report_and_check(sites: &[ScoredSite], config: &AppConfig) -> Result<i32> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color, &target);
    let reporter = create_reporter_with_options(config.output.format, use_color);
    let report_config = ReportConfig {
        show_breakdown: config.behavior.show_breakdown,
    };

    let rendered = reporter.generate_score_report(sites, &report_config)?;
    write_output(&rendered, &target, config.behavior.quiet)?;

    Ok(threshold_exit_code(sites, config.behavior.min_score))
}

/// Exit code for a set of results against an optional minimum score.
fn threshold_exit_code(sites: &[ScoredSite], min_score: Option<u8>) -> i32 {
    let Some(threshold) = min_score else {
        return exit_codes::SUCCESS;
    };

    let failing: Vec<&ScoredSite> = sites
        .iter()
        .filter(|site| site.result.final_score < threshold)
        .collect();
    for site in &failing {
        tracing::error!(
            "{}: score {} is below minimum threshold {}",
            site.label,
            site.result.final_score,
            threshold
        );
    }

    if failing.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::BELOW_THRESHOLD
    }
}
