//! Score command handler.
//!
//! Implements the `score` subcommand: load measurement bundles, score them and
//! render the results.

use super::{ensure_valid, report_and_check};
use crate::config::AppConfig;
use crate::pipeline::load_bundle;
use crate::reports::ScoredSite;
use crate::scoring::PulseScorer;
use anyhow::{bail, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Run the score command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_score(bundles: &[PathBuf], config: &AppConfig) -> Result<i32> {
    ensure_valid(config)?;
    if bundles.is_empty() {
        bail!("No measurement bundles given");
    }

    let sites = score_bundles(bundles, config.behavior.quiet)?;
    if !config.behavior.quiet {
        tracing::info!("Scored {} site(s)", sites.len());
    }

    report_and_check(&sites, config)
}

/// Load and score every bundle, keeping input order. Bundles are scored in
/// parallel when more than one is given; the first failure aborts the run.
pub fn score_bundles(bundles: &[PathBuf], quiet: bool) -> Result<Vec<ScoredSite>> {
    if let [single] = bundles {
        return score_one(single, quiet).map(|site| vec![site]);
    }
    bundles
        .par_iter()
        .map(|path| score_one(path, quiet))
        .collect()
}

fn score_one(path: &Path, quiet: bool) -> Result<ScoredSite> {
    let bundle = load_bundle(path, quiet)?;
    let result = PulseScorer::score(&bundle);
    tracing::debug!("{}: final score {}", path.display(), result.final_score);
    Ok(ScoredSite::new(path.display().to_string(), result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_bundle(dir: &Path, name: &str, performance: u8) -> PathBuf {
        let path = dir.join(name);
        let json = format!(
            r#"{{
                "audit": {{"performance": {performance}, "seo": 90, "accessibility": 90, "bestPractices": 90}},
                "security": {{"threatStatus": "OK", "tlsGrade": "A", "headerGrade": "A"}}
            }}"#
        );
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_score_bundles_keeps_input_order() {
        let tmp = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..6)
            .map(|i| write_bundle(tmp.path(), &format!("site-{i}.json"), i * 15))
            .collect();

        let sites = score_bundles(&paths, true).unwrap();
        assert_eq!(sites.len(), 6);
        for (site, path) in sites.iter().zip(&paths) {
            assert_eq!(site.label, path.display().to_string());
        }
        assert!(sites[0].result.final_score < sites[5].result.final_score);
    }

    #[test]
    fn test_score_bundles_fails_on_bad_input() {
        let tmp = TempDir::new().unwrap();
        let good = write_bundle(tmp.path(), "good.json", 80);
        let bad = tmp.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();

        assert!(score_bundles(&[good, bad], true).is_err());
    }

    #[test]
    fn test_run_score_writes_file_and_applies_threshold() {
        let tmp = TempDir::new().unwrap();
        let bundle = write_bundle(tmp.path(), "slow.json", 10);
        let out = tmp.path().join("report.json");
        let config = AppConfig::builder()
            .output_format(crate::reports::ReportFormat::Json)
            .output_file(Some(out.clone()))
            .min_score(Some(95))
            .quiet(true)
            .build();

        let code = run_score(&[bundle], &config).unwrap();
        assert_eq!(code, crate::pipeline::exit_codes::BELOW_THRESHOLD);

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(report["sites"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_run_score_requires_input() {
        assert!(run_score(&[], &AppConfig::default()).is_err());
    }
}
