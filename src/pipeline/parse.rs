//! Bundle and provider payload loading.
//!
//! Reads JSON inputs from disk with file context attached to every error.

use crate::error::Result as BeePulseResult;
use crate::model::MeasurementBundle;
use crate::providers::ProviderPayloads;
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Parse a measurement bundle from JSON text.
pub fn parse_bundle_str(content: &str) -> BeePulseResult<MeasurementBundle> {
    use crate::error::ErrorContext as _;

    serde_json::from_str::<MeasurementBundle>(content).context("measurement bundle")
}

/// Load a measurement bundle from a file.
///
/// Out-of-range numbers are accepted (the scorer clamps them) and so are
/// unknown missing-data flags, but each one is reported as a warning.
pub fn load_bundle(path: &Path, quiet: bool) -> Result<MeasurementBundle> {
    use anyhow::Context as _;

    if !quiet {
        tracing::info!("Loading bundle: {}", path.display());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bundle file: {}", path.display()))?;
    let bundle = parse_bundle_str(&content)
        .with_context(|| format!("Failed to parse bundle: {}", path.display()))?;

    for field in bundle.out_of_range_fields() {
        tracing::warn!(
            "{}: {field} is outside 0-100 and will be clamped",
            path.display()
        );
    }
    for id in bundle.missing_data_flags.unrecognized() {
        tracing::warn!(
            "{}: unknown missing-data flag '{id}' is ignored for scoring",
            path.display()
        );
    }
    if !bundle.missing_data_flags.is_empty() {
        tracing::debug!(
            flags = bundle.missing_data_flags.len(),
            "{} has missing signals",
            path.display()
        );
    }

    Ok(bundle)
}

/// Load one raw provider payload.
pub fn load_payload<T: DeserializeOwned>(path: &Path, provider: &str) -> Result<T> {
    use anyhow::Context as _;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {provider} payload: {}", path.display()))?;
    let payload = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {provider} payload: {}", path.display()))?;
    tracing::debug!("Loaded {provider} payload from {}", path.display());
    Ok(payload)
}

/// Load an optional provider payload. `None` stays `None`.
pub fn load_optional_payload<T: DeserializeOwned>(
    path: Option<&Path>,
    provider: &str,
) -> Result<Option<T>> {
    path.map(|p| load_payload(p, provider)).transpose()
}

/// File locations of the raw payloads for one site.
#[derive(Debug, Clone, Default)]
pub struct PayloadPaths {
    pub page_speed: PathBuf,
    pub crux_mobile: Option<PathBuf>,
    pub crux_desktop: Option<PathBuf>,
    pub safe_browsing: Option<PathBuf>,
    pub ssl_labs: Option<PathBuf>,
    pub observatory: Option<PathBuf>,
    pub rdap: Option<PathBuf>,
    pub dns: Option<PathBuf>,
}

impl PayloadPaths {
    /// Read every supplied payload. A payload that is given but unreadable
    /// is an error; an omitted one is left for the assembler to flag.
    pub fn load(&self) -> Result<ProviderPayloads> {
        Ok(ProviderPayloads {
            page_speed: load_payload(&self.page_speed, "page speed")?,
            crux_mobile: load_optional_payload(self.crux_mobile.as_deref(), "CrUX mobile")?,
            crux_desktop: load_optional_payload(self.crux_desktop.as_deref(), "CrUX desktop")?,
            safe_browsing: load_optional_payload(self.safe_browsing.as_deref(), "Safe Browsing")?,
            ssl_labs: load_optional_payload(self.ssl_labs.as_deref(), "SSL Labs")?,
            observatory: load_optional_payload(self.observatory.as_deref(), "Observatory")?,
            rdap: load_optional_payload(self.rdap.as_deref(), "RDAP")?,
            dns: load_optional_payload(self.dns.as_deref(), "DNS")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::SafeBrowsingResponse;
    use tempfile::TempDir;

    const MINIMAL_BUNDLE: &str = r#"{
        "audit": {"performance": 90, "seo": 90, "accessibility": 90, "bestPractices": 90},
        "security": {"threatStatus": "OK", "tlsGrade": "A", "headerGrade": "A", "missingHeaders": []}
    }"#;

    #[test]
    fn test_parse_bundle_str() {
        let bundle = parse_bundle_str(MINIMAL_BUNDLE).unwrap();
        assert_eq!(bundle.audit.performance, 90);
        assert!(bundle.real_user_experience.is_none());
    }

    #[test]
    fn test_parse_bundle_str_reports_context() {
        let err = parse_bundle_str("{\"audit\": 3}").unwrap_err();
        assert!(err.to_string().contains("measurement bundle"));
    }

    #[test]
    fn test_load_bundle_missing_file() {
        let err = load_bundle(Path::new("/nonexistent/bundle.json"), true).unwrap_err();
        assert!(format!("{err:#}").contains("bundle.json"));
    }

    #[test]
    fn test_load_optional_payload() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sb.json");
        std::fs::write(&path, "{}").unwrap();

        let none: Option<SafeBrowsingResponse> = load_optional_payload(None, "Safe Browsing").unwrap();
        assert!(none.is_none());

        let some: Option<SafeBrowsingResponse> =
            load_optional_payload(Some(&path), "Safe Browsing").unwrap();
        assert!(some.is_some_and(|r| r.matches.is_empty()));
    }

    #[test]
    fn test_payload_paths_require_page_speed() {
        let paths = PayloadPaths {
            page_speed: PathBuf::from("/nonexistent/psi.json"),
            ..PayloadPaths::default()
        };
        let err = paths.load().unwrap_err();
        assert!(err.to_string().contains("page speed"));
    }
}
