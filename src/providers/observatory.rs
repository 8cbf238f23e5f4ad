//! HTTP Observatory scan payload.

use crate::error::{BeePulseError, ProviderErrorKind, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservatoryResponse {
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub tests_failed: Option<u32>,
    /// Headers captured during the scan, empty when not reported
    #[serde(default)]
    pub response_headers: BTreeMap<String, String>,
}

/// Header grade plus the required headers the site does not send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderAssessment {
    pub grade: String,
    pub missing_headers: Vec<String>,
}

/// Extract the header grade and missing headers.
///
/// Missing headers are the entries of `required` that do not appear
/// (case-insensitively) in the captured response headers, in `required`
/// order. When no headers were captured the list is empty.
pub fn map_observatory(
    response: &ObservatoryResponse,
    required: &[String],
) -> Result<HeaderAssessment> {
    let grade = response
        .grade
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .ok_or_else(|| {
            BeePulseError::provider(
                "observatory",
                ProviderErrorKind::InvalidResponse("scan has no grade".to_string()),
            )
        })?;

    Ok(HeaderAssessment {
        grade: grade.to_string(),
        missing_headers: missing_headers(&response.response_headers, required),
    })
}

fn missing_headers(captured: &BTreeMap<String, String>, required: &[String]) -> Vec<String> {
    if captured.is_empty() {
        return Vec::new();
    }
    let present: HashSet<String> = captured.keys().map(|k| k.to_ascii_lowercase()).collect();
    required
        .iter()
        .filter(|header| !present.contains(&header.to_ascii_lowercase()))
        .cloned()
        .collect()
}
