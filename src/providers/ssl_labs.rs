//! SSL Labs `analyze` payload.

use crate::error::{BeePulseError, ProviderErrorKind, Result};
use crate::scoring::Grade;
use serde::Deserialize;

/// Status reported once every endpoint has been assessed.
pub const STATUS_READY: &str = "READY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslLabsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<SslLabsEndpoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SslLabsEndpoint {
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Extract the TLS grade.
///
/// Uses the top-level grade when present, otherwise the worst grade across
/// endpoints. Unfinished assessments and payloads without any recognizable
/// grade are errors; callers fall back to `F` and flag the signal.
pub fn map_ssl_labs(response: &SslLabsResponse) -> Result<String> {
    if response.status != STATUS_READY {
        return Err(BeePulseError::provider(
            "ssl labs",
            ProviderErrorKind::AnalysisIncomplete(format!("status is '{}'", response.status)),
        ));
    }

    if let Some(grade) = response.grade.as_deref().and_then(Grade::parse) {
        return Ok(grade.letter().to_string());
    }

    response
        .endpoints
        .iter()
        .filter_map(|endpoint| endpoint.grade.as_deref().and_then(Grade::parse))
        .max()
        .map(|grade| grade.letter().to_string())
        .ok_or_else(|| {
            BeePulseError::provider(
                "ssl labs",
                ProviderErrorKind::InvalidResponse("no endpoint carries a grade".to_string()),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worst_endpoint_grade() {
        let json = r#"{
            "host": "hotel.example",
            "status": "READY",
            "endpoints": [
                {"ipAddress": "203.0.113.10", "grade": "A+"},
                {"ipAddress": "2001:db8::10", "grade": "B"},
                {"ipAddress": "203.0.113.11", "statusMessage": "Unable to connect to the server"}
            ]
        }"#;
        let response: SslLabsResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(map_ssl_labs(&response).expect("grade"), "B");
    }

    #[test]
    fn test_top_level_grade_wins() {
        let json = r#"{"status": "READY", "grade": "A-", "endpoints": [{"grade": "C"}]}"#;
        let response: SslLabsResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(map_ssl_labs(&response).expect("grade"), "A-");
    }

    #[test]
    fn test_trust_failure_is_worst() {
        let json = r#"{"status": "READY", "endpoints": [{"grade": "F"}, {"grade": "T"}]}"#;
        let response: SslLabsResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(map_ssl_labs(&response).expect("grade"), "T");
    }

    #[test]
    fn test_in_progress_is_error() {
        let json = r#"{"status": "IN_PROGRESS", "endpoints": [{"grade": "A"}]}"#;
        let response: SslLabsResponse = serde_json::from_str(json).expect("parse");
        let err = map_ssl_labs(&response).expect_err("not ready");
        assert!(matches!(
            err,
            BeePulseError::Provider {
                source: ProviderErrorKind::AnalysisIncomplete(_),
                ..
            }
        ));
    }

    #[test]
    fn test_no_grades_is_error() {
        let response: SslLabsResponse =
            serde_json::from_str(r#"{"status": "READY", "endpoints": []}"#).expect("parse");
        assert!(map_ssl_labs(&response).is_err());
    }
}
