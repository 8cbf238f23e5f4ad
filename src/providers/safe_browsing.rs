//! Safe Browsing `threatMatches:find` payload.

use crate::model::ThreatStatus;
use serde::Deserialize;

/// Lookup response. An empty object means no match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SafeBrowsingResponse {
    #[serde(default)]
    pub matches: Vec<ThreatMatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMatch {
    /// e.g. `MALWARE`, `SOCIAL_ENGINEERING`
    #[serde(default)]
    pub threat_type: Option<String>,
    #[serde(default)]
    pub platform_type: Option<String>,
}

/// Any match puts the site at risk.
#[must_use]
pub fn map_safe_browsing(response: &SafeBrowsingResponse) -> ThreatStatus {
    if response.matches.is_empty() {
        ThreatStatus::Ok
    } else {
        ThreatStatus::AtRisk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_is_ok() {
        let response: SafeBrowsingResponse = serde_json::from_str("{}").expect("parse");
        assert_eq!(map_safe_browsing(&response), ThreatStatus::Ok);
    }

    #[test]
    fn test_match_is_at_risk() {
        let json = r#"{"matches": [{
            "threatType": "SOCIAL_ENGINEERING",
            "platformType": "ANY_PLATFORM",
            "threat": {"url": "https://hotel.example/"}
        }]}"#;
        let response: SafeBrowsingResponse = serde_json::from_str(json).expect("parse");
        assert_eq!(map_safe_browsing(&response), ThreatStatus::AtRisk);
        assert_eq!(
            response.matches[0].threat_type.as_deref(),
            Some("SOCIAL_ENGINEERING")
        );
    }
}
