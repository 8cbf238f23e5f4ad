//! DNS-over-HTTPS answers (JSON API as served by dns.google and
//! cloudflare-dns.com).

use crate::config::CdnPattern;
use crate::model::DnsRecords;
use serde::Deserialize;

/// DNS record type codes.
pub mod record_type {
    pub const A: u16 = 1;
    pub const NS: u16 = 2;
    pub const CNAME: u16 = 5;
    pub const MX: u16 = 15;
    pub const AAAA: u16 = 28;
}

/// One DoH JSON response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DohResponse {
    /// RCODE, 0 for NOERROR
    #[serde(rename = "Status", default)]
    pub status: u32,
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DohAnswer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DohAnswer {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: u16,
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    #[serde(default)]
    pub data: String,
}

impl DohResponse {
    /// Answers of the given type. Answers without a type code are counted,
    /// CNAME links in an address chain are not.
    fn answers_of(&self, wanted: u16) -> impl Iterator<Item = &DohAnswer> + '_ {
        self.answer
            .iter()
            .filter(move |a| a.record_type == wanted || a.record_type == 0)
    }
}

/// DoH responses for one domain, keyed by query type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DnsLookup {
    #[serde(rename = "A", default)]
    pub a: Option<DohResponse>,
    #[serde(rename = "AAAA", default)]
    pub aaaa: Option<DohResponse>,
    #[serde(rename = "MX", default)]
    pub mx: Option<DohResponse>,
    #[serde(rename = "NS", default)]
    pub ns: Option<DohResponse>,
    #[serde(rename = "CNAME", default)]
    pub cname: Option<DohResponse>,
    /// Wall time the lookups took, measured by the caller
    #[serde(rename = "latencyMs", default)]
    pub latency_ms: Option<u64>,
}

/// Summarize a DNS lookup, inferring the CDN from answer data.
#[must_use]
pub fn map_dns(lookup: &DnsLookup, cdn_patterns: &[CdnPattern]) -> DnsRecords {
    let count = |response: &Option<DohResponse>, wanted: u16| -> usize {
        response.as_ref().map_or(0, |r| r.answers_of(wanted).count())
    };

    let address_count = count(&lookup.a, record_type::A) + count(&lookup.aaaa, record_type::AAAA);

    // every answer of the address and alias queries, CNAME chain links included
    let haystack = [&lookup.a, &lookup.aaaa, &lookup.cname]
        .into_iter()
        .flatten()
        .flat_map(|response| response.answer.iter())
        .map(|answer| answer.data.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    DnsRecords {
        a_record_count: u32::try_from(address_count).unwrap_or(u32::MAX),
        has_mail_record: count(&lookup.mx, record_type::MX) > 0,
        has_name_server_record: count(&lookup.ns, record_type::NS) > 0,
        inferred_cdn: infer_cdn(&haystack, cdn_patterns),
        resolution_latency_ms: lookup.latency_ms,
    }
}

/// First pattern with a marker occurring in `haystack`, in pattern order.
#[must_use]
pub fn infer_cdn(haystack: &str, cdn_patterns: &[CdnPattern]) -> Option<String> {
    if haystack.trim().is_empty() {
        return None;
    }
    let haystack = haystack.to_lowercase();
    cdn_patterns
        .iter()
        .find(|pattern| {
            pattern
                .markers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .any(|marker| !marker.is_empty() && haystack.contains(&marker))
        })
        .map(|pattern| pattern.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_cdn_patterns;

    fn lookup() -> DnsLookup {
        let json = r#"{
            "A": {"Status": 0, "Answer": [
                {"name": "hotel.example.", "type": 5, "TTL": 300, "data": "hotel.example.cdn.cloudflare.net."},
                {"name": "hotel.example.cdn.cloudflare.net.", "type": 1, "TTL": 300, "data": "104.16.1.1"},
                {"name": "hotel.example.cdn.cloudflare.net.", "type": 1, "TTL": 300, "data": "104.16.1.2"}
            ]},
            "AAAA": {"Status": 0, "Answer": [
                {"name": "hotel.example.", "type": 28, "TTL": 300, "data": "2606:4700::1"}
            ]},
            "MX": {"Status": 0, "Answer": [
                {"name": "hotel.example.", "type": 15, "TTL": 3600, "data": "10 mail.hotel.example."}
            ]},
            "NS": {"Status": 0},
            "latencyMs": 84
        }"#;
        serde_json::from_str(json).expect("parse")
    }

    #[test]
    fn test_counts_and_flags() {
        let records = map_dns(&lookup(), &default_cdn_patterns());
        assert_eq!(records.a_record_count, 3);
        assert!(records.has_mail_record);
        assert!(!records.has_name_server_record);
        assert_eq!(records.inferred_cdn.as_deref(), Some("cloudflare"));
        assert_eq!(records.resolution_latency_ms, Some(84));
    }

    #[test]
    fn test_empty_lookup() {
        let records = map_dns(&DnsLookup::default(), &default_cdn_patterns());
        assert_eq!(records.a_record_count, 0);
        assert!(records.is_incomplete());
        assert_eq!(records.inferred_cdn, None);
    }

    #[test]
    fn test_infer_cdn_follows_pattern_order() {
        let patterns = default_cdn_patterns();
        assert_eq!(
            infer_cdn("d111.cloudfront.net. edge.fastly.net.", &patterns).as_deref(),
            Some("fastly")
        );
        assert_eq!(
            infer_cdn("hotel.azureedge.net.", &patterns).as_deref(),
            Some("microsoft")
        );
        assert_eq!(infer_cdn("203.0.113.7", &patterns), None);
    }

    #[test]
    fn test_infer_cdn_ignores_blank_markers() {
        let patterns = vec![CdnPattern::new("blank", [""])];
        assert_eq!(infer_cdn("anything", &patterns), None);
    }
}
