//! Default values for beepulse configuration.

use super::types::CdnPattern;

/// Security headers checked by default, in reporting order.
pub const DEFAULT_REQUIRED_HEADERS: &[&str] = &[
    "Content-Security-Policy",
    "Strict-Transport-Security",
    "X-Frame-Options",
    "X-Content-Type-Options",
    "Referrer-Policy",
    "Permissions-Policy",
];

/// CDN markers checked by default. Order matters: the first hit wins.
pub const DEFAULT_CDN_MARKERS: &[(&str, &[&str])] = &[
    ("cloudflare", &["cloudflare", "cf-ray"]),
    ("fastly", &["fastly"]),
    ("amazon", &["amazon", "aws", "cloudfront"]),
    ("google", &["google", "goog"]),
    ("microsoft", &["azure", "microsoft"]),
    ("akamai", &["akamai"]),
    ("maxcdn", &["maxcdn"]),
    ("keycdn", &["keycdn"]),
    ("bunnycdn", &["bunnycdn"]),
];

#[must_use]
pub fn default_required_headers() -> Vec<String> {
    DEFAULT_REQUIRED_HEADERS
        .iter()
        .map(|h| (*h).to_string())
        .collect()
}

#[must_use]
pub fn default_cdn_patterns() -> Vec<CdnPattern> {
    DEFAULT_CDN_MARKERS
        .iter()
        .map(|(name, markers)| CdnPattern::new(*name, markers.iter().copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_populated() {
        assert_eq!(default_required_headers().len(), 6);
        let patterns = default_cdn_patterns();
        assert_eq!(patterns.len(), 9);
        assert_eq!(patterns[0].name, "cloudflare");
        assert!(patterns.iter().all(|p| !p.markers.is_empty()));
    }
}
