//! The canonical measurement bundle consumed by the scorer.

use super::{MissingDataFlags, MissingSignal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound for every percentage-like input.
pub const PERCENT_MAX: u8 = 100;

/// All signals gathered for one website analysis.
///
/// Built fresh per request by the caller (or by
/// [`providers::assemble`](crate::providers::assemble)) and handed to the
/// scorer by reference. The scorer never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementBundle {
    /// Lab audit category scores
    pub audit: AuditScores,
    /// Real-user percentiles, absent when no sample exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_user_experience: Option<RealUserExperience>,
    /// Threat, TLS and header signals
    pub security: SecuritySignals,
    /// Domain registration data
    #[serde(default)]
    pub domain: DomainRecord,
    /// DNS resolution summary
    #[serde(default)]
    pub dns: DnsRecords,
    /// Signals that could not be obtained this run
    #[serde(default)]
    pub missing_data_flags: MissingDataFlags,
}

impl MeasurementBundle {
    /// Create a bundle with only the mandatory parts filled in.
    #[must_use]
    pub fn new(audit: AuditScores, security: SecuritySignals) -> Self {
        Self {
            audit,
            real_user_experience: None,
            security,
            domain: DomainRecord::default(),
            dns: DnsRecords::default(),
            missing_data_flags: MissingDataFlags::new(),
        }
    }

    /// Real-user data, if it is present and neither device class is flagged
    /// missing.
    #[must_use]
    pub fn real_user_data(&self) -> Option<&RealUserExperience> {
        if self.missing_data_flags.real_user_missing() {
            return None;
        }
        self.real_user_experience.as_ref()
    }

    /// Whether a given signal is flagged missing.
    #[must_use]
    pub fn is_missing(&self, signal: MissingSignal) -> bool {
        self.missing_data_flags.is_missing(signal)
    }

    /// Dotted paths of numeric fields that exceed their documented range.
    ///
    /// The scorer clamps these silently; loaders use this to warn.
    #[must_use]
    pub fn out_of_range_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        for (name, value) in self.audit.fields() {
            if value > PERCENT_MAX {
                fields.push(format!("audit.{name}"));
            }
        }
        if let Some(rue) = &self.real_user_experience {
            for device in DeviceClass::ALL {
                for (metric, sample) in rue.device(device).metrics() {
                    if sample.good_percentage > PERCENT_MAX {
                        fields.push(format!(
                            "realUserExperience.{}.{metric}.goodPercentage",
                            device.as_str()
                        ));
                    }
                }
            }
        }
        fields
    }
}

/// Page-speed audit category scores, each 0-100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditScores {
    pub performance: u8,
    pub seo: u8,
    pub accessibility: u8,
    pub best_practices: u8,
}

impl AuditScores {
    #[must_use]
    pub const fn new(performance: u8, seo: u8, accessibility: u8, best_practices: u8) -> Self {
        Self {
            performance,
            seo,
            accessibility,
            best_practices,
        }
    }

    /// Copy with every category clamped to 0-100.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            performance: self.performance.min(PERCENT_MAX),
            seo: self.seo.min(PERCENT_MAX),
            accessibility: self.accessibility.min(PERCENT_MAX),
            best_practices: self.best_practices.min(PERCENT_MAX),
        }
    }

    fn fields(&self) -> [(&'static str, u8); 4] {
        [
            ("performance", self.performance),
            ("seo", self.seo),
            ("accessibility", self.accessibility),
            ("bestPractices", self.best_practices),
        ]
    }
}

/// Device class for real-user data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub const ALL: [Self; 2] = [Self::Mobile, Self::Desktop];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }

    /// The missing-data flag covering this device class.
    #[must_use]
    pub const fn missing_signal(&self) -> MissingSignal {
        match self {
            Self::Mobile => MissingSignal::RealUserMobile,
            Self::Desktop => MissingSignal::RealUserDesktop,
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Real-user experience for both device classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealUserExperience {
    pub mobile: DeviceVitals,
    pub desktop: DeviceVitals,
}

impl RealUserExperience {
    #[must_use]
    pub const fn device(&self, class: DeviceClass) -> &DeviceVitals {
        match class {
            DeviceClass::Mobile => &self.mobile,
            DeviceClass::Desktop => &self.desktop,
        }
    }

    /// Lowest good percentage across every metric of both devices.
    #[must_use]
    pub fn worst_good_percentage(&self) -> u8 {
        DeviceClass::ALL
            .iter()
            .flat_map(|class| self.device(*class).metrics())
            .map(|(_, sample)| sample.good_percentage.min(PERCENT_MAX))
            .min()
            .unwrap_or(PERCENT_MAX)
    }
}

/// Core Web Vitals for one device class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceVitals {
    /// Loading (largest contentful paint, milliseconds)
    #[serde(alias = "lcp")]
    pub largest_contentful_paint: MetricSample,
    /// Visual stability (cumulative layout shift, unitless)
    #[serde(alias = "cls")]
    pub layout_stability: MetricSample,
    /// Interactivity (interaction to next paint, milliseconds)
    #[serde(alias = "inp")]
    pub interactivity: MetricSample,
}

impl DeviceVitals {
    #[must_use]
    pub const fn new(
        largest_contentful_paint: MetricSample,
        layout_stability: MetricSample,
        interactivity: MetricSample,
    ) -> Self {
        Self {
            largest_contentful_paint,
            layout_stability,
            interactivity,
        }
    }

    /// The three metrics with their serialized names.
    #[must_use]
    pub fn metrics(&self) -> [(&'static str, MetricSample); 3] {
        [
            ("largestContentfulPaint", self.largest_contentful_paint),
            ("layoutStability", self.layout_stability),
            ("interactivity", self.interactivity),
        ]
    }
}

/// One real-user metric: raw 75th percentile and the share of good sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub p75: f64,
    #[serde(alias = "goodPct")]
    pub good_percentage: u8,
}

impl MetricSample {
    #[must_use]
    pub const fn new(p75: f64, good_percentage: u8) -> Self {
        Self {
            p75,
            good_percentage,
        }
    }
}

/// Blocklist verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatStatus {
    #[default]
    Ok,
    AtRisk,
}

impl ThreatStatus {
    #[must_use]
    pub const fn is_at_risk(&self) -> bool {
        matches!(self, Self::AtRisk)
    }
}

impl std::fmt::Display for ThreatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::AtRisk => write!(f, "AT_RISK"),
        }
    }
}

/// Security signals. Grades are kept as the raw letter strings issued by the
/// assessment providers; the grade mapper interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySignals {
    pub threat_status: ThreatStatus,
    pub tls_grade: String,
    pub header_grade: String,
    #[serde(default)]
    pub missing_headers: Vec<String>,
}

impl SecuritySignals {
    #[must_use]
    pub fn new(
        threat_status: ThreatStatus,
        tls_grade: impl Into<String>,
        header_grade: impl Into<String>,
    ) -> Self {
        Self {
            threat_status,
            tls_grade: tls_grade.into(),
            header_grade: header_grade.into(),
            missing_headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_missing_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_headers = headers.into_iter().map(Into::into).collect();
        self
    }
}

/// Domain registration record (RDAP).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<f64>,
}

impl DomainRecord {
    /// Record that only knows the domain age.
    #[must_use]
    pub fn with_age(age_years: f64) -> Self {
        Self {
            age_years: Some(age_years),
            ..Self::default()
        }
    }
}

/// DNS resolution summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecords {
    /// A plus AAAA answers
    pub a_record_count: u32,
    pub has_mail_record: bool,
    pub has_name_server_record: bool,
    #[serde(
        rename = "inferredCDN",
        alias = "inferredCdn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inferred_cdn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_latency_ms: Option<u64>,
}

impl DnsRecords {
    /// A fully configured zone with no CDN.
    #[must_use]
    pub const fn complete(a_record_count: u32) -> Self {
        Self {
            a_record_count,
            has_mail_record: true,
            has_name_server_record: true,
            inferred_cdn: None,
            resolution_latency_ms: None,
        }
    }

    /// CDN name, treating an empty string as no CDN.
    #[must_use]
    pub fn cdn(&self) -> Option<&str> {
        self.inferred_cdn
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Zone is missing mail or name-server records, or has no address.
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        !self.has_mail_record || !self.has_name_server_record || self.a_record_count == 0
    }
}
