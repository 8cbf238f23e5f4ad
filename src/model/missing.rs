//! Missing-data tracking.
//!
//! Records which upstream signals could not be obtained for an analysis run.
//! The blender reads it to decide whether real-user data participates, and
//! callers read it to render disclaimers.

use serde::de::{value::StrDeserializer, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;

/// An upstream signal that may be unavailable for a run.
///
/// Ordering follows declaration order, which is also the order disclaimers
/// are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum MissingSignal {
    /// Real-user percentiles for phones
    #[serde(alias = "crux-mobile")]
    RealUserMobile,
    /// Real-user percentiles for desktops
    #[serde(alias = "crux-desktop")]
    RealUserDesktop,
    /// Malware / phishing blocklist lookup
    #[serde(alias = "safe-browsing")]
    ThreatStatus,
    /// TLS configuration grade
    #[serde(alias = "ssl-labs")]
    TlsGrade,
    /// HTTP security-header grade
    #[serde(alias = "observatory")]
    HeaderGrade,
    /// Domain registration record
    #[serde(alias = "rdap", alias = "rdap_unavailable_for_tld")]
    DomainRecord,
    /// DNS resolution
    Dns,
}

impl MissingSignal {
    /// Every signal, in disclaimer order.
    pub const ALL: [Self; 7] = [
        Self::RealUserMobile,
        Self::RealUserDesktop,
        Self::ThreatStatus,
        Self::TlsGrade,
        Self::HeaderGrade,
        Self::DomainRecord,
        Self::Dns,
    ];

    /// Stable identifier, identical to the serialized form.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::RealUserMobile => "real-user-mobile",
            Self::RealUserDesktop => "real-user-desktop",
            Self::ThreatStatus => "threat-status",
            Self::TlsGrade => "tls-grade",
            Self::HeaderGrade => "header-grade",
            Self::DomainRecord => "domain-record",
            Self::Dns => "dns",
        }
    }

    /// Parse an identifier, accepting the legacy provider names.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let deserializer: StrDeserializer<'_, serde::de::value::Error> = id.into_deserializer();
        Self::deserialize(deserializer).ok()
    }

    /// Disclaimer line shown to end users when this signal is missing.
    #[must_use]
    pub const fn disclaimer(&self) -> &'static str {
        match self {
            Self::RealUserMobile => {
                "Real-user data for mobile visitors was unavailable; the score relies on the lab audit"
            }
            Self::RealUserDesktop => {
                "Real-user data for desktop visitors was unavailable; the score relies on the lab audit"
            }
            Self::ThreatStatus => "The malware blocklist check could not be completed",
            Self::TlsGrade => "The TLS configuration could not be graded",
            Self::HeaderGrade => "The HTTP security headers could not be graded",
            Self::DomainRecord => "The domain registration record could not be retrieved",
            Self::Dns => "DNS records could not be resolved",
        }
    }

    /// Whether this signal belongs to the real-user experience block.
    #[must_use]
    pub const fn is_real_user(&self) -> bool {
        matches!(self, Self::RealUserMobile | Self::RealUserDesktop)
    }
}

impl std::fmt::Display for MissingSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Set of signals flagged unavailable for one run.
///
/// Identifiers that do not name a known signal are kept as-is in
/// [`unrecognized`](Self::unrecognized). They never affect weighting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingDataFlags {
    signals: BTreeSet<MissingSignal>,
    unrecognized: BTreeSet<String>,
}

impl MissingDataFlags {
    /// Create an empty set of flags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag a signal as missing. Returns `false` if it was already flagged.
    pub fn flag(&mut self, signal: MissingSignal) -> bool {
        self.signals.insert(signal)
    }

    /// Builder-style variant of [`flag`](Self::flag).
    #[must_use]
    pub fn with(mut self, signal: MissingSignal) -> Self {
        self.signals.insert(signal);
        self
    }

    /// Record a flag by identifier, keeping it aside when it is unknown.
    pub fn flag_id(&mut self, id: &str) {
        match MissingSignal::from_id(id) {
            Some(signal) => {
                self.signals.insert(signal);
            }
            None => {
                self.unrecognized.insert(id.to_string());
            }
        }
    }

    #[must_use]
    pub fn is_missing(&self, signal: MissingSignal) -> bool {
        self.signals.contains(&signal)
    }

    /// True when either device class of real-user data is flagged.
    #[must_use]
    pub fn real_user_missing(&self) -> bool {
        self.signals.iter().any(MissingSignal::is_real_user)
    }

    /// True when no known signal is flagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Number of known signals flagged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = MissingSignal> + '_ {
        self.signals.iter().copied()
    }

    /// Flag identifiers that name no known signal, sorted.
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> + '_ {
        self.unrecognized.iter().map(String::as_str)
    }

    /// One human-readable line per flagged signal, in stable order.
    #[must_use]
    pub fn disclaimers(&self) -> Vec<&'static str> {
        self.signals.iter().map(MissingSignal::disclaimer).collect()
    }
}

impl FromIterator<MissingSignal> for MissingDataFlags {
    fn from_iter<I: IntoIterator<Item = MissingSignal>>(iter: I) -> Self {
        Self {
            signals: iter.into_iter().collect(),
            unrecognized: BTreeSet::new(),
        }
    }
}

impl Serialize for MissingDataFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let known = self.signals.iter().map(|signal| signal.id());
        serializer.collect_seq(known.chain(self.unrecognized()))
    }
}

impl<'de> Deserialize<'de> for MissingDataFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut flags = Self::new();
        for id in Vec::<String>::deserialize(deserializer)? {
            flags.flag_id(&id);
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_is_idempotent() {
        let mut flags = MissingDataFlags::new();
        assert!(flags.flag(MissingSignal::TlsGrade));
        assert!(!flags.flag(MissingSignal::TlsGrade));
        assert_eq!(flags.len(), 1);
    }

    #[test]
    fn test_real_user_missing_on_either_device() {
        let mobile_only: MissingDataFlags = [MissingSignal::RealUserMobile].into_iter().collect();
        assert!(mobile_only.real_user_missing());

        let desktop_only = MissingDataFlags::new().with(MissingSignal::RealUserDesktop);
        assert!(desktop_only.real_user_missing());

        let unrelated = MissingDataFlags::new().with(MissingSignal::Dns);
        assert!(!unrelated.real_user_missing());
    }

    #[test]
    fn test_disclaimers_follow_declaration_order() {
        let flags: MissingDataFlags = [
            MissingSignal::Dns,
            MissingSignal::TlsGrade,
            MissingSignal::RealUserMobile,
        ]
        .into_iter()
        .collect();

        let lines = flags.disclaimers();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("mobile"));
        assert!(lines[1].contains("TLS"));
        assert!(lines[2].contains("DNS"));
    }

    #[test]
    fn test_serde_accepts_legacy_identifiers() {
        let flags: MissingDataFlags =
            serde_json::from_str(r#"["crux-mobile", "ssl-labs", "observatory", "dns"]"#)
                .expect("legacy flags should parse");
        assert!(flags.is_missing(MissingSignal::RealUserMobile));
        assert!(flags.is_missing(MissingSignal::TlsGrade));
        assert!(flags.is_missing(MissingSignal::HeaderGrade));
        assert!(flags.is_missing(MissingSignal::Dns));

        let json = serde_json::to_string(&flags).expect("serialize");
        assert_eq!(json, r#"["real-user-mobile","tls-grade","header-grade","dns"]"#);
    }

    #[test]
    fn test_unknown_flag_is_kept_aside() {
        let flags: MissingDataFlags =
            serde_json::from_str(r#"["weather", "dns"]"#).expect("unknown flags should parse");
        assert_eq!(flags.len(), 1);
        assert!(flags.is_missing(MissingSignal::Dns));
        assert_eq!(flags.unrecognized().collect::<Vec<_>>(), vec!["weather"]);
        assert_eq!(flags.disclaimers().len(), 1);

        let json = serde_json::to_string(&flags).expect("serialize");
        assert_eq!(json, r#"["dns","weather"]"#);
    }

    #[test]
    fn test_rdap_tld_flag_is_domain_record() {
        assert_eq!(
            MissingSignal::from_id("rdap_unavailable_for_tld"),
            Some(MissingSignal::DomainRecord)
        );
        assert_eq!(MissingSignal::from_id("crux-mobile"), Some(MissingSignal::RealUserMobile));
        assert_eq!(MissingSignal::from_id("tls-grade"), Some(MissingSignal::TlsGrade));
        assert_eq!(MissingSignal::from_id("weather"), None);
    }

    #[test]
    fn test_id_matches_serialized_form() {
        for signal in MissingSignal::ALL {
            let json = serde_json::to_string(&signal).expect("serialize");
            assert_eq!(json, format!("\"{}\"", signal.id()));
        }
    }
}
