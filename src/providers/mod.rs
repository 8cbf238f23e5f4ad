//! Provider payload normalization.
//!
//! Maps the raw JSON returned by each measurement provider into the parts of
//! a [`MeasurementBundle`]. Fetching, retrying and caching those payloads is
//! left to the caller; this module only interprets what was fetched and
//! records what was not.
//!
//! | Provider | Bundle part | Missing payload |
//! |----------|-------------|-----------------|
//! | PageSpeed Insights | `audit` | error |
//! | Chrome UX Report (per device) | `realUserExperience` | flag `real-user-*` |
//! | Safe Browsing | `security.threatStatus` | `OK`, flag `threat-status` |
//! | SSL Labs | `security.tlsGrade` | `F`, flag `tls-grade` |
//! | HTTP Observatory | `security.headerGrade`, `missingHeaders` | `F`, flag `header-grade` |
//! | RDAP | `domain` | empty, flag `domain-record` |
//! | DNS-over-HTTPS | `dns` | empty, flag `dns` |

mod crux;
mod dns;
mod observatory;
mod page_speed;
mod rdap;
mod safe_browsing;
mod ssl_labs;

pub use crux::{map_crux, CruxMetric, CruxMetrics, CruxRecord, CruxResponse, NumberOrString};
pub use dns::{infer_cdn, map_dns, record_type, DnsLookup, DohAnswer, DohResponse};
pub use observatory::{map_observatory, HeaderAssessment, ObservatoryResponse};
pub use page_speed::{map_page_speed, PageSpeedResponse};
pub use rdap::{age_in_years, map_rdap, RdapEntity, RdapEvent, RdapResponse};
pub use safe_browsing::{map_safe_browsing, SafeBrowsingResponse, ThreatMatch};
pub use ssl_labs::{map_ssl_labs, SslLabsResponse, STATUS_READY};

use crate::config::ProviderConfig;
use crate::error::{ErrorContext, Result};
use crate::model::{
    DeviceClass, DnsRecords, DomainRecord, MeasurementBundle, MissingDataFlags, MissingSignal,
    RealUserExperience, SecuritySignals, ThreatStatus,
};
use chrono::{DateTime, Utc};

/// Grade recorded when a grading provider gave no usable answer.
pub const FALLBACK_GRADE: &str = "F";

/// Raw payloads gathered for one analysis. Only the page-speed audit is
/// mandatory.
#[derive(Debug, Clone, Default)]
pub struct ProviderPayloads {
    pub page_speed: PageSpeedResponse,
    pub crux_mobile: Option<CruxResponse>,
    pub crux_desktop: Option<CruxResponse>,
    pub safe_browsing: Option<SafeBrowsingResponse>,
    pub ssl_labs: Option<SslLabsResponse>,
    pub observatory: Option<ObservatoryResponse>,
    pub rdap: Option<RdapResponse>,
    pub dns: Option<DnsLookup>,
}

impl ProviderPayloads {
    #[must_use]
    pub fn new(page_speed: PageSpeedResponse) -> Self {
        Self {
            page_speed,
            ..Self::default()
        }
    }

    fn crux(&self, class: DeviceClass) -> Option<&CruxResponse> {
        match class {
            DeviceClass::Mobile => self.crux_mobile.as_ref(),
            DeviceClass::Desktop => self.crux_desktop.as_ref(),
        }
    }
}

/// Build a measurement bundle from raw provider payloads.
///
/// Every unusable optional payload is replaced by its fallback and flagged in
/// `missingDataFlags`. Only an unusable page-speed payload is an error.
pub fn assemble(
    payloads: &ProviderPayloads,
    config: &ProviderConfig,
    as_of: DateTime<Utc>,
) -> Result<MeasurementBundle> {
    let audit = map_page_speed(&payloads.page_speed).context("assembling bundle")?;
    tracing::debug!(?audit, "mapped page speed audit");

    let mut flags = MissingDataFlags::new();

    let real_user_experience = assemble_real_user(payloads, &mut flags);
    let security = assemble_security(payloads, config, &mut flags);

    let domain = match &payloads.rdap {
        Some(response) => map_rdap(response, as_of),
        None => DomainRecord::default(),
    };
    if domain == DomainRecord::default() {
        flag(&mut flags, MissingSignal::DomainRecord, "no usable RDAP record");
    }

    let dns = match &payloads.dns {
        Some(lookup) => map_dns(lookup, &config.cdn_patterns),
        None => {
            flag(&mut flags, MissingSignal::Dns, "no DNS lookup supplied");
            DnsRecords::default()
        }
    };
    tracing::debug!(?dns, "mapped DNS records");

    Ok(MeasurementBundle {
        audit,
        real_user_experience,
        security,
        domain,
        dns,
        missing_data_flags: flags,
    })
}

fn assemble_real_user(
    payloads: &ProviderPayloads,
    flags: &mut MissingDataFlags,
) -> Option<RealUserExperience> {
    let mut device = |class: DeviceClass| {
        let vitals = payloads.crux(class).and_then(map_crux);
        if vitals.is_none() {
            flag(flags, class.missing_signal(), "no real-user record");
        }
        vitals
    };
    let mobile = device(DeviceClass::Mobile);
    let desktop = device(DeviceClass::Desktop);

    match (mobile, desktop) {
        (Some(mobile), Some(desktop)) => Some(RealUserExperience { mobile, desktop }),
        _ => None,
    }
}

fn assemble_security(
    payloads: &ProviderPayloads,
    config: &ProviderConfig,
    flags: &mut MissingDataFlags,
) -> SecuritySignals {
    let threat_status = match &payloads.safe_browsing {
        Some(response) => map_safe_browsing(response),
        None => {
            flag(flags, MissingSignal::ThreatStatus, "no blocklist verdict");
            ThreatStatus::Ok
        }
    };

    let tls_grade = match payloads.ssl_labs.as_ref().map(map_ssl_labs) {
        Some(Ok(grade)) => grade,
        Some(Err(e)) => {
            flag(flags, MissingSignal::TlsGrade, &e.to_string());
            FALLBACK_GRADE.to_string()
        }
        None => {
            flag(flags, MissingSignal::TlsGrade, "no SSL Labs report");
            FALLBACK_GRADE.to_string()
        }
    };

    let headers = payloads
        .observatory
        .as_ref()
        .map(|response| map_observatory(response, &config.required_headers));
    let (header_grade, missing_headers) = match headers {
        Some(Ok(assessment)) => (assessment.grade, assessment.missing_headers),
        Some(Err(e)) => {
            flag(flags, MissingSignal::HeaderGrade, &e.to_string());
            (FALLBACK_GRADE.to_string(), Vec::new())
        }
        None => {
            flag(flags, MissingSignal::HeaderGrade, "no Observatory scan");
            (FALLBACK_GRADE.to_string(), Vec::new())
        }
    };

    tracing::debug!(%threat_status, %tls_grade, %header_grade, "mapped security signals");
    SecuritySignals {
        threat_status,
        tls_grade,
        header_grade,
        missing_headers,
    }
}

fn flag(flags: &mut MissingDataFlags, signal: MissingSignal, reason: &str) {
    tracing::warn!(signal = %signal, "signal unavailable: {reason}");
    flags.flag(signal);
}
