//! Rule-based improvement recommendations.
//!
//! A fixed set of rules is evaluated in definition order against the bundle.
//! Matches are stably sorted by area priority and capped at
//! [`MAX_RECOMMENDATIONS`].

use super::grade::is_failing;
use crate::model::MeasurementBundle;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Upper bound on recommendations returned for one bundle.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Product area a recommendation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationArea {
    /// Booking funnel and payment conversion
    Checkout,
    Security,
    /// Mobile experience and delivery speed
    Mobile,
    Seo,
    Dns,
}

impl RecommendationArea {
    /// Sort priority, higher first.
    #[must_use]
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Checkout => 4,
            Self::Security => 3,
            Self::Mobile => 2,
            Self::Seo => 1,
            Self::Dns => 0,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Checkout => "Checkout",
            Self::Security => "Security",
            Self::Mobile => "Mobile experience",
            Self::Seo => "SEO",
            Self::Dns => "DNS",
        }
    }
}

impl std::fmt::Display for RecommendationArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of the rule that produced a recommendation.
///
/// Declaration order is rule-definition order, which decides ties between
/// rules of the same area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    SlowCheckout,
    MobileExperience,
    SeoVisibility,
    SecurityIncident,
    MissingSecurityHeaders,
    DnsConfiguration,
    PaymentConversion,
    DomainAuthority,
    CdnAdoption,
}

impl RuleId {
    /// Every rule, in definition order.
    pub const ALL: [Self; 9] = [
        Self::SlowCheckout,
        Self::MobileExperience,
        Self::SeoVisibility,
        Self::SecurityIncident,
        Self::MissingSecurityHeaders,
        Self::DnsConfiguration,
        Self::PaymentConversion,
        Self::DomainAuthority,
        Self::CdnAdoption,
    ];

    #[must_use]
    pub const fn area(&self) -> RecommendationArea {
        match self {
            Self::SlowCheckout | Self::PaymentConversion => RecommendationArea::Checkout,
            Self::MobileExperience | Self::CdnAdoption => RecommendationArea::Mobile,
            Self::SeoVisibility | Self::DomainAuthority => RecommendationArea::Seo,
            Self::SecurityIncident | Self::MissingSecurityHeaders => RecommendationArea::Security,
            Self::DnsConfiguration => RecommendationArea::Dns,
        }
    }

    /// Whether the rule fires for a bundle.
    #[must_use]
    pub fn applies(&self, bundle: &MeasurementBundle) -> bool {
        let audit = bundle.audit.clamped();
        match self {
            Self::SlowCheckout => audit.performance < 70,
            Self::MobileExperience => {
                audit.accessibility < 80
                    || bundle
                        .real_user_data()
                        .is_some_and(|rue| rue.worst_good_percentage() < 50)
            }
            Self::SeoVisibility => audit.seo < 80,
            Self::SecurityIncident => {
                let security = &bundle.security;
                security.threat_status.is_at_risk()
                    || is_failing(&security.tls_grade)
                    || is_failing(&security.header_grade)
            }
            Self::MissingSecurityHeaders => bundle.security.missing_headers.len() > 2,
            Self::DnsConfiguration => bundle.dns.is_incomplete(),
            Self::PaymentConversion => audit.performance < 80 || audit.best_practices < 80,
            Self::DomainAuthority => bundle.domain.age_years.is_some_and(|age| age < 1.0),
            Self::CdnAdoption => bundle.dns.cdn().is_none() && audit.performance < 70,
        }
    }

    /// User-facing message for a bundle this rule applies to.
    #[must_use]
    pub fn message(&self, bundle: &MeasurementBundle) -> String {
        match self {
            Self::SlowCheckout => "Low performance can hurt conversions. Speed up the booking flow with a faster checkout.".to_string(),
            Self::MobileExperience => "The mobile experience is lacking. Improve usability and speed on mobile devices.".to_string(),
            Self::SeoVisibility => "SEO can be improved to increase online visibility and attract more guests.".to_string(),
            Self::SecurityIncident => "Security problems detected. Serve HTTPS correctly and add security headers.".to_string(),
            Self::MissingSecurityHeaders => format!(
                "Missing security headers: {}. Configure them properly.",
                bundle.security.missing_headers.join(", ")
            ),
            Self::DnsConfiguration => "DNS configuration is incomplete. Check the MX, NS and A records for better reliability.".to_string(),
            Self::PaymentConversion => "Optimize conversions with local payment methods and a simplified checkout.".to_string(),
            Self::DomainAuthority => "New domain detected. Focus on building authority with quality content and backlinks.".to_string(),
            Self::CdnAdoption => "Consider a CDN to improve global loading speed of your site.".to_string(),
        }
    }

    /// Deep link to the proposed product or guide.
    #[must_use]
    pub const fn action_link(&self) -> &'static str {
        match self {
            Self::SlowCheckout => "https://omnibees.com/pt/solucoes/bee-direct",
            Self::MobileExperience => "https://omnibees.com/pt/solucoes/bee-mobile",
            Self::SeoVisibility | Self::DomainAuthority => {
                "https://omnibees.com/pt/solucoes/bee-connect"
            }
            Self::SecurityIncident => "https://omnibees.com/pt/suporte/boas-praticas-seguranca",
            Self::MissingSecurityHeaders => "https://omnibees.com/pt/suporte/configuracao-headers",
            Self::DnsConfiguration => "https://omnibees.com/pt/suporte/configuracao-dns",
            Self::PaymentConversion => "https://omnibees.com/pt/solucoes/bee2pay",
            Self::CdnAdoption => "https://omnibees.com/pt/suporte/otimizacao-performance",
        }
    }

    /// Build the recommendation this rule emits for a bundle.
    #[must_use]
    pub fn recommend(&self, bundle: &MeasurementBundle) -> Recommendation {
        Recommendation {
            rule: *self,
            area: self.area(),
            message: self.message(bundle),
            action_link: self.action_link().to_string(),
        }
    }
}

/// One improvement suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub rule: RuleId,
    pub area: RecommendationArea,
    pub message: String,
    pub action_link: String,
}

/// Evaluate every rule and return at most [`MAX_RECOMMENDATIONS`] matches,
/// highest-priority area first.
#[must_use]
pub fn evaluate(bundle: &MeasurementBundle) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RuleId::ALL
        .iter()
        .filter(|rule| rule.applies(bundle))
        .map(|rule| rule.recommend(bundle))
        .collect();

    // sort_by_key is stable: same-area rules keep definition order
    recommendations.sort_by_key(|rec| Reverse(rec.area.priority()));
    if recommendations.len() > MAX_RECOMMENDATIONS {
        tracing::debug!(
            matched = recommendations.len(),
            kept = MAX_RECOMMENDATIONS,
            "truncating recommendations"
        );
        recommendations.truncate(MAX_RECOMMENDATIONS);
    }
    recommendations
}
