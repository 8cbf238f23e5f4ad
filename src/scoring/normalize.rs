//! Per-signal normalization into 0-100 sub-scores.

use super::grade::grade_to_score;
use super::vitals::real_user_score;
use crate::model::{AuditScores, MeasurementBundle, SecuritySignals};
use serde::{Deserialize, Serialize};

/// Point budget of the base audit.
pub const AUDIT_BUDGET: f64 = 60.0;
pub const PERFORMANCE_POINTS: f64 = 35.0;
pub const SEO_POINTS: f64 = 15.0;
pub const BEST_PRACTICES_POINTS: f64 = 5.0;
pub const ACCESSIBILITY_POINTS: f64 = 5.0;

/// Point budget of the security block.
pub const SECURITY_BUDGET: f64 = 15.0;
pub const TLS_POINTS: f64 = 10.0;
pub const HEADER_POINTS: f64 = 5.0;

/// Weighted average of the four audit categories, 0-100.
///
/// Performance dominates (35 of 60 points), SEO follows (15), best practices
/// and accessibility carry 5 each.
#[must_use]
pub fn audit_sub_score(audit: &AuditScores) -> f64 {
    let audit = audit.clamped();
    let weighted = f64::from(audit.performance) * PERFORMANCE_POINTS
        + f64::from(audit.seo) * SEO_POINTS
        + f64::from(audit.best_practices) * BEST_PRACTICES_POINTS
        + f64::from(audit.accessibility) * ACCESSIBILITY_POINTS;
    (weighted / AUDIT_BUDGET).clamp(0.0, 100.0)
}

/// Security sub-score, 0-100.
///
/// An `AT_RISK` threat verdict short-circuits to 0 and the grades are not
/// consulted.
#[must_use]
pub fn security_sub_score(security: &SecuritySignals) -> f64 {
    if security.threat_status.is_at_risk() {
        return 0.0;
    }
    let tls = grade_part(&security.tls_grade, TLS_POINTS);
    let headers = grade_part(&security.header_grade, HEADER_POINTS);
    (tls + headers).clamp(0.0, 100.0)
}

fn grade_part(grade: &str, points: f64) -> f64 {
    f64::from(grade_to_score(grade)) / 100.0 * (points / SECURITY_BUDGET) * 100.0
}

/// Canonical sub-scores for one bundle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScores {
    pub audit: f64,
    /// `None` when real-user data is absent or flagged missing
    pub real_user: Option<f64>,
    pub security: f64,
    /// Security was forced to 0 by the threat verdict
    pub threat_override: bool,
}

/// Normalize every dimension of a bundle.
#[must_use]
pub fn normalize(bundle: &MeasurementBundle) -> SubScores {
    let sub_scores = SubScores {
        audit: audit_sub_score(&bundle.audit),
        real_user: bundle.real_user_data().map(real_user_score),
        security: security_sub_score(&bundle.security),
        threat_override: bundle.security.threat_status.is_at_risk(),
    };
    tracing::trace!(?sub_scores, "normalized bundle");
    sub_scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DeviceVitals, MetricSample, MissingSignal, RealUserExperience, ThreatStatus,
    };

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_points_fill_budgets() {
        let audit_total =
            PERFORMANCE_POINTS + SEO_POINTS + BEST_PRACTICES_POINTS + ACCESSIBILITY_POINTS;
        assert!(approx(audit_total, AUDIT_BUDGET));
        assert!(approx(TLS_POINTS + HEADER_POINTS, SECURITY_BUDGET));
    }

    #[test]
    fn test_audit_sub_score_weights() {
        assert!(approx(audit_sub_score(&AuditScores::new(100, 100, 100, 100)), 100.0));
        assert!(approx(audit_sub_score(&AuditScores::new(0, 0, 0, 0)), 0.0));
        assert!(approx(audit_sub_score(&AuditScores::new(100, 0, 0, 0)), 58.33));
        assert!(approx(audit_sub_score(&AuditScores::new(0, 100, 0, 0)), 25.0));
        assert!(approx(audit_sub_score(&AuditScores::new(0, 0, 100, 0)), 8.33));
        assert!(approx(audit_sub_score(&AuditScores::new(0, 0, 0, 100)), 8.33));
        assert!(approx(audit_sub_score(&AuditScores::new(68, 92, 85, 78)), 76.25));
    }

    #[test]
    fn test_audit_sub_score_clamps_noise() {
        let noisy = AuditScores::new(250, 180, 101, 100);
        assert!(approx(audit_sub_score(&noisy), 100.0));
    }

    #[test]
    fn test_security_sub_score() {
        let perfect = SecuritySignals::new(ThreatStatus::Ok, "A+", "A+");
        assert!(approx(security_sub_score(&perfect), 100.0));

        let mixed = SecuritySignals::new(ThreatStatus::Ok, "A", "B+");
        assert!(approx(security_sub_score(&mixed), 86.67));

        let untrusted = SecuritySignals::new(ThreatStatus::Ok, "T", "A+");
        assert!(approx(security_sub_score(&untrusted), 33.33));
    }

    #[test]
    fn test_at_risk_overrides_grades() {
        let at_risk = SecuritySignals::new(ThreatStatus::AtRisk, "A+", "A+");
        assert_eq!(security_sub_score(&at_risk), 0.0);
    }

    #[test]
    fn test_normalize_skips_flagged_real_user_data() {
        let vitals = DeviceVitals::new(
            MetricSample::new(1800.0, 90),
            MetricSample::new(0.02, 90),
            MetricSample::new(120.0, 90),
        );
        let mut bundle = MeasurementBundle::new(
            AuditScores::new(90, 90, 90, 90),
            SecuritySignals::new(ThreatStatus::Ok, "A", "A"),
        );
        bundle.real_user_experience = Some(RealUserExperience {
            mobile: vitals,
            desktop: vitals,
        });

        assert_eq!(normalize(&bundle).real_user, Some(100.0));

        bundle.missing_data_flags.flag(MissingSignal::RealUserMobile);
        let sub_scores = normalize(&bundle);
        assert_eq!(sub_scores.real_user, None);
        assert!(!sub_scores.threat_override);
    }
}
