//! BeePulse scorer.
//!
//! Combines normalization, blending and the recommendation engine into one
//! [`ScoreResult`].

use super::blend::{blend, BlendWeights, ScoreBreakdown};
use super::normalize::{normalize, SubScores};
use super::recommendations::{evaluate, Recommendation};
use crate::model::{MeasurementBundle, MissingDataFlags};
use serde::{Deserialize, Serialize};

/// Scoring engine version, bumped whenever weights or rules change.
pub const SCORING_ENGINE_VERSION: &str = "1.0";

/// Coarse rating for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ScoreRating {
    /// 80-100
    Excellent,
    /// 50-79
    Good,
    /// Below 50
    NeedsAttention,
}

impl ScoreRating {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            50..=79 => Self::Good,
            _ => Self::NeedsAttention,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsAttention => "Needs attention",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "The site is fast, secure and well configured",
            Self::Good => "The site is healthy with room for improvement",
            Self::NeedsAttention => "The site has issues that are likely costing bookings",
        }
    }
}

impl std::fmt::Display for ScoreRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Full scoring outcome for one bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub scoring_engine_version: String,
    /// 0-100
    pub final_score: u8,
    pub rating: ScoreRating,
    pub breakdown: ScoreBreakdown,
    pub sub_scores: SubScores,
    pub weights: BlendWeights,
    /// At most five, highest-priority area first
    pub recommendations: Vec<Recommendation>,
    /// Signals that were unavailable, for disclaimers
    pub missing_data: MissingDataFlags,
}

impl ScoreResult {
    /// Whether real-user data participated in the blend.
    #[must_use]
    pub fn used_real_user_data(&self) -> bool {
        self.breakdown.real_user_contribution.is_some()
    }

    /// Disclaimer lines for every unavailable signal.
    #[must_use]
    pub fn disclaimers(&self) -> Vec<&'static str> {
        self.missing_data.disclaimers()
    }
}

/// Stateless scorer. Safe to call from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulseScorer;

impl PulseScorer {
    /// Score a bundle. Total: never fails, never panics.
    #[must_use]
    pub fn score(bundle: &MeasurementBundle) -> ScoreResult {
        let sub_scores = normalize(bundle);
        let blended = blend(&sub_scores);
        let recommendations = evaluate(bundle);

        tracing::debug!(
            final_score = blended.final_score,
            recommendations = recommendations.len(),
            missing = bundle.missing_data_flags.len(),
            "scored bundle"
        );

        ScoreResult {
            scoring_engine_version: SCORING_ENGINE_VERSION.to_string(),
            final_score: blended.final_score,
            rating: ScoreRating::from_score(blended.final_score),
            breakdown: blended.breakdown,
            sub_scores,
            weights: blended.weights,
            recommendations,
            missing_data: bundle.missing_data_flags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AuditScores, DnsRecords, MissingSignal, SecuritySignals, ThreatStatus,
    };
    use crate::scoring::RuleId;

    fn reference_bundle() -> MeasurementBundle {
        let mut bundle = MeasurementBundle::new(
            AuditScores::new(68, 92, 85, 78),
            SecuritySignals::new(ThreatStatus::Ok, "A", "B+")
                .with_missing_headers(["Content-Security-Policy", "X-Frame-Options"]),
        );
        bundle.dns = DnsRecords::complete(2);
        bundle.missing_data_flags = [MissingSignal::RealUserMobile, MissingSignal::RealUserDesktop]
            .into_iter()
            .collect();
        bundle
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(ScoreRating::from_score(100), ScoreRating::Excellent);
        assert_eq!(ScoreRating::from_score(80), ScoreRating::Excellent);
        assert_eq!(ScoreRating::from_score(79), ScoreRating::Good);
        assert_eq!(ScoreRating::from_score(50), ScoreRating::Good);
        assert_eq!(ScoreRating::from_score(49), ScoreRating::NeedsAttention);
        assert_eq!(ScoreRating::from_score(0), ScoreRating::NeedsAttention);
    }

    #[test]
    fn test_reference_scenario() {
        let result = PulseScorer::score(&reference_bundle());

        assert!((result.sub_scores.audit - 76.25).abs() < 0.01);
        assert!((result.sub_scores.security - 86.67).abs() < 0.01);
        assert_eq!(result.sub_scores.real_user, None);
        // 76.25 * 0.70 + 86.67 * 0.15 = 66.375
        assert_eq!(result.final_score, 66);
        assert_eq!(result.rating, ScoreRating::Good);
        assert!(!result.used_real_user_data());
        assert_eq!(result.disclaimers().len(), 2);

        let rules: Vec<RuleId> = result.recommendations.iter().map(|r| r.rule).collect();
        assert_eq!(
            rules,
            vec![
                RuleId::SlowCheckout,
                RuleId::PaymentConversion,
                RuleId::CdnAdoption
            ]
        );
    }

    #[test]
    fn test_at_risk_zeroes_security_contribution() {
        let mut bundle = reference_bundle();
        bundle.security = SecuritySignals::new(ThreatStatus::AtRisk, "A+", "A+");
        let result = PulseScorer::score(&bundle);

        assert_eq!(result.breakdown.security_contribution, 0.0);
        assert!(result.sub_scores.threat_override);
    }

    #[test]
    fn test_deterministic() {
        let bundle = reference_bundle();
        assert_eq!(PulseScorer::score(&bundle), PulseScorer::score(&bundle));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_value(PulseScorer::score(&reference_bundle())).expect("serialize");
        assert_eq!(json["finalScore"], 66);
        assert_eq!(json["scoringEngineVersion"], SCORING_ENGINE_VERSION);
        assert!(json["breakdown"]["realUserContribution"].is_null());
        assert_eq!(json["missingData"][0], "real-user-mobile");
        assert_eq!(json["rating"], "Good");
    }
}
