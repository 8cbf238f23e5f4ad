//! Weighted blending of sub-scores into the final score.

use super::normalize::SubScores;
use serde::{Deserialize, Serialize};

/// Weights applied to each sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlendWeights {
    pub audit: f64,
    pub real_user: f64,
    pub security: f64,
}

impl BlendWeights {
    /// Weights when real-user data participates.
    pub const WITH_REAL_USER: Self = Self {
        audit: 0.60,
        real_user: 0.25,
        security: 0.15,
    };

    /// Weights when real-user data is absent.
    ///
    /// The real-user share moves onto the audit only. The total is 0.85, so
    /// a perfect site without real-user data tops out at 85.
    pub const WITHOUT_REAL_USER: Self = Self {
        audit: 0.70,
        real_user: 0.0,
        security: 0.15,
    };

    #[must_use]
    pub const fn for_availability(real_user_available: bool) -> Self {
        if real_user_available {
            Self::WITH_REAL_USER
        } else {
            Self::WITHOUT_REAL_USER
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.audit + self.real_user + self.security
    }
}

/// Weighted point contribution of each sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub audit_contribution: f64,
    /// `None` when real-user data did not participate
    pub real_user_contribution: Option<f64>,
    pub security_contribution: f64,
}

impl ScoreBreakdown {
    /// Sum of all contributions before rounding.
    #[must_use]
    pub fn raw_total(&self) -> f64 {
        self.audit_contribution
            + self.real_user_contribution.unwrap_or(0.0)
            + self.security_contribution
    }
}

/// Outcome of a blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    pub final_score: u8,
    pub breakdown: ScoreBreakdown,
    pub weights: BlendWeights,
}

/// Blend sub-scores into a final 0-100 integer score.
#[must_use]
pub fn blend(sub_scores: &SubScores) -> Blend {
    let weights = BlendWeights::for_availability(sub_scores.real_user.is_some());
    let breakdown = ScoreBreakdown {
        audit_contribution: sub_scores.audit * weights.audit,
        real_user_contribution: sub_scores.real_user.map(|score| score * weights.real_user),
        security_contribution: sub_scores.security * weights.security,
    };
    let final_score = finalize(breakdown.raw_total());
    tracing::trace!(final_score, ?weights, "blended sub-scores");
    Blend {
        final_score,
        breakdown,
        weights,
    }
}

/// Round to the nearest integer and clamp into 0-100.
#[must_use]
pub fn finalize(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    // clamped first, so the cast cannot truncate
    raw.round().clamp(0.0, 100.0) as u8
}
