//! BeePulse Score engine.
//!
//! A pure pipeline from [`MeasurementBundle`](crate::model::MeasurementBundle)
//! to [`ScoreResult`]:
//!
//! - **Grade mapping**: letter grades onto 0-100
//! - **Normalization**: audit and security sub-scores
//! - **Core Web Vitals**: real-user good shares into a device score
//! - **Blending**: weighted combination that adapts to missing real-user data
//! - **Recommendations**: fixed rule set, priority-ordered, capped at five
//!
//! # Usage
//!
//! ```no_run
//! use beepulse::model::{AuditScores, MeasurementBundle, SecuritySignals, ThreatStatus};
//! use beepulse::scoring::PulseScorer;
//!
//! let bundle = MeasurementBundle::new(
//!     AuditScores::new(68, 92, 85, 78),
//!     SecuritySignals::new(ThreatStatus::Ok, "A", "B+"),
//! );
//! let result = PulseScorer::score(&bundle);
//!
//! println!("BeePulse Score: {}/100 ({})", result.final_score, result.rating);
//! for rec in &result.recommendations {
//!     println!("- {}: {}", rec.area, rec.message);
//! }
//! ```

mod blend;
mod grade;
mod normalize;
mod recommendations;
mod scorer;
mod vitals;

pub use blend::{blend, finalize, Blend, BlendWeights, ScoreBreakdown};
pub use grade::{grade_to_score, is_failing, Grade};
pub use normalize::{audit_sub_score, normalize, security_sub_score, SubScores};
pub use recommendations::{
    evaluate, Recommendation, RecommendationArea, RuleId, MAX_RECOMMENDATIONS,
};
pub use scorer::{PulseScorer, ScoreRating, ScoreResult, SCORING_ENGINE_VERSION};
pub use vitals::{
    device_score, good_average, real_user_score, score_from_good_average,
    PASSING_GOOD_PERCENTAGE,
};
