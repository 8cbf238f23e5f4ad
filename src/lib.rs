//! **BeePulse: a digital health score for hotel websites.**
//!
//! `beepulse` turns the measurements gathered about a hotel website (page-speed
//! audits, real-user Core Web Vitals, TLS and security-header grades, threat
//! list status, domain and DNS records) into one 0-100 score plus a short,
//! prioritized list of recommendations.
//!
//! The scoring engine is pure and deterministic: the same bundle always yields
//! the same result, and it never fails on well-formed input. Signals that could
//! not be collected are tracked explicitly and the weighting adapts to them.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The [`MeasurementBundle`] and its parts, plus the
//!   [`MissingDataFlags`] tracker for unavailable signals.
//! - **[`scoring`]**: Grade mapping, sub-score normalization, Core Web Vitals
//!   aggregation, weighted blending and the recommendation engine, combined by
//!   [`PulseScorer`].
//! - **[`providers`]**: Mapping of raw provider payloads (PageSpeed Insights,
//!   Chrome UX Report, Safe Browsing, SSL Labs, HTTP Observatory, RDAP,
//!   DNS-over-HTTPS) into a bundle.
//! - **[`reports`]**: Terminal summary and JSON rendering of score results.
//! - **[`pipeline`]** / **[`cli`]**: File loading, output handling and the
//!   command handlers behind the `beepulse` binary.
//!
//! ## Getting Started
//!
//! ```no_run
//! use beepulse::{pipeline::parse_bundle_str, PulseScorer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let json = std::fs::read_to_string("hotel.json")?;
//!     let bundle = parse_bundle_str(&json)?;
//!     let result = PulseScorer::score(&bundle);
//!
//!     println!("{} ({})", result.final_score, result.rating);
//!     for line in result.disclaimers() {
//!         println!("note: {line}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Assembling a bundle from provider payloads
//!
//! ```no_run
//! use beepulse::config::ProviderConfig;
//! use beepulse::providers::{assemble, PageSpeedResponse, ProviderPayloads};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let psi: PageSpeedResponse =
//!         serde_json::from_str(&std::fs::read_to_string("psi.json")?)?;
//!     let payloads = ProviderPayloads::new(psi);
//!
//!     let bundle = assemble(&payloads, &ProviderConfig::default(), chrono::Utc::now())?;
//!     println!("{} signal(s) missing", bundle.missing_data_flags.len());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Scores are bounded 0-100, so the f64/u8 casts cannot lose meaningful range
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod reports;
pub mod scoring;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, BehaviorConfig, OutputConfig, ProviderConfig};
pub use config::{ConfigError, Validatable};
pub use error::{BeePulseError, ErrorContext, Result};
pub use model::{MeasurementBundle, MissingDataFlags, MissingSignal};
pub use reports::{ReportFormat, ReportGenerator};
pub use scoring::{Grade, PulseScorer, Recommendation, ScoreResult, SCORING_ENGINE_VERSION};
