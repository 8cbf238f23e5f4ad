//! Canonical measurement model.
//!
//! A [`MeasurementBundle`] carries every signal gathered for one website
//! analysis, already normalized to the scales the scorer expects (0-100
//! percentages, letter grades). Signals that could not be obtained are
//! recorded in [`MissingDataFlags`] instead of being defaulted silently.

mod bundle;
mod missing;

pub use bundle::*;
pub use missing::*;
