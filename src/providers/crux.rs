//! Chrome UX Report (real-user) payload, one record per form factor.

use crate::model::{DeviceVitals, MetricSample};
use serde::Deserialize;

/// `records:queryRecord` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CruxResponse {
    #[serde(default)]
    pub record: Option<CruxRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CruxRecord {
    #[serde(default)]
    pub metrics: CruxMetrics,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CruxMetrics {
    #[serde(default)]
    pub largest_contentful_paint: Option<CruxMetric>,
    #[serde(default)]
    pub cumulative_layout_shift: Option<CruxMetric>,
    #[serde(default)]
    pub interaction_to_next_paint: Option<CruxMetric>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CruxMetric {
    #[serde(default)]
    pub percentiles: Option<CruxPercentiles>,
    /// Buckets ordered good, needs-improvement, poor
    #[serde(default)]
    pub histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CruxPercentiles {
    #[serde(default)]
    pub p75: Option<NumberOrString>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistogramBin {
    #[serde(default)]
    pub density: f64,
}

/// CrUX encodes layout shift percentiles as strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Map one form factor's record to device vitals.
///
/// Returns `None` when the record or any of the three metrics is absent,
/// which callers flag as missing real-user data for that device.
#[must_use]
pub fn map_crux(response: &CruxResponse) -> Option<DeviceVitals> {
    let metrics = &response.record.as_ref()?.metrics;
    Some(DeviceVitals::new(
        metric_sample(metrics.largest_contentful_paint.as_ref()?)?,
        metric_sample(metrics.cumulative_layout_shift.as_ref()?)?,
        metric_sample(metrics.interaction_to_next_paint.as_ref()?)?,
    ))
}

fn metric_sample(metric: &CruxMetric) -> Option<MetricSample> {
    let p75 = metric.percentiles.as_ref()?.p75.as_ref()?.as_f64()?;
    Some(MetricSample::new(p75, good_percentage(&metric.histogram)))
}

/// Share of the first ("good") histogram bucket, 0-100.
fn good_percentage(histogram: &[HistogramBin]) -> u8 {
    histogram.first().map_or(0, |bin| {
        let pct = bin.density * 100.0;
        if pct.is_finite() {
            pct.round().clamp(0.0, 100.0) as u8
        } else {
            0
        }
    })
}
