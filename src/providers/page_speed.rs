//! PageSpeed Insights (Lighthouse) payload.

use crate::error::{BeePulseError, ErrorContext, Result};
use crate::model::AuditScores;
use serde::Deserialize;

/// `runPagespeed` response, reduced to the fields the audit needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResponse {
    #[serde(default)]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LighthouseResult {
    #[serde(default)]
    pub categories: Option<LighthouseCategories>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LighthouseCategories {
    #[serde(default)]
    pub performance: Option<LighthouseCategory>,
    #[serde(default)]
    pub seo: Option<LighthouseCategory>,
    #[serde(default)]
    pub accessibility: Option<LighthouseCategory>,
    #[serde(default, rename = "best-practices")]
    pub best_practices: Option<LighthouseCategory>,
}

/// A category score on the 0-1 scale; Lighthouse reports `null` when the
/// category errored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LighthouseCategory {
    #[serde(default)]
    pub score: Option<f64>,
}

/// Map a PageSpeed payload to 0-100 audit scores.
///
/// Absent or `null` categories count as 0. A payload without a categories
/// block is rejected, since the audit is the one mandatory signal.
pub fn map_page_speed(response: &PageSpeedResponse) -> Result<AuditScores> {
    let categories = response
        .lighthouse_result
        .as_ref()
        .and_then(|result| result.categories.as_ref())
        .ok_or_else(|| {
            BeePulseError::missing_field("lighthouseResult.categories", "PageSpeed response")
        })
        .context("page speed")?;

    Ok(AuditScores {
        performance: category_score(categories.performance.as_ref()),
        seo: category_score(categories.seo.as_ref()),
        accessibility: category_score(categories.accessibility.as_ref()),
        best_practices: category_score(categories.best_practices.as_ref()),
    })
}

fn category_score(category: Option<&LighthouseCategory>) -> u8 {
    let Some(score) = category.and_then(|c| c.score) else {
        return 0;
    };
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
