//! Summary report generator for shell output.
//!
//! Provides a compact, human-readable summary for terminal usage.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator, ScoredSite};
use crate::scoring::{ScoreRating, ScoreResult};
use std::fmt::Write;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn rating_color(rating: ScoreRating) -> &'static str {
    match rating {
        ScoreRating::Excellent => "green",
        ScoreRating::Good => "yellow",
        _ => "red",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn render_site(
        &self,
        out: &mut String,
        site: &ScoredSite,
        config: &ReportConfig,
    ) -> Result<(), ReportError> {
        let result = &site.result;

        writeln!(
            out,
            "{} {}",
            self.color("BeePulse Score:", "bold"),
            site.label
        )?;
        writeln!(out, "{}", self.color(&"─".repeat(40), "dim"))?;

        let score = format!("{}/100", result.final_score);
        writeln!(
            out,
            "  {}  {}  {}",
            self.color(&score, "bold"),
            self.color(result.rating.label(), rating_color(result.rating)),
            self.color(result.rating.description(), "dim")
        )?;

        if result.sub_scores.threat_override {
            writeln!(
                out,
                "  {}",
                self.color("Site is flagged as unsafe: security score forced to 0", "red")
            )?;
        }

        if config.show_breakdown {
            self.render_breakdown(out, result)?;
        }

        if !result.recommendations.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.color("Recommendations:", "cyan"))?;
            for (idx, rec) in result.recommendations.iter().enumerate() {
                writeln!(out, "  {}. [{}] {}", idx + 1, rec.area, rec.message)?;
                writeln!(out, "     {}", self.color(&rec.action_link, "dim"))?;
            }
        }

        let disclaimers = result.disclaimers();
        if !disclaimers.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", self.color("Missing data:", "yellow"))?;
            for line in disclaimers {
                writeln!(out, "  ! {line}")?;
            }
        }

        Ok(())
    }

    fn render_breakdown(&self, out: &mut String, result: &ScoreResult) -> Result<(), ReportError> {
        let weights = &result.weights;
        let breakdown = &result.breakdown;

        writeln!(out)?;
        writeln!(out, "{}", self.color("Breakdown:", "cyan"))?;
        writeln!(
            out,
            "  Audit       {:>5.1}/100  x {:.2} = {:>5.1}",
            result.sub_scores.audit, weights.audit, breakdown.audit_contribution
        )?;
        match (result.sub_scores.real_user, breakdown.real_user_contribution) {
            (Some(sub), Some(contribution)) => writeln!(
                out,
                "  Real users  {:>5.1}/100  x {:.2} = {:>5.1}",
                sub, weights.real_user, contribution
            )?,
            _ => writeln!(
                out,
                "  Real users  {}",
                self.color("not available, weight dropped", "dim")
            )?,
        }
        writeln!(
            out,
            "  Security    {:>5.1}/100  x {:.2} = {:>5.1}",
            result.sub_scores.security, weights.security, breakdown.security_contribution
        )?;
        Ok(())
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate_score_report(
        &self,
        sites: &[ScoredSite],
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let mut out = String::new();
        for (idx, site) in sites.iter().enumerate() {
            if idx > 0 {
                writeln!(out)?;
            }
            self.render_site(&mut out, site, config)?;
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
