//! Letter-grade mapping.
//!
//! TLS and header assessment providers issue letter grades. These map onto
//! the 0-100 scale through a fixed, monotonic table. Anything unrecognized
//! maps to 0.

use serde::{Deserialize, Serialize};

/// A letter grade issued by a security-assessment provider.
///
/// Variants are declared best-first; `T` and `M` mark certificate trust
/// failures (untrusted chain, hostname mismatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    #[serde(rename = "D-")]
    DMinus,
    E,
    F,
    T,
    M,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Self; 16] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::DMinus,
        Self::E,
        Self::F,
        Self::T,
        Self::M,
    ];

    /// Parse a grade string. Surrounding whitespace is ignored, letters are
    /// case-sensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let grade = match raw.trim() {
            "A+" => Self::APlus,
            "A" => Self::A,
            "A-" => Self::AMinus,
            "B+" => Self::BPlus,
            "B" => Self::B,
            "B-" => Self::BMinus,
            "C+" => Self::CPlus,
            "C" => Self::C,
            "C-" => Self::CMinus,
            "D+" => Self::DPlus,
            "D" => Self::D,
            "D-" => Self::DMinus,
            "E" => Self::E,
            "F" => Self::F,
            "T" => Self::T,
            "M" => Self::M,
            _ => return None,
        };
        Some(grade)
    }

    #[must_use]
    pub const fn letter(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::E => "E",
            Self::F => "F",
            Self::T => "T",
            Self::M => "M",
        }
    }

    /// Numeric value on the 0-100 scale.
    #[must_use]
    pub const fn score(&self) -> u8 {
        match self {
            Self::APlus => 100,
            Self::A => 90,
            Self::AMinus => 85,
            Self::BPlus => 80,
            Self::B => 75,
            Self::BMinus => 70,
            Self::CPlus => 65,
            Self::C => 60,
            Self::CMinus => 55,
            Self::DPlus => 50,
            Self::D => 45,
            Self::DMinus => 40,
            Self::E => 30,
            Self::F => 20,
            Self::T | Self::M => 0,
        }
    }

    /// Certificate trust failure markers.
    #[must_use]
    pub const fn is_trust_failure(&self) -> bool {
        matches!(self, Self::T | Self::M)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}

impl std::str::FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unrecognized grade '{s}'"))
    }
}

/// Map a grade string to 0-100. Unknown strings map to 0.
#[must_use]
pub fn grade_to_score(grade: &str) -> u8 {
    Grade::parse(grade).map_or(0, |g| g.score())
}

/// Whether a raw grade string denotes an outright failing grade (`F`).
#[must_use]
pub fn is_failing(grade: &str) -> bool {
    Grade::parse(grade) == Some(Grade::F)
}
