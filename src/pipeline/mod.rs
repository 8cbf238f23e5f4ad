//! Pipeline orchestration for scoring runs.
//!
//! Shared load → score → report plumbing used by the CLI command handlers.

mod output;
mod parse;

pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{load_bundle, load_optional_payload, load_payload, parse_bundle_str, PayloadPaths};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - every site met the threshold (or none was set)
    pub const SUCCESS: i32 = 0;
    /// At least one final score was below `--min-score`
    pub const BELOW_THRESHOLD: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
