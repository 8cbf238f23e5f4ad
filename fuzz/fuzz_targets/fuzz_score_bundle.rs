#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz bundle deserialization followed by scoring.
///
/// Any bundle that parses must score without panicking and stay in range.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(bundle) = beepulse::pipeline::parse_bundle_str(s) {
            let result = beepulse::PulseScorer::score(&bundle);
            assert!(result.final_score <= 100);
            assert!(result.recommendations.len() <= beepulse::scoring::MAX_RECOMMENDATIONS);
        }
    }
});
