#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz provider payload mapping.
///
/// Feeds the same arbitrary JSON to every provider payload type and assembles
/// whatever parses, exercising the fallback paths for malformed responses.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(page_speed) = serde_json::from_str(s) else {
        return;
    };
    let payloads = beepulse::providers::ProviderPayloads {
        page_speed,
        crux_mobile: serde_json::from_str(s).ok(),
        crux_desktop: serde_json::from_str(s).ok(),
        safe_browsing: serde_json::from_str(s).ok(),
        ssl_labs: serde_json::from_str(s).ok(),
        observatory: serde_json::from_str(s).ok(),
        rdap: serde_json::from_str(s).ok(),
        dns: serde_json::from_str(s).ok(),
    };
    let config = beepulse::config::ProviderConfig::default();
    if let Ok(bundle) = beepulse::providers::assemble(&payloads, &config, chrono::Utc::now()) {
        let _ = beepulse::PulseScorer::score(&bundle);
    }
});
