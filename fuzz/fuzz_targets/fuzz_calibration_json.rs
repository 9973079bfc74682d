#![no_main]
use libfuzzer_sys::fuzz_target;
use std::path::Path;

fuzz_target!(|data: &str| {
    // Anything that parses must serialize back to an equal document.
    if let Ok(file) = dial_config::parse_calibration_json(data, Path::new("fuzz")) {
        let text = serde_json::to_string(&file).unwrap_or_else(|e| panic!("serialize: {e}"));
        let again = dial_config::parse_calibration_json(&text, Path::new("fuzz"))
            .unwrap_or_else(|e| panic!("re-parse failed: {e}"));
        assert_eq!(file, again);
    }
});
