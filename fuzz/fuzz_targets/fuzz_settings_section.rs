#![no_main]

use libfuzzer_sys::fuzz_target;

use dotship::infrastructure::config::bind_section;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(section) = serde_json::from_str::<serde_json::Value>(content) {
            let _ = bind_section(&section);
        }
    }
});
