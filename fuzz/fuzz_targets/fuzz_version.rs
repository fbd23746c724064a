#![no_main]

use libfuzzer_sys::fuzz_target;

use dotship::domain::value_objects::ProjectVersion;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(version) = ProjectVersion::parse(input) {
            // A parsed version always classifies
            let _ = version.build_configuration();
            assert_eq!(version.as_str(), input.trim());
        }
    }
});
