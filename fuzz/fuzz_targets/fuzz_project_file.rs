#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

use dotship::infrastructure::ProjectFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Malformed XML must be an error, never a panic
        let _ = ProjectFile::parse(Path::new("Fuzz.csproj"), content);
    }
});
