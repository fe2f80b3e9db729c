#![no_main]
use libfuzzer_sys::fuzz_target;
use structdiff::cli::{parse_document, DocumentFormat};

/// Fuzz document parsing in both supported formats.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_document(s, DocumentFormat::Json);
        let _ = parse_document(s, DocumentFormat::Yaml);
    }
});
