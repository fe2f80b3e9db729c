#![no_main]
use libfuzzer_sys::fuzz_target;
use structdiff::cli::{parse_document, DocumentFormat};
use structdiff::CompareEngine;

/// Fuzz the walker on pairs of arbitrary JSON documents.
///
/// The input is split at the first NUL byte into a left and a right
/// document; anything that parses is compared and rendered.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (left, right) = s.split_once('\0').unwrap_or((s, s));

    let (Ok(a), Ok(b)) = (
        parse_document(left, DocumentFormat::Json),
        parse_document(right, DocumentFormat::Json),
    ) else {
        return;
    };

    let engine = CompareEngine::new();
    let report = engine.compare(&a, &b);
    let _ = report.to_string();
    let _ = report.discrepancy_count();
    assert!(engine.compare(&a, &a).is_equal());
});
