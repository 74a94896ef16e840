#![no_main]

use desviar::filter::SignalFilter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Filter expressions arrive as command-line text, so only valid UTF-8
    // is interesting. Parsing may error but must never panic.
    if let Ok(expr) = std::str::from_utf8(data) {
        let _ = SignalFilter::from_expr(expr);
    }
});
