#![no_main]

use desviar::analyzer::{analyze_table, AnalyzerConfig};
use desviar::table::SignalTable;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Ingestion may reject the bytes, but neither parsing nor the
    // analysis that follows may panic
    if let Ok(table) = SignalTable::from_csv_reader(data) {
        let _ = analyze_table(&table, &AnalyzerConfig::default());
    }
});
