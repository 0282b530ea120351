#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(rows) = winding_config::parse_batch_csv(data) else {
        return;
    };
    for row in rows.iter().take(8) {
        let _ = winding_core::generate(&winding_core::WindingParams::from(row));
    }
});
