#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    let Ok(cfg) = toml::from_str::<winding_config::Config>(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    // A validated config must map onto engine types without panicking.
    let params = winding_core::WindingParams::from(&cfg);
    let _ = winding_core::ViewFilters::try_from(&cfg.output);
    let _ = winding_core::generate(&params);
});
