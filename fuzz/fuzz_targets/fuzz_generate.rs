#![no_main]
use libfuzzer_sys::arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use winding_core::{WindingParams, generate};

#[derive(Debug, Arbitrary)]
struct Input {
    slots: i16,
    poles: i16,
    phases: i8,
    short: bool,
    offset: i64,
}

fuzz_target!(|input: Input| {
    let mut params = WindingParams::new(
        i64::from(input.slots),
        i64::from(input.poles),
        i64::from(input.phases),
    );
    if input.short {
        params = params.short_pitch(input.offset);
    }
    let Ok(d) = generate(&params) else {
        return;
    };

    let z = d.geometry.slots;
    assert_eq!(d.layout.slot_count(), z);
    assert!(d.geometry.y >= 1 && d.geometry.y <= d.geometry.tau_base);
    for coil in d.layout.coils() {
        assert_eq!(coil.end_slot, (coil.start_slot - 1 + d.geometry.y) % z + 1);
        if let Some(next) = d.layout.next_in_series(coil) {
            assert!(coil.same_group(next));
            assert!(next.start_slot > coil.start_slot);
        }
    }
    let chained: usize = d.series_chains().iter().map(|c| c.len()).sum();
    assert_eq!(chained, d.layout.coils().len());
});
