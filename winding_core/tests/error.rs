use rstest::rstest;
use winding_core::error::{ErrorKind, WindingError, kind_of};
use winding_core::{Phase, WindingParams, generate};

#[rstest]
#[case::too_few_slots(WindingParams::new(5, 2, 3), "Z >= 6")]
#[case::too_few_poles(WindingParams::new(24, 0, 3), "positive integers")]
#[case::too_few_phases(WindingParams::new(24, 4, 2), "m >= 3")]
#[case::odd_poles(WindingParams::new(24, 3, 3), "even")]
#[case::negative_slots(WindingParams::new(-24, 4, 3), "positive integers")]
#[case::zero_slot_pole_pitch(WindingParams::new(6, 14, 3), "rounds to zero")]
#[case::huge(WindingParams::new(1_000_000, 4, 3), "supported maximum")]
#[case::huge_phase_count(WindingParams::new(24, 4, 1_000_000), "supported maximum")]
#[case::short_on_tiny_pitch(WindingParams::new(8, 8, 3).short_pitch(1), "short pitch")]
fn invalid_machines_are_rejected(#[case] params: WindingParams, #[case] needle: &str) {
    let err = generate(&params).expect_err("should be rejected");

    match err.downcast_ref::<WindingError>() {
        Some(e @ WindingError::InvalidConfiguration(msg)) => {
            assert_eq!(e.kind(), ErrorKind::InvalidConfiguration);
            assert!(msg.contains(needle), "expected '{needle}' in '{msg}'");
            assert_eq!(e.message(), msg.as_str());
        }
        other => panic!("expected InvalidConfiguration, got: {other:?}"),
    }
    assert_eq!(kind_of(&err), Some(ErrorKind::InvalidConfiguration));
}

#[test]
fn display_carries_kind_prefix() {
    let err = generate(&WindingParams::new(24, 3, 3)).unwrap_err();
    assert!(err.to_string().starts_with("invalid configuration:"));
    assert_eq!(ErrorKind::InvalidConfiguration.as_str(), "InvalidConfiguration");
}

#[test]
fn retry_fails_identically() {
    let params = WindingParams::new(24, 5, 3);
    let a = generate(&params).unwrap_err().to_string();
    let b = generate(&params).unwrap_err().to_string();
    assert_eq!(a, b);
}

#[test]
fn full_pitch_on_single_slot_pole_pitch_is_allowed() {
    // tau = 1: full pitch spans one slot, short pitch would span none
    let d = generate(&WindingParams::new(8, 8, 3)).expect("full pitch is fine");
    assert_eq!(d.geometry.y, 1);
}

#[rstest]
#[case::fewer_slots_than_poles(WindingParams::new(6, 8, 3))]
#[case::pole_pitch_below_one_slot(WindingParams::new(10, 12, 3))]
#[case::half_slot_pole_pitch(WindingParams::new(6, 12, 3))]
#[case::more_phases_than_slots(WindingParams::new(6, 2, 7))]
fn small_machines_generate_a_layout(#[case] params: WindingParams) {
    let d = generate(&params).expect("valid machine");
    assert_eq!(d.geometry.y, d.geometry.tau_base);
    assert!(d.geometry.y >= 1);
    assert!(d.factors.kp >= 0.0 && d.factors.kp <= 1.0 + 1e-12);
    assert!(!d.layout.coils().is_empty());
    for c in d.layout.coils() {
        assert_eq!(c.end_slot, (c.start_slot - 1 + d.geometry.y) % d.geometry.slots + 1);
    }
}

#[test]
fn fewer_slots_than_poles_keeps_a_positive_pitch_factor() {
    // tau = 0.75, y = 1, beta = 4/3: Kp = sin(120°)
    let d = generate(&WindingParams::new(6, 8, 3)).unwrap();
    assert!((d.factors.kp - 3f64.sqrt() / 2.0).abs() < 1e-12);
    assert_eq!(d.layout.coils().len(), 6);
    assert!(d.stats.is_complete());
}

#[test]
fn phases_beyond_slot_count_are_declared_but_unused() {
    // q = 6/14: one coil each for A..F, none for the remainder phase G
    let d = generate(&WindingParams::new(6, 2, 7)).unwrap();
    assert_eq!(d.stats.phase_coil_count.len(), 7);
    assert_eq!(d.stats.coils_for(Phase::new(5)), 1);
    assert_eq!(d.stats.coils_for(Phase::new(6)), 0);
    assert!(d.stats.is_complete());
}
