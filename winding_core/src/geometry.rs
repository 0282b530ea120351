//! Derived machine geometry: pole pitch, coil pitch, q, slot angle.
//!
//! Everything here is a pure function of `WindingParams`. Validation happens
//! once in `Geometry::derive`; every later stage works on validated values.

use crate::config::{PitchMode, WindingParams};
use crate::error::{Result, WindingError};

/// Smallest supported slot count.
pub const MIN_SLOTS: i64 = 6;
/// Smallest supported pole count.
pub const MIN_POLES: i64 = 2;
/// Smallest supported phase count.
pub const MIN_PHASES: i64 = 3;
/// Largest supported slot count; bounds memory for a single layout.
pub const MAX_SLOTS: i64 = 100_000;
/// Largest supported phase count.
pub const MAX_PHASES: i64 = MAX_SLOTS;

/// Validated machine geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Slot count Z.
    pub slots: usize,
    /// Pole count 2p.
    pub poles: usize,
    /// Phase count m.
    pub phases: usize,
    pub pitch: PitchMode,
    /// Pole pitch in slots, `Z / 2p`.
    pub tau: f64,
    /// `round(tau)`, the full-pitch coil span.
    pub tau_base: usize,
    /// Coil pitch in slots.
    pub y: usize,
    /// Theoretical slots per pole per phase, `Z / (2p * m)`.
    pub q: f64,
    /// Electrical angle between adjacent slots, degrees.
    pub alpha_deg: f64,
    /// Pitch ratio `y / tau`.
    pub beta: f64,
    pub q_is_integer: bool,
    pub tau_is_integer: bool,
}

impl Geometry {
    pub fn derive(params: &WindingParams) -> Result<Self> {
        validate_counts(params)?;

        // Ranges checked above: all three are positive.
        let slots = params.slots as usize;
        let poles = params.poles as usize;
        let phases = params.phases as usize;

        let tau = slots as f64 / poles as f64;
        let tau_base = tau.round() as usize;

        let y = match params.pitch {
            PitchMode::Full => tau_base,
            PitchMode::Short => {
                if tau_base < 2 {
                    return Err(invalid(format!(
                        "short pitch needs a pole pitch of at least 2 slots (tau = {tau:.3})"
                    )));
                }
                tau_base - clamp_offset(params.offset, tau_base)
            }
        };

        let q = slots as f64 / (poles * phases) as f64;
        let alpha_deg = (360 * (poles / 2)) as f64 / slots as f64;
        let beta = y as f64 / tau;

        let geometry = Self {
            slots,
            poles,
            phases,
            pitch: params.pitch,
            tau,
            tau_base,
            y,
            q,
            alpha_deg,
            beta,
            q_is_integer: slots % (poles * phases) == 0,
            tau_is_integer: slots % poles == 0,
        };
        tracing::debug!(
            slots,
            poles,
            phases,
            tau,
            y,
            q,
            alpha_deg,
            "geometry derived"
        );
        Ok(geometry)
    }

    #[inline]
    pub fn alpha_rad(&self) -> f64 {
        self.alpha_deg.to_radians()
    }

    /// True when the coil spans the rounded pole pitch.
    #[inline]
    pub fn is_full_pitch(&self) -> bool {
        self.y == self.tau_base
    }

    /// Slots-per-pole-per-phase rounded up and down, computed exactly.
    pub fn q_bounds(&self) -> (usize, usize) {
        let per = self.poles * self.phases;
        let floor = self.slots / per;
        let ceil = if self.slots % per == 0 { floor } else { floor + 1 };
        (floor, ceil)
    }
}

/// Short-pitch offset actually applied: the requested offset when it lies in
/// `[1, tau_base)`, otherwise 1.
pub fn clamp_offset(offset: i64, tau_base: usize) -> usize {
    match usize::try_from(offset) {
        Ok(o) if o >= 1 && o < tau_base => o,
        _ => 1,
    }
}

fn invalid(msg: String) -> eyre::Report {
    eyre::Report::new(WindingError::InvalidConfiguration(msg))
}

fn validate_counts(p: &WindingParams) -> Result<()> {
    if p.slots <= 0 || p.poles <= 0 || p.phases <= 0 {
        return Err(invalid(format!(
            "slots, poles and phases must be positive integers (Z={}, 2p={}, m={})",
            p.slots, p.poles, p.phases
        )));
    }
    if p.slots < MIN_SLOTS || p.poles < MIN_POLES || p.phases < MIN_PHASES {
        return Err(invalid(format!(
            "need Z >= {MIN_SLOTS}, 2p >= {MIN_POLES}, m >= {MIN_PHASES} (got Z={}, 2p={}, m={})",
            p.slots, p.poles, p.phases
        )));
    }
    if p.poles % 2 != 0 {
        return Err(invalid(format!(
            "number of poles must be even (got {})",
            p.poles
        )));
    }
    if p.slots > MAX_SLOTS {
        return Err(invalid(format!(
            "slot count {} exceeds the supported maximum of {MAX_SLOTS}",
            p.slots
        )));
    }
    if p.phases > MAX_PHASES {
        return Err(invalid(format!(
            "phase count {} exceeds the supported maximum of {MAX_PHASES}",
            p.phases
        )));
    }
    // round(Z / 2p) == 0 leaves no coil span at all.
    if 2 * p.slots < p.poles {
        return Err(invalid(format!(
            "pole pitch rounds to zero slots (Z={}, 2p={})",
            p.slots, p.poles
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_offset_falls_back_to_one() {
        assert_eq!(clamp_offset(2, 6), 2);
        assert_eq!(clamp_offset(5, 6), 5);
        assert_eq!(clamp_offset(0, 6), 1);
        assert_eq!(clamp_offset(6, 6), 1);
        assert_eq!(clamp_offset(-3, 6), 1);
    }

    #[test]
    fn q_bounds_are_exact() {
        let g = Geometry::derive(&WindingParams::new(30, 4, 3)).unwrap();
        assert_eq!(g.q_bounds(), (2, 3));
        let g = Geometry::derive(&WindingParams::new(36, 4, 3)).unwrap();
        assert_eq!(g.q_bounds(), (3, 3));
    }

    #[test]
    fn sub_slot_pole_pitch_keeps_a_one_slot_span() {
        // tau = 0.75 rounds to 1; tau = 0.5 rounds half up to 1
        let g = Geometry::derive(&WindingParams::new(6, 8, 3)).unwrap();
        assert_eq!((g.tau_base, g.y), (1, 1));
        let g = Geometry::derive(&WindingParams::new(6, 12, 3)).unwrap();
        assert_eq!(g.y, 1);
        assert!(Geometry::derive(&WindingParams::new(6, 14, 3)).is_err());
    }

    #[test]
    fn half_slot_pole_pitch_rounds_up() {
        // tau = 2.5 rounds half away from zero.
        let g = Geometry::derive(&WindingParams::new(10, 4, 3)).unwrap();
        assert_eq!(g.tau_base, 3);
        assert_eq!(g.y, 3);
        assert!(!g.tau_is_integer);
    }
}
