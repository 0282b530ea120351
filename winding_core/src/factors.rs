//! Pitch, distribution and winding factors.

use std::f64::consts::FRAC_PI_2;

use crate::geometry::Geometry;

/// Fundamental-harmonic winding factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindingFactors {
    /// Pitch factor Kp.
    pub kp: f64,
    /// Distribution factor Kd.
    pub kd: f64,
    /// Winding factor Kw = Kp * Kd.
    pub kw: f64,
    /// Coil-group size used in the Kd formula: q for integer-slot designs,
    /// `Z / gcd(Z, 2p)` otherwise.
    pub distribution_count: f64,
}

impl WindingFactors {
    pub fn compute(geom: &Geometry) -> Self {
        let kp = pitch_factor(geom.beta);
        let distribution_count = if geom.q_is_integer {
            geom.q
        } else {
            (geom.slots / gcd(geom.slots, geom.poles)) as f64
        };
        let kd = distribution_factor(distribution_count, geom.alpha_rad());
        Self {
            kp,
            kd,
            kw: kp * kd,
            distribution_count,
        }
    }
}

/// `sin(beta * 90°)`.
#[inline]
pub fn pitch_factor(beta: f64) -> f64 {
    (beta * FRAC_PI_2).sin()
}

/// `sin(n·α/2) / (n·sin(α/2))` for `n` coil sides spread `alpha_rad` apart.
#[inline]
pub fn distribution_factor(n: f64, alpha_rad: f64) -> f64 {
    (n * alpha_rad / 2.0).sin() / (n * (alpha_rad / 2.0).sin())
}

/// Greatest common divisor; `gcd(a, 0) == a`.
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
