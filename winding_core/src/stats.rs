//! Read-only statistics over a finished layout.

use std::collections::BTreeMap;
use std::fmt;

use crate::geometry::Geometry;
use crate::layout::{Phase, Polarity, WindingLayout};

/// Tolerance for comparing effective and theoretical q.
pub const Q_TOLERANCE: f64 = 1e-9;

/// Maximum number of phases recorded in a signature.
pub const SIGNATURE_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStatistics {
    /// Slots whose top side belongs to each configured phase.
    pub phase_coil_count: BTreeMap<Phase, usize>,
    pub all_slots_used_top: bool,
    pub all_slots_used_bottom: bool,
    /// Effective slots per pole per phase of the reference phase.
    pub actual_q: f64,
    /// `actual_q` matches the theoretical q.
    pub q_consistent: bool,
    pub phase_pattern: PhaseSignature,
}

impl LayoutStatistics {
    pub fn from_layout(layout: &WindingLayout, geom: &Geometry) -> Self {
        let mut phase_coil_count: BTreeMap<Phase, usize> =
            Phase::all(geom.phases).map(|p| (p, 0)).collect();
        let mut top_used = 0usize;
        let mut bottom_used = 0usize;
        for slot in layout.slots() {
            if let Some(top) = &slot.top {
                *phase_coil_count.entry(top.phase).or_insert(0) += 1;
                top_used += 1;
            }
            if slot.bottom.is_some() {
                bottom_used += 1;
            }
        }

        let z = layout.slot_count();
        let reference = phase_coil_count.get(&Phase::A).copied().unwrap_or(0);
        let actual_q = effective_q(reference, geom.poles);
        let stats = Self {
            phase_coil_count,
            all_slots_used_top: top_used == z,
            all_slots_used_bottom: bottom_used == z,
            actual_q,
            q_consistent: actual_q.is_finite() && (actual_q - geom.q).abs() < Q_TOLERANCE,
            phase_pattern: PhaseSignature::scan(layout, Phase::A),
        };
        if !stats.is_complete() {
            tracing::debug!(
                top_used,
                bottom_used,
                slots = z,
                "layout leaves slots without a conductor"
            );
        }
        stats
    }

    /// Every slot carries both a top and a bottom side.
    pub fn is_complete(&self) -> bool {
        self.all_slots_used_top && self.all_slots_used_bottom
    }

    /// Sum of top sides over all phases.
    pub fn total_coils(&self) -> usize {
        self.phase_coil_count.values().sum()
    }

    pub fn coils_for(&self, phase: Phase) -> usize {
        self.phase_coil_count.get(&phase).copied().unwrap_or(0)
    }
}

/// Reference-phase top sides per pole. Non-finite when `poles == 0`.
pub fn effective_q(reference_coils: usize, poles: usize) -> f64 {
    reference_coils as f64 / poles as f64
}

/// First-seen phases in slot order with the polarity of that first top side,
/// rotated to start at the reference phase. The phases after the reference
/// keep their discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhaseSignature(Vec<(Phase, Polarity)>);

impl PhaseSignature {
    pub fn scan(layout: &WindingLayout, reference: Phase) -> Self {
        let mut seen: Vec<(Phase, Polarity)> = Vec::with_capacity(SIGNATURE_LEN);
        for top in layout.slots().iter().filter_map(|s| s.top.as_ref()) {
            if !seen.iter().any(|(p, _)| *p == top.phase) {
                seen.push((top.phase, top.polarity));
            }
            if seen.len() == SIGNATURE_LEN {
                break;
            }
        }
        if let Some(pos) = seen.iter().position(|(p, _)| *p == reference) {
            seen.rotate_left(pos);
        }
        PhaseSignature(seen)
    }

    pub fn entries(&self) -> &[(Phase, Polarity)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PhaseSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, (phase, polarity)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("  ")?;
            }
            write!(f, "{phase}{}", polarity.sign())?;
        }
        Ok(())
    }
}
