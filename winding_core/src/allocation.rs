//! Slot allocation: turns a validated `Geometry` into a `WindingLayout`.
//!
//! Two strategies:
//! - **Balanced** (integer q, three phases): each phase starts 120° electrical
//!   after the previous one and every pole gets exactly q coils. Fills every
//!   slot in both layers.
//! - **Round-robin** (everything else): a single slot cursor walks the stator,
//!   handing `ceil(q)` coils to each phase per pole and `floor(q)` to the last
//!   phase. Exhaustive coverage is not guaranteed; read it from
//!   `LayoutStatistics`.
//!
//! Both strategies emit coils group by group, each (phase, pole) group sorted
//! and series-linked by `chain::link_group` before its sides are written.

use std::fmt;

use crate::chain::link_group;
use crate::geometry::Geometry;
use crate::layout::{Coil, CoilId, Phase, Polarity, WindingLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Exact 120° placement for integer-slot three-phase designs.
    Balanced,
    /// Cursor-based distribution for fractional-slot or non-three-phase designs.
    RoundRobin,
}

impl Strategy {
    /// Balanced iff q is an integer and m == 3.
    pub fn select(geom: &Geometry) -> Self {
        if geom.q_is_integer && geom.phases == 3 {
            Strategy::Balanced
        } else {
            Strategy::RoundRobin
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Balanced => "balanced",
            Strategy::RoundRobin => "round-robin",
        }
    }

    pub fn allocate(self, geom: &Geometry) -> WindingLayout {
        let groups = match self {
            Strategy::Balanced => balanced_groups(geom),
            Strategy::RoundRobin => round_robin_groups(geom),
        };
        assemble(geom.slots, groups)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select a strategy and run it.
pub fn allocate(geom: &Geometry) -> (Strategy, WindingLayout) {
    let strategy = Strategy::select(geom);
    tracing::debug!(
        strategy = strategy.as_str(),
        q = geom.q,
        phases = geom.phases,
        "allocating slots"
    );
    (strategy, strategy.allocate(geom))
}

/// Builds coils with sequential ids; slot arguments are 0-based.
struct CoilFactory {
    next_id: CoilId,
    slots: usize,
    y: usize,
}

impl CoilFactory {
    fn new(geom: &Geometry) -> Self {
        Self {
            next_id: 1,
            slots: geom.slots,
            y: geom.y,
        }
    }

    fn make(&mut self, phase: Phase, pole_index: usize, start: usize) -> Coil {
        let id = self.next_id;
        self.next_id += 1;
        let end = (start + self.y) % self.slots;
        Coil {
            id,
            phase,
            pole_index,
            start_slot: start + 1,
            end_slot: end + 1,
            polarity: Polarity::for_pole(pole_index),
            next_coil_id: None,
        }
    }
}

fn balanced_groups(geom: &Geometry) -> Vec<Vec<Coil>> {
    let z = geom.slots;
    let delta = (120.0 / geom.alpha_deg).round() as usize;
    let starts = [0, delta % z, (2 * delta) % z];
    let q = geom.q_bounds().0;

    let mut factory = CoilFactory::new(geom);
    let mut groups = Vec::with_capacity(3 * geom.poles);
    for (phase, phase_start) in Phase::all(3).zip(starts) {
        for pole in 0..geom.poles {
            let pole_offset = (pole as f64 * geom.tau).round() as usize;
            let group = (0..q)
                .map(|c| factory.make(phase, pole, (phase_start + pole_offset + c) % z))
                .collect();
            groups.push(group);
        }
    }
    groups
}

fn round_robin_groups(geom: &Geometry) -> Vec<Vec<Coil>> {
    let z = geom.slots;
    let (q_floor, q_ceil) = geom.q_bounds();
    let remainder = Phase::new(geom.phases - 1);

    let mut factory = CoilFactory::new(geom);
    let mut groups = Vec::new();
    let mut cursor = 0;
    'poles: for pole in 0..geom.poles {
        for phase in Phase::all(geom.phases) {
            if cursor >= z {
                break 'poles;
            }
            let n = if phase == remainder { q_floor } else { q_ceil };
            let mut group = Vec::with_capacity(n);
            for _ in 0..n {
                if cursor >= z {
                    break;
                }
                group.push(factory.make(phase, pole, cursor));
                cursor += 1;
            }
            if !group.is_empty() {
                groups.push(group);
            }
        }
    }
    if cursor < z {
        tracing::debug!(filled = cursor, slots = z, "round-robin left slots without a top side");
    }
    groups
}

fn assemble(z: usize, groups: Vec<Vec<Coil>>) -> WindingLayout {
    let mut layout = WindingLayout::with_slots(z);
    for mut group in groups {
        link_group(&mut group);
        for coil in group {
            layout.place(coil);
        }
    }
    layout
}
