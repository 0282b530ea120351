//! Slot/coil data model produced by the allocation engine.
//!
//! Slot indices are 1-based (`1..=Z`), matching how windings are drawn and
//! tabulated. A `WindingLayout` is only mutated while it is being assembled
//! inside this crate; consumers receive it by shared reference.

use std::fmt;
use std::str::FromStr;

use crate::error::WindingError;

/// Unique coil identifier, assigned from 1 in creation order.
pub type CoilId = u32;

/// A phase, numbered from 0. Labelled `A`, `B`, `C`, ... and `P27`, `P28`, ...
/// past the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Phase(usize);

impl Phase {
    /// Reference phase for statistics and signatures.
    pub const A: Phase = Phase(0);
    pub const B: Phase = Phase(1);
    pub const C: Phase = Phase(2);

    pub const fn new(index: usize) -> Self {
        Phase(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    /// The first `m` phases in declared order.
    pub fn all(m: usize) -> impl Iterator<Item = Phase> {
        (0..m).map(Phase)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 26 {
            write!(f, "{}", char::from(b'A' + self.0 as u8))
        } else {
            write!(f, "P{}", self.0 + 1)
        }
    }
}

impl FromStr for Phase {
    type Err = WindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_uppercase();
        let bad = || WindingError::InvalidConfiguration(format!("unknown phase label '{s}'"));
        let bytes = t.as_bytes();
        match bytes {
            [c] if c.is_ascii_uppercase() => Ok(Phase(usize::from(c - b'A'))),
            [b'P', rest @ ..] if !rest.is_empty() => {
                let n: usize = t[1..].parse().map_err(|_| bad())?;
                if n < 27 {
                    return Err(bad());
                }
                Ok(Phase(n - 1))
            }
            _ => Err(bad()),
        }
    }
}

/// Current direction of a coil side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Even pole index → positive, odd → negative.
    #[inline]
    pub fn for_pole(pole_index: usize) -> Self {
        if pole_index % 2 == 0 {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }

    pub fn sign(self) -> char {
        match self {
            Polarity::Positive => '+',
            Polarity::Negative => '-',
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
        }
    }
}

/// Physical layer inside a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Top,
    Bottom,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Top => "top",
            Layer::Bottom => "bottom",
        }
    }
}

/// Conductor occupying one layer of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoilSide {
    pub phase: Phase,
    pub polarity: Polarity,
    /// Pole-pair index, 1-based.
    pub pole: usize,
    /// For a top side the coil's end slot, for a bottom side its start slot.
    pub peer_slot: usize,
    pub coil_id: CoilId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// 1-based slot number.
    pub index: usize,
    pub top: Option<CoilSide>,
    pub bottom: Option<CoilSide>,
}

impl Slot {
    fn empty(index: usize) -> Self {
        Self {
            index,
            top: None,
            bottom: None,
        }
    }

    pub fn side(&self, layer: Layer) -> Option<&CoilSide> {
        match layer {
            Layer::Top => self.top.as_ref(),
            Layer::Bottom => self.bottom.as_ref(),
        }
    }

    /// Both layers occupied.
    pub fn is_full(&self) -> bool {
        self.top.is_some() && self.bottom.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coil {
    pub id: CoilId,
    pub phase: Phase,
    /// Pole index `0..2p` of the group this coil was generated for.
    pub pole_index: usize,
    /// 1-based slot holding the top (forward) side.
    pub start_slot: usize,
    /// 1-based slot holding the bottom (return) side.
    pub end_slot: usize,
    /// Polarity of the top side; the bottom side carries the opposite.
    pub polarity: Polarity,
    /// Series successor within the same (phase, pole) group.
    pub next_coil_id: Option<CoilId>,
}

impl Coil {
    /// Pole-pair index, 1-based.
    #[inline]
    pub fn pole_pair(&self) -> usize {
        self.pole_index / 2 + 1
    }

    /// Same phase and same pole group.
    #[inline]
    pub fn same_group(&self, other: &Coil) -> bool {
        self.phase == other.phase && self.pole_index == other.pole_index
    }

    pub(crate) fn top_side(&self) -> CoilSide {
        CoilSide {
            phase: self.phase,
            polarity: self.polarity,
            pole: self.pole_pair(),
            peer_slot: self.end_slot,
            coil_id: self.id,
        }
    }

    pub(crate) fn bottom_side(&self) -> CoilSide {
        CoilSide {
            phase: self.phase,
            polarity: self.polarity.opposite(),
            pole: self.pole_pair(),
            peer_slot: self.start_slot,
            coil_id: self.id,
        }
    }
}

/// Slots plus the flat coil list, in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindingLayout {
    slots: Vec<Slot>,
    coils: Vec<Coil>,
    // position in `coils` of coil id `i + 1`
    by_id: Vec<Option<usize>>,
}

impl WindingLayout {
    pub(crate) fn with_slots(z: usize) -> Self {
        Self {
            slots: (1..=z).map(Slot::empty).collect(),
            coils: Vec::with_capacity(z),
            by_id: Vec::with_capacity(z),
        }
    }

    /// Write both sides of `coil` into their slots and append it.
    pub(crate) fn place(&mut self, coil: Coil) {
        let z = self.slots.len();
        let top = (coil.start_slot + z - 1) % z;
        let bottom = (coil.end_slot + z - 1) % z;
        if let Some(prev) = self.slots[top].top {
            tracing::trace!(slot = top + 1, prev = prev.coil_id, "top side overwritten");
        }
        self.slots[top].top = Some(coil.top_side());
        self.slots[bottom].bottom = Some(coil.bottom_side());

        let id_pos = coil.id as usize - 1;
        if self.by_id.len() <= id_pos {
            self.by_id.resize(id_pos + 1, None);
        }
        self.by_id[id_pos] = Some(self.coils.len());
        self.coils.push(coil);
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn coils(&self) -> &[Coil] {
        &self.coils
    }

    /// Slot count Z.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot by 1-based number.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        index.checked_sub(1).and_then(|i| self.slots.get(i))
    }

    pub fn coil(&self, id: CoilId) -> Option<&Coil> {
        let pos = (id as usize).checked_sub(1)?;
        self.by_id
            .get(pos)
            .copied()
            .flatten()
            .map(|i| &self.coils[i])
    }

    /// Series successor of `coil`, if any.
    pub fn next_in_series(&self, coil: &Coil) -> Option<&Coil> {
        coil.next_coil_id.and_then(|id| self.coil(id))
    }
}
