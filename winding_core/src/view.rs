//! Filtered, read-only views for external renderers.
//!
//! Filters and the visible coil subset are explicit values handed to the
//! renderer; nothing here touches shared state.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::chain::{SeriesChain, chains_over};
use crate::error::{Result, WindingError};
use crate::layout::{Coil, CoilId, CoilSide, Layer, Phase, WindingLayout};

/// `ALL` or a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseFilter {
    #[default]
    All,
    Only(Phase),
}

impl PhaseFilter {
    #[inline]
    pub fn admits(self, phase: Phase) -> bool {
        match self {
            PhaseFilter::All => true,
            PhaseFilter::Only(p) => p == phase,
        }
    }
}

impl FromStr for PhaseFilter {
    type Err = WindingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(PhaseFilter::All)
        } else {
            s.parse().map(PhaseFilter::Only)
        }
    }
}

impl fmt::Display for PhaseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseFilter::All => f.write_str("ALL"),
            PhaseFilter::Only(p) => write!(f, "{p}"),
        }
    }
}

/// `BOTH`, `TOP` or `BOTTOM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerFilter {
    #[default]
    Both,
    Top,
    Bottom,
}

impl LayerFilter {
    #[inline]
    pub fn shows(self, layer: Layer) -> bool {
        match self {
            LayerFilter::Both => true,
            LayerFilter::Top => layer == Layer::Top,
            LayerFilter::Bottom => layer == Layer::Bottom,
        }
    }
}

impl FromStr for LayerFilter {
    type Err = WindingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOTH" => Ok(LayerFilter::Both),
            "TOP" => Ok(LayerFilter::Top),
            "BOTTOM" => Ok(LayerFilter::Bottom),
            _ => Err(WindingError::InvalidConfiguration(format!(
                "unknown layer filter '{s}' (expected BOTH, TOP or BOTTOM)"
            ))),
        }
    }
}

impl fmt::Display for LayerFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayerFilter::Both => "BOTH",
            LayerFilter::Top => "TOP",
            LayerFilter::Bottom => "BOTTOM",
        })
    }
}

/// Phase and layer selection for one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewFilters {
    pub phase: PhaseFilter,
    pub layer: LayerFilter,
}

/// One visible conductor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSide<'a> {
    /// 1-based slot number.
    pub slot: usize,
    pub layer: Layer,
    pub side: &'a CoilSide,
}

/// A layout seen through filters and an optional visible-coil subset.
#[derive(Debug, Clone)]
pub struct LayoutView<'a> {
    layout: &'a WindingLayout,
    filters: ViewFilters,
    visible: &'a [Coil],
    // None: every coil is visible
    visible_ids: Option<HashSet<CoilId>>,
}

impl<'a> LayoutView<'a> {
    pub fn new(layout: &'a WindingLayout, filters: ViewFilters) -> Self {
        Self {
            layout,
            filters,
            visible: layout.coils(),
            visible_ids: None,
        }
    }

    /// Restrict the view to `coils`, typically a prefix from `AnimationStepper`.
    pub fn with_visible_coils(mut self, coils: &'a [Coil]) -> Self {
        self.visible = coils;
        self.visible_ids = Some(coils.iter().map(|c| c.id).collect());
        self
    }

    pub fn layout(&self) -> &'a WindingLayout {
        self.layout
    }

    pub fn filters(&self) -> ViewFilters {
        self.filters
    }

    fn side_visible(&self, side: &CoilSide) -> bool {
        self.filters.phase.admits(side.phase)
            && self
                .visible_ids
                .as_ref()
                .is_none_or(|ids| ids.contains(&side.coil_id))
    }

    /// Occupied sides passing both filters, in slot order, top before bottom.
    pub fn sides(&self) -> impl Iterator<Item = VisibleSide<'a>> + '_ {
        let layer = self.filters.layer;
        self.layout.slots().iter().flat_map(move |slot| {
            [Layer::Top, Layer::Bottom]
                .into_iter()
                .filter(move |l| layer.shows(*l))
                .filter_map(move |l| {
                    slot.side(l)
                        .filter(|side| self.side_visible(side))
                        .map(|side| VisibleSide {
                            slot: slot.index,
                            layer: l,
                            side,
                        })
                })
        })
    }

    /// Visible coils admitted by the phase filter, in creation order.
    pub fn coils(&self) -> impl Iterator<Item = &'a Coil> + '_ {
        let phase = self.filters.phase;
        self.visible.iter().filter(move |c| phase.admits(c.phase))
    }

    /// Series chains among visible coils, filtered by phase.
    pub fn chains(&self) -> Vec<SeriesChain> {
        chains_over(self.layout, self.visible)
            .into_iter()
            .filter(|c| self.filters.phase.admits(c.phase))
            .collect()
    }
}

/// Seam for consumers that draw or tabulate a layout.
pub trait LayoutRenderer {
    type Output;

    fn render(&mut self, view: &LayoutView<'_>) -> Result<Self::Output>;
}

/// Reveals coils one at a time in creation order.
#[derive(Debug, Clone)]
pub struct AnimationStepper<'a> {
    coils: &'a [Coil],
    revealed: usize,
}

impl<'a> AnimationStepper<'a> {
    pub fn new(layout: &'a WindingLayout) -> Self {
        Self {
            coils: layout.coils(),
            revealed: 0,
        }
    }

    /// Reveal the next coil. `None` once every coil is visible.
    pub fn step(&mut self) -> Option<&'a Coil> {
        let coil = self.coils.get(self.revealed)?;
        self.revealed += 1;
        Some(coil)
    }

    /// Reveal up to `n` more coils; returns how many were revealed.
    pub fn advance(&mut self, n: usize) -> usize {
        let before = self.revealed;
        self.revealed = (self.revealed + n).min(self.coils.len());
        self.revealed - before
    }

    pub fn visible(&self) -> &'a [Coil] {
        &self.coils[..self.revealed]
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_finished(&self) -> bool {
        self.revealed == self.coils.len()
    }

    pub fn reset(&mut self) {
        self.revealed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse_case_insensitively() {
        assert_eq!("all".parse::<PhaseFilter>().unwrap(), PhaseFilter::All);
        assert_eq!(
            "b".parse::<PhaseFilter>().unwrap(),
            PhaseFilter::Only(Phase::B)
        );
        assert_eq!("Top".parse::<LayerFilter>().unwrap(), LayerFilter::Top);
        assert!("middle".parse::<LayerFilter>().is_err());
        assert!("?".parse::<PhaseFilter>().is_err());
    }

    #[test]
    fn layer_filter_shows() {
        assert!(LayerFilter::Both.shows(Layer::Top));
        assert!(LayerFilter::Both.shows(Layer::Bottom));
        assert!(!LayerFilter::Top.shows(Layer::Bottom));
        assert!(!LayerFilter::Bottom.shows(Layer::Top));
    }
}
