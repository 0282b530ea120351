//! `From`/`TryFrom` implementations bridging `winding_config` types to
//! `winding_core` types.

use crate::config::{PitchMode, WindingParams};
use crate::error::Report;
use crate::view::{LayerFilter, PhaseFilter, ViewFilters};

// ── PitchMode ────────────────────────────────────────────────────────────────

impl From<winding_config::PitchMode> for PitchMode {
    fn from(m: winding_config::PitchMode) -> Self {
        match m {
            winding_config::PitchMode::Full => PitchMode::Full,
            winding_config::PitchMode::Short => PitchMode::Short,
        }
    }
}

// ── WindingParams ────────────────────────────────────────────────────────────

impl From<&winding_config::Config> for WindingParams {
    fn from(c: &winding_config::Config) -> Self {
        Self {
            slots: c.machine.slots,
            poles: c.machine.poles,
            phases: c.machine.phases,
            pitch: c.pitch.mode.into(),
            offset: c.pitch.offset,
        }
    }
}

impl From<&winding_config::BatchRow> for WindingParams {
    fn from(r: &winding_config::BatchRow) -> Self {
        Self {
            slots: r.slots,
            poles: r.poles,
            phases: r.phases,
            pitch: r.pitch.into(),
            // empty offset column: minimum short-pitching
            offset: r.offset.unwrap_or(1),
        }
    }
}

// ── ViewFilters ──────────────────────────────────────────────────────────────

impl TryFrom<&winding_config::OutputCfg> for ViewFilters {
    type Error = Report;

    fn try_from(c: &winding_config::OutputCfg) -> Result<Self, Self::Error> {
        let phase = c
            .phase_filter
            .parse::<PhaseFilter>()
            .map_err(Report::new)?;
        let layer = c
            .layer_filter
            .parse::<LayerFilter>()
            .map_err(Report::new)?;
        Ok(Self { phase, layer })
    }
}
