//! `generate`: the single entry point from parameters to a finished design.

use std::fmt;

use crate::allocation::{self, Strategy};
use crate::chain::{SeriesChain, series_chains};
use crate::config::WindingParams;
use crate::error::Result;
use crate::factors::WindingFactors;
use crate::geometry::Geometry;
use crate::layout::WindingLayout;
use crate::stats::LayoutStatistics;
use crate::view::{LayoutView, ViewFilters};

/// Integer/fractional slot × full/short pitch classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindingType {
    IntegerFull,
    IntegerShort,
    FractionalFull,
    FractionalShort,
}

impl WindingType {
    pub fn classify(geom: &Geometry) -> Self {
        match (geom.q_is_integer, geom.is_full_pitch()) {
            (true, true) => WindingType::IntegerFull,
            (true, false) => WindingType::IntegerShort,
            (false, true) => WindingType::FractionalFull,
            (false, false) => WindingType::FractionalShort,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WindingType::IntegerFull => "Integer-slot, Full-pitch",
            WindingType::IntegerShort => "Integer-slot, Short-pitch",
            WindingType::FractionalFull => "Fractional-slot, Full-pitch",
            WindingType::FractionalShort => "Fractional-slot, Short-pitch",
        }
    }
}

impl fmt::Display for WindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything derived from one set of parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindingDesign {
    pub params: WindingParams,
    pub geometry: Geometry,
    pub factors: WindingFactors,
    pub strategy: Strategy,
    pub layout: WindingLayout,
    pub stats: LayoutStatistics,
}

impl WindingDesign {
    pub fn winding_type(&self) -> WindingType {
        WindingType::classify(&self.geometry)
    }

    pub fn combo_label(&self) -> &'static str {
        self.winding_type().label()
    }

    /// How y relates to tau, e.g. `y = τ - 1` or `y = round(2.50) = 3`.
    pub fn pitch_info(&self) -> String {
        let g = &self.geometry;
        let shortened = g.tau_base - g.y;
        match (g.tau_is_integer, shortened) {
            (true, 0) => "y = τ".to_string(),
            (true, n) => format!("y = τ - {n}"),
            (false, 0) => format!("y = round({:.2}) = {}", g.tau, g.y),
            (false, n) => format!("y = round({:.2}) - {n} = {}", g.tau, g.y),
        }
    }

    pub fn series_chains(&self) -> Vec<SeriesChain> {
        series_chains(&self.layout)
    }

    pub fn view(&self, filters: ViewFilters) -> LayoutView<'_> {
        LayoutView::new(&self.layout, filters)
    }
}

/// Validate, derive geometry and factors, allocate slots and collect
/// statistics. Fails with `WindingError::InvalidConfiguration` before any
/// layout is built.
pub fn generate(params: &WindingParams) -> Result<WindingDesign> {
    let geometry = Geometry::derive(params)?;
    let factors = WindingFactors::compute(&geometry);
    let (strategy, layout) = allocation::allocate(&geometry);
    let stats = LayoutStatistics::from_layout(&layout, &geometry);

    tracing::debug!(
        %params,
        strategy = strategy.as_str(),
        coils = layout.coils().len(),
        kw = factors.kw,
        complete = stats.is_complete(),
        "winding generated"
    );

    Ok(WindingDesign {
        params: *params,
        geometry,
        factors,
        strategy,
        layout,
        stats,
    })
}
