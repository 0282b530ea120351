#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Double-layer stator winding layout engine.
//!
//! Given slot count Z, pole count 2p, phase count m and a pitch selection,
//! this crate derives the design quantities (τ, y, q, α, β), the winding
//! factors (Kp, Kd, Kw) and a concrete assignment of coils to slots with the
//! series connection order inside each phase/pole group.
//!
//! ## Architecture
//!
//! - **Geometry**: validation and derived quantities (`geometry` module)
//! - **Factors**: pitch/distribution/winding factors (`factors` module)
//! - **Allocation**: balanced and round-robin slot strategies (`allocation`)
//! - **Chains**: series linking and chain tracing (`chain`)
//! - **Statistics**: coverage, effective q, phase signature (`stats`)
//! - **Views**: phase/layer filters and incremental reveal for renderers (`view`)
//! - **Publication**: atomic replacement of the current design (`publish`)
//!
//! `generate` is pure and synchronous; the same parameters always give an
//! identical `WindingDesign`.

pub mod allocation;
pub mod chain;
pub mod config;
pub mod conversions;
pub mod design;
pub mod error;
pub mod factors;
pub mod geometry;
pub mod layout;
pub mod publish;
pub mod stats;
pub mod view;

pub use allocation::Strategy;
pub use chain::SeriesChain;
pub use config::{PitchMode, WindingParams};
pub use design::{WindingDesign, WindingType, generate};
pub use error::{ErrorKind, WindingError};
pub use factors::WindingFactors;
pub use geometry::Geometry;
pub use layout::{Coil, CoilId, CoilSide, Layer, Phase, Polarity, Slot, WindingLayout};
pub use publish::LayoutCell;
pub use stats::{LayoutStatistics, PhaseSignature};
pub use view::{
    AnimationStepper, LayerFilter, LayoutRenderer, LayoutView, PhaseFilter, ViewFilters,
    VisibleSide,
};
