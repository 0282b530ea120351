//! Holder for the most recently published design.
//!
//! A publish computes into a fresh value and swaps one `Arc` under a write
//! lock. Readers clone the `Arc`, so they see either the old design or the
//! new one in full. A failed publish leaves the current design untouched.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::WindingParams;
use crate::design::{WindingDesign, generate};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct LayoutCell {
    current: RwLock<Option<Arc<WindingDesign>>>,
}

impl LayoutCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently published design, if any.
    pub fn current(&self) -> Option<Arc<WindingDesign>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Generate for `params` and publish the result. Identical parameters
    /// reuse the published design without recomputing.
    pub fn publish(&self, params: &WindingParams) -> Result<Arc<WindingDesign>> {
        if let Some(existing) = self.current()
            && existing.params == *params
        {
            tracing::debug!(%params, "publish reused current design");
            return Ok(existing);
        }

        let design = match generate(params) {
            Ok(d) => Arc::new(d),
            Err(e) => {
                tracing::warn!(%params, error = %e, "publish rejected; keeping current design");
                return Err(e);
            }
        };

        let mut slot = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&design));
        drop(slot);

        tracing::info!(%params, label = design.combo_label(), "design published");
        Ok(design)
    }

    /// Drop the published design.
    pub fn clear(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}
