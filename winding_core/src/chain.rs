//! Series connection of coils within a (phase, pole) group.
//!
//! `link_group` runs during allocation; `series_chains` walks the finished
//! layout the way a wiring diagram or an animation would.

use crate::layout::{Coil, CoilId, Phase, WindingLayout};

/// Order a group around the stator and thread `next_coil_id` through it.
/// The last coil keeps `next_coil_id == None`.
pub fn link_group(group: &mut [Coil]) {
    group.sort_by_key(|c| c.start_slot);
    for i in 1..group.len() {
        let next = group[i].id;
        group[i - 1].next_coil_id = Some(next);
    }
    if let Some(last) = group.last_mut() {
        last.next_coil_id = None;
    }
}

/// One series-connected run of coils.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesChain {
    pub phase: Phase,
    pub pole_index: usize,
    /// Coil ids in connection order.
    pub coil_ids: Vec<CoilId>,
}

impl SeriesChain {
    pub fn len(&self) -> usize {
        self.coil_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coil_ids.is_empty()
    }
}

/// Trace every chain by following `next_coil_id` from each not-yet-visited
/// coil, in coil order. Single-coil groups yield single-coil chains.
pub fn series_chains(layout: &WindingLayout) -> Vec<SeriesChain> {
    chains_over(layout, layout.coils())
}

/// Like `series_chains`, restricted to `visible` coils. Successors outside the
/// visible set end the chain.
pub fn chains_over(layout: &WindingLayout, visible: &[Coil]) -> Vec<SeriesChain> {
    let max_id = visible.iter().map(|c| c.id as usize).max().unwrap_or(0);
    let mut shown = vec![false; max_id + 1];
    for c in visible {
        shown[c.id as usize] = true;
    }
    let mut visited = vec![false; max_id + 1];

    let mut chains = Vec::new();
    for head in visible {
        if visited[head.id as usize] {
            continue;
        }
        let mut ids = Vec::new();
        let mut cur = Some(head);
        while let Some(c) = cur {
            let slot = c.id as usize;
            if slot > max_id || !shown[slot] || visited[slot] {
                break;
            }
            visited[slot] = true;
            ids.push(c.id);
            cur = layout.next_in_series(c);
        }
        chains.push(SeriesChain {
            phase: head.phase,
            pole_index: head.pole_index,
            coil_ids: ids,
        });
    }
    chains
}
