//! Text and JSON rendering of designs, slot tables and chains.

use std::fmt::Write as _;

use serde_json::{Value, json};
use winding_core::error::Result;
use winding_core::{
    Coil, CoilSide, Layer, LayoutRenderer, LayoutView, Phase, SeriesChain, WindingDesign,
};

/// Summary of one design: derived values, factors and verification.
pub fn summary_text(d: &WindingDesign) -> String {
    let g = &d.geometry;
    let f = &d.factors;
    let s = &d.stats;
    let mut out = String::new();

    let _ = writeln!(out, "Machine:  {}", d.params);
    let _ = writeln!(out, "Type:     {}", d.combo_label());
    let _ = writeln!(out, "Strategy: {}", d.strategy);
    let _ = writeln!(out);
    let _ = writeln!(out, "τ (pole pitch)   {:.3} slots", g.tau);
    let _ = writeln!(out, "y (coil pitch)   {} slots  ({})", g.y, d.pitch_info());
    let _ = writeln!(out, "q                {:.3}", g.q);
    let _ = writeln!(out, "α (slot angle)   {:.2}°", g.alpha_deg);
    let _ = writeln!(out, "β (y/τ)          {:.4}", g.beta);
    let _ = writeln!(out);
    let _ = writeln!(out, "Kp {:.4}   Kd {:.4}   Kw {:.4}", f.kp, f.kd, f.kw);
    let _ = writeln!(out);
    let _ = writeln!(out, "Verification:");
    let counts: Vec<String> = Phase::all(g.phases)
        .map(|p| format!("{p}={}", s.coils_for(p)))
        .collect();
    let _ = writeln!(
        out,
        "  coils per phase  {}  (total {})",
        counts.join(" "),
        s.total_coils()
    );
    let _ = writeln!(
        out,
        "  top layer full   {}",
        yes_no(s.all_slots_used_top)
    );
    let _ = writeln!(
        out,
        "  bottom full      {}",
        yes_no(s.all_slots_used_bottom)
    );
    let _ = writeln!(
        out,
        "  actual q         {:.3}  ({})",
        s.actual_q,
        if s.q_consistent {
            "matches q"
        } else {
            "differs from q"
        }
    );
    let (label, detail) = phase_distribution(d);
    let _ = write!(out, "  phase pattern    {label}  ({detail})");
    out
}

/// Signature and note for three-phase designs, a plain `{m}-phase` otherwise.
pub fn phase_distribution(d: &WindingDesign) -> (String, &'static str) {
    let g = &d.geometry;
    match (g.phases, g.q_is_integer) {
        (3, true) => (
            d.stats.phase_pattern.to_string(),
            "3-phase, 120° separation",
        ),
        (3, false) => (d.stats.phase_pattern.to_string(), "3-phase fractional q"),
        (m, _) => (format!("{m}-phase"), "general multi-phase distribution"),
    }
}

pub fn summary_json(d: &WindingDesign) -> Value {
    let g = &d.geometry;
    let f = &d.factors;
    let s = &d.stats;
    let counts: serde_json::Map<String, Value> = s
        .phase_coil_count
        .iter()
        .map(|(p, n)| (p.to_string(), json!(n)))
        .collect();
    let signature: Vec<String> = s
        .phase_pattern
        .entries()
        .iter()
        .map(|(p, pol)| format!("{p}{}", pol.sign()))
        .collect();
    let (label, detail) = phase_distribution(d);

    json!({
        "params": params_json(d),
        "combo_label": d.combo_label(),
        "strategy": d.strategy.as_str(),
        "geometry": {
            "tau": g.tau,
            "tau_base": g.tau_base,
            "y": g.y,
            "pitch_info": d.pitch_info(),
            "q": g.q,
            "q_is_integer": g.q_is_integer,
            "alpha_deg": g.alpha_deg,
            "beta": g.beta,
        },
        "factors": { "kp": f.kp, "kd": f.kd, "kw": f.kw },
        "stats": {
            "phase_coil_count": counts,
            "total_coils": s.total_coils(),
            "all_slots_used_top": s.all_slots_used_top,
            "all_slots_used_bottom": s.all_slots_used_bottom,
            "actual_q": s.actual_q,
            "q_consistent": s.q_consistent,
            "phase_pattern": signature,
        },
        "phase_distribution": { "label": label, "detail": detail },
    })
}

fn params_json(d: &WindingDesign) -> Value {
    json!({
        "slots": d.params.slots,
        "poles": d.params.poles,
        "phases": d.params.phases,
        "pitch": d.params.pitch.as_str(),
        "offset": d.params.offset,
    })
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

fn side_label(side: Option<&CoilSide>) -> String {
    side.map_or_else(
        || ".".to_string(),
        |s| format!("{}{} p{} ->{}", s.phase, s.polarity.sign(), s.pole, s.peer_slot),
    )
}

fn side_json(side: Option<&CoilSide>) -> Value {
    side.map_or(Value::Null, |s| {
        json!({
            "phase": s.phase.to_string(),
            "polarity": s.polarity.as_str(),
            "pole": s.pole,
            "peer_slot": s.peer_slot,
            "coil_id": s.coil_id,
        })
    })
}

/// Visible sides grouped per slot as `[top, bottom]`.
fn sides_per_slot<'a>(view: &LayoutView<'a>) -> Vec<[Option<&'a CoilSide>; 2]> {
    let mut rows = vec![[None, None]; view.layout().slot_count()];
    for v in view.sides() {
        if let Some(row) = rows.get_mut(v.slot - 1) {
            match v.layer {
                Layer::Top => row[0] = Some(v.side),
                Layer::Bottom => row[1] = Some(v.side),
            }
        }
    }
    rows
}

/// Slot table, one row per slot.
#[derive(Debug, Default)]
pub struct TableRenderer;

impl LayoutRenderer for TableRenderer {
    type Output = String;

    fn render(&mut self, view: &LayoutView<'_>) -> Result<String> {
        let filters = view.filters();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "phase={} layer={}",
            filters.phase, filters.layer
        );
        let _ = writeln!(out, "{:>5}  {:<16}  {:<16}", "slot", "top", "bottom");
        for (i, [top, bottom]) in sides_per_slot(view).into_iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>5}  {:<16}  {:<16}",
                i + 1,
                side_label(top),
                side_label(bottom)
            );
        }
        Ok(out.trim_end().to_string())
    }
}

/// Slot table as a JSON array.
#[derive(Debug, Default)]
pub struct TableJsonRenderer;

impl LayoutRenderer for TableJsonRenderer {
    type Output = Value;

    fn render(&mut self, view: &LayoutView<'_>) -> Result<Value> {
        let rows: Vec<Value> = sides_per_slot(view)
            .into_iter()
            .enumerate()
            .map(|(i, [top, bottom])| {
                json!({ "slot": i + 1, "top": side_json(top), "bottom": side_json(bottom) })
            })
            .collect();
        let filters = view.filters();
        Ok(json!({
            "phase_filter": filters.phase.to_string(),
            "layer_filter": filters.layer.to_string(),
            "slots": rows,
        }))
    }
}

fn chain_coils<'a>(view: &LayoutView<'a>, chain: &SeriesChain) -> Vec<&'a Coil> {
    chain
        .coil_ids
        .iter()
        .filter_map(|id| view.layout().coil(*id))
        .collect()
}

/// Series chains, one line per chain.
#[derive(Debug, Default)]
pub struct ChainRenderer;

impl LayoutRenderer for ChainRenderer {
    type Output = String;

    fn render(&mut self, view: &LayoutView<'_>) -> Result<String> {
        let mut out = String::new();
        for chain in view.chains() {
            let coils = chain_coils(view, &chain);
            let sign = coils.first().map_or('?', |c| c.polarity.sign());
            let links: Vec<String> = coils
                .iter()
                .map(|c| format!("#{} [{}->{}]", c.id, c.start_slot, c.end_slot))
                .collect();
            let _ = writeln!(
                out,
                "{}{} pole {:>2}: {}",
                chain.phase,
                sign,
                chain.pole_index + 1,
                links.join(" -> ")
            );
        }
        if out.is_empty() {
            out.push_str("no chains");
        }
        Ok(out.trim_end().to_string())
    }
}

/// Series chains as a JSON array.
#[derive(Debug, Default)]
pub struct ChainJsonRenderer;

impl LayoutRenderer for ChainJsonRenderer {
    type Output = Value;

    fn render(&mut self, view: &LayoutView<'_>) -> Result<Value> {
        let chains: Vec<Value> = view
            .chains()
            .iter()
            .map(|chain| {
                let coils: Vec<Value> = chain_coils(view, chain)
                    .into_iter()
                    .map(coil_json)
                    .collect();
                json!({
                    "phase": chain.phase.to_string(),
                    "pole_index": chain.pole_index,
                    "coils": coils,
                })
            })
            .collect();
        Ok(Value::Array(chains))
    }
}

pub fn coil_json(c: &Coil) -> Value {
    json!({
        "id": c.id,
        "phase": c.phase.to_string(),
        "pole_index": c.pole_index,
        "start_slot": c.start_slot,
        "end_slot": c.end_slot,
        "polarity": c.polarity.as_str(),
        "next_coil_id": c.next_coil_id,
    })
}

pub fn coil_line(step: usize, c: &Coil) -> String {
    let next = c
        .next_coil_id
        .map_or_else(|| "end".to_string(), |n| format!("#{n}"));
    format!(
        "{step:>4}. #{} {}{} pole {}  slot {} -> {}  next {next}",
        c.id,
        c.phase,
        c.polarity.sign(),
        c.pole_index + 1,
        c.start_slot,
        c.end_slot
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use winding_core::{ViewFilters, WindingParams, generate};

    #[test]
    fn table_has_one_row_per_slot() {
        let d = generate(&WindingParams::new(24, 4, 3)).unwrap();
        let text = TableRenderer.render(&d.view(ViewFilters::default())).unwrap();
        // filter line, header, 24 rows
        assert_eq!(text.lines().count(), 26);
        assert!(text.lines().nth(2).unwrap().contains("A+ p1 ->7"));
    }

    #[test]
    fn summary_mentions_label_and_signature() {
        let d = generate(&WindingParams::new(24, 4, 3)).unwrap();
        let text = summary_text(&d);
        assert!(text.contains("Integer-slot, Full-pitch"));
        assert!(text.contains("A+  C-  B+"));
        assert!(text.contains("A=8 B=8 C=8"));
        assert!(text.contains("120° separation"));
    }

    #[test]
    fn non_three_phase_summary_names_the_phase_count() {
        let d = generate(&WindingParams::new(32, 4, 4)).unwrap();
        let text = summary_text(&d);
        assert!(text.contains("phase pattern    4-phase  (general multi-phase distribution)"));
        assert_eq!(summary_json(&d)["phase_distribution"]["label"], "4-phase");

        let d = generate(&WindingParams::new(10, 4, 3)).unwrap();
        assert_eq!(phase_distribution(&d).1, "3-phase fractional q");
    }

    #[test]
    fn chain_json_lists_coils_in_order() {
        let d = generate(&WindingParams::new(24, 4, 3)).unwrap();
        let v = ChainJsonRenderer
            .render(&d.view(ViewFilters::default()))
            .unwrap();
        let first = &v[0];
        assert_eq!(first["phase"], "A");
        assert_eq!(first["coils"][0]["start_slot"], 1);
        assert_eq!(first["coils"][1]["start_slot"], 2);
    }
}
