//! Command execution: parameter resolution and per-command output.

use std::path::Path;

use serde_json::json;
use winding_config::Config;
use winding_core::error::{Report, Result};
use winding_core::{
    AnimationStepper, LayerFilter, LayoutCell, LayoutRenderer, PhaseFilter, PitchMode,
    ViewFilters, WindingDesign, WindingError, WindingParams, generate,
};

use crate::cli::{MachineArgs, PitchArg};
use crate::report::{
    ChainJsonRenderer, ChainRenderer, TableJsonRenderer, TableRenderer, coil_json, coil_line,
    summary_json, summary_text,
};

/// Short-pitch offset when neither flags nor config give one.
const DEFAULT_OFFSET: i64 = 1;

/// Flags override the config file, which overrides the built-in defaults.
pub fn resolve_params(cfg: Option<&Config>, m: &MachineArgs) -> WindingParams {
    let mut params = cfg.map_or_else(
        || WindingParams {
            offset: DEFAULT_OFFSET,
            ..WindingParams::default()
        },
        WindingParams::from,
    );
    if let Some(z) = m.slots {
        params.slots = z;
    }
    if let Some(p2) = m.poles {
        params.poles = p2;
    }
    if let Some(ph) = m.phases {
        params.phases = ph;
    }
    if let Some(pitch) = m.pitch {
        params.pitch = match pitch {
            PitchArg::Full => PitchMode::Full,
            PitchArg::Short => PitchMode::Short,
        };
    }
    if let Some(o) = m.offset {
        params.offset = o;
    }
    params
}

/// Config `[output]` filters, then `--phase` / `--layer`.
pub fn resolve_filters(
    cfg: Option<&Config>,
    phase: Option<&str>,
    layer: Option<&str>,
) -> Result<ViewFilters> {
    let mut filters = match cfg {
        Some(c) => ViewFilters::try_from(&c.output)?,
        None => ViewFilters::default(),
    };
    if let Some(p) = phase {
        filters.phase = p.parse::<PhaseFilter>().map_err(Report::new)?;
    }
    if let Some(l) = layer {
        filters.layer = l.parse::<LayerFilter>().map_err(Report::new)?;
    }
    Ok(filters)
}

fn design_for(cfg: Option<&Config>, m: &MachineArgs) -> Result<WindingDesign> {
    let params = resolve_params(cfg, m);
    tracing::info!(%params, "generating layout");
    generate(&params)
}

pub fn run_calc(cfg: Option<&Config>, m: &MachineArgs, json: bool) -> Result<()> {
    let d = design_for(cfg, m)?;
    if json {
        println!("{}", summary_json(&d));
    } else {
        println!("{}", summary_text(&d));
    }
    Ok(())
}

pub fn run_table(
    cfg: Option<&Config>,
    m: &MachineArgs,
    phase: Option<&str>,
    layer: Option<&str>,
    json: bool,
) -> Result<()> {
    let filters = resolve_filters(cfg, phase, layer)?;
    let d = design_for(cfg, m)?;
    let view = d.view(filters);
    if json {
        println!("{}", TableJsonRenderer.render(&view)?);
    } else {
        println!("{}", TableRenderer.render(&view)?);
    }
    Ok(())
}

pub fn run_chains(
    cfg: Option<&Config>,
    m: &MachineArgs,
    phase: Option<&str>,
    json: bool,
) -> Result<()> {
    let filters = resolve_filters(cfg, phase, None)?;
    let d = design_for(cfg, m)?;
    let view = d.view(filters);
    if json {
        println!("{}", ChainJsonRenderer.render(&view)?);
    } else {
        println!("{}", ChainRenderer.render(&view)?);
    }
    Ok(())
}

pub fn run_animate(cfg: Option<&Config>, m: &MachineArgs, steps: usize, json: bool) -> Result<()> {
    let d = design_for(cfg, m)?;
    let mut stepper = AnimationStepper::new(&d.layout);
    let revealed = stepper.advance(steps);
    tracing::debug!(requested = steps, revealed, "animation advanced");

    let visible = stepper.visible();
    let total = d.layout.coils().len();
    if json {
        let coils: Vec<_> = visible.iter().map(coil_json).collect();
        println!(
            "{}",
            json!({
                "revealed": revealed,
                "total": total,
                "finished": stepper.is_finished(),
                "coils": coils,
            })
        );
    } else {
        for (i, c) in visible.iter().enumerate() {
            println!("{}", coil_line(i + 1, c));
        }
        let chains = d
            .view(ViewFilters::default())
            .with_visible_coils(visible)
            .chains();
        println!(
            "revealed {revealed}/{total} coils in {} chain(s){}",
            chains.len(),
            if stepper.is_finished() {
                ", layout complete"
            } else {
                ""
            }
        );
    }
    Ok(())
}

/// One summary per row; failing rows are reported and skipped.
pub fn run_batch(csv: &Path, json: bool) -> Result<()> {
    let rows = winding_config::load_batch_csv(csv)?;
    let cell = LayoutCell::new();
    let mut failed = 0usize;

    for (i, row) in rows.iter().enumerate() {
        let n = i + 1;
        let params = WindingParams::from(row);
        match cell.publish(&params) {
            Ok(d) => {
                if json {
                    let mut v = summary_json(&d);
                    v["row"] = json!(n);
                    println!("{v}");
                } else {
                    println!(
                        "row {n}: {} | {} | y={} q={:.3} Kw={:.4} | {}",
                        d.params,
                        d.combo_label(),
                        d.geometry.y,
                        d.geometry.q,
                        d.factors.kw,
                        if d.stats.is_complete() {
                            "complete"
                        } else {
                            "incomplete"
                        }
                    );
                }
            }
            Err(e) => {
                failed += 1;
                if json {
                    let message = e
                        .downcast_ref::<WindingError>()
                        .map_or_else(|| e.to_string(), |we| we.message().to_string());
                    println!(
                        "{}",
                        json!({ "row": n, "params": params.to_string(), "error": message })
                    );
                } else {
                    println!("row {n}: {params} | error: {e}");
                }
            }
        }
    }
    tracing::info!(rows = rows.len(), failed, "batch finished");
    Ok(())
}
