#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and batch-input parsing for the winding calculator.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The batch CSV loader enforces exact headers before deserializing rows.
//!
//! Only structural checks live here. Machine feasibility (minimum slot
//! count, even pole count, pitch limits) is decided by `winding_core`.
use std::io::Read;
use std::path::Path;

use eyre::WrapErr;
use serde::Deserialize;

/// Headers required in a batch CSV, in order.
pub const BATCH_HEADERS: [&str; 5] = ["slots", "poles", "phases", "pitch", "offset"];

/// Accepted values for `output.layer_filter`.
pub const LAYER_FILTERS: [&str; 3] = ["BOTH", "TOP", "BOTTOM"];

/// Accepted values for `logging.rotation`.
pub const ROTATIONS: [&str; 3] = ["never", "daily", "hourly"];

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Machine {
    /// Slot count Z.
    pub slots: i64,
    /// Pole count 2p.
    pub poles: i64,
    /// Phase count m.
    #[serde(default = "default_phases")]
    pub phases: i64,
}

fn default_phases() -> i64 {
    3
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PitchMode {
    #[default]
    Full,
    Short,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct PitchCfg {
    pub mode: PitchMode,
    /// Slots subtracted from the pole pitch when `mode = "short"`.
    /// Out-of-range values fall back to 1 inside the engine.
    pub offset: i64,
}

impl Default for PitchCfg {
    fn default() -> Self {
        Self {
            mode: PitchMode::Full,
            offset: 1,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputCfg {
    /// "ALL" or a phase label ("A", "B", ...)
    pub phase_filter: String,
    /// "BOTH" | "TOP" | "BOTTOM"
    pub layer_filter: String,
}

impl Default for OutputCfg {
    fn default() -> Self {
        Self {
            phase_filter: "ALL".to_string(),
            layer_filter: "BOTH".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub machine: Machine,
    #[serde(default)]
    pub pitch: PitchCfg,
    #[serde(default)]
    pub output: OutputCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file. Does not call `validate`.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config file {}", path.display()))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config file {}: {}", path.display(), e))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Machine
        if self.machine.slots < 1 {
            eyre::bail!("machine.slots must be >= 1");
        }
        if self.machine.poles < 1 {
            eyre::bail!("machine.poles must be >= 1");
        }
        if self.machine.phases < 1 {
            eyre::bail!("machine.phases must be >= 1");
        }

        // Output
        let phase = self.output.phase_filter.trim();
        if phase.is_empty() || !phase.chars().all(|c| c.is_ascii_alphanumeric()) {
            eyre::bail!("output.phase_filter must be ALL or a phase label");
        }
        let layer = self.output.layer_filter.trim().to_ascii_uppercase();
        if !LAYER_FILTERS.contains(&layer.as_str()) {
            eyre::bail!("output.layer_filter must be one of BOTH, TOP, BOTTOM");
        }

        // Logging
        if let Some(rotation) = &self.logging.rotation
            && !ROTATIONS.contains(&rotation.to_ascii_lowercase().as_str())
        {
            eyre::bail!("logging.rotation must be one of never, daily, hourly");
        }
        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            eyre::bail!("logging.file must not be empty");
        }

        Ok(())
    }
}

/// One machine to evaluate in batch mode.
///
/// Expected headers:
/// slots,poles,phases,pitch,offset
///
/// Example:
/// slots,poles,phases,pitch,offset
/// 24,4,3,full,
/// 24,4,3,short,1
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct BatchRow {
    pub slots: i64,
    pub poles: i64,
    pub phases: i64,
    pub pitch: PitchMode,
    pub offset: Option<i64>,
}

/// Parse batch rows from any reader, enforcing the exact header row.
pub fn parse_batch_csv<R: Read>(input: R) -> eyre::Result<Vec<BatchRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read batch CSV headers: {}", e))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != BATCH_HEADERS {
        eyre::bail!(
            "batch CSV must have headers '{}', got: {}",
            BATCH_HEADERS.join(","),
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<BatchRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    if rows.is_empty() {
        eyre::bail!("batch CSV contains no rows");
    }
    Ok(rows)
}

pub fn load_batch_csv(path: &Path) -> eyre::Result<Vec<BatchRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open batch CSV {:?}: {}", path, e))?;
    parse_batch_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_sections() {
        let cfg = load_toml("[machine]\nslots = 24\npoles = 4\n").unwrap();
        assert_eq!(cfg.machine.phases, 3);
        assert_eq!(cfg.pitch.mode, PitchMode::Full);
        assert_eq!(cfg.pitch.offset, 1);
        assert_eq!(cfg.output.layer_filter, "BOTH");
        assert!(cfg.logging.file.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn unknown_pitch_mode_is_a_parse_error() {
        let err = load_toml("[machine]\nslots = 24\npoles = 4\n[pitch]\nmode = \"half\"\n")
            .expect_err("half is not a pitch mode");
        assert!(err.to_string().contains("half"));
    }
}
