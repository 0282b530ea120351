//! Input parameters for the winding engine.
//!
//! These are the runtime parameter types consumed by `generate`. They are
//! separate from the TOML-deserialized config in `winding_config`; see the
//! `conversions` module for the bridge.

use std::fmt;
use std::str::FromStr;

use crate::error::WindingError;

/// Coil pitch selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PitchMode {
    /// Coil spans the rounded pole pitch.
    #[default]
    Full,
    /// Coil spans the rounded pole pitch minus an offset.
    Short,
}

impl PitchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PitchMode::Full => "full",
            PitchMode::Short => "short",
        }
    }
}

impl fmt::Display for PitchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitchMode {
    type Err = WindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(PitchMode::Full),
            "short" => Ok(PitchMode::Short),
            other => Err(WindingError::InvalidConfiguration(format!(
                "unknown pitch mode '{other}' (expected full or short)"
            ))),
        }
    }
}

/// Machine description handed to `generate`.
///
/// Counts are signed so that negative input reaches validation and is
/// reported as `InvalidConfiguration` instead of failing at a parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindingParams {
    /// Slot count Z.
    pub slots: i64,
    /// Pole count 2p.
    pub poles: i64,
    /// Phase count m.
    pub phases: i64,
    pub pitch: PitchMode,
    /// Short-pitch offset in slots. Ignored for full pitch.
    pub offset: i64,
}

impl WindingParams {
    /// Full-pitch parameters for the given machine.
    pub fn new(slots: i64, poles: i64, phases: i64) -> Self {
        Self {
            slots,
            poles,
            phases,
            pitch: PitchMode::Full,
            offset: 0,
        }
    }

    pub fn short_pitch(mut self, offset: i64) -> Self {
        self.pitch = PitchMode::Short;
        self.offset = offset;
        self
    }
}

impl Default for WindingParams {
    fn default() -> Self {
        Self::new(24, 4, 3)
    }
}

impl fmt::Display for WindingParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Z={} 2p={} m={} {}",
            self.slots, self.poles, self.phases, self.pitch
        )?;
        if self.pitch == PitchMode::Short {
            write!(f, " offset={}", self.offset)?;
        }
        Ok(())
    }
}
