//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "winding",
    version,
    about = "Double-layer stator winding layout calculator"
)]
pub struct Cli {
    /// Path to config TOML (typed); flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results and errors as JSON; logs become JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG wins
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PitchArg {
    /// Coil spans round(τ) slots
    Full,
    /// Coil spans round(τ) - offset slots
    Short,
}

/// Machine parameters. Unset values fall back to the config file, then to
/// Z=24, 2p=4, m=3, full pitch.
#[derive(Args, Debug, Clone, Default)]
pub struct MachineArgs {
    /// Number of stator slots (Z)
    #[arg(long, short = 'z', value_name = "Z", allow_negative_numbers = true)]
    pub slots: Option<i64>,

    /// Number of poles (2p)
    #[arg(long, short = 'p', value_name = "2P", allow_negative_numbers = true)]
    pub poles: Option<i64>,

    /// Number of phases (m)
    #[arg(long, short = 'm', value_name = "M", allow_negative_numbers = true)]
    pub phases: Option<i64>,

    /// Coil pitch selection
    #[arg(long, value_enum)]
    pub pitch: Option<PitchArg>,

    /// Short-pitch offset in slots; out-of-range values fall back to 1
    #[arg(long, value_name = "SLOTS", allow_negative_numbers = true)]
    pub offset: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derived quantities, winding factors and verification summary
    Calc {
        #[command(flatten)]
        machine: MachineArgs,
    },
    /// Slot-by-slot table of top and bottom coil sides
    Table {
        #[command(flatten)]
        machine: MachineArgs,
        /// Show only this phase (ALL, A, B, C, ...)
        #[arg(long, value_name = "PHASE")]
        phase: Option<String>,
        /// Show only this layer (BOTH, TOP, BOTTOM)
        #[arg(long, value_name = "LAYER")]
        layer: Option<String>,
    },
    /// Series connection order inside each phase/pole group
    Chains {
        #[command(flatten)]
        machine: MachineArgs,
        /// Show only this phase (ALL, A, B, C, ...)
        #[arg(long, value_name = "PHASE")]
        phase: Option<String>,
    },
    /// Reveal the first N coils in connection order
    Animate {
        #[command(flatten)]
        machine: MachineArgs,
        /// Number of coils to reveal
        #[arg(long, value_name = "N", default_value_t = 1)]
        steps: usize,
    },
    /// Evaluate every row of a slots,poles,phases,pitch,offset CSV
    Batch {
        /// Batch CSV (strict header)
        #[arg(long, value_name = "FILE")]
        csv: PathBuf,
    },
}
