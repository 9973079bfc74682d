//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "dial_cli", version, about = "Analog needle clock driver")]
pub struct Cli {
    /// Walk every checkpoint of every dial and save the calibration
    #[arg(
        long,
        action = ArgAction::SetTrue,
        long_help = "Run the interactive calibration session instead of the clock.\n\nKeys: space confirms the current checkpoint, enter skips it, left/right nudge the hand by 50, up/down by 500. When stdin is not a terminal the keystrokes are read from it as-is, so a session can be scripted by piping input."
    )]
    pub calibrate: bool,

    /// Path to config TOML; built-in defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Calibration JSON (overrides calibration.file from the config)
    #[arg(long, value_name = "FILE")]
    pub calibration: Option<PathBuf>,

    /// Log and report errors as JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG applies when unset
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn json_mode() -> bool {
        JSON_MODE.get().copied().unwrap_or(false)
    }
}
