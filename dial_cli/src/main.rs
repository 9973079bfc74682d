use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use dial_config::Config;
use dial_core::runner::{run_calibration, run_clock};
use dial_core::{
    CalibrationStore, DialError, JsonFileBackend, LocalWallClock, MotionCfg, SessionCfg,
};
use dial_traits::MonotonicClock;
use eyre::WrapErr;

mod cli;
mod error_fmt;
mod hw;
mod logging;
mod prompt;

use cli::{Cli, JSON_MODE};
use error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    // Reports are rendered by error_fmt; color-eyre only adds panic/backtrace hooks.
    let _ = color_eyre::install();

    let code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(error = ?e, "exiting with error");
            if Cli::json_mode() {
                eprintln!("{}", format_error_json(&e));
            } else {
                eprintln!("{}", humanize(&e));
            }
            exit_code_for_error(&e)
        }
    };
    std::process::exit(code);
}

/// Missing file is a plain read error; unparsable or invalid TOML is malformed configuration.
fn load_config(path: Option<&Path>) -> eyre::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let cfg = dial_config::load_toml(&text).map_err(|e| {
        DialError::ConfigurationMalformed(format!("{}: {e}", path.display()))
    })?;
    cfg.validate()
        .map_err(|e| DialError::ConfigurationMalformed(format!("{}: {e}", path.display())))?;
    Ok(cfg)
}

fn run(cli: &Cli) -> eyre::Result<()> {
    let cfg = load_config(cli.config.as_deref())?;
    logging::init(cli, &cfg.logging)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
            .wrap_err("failed to install signal handler")?;
    }

    let path = cli
        .calibration
        .clone()
        .unwrap_or_else(|| cfg.calibration.file.clone());
    let mut store = CalibrationStore::new(JsonFileBackend::new(&path));
    let mut hands = hw::open_hands(&cfg)?;

    if cli.calibrate {
        let mut keys = hw::open_keys()?;
        println!("calibrating; {}", prompt::KEY_HELP);
        run_calibration(
            &mut store,
            &mut hands,
            keys.as_mut(),
            SessionCfg::from(&cfg.calibration),
            &shutdown,
            |step| {
                if let Some(line) = prompt::describe(step) {
                    println!("{line}");
                }
            },
        )?;
        println!("saved calibration to {}", path.display());
        return Ok(());
    }

    let ticks = run_clock(
        &store,
        &mut hands,
        &LocalWallClock,
        &MonotonicClock::new(),
        MotionCfg::from(&cfg.motion),
        &shutdown,
    )?;
    tracing::info!(ticks, "shutdown complete");
    Ok(())
}
