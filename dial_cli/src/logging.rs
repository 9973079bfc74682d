//! Subscriber setup: console layer on stderr plus an optional JSON-lines file.

use std::path::Path;

use eyre::{WrapErr, eyre};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, FILE_GUARD};

/// Level precedence: `--log-level`, then `RUST_LOG`, then `[logging].level`, then info.
fn filter(cli: &Cli, logging: &dial_config::Logging) -> eyre::Result<EnvFilter> {
    if let Some(level) = &cli.log_level {
        return EnvFilter::try_new(level).wrap_err_with(|| format!("invalid --log-level '{level}'"));
    }
    if let Ok(f) = EnvFilter::try_from_default_env() {
        return Ok(f);
    }
    let level = logging.level.as_deref().unwrap_or("info");
    EnvFilter::try_new(level).wrap_err_with(|| format!("invalid logging.level '{level}'"))
}

fn file_writer(
    path: &Path,
    rotation: Option<&str>,
) -> eyre::Result<tracing_appender::non_blocking::NonBlocking> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| eyre!("logging.file has no file name: {}", path.display()))?;
    let appender = match rotation.unwrap_or("never") {
        "daily" => rolling::daily(dir, name),
        "hourly" => rolling::hourly(dir, name),
        _ => rolling::never(dir, name),
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);
    // keep the worker alive for the whole process
    let _ = FILE_GUARD.set(guard);
    Ok(writer)
}

pub fn init(cli: &Cli, logging: &dial_config::Logging) -> eyre::Result<()> {
    let filter = filter(cli, logging)?;

    let (pretty, json) = if cli.json {
        let layer = fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    } else {
        let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
        (Some(layer), None)
    };

    let file = match &logging.file {
        Some(path) => {
            let writer = file_writer(Path::new(path), logging.rotation.as_deref())?;
            Some(fmt::layer().json().with_ansi(false).with_writer(writer))
        }
        None => None,
    };

    Registry::default()
        .with(filter)
        .with(pretty)
        .with(json)
        .with(file)
        .try_init()
        .map_err(|e| eyre!("failed to install tracing subscriber: {e}"))
}
