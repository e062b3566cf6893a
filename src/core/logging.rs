use std::io;
use std::str::FromStr;

use chrono::Local;
use console::style;
use log::{Level, LevelFilter, debug};
use once_cell::sync::OnceCell;

use crate::types::{LogLevel, LoggingError};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

static DISPATCH: OnceCell<()> = OnceCell::new();

/// Sets the process-wide minimum severity from a level name.
///
/// The console dispatcher is installed on first use; later calls only move
/// the level, so the most recent call wins. When the host has already set
/// a logger, that logger is kept and only the level is moved.
pub fn configure_logging(level_name: &str) -> Result<LogLevel, LoggingError> {
    let level = LogLevel::from_str(level_name.trim())
        .map_err(|_| LoggingError::UnknownLevel(level_name.to_string()))?;
    DISPATCH.get_or_init(|| {
        if let Err(err) = install_dispatch() {
            debug!("Keeping the host's logger: {err}");
        }
    });
    log::set_max_level(level.to_level_filter());
    Ok(level)
}

fn install_dispatch() -> Result<(), LoggingError> {
    let colors = console::colors_enabled();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "({}) {} [{}]: {}",
                Local::now().format(TIMESTAMP_FORMAT),
                level_label(record.level(), colors),
                record.target(),
                message
            ))
        })
        // The global max level does the filtering
        .level(LevelFilter::Trace)
        .chain(io::stdout())
        .apply()?;
    Ok(())
}

fn level_label(level: Level, colors: bool) -> String {
    if !colors {
        return level.to_string();
    }
    let label = style(level.to_string());
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.cyan(),
        Level::Trace => label.dim(),
    }
    .to_string()
}
