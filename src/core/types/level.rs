use log::LevelFilter;
use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Severity names accepted by the `logLevel` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    All,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Off,
}

impl LogLevel {
    /// `log` has no fatal severity, so FATAL shares the error filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::All | LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error | LogLevel::Fatal => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}
