// src/logging.rs
// =============================================================================
// Logger setup for the binary.
//
// The library only talks to the `log` facade. Whoever runs it picks the
// backend; the CLI uses env_logger, configured here.
//
// RUST_LOG is read first, then --log-level overrides the level of our own
// crate. HTTP client internals stay at info or above either way, otherwise a
// debug run drowns in connection-pool chatter.
// =============================================================================

use clap::ValueEnum;
use log::LevelFilter;
use std::io::Write;

use crate::error::InitError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// `plain` for people, `json` (one object per line) for log shippers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Installs env_logger as the global logger. Fails if a logger is already set.
pub fn init_logger(level: LogLevel, format: LogFormat) -> Result<(), InitError> {
    let level = LevelFilter::from(level);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("metis_linkcheck", level);
    builder.filter_module("reqwest", level.min(LevelFilter::Info));
    builder.filter_module("hyper", level.min(LevelFilter::Info));

    if format == LogFormat::Json {
        builder.format(|buf, record| {
            let line = json_line(
                record.level(),
                record.target(),
                &record.args().to_string(),
            );
            writeln!(buf, "{}", line)
        });
    }

    builder.try_init()?;
    Ok(())
}

fn json_line(level: log::Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
        assert_eq!(LevelFilter::from(LogLevel::Info), LevelFilter::Info);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(log::Level::Warn, "metis_linkcheck::batch", "bad \"url\"\n");
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["target"], "metis_linkcheck::batch");
        assert_eq!(parsed["msg"], "bad \"url\"\n");
        let ts = parsed["ts"].as_i64().unwrap();
        let now = chrono::Utc::now().timestamp_millis();
        assert!(ts > 0 && ts <= now && now - ts < 60_000);
    }

    #[test]
    fn test_second_init_fails_cleanly() {
        // Whichever call comes first may win; the second must error, not panic
        let _ = init_logger(LogLevel::Error, LogFormat::Plain);
        assert!(init_logger(LogLevel::Error, LogFormat::Json).is_err());
    }
}
