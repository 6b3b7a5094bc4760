//! Logger setup.
//!
//! Log lines go to stderr; stdout carries only the scan report.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

/// Third-party targets and the most verbose level kept for each.
///
/// hickory logs every refused transfer and failed lookup at warn or below.
const QUIET_TARGETS: &[(&str, LevelFilter)] = &[
    ("hickory_proto", LevelFilter::Error),
    ("hickory_resolver", LevelFilter::Error),
    ("reqwest", LevelFilter::Warn),
    ("hyper", LevelFilter::Warn),
];

/// Installs the global logger.
///
/// `RUST_LOG` is honored for targets outside this crate; `level` always
/// applies to `dns_recon` itself.
///
/// # Arguments
///
/// * `level` - Most verbose level shown for scan progress
/// * `format` - `Plain` for colored terminal lines, `Json` for one object per line
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Resolver internals at debug, scan progress at info
/// RUST_LOG=hickory_resolver=debug dns_recon --domain example.com --log-level info
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (target, quiet) in QUIET_TARGETS {
        builder.filter_module(target, *quiet);
    }
    builder.filter_module("dns_recon", level);

    match format {
        LogFormat::Json => builder.format(write_json),
        LogFormat::Plain => builder.format(write_plain),
    };

    builder.try_init()?;
    Ok(())
}

fn write_json(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    let line = json_line(
        chrono::Utc::now().timestamp_millis(),
        record.level(),
        record.target(),
        &record.args().to_string(),
    );
    writeln!(buf, "{line}")
}

fn write_plain(buf: &mut Formatter, record: &Record) -> std::io::Result<()> {
    writeln!(
        buf,
        "{} {} [{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        record.target().cyan(),
        colored_level(record.level()),
        record.args()
    )
}

fn json_line(ts: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn colored_level(level: Level) -> ColoredString {
    let text = level.as_str();
    match level {
        Level::Error => text.red(),
        Level::Warn => text.yellow(),
        Level::Info => text.green(),
        Level::Debug => text.blue(),
        Level::Trace => text.purple(),
    }
}
