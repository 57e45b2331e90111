use log::LevelFilter;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

use crate::errors::DbError;

pub const QUERY_TARGET: &str = "keradb::query";
pub const DEV6_TARGET: &str = "keradb::dev6";

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_RETENTION: usize = 7;

static HANDLE: Mutex<Option<log4rs::Handle>> = Mutex::new(None);

fn config_err(e: impl std::fmt::Display) -> DbError {
    DbError::Config(format!("logging: {e}"))
}

#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// "1", "true" and "yes" (any case) enable a switch.
#[must_use]
pub fn truthy(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

fn rolling(base: &Path, stem: &str, keep: u32) -> Result<RollingFileAppender, DbError> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join(format!("{stem}.{{}}.log")).display()), keep)
        .map_err(config_err)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(base.join(format!("{stem}.log")), Box::new(policy))
        .map_err(config_err)
}

/// Builds the rolling-file configuration: `app.log` for everything, `query.log` for the
/// query executor, and `dev6.log` for bench lines when `enable_dev6` is set.
///
/// # Errors
/// `DbError::Config` if an appender cannot be created.
pub fn build_config(base: &Path, level: LevelFilter, retention: usize, enable_dev6: bool) -> Result<Config, DbError> {
    let keep = u32::try_from(retention).unwrap_or(u32::MAX);
    let mut builder = Config::builder()
        .appender(Appender::builder().build("app", Box::new(rolling(base, "app", keep)?)))
        .appender(Appender::builder().build("query", Box::new(rolling(base, "query", keep)?)))
        .logger(Logger::builder().appender("query").additive(false).build(QUERY_TARGET, level));

    builder = if enable_dev6 {
        builder
            .appender(Appender::builder().build("dev6", Box::new(rolling(base, "dev6", keep)?)))
            .logger(Logger::builder().appender("dev6").additive(false).build(DEV6_TARGET, LevelFilter::Trace))
    } else {
        builder.logger(Logger::builder().additive(false).build(DEV6_TARGET, LevelFilter::Off))
    };

    builder.build(Root::builder().appender("app").build(level)).map_err(config_err)
}

/// Configures process-wide logging; calling it again replaces the previous configuration.
///
/// - `dir`: base directory for log files, current directory when `None`
/// - `level`: error|warn|info|debug|trace
/// - `retention`: rolled files kept per log (default 7)
///
/// # Errors
/// `DbError::Config` if the directory or appenders cannot be created, or if another logger
/// already owns the process.
pub fn configure_logging(dir: Option<&Path>, level: Option<&str>, retention: Option<usize>) -> Result<(), DbError> {
    configure_logging_with_dev(dir, level, retention, false)
}

/// Like [`configure_logging`], additionally persisting `dev6!` lines when `enable_dev6` is set.
///
/// # Errors
/// See [`configure_logging`].
pub fn configure_logging_with_dev(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
    enable_dev6: bool,
) -> Result<(), DbError> {
    let base = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    std::fs::create_dir_all(&base)?;
    let config = build_config(&base, parse_level(level), retention.unwrap_or(DEFAULT_RETENTION), enable_dev6)?;
    let mut slot = HANDLE.lock();
    if let Some(h) = slot.as_ref() {
        h.set_config(config);
        return Ok(());
    }
    *slot = Some(log4rs::init_config(config).map_err(config_err)?);
    Ok(())
}

/// Configures logging from `KERADB_LOG_DIR`, `KERADB_LOG_LEVEL`, `KERADB_LOG_RETENTION`
/// and `KERADB_DEV6`.
///
/// # Errors
/// See [`configure_logging`].
pub fn configure_from_env() -> Result<(), DbError> {
    let dir = std::env::var("KERADB_LOG_DIR").ok().map(PathBuf::from);
    let level = std::env::var("KERADB_LOG_LEVEL").ok();
    let retention = std::env::var("KERADB_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    let dev6 = std::env::var("KERADB_DEV6").is_ok_and(|s| truthy(&s));
    configure_logging_with_dev(dir.as_deref(), level.as_deref(), retention, dev6)
}
