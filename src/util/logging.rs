//! Structured logging setup for buildfs
//!
//! Store operations emit `tracing` events (`debug` for writes, removals and
//! clock ticks, `trace` for reads). This module wires those events to a
//! `tracing-subscriber` formatter so a failing test can show what happened
//! to the fake filesystem.
//!
//! # Example
//!
//! ```no_run
//! use buildfs::util::logging;
//!
//! // With environment: BUILDFS_LOG_LEVEL=debug
//! logging::init_from_env();
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

const LOG_LEVEL_VAR: &str = "BUILDFS_LOG_LEVEL";
const LOG_JSON_VAR: &str = "BUILDFS_LOG_JSON";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for events from this crate
    pub level: Level,

    pub use_json: bool,

    /// Include the module target (e.g., buildfs::fs) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Debug level with file and line numbers, for chasing a failing test
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: true,
            include_thread_ids: false,
        }
    }

    /// Reads `BUILDFS_LOG_LEVEL` and `BUILDFS_LOG_JSON`, falling back to
    /// the defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let level = env::var(LOG_LEVEL_VAR)
            .map(|v| parse_level(&v))
            .unwrap_or(Level::INFO);

        let use_json = env::var(LOG_JSON_VAR)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }

    /// `RUST_LOG` wins for this crate's target when it names one
    fn filter(&self) -> EnvFilter {
        let filter = EnvFilter::from_default_env();
        let rust_log = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
        if names_crate_target(&rust_log) {
            return filter;
        }

        match format!("buildfs={}", self.level).parse() {
            Ok(directive) => filter.add_directive(directive),
            Err(_) => filter,
        }
    }
}

fn names_crate_target(rust_log: &str) -> bool {
    rust_log.split(',').any(|directive| {
        let target = directive
            .split(|c: char| c == '=' || c == '[')
            .next()
            .unwrap_or("")
            .trim();
        target == "buildfs" || target.starts_with("buildfs::")
    })
}

/// Parses a log level case-insensitively; anything unknown becomes INFO.
///
/// ```
/// use buildfs::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the global subscriber. Only the first call has any effect, and
/// it is skipped if another subscriber is already installed. Returns whether
/// this call installed it.
pub fn init_logging(config: LoggingConfig) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        let filter = config.filter();
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_thread_ids(config.include_thread_ids)
            .with_thread_names(config.include_thread_ids);

        let result = if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        };

        match result {
            Ok(()) => installed = true,
            Err(e) => eprintln!("Logging already initialized: {}", e),
        }
    });
    installed
}

pub fn init_default() -> bool {
    init_logging(LoggingConfig::default())
}

pub fn init_from_env() -> bool {
    init_logging(LoggingConfig::from_env())
}

pub fn with_level(level_str: &str) -> bool {
    init_logging(LoggingConfig::with_level(parse_level(level_str)))
}
