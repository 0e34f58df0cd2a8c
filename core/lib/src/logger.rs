//! Quip's logging infrastructure.

use std::fmt;
use std::str::FromStr;

use yansi::Paint;
use serde::{de, Serialize, Serializer, Deserialize, Deserializer};

#[derive(Debug)]
struct QuipLogger(LogLevel);

/// Defines the maximum level of log messages to show.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LogLevel {
    /// Only shows errors and warnings: `"critical"`.
    Critical,
    /// Shows everything except debug and trace information: `"normal"`.
    Normal,
    /// Shows everything: `"debug"`.
    Debug,
    /// Shows nothing: "`"off"`".
    Off,
}

impl LogLevel {
    fn as_str(&self) -> &str {
        match self {
            LogLevel::Critical => "critical",
            LogLevel::Normal => "normal",
            LogLevel::Debug => "debug",
            LogLevel::Off => "off",
        }
    }

    #[inline(always)]
    pub(crate) fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Critical => log::LevelFilter::Warn,
            LogLevel::Normal => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off
        }
    }
}

impl FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match &*s.to_ascii_lowercase() {
            "critical" => LogLevel::Critical,
            "normal" => LogLevel::Normal,
            "debug" => LogLevel::Debug,
            "off" => LogLevel::Off,
            _ => return Err("a log level (off, debug, normal, critical)")
        };

        Ok(level)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let string = String::deserialize(de)?;
        LogLevel::from_str(&string).map_err(|_| de::Error::invalid_value(
            de::Unexpected::Str(&string),
            &figment::error::OneOf(&["critical", "normal", "debug", "off"])
        ))
    }
}

#[doc(hidden)] #[macro_export]
macro_rules! log_ { ($name:ident: $($args:tt)*) => { $crate::log::$name!(target: "_", $($args)*) }; }
#[doc(hidden)] #[macro_export]
macro_rules! error_ { ($($args:expr),+) => { $crate::log_!(error: $($args),+); }; }
#[doc(hidden)] #[macro_export]
macro_rules! info_ { ($($args:expr),+) => { $crate::log_!(info: $($args),+); }; }
#[doc(hidden)] #[macro_export]
macro_rules! trace_ { ($($args:expr),+) => { $crate::log_!(trace: $($args),+); }; }
#[doc(hidden)] #[macro_export]
macro_rules! debug_ { ($($args:expr),+) => { $crate::log_!(debug: $($args),+); }; }
#[doc(hidden)] #[macro_export]
macro_rules! warn_ { ($($args:expr),+) => { $crate::log_!(warn: $($args),+); }; }

impl log::Log for QuipLogger {
    #[inline(always)]
    fn enabled(&self, record: &log::Metadata<'_>) -> bool {
        match self.0.to_level_filter().to_level() {
            Some(max) => record.level() <= max,
            None => false
        }
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Engine crates can be chatty; only show them when debugging.
        let configged_level = self.0;
        let from_engine = record.module_path()
            .map_or(false, |m| m.starts_with("minijinja::") || m.starts_with("tera::"));

        if configged_level != LogLevel::Debug && from_engine {
            return;
        }

        // Targets with the suffix "_" are sub-messages and get indented.
        if record.target().ends_with('_') && configged_level != LogLevel::Critical {
            print!("    {} ", "=>".bold());
        }

        match record.level() {
            log::Level::Info => println!("{}", record.args().blue().wrap()),
            log::Level::Trace => println!("{}", record.args().magenta().wrap()),
            log::Level::Error => {
                println!("{} {}",
                         "Error:".red().bold(),
                         record.args().red().wrap())
            }
            log::Level::Warn => {
                println!("{} {}",
                         "Warning:".yellow().bold(),
                         record.args().yellow().wrap())
            }
            log::Level::Debug => {
                print!("\n{} ", "-->".blue().bold());
                if let Some(file) = record.file() {
                    print!("{}", file.blue());
                }

                if let Some(line) = record.line() {
                    println!(":{}", line.blue());
                }

                println!("{}", record.args());
            }
        }
    }

    fn flush(&self) {
        // NOOP: We don't buffer any records.
    }
}

/// Installs Quip's logger with the level and color settings of `config`.
///
/// Returns `false` if logging is turned off or another logger was already
/// installed, and `true` otherwise.
pub fn init(config: &crate::Config) -> bool {
    if config.log_level == LogLevel::Off {
        return false;
    }

    if !config.cli_colors {
        yansi::disable();
    }

    if let Err(e) = log::set_boxed_logger(Box::new(QuipLogger(config.log_level))) {
        if config.log_level == LogLevel::Debug {
            eprintln!("Logger failed to initialize: {}", e);
        }

        return false;
    }

    log::set_max_level(config.log_level.to_level_filter());
    true
}
