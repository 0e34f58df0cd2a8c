//! Quip's configuration system.
//!
//! Configuration is read through [Figment]. [`Config::figment()`] merges the
//! defaults, a `Quip.toml` file and `QUIP_`-prefixed environment variables:
//!
//! ```toml
//! [default]
//! views = "templates"
//! view_engine = "j2"
//!
//! [release]
//! log_level = "critical"
//! ```
//!
//! A [`Views`](crate::views::Views) value is built from a `Config` with
//! [`Views::new()`](crate::views::Views::new()).
//!
//! [Figment]: https://docs.rs/figment

mod config;

pub use config::{Config, pretty_print_error};
pub use crate::logger::LogLevel;
