#![recursion_limit="256"]

//! # Quip - Core API Documentation
//!
//! Quip decorates the responses of an existing HTTP server with shortcuts for
//! the common cases: setting a status or a content type, sending a body,
//! redirecting, answering JSONP, and rendering views with layouts, partials
//! and collections.
//!
//! Quip is not a web framework. It does not route, parse requests or speak
//! HTTP itself; the host server hands it a response object implementing
//! [`RawResponse`] and Quip writes to it.
//!
//! ## Usage
//!
//! Create a [`Quip`] once, from a [`Config`] and a set of template engines,
//! and decorate each response with it:
//!
//! ```rust
//! use quip::{Quip, Config};
//! use quip::local::LocalResponse;
//! use quip::views::{Views, RenderContext};
//! use quip::BoxError;
//!
//! let views = Views::custom(&Config::default(), |engines| {
//!     engines.insert("txt", |ctxt: &RenderContext<'_>| -> Result<String, BoxError> {
//!         Ok(ctxt.source().to_string())
//!     });
//! });
//!
//! let quip = Quip::new(views);
//! let mut res = quip.decorate(LocalResponse::new());
//! res.not_found().text_with("nothing here").unwrap();
//!
//! let raw = res.into_raw();
//! assert_eq!(raw.status().map(|s| s.code), Some(404));
//! assert_eq!(raw.body_string(), "nothing here");
//! ```
//!
//! Template engines for MiniJinja and Tera live in the `quip_templates`
//! crate.
//!
//! ## Configuration
//!
//! Quip reads its configuration with [Figment](https://docs.rs/figment): from
//! `Quip.toml` and from `QUIP_` prefixed environment variables. See
//! [`Config`] for the parameters and their defaults.

#[doc(hidden)] #[macro_use]
pub extern crate log;

#[doc(hidden)]
pub use yansi;
#[doc(hidden)]
pub use figment;
#[doc(inline)]
pub use serde_json;

#[macro_use]
pub mod logger;
pub mod config;
pub mod http;
pub mod response;
pub mod views;
pub mod raw;
pub mod local;

mod error;
mod quip;

#[doc(inline)] pub use crate::error::{Error, BoxError};
#[doc(inline)] pub use crate::config::Config;
#[doc(inline)] pub use crate::response::{Response, Body, Rendered};
#[doc(inline)] pub use crate::raw::RawResponse;
pub use crate::quip::Quip;
