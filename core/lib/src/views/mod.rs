//! View rendering: resolving views to templates, layouts, partials and
//! collections.
//!
//! A [`Views`] value owns the views root, the configured layout and partials
//! names, and an [`Engines`] registry that maps template file extensions to
//! [`Engine`]s. Rendering a view reads its template, renders it with the
//! engine for its extension, and, unless disabled, renders the configured
//! layout around the output with the output as the local `body`.
//!
//! ```rust,no_run
//! use quip::Config;
//! use quip::views::{Views, RenderOptions, RenderContext};
//! use quip::BoxError;
//!
//! let views = Views::custom(&Config::default(), |engines| {
//!     engines.insert("txt", |ctxt: &RenderContext<'_>| -> Result<String, BoxError> {
//!         Ok(ctxt.source().to_string())
//!     });
//! });
//!
//! let html = views.render("index.txt", &RenderOptions::new().layout(false));
//! ```
//!
//! # Partials
//!
//! Partials are rendered from the `partials` subdirectory of the views root
//! and never with a layout. A partial may expose a single `object`, or be
//! rendered once per element of a `collection` with the outputs concatenated
//! in order. During a collection render, the locals `collectionLength`,
//! `indexInCollection`, `firstInCollection` and `lastInCollection` describe
//! the current element.

mod options;
mod engine;
mod renderer;

pub use self::options::{RenderOptions, Layout, Exposure};
pub use self::engine::{Engine, Engines, RenderContext};
pub use self::renderer::{Views, Partial};

use std::path::Path;

/// The extension of `view`, if it has one.
pub(crate) fn extension(view: &str) -> Option<&str> {
    Path::new(view).extension().and_then(|ext| ext.to_str())
}

/// The name an object is exposed as by default: the view's file name up to
/// its first `.`.
pub(crate) fn exposed_name(view: &str) -> &str {
    let file_name = Path::new(view).file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(view);

    file_name.split('.').next().unwrap_or(file_name)
}
