//! Template engines for Quip views.
//!
//! This crate implements [`quip::views::Engine`] for [MiniJinja] and [Tera].
//! Enable the feature of each engine you use; `minijinja` is enabled by
//! default:
//!
//! ```toml
//! [dependencies.quip_templates]
//! version = "0.1.0"
//! features = ["minijinja", "tera"]
//! ```
//!
//! | Engine      | Extension        | Example                   |
//! |-------------|------------------|---------------------------|
//! | [MiniJinja] | `.j2`, `.jinja`  | `views/index.html.j2`     |
//! | [Tera]      | `.tera`          | `views/index.html.tera`   |
//!
//! Then register them with [`register()`] when building the views:
//!
//! ```rust
//! use quip::{Quip, Config};
//! use quip::views::Views;
//!
//! let views = Views::custom(&Config::default(), quip_templates::register);
//! let quip = Quip::new(views);
//! # let _ = quip;
//! ```
//!
//! Engines are only loaded when the first view with their extension is
//! rendered.
//!
//! ## Templates
//!
//! Templates see the render's locals as variables. If the render has a scope,
//! its fields are visible too, beneath any local of the same name, and the
//! scope itself is `this`. A layout sees the output of the view it wraps as
//! `body`.
//!
//! Both engines provide a `partial` function that renders a partial and
//! inserts its output unescaped. Views without an extension take the
//! extension of the calling template:
//!
//! ```jinja
//! {# MiniJinja: a collection, or any options as a map #}
//! {{ partial("user", users) }}
//! {{ partial("user", {"object": admin, "as": "this"}) }}
//! ```
//!
//! ```jinja
//! {# Tera: options as named arguments #}
//! {{ partial(view="user", collection=users) }}
//! {{ partial(view="user", object=admin, exposed_as="this") }}
//! ```
//!
//! HTML and XML templates, such as `index.html.j2` or `index.html.tera`, are
//! auto-escaped. A MiniJinja layout's `body` is never escaped again; a Tera
//! layout that is auto-escaped must write it as `{{ body | safe }}`.
//!
//! [MiniJinja]: https://docs.rs/minijinja/1
//! [Tera]: https://docs.rs/tera/1

#[macro_use]
extern crate quip;

mod engine;

pub use engine::register;

#[cfg(feature = "minijinja")]
#[doc(inline)]
pub use engine::minijinja::MiniJinjaEngine;

#[cfg(feature = "tera")]
#[doc(inline)]
pub use engine::tera::TeraEngine;

#[cfg(feature = "minijinja")]
pub use minijinja;

#[cfg(feature = "tera")]
pub use tera;
