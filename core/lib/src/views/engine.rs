use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::error::{BoxError, Error};
use crate::views::{Partial, RenderOptions};

/// A template engine, selected by the extension of the view it renders.
///
/// An engine receives the template's source text and everything the
/// template may refer to through a [`RenderContext`], and returns the
/// rendered string. Engine failures are reported to callers as
/// [`Error::Render`].
///
/// Any `Fn(&RenderContext<'_>) -> Result<String, BoxError>` is an engine:
///
/// ```rust
/// use quip::views::{Engines, RenderContext};
/// use quip::BoxError;
///
/// let mut engines = Engines::new();
/// engines.insert("txt", |ctxt: &RenderContext<'_>| -> Result<String, BoxError> {
///     Ok(ctxt.source().to_uppercase())
/// });
/// ```
pub trait Engine: Send + Sync + 'static {
    fn render(&self, ctxt: &RenderContext<'_>) -> Result<String, BoxError>;
}

impl<F> Engine for F
    where F: Fn(&RenderContext<'_>) -> Result<String, BoxError> + Send + Sync + 'static
{
    fn render(&self, ctxt: &RenderContext<'_>) -> Result<String, BoxError> {
        self(ctxt)
    }
}

/// Everything an [`Engine`] may use to render one view.
pub struct RenderContext<'a> {
    pub(crate) view: &'a str,
    pub(crate) source: &'a str,
    pub(crate) filename: &'a Path,
    pub(crate) options: &'a RenderOptions,
    pub(crate) partial: &'a Partial,
}

impl<'a> RenderContext<'a> {
    /// The view being rendered, with its extension.
    pub fn view(&self) -> &'a str {
        self.view
    }

    /// The template source.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The resolved path of the template. Also available to templates as the
    /// local `__filename`.
    pub fn filename(&self) -> &'a Path {
        self.filename
    }

    pub fn locals(&self) -> &'a Map<String, Value> {
        &self.options.locals
    }

    pub fn scope(&self) -> Option<&'a Value> {
        self.options.scope.as_ref()
    }

    /// Whether this render is a layout wrapping a child view. The child's
    /// output is the local `body`.
    pub fn is_layout(&self) -> bool {
        self.options.is_layout
    }

    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    /// Renders other views as partials from within this template. Engines
    /// expose this to templates as a `partial` function.
    pub fn partial(&self) -> &'a Partial {
        self.partial
    }

    /// The values a template sees, as one JSON object.
    ///
    /// The fields of the scope, if it is an object, come first; locals of the
    /// same name take precedence over them. The scope itself is available as
    /// `this`.
    pub fn context(&self) -> Value {
        let mut context = Map::new();
        if let Some(Value::Object(fields)) = self.scope() {
            context.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        context.extend(self.locals().iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(scope) = self.scope() {
            context.insert("this".into(), scope.clone());
        }

        Value::Object(context)
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("view", &self.view)
            .field("filename", &self.filename)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

type Loader = Arc<dyn Fn() -> Result<Arc<dyn Engine>, BoxError> + Send + Sync>;

/// The template engines available to a [`Views`](crate::views::Views),
/// keyed by file extension.
///
/// Engines are registered as loaders and are only loaded the first time a
/// view with their extension is rendered. The loaded engine is kept and
/// reused by every later render.
///
/// Extensions are given without a leading dot; one is stripped if present.
#[derive(Default)]
pub struct Engines {
    loaders: HashMap<String, Loader>,
    loaded: RwLock<HashMap<String, Arc<dyn Engine>>>,
}

fn normalize(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}

impl Engines {
    /// Returns a registry without any engines.
    pub fn new() -> Engines {
        Engines::default()
    }

    /// Registers `loader` to create the engine for `ext` on first use.
    ///
    /// Replaces any engine registered for `ext`, loaded or not.
    pub fn register<F, E>(&mut self, ext: &str, loader: F) -> &mut Self
        where F: Fn() -> Result<E, BoxError> + Send + Sync + 'static, E: Engine
    {
        let ext = normalize(ext).to_string();
        self.loaded.get_mut().remove(&ext);
        self.loaders.insert(ext, Arc::new(move || Ok(Arc::new(loader()?) as Arc<dyn Engine>)));
        self
    }

    /// Registers an already loaded `engine` for `ext`.
    pub fn insert<E: Engine>(&mut self, ext: &str, engine: E) -> &mut Self {
        let ext = normalize(ext).to_string();
        self.loaders.remove(&ext);
        self.loaded.get_mut().insert(ext, Arc::new(engine));
        self
    }

    /// Returns `true` if an engine, loaded or not, is registered for `ext`.
    pub fn contains(&self, ext: &str) -> bool {
        let ext = normalize(ext);
        self.loaders.contains_key(ext) || self.loaded.read().contains_key(ext)
    }

    /// Returns `true` if the engine for `ext` has been loaded.
    pub fn is_loaded(&self, ext: &str) -> bool {
        self.loaded.read().contains_key(normalize(ext))
    }

    /// All extensions with a registered engine, in no particular order.
    pub fn extensions(&self) -> Vec<String> {
        let loaded = self.loaded.read();
        let mut exts: Vec<String> = loaded.keys().cloned().collect();
        exts.extend(self.loaders.keys().filter(|k| !loaded.contains_key(*k)).cloned());
        exts
    }

    /// Returns the engine for `ext`, loading it if this is its first use.
    ///
    /// Concurrent first uses may each run the loader, but only the first
    /// engine to be stored is ever returned.
    pub fn get(&self, ext: &str) -> Result<Arc<dyn Engine>, Error> {
        let ext = normalize(ext);
        if let Some(engine) = self.loaded.read().get(ext) {
            return Ok(engine.clone());
        }

        let loader = self.loaders.get(ext)
            .ok_or_else(|| Error::UnknownEngine(ext.to_string()))?;

        let engine = loader().map_err(|error| {
            error_!("Template engine for '{}' failed to load.", ext);
            Error::EngineInit { ext: ext.to_string(), error }
        })?;

        info_!("Loaded template engine for '{}'.", ext);
        let mut loaded = self.loaded.write();
        Ok(loaded.entry(ext.to_string()).or_insert(engine).clone())
    }
}

impl fmt::Debug for Engines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut exts = self.extensions();
        exts.sort();
        f.debug_struct("Engines").field("extensions", &exts).finish()
    }
}
