use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::error::Error;
use crate::views::{Engines, Exposure, Layout, RenderContext, RenderOptions};

/// The view renderer.
///
/// `Views` is cheap to clone; clones share the same engines.
#[derive(Clone)]
pub struct Views(Arc<Inner>);

struct Inner {
    root: PathBuf,
    partials: String,
    layout: String,
    default_ext: Option<String>,
    engines: Engines,
}

/// A handle for rendering partials from within a template.
///
/// Views without an extension are rendered with the extension of the
/// template the handle was given to.
#[derive(Clone)]
pub struct Partial {
    views: Views,
    ext: Option<String>,
}

impl Views {
    /// Returns a renderer for the views in `config` without any engines.
    pub fn new(config: &Config) -> Views {
        Views::custom(config, |_| ())
    }

    /// Returns a renderer for the views in `config`, calling `f` to register
    /// its engines.
    pub fn custom<F: FnOnce(&mut Engines)>(config: &Config, f: F) -> Views {
        let mut engines = Engines::new();
        f(&mut engines);

        config.pretty_print();
        let mut exts = engines.extensions();
        exts.sort();
        info_!("engines: {}", exts.join(", "));

        let default_ext = config.view_engine.as_ref()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty());

        Views(Arc::new(Inner {
            root: config.views_root(),
            partials: config.partials.clone(),
            layout: config.layout.clone(),
            default_ext,
            engines,
        }))
    }

    /// The absolute directory views are resolved against.
    pub fn root(&self) -> &Path {
        &self.0.root
    }

    pub fn engines(&self) -> &Engines {
        &self.0.engines
    }

    /// Reads the template at `path`.
    pub fn load_view<P: AsRef<Path>>(&self, path: P) -> Result<String, Error> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map_err(|error| Error::Load { path: path.to_path_buf(), error })
    }

    /// Resolves `view` to the path of its template. Views that start with a
    /// path separator are used as-is, others are relative to the views root,
    /// or to its partials directory if `partial` is set.
    pub fn resolve(&self, view: &str, partial: bool) -> PathBuf {
        let path = Path::new(view);
        if view.starts_with('/') || path.is_absolute() {
            return path.to_path_buf();
        }

        match partial {
            true => self.0.root.join(&self.0.partials).join(path),
            false => self.0.root.join(path),
        }
    }

    /// Renders `view` with `options`, wrapped in its layout unless the layout
    /// is disabled.
    ///
    /// A `collection` in `options` is ignored; use [`Views::partial()`] to
    /// render one.
    pub fn render(&self, view: &str, options: &RenderOptions) -> Result<String, Error> {
        let view = match (super::extension(view), &self.0.default_ext) {
            (None, Some(ext)) => format!("{}.{}", view, ext),
            _ => view.to_string(),
        };

        let ext = super::extension(&view);
        let layout = match options.partial {
            true => None,
            false => options.layout.resolve(&self.0.layout, ext),
        };

        let path = self.resolve(&view, options.partial);
        debug_!("rendering '{}' from {}", view, path.display());

        let mut effective = options.clone();
        effective.collection = None;
        effective.locals.insert("__filename".into(), path.display().to_string().into());

        let source = self.load_view(&path)?;
        let ext = ext.ok_or_else(|| Error::UnknownEngine(String::new()))?;
        let engine = self.0.engines.get(ext)?;
        let partial = Partial { views: self.clone(), ext: Some(ext.to_string()) };
        let ctxt = RenderContext {
            view: &view,
            source: &source,
            filename: &path,
            options: &effective,
            partial: &partial,
        };

        let output = engine.render(&ctxt)
            .map_err(|error| Error::Render { view: view.clone(), error })?;

        let Some(layout) = layout else {
            return Ok(output);
        };

        effective.layout = Layout::Disabled;
        effective.is_layout = true;
        effective.locals.insert("body".into(), output.into());
        self.render(&layout, &effective)
    }

    /// Renders `view` as a partial: from the partials directory, never with a
    /// layout.
    ///
    /// `options` may be a bare collection (`Vec<Value>`). Without an
    /// extension, `view` takes `parent_ext`.
    pub fn partial<O>(&self, view: &str, options: O, parent_ext: Option<&str>) -> Result<String, Error>
        where O: Into<RenderOptions>
    {
        let view = match (super::extension(view), parent_ext) {
            (None, Some(ext)) => format!("{}.{}", view, ext.trim_start_matches('.')),
            _ => view.to_string(),
        };

        let mut options = options.into();
        options.partial = true;
        options.layout = Layout::Disabled;

        if let Some(collection) = options.collection.take() {
            let len = collection.len();
            options.locals.insert("collectionLength".into(), len.into());

            let mut output = String::new();
            for (i, item) in collection.into_iter().enumerate() {
                let mut item_options = options.clone();
                item_options.locals.insert("firstInCollection".into(), (i == 0).into());
                item_options.locals.insert("indexInCollection".into(), i.into());
                item_options.locals.insert("lastInCollection".into(), (i + 1 == len).into());
                item_options.object = Some(item);
                output.push_str(&self.partial(&view, item_options, None)?);
            }

            return Ok(output);
        }

        if let Some(object) = options.object.clone() {
            match options.exposure.clone() {
                Some(Exposure::Named(name)) => { options.locals.insert(name, object); }
                None => { options.locals.insert(super::exposed_name(&view).into(), object); }
                Some(Exposure::MergeIntoLocals) => match object {
                    Value::Object(fields) => options.locals.extend(fields),
                    _ => { debug_!("'{}': only objects can be merged into locals", view); }
                },
                Some(Exposure::Scope) => options.scope = Some(object),
            }
        }

        self.render(&view, &options)
    }
}

impl Partial {
    /// Renders `view` as a partial with `options`.
    pub fn render<O>(&self, view: &str, options: O) -> Result<String, Error>
        where O: Into<RenderOptions>
    {
        self.views.partial(view, options, self.ext.as_deref())
    }

    /// The extension given to views without one.
    pub fn extension(&self) -> Option<&str> {
        self.ext.as_deref()
    }

    pub fn views(&self) -> &Views {
        &self.views
    }
}

impl fmt::Debug for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Views")
            .field("root", &self.0.root)
            .field("partials", &self.0.partials)
            .field("layout", &self.0.layout)
            .field("default_ext", &self.0.default_ext)
            .field("engines", &self.0.engines)
            .finish()
    }
}

impl fmt::Debug for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partial").field("ext", &self.ext).finish()
    }
}
