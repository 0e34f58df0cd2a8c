use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;
use crate::http::{HeaderMap, Status};

/// Which layout, if any, wraps a rendered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Layout {
    /// The configured default layout (`layout`), with the view's extension.
    #[default]
    Default,
    /// A layout by name. The view's extension is appended if the name has
    /// none.
    Named(String),
    /// No layout: the view's output is the final output.
    Disabled,
}

impl Layout {
    /// Resolves this layout to a view name, given the default layout name and
    /// the extension of the view being wrapped.
    pub(crate) fn resolve(&self, default: &str, ext: Option<&str>) -> Option<String> {
        let name = match self {
            Layout::Default => default,
            Layout::Named(name) if !name.is_empty() => name.as_str(),
            Layout::Named(_) | Layout::Disabled => return None,
        };

        match ext {
            Some(ext) if super::extension(name).is_none() => Some(format!("{}.{}", name, ext)),
            _ => Some(name.to_string()),
        }
    }
}

impl From<bool> for Layout {
    fn from(enabled: bool) -> Self {
        if enabled { Layout::Default } else { Layout::Disabled }
    }
}

impl From<&str> for Layout {
    fn from(name: &str) -> Self {
        Layout::Named(name.to_string())
    }
}

impl From<String> for Layout {
    fn from(name: String) -> Self {
        Layout::Named(name)
    }
}

/// How the `object` of a partial is exposed to its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exposure {
    /// As a local with this name.
    Named(String),
    /// Each field of the object becomes a local of its own.
    MergeIntoLocals,
    /// As the template's evaluation scope.
    Scope,
}

impl From<&str> for Exposure {
    fn from(name: &str) -> Self {
        Exposure::Named(name.to_string())
    }
}

impl From<String> for Exposure {
    fn from(name: String) -> Self {
        Exposure::Named(name)
    }
}

/// Options for a single render.
///
/// Options are built fresh for every render, typically with the builder
/// methods:
///
/// ```rust
/// use quip::views::{RenderOptions, Layout};
/// use quip::http::Status;
///
/// let options = RenderOptions::new()
///     .local("title", "Home")
///     .layout("frame")
///     .status(Status::Created);
///
/// assert_eq!(options.layout, Layout::Named("frame".into()));
/// ```
///
/// A bare sequence converts into options that render a partial once per
/// element, and a JSON object converts field by field (see
/// [`RenderOptions::from_value()`]). These are the forms templates use when
/// calling `partial`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Named values visible to the template.
    pub locals: Map<String, Value>,
    /// Renders from the partials directory, without a layout, returning the
    /// output instead of sending it.
    pub partial: bool,
    /// The layout wrapping the output.
    pub layout: Layout,
    /// A single value exposed to a partial.
    pub object: Option<Value>,
    /// How `object` is exposed. Defaults to a local named after the view.
    pub exposure: Option<Exposure>,
    /// Values to render the same partial against, once each, in order.
    pub collection: Option<Vec<Value>>,
    /// The template's evaluation scope.
    pub scope: Option<Value>,
    /// Status to respond with when the output is sent.
    pub status: Option<Status>,
    /// Headers to respond with when the output is sent.
    pub headers: HeaderMap,
    pub(crate) is_layout: bool,
}

impl RenderOptions {
    /// Returns empty options: default layout, no locals.
    pub fn new() -> Self {
        RenderOptions::default()
    }

    /// Sets the local `name` to `value`.
    pub fn local<N: Into<String>, V: Into<Value>>(mut self, name: N, value: V) -> Self {
        self.locals.insert(name.into(), value.into());
        self
    }

    /// Merges the fields of `context` into the locals.
    ///
    /// `context` can be any `Serialize` value that serializes to a map, such
    /// as a `HashMap` or a struct. Fails if it doesn't.
    pub fn context<C: Serialize>(mut self, context: C) -> Result<Self, Error> {
        match serde_json::to_value(context)? {
            Value::Object(fields) => self.locals.extend(fields),
            Value::Null => {},
            _ => return Err(Error::Serialize(serde::ser::Error::custom(
                "render context must serialize to a map"
            ))),
        }

        Ok(self)
    }

    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    pub fn layout<L: Into<Layout>>(mut self, layout: L) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn object<V: Into<Value>>(mut self, object: V) -> Self {
        self.object = Some(object.into());
        self
    }

    /// Sets how `object` and collection items are exposed.
    pub fn exposed_as<E: Into<Exposure>>(mut self, exposure: E) -> Self {
        self.exposure = Some(exposure.into());
        self
    }

    pub fn collection<I>(mut self, collection: I) -> Self
        where I: IntoIterator, I::Item: Into<Value>
    {
        self.collection = Some(collection.into_iter().map(Into::into).collect());
        self
    }

    pub fn scope<V: Into<Value>>(mut self, scope: V) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn header<N, V>(mut self, name: N, value: V) -> Self
        where N: Into<std::borrow::Cow<'static, str>>, V: Into<String>
    {
        self.headers.insert(name, value);
        self
    }

    /// Whether these options are rendering a layout around a child view.
    pub fn is_layout(&self) -> bool {
        self.is_layout
    }

    /// Converts a JSON value into options.
    ///
    ///   * An array becomes the `collection`.
    ///   * An object is read field by field: `locals`, `object`, `as`,
    ///     `collection`, `scope`, `layout` and `partial` set the option of the
    ///     same name. `as` is a local name, or one of the sentinels `"this"`
    ///     ([`Exposure::Scope`]) and `"global"`
    ///     ([`Exposure::MergeIntoLocals`]). `status` is a numeric code and
    ///     `headers` an object of header names to values; both apply when the
    ///     output is sent. Any other field becomes a local.
    ///   * Anything else yields the default options.
    pub fn from_value(value: Value) -> Self {
        let fields = match value {
            Value::Array(items) => return RenderOptions::new().collection(items),
            Value::Object(fields) => fields,
            _ => return RenderOptions::new(),
        };

        let mut options = RenderOptions::new();
        for (key, value) in fields {
            match (key.as_str(), value) {
                ("locals", Value::Object(locals)) => options.locals.extend(locals),
                ("object", object) => options.object = Some(object),
                ("as", Value::String(name)) => options.exposure = Some(match name.as_str() {
                    "this" => Exposure::Scope,
                    "global" => Exposure::MergeIntoLocals,
                    _ => Exposure::Named(name.clone()),
                }),
                ("collection", Value::Array(items)) => options.collection = Some(items),
                ("scope", scope) => options.scope = Some(scope),
                ("layout", Value::Bool(enabled)) => options.layout = enabled.into(),
                ("layout", Value::String(name)) => options.layout = name.into(),
                ("partial", Value::Bool(partial)) => options.partial = partial,
                ("status", Value::Number(code)) => match code.as_u64().map(u16::try_from) {
                    Some(Ok(code)) => options.status = Some(Status::raw(code)),
                    _ => { debug_!("ignoring out of range status '{}'", code); }
                },
                ("headers", Value::Object(headers)) => {
                    for (name, value) in headers {
                        let value = match value {
                            Value::String(value) => value,
                            value => value.to_string(),
                        };

                        options.headers.insert(name, value);
                    }
                }
                (_, value) => { options.locals.insert(key.clone(), value); }
            }
        }

        options
    }
}

impl From<Vec<Value>> for RenderOptions {
    fn from(collection: Vec<Value>) -> Self {
        RenderOptions::new().collection(collection)
    }
}

impl From<Value> for RenderOptions {
    fn from(value: Value) -> Self {
        RenderOptions::from_value(value)
    }
}

impl From<Map<String, Value>> for RenderOptions {
    fn from(locals: Map<String, Value>) -> Self {
        RenderOptions { locals, ..RenderOptions::default() }
    }
}
