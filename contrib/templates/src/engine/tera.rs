use std::collections::HashMap;
use std::error::Error;

use serde_json::{Map, Value};
use tera::{Context, Function, Tera};

use quip::BoxError;
use quip::views::{Engine, Partial, RenderContext};

/// Renders views with [Tera](https://docs.rs/tera/1).
///
/// Tera has no way to mark a value as already escaped, so auto-escaped
/// layouts such as `layout.html.tera` must output the wrapped view with
/// `{{ body | safe }}`.
#[derive(Debug, Clone)]
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// The extension Tera views use.
    pub const EXT: &'static str = "tera";

    pub fn new() -> Self {
        let mut tera = Tera::default();
        let ext = [".html.tera", ".htm.tera", ".xml.tera", ".html", ".htm", ".xml"];
        tera.autoescape_on(ext.to_vec());
        TeraEngine::with_tera(tera)
    }

    /// Uses `tera` as the base of every render. Templates added to it can be
    /// extended or included by views.
    pub fn with_tera(tera: Tera) -> Self {
        TeraEngine { tera }
    }
}

impl Default for TeraEngine {
    fn default() -> Self {
        TeraEngine::new()
    }
}

/// `partial(view=.., ..)`: any other argument is a render option, or all of
/// them at once as `options`. `as` is spelled `exposed_as`.
struct PartialFn(Partial);

impl Function for PartialFn {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let view = args.get("view")
            .and_then(|v| v.as_str())
            .ok_or_else(|| tera::Error::msg("`partial` requires a `view` string argument"))?;

        let options = match args.get("options") {
            Some(options) => options.clone(),
            None => Value::Object(args.iter()
                .filter(|(k, _)| k.as_str() != "view")
                .map(|(k, v)| match k.as_str() {
                    "exposed_as" => ("as".to_string(), v.clone()),
                    _ => (k.clone(), v.clone()),
                })
                .collect::<Map<_, _>>()),
        };

        self.0.render(view, options)
            .map(Value::String)
            .map_err(|e| tera::Error::chain(format!("partial '{}' failed to render", view), e))
    }

    fn is_safe(&self) -> bool {
        true
    }
}

impl Engine for TeraEngine {
    fn render(&self, ctxt: &RenderContext<'_>) -> Result<String, BoxError> {
        let mut tera = self.tera.clone();
        tera.register_function("partial", PartialFn(ctxt.partial().clone()));
        tera.add_raw_template(ctxt.view(), ctxt.source())?;

        let context = Context::from_value(ctxt.context())?;
        tera.render(ctxt.view(), &context).map_err(|e| {
            let mut error = e.source();
            while let Some(err) = error {
                info_!("{}", err);
                error = err.source();
            }

            e.into()
        })
    }
}
