use std::collections::BTreeMap;

use minijinja::{Environment, Error, ErrorKind, Value};

use quip::BoxError;
use quip::views::{Engine, Partial, RenderContext};

/// Renders views with [MiniJinja](https://docs.rs/minijinja/1).
///
/// Every render starts from a copy of the environment the engine was built
/// with, so filters, tests and globals added to it are available to all
/// views.
#[derive(Debug, Clone)]
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// The extensions MiniJinja views use.
    pub const EXTENSIONS: &'static [&'static str] = &["j2", "jinja"];

    pub fn new() -> Self {
        MiniJinjaEngine::with_env(Environment::new())
    }

    pub fn with_env(env: Environment<'static>) -> Self {
        MiniJinjaEngine { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        MiniJinjaEngine::new()
    }
}

fn partial_fn(partial: Partial)
    -> impl Fn(String, Option<Value>) -> Result<Value, Error> + Send + Sync + 'static
{
    move |view: String, options: Option<Value>| {
        let options = match options {
            Some(options) => serde_json::to_value(&options).map_err(|e| {
                Error::new(ErrorKind::InvalidOperation, "invalid partial options").with_source(e)
            })?,
            None => serde_json::Value::Null,
        };

        partial.render(&view, options)
            .map(Value::from_safe_string)
            .map_err(|e| {
                let msg = format!("partial '{}' failed to render", view);
                Error::new(ErrorKind::InvalidOperation, msg).with_source(e)
            })
    }
}

/// The template context. A layout's `body` is already rendered output, so it
/// is never escaped again.
fn context(ctxt: &RenderContext<'_>) -> BTreeMap<String, Value> {
    let serde_json::Value::Object(fields) = ctxt.context() else {
        return BTreeMap::new();
    };

    fields.into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(body) if ctxt.is_layout() && key == "body" => {
                (key, Value::from_safe_string(body))
            }
            value => (key, Value::from_serialize(&value)),
        })
        .collect()
}

impl Engine for MiniJinjaEngine {
    fn render(&self, ctxt: &RenderContext<'_>) -> Result<String, BoxError> {
        let mut env = self.env.clone();
        env.add_function("partial", partial_fn(ctxt.partial().clone()));

        // Auto-escaping is chosen by the template's name.
        let name = ctxt.view().to_string();
        env.add_template_owned(name.clone(), ctxt.source().to_string())?;
        let output = env.get_template(&name)?.render(context(ctxt))?;
        Ok(output)
    }
}
