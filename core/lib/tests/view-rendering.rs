use std::fs;
use std::path::Path;

use quip::{BoxError, Config, Error, Quip, Rendered};
use quip::http::Status;
use quip::local::LocalResponse;
use quip::views::{RenderContext, RenderOptions, Views};
use serde_json::{json, Value};
use tempfile::TempDir;
use pretty_assertions::assert_eq;

/// Replaces every `{{key}}` with the value of `key` in the template context.
fn substitute(ctxt: &RenderContext<'_>) -> Result<String, BoxError> {
    let mut output = ctxt.source().to_string();
    if let Value::Object(context) = ctxt.context() {
        for (key, value) in context {
            let text = match value {
                Value::String(s) => s,
                value => value.to_string(),
            };

            output = output.replace(&format!("{{{{{}}}}}", key), &text);
        }
    }

    Ok(output)
}

fn fail(_: &RenderContext<'_>) -> Result<String, BoxError> {
    Err("unexpected end of template".into())
}

fn write(root: &Path, view: &str, contents: &str) {
    let path = root.join(view);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn views(config: Config) -> Views {
    Views::custom(&config, |engines| {
        engines.insert("txt", substitute).insert("bad", fail);
    })
}

fn setup() -> (TempDir, Quip) {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "index.txt", "Hello, {{name}}!");
    write(dir.path(), "layout.txt", "<main>{{body}}</main>");
    write(dir.path(), "frame.txt", "[{{body}}]");
    write(dir.path(), "whoami.txt", "{{__filename}}");
    write(dir.path(), "broken.bad", "{% if %}");
    write(dir.path(), "partials/index.txt", "partial {{name}}");

    let config = Config { views: dir.path().into(), ..Config::debug_default() };
    (dir, Quip::new(views(config)))
}

#[test]
fn render_wraps_in_default_layout_and_sends() {
    let (_dir, quip) = setup();
    let mut res = quip.decorate(LocalResponse::new());
    let rendered = res.render("index.txt", RenderOptions::new().local("name", "Ada")).unwrap();
    assert_eq!(rendered, Rendered::Sent);

    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::Ok));
    assert_eq!(raw.header("Content-Type"), Some("text/html"));
    assert_eq!(raw.body_string(), "<main>Hello, Ada!</main>");
}

#[test]
fn layout_can_be_named_or_disabled() {
    let (_dir, quip) = setup();
    let views = quip.views();

    let named = RenderOptions::new().local("name", "Ada").layout("frame");
    assert_eq!(views.render("index.txt", &named).unwrap(), "[Hello, Ada!]");

    let explicit = RenderOptions::new().local("name", "Ada").layout("frame.txt");
    assert_eq!(views.render("index.txt", &explicit).unwrap(), "[Hello, Ada!]");

    let disabled = RenderOptions::new().local("name", "Ada").layout(false);
    assert_eq!(views.render("index.txt", &disabled).unwrap(), "Hello, Ada!");
}

#[test]
fn default_view_engine_is_appended() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "index.txt", "Hi {{name}}");
    let config = Config {
        views: dir.path().into(),
        view_engine: Some("txt".into()),
        ..Config::debug_default()
    };

    let views = views(config);
    let options = RenderOptions::new().local("name", "Grace").layout(false);
    assert_eq!(views.render("index", &options).unwrap(), "Hi Grace");
}

#[test]
fn filename_is_injected() {
    let (dir, quip) = setup();
    let options = RenderOptions::new().layout(false);
    let output = quip.views().render("whoami.txt", &options).unwrap();
    assert_eq!(Path::new(&output), dir.path().join("whoami.txt"));
}

#[test]
fn absolute_views_ignore_the_root() {
    let (_dir, quip) = setup();
    let elsewhere = tempfile::tempdir().unwrap();
    write(elsewhere.path(), "note.txt", "note for {{name}}");

    let view = elsewhere.path().join("note.txt");
    let options = RenderOptions::new().local("name", "Ada").layout(false);
    let output = quip.views().render(view.to_str().unwrap(), &options).unwrap();
    assert_eq!(output, "note for Ada");
}

#[test]
fn partial_render_is_returned_not_sent() {
    let (_dir, quip) = setup();
    let mut res = quip.decorate(LocalResponse::new());
    let options = RenderOptions::new().local("name", "Ada").partial(true).layout("frame");
    let rendered = res.render("index.txt", options).unwrap();

    assert_eq!(rendered, Rendered::Partial("partial Ada".into()));
    assert!(!res.is_sent());
    assert_eq!(res.into_raw().head_count(), 0);
}

#[test]
fn options_status_and_headers_apply_when_sent() {
    let (_dir, quip) = setup();
    let mut res = quip.decorate(LocalResponse::new());
    let options = RenderOptions::new()
        .local("name", "Ada")
        .status(Status::Created)
        .header("X-Page", "index");

    assert_eq!(res.render("index.txt", options).unwrap(), Rendered::Sent);
    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::Created));
    assert_eq!(raw.header("x-page"), Some("index"));
    assert_eq!(raw.header("Content-Type"), Some("text/html"));
}

#[test]
fn json_options_status_and_headers_apply_when_sent() {
    let (_dir, quip) = setup();
    let mut res = quip.decorate(LocalResponse::new());
    let options = json!({ "name": "Ada", "status": 202, "headers": { "X-Page": "queued" } });

    assert_eq!(res.render("index.txt", options).unwrap(), Rendered::Sent);
    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::Accepted));
    assert_eq!(raw.header("x-page"), Some("queued"));
}

#[test]
fn render_is_repeatable() {
    let (_dir, quip) = setup();
    let options = RenderOptions::new().local("name", "Ada");
    let first = quip.views().render("index.txt", &options).unwrap();
    let second = quip.views().render("index.txt", &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(options, RenderOptions::new().local("name", "Ada"));
}

#[test]
fn missing_view_is_a_load_error() {
    let (_dir, quip) = setup();
    let mut res = quip.decorate(LocalResponse::new());
    let error = res.render("nope.txt", RenderOptions::new()).unwrap_err();
    assert!(error.is_load());
    assert!(!res.is_sent());
}

#[test]
fn missing_layout_is_a_load_error() {
    let (_dir, quip) = setup();
    let options = RenderOptions::new().local("name", "Ada").layout("nope");
    let error = quip.views().render("index.txt", &options).unwrap_err();
    assert!(matches!(error, Error::Load { ref path, .. } if path.ends_with("nope.txt")));
}

#[test]
fn unknown_extension_is_an_error() {
    let (dir, quip) = setup();
    write(dir.path(), "index.xyz", "?");
    let error = quip.views().render("index.xyz", &RenderOptions::new()).unwrap_err();
    assert!(matches!(error, Error::UnknownEngine(ref ext) if ext == "xyz"));
}

#[test]
fn engine_failures_reach_the_continuation() {
    let (_dir, quip) = setup();
    let mut res = quip.decorate(LocalResponse::new());
    let options = RenderOptions::new().layout(false);
    res.render_with("broken.bad", options, |res, result| {
        let error = result.unwrap_err();
        assert!(error.is_render());
        assert!(error.to_string().contains("unexpected end of template"));
        res.error_with("sorry")
    }).unwrap();

    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::InternalServerError));
    assert_eq!(raw.body_string(), "sorry");
}

#[test]
fn render_with_receives_the_output() {
    let (_dir, quip) = setup();
    let mut res = quip.decorate(LocalResponse::new());
    let output = res.render_with("index.txt", json!({ "name": "Ada" }), |_, result| result);
    assert_eq!(output.unwrap(), "<main>Hello, Ada!</main>");
    assert!(!res.is_sent());
}

#[test]
fn load_view_reads_templates() {
    let (dir, quip) = setup();
    let res = quip.decorate(LocalResponse::new());
    assert_eq!(res.load_view(dir.path().join("frame.txt")).unwrap(), "[{{body}}]");
    assert!(res.load_view(dir.path().join("nope.txt")).unwrap_err().is_load());
}
