use std::fs;
use std::path::Path;

use quip::{BoxError, Config};
use quip::local::LocalResponse;
use quip::views::{Exposure, RenderContext, RenderOptions, Views};
use serde_json::{json, Value};
use tempfile::TempDir;
use pretty_assertions::assert_eq;

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

/// A template of the form `@view` renders `view` as a partial over the local
/// `items`. Anything else is substituted.
fn list(ctxt: &RenderContext<'_>) -> Result<String, BoxError> {
    match ctxt.source().trim().strip_prefix('@') {
        Some(view) => {
            let items = ctxt.locals().get("items").cloned().unwrap_or_default();
            Ok(ctxt.partial().render(view, items)?)
        }
        None => substitute(ctxt),
    }
}

fn write(root: &Path, view: &str, contents: &str) {
    let path = root.join(view);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn setup() -> (TempDir, Views) {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "layout.txt", "<main>{{body}}</main>");
    write(dir.path(), "layout.list", "<main>{{body}}</main>");
    write(dir.path(), "people.list", "@person");
    write(dir.path(), "partials/user.txt", "{{user}}");
    write(dir.path(), "partials/item.txt",
        "{{indexInCollection}}:{{item}}:{{firstInCollection}}:{{lastInCollection}}/{{collectionLength}};");
    write(dir.path(), "partials/card.txt", "{{name}} ({{role}})");
    write(dir.path(), "partials/person.list", "<{{person}}>");
    write(dir.path(), "partials/post.summary.txt", "{{post}}");

    let config = Config { views: dir.path().into(), ..Config::debug_default() };
    let views = Views::custom(&config, |engines| {
        engines.insert("txt", substitute).insert("list", list);
    });

    (dir, views)
}

#[test]
fn partials_never_use_a_layout() {
    let (_dir, views) = setup();
    let options = RenderOptions::new().object("Ada").layout("layout");
    assert_eq!(views.partial("user.txt", options, None).unwrap(), "Ada");
}

#[test]
fn object_is_exposed_by_view_name() {
    let (_dir, views) = setup();
    assert_eq!(views.partial("user.txt", RenderOptions::new().object("Ada"), None).unwrap(), "Ada");
    assert_eq!(views.partial("post.summary.txt", RenderOptions::new().object("p1"), None).unwrap(), "p1");
}

#[test]
fn object_exposure_modes() {
    let (_dir, views) = setup();
    let person = json!({ "name": "Ada", "role": "admin" });

    let named = RenderOptions::new().object("Grace").exposed_as("user");
    assert_eq!(views.partial("user.txt", named, None).unwrap(), "Grace");

    let merged = RenderOptions::new().object(person.clone()).exposed_as(Exposure::MergeIntoLocals);
    assert_eq!(views.partial("card.txt", merged, None).unwrap(), "Ada (admin)");

    let scoped = RenderOptions::new().object(person).exposed_as(Exposure::Scope);
    assert_eq!(views.partial("card.txt", scoped, None).unwrap(), "Ada (admin)");
}

#[test]
fn locals_take_precedence_over_scope() {
    let (_dir, views) = setup();
    let options = RenderOptions::new()
        .scope(json!({ "name": "Ada", "role": "admin" }))
        .local("role", "owner");

    assert_eq!(views.partial("card.txt", options, None).unwrap(), "Ada (owner)");
}

#[test]
fn collections_render_in_order_with_position_locals() {
    let (_dir, views) = setup();
    let output = views.partial("item.txt", vec![json!("a"), json!("b"), json!("c")], None).unwrap();
    assert_eq!(output, "0:a:true:false/3;1:b:false:false/3;2:c:false:true/3;");
}

#[test]
fn collection_items_honor_exposure() {
    let (_dir, views) = setup();
    let people = [json!({ "name": "Ada", "role": "admin" }), json!({ "name": "Grace", "role": "dev" })];
    let options = RenderOptions::new().collection(people).exposed_as(Exposure::MergeIntoLocals);
    assert_eq!(views.partial("card.txt", options, None).unwrap(), "Ada (admin)Grace (dev)");

    let options = RenderOptions::new().collection(["x", "y"]).exposed_as("user");
    assert_eq!(views.partial("user.txt", options, None).unwrap(), "xy");
}

#[test]
fn empty_collection_renders_nothing() {
    let (_dir, views) = setup();
    assert_eq!(views.partial("item.txt", Vec::<Value>::new(), None).unwrap(), "");
}

#[test]
fn options_from_json_object() {
    let (_dir, views) = setup();
    let options = json!({ "collection": ["Ada", "Grace"], "as": "user" });
    assert_eq!(views.partial("user.txt", options, None).unwrap(), "AdaGrace");

    let options = json!({ "object": { "name": "Ada", "role": "admin" }, "as": "this" });
    assert_eq!(views.partial("card.txt", options, None).unwrap(), "Ada (admin)");
}

#[test]
fn parent_extension_is_inherited() {
    let (_dir, views) = setup();
    assert_eq!(views.partial("user", RenderOptions::new().object("Ada"), Some("txt")).unwrap(), "Ada");
}

#[test]
fn templates_render_nested_partials() {
    let (_dir, views) = setup();
    let options = RenderOptions::new().local("items", json!(["Ada", "Grace"]));
    assert_eq!(views.render("people.list", &options).unwrap(), "<main><Ada><Grace></main>");
}

#[test]
fn response_partial_returns_output() {
    let (_dir, views) = setup();
    let res = quip::Quip::new(views).decorate(LocalResponse::new());
    let output = res.partial("item.txt", vec![json!("only")]).unwrap();
    assert_eq!(output, "0:only:true:true/1;");
    assert!(!res.is_sent());
}
