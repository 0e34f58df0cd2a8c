use quip::{Quip, Config, Body, Error};
use quip::local::LocalResponse;
use quip::raw::Http1Writer;
use quip::http::Status;
use serde_json::json;
use pretty_assertions::assert_eq;

type Res = quip::Response<LocalResponse>;

fn response() -> Res {
    Quip::from_config(&Config::debug_default()).decorate(LocalResponse::new())
}

#[test]
fn defaults_to_ok_html() {
    let mut res = response();
    assert_eq!(res.get_status(), Status::Ok);
    assert_eq!(res.get_header("content-type"), Some("text/html"));

    res.send("<p>hi</p>").unwrap();
    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::Ok));
    assert_eq!(raw.header("Content-Type"), Some("text/html"));
    assert_eq!(raw.body_string(), "<p>hi</p>");
    assert!(raw.is_ended());
}

#[test]
fn status_shortcuts_chain_without_sending() {
    let mut res = response();
    res.not_found();
    assert_eq!(res.get_status(), Status::NotFound);
    assert!(!res.is_sent());
    assert_eq!(res.raw().head_count(), 0);

    res.not_allowed();
    assert_eq!(res.get_status().code, 405);
    res.error();
    assert_eq!(res.get_status().code, 500);
}

#[test]
fn status_shortcuts_with_body_send() {
    let mut res = response();
    res.not_found_with("missing").unwrap();
    assert!(res.is_sent());

    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::NotFound));
    assert_eq!(raw.body_string(), "missing");

    let mut res = response();
    res.gone().text_with("bye").unwrap();
    let raw = res.into_raw();
    assert_eq!(raw.status().map(|s| s.code), Some(410));
    assert_eq!(raw.header("content-type"), Some("text/plain"));
}

#[test]
fn every_status_shortcut_sets_its_code() {
    type Set = fn(&mut Res) -> &mut Res;
    type SetAndSend = fn(&mut Res, &'static str) -> Result<(), Error>;

    let shortcuts: [(Set, SetAndSend, u16); 11] = [
        (Res::ok, Res::ok_with::<&'static str>, 200),
        (Res::created, Res::created_with::<&'static str>, 201),
        (Res::accepted, Res::accepted_with::<&'static str>, 202),
        (Res::bad_request, Res::bad_request_with::<&'static str>, 400),
        (Res::unauthorized, Res::unauthorized_with::<&'static str>, 401),
        (Res::forbidden, Res::forbidden_with::<&'static str>, 403),
        (Res::not_found, Res::not_found_with::<&'static str>, 404),
        (Res::not_allowed, Res::not_allowed_with::<&'static str>, 405),
        (Res::conflict, Res::conflict_with::<&'static str>, 409),
        (Res::gone, Res::gone_with::<&'static str>, 410),
        (Res::error, Res::error_with::<&'static str>, 500),
    ];

    for (set, set_and_send, code) in shortcuts {
        let mut res = response();
        set(&mut res);
        assert_eq!(res.get_status().code, code);
        assert!(!res.is_sent());
        assert_eq!(res.raw().head_count(), 0);

        let mut res = response();
        set_and_send(&mut res, "payload").unwrap();
        assert!(res.is_sent());

        let raw = res.into_raw();
        assert_eq!(raw.status().map(|s| s.code), Some(code));
        assert_eq!(raw.body_string(), "payload");
        assert_eq!(raw.head_count(), 1);
        assert!(raw.is_ended());
    }
}

#[test]
fn content_type_shortcuts() {
    let mut res = response();
    assert_eq!(res.text().get_header("Content-Type"), Some("text/plain"));
    assert_eq!(res.html().get_header("Content-Type"), Some("text/html"));
    assert_eq!(res.plain().get_header("Content-Type"), Some("text/plain"));
    assert_eq!(res.xhtml().get_header("Content-Type"), Some("application/xhtml+xml"));
    assert_eq!(res.css().get_header("Content-Type"), Some("text/css"));
    assert_eq!(res.xml().get_header("Content-Type"), Some("text/xml"));
    assert_eq!(res.atom().get_header("Content-Type"), Some("application/atom+xml"));
    assert_eq!(res.rss().get_header("Content-Type"), Some("application/rss+xml"));
    assert_eq!(res.javascript().get_header("Content-Type"), Some("text/javascript"));
    assert_eq!(res.json().get_header("Content-Type"), Some("application/json"));
    assert_eq!(res.get_headers().len(), 1);
}

#[test]
fn json_bodies_are_serialized() {
    let mut res = response();
    res.created().json_with(json!({ "id": 7, "tags": ["a"] })).unwrap();

    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::Created));
    assert_eq!(raw.header("Content-Type"), Some("application/json"));
    assert_eq!(raw.body_string(), r#"{"id":7,"tags":["a"]}"#);

    #[derive(serde::Serialize)]
    struct User { name: &'static str }

    let mut res = response();
    res.json_with(Body::json(User { name: "ada" }).unwrap()).unwrap();
    assert_eq!(res.into_raw().body_string(), r#"{"name":"ada"}"#);
}

#[test]
fn redirects() {
    let mut res = response();
    res.redirect("/login").unwrap();

    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::Found));
    assert_eq!(raw.header("Location"), Some("/login"));
    assert_eq!(raw.body_string(), "<html><head><title>302 Found</title></head>\
        <body><p>Found: <a href=\"/login\">/login</a></p></body></html>");

    let mut res = response();
    res.moved("http://example.com/").unwrap();
    let raw = res.into_raw();
    assert_eq!(raw.status().map(|s| s.code), Some(301));
    assert!(raw.body_string().contains("<title>301 Moved Permanently</title>"));

    let mut res = response();
    res.found("/a").unwrap();
    assert_eq!(res.into_raw().status(), Some(Status::Found));
}

#[test]
fn redirect_with_line_break_is_refused() {
    let quip = Quip::from_config(&Config::debug_default());
    let mut res = quip.decorate(Http1Writer::new(Vec::new()));
    let error = res.redirect("/home\r\nSet-Cookie: session=stolen").unwrap_err();
    assert!(matches!(error, Error::Io(ref e) if e.kind() == std::io::ErrorKind::InvalidInput));

    let wire = res.into_raw().into_inner();
    assert!(wire.is_empty());
}

#[test]
fn http1_writer_sends_redirects() {
    let quip = Quip::from_config(&Config::debug_default());
    let mut res = quip.decorate(Http1Writer::new(Vec::new()));
    res.redirect("/home").unwrap();

    let wire = String::from_utf8(res.into_raw().into_inner()).unwrap();
    assert!(wire.starts_with("HTTP/1.1 302 Found\r\n"));
    assert!(wire.contains("Location: /home\r\n"));
}

#[test]
fn not_modified_has_no_body() {
    let mut res = response();
    res.not_modified().unwrap();

    let raw = res.into_raw();
    assert_eq!(raw.status().map(|s| s.code), Some(304));
    assert!(raw.body().is_empty());
    assert!(raw.is_ended());
}

#[test]
fn jsonp_is_always_ok_javascript() {
    let mut res = response();
    res.not_found().jsonp("cb", json!({ "a": 1 })).unwrap();

    let raw = res.into_raw();
    assert_eq!(raw.status(), Some(Status::Ok));
    assert_eq!(raw.header("Content-Type"), Some("text/javascript"));
    assert_eq!(raw.body_string(), r#"cb({"a":1});"#);

    let mut res = response();
    res.jsonp("cb", "[1,2]").unwrap();
    assert_eq!(res.into_raw().body_string(), "cb([1,2]);");
}

#[test]
fn headers_are_case_insensitive_and_last_write_wins() {
    let mut res = response();
    res.headers([("X-Thing", "one"), ("x-thing", "two")])
        .header("content-type", "text/csv");

    assert_eq!(res.get_header("X-THING"), Some("two"));
    assert_eq!(res.get_headers().len(), 2);

    res.send("a,b").unwrap();
    assert_eq!(res.into_raw().header("Content-Type"), Some("text/csv"));
}

#[test]
fn second_send_writes_nothing() {
    let mut res = response();
    res.ok_with("first").unwrap();
    res.bad_request_with("second").unwrap();

    let raw = res.into_raw();
    assert_eq!(raw.head_count(), 1);
    assert_eq!(raw.status(), Some(Status::Ok));
    assert_eq!(raw.body_string(), "first");
}

#[test]
fn handle_decorates_before_next() {
    let quip = Quip::from_config(&Config::debug_default());
    let raw = quip.handle("GET /", LocalResponse::new(), |req, mut res| {
        assert_eq!(req, "GET /");
        res.accepted_with(()).unwrap();
        res.into_raw()
    });

    assert_eq!(raw.status(), Some(Status::Accepted));
    assert!(raw.body().is_empty());
}
