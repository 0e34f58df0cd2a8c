use std::borrow::Cow;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::http::{ContentType, HeaderMap, Status};
use crate::raw::RawResponse;
use crate::response::Body;
use crate::views::{RenderOptions, Views};

/// The outcome of [`Response::render()`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The output was sent.
    Sent,
    /// The view was rendered as a partial; its output was not sent.
    Partial(String),
}

impl Rendered {
    /// The output of a partial render, if this is one.
    pub fn into_partial(self) -> Option<String> {
        match self {
            Rendered::Partial(output) => Some(output),
            Rendered::Sent => None,
        }
    }
}

/// A host response decorated with Quip's shortcuts.
///
/// A `Response` keeps a pending status, `200 OK` to begin with, and pending
/// headers, `Content-Type: text/html` to begin with. Nothing is written to the
/// host response until the response is sent, which happens at most once.
///
/// # Shortcuts
///
/// Status shortcuts such as [`not_found()`](Response::not_found()) set the
/// pending status and return the response for chaining. Their `_with`
/// variants also send a body:
///
/// ```rust
/// use quip::{Quip, Config};
/// use quip::local::LocalResponse;
///
/// let quip = Quip::from_config(&Config::default());
/// let mut res = quip.decorate(LocalResponse::new());
/// res.created().json_with(serde_json::json!({ "id": 7 })).unwrap();
///
/// let raw = res.into_raw();
/// assert_eq!(raw.status().unwrap().code, 201);
/// assert_eq!(raw.header("content-type"), Some("application/json"));
/// assert_eq!(raw.body_string(), r#"{"id":7}"#);
/// ```
#[derive(Debug)]
pub struct Response<R> {
    raw: R,
    views: Views,
    status: Status,
    headers: HeaderMap,
    sent: bool,
}

macro_rules! status_shortcuts {
    ($($name:ident, $with:ident => $status:ident),+ $(,)?) => {
        $(
            #[doc="Sets the status to [`Status::"]
            #[doc=stringify!($status)]
            #[doc="`]."]
            pub fn $name(&mut self) -> &mut Self {
                self.status(Status::$status)
            }

            #[doc="Sets the status to [`Status::"]
            #[doc=stringify!($status)]
            #[doc="`] and sends `body`."]
            pub fn $with<B: Into<Body>>(&mut self, body: B) -> Result<(), Error> {
                self.$name().send(body)
            }
        )+
    };
}

macro_rules! content_type_shortcuts {
    ($($name:ident, $with:ident => $ct:ident),+ $(,)?) => {
        $(
            #[doc="Sets the `Content-Type` to [`ContentType::"]
            #[doc=stringify!($ct)]
            #[doc="`]."]
            pub fn $name(&mut self) -> &mut Self {
                self.content_type(ContentType::$ct)
            }

            #[doc="Sets the `Content-Type` to [`ContentType::"]
            #[doc=stringify!($ct)]
            #[doc="`] and sends `body`."]
            pub fn $with<B: Into<Body>>(&mut self, body: B) -> Result<(), Error> {
                self.$name().send(body)
            }
        )+
    };
}

impl<R: RawResponse> Response<R> {
    pub(crate) fn new(raw: R, views: Views) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", ContentType::HTML);
        Response { raw, views, status: Status::Ok, headers, sent: false }
    }

    /// Sets the pending status.
    pub fn status(&mut self, status: Status) -> &mut Self {
        self.status = status;
        self
    }

    /// Sets the pending header `name`, replacing any header of the same name
    /// regardless of case.
    pub fn header<N, V>(&mut self, name: N, value: V) -> &mut Self
        where N: Into<Cow<'static, str>>, V: Into<String>
    {
        self.headers.insert(name, value);
        self
    }

    /// Sets every header in `headers`. Later values win.
    pub fn headers<I, N, V>(&mut self, headers: I) -> &mut Self
        where I: IntoIterator<Item = (N, V)>, N: Into<Cow<'static, str>>, V: Into<String>
    {
        self.headers.extend(headers);
        self
    }

    pub fn content_type(&mut self, content_type: ContentType) -> &mut Self {
        self.header("Content-Type", content_type)
    }

    /// The pending status.
    pub fn get_status(&self) -> Status {
        self.status
    }

    /// The pending value of the header `name`.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn get_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the response has been sent.
    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// Sends `body` with the pending status and headers.
    ///
    /// A [`Body::Json`] is written as JSON text. An empty body writes only the
    /// head. Once a response is sent, later sends write nothing.
    pub fn send<B: Into<Body>>(&mut self, body: B) -> Result<(), Error> {
        if self.sent {
            warn_!("Response was already sent. Ignoring this send.");
            return Ok(());
        }

        let body = body.into();
        let bytes = body.to_bytes()?;
        self.sent = true;
        self.raw.write_head(self.status, &self.headers)?;
        if !bytes.is_empty() {
            self.raw.write(&bytes)?;
        }

        self.raw.end()?;
        Ok(())
    }

    status_shortcuts! {
        ok, ok_with => Ok,
        created, created_with => Created,
        accepted, accepted_with => Accepted,
        bad_request, bad_request_with => BadRequest,
        unauthorized, unauthorized_with => Unauthorized,
        forbidden, forbidden_with => Forbidden,
        not_found, not_found_with => NotFound,
        not_allowed, not_allowed_with => MethodNotAllowed,
        conflict, conflict_with => Conflict,
        gone, gone_with => Gone,
        error, error_with => InternalServerError,
    }

    content_type_shortcuts! {
        text, text_with => Plain,
        plain, plain_with => Plain,
        html, html_with => HTML,
        xhtml, xhtml_with => XHTML,
        css, css_with => CSS,
        xml, xml_with => XML,
        atom, atom_with => Atom,
        rss, rss_with => RSS,
        javascript, javascript_with => JavaScript,
        json, json_with => JSON,
    }

    fn redirection(&mut self, status: Status, location: &str) -> Result<(), Error> {
        let body = format!(
            "<html><head><title>{code} {reason}</title></head>\
            <body><p>{reason}: <a href=\"{loc}\">{loc}</a></p></body></html>",
            code = status.code, reason = status.reason, loc = location
        );

        self.header("Location", location).status(status).send(body)
    }

    /// Sends a `301 Moved Permanently` redirect to `location`.
    pub fn moved(&mut self, location: &str) -> Result<(), Error> {
        self.redirection(Status::MovedPermanently, location)
    }

    /// Sends a `302 Found` redirect to `location`.
    pub fn redirect(&mut self, location: &str) -> Result<(), Error> {
        self.redirection(Status::Found, location)
    }

    /// Same as [`Response::redirect()`].
    pub fn found(&mut self, location: &str) -> Result<(), Error> {
        self.redirect(location)
    }

    /// Sends `304 Not Modified` without a body.
    pub fn not_modified(&mut self) -> Result<(), Error> {
        self.status(Status::NotModified).send(())
    }

    /// Sends `callback(data);` as JavaScript, always with `200 OK`.
    ///
    /// A string `data` is written as-is; anything else is written as JSON.
    pub fn jsonp<T: Serialize>(&mut self, callback: &str, data: T) -> Result<(), Error> {
        let data = match serde_json::to_value(data)? {
            Value::String(s) => s,
            value => value.to_string(),
        };

        self.ok().javascript_with(format!("{}({});", callback, data))
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    /// Reads the template at `path`.
    pub fn load_view<P: AsRef<Path>>(&self, path: P) -> Result<String, Error> {
        self.views.load_view(path)
    }

    /// Renders `view` and sends the output.
    ///
    /// The output is sent with the status and headers in `options`, if any,
    /// applied on top of the pending ones. If `options` render a partial, the
    /// output is returned instead of sent.
    ///
    /// Failures are logged and returned; nothing is sent.
    pub fn render<O: Into<RenderOptions>>(&mut self, view: &str, options: O) -> Result<Rendered, Error> {
        let options = options.into();
        let output = self.views.render(view, &options).map_err(|e| {
            error_!("Failed to render '{}': {}", view, e);
            e
        })?;

        if options.partial {
            return Ok(Rendered::Partial(output));
        }

        if let Some(status) = options.status {
            self.status(status);
        }

        self.headers.merge(&options.headers);
        self.send(output)?;
        Ok(Rendered::Sent)
    }

    /// Renders `view` and passes the result to `f` instead of sending it.
    ///
    /// ```rust
    /// use quip::{Quip, Config};
    /// use quip::local::LocalResponse;
    /// use quip::views::RenderOptions;
    ///
    /// let quip = Quip::from_config(&Config::default());
    /// let mut res = quip.decorate(LocalResponse::new());
    /// res.render_with("missing.html", RenderOptions::new(), |res, result| {
    ///     match result {
    ///         Ok(html) => res.html_with(html),
    ///         Err(_) => res.error_with("something went wrong"),
    ///     }
    /// }).unwrap();
    ///
    /// assert_eq!(res.into_raw().status().unwrap().code, 500);
    /// ```
    pub fn render_with<O, F, T>(&mut self, view: &str, options: O, f: F) -> T
        where O: Into<RenderOptions>, F: FnOnce(&mut Self, Result<String, Error>) -> T
    {
        let result = self.views.render(view, &options.into());
        if let Err(ref e) = result {
            error_!("Failed to render '{}': {}", view, e);
        }

        f(self, result)
    }

    /// Renders `view` as a partial and returns its output.
    pub fn partial<O: Into<RenderOptions>>(&self, view: &str, options: O) -> Result<String, Error> {
        self.views.partial(view, options, None)
    }

    pub fn raw(&self) -> &R {
        &self.raw
    }

    pub fn raw_mut(&mut self) -> &mut R {
        &mut self.raw
    }

    pub fn into_raw(self) -> R {
        self.raw
    }
}
