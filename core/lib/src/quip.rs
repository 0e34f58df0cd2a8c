use crate::config::Config;
use crate::raw::RawResponse;
use crate::response::Response;
use crate::views::Views;

/// The response decoration middleware.
///
/// A `Quip` owns the [`Views`] every response it decorates renders with.
/// Hosts call [`Quip::handle()`] for every request, or [`Quip::decorate()`]
/// wherever they hold a response.
///
/// ```rust
/// use quip::{Quip, Config};
/// use quip::local::LocalResponse;
///
/// let quip = Quip::from_config(&Config::default());
/// let raw = quip.handle("GET /", LocalResponse::new(), |_req, mut res| {
///     res.text_with("hello").map(|_| res.into_raw())
/// }).unwrap();
///
/// assert_eq!(raw.header("Content-Type"), Some("text/plain"));
/// assert_eq!(raw.body_string(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct Quip {
    views: Views,
}

impl Quip {
    /// Returns a `Quip` rendering with `views`.
    pub fn new(views: Views) -> Quip {
        Quip { views }
    }

    /// Returns a `Quip` for the configuration `config`, without any template
    /// engines. Installs Quip's logger if no logger is installed yet.
    pub fn from_config(config: &Config) -> Quip {
        crate::logger::init(config);
        Quip::new(Views::new(config))
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    /// Decorates `raw` with a fresh [`Response`]: `200 OK`, `text/html`.
    pub fn decorate<R: RawResponse>(&self, raw: R) -> Response<R> {
        Response::new(raw, self.views.clone())
    }

    /// Decorates `raw` and passes it, with the request, to `next`.
    pub fn handle<Q, R, F, T>(&self, req: Q, raw: R, next: F) -> T
        where R: RawResponse, F: FnOnce(Q, Response<R>) -> T
    {
        next(req, self.decorate(raw))
    }
}
