//! An in-memory response, primarily for testing.
//!
//! A [`LocalResponse`] records everything written to it. Decorate one with
//! [`Quip::decorate()`](crate::Quip::decorate) and inspect it after sending:
//!
//! ```rust
//! use quip::{Quip, Config};
//! use quip::local::LocalResponse;
//! use quip::http::Status;
//!
//! let quip = Quip::from_config(&Config::default());
//! let mut res = quip.decorate(LocalResponse::new());
//! res.not_found_with("gone fishing").unwrap();
//!
//! let raw = res.into_raw();
//! assert_eq!(raw.status(), Some(Status::NotFound));
//! assert_eq!(raw.body_string(), "gone fishing");
//! assert!(raw.is_ended());
//! ```

use std::io;
use std::borrow::Cow;

use crate::http::{HeaderMap, Status};
use crate::raw::RawResponse;

/// A [`RawResponse`] that captures its status, headers and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalResponse {
    status: Option<Status>,
    headers: HeaderMap,
    body: Vec<u8>,
    heads: usize,
    ended: bool,
}

impl LocalResponse {
    pub fn new() -> LocalResponse {
        LocalResponse::default()
    }

    /// The status written, if the head has been written.
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The value of the header `name`, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as a string, lossily converted from UTF-8.
    pub fn body_string(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// How many times the head was written.
    pub fn head_count(&self) -> usize {
        self.heads
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl RawResponse for LocalResponse {
    fn write_head(&mut self, status: Status, headers: &HeaderMap) -> io::Result<()> {
        self.heads += 1;
        self.status = Some(status);
        self.headers = headers.clone();
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(chunk);
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        self.ended = true;
        Ok(())
    }
}
