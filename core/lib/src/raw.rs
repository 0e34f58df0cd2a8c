//! The host's side of a response.
//!
//! Quip does not speak HTTP itself. A host server hands Quip its response
//! object as a [`RawResponse`], which Quip drives when a decorated
//! [`Response`](crate::Response) is sent: [`write_head()`] exactly once, then
//! [`write()`] with the body, if there is one, then [`end()`].
//!
//! [`write_head()`]: RawResponse::write_head
//! [`write()`]: RawResponse::write
//! [`end()`]: RawResponse::end

use std::io;

use crate::http::{HeaderMap, Status};

/// A host response that Quip writes to.
pub trait RawResponse {
    /// Writes the status line and headers.
    fn write_head(&mut self, status: Status, headers: &HeaderMap) -> io::Result<()>;

    /// Writes a chunk of the body.
    fn write(&mut self, chunk: &[u8]) -> io::Result<()>;

    /// Finishes the response.
    fn end(&mut self) -> io::Result<()>;
}

impl<R: RawResponse + ?Sized> RawResponse for &mut R {
    fn write_head(&mut self, status: Status, headers: &HeaderMap) -> io::Result<()> {
        (**self).write_head(status, headers)
    }

    fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).write(chunk)
    }

    fn end(&mut self) -> io::Result<()> {
        (**self).end()
    }
}

impl<R: RawResponse + ?Sized> RawResponse for Box<R> {
    fn write_head(&mut self, status: Status, headers: &HeaderMap) -> io::Result<()> {
        (**self).write_head(status, headers)
    }

    fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).write(chunk)
    }

    fn end(&mut self) -> io::Result<()> {
        (**self).end()
    }
}

/// Writes responses as HTTP/1.1 to any [`io::Write`], such as a
/// `TcpStream`.
///
/// The body is buffered until [`end()`](RawResponse::end) so that a
/// `Content-Length` header can be sent.
///
/// ```rust
/// use quip::raw::{Http1Writer, RawResponse};
/// use quip::http::{HeaderMap, Status};
///
/// let mut writer = Http1Writer::new(Vec::new());
/// let mut headers = HeaderMap::new();
/// headers.insert("Content-Type", "text/plain");
///
/// writer.write_head(Status::Ok, &headers).unwrap();
/// writer.write(b"hi").unwrap();
/// writer.end().unwrap();
///
/// let wire = String::from_utf8(writer.into_inner()).unwrap();
/// assert!(wire.starts_with("HTTP/1.1 200 OK\r\n"));
/// assert!(wire.ends_with("Content-Length: 2\r\n\r\nhi"));
/// ```
#[derive(Debug)]
pub struct Http1Writer<W: io::Write> {
    inner: W,
    head: Option<(Status, HeaderMap)>,
    body: Vec<u8>,
}

impl<W: io::Write> Http1Writer<W> {
    pub fn new(inner: W) -> Self {
        Http1Writer { inner, head: None, body: Vec::new() }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Fails with `InvalidInput` if `name` or `value` can't be sent as a header,
/// such as a value containing a line break.
fn validate(name: &str, value: &str) -> io::Result<()> {
    let invalid = |e| io::Error::new(io::ErrorKind::InvalidInput, e);
    ::http::HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| invalid(format!("invalid header name '{}': {}", name.escape_debug(), e)))?;

    ::http::HeaderValue::from_str(value)
        .map_err(|e| invalid(format!("invalid value for header '{}': {}", name, e)))?;

    Ok(())
}

impl<W: io::Write> RawResponse for Http1Writer<W> {
    /// Fails without writing anything if any header is invalid.
    fn write_head(&mut self, status: Status, headers: &HeaderMap) -> io::Result<()> {
        for (name, value) in headers.iter() {
            validate(name, value)?;
        }

        self.head = Some((status, headers.clone()));
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(chunk);
        Ok(())
    }

    fn end(&mut self) -> io::Result<()> {
        let (status, headers) = self.head.take().unwrap_or_default();
        write!(self.inner, "HTTP/1.1 {}\r\n", status)?;
        for (name, value) in headers.iter() {
            if !name.eq_ignore_ascii_case("Content-Length") {
                write!(self.inner, "{}: {}\r\n", name, value)?;
            }
        }

        write!(self.inner, "Content-Length: {}\r\n\r\n", self.body.len())?;
        self.inner.write_all(&self.body)?;
        self.body.clear();
        self.inner.flush()
    }
}
