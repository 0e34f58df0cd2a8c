use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

/// The body of a response.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body at all.
    #[default]
    Empty,
    /// A text body.
    Text(String),
    /// A binary body.
    Bytes(Vec<u8>),
    /// A structured body, sent as JSON text.
    Json(Value),
}

impl Body {
    /// Serializes `value` into a [`Body::Json`].
    pub fn json<T: Serialize>(value: T) -> Result<Body, Error> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }

    /// Returns `true` if sending this body writes nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Empty => true,
            Body::Text(s) => s.is_empty(),
            Body::Bytes(b) => b.is_empty(),
            Body::Json(_) => false,
        }
    }

    /// The bytes that are written when this body is sent.
    pub fn to_bytes(&self) -> Result<Cow<'_, [u8]>, Error> {
        let bytes = match self {
            Body::Empty => Cow::Borrowed(&[][..]),
            Body::Text(s) => Cow::Borrowed(s.as_bytes()),
            Body::Bytes(b) => Cow::Borrowed(&b[..]),
            Body::Json(value) => Cow::Owned(serde_json::to_vec(value)?),
        };

        Ok(bytes)
    }
}

impl From<()> for Body {
    fn from(_: ()) -> Self {
        Body::Empty
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Text(s.to_string())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Text(s)
    }
}

impl From<&[u8]> for Body {
    fn from(b: &[u8]) -> Self {
        Body::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Body {
    fn from(b: Vec<u8>) -> Self {
        Body::Bytes(b)
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl<T: Into<Body>> From<Option<T>> for Body {
    fn from(body: Option<T>) -> Self {
        body.map_or(Body::Empty, Into::into)
    }
}
