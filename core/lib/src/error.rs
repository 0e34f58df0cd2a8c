//! Types representing the errors that can occur while shaping a response.

use std::path::PathBuf;
use std::{io, fmt};

/// A boxed error as reported by template engines and engine loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error that occurs while rendering a view or sending a response.
///
/// Rendering distinguishes between failing to read a template
/// ([`Error::Load`]), failing to find or initialize an engine for the
/// template's extension ([`Error::UnknownEngine`], [`Error::EngineInit`]), and
/// the engine itself failing on the template ([`Error::Render`]).
#[derive(Debug)]
pub enum Error {
    /// The template file at `path` could not be read.
    Load {
        /// The resolved path of the template.
        path: PathBuf,
        /// The underlying I/O error.
        error: io::Error,
    },
    /// The engine for the view's extension raised while rendering.
    Render {
        /// The view, with its extension, as it was being rendered.
        view: String,
        /// The error reported by the engine.
        error: BoxError,
    },
    /// No engine is registered for this extension.
    UnknownEngine(String),
    /// The loader for the engine of this extension failed.
    EngineInit {
        /// The extension whose engine failed to load.
        ext: String,
        /// The error reported by the loader.
        error: BoxError,
    },
    /// Writing to the underlying response failed.
    Io(io::Error),
    /// A value could not be serialized to JSON.
    Serialize(serde_json::Error),
}

impl Error {
    /// Returns `true` if this is an [`Error::Render`].
    pub fn is_render(&self) -> bool {
        matches!(self, Error::Render { .. })
    }

    /// Returns `true` if this is an [`Error::Load`].
    pub fn is_load(&self) -> bool {
        matches!(self, Error::Load { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Load { path, error } => {
                write!(f, "failed to load view '{}': {}", path.display(), error)
            }
            Error::Render { view, error } => {
                write!(f, "view '{}' failed to render: {}", view, error)
            }
            Error::UnknownEngine(ext) => {
                write!(f, "no template engine registered for extension '{}'", ext)
            }
            Error::EngineInit { ext, error } => {
                write!(f, "template engine for '{}' failed to load: {}", ext, error)
            }
            Error::Io(e) => write!(f, "failed to write response: {}", e),
            Error::Serialize(e) => write!(f, "failed to serialize value: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load { error, .. } => Some(error),
            Error::Render { error, .. } => Some(&**error),
            Error::EngineInit { error, .. } => Some(&**error),
            Error::Io(e) => Some(e),
            Error::Serialize(e) => Some(e),
            Error::UnknownEngine(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialize(e)
    }
}
