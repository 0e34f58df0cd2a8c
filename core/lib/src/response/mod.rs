//! The decorated response and its body.
//!
//! See [`Response`] for the shortcuts a decorated response offers.

mod body;
mod response;

pub use self::body::Body;
pub use self::response::{Response, Rendered};
