//! Types that represent the HTTP parts of a response: its [`Status`], its
//! [`ContentType`], and its headers ([`HeaderMap`]).

mod status;
mod content_type;
mod header;

pub use self::status::{Status, StatusClass};
pub use self::content_type::ContentType;
pub use self::header::HeaderMap;
