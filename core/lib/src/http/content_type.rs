use std::borrow::Cow;
use std::fmt;

/// The value of a `Content-Type` header.
///
/// The media types Quip's shortcut methods set are available as associated
/// constants. Any other value can be built with [`ContentType::new()`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType(Cow<'static, str>);

macro_rules! known_media_types {
    ($($name:ident ($check:ident): $str:expr, $ext:expr),+ $(,)?) => {
        impl ContentType {
            $(
                #[doc="Media type for <b>"]
                #[doc=$str]
                #[doc="</b>."]
                #[allow(non_upper_case_globals)]
                pub const $name: ContentType = ContentType(Cow::Borrowed($str));

                #[doc="Returns `true` if the media type is <b>"]
                #[doc=$str]
                #[doc="</b>, ignoring parameters and case."]
                #[inline]
                pub fn $check(&self) -> bool {
                    self.essence().eq_ignore_ascii_case($str)
                }
            )+

            /// Returns the known media type for the file extension `ext`.
            /// Matching is case-insensitive.
            pub fn from_extension(ext: &str) -> Option<ContentType> {
                $(if $ext.split('|').any(|e| e.eq_ignore_ascii_case(ext)) {
                    return Some(ContentType::$name);
                })+

                None
            }
        }
    };
}

known_media_types! {
    Plain (is_plain): "text/plain", "txt|text",
    HTML (is_html): "text/html", "html|htm",
    XHTML (is_xhtml): "application/xhtml+xml", "xhtml",
    CSS (is_css): "text/css", "css",
    XML (is_xml): "text/xml", "xml",
    Atom (is_atom): "application/atom+xml", "atom",
    RSS (is_rss): "application/rss+xml", "rss",
    JavaScript (is_javascript): "text/javascript", "js|mjs",
    JSON (is_json): "application/json", "json",
}

impl ContentType {
    /// Creates a content type from an arbitrary header value.
    pub fn new<S: Into<Cow<'static, str>>>(value: S) -> ContentType {
        ContentType(value.into())
    }

    /// The full header value, including any parameters.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The media type without parameters: `text/html; charset=utf-8` is
    /// `text/html`.
    pub fn essence(&self) -> &str {
        self.0.split(';').next().unwrap_or("").trim()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ContentType> for String {
    fn from(ct: ContentType) -> String {
        ct.0.into_owned()
    }
}
