use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use uncased::{Uncased, UncasedStr};

/// An ordered, case-insensitive map of header names to values.
///
/// Each name holds a single value: inserting a name that is already present,
/// in any casing, replaces the previous value but keeps the original position
/// and spelling of the name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    headers: IndexMap<Uncased<'static>, String>,
}

impl HeaderMap {
    /// Returns an empty header map.
    #[inline]
    pub fn new() -> HeaderMap {
        HeaderMap::default()
    }

    /// Sets `name` to `value`, returning the previous value, if any.
    pub fn insert<N, V>(&mut self, name: N, value: V) -> Option<String>
        where N: Into<Cow<'static, str>>, V: Into<String>
    {
        self.headers.insert(Uncased::new(name), value.into())
    }

    /// Returns the value of `name`, if it is set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(UncasedStr::new(name)).map(|v| v.as_str())
    }

    /// Returns `true` if `name` is set.
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(UncasedStr::new(name))
    }

    /// Removes `name`, returning its value, if it was set.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.headers.shift_remove(UncasedStr::new(name))
    }

    /// Sets every header in `other`, replacing values of existing names.
    pub fn merge(&mut self, other: &HeaderMap) {
        for (name, value) in other.iter() {
            self.insert(name.to_string(), value);
        }
    }

    /// Iterates over all headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl<N, V> Extend<(N, V)> for HeaderMap
    where N: Into<Cow<'static, str>>, V: Into<String>
{
    fn extend<I: IntoIterator<Item = (N, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<N, V> FromIterator<(N, V)> for HeaderMap
    where N: Into<Cow<'static, str>>, V: Into<String>
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        map.extend(iter);
        map
    }
}

impl fmt::Debug for HeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
