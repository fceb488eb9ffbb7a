//! Key paths into the configuration document.
//!
//! A path is an ordered list of string keys; each segment descends into one
//! nested mapping. The dotted form (`config.database.host`) is the transport
//! syntax the console uses. There is no array indexing — list values are
//! addressed as whole blocks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered list of keys locating a position in the document.
///
/// # Examples
///
/// ```
/// use gateway_conf::KeyPath;
///
/// let path = KeyPath::parse("server.port");
/// assert_eq!(path.segments(), ["server", "port"]);
/// assert_eq!(path.to_string(), "server.port");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Build a path from explicit segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a dot-separated path. Empty segments are dropped.
    pub fn parse(path: &str) -> Self {
        Self(
            path.split('.')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
