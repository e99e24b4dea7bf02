//! Key path grammar
//!
//! A key path addresses one location in a settings document. It is written
//! either as a dot-delimited string (`"window.bounds[1].width"`) or as an
//! already split list of segments (`["window", "bounds[1]", "width"]`).
//!
//! Each segment is one of:
//!
//! - a bare key (`window`), looked up in a mapping
//! - an indexed key (`bounds[1]`), looked up in a mapping and then indexed
//!   into the sequence stored under that key
//!
//! The empty string and the empty segment list both denote the root path,
//! which addresses the whole document.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static INDEXED_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^\[\]]+)\[(\d+)\]$").expect("indexed segment pattern is valid")
});

/// One step of a [`KeyPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Plain mapping key
    Key(String),
    /// Mapping key followed by a sequence index, written `key[index]`
    Index { key: String, index: usize },
}

impl Segment {
    /// The mapping key this segment looks up
    pub fn key(&self) -> &str {
        match self {
            Segment::Key(key) | Segment::Index { key, .. } => key,
        }
    }

    /// The sequence index, if this is an indexed segment
    pub fn index(&self) -> Option<usize> {
        match self {
            Segment::Key(_) => None,
            Segment::Index { index, .. } => Some(*index),
        }
    }

    fn parse(token: &str, whole: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(invalid(whole, "empty segment"));
        }

        if !token.contains(['[', ']']) {
            return Ok(Segment::Key(token.to_string()));
        }

        let captures = INDEXED_SEGMENT.captures(token).ok_or_else(|| {
            invalid(
                whole,
                format!("segment '{token}' is neither a key nor key[index]"),
            )
        })?;

        let index = captures[2]
            .parse::<usize>()
            .map_err(|_| invalid(whole, format!("index in '{token}' is out of range")))?;

        Ok(Segment::Index {
            key: captures[1].to_string(),
            index,
        })
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index { key, index } => write!(f, "{key}[{index}]"),
        }
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> Error {
    Error::InvalidPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Parsed key path: an ordered list of [`Segment`]s, top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    /// The path with no segments, addressing the whole document
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-delimited path such as `"a.b[2].c"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if any segment is empty or has
    /// malformed brackets.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self::root());
        }

        let segments = path
            .split('.')
            .map(|token| Segment::parse(token, path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { segments })
    }

    /// Build a path from already split segments such as `["a", "b[2]", "c"]`.
    ///
    /// Segments are taken as-is: a segment containing a `.` is one key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if any segment is malformed.
    pub fn from_segments<I, T>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let tokens: Vec<T> = segments.into_iter().collect();
        let whole = tokens
            .iter()
            .map(|token| token.as_ref())
            .collect::<Vec<&str>>()
            .join(".");

        let segments = tokens
            .iter()
            .map(|token| Segment::parse(token.as_ref(), &whole))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { segments })
    }

    /// The segments of this path, top to bottom
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the leaf segment and the segments leading to it
    pub(crate) fn split_last(&self) -> Option<(&Segment, &[Segment])> {
        self.segments.split_last()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Conversion into a [`KeyPath`], accepted by every store operation.
///
/// Implemented for dot-delimited strings and for lists of segment strings,
/// so `store.get("a.b[1]")` and `store.get(["a", "b[1]"])` are equivalent.
pub trait IntoKeyPath {
    /// Parse `self` into a key path
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for malformed paths.
    fn into_key_path(self) -> Result<KeyPath>;
}

impl IntoKeyPath for KeyPath {
    fn into_key_path(self) -> Result<KeyPath> {
        Ok(self)
    }
}

impl IntoKeyPath for &KeyPath {
    fn into_key_path(self) -> Result<KeyPath> {
        Ok(self.clone())
    }
}

impl IntoKeyPath for &str {
    fn into_key_path(self) -> Result<KeyPath> {
        KeyPath::parse(self)
    }
}

impl IntoKeyPath for String {
    fn into_key_path(self) -> Result<KeyPath> {
        KeyPath::parse(&self)
    }
}

impl IntoKeyPath for &String {
    fn into_key_path(self) -> Result<KeyPath> {
        KeyPath::parse(self)
    }
}

impl<T: AsRef<str>> IntoKeyPath for &[T] {
    fn into_key_path(self) -> Result<KeyPath> {
        KeyPath::from_segments(self)
    }
}

impl<T: AsRef<str>, const N: usize> IntoKeyPath for [T; N] {
    fn into_key_path(self) -> Result<KeyPath> {
        KeyPath::from_segments(self)
    }
}

impl<T: AsRef<str>, const N: usize> IntoKeyPath for &[T; N] {
    fn into_key_path(self) -> Result<KeyPath> {
        KeyPath::from_segments(self)
    }
}

impl<T: AsRef<str>> IntoKeyPath for Vec<T> {
    fn into_key_path(self) -> Result<KeyPath> {
        KeyPath::from_segments(self)
    }
}
