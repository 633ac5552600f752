use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use archery::ArcK;
use rpds::Vector;
use serde_json::Value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Location of a node inside a JSON tree, as a list of segments from the root
///
/// Object members contribute their key, array elements the decimal form of
/// their index. The root has the empty path.
///
/// Extending a path never mutates it: [`Path::child`] returns a new path that
/// shares its prefix with the original, so paths handed out during traversal
/// can be cloned and stored cheaply.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vector<String, ArcK>,
}

impl Path {
    /// Create an empty path
    pub fn new() -> Self {
        Self {
            segments: Vector::new_with_ptr_kind(),
        }
    }

    /// The path of a document root
    pub fn root() -> Self {
        Self::new()
    }

    /// Return a new path extended by one segment
    pub fn child(&self, segment: impl Into<String>) -> Self {
        Self {
            segments: self.segments.push_back(segment.into()),
        }
    }

    /// Return a new path extended by an array index
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if this is the root path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the segments from the root downwards
    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().map(String::as_str)
    }

    /// Get the last segment, if any
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Check whether `prefix` is a segment-wise prefix of this path
    pub fn starts_with(&self, prefix: &Path) -> bool {
        prefix.len() <= self.len()
            && prefix
                .segments()
                .zip(self.segments())
                .all(|(p, s)| p == s)
    }

    /// Copy the segments into an owned vector
    pub fn to_vec(&self) -> Vec<String> {
        self.segments.iter().cloned().collect()
    }

    /// Render as an RFC 6901 JSON Pointer, e.g. `/b/2/x~1y`
    ///
    /// The result can be passed to [`Value::pointer`].
    pub fn to_pointer(&self) -> String {
        let mut pointer = String::new();
        for segment in self.segments() {
            pointer.push('/');
            pointer.push_str(&segment.replace('~', "~0").replace('/', "~1"));
        }
        pointer
    }

    /// Look up the node this path points at, starting from `root`
    ///
    /// Array segments must be the canonical decimal form of an index, the way
    /// traversal produces them. Returns `None` if any segment does not exist.
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments().try_fold(root, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                // reject "01", "+1" and friends
                if index.to_string() != segment {
                    return None;
                }
                items.get(index)
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        })
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.segments()).finish()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = anyhow::Error;

    /// Parse an RFC 6901 JSON Pointer
    fn from_str(pointer: &str) -> Result<Self> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            bail!("JSON pointer must start with '/': {:?}", pointer);
        };

        let mut path = Self::root();
        for raw in rest.split('/') {
            path = path.child(unescape_segment(raw, pointer)?);
        }
        Ok(path)
    }
}

fn unescape_segment(raw: &str, pointer: &str) -> Result<String> {
    let mut segment = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            segment.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => segment.push('~'),
            Some('1') => segment.push('/'),
            other => bail!(
                "invalid escape '~{}' in JSON pointer {:?}",
                other.map(String::from).unwrap_or_default(),
                pointer
            ),
        }
    }
    Ok(segment)
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::root(), |path, segment| path.child(segment))
    }
}

impl<S: Into<String>> From<Vec<S>> for Path {
    fn from(segments: Vec<S>) -> Self {
        segments.into_iter().collect()
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        segments.iter().copied().collect()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.segments())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let segments = Vec::<String>::deserialize(deserializer)?;
        Ok(segments.into())
    }
}
