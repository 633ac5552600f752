use derive_more::Display;
use serde_json::{Map, Value};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Marker for a node that does not exist in one of two trees
///
/// `Undefined` carries no data, so there is exactly one of it and it is only
/// ever equal to itself. It never compares equal to a JSON value, not even
/// `null` or the string `"Undefined"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "Undefined")]
pub struct Undefined;

impl PartialEq<Value> for Undefined {
    fn eq(&self, _other: &Value) -> bool {
        false
    }
}

impl PartialEq<Undefined> for Value {
    fn eq(&self, _other: &Undefined) -> bool {
        false
    }
}

/// One side of a pair handed out by [`pair_visit`](fn@crate::pair_visit)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'a> {
    /// The node exists in this tree
    Defined(&'a Value),

    /// The node only exists in the other tree
    Undefined,
}

impl<'a> Slot<'a> {
    /// Check if this side holds a node
    pub fn is_defined(&self) -> bool {
        matches!(self, Slot::Defined(_))
    }

    /// Check if this side is missing
    pub fn is_undefined(&self) -> bool {
        matches!(self, Slot::Undefined)
    }

    /// Get the node, if present
    pub fn value(&self) -> Option<&'a Value> {
        match *self {
            Slot::Defined(value) => Some(value),
            Slot::Undefined => None,
        }
    }

    /// Get the elements if this side is an array
    pub fn as_array(&self) -> Option<&'a [Value]> {
        match *self {
            Slot::Defined(Value::Array(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Get the members if this side is an object
    pub fn as_object(&self) -> Option<&'a Map<String, Value>> {
        match *self {
            Slot::Defined(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

impl<'a> From<&'a Value> for Slot<'a> {
    fn from(value: &'a Value) -> Self {
        Slot::Defined(value)
    }
}

impl From<Undefined> for Slot<'_> {
    fn from(_: Undefined) -> Self {
        Slot::Undefined
    }
}

impl<'a> From<Option<&'a Value>> for Slot<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(Slot::Undefined, Slot::Defined)
    }
}

impl PartialEq<Undefined> for Slot<'_> {
    fn eq(&self, _other: &Undefined) -> bool {
        self.is_undefined()
    }
}

impl PartialEq<Slot<'_>> for Undefined {
    fn eq(&self, other: &Slot<'_>) -> bool {
        other.is_undefined()
    }
}

impl fmt::Display for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Defined(value) => write!(f, "{}", value),
            Slot::Undefined => write!(f, "{}", Undefined),
        }
    }
}

/// Externally tagged: `{"Defined": value}` or `"Undefined"`
#[cfg(feature = "serde")]
impl Serialize for Slot<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Defined(value) => {
                serializer.serialize_newtype_variant("Slot", 0, "Defined", *value)
            }
            Slot::Undefined => serializer.serialize_unit_variant("Slot", 1, "Undefined"),
        }
    }
}
