use std::fmt::{self, Display, Formatter};

/// Numeric object identifier, unique within one parsed file. Used as the
/// join key between the Objects and Connections sections. Uniqueness is
/// not enforced here; the source format is trusted.
pub type ObjectId = i64;

/// Object id of the implicit scene root. Connection records that target
/// this id attach an object directly under the scene node.
pub const ROOT_OBJECT_ID: ObjectId = 0;

/// A single typed property of an element.
///
/// Property order is fixed per element kind, so properties are addressed
/// positionally through the accessors on [`FbxElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum FbxProperty {
    I64(i64),
    F64(f64),
    String(String),
}

impl FbxProperty {
    fn kind(&self) -> PropertyKind {
        match self {
            FbxProperty::I64(_) => PropertyKind::Integer,
            FbxProperty::F64(_) => PropertyKind::Float,
            FbxProperty::String(_) => PropertyKind::String,
        }
    }

    /// Numeric value widened to f32, accepting both integer and float
    /// properties. Only for vertex stream collection, where ASCII readers
    /// produce integer properties for whole-number coordinates.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            FbxProperty::I64(value) => Some(*value as f32),
            FbxProperty::F64(value) => Some(*value as f32),
            FbxProperty::String(_) => None,
        }
    }
}

impl From<i64> for FbxProperty {
    fn from(value: i64) -> Self {
        FbxProperty::I64(value)
    }
}

impl From<f64> for FbxProperty {
    fn from(value: f64) -> Self {
        FbxProperty::F64(value)
    }
}

impl From<&str> for FbxProperty {
    fn from(value: &str) -> Self {
        FbxProperty::String(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Integer,
    Float,
    String,
}

impl Display for PropertyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Integer => write!(f, "integer"),
            PropertyKind::Float => write!(f, "float"),
            PropertyKind::String => write!(f, "string"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    Missing { index: usize },
    WrongKind { index: usize, expected: PropertyKind, actual: PropertyKind },
}

impl Display for PropertyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::Missing { index } => {
                write!(f, "Missing property at index {}", index)
            }
            PropertyError::WrongKind {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Wrong property kind at index {}: expected {}, got {}",
                    index, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for PropertyError {}

/// One node of the parsed interchange tree: a kind-identifier, an ordered
/// list of typed properties and nested child elements. Produced by an
/// external reader and consumed read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FbxElement {
    pub name: String,
    pub properties: Vec<FbxProperty>,
    pub children: Vec<FbxElement>,
}

impl FbxElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn property(&self, index: usize) -> Option<&FbxProperty> {
        self.properties.get(index)
    }

    pub fn i64_at(&self, index: usize) -> Result<i64, PropertyError> {
        match self.property(index) {
            None => Err(PropertyError::Missing { index }),
            Some(FbxProperty::I64(value)) => Ok(*value),
            Some(other) => Err(PropertyError::WrongKind {
                index,
                expected: PropertyKind::Integer,
                actual: other.kind(),
            }),
        }
    }

    pub fn f64_at(&self, index: usize) -> Result<f64, PropertyError> {
        match self.property(index) {
            None => Err(PropertyError::Missing { index }),
            Some(FbxProperty::F64(value)) => Ok(*value),
            Some(other) => Err(PropertyError::WrongKind {
                index,
                expected: PropertyKind::Float,
                actual: other.kind(),
            }),
        }
    }

    pub fn str_at(&self, index: usize) -> Result<&str, PropertyError> {
        match self.property(index) {
            None => Err(PropertyError::Missing { index }),
            Some(FbxProperty::String(value)) => Ok(value),
            Some(other) => Err(PropertyError::WrongKind {
                index,
                expected: PropertyKind::String,
                actual: other.kind(),
            }),
        }
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FbxElement> {
        self.children.iter().filter(move |child| child.name == name)
    }
}
