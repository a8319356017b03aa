use crate::{FileHandle, KeyId, ReferenceHandle};

/// The host's type tag for a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// `true` / `false`
    Boolean,
    /// A class id
    Class,
    /// A 64-bit float
    Double,
    /// An enumeration value of some enumeration type
    Enumerated,
    /// A 32-bit integer
    Integer,
    /// A 64-bit integer
    LargeInteger,
    /// A nested list node
    List,
    /// A nested descriptor node
    Object,
    /// Raw bytes
    Data,
    /// A reference handle
    Reference,
    /// A string
    String,
    /// A double measured in some unit
    UnitDouble,
    /// A file handle
    Alias,
    /// The type could not be determined.
    Unknown,
}

impl ValueType {
    /// Lowercase name used in messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Class => "class",
            ValueType::Double => "double",
            ValueType::Enumerated => "enumerated",
            ValueType::Integer => "integer",
            ValueType::LargeInteger => "large integer",
            ValueType::List => "list",
            ValueType::Object => "object",
            ValueType::Data => "data",
            ValueType::Reference => "reference",
            ValueType::String => "string",
            ValueType::UnitDouble => "unit double",
            ValueType::Alias => "alias",
            ValueType::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for ValueType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A double tagged with the id of its unit (pixels, points, percent...).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDouble {
    /// Unit id
    pub unit: KeyId,
    /// Measured value
    pub value: f64,
}

/// An enumeration value together with the id of its enumeration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Enumerated {
    /// Enumeration type id
    pub ty: KeyId,
    /// Enumeration value id
    pub value: KeyId,
}

/// A terminal value as the host hands it out.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// Boolean leaf
    Boolean(bool),
    /// Class leaf
    Class(KeyId),
    /// Double leaf
    Double(f64),
    /// Enumeration leaf
    Enumerated(Enumerated),
    /// Integer leaf
    Integer(i32),
    /// Large integer leaf
    LargeInteger(i64),
    /// Raw data leaf
    Data(Vec<u8>),
    /// Reference leaf
    Reference(ReferenceHandle),
    /// String leaf
    String(String),
    /// Unit double leaf
    UnitDouble(UnitDouble),
    /// File handle leaf
    Alias(FileHandle),
}

impl Leaf {
    /// The value type of this leaf.
    pub const fn value_type(&self) -> ValueType {
        match self {
            Leaf::Boolean(_) => ValueType::Boolean,
            Leaf::Class(_) => ValueType::Class,
            Leaf::Double(_) => ValueType::Double,
            Leaf::Enumerated(_) => ValueType::Enumerated,
            Leaf::Integer(_) => ValueType::Integer,
            Leaf::LargeInteger(_) => ValueType::LargeInteger,
            Leaf::Data(_) => ValueType::Data,
            Leaf::Reference(_) => ValueType::Reference,
            Leaf::String(_) => ValueType::String,
            Leaf::UnitDouble(_) => ValueType::UnitDouble,
            Leaf::Alias(_) => ValueType::Alias,
        }
    }
}
