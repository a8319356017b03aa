//! The sentinel registry: one safe failure value per leaf type.
//!
//! | Leaf | Rust type | Sentinel |
//! |------|-----------|----------|
//! | string | `String` | `""` |
//! | enumeration name | `String` | `""` (shared with string) |
//! | integer | `i32` | `-1` |
//! | large integer | `i64` | `-1` |
//! | double, unit double value | `f64` | `-1.0` |
//! | boolean | `bool` | `false` |
//! | id (class, unit, enumeration) | [`KeyId`] | `KeyId(-1)` |
//! | raw data | `Vec<u8>` | empty |
//! | value type | [`ValueType`] | [`ValueType::Unknown`] |
//! | file handle | [`FileHandle`] | [`FileHandle::sentinel`] |
//! | reference | [`ReferenceHandle`] | [`ReferenceHandle::sentinel`] |
//!
//! These values are also valid payloads (`-1` is a perfectly good integer),
//! which is why every accessor has a tagged `try_*` form returning
//! [`NavError`]. The magic values only appear through [`OrSentinel`].

use crate::tracing_macros::trace;
use crate::{Enumerated, FileHandle, KeyId, Leaf, NavError, ReferenceHandle, UnitDouble, ValueType};

/// Sentinel for string leaves.
pub const STRING_SENTINEL: &str = "";

/// Sentinel for enumeration names.
///
/// Enumeration failures share the string sentinel; the constant exists so
/// call sites can say which of the two they are testing for.
pub const ENUMERATION_SENTINEL: &str = STRING_SENTINEL;

/// Sentinel for integer, large integer, double and unit double leaves.
pub const NUMBER_SENTINEL: i32 = -1;

/// Sentinel for boolean leaves.
pub const BOOLEAN_SENTINEL: bool = false;

/// A type with a fixed "no value" marker.
pub trait Sentinel: Sized {
    /// The marker. Must not allocate.
    fn sentinel() -> Self;

    /// Whether `self` equals the marker.
    fn is_sentinel(&self) -> bool;
}

impl Sentinel for String {
    fn sentinel() -> Self {
        String::new()
    }

    fn is_sentinel(&self) -> bool {
        self.is_empty()
    }
}

impl Sentinel for i32 {
    fn sentinel() -> Self {
        NUMBER_SENTINEL
    }

    fn is_sentinel(&self) -> bool {
        *self == NUMBER_SENTINEL
    }
}

impl Sentinel for i64 {
    fn sentinel() -> Self {
        i64::from(NUMBER_SENTINEL)
    }

    fn is_sentinel(&self) -> bool {
        *self == i64::from(NUMBER_SENTINEL)
    }
}

impl Sentinel for f64 {
    fn sentinel() -> Self {
        f64::from(NUMBER_SENTINEL)
    }

    fn is_sentinel(&self) -> bool {
        *self == f64::from(NUMBER_SENTINEL)
    }
}

impl Sentinel for bool {
    fn sentinel() -> Self {
        BOOLEAN_SENTINEL
    }

    fn is_sentinel(&self) -> bool {
        !*self
    }
}

impl Sentinel for KeyId {
    fn sentinel() -> Self {
        KeyId::SENTINEL
    }

    fn is_sentinel(&self) -> bool {
        *self == KeyId::SENTINEL
    }
}

impl Sentinel for UnitDouble {
    fn sentinel() -> Self {
        UnitDouble {
            unit: KeyId::SENTINEL,
            value: f64::sentinel(),
        }
    }

    fn is_sentinel(&self) -> bool {
        self.unit.is_sentinel() && self.value.is_sentinel()
    }
}

impl Sentinel for Enumerated {
    fn sentinel() -> Self {
        Enumerated {
            ty: KeyId::SENTINEL,
            value: KeyId::SENTINEL,
        }
    }

    fn is_sentinel(&self) -> bool {
        self.ty.is_sentinel() && self.value.is_sentinel()
    }
}

impl Sentinel for Vec<u8> {
    fn sentinel() -> Self {
        Vec::new()
    }

    fn is_sentinel(&self) -> bool {
        self.is_empty()
    }
}

impl Sentinel for ValueType {
    fn sentinel() -> Self {
        ValueType::Unknown
    }

    fn is_sentinel(&self) -> bool {
        *self == ValueType::Unknown
    }
}

impl Sentinel for FileHandle {
    fn sentinel() -> Self {
        FileHandle::sentinel().clone()
    }

    fn is_sentinel(&self) -> bool {
        FileHandle::is_sentinel(self)
    }
}

impl Sentinel for ReferenceHandle {
    fn sentinel() -> Self {
        ReferenceHandle::sentinel().clone()
    }

    fn is_sentinel(&self) -> bool {
        ReferenceHandle::is_sentinel(self)
    }
}

/// A Rust type a [`Leaf`] of one [`ValueType`] converts into.
pub trait FromLeaf: Sentinel {
    /// The value type the host is asked for.
    const VALUE_TYPE: ValueType;

    /// Unwraps the leaf, or hands it back if it holds another type.
    fn from_leaf(leaf: Leaf) -> Result<Self, Leaf>;
}

macro_rules! from_leaf {
    ($ty:ty, $variant:ident) => {
        impl FromLeaf for $ty {
            const VALUE_TYPE: ValueType = ValueType::$variant;

            fn from_leaf(leaf: Leaf) -> Result<Self, Leaf> {
                match leaf {
                    Leaf::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

from_leaf!(String, String);
from_leaf!(i32, Integer);
from_leaf!(i64, LargeInteger);
from_leaf!(f64, Double);
from_leaf!(bool, Boolean);
from_leaf!(KeyId, Class);
from_leaf!(UnitDouble, UnitDouble);
from_leaf!(Enumerated, Enumerated);
from_leaf!(Vec<u8>, Data);
from_leaf!(FileHandle, Alias);
from_leaf!(ReferenceHandle, Reference);

/// Checks the kind of a leaf returned by the host.
pub(crate) fn convert<T: FromLeaf>(leaf: Leaf) -> Result<T, NavError> {
    T::from_leaf(leaf).map_err(|other| NavError::Mismatch {
        expected: T::VALUE_TYPE,
        found: other.value_type(),
    })
}

/// Collapses a tagged navigation result into the sentinel of its type.
pub trait OrSentinel<T> {
    /// The value, or the sentinel of `T` on any failure.
    fn or_sentinel(self) -> T;
}

impl<T: Sentinel> OrSentinel<T> for Result<T, NavError> {
    fn or_sentinel(self) -> T {
        match self {
            Ok(value) => value,
            Err(_err) => {
                trace!(error = %_err, "falling back to sentinel");
                T::sentinel()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_sentinels() {
        descnav_testhelpers::setup();

        assert_eq!(String::sentinel(), "");
        assert_eq!(ENUMERATION_SENTINEL, STRING_SENTINEL);
        assert_eq!(i32::sentinel(), -1);
        assert_eq!(i64::sentinel(), -1);
        assert_eq!(f64::sentinel(), -1.0);
        assert!(!bool::sentinel());
        assert_eq!(KeyId::sentinel(), KeyId(-1));
        assert!(UnitDouble::sentinel().is_sentinel());
        assert!(ValueType::sentinel().is_sentinel());
    }

    #[test]
    fn convert_reports_found_type() {
        descnav_testhelpers::setup();

        let err = convert::<String>(Leaf::Integer(3)).unwrap_err();
        assert_eq!(
            err,
            NavError::Mismatch {
                expected: ValueType::String,
                found: ValueType::Integer
            }
        );
        assert_eq!(convert::<i32>(Leaf::Integer(3)), Ok(3));
    }

    #[test]
    fn or_sentinel_collapses_errors() {
        descnav_testhelpers::setup();

        let failed: Result<f64, NavError> = Err(NavError::Sentinel);
        assert_eq!(failed.or_sentinel(), -1.0);
        let ok: Result<f64, NavError> = Ok(2.5);
        assert_eq!(ok.or_sentinel(), 2.5);
    }
}
