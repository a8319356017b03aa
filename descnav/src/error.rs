//! Error types for host primitives and navigation.
//!
//! Neither type ever reaches a caller of the compatibility surface: they are
//! the tagged half of every accessor, collapsed into sentinels at the
//! navigator boundary.

use crate::{KeyId, ValueType};

/// Failure reported by a [`Host`](crate::Host) primitive.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum HostError {
    /// The name could not be translated into an id.
    MalformedName(String),

    /// The id has no registered name.
    UnknownId(KeyId),

    /// The node has no value under this key.
    NoSuchKey(KeyId),

    /// A list position past the end of the list.
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The number of elements in the list.
        len: usize,
    },

    /// The stored value is not of the requested type.
    TypeMismatch {
        /// The type the caller asked for.
        expected: ValueType,
        /// The type actually stored.
        found: ValueType,
    },

    /// The node handle no longer refers to a live host object.
    StaleNode,

    /// The host does not provide this primitive.
    Unsupported(&'static str),

    /// Any other host-side failure, carrying the host's message.
    Other(String),
}

impl core::fmt::Display for HostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HostError::MalformedName(name) => write!(f, "malformed name {name:?}"),
            HostError::UnknownId(id) => write!(f, "no name registered for {id}"),
            HostError::NoSuchKey(id) => write!(f, "no value under key {id}"),
            HostError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of {len}")
            }
            HostError::TypeMismatch { expected, found } => {
                write!(f, "expected {expected}, host holds {found}")
            }
            HostError::StaleNode => f.write_str("node handle is stale"),
            HostError::Unsupported(primitive) => {
                write!(f, "host does not support `{primitive}`")
            }
            HostError::Other(message) => write!(f, "host error: {message}"),
        }
    }
}

impl core::error::Error for HostError {}

/// Why a navigation step produced no value.
///
/// This is the tagged form of a sentinel: the `try_*` accessors return it,
/// the `get_*` accessors replace it with the sentinel of their return type.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NavError {
    /// The navigator wraps no node. No host call was made.
    Sentinel,

    /// The key was empty or blank. No host call was made.
    InvalidKey,

    /// A list index at or past the element count.
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The element count read from the host.
        count: usize,
    },

    /// The host reports that the key does not exist on this node.
    MissingKey {
        /// The key as the caller spelled it.
        key: String,
    },

    /// A host primitive failed.
    Host(HostError),

    /// The host answered with a value of the wrong type.
    Mismatch {
        /// The type the accessor reads.
        expected: ValueType,
        /// The type the host returned.
        found: ValueType,
    },

    /// A measurement was NaN or infinite.
    NotFinite {
        /// The key holding the measurement.
        key: String,
    },

    /// A caller-supplied callback reported failure.
    CallbackFailed(String),

    /// A caller-supplied transformer produced no value.
    CallbackAbsent,

    /// Exactly one match was required.
    Multiplicity {
        /// The number of matches found.
        matches: usize,
    },
}

impl core::fmt::Display for NavError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NavError::Sentinel => f.write_str("navigator is a sentinel"),
            NavError::InvalidKey => f.write_str("key is empty"),
            NavError::OutOfRange { index, count } => {
                write!(f, "index {index} out of range (count {count})")
            }
            NavError::MissingKey { key } => write!(f, "key {key:?} does not exist"),
            NavError::Host(err) => write!(f, "{err}"),
            NavError::Mismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            NavError::NotFinite { key } => write!(f, "measurement {key:?} is not finite"),
            NavError::CallbackFailed(message) => write!(f, "callback failed: {message}"),
            NavError::CallbackAbsent => f.write_str("callback produced no value"),
            NavError::Multiplicity { matches } => {
                write!(f, "expected exactly one match, found {matches}")
            }
        }
    }
}

impl core::error::Error for NavError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            NavError::Host(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HostError> for NavError {
    fn from(err: HostError) -> Self {
        NavError::Host(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_errors_surface_as_source() {
        descnav_testhelpers::setup();

        let err = NavError::from(HostError::StaleNode);
        let source = core::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("node handle is stale"));
    }

    #[test]
    fn display() {
        descnav_testhelpers::setup();

        insta::assert_snapshot!(
            NavError::OutOfRange { index: 4, count: 3 },
            @"index 4 out of range (count 3)"
        );
        insta::assert_snapshot!(
            NavError::Multiplicity { matches: 2 },
            @"expected exactly one match, found 2"
        );
        insta::assert_snapshot!(
            HostError::TypeMismatch { expected: ValueType::String, found: ValueType::Integer },
            @"expected string, host holds integer"
        );
    }
}
