#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod tracing_macros;

mod error;
pub use error::{HostError, NavError};

mod host;
pub use host::{Host, KeyId, NodeShape, Slot};

mod leaf;
pub use leaf::{Enumerated, Leaf, UnitDouble, ValueType};

pub mod sentinel;
pub use sentinel::{FromLeaf, OrSentinel, Sentinel};

mod handle;
pub use handle::{FileHandle, RefForm, RefSegment, ReferenceHandle};

mod bounds;
pub use bounds::Bounds;

mod callback;
pub use callback::{Selected, Verdict};

mod diagnostics;
#[cfg(feature = "tracing")]
pub use diagnostics::TracingDiagnostics;
pub use diagnostics::{Diagnostic, Diagnostics, Silent};

mod options;
pub use options::{Measurement, NavOptions};

mod session;
pub use session::Session;

mod descriptor;
pub use descriptor::DescriptorNav;

mod list;
pub use list::ListNav;

mod enumerable;
pub use enumerable::{Enumerable, EnumerableArray};

pub mod memory;
pub use memory::{MemoryHost, MemoryNode, MemoryObject, MemoryValue};
