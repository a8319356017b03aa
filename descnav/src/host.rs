//! The host capability: the partial primitives a navigator is built on.

use crate::{HostError, Leaf, ReferenceHandle, ValueType};

/// Host-internal identifier of a name (property key, class, unit or
/// enumeration value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyId(pub i32);

impl KeyId {
    /// The id returned when translation fails.
    pub const SENTINEL: KeyId = KeyId(-1);

    /// The raw id.
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for KeyId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a value lives inside a host node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A named property of a descriptor node.
    Key(KeyId),
    /// A position in a list node.
    Index(usize),
}

/// The shape of a nested node requested from [`Host::child`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    /// A descriptor node (named properties).
    Descriptor,
    /// A list node (ordered elements).
    List,
}

impl NodeShape {
    /// The value type a slot holds when it contains a node of this shape.
    pub const fn value_type(self) -> ValueType {
        match self {
            NodeShape::Descriptor => ValueType::Object,
            NodeShape::List => ValueType::List,
        }
    }
}

/// The scripting object model of a host application.
///
/// Every primitive is partial. Implementations report failures as
/// [`HostError`]; navigators turn them into sentinels. Only the first six
/// primitives are required, the rest default to [`HostError::Unsupported`].
pub trait Host {
    /// Opaque reference to a descriptor or list node.
    type Node: Clone + core::fmt::Debug;

    /// Translates a name into its id.
    fn id(&self, name: &str) -> Result<KeyId, HostError>;

    /// Translates an id back into its name.
    fn name(&self, id: KeyId) -> Result<String, HostError>;

    /// Whether a descriptor node has a value under `key`.
    fn exists(&self, node: &Self::Node, key: KeyId) -> Result<bool, HostError>;

    /// Reads the leaf at `slot`, which the caller expects to be of type `expected`.
    fn read(&self, node: &Self::Node, slot: Slot, expected: ValueType)
    -> Result<Leaf, HostError>;

    /// Reads the nested node at `slot`.
    fn child(&self, node: &Self::Node, slot: Slot, shape: NodeShape)
    -> Result<Self::Node, HostError>;

    /// Element count of a list node, key count of a descriptor node.
    fn len(&self, node: &Self::Node) -> Result<usize, HostError>;

    /// The type of the value stored at `slot`.
    fn value_type(&self, node: &Self::Node, slot: Slot) -> Result<ValueType, HostError> {
        let _ = (node, slot);
        Err(HostError::Unsupported("value_type"))
    }

    /// The key stored at position `index` of a descriptor node.
    fn key_at(&self, node: &Self::Node, index: usize) -> Result<KeyId, HostError> {
        let _ = (node, index);
        Err(HostError::Unsupported("key_at"))
    }

    /// The class of a descriptor node.
    fn class_of(&self, node: &Self::Node) -> Result<KeyId, HostError> {
        let _ = node;
        Err(HostError::Unsupported("class_of"))
    }

    /// Runs the lookup described by `reference` and returns the descriptor it
    /// designates. The reference is consumed by the call.
    fn resolve(&self, reference: ReferenceHandle) -> Result<Self::Node, HostError> {
        drop(reference);
        Err(HostError::Unsupported("resolve"))
    }

    /// The ordered top-level list of every object of `class`.
    fn collection(&self, class: KeyId) -> Result<Self::Node, HostError> {
        let _ = class;
        Err(HostError::Unsupported("collection"))
    }
}

impl<H: Host + ?Sized> Host for &H {
    type Node = H::Node;

    fn id(&self, name: &str) -> Result<KeyId, HostError> {
        (**self).id(name)
    }

    fn name(&self, id: KeyId) -> Result<String, HostError> {
        (**self).name(id)
    }

    fn exists(&self, node: &Self::Node, key: KeyId) -> Result<bool, HostError> {
        (**self).exists(node, key)
    }

    fn read(
        &self,
        node: &Self::Node,
        slot: Slot,
        expected: ValueType,
    ) -> Result<Leaf, HostError> {
        (**self).read(node, slot, expected)
    }

    fn child(
        &self,
        node: &Self::Node,
        slot: Slot,
        shape: NodeShape,
    ) -> Result<Self::Node, HostError> {
        (**self).child(node, slot, shape)
    }

    fn len(&self, node: &Self::Node) -> Result<usize, HostError> {
        (**self).len(node)
    }

    fn value_type(&self, node: &Self::Node, slot: Slot) -> Result<ValueType, HostError> {
        (**self).value_type(node, slot)
    }

    fn key_at(&self, node: &Self::Node, index: usize) -> Result<KeyId, HostError> {
        (**self).key_at(node, index)
    }

    fn class_of(&self, node: &Self::Node) -> Result<KeyId, HostError> {
        (**self).class_of(node)
    }

    fn resolve(&self, reference: ReferenceHandle) -> Result<Self::Node, HostError> {
        (**self).resolve(reference)
    }

    fn collection(&self, class: KeyId) -> Result<Self::Node, HostError> {
        (**self).collection(class)
    }
}
