//! An in-memory [`Host`].
//!
//! `MemoryHost` stores descriptor and list nodes in an arena and interns
//! names on demand. It implements every host primitive, including
//! [`Host::resolve`] for the reference forms hosts commonly support, so it
//! doubles as a fixture for tests and as a reference for host bindings.
//!
//! ```
//! use descnav::{MemoryHost, MemoryObject, MemoryValue, Session};
//!
//! let mut host = MemoryHost::new();
//! let layer = host.insert_object(
//!     MemoryObject::new("layer")
//!         .with("name", "Background")
//!         .with("opacity", MemoryValue::unit("percentUnit", 100.0)),
//! );
//!
//! let session = Session::new(host);
//! let nav = session.root(layer);
//! assert_eq!(nav.get_string("name"), "Background");
//! assert_eq!(nav.get_unit_double("opacity"), 100.0);
//! assert_eq!(nav.get_string("missing"), "");
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use indexmap::{IndexMap, IndexSet};

use crate::{
    Enumerated, FileHandle, Host, HostError, KeyId, Leaf, NodeShape, RefForm, ReferenceHandle,
    Slot, UnitDouble, ValueType,
};

/// Handle to a node stored in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryNode(usize);

/// A value to store in a [`MemoryHost`]. Names are plain strings here and
/// become ids on insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryValue {
    /// Boolean leaf
    Boolean(bool),
    /// Integer leaf
    Integer(i32),
    /// Large integer leaf
    LargeInteger(i64),
    /// Double leaf
    Double(f64),
    /// String leaf
    String(String),
    /// Unit double leaf
    UnitDouble {
        /// Unit name, e.g. `"pixelsUnit"`
        unit: String,
        /// Measured value
        value: f64,
    },
    /// Enumeration leaf
    Enumerated {
        /// Enumeration type name
        ty: String,
        /// Enumeration value name
        value: String,
    },
    /// Class leaf
    Class(String),
    /// Raw data leaf
    Data(Vec<u8>),
    /// File handle leaf
    Alias(PathBuf),
    /// Reference leaf
    Reference(ReferenceHandle),
    /// Nested descriptor
    Object(MemoryObject),
    /// Nested list
    List(Vec<MemoryValue>),
}

impl MemoryValue {
    /// A unit double.
    pub fn unit(unit: impl Into<String>, value: f64) -> Self {
        MemoryValue::UnitDouble {
            unit: unit.into(),
            value,
        }
    }

    /// An enumeration value.
    pub fn enumerated(ty: impl Into<String>, value: impl Into<String>) -> Self {
        MemoryValue::Enumerated {
            ty: ty.into(),
            value: value.into(),
        }
    }

    /// A class.
    pub fn class(name: impl Into<String>) -> Self {
        MemoryValue::Class(name.into())
    }

    /// A file handle.
    pub fn alias(path: impl Into<PathBuf>) -> Self {
        MemoryValue::Alias(path.into())
    }

    /// A list of values.
    pub fn list<V: Into<MemoryValue>>(items: impl IntoIterator<Item = V>) -> Self {
        MemoryValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for MemoryValue {
    fn from(v: bool) -> Self {
        MemoryValue::Boolean(v)
    }
}

impl From<i32> for MemoryValue {
    fn from(v: i32) -> Self {
        MemoryValue::Integer(v)
    }
}

impl From<i64> for MemoryValue {
    fn from(v: i64) -> Self {
        MemoryValue::LargeInteger(v)
    }
}

impl From<f64> for MemoryValue {
    fn from(v: f64) -> Self {
        MemoryValue::Double(v)
    }
}

impl From<&str> for MemoryValue {
    fn from(v: &str) -> Self {
        MemoryValue::String(v.to_owned())
    }
}

impl From<String> for MemoryValue {
    fn from(v: String) -> Self {
        MemoryValue::String(v)
    }
}

impl From<ReferenceHandle> for MemoryValue {
    fn from(v: ReferenceHandle) -> Self {
        MemoryValue::Reference(v)
    }
}

impl From<MemoryObject> for MemoryValue {
    fn from(v: MemoryObject) -> Self {
        MemoryValue::Object(v)
    }
}

impl From<Vec<MemoryValue>> for MemoryValue {
    fn from(v: Vec<MemoryValue>) -> Self {
        MemoryValue::List(v)
    }
}

/// A descriptor to store in a [`MemoryHost`]: a class and ordered entries.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryObject {
    class: String,
    entries: IndexMap<String, MemoryValue>,
}

impl MemoryObject {
    /// An empty descriptor of `class`.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            entries: IndexMap::new(),
        }
    }

    /// Adds an entry, replacing any previous value under `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MemoryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds an entry, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MemoryValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// The class name.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The value under `key`.
    pub fn get(&self, key: &str) -> Option<&MemoryValue> {
        self.entries.get(key)
    }
}

#[derive(Debug)]
enum Stored {
    Leaf(Leaf),
    Node(MemoryNode),
}

#[derive(Debug)]
enum NodeData {
    Descriptor {
        class: KeyId,
        entries: IndexMap<KeyId, Stored>,
    },
    List(Vec<Stored>),
}

impl NodeData {
    const fn value_type(&self) -> ValueType {
        match self {
            NodeData::Descriptor { .. } => ValueType::Object,
            NodeData::List(_) => ValueType::List,
        }
    }
}

/// A host whose object model lives in memory.
#[derive(Debug, Default)]
pub struct MemoryHost {
    names: RefCell<IndexSet<String>>,
    nodes: Vec<NodeData>,
    stale: RefCell<HashSet<MemoryNode>>,
    targets: HashMap<KeyId, MemoryNode>,
    collections: HashMap<KeyId, MemoryNode>,
}

fn is_malformed(name: &str) -> bool {
    name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control())
}

impl MemoryHost {
    /// An empty host.
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&self, name: &str) -> KeyId {
        let (index, _) = self.names.borrow_mut().insert_full(name.to_owned());
        KeyId(i32::try_from(index + 1).unwrap_or(i32::MAX))
    }

    fn lookup(&self, name: &str) -> Option<KeyId> {
        let index = self.names.borrow().get_index_of(name)?;
        i32::try_from(index + 1).ok().map(KeyId)
    }

    fn push(&mut self, data: NodeData) -> MemoryNode {
        self.nodes.push(data);
        MemoryNode(self.nodes.len() - 1)
    }

    fn store(&mut self, value: MemoryValue) -> Stored {
        let leaf = match value {
            MemoryValue::Object(object) => return Stored::Node(self.insert_object(object)),
            MemoryValue::List(items) => return Stored::Node(self.insert_list(items)),
            MemoryValue::Boolean(v) => Leaf::Boolean(v),
            MemoryValue::Integer(v) => Leaf::Integer(v),
            MemoryValue::LargeInteger(v) => Leaf::LargeInteger(v),
            MemoryValue::Double(v) => Leaf::Double(v),
            MemoryValue::String(v) => Leaf::String(v),
            MemoryValue::UnitDouble { unit, value } => Leaf::UnitDouble(UnitDouble {
                unit: self.intern(&unit),
                value,
            }),
            MemoryValue::Enumerated { ty, value } => Leaf::Enumerated(Enumerated {
                ty: self.intern(&ty),
                value: self.intern(&value),
            }),
            MemoryValue::Class(name) => Leaf::Class(self.intern(&name)),
            MemoryValue::Data(v) => Leaf::Data(v),
            MemoryValue::Alias(path) => Leaf::Alias(FileHandle::new(path)),
            MemoryValue::Reference(v) => Leaf::Reference(v),
        };
        Stored::Leaf(leaf)
    }

    /// Stores a descriptor and everything nested in it.
    pub fn insert_object(&mut self, object: MemoryObject) -> MemoryNode {
        let class = self.intern(&object.class);
        let mut entries = IndexMap::with_capacity(object.entries.len());
        for (key, value) in object.entries {
            let key = self.intern(&key);
            let stored = self.store(value);
            entries.insert(key, stored);
        }
        self.push(NodeData::Descriptor { class, entries })
    }

    /// Stores a list and everything nested in it.
    pub fn insert_list(&mut self, items: Vec<MemoryValue>) -> MemoryNode {
        let items = items.into_iter().map(|item| self.store(item)).collect();
        self.push(NodeData::List(items))
    }

    /// Stores a descriptor or a list. Leaves have no node of their own.
    pub fn insert(&mut self, value: MemoryValue) -> Result<MemoryNode, HostError> {
        match value {
            MemoryValue::Object(object) => Ok(self.insert_object(object)),
            MemoryValue::List(items) => Ok(self.insert_list(items)),
            other => Err(HostError::Other(format!(
                "cannot insert a leaf as a node: {other:?}"
            ))),
        }
    }

    /// Makes `node` the current target of `class`.
    pub fn set_target(&mut self, class: &str, node: MemoryNode) {
        let class = self.intern(class);
        self.targets.insert(class, node);
    }

    /// Makes the list `list` the top-level collection of `class`.
    pub fn set_collection(&mut self, class: &str, list: MemoryNode) {
        let class = self.intern(class);
        self.collections.insert(class, list);
    }

    /// Marks `node` stale: every later primitive on it fails.
    pub fn invalidate(&self, node: MemoryNode) {
        self.stale.borrow_mut().insert(node);
    }

    fn data(&self, node: &MemoryNode) -> Result<&NodeData, HostError> {
        if self.stale.borrow().contains(node) {
            return Err(HostError::StaleNode);
        }
        self.nodes.get(node.0).ok_or(HostError::StaleNode)
    }

    fn stored(&self, node: &MemoryNode, slot: Slot) -> Result<&Stored, HostError> {
        match (self.data(node)?, slot) {
            (NodeData::Descriptor { entries, .. }, Slot::Key(key)) => {
                entries.get(&key).ok_or(HostError::NoSuchKey(key))
            }
            (NodeData::List(items), Slot::Index(index)) => {
                items.get(index).ok_or(HostError::IndexOutOfRange {
                    index,
                    len: items.len(),
                })
            }
            (data, Slot::Key(_)) => Err(HostError::TypeMismatch {
                expected: ValueType::Object,
                found: data.value_type(),
            }),
            (data, Slot::Index(_)) => Err(HostError::TypeMismatch {
                expected: ValueType::List,
                found: data.value_type(),
            }),
        }
    }

    fn stored_type(&self, stored: &Stored) -> Result<ValueType, HostError> {
        match stored {
            Stored::Leaf(leaf) => Ok(leaf.value_type()),
            Stored::Node(node) => Ok(self.data(node)?.value_type()),
        }
    }

    fn collection_item(
        &self,
        class: KeyId,
        mut matches: impl FnMut(usize, &MemoryNode) -> bool,
    ) -> Result<MemoryNode, HostError> {
        let list = self.collection(class)?;
        let NodeData::List(items) = self.data(&list)? else {
            return Err(HostError::TypeMismatch {
                expected: ValueType::List,
                found: ValueType::Object,
            });
        };
        items
            .iter()
            .enumerate()
            .find_map(|(index, stored)| match stored {
                Stored::Node(node) if matches(index, node) => Some(*node),
                _ => None,
            })
            .ok_or(HostError::NoSuchKey(class))
    }

    fn leaf_under(&self, node: &MemoryNode, key: &str) -> Option<&Leaf> {
        let key = self.lookup(key)?;
        match self.stored(node, Slot::Key(key)).ok()? {
            Stored::Leaf(leaf) => Some(leaf),
            Stored::Node(_) => None,
        }
    }
}

impl Host for MemoryHost {
    type Node = MemoryNode;

    /// Interns `name` on first use, like application hosts do: asking about
    /// a key no node stores still yields an id, and the name table only
    /// grows. Existence is answered by [`Host::exists`].
    fn id(&self, name: &str) -> Result<KeyId, HostError> {
        if is_malformed(name) {
            return Err(HostError::MalformedName(name.to_owned()));
        }
        Ok(self.intern(name))
    }

    fn name(&self, id: KeyId) -> Result<String, HostError> {
        let index = id
            .get()
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .ok_or(HostError::UnknownId(id))?;
        self.names
            .borrow()
            .get_index(index)
            .cloned()
            .ok_or(HostError::UnknownId(id))
    }

    fn exists(&self, node: &MemoryNode, key: KeyId) -> Result<bool, HostError> {
        match self.data(node)? {
            NodeData::Descriptor { entries, .. } => Ok(entries.contains_key(&key)),
            NodeData::List(_) => Err(HostError::TypeMismatch {
                expected: ValueType::Object,
                found: ValueType::List,
            }),
        }
    }

    fn read(&self, node: &MemoryNode, slot: Slot, expected: ValueType) -> Result<Leaf, HostError> {
        match self.stored(node, slot)? {
            Stored::Leaf(leaf) if leaf.value_type() == expected => Ok(leaf.clone()),
            stored => Err(HostError::TypeMismatch {
                expected,
                found: self.stored_type(stored)?,
            }),
        }
    }

    fn child(&self, node: &MemoryNode, slot: Slot, shape: NodeShape) -> Result<MemoryNode, HostError> {
        let stored = self.stored(node, slot)?;
        let found = self.stored_type(stored)?;
        match stored {
            Stored::Node(child) if found == shape.value_type() => Ok(*child),
            _ => Err(HostError::TypeMismatch {
                expected: shape.value_type(),
                found,
            }),
        }
    }

    fn len(&self, node: &MemoryNode) -> Result<usize, HostError> {
        match self.data(node)? {
            NodeData::Descriptor { entries, .. } => Ok(entries.len()),
            NodeData::List(items) => Ok(items.len()),
        }
    }

    fn value_type(&self, node: &MemoryNode, slot: Slot) -> Result<ValueType, HostError> {
        self.stored_type(self.stored(node, slot)?)
    }

    fn key_at(&self, node: &MemoryNode, index: usize) -> Result<KeyId, HostError> {
        match self.data(node)? {
            NodeData::Descriptor { entries, .. } => entries
                .get_index(index)
                .map(|(key, _)| *key)
                .ok_or(HostError::IndexOutOfRange {
                    index,
                    len: entries.len(),
                }),
            NodeData::List(_) => Err(HostError::TypeMismatch {
                expected: ValueType::Object,
                found: ValueType::List,
            }),
        }
    }

    fn class_of(&self, node: &MemoryNode) -> Result<KeyId, HostError> {
        match self.data(node)? {
            NodeData::Descriptor { class, .. } => Ok(*class),
            NodeData::List(_) => Err(HostError::TypeMismatch {
                expected: ValueType::Object,
                found: ValueType::List,
            }),
        }
    }

    /// Supports the current-target enumeration (`ordinal` / `targetEnum`),
    /// 1-based positions, names and `ID` identifiers within the collection of
    /// the desired class.
    fn resolve(&self, reference: ReferenceHandle) -> Result<MemoryNode, HostError> {
        let segment = reference
            .segments()
            .first()
            .ok_or_else(|| HostError::Other("empty reference".into()))?;
        let class = segment.class;
        match &segment.form {
            RefForm::Enumerated { ty, value }
                if Some(*ty) == self.lookup("ordinal")
                    && Some(*value) == self.lookup("targetEnum") =>
            {
                self.targets
                    .get(&class)
                    .copied()
                    .ok_or(HostError::NoSuchKey(class))
            }
            RefForm::Index(position) => {
                let wanted = (*position as usize).checked_sub(1);
                self.collection_item(class, |index, _| Some(index) == wanted)
            }
            RefForm::Name(name) => self.collection_item(class, |_, node| {
                matches!(self.leaf_under(node, "name"), Some(Leaf::String(s)) if s == name)
            }),
            RefForm::Identifier(id) => self.collection_item(class, |_, node| {
                matches!(self.leaf_under(node, "ID"), Some(Leaf::Integer(v)) if i64::from(*v) == i64::from(*id))
            }),
            _ => Err(HostError::Unsupported("resolve")),
        }
    }

    fn collection(&self, class: KeyId) -> Result<MemoryNode, HostError> {
        self.collections
            .get(&class)
            .copied()
            .ok_or(HostError::NoSuchKey(class))
    }
}

#[cfg(feature = "json")]
impl MemoryValue {
    /// Converts JSON written in the host's descriptor convention.
    ///
    /// - `{"_obj": "layer", ...}` is a descriptor of class `layer` (class
    ///   `object` when `_obj` is absent),
    /// - `{"_unit": "pixelsUnit", "_value": 12}` is a unit double,
    /// - `{"_enum": "blendMode", "_value": "normal"}` is an enumeration,
    /// - `{"_class": "layer"}` is a class, `{"_path": "/a/b.psd"}` a file,
    /// - integers become integers when they fit in 32 bits, large integers
    ///   otherwise.
    ///
    /// `null` entries inside objects are skipped; a `null` anywhere else is
    /// an error.
    pub fn from_json(value: serde_json::Value) -> Result<MemoryValue, HostError> {
        use serde_json::Value;

        match value {
            Value::Null => Err(HostError::Other("null has no descriptor form".into())),
            Value::Bool(b) => Ok(MemoryValue::Boolean(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i32::try_from(i).map_or(MemoryValue::LargeInteger(i), MemoryValue::Integer))
                } else {
                    n.as_f64()
                        .map(MemoryValue::Double)
                        .ok_or_else(|| HostError::Other(format!("number out of range: {n}")))
                }
            }
            Value::String(s) => Ok(MemoryValue::String(s)),
            Value::Array(items) => items
                .into_iter()
                .map(MemoryValue::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(MemoryValue::List),
            Value::Object(mut map) => {
                let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_owned);
                if let Some(unit) = text(map.get("_unit")) {
                    let value = map
                        .get("_value")
                        .and_then(Value::as_f64)
                        .ok_or_else(|| HostError::Other(format!("unit {unit} has no value")))?;
                    return Ok(MemoryValue::UnitDouble { unit, value });
                }
                if let Some(ty) = text(map.get("_enum")) {
                    let value = text(map.get("_value"))
                        .ok_or_else(|| HostError::Other(format!("enum {ty} has no value")))?;
                    return Ok(MemoryValue::Enumerated { ty, value });
                }
                if let Some(path) = text(map.get("_path")) {
                    return Ok(MemoryValue::alias(path));
                }
                if map.len() == 1 {
                    if let Some(class) = text(map.get("_class")) {
                        return Ok(MemoryValue::Class(class));
                    }
                }
                let class = text(map.get("_obj")).unwrap_or_else(|| "object".to_owned());
                map.remove("_obj");
                let mut object = MemoryObject::new(class);
                for (key, value) in map {
                    if value.is_null() {
                        continue;
                    }
                    object.insert(key, MemoryValue::from_json(value)?);
                }
                Ok(MemoryValue::Object(object))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_layer() -> (MemoryHost, MemoryNode) {
        let mut host = MemoryHost::new();
        let layer = host.insert_object(
            MemoryObject::new("layer")
                .with("name", "Shape 1")
                .with("visible", true)
                .with("mode", MemoryValue::enumerated("blendMode", "multiply"))
                .with("tags", MemoryValue::list(["a", "b"])),
        );
        (host, layer)
    }

    #[test]
    fn ids_round_trip_through_names() {
        descnav_testhelpers::setup();

        let host = MemoryHost::new();
        let id = host.id("layerID").unwrap();
        assert_eq!(host.id("layerID").unwrap(), id);
        assert_eq!(host.name(id).unwrap(), "layerID");
        assert_eq!(host.name(KeyId(999)), Err(HostError::UnknownId(KeyId(999))));
        assert_eq!(host.name(KeyId::SENTINEL), Err(HostError::UnknownId(KeyId::SENTINEL)));
        assert_eq!(host.name(KeyId(0)), Err(HostError::UnknownId(KeyId(0))));
        assert_eq!(
            host.name(KeyId(i32::MIN)),
            Err(HostError::UnknownId(KeyId(i32::MIN)))
        );
    }

    #[test]
    fn unknown_keys_intern_once_and_do_not_exist() {
        descnav_testhelpers::setup();

        let (host, layer) = host_with_layer();
        let first = host.id("someUnknownKey").unwrap();
        let second = host.id("someUnknownKey").unwrap();
        assert_eq!(first, second);
        assert_eq!(host.name(first).unwrap(), "someUnknownKey");
        assert_eq!(host.exists(&layer, first), Ok(false));
        assert_eq!(
            host.read(&layer, Slot::Key(first), ValueType::String),
            Err(HostError::NoSuchKey(first))
        );
    }

    #[test]
    fn malformed_names_are_rejected() {
        descnav_testhelpers::setup();

        let host = MemoryHost::new();
        assert!(matches!(host.id(""), Err(HostError::MalformedName(_))));
        assert!(matches!(host.id("bad key"), Err(HostError::MalformedName(_))));
    }

    #[test]
    fn typed_reads_check_the_stored_type() {
        descnav_testhelpers::setup();

        let (host, layer) = host_with_layer();
        let name = Slot::Key(host.id("name").unwrap());
        assert_eq!(
            host.read(&layer, name, ValueType::String),
            Ok(Leaf::String("Shape 1".into()))
        );
        assert_eq!(
            host.read(&layer, name, ValueType::Integer),
            Err(HostError::TypeMismatch {
                expected: ValueType::Integer,
                found: ValueType::String
            })
        );
        let tags = Slot::Key(host.id("tags").unwrap());
        assert_eq!(host.value_type(&layer, tags), Ok(ValueType::List));
        assert!(host.child(&layer, tags, NodeShape::Descriptor).is_err());
        assert!(host.child(&layer, tags, NodeShape::List).is_ok());
    }

    #[test]
    fn stale_nodes_fail_every_primitive() {
        descnav_testhelpers::setup();

        let (host, layer) = host_with_layer();
        let name = host.id("name").unwrap();
        host.invalidate(layer);
        assert_eq!(host.exists(&layer, name), Err(HostError::StaleNode));
        assert_eq!(host.len(&layer), Err(HostError::StaleNode));
    }

    #[test]
    fn keys_keep_insertion_order() {
        descnav_testhelpers::setup();

        let (host, layer) = host_with_layer();
        let keys: Vec<String> = (0..host.len(&layer).unwrap())
            .map(|i| host.name(host.key_at(&layer, i).unwrap()).unwrap())
            .collect();
        assert_eq!(keys, ["name", "visible", "mode", "tags"]);
    }

    #[test]
    fn resolve_by_position_and_name() {
        descnav_testhelpers::setup();

        let mut host = MemoryHost::new();
        let docs = host.insert_list(vec![
            MemoryObject::new("document").with("name", "a.psd").with("ID", 11).into(),
            MemoryObject::new("document").with("name", "b.psd").with("ID", 12).into(),
        ]);
        host.set_collection("document", docs);
        let class = host.id("document").unwrap();

        let mut second = ReferenceHandle::new();
        second.put_index(class, 2);
        let node = host.resolve(second).unwrap();
        let name = host.id("name").unwrap();
        assert_eq!(
            host.read(&node, Slot::Key(name), ValueType::String),
            Ok(Leaf::String("b.psd".into()))
        );

        let mut by_name = ReferenceHandle::new();
        by_name.put_name(class, "a.psd");
        let mut by_id = ReferenceHandle::new();
        by_id.put_identifier(class, 11);
        assert_eq!(host.resolve(by_name), host.resolve(by_id));

        let mut zero = ReferenceHandle::new();
        zero.put_index(class, 0);
        assert!(host.resolve(zero).is_err());
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_descriptor_convention() {
        descnav_testhelpers::setup();

        let value = MemoryValue::from_json(serde_json::json!({
            "_obj": "layer",
            "name": "Title",
            "count": 3,
            "big": 5_000_000_000_i64,
            "opacity": {"_unit": "percentUnit", "_value": 50.0},
            "mode": {"_enum": "blendMode", "_value": "screen"},
            "skipped": null,
        }))
        .unwrap();

        let MemoryValue::Object(object) = value else {
            panic!("expected an object");
        };
        assert_eq!(object.class(), "layer");
        assert_eq!(object.get("count"), Some(&MemoryValue::Integer(3)));
        assert_eq!(
            object.get("big"),
            Some(&MemoryValue::LargeInteger(5_000_000_000))
        );
        assert_eq!(
            object.get("opacity"),
            Some(&MemoryValue::unit("percentUnit", 50.0))
        );
        assert_eq!(
            object.get("mode"),
            Some(&MemoryValue::enumerated("blendMode", "screen"))
        );
        assert_eq!(object.get("skipped"), None);
        assert_eq!(object.get("_obj"), None);
    }
}
