use crate::callback::Selected;
use crate::sentinel::{OrSentinel, convert};
use crate::tracing_macros::trace;
use crate::{
    Bounds, Diagnostic, Enumerated, FileHandle, FromLeaf, Host, KeyId, ListNav, Measurement,
    NavError, NodeShape, ReferenceHandle, Session, Slot, UnitDouble, ValueType,
};

/// A total view of zero or one descriptor node.
///
/// Every accessor returns a value: on a sentinel navigator, on a blank key,
/// and on any host failure it returns the sentinel of its return type. A
/// sentinel navigator never calls the host.
///
/// Each accessor comes in three flavours:
/// - `try_get::<T>(key)` returns `Result<T, NavError>`,
/// - `value::<T>(key)` returns `Option<T>`,
/// - `get::<T>(key)` and the `get_*` methods return `T` or its sentinel.
pub struct DescriptorNav<'s, H: Host> {
    session: &'s Session<H>,
    node: Option<H::Node>,
}

impl<H: Host> Clone for DescriptorNav<'_, H> {
    fn clone(&self) -> Self {
        Self {
            session: self.session,
            node: self.node.clone(),
        }
    }
}

impl<H: Host> core::fmt::Debug for DescriptorNav<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.node {
            Some(node) => f.debug_tuple("DescriptorNav").field(node).finish(),
            None => f.write_str("DescriptorNav(sentinel)"),
        }
    }
}

impl<'s, H: Host> DescriptorNav<'s, H> {
    pub(crate) fn new(session: &'s Session<H>, node: Option<H::Node>) -> Self {
        Self { session, node }
    }

    pub(crate) fn from_result(session: &'s Session<H>, node: Result<H::Node, NavError>) -> Self {
        match node {
            Ok(node) => Self::new(session, Some(node)),
            Err(_err) => {
                trace!(error = %_err, "descriptor fell back to sentinel");
                Self::new(session, None)
            }
        }
    }

    /// Whether this navigator wraps no node.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.node.is_none()
    }

    /// The wrapped host node.
    #[inline]
    pub fn node(&self) -> Option<&H::Node> {
        self.node.as_ref()
    }

    /// The session this navigator belongs to.
    #[inline]
    pub fn session(&self) -> &'s Session<H> {
        self.session
    }

    fn live(&self) -> Result<&H::Node, NavError> {
        self.node.as_ref().ok_or(NavError::Sentinel)
    }

    /// Resolves `key` and checks that it exists on this node.
    fn slot(&self, key: &str) -> Result<(&H::Node, Slot), NavError> {
        let node = self.live()?;
        let id = self.session.key(key)?;
        if !self.session.host().exists(node, id)? {
            return Err(NavError::MissingKey { key: key.to_owned() });
        }
        Ok((node, Slot::Key(id)))
    }

    /// Reads the leaf under `key` as a `T`.
    pub fn try_get<T: FromLeaf>(&self, key: &str) -> Result<T, NavError> {
        let (node, slot) = self.slot(key)?;
        let leaf = self.session.host().read(node, slot, T::VALUE_TYPE)?;
        convert(leaf)
    }

    /// The leaf under `key`, if it can be read as a `T`.
    pub fn value<T: FromLeaf>(&self, key: &str) -> Option<T> {
        self.try_get(key).ok()
    }

    /// The leaf under `key`, or the sentinel of `T`.
    pub fn get<T: FromLeaf>(&self, key: &str) -> T {
        self.try_get(key).or_sentinel()
    }

    /// String leaf; `""` on failure.
    pub fn get_string(&self, key: &str) -> String {
        self.get(key)
    }

    /// Integer leaf; `-1` on failure.
    pub fn get_integer(&self, key: &str) -> i32 {
        self.get(key)
    }

    /// Large integer leaf; `-1` on failure.
    pub fn get_large_integer(&self, key: &str) -> i64 {
        self.get(key)
    }

    /// Double leaf; `-1.0` on failure.
    pub fn get_double(&self, key: &str) -> f64 {
        self.get(key)
    }

    /// Boolean leaf; `false` on failure.
    pub fn get_boolean(&self, key: &str) -> bool {
        self.get(key)
    }

    /// Value of a unit double leaf; `-1.0` on failure.
    pub fn get_unit_double(&self, key: &str) -> f64 {
        self.try_get::<UnitDouble>(key).map(|u| u.value).or_sentinel()
    }

    /// Unit name of a unit double leaf (e.g. `"pixelsUnit"`).
    pub fn try_unit_double_type(&self, key: &str) -> Result<String, NavError> {
        let unit = self.try_get::<UnitDouble>(key)?.unit;
        self.session.name_of(unit)
    }

    /// Unit name of a unit double leaf; `""` on failure.
    pub fn get_unit_double_type(&self, key: &str) -> String {
        self.try_unit_double_type(key).or_sentinel()
    }

    /// Name of an enumeration value (e.g. `"normal"` for a blend mode).
    pub fn try_enumeration_string(&self, key: &str) -> Result<String, NavError> {
        let value = self.try_get::<Enumerated>(key)?.value;
        self.session.name_of(value)
    }

    /// Name of an enumeration value; `""` on failure.
    ///
    /// This shares the string sentinel, see
    /// [`ENUMERATION_SENTINEL`](crate::sentinel::ENUMERATION_SENTINEL).
    pub fn get_enumeration_string(&self, key: &str) -> String {
        self.try_enumeration_string(key).or_sentinel()
    }

    /// Id of an enumeration value; `KeyId(-1)` on failure.
    pub fn get_enumeration_id(&self, key: &str) -> KeyId {
        self.try_get::<Enumerated>(key).map(|e| e.value).or_sentinel()
    }

    /// Name of the enumeration type of an enumeration leaf; `""` on failure.
    pub fn get_enumeration_type(&self, key: &str) -> String {
        self.try_get::<Enumerated>(key)
            .and_then(|e| self.session.name_of(e.ty))
            .or_sentinel()
    }

    /// Name of a class leaf; `""` on failure.
    pub fn get_class(&self, key: &str) -> String {
        self.try_get::<KeyId>(key)
            .and_then(|class| self.session.name_of(class))
            .or_sentinel()
    }

    /// Raw data leaf; empty on failure.
    pub fn get_data(&self, key: &str) -> Vec<u8> {
        self.get(key)
    }

    /// File handle leaf; the sentinel handle on failure.
    pub fn get_path(&self, key: &str) -> FileHandle {
        self.get(key)
    }

    /// Reference leaf; the sentinel reference on failure.
    pub fn get_reference(&self, key: &str) -> ReferenceHandle {
        self.get(key)
    }

    /// The type of the value under `key`; [`ValueType::Unknown`] on failure.
    pub fn get_type(&self, key: &str) -> ValueType {
        self.slot(key)
            .and_then(|(node, slot)| Ok(self.session.host().value_type(node, slot)?))
            .or_sentinel()
    }

    /// Class name of the object nested under `key`; `""` on failure.
    pub fn get_object_type(&self, key: &str) -> String {
        self.try_object(key)
            .and_then(|object| object.try_class())
            .or_sentinel()
    }

    /// Class name of this descriptor.
    pub fn try_class(&self) -> Result<String, NavError> {
        let node = self.live()?;
        let class = self.session.host().class_of(node)?;
        self.session.name_of(class)
    }

    /// Number of keys on this descriptor; `-1` on failure.
    pub fn get_key_count(&self) -> i64 {
        self.live()
            .and_then(|node| Ok(self.session.host().len(node)?))
            .map(|len| len as i64)
            .or_sentinel()
    }

    /// Names of every key on this descriptor, in host order.
    pub fn try_keys(&self) -> Result<Vec<String>, NavError> {
        let node = self.live()?;
        let host = self.session.host();
        let len = host.len(node)?;
        (0..len)
            .map(|index| self.session.name_of(host.key_at(node, index)?))
            .collect()
    }

    /// Names of every key on this descriptor; empty on failure.
    pub fn get_keys(&self) -> Vec<String> {
        self.try_keys().unwrap_or_default()
    }

    /// Whether `key` exists on this descriptor. `false` on any failure.
    pub fn has_key(&self, key: &str) -> bool {
        self.slot(key).is_ok()
    }

    /// Reads the node of `shape` nested under `key`.
    fn child(&self, key: &str, shape: NodeShape) -> Result<H::Node, NavError> {
        let (node, slot) = self.slot(key)?;
        Ok(self.session.host().child(node, slot, shape)?)
    }

    /// The descriptor nested under `key`.
    pub fn try_object(&self, key: &str) -> Result<DescriptorNav<'s, H>, NavError> {
        let child = self.child(key, NodeShape::Descriptor)?;
        Ok(Self::new(self.session, Some(child)))
    }

    /// The descriptor nested under `key`, or the sentinel navigator.
    pub fn get_object(&self, key: &str) -> DescriptorNav<'s, H> {
        Self::from_result(self.session, self.child(key, NodeShape::Descriptor))
    }

    /// The list nested under `key`.
    pub fn try_list(&self, key: &str) -> Result<ListNav<'s, H>, NavError> {
        let child = self.child(key, NodeShape::List)?;
        Ok(ListNav::new(self.session, Some(child)))
    }

    /// The list nested under `key`, or the sentinel list navigator.
    pub fn get_list(&self, key: &str) -> ListNav<'s, H> {
        ListNav::from_result(self.session, self.child(key, NodeShape::List))
    }

    fn measure(&self, key: &str) -> Result<f64, NavError> {
        let value = match self.session.options().measurement {
            Measurement::UnitDouble => self.try_get::<UnitDouble>(key)?.value,
            Measurement::Double => self.try_get::<f64>(key)?,
        };
        if !value.is_finite() {
            return Err(NavError::NotFinite { key: key.to_owned() });
        }
        Ok(value)
    }

    /// Reads the bounds object and derives width and height.
    pub fn try_bounds(&self) -> Result<Bounds, NavError> {
        let options = self.session.options();
        let bounds = self.try_object(&options.bounds_key)?;
        let mut edges = [0.0; 4];
        for (edge, key) in edges.iter_mut().zip(&options.edge_keys) {
            *edge = bounds.measure(key)?;
        }
        let [left, top, right, bottom] = edges;
        Ok(Bounds::from_edges(left, top, right, bottom))
    }

    /// The bounds of this descriptor, or [`Bounds::SENTINEL`] if any step fails.
    pub fn get_bounds(&self) -> Bounds {
        self.try_bounds().or_sentinel()
    }

    /// Applies `f` to this navigator.
    ///
    /// Returns `None` if the navigator is a sentinel or `f` fails. The
    /// result type belongs to the caller, so there is no typed sentinel to
    /// fall back on.
    pub fn select<R, F>(&self, f: F) -> Option<R::Output>
    where
        R: Selected,
        F: FnOnce(&Self) -> R,
    {
        if self.is_sentinel() {
            return None;
        }
        f(self).selected().ok()
    }

    /// Reports this step to the session's diagnostics sink and returns the
    /// navigator unchanged.
    pub fn debug(self, label: &str) -> Self {
        let detail = match &self.node {
            Some(node) => format!("{node:?}"),
            None => "sentinel".to_owned(),
        };
        self.session.notify(Diagnostic::Trace { label, detail });
        self
    }
}
