//! Handle-typed leaves: file handles and reference handles.
//!
//! Each type has one `static` sentinel. The sentinel is closed under every
//! operation the type exposes: its relation getters ([`FileHandle::parent`],
//! [`ReferenceHandle::container`]) return the sentinel again, its accessors
//! return their own sentinels, and its mutators do nothing. The cycle is how
//! a chain of navigation through a missing handle stays non-null.

use std::path::{Path, PathBuf};

use crate::sentinel::Sentinel;
use crate::KeyId;

static SENTINEL_FILE: FileHandle = FileHandle { path: None };

static SENTINEL_REFERENCE: ReferenceHandle = ReferenceHandle {
    segments: Vec::new(),
    sentinel: true,
};

/// A file system location stored in a descriptor (an "alias").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle {
    path: Option<PathBuf>,
}

impl FileHandle {
    /// A handle to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// The shared sentinel handle.
    #[inline]
    pub fn sentinel() -> &'static FileHandle {
        &SENTINEL_FILE
    }

    /// Whether this is the sentinel handle.
    #[inline]
    pub const fn is_sentinel(&self) -> bool {
        self.path.is_none()
    }

    /// The underlying path, if any.
    pub fn as_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The full path as a string; `""` for the sentinel.
    pub fn path(&self) -> String {
        self.path
            .as_deref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The final component; `""` for the sentinel.
    pub fn name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The extension without the dot; `""` when there is none.
    pub fn extension(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::extension)
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether the location exists on disk. Always `false` for the sentinel.
    pub fn exists(&self) -> bool {
        self.path.as_deref().is_some_and(Path::exists)
    }

    /// The containing folder. The sentinel, and a root path, have the
    /// sentinel as parent.
    pub fn parent(&self) -> FileHandle {
        match self.path.as_deref().and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => FileHandle::new(parent),
            _ => SENTINEL_FILE.clone(),
        }
    }

    /// Replaces the extension. Does nothing on the sentinel.
    pub fn set_extension(&mut self, extension: &str) {
        if let Some(path) = self.path.as_mut() {
            path.set_extension(extension);
        }
    }
}

/// How a reference segment designates its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RefForm {
    /// The class itself.
    Class,
    /// By name.
    Name(String),
    /// By 1-based position.
    Index(u32),
    /// By unique identifier.
    Identifier(u32),
    /// By offset relative to the current target.
    Offset(i32),
    /// A property of the container.
    Property(KeyId),
    /// By enumeration value (e.g. the current target).
    Enumerated {
        /// Enumeration type id
        ty: KeyId,
        /// Enumeration value id
        value: KeyId,
    },
}

/// One `(class, form)` step of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefSegment {
    /// Desired class of the target.
    pub class: KeyId,
    /// How the target is designated.
    pub form: RefForm,
}

/// A chain of segments designating a host object, innermost first.
///
/// References are both leaf values and the request builders handed to
/// [`Host::resolve`](crate::Host::resolve), which consumes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceHandle {
    segments: Vec<RefSegment>,
    sentinel: bool,
}

impl Default for ReferenceHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceHandle {
    /// An empty reference ready for `put_*` calls.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            sentinel: false,
        }
    }

    /// The shared sentinel reference.
    #[inline]
    pub fn sentinel() -> &'static ReferenceHandle {
        &SENTINEL_REFERENCE
    }

    /// Whether this is the sentinel reference.
    #[inline]
    pub const fn is_sentinel(&self) -> bool {
        self.sentinel
    }

    /// All segments, innermost first.
    pub fn segments(&self) -> &[RefSegment] {
        &self.segments
    }

    fn put(&mut self, class: KeyId, form: RefForm) -> &mut Self {
        if !self.sentinel {
            self.segments.push(RefSegment { class, form });
        }
        self
    }

    /// Appends a class segment.
    pub fn put_class(&mut self, class: KeyId) -> &mut Self {
        self.put(class, RefForm::Class)
    }

    /// Appends a by-name segment.
    pub fn put_name(&mut self, class: KeyId, name: impl Into<String>) -> &mut Self {
        self.put(class, RefForm::Name(name.into()))
    }

    /// Appends a by-position segment (1-based).
    pub fn put_index(&mut self, class: KeyId, index: u32) -> &mut Self {
        self.put(class, RefForm::Index(index))
    }

    /// Appends a by-identifier segment.
    pub fn put_identifier(&mut self, class: KeyId, identifier: u32) -> &mut Self {
        self.put(class, RefForm::Identifier(identifier))
    }

    /// Appends a relative-offset segment.
    pub fn put_offset(&mut self, class: KeyId, offset: i32) -> &mut Self {
        self.put(class, RefForm::Offset(offset))
    }

    /// Appends a property segment.
    pub fn put_property(&mut self, class: KeyId, property: KeyId) -> &mut Self {
        self.put(class, RefForm::Property(property))
    }

    /// Appends a by-enumeration segment.
    pub fn put_enumerated(&mut self, class: KeyId, ty: KeyId, value: KeyId) -> &mut Self {
        self.put(class, RefForm::Enumerated { ty, value })
    }

    fn first(&self) -> Option<&RefSegment> {
        self.segments.first()
    }

    /// Desired class of the innermost segment.
    pub fn desired_class(&self) -> KeyId {
        self.first().map_or(KeyId::SENTINEL, |s| s.class)
    }

    /// Form of the innermost segment.
    pub fn form(&self) -> Option<&RefForm> {
        self.first().map(|s| &s.form)
    }

    /// Name of a by-name segment; `""` otherwise.
    pub fn name(&self) -> String {
        match self.form() {
            Some(RefForm::Name(name)) => name.clone(),
            _ => String::sentinel(),
        }
    }

    /// Position of a by-position segment; `-1` otherwise.
    pub fn index(&self) -> i64 {
        match self.form() {
            Some(RefForm::Index(index)) => i64::from(*index),
            _ => i64::sentinel(),
        }
    }

    /// Identifier of a by-identifier segment; `-1` otherwise.
    pub fn identifier(&self) -> i64 {
        match self.form() {
            Some(RefForm::Identifier(id)) => i64::from(*id),
            _ => i64::sentinel(),
        }
    }

    /// Offset of a relative segment; `-1` otherwise.
    pub fn offset(&self) -> i32 {
        match self.form() {
            Some(RefForm::Offset(offset)) => *offset,
            _ => i32::sentinel(),
        }
    }

    /// Property of a property segment; `KeyId(-1)` otherwise.
    pub fn property(&self) -> KeyId {
        match self.form() {
            Some(RefForm::Property(property)) => *property,
            _ => KeyId::SENTINEL,
        }
    }

    /// Enumeration type of a by-enumeration segment; `KeyId(-1)` otherwise.
    pub fn enumerated_type(&self) -> KeyId {
        match self.form() {
            Some(RefForm::Enumerated { ty, .. }) => *ty,
            _ => KeyId::SENTINEL,
        }
    }

    /// Enumeration value of a by-enumeration segment; `KeyId(-1)` otherwise.
    pub fn enumerated_value(&self) -> KeyId {
        match self.form() {
            Some(RefForm::Enumerated { value, .. }) => *value,
            _ => KeyId::SENTINEL,
        }
    }

    /// The reference minus its innermost segment.
    ///
    /// The sentinel is its own container, and so is the container of a
    /// reference with a single segment.
    pub fn container(&self) -> ReferenceHandle {
        if self.sentinel || self.segments.len() <= 1 {
            return SENTINEL_REFERENCE.clone();
        }
        Self {
            segments: self.segments[1..].to_vec(),
            sentinel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_file_is_closed_under_parent() {
        descnav_testhelpers::setup();

        let sentinel = FileHandle::sentinel();
        assert!(sentinel.parent().is_sentinel());
        assert!(sentinel.parent().parent().is_sentinel());
        assert_eq!(sentinel.name(), "");
        assert_eq!(sentinel.path(), "");
        assert!(!sentinel.exists());

        let mut copy = sentinel.clone();
        copy.set_extension("psd");
        assert!(copy.is_sentinel());
    }

    #[test]
    fn file_accessors() {
        descnav_testhelpers::setup();

        let file = FileHandle::new("/work/art/cover.psd");
        assert_eq!(file.name(), "cover.psd");
        assert_eq!(file.extension(), "psd");
        assert_eq!(file.parent().path(), "/work/art");
        assert!(FileHandle::new("cover.psd").parent().is_sentinel());
    }

    #[test]
    fn sentinel_reference_ignores_puts() {
        descnav_testhelpers::setup();

        let mut reference = ReferenceHandle::sentinel().clone();
        reference.put_index(KeyId(7), 1).put_name(KeyId(7), "Layer 1");
        assert!(reference.is_sentinel());
        assert!(reference.segments().is_empty());
        assert!(reference.container().is_sentinel());
        assert_eq!(reference.desired_class(), KeyId::SENTINEL);
        assert_eq!(reference.name(), "");
        assert_eq!(reference.index(), -1);
    }

    #[test]
    fn container_drops_innermost_segment() {
        descnav_testhelpers::setup();

        let mut reference = ReferenceHandle::new();
        reference
            .put_property(KeyId(1), KeyId(2))
            .put_index(KeyId(3), 4)
            .put_name(KeyId(5), "Untitled-1");

        assert_eq!(reference.property(), KeyId(2));
        let container = reference.container();
        assert_eq!(container.desired_class(), KeyId(3));
        assert_eq!(container.index(), 4);
        let outer = container.container();
        assert_eq!(outer.name(), "Untitled-1");
        assert!(outer.container().is_sentinel());
        assert!(outer.container().container().is_sentinel());
    }
}
