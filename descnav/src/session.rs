use crate::tracing_macros::debug;
use crate::{
    DescriptorNav, Diagnostic, Diagnostics, Host, HostError, KeyId, ListNav, NavError, NavOptions,
    ReferenceHandle, Silent,
};

/// Owns a host together with the diagnostics sink and options its
/// navigators use.
///
/// Navigators borrow the session; they are cheap to clone and hold nothing
/// but a node handle, so callers keep them in variables instead of walking
/// the same path twice.
pub struct Session<H: Host> {
    host: H,
    diagnostics: Box<dyn Diagnostics>,
    options: NavOptions,
}

impl<H: Host> core::fmt::Debug for Session<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Session<H> {
    /// A session over `host` with default options and no diagnostics.
    pub fn new(host: H) -> Self {
        Self {
            host,
            diagnostics: Box::new(Silent),
            options: NavOptions::default(),
        }
    }

    /// Sends notifications to `diagnostics`.
    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: NavOptions) -> Self {
        self.options = options;
        self
    }

    /// The wrapped host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The options in effect.
    pub fn options(&self) -> &NavOptions {
        &self.options
    }

    pub(crate) fn notify(&self, diagnostic: Diagnostic<'_>) {
        self.diagnostics.notify(&diagnostic);
    }

    /// Translates a caller key, rejecting blank keys before the host sees them.
    pub(crate) fn key(&self, key: &str) -> Result<KeyId, NavError> {
        if key.trim().is_empty() {
            return Err(NavError::InvalidKey);
        }
        Ok(self.host.id(key)?)
    }

    /// Translates an id back to its name.
    pub(crate) fn name_of(&self, id: KeyId) -> Result<String, NavError> {
        Ok(self.host.name(id)?)
    }

    /// A navigator over a descriptor node.
    pub fn root(&self, node: H::Node) -> DescriptorNav<'_, H> {
        DescriptorNav::new(self, Some(node))
    }

    /// A navigator over a list node.
    pub fn root_list(&self, node: H::Node) -> ListNav<'_, H> {
        ListNav::new(self, Some(node))
    }

    /// The sentinel descriptor navigator.
    pub fn sentinel(&self) -> DescriptorNav<'_, H> {
        DescriptorNav::new(self, None)
    }

    /// The sentinel list navigator.
    pub fn sentinel_list(&self) -> ListNav<'_, H> {
        ListNav::new(self, None)
    }

    /// A navigator over whatever `lookup` returns, or the sentinel if it fails.
    pub fn fetch<F>(&self, lookup: F) -> DescriptorNav<'_, H>
    where
        F: FnOnce(&H) -> Result<H::Node, HostError>,
    {
        self.descriptor_or_sentinel(lookup(&self.host).map_err(NavError::from))
    }

    /// A navigator over the descriptor `reference` designates.
    ///
    /// The reference is consumed: it is released as soon as the host has
    /// run the lookup.
    pub fn resolve(&self, reference: ReferenceHandle) -> DescriptorNav<'_, H> {
        if reference.is_sentinel() {
            return self.sentinel();
        }
        self.fetch(|host| host.resolve(reference))
    }

    /// The current target of `class` (the selected layer, the active
    /// document, ...).
    pub fn selected(&self, class: &str) -> DescriptorNav<'_, H> {
        let node = self
            .target_reference(class)
            .and_then(|reference| Ok(self.host.resolve(reference)?));
        self.descriptor_or_sentinel(node)
    }

    fn target_reference(&self, class: &str) -> Result<ReferenceHandle, NavError> {
        let class = self.key(class)?;
        let ordinal = self.host.id("ordinal")?;
        let target = self.host.id("targetEnum")?;
        let mut reference = ReferenceHandle::new();
        reference.put_enumerated(class, ordinal, target);
        Ok(reference)
    }

    /// The ordered top-level collection of `class`.
    pub fn collection(&self, class: &str) -> ListNav<'_, H> {
        let list = self
            .key(class)
            .and_then(|class| Ok(self.host.collection(class)?));
        match list {
            Ok(node) => ListNav::new(self, Some(node)),
            Err(_err) => {
                debug!(class, error = %_err, "no collection");
                self.sentinel_list()
            }
        }
    }

    /// The first object of `class` whose name matches `name`.
    ///
    /// Names are compared as configured in [`NavOptions`]: by default trimmed
    /// and case-insensitively.
    pub fn named(&self, class: &str, name: &str) -> DescriptorNav<'_, H> {
        if name.trim().is_empty() {
            return self.sentinel();
        }
        let name_key = self.options.name_key.as_str();
        self.collection(class).get_first_where(|item| {
            let candidate = item.try_get::<String>(name_key)?;
            Ok::<_, NavError>(self.options.names_match(&candidate, name))
        })
    }

    fn descriptor_or_sentinel(&self, node: Result<H::Node, NavError>) -> DescriptorNav<'_, H> {
        match node {
            Ok(node) => self.root(node),
            Err(_err) => {
                debug!(error = %_err, "entry point fell back to sentinel");
                self.sentinel()
            }
        }
    }
}
