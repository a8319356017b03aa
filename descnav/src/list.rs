use crate::callback::{Selected, Verdict, accepts};
use crate::sentinel::{OrSentinel, convert};
use crate::tracing_macros::trace;
use crate::{
    DescriptorNav, Diagnostic, Enumerable, EnumerableArray, FromLeaf, Host, NavError, NodeShape,
    Session, Slot,
};

/// A total view of zero or one list node.
///
/// Besides positional access it offers three multiplicity-flavoured queries:
///
/// | Query | 0 matches | 1 match | N matches |
/// |-------|-----------|---------|-----------|
/// | [`get_first_where`](Self::get_first_where) | sentinel | the match | the first match |
/// | [`get_single_where`](Self::get_single_where) | sentinel + diagnostic | the match | sentinel + diagnostic |
/// | [`get_all_where`](Self::get_all_where) | `[]` | `[match]` | every match |
///
/// Elements that cannot be read as descriptors are skipped by every query;
/// predicates never see a sentinel.
pub struct ListNav<'s, H: Host> {
    session: &'s Session<H>,
    node: Option<H::Node>,
}

impl<H: Host> Clone for ListNav<'_, H> {
    fn clone(&self) -> Self {
        Self {
            session: self.session,
            node: self.node.clone(),
        }
    }
}

impl<H: Host> core::fmt::Debug for ListNav<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.node {
            Some(node) => f.debug_tuple("ListNav").field(node).finish(),
            None => f.write_str("ListNav(sentinel)"),
        }
    }
}

impl<'s, H: Host> ListNav<'s, H> {
    pub(crate) fn new(session: &'s Session<H>, node: Option<H::Node>) -> Self {
        Self { session, node }
    }

    pub(crate) fn from_result(session: &'s Session<H>, node: Result<H::Node, NavError>) -> Self {
        match node {
            Ok(node) => Self::new(session, Some(node)),
            Err(_err) => {
                trace!(error = %_err, "list fell back to sentinel");
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

    fn live(&self) -> Result<&H::Node, NavError> {
        self.node.as_ref().ok_or(NavError::Sentinel)
    }

    /// The element count.
    pub fn try_count(&self) -> Result<usize, NavError> {
        let node = self.live()?;
        Ok(self.session.host().len(node)?)
    }

    /// The element count; `-1` when it cannot be read, which is distinct
    /// from `0` for a list that is really empty.
    pub fn get_count(&self) -> i64 {
        self.try_count().map(|count| count as i64).or_sentinel()
    }

    fn checked(&self, index: usize) -> Result<(&H::Node, Slot), NavError> {
        let node = self.live()?;
        let count = self.try_count()?;
        if index >= count {
            return Err(NavError::OutOfRange { index, count });
        }
        Ok((node, Slot::Index(index)))
    }

    /// The descriptor at `index`.
    pub fn try_object(&self, index: usize) -> Result<DescriptorNav<'s, H>, NavError> {
        let (node, slot) = self.checked(index)?;
        let child = self.session.host().child(node, slot, NodeShape::Descriptor)?;
        Ok(DescriptorNav::new(self.session, Some(child)))
    }

    /// The descriptor at `index`, or the sentinel navigator.
    pub fn get_object(&self, index: usize) -> DescriptorNav<'s, H> {
        let child = self.checked(index).and_then(|(node, slot)| {
            Ok(self.session.host().child(node, slot, NodeShape::Descriptor)?)
        });
        DescriptorNav::from_result(self.session, child)
    }

    /// The nested list at `index`, or the sentinel list navigator.
    pub fn get_list(&self, index: usize) -> ListNav<'s, H> {
        let child = self
            .checked(index)
            .and_then(|(node, slot)| Ok(self.session.host().child(node, slot, NodeShape::List)?));
        Self::from_result(self.session, child)
    }

    /// Reads the leaf at `index` as a `T`.
    pub fn try_get<T: FromLeaf>(&self, index: usize) -> Result<T, NavError> {
        let (node, slot) = self.checked(index)?;
        let leaf = self.session.host().read(node, slot, T::VALUE_TYPE)?;
        convert(leaf)
    }

    /// The leaf at `index`, if it can be read as a `T`.
    pub fn value<T: FromLeaf>(&self, index: usize) -> Option<T> {
        self.try_get(index).ok()
    }

    /// The leaf at `index`, or the sentinel of `T`.
    pub fn get<T: FromLeaf>(&self, index: usize) -> T {
        self.try_get(index).or_sentinel()
    }

    /// String element; `""` on failure.
    pub fn get_string(&self, index: usize) -> String {
        self.get(index)
    }

    /// Integer element; `-1` on failure.
    pub fn get_integer(&self, index: usize) -> i32 {
        self.get(index)
    }

    /// Double element; `-1.0` on failure.
    pub fn get_double(&self, index: usize) -> f64 {
        self.get(index)
    }

    /// Boolean element; `false` on failure.
    pub fn get_boolean(&self, index: usize) -> bool {
        self.get(index)
    }

    /// Every element that reads as a descriptor, in index order. The count is
    /// read once; a sentinel list yields nothing without calling the host.
    fn elements(&self) -> impl Iterator<Item = DescriptorNav<'s, H>> + '_ {
        let count = self.try_count().unwrap_or(0);
        (0..count).filter_map(move |index| {
            let node = self.node.as_ref()?;
            match self
                .session
                .host()
                .child(node, Slot::Index(index), NodeShape::Descriptor)
            {
                Ok(child) => Some(DescriptorNav::new(self.session, Some(child))),
                Err(_err) => {
                    trace!(index, error = %_err, "skipping element");
                    None
                }
            }
        })
    }

    /// Every descriptor element, sentinels excluded.
    pub fn items(&self) -> Vec<DescriptorNav<'s, H>> {
        self.elements().collect()
    }

    /// The first element, in index order, that `predicate` accepts.
    ///
    /// Stops at the first match. A predicate that fails on an element counts
    /// as a rejection of that element.
    pub fn get_first_where<V, P>(&self, mut predicate: P) -> DescriptorNav<'s, H>
    where
        V: Verdict,
        P: FnMut(&DescriptorNav<'s, H>) -> V,
    {
        self.elements()
            .find(|item| accepts(predicate(item)))
            .unwrap_or_else(|| self.session.sentinel())
    }

    /// Every element `predicate` accepts, in index order.
    ///
    /// A predicate that fails on element `i` excludes `i` only; the scan
    /// continues.
    pub fn get_all_where<V, P>(&self, mut predicate: P) -> Vec<DescriptorNav<'s, H>>
    where
        V: Verdict,
        P: FnMut(&DescriptorNav<'s, H>) -> V,
    {
        self.elements()
            .filter(|item| accepts(predicate(item)))
            .collect()
    }

    /// The only element `predicate` accepts.
    ///
    /// Fails with [`NavError::Multiplicity`] when zero or several elements
    /// match, after notifying the diagnostics sink. A sentinel list fails
    /// with [`NavError::Sentinel`] and notifies nothing.
    pub fn try_single_where<V, P>(&self, predicate: P) -> Result<DescriptorNav<'s, H>, NavError>
    where
        V: Verdict,
        P: FnMut(&DescriptorNav<'s, H>) -> V,
    {
        self.live()?;
        match <[_; 1]>::try_from(self.get_all_where(predicate)) {
            Ok([only]) => Ok(only),
            Err(matches) => {
                let matches = matches.len();
                self.session.notify(Diagnostic::Multiplicity { matches });
                Err(NavError::Multiplicity { matches })
            }
        }
    }

    /// The only element `predicate` accepts, or the sentinel navigator when
    /// zero or several elements match.
    ///
    /// Use this instead of [`get_first_where`](Self::get_first_where) when
    /// the data should be unique and silently taking the first would hide a
    /// problem.
    pub fn get_single_where<V, P>(&self, predicate: P) -> DescriptorNav<'s, H>
    where
        V: Verdict,
        P: FnMut(&DescriptorNav<'s, H>) -> V,
    {
        self.try_single_where(predicate)
            .unwrap_or_else(|_| self.session.sentinel())
    }

    /// Every descriptor element as an [`Enumerable`].
    pub fn as_enumerable(&self) -> Enumerable<'s, H> {
        Enumerable::new(self.session, self.items())
    }

    /// The elements `predicate` accepts, as an [`Enumerable`].
    pub fn where_matches<V, P>(&self, predicate: P) -> Enumerable<'s, H>
    where
        V: Verdict,
        P: FnMut(&DescriptorNav<'s, H>) -> V,
    {
        Enumerable::new(self.session, self.get_all_where(predicate))
    }

    /// Maps every element through `transformer`, dropping elements for which
    /// it fails or yields nothing.
    pub fn select<R, F>(&self, mut transformer: F) -> EnumerableArray<R::Output>
    where
        R: Selected,
        F: FnMut(&DescriptorNav<'s, H>) -> R,
    {
        self.elements()
            .filter_map(|item| transformer(&item).selected().ok())
            .collect()
    }

    /// Reports this step to the session's diagnostics sink and returns the
    /// navigator unchanged.
    pub fn debug(self, label: &str) -> Self {
        let detail = match &self.node {
            Some(node) => format!("list {node:?}"),
            None => "sentinel list".to_owned(),
        };
        self.session.notify(Diagnostic::Trace { label, detail });
        self
    }
}
