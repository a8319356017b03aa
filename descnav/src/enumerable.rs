//! Eager filter/transform pipelines over already materialized elements.
//!
//! Every stage evaluates immediately over its snapshot and returns a new
//! snapshot; the source is never modified. Chains read declaratively but
//! nothing is deferred.

use crate::callback::{Selected, Verdict, accepts};
use crate::{DescriptorNav, Diagnostic, Host, Session};

/// A snapshot of descriptor navigators.
pub struct Enumerable<'s, H: Host> {
    session: &'s Session<H>,
    items: Vec<DescriptorNav<'s, H>>,
}

impl<H: Host> Clone for Enumerable<'_, H> {
    fn clone(&self) -> Self {
        Self {
            session: self.session,
            items: self.items.clone(),
        }
    }
}

impl<H: Host> core::fmt::Debug for Enumerable<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<'s, H: Host> Enumerable<'s, H> {
    /// A snapshot of `items`. Sentinel navigators are dropped.
    pub fn new(session: &'s Session<H>, items: Vec<DescriptorNav<'s, H>>) -> Self {
        let items = items.into_iter().filter(|item| !item.is_sentinel()).collect();
        Self { session, items }
    }

    /// The items `predicate` accepts. Failing predicates reject.
    pub fn where_matches<V, P>(&self, mut predicate: P) -> Enumerable<'s, H>
    where
        V: Verdict,
        P: FnMut(&DescriptorNav<'s, H>) -> V,
    {
        let items = self
            .items
            .iter()
            .filter(|item| !item.is_sentinel() && accepts(predicate(*item)))
            .cloned()
            .collect();
        Self {
            session: self.session,
            items,
        }
    }

    /// Maps every item through `transformer`, dropping items for which it
    /// fails or yields nothing.
    pub fn select<R, F>(&self, mut transformer: F) -> EnumerableArray<R::Output>
    where
        R: Selected,
        F: FnMut(&DescriptorNav<'s, H>) -> R,
    {
        self.items
            .iter()
            .filter_map(|item| transformer(item).selected().ok())
            .collect()
    }

    /// The first item, or the sentinel navigator.
    pub fn get_first(&self) -> DescriptorNav<'s, H> {
        self.items
            .first()
            .cloned()
            .unwrap_or_else(|| self.session.sentinel())
    }

    /// Whether the snapshot holds anything.
    pub fn has_any_matches(&self) -> bool {
        !self.items.is_empty()
    }

    /// Number of items.
    pub fn get_count(&self) -> usize {
        self.items.len()
    }

    /// The items as a vector.
    pub fn to_result_array(&self) -> Vec<DescriptorNav<'s, H>> {
        self.items.clone()
    }

    /// Iterates over the items.
    pub fn iter(&self) -> core::slice::Iter<'_, DescriptorNav<'s, H>> {
        self.items.iter()
    }

    /// Reports the snapshot size to the session's diagnostics sink and
    /// returns it unchanged.
    pub fn debug(self, label: &str) -> Self {
        let detail = format!("{} item(s)", self.items.len());
        self.session.notify(Diagnostic::Trace { label, detail });
        self
    }
}

impl<'s, H: Host> IntoIterator for Enumerable<'s, H> {
    type Item = DescriptorNav<'s, H>;
    type IntoIter = std::vec::IntoIter<DescriptorNav<'s, H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// A snapshot of transformed values.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumerableArray<T> {
    items: Vec<T>,
}

impl<T> Default for EnumerableArray<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> EnumerableArray<T> {
    /// A snapshot of `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Maps every item through `transformer`, dropping items for which it
    /// fails or yields nothing.
    pub fn select<R, F>(&self, mut transformer: F) -> EnumerableArray<R::Output>
    where
        R: Selected,
        F: FnMut(&T) -> R,
    {
        self.items
            .iter()
            .filter_map(|item| transformer(item).selected().ok())
            .collect()
    }

    /// Whether the snapshot holds anything.
    pub fn has_any_matches(&self) -> bool {
        !self.items.is_empty()
    }

    /// Number of items.
    pub fn get_count(&self) -> usize {
        self.items.len()
    }

    /// Iterates over the items.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Clone> EnumerableArray<T> {
    /// The items `predicate` accepts. Failing predicates reject.
    pub fn where_matches<V, P>(&self, mut predicate: P) -> EnumerableArray<T>
    where
        V: Verdict,
        P: FnMut(&T) -> V,
    {
        self.items
            .iter()
            .filter(|item| accepts(predicate(*item)))
            .cloned()
            .collect()
    }

    /// The first item, if any.
    pub fn get_first(&self) -> Option<T> {
        self.items.first().cloned()
    }

    /// The items as a vector.
    pub fn to_result_array(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> FromIterator<T> for EnumerableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for EnumerableArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EnumerableArray<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_do_not_touch_their_source() {
        descnav_testhelpers::setup();

        let numbers: EnumerableArray<i32> = (1..=6).collect();
        let even = numbers.where_matches(|n| n % 2 == 0);
        let halves = even.select(|n| Some(n / 2));

        assert_eq!(numbers.get_count(), 6);
        assert_eq!(even.to_result_array(), vec![2, 4, 6]);
        assert_eq!(halves.to_result_array(), vec![1, 2, 3]);
    }

    #[test]
    fn failing_callbacks_drop_items() {
        descnav_testhelpers::setup();

        let words: EnumerableArray<&str> = ["12", "x", "7", ""].into_iter().collect();
        let parsed = words.select(|w| w.parse::<u32>());
        assert_eq!(parsed.to_result_array(), vec![12, 7]);

        let big = parsed.where_matches(|n| if *n == 7 { Err("seven") } else { Ok(true) });
        assert_eq!(big.to_result_array(), vec![12]);
    }

    #[test]
    fn terminals_on_empty() {
        descnav_testhelpers::setup();

        let empty = EnumerableArray::<u8>::default();
        assert_eq!(empty.get_first(), None);
        assert!(!empty.has_any_matches());
        assert_eq!(empty.get_count(), 0);
        assert!(empty.to_result_array().is_empty());
    }
}
