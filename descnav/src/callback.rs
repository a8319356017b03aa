//! Outcomes of caller-supplied predicates and transformers.
//!
//! A callback signals failure through its return value rather than by
//! unwinding: `None` or `Err(_)`. The failure stays local to the element or
//! call site that ran the callback.

use crate::NavError;

/// The outcome of a predicate.
pub trait Verdict {
    /// `Ok(matched)` or the reason the predicate failed.
    fn verdict(self) -> Result<bool, NavError>;
}

impl Verdict for bool {
    #[inline]
    fn verdict(self) -> Result<bool, NavError> {
        Ok(self)
    }
}

impl Verdict for Option<bool> {
    #[inline]
    fn verdict(self) -> Result<bool, NavError> {
        self.ok_or(NavError::CallbackAbsent)
    }
}

impl<E: core::fmt::Display> Verdict for Result<bool, E> {
    #[inline]
    fn verdict(self) -> Result<bool, NavError> {
        self.map_err(|e| NavError::CallbackFailed(e.to_string()))
    }
}

/// The outcome of a transformer.
pub trait Selected {
    /// The transformed value.
    type Output;

    /// The value, or the reason there is none.
    fn selected(self) -> Result<Self::Output, NavError>;
}

impl<T> Selected for Option<T> {
    type Output = T;

    #[inline]
    fn selected(self) -> Result<T, NavError> {
        self.ok_or(NavError::CallbackAbsent)
    }
}

impl<T, E: core::fmt::Display> Selected for Result<T, E> {
    type Output = T;

    #[inline]
    fn selected(self) -> Result<T, NavError> {
        self.map_err(|e| NavError::CallbackFailed(e.to_string()))
    }
}

/// Whether a predicate accepted its input. Failed predicates reject.
pub(crate) fn accepts(verdict: impl Verdict) -> bool {
    verdict.verdict().unwrap_or(false)
}
