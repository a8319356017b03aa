//! Operator-facing notifications.
//!
//! Navigators never fail loudly; a [`Diagnostics`] sink is the only way they
//! report anything. The default sink, [`Silent`], drops everything.

/// A notification emitted by a navigator.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Diagnostic<'a> {
    /// `get_single_where` found zero or several matches.
    Multiplicity {
        /// The number of matches.
        matches: usize,
    },

    /// A `debug()` step in a chain.
    Trace {
        /// The label passed to `debug()`.
        label: &'a str,
        /// A short description of the value at that step.
        detail: String,
    },
}

impl core::fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Diagnostic::Multiplicity { matches } => {
                write!(f, "expected exactly one match, found {matches}")
            }
            Diagnostic::Trace { label, detail } => write!(f, "{label}: {detail}"),
        }
    }
}

/// Receives navigator notifications.
pub trait Diagnostics {
    /// Handles one notification. Must not panic.
    fn notify(&self, diagnostic: &Diagnostic<'_>);
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Diagnostics for Silent {
    #[inline]
    fn notify(&self, _diagnostic: &Diagnostic<'_>) {}
}

impl<F> Diagnostics for F
where
    F: Fn(&Diagnostic<'_>),
{
    fn notify(&self, diagnostic: &Diagnostic<'_>) {
        self(diagnostic)
    }
}

/// Forwards notifications to `tracing`: multiplicity violations as `warn`,
/// debug steps as `debug`.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

#[cfg(feature = "tracing")]
impl Diagnostics for TracingDiagnostics {
    fn notify(&self, diagnostic: &Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::Multiplicity { matches } => {
                tracing::warn!(matches, "expected exactly one match");
            }
            Diagnostic::Trace { label, detail } => {
                tracing::debug!(label, detail = %detail, "navigator");
            }
        }
    }
}
