#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::sync::LazyLock;
use std::time::Instant;

use descnav::{
    Diagnostic, Diagnostics, Host, HostError, KeyId, Leaf, NodeShape, ReferenceHandle, Slot,
    ValueType,
};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    let _ = *START_TIME;

    color_backtrace::BacktracePrinter::new()
        .verbosity(color_backtrace::Verbosity::Medium)
        .add_frame_filter(Box::new(|frames| {
            frames.retain(|frame| match &frame.name {
                Some(name) => {
                    !(name.starts_with("test::run_test")
                        || name.starts_with("test::__rust_begin_short_backtrace")
                        || name.starts_with("std::panicking::")
                        || name.starts_with("core::panicking::")
                        || name.starts_with("core::ops::function::FnOnce::call_once"))
                }
                None => true,
            })
        }))
        .install(Box::new(termcolor::StandardStream::stderr(
            termcolor::ColorChoice::AlwaysAnsi,
        )));

    let filter = std::env::var("DESCNAV_LOG")
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::TRACE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(Uptime)
                .with_target(false)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Set up a tracing subscriber and colored backtraces for tests.
///
/// Safe to call from every test: initialization happens once per process.
/// The `DESCNAV_LOG` environment variable takes a target filter such as
/// `descnav=debug`; everything is logged at `trace` by default.
pub fn setup() {
    #[allow(clippy::let_unit_value)]
    let _ = *SUBSCRIBER_INIT;
}

/// Wraps a host and counts every primitive call made through it.
///
/// Used to check that sentinel navigators never reach the host, and that
/// queries read a list's count once.
#[derive(Debug)]
pub struct CountingHost<H> {
    inner: H,
    calls: RefCell<BTreeMap<&'static str, usize>>,
}

impl<H> CountingHost<H> {
    /// Wraps `inner`.
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            calls: RefCell::new(BTreeMap::new()),
        }
    }

    /// The wrapped host.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    fn record(&self, primitive: &'static str) {
        *self.calls.borrow_mut().entry(primitive).or_default() += 1;
    }

    /// Total number of primitive calls so far.
    pub fn total(&self) -> usize {
        self.calls.borrow().values().sum()
    }

    /// Number of calls to `primitive` (e.g. `"len"`) so far.
    pub fn calls_to(&self, primitive: &str) -> usize {
        self.calls.borrow().get(primitive).copied().unwrap_or(0)
    }

    /// Forgets every recorded call.
    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl<H: Host> Host for CountingHost<H> {
    type Node = H::Node;

    fn id(&self, name: &str) -> Result<KeyId, HostError> {
        self.record("id");
        self.inner.id(name)
    }

    fn name(&self, id: KeyId) -> Result<String, HostError> {
        self.record("name");
        self.inner.name(id)
    }

    fn exists(&self, node: &H::Node, key: KeyId) -> Result<bool, HostError> {
        self.record("exists");
        self.inner.exists(node, key)
    }

    fn read(&self, node: &H::Node, slot: Slot, expected: ValueType) -> Result<Leaf, HostError> {
        self.record("read");
        self.inner.read(node, slot, expected)
    }

    fn child(&self, node: &H::Node, slot: Slot, shape: NodeShape) -> Result<H::Node, HostError> {
        self.record("child");
        self.inner.child(node, slot, shape)
    }

    fn len(&self, node: &H::Node) -> Result<usize, HostError> {
        self.record("len");
        self.inner.len(node)
    }

    fn value_type(&self, node: &H::Node, slot: Slot) -> Result<ValueType, HostError> {
        self.record("value_type");
        self.inner.value_type(node, slot)
    }

    fn key_at(&self, node: &H::Node, index: usize) -> Result<KeyId, HostError> {
        self.record("key_at");
        self.inner.key_at(node, index)
    }

    fn class_of(&self, node: &H::Node) -> Result<KeyId, HostError> {
        self.record("class_of");
        self.inner.class_of(node)
    }

    fn resolve(&self, reference: ReferenceHandle) -> Result<H::Node, HostError> {
        self.record("resolve");
        self.inner.resolve(reference)
    }

    fn collection(&self, class: KeyId) -> Result<H::Node, HostError> {
        self.record("collection");
        self.inner.collection(class)
    }
}

/// Wraps a host and makes selected primitives fail.
#[derive(Debug)]
pub struct FaultyHost<H> {
    inner: H,
    names: HashSet<String>,
    indices: HashSet<usize>,
    fail_len: Cell<bool>,
}

impl<H> FaultyHost<H> {
    /// Wraps `inner` without injecting any failure.
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            names: HashSet::new(),
            indices: HashSet::new(),
            fail_len: Cell::new(false),
        }
    }

    /// Makes translating `name` fail.
    pub fn fail_name(mut self, name: &str) -> Self {
        self.names.insert(name.to_owned());
        self
    }

    /// Makes reading list position `index` fail, whatever the list.
    pub fn fail_index(mut self, index: usize) -> Self {
        self.indices.insert(index);
        self
    }

    /// Makes every count fail from now on.
    pub fn fail_len(&self) {
        self.fail_len.set(true);
    }

    fn check(&self, slot: Slot) -> Result<(), HostError> {
        match slot {
            Slot::Index(index) if self.indices.contains(&index) => {
                Err(HostError::Other(format!("injected failure at index {index}")))
            }
            _ => Ok(()),
        }
    }
}

impl<H: Host> Host for FaultyHost<H> {
    type Node = H::Node;

    fn id(&self, name: &str) -> Result<KeyId, HostError> {
        if self.names.contains(name) {
            return Err(HostError::Other(format!("injected failure for {name:?}")));
        }
        self.inner.id(name)
    }

    fn name(&self, id: KeyId) -> Result<String, HostError> {
        self.inner.name(id)
    }

    fn exists(&self, node: &H::Node, key: KeyId) -> Result<bool, HostError> {
        self.inner.exists(node, key)
    }

    fn read(&self, node: &H::Node, slot: Slot, expected: ValueType) -> Result<Leaf, HostError> {
        self.check(slot)?;
        self.inner.read(node, slot, expected)
    }

    fn child(&self, node: &H::Node, slot: Slot, shape: NodeShape) -> Result<H::Node, HostError> {
        self.check(slot)?;
        self.inner.child(node, slot, shape)
    }

    fn len(&self, node: &H::Node) -> Result<usize, HostError> {
        if self.fail_len.get() {
            return Err(HostError::Other("injected count failure".into()));
        }
        self.inner.len(node)
    }

    fn value_type(&self, node: &H::Node, slot: Slot) -> Result<ValueType, HostError> {
        self.check(slot)?;
        self.inner.value_type(node, slot)
    }

    fn key_at(&self, node: &H::Node, index: usize) -> Result<KeyId, HostError> {
        self.inner.key_at(node, index)
    }

    fn class_of(&self, node: &H::Node) -> Result<KeyId, HostError> {
        self.inner.class_of(node)
    }

    fn resolve(&self, reference: ReferenceHandle) -> Result<H::Node, HostError> {
        self.inner.resolve(reference)
    }

    fn collection(&self, class: KeyId) -> Result<H::Node, HostError> {
        self.inner.collection(class)
    }
}

/// A diagnostics sink that keeps every notification.
///
/// Clones share the same record, so a test can hand one clone to a session
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    messages: Rc<RefCell<Vec<String>>>,
    multiplicity: Rc<RefCell<Vec<usize>>>,
}

impl RecordingDiagnostics {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification, rendered, in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    /// The match counts of every multiplicity notification.
    pub fn multiplicity(&self) -> Vec<usize> {
        self.multiplicity.borrow().clone()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn notify(&self, diagnostic: &Diagnostic<'_>) {
        if let Diagnostic::Multiplicity { matches } = diagnostic {
            self.multiplicity.borrow_mut().push(*matches);
        }
        self.messages.borrow_mut().push(diagnostic.to_string());
    }
}
