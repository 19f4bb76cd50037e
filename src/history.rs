//! # History Module
//!
//! Navigation sinks: the capability the router uses to mirror accepted paths
//! into an external location bar. The router never inspects its environment;
//! a sink is injected with [`crate::router::Router::with_navigation`].
//!
//! - [`NoopNavigation`] ignores writes (non-interactive contexts).
//! - [`MemoryHistory`] keeps an in-memory stack, useful for tests and for
//!   embedding the router in a headless process.

use std::cell::RefCell;
use tracing::debug;

/// External location surface written to when `update_history` is enabled
pub trait NavigationSink {
    /// Current external location, if known
    fn location(&self) -> Option<String>;

    /// Record `url` as the new location without reloading
    fn push_location(&self, url: &str);
}

/// Sink that accepts and discards every write
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigation;

impl NavigationSink for NoopNavigation {
    fn location(&self) -> Option<String> {
        None
    }

    fn push_location(&self, _url: &str) {}
}

/// In-memory history stack
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: RefCell<Vec<String>>,
}

impl MemoryHistory {
    /// Empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// History starting at `url`
    #[must_use]
    pub fn starting_at(url: impl Into<String>) -> Self {
        Self {
            entries: RefCell::new(vec![url.into()]),
        }
    }

    /// Every recorded location, oldest first
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Number of recorded locations
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl NavigationSink for MemoryHistory {
    fn location(&self) -> Option<String> {
        self.entries.borrow().last().cloned()
    }

    fn push_location(&self, url: &str) {
        debug!(url = %url, "History entry pushed");
        self.entries.borrow_mut().push(url.to_string());
    }
}
