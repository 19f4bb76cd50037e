//! Dispatcher core - listener registry and synchronous dispatch.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use tracing::{debug, trace};

/// A tagged event: the tag selects which listeners receive it
pub trait Event {
    /// Event name type
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// Name this event is dispatched under
    fn kind(&self) -> Self::Kind;
}

/// Shared listener callback
///
/// Identity is the `Rc` allocation: registering a clone of the same `Rc`
/// twice under one kind is a no-op.
pub type Listener<E> = Rc<dyn Fn(&E)>;

/// Operation on a component after it was destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// The named component has been destroyed
    Destroyed {
        /// Component kind, e.g. `"router"`
        component: &'static str,
    },
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::Destroyed { component } => {
                write!(f, "Lifecycle error: {component} was used after destroy()")
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

type Registry<E> = HashMap<<E as Event>::Kind, Vec<Listener<E>>>;

/// Named multi-listener pub/sub with duplicate suppression
///
/// Dispatch is synchronous: listeners run inline, in registration order,
/// before [`Dispatcher::dispatch`] returns. The listener list is snapshotted
/// when dispatch starts, so listeners may add or remove listeners (or dispatch
/// again) without affecting the iteration in progress.
pub struct Dispatcher<E: Event> {
    component: &'static str,
    listeners: RefCell<Option<Registry<E>>>,
}

impl<E: Event> Dispatcher<E> {
    /// Create a dispatcher; `component` names its owner in lifecycle errors
    #[must_use]
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            listeners: RefCell::new(Some(HashMap::new())),
        }
    }

    fn destroyed(&self) -> LifecycleError {
        LifecycleError::Destroyed {
            component: self.component,
        }
    }

    /// Register `listener` under `kind`
    ///
    /// Returns `Ok(false)` if that listener was already registered under `kind`.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] after [`Dispatcher::destroy`].
    pub fn add_listener(&self, kind: E::Kind, listener: Listener<E>) -> Result<bool, LifecycleError> {
        let mut guard = self.listeners.borrow_mut();
        let registry = guard.as_mut().ok_or_else(|| self.destroyed())?;
        let entry = registry.entry(kind).or_default();
        if entry.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            return Ok(false);
        }
        entry.push(listener);
        trace!(component = self.component, kind = ?kind, listeners = entry.len(), "Listener added");
        Ok(true)
    }

    /// Remove `listener` from `kind`; returns whether it was registered
    ///
    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] after [`Dispatcher::destroy`].
    pub fn remove_listener(&self, kind: E::Kind, listener: &Listener<E>) -> Result<bool, LifecycleError> {
        let mut guard = self.listeners.borrow_mut();
        let registry = guard.as_mut().ok_or_else(|| self.destroyed())?;
        let Some(entry) = registry.get_mut(&kind) else {
            return Ok(false);
        };
        let Some(pos) = entry.iter().position(|l| Rc::ptr_eq(l, listener)) else {
            return Ok(false);
        };
        entry.remove(pos);
        Ok(true)
    }

    /// Remove every listener for `kind`, or for all kinds when `None`
    ///
    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] after [`Dispatcher::destroy`].
    pub fn remove_all_listeners(&self, kind: Option<E::Kind>) -> Result<(), LifecycleError> {
        let mut guard = self.listeners.borrow_mut();
        let registry = guard.as_mut().ok_or_else(|| self.destroyed())?;
        match kind {
            Some(kind) => {
                registry.remove(&kind);
            }
            None => registry.clear(),
        }
        Ok(())
    }

    /// Number of listeners registered for `kind` (zero once destroyed)
    #[must_use]
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners
            .borrow()
            .as_ref()
            .and_then(|registry| registry.get(&kind))
            .map_or(0, Vec::len)
    }

    /// Invoke every listener registered for `event.kind()`
    ///
    /// Returns how many listeners were invoked.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] after [`Dispatcher::destroy`].
    pub fn dispatch(&self, event: &E) -> Result<usize, LifecycleError> {
        let kind = event.kind();
        let snapshot: Vec<Listener<E>> = {
            let guard = self.listeners.borrow();
            let registry = guard.as_ref().ok_or_else(|| self.destroyed())?;
            match registry.get(&kind) {
                Some(listeners) if !listeners.is_empty() => listeners.iter().map(Rc::clone).collect(),
                _ => return Ok(0),
            }
        };

        debug!(component = self.component, kind = ?kind, listeners = snapshot.len(), "Dispatching event");
        for listener in &snapshot {
            listener(event);
        }
        Ok(snapshot.len())
    }

    /// Release every listener; later operations fail with [`LifecycleError`]
    pub fn destroy(&self) {
        self.listeners.borrow_mut().take();
    }

    /// Whether [`Dispatcher::destroy`] has been called
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.listeners.borrow().is_none()
    }
}

impl<E: Event> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.listeners.borrow();
        let mut d = f.debug_struct("Dispatcher");
        d.field("component", &self.component);
        match guard.as_ref() {
            Some(registry) => d.field("kinds", &registry.len()),
            None => d.field("destroyed", &true),
        };
        d.finish()
    }
}
