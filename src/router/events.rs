//! Router and route event types.

use std::fmt;
use std::rc::Rc;

use super::core::Router;
use super::route::Route;
use crate::dispatcher::Event;

/// Router-level event names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouterEventKind {
    /// A route was registered
    Create,
    /// The current path changed
    Push,
}

/// Route-level event names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteEventKind {
    /// The route became the active route
    Push,
}

/// Payload of a route registration
#[derive(Clone)]
pub struct CreateEvent {
    pub router: Router,
    pub route: Rc<Route>,
    /// Number of registered routes, including the new one
    pub route_count: usize,
}

/// Payload of a navigation
#[derive(Clone)]
pub struct PushEvent {
    pub router: Router,
    /// Active route after the navigation, if any matched
    pub route: Option<Rc<Route>>,
    /// Normalized path after the navigation
    pub path: String,
}

impl PushEvent {
    /// Whether `route` is the active route carried by this event
    #[must_use]
    pub fn is_active(&self, route: &Rc<Route>) -> bool {
        self.route.as_ref().is_some_and(|r| Rc::ptr_eq(r, route))
    }
}

/// Event dispatched on a [`Router`]
#[derive(Clone)]
pub enum RouterEvent {
    Create(CreateEvent),
    Push(PushEvent),
}

impl Event for RouterEvent {
    type Kind = RouterEventKind;

    fn kind(&self) -> RouterEventKind {
        match self {
            RouterEvent::Create(_) => RouterEventKind::Create,
            RouterEvent::Push(_) => RouterEventKind::Push,
        }
    }
}

/// Event dispatched on a [`Route`]
#[derive(Clone)]
pub enum RouteEvent {
    Push(PushEvent),
}

impl Event for RouteEvent {
    type Kind = RouteEventKind;

    fn kind(&self) -> RouteEventKind {
        match self {
            RouteEvent::Push(_) => RouteEventKind::Push,
        }
    }
}

impl fmt::Debug for CreateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateEvent")
            .field("route", &self.route.template())
            .field("route_count", &self.route_count)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for PushEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushEvent")
            .field("route", &self.route.as_ref().map(|r| r.template()))
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for RouterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterEvent::Create(e) => e.fmt(f),
            RouterEvent::Push(e) => e.fmt(f),
        }
    }
}

impl fmt::Debug for RouteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteEvent::Push(e) => e.fmt(f),
        }
    }
}
