//! Router core - route registry, navigation state and push coordination.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

use super::error::RouterError;
use super::events::{CreateEvent, PushEvent, RouteEvent, RouterEvent, RouterEventKind};
use super::route::Route;
use crate::config::RouterConfig;
use crate::dispatcher::{Dispatcher, LifecycleError, Listener};
use crate::history::NavigationSink;
use crate::pattern::{PatternOverrides, PatternSource};

/// Path transform run by [`Router::push`] after the base path is stripped
///
/// Returning `None` rejects the navigation.
pub type Guard = Rc<dyn Fn(&str) -> Option<String>>;

#[derive(Default)]
struct RouterState {
    current_path: Option<String>,
    current_route: Option<Rc<Route>>,
}

struct RouterInner {
    config: RouterConfig,
    state: RefCell<RouterState>,
    routes: RefCell<Vec<Rc<Route>>>,
    guards: RefCell<Vec<Guard>>,
    navigation: Option<Rc<dyn NavigationSink>>,
    events: Dispatcher<RouterEvent>,
}

/// Ordered route registry with a current path and change notification
///
/// `Router` is a cheap handle: clones share the same registry and state, which
/// is how event payloads carry the router back to listeners. All operations
/// run synchronously on the calling thread.
///
/// # Matching policy
///
/// Routes are scanned in registration order and the **last** matching route
/// wins, so a later registration overrides an earlier one on overlapping
/// templates.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Router {
    /// Router without a navigation sink
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self::build(config, None)
    }

    /// Router that mirrors accepted paths into `navigation` when
    /// `update_history` is enabled
    #[must_use]
    pub fn with_navigation(config: RouterConfig, navigation: Rc<dyn NavigationSink>) -> Self {
        Self::build(config, Some(navigation))
    }

    /// Router with every route listed in `config.routes` registered in order
    ///
    /// # Errors
    ///
    /// The first template that fails to compile.
    pub fn from_config(config: RouterConfig) -> Result<Self, RouterError> {
        let routes = config.routes.clone();
        let router = Self::new(config);
        for route in &routes {
            router.add_route(route.path.as_str(), &route.options)?;
        }
        Ok(router)
    }

    fn build(config: RouterConfig, navigation: Option<Rc<dyn NavigationSink>>) -> Self {
        debug!(
            base_path = %config.base_path,
            update_history = config.update_history,
            navigation = navigation.is_some(),
            "Router created"
        );
        Self {
            inner: Rc::new(RouterInner {
                config,
                state: RefCell::new(RouterState::default()),
                routes: RefCell::new(Vec::new()),
                guards: RefCell::new(Vec::new()),
                navigation,
                events: Dispatcher::new("router"),
            }),
        }
    }

    fn ensure_alive(&self) -> Result<(), LifecycleError> {
        if self.inner.events.is_destroyed() {
            Err(LifecycleError::Destroyed {
                component: "router",
            })
        } else {
            Ok(())
        }
    }

    /// Compile and register a route, returning a handle to it
    ///
    /// `overrides` are merged over the router's pattern options.
    ///
    /// # Errors
    ///
    /// [`RouterError::Pattern`] if the template does not compile,
    /// [`RouterError::Lifecycle`] after [`Router::destroy`].
    pub fn create_route(
        &self,
        source: impl Into<PatternSource>,
        overrides: &PatternOverrides,
    ) -> Result<Rc<Route>, RouterError> {
        self.ensure_alive()?;
        let source = source.into();
        let template = source.describe();
        let options = self.inner.config.pattern.merge(overrides);
        let route = match Route::new(source, options) {
            Ok(route) => Rc::new(route),
            Err(source_err) => {
                warn!(template = %template, error = %source_err, "Route registration failed");
                return Err(RouterError::Pattern {
                    template,
                    source: source_err,
                });
            }
        };

        let route_count = {
            let mut routes = self.inner.routes.borrow_mut();
            routes.push(Rc::clone(&route));
            routes.len()
        };
        info!(
            template = %route.template(),
            regex = %route.matcher().as_str(),
            route_count,
            "Route registered"
        );

        self.inner.events.dispatch(&RouterEvent::Create(CreateEvent {
            router: self.clone(),
            route: Rc::clone(&route),
            route_count,
        }))?;
        Ok(route)
    }

    /// Register a route identified by its template
    ///
    /// # Errors
    ///
    /// Same as [`Router::create_route`].
    pub fn add_route(
        &self,
        source: impl Into<PatternSource>,
        overrides: &PatternOverrides,
    ) -> Result<(), RouterError> {
        self.create_route(source, overrides).map(|_| ())
    }

    /// Unregister and destroy `route`; returns whether it was registered
    ///
    /// If `route` is the current route it stays current until the next push.
    pub fn remove_route(&self, route: &Rc<Route>) -> bool {
        let removed = {
            let mut routes = self.inner.routes.borrow_mut();
            routes
                .iter()
                .position(|r| Rc::ptr_eq(r, route))
                .map(|index| routes.remove(index))
        };
        match removed {
            Some(route) => {
                route.destroy();
                info!(template = %route.template(), "Route removed");
                true
            }
            None => false,
        }
    }

    /// Unregister and destroy every route registered as `template`
    pub fn remove_template(&self, template: &str) -> usize {
        let removed: Vec<Rc<Route>> = {
            let mut routes = self.inner.routes.borrow_mut();
            let (removed, kept): (Vec<_>, Vec<_>) =
                routes.drain(..).partition(|r| r.template() == template);
            *routes = kept;
            removed
        };
        for route in &removed {
            route.destroy();
        }
        if !removed.is_empty() {
            info!(template = %template, removed = removed.len(), "Routes removed");
        }
        removed.len()
    }

    /// Registered templates in registration order
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.inner
            .routes
            .borrow()
            .iter()
            .map(|r| r.template().to_string())
            .collect()
    }

    /// Registered route handles in registration order
    #[must_use]
    pub fn route_handles(&self) -> Vec<Rc<Route>> {
        self.inner.routes.borrow().clone()
    }

    #[must_use]
    pub fn route_count(&self) -> usize {
        self.inner.routes.borrow().len()
    }

    /// Current normalized path, `None` until the first accepted push
    #[must_use]
    pub fn path(&self) -> Option<String> {
        self.inner.state.borrow().current_path.clone()
    }

    /// Route matched by the last accepted push
    #[must_use]
    pub fn current_route(&self) -> Option<Rc<Route>> {
        self.inner.state.borrow().current_route.clone()
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    /// Install a path transform that runs on every push, in installation order
    ///
    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] after [`Router::destroy`].
    pub fn add_guard(&self, guard: Guard) -> Result<(), LifecycleError> {
        self.ensure_alive()?;
        self.inner.guards.borrow_mut().push(guard);
        Ok(())
    }

    /// Base path strip followed by the installed guards
    fn normalize(&self, path: &str) -> Option<String> {
        let base_path = self.inner.config.base_path.as_str();
        let stripped = if base_path.is_empty() {
            path
        } else {
            path.strip_prefix(base_path).unwrap_or(path)
        };
        let mut path = if stripped.is_empty() {
            "/".to_string()
        } else {
            stripped.to_string()
        };

        let guards = self.inner.guards.borrow().clone();
        for guard in &guards {
            path = guard(&path)?;
        }
        Some(path)
    }

    /// Navigate to `path`
    ///
    /// Returns `Ok(false)` when a guard rejects the path and `Ok(true)`
    /// otherwise, even when no route matches. Router `Push` listeners run only
    /// when the path changed; route `Push` listeners run only when the active
    /// route changed and a route is active.
    ///
    /// # Errors
    ///
    /// [`RouterError::Lifecycle`] after [`Router::destroy`].
    pub fn push(&self, path: &str) -> Result<bool, RouterError> {
        self.ensure_alive()?;

        let requested = path;
        let Some(path) = self.normalize(requested) else {
            warn!(path = %requested, "Navigation rejected");
            return Ok(false);
        };

        let route = self
            .inner
            .routes
            .borrow()
            .iter()
            .rev()
            .find(|r| r.matches(&path))
            .cloned();

        let (path_changed, route_changed) = {
            let mut state = self.inner.state.borrow_mut();
            let path_changed = state.current_path.as_deref() != Some(path.as_str());
            let route_changed = match (&state.current_route, &route) {
                (Some(prev), Some(next)) => !Rc::ptr_eq(prev, next),
                (None, None) => false,
                _ => true,
            };
            state.current_path = Some(path.clone());
            state.current_route = route.clone();
            (path_changed, route_changed)
        };

        debug!(
            path = %path,
            route = route.as_ref().map(|r| r.template()),
            path_changed,
            route_changed,
            "Route match attempt"
        );

        let event = PushEvent {
            router: self.clone(),
            route: route.clone(),
            path,
        };

        if path_changed {
            self.update_history(requested);
            info!(
                path = %event.path,
                route = event.route.as_ref().map(|r| r.template()),
                "Navigated"
            );
            self.inner
                .events
                .dispatch(&RouterEvent::Push(event.clone()))?;
        }

        if route_changed {
            match &route {
                // Removed by a router listener during this push
                Some(route) if route.is_destroyed() => {
                    debug!(route = route.template(), "Active route removed during navigation");
                }
                Some(route) => {
                    route.dispatch(&RouteEvent::Push(event))?;
                }
                None => {}
            }
        }

        Ok(true)
    }

    /// Mirror the path as the caller wrote it, before base path stripping
    fn update_history(&self, path: &str) {
        if !self.inner.config.update_history {
            return;
        }
        let Some(navigation) = &self.inner.navigation else {
            return;
        };
        let base_path = self.inner.config.base_path.as_str();
        let url = if path.contains(base_path) {
            path.to_string()
        } else {
            format!("{base_path}{path}")
        };
        if navigation.location().as_deref() != Some(url.as_str()) {
            debug!(url = %url, "Updating navigation history");
            navigation.push_location(&url);
        }
    }

    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] after [`Router::destroy`].
    pub fn add_listener(
        &self,
        kind: RouterEventKind,
        listener: Listener<RouterEvent>,
    ) -> Result<bool, LifecycleError> {
        self.inner.events.add_listener(kind, listener)
    }

    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] after [`Router::destroy`].
    pub fn remove_listener(
        &self,
        kind: RouterEventKind,
        listener: &Listener<RouterEvent>,
    ) -> Result<bool, LifecycleError> {
        self.inner.events.remove_listener(kind, listener)
    }

    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] after [`Router::destroy`].
    pub fn remove_all_listeners(&self, kind: Option<RouterEventKind>) -> Result<(), LifecycleError> {
        self.inner.events.remove_all_listeners(kind)
    }

    /// Destroy every route and listener and clear the current state
    ///
    /// Every later operation that mutates the router fails with
    /// [`LifecycleError::Destroyed`]. Destroying twice is a no-op.
    pub fn destroy(&self) {
        if self.is_destroyed() {
            return;
        }
        let routes = std::mem::take(&mut *self.inner.routes.borrow_mut());
        for route in &routes {
            route.destroy();
        }
        self.inner.guards.borrow_mut().clear();
        *self.inner.state.borrow_mut() = RouterState::default();
        self.inner.events.destroy();
        info!(routes = routes.len(), "Router destroyed");
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.inner.events.is_destroyed()
    }

    /// Whether `self` and `other` are handles to the same router
    #[must_use]
    pub fn ptr_eq(&self, other: &Router) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.try_borrow();
        f.debug_struct("Router")
            .field("base_path", &self.inner.config.base_path)
            .field("routes", &self.routes())
            .field(
                "current_path",
                &state.as_ref().ok().and_then(|s| s.current_path.clone()),
            )
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
