//! # Router Module
//!
//! The router module keeps an ordered registry of compiled path templates,
//! tracks the current path and the route it resolved to, and notifies
//! listeners when either changes.
//!
//! ## Overview
//!
//! - [`Route`] binds one template to its compiled matcher and a route-scoped
//!   dispatcher.
//! - [`Router`] registers routes, resolves pushed paths and dispatches
//!   [`RouterEvent`]s and [`RouteEvent`]s.
//!
//! ## State machine
//!
//! A router starts *idle* (`path()` is `None`). Every accepted
//! [`Router::push`] moves it to *resolved*:
//!
//! 1. The configured base path is stripped, then guards run in order. A guard
//!    returning `None` rejects the navigation.
//! 2. Routes are scanned in registration order; the **last** match wins.
//! 3. Current path and route are updated.
//! 4. If the path changed, the navigation sink is updated (when enabled) and a
//!    router `Push` event is dispatched.
//! 5. If the active route changed, the new route's own `Push` event fires.
//!
//! ## Example
//!
//! ```rust
//! use riouter::config::RouterConfig;
//! use riouter::pattern::PatternOverrides;
//! use riouter::router::Router;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = Router::new(RouterConfig::default());
//! router.create_route("/item/:id", &PatternOverrides::default())?;
//! let special = router.create_route("/item/special", &PatternOverrides::default())?;
//!
//! assert!(router.push("/item/special")?);
//! let active = router.current_route().expect("a route is active");
//! assert!(std::rc::Rc::ptr_eq(&active, &special));
//! # Ok(())
//! # }
//! ```
//!
//! ## Reentrancy
//!
//! No internal borrow is held while listeners run, so a listener may query the
//! router, register routes or listeners, or push again.

mod core;
mod error;
mod events;
mod route;
#[cfg(test)]
mod performance_tests;

pub use core::{Guard, Router};
pub use error::{RouteError, RouterError};
pub use events::{CreateEvent, PushEvent, RouteEvent, RouteEventKind, RouterEvent, RouterEventKind};
pub use route::{ParsedPath, Route, DEFAULT_BASE_URL};
