//! # riouter
//!
//! **riouter** is a client-side path router built on a path-template compiler.
//! Templates such as `/user/:id(\d+)` or `/files/:path*` compile to regular
//! expressions plus ordered key descriptors; a [`Router`] keeps an ordered
//! registry of compiled routes and notifies listeners as the current path
//! changes.
//!
//! ## Architecture
//!
//! - **[`pattern`]** - template lexer, parser and compiler, and the [`Matcher`]
//!   that executes compiled templates
//! - **[`dispatcher`]** - synchronous named-event pub/sub used by routes and routers
//! - **[`router`]** - [`Route`] and the [`Router`] state machine
//! - **[`config`]** - router configuration from YAML/JSON files and environment
//! - **[`history`]** - navigation sinks the router mirrors accepted paths into
//! - **[`deferred`]** - scheduler capability for debounced UI updates
//! - **[`cli`]** - the `riouter` command-line tool
//!
//! ### Navigation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Router
//!     participant Route
//!     participant Sink as NavigationSink
//!     participant Listeners
//!
//!     Caller->>Router: push("/app/item/42")
//!     Router->>Router: Strip base path, run guards
//!     Router->>Route: matches("/item/42") (last match wins)
//!     Router->>Router: Update current path and route
//!     alt Path changed
//!         Router->>Sink: push_location("/app/item/42")
//!         Router->>Listeners: RouterEvent::Push
//!     end
//!     alt Route changed
//!         Router->>Route: RouteEvent::Push
//!     end
//!     Router-->>Caller: Ok(true)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use riouter::pattern::{compile_template, KeyName, PatternOptions};
//!
//! let compiled = compile_template("/user/:id", &PatternOptions::default()).unwrap();
//! let result = compiled.match_params("/user/42").unwrap();
//! assert_eq!(result.params[&KeyName::from("id")], "42");
//! ```
//!
//! ```rust
//! use std::rc::Rc;
//! use riouter::{Listener, PatternOverrides, Router, RouterConfig, RouterEvent, RouterEventKind};
//!
//! let router = Router::new(RouterConfig::default());
//! router.add_route("/item/:id", &PatternOverrides::default()).unwrap();
//!
//! let on_push: Listener<RouterEvent> = Rc::new(|event: &RouterEvent| {
//!     if let RouterEvent::Push(push) = event {
//!         println!("navigated to {}", push.path);
//!     }
//! });
//! router.add_listener(RouterEventKind::Push, on_push).unwrap();
//! assert!(router.push("/item/7").unwrap());
//! ```
//!
//! ## Runtime Considerations
//!
//! Everything runs synchronously on the calling thread. [`Router`] and
//! [`Route`] use `Rc` and `RefCell` and are therefore `!Send`; compiled
//! patterns and [`Matcher`]s are plain data and can be shared across threads.
//! Listeners run inline during `push` and may call back into the router.
//!
//! ## Logging
//!
//! The library emits `tracing` events (`debug` for compilation and match
//! attempts, `info` for registration and navigation, `warn` for rejected
//! navigation and failed registration) and never installs a subscriber; the
//! binary does.

pub mod cli;
pub mod config;
pub mod deferred;
pub mod dispatcher;
pub mod history;
pub mod pattern;
pub mod router;

pub use config::{ConfigError, RouteConfig, RouterConfig};
pub use dispatcher::{Dispatcher, Event, LifecycleError, Listener};
pub use history::{MemoryHistory, NavigationSink, NoopNavigation};
pub use pattern::{
    CompiledPattern, Key, KeyName, MatchResult, Matcher, PatternError, PatternOptions,
    PatternOverrides, PatternSource,
};
pub use router::{
    Route, RouteError, RouteEvent, RouteEventKind, Router, RouterError, RouterEvent,
    RouterEventKind,
};
