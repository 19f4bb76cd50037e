//! # Dispatcher Module
//!
//! A minimal named-event pub/sub primitive. The router and every route own a
//! [`Dispatcher`] and use it to notify UI bindings about registrations and
//! navigation.
//!
//! ## Overview
//!
//! - Events are tagged values implementing [`Event`]; the tag (`Event::Kind`)
//!   selects the listeners.
//! - Registering the same [`Listener`] twice under one kind keeps one entry.
//! - Dispatch is synchronous and reentrant: the listener list is snapshotted
//!   before iteration, so a listener that adds or removes listeners only
//!   affects later dispatches.
//! - After [`Dispatcher::destroy`], every operation returns
//!   [`LifecycleError::Destroyed`] instead of silently doing nothing.
//!
//! ## Example
//!
//! ```rust
//! use riouter::dispatcher::{Dispatcher, Event, Listener};
//! use std::rc::Rc;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind { Ping }
//!
//! struct Ping(u32);
//!
//! impl Event for Ping {
//!     type Kind = Kind;
//!     fn kind(&self) -> Kind { Kind::Ping }
//! }
//!
//! let dispatcher = Dispatcher::new("example");
//! let listener: Listener<Ping> = Rc::new(|ping: &Ping| println!("ping {}", ping.0));
//! assert!(dispatcher.add_listener(Kind::Ping, Rc::clone(&listener)).unwrap());
//! assert!(!dispatcher.add_listener(Kind::Ping, listener).unwrap());
//! assert_eq!(dispatcher.dispatch(&Ping(1)).unwrap(), 1);
//! ```

mod core;

pub use core::{Dispatcher, Event, LifecycleError, Listener};
