//! Router and route error types.

use std::fmt;

use crate::dispatcher::LifecycleError;
use crate::pattern::PatternError;

/// Error from a [`Route`](super::Route) operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// `parse` was called with a path the route does not accept
    ///
    /// Callers are expected to check `matches` first.
    NoMatch {
        /// The rejected path
        path: String,
    },
    /// The path could not be resolved as a URL
    Url {
        /// The offending path
        path: String,
        /// Parser error
        source: url::ParseError,
    },
    /// The route was destroyed
    Lifecycle(LifecycleError),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::NoMatch { path } => write!(f, "Path '{path}' does not match this route"),
            RouteError::Url { path, source } => {
                write!(f, "Path '{path}' is not a valid URL: {source}")
            }
            RouteError::Lifecycle(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::Url { source, .. } => Some(source),
            RouteError::Lifecycle(err) => Some(err),
            RouteError::NoMatch { .. } => None,
        }
    }
}

impl From<LifecycleError> for RouteError {
    fn from(err: LifecycleError) -> Self {
        RouteError::Lifecycle(err)
    }
}

/// Error from a [`Router`](super::Router) operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A route template failed to compile
    Pattern {
        /// The template as registered
        template: String,
        /// Compiler error
        source: PatternError,
    },
    /// The router (or one of its dispatchers) was destroyed
    Lifecycle(LifecycleError),
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::Pattern { template, source } => {
                write!(f, "Invalid route template '{template}': {source}")
            }
            RouterError::Lifecycle(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Pattern { source, .. } => Some(source),
            RouterError::Lifecycle(err) => Some(err),
        }
    }
}

impl From<LifecycleError> for RouterError {
    fn from(err: LifecycleError) -> Self {
        RouterError::Lifecycle(err)
    }
}
