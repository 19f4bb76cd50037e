//! Route - one compiled template with its own push events.

use std::fmt;
use tracing::debug;
use url::Url;

use super::error::RouteError;
use super::events::{RouteEvent, RouteEventKind};
use crate::dispatcher::{Dispatcher, LifecycleError, Listener};
use crate::pattern::{
    CaptureVec, CompiledPattern, Key, MatchResult, Matcher, PatternError, PatternOptions,
    PatternOverrides, PatternSource,
};

/// Base URL used to resolve relative paths in [`Route::parse`]
pub const DEFAULT_BASE_URL: &str = "http://localhost/";

/// A concrete path decomposed as a URL plus the route's positional captures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub url: Url,
    /// Capture group values in template order
    pub params: CaptureVec,
}

/// One path template bound to its compiled matcher
///
/// A route owns its matcher and a dispatcher for route-scoped events. The
/// [`Router`](super::Router) that creates a route owns its lifetime and
/// destroys it on removal; callers hold shared `Rc<Route>` handles.
pub struct Route {
    source: PatternSource,
    template: String,
    options: PatternOptions,
    compiled: CompiledPattern,
    base_url: Option<Url>,
    events: Dispatcher<RouteEvent>,
}

impl Route {
    /// Compile `source` with `options`
    ///
    /// # Errors
    ///
    /// Propagates template syntax errors.
    pub fn new(source: impl Into<PatternSource>, options: PatternOptions) -> Result<Self, PatternError> {
        let source = source.into();
        let compiled = CompiledPattern::compile(&source, &options)?;
        let template = source.describe();
        debug!(
            template = %template,
            source = %compiled.matcher.as_str(),
            keys = compiled.keys.len(),
            "Route compiled"
        );
        Ok(Self {
            source,
            template,
            options,
            compiled,
            base_url: None,
            events: Dispatcher::new("route"),
        })
    }

    /// Compile `source` with `overrides` applied over the default options
    ///
    /// # Errors
    ///
    /// Propagates template syntax errors.
    pub fn with_overrides(
        source: impl Into<PatternSource>,
        overrides: &PatternOverrides,
    ) -> Result<Self, PatternError> {
        Self::new(source, PatternOptions::default().merge(overrides))
    }

    /// Resolve relative paths in [`Route::parse`] against `base_url`
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Template identifier (the template string for single templates)
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    #[must_use]
    pub fn source(&self) -> &PatternSource {
        &self.source
    }

    #[must_use]
    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.compiled.keys
    }

    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.compiled.matcher
    }

    /// Whether the route accepts `path`
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.compiled.is_match(path)
    }

    /// Positional capture values for `path`
    #[must_use]
    pub fn exec(&self, path: &str) -> Option<CaptureVec> {
        self.compiled.exec(path)
    }

    /// Parameters of `path` keyed by name, percent-decoded
    #[must_use]
    pub fn params(&self, path: &str) -> Option<MatchResult> {
        self.compiled.match_params(path)
    }

    /// Decompose `path` as a URL and attach the route's captures
    ///
    /// Relative paths resolve against the route's base URL. Unlike
    /// [`Router::push`](super::Router::push), which reports an unmatched path
    /// through its return value, a non-matching path is an error here.
    ///
    /// # Errors
    ///
    /// [`RouteError::NoMatch`] if the route does not accept `path`,
    /// [`RouteError::Url`] if it cannot be resolved as a URL.
    pub fn parse(&self, path: &str) -> Result<ParsedPath, RouteError> {
        let params = self.exec(path).ok_or_else(|| RouteError::NoMatch {
            path: path.to_string(),
        })?;
        let url_error = |source| RouteError::Url {
            path: path.to_string(),
            source,
        };
        let base = match &self.base_url {
            Some(base) => base.clone(),
            None => Url::parse(DEFAULT_BASE_URL).map_err(url_error)?,
        };
        let url = Url::options()
            .base_url(Some(&base))
            .parse(path)
            .map_err(url_error)?;
        Ok(ParsedPath { url, params })
    }

    /// Listen for this route becoming active
    ///
    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] once the route was removed or destroyed.
    pub fn add_listener(
        &self,
        kind: RouteEventKind,
        listener: Listener<RouteEvent>,
    ) -> Result<bool, LifecycleError> {
        self.events.add_listener(kind, listener)
    }

    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] once the route was removed or destroyed.
    pub fn remove_listener(
        &self,
        kind: RouteEventKind,
        listener: &Listener<RouteEvent>,
    ) -> Result<bool, LifecycleError> {
        self.events.remove_listener(kind, listener)
    }

    /// # Errors
    ///
    /// [`LifecycleError::Destroyed`] once the route was removed or destroyed.
    pub fn remove_all_listeners(&self, kind: Option<RouteEventKind>) -> Result<(), LifecycleError> {
        self.events.remove_all_listeners(kind)
    }

    pub(crate) fn dispatch(&self, event: &RouteEvent) -> Result<usize, LifecycleError> {
        self.events.dispatch(event)
    }

    /// Release the route's listeners
    ///
    /// Matching keeps working on stale handles; listener operations fail.
    pub fn destroy(&self) {
        debug!(template = %self.template, "Route destroyed");
        self.events.destroy();
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.events.is_destroyed()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("template", &self.template)
            .field("matcher", &self.compiled.matcher)
            .field("keys", &self.compiled.keys.len())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
