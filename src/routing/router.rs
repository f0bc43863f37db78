//! Route lookup.
//!
//! # Responsibilities
//! - Store routes in configuration order
//! - Look up the first route whose prefix matches the request path
//! - Rewrite a request URI onto the route's upstream
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan (route tables here are a handful of entries)
//! - Explicit `None` rather than a silent default route

use std::str::FromStr;

use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::http::Uri;
use url::Url;

use crate::config::{RouteConfig, ValidationError};
use crate::routing::matcher::PathPrefixMatcher;

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub matcher: PathPrefixMatcher,
    pub scheme: Scheme,
    pub authority: Authority,
    pub fallback: Option<String>,
}

impl Route {
    pub fn from_config(config: &RouteConfig) -> Result<Self, ValidationError> {
        let invalid = |reason: &'static str| ValidationError::Upstream {
            name: config.name.clone(),
            upstream: config.upstream.clone(),
            reason,
        };

        let url = Url::parse(&config.upstream).map_err(|_| invalid("not a URL"))?;
        let scheme = Scheme::from_str(url.scheme()).map_err(|_| invalid("bad scheme"))?;
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let authority = Authority::from_str(&authority).map_err(|_| invalid("bad authority"))?;

        Ok(Self {
            name: config.name.clone(),
            matcher: PathPrefixMatcher::new(config.path_prefix.clone()),
            scheme,
            authority,
            fallback: config.fallback.clone(),
        })
    }

    /// Point `uri` at this route's upstream, keeping path and query.
    pub fn upstream_uri(&self, uri: &Uri) -> Uri {
        let mut parts = uri.clone().into_parts();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        if parts.path_and_query.is_none() {
            parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
    }
}

/// First-match route table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn from_config(configs: &[RouteConfig]) -> Result<Self, ValidationError> {
        let routes = configs
            .iter()
            .map(Route::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { routes })
    }

    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matcher.matches(path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
