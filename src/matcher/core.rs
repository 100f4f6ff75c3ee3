use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use http::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::collection::{CollectionEntry, RouteCollection};
use crate::compiler::CompiledRoute;
use crate::context::RequestContext;

use super::error::MatchError;

/// Parameter map produced by a successful match: the route's defaults
/// overlaid with the decoded captures, plus the matched route's name under
/// `_route`.
pub type Params = HashMap<String, Value>;

/// Resolves request paths against a [`RouteCollection`].
///
/// The matcher holds the collection behind an [`Arc`] so it can share the
/// tree with a generator, and a [`RequestContext`] supplying the request
/// method checked against `_method` requirements.
#[derive(Debug, Clone)]
pub struct UrlMatcher {
    routes: Arc<RouteCollection>,
    context: RequestContext,
}

impl UrlMatcher {
    #[must_use]
    pub fn new(routes: Arc<RouteCollection>, context: RequestContext) -> Self {
        Self { routes, context }
    }

    /// Request context consulted during matching.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn set_context(&mut self, context: RequestContext) {
        self.context = context;
    }

    /// Matches `path_info` against the route tree.
    ///
    /// The path is percent-decoded once before matching, so captures taken
    /// from an encoded path come back decoded twice. Routes are tried in
    /// declaration order and the first structural match whose `_method`
    /// requirement (if any) accepts the request method wins.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MethodNotAllowed`] when at least one route
    /// matched the path but rejected the method, [`MatchError::NotFound`]
    /// when none matched at all, and [`MatchError::Compile`] when a route
    /// under test has an invalid pattern.
    pub fn match_path(&self, path_info: &str) -> Result<Params, MatchError> {
        let path = percent_decode(path_info);
        debug!(path = %path, method = %self.context.method(), "Path match attempt");

        let mut allow: Vec<String> = Vec::new();
        if let Some(params) = self.match_collection(&path, &self.routes, &mut allow)? {
            return Ok(params);
        }

        if allow.is_empty() {
            warn!(path = %path, "No route matched");
            Err(MatchError::NotFound)
        } else {
            let allow = dedup_preserving_order(allow);
            warn!(path = %path, allow = ?allow, "Path matched but no route accepted the method");
            Err(MatchError::MethodNotAllowed { allow })
        }
    }

    fn match_collection(
        &self,
        path: &str,
        routes: &RouteCollection,
        allow: &mut Vec<String>,
    ) -> Result<Option<Params>, MatchError> {
        for entry in routes.entries() {
            match entry {
                CollectionEntry::Collection(collection) => {
                    // A literal prefix that does not lead the path rules out
                    // the whole subtree.
                    let prefix = collection.prefix();
                    if !prefix.contains('{') && !path.starts_with(prefix) {
                        continue;
                    }
                    if let Some(params) = self.match_collection(path, collection, allow)? {
                        return Ok(Some(params));
                    }
                }
                CollectionEntry::Route { name, route } => {
                    let compiled = route.compile()?;

                    let static_prefix = compiled.static_prefix();
                    if !static_prefix.is_empty() && !path.starts_with(static_prefix) {
                        continue;
                    }

                    let Some(captures) = compiled.regex().captures(path) else {
                        continue;
                    };

                    if let Some(methods) = compiled.requirement("_method") {
                        let allowed: Vec<String> = methods
                            .to_uppercase()
                            .split('|')
                            .map(str::to_string)
                            .collect();

                        // HEAD is matched as GET since the response only
                        // differs in the body.
                        let mut method = self.context.method().clone();
                        if method == Method::HEAD {
                            method = Method::GET;
                        }

                        if !allowed.iter().any(|verb| verb == method.as_str()) {
                            debug!(
                                route = %name,
                                method = %self.context.method(),
                                allowed = ?allowed,
                                "Path matched but request method rejected"
                            );
                            allow.extend(allowed);
                            continue;
                        }
                    }

                    debug!(route = %name, path = %path, "Route matched");
                    return Ok(Some(extract_params(&compiled, &captures, name)));
                }
            }
        }

        Ok(None)
    }
}

/// Merges the route's defaults with the named captures, decoding each
/// capture a second time, and records the route name under `_route`.
fn extract_params(
    compiled: &CompiledRoute,
    captures: &regex::Captures<'_>,
    name: &str,
) -> Params {
    let mut params: Params = compiled.defaults().clone();
    for capture_name in compiled.regex().capture_names().flatten() {
        if let Some(value) = captures.name(capture_name) {
            params.insert(
                capture_name.to_string(),
                Value::String(percent_decode(value.as_str())),
            );
        }
    }
    params.insert("_route".to_string(), Value::String(name.to_string()));
    params
}

/// Percent-decodes `raw`, keeping it verbatim when the decoded bytes are not
/// valid UTF-8. `+` stays literal: paths follow percent-encoding, not form
/// encoding.
fn percent_decode(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

fn dedup_preserving_order(methods: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    methods
        .into_iter()
        .filter(|method| seen.insert(method.clone()))
        .collect()
}
