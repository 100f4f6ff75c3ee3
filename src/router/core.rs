use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::collection::RouteCollection;
use crate::context::RequestContext;
use crate::generator::{GenerateError, UrlGenerator};
use crate::matcher::{MatchError, Params, UrlMatcher};

/// Facade bundling a route table with a matcher and a generator that share
/// one request context.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Arc<RouteCollection>,
    context: RequestContext,
    matcher: UrlMatcher,
    generator: UrlGenerator,
}

impl Router {
    /// Creates a router over `routes`.
    ///
    /// The collection is frozen behind an [`Arc`] and shared by the matcher
    /// and the generator. Register every route before constructing the
    /// router.
    #[must_use]
    pub fn new(routes: RouteCollection, context: RequestContext) -> Self {
        let routes = Arc::new(routes);

        let summary: Vec<String> = routes
            .all()
            .iter()
            .take(10)
            .map(|(name, route)| format!("{name} {}", route.pattern()))
            .collect();
        info!(
            routes_count = routes.len(),
            routes_summary = ?summary,
            "Routing table loaded"
        );

        let matcher = UrlMatcher::new(Arc::clone(&routes), context.clone());
        let generator = UrlGenerator::new(Arc::clone(&routes), context.clone());

        Self {
            routes,
            context,
            matcher,
            generator,
        }
    }

    /// The route table the router was built over.
    #[must_use]
    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Request context shared by matching and generation.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Replaces the request context on the router and on both delegates.
    pub fn set_context(&mut self, context: RequestContext) {
        self.matcher.set_context(context.clone());
        self.generator.set_context(context.clone());
        self.context = context;
    }

    /// Resolves a request path to route parameters.
    ///
    /// Delegates to [`UrlMatcher::match_path`].
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotFound`], [`MatchError::MethodNotAllowed`] or
    /// [`MatchError::Compile`] as the matcher does.
    pub fn match_path(&self, path_info: &str) -> Result<Params, MatchError> {
        self.matcher.match_path(path_info)
    }

    /// Generates a URL for the route registered under `name`.
    ///
    /// Delegates to [`UrlGenerator::generate`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] variants as the generator does.
    pub fn generate(
        &self,
        name: &str,
        parameters: &HashMap<String, Value>,
        absolute: bool,
    ) -> Result<String, GenerateError> {
        self.generator.generate(name, parameters, absolute)
    }

    /// Prints all registered routes to stdout.
    ///
    /// Useful for verifying that routes are registered in the intended
    /// order, since matching is first-match-wins.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for (name, route) in self.routes.all() {
            println!("[route] {name} -> {}", route.pattern());
        }
    }
}
