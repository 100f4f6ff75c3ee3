//! # Waymark
//!
//! **Waymark** is a route compilation and URL matching/generation library.
//! Routes are declared as patterns with `{name}` placeholders, compiled into
//! anchored regular expressions plus a token list, and then used in both
//! directions: resolving an incoming path to a parameter map, and rebuilding
//! a URL from a route name and parameters.
//!
//! ## Overview
//!
//! The library is organized into small, composable modules:
//!
//! - **[`route`]** - Route definitions: pattern, defaults, per-variable
//!   requirements, options
//! - **[`compiler`]** - Turns a route into a [`CompiledRoute`] (static
//!   prefix, matching regex, token list, variable list)
//! - **[`collection`]** - Ordered, named route trees with hierarchical
//!   prefixes and tree-wide name uniqueness
//! - **[`context`]** - Ambient request info (method, host, scheme, ports,
//!   base URL, extra parameters) shared by both directions
//! - **[`matcher`]** - Resolves a decoded path against a collection,
//!   first-match-wins
//! - **[`generator`]** - Builds URLs from route names, collapsing trailing
//!   optional segments and appending query strings
//! - **[`router`]** - Facade bundling one collection, one context, a matcher
//!   and a generator
//!
//! ## Key behaviors
//!
//! 1. **Declaration order is match order**: the matcher walks the tree
//!    depth-first and the first structurally-matching route that accepts the
//!    request method wins, never a "best" match.
//! 2. **Defaults make variables optional**: a trailing run of variables
//!    whose values equal their defaults is omitted when generating and
//!    optional when matching.
//! 3. **Compilation is lazy and cached**: routes compile on first use, the
//!    result is memoized, and mutating a route invalidates its compiled
//!    form.
//! 4. **Both directions share one vocabulary**: requirements constrain what
//!    a variable can match and what values generation accepts for it.
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::HashMap;
//!
//! use serde_json::json;
//! use waymark::{RequestContext, Route, RouteCollection, Router};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut routes = RouteCollection::new();
//!
//! let mut article = Route::new("/articles/{year}/{slug}");
//! article.set_requirement("year", r"\d{4}");
//! routes.add("article_show", article)?;
//!
//! let router = Router::new(routes, RequestContext::default());
//!
//! // Inbound: path to parameters.
//! let params = router.match_path("/articles/2024/rust-routing")?;
//! assert_eq!(params["year"], json!("2024"));
//! assert_eq!(params["slug"], json!("rust-routing"));
//! assert_eq!(params["_route"], json!("article_show"));
//!
//! // Outbound: name and parameters to URL.
//! let url = router.generate(
//!     "article_show",
//!     &HashMap::from([
//!         ("year".to_string(), json!("2025")),
//!         ("slug".to_string(), json!("hello")),
//!     ]),
//!     false,
//! )?;
//! assert_eq!(url, "/articles/2025/hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! A [`RouteCollection`] is meant to be built once and then frozen behind an
//! [`Arc`](std::sync::Arc); matching and generation are read-only over it
//! and safe to call from any number of threads. The only mutable shared
//! state is a pair of memoization caches (compiled routes, requirement
//! validators) backed by concurrent maps; a racing first use at worst
//! compiles the same pattern twice with identical results.
//!
//! No logging subscriber is installed by the library. All diagnostics go
//! through [`tracing`] and show up once the application installs its own
//! subscriber.

pub mod collection;
pub mod compiler;
pub mod context;
pub mod generator;
pub mod matcher;
pub mod route;
pub mod router;

pub use collection::{CollectionEntry, RegistrationError, RouteCollection};
pub use compiler::{CompileError, CompiledRoute, RouteCompiler, StandardRouteCompiler, Token};
pub use context::RequestContext;
pub use generator::{GenerateError, UrlGenerator};
pub use matcher::{MatchError, Params, UrlMatcher};
pub use route::Route;
pub use router::Router;
