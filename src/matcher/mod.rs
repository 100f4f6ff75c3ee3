//! # Matcher Module
//!
//! The matcher resolves an incoming path against a route tree. The path is
//! percent-decoded once up front, then the tree is walked depth-first in
//! insertion order:
//!
//! - a nested collection is skipped when its prefix is purely literal and
//!   the path does not start with it; otherwise the walk recurses,
//! - a route is skipped cheaply when its static prefix does not lead the
//!   path, then tested against its full regex,
//! - a `_method` requirement (pipe-separated verbs, HEAD treated as GET) can
//!   veto a structural match; the allowed verbs are recorded and the walk
//!   continues.
//!
//! The first route that matches structurally *and* accepts the method wins;
//! matching is declaration-order, not best-match. Exhausting the tree yields
//! [`MatchError::MethodNotAllowed`] when at least one route matched on path
//! alone, otherwise [`MatchError::NotFound`].

mod core;
mod error;

pub use core::{Params, UrlMatcher};
pub use error::MatchError;
