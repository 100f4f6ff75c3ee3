//! # Generator Module
//!
//! The generator turns a route name and a parameter map back into a URL.
//! Values are gathered from three layers, nearest first: caller-supplied
//! parameters, ambient [`RequestContext`](crate::context::RequestContext)
//! parameters, then the route's own defaults. Every variable must be covered
//! by one of the layers or generation fails up front.
//!
//! The compiled token list is stored last-token-first, so the path is built
//! back to front. That ordering is what lets trailing variables collapse:
//! while only optional tokens have been seen, a variable whose value equals
//! its default contributes nothing. The first rendered token switches the
//! walk to mandatory mode and everything closer to the front renders too.
//!
//! Rendered values are checked against their requirement and percent-encoded
//! with `/` kept literal. Leftover caller parameters that are neither
//! variables nor defaults are appended as a query string with keys sorted for
//! deterministic output.

mod core;
mod error;

pub use core::UrlGenerator;
pub use error::GenerateError;
