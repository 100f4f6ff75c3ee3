//! # Router Module
//!
//! The router is the convenience facade over the two halves of the engine.
//! It owns the [`RouteCollection`](crate::collection::RouteCollection) behind
//! an [`Arc`](std::sync::Arc) and wires a [`UrlMatcher`](crate::matcher::UrlMatcher)
//! and a [`UrlGenerator`](crate::generator::UrlGenerator) around it, sharing
//! one [`RequestContext`](crate::context::RequestContext) between them.
//!
//! Applications that only match or only generate can use the two types
//! directly; the facade exists for the common case of doing both against the
//! same routes and context.

mod core;
#[cfg(test)]
mod tests;

pub use core::Router;
