//! # Collection Module
//!
//! A [`RouteCollection`] is an ordered tree of named routes. Leaves are
//! [`Route`](crate::route::Route)s; interior nodes are nested collections,
//! each carrying the literal prefix that was applied to its subtree.
//!
//! Ordering is significant end to end: the matcher walks entries depth-first
//! in insertion order and the first structural match wins, so registration
//! order is part of an application's routing semantics.
//!
//! Route names are unique across the whole tree. Adding a name removes any
//! pre-existing route of the same name first; attaching a sub-collection
//! removes collisions with the incoming names. Because attaching moves the
//! child by value, mutation is only ever possible on the root of a tree,
//! which is what makes the uniqueness pass global.

mod core;
#[cfg(test)]
mod tests;

pub use core::{CollectionEntry, RegistrationError, RouteCollection};
