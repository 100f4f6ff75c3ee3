//! # Route Module
//!
//! A [`Route`] describes one routable endpoint: its pattern (`/user/{id}`),
//! default values for optional variables, per-variable requirement regexes,
//! and free-form options. Routes are built once during registration, then
//! compiled on demand into their matching form.
//!
//! Compilation is memoized per route and invalidated by every mutating
//! setter, so a compiled form can never go stale. Cloning a route resets the
//! memo: the clone starts uncompiled.

mod core;
#[cfg(test)]
mod tests;

pub use core::Route;
