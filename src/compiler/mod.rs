//! # Compiler Module
//!
//! The compiler module turns route patterns into their precomputed matching
//! form. A pattern such as `/blog/{slug}` becomes a [`CompiledRoute`] holding:
//!
//! - an anchored regex with one named capture group per `{variable}`,
//! - the pattern's token list (literal runs and variables), stored in
//!   reverse declaration order because URL generation consumes it
//!   back-to-front to collapse trailing optional variables,
//! - the longest literal prefix before the first variable, used by the
//!   matcher to reject candidate routes without running the regex,
//! - the ordered list of variable names.
//!
//! ## Compilation rules
//!
//! A variable with a declared requirement uses that regex verbatim. A variable
//! without one matches any run of characters that avoids its surrounding
//! separators (the character before the placeholder, plus the one after it
//! unless the placeholder ends the pattern), lazily: `/a/{x}.html` synthesizes
//! `[^/\.]+?` for `x`.
//!
//! Trailing variables that all carry defaults compile into nested optional
//! groups, so `/archive/{year}/{month}` with a `month` default matches both
//! `/archive/2024` and `/archive/2024/02`.
//!
//! Compilation is pure: compiling the same definition twice yields
//! byte-identical regexes and token lists.

mod compiled;
mod core;
mod error;

pub use compiled::{CompiledRoute, Token, VariableVec, MAX_INLINE_VARIABLES};
pub use core::{RouteCompiler, StandardRouteCompiler};
pub use error::CompileError;
