use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

/// Maximum number of pattern variables stored inline before heap allocation.
/// Most patterns declare few variables (e.g. `/users/{id}/posts/{post_id}`).
pub const MAX_INLINE_VARIABLES: usize = 8;

/// Stack-allocated variable-name storage for compiled routes.
pub type VariableVec = SmallVec<[String; MAX_INLINE_VARIABLES]>;

/// One element of a compiled pattern.
///
/// `Text` carries a literal run of the pattern. `Variable` carries the
/// separator character that precedes the placeholder in the pattern, the
/// variable name, and the requirement regex its values must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    Text {
        text: String,
    },
    Variable {
        prefix: char,
        name: String,
        requirement: String,
    },
}

/// The precomputed matching and generation form of a route.
///
/// Produced by a [`RouteCompiler`](crate::compiler::RouteCompiler) and cached
/// on the owning route. Carries a snapshot of the route's defaults and
/// requirements so matching and generation never need to reach back into the
/// definition.
///
/// The token list is stored in **reverse declaration order**: generation
/// walks it back-to-front, prepending each rendered token, so that trailing
/// optional variables can be collapsed before anything mandatory is emitted.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pattern: String,
    static_prefix: String,
    regex: Regex,
    tokens: Vec<Token>,
    variables: VariableVec,
    defaults: HashMap<String, Value>,
    requirements: HashMap<String, String>,
}

impl CompiledRoute {
    /// Assemble a compiled route from its parts.
    ///
    /// `tokens` must already be in reverse declaration order and `variables`
    /// in declaration order, as produced by a compiler.
    #[must_use]
    pub fn new(
        pattern: String,
        static_prefix: String,
        regex: Regex,
        tokens: Vec<Token>,
        variables: VariableVec,
        defaults: HashMap<String, Value>,
        requirements: HashMap<String, String>,
    ) -> Self {
        Self {
            pattern,
            static_prefix,
            regex,
            tokens,
            variables,
            defaults,
            requirements,
        }
    }

    /// The pattern this route was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Longest literal prefix before the first variable token.
    ///
    /// Empty when the pattern starts with a variable. The matcher tests this
    /// with a cheap `starts_with` before running the full regex.
    #[must_use]
    pub fn static_prefix(&self) -> &str {
        &self.static_prefix
    }

    /// The anchored whole-path matching regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Token list in reverse declaration order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Variable names in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Snapshot of the route's defaults at compile time.
    #[must_use]
    pub fn defaults(&self) -> &HashMap<String, Value> {
        &self.defaults
    }

    /// Whether the route declares a default for `name`.
    #[must_use]
    pub fn has_default(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// Snapshot of the route's requirements at compile time.
    #[must_use]
    pub fn requirements(&self) -> &HashMap<String, String> {
        &self.requirements
    }

    /// Look up a single requirement, including reserved ones such as
    /// `_method` and `_scheme`.
    #[must_use]
    pub fn requirement(&self, name: &str) -> Option<&str> {
        self.requirements.get(name).map(String::as_str)
    }
}
