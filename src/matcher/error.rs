use std::fmt;

use crate::compiler::CompileError;

/// Path matching failure.
///
/// `NotFound` and `MethodNotAllowed` are ordinary outcomes that an HTTP
/// layer maps to 404 and 405. `Compile` reports a registration defect in a
/// lazily-compiled route; calling
/// [`RouteCollection::compile_all`](crate::collection::RouteCollection::compile_all)
/// at startup surfaces those before any request is served.
#[derive(Debug, Clone)]
pub enum MatchError {
    /// No route matched the path.
    NotFound,
    /// At least one route matched the path, but none accepted the request
    /// method.
    MethodNotAllowed {
        /// Union of the matching routes' allowed verbs, upper-cased, in
        /// first-seen order with duplicates removed.
        allow: Vec<String>,
    },
    /// A route pattern failed to compile while being tested.
    Compile(CompileError),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NotFound => write!(f, "No route found for the given path."),
            MatchError::MethodNotAllowed { allow } => write!(
                f,
                "No route accepted the request method (Allow: {}).",
                allow.join(", ")
            ),
            MatchError::Compile(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Compile(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CompileError> for MatchError {
    fn from(err: CompileError) -> Self {
        MatchError::Compile(err)
    }
}
