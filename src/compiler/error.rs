use std::fmt;

/// Route compilation error
///
/// Returned by `RouteCompiler::compile()` when a pattern cannot be turned
/// into a valid matching expression. Compilation failures are registration
/// defects: they are surfaced to the application builder and never recovered
/// at match or generation time.
#[derive(Debug, Clone)]
pub enum CompileError {
    /// The same variable name appears more than once in a single pattern
    DuplicateVariable {
        /// The offending route pattern
        pattern: String,
        /// The variable name that was repeated
        variable: String,
    },
    /// The assembled expression was rejected by the regex engine
    ///
    /// Usually caused by a malformed per-variable requirement, which is
    /// embedded verbatim into the route regex.
    Regex {
        /// The route pattern being compiled
        pattern: String,
        /// The underlying regex error
        source: regex::Error,
    },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::DuplicateVariable { pattern, variable } => {
                write!(
                    f,
                    "Route pattern \"{}\" cannot reference variable name \"{}\" more than once.",
                    pattern, variable
                )
            }
            CompileError::Regex { pattern, source } => {
                write!(
                    f,
                    "Route pattern \"{}\" does not compile to a valid expression: {}",
                    pattern, source
                )
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Regex { source, .. } => Some(source),
            CompileError::DuplicateVariable { .. } => None,
        }
    }
}
