use std::fmt;

use crate::compiler::CompileError;

/// URL generation failure.
#[derive(Debug, Clone)]
pub enum GenerateError {
    /// No route is registered under the requested name.
    RouteNotFound {
        /// The name that was looked up.
        name: String,
    },
    /// One or more variables without a default were left unvalued.
    MissingParameters {
        /// Name of the route being generated.
        route: String,
        /// The unvalued variable names, in declaration order.
        missing: Vec<String>,
    },
    /// A value was supplied for a variable but does not satisfy its
    /// requirement.
    InvalidParameter {
        /// Name of the route being generated.
        route: String,
        /// The offending variable.
        parameter: String,
        /// The requirement the value was checked against.
        requirement: String,
        /// The stringified value that failed the check.
        value: String,
    },
    /// The route pattern failed to compile.
    Compile(CompileError),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::RouteNotFound { name } => {
                write!(f, "Route \"{name}\" does not exist.")
            }
            GenerateError::MissingParameters { route, missing } => {
                write!(
                    f,
                    "The \"{route}\" route has some missing mandatory parameters (\"{}\").",
                    missing.join("\", \"")
                )
            }
            GenerateError::InvalidParameter {
                route,
                parameter,
                requirement,
                value,
            } => {
                write!(
                    f,
                    "Parameter \"{parameter}\" for route \"{route}\" must match \"{requirement}\" (\"{value}\" given)."
                )
            }
            GenerateError::Compile(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Compile(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CompileError> for GenerateError {
    fn from(err: CompileError) -> Self {
        GenerateError::Compile(err)
    }
}
