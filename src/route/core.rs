use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::compiler::{CompileError, CompiledRoute, RouteCompiler, StandardRouteCompiler};

/// One routable endpoint: a pattern plus the metadata that shapes its
/// compilation.
///
/// - `defaults` assign values to variables; a variable with a default is
///   optional when it sits in the trailing run of the pattern.
/// - `requirements` constrain variable values with regexes (anchors are
///   stripped on the way in; the compiler anchors the whole pattern itself).
///   The reserved names `_method` and `_scheme` constrain matching and
///   generation rather than a pattern variable.
/// - `options` carry free-form metadata that the engine itself never
///   interprets.
///
/// The compiled form is produced lazily by the injected [`RouteCompiler`]
/// strategy and memoized. Every mutating setter drops the memo.
pub struct Route {
    pattern: String,
    defaults: HashMap<String, Value>,
    requirements: HashMap<String, String>,
    options: HashMap<String, Value>,
    compiler: Arc<dyn RouteCompiler>,
    compiled: OnceCell<Arc<CompiledRoute>>,
}

impl Route {
    /// Create a route with the standard compiler.
    ///
    /// The pattern is normalized to start with `/`.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        Self::with_compiler(pattern, Arc::new(StandardRouteCompiler))
    }

    /// Create a route with an explicit compiler strategy.
    #[must_use]
    pub fn with_compiler(pattern: &str, compiler: Arc<dyn RouteCompiler>) -> Self {
        let mut route = Self {
            pattern: String::new(),
            defaults: HashMap::new(),
            requirements: HashMap::new(),
            options: HashMap::new(),
            compiler,
            compiled: OnceCell::new(),
        };
        route.set_pattern(pattern);
        route
    }

    /// The route pattern, always starting with `/`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replace the pattern.
    ///
    /// Surrounding whitespace is trimmed and a leading `/` is ensured, so an
    /// empty pattern becomes `/`.
    pub fn set_pattern(&mut self, pattern: &str) -> &mut Self {
        let trimmed = pattern.trim();
        self.pattern = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        self.invalidate();
        self
    }

    /// All default values.
    #[must_use]
    pub fn defaults(&self) -> &HashMap<String, Value> {
        &self.defaults
    }

    /// Replace all default values.
    pub fn set_defaults(&mut self, defaults: HashMap<String, Value>) -> &mut Self {
        self.defaults = defaults;
        self.invalidate();
        self
    }

    /// Set one default value.
    pub fn set_default(&mut self, name: &str, value: Value) -> &mut Self {
        self.defaults.insert(name.to_string(), value);
        self.invalidate();
        self
    }

    /// Look up one default value.
    #[must_use]
    pub fn default(&self, name: &str) -> Option<&Value> {
        self.defaults.get(name)
    }

    /// Whether a default exists for `name`.
    #[must_use]
    pub fn has_default(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// All requirement regexes.
    #[must_use]
    pub fn requirements(&self) -> &HashMap<String, String> {
        &self.requirements
    }

    /// Replace all requirements. Each value is sanitized like
    /// [`set_requirement`](Self::set_requirement).
    pub fn set_requirements(&mut self, requirements: HashMap<String, String>) -> &mut Self {
        self.requirements = requirements
            .into_iter()
            .map(|(name, regex)| (name, sanitize_requirement(&regex)))
            .collect();
        self.invalidate();
        self
    }

    /// Set one requirement regex.
    ///
    /// A leading `^` and a trailing `$` are stripped: the compiler embeds the
    /// requirement into an already-anchored pattern regex.
    pub fn set_requirement(&mut self, name: &str, regex: &str) -> &mut Self {
        self.requirements
            .insert(name.to_string(), sanitize_requirement(regex));
        self.invalidate();
        self
    }

    /// Look up one requirement regex.
    #[must_use]
    pub fn requirement(&self, name: &str) -> Option<&str> {
        self.requirements.get(name).map(String::as_str)
    }

    /// All options.
    #[must_use]
    pub fn options(&self) -> &HashMap<String, Value> {
        &self.options
    }

    /// Replace all options.
    pub fn set_options(&mut self, options: HashMap<String, Value>) -> &mut Self {
        self.options = options;
        self.invalidate();
        self
    }

    /// Set one option.
    pub fn set_option(&mut self, name: &str, value: Value) -> &mut Self {
        self.options.insert(name.to_string(), value);
        self.invalidate();
        self
    }

    /// Look up one option.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Replace the compiler strategy.
    pub fn set_compiler(&mut self, compiler: Arc<dyn RouteCompiler>) -> &mut Self {
        self.compiler = compiler;
        self.invalidate();
        self
    }

    /// Compile this route, memoizing the result.
    ///
    /// Safe to call from concurrent readers: a racing first compile runs the
    /// pure compiler twice at worst, and every caller observes the same
    /// stored value.
    ///
    /// # Errors
    ///
    /// Propagates the compiler's [`CompileError`]; nothing is memoized on
    /// failure, so a later call after fixing the definition succeeds.
    pub fn compile(&self) -> Result<Arc<CompiledRoute>, CompileError> {
        let compiled = self
            .compiled
            .get_or_try_init(|| self.compiler.compile(self).map(Arc::new))?;
        Ok(Arc::clone(compiled))
    }

    fn invalidate(&mut self) {
        self.compiled = OnceCell::new();
    }
}

/// Strip a single leading `^` and trailing `$`.
fn sanitize_requirement(regex: &str) -> String {
    let regex = regex.strip_prefix('^').unwrap_or(regex);
    let regex = regex.strip_suffix('$').unwrap_or(regex);
    regex.to_string()
}

impl Clone for Route {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            defaults: self.defaults.clone(),
            requirements: self.requirements.clone(),
            options: self.options.clone(),
            compiler: Arc::clone(&self.compiler),
            // A clone starts uncompiled.
            compiled: OnceCell::new(),
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("defaults", &self.defaults)
            .field("requirements", &self.requirements)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
