use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use dashmap::DashMap;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::collection::RouteCollection;
use crate::compiler::{CompileError, CompiledRoute, Token};
use crate::context::RequestContext;

use super::error::GenerateError;

/// Generates URLs from named routes.
///
/// The generator shares the [`RouteCollection`] behind an [`Arc`] with
/// whatever else serves requests and keeps two concurrency-safe caches: the
/// compiled form of each route it has generated from, keyed by name, and the
/// anchored validation regex for each requirement it has checked. Both are
/// idempotent memoizations, so a racing first use at worst compiles the same
/// thing twice.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    routes: Arc<RouteCollection>,
    context: RequestContext,
    compiled: DashMap<String, Arc<CompiledRoute>>,
    validators: DashMap<String, Regex>,
}

impl UrlGenerator {
    #[must_use]
    pub fn new(routes: Arc<RouteCollection>, context: RequestContext) -> Self {
        Self {
            routes,
            context,
            compiled: DashMap::new(),
            validators: DashMap::new(),
        }
    }

    /// Request context supplying ambient parameters, the base URL and the
    /// scheme/host/port triple for absolute URLs.
    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn set_context(&mut self, context: RequestContext) {
        self.context = context;
    }

    /// Generates a URL for the route registered under `name`.
    ///
    /// Variables are valued from `parameters` first, then from the context's
    /// ambient parameters, then from the route's defaults. Caller parameters
    /// that are neither variables nor defaults end up in the query string.
    /// With `absolute` set, or when the route carries a `_scheme` requirement
    /// differing from the context scheme, the result is prefixed with
    /// `scheme://host[:port]` as long as the context has a host.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::RouteNotFound`] for an unknown name,
    /// [`GenerateError::MissingParameters`] when a variable without a
    /// default is left unvalued, [`GenerateError::InvalidParameter`] when a
    /// value fails its requirement, and [`GenerateError::Compile`] when the
    /// route pattern itself is invalid.
    pub fn generate(
        &self,
        name: &str,
        parameters: &HashMap<String, Value>,
        absolute: bool,
    ) -> Result<String, GenerateError> {
        let compiled = self.compiled_route(name)?;
        self.do_generate(&compiled, name, parameters, absolute)
    }

    fn compiled_route(&self, name: &str) -> Result<Arc<CompiledRoute>, GenerateError> {
        if let Some(compiled) = self.compiled.get(name) {
            return Ok(Arc::clone(&compiled));
        }

        let route = self
            .routes
            .get(name)
            .ok_or_else(|| GenerateError::RouteNotFound {
                name: name.to_string(),
            })?;
        let compiled = route.compile()?;
        self.compiled.insert(name.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }

    fn do_generate(
        &self,
        compiled: &CompiledRoute,
        name: &str,
        parameters: &HashMap<String, Value>,
        absolute: bool,
    ) -> Result<String, GenerateError> {
        // Ambient context parameters seed the working set, caller values win.
        let mut merged: HashMap<String, Value> = self.context.parameters().clone();
        merged.extend(
            parameters
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        // Route defaults fill whatever the caller and context left out.
        let mut candidates: HashMap<String, Value> = compiled.defaults().clone();
        candidates.extend(
            merged
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        let missing: Vec<String> = compiled
            .variables()
            .iter()
            .filter(|variable| !candidates.contains_key(*variable))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(GenerateError::MissingParameters {
                route: name.to_string(),
                missing,
            });
        }

        let mut url = String::new();
        let mut optional = true;

        // Tokens are stored last-first, so the path is assembled back to
        // front and trailing defaults can collapse.
        for token in compiled.tokens() {
            match token {
                Token::Text { text } => {
                    url.insert_str(0, text);
                    optional = false;
                }
                Token::Variable {
                    prefix,
                    name: variable,
                    requirement,
                } => {
                    let differs_from_default =
                        match (merged.get(variable), compiled.defaults().get(variable)) {
                            (Some(value), Some(default)) if !value.is_null() => {
                                value_to_string(value) != value_to_string(default)
                            }
                            _ => false,
                        };

                    if !optional || !compiled.has_default(variable) || differs_from_default {
                        let value = candidates.get(variable).unwrap_or(&Value::Null);
                        let text = value_to_string(value);
                        let is_empty = is_empty_value(value);

                        if !is_empty && !self.is_valid(requirement, &text)? {
                            return Err(GenerateError::InvalidParameter {
                                route: name.to_string(),
                                parameter: variable.clone(),
                                requirement: requirement.clone(),
                                value: text,
                            });
                        }

                        if !is_empty || !optional {
                            url.insert_str(0, &encode_path_value(&text));
                            url.insert(0, *prefix);
                        }

                        optional = false;
                    }
                }
            }
        }

        if url.is_empty() {
            url.push('/');
        }

        // Caller parameters that are neither variables nor defaults become
        // the query string. Keys are sorted so output is deterministic.
        let extra: BTreeMap<&str, &Value> = parameters
            .iter()
            .filter(|(key, _)| {
                !compiled.variables().iter().any(|variable| variable == *key)
                    && !compiled.defaults().contains_key(*key)
            })
            .map(|(key, value)| (key.as_str(), value))
            .collect();
        if !extra.is_empty() {
            let mut query = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in extra {
                query.append_pair(key, &value_to_string(value));
            }
            url.push('?');
            url.push_str(&query.finish());
        }

        url.insert_str(0, self.context.base_url());

        let host = self.context.host();
        if !host.is_empty() {
            let mut scheme = self.context.scheme().to_string();
            let mut absolute = absolute;

            if let Some(required) = compiled.requirement("_scheme") {
                let required = required.to_lowercase();
                if !required.is_empty() && scheme != required {
                    absolute = true;
                    scheme = required;
                }
            }

            if absolute {
                let port = match scheme.as_str() {
                    "http" if self.context.http_port() != 80 => {
                        format!(":{}", self.context.http_port())
                    }
                    "https" if self.context.https_port() != 443 => {
                        format!(":{}", self.context.https_port())
                    }
                    _ => String::new(),
                };
                url = format!("{scheme}://{host}{port}{url}");
            }
        }

        debug!(route = %name, url = %url, "URL generated");
        Ok(url)
    }

    #[cfg(test)]
    pub(super) fn cached_route_count(&self) -> usize {
        self.compiled.len()
    }

    /// Full-match check of `value` against a requirement, through the
    /// validator cache. The requirement is wrapped in a non-capturing group
    /// so alternations anchor as a whole.
    fn is_valid(&self, requirement: &str, value: &str) -> Result<bool, GenerateError> {
        if let Some(regex) = self.validators.get(requirement) {
            return Ok(regex.is_match(value));
        }

        let regex = Regex::new(&format!("^(?:{requirement})$")).map_err(|source| {
            GenerateError::Compile(CompileError::Regex {
                pattern: requirement.to_string(),
                source,
            })
        })?;
        let matched = regex.is_match(value);
        self.validators.insert(requirement.to_string(), regex);
        Ok(matched)
    }
}

/// Stringifies a parameter value for URL use: strings pass through, null and
/// false render empty, true renders as `1`, numbers as their decimal form
/// and structured values as their JSON text.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Strict empty check used when collapsing optional segments: only null,
/// false and the empty string count.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Percent-encodes a path value, keeping `/` literal so hierarchical values
/// stay hierarchical.
fn encode_path_value(value: &str) -> String {
    urlencoding::encode(value).replace("%2F", "/")
}
