//! Ambient request information shared by matching and generation.
//!
//! One [`RequestContext`] exists per incoming request. The matcher consults
//! its method for `_method` requirements; the generator consults its base
//! URL, host, scheme and ports to build absolute URLs, and merges its
//! parameters under caller-supplied ones. Setters allow adapting a cloned
//! context mid-request, e.g. for sub-requests.

use std::collections::HashMap;

use http::Method;
use serde_json::Value;

/// Ambient per-request values consumed by the matcher and the generator.
#[derive(Debug, Clone)]
pub struct RequestContext {
    base_url: String,
    method: Method,
    host: String,
    scheme: String,
    http_port: u16,
    https_port: u16,
    parameters: HashMap<String, Value>,
}

impl Default for RequestContext {
    /// A plain `GET http://localhost` context with standard ports.
    fn default() -> Self {
        Self {
            base_url: String::new(),
            method: Method::GET,
            host: "localhost".to_string(),
            scheme: "http".to_string(),
            http_port: 80,
            https_port: 443,
            parameters: HashMap::new(),
        }
    }
}

impl RequestContext {
    /// Create a context with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The base URL prepended to every generated path (e.g. `/app.php`).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: &str) -> &mut Self {
        self.base_url = base_url.to_string();
        self
    }

    /// The HTTP method of the current request.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    /// The host name, without scheme or port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: &str) -> &mut Self {
        self.host = host.to_string();
        self
    }

    /// The URL scheme, normalized to lower case.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn set_scheme(&mut self, scheme: &str) -> &mut Self {
        self.scheme = scheme.to_lowercase();
        self
    }

    /// Port used for absolute `http` URLs; omitted from them when 80.
    #[must_use]
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    pub fn set_http_port(&mut self, port: u16) -> &mut Self {
        self.http_port = port;
        self
    }

    /// Port used for absolute `https` URLs; omitted from them when 443.
    #[must_use]
    pub fn https_port(&self) -> u16 {
        self.https_port
    }

    pub fn set_https_port(&mut self, port: u16) -> &mut Self {
        self.https_port = port;
        self
    }

    /// Ambient parameters merged under caller parameters on every
    /// generation call.
    #[must_use]
    pub fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: HashMap<String, Value>) -> &mut Self {
        self.parameters = parameters;
        self
    }

    /// Look up one ambient parameter.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Whether an ambient parameter exists for `name`.
    #[must_use]
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn set_parameter(&mut self, name: &str, value: Value) -> &mut Self {
        self.parameters.insert(name.to_string(), value);
        self
    }

    /// Whether the context scheme is `https`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.scheme == "https"
    }
}
