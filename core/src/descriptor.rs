//! Declarative description of one logical API call.

use std::collections::BTreeMap;

use crate::http::HttpMethod;

/// Query parameters attached to a descriptor.
///
/// Iteration order is the map's order; callers must not rely on the order
/// query items appear in a built URL.
pub type Parameters = BTreeMap<String, String>;

/// Immutable value naming an endpoint call before it is resolved against a
/// host and scheme.
///
/// Paths and parameter keys are passed through verbatim; the URL builder
/// only percent-encodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    path: String,
    parameters: Option<Parameters>,
    method: HttpMethod,
}

impl RequestDescriptor {
    pub fn new(path: impl Into<String>, parameters: Option<Parameters>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            parameters,
            method,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, None, HttpMethod::Get)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, None, HttpMethod::Post)
    }

    /// Returns a copy of `self` carrying `parameters`, replacing any present.
    pub fn with_parameters<K, V>(self, parameters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let parameters = parameters
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            parameters: Some(parameters),
            ..self
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }
}
