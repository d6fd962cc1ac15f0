//! Connection to the tracking service.
//!
//! A [`Connection`] carries the scheme, host, auth headers and transport.
//! It is passed explicitly to every entity; nothing is global.

pub mod experiments;
pub mod runs;

use std::fmt;
use std::sync::Arc;

use exptrack_core::codec::{self, Message, Strictness};
use serde_json::Value;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::transport::{HttpTransport, Method, RawResponse, Request, Transport};

/// Connection to the tracking service.
#[derive(Clone)]
pub struct Connection {
    scheme: String,
    host: String,
    auth: Vec<(String, String)>,
    strictness: Strictness,
    transport: Arc<dyn Transport>,
}

impl Connection {
    /// Create a connection that talks HTTP with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Create from environment (see [`Config::from_env`]).
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(&Config::from_env()?))
    }

    /// Create a connection over an arbitrary transport.
    pub fn with_transport(config: &Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            scheme: config.scheme.clone(),
            host: config.host.clone(),
            auth: config.auth_headers(),
            strictness: Strictness::default(),
            transport,
        }
    }

    /// Sets how response bodies with unknown fields are treated.
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Headers attached to every request.
    pub fn auth(&self) -> &[(String, String)] {
        &self.auth
    }

    /// Build a URL for an endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}://{}{}", self.scheme, self.host, path)
    }

    /// Performs one round trip and checks its status.
    ///
    /// A 404 becomes [`ClientError::NotFound`] naming `resource`. Any other
    /// status of 400 or above becomes [`ClientError::Remote`].
    pub fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&Value>,
        body: Option<Value>,
        resource: &str,
    ) -> Result<RawResponse> {
        let mut request = Request::new(method, self.url(path)).with_headers(&self.auth);
        if let Some(query) = query {
            request = request.with_query(query);
        }
        if let Some(body) = body {
            request = request.with_body(body);
        }

        tracing::debug!(method = %method, url = %request.url, "Sending request");
        let response = self.transport.send(&request)?;
        tracing::trace!(status = response.status, url = %request.url, "Received response");

        check_status(response, resource)
    }

    /// Sends a typed message: as query parameters for GET, as a JSON body otherwise.
    pub fn send_message<M: Message>(
        &self,
        method: Method,
        path: &str,
        message: &M,
        resource: &str,
    ) -> Result<RawResponse> {
        let payload = Value::Object(codec::encode(message)?);
        match method {
            Method::Get => self.request(method, path, Some(&payload), None, resource),
            _ => self.request(method, path, None, Some(payload), resource),
        }
    }

    /// Decodes a successful response into its expected message.
    pub fn decode<R: Message>(&self, response: &RawResponse) -> Result<R> {
        Ok(codec::decode_str(&response.body, self.strictness)?)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("strictness", &self.strictness)
            .finish_non_exhaustive()
    }
}

/// Maps error statuses onto [`ClientError`].
fn check_status(response: RawResponse, resource: &str) -> Result<RawResponse> {
    if response.is_success() {
        Ok(response)
    } else if response.status == 404 {
        Err(ClientError::NotFound {
            resource: resource.to_string(),
        })
    } else if response.status >= 400 {
        Err(ClientError::Remote {
            status: response.status,
            body: response.body,
        })
    } else {
        Err(ClientError::Remote {
            status: response.status,
            body: format!("unexpected status: {}", response.body),
        })
    }
}

/// The project an entity is created or looked up under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    project_id: String,
}

impl ProjectContext {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }
}
