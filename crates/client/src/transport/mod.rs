//! HTTP transport.
//!
//! A [`Transport`] performs exactly one round trip per call and reports the
//! raw status and body. Status checking happens one level up, in
//! [`Connection::request`](crate::connection::Connection::request), so every
//! transport gets the same error mapping. There are no retries.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpTransport;

use std::fmt;

use serde_json::Value;

use crate::error::Result;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// Adds query parameters from a JSON object.
    pub fn with_query(mut self, params: &Value) -> Self {
        self.query.extend(query_pairs(params));
        self
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_headers(mut self, headers: &[(String, String)]) -> Self {
        self.headers.extend(headers.iter().cloned());
        self
    }
}

/// Status and body of a completed round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single HTTP round trip.
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw response, whatever its status.
    ///
    /// Fails only when no response was received at all.
    fn send(&self, request: &Request) -> Result<RawResponse>;
}

/// Flattens a JSON object into query pairs.
///
/// Scalars become one pair each, arrays repeat the key per element, and
/// nulls are skipped.
pub fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Value::Object(object) = params {
        for (key, value) in object {
            push_pair(&mut pairs, key, value);
        }
    }
    pairs
}

fn push_pair(pairs: &mut Vec<(String, String)>, key: &str, value: &Value) {
    match value {
        Value::Null => {}
        Value::String(s) => pairs.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for item in items {
                push_pair(pairs, key, item);
            }
        }
        other => pairs.push((key.to_string(), other.to_string())),
    }
}
