use super::{Method, RawResponse, Request, Transport};
use crate::error::{ClientError, Result};

/// Blocking transport backed by `reqwest`.
///
/// Timeouts are left at reqwest's defaults.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<RawResponse> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(|e| {
            if e.is_connect() {
                ClientError::Connection(format!("could not reach {}: {e}", request.url))
            } else {
                ClientError::Request(e)
            }
        })?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_unreachable_host_is_connection_error() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/api/v1/modeldb/experiment/getExperimentById");

        let result = HttpTransport::new().send(&Request::new(Method::Get, url));

        match result {
            Err(ClientError::Connection(message)) => assert!(message.contains("could not reach")),
            other => panic!("expected Connection error, got {other:?}"),
        }
    }
}
