//! Scripted transport for unit tests.
//!
//! Responses are served in the order they were pushed, and every request is
//! recorded so tests can assert on payloads and call counts.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use super::{RawResponse, Request, Transport};
use crate::error::{ClientError, Result};

#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with a JSON body.
    pub fn push_json(&self, status: u16, body: Value) {
        self.push(status, body.to_string());
    }

    /// Queues a response with a raw body.
    pub fn push(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Request {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &Request) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Connection(format!("no scripted response for {}", request.url)))
    }
}
