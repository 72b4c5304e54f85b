/*
[INPUT]:  Operation, HTTP verb, resolved path and caller payload
[OUTPUT]: Per-call request description consumed by the request pipeline
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the pipeline needs new per-request options
*/

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::Value;

use crate::http::Operation;

/// A single outgoing call, built fresh per request and dropped once it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    pub operation: Operation,
    pub method: Method,
    pub path: String,
    pub json_body: Option<Value>,
    pub query_params: BTreeMap<String, String>,
    /// Send the body in plaintext and tell the server not to decrypt it.
    pub skip_encryption: bool,
}

impl RequestEnvelope {
    pub fn new(operation: Operation, method: Method, path: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            json_body: None,
            query_params: BTreeMap::new(),
            skip_encryption: false,
        }
    }

    pub fn get(operation: Operation, path: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, path)
    }

    pub fn post(operation: Operation, path: impl Into<String>, body: Value) -> Self {
        Self::new(operation, Method::POST, path).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.json_body = Some(body);
        self
    }

    pub fn with_query(mut self, params: BTreeMap<String, String>) -> Self {
        self.query_params.extend(params);
        self
    }

    pub fn skip_encryption(mut self) -> Self {
        self.skip_encryption = true;
        self
    }

    /// Whether the body goes out wrapped in an encrypted `payload` field.
    pub fn should_encrypt(&self) -> bool {
        self.json_body.is_some() && !self.skip_encryption
    }
}
