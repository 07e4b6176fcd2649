//! Incoming HTTP request type.
//!
//! The dispatch layer collects the whole body before a handler runs, so a
//! handler sees plain bytes plus the matched path parameters. Parsing the
//! bytes (JSON, form-encoded, multipart) is the handler's job.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, header};

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, path, headers, body, params }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The collected request body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Header lookup by name; `None` for absent or non-UTF-8 values.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// The `content-type` header, or `""` when absent.
    pub fn content_type(&self) -> &str {
        self.header(header::CONTENT_TYPE.as_str()).unwrap_or_default()
    }

    /// A named path parameter.
    ///
    /// For a route `/inventory/{id}`, `req.param("id")` on `/inventory/42`
    /// returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
