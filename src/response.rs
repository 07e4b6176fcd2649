//! Outgoing HTTP response type.
//!
//! Build a [`Response`] in your handler and return it. The dispatch layer
//! converts it into the `http::Response` hyper writes to the wire.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::Full;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Content-type values for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Html,        // text/html; charset=utf-8
    Jpeg,        // image/jpeg
    Json,        // application/json
    OctetStream, // application/octet-stream
    Text,        // text/plain; charset=utf-8
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Html        => "text/html; charset=utf-8",
            Self::Jpeg        => "image/jpeg",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain; charset=utf-8",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK)
///
/// ```rust
/// use stockroom::Response;
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::html("<form></form>");
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use http::StatusCode;
/// use stockroom::{ContentType, Response};
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .json(br#"{"id":42}"#.to_vec());
///
/// Response::builder()
///     .status(StatusCode::OK)
///     .bytes(ContentType::Jpeg, vec![0xff, 0xd8]);
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Bytes,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK` — `application/json`.
    ///
    /// Pass bytes from your serializer directly: `serde_json::to_vec(&val)?`.
    pub fn json(body: Vec<u8>) -> Self {
        Self::bytes_raw(ContentType::Json, body)
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::bytes_raw(ContentType::Text, body.into().into_bytes())
    }

    /// `200 OK` — `text/html; charset=utf-8`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::bytes_raw(ContentType::Html, body.into().into_bytes())
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    fn bytes_raw(content_type: ContentType, body: Vec<u8>) -> Self {
        Self {
            body: body.into(),
            headers: vec![("content-type".to_owned(), content_type.as_str().to_owned())],
            status: StatusCode::OK,
        }
    }

    /// Lowers into the `http::Response` hyper serves.
    ///
    /// Header pairs that fail `http` validation are skipped rather than
    /// turned into a connection error; handlers only set well-known names.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut response = http::Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) =
                (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str()))
            {
                response.headers_mut().append(name, value);
            }
        }
        response
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by a
/// typed body method, so you always know what you are sending.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        self.finish(ContentType::Json, body)
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish(ContentType::Text, body.into().into_bytes())
    }

    /// Terminate with a typed body — HTML, JPEG, binary.
    pub fn bytes(self, content_type: ContentType, body: Vec<u8>) -> Response {
        self.finish(content_type, body)
    }

    fn finish(self, content_type: ContentType, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.as_str().to_owned())];
        headers.extend(self.headers);
        Response { body: body.into(), headers, status: self.status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_set_content_type() {
        let res = Response::json(b"{}".to_vec());
        assert_eq!(res.headers[0].1, "application/json");

        let res = Response::html("<p>hi</p>");
        assert_eq!(res.headers[0].1, "text/html; charset=utf-8");
        assert_eq!(res.status, StatusCode::OK);
    }

    #[test]
    fn builder_carries_status_and_extra_headers() {
        let res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/inventory/3")
            .json(b"{}".to_vec());
        assert_eq!(res.status, StatusCode::CREATED);

        let inner = res.into_inner();
        assert_eq!(inner.status(), StatusCode::CREATED);
        assert_eq!(inner.headers()["location"], "/inventory/3");
        assert_eq!(inner.headers()["content-type"], "application/json");
    }
}
