//! Unified error type.
//!
//! Every request either fully succeeds or terminates with a single error
//! status and a human-readable body. There are exactly three client-visible
//! outcomes: `400` for a failed validation, `404` for anything that cannot
//! be found (unknown id, missing photo reference, missing file), and a
//! generic `500` for infrastructure failures, whose details are logged but
//! never echoed to the client.

use http::StatusCode;
use thiserror::Error;

use crate::response::Response;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned by stockroom's fallible operations.
///
/// Handlers return `Err` freely with `?`; the dispatch layer converts the
/// value into its HTTP response. Infrastructure errors (`Io`, `Json`) also
/// surface from `main` when binding the listener or preparing the cache
/// directory fails.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field was missing or empty. Maps to `400`.
    #[error("{0}")]
    Validation(String),

    /// The requested item, photo reference, or file does not exist. Maps to `404`.
    #[error("{0}")]
    NotFound(String),

    /// A `multipart/form-data` body that could not be parsed. Maps to `400`.
    #[error("malformed multipart body: {0}")]
    Multipart(#[from] multer::Error),

    /// Filesystem or network failure. Maps to `500`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A response value failed to serialize. Maps to `500`.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The HTTP status this error terminates the request with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Io(_) | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the error as its plain-text HTTP response.
    ///
    /// Server-side failures get an opaque body; the real error has already
    /// been logged by the dispatch layer.
    pub(crate) fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            "internal server error".to_owned()
        } else {
            self.to_string()
        };
        Response::builder().status(status).text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(Error::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        let io = Error::Io(std::io::Error::other("disk on fire"));
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn server_errors_are_opaque() {
        let res = Error::Io(std::io::Error::other("disk on fire")).into_response();
        assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body.as_ref(), b"internal server error");
    }

    #[test]
    fn client_errors_carry_their_message() {
        let res = Error::NotFound("no item with id 7".into()).into_response();
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body.as_ref(), b"no item with id 7");
    }
}
