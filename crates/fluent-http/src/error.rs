//! HTTP error types

use thiserror::Error;

/// Boxed cause carried by connection-level failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building, sending or reading a request
///
/// HTTP error statuses (4xx/5xx) are not errors unless the request opted in
/// with [`with_http_errors`](crate::PendingRequest::with_http_errors).
#[derive(Debug, Error)]
pub enum HttpError {
    /// The transport failed before an HTTP exchange completed
    /// (connection refused, DNS failure, reset, redirect loop)
    #[error("Request handling error: {message}")]
    RequestHandling {
        /// Error message
        message: String,
        /// Underlying transport error
        #[source]
        source: BoxError,
    },
    /// HTTP error with status code, only raised when `http_errors` is enabled
    #[error("HTTP error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },
    /// Request timeout
    #[error("Request timeout")]
    Timeout,
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Proxy error
    #[error("Proxy error: {0}")]
    Proxy(String),
    /// Request or client build error
    #[error("Build error: {0}")]
    Build(String),
    /// The request URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl HttpError {
    /// Wrap a transport failure as [`HttpError::RequestHandling`]
    pub fn request_handling<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HttpError::RequestHandling {
            message: err.to_string(),
            source: Box::new(err),
        }
    }

    /// True for connection-level failures
    pub fn is_connection(&self) -> bool {
        matches!(self, HttpError::RequestHandling { .. })
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpError::Timeout
        } else if err.is_builder() {
            HttpError::Build(err.to_string())
        } else if err.is_decode() {
            HttpError::Serialization(err.to_string())
        } else if err.is_connect() || err.is_redirect() || err.is_request() {
            HttpError::request_handling(err)
        } else {
            HttpError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}

impl From<serde_urlencoded::ser::Error> for HttpError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        HttpError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for HttpError {
    fn from(err: url::ParseError) -> Self {
        HttpError::InvalidUrl(err.to_string())
    }
}
