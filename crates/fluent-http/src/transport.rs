//! The delegated transport seam

use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

use crate::config::RequestConfig;
use crate::cookies::CookieJar;
use crate::error::HttpError;

/// Everything a transport reports back about one exchange
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Vec<u8>,
    /// Final URI after redirects
    pub effective_uri: Url,
    /// Cookies held for `effective_uri` after the exchange
    pub cookies: CookieJar,
    /// Wall time of the exchange, body download included
    pub transfer_time: Duration,
}

/// Performs the network call for a [`PendingRequest`](crate::PendingRequest)
///
/// Implementations must honour every field of [`RequestConfig`] except
/// `http_errors`, which the request builder enforces itself. Connection-level
/// failures must be reported as [`HttpError::RequestHandling`].
pub trait Transport: Send + Sync {
    /// Send `method url` with `config` applied
    fn request(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> impl Future<Output = Result<TransportResponse, HttpError>> + Send;
}

impl<T: Transport> Transport for &T {
    fn request(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> impl Future<Output = Result<TransportResponse, HttpError>> + Send {
        (**self).request(method, url, config)
    }
}
