//! HTTP response types

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::cookies::CookieJar;
use crate::error::HttpError;
use crate::transport::TransportResponse;

/// Result alias used across the crate
pub type Result<T, E = HttpError> = std::result::Result<T, E>;

/// Metadata about a finished exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferStats {
    effective_uri: Url,
    transfer_time: Duration,
}

impl TransferStats {
    /// Final URI after redirects
    pub fn effective_uri(&self) -> &Url {
        &self.effective_uri
    }

    /// Wall time of the exchange, body download included
    pub fn transfer_time(&self) -> Duration {
        self.transfer_time
    }
}

/// Method and URL a response answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    method: Method,
    url: Url,
}

impl RequestSummary {
    pub(crate) fn new(method: Method, url: Url) -> Self {
        Self { method, url }
    }

    /// Request method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Requested URL, query string included
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Buffered HTTP response
///
/// Error statuses are ordinary responses; inspect
/// [`is_client_error`](Response::is_client_error) and
/// [`is_server_error`](Response::is_server_error).
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
    json: OnceLock<Value>,
    cookies: CookieJar,
    stats: TransferStats,
    request: RequestSummary,
}

impl Response {
    pub(crate) fn new(raw: TransportResponse, request: RequestSummary) -> Self {
        Self {
            status: raw.status,
            headers: raw.headers,
            body: raw.body,
            json: OnceLock::new(),
            cookies: raw.cookies,
            stats: TransferStats {
                effective_uri: raw.effective_uri,
                transfer_time: raw.transfer_time,
            },
            request,
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Canonical reason phrase, `"Unknown"` for non-standard codes
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("Unknown")
    }

    /// Body as text, invalid UTF-8 replaced
    pub fn body(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body parsed as JSON.
    ///
    /// Parsed on the first successful call and cached afterwards. A body that
    /// is not valid JSON is an [`HttpError::Serialization`]; failures are not
    /// cached.
    pub fn json(&self) -> Result<&Value> {
        if let Some(value) = self.json.get() {
            return Ok(value);
        }
        let parsed: Value = serde_json::from_slice(&self.body)?;
        Ok(self.json.get_or_init(|| parsed))
    }

    /// Body deserialized into `T`
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(HttpError::from)
    }

    /// First value of header `name`, or `""` when absent
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
    }

    /// One value per header name, the first one received.
    ///
    /// Names are lower-case, so `Set-Cookie` is found under `"set-cookie"`.
    /// Repeated headers such as `set-cookie` lose all but their first value;
    /// use [`header_map`](Response::header_map) for those.
    ///
    /// ```no_run
    /// # async fn run() -> fluent_http::Result<()> {
    /// use fluent_http::Http;
    ///
    /// let response = Http::get("https://example.com/login").await?;
    /// let first = response.headers().get("set-cookie").cloned();
    /// let every: Vec<_> = response.header_map().get_all("set-cookie").iter().collect();
    /// # let _ = (first, every);
    /// # Ok(())
    /// # }
    /// ```
    pub fn headers(&self) -> BTreeMap<String, String> {
        self.headers
            .keys()
            .map(|name| (name.as_str().to_string(), self.header(name.as_str()).to_string()))
            .collect()
    }

    /// Full multi-valued header map
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Final URI reached after redirects
    pub fn effective_uri(&self) -> &Url {
        &self.stats.effective_uri
    }

    /// Transfer statistics of the exchange
    pub fn transfer_stats(&self) -> &TransferStats {
        &self.stats
    }

    /// Cookies captured during the exchange
    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    /// The request this response answers
    pub fn request(&self) -> &RequestSummary {
        &self.request
    }

    /// 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Alias of [`is_success`](Response::is_success)
    pub fn is_ok(&self) -> bool {
        self.is_success()
    }

    /// 3xx
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// 4xx
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx and above
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;
    use serde::Deserialize;

    use super::*;

    fn response(status: u16, body: &str) -> Response {
        response_with_headers(status, body, HeaderMap::new())
    }

    fn response_with_headers(status: u16, body: &str, headers: HeaderMap) -> Response {
        let url = Url::parse("http://example.com/final").expect("Valid URL");
        let raw = TransportResponse {
            status,
            headers,
            body: body.as_bytes().to_vec(),
            effective_uri: url.clone(),
            cookies: CookieJar::default(),
            transfer_time: Duration::from_millis(12),
        };
        Response::new(raw, RequestSummary::new(Method::GET, url))
    }

    #[test]
    fn test_no_content_is_success() {
        let res = response(204, "");
        assert!(res.is_success());
        assert!(res.is_ok());
        assert!(!res.is_redirect());
        assert!(!res.is_client_error());
        assert!(!res.is_server_error());
        assert_eq!(res.reason(), "No Content");
    }

    #[test]
    fn test_status_class_boundaries() {
        assert!(!response(199, "").is_success());
        assert!(response(299, "").is_success());
        assert!(response(300, "").is_redirect());
        assert!(response(399, "").is_redirect());
        assert!(!response(399, "").is_client_error());
        assert!(response(400, "").is_client_error());
        assert!(response(499, "").is_client_error());
        assert!(!response(499, "").is_server_error());
        assert!(response(500, "").is_server_error());
        assert!(response(599, "").is_server_error());
    }

    #[test]
    fn test_unknown_reason() {
        assert_eq!(response(799, "").reason(), "Unknown");
    }

    #[test]
    fn test_json_is_memoized() {
        let res = response(200, r#"{"a": 1}"#);

        let first = res.json().expect("Valid JSON");
        let second = res.json().expect("Valid JSON");

        assert_eq!(first["a"], 1);
        // Same allocation: the body was parsed once
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_invalid_json_fails_loudly() {
        let res = response(200, "<html>");

        match res.json() {
            Err(HttpError::Serialization(_)) => {}
            other => panic!("Expected HttpError::Serialization, got {:?}", other),
        }
        // Failures are not cached
        assert!(res.json().is_err());
    }

    #[test]
    fn test_json_as() {
        #[derive(Deserialize)]
        struct Payload {
            name: String,
        }

        let res = response(200, r#"{"name": "fluent"}"#);
        let payload: Payload = res.json_as().expect("Valid payload");
        assert_eq!(payload.name, "fluent");
    }

    #[test]
    fn test_body_is_lossy_text() {
        let url = Url::parse("http://example.com/").expect("Valid URL");
        let raw = TransportResponse {
            status: 200,
            headers: HeaderMap::new(),
            body: vec![b'o', b'k', 0xff],
            effective_uri: url.clone(),
            cookies: CookieJar::default(),
            transfer_time: Duration::ZERO,
        };
        let res = Response::new(raw, RequestSummary::new(Method::GET, url));
        assert_eq!(res.body(), "ok\u{fffd}");
        assert_eq!(res.bytes(), &[b'o', b'k', 0xff]);
    }

    #[test]
    fn test_header_lookup() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("text/plain"));
        let res = response_with_headers(200, "", headers);

        assert_eq!(res.header("Content-Type"), "text/plain");
        assert_eq!(res.header("x-missing"), "");
    }

    #[test]
    fn test_headers_keep_first_value() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));
        headers.insert("x-request-id", HeaderValue::from_static("42"));
        let res = response_with_headers(200, "", headers);

        let flat = res.headers();
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("set-cookie").map(String::as_str), Some("a=1"));
        assert_eq!(flat.get("Set-Cookie"), None);
        assert_eq!(res.header("Set-Cookie"), "a=1");
        assert_eq!(res.header_map().get_all("set-cookie").iter().count(), 2);
    }

    #[test]
    fn test_transfer_stats() {
        let res = response(200, "");
        assert_eq!(res.effective_uri().as_str(), "http://example.com/final");
        assert_eq!(
            res.transfer_stats().transfer_time(),
            Duration::from_millis(12)
        );
        assert_eq!(res.request().method(), Method::GET);
    }
}
