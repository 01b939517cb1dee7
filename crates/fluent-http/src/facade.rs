//! Static entry points

use reqwest::Method;
use serde::Serialize;

use crate::config::RequestConfig;
use crate::request::PendingRequest;
use crate::response::{Response, Result};
use crate::verbs::HttpVerbs;

/// Static-style facade over [`PendingRequest`]
///
/// Every call starts a fresh request on the default `reqwest` transport and
/// forwards its arguments unchanged. Nothing is kept between calls.
///
/// ```no_run
/// use fluent_http::{Http, HttpVerbs};
/// use serde_json::json;
///
/// async fn example() -> fluent_http::Result<()> {
///     let response = Http::with_bearer_token("secret")
///         .as_form_params()
///         .post("https://api.example.com/items", &json!({"name": "fluent"}))
///         .await?;
///
///     if response.is_client_error() {
///         eprintln!("rejected: {}", response.body());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Http;

impl Http {
    /// Start an unconfigured request
    pub fn request() -> PendingRequest {
        PendingRequest::new()
    }

    /// See [`PendingRequest::with_token`]
    pub fn with_token(token: impl AsRef<str>, scheme: impl AsRef<str>) -> PendingRequest {
        PendingRequest::new().with_token(token, scheme)
    }

    /// See [`PendingRequest::with_bearer_token`]
    pub fn with_bearer_token(token: impl AsRef<str>) -> PendingRequest {
        PendingRequest::new().with_bearer_token(token)
    }

    /// See [`PendingRequest::with_headers`]
    pub fn with_headers<I, K, V>(headers: I) -> PendingRequest
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        PendingRequest::new().with_headers(headers)
    }

    /// See [`PendingRequest::with_header`]
    pub fn with_header(name: impl AsRef<str>, value: impl AsRef<str>) -> PendingRequest {
        PendingRequest::new().with_header(name, value)
    }

    /// See [`PendingRequest::content_type`]
    pub fn content_type(content_type: impl AsRef<str>) -> PendingRequest {
        PendingRequest::new().content_type(content_type)
    }

    /// See [`PendingRequest::accept`]
    pub fn accept(accept: impl AsRef<str>) -> PendingRequest {
        PendingRequest::new().accept(accept)
    }

    /// See [`PendingRequest::with_basic_auth`]
    pub fn with_basic_auth(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> PendingRequest {
        PendingRequest::new().with_basic_auth(username, password)
    }

    /// See [`PendingRequest::with_cookies`]
    pub fn with_cookies<I, K, V>(cookies: I) -> PendingRequest
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        PendingRequest::new().with_cookies(cookies)
    }

    /// See [`PendingRequest::as_json`]
    pub fn as_json() -> PendingRequest {
        PendingRequest::new().as_json()
    }

    /// See [`PendingRequest::as_form_params`]
    pub fn as_form_params() -> PendingRequest {
        PendingRequest::new().as_form_params()
    }

    /// See [`PendingRequest::as_multipart`]
    pub fn as_multipart() -> PendingRequest {
        PendingRequest::new().as_multipart()
    }

    /// See [`PendingRequest::with_http_errors`]
    pub fn with_http_errors(enabled: bool) -> PendingRequest {
        PendingRequest::new().with_http_errors(enabled)
    }

    /// See [`PendingRequest::with_options`]
    pub fn with_options(options: RequestConfig) -> PendingRequest {
        PendingRequest::new().with_options(options)
    }

    /// GET `url`
    pub async fn get(url: &str) -> Result<Response> {
        PendingRequest::new().get(url).await
    }

    /// GET `url` with extra query parameters
    pub async fn get_with_query<Q>(url: &str, query: &Q) -> Result<Response>
    where
        Q: Serialize + ?Sized + Sync,
    {
        PendingRequest::new().get_with_query(url, query).await
    }

    /// POST a JSON body to `url`
    pub async fn post<B>(url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        PendingRequest::new().post(url, params).await
    }

    /// PUT a JSON body to `url`
    pub async fn put<B>(url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        PendingRequest::new().put(url, params).await
    }

    /// PATCH a JSON body to `url`
    pub async fn patch<B>(url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        PendingRequest::new().patch(url, params).await
    }

    /// DELETE `url`, with a JSON body
    pub async fn delete<B>(url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        PendingRequest::new().delete(url, params).await
    }

    /// See [`PendingRequest::send`]
    pub async fn send(method: Method, url: &str, extra: RequestConfig) -> Result<Response> {
        PendingRequest::new().send(method, url, extra).await
    }
}
