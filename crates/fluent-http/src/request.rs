//! Chainable request builder

use reqwest::header::{HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;
use url::{form_urlencoded, Url};

use crate::backends::ReqwestTransport;
use crate::config::{BasicAuth, BodyFormat, RequestConfig};
use crate::error::HttpError;
use crate::response::{RequestSummary, Response, Result};
use crate::transport::Transport;
use crate::verbs::HttpVerbs;

/// A request being configured
///
/// Mutators consume and return the builder. A terminal verb consumes it for
/// good, so a sent request can never be reused.
///
/// Invalid header names or values do not break the chain; the first one is
/// reported as [`HttpError::Build`] when the request is sent.
#[derive(Debug)]
pub struct PendingRequest<T = ReqwestTransport> {
    transport: T,
    config: RequestConfig,
    error: Option<HttpError>,
}

impl PendingRequest<ReqwestTransport> {
    /// Request on the default `reqwest` transport
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::default())
    }
}

impl Default for PendingRequest<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> PendingRequest<T> {
    /// Request on a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            config: RequestConfig::default(),
            error: None,
        }
    }

    /// Options accumulated so far
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Set `Authorization: {scheme} {token}`, replacing any previous value
    pub fn with_token(mut self, token: impl AsRef<str>, scheme: impl AsRef<str>) -> Self {
        let credentials = format!("{} {}", scheme.as_ref(), token.as_ref());
        match HeaderValue::from_str(credentials.trim()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                self.config.headers.insert(AUTHORIZATION, value);
            }
            Err(e) => self.fail(HttpError::Build(format!("Invalid token: {}", e))),
        }
        self
    }

    /// [`with_token`](Self::with_token) with the `Bearer` scheme
    pub fn with_bearer_token(self, token: impl AsRef<str>) -> Self {
        self.with_token(token, "Bearer")
    }

    /// Append headers; repeated names keep every value.
    ///
    /// `Authorization` is the exception: it replaces any earlier credentials,
    /// including one set by [`with_token`](Self::with_token).
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in headers {
            match parse_header(name.as_ref(), value.as_ref()) {
                Ok((name, mut value)) if name == AUTHORIZATION => {
                    value.set_sensitive(true);
                    self.config.headers.insert(name, value);
                }
                Ok((name, value)) => {
                    self.config.headers.append(name, value);
                }
                Err(err) => self.fail(err),
            }
        }
        self
    }

    /// Append a single header
    pub fn with_header(self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.with_headers([(name, value)])
    }

    /// Append a `Content-Type` header
    pub fn content_type(self, content_type: impl AsRef<str>) -> Self {
        self.with_headers([(CONTENT_TYPE.as_str(), content_type.as_ref())])
    }

    /// Append an `Accept` header
    pub fn accept(self, accept: impl AsRef<str>) -> Self {
        self.with_headers([(ACCEPT.as_str(), accept.as_ref())])
    }

    /// Send HTTP Basic credentials
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config.auth = Some(BasicAuth::new(username, password));
        self
    }

    /// Add cookies; a name set twice keeps the last value
    pub fn with_cookies<I, K, V>(mut self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.config.cookies.extend(
            cookies
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    /// Encode bodies as JSON
    pub fn as_json(self) -> Self {
        self.body_format(BodyFormat::Json)
    }

    /// Encode bodies as `application/x-www-form-urlencoded`
    pub fn as_form_params(self) -> Self {
        self.body_format(BodyFormat::Form)
    }

    /// Encode bodies as `multipart/form-data`
    pub fn as_multipart(self) -> Self {
        self.body_format(BodyFormat::Multipart)
    }

    /// Return 4xx/5xx responses as [`HttpError::Status`] instead of `Ok`
    pub fn with_http_errors(mut self, enabled: bool) -> Self {
        self.config.http_errors = Some(enabled);
        self
    }

    /// Merge arbitrary options on top of the current ones
    pub fn with_options(mut self, options: RequestConfig) -> Self {
        self.config = self.config.merge(options);
        self
    }

    /// Send `method url`.
    ///
    /// Options are merged in order: builder state, the query string carried
    /// by `url`, then `extra`. The merged query replaces the one in `url`;
    /// a key without a value (`?flag`) is sent as `flag=`.
    #[instrument(skip_all, fields(method = %method, url = %url))]
    pub async fn send(self, method: Method, url: &str, extra: RequestConfig) -> Result<Response> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let requested = Url::parse(url)?;
        let from_url =
            RequestConfig::with_query(requested.query_pairs().into_owned().collect());
        let mut target = requested.clone();
        target.set_query(None);

        let config = self.config.merge(from_url).merge(extra);
        let http_errors = config.http_errors();

        tracing::debug!(body_format = %config.body_format(), "Sending request");

        let raw = match self.transport.request(method.clone(), target, config).await {
            Ok(raw) => raw,
            Err(err) => {
                if err.is_connection() {
                    tracing::warn!("Http request failed: {}", err);
                }
                return Err(err);
            }
        };

        tracing::debug!(
            status = raw.status,
            transfer_time = ?raw.transfer_time,
            "Received response"
        );

        let response = Response::new(raw, RequestSummary::new(method, requested));
        if http_errors && response.status() >= 400 {
            return Err(HttpError::Status {
                status: response.status(),
                message: response.body().into_owned(),
            });
        }

        Ok(response)
    }

    async fn send_body<B>(self, method: Method, url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        let extra = RequestConfig {
            body_format: Some(self.config.body_format()),
            body: Some(serde_json::to_value(params)?),
            ..Default::default()
        };
        self.send(method, url, extra).await
    }

    fn body_format(mut self, format: BodyFormat) -> Self {
        self.config.body_format = Some(format);
        if let Some(content_type) = format.content_type() {
            self.config
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        self
    }

    fn fail(&mut self, err: HttpError) {
        self.error.get_or_insert(err);
    }
}

impl<T: Transport> HttpVerbs for PendingRequest<T> {
    async fn get(self, url: &str) -> Result<Response> {
        self.send(Method::GET, url, RequestConfig::default()).await
    }

    async fn get_with_query<Q>(self, url: &str, query: &Q) -> Result<Response>
    where
        Q: Serialize + ?Sized + Sync,
    {
        let encoded = serde_urlencoded::to_string(query)?;
        let pairs = form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect();
        self.send(Method::GET, url, RequestConfig::with_query(pairs))
            .await
    }

    async fn post<B>(self, url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send_body(Method::POST, url, params).await
    }

    async fn put<B>(self, url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send_body(Method::PUT, url, params).await
    }

    async fn patch<B>(self, url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send_body(Method::PATCH, url, params).await
    }

    async fn delete<B>(self, url: &str, params: &B) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send_body(Method::DELETE, url, params).await
    }
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| HttpError::Build(format!("Invalid header name '{}': {}", name, e)))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| HttpError::Build(format!("Invalid value for header {}: {}", name, e)))?;
    Ok((header_name, header_value))
}
