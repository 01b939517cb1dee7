//! reqwest-based transport

use std::sync::Arc;
use std::time::Instant;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::config::{BodyFormat, RequestConfig};
use crate::cookies::CookieJar;
use crate::error::HttpError;
use crate::response::Result;
use crate::transport::{Transport, TransportResponse};

/// Transport backed by `reqwest`
///
/// Every exchange runs on a freshly built `reqwest::Client` with its own
/// cookie jar, so no state leaks from one request to the next.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    accept_invalid_certs: bool,
    proxy: Option<ProxyConfig>,
    user_agent: Option<String>,
}

#[derive(Debug, Clone)]
struct ProxyConfig {
    url: Url,
    matcher: Option<regex::Regex>,
}

impl ReqwestTransport {
    /// Transport with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new transport builder
    pub fn builder() -> TransportBuilder {
        TransportBuilder::default()
    }

    fn client(&self, jar: Arc<Jar>) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .cookie_provider(jar);

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        if let Some(proxy_config) = &self.proxy {
            let proxy_url = proxy_config.url.to_string();
            let proxy = if let Some(matcher) = proxy_config.matcher.clone() {
                reqwest::Proxy::custom(move |url| {
                    if matcher.is_match(url.host_str().unwrap_or("")) {
                        Some(proxy_url.clone())
                    } else {
                        None
                    }
                })
            } else {
                reqwest::Proxy::all(&proxy_url).map_err(|e| HttpError::Proxy(e.to_string()))?
            };
            builder = builder.proxy(proxy);
        }

        builder.build().map_err(HttpError::from)
    }
}

impl Transport for ReqwestTransport {
    async fn request(
        &self,
        method: Method,
        url: Url,
        config: RequestConfig,
    ) -> Result<TransportResponse> {
        let jar = Arc::new(Jar::default());
        for (name, value) in &config.cookies {
            jar.add_cookie_str(&format!("{}={}; Path=/", name, value), &url);
        }
        let client = self.client(Arc::clone(&jar))?;

        let body_format = config.body_format();
        let mut headers = config.headers;
        let mut request = client.request(method, url);

        if let Some(auth) = config.auth {
            request = request.basic_auth(auth.username, Some(auth.password));
        }
        if !config.query.is_empty() {
            request = request.query(&config.query);
        }

        if let Some(body) = config.body.filter(|body| !body.is_null()) {
            request = match body_format {
                BodyFormat::Json => request.json(&body),
                BodyFormat::Form => {
                    let encoded = serde_urlencoded::to_string(&body)?;
                    if !headers.contains_key(CONTENT_TYPE) {
                        headers.insert(
                            CONTENT_TYPE,
                            HeaderValue::from_static("application/x-www-form-urlencoded"),
                        );
                    }
                    request.body(encoded)
                }
                BodyFormat::Multipart => {
                    // reqwest writes its own boundary header
                    headers.remove(CONTENT_TYPE);
                    request.multipart(multipart_form(body)?)
                }
            };
        }

        let started = Instant::now();
        let response = request.headers(headers).send().await?;
        let status = response.status().as_u16();
        let effective_uri = response.url().clone();
        let headers = response.headers().clone();
        // The exchange is not complete until the body is in
        let body = response
            .bytes()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::request_handling(err)
                }
            })?
            .to_vec();
        let transfer_time = started.elapsed();

        let cookies = CookieJar::from_header(jar.cookies(&effective_uri).as_ref());

        Ok(TransportResponse {
            status,
            headers,
            body,
            effective_uri,
            cookies,
            transfer_time,
        })
    }
}

/// One text part per top-level field; non-string values are JSON-encoded
fn multipart_form(body: Value) -> Result<multipart::Form> {
    let Value::Object(fields) = body else {
        return Err(HttpError::Serialization(
            "multipart body must be an object".to_string(),
        ));
    };

    Ok(fields
        .into_iter()
        .fold(multipart::Form::new(), |form, (name, value)| match value {
            Value::String(text) => form.text(name, text),
            other => form.text(name, other.to_string()),
        }))
}

/// Builder for [`ReqwestTransport`], configuring proxy and TLS settings
#[derive(Debug, Default)]
pub struct TransportBuilder {
    accept_invalid_certs: bool,
    proxy: Option<ProxyConfig>,
    user_agent: Option<String>,
}

impl TransportBuilder {
    /// Accept invalid TLS certificates
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Set a proxy URL
    pub fn proxy(mut self, url: Url) -> Self {
        self.proxy = Some(ProxyConfig { url, matcher: None });
        self
    }

    /// Set a proxy URL used only for hosts matching `pattern`
    pub fn proxy_with_matcher(mut self, url: Url, pattern: &str) -> Result<Self> {
        let matcher = regex::Regex::new(pattern)
            .map_err(|e| HttpError::Proxy(format!("Invalid proxy pattern: {}", e)))?;
        self.proxy = Some(ProxyConfig {
            url,
            matcher: Some(matcher),
        });
        Ok(self)
    }

    /// Set the `User-Agent` sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the transport, validating the settings once up front
    pub fn build(self) -> Result<ReqwestTransport> {
        let transport = ReqwestTransport {
            accept_invalid_certs: self.accept_invalid_certs,
            proxy: self.proxy,
            user_agent: self.user_agent,
        };
        transport.client(Arc::new(Jar::default()))?;
        Ok(transport)
    }
}
