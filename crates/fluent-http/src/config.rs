//! Typed request options and their merge rules

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde_json::Value;

/// Encoding used for the outgoing request payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BodyFormat {
    /// `application/json`
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
    /// `multipart/form-data`, boundary chosen by the transport
    Multipart,
}

impl BodyFormat {
    /// Option key for this format
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyFormat::Json => "json",
            BodyFormat::Form => "form_params",
            BodyFormat::Multipart => "multipart",
        }
    }

    /// `Content-Type` set when the format is selected, if any
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            BodyFormat::Json => Some("application/json"),
            BodyFormat::Form => Some("application/x-www-form-urlencoded"),
            BodyFormat::Multipart => None,
        }
    }
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Username/password pair sent as HTTP Basic auth
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl BasicAuth {
    /// Create a new credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Options handed to a [`Transport`](crate::Transport)
///
/// Scalars are `Option`s so that [`merge`](RequestConfig::merge) can tell an
/// unset value from an explicit one.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Request headers, multi-valued
    pub headers: HeaderMap,
    /// Basic auth credentials
    pub auth: Option<BasicAuth>,
    /// Cookies sent with the request
    pub cookies: BTreeMap<String, String>,
    /// Payload encoding, `Json` when unset
    pub body_format: Option<BodyFormat>,
    /// Query string pairs, in order
    pub query: Vec<(String, String)>,
    /// Payload, encoded according to `body_format`
    pub body: Option<Value>,
    /// Turn 4xx/5xx responses into errors, `false` when unset
    pub http_errors: Option<bool>,
}

impl RequestConfig {
    /// Merge `other` on top of `self`.
    ///
    /// - headers: every value of `other` is appended, repeated names accumulate,
    ///   except `Authorization`, which `other` replaces when it has one
    /// - cookies: per name, `other` wins
    /// - query: concatenated, `self` first
    /// - auth, body format, body, http_errors: `other` wins when set
    pub fn merge(mut self, other: RequestConfig) -> Self {
        if other.headers.contains_key(AUTHORIZATION) {
            self.headers.remove(AUTHORIZATION);
        }
        for (name, value) in other.headers.iter() {
            self.headers.append(name.clone(), value.clone());
        }
        self.cookies.extend(other.cookies);
        self.query.extend(other.query);
        self.auth = other.auth.or(self.auth);
        self.body_format = other.body_format.or(self.body_format);
        self.body = other.body.or(self.body);
        self.http_errors = other.http_errors.or(self.http_errors);
        self
    }

    /// Effective body format
    pub fn body_format(&self) -> BodyFormat {
        self.body_format.unwrap_or_default()
    }

    /// Effective `http_errors` flag
    pub fn http_errors(&self) -> bool {
        self.http_errors.unwrap_or(false)
    }

    /// Options carrying only a query string
    pub fn with_query(query: Vec<(String, String)>) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }
}
