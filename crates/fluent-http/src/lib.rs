//! Fluent facade HTTP client
//!
//! This crate builds request options (headers, body format, auth, cookies,
//! query parameters) through a chainable builder, hands the transfer to a
//! [`Transport`] (reqwest by default) and wraps the result in a small
//! [`Response`] with status, body, header and JSON accessors.
//!
//! HTTP error statuses are returned as ordinary responses. Only failures
//! before an exchange completes are errors ([`HttpError::RequestHandling`]).
//!
//! # Example
//!
//! ```no_run
//! use fluent_http::{Http, HttpVerbs};
//! use serde_json::json;
//!
//! async fn example() -> fluent_http::Result<()> {
//!     let response = Http::with_bearer_token("secret")
//!         .as_json()
//!         .post("https://api.example.com/items", &json!({"name": "fluent"}))
//!         .await?;
//!
//!     if response.is_success() {
//!         println!("created {}", response.json()?["id"]);
//!     }
//!     Ok(())
//! }
//! ```

mod backends;
mod config;
mod cookies;
mod error;
mod facade;
mod request;
mod response;
mod transport;
mod verbs;

pub use backends::{ReqwestTransport, TransportBuilder};
pub use config::{BasicAuth, BodyFormat, RequestConfig};
pub use cookies::CookieJar;
pub use error::{BoxError, HttpError};
pub use facade::Http;
pub use request::PendingRequest;
pub use reqwest::header;
pub use reqwest::Method;
pub use response::{RequestSummary, Response, Result, TransferStats};
pub use transport::{Transport, TransportResponse};
pub use verbs::HttpVerbs;
