//! # exw-client
//!
//! Typed REST client for the Exitwise backend.
//!
//! Every request carries `Authorization: Bearer <token>` taken from the
//! active [`AuthProvider`]. A 401 from the backend clears the provider's
//! session and surfaces as [`ApiError::Unauthorized`].
//!
//! Resources live in their own modules, each adding an `impl ApiClient`
//! block:
//! - [`valuation`]: industries, quick and advanced valuations, history
//! - [`assessment`]: questions, the current assessment, responses, tasks
//! - [`business`]: the business profile
//! - [`wealth_gap`]: saved wealth gap and server-side calculation
//! - [`quiz`]: exit strategy quiz
//!
//! [`debounce::Debouncer`] coalesces bursts of edits into a single call.

pub mod assessment;
pub mod business;
pub mod debounce;
pub mod error;
pub mod http;
pub mod quiz;
pub mod valuation;
pub mod wealth_gap;

use std::sync::Arc;

use exw_auth::AuthProvider;
use exw_config::ApiConfig;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use debounce::Debouncer;
pub use error::ApiError;

/// Authenticated client for the Exitwise REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<dyn AuthProvider>,
}

impl ApiClient {
    /// Create a client for the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig, auth: Arc<dyn AuthProvider>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("exw/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base().to_string(),
            auth,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthProvider> {
        &self.auth
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send an authenticated request and check its status.
    ///
    /// On 401 the provider's session is invalidated before returning
    /// [`ApiError::Unauthorized`].
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let token = self.auth.token()?;
        let resp = request.bearer_auth(token).send().await?;
        match http::check_response(resp).await {
            Err(ApiError::Unauthorized) => {
                self.auth.invalidate();
                Err(ApiError::Unauthorized)
            }
            other => other,
        }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");
        let mut builder = self.http.request(method, &url);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let resp = self.send(builder).await?;
        let text = resp.text().await?;
        parse_body(&text)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(to_body(body)?)).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(to_body(body)?)).await
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Parse(e.to_string()))
}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let body = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Ack {
        message: String,
    }

    #[test]
    fn parse_body_reports_shape_errors() {
        let ack: Ack = parse_body(r#"{"message": "ok"}"#).unwrap();
        assert_eq!(ack.message, "ok");
        assert!(matches!(parse_body::<Ack>("[]"), Err(ApiError::Parse(_))));
    }

    #[test]
    fn empty_body_parses_as_null() {
        let value: Option<Ack> = parse_body("").unwrap();
        assert_eq!(value, None);
    }
}
