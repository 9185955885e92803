//! Authenticated access to the Clarify REST backend.
//!
//! Every call goes through [`ApiClient::request`]: bearer token attached,
//! 401 turned into a session expiry, other failures turned into a
//! human-readable [`ClientError`]. No retries, no caching.

pub mod endpoints;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::session::SessionManager;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
    log_requests: bool,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionManager>) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        url::Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url '{}': {}", base_url, e)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            session,
            log_requests: false,
        })
    }

    /// Log every completed request at info level
    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    fn url(&self, path: &str) -> ClientResult<String> {
        let full = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        url::Url::parse(&full)
            .map(|u| u.to_string())
            .map_err(|e| ClientError::Config(format!("invalid request url '{}': {}", full, e)))
    }

    /// Authenticated request with an optional JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let token = match self.session.token()? {
            Some(token) => token,
            None => return Err(ClientError::LoginRequired),
        };

        let mut builder = self
            .http
            .request(method.clone(), self.url(path)?)
            .bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, path, "authenticated request");
        self.dispatch(builder, path, true).await
    }

    /// Unauthenticated JSON request (login, registration, password recovery).
    ///
    /// A 401 here means bad credentials, not an expired session.
    pub async fn request_public(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> ClientResult<Value> {
        let mut builder = self.http.request(method.clone(), self.url(path)?);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, path, "public request");
        self.dispatch(builder, path, false).await
    }

    /// Form-url-encoded POST used by the legacy `/token` login
    pub async fn post_form_public(&self, path: &str, form: &[(&str, &str)]) -> ClientResult<Value> {
        let builder = self.http.post(self.url(path)?).form(form);
        tracing::debug!(path, "public form request");
        self.dispatch(builder, path, false).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let value = self.request(Method::GET, path, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Value> {
        let body = serde_json::to_value(body)?;
        self.request(method, path, Some(&body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.request(Method::DELETE, path, None).await
    }

    async fn dispatch(
        &self,
        builder: RequestBuilder,
        path: &str,
        authenticated: bool,
    ) -> ClientResult<Value> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(path, "transport failure: {}", e);
            ClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        if self.log_requests {
            tracing::info!(path, status = status.as_u16(), "response received");
        }
        if authenticated && status == StatusCode::UNAUTHORIZED {
            return Err(self.session.expire());
        }

        let text = response.text().await.map_err(ClientError::from)?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);
            let err = ClientError::from_response(status.as_u16(), &body);
            tracing::warn!(path, status = status.as_u16(), "request failed: {}", err);
            return Err(err);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(path, "malformed response body: {}", e);
            ClientError::Decode(e.to_string())
        })
    }
}
