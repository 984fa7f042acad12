//! REST API client for the shortening service.
//!
//! DESIGN
//! ======
//! [`ShortenerApi`] is the seam the app runtime talks to, so state machines
//! can be driven by canned outcomes in tests. [`HttpApiClient`] is the real
//! implementation: one `reqwest::Client` with a cookie store, so the opaque
//! session cookie set by login/signup rides along on every later call.
//!
//! ERROR HANDLING
//! ==============
//! Every failure collapses into [`RequestError`] carrying a display string:
//! the server's `message` field when present, else a fixed per-operation
//! default. Transport and decode failures use the default and are logged.
//! Nothing is retried.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{CreateUrlRequest, ErrorBody, LoginRequest, ShortenedLink, SignupRequest};
use crate::config::ClientConfig;

pub const SIGNUP_FAILED: &str = "Signup failed";
pub const LOGIN_FAILED: &str = "Login failed";
pub const LOGOUT_FAILED: &str = "Logout failed";
pub const CREATE_FAILED: &str = "Failed to create short URL";
pub const FETCH_FAILED: &str = "Failed to fetch URLs";
pub const CHECK_FAILED: &str = "Session check failed";

// =============================================================================
// ERROR
// =============================================================================

/// A remote call that did not succeed. `message` is safe to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Operations the client performs against the shortening service.
#[async_trait::async_trait]
pub trait ShortenerApi: Send + Sync {
    /// Probe `GET /auth/check`. Only the status matters.
    async fn check_session(&self) -> Result<(), RequestError>;

    /// `POST /auth/signup`. Success says nothing about the session; the
    /// caller decides what it implies.
    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<(), RequestError>;

    /// `POST /auth/login`.
    async fn login(&self, email: &str, password: &str) -> Result<(), RequestError>;

    /// `POST /auth/logout`. The failure body is never parsed.
    async fn logout(&self) -> Result<(), RequestError>;

    /// `POST /url`, returning the created record.
    async fn create_short_url(&self, original_url: &str) -> Result<ShortenedLink, RequestError>;

    /// `GET /url`, returning the session owner's links in server order.
    async fn get_user_urls(&self) -> Result<Vec<ShortenedLink>, RequestError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    /// Build a client against `config.api_base_url` with an in-memory cookie jar.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` error if the TLS backend cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { http, base_url: config.api_base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send and map transport errors to `fallback`. Status is not checked here.
    async fn send(builder: RequestBuilder, path: &'static str, fallback: &'static str) -> Result<Response, RequestError> {
        builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, path, "request failed before a response arrived");
            RequestError::new(fallback)
        })
    }

    /// Send, then turn a non-2xx response into a `RequestError` read from the body.
    async fn send_checked(builder: RequestBuilder, path: &'static str, fallback: &'static str) -> Result<Response, RequestError> {
        let response = Self::send(builder, path, fallback).await?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body, fallback);
        tracing::debug!(status, path, %message, "request rejected");
        Err(RequestError::new(message))
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &'static str, fallback: &'static str) -> Result<T, RequestError> {
        response.json::<T>().await.map_err(|e| {
            tracing::warn!(error = %e, path, "response body did not decode");
            RequestError::new(fallback)
        })
    }
}

#[async_trait::async_trait]
impl ShortenerApi for HttpApiClient {
    async fn check_session(&self) -> Result<(), RequestError> {
        let response = Self::send(self.request(Method::GET, "/auth/check"), "/auth/check", CHECK_FAILED).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            tracing::debug!(status = response.status().as_u16(), "no valid session");
            Err(RequestError::new(CHECK_FAILED))
        }
    }

    async fn signup(&self, username: &str, email: &str, password: &str) -> Result<(), RequestError> {
        let body = SignupRequest { username, email, password };
        let builder = self.request(Method::POST, "/auth/signup").json(&body);
        Self::send_checked(builder, "/auth/signup", SIGNUP_FAILED).await?;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<(), RequestError> {
        let body = LoginRequest { email, password };
        let builder = self.request(Method::POST, "/auth/login").json(&body);
        Self::send_checked(builder, "/auth/login", LOGIN_FAILED).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), RequestError> {
        let response = Self::send(self.request(Method::POST, "/auth/logout"), "/auth/logout", LOGOUT_FAILED).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(RequestError::new(LOGOUT_FAILED))
        }
    }

    async fn create_short_url(&self, original_url: &str) -> Result<ShortenedLink, RequestError> {
        let body = CreateUrlRequest { original_url };
        let builder = self.request(Method::POST, "/url").json(&body);
        let response = Self::send_checked(builder, "/url", CREATE_FAILED).await?;
        Self::decode(response, "/url", CREATE_FAILED).await
    }

    async fn get_user_urls(&self) -> Result<Vec<ShortenedLink>, RequestError> {
        let response = Self::send_checked(self.request(Method::GET, "/url"), "/url", FETCH_FAILED).await?;
        Self::decode(response, "/url", FETCH_FAILED).await
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Pick the server's `message` from a failure body, falling back when the
/// body is not JSON or the message is missing or empty.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
