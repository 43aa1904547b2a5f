//! Backend API Wrappers
//!
//! Frontend bindings to the MIXION REST backend, organized by domain.

mod auth;
mod bottles;
mod ingredients;
mod recipes;
mod sales;

use gloo_net::http::{RequestBuilder, Response};
use mixion_core::KioskConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

// Re-export all public items
pub use auth::*;
pub use bottles::*;
pub use ingredients::*;
pub use recipes::*;
pub use sales::*;

/// Any failed call: transport, non-2xx status or malformed body.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Short message for display. Django REST error bodies are unwrapped
    /// when they carry a `detail`, `userid` or `username` field.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Status { status, body } => {
                extract_detail(body).unwrap_or_else(|| {
                    if body.trim().is_empty() {
                        format!("Request failed ({status})")
                    } else {
                        body.clone()
                    }
                })
            }
            other => other.to_string(),
        }
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "userid", "username", "error"]
        .iter()
        .find_map(|key| match value.get(*key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => items.first()?.as_str().map(str::to_string),
            _ => None,
        })
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Configured backend plus optional token for one batch of calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: KioskConfig,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: KioskConfig, token: Option<String>) -> Self {
        Self { config, token }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Token {token}")),
            None => builder,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("[API] GET {url}");
        let response = self.authorize(RequestBuilder::new(&url)).send().await?;
        read_json(check(response).await?).await
    }

    /// Send `body` as JSON and decode the JSON reply.
    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self.dispatch(method, path, body).await?;
        read_json(response).await
    }

    /// Send `body` as JSON and ignore the reply body.
    pub(crate) async fn send_json_discard<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.dispatch(method, path, body).await.map(|_| ())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        log::debug!("[API] DELETE {url}");
        let builder = self.authorize(method_builder(Method::Delete, &url));
        check(builder.send().await?).await.map(|_| ())
    }

    async fn dispatch<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<Response, ApiError> {
        let url = self.url(path);
        log::debug!("[API] {method:?} {url}");
        let request = self
            .authorize(method_builder(method, &url))
            .json(body)
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        check(request.send().await?).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Post,
    Patch,
    Delete,
}

fn method_builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Post => gloo_net::http::Request::post(url),
        Method::Patch => gloo_net::http::Request::patch(url),
        Method::Delete => gloo_net::http::Request::delete(url),
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("[API] {} returned {status}", response.url());
    Err(ApiError::Status { status, body })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}
