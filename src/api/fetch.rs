//! Fetch executor: one network request per call, classified outcome.
//!
//! Ordinary HTTP failures are values, not errors. The query engine decides
//! what a failure means for cached data.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::{eyre::eyre, Result};
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::COOKIE;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::endpoint::ResolvedRequest;
use crate::config::{ApiConfig, AuthType};

/// Body reported when a 2xx response is not valid JSON.
const INVALID_BODY: &str = "invalid response body";

/// Classified result of a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
  Success(Value),
  /// A response arrived with a non-2xx status (or an unreadable 2xx body).
  HttpError { status: u16, body: String },
  /// No response: connect failure, timeout, TLS, bad URL.
  NetworkError(String),
}

impl FetchOutcome {
  pub fn into_result(self) -> std::result::Result<Value, FetchError> {
    match self {
      Self::Success(value) => Ok(value),
      Self::HttpError { status, body } => Err(FetchError::Http {
        status,
        message: body,
      }),
      Self::NetworkError(cause) => Err(FetchError::Network(cause)),
    }
  }
}

/// A failed fetch as seen by the cache and its consumers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
  #[error("HTTP {status}: {message}")]
  Http { status: u16, message: String },
  #[error("network error: {0}")]
  Network(String),
}

impl FetchError {
  /// The route rejected the session. Still an ordinary HTTP error.
  pub fn is_auth(&self) -> bool {
    matches!(self, Self::Http { status: 401 | 403, .. })
  }

  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Http { status, .. } => Some(*status),
      Self::Network(_) => None,
    }
  }
}

/// Performs requests for the query engine.
///
/// Implementations must issue exactly one request per call and never retry.
pub trait Fetcher: Send + Sync {
  fn fetch(&self, request: ResolvedRequest) -> BoxFuture<'static, FetchOutcome>;
}

#[derive(Clone)]
enum Credentials {
  None,
  Bearer(String),
  Cookie { name: String, value: String },
}

impl Credentials {
  fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match self {
      Self::None => builder,
      Self::Bearer(token) => builder.bearer_auth(token),
      Self::Cookie { name, value } => builder.header(COOKIE, format!("{}={}", name, value)),
    }
  }
}

/// Fetcher backed by a shared reqwest client.
#[derive(Clone)]
pub struct HttpFetcher {
  client: reqwest::Client,
  base_url: Url,
  credentials: Arc<Credentials>,
}

impl HttpFetcher {
  pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
    let base_url = Url::parse(&config.base_url)
      .map_err(|e| eyre!("Invalid api.base_url '{}': {}", config.base_url, e))?;

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    let credentials = match (token, config.auth_type) {
      (None, _) => Credentials::None,
      (Some(token), AuthType::Bearer) => Credentials::Bearer(token),
      (Some(value), AuthType::Cookie) => Credentials::Cookie {
        name: config.cookie_name.clone(),
        value,
      },
    };

    Ok(Self {
      client,
      base_url,
      credentials: Arc::new(credentials),
    })
  }

  fn url_for(&self, request: &ResolvedRequest) -> std::result::Result<Url, String> {
    let mut url = self
      .base_url
      .join(&request.path)
      .map_err(|e| format!("invalid request url {}: {}", request.path, e))?;
    if !request.query.is_empty() {
      url.query_pairs_mut().extend_pairs(request.query.iter());
    }
    Ok(url)
  }
}

impl Fetcher for HttpFetcher {
  fn fetch(&self, request: ResolvedRequest) -> BoxFuture<'static, FetchOutcome> {
    let client = self.client.clone();
    let credentials = Arc::clone(&self.credentials);
    let url = self.url_for(&request);

    async move {
      let url = match url {
        Ok(url) => url,
        Err(cause) => return FetchOutcome::NetworkError(cause),
      };
      debug!(url = %url, "sending request");

      let builder = credentials.apply(client.request(request.method.into(), url));
      let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => {
          warn!(target = %request.target(), error = %e, "request failed");
          return FetchOutcome::NetworkError(e.to_string());
        }
      };

      let status = response.status();
      match response.text().await {
        Ok(text) => classify(status, &text),
        Err(e) => FetchOutcome::NetworkError(format!("failed to read response body: {}", e)),
      }
    }
    .boxed()
  }
}

/// Turn a received status + body into an outcome.
fn classify(status: reqwest::StatusCode, text: &str) -> FetchOutcome {
  if status.is_success() {
    return match serde_json::from_str(text) {
      Ok(value) => FetchOutcome::Success(value),
      Err(e) => {
        warn!(status = status.as_u16(), error = %e, "unparsable response body");
        FetchOutcome::HttpError {
          status: status.as_u16(),
          body: INVALID_BODY.to_string(),
        }
      }
    };
  }

  FetchOutcome::HttpError {
    status: status.as_u16(),
    body: error_message(status, text),
  }
}

/// Routes answer failures with `{ "error": "..." }`; fall back to the raw
/// text, then to the reason phrase.
fn error_message(status: reqwest::StatusCode, text: &str) -> String {
  let from_json = serde_json::from_str::<Value>(text)
    .ok()
    .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from));

  from_json
    .or_else(|| {
      let trimmed = text.trim();
      (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
    .unwrap_or_else(|| {
      status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
    })
}
