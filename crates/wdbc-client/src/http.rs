//! HTTP client for the external prediction backend.

use std::error::Error as StdError;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;
use wdbc_core::{PredictRequest, PredictionResult};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    Endpoint { endpoint: String, reason: String },
    #[error("HTTP request failed: {}", error_chain(.0))]
    Http(#[from] reqwest::Error),
    #[error("Backend {}", status_line(.status))]
    Backend { status: StatusCode, body: String },
    #[error("could not decode backend response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of a backend rejection, if that is what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// `503 Service Unavailable`, or just `599` when the code has no canonical reason.
fn status_line(status: &StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// An error's message followed by each of its sources, joined with `: `.
fn error_chain(err: &dyn StdError) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

/// Resolve a user-supplied endpoint against a base URL.
///
/// Absolute URLs are used as given; anything else (`/predict`, `predict`) is
/// joined onto `base`.
pub fn resolve_endpoint(base: &str, endpoint: &str) -> Result<Url, ClientError> {
    let endpoint = endpoint.trim();
    let invalid = |reason: String| ClientError::Endpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    match Url::parse(endpoint) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|b| b.join(endpoint))
            .map_err(|e| invalid(e.to_string())),
        Err(e) => Err(invalid(e.to_string())),
    }
}

/// One-shot prediction client. Each call is an independent POST.
pub struct PredictClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PredictClient {
    /// Create a client posting to `endpoint`, which must be an absolute URL.
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint.trim()).map_err(|e| ClientError::Endpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::with_url(endpoint))
    }

    pub fn with_url(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the request and decode the backend's classification.
    ///
    /// Non-2xx responses, transport failures and undecodable bodies all
    /// come back as [`ClientError`].
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, ClientError> {
        info!(url = %self.endpoint, features = request.features.len(), "posting prediction request");
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %body, "backend rejected request");
            return Err(ClientError::Backend { status, body });
        }

        let body = resp.text().await?;
        debug!(bytes = body.len(), "response received");
        let result = PredictionResult::from_json(&body)?;
        info!(label = %result.label, has_proba = result.probabilities.is_some(), "prediction decoded");
        Ok(result)
    }
}
