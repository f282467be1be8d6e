//! HTTP client for the guest review endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use shared::{
    domain::{GuestId, GuestStatus, MarkAction},
    error::ApiError,
    protocol::{StatusUpdateResponse, UpdateAddressRequest},
};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a successful guest update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub guest_id: GuestId,
    pub new_status: GuestStatus,
    pub new_address: Option<String>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    Setup(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
    /// The server answered `success: false`; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),
}

impl ClientError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl From<&ClientError> for ApiError {
    fn from(value: &ClientError) -> Self {
        match value {
            ClientError::Rejected(message) => ApiError::rejected(message.clone()),
            ClientError::MalformedResponse { .. } => ApiError::malformed(value.to_string()),
            other => ApiError::transport(other.to_string()),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(value: ClientError) -> Self {
        Self::from(&value)
    }
}

#[async_trait]
pub trait GuestApi: Send + Sync {
    async fn update_address(
        &self,
        guest_id: GuestId,
        address: &str,
    ) -> Result<StatusChange, ClientError>;
    async fn mark_guest(
        &self,
        guest_id: GuestId,
        action: MarkAction,
    ) -> Result<StatusChange, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpGuestApi {
    http: Client,
    server_url: String,
}

impl HttpGuestApi {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let server_url = normalize_server_url(server_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Setup)?;
        Ok(Self { http, server_url })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn update_address_url(&self, guest_id: GuestId) -> String {
        format!("{}/update-guest-address/{guest_id}", self.server_url)
    }

    pub fn mark_url(&self, guest_id: GuestId, action: MarkAction) -> String {
        format!("{}/mark/{guest_id}/{action}", self.server_url)
    }

    async fn post_status_update(
        &self,
        guest_id: GuestId,
        endpoint: String,
        body: Option<&UpdateAddressRequest>,
    ) -> Result<StatusChange, ClientError> {
        let mut request = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        // Failure bodies arrive with 4xx/5xx codes too, so the body decides.
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        let parsed: StatusUpdateResponse =
            serde_json::from_str(&text).map_err(|err| ClientError::MalformedResponse {
                endpoint: endpoint.clone(),
                reason: format!("HTTP {status}: {err}"),
            })?;

        status_change_from_response(guest_id, &endpoint, parsed)
    }
}

#[async_trait]
impl GuestApi for HttpGuestApi {
    async fn update_address(
        &self,
        guest_id: GuestId,
        address: &str,
    ) -> Result<StatusChange, ClientError> {
        let endpoint = self.update_address_url(guest_id);
        debug!(guest_id = guest_id.0, "posting address update");
        let body = UpdateAddressRequest {
            address: address.to_string(),
        };
        let result = self
            .post_status_update(guest_id, endpoint, Some(&body))
            .await;
        match &result {
            Ok(change) => info!(
                guest_id = guest_id.0,
                new_status = %change.new_status,
                "guest address updated"
            ),
            Err(err) => warn!(guest_id = guest_id.0, "address update failed: {err}"),
        }
        result
    }

    async fn mark_guest(
        &self,
        guest_id: GuestId,
        action: MarkAction,
    ) -> Result<StatusChange, ClientError> {
        let endpoint = self.mark_url(guest_id, action);
        debug!(guest_id = guest_id.0, %action, "posting guest mark");
        let result = self.post_status_update(guest_id, endpoint, None).await;
        match &result {
            Ok(change) => info!(
                guest_id = guest_id.0,
                %action,
                new_status = %change.new_status,
                "guest marked"
            ),
            Err(err) => warn!(guest_id = guest_id.0, %action, "guest mark failed: {err}"),
        }
        result
    }
}

fn status_change_from_response(
    guest_id: GuestId,
    endpoint: &str,
    response: StatusUpdateResponse,
) -> Result<StatusChange, ClientError> {
    if !response.success {
        return Err(ClientError::Rejected(
            response
                .error
                .unwrap_or_else(|| "Unknown error".to_string()),
        ));
    }

    let new_status = response
        .new_status
        .ok_or_else(|| ClientError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: "success response without new_status".to_string(),
        })?;

    Ok(StatusChange {
        guest_id,
        new_status,
        new_address: response.new_address,
    })
}

fn normalize_server_url(raw: &str) -> Result<String, ClientError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|err| ClientError::InvalidServerUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ClientError::InvalidServerUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
