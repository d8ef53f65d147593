//! Reqwest-backed platform admin API adapter.
//!
//! This adapter owns transport details only: URL construction, the admin
//! token header, timeout and status mapping, and JSON decoding into domain
//! user records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{SuspendUserRequestDto, describe_failure};
use crate::domain::ports::{PlatformApiError, PlatformProcedures, PlatformUserRepository};
use crate::domain::{PlatformUser, PlatformUserId, SuspensionDuration};

const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";
const DEFAULT_USER_AGENT: &str = concat!("stoat-admin-panel/", env!("CARGO_PKG_VERSION"));

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum PlatformClientError {
    /// The reqwest client could not be built.
    #[error("failed to build platform HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The configured base URL cannot carry path segments.
    #[error("platform admin API URL must be hierarchical (http/https): {0}")]
    InvalidBaseUrl(Url),
}

/// Outbound identity for admin API requests.
pub struct PlatformHttpIdentity {
    /// HTTP user-agent sent to the platform.
    pub user_agent: String,
    /// Shared secret sent as `X-Admin-Token`, when configured.
    pub admin_token: Option<String>,
}

impl Default for PlatformHttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            admin_token: None,
        }
    }
}

/// Platform adapter performing HTTP requests against the admin API.
pub struct PlatformHttpClient {
    client: Client,
    base_url: Url,
    user_agent: String,
    admin_token: Option<Zeroizing<String>>,
}

impl PlatformHttpClient {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// base URL cannot carry path segments.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        identity: PlatformHttpIdentity,
    ) -> Result<Self, PlatformClientError> {
        if base_url.cannot_be_a_base() {
            return Err(PlatformClientError::InvalidBaseUrl(base_url));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            user_agent: identity.user_agent,
            admin_token: identity.admin_token.map(Zeroizing::new),
        })
    }

    fn user_url(&self, id: &PlatformUserId, action: Option<&str>) -> Result<Url, PlatformApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                PlatformApiError::connection("platform admin API URL cannot be a base")
            })?;
            segments.pop_if_empty().push("users").push(id.as_ref());
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.admin_token {
            Some(token) => request.header(ADMIN_TOKEN_HEADER, token.as_str()),
            None => request,
        }
    }

    async fn get_user(&self, id: &PlatformUserId) -> Result<Option<PlatformUser>, PlatformApiError> {
        let url = self.user_url(id, None)?;
        debug!(%url, "fetching platform user");
        let response = self
            .decorate(self.client.get(url))
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = read_success_body(response).await?;
        serde_json::from_slice(&body).map(Some).map_err(|error| {
            PlatformApiError::decode(format!("invalid user payload: {error}"))
        })
    }
}

async fn read_success_body(response: Response) -> Result<Vec<u8>, PlatformApiError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(PlatformApiError::rejected(
            status.as_u16(),
            describe_failure(body.as_ref()),
        ));
    }
    Ok(body.to_vec())
}

fn map_transport_error(error: reqwest::Error) -> PlatformApiError {
    if error.is_timeout() {
        PlatformApiError::connection(format!("request timed out: {error}"))
    } else if error.is_decode() {
        PlatformApiError::decode(error.to_string())
    } else {
        PlatformApiError::connection(error.to_string())
    }
}

#[async_trait]
impl PlatformUserRepository for PlatformHttpClient {
    async fn find_by_id(
        &self,
        id: &PlatformUserId,
    ) -> Result<Option<PlatformUser>, PlatformApiError> {
        self.get_user(id).await
    }
}

#[async_trait]
impl PlatformProcedures for PlatformHttpClient {
    async fn fetch_user(
        &self,
        id: &PlatformUserId,
    ) -> Result<Option<PlatformUser>, PlatformApiError> {
        self.get_user(id).await
    }

    async fn suspend_user(
        &self,
        user: &PlatformUser,
        duration: SuspensionDuration,
        reason: &str,
    ) -> Result<(), PlatformApiError> {
        let url = self.user_url(user.id(), Some("suspend"))?;
        let payload = SuspendUserRequestDto {
            user,
            duration: duration.as_days(),
            reason,
        };
        let response = self
            .decorate(self.client.post(url))
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_success_body(response).await.map(|_| ())
    }
}
