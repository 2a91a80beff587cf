//! Reqwest-backed user directory adapter.
//!
//! This adapter owns transport details only: endpoint construction, timeout
//! and HTTP error mapping, and JSON decoding into domain users. It performs a
//! single attempt per call.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use thiserror::Error;
use tracing::debug;

use super::dto::UserDto;
use crate::domain::User;
use crate::domain::ports::{UserDirectory, UserDirectoryError};

/// Errors raised while building the adapter.
#[derive(Debug, Error)]
pub enum HttpUserDirectoryBuildError {
    /// The base URL cannot be extended with the users path.
    #[error("invalid user directory base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Resolve the `usuarios` listing endpoint under `base_url`.
///
/// A trailing slash on the base is optional.
///
/// # Examples
/// ```
/// use order_aggregation::outbound::usuarios::users_endpoint;
/// use url::Url;
///
/// let base = Url::parse("http://localhost:8080/api").expect("valid URL");
/// let endpoint = users_endpoint(&base).expect("joinable base");
/// assert_eq!(endpoint.as_str(), "http://localhost:8080/api/usuarios");
/// ```
///
/// # Errors
///
/// Returns an error when `base_url` cannot carry a path (for example
/// `mailto:` URLs).
pub fn users_endpoint(base_url: &Url) -> Result<Url, url::ParseError> {
    if base_url.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
    }
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("usuarios")
}

/// User directory adapter that performs `GET {base}/usuarios`.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: Client,
    endpoint: Url,
}

impl HttpUserDirectory {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL cannot be extended or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, HttpUserDirectoryBuildError> {
        let endpoint = users_endpoint(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint queried on every call.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn fetch_users(&self) -> Result<Vec<User>, UserDirectoryError> {
        debug!(endpoint = %self.endpoint, "fetching users from directory");
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_users(body.as_ref())
    }
}

fn parse_users(body: &[u8]) -> Result<Vec<User>, UserDirectoryError> {
    let decoded: Vec<UserDto> = serde_json::from_slice(body).map_err(|error| {
        UserDirectoryError::decode(format!("invalid users payload: {error}"))
    })?;
    Ok(decoded.into_iter().map(User::from).collect())
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    if error.is_timeout() {
        UserDirectoryError::timeout(error.to_string())
    } else {
        UserDirectoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    UserDirectoryError::status(status.as_u16(), body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
