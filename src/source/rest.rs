use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use tracing::debug;

use super::{EngagementSource, parse_engagements};
use crate::errors::SourceError;
use crate::triage::EngagementItem;

/// Longest slice of an error response body kept in [`SourceError::Http`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Bearer credentials for the Pipeline API.
///
/// Passed explicitly into [`RestSource`]; the client never looks tokens up
/// on its own.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Returns `None` for an empty or whitespace-only token.
    pub fn bearer(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self { token })
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Join an API base URL and an endpoint path with exactly one `/` between them.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fetches engagements from `GET {base_url}{path}`.
pub struct RestSource {
    client: reqwest::Client,
    url: String,
    credentials: Credentials,
}

impl RestSource {
    pub fn new(
        base_url: &str,
        path: &str,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: endpoint_url(base_url, path),
            credentials,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EngagementSource for RestSource {
    async fn fetch(&self) -> Result<Vec<EngagementItem>, SourceError> {
        debug!(url = %self.url, "fetching engagements");

        let resp = self
            .client
            .get(&self.url)
            .bearer_auth(self.credentials.token())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::Unauthorized {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                url: self.url.clone(),
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = resp.bytes().await?;
        let items = parse_engagements(&self.url, &bytes)?;
        debug!(url = %self.url, count = items.len(), "fetched engagements");
        Ok(items)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
