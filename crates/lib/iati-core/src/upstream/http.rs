use std::{error::Error, fmt, sync::Arc};

use tracing::{debug, warn};

use crate::query::UpstreamQuery;
use crate::upstream::SolrResponse;

/// Public IATI datastore API root.
pub const DEFAULT_BASE_URL: &str = "https://api.iatistandard.org/datastore";
/// Non-secret development key used when no credential is configured. Requests
/// made with it are subject to the datastore's anonymous rate limits.
pub const DEV_SUBSCRIPTION_KEY: &str = "iati-mcp-development";
/// Header carrying the subscription key on every request.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Immutable upstream settings, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
}

impl UpstreamConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Full URL for an endpoint path such as `activity/select`.
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Whether the development fallback key is in use.
    #[must_use]
    pub fn uses_dev_key(&self) -> bool {
        self.api_key == DEV_SUBSCRIPTION_KEY
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEV_SUBSCRIPTION_KEY)
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug)]
pub enum FetchError {
    /// The datastore answered with a non-success status.
    Http { status: u16, status_text: String },
    /// The request could not be sent or the body could not be decoded.
    Transport(Box<reqwest::Error>),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http {
                status,
                status_text,
            } => write!(f, "upstream returned HTTP {status} {status_text}"),
            Self::Transport(err) => write!(f, "upstream transport error: {err}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http { .. } => None,
            Self::Transport(err) => Some(err.as_ref()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Issues single authenticated GET requests against the datastore.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: Arc<UpstreamConfig>,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(config: UpstreamConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, config: UpstreamConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// Runs a query and decodes the full reply.
    ///
    /// # Errors
    /// Returns `FetchError::Http` for a non-success status and
    /// `FetchError::Transport` when the request fails or the body is not valid
    /// JSON.
    pub async fn select(&self, query: &UpstreamQuery) -> Result<SolrResponse, FetchError> {
        let url = self.config.endpoint_url(query.endpoint);
        debug!(%url, q = %query.q, rows = query.rows, filters = query.filters.len(), "querying datastore");

        let response = self
            .client
            .get(&url)
            .header(SUBSCRIPTION_KEY_HEADER, self.config.api_key.as_str())
            .query(&query.to_params())
            .send()
            .await
            .inspect_err(|err| warn!(%url, "datastore request failed: {err}"))?;

        let status = response.status();
        if !status.is_success() {
            let status_text = status.canonical_reason().unwrap_or_default().to_string();
            warn!(%url, status = status.as_u16(), "datastore returned {status}");
            return Err(FetchError::Http {
                status: status.as_u16(),
                status_text,
            });
        }

        Ok(response.json::<SolrResponse>().await?)
    }
}
