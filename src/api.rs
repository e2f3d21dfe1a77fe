use crate::model::{HomeResponse, Id, ListResponse};
use anyhow::Context;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// Longest slice of an error body kept in a [`FetchError::Status`].
const ERROR_BODY_EXCERPT: usize = 200;

/// Failure of a request to the list service.
///
/// All variants belong to the same class: the caller logs them and stays
/// where it is.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// HTTP client for the shared-list service
#[derive(Debug, Clone)]
pub struct ListClient {
    http_client: Client,
    host: String,
    base: Url,
}

impl ListClient {
    /// Create a client for `host` (e.g. `https://example.com`).
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(host: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let host = host.trim_end_matches('/').to_string();
        let base = Url::parse(&host).with_context(|| format!("Invalid host URL: {}", host))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Host URL cannot hold a path: {}", host);
        }

        Ok(Self {
            http_client,
            host,
            base,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// URL of the home bootstrap resource.
    pub fn home_url(&self) -> String {
        self.url_with(&[""])
    }

    /// URL of one (list, user) view. Ids are percent-encoded as single path
    /// segments.
    pub fn list_url(&self, template_id: &Id, uid: &Id) -> String {
        self.url_with(&["list", template_id.as_str(), uid.as_str()])
    }

    fn url_with(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        // Checked in `new`: the base always accepts path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.to_string()
    }

    /// Fetch the current user's list summaries.
    pub async fn fetch_home(&self) -> Result<HomeResponse, FetchError> {
        let url = self.home_url();
        self.get_json(url).await
    }

    /// Fetch the items and sibling users of `template_id` as seen by `uid`.
    pub async fn fetch_list(&self, template_id: &Id, uid: &Id) -> Result<ListResponse, FetchError> {
        let url = self.list_url(template_id, uid);
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        info!("GET {}", url);

        let response = match self.http_client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => {
                error!("Request to {} failed: {}", url, source);
                return Err(FetchError::Network { url, source });
            }
        };

        let status = response.status();
        debug!("{} -> {}", url, status);

        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => {
                error!("Failed to read body from {}: {}", url, source);
                return Err(FetchError::Network { url, source });
            }
        };

        if !status.is_success() {
            error!("List service error ({}) for {}", status, url);
            let body = body.chars().take(ERROR_BODY_EXCERPT).collect();
            return Err(FetchError::Status { url, status, body });
        }

        serde_json::from_str(&body).map_err(|source| {
            error!("Malformed JSON from {}: {}", url, source);
            FetchError::Parse { url, source }
        })
    }
}
