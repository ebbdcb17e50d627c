use crate::errors::ConsoleError;
use crate::models::{ApiReply, StatusSnapshot};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const ACTIVE_STATS_PATH: &str = "/api/active_stats";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConsoleError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    pub async fn fetch_status(&self) -> Result<StatusSnapshot, ConsoleError> {
        let url = self.url(ACTIVE_STATS_PATH);
        debug!(%url, "fetching call status");
        let snapshot = self.http.get(url).send().await?.json().await?;
        Ok(snapshot)
    }

    // The backend reports failures as JSON bodies on non-2xx responses, so the
    // HTTP status is not checked here.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<ApiReply, ConsoleError> {
        let url = self.url(endpoint);
        debug!(%url, "posting");
        let response = self.http.post(url).json(body).send().await?;
        debug!(status = %response.status(), "backend replied");
        let body: Value = response.json().await?;
        Ok(ApiReply::from_value(body))
    }
}
