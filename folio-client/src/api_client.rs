//! REST client for the folio API.

use std::time::Duration;

use folio_core::{Profile, Project, Skill};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::ApiClientError;

/// Error body the API answers non-2xx requests with.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiClientError> {
        Self::with_base_url(
            &config.api_base_url,
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_profile(&self) -> Result<Profile, ApiClientError> {
        self.get_json(self.url("/api/profile")?).await
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, ApiClientError> {
        self.get_json(self.url("/api/skills")?).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiClientError> {
        self.get_json(self.url("/api/projects")?).await
    }

    pub async fn get_project(&self, code: &str) -> Result<Project, ApiClientError> {
        let mut url = self.url("/api/projects")?;
        url.path_segments_mut()
            .map_err(|_| ApiClientError::InvalidUrl(self.base_url.clone()))?
            .push(code);
        self.get_json(url).await
    }

    fn url(&self, path: &str) -> Result<Url, ApiClientError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ApiClientError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiClientError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = match serde_json::from_slice::<ErrorBody>(&bytes) {
            Ok(body) => format!("{}: {}", body.code, body.message),
            Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
        };
        Err(ApiClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
