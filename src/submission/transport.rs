use async_trait::async_trait;

use super::outcome::SubmissionError;
use super::request::SubmissionRequest;

/// JSON-in/JSON-out access to the AI backend.
#[async_trait]
pub trait Transport: Send + Sync {
    fn base_url(&self) -> &str;

    async fn post_json(
        &self,
        path: &str,
        body: &SubmissionRequest,
    ) -> Result<serde_json::Value, SubmissionError>;

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, SubmissionError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// `base_url` must already be normalized (no trailing slash).
    ///
    /// No request timeout is configured: a request runs until the backend
    /// answers or the connection fails.
    pub fn new(base_url: impl Into<String>) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| format!("Failed to build reqwest client: {e}"))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json(
        &self,
        path: &str,
        body: &SubmissionRequest,
    ) -> Result<serde_json::Value, SubmissionError> {
        let url = self.url(path);
        tracing::info!("Sending request to {url}");
        tracing::debug!("Request body for {url}: {}", serde_json::to_string(body).unwrap_or_default());

        let resp = self.client.post(&url).json(body).send().await?;
        read_json(resp).await
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, SubmissionError> {
        let url = self.url(path);
        tracing::debug!("Fetching {url}");

        let resp = self.client.get(&url).send().await?;
        read_json(resp).await
    }
}

async fn read_json(resp: reqwest::Response) -> Result<serde_json::Value, SubmissionError> {
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SubmissionError::status(status, &body));
    }

    let text = resp.text().await?;
    Ok(serde_json::from_str(&text)?)
}
