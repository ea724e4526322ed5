//! The download service seam and its HTTP implementation.
//!
//! [`JobService`] covers the three operations the client consumes:
//!
//! ```text
//!   supported_platforms() ──→ create_job() ──→ job_status() ··· (polled)
//!       (startup, once)         (one-shot)       (every tick)
//! ```
//!
//! ## Design principles
//!
//! - **Async-native**: every operation crosses the network.
//! - **Thread-safe**: `Send + Sync` bound enables shared ownership by the
//!   tracker and its poll task.
//! - **Minimal**: only the operations the job lifecycle needs. The service
//!   exposes no cancellation — discarding a job is a client-side reset.
//!
//! # Contract
//!
//! - `create_job()` MUST issue exactly one creation request per call and
//!   return the snapshot verbatim — callers must not assume an initial
//!   `queued` status.
//! - `job_status()` is called once per poll tick and MUST NOT retry
//!   internally; the tracker treats a single failure as terminal.
//! - `supported_platforms()` failures are non-fatal to callers.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::api::{CreateJobRequest, ErrorBody, JobSnapshot, PlatformList};
use crate::error::{ClientError, ClientResult};
use crate::job::{Job, JobId};

/// Environment variable naming the service base URL.
pub const BASE_URL_ENV: &str = "VIDJOB_BASE_URL";

/// Trait for download-job services.
///
/// [`HttpJobService`] is the production implementation; tests and demos
/// substitute in-memory services.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Create a job from the given request.
    async fn create_job(&self, request: &CreateJobRequest) -> ClientResult<JobSnapshot>;

    /// Fetch the current snapshot for a job.
    async fn job_status(&self, id: &JobId) -> ClientResult<JobSnapshot>;

    /// Fetch the platforms this service advertises.
    async fn supported_platforms(&self) -> ClientResult<PlatformList>;
}

/// Configuration for [`HttpJobService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the service, stored without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ServiceConfig {
    /// Create a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Read the base URL from [`BASE_URL_ENV`].
    pub fn from_env() -> ClientResult<Self> {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Ok(Self::new(url.trim())),
            _ => Err(ClientError::Configuration(format!(
                "{BASE_URL_ENV} is not set"
            ))),
        }
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// HTTP implementation of [`JobService`].
pub struct HttpJobService {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl HttpJobService {
    /// Build a service client with its own connection pool.
    pub fn new(config: ServiceConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Build on a caller-provided client (shared pools, proxies).
    pub fn with_client(http: reqwest::Client, config: ServiceConfig) -> Self {
        Self { http, config }
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute retrieval URL for a completed job's artifact, if any.
    ///
    /// The artifact is opened/redirected to, never streamed by this client.
    pub fn resolve_file_url(&self, job: &Job) -> Option<String> {
        job.file_url.as_deref().map(|path| self.endpoint(path))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn decode_error(response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let detail = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.detail),
            Err(_) => None,
        };
        ClientError::Api { status, detail }
    }
}

#[async_trait]
impl JobService for HttpJobService {
    async fn create_job(&self, request: &CreateJobRequest) -> ClientResult<JobSnapshot> {
        debug!(url = %request.url, "issuing creation request");
        let response = self
            .http
            .post(self.endpoint("/api/download"))
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn job_status(&self, id: &JobId) -> ClientResult<JobSnapshot> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/download/{id}/status")))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn supported_platforms(&self) -> ClientResult<PlatformList> {
        let response = self
            .http
            .get(self.endpoint("/api/supported-platforms"))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;
    use crate::options::DownloadOptions;

    #[test]
    fn test_config_strips_trailing_slashes() {
        let config = ServiceConfig::new("https://dl.example.com///");
        assert_eq!(config.base_url, "https://dl.example.com");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_timeout_override() {
        let config =
            ServiceConfig::new("https://dl.example.com").with_request_timeout(Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_resolve_file_url_joins_base() {
        let service = HttpJobService::with_client(
            reqwest::Client::new(),
            ServiceConfig::new("https://dl.example.com/"),
        );
        let snapshot = crate::api::JobSnapshot {
            download_id: Some("abc123".into()),
            status: JobStatus::Completed,
            message: None,
            progress: None,
            speed: None,
            eta: None,
            metadata: None,
            file_size: Some(10_485_760),
            file_url: Some("/files/abc123.mp4".into()),
        };
        let job = crate::job::Job::from_creation(
            JobId::new("abc123"),
            "https://youtu.be/abc".into(),
            DownloadOptions::default(),
            snapshot,
        );
        assert_eq!(
            service.resolve_file_url(&job).as_deref(),
            Some("https://dl.example.com/files/abc123.mp4")
        );

        let mut bare = job;
        bare.file_url = None;
        assert_eq!(service.resolve_file_url(&bare), None);
    }
}
