//! Wire types for the download service API.
//!
//! The service exposes three JSON endpoints the client consumes:
//!
//! | Endpoint | Request | Response |
//! |----------|---------|----------|
//! | `POST /api/download` | [`CreateJobRequest`] | [`JobSnapshot`] |
//! | `GET /api/download/{id}/status` | — | [`JobSnapshot`] |
//! | `GET /api/supported-platforms` | — | [`PlatformList`] |
//!
//! Snapshot fields other than `status` are optional on the wire; absence
//! clears the corresponding tracked value (see `Job::apply_snapshot`).

use serde::{Deserialize, Serialize};

use crate::job::JobStatus;
use crate::options::DownloadOptions;

/// Body of the job-creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateJobRequest {
    /// Source URL, trimmed of surrounding whitespace.
    pub url: String,
    /// Submission options, flattened into the same JSON object.
    #[serde(flatten)]
    pub options: DownloadOptions,
}

/// A job snapshot, as returned by both the creation and status endpoints.
///
/// The creation response carries `download_id`; status responses need not
/// repeat it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSnapshot {
    /// Server-assigned identifier used for subsequent polling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_id: Option<String>,
    /// Current job status.
    pub status: JobStatus,
    /// Human-readable status or error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Advisory progress string, e.g. `"42%"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
    /// Advisory transfer speed, e.g. `"1.2MB/s"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    /// Advisory time remaining, e.g. `"00:10"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    /// Descriptive metadata for the produced artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MediaMetadata>,
    /// Artifact size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    /// Artifact retrieval path, relative to the service base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Descriptive metadata for a completed download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Title of the source media.
    #[serde(default)]
    pub title: String,
    /// Channel/account that published it.
    #[serde(default)]
    pub uploader: String,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    /// Platform the service resolved the URL to.
    #[serde(default)]
    pub platform: String,
}

/// Response body of the supported-platforms endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformList {
    /// Platforms the service advertises.
    pub platforms: Vec<PlatformInfo>,
}

/// One supported platform and its advertised features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Display name, e.g. `"YouTube"`.
    pub name: String,
    /// Feature labels, e.g. `"watermark removal"`.
    #[serde(default)]
    pub features: Vec<String>,
}

/// Error body the service may return on a failed request.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Optional human-readable failure detail.
    #[serde(default)]
    pub detail: Option<String>,
}
