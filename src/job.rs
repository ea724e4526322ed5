//! Job lifecycle types.
//!
//! The client-observable state machine for a tracked download job:
//!
//! ```text
//!   submit() ──→ Queued ──→ Processing ──→ Completed
//!                  │             │
//!                  └─────────────┴──→ Failed
//! ```
//!
//! **Invariants:**
//! - `status` is mutated only by applying service responses; the single
//!   exception is a failed status fetch, which forces `Failed` locally.
//! - Terminal states (`Completed`, `Failed`) are permanent; they are left
//!   only by an explicit reset, which discards the job entirely.
//! - `metadata`, `file_size` and `file_url` are only meaningful in
//!   `Completed`; `message` as an error text is only meaningful in `Failed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{JobSnapshot, MediaMetadata};
use crate::display::parse_percent;
use crate::options::DownloadOptions;

/// Unique identifier for a download job, assigned by the service on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Create a new job ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Status of a download job as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Job is waiting for a worker.
    Queued,
    /// Job is being fetched/transcoded.
    Processing,
    /// The artifact is ready for retrieval.
    Completed,
    /// The service gave up on the job.
    Failed,
}

impl JobStatus {
    /// Wire name of this status (`"queued"`, `"processing"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Check if the job still warrants polling (queued or processing).
    pub fn is_active(self) -> bool {
        matches!(self, JobStatus::Queued | JobStatus::Processing)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A download job tracked by the client.
///
/// `id`, `source_url`, `options` and `submitted_at` are fixed at creation;
/// everything else is replaced wholesale by each applied snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    /// Server-assigned identifier, unique per submission.
    pub id: JobId,
    /// The user-supplied URL, trimmed.
    pub source_url: String,
    /// Options the job was submitted with.
    pub options: DownloadOptions,
    /// When the client issued the creation request.
    pub submitted_at: DateTime<Utc>,
    /// Last server-reported status.
    pub status: JobStatus,
    /// Human-readable status or error text.
    pub message: Option<String>,
    /// Advisory progress string, e.g. `"42%"`. Present only while processing.
    pub progress: Option<String>,
    /// Advisory transfer speed, e.g. `"1.2MB/s"`.
    pub speed: Option<String>,
    /// Advisory time remaining, e.g. `"00:10"`.
    pub eta: Option<String>,
    /// Descriptive metadata, present once completed.
    pub metadata: Option<MediaMetadata>,
    /// Artifact size in bytes, present once completed.
    pub file_size: Option<u64>,
    /// Retrieval path for the artifact, relative to the service base.
    pub file_url: Option<String>,
}

impl Job {
    /// Build a job from a creation response, stamped with the current time.
    ///
    /// The initial status comes from the response verbatim — the client does
    /// not assume `queued`.
    pub(crate) fn from_creation(
        id: JobId,
        source_url: String,
        options: DownloadOptions,
        snapshot: JobSnapshot,
    ) -> Self {
        let mut job = Self {
            id,
            source_url,
            options,
            submitted_at: Utc::now(),
            status: snapshot.status,
            message: None,
            progress: None,
            speed: None,
            eta: None,
            metadata: None,
            file_size: None,
            file_url: None,
        };
        job.apply_snapshot(snapshot);
        job
    }

    /// Replace all mutable fields with a fresh snapshot.
    ///
    /// Replacement, not merge: a field absent from the response clears the
    /// previous value.
    pub(crate) fn apply_snapshot(&mut self, snapshot: JobSnapshot) {
        self.status = snapshot.status;
        self.message = snapshot.message;
        self.progress = snapshot.progress;
        self.speed = snapshot.speed;
        self.eta = snapshot.eta;
        self.metadata = snapshot.metadata;
        self.file_size = snapshot.file_size;
        self.file_url = snapshot.file_url;
    }

    /// Terminate the job locally with the given error text.
    ///
    /// Used when a status fetch fails; telemetry is cleared along the way.
    pub(crate) fn mark_failed(&mut self, message: &str) {
        self.status = JobStatus::Failed;
        self.message = Some(message.to_string());
        self.progress = None;
        self.speed = None;
        self.eta = None;
    }

    /// Progress percentage parsed from the advisory `progress` string.
    pub fn progress_percent(&self) -> Option<f32> {
        self.progress.as_deref().and_then(parse_percent)
    }
}
