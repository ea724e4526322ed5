//! Client-side lifecycle controller for an asynchronous video download
//! service.
//!
//! This crate tracks a server-side download/transcode job through a bounded
//! set of states using polling. It does not fetch or decode media itself —
//! the service does the heavy lifting; the client submits, watches, and
//! surfaces partial progress and terminal results to its caller.
//!
//! # Overview
//!
//! - [`JobTracker`] — submits jobs and owns the single tracked [`Job`]
//! - [`JobService`] / [`HttpJobService`] — the seam over the service's three
//!   HTTP endpoints
//! - [`ClientState`] + [`reduce`] — the pure client state machine
//! - [`detect_platform`] / [`PlatformDirectory`] — advisory platform labels
//! - [`ClientError`] — failure taxonomy, categorized by recovery
//!
//! # Lifecycle
//!
//! ```text
//!   submit() ──→ queued ──→ processing ──→ completed
//!                  │             │
//!                  └─────────────┴──→ failed       reset() ──→ idle, any time
//! ```
//!
//! Polling runs if and only if a job is tracked and its status is `queued`
//! or `processing`. A fixed 2-second delay separates the end of one status
//! fetch from the next tick, so polls never overlap; a slow response delays
//! the schedule instead. Discarding the job (reset or resubmission) cancels
//! the pending tick, and a response that raced the discard is dropped rather
//! than applied to stale state.
//!
//! # Example
//!
//! ```ignore
//! use vidjob_client::{DownloadOptions, HttpJobService, JobTracker, ServiceConfig};
//!
//! let service = HttpJobService::new(ServiceConfig::new("https://dl.example.com"))?;
//! let tracker = JobTracker::new(service);
//!
//! let job = tracker
//!     .submit("https://www.youtube.com/watch?v=1", DownloadOptions::default())
//!     .await?;
//! println!("tracking {} ({})", job.id, job.status);
//!
//! let mut views = tracker.subscribe();
//! let done = views.wait_for(|view| !view.state.is_active()).await?;
//! ```

pub mod api;
pub mod display;
pub mod error;
pub mod job;
pub mod options;
pub mod platform;
pub mod service;
pub mod state;
pub mod tracker;

pub use api::{CreateJobRequest, JobSnapshot, MediaMetadata, PlatformInfo, PlatformList};
pub use display::{format_duration, format_file_size, parse_percent};
pub use error::{ClientError, ClientResult, GENERIC_SUBMISSION_FAILURE, POLL_FAILURE_MESSAGE};
pub use job::{Job, JobId, JobStatus};
pub use options::{DownloadOptions, MediaFormat, Quality};
pub use platform::{detect_platform, PlatformDirectory, UNKNOWN_PLATFORM};
pub use service::{HttpJobService, JobService, ServiceConfig, BASE_URL_ENV};
pub use state::{reduce, ClientState, Event};
pub use tracker::{JobTracker, TrackerView, DEFAULT_POLL_INTERVAL};
