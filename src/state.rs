//! The client state machine.
//!
//! All tracking transitions flow through one pure reducer:
//!
//! ```text
//!   Idle ────Accepted───→ Tracking(initial server-reported status)
//!   Tracking ──Status───→ Tracking(updated)   [same id, non-terminal]
//!   Tracking ─PollFailed→ Tracking(failed)    [same id, non-terminal]
//!   any ───────Reset────→ Idle
//! ```
//!
//! **Invariants:**
//! - Exactly one job is tracked at a time; `Accepted` replaces any prior job.
//! - Events carrying a job id other than the tracked one are dropped — this
//!   is what makes a poll response racing a discard harmless.
//! - A terminal job ignores everything except `Reset` and `Accepted`.
//! - The reducer performs no I/O and reads no clock; it is `state → state`.

use crate::api::JobSnapshot;
use crate::error::POLL_FAILURE_MESSAGE;
use crate::job::{Job, JobId};

/// Client-observable tracking state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ClientState {
    /// Pristine: nothing tracked, nothing polled.
    #[default]
    Idle,
    /// One job is tracked; it is polled while its status is active.
    Tracking(Job),
}

impl ClientState {
    /// The tracked job, if any.
    pub fn job(&self) -> Option<&Job> {
        match self {
            ClientState::Idle => None,
            ClientState::Tracking(job) => Some(job),
        }
    }

    /// True while the tracked job warrants polling.
    pub fn is_active(&self) -> bool {
        self.job().is_some_and(|job| job.status.is_active())
    }
}

/// Inputs to [`reduce`], produced only by the submitter and the poller.
#[derive(Debug, Clone)]
pub enum Event {
    /// The creation call succeeded; begin tracking `job`.
    Accepted {
        /// The freshly created job, initial status as the server reported it.
        job: Job,
    },
    /// A status fetch for `id` returned a fresh snapshot.
    Status {
        /// Job the fetch was issued for.
        id: JobId,
        /// The fetched snapshot.
        snapshot: JobSnapshot,
    },
    /// A status fetch for `id` failed; the job escalates to failed.
    PollFailed {
        /// Job the fetch was issued for.
        id: JobId,
    },
    /// Explicit reset; discards any tracked job unconditionally.
    Reset,
}

/// The single transition function: `(state, event) → state`.
pub fn reduce(state: ClientState, event: Event) -> ClientState {
    match (state, event) {
        (_, Event::Reset) => ClientState::Idle,
        (_, Event::Accepted { job }) => ClientState::Tracking(job),
        (ClientState::Tracking(mut job), Event::Status { id, snapshot })
            if job.id == id && !job.status.is_terminal() =>
        {
            job.apply_snapshot(snapshot);
            ClientState::Tracking(job)
        }
        (ClientState::Tracking(mut job), Event::PollFailed { id })
            if job.id == id && !job.status.is_terminal() =>
        {
            job.mark_failed(POLL_FAILURE_MESSAGE);
            ClientState::Tracking(job)
        }
        // Stale-id or post-terminal events change nothing.
        (state, _) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobStatus;
    use crate::options::DownloadOptions;
    use pretty_assertions::assert_eq;

    fn snapshot(status: JobStatus) -> JobSnapshot {
        JobSnapshot {
            download_id: None,
            status,
            message: None,
            progress: None,
            speed: None,
            eta: None,
            metadata: None,
            file_size: None,
            file_url: None,
        }
    }

    fn tracking(id: &str, status: JobStatus) -> ClientState {
        ClientState::Tracking(Job::from_creation(
            JobId::new(id),
            "https://www.youtube.com/watch?v=1".into(),
            DownloadOptions::default(),
            snapshot(status),
        ))
    }

    fn job_of(state: &ClientState) -> &Job {
        state.job().expect("state should track a job")
    }

    #[test]
    fn test_accepted_replaces_any_state() {
        let fresh = job_of(&tracking("new", JobStatus::Queued)).clone();

        let state = reduce(ClientState::Idle, Event::Accepted { job: fresh.clone() });
        assert_eq!(job_of(&state).id, JobId::new("new"));

        // A new submission implicitly discards the prior job, terminal or not.
        let state = reduce(
            tracking("old", JobStatus::Completed),
            Event::Accepted { job: fresh },
        );
        assert_eq!(job_of(&state).id, JobId::new("new"));
    }

    #[test]
    fn test_status_updates_tracked_job() {
        let mut update = snapshot(JobStatus::Processing);
        update.progress = Some("42%".into());

        let state = reduce(
            tracking("abc123", JobStatus::Queued),
            Event::Status {
                id: JobId::new("abc123"),
                snapshot: update,
            },
        );
        let job = job_of(&state);
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.progress_percent(), Some(42.0));
    }

    #[test]
    fn test_status_for_stale_id_is_dropped() {
        let before = tracking("abc123", JobStatus::Queued);
        let after = reduce(
            before.clone(),
            Event::Status {
                id: JobId::new("stale"),
                snapshot: snapshot(JobStatus::Completed),
            },
        );
        assert_eq!(after, before);
    }

    #[test]
    fn test_terminal_job_ignores_late_status() {
        let before = tracking("abc123", JobStatus::Completed);
        let after = reduce(
            before.clone(),
            Event::Status {
                id: JobId::new("abc123"),
                snapshot: snapshot(JobStatus::Processing),
            },
        );
        assert_eq!(after, before);
    }

    #[test]
    fn test_poll_failure_escalates_to_failed() {
        let state = reduce(
            tracking("abc123", JobStatus::Processing),
            Event::PollFailed {
                id: JobId::new("abc123"),
            },
        );
        let job = job_of(&state);
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.message.as_deref(), Some(POLL_FAILURE_MESSAGE));
    }

    #[test]
    fn test_poll_failure_for_stale_id_is_dropped() {
        let before = tracking("abc123", JobStatus::Processing);
        let after = reduce(
            before.clone(),
            Event::PollFailed {
                id: JobId::new("stale"),
            },
        );
        assert_eq!(after, before);
    }

    #[test]
    fn test_reset_from_every_state() {
        assert_eq!(reduce(ClientState::Idle, Event::Reset), ClientState::Idle);
        for status in [
            JobStatus::Queued,
            JobStatus::Processing,
            JobStatus::Completed,
            JobStatus::Failed,
        ] {
            assert_eq!(reduce(tracking("abc123", status), Event::Reset), ClientState::Idle);
        }
    }

    #[test]
    fn test_is_active_only_while_pollable() {
        assert!(!ClientState::Idle.is_active());
        assert!(tracking("a", JobStatus::Queued).is_active());
        assert!(tracking("a", JobStatus::Processing).is_active());
        assert!(!tracking("a", JobStatus::Completed).is_active());
        assert!(!tracking("a", JobStatus::Failed).is_active());
    }
}
