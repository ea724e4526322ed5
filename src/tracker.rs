//! The job tracker: submission, polling, and the single shared state cell.
//!
//! Concurrency model — one logical thread of control:
//!
//! - The only shared mutable state is a `watch` channel holding
//!   [`TrackerView`]; the submitter and the poll task mutate it exclusively
//!   through [`reduce`], observers read or await it.
//! - At most one creation call is in flight (atomic gate) and at most one
//!   poll task exists. The next tick is scheduled only after the previous
//!   fetch resolves, so polls never overlap and responses apply in issue
//!   order.
//! - Discarding the tracked job cancels the poll task's token before the
//!   state is replaced; a response that already passed the token check is
//!   still dropped by the reducer's id guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::CreateJobRequest;
use crate::error::{ClientError, ClientResult, GENERIC_SUBMISSION_FAILURE};
use crate::job::{Job, JobId};
use crate::options::DownloadOptions;
use crate::platform::PlatformDirectory;
use crate::service::JobService;
use crate::state::{reduce, ClientState, Event};

/// Delay between the end of one status fetch and the next tick.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// What observers see: the state machine value plus two UI-only flags.
#[derive(Debug, Clone, Default)]
pub struct TrackerView {
    /// The tracking state machine value.
    pub state: ClientState,
    /// True while a creation call is outstanding.
    pub in_flight: bool,
    /// Detail of the last failed submission; cleared on the next attempt.
    pub last_error: Option<String>,
}

/// Cancellable handle to the poll task of one tracked job.
struct PollHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Invalidate the pending tick; no late response will be applied.
    fn cancel(&self) {
        self.token.cancel();
        self.task.abort();
    }
}

/// Tracks one download job at a time against a [`JobService`].
///
/// Methods take `&self`; the tracker is designed to be shared (`Arc`)
/// between a submitting caller and observers of [`JobTracker::subscribe`].
pub struct JobTracker<S> {
    service: Arc<S>,
    poll_interval: Duration,
    view: watch::Sender<TrackerView>,
    in_flight: AtomicBool,
    poll: Mutex<Option<PollHandle>>,
}

impl<S> JobTracker<S> {
    /// Current view of the tracker.
    pub fn view(&self) -> TrackerView {
        self.view.borrow().clone()
    }

    /// Currently tracked job, if any.
    pub fn job(&self) -> Option<Job> {
        self.view.borrow().state.job().cloned()
    }

    /// Subscribe to view changes.
    pub fn subscribe(&self) -> watch::Receiver<TrackerView> {
        self.view.subscribe()
    }

    /// The underlying service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Discard the tracked job unconditionally and return to idle.
    ///
    /// Cancels any pending poll tick. No cancellation request is sent to
    /// the service for the discarded job.
    pub fn reset(&self) {
        self.cancel_poll();
        self.view.send_modify(|view| {
            view.state = reduce(std::mem::take(&mut view.state), Event::Reset);
            view.last_error = None;
        });
    }

    fn cancel_poll(&self) {
        let handle = self
            .poll
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            handle.cancel();
        }
    }

    fn store_poll(&self, handle: PollHandle) {
        *self
            .poll
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(handle);
    }
}

impl<S: JobService + 'static> JobTracker<S> {
    /// Create a tracker over the given service.
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
            poll_interval: DEFAULT_POLL_INTERVAL,
            view: watch::Sender::new(TrackerView::default()),
            in_flight: AtomicBool::new(false),
            poll: Mutex::new(None),
        }
    }

    /// Override the fixed poll delay (mainly for demos and tests).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Submit a new download job.
    ///
    /// Any currently tracked job is discarded first — even when validation
    /// then fails — and its poll task is cancelled. The empty-after-trim URL
    /// fails with [`ClientError::EmptyUrl`] before any network call. While a
    /// creation call is outstanding, further submissions fail with
    /// [`ClientError::SubmissionInFlight`].
    ///
    /// On success the returned job carries the server-assigned id and the
    /// initial server-reported status; polling starts if that status is
    /// active. On failure nothing is tracked and `last_error` holds the
    /// user-visible detail.
    pub async fn submit(&self, source_url: &str, options: DownloadOptions) -> ClientResult<Job> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ClientError::SubmissionInFlight);
        }

        // Discard whatever was tracked before validating, so a failed
        // validation still clears stale results.
        self.cancel_poll();
        self.view.send_modify(|view| {
            view.state = reduce(std::mem::take(&mut view.state), Event::Reset);
            view.last_error = None;
            view.in_flight = true;
        });

        let result = self.create_and_track(source_url.trim(), options).await;

        self.in_flight.store(false, Ordering::Release);
        self.view.send_modify(|view| {
            view.in_flight = false;
            if let Err(err) = &result {
                view.last_error = Some(err.submission_detail());
            }
        });
        result
    }

    async fn create_and_track(&self, url: &str, options: DownloadOptions) -> ClientResult<Job> {
        if url.is_empty() {
            return Err(ClientError::EmptyUrl);
        }

        let request = CreateJobRequest {
            url: url.to_string(),
            options,
        };
        let snapshot = match self.service.create_job(&request).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "creation request failed");
                return Err(ClientError::Submission(err.submission_detail()));
            }
        };

        // A job without an identifier can never be polled; reject it at the
        // boundary rather than tracking an orphan.
        let Some(id) = snapshot.download_id.clone() else {
            warn!("creation response carried no job identifier");
            return Err(ClientError::Submission(GENERIC_SUBMISSION_FAILURE.to_string()));
        };

        let job = Job::from_creation(JobId::new(id), request.url, request.options, snapshot);
        self.view.send_modify(|view| {
            view.state = reduce(
                std::mem::take(&mut view.state),
                Event::Accepted { job: job.clone() },
            );
        });

        if job.status.is_active() {
            self.start_poll(job.id.clone());
        }
        Ok(job)
    }

    /// Fetch the supported-platform directory.
    ///
    /// Non-fatal by contract: a failed fetch is logged and yields an empty
    /// directory.
    pub async fn supported_platforms(&self) -> PlatformDirectory {
        match self.service.supported_platforms().await {
            Ok(list) => PlatformDirectory::from_list(list),
            Err(err) => {
                warn!(error = %err, "failed to fetch supported platforms");
                PlatformDirectory::new()
            }
        }
    }

    fn start_poll(&self, id: JobId) {
        let token = CancellationToken::new();
        let task = tokio::spawn(poll_job(
            Arc::clone(&self.service),
            id,
            self.poll_interval,
            self.view.clone(),
            token.clone(),
        ));
        self.store_poll(PollHandle { token, task });
    }
}

impl<S> Drop for JobTracker<S> {
    fn drop(&mut self) {
        self.cancel_poll();
    }
}

/// Poll loop for one job: a fixed delay separates the end of one status
/// fetch from the next tick, so a slow response delays the schedule rather
/// than overlapping it.
async fn poll_job<S: JobService>(
    service: Arc<S>,
    id: JobId,
    interval: Duration,
    view: watch::Sender<TrackerView>,
    token: CancellationToken,
) {
    loop {
        tokio::select! {
            () = token.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }

        let fetched = tokio::select! {
            () = token.cancelled() => break,
            result = service.job_status(&id) => result,
        };

        match fetched {
            Ok(snapshot) => {
                let terminal = snapshot.status.is_terminal();
                debug!(job = %id, status = %snapshot.status, "status snapshot fetched");
                apply(&view, &token, Event::Status {
                    id: id.clone(),
                    snapshot,
                });
                if terminal {
                    break;
                }
            }
            Err(err) => {
                // One failed fetch terminates the job; no retry, no backoff.
                warn!(job = %id, error = %err, "status fetch failed, terminating job");
                apply(&view, &token, Event::PollFailed { id: id.clone() });
                break;
            }
        }
    }
}

/// Apply an event unless the job was discarded while the fetch was in
/// flight. The token check runs under the watch lock, so it cannot race a
/// concurrent discard; the reducer's id guard covers the rest.
fn apply(view: &watch::Sender<TrackerView>, token: &CancellationToken, event: Event) {
    view.send_modify(|view| {
        if token.is_cancelled() {
            return;
        }
        view.state = reduce(std::mem::take(&mut view.state), event);
    });
}
