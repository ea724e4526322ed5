//! Minimal in-memory walk through the job lifecycle.
//!
//! This demo implements `JobService` for a scripted service — queued, three
//! processing ticks, completed — and drives a `JobTracker` against it,
//! printing every observed state change.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use vidjob_client::{
    detect_platform, format_duration, format_file_size, ClientError, ClientResult,
    CreateJobRequest, DownloadOptions, JobId, JobSnapshot, JobStatus, JobTracker, MediaMetadata,
    PlatformInfo, PlatformList, Quality,
};

/// Scripted in-memory service: each status fetch pops the next snapshot.
struct ScriptedService {
    statuses: Mutex<VecDeque<JobSnapshot>>,
}

impl ScriptedService {
    fn new() -> Self {
        let steps = [("12%", "2.1MB/s", "00:22"), ("47%", "3.4MB/s", "00:11"), ("89%", "3.1MB/s", "00:02")]
            .into_iter()
            .map(|(progress, speed, eta)| JobSnapshot {
                download_id: None,
                status: JobStatus::Processing,
                message: Some("Downloading".into()),
                progress: Some(progress.into()),
                speed: Some(speed.into()),
                eta: Some(eta.into()),
                metadata: None,
                file_size: None,
                file_url: None,
            });

        let completed = JobSnapshot {
            download_id: None,
            status: JobStatus::Completed,
            message: Some("Download completed".into()),
            progress: None,
            speed: None,
            eta: None,
            metadata: Some(MediaMetadata {
                title: "Never Gonna Give You Up".into(),
                uploader: "Rick Astley".into(),
                duration: Some(213),
                platform: "YouTube".into(),
            }),
            file_size: Some(24_117_248),
            file_url: Some("/files/mock-1.mp4".into()),
        };

        Self {
            statuses: Mutex::new(steps.chain([completed]).collect()),
        }
    }
}

#[async_trait]
impl vidjob_client::JobService for ScriptedService {
    async fn create_job(&self, request: &CreateJobRequest) -> ClientResult<JobSnapshot> {
        Ok(JobSnapshot {
            download_id: Some("mock-1".into()),
            status: JobStatus::Queued,
            message: Some(format!("Queued {}", request.url)),
            progress: None,
            speed: None,
            eta: None,
            metadata: None,
            file_size: None,
            file_url: None,
        })
    }

    async fn job_status(&self, _id: &JobId) -> ClientResult<JobSnapshot> {
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ClientError::Api {
                status: 404,
                detail: Some("no more snapshots scripted".into()),
            })
    }

    async fn supported_platforms(&self) -> ClientResult<PlatformList> {
        Ok(PlatformList {
            platforms: vec![
                PlatformInfo {
                    name: "YouTube".into(),
                    features: vec!["video".into(), "audio".into(), "playlists".into()],
                },
                PlatformInfo {
                    name: "TikTok".into(),
                    features: vec!["video".into(), "watermark removal".into()],
                },
            ],
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    println!("URL:      {url}");
    println!("Platform: {}", detect_platform(url));
    println!();

    let tracker = JobTracker::new(ScriptedService::new())
        .with_poll_interval(Duration::from_millis(300));

    let directory = tracker.supported_platforms().await;
    println!("Service supports {} platforms:", directory.len());
    for info in directory.iter() {
        println!("  {} — {}", info.name, info.features.join(", "));
    }
    println!();

    let options = DownloadOptions::default().with_quality(Quality::P1080);
    let job = tracker.submit(url, options).await?;
    println!("Job {} accepted ({})", job.id, job.status);

    let mut views = tracker.subscribe();
    loop {
        views.changed().await?;
        let view = views.borrow().clone();
        let Some(job) = view.state.job() else { break };

        match job.status {
            JobStatus::Processing => {
                println!(
                    "  {} {:>4}  speed {}  eta {}",
                    job.status,
                    job.progress.as_deref().unwrap_or("?"),
                    job.speed.as_deref().unwrap_or("?"),
                    job.eta.as_deref().unwrap_or("?"),
                );
            }
            status => println!("  {status}"),
        }
        if job.status.is_terminal() {
            break;
        }
    }

    if let Some(job) = tracker.job() {
        if job.status == JobStatus::Completed {
            println!();
            if let Some(metadata) = &job.metadata {
                println!("Title:    {}", metadata.title);
                println!("Uploader: {}", metadata.uploader);
                if let Some(duration) = metadata.duration {
                    println!("Duration: {}", format_duration(duration));
                }
                println!("Platform: {}", metadata.platform);
            }
            if let Some(size) = job.file_size {
                println!("Size:     {}", format_file_size(size));
            }
            if let Some(path) = &job.file_url {
                println!("Artifact: {path}");
            }
        }
    }

    Ok(())
}
