//! Submission options.
//!
//! All option enums carry the exact wire names the creation endpoint
//! expects (`"best"`, `"1080p"`, `"mp4"`, ...). Options are immutable once
//! a job is submitted.

use serde::{Deserialize, Serialize};

/// Requested output quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    /// Highest available quality.
    #[default]
    #[serde(rename = "best")]
    Best,
    /// 1080p HD.
    #[serde(rename = "1080p")]
    P1080,
    /// 720p.
    #[serde(rename = "720p")]
    P720,
    /// 480p.
    #[serde(rename = "480p")]
    P480,
    /// Lowest quality, fastest to produce.
    #[serde(rename = "worst")]
    Worst,
}

impl Quality {
    /// Wire name of this quality.
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Best => "best",
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::Worst => "worst",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested container format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFormat {
    /// MP4 container.
    #[default]
    Mp4,
    /// WebM container.
    Webm,
    /// Matroska container.
    Mkv,
}

impl MediaFormat {
    /// Wire name of this format.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaFormat::Mp4 => "mp4",
            MediaFormat::Webm => "webm",
            MediaFormat::Mkv => "mkv",
        }
    }
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options attached to a job at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// Requested quality.
    pub quality: Quality,
    /// Requested container format.
    pub format: MediaFormat,
    /// Extract audio only.
    pub audio_only: bool,
    /// Strip platform watermarks from the produced artifact.
    pub remove_watermark: bool,
}

impl Default for DownloadOptions {
    /// Best-quality MP4 video with watermark removal on.
    fn default() -> Self {
        Self {
            quality: Quality::Best,
            format: MediaFormat::Mp4,
            audio_only: false,
            remove_watermark: true,
        }
    }
}

impl DownloadOptions {
    /// Set the requested quality.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    /// Set the requested container format.
    pub fn with_format(mut self, format: MediaFormat) -> Self {
        self.format = format;
        self
    }

    /// Toggle audio-only extraction.
    pub fn with_audio_only(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    /// Toggle watermark removal.
    pub fn with_remove_watermark(mut self, remove_watermark: bool) -> Self {
        self.remove_watermark = remove_watermark;
        self
    }
}
