use std::fmt;

pub mod client;

pub use client::{HttpTimedTextApi, TimedTextApi};

use crate::extractors::{self, VideoId};
use crate::SubtitlerError;

/// Subtitles of one video, reduced to plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRecord {
    pub video_id: VideoId,

    /// Sanitized title, or the video id when the title couldn't be fetched
    pub title: String,

    /// All caption entries joined by single spaces
    pub text: String,
}

/// Result of downloading one video's subtitles
#[derive(Debug)]
pub enum DownloadOutcome {
    Success(SubtitleRecord),
    Failure {
        reason: SubtitlerError,
        /// The link or video id the failure is about
        link: String,
    },
}

impl DownloadOutcome {
    pub fn failure(reason: SubtitlerError, link: impl Into<String>) -> Self {
        DownloadOutcome::Failure {
            reason,
            link: link.into(),
        }
    }

    /// Attribute a failure to `link`, typically the URL the video id came from
    pub fn for_link(self, link: impl Into<String>) -> Self {
        match self {
            DownloadOutcome::Failure { reason, .. } => DownloadOutcome::failure(reason, link),
            success => success,
        }
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOutcome::Success(record) => write!(f, "{}", record.title),
            DownloadOutcome::Failure { reason, link } => write!(f, "'{}', {}", link, reason),
        }
    }
}

/// Downloads and extracts subtitles for single videos
pub struct Fetcher<A> {
    api: A,
}

impl<A: TimedTextApi> Fetcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetch the subtitles of `video_id` in `language`.
    ///
    /// Never fails past this point: every problem ends up in
    /// `DownloadOutcome::Failure`. A missing title is not a problem, the video id
    /// stands in for it.
    pub async fn download(&self, video_id: &VideoId, language: &str) -> DownloadOutcome {
        match self.try_download(video_id, language).await {
            Ok(record) => DownloadOutcome::Success(record),
            Err(reason) => DownloadOutcome::failure(reason, video_id.as_str()),
        }
    }

    async fn try_download(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<SubtitleRecord, SubtitlerError> {
        let available = self.available_languages(video_id).await?;
        if !available.iter().any(|code| code == language) {
            return Err(SubtitlerError::LanguageUnavailable { available });
        }

        let title = match self.title(video_id).await {
            Ok(title) => title,
            Err(e) => {
                tracing::warn!("Using video id as title for {}: {:#}", video_id, anyhow::Error::new(e));
                extractors::sanitize_title(video_id.as_str())
            }
        };

        let raw = self
            .api
            .timed_text(video_id, language)
            .await
            .map_err(SubtitlerError::SubtitleUnavailable)?;
        let text = extractors::extract_subtitle_text(&raw.replace('\n', " "))
            .map_err(SubtitlerError::SubtitleUnavailable)?;

        Ok(SubtitleRecord {
            video_id: video_id.clone(),
            title,
            text,
        })
    }

    async fn available_languages(&self, video_id: &VideoId) -> Result<Vec<String>, SubtitlerError> {
        let raw = self
            .api
            .track_list(video_id)
            .await
            .map_err(SubtitlerError::LanguageListUnavailable)?;

        extractors::extract_language_codes(&raw).map_err(SubtitlerError::LanguageListUnavailable)
    }

    async fn title(&self, video_id: &VideoId) -> Result<String, SubtitlerError> {
        let raw = self
            .api
            .video_info(video_id)
            .await
            .map_err(SubtitlerError::MetadataUnavailable)?;

        extractors::extract_title(&raw).map_err(SubtitlerError::MetadataUnavailable)
    }
}
