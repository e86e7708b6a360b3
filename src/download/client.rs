use async_trait::async_trait;
use reqwest::{Client, Request};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::extractors::VideoId;
use crate::FetchError;

/// Access to the three documents the platform serves for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimedTextApi: Send + Sync {
    /// XML list of the caption tracks available for the video
    async fn track_list(&self, video_id: &VideoId) -> Result<String, FetchError>;

    /// XML metadata of the video, including its title
    async fn video_info(&self, video_id: &VideoId) -> Result<String, FetchError>;

    /// Timed-text XML captions of the video in the given language
    async fn timed_text(&self, video_id: &VideoId, language: &str) -> Result<String, FetchError>;
}

/// `TimedTextApi` over plain HTTP GET requests
pub struct HttpTimedTextApi {
    client: Client,
    api: ApiConfig,
}

impl HttpTimedTextApi {
    pub fn new(api: ApiConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(user_agent) = &api.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(secs) = api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            api,
        })
    }

    /// `type=list&v=<id>` on the track list endpoint
    pub fn track_list_request(&self, video_id: &VideoId) -> Result<Request, FetchError> {
        self.request(
            &self.api.track_list_url,
            &[("type", "list"), ("v", video_id.as_str())],
        )
    }

    /// oEmbed lookup of the watch page, `url=<watch>?v=<id>&format=xml`
    pub fn video_info_request(&self, video_id: &VideoId) -> Result<Request, FetchError> {
        let watch_url = format!("{}?v={}", self.api.watch_url, video_id);
        self.request(
            &self.api.video_info_url,
            &[("url", watch_url.as_str()), ("format", "xml")],
        )
    }

    /// `lang=<lang>&v=<id>` on the timed-text endpoint
    pub fn timed_text_request(&self, video_id: &VideoId, language: &str) -> Result<Request, FetchError> {
        self.request(
            &self.api.timed_text_url,
            &[("lang", language), ("v", video_id.as_str())],
        )
    }

    fn request(&self, url: &str, query: &[(&str, &str)]) -> Result<Request, FetchError> {
        Ok(self.client.get(url).query(query).build()?)
    }

    async fn fetch(&self, request: Request) -> Result<String, FetchError> {
        let response = self.client.execute(request).await?;
        tracing::debug!("GET {} -> {}", response.url(), response.status());

        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}

#[async_trait]
impl TimedTextApi for HttpTimedTextApi {
    async fn track_list(&self, video_id: &VideoId) -> Result<String, FetchError> {
        self.fetch(self.track_list_request(video_id)?).await
    }

    async fn video_info(&self, video_id: &VideoId) -> Result<String, FetchError> {
        self.fetch(self.video_info_request(video_id)?).await
    }

    async fn timed_text(&self, video_id: &VideoId, language: &str) -> Result<String, FetchError> {
        self.fetch(self.timed_text_request(video_id, language)?).await
    }
}
