// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use gtube::api::{ChannelHit, ChannelStatistics, UploadHit, VideoDetails, VideoPlatform, VideoStatistics};
use gtube::error::ApiError;
use gtube::shorts::ShortsListing;

pub const STAMP: &str = "%Y-%m-%dT%H:%M:%SZ";

/// In-memory stand-in for the YouTube Data API.
#[derive(Default)]
pub struct FakePlatform {
    handles: HashMap<String, ChannelHit>,
    stats: HashMap<String, ChannelStatistics>,
    uploads: HashMap<String, Vec<UploadHit>>,
    videos: HashMap<String, VideoDetails>,
    down: HashSet<String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakePlatform {
    pub fn new() -> Self { Self::default() }

    /// `@handle` resolves to `id` / `title`.
    pub fn channel(mut self, handle: &str, id: &str, title: &str) -> Self {
        self.handles.insert(
            format!("@{handle}"),
            ChannelHit { channel_id: Some(id.into()), title: Some(title.into()) },
        );
        self
    }

    pub fn stats(mut self, id: &str, subscribers: u64, videos: u64) -> Self {
        self.stats.insert(id.into(), ChannelStatistics { subscriber_count: subscribers, video_count: videos });
        self
    }

    pub fn upload(mut self, channel_id: &str, video_id: &str, published: DateTime<Utc>, views: u64) -> Self {
        self.uploads.entry(channel_id.into()).or_default().push(UploadHit {
            video_id: Some(video_id.into()),
            published_at: Some(published.format(STAMP).to_string()),
        });
        self.videos.insert(
            video_id.into(),
            VideoDetails {
                video_id: video_id.into(),
                title: format!("title {video_id}"),
                channel_title: channel_id.into(),
                published_at: Some(published.format(STAMP).to_string()),
                view_count: views,
            },
        );
        self
    }

    /// Every call about this channel id fails with a 500.
    pub fn down(mut self, channel_id: &str) -> Self {
        self.down.insert(channel_id.into());
        self
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, channel_id: &str, endpoint: &str) -> Result<(), ApiError> {
        if self.down.contains(channel_id) {
            return Err(ApiError::Status { endpoint: endpoint.into(), status: 500, body: String::new() });
        }
        Ok(())
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl VideoPlatform for FakePlatform {
    fn search_channels(&self, query: &str, _max_results: u32) -> Result<Vec<ChannelHit>, ApiError> {
        self.record(format!("search {query}"));
        Ok(self.handles.get(query).cloned().into_iter().collect())
    }

    fn channel_statistics(&self, channel_id: &str) -> Result<Option<ChannelStatistics>, ApiError> {
        self.record(format!("channels {channel_id}"));
        self.check(channel_id, "channels")?;
        Ok(self.stats.get(channel_id).copied())
    }

    fn recent_uploads(&self, channel_id: &str, max_results: u32) -> Result<Vec<UploadHit>, ApiError> {
        self.record(format!("uploads {channel_id}"));
        self.check(channel_id, "search")?;
        let mut hits = self.uploads.get(channel_id).cloned().unwrap_or_default();
        hits.truncate(max_results as usize);
        Ok(hits)
    }

    fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStatistics>, ApiError> {
        self.record(format!("videos {}", video_ids.len()));
        Ok(video_ids
            .iter()
            .filter_map(|id| self.videos.get(id))
            .map(|v| VideoStatistics { video_id: v.video_id.clone(), view_count: v.view_count })
            .collect())
    }

    fn video_details(&self, video_ids: &[String]) -> Result<Vec<VideoDetails>, ApiError> {
        self.record(format!("details {}", video_ids.len()));
        Ok(video_ids.iter().filter_map(|id| self.videos.get(id).cloned()).collect())
    }
}

/// Shorts listing from a fixed handle → ids table; unknown handles fail.
#[derive(Default)]
pub struct FakeListing(pub HashMap<String, Vec<String>>);

impl FakeListing {
    pub fn with(mut self, handle: &str, ids: &[&str]) -> Self {
        self.0.insert(handle.into(), ids.iter().map(|s| s.to_string()).collect());
        self
    }
}

impl ShortsListing for FakeListing {
    fn short_ids(&self, handle: &str) -> Result<Vec<String>, ApiError> {
        self.0.get(handle).cloned().ok_or_else(|| ApiError::Status {
            endpoint: format!("/@{handle}/shorts"),
            status: 404,
            body: String::new(),
        })
    }
}
