// src/metrics.rs
//! Per-channel counters plus the views of videos published inside the
//! trailing window.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::api::{VideoPlatform, in_batches};
use crate::config::consts::{MAX_IDS_PER_CALL, RECENT_UPLOADS};
use crate::error::FetchError;

/// The only `publishedAt` shape accepted for window checks.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoStat {
    pub video_id: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelMetrics {
    pub subscriber_count: u64,
    pub video_count: u64,
    /// Qualifying videos only, newest first.
    pub videos: Vec<VideoStat>,
}

impl ChannelMetrics {
    pub fn total_recent_views(&self) -> u64 {
        self.videos.iter().map(|v| v.view_count).sum()
    }
}

/// Anything that can produce [`ChannelMetrics`] for a channel id. Only videos
/// published in the trailing `window_days` are returned.
pub trait MetricsSource {
    fn fetch(&self, channel_id: &str, window_days: u32) -> Result<ChannelMetrics, FetchError>;
}

impl<M: MetricsSource + ?Sized> MetricsSource for &M {
    fn fetch(&self, channel_id: &str, window_days: u32) -> Result<ChannelMetrics, FetchError> {
        (**self).fetch(channel_id, window_days)
    }
}

/// Parse a strict `YYYY-MM-DDTHH:MM:SSZ` timestamp.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), PUBLISHED_AT_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}

pub struct MetricsFetcher<'a, P: ?Sized> {
    platform: &'a P,
}

impl<'a, P: VideoPlatform + ?Sized> MetricsFetcher<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        Self { platform }
    }

    /// Fetch with an explicit clock. A video published exactly at
    /// `now - window_days` still qualifies. A channel with no uploads in the
    /// window comes back with an empty `videos`.
    pub fn fetch_at(
        &self,
        channel_id: &str,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Result<ChannelMetrics, FetchError> {
        let unavailable = |reason: String| FetchError::unavailable(channel_id, reason);

        let stats = self
            .platform
            .channel_statistics(channel_id)
            .map_err(|e| unavailable(e.to_string()))?
            .ok_or_else(|| unavailable(s!("no such channel")))?;

        let uploads = self
            .platform
            .recent_uploads(channel_id, RECENT_UPLOADS)
            .map_err(|e| unavailable(e.to_string()))?;

        let cutoff = now - Duration::days(i64::from(window_days));
        let qualifying: Vec<(String, DateTime<Utc>)> = uploads
            .into_iter()
            .filter_map(|hit| {
                let id = hit.video_id?;
                let Some(published) = hit.published_at.as_deref().and_then(parse_published_at) else {
                    tracing::debug!(channel_id, video_id = %id, raw = ?hit.published_at, "unparseable publishedAt, skipped");
                    return None;
                };
                (published >= cutoff).then_some((id, published))
            })
            .collect();

        let ids: Vec<String> = qualifying.iter().map(|(id, _)| id.clone()).collect();
        let views: HashMap<String, u64> =
            in_batches(&ids, MAX_IDS_PER_CALL, |batch| self.platform.video_statistics(batch))
                .map_err(|e| unavailable(e.to_string()))?
                .into_iter()
                .map(|v| (v.video_id, v.view_count))
                .collect();

        let videos = qualifying
            .into_iter()
            .map(|(video_id, published_at)| {
                let view_count = *views
                    .get(&video_id)
                    .ok_or_else(|| unavailable(format!("no statistics for video {video_id}")))?;
                Ok(VideoStat { video_id, published_at, view_count })
            })
            .collect::<Result<Vec<_>, FetchError>>()?;

        tracing::debug!(
            channel_id,
            subscribers = stats.subscriber_count,
            qualifying = videos.len(),
            "metrics fetched"
        );
        Ok(ChannelMetrics {
            subscriber_count: stats.subscriber_count,
            video_count: stats.video_count,
            videos,
        })
    }
}

impl<P: VideoPlatform + ?Sized> MetricsSource for MetricsFetcher<'_, P> {
    fn fetch(&self, channel_id: &str, window_days: u32) -> Result<ChannelMetrics, FetchError> {
        self.fetch_at(channel_id, window_days, Utc::now())
    }
}
