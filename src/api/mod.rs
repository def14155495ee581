// src/api/mod.rs
//! The video platform seen by the rest of the crate.
//!
//! [`VideoPlatform`] is the seam between the pipeline and YouTube: the
//! resolver, the metrics fetcher and the shorts benchmark only talk to this
//! trait. [`youtube::YouTubeApi`] is the real implementation; tests plug in
//! fakes.

pub mod youtube;

use crate::error::ApiError;

pub use youtube::YouTubeApi;

/// One `search` hit of type channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelHit {
    pub channel_id: Option<String>,
    pub title: Option<String>,
}

/// Aggregate counters of a channel; absent counters are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelStatistics {
    pub subscriber_count: u64,
    pub video_count: u64,
}

/// One hit of the date-ordered per-channel search. Hits that are not videos
/// (playlists, the channel itself) have no `video_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadHit {
    pub video_id: Option<String>,
    /// Raw `publishedAt`, validated by the caller.
    pub published_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VideoStatistics {
    pub video_id: String,
    pub view_count: u64,
}

/// `snippet,statistics` of one video.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VideoDetails {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: Option<String>,
    pub view_count: u64,
}

pub trait VideoPlatform {
    /// Free-text search restricted to channels.
    fn search_channels(&self, query: &str, max_results: u32) -> Result<Vec<ChannelHit>, ApiError>;

    /// `Ok(None)` when the platform knows no such channel.
    fn channel_statistics(&self, channel_id: &str) -> Result<Option<ChannelStatistics>, ApiError>;

    /// Most recent uploads first.
    fn recent_uploads(&self, channel_id: &str, max_results: u32) -> Result<Vec<UploadHit>, ApiError>;

    /// At most 50 ids per call. Unknown ids are simply missing from the result.
    fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStatistics>, ApiError>;

    /// At most 50 ids per call. Unknown ids are simply missing from the result.
    fn video_details(&self, video_ids: &[String]) -> Result<Vec<VideoDetails>, ApiError>;
}

impl<P: VideoPlatform + ?Sized> VideoPlatform for &P {
    fn search_channels(&self, query: &str, max_results: u32) -> Result<Vec<ChannelHit>, ApiError> {
        (**self).search_channels(query, max_results)
    }
    fn channel_statistics(&self, channel_id: &str) -> Result<Option<ChannelStatistics>, ApiError> {
        (**self).channel_statistics(channel_id)
    }
    fn recent_uploads(&self, channel_id: &str, max_results: u32) -> Result<Vec<UploadHit>, ApiError> {
        (**self).recent_uploads(channel_id, max_results)
    }
    fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStatistics>, ApiError> {
        (**self).video_statistics(video_ids)
    }
    fn video_details(&self, video_ids: &[String]) -> Result<Vec<VideoDetails>, ApiError> {
        (**self).video_details(video_ids)
    }
}

/// Run `call` over `ids` in chunks of at most `chunk` and concatenate.
/// The first failing chunk aborts.
pub fn in_batches<T, F>(ids: &[String], chunk: usize, mut call: F) -> Result<Vec<T>, ApiError>
where
    F: FnMut(&[String]) -> Result<Vec<T>, ApiError>,
{
    let mut out = Vec::with_capacity(ids.len());
    for batch in ids.chunks(chunk.max(1)) {
        out.extend(call(batch)?);
    }
    Ok(out)
}
