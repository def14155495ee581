// src/api/youtube.rs
//! YouTube Data API v3 over blocking HTTPS.

use reqwest::blocking::Client;
use serde::{Deserialize, de::DeserializeOwned};

use super::{ChannelHit, ChannelStatistics, UploadHit, VideoDetails, VideoPlatform, VideoStatistics};
use crate::config::consts::MAX_IDS_PER_CALL;
use crate::core::net;
use crate::error::ApiError;

pub struct YouTubeApi {
    client: Client,
    base: String,
    api_key: String,
}

impl YouTubeApi {
    pub fn new(api_key: impl Into<String>, base: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            client: net::client()?,
            base: base.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn client(&self) -> &Client { &self.client }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let url = format!("{}/{}", self.base, endpoint);
        tracing::debug!(endpoint, ?query, "api call");

        let resp = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()?;
        let resp = net::check_status(resp, endpoint)?;
        let body = resp.text()?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed {
            endpoint: s!(endpoint),
            reason: e.to_string(),
        })
    }
}

impl VideoPlatform for YouTubeApi {
    fn search_channels(&self, query: &str, max_results: u32) -> Result<Vec<ChannelHit>, ApiError> {
        let max = max_results.to_string();
        let page: ListResponse<SearchItem> = self.get(
            "search",
            &[("part", "snippet"), ("q", query), ("type", "channel"), ("maxResults", max.as_str())],
        )?;
        Ok(page
            .items
            .into_iter()
            .map(|it| ChannelHit {
                channel_id: it.id.channel_id,
                title: it.snippet.and_then(|s| s.title),
            })
            .collect())
    }

    fn channel_statistics(&self, channel_id: &str) -> Result<Option<ChannelStatistics>, ApiError> {
        let page: ListResponse<ChannelItem> =
            self.get("channels", &[("part", "statistics"), ("id", channel_id)])?;
        let Some(item) = page.items.into_iter().next() else {
            return Ok(None);
        };
        let Some(stats) = item.statistics else {
            return Err(ApiError::Malformed {
                endpoint: s!("channels"),
                reason: format!("no statistics for {channel_id}"),
            });
        };
        Ok(Some(ChannelStatistics {
            subscriber_count: count("channels", "subscriberCount", stats.subscriber_count)?,
            video_count: count("channels", "videoCount", stats.video_count)?,
        }))
    }

    fn recent_uploads(&self, channel_id: &str, max_results: u32) -> Result<Vec<UploadHit>, ApiError> {
        let max = max_results.to_string();
        let page: ListResponse<SearchItem> = self.get(
            "search",
            &[("part", "snippet"), ("channelId", channel_id), ("order", "date"), ("maxResults", max.as_str())],
        )?;
        Ok(page
            .items
            .into_iter()
            .map(|it| UploadHit {
                video_id: it.id.video_id,
                published_at: it.snippet.and_then(|s| s.published_at),
            })
            .collect())
    }

    fn video_statistics(&self, video_ids: &[String]) -> Result<Vec<VideoStatistics>, ApiError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = joined_ids(video_ids)?;
        let page: ListResponse<VideoItem> = self.get("videos", &[("part", "statistics"), ("id", ids.as_str())])?;
        page.items
            .into_iter()
            .map(|it| {
                let views = it.statistics.and_then(|s| s.view_count);
                Ok(VideoStatistics {
                    video_id: it.id,
                    view_count: count("videos", "viewCount", views)?,
                })
            })
            .collect()
    }

    fn video_details(&self, video_ids: &[String]) -> Result<Vec<VideoDetails>, ApiError> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = joined_ids(video_ids)?;
        let page: ListResponse<VideoItem> =
            self.get("videos", &[("part", "snippet,statistics"), ("id", ids.as_str())])?;
        page.items
            .into_iter()
            .map(|it| {
                let snippet = it.snippet.unwrap_or_default();
                let views = it.statistics.and_then(|s| s.view_count);
                Ok(VideoDetails {
                    video_id: it.id,
                    title: snippet.title.unwrap_or_default(),
                    channel_title: snippet.channel_title.unwrap_or_default(),
                    published_at: snippet.published_at,
                    view_count: count("videos", "viewCount", views)?,
                })
            })
            .collect()
    }
}

fn joined_ids(video_ids: &[String]) -> Result<String, ApiError> {
    if video_ids.len() > MAX_IDS_PER_CALL {
        return Err(ApiError::Malformed {
            endpoint: s!("videos"),
            reason: format!("{} ids in one call, limit is {MAX_IDS_PER_CALL}", video_ids.len()),
        });
    }
    Ok(video_ids.join(","))
}

/// Counters arrive as decimal strings (occasionally as numbers). Absent → 0.
fn count(endpoint: &str, field: &str, value: Option<Count>) -> Result<u64, ApiError> {
    match value {
        None => Ok(0),
        Some(Count::Num(n)) => Ok(n),
        Some(Count::Str(raw)) => raw.trim().parse::<u64>().map_err(|_| ApiError::Malformed {
            endpoint: s!(endpoint),
            reason: format!("{field} is not a count: {raw:?}"),
        }),
    }
}

/* ---------------- Wire shapes ---------------- */

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Count {
    Num(u64),
    Str(String),
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchId {
    channel_id: Option<String>,
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: Option<String>,
    channel_title: Option<String>,
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    statistics: Option<ChannelStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelStats {
    subscriber_count: Option<Count>,
    video_count: Option<Count>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: Option<Snippet>,
    statistics: Option<VideoStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStats {
    view_count: Option<Count>,
}
