// src/shorts.rs
//! Shorts benchmark: the latest shorts of each benchmark channel that clear a
//! view threshold.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;

use crate::api::{VideoDetails, VideoPlatform, in_batches};
use crate::config::consts::MAX_IDS_PER_CALL;
use crate::config::options::ShortsOptions;
use crate::core::handle::{extract_handle, short_url, shorts_page_url};
use crate::core::html::extract_short_ids;
use crate::core::net::http_get;
use crate::directory::ChannelRecord;
use crate::error::{ApiError, PersistenceError};
use crate::progress::Progress;
use crate::store::{DataSet, Store, Table};

pub const PUBLISHED_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of a channel's shorts ids, most recent listing first.
pub trait ShortsListing {
    fn short_ids(&self, handle: &str) -> Result<Vec<String>, ApiError>;
}

/// Scans the public `/@<handle>/shorts` page.
pub struct PageScanListing {
    client: Client,
}

impl PageScanListing {
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl ShortsListing for PageScanListing {
    fn short_ids(&self, handle: &str) -> Result<Vec<String>, ApiError> {
        let page = http_get(&self.client, &shorts_page_url(handle))?;
        Ok(extract_short_ids(&page))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortRow {
    pub title: String,
    pub video_id: String,
    pub channel_title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u64,
    pub url: String,
}

impl ShortRow {
    fn from_details(d: VideoDetails) -> Self {
        let published_at = d.published_at.as_deref().and_then(parse_timestamp);
        let url = short_url(&d.video_id);
        Self {
            title: d.title,
            video_id: d.video_id,
            channel_title: d.channel_title,
            published_at,
            view_count: d.view_count,
            url,
        }
    }

    fn to_row(&self) -> Vec<String> {
        let published = self
            .published_at
            .map(|t| t.format(PUBLISHED_DISPLAY_FORMAT).to_string())
            .unwrap_or_default();
        vec![
            self.title.clone(),
            self.video_id.clone(),
            self.channel_title.clone(),
            published,
            self.view_count.to_string(),
            self.url.clone(),
        ]
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok().map(|t| t.with_timezone(&Utc))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShortsReport {
    pub rows: Vec<ShortRow>,
    /// `(channel name, reason)`
    pub failed: Vec<(String, String)>,
}

impl ShortsReport {
    pub fn to_dataset(&self) -> DataSet {
        DataSet::with_rows(Table::ShortsResults, self.rows.iter().map(ShortRow::to_row).collect())
    }

    /// Replace the cached shorts table.
    pub fn save(&self, store: &Store) -> Result<PathBuf, PersistenceError> {
        store.save(Table::ShortsResults, &self.to_dataset())
    }
}

/// Newest first (undated last), keep `max_per_channel`, then apply the view
/// threshold. The cut happens before the filter, so a channel can end up
/// with fewer rows than the cap.
pub fn select_latest(mut videos: Vec<ShortRow>, opts: &ShortsOptions) -> Vec<ShortRow> {
    videos.sort_by(|a, b| match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    videos.truncate(opts.max_per_channel());
    let min = opts.min_view_count();
    videos.retain(|v| v.view_count >= min);
    videos
}

fn channel_shorts<P, L>(
    platform: &P,
    listing: &L,
    channel: &ChannelRecord,
    opts: &ShortsOptions,
) -> Result<Vec<ShortRow>, String>
where
    P: VideoPlatform + ?Sized,
    L: ShortsListing + ?Sized,
{
    let handle = extract_handle(&channel.url).ok_or_else(|| s!("no handle in channel URL"))?;
    let ids = listing.short_ids(&handle).map_err(|e| e.to_string())?;
    tracing::debug!(%handle, listed = ids.len(), "shorts listed");

    let details = in_batches(&ids, MAX_IDS_PER_CALL, |batch| platform.video_details(batch))
        .map_err(|e| e.to_string())?;
    Ok(select_latest(details.into_iter().map(ShortRow::from_details).collect(), opts))
}

/// Run the benchmark over `channels`. A failing channel is reported and the
/// rest carry on.
pub fn collect_shorts<P, L>(
    platform: &P,
    listing: &L,
    channels: &[ChannelRecord],
    opts: &ShortsOptions,
    progress: &mut dyn Progress,
) -> ShortsReport
where
    P: VideoPlatform + ?Sized,
    L: ShortsListing + ?Sized,
{
    let mut report = ShortsReport::default();
    progress.begin(channels.len());

    for channel in channels {
        match channel_shorts(platform, listing, channel, opts) {
            Ok(rows) => {
                progress.item_done(&channel.name);
                report.rows.extend(rows);
            }
            Err(reason) => {
                tracing::warn!(channel_id = %channel.id, %reason, "shorts skipped");
                progress.item_failed(&channel.name, &reason);
                report.failed.push((channel.name.clone(), reason));
            }
        }
    }

    tracing::info!(
        rows = report.rows.len(),
        failed = report.failed.len(),
        min_views = opts.min_view_count(),
        "shorts collected"
    );
    progress.finish();
    report
}
