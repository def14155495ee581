// src/ranking.rs
//! Revenue-estimate ranking over a roster.
//!
//! One fetch per channel. Channels whose metrics cannot be fetched are left
//! out of the snapshot and listed in the report instead.

use std::cmp::Ordering;

use crate::config::options::RankOptions;
use crate::core::handle::channel_id_url;
use crate::directory::ChannelRecord;
use crate::error::FetchError;
use crate::metrics::{ChannelMetrics, MetricsSource};
use crate::progress::{NullProgress, Progress};

#[derive(Clone, Debug, PartialEq)]
pub struct RankingRecord {
    pub channel_name: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub avg_daily_views: u64,
    pub estimated_monthly_revenue: f64,
    /// `https://www.youtube.com/channel/<id>`
    pub channel_url: String,
}

/// One complete ranking, highest estimated revenue first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub records: Vec<RankingRecord>,
}

impl Snapshot {
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

/// Views per day over the window, rounded down.
pub fn avg_daily_views(total_views: u64, window_days: u32) -> u64 {
    total_views / u64::from(window_days.max(1))
}

pub fn estimated_monthly_revenue(avg_daily_views: u64, window_days: u32, revenue_rate: f64) -> f64 {
    avg_daily_views.saturating_mul(u64::from(window_days)) as f64 * revenue_rate
}

impl RankingRecord {
    pub fn from_metrics(channel: &ChannelRecord, metrics: &ChannelMetrics, opts: &RankOptions) -> Self {
        let avg = avg_daily_views(metrics.total_recent_views(), opts.window_days);
        Self {
            channel_name: channel.name.clone(),
            subscriber_count: metrics.subscriber_count,
            video_count: metrics.video_count,
            avg_daily_views: avg,
            estimated_monthly_revenue: estimated_monthly_revenue(avg, opts.window_days, opts.revenue_rate),
            channel_url: channel_id_url(&channel.id),
        }
    }
}

/// A ranking run: the snapshot plus the channels it had to leave out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankReport {
    pub snapshot: Snapshot,
    pub skipped: Vec<FetchError>,
}

pub struct RankingEngine<M> {
    source: M,
    options: RankOptions,
}

impl<M: MetricsSource> RankingEngine<M> {
    pub fn new(source: M, options: RankOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &RankOptions { &self.options }

    pub fn rank(&self, channels: &[ChannelRecord]) -> Snapshot {
        self.rank_with_report(channels, &mut NullProgress).snapshot
    }

    pub fn rank_with_report(&self, channels: &[ChannelRecord], progress: &mut dyn Progress) -> RankReport {
        let mut report = RankReport::default();
        progress.begin(channels.len());

        for channel in channels {
            match self.source.fetch(&channel.id, self.options.window_days) {
                Ok(metrics) => {
                    let record = RankingRecord::from_metrics(channel, &metrics, &self.options);
                    tracing::debug!(
                        channel_id = %channel.id,
                        avg_daily_views = record.avg_daily_views,
                        revenue = record.estimated_monthly_revenue,
                        "channel ranked"
                    );
                    progress.item_done(&channel.name);
                    report.snapshot.records.push(record);
                }
                Err(e) => {
                    tracing::warn!(channel_id = %channel.id, error = %e, "channel skipped");
                    progress.item_failed(&channel.name, &e.to_string());
                    report.skipped.push(e);
                }
            }
        }

        // stable: ties keep roster order
        report
            .snapshot
            .records
            .sort_by(|a, b| by_revenue_desc(a.estimated_monthly_revenue, b.estimated_monthly_revenue));

        tracing::info!(
            ranked = report.snapshot.len(),
            skipped = report.skipped.len(),
            "ranking finished"
        );
        progress.finish();
        report
    }
}

fn by_revenue_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
