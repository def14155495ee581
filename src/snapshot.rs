// src/snapshot.rs
//! Last ranking result, cached as the `channel_ranking_cache` table.

use std::path::PathBuf;

use crate::error::PersistenceError;
use crate::ranking::{RankingRecord, Snapshot};
use crate::store::{DataSet, Store, Table};

const TABLE: Table = Table::RankingSnapshot;

pub struct SnapshotCache {
    store: Store,
}

impl SnapshotCache {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Replace the cached snapshot. Readers see the old or the new one, never a mix.
    pub fn save(&self, snapshot: &Snapshot) -> Result<PathBuf, PersistenceError> {
        let path = self.store.save(TABLE, &to_dataset(snapshot))?;
        tracing::info!(records = snapshot.len(), path = %path.display(), "snapshot saved");
        Ok(path)
    }

    /// `Ok(None)` when no ranking was ever saved.
    pub fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let Some(ds) = self.store.load(TABLE)? else {
            return Ok(None);
        };
        let records = ds
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                record_from_row(row).ok_or_else(|| PersistenceError::Malformed {
                    path: self.store.path(TABLE),
                    reason: format!("row {} is not a ranking record", i + 2),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Snapshot { records }))
    }
}

pub fn to_dataset(snapshot: &Snapshot) -> DataSet {
    DataSet::with_rows(TABLE, snapshot.records.iter().map(record_to_row).collect())
}

fn record_to_row(r: &RankingRecord) -> Vec<String> {
    vec![
        r.channel_name.clone(),
        r.subscriber_count.to_string(),
        r.video_count.to_string(),
        r.avg_daily_views.to_string(),
        r.estimated_monthly_revenue.to_string(),
        r.channel_url.clone(),
    ]
}

fn record_from_row(row: &[String]) -> Option<RankingRecord> {
    let [name, subs, videos, avg, revenue, url] = row else {
        return None;
    };
    Some(RankingRecord {
        channel_name: name.clone(),
        subscriber_count: subs.trim().parse().ok()?,
        video_count: videos.trim().parse().ok()?,
        avg_daily_views: avg.trim().parse().ok()?,
        estimated_monthly_revenue: revenue.trim().parse().ok()?,
        channel_url: url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn record(name: &str, revenue: f64) -> RankingRecord {
        RankingRecord {
            channel_name: s!(name),
            subscriber_count: 1000,
            video_count: 50,
            avg_daily_views: 300,
            estimated_monthly_revenue: revenue,
            channel_url: s!("https://www.youtube.com/channel/UC1"),
        }
    }

    #[test]
    fn never_saved_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(SnapshotCache::new(Store::new(dir.path())).load().unwrap(), None);
    }

    #[test]
    fn second_save_replaces_first() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(Store::new(dir.path()));
        cache.save(&Snapshot { records: vec![record("Old, Ltd.", 1.5), record("Older", 0.0)] }).unwrap();
        let new = Snapshot { records: vec![record("New", 1800.0)] };
        cache.save(&new).unwrap();
        assert_eq!(cache.load().unwrap(), Some(new));
    }

    #[test]
    fn rendered_revenue_is_plain() {
        let ds = to_dataset(&Snapshot { records: vec![record("A", 1800.0), record("B", 60.4)] });
        assert_eq!(ds.rows[0][4], "1800");
        assert_eq!(ds.rows[1][4], "60.4");
    }

    #[test]
    fn unparseable_counter_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        std::fs::write(
            store.path(Table::RankingSnapshot),
            "channel_name,subscriber_count,video_count,avg_daily_views,estimated_monthly_revenue,channel_url\n\
             A,many,1,1,1,u\n",
        )
        .unwrap();
        assert_matches!(SnapshotCache::new(store).load(), Err(PersistenceError::Malformed { .. }));
    }
}
