// src/store.rs
//! Local tables under the data directory, one CSV file per [`Table`].
//!
//! Every save rewrites the whole file through a temp file + rename, so a reader
//! sees either the previous table or the new one, never a half-written file.
//! Concurrent writers are not coordinated; last writer wins.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::csv::{self, Delim};
use crate::error::PersistenceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    CompetitorChannels,
    BenchmarkChannels,
    RankingSnapshot,
    ShortsResults,
}

pub const CHANNEL_COLUMNS: &[&str] = &["channel_name", "channel_url", "channel_id"];

pub const RANKING_COLUMNS: &[&str] = &[
    "channel_name",
    "subscriber_count",
    "video_count",
    "avg_daily_views",
    "estimated_monthly_revenue",
    "channel_url",
];

pub const SHORTS_COLUMNS: &[&str] = &[
    "title",
    "video_id",
    "channel_title",
    "published_at",
    "view_count",
    "url",
];

impl Table {
    pub const ALL: [Table; 4] = [
        Table::CompetitorChannels,
        Table::BenchmarkChannels,
        Table::RankingSnapshot,
        Table::ShortsResults,
    ];

    /// File stem, also the default export name.
    pub fn stem(self) -> &'static str {
        match self {
            Table::CompetitorChannels => "competitor_channels",
            Table::BenchmarkChannels  => "benchmark_channels",
            Table::RankingSnapshot    => "channel_ranking_cache",
            Table::ShortsResults      => "shorts_results",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::CompetitorChannels | Table::BenchmarkChannels => CHANNEL_COLUMNS,
            Table::RankingSnapshot => RANKING_COLUMNS,
            Table::ShortsResults   => SHORTS_COLUMNS,
        }
    }

    /// Column that names the channel a row belongs to, for per-channel export.
    pub fn channel_column(self) -> Option<usize> {
        match self {
            Table::ShortsResults => Some(2),
            _ => None,
        }
    }

    pub fn headers(self) -> Vec<String> {
        self.columns().iter().map(|c| s!(*c)).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    /// Empty table carrying the canonical header row.
    pub fn empty(table: Table) -> Self {
        Self { headers: Some(table.headers()), rows: Vec::new() }
    }

    pub fn with_rows(table: Table, rows: Vec<Vec<String>>) -> Self {
        Self { headers: Some(table.headers()), rows }
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

#[derive(Clone, Debug)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn path(&self, table: Table) -> PathBuf {
        self.root.join(join!(table.stem(), ".csv"))
    }

    /// `Ok(None)` when the table was never written.
    /// The header row must match the table's columns exactly.
    pub fn load(&self, table: Table) -> Result<Option<DataSet>, PersistenceError> {
        let path = self.path(table);
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(path, e)),
        };

        let mut rows = csv::parse_rows(&text, Delim::Csv.sep());
        if rows.is_empty() {
            return Ok(Some(DataSet::empty(table)));
        }

        let headers = rows.remove(0);
        let expected = table.columns();
        if headers.len() != expected.len() || headers.iter().zip(expected).any(|(h, e)| h.trim() != *e) {
            return Err(PersistenceError::Malformed {
                path,
                reason: format!("expected columns {}, found {}", expected.join(","), headers.join(",")),
            });
        }

        if let Some((i, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected.len()) {
            return Err(PersistenceError::Malformed {
                path,
                reason: format!("row {} has {} fields, expected {}", i + 2, r.len(), expected.len()),
            });
        }

        tracing::debug!(table = table.stem(), rows = rows.len(), "table loaded");
        Ok(Some(DataSet { headers: Some(headers), rows }))
    }

    /// Replace the table with `ds`. The canonical header row is always written.
    pub fn save(&self, table: Table, ds: &DataSet) -> Result<PathBuf, PersistenceError> {
        let path = self.path(table);
        crate::file::ensure_directory(&self.root)?;

        let contents = csv::to_export_string(&Some(table.headers()), &ds.rows, true, Delim::Csv.sep());
        write_atomic(&path, contents.as_bytes())?;

        tracing::debug!(table = table.stem(), rows = ds.rows.len(), path = %path.display(), "table saved");
        Ok(path)
    }
}

/// Write to `<path>.tmp`, flush, then rename over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    let write = || -> std::io::Result<()> {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
        Ok(())
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&tmp);
        return Err(PersistenceError::io(&tmp, e));
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        PersistenceError::io(path, e)
    })
}
