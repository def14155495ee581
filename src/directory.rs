// src/directory.rs
//! The two channel rosters (competitors, benchmarks), each persisted as its
//! own table and keyed by channel id.

use std::fmt;

use crate::api::VideoPlatform;
use crate::core::sanitize::input_lines;
use crate::error::PersistenceError;
use crate::progress::Progress;
use crate::resolver::HandleResolver;
use crate::store::{DataSet, Store, Table};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelRecord {
    pub name: String,
    /// Canonical `https://www.youtube.com/@<handle>`.
    pub url: String,
    pub id: String,
}

impl ChannelRecord {
    fn to_row(&self) -> Vec<String> {
        row![self.name.as_str(), self.url.as_str(), self.id.as_str()]
    }

    fn from_row(row: &[String]) -> Option<Self> {
        match row {
            [name, url, id] => Some(Self {
                name: s!(name.trim()),
                url: s!(url.trim()),
                id: s!(id.trim()),
            }),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Roster {
    #[default]
    Competitor,
    Benchmark,
}

impl Roster {
    pub fn table(self) -> Table {
        match self {
            Roster::Competitor => Table::CompetitorChannels,
            Roster::Benchmark => Table::BenchmarkChannels,
        }
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Roster::Competitor => "competitor",
            Roster::Benchmark => "benchmark",
        })
    }
}

/// Outcome of one batch registration, in input order. `accepted` holds the
/// resolved records; the other buckets hold the input lines as given (trimmed).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registration {
    pub accepted: Vec<ChannelRecord>,
    pub duplicates: Vec<String>,
    pub failed: Vec<String>,
}

pub struct ChannelDirectory {
    store: Store,
    roster: Roster,
}

impl ChannelDirectory {
    pub fn new(store: Store, roster: Roster) -> Self {
        Self { store, roster }
    }

    pub fn roster(&self) -> Roster { self.roster }

    /// All records in insertion order. A malformed table reads as empty and
    /// is rewritten by the next successful registration.
    pub fn list(&self) -> Result<Vec<ChannelRecord>, PersistenceError> {
        let ds = match self.store.load(self.roster.table()) {
            Ok(Some(ds)) => ds,
            Ok(None) => return Ok(Vec::new()),
            Err(PersistenceError::Malformed { path, reason }) => {
                tracing::warn!(roster = %self.roster, path = %path.display(), %reason, "channel table unreadable, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        Ok(ds.rows.iter().filter_map(|r| ChannelRecord::from_row(r)).collect())
    }

    /// Resolve each non-blank input line and append the new channels in one
    /// write. Nothing is written when no input was accepted.
    ///
    /// An id already on the roster, or accepted earlier in the same batch, is
    /// a duplicate: ids stay unique within a roster.
    pub fn register<P: VideoPlatform + ?Sized>(
        &self,
        resolver: &HandleResolver<'_, P>,
        raw_inputs: &[String],
        progress: &mut dyn Progress,
    ) -> Result<Registration, PersistenceError> {
        let lines: Vec<String> = raw_inputs.iter().flat_map(|s| input_lines(s)).collect();
        let mut records = self.list()?;
        let mut reg = Registration::default();

        progress.begin(lines.len());
        for line in lines {
            match resolver.resolve(&line) {
                Ok(rec) if records.iter().any(|r| r.id == rec.id) => {
                    tracing::debug!(input = %line, channel_id = %rec.id, "already registered");
                    progress.item_done(&line);
                    reg.duplicates.push(line);
                }
                Ok(rec) => {
                    tracing::info!(roster = %self.roster, channel_id = %rec.id, name = %rec.name, "channel registered");
                    progress.item_done(&line);
                    records.push(rec.clone());
                    reg.accepted.push(rec);
                }
                Err(e) => {
                    tracing::info!(input = %line, error = %e, "registration failed");
                    progress.item_failed(&line, &e.to_string());
                    reg.failed.push(line);
                }
            }
        }

        if !reg.accepted.is_empty() {
            self.save(&records)?;
        }
        progress.finish();
        Ok(reg)
    }

    /// Drop the record with `channel_id`. Unknown ids leave the table untouched.
    pub fn remove(&self, channel_id: &str) -> Result<Option<ChannelRecord>, PersistenceError> {
        let mut records = self.list()?;
        let Some(pos) = records.iter().position(|r| r.id == channel_id.trim()) else {
            return Ok(None);
        };
        let removed = records.remove(pos);
        self.save(&records)?;
        tracing::info!(roster = %self.roster, channel_id = %removed.id, "channel removed");
        Ok(Some(removed))
    }

    fn save(&self, records: &[ChannelRecord]) -> Result<(), PersistenceError> {
        let table = self.roster.table();
        let rows = records.iter().map(ChannelRecord::to_row).collect();
        self.store.save(table, &DataSet::with_rows(table, rows))?;
        Ok(())
    }
}
