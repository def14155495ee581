// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::csv::Delim;
use crate::store::Table;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub rank: RankOptions,
    pub shorts: ShortsOptions,
}

/// Knobs of the revenue estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankOptions {
    /// Currency per view.
    pub revenue_rate: f64,
    /// Trailing window, also the divisor of the daily average.
    pub window_days: u32,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            revenue_rate: REVENUE_RATE,
            window_days: WINDOW_DAYS,
        }
    }
}

/// Shorts benchmark filters. Values are clamped to the ranges the dashboard
/// sliders allowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShortsOptions {
    max_per_channel: usize,
    min_views: u64,
}

impl Default for ShortsOptions {
    fn default() -> Self {
        Self {
            max_per_channel: SHORTS_MAX_PER_CHANNEL,
            min_views: SHORTS_MIN_VIEWS,
        }
    }
}

impl ShortsOptions {
    pub fn new(max_per_channel: usize, min_views: u64) -> Self {
        let (lo, hi) = SHORTS_MAX_PER_CHANNEL_RANGE;
        let (vlo, vhi) = SHORTS_MIN_VIEWS_RANGE;
        Self {
            max_per_channel: max_per_channel.clamp(lo, hi),
            min_views: min_views.clamp(vlo, vhi),
        }
    }

    pub fn max_per_channel(&self) -> usize { self.max_per_channel }

    /// Threshold in units of 10k views, as entered.
    pub fn min_views(&self) -> u64 { self.min_views }

    /// Threshold as a raw view count.
    pub fn min_view_count(&self) -> u64 { self.min_views * SHORTS_VIEW_UNIT }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportType {
    SingleFile,
    /// One file per channel; only tables with a channel column support it.
    PerChannel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => Delim::Csv.sep(), ExportFormat::Tsv => Delim::Tsv.sep() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::SingleFile,
            out_path: OutputPath::default(),
            include_headers: false,
        }
    }
}

impl ExportOptions {
    /// Defaults pointing at `out/<table>.<ext>`.
    pub fn for_table(table: Table) -> Self {
        let mut opts = Self::default();
        opts.out_path.file_stem = OsString::from(table.stem());
        opts
    }

    /// SingleFile: the file to write. PerChannel: the directory to fill.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();

        match self.export_type {
            ExportType::SingleFile => {
                let stem = self.out_path.file_stem.to_string_lossy();
                // A user-typed extension wins over the format's
                let ext = match &self.out_path.ext {
                    Some(ext) => ext.to_string_lossy().into_owned(),
                    None => s!(self.format.ext()),
                };
                path.push(join!(&*stem, ".", &ext));
            }
            ExportType::PerChannel => { /* directory only */ }
        }
        path
    }

    /// Parse user text into dir + stem (+ extension if one was typed).
    /// A trailing separator or an existing directory keeps the current stem.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() { return; }
        let p = Path::new(s);

        match self.export_type {
            ExportType::SingleFile => {
                if crate::file::looks_like_dir_hint(p) || p.is_dir() {
                    self.out_path.dir = p.to_path_buf();
                    return;
                }
                self.out_path.dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
                if let Some(stem) = p.file_stem() {
                    self.out_path.file_stem = stem.to_os_string();
                }
                self.out_path.ext = p.extension().map(|e| e.to_os_string());
            }
            ExportType::PerChannel => {
                self.out_path.dir = PathBuf::from(s);
            }
        }
    }

    pub fn delim(&self) -> char {
        self.format.delim()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString,     // without extension
    ext: Option<OsString>,   // only when typed by the user
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(Table::RankingSnapshot.stem()),
            ext: None,
        }
    }
}
