// src/file.rs

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::{ExportOptions, ExportType};
use crate::csv::to_export_string;
use crate::error::{ExportError, PersistenceError};
use crate::store::{DataSet, Table};

/// Export `ds` according to `export`. Returns every path written.
pub fn export_dataset(
    export: &ExportOptions,
    table: Table,
    ds: &DataSet,
) -> Result<Vec<PathBuf>, ExportError> {
    match export.export_type {
        ExportType::SingleFile => Ok(vec![write_export_single(export, ds)?]),
        ExportType::PerChannel => {
            let col = table
                .channel_column()
                .ok_or(ExportError::PerChannelUnsupported { table: table.stem() })?;
            Ok(write_export_per_channel(export, ds, col)?)
        }
    }
}

/// Write a single export file based on ExportOptions (path, headers policy, delimiter).
/// Returns the final path written to.
pub fn write_export_single(
    export: &ExportOptions,
    ds: &DataSet,
) -> Result<PathBuf, PersistenceError> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(&ds.headers, &ds.rows, export.include_headers, export.delim());
    fs::write(&path, contents).map_err(|e| PersistenceError::io(&path, e))?;
    tracing::info!(path = %path.display(), rows = ds.rows.len(), "export written");
    Ok(path)
}

/// Write one file per channel into the directory `export.out_path()`.
/// `channel_col` is the column holding the channel name.
pub fn write_export_per_channel(
    export: &ExportOptions,
    ds: &DataSet,
    channel_col: usize,
) -> Result<Vec<PathBuf>, PersistenceError> {
    let outdir = export.out_path();
    ensure_directory(&outdir)?;

    // Group rows by channel, keeping first-seen order so file numbering is stable
    let mut order: Vec<&str> = Vec::new();
    let mut by_channel: HashMap<&str, Vec<Vec<String>>> = HashMap::new();
    for r in &ds.rows {
        if let Some(channel) = r.get(channel_col) {
            let entry = by_channel.entry(channel.as_str()).or_default();
            if entry.is_empty() {
                order.push(channel.as_str());
            }
            entry.push(r.clone());
        }
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::with_capacity(order.len());
    let ext = export.format.ext();

    for (i, channel) in order.into_iter().enumerate() {
        let rows = &by_channel[channel];
        let stem = sanitize_filename(channel, i);
        let path = resolve_filename(&outdir, &stem, &mut seen, ext);

        let contents = to_export_string(&ds.headers, rows, export.include_headers, export.delim());
        fs::write(&path, contents).map_err(|e| PersistenceError::io(&path, e))?;
        written.push(path);
    }

    tracing::info!(dir = %outdir.display(), files = written.len(), "per-channel export written");
    Ok(written)
}

pub fn ensure_directory(dir: &Path) -> Result<(), PersistenceError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(PersistenceError::Malformed {
            path: dir.to_path_buf(),
            reason: s!("path exists but is not a directory"),
        });
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// Filesystem-safe stem: ASCII alphanumerics, `-` and `_`; whitespace runs
/// become one `_`. Falls back to `channel_<n>` when nothing survives.
pub fn sanitize_filename(name: &str, n: usize) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch == '-' || ch == '_' { if !(last_us && ch == '_') { out.push(ch); } last_us = ch == '_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { format!("channel_{}", n + 1) } else { out }
}

/// Duplicate handling **only within this run**
pub fn resolve_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,                         // "csv" | "tsv"
) -> PathBuf {
    let count = seen_names.entry(stem.to_string()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}
