// src/log.rs
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, time},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::consts::LOG_FILE;

const DEFAULT_FILTER: &str = "gtube=info";

/// Install the global subscriber:
/// - `<data_dir>/debug.log`, elapsed-time stamps, filtered by `RUST_LOG`
///   (default `gtube=info`)
/// - stderr at WARN, plus this crate's DEBUG when `verbose`
///
/// The file layer is skipped if the log file cannot be opened. A second call
/// is a no-op.
pub fn init(data_dir: &Path, verbose: bool) {
    let file = std::fs::create_dir_all(data_dir)
        .and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(data_dir.join(LOG_FILE))
        })
        .ok();

    let file_layer = file.map(|f| {
        fmt::layer()
            .with_writer(Mutex::new(f))
            .with_ansi(false)
            .with_timer(time::uptime())
            .with_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
            )
    });

    let stderr_level = if verbose { "gtube=debug,warn" } else { "warn" };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(EnvFilter::new(stderr_level));

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}
