// src/lib.rs
//! Channel benchmarking for YouTube: a persisted channel directory, a
//! revenue-estimate ranking over the last 30 days, and a shorts benchmark.
//!
//! ```text
//! cli → directory ← resolver ← api
//!     → ranking   ← metrics  ← api
//!     → snapshot  → store (csv tables under the data dir)
//!     → shorts    ← api + listing page
//! ```

#[macro_use]
pub mod macros;

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod directory;
pub mod error;
pub mod file;
pub mod log;
pub mod metrics;
pub mod progress;
pub mod ranking;
pub mod resolver;
pub mod shorts;
pub mod snapshot;
pub mod store;
