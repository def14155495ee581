// src/config/consts.rs

// Net config
pub const API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const PLATFORM_HOST: &str = "www.youtube.com";
pub const USER_AGENT: &str = concat!("gtube/", env!("CARGO_PKG_VERSION"));

// API limits
pub const MAX_IDS_PER_CALL: usize = 50;
pub const RECENT_UPLOADS: u32 = 50;

// Config keys
pub const KEY_API_KEY: &str = "YOUTUBE_API_KEY";
pub const KEY_API_BASE: &str = "GTUBE_API_BASE";
pub const KEY_DATA_DIR: &str = "GTUBE_DATA_DIR";
pub const KEY_REVENUE_RATE: &str = "GTUBE_REVENUE_RATE";
pub const KEY_SECRETS_FILE: &str = "GTUBE_SECRETS_FILE";
pub const DEFAULT_SECRETS_FILE: &str = ".secrets";

// Local tables
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Ranking
pub const WINDOW_DAYS: u32 = 30;
pub const REVENUE_RATE: f64 = 0.2;

// Shorts
pub const SHORTS_MAX_PER_CHANNEL: usize = 5;
pub const SHORTS_MAX_PER_CHANNEL_RANGE: (usize, usize) = (1, 20);
pub const SHORTS_MIN_VIEWS: u64 = 5; // in units of 10k
pub const SHORTS_MIN_VIEWS_RANGE: (u64, u64) = (1, 100);
pub const SHORTS_VIEW_UNIT: u64 = 10_000;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
