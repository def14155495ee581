// src/core/handle.rs
//! Channel handles: `@` followed by word characters, `-` or `_`.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::PLATFORM_HOST;

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([\w-]+)").expect("static handle pattern"));

/// Percent-decode pasted input. Invalid UTF-8 sequences become U+FFFD.
pub fn decode_input(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// First handle in `raw` (after percent-decoding), without the `@`.
pub fn extract_handle(raw: &str) -> Option<String> {
    let decoded = decode_input(raw);
    HANDLE_RE
        .captures(&decoded)
        .and_then(|c| c.get(1))
        .map(|m| s!(m.as_str()))
}

/// `https://www.youtube.com/@<handle>`, the canonical directory URL.
pub fn handle_url(handle: &str) -> String {
    format!("https://{PLATFORM_HOST}/@{handle}")
}

/// `https://www.youtube.com/channel/<id>`, the link used in ranking rows.
pub fn channel_id_url(channel_id: &str) -> String {
    format!("https://{PLATFORM_HOST}/channel/{channel_id}")
}

/// `https://www.youtube.com/@<handle>/shorts`
pub fn shorts_page_url(handle: &str) -> String {
    join!(&handle_url(handle), "/shorts")
}

/// `https://www.youtube.com/shorts/<video_id>`
pub fn short_url(video_id: &str) -> String {
    format!("https://{PLATFORM_HOST}/shorts/{video_id}")
}
