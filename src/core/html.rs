// src/core/html.rs
//! Tolerant scanning of channel listing pages.
//!
//! The shorts tab embeds its items both as anchors (`href="/shorts/<id>"`) and
//! inside the inline JSON (`"url":"/shorts/<id>"`). Scanning for the path
//! segment catches both without parsing either.

const SHORTS_SEGMENT: &str = "/shorts/";

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Every distinct video id that follows a `/shorts/` segment, first occurrence
/// order. An occurrence with no id characters after it is ignored.
pub fn extract_short_ids(doc: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut rest = doc;

    while let Some(pos) = rest.find(SHORTS_SEGMENT) {
        rest = &rest[pos + SHORTS_SEGMENT.len()..];
        let end = rest.find(|c: char| !is_id_char(c)).unwrap_or(rest.len());
        let id = &rest[..end];
        if !id.is_empty() && !out.iter().any(|seen| seen == id) {
            out.push(s!(id));
        }
        rest = &rest[end..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_and_inline_json() {
        let doc = r#"
            <a id="thumbnail" href="/shorts/abc_123-X">x</a>
            {"url":"/shorts/def456","webPageType":"WEB_PAGE_TYPE_SHORTS"}
            <a href="https://www.youtube.com/shorts/abc_123-X?feature=share">dup</a>
            <a href="/shorts/">empty</a>
        "#;
        assert_eq!(extract_short_ids(doc), vec!["abc_123-X", "def456"]);
    }

    #[test]
    fn nothing_to_find() {
        assert!(extract_short_ids("<html><body>no videos</body></html>").is_empty());
    }
}
