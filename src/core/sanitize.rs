// src/core/sanitize.rs

/// Pasted text area → one trimmed entry per non-blank line, order kept.
pub fn input_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines() {
        let text = "https://www.youtube.com/@a\r\n\n   \n  @b  \n";
        assert_eq!(input_lines(text), vec!["https://www.youtube.com/@a", "@b"]);
    }
}
