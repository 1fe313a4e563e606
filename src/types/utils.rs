//! Shared string helpers.
//!
//! All lengths here are counted in `char`s so a cut never lands inside a
//! UTF-8 sequence.

// =============================================================================
// String Utilities
// =============================================================================

/// First `max_chars` characters of `s`, borrowed.
#[inline]
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate to `max_chars` characters, appending `suffix` only when something was cut.
pub fn truncate_chars(s: &str, max_chars: usize, suffix: &str) -> String {
    let prefix = char_prefix(s, max_chars);
    if prefix.len() == s.len() {
        s.to_string()
    } else {
        format!("{}{}", prefix, suffix)
    }
}

/// Format a byte count for humans (`512 B`, `1.5 KB`, `2.0 MB`).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("hello", 3), "hel");
        assert_eq!(char_prefix("hi", 10), "hi");
        assert_eq!(char_prefix("", 5), "");
        assert_eq!(char_prefix("héllo", 2), "hé");
    }

    #[test]
    fn test_truncate_chars_only_marks_when_cut() {
        assert_eq!(truncate_chars("short", 60, "..."), "short");
        assert_eq!(truncate_chars("abcdef", 3, "..."), "abc...");
        assert_eq!(truncate_chars("abc", 3, "..."), "abc");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let s = "日本語のコード";
        assert_eq!(truncate_chars(s, 3, "..."), "日本語...");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2.0 MB");
    }
}
