//! Utility functions.
//!
//! Small display helpers used across plugins.

/// Format an integer with thousands separators (1200 -> "1,200").
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if n < 0 {
        out.push('-');
    }

    let first_group = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first_group) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Uppercase the first character, for displaying stored lowercase values.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Escape HTML special characters for Telegram's HTML parse mode.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(850), "850");
        assert_eq!(format_thousands(1200), "1,200");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-1200), "-1,200");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("english"), "English");
        assert_eq!(capitalize_first("both"), "Both");
        assert_eq!(capitalize_first(""), "");
        // Non-Latin scripts pass through unchanged
        assert_eq!(capitalize_first("አማርኛ"), "አማርኛ");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(html_escape("plain"), "plain");
    }
}
