/// Removes exactly one trailing `/`.
pub fn trim_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Whether `raw` could be a relative reference, as opposed to text that is
/// not a URL at all.
pub fn is_relative_reference(raw: &str) -> bool {
    const EXCLUDED: &str = "<>\"{}|\\^`";

    !raw.is_empty()
        && raw
            .chars()
            .all(|c| !c.is_whitespace() && !c.is_control() && !EXCLUDED.contains(c))
}

/// Safely truncate a string for display, never splitting a multi-byte
/// character and appending `...` when anything was cut.
#[cfg(feature = "logging")]
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);
        if current_width + char_width + 3 > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result.push_str("...");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_trailing_slash() {
        assert_eq!(trim_trailing_slash("/alice/"), "/alice");
        assert_eq!(trim_trailing_slash("/alice"), "/alice");
        assert_eq!(trim_trailing_slash("/"), "");
        assert_eq!(trim_trailing_slash("//"), "/");
    }

    #[test]
    fn test_is_relative_reference() {
        assert!(is_relative_reference("/relative/path"));
        assert!(is_relative_reference("alice"));
        assert!(is_relative_reference("../up?x=1#frag"));
        assert!(!is_relative_reference(""));
        assert!(!is_relative_reference("not a url"));
        assert!(!is_relative_reference("tab\there"));
        assert!(!is_relative_reference("<alice>"));
    }

    #[cfg(feature = "logging")]
    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("https://github.com/alice", 15), "https://gith...");
        assert_eq!(truncate_str("https://t.me/+100", 40), "https://t.me/+100");
        assert_eq!(truncate_str("你好，世界！", 8), "你好...");
    }
}
