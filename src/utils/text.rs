use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate text to a terminal display width, appending "..." when cut
///
/// # Examples
/// ```
/// use sncli::utils::text::truncate_text;
/// assert_eq!(truncate_text("Hello World!", 8), "Hello...");
/// ```
pub fn truncate_text(text: &str, max_width: usize) -> String {
    const ELLIPSIS: &str = "...";

    if text.width() <= max_width {
        return text.to_string();
    }
    // Not even room for the ellipsis
    if max_width <= ELLIPSIS.len() {
        return ".".repeat(max_width);
    }

    let budget = max_width - ELLIPSIS.len();
    let mut used = 0;
    let kept: String = text
        .chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0);
            used <= budget
        })
        .collect();

    kept + ELLIPSIS
}

/// Collapse line breaks so a value fits on one table row
pub fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Hello", 10), "Hello");
        assert_eq!(truncate_text("Hello World!", 8), "Hello...");
        assert_eq!(truncate_text("", 5), "");
        assert_eq!(truncate_text("abcdef", 2), "..");
    }

    #[test]
    fn test_truncate_text_wide_chars() {
        // Each CJK character occupies two columns
        assert_eq!(truncate_text("日本語テキスト", 9), "日本語...");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\nb\r\nc"), "a b c");
        assert_eq!(single_line("plain"), "plain");
    }
}
