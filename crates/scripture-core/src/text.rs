//! Small text helpers shared by search and display code.

/// Case-folds text for comparison.
///
/// Uses full Unicode lowercasing so Greek and Latin text compare the same
/// way regardless of case.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Truncates text to at most `max_chars` characters, appending `"..."` when
/// anything was cut. Always cuts on a character boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_is_untouched() {
        assert_eq!(truncate_chars("In the beginning", 100), "In the beginning");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Each Hebrew letter is two bytes in UTF-8
        assert_eq!(truncate_chars("אבגד", 2), "אב...");
    }

    #[test]
    fn test_fold_case_handles_greek() {
        assert_eq!(fold_case("ΛΌΓΟΣ"), "λόγος");
    }
}
