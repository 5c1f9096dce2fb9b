//! Message length limits.

/// Longest text the Bot API accepts in one message, in UTF-16 code units.
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Split `text` into pieces no longer than `limit` UTF-16 code units.
///
/// Pieces end at a line break where one is available and fall back to a
/// character boundary for a single overlong line. Concatenating the pieces
/// gives back `text`.
pub fn split_message(text: &str, limit: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;

    while utf16_len(rest) > limit {
        let (head, tail) = rest.split_at(cut_point(rest, limit));
        parts.push(head);
        rest = tail;
    }

    if !rest.is_empty() || parts.is_empty() {
        parts.push(rest);
    }
    parts
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

// Byte offset to cut at; always past the first character.
fn cut_point(text: &str, limit: usize) -> usize {
    let mut units = 0;
    let mut end = 0;
    for (i, c) in text.char_indices() {
        units += c.len_utf16();
        if units > limit && end > 0 {
            break;
        }
        end = i + c.len_utf8();
    }

    text[..end].rfind('\n').map_or(end, |nl| nl + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_part() {
        assert_eq!(split_message("hello", 10), vec!["hello"]);
        assert_eq!(split_message("", 10), vec![""]);
    }

    #[test]
    fn test_splits_on_line_breaks() {
        let parts = split_message("aaa\nbbb\nccc\n", 9);
        assert_eq!(parts, vec!["aaa\nbbb\n", "ccc\n"]);
    }

    #[test]
    fn test_overlong_line_is_cut() {
        let parts = split_message("abcdefghij", 4);
        assert_eq!(parts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_counts_utf16_units() {
        // Each emoji is two UTF-16 units.
        let parts = split_message("😀😀😀", 4);
        assert_eq!(parts, vec!["😀😀", "😀"]);
    }

    #[test]
    fn test_parts_rejoin_and_fit() {
        let text: String = (0..2000).map(|i| format!("site-{}.example.com\n", i)).collect();
        let parts = split_message(&text, MAX_MESSAGE_LENGTH);

        assert!(parts.len() > 1);
        assert!(parts.iter().all(|p| utf16_len(p) <= MAX_MESSAGE_LENGTH));
        assert!(parts.iter().all(|p| p.ends_with('\n')));
        assert_eq!(parts.concat(), text);
    }
}
