//! Discord message chunking utilities
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Chunk text for message content (2000 character limit)
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

/// Split text into pieces no longer than `max_len` bytes.
///
/// Prefers splitting at line boundaries and never splits inside a UTF-8
/// character. Trailing newlines are trimmed from each piece.
pub fn chunk_text(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in text.split_inclusive('\n') {
        if !current.is_empty() && current.len() + line.len() > max_len {
            chunks.push(std::mem::take(&mut current));
        }
        if line.len() > max_len {
            // A single line over the limit is split on character boundaries
            for ch in line.chars() {
                if current.len() + ch.len_utf8() > max_len {
                    chunks.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        } else {
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
        .into_iter()
        .map(|chunk| chunk.trim_end_matches('\n').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(chunk_text("hello", 100), vec!["hello"]);
    }

    #[test]
    fn test_exactly_at_limit() {
        let text = "a".repeat(100);
        let result = chunk_text(&text, 100);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 100);
    }

    #[test]
    fn test_splits_at_line_boundaries() {
        let text = "line1\nline2\nline3";
        let result = chunk_text(text, 12);
        assert!(result.len() >= 2);
        for chunk in &result {
            assert!(chunk.len() <= 12);
            assert!(!chunk.ends_with('\n'));
        }
    }

    #[test]
    fn test_splits_long_single_line() {
        let line = "a".repeat(100);
        let result = chunk_text(&line, 30);
        assert!(result.len() >= 4);
        for chunk in &result {
            assert!(chunk.len() <= 30);
        }
    }

    #[test]
    fn test_never_splits_mid_character() {
        let text = "Hello 世界! ".repeat(500);
        for chunk in chunk_for_message(&text) {
            assert!(chunk.len() <= MESSAGE_LIMIT);
            assert!(chunk.chars().count() > 0);
        }
    }

    #[test]
    fn test_message_limit() {
        let result = chunk_for_message(&"a".repeat(3000));
        assert_eq!(result.len(), 2);
        assert!(result[0].len() <= MESSAGE_LIMIT);
    }
}
