//! Splitting long replies into chunks Discord will accept.
//!
//! Discord rejects messages over 2000 characters; replies are wrapped at
//! [`crate::config::MAX_RESPONSE_LENGTH`]. Chunks break on whitespace where
//! possible and hard-break words longer than a whole chunk.

/// Splits `text` into pieces of at most `max_chars` characters.
///
/// The limit is counted in characters, not bytes, since that is what the
/// platform enforces. Always returns at least one chunk.
#[must_use]
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    debug_assert!(max_chars > 0);

    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.chars().count() > max_chars {
        // Byte offset just past the max_chars-th character.
        let boundary = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(i, _)| i);
        let window = &rest[..boundary];

        match window.rfind(char::is_whitespace) {
            Some(idx) if idx > 0 => {
                chunks.push(rest[..idx].to_string());
                let ws_len = rest[idx..].chars().next().map_or(0, char::len_utf8);
                rest = &rest[idx + ws_len..];
            }
            // No usable break point: hard-break mid-word.
            _ => {
                chunks.push(window.to_string());
                rest = &rest[boundary..];
            }
        }
    }

    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}
