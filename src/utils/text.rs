//! Text Helpers
//!
//! Character-boundary-safe truncation used for display names and
//! input field limits.

/// Keep at most `max_chars` characters of `input`
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => input[..byte_idx].to_string(),
        None => input.to_string(),
    }
}

/// Truncate `input` in place to at most `max_chars` characters
pub fn clamp_chars(input: &mut String, max_chars: usize) {
    if let Some((byte_idx, _)) = input.char_indices().nth(max_chars) {
        input.truncate(byte_idx);
    }
}
