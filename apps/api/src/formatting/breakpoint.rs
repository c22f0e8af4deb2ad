//! Preview fold search for short-preview feeds.
//!
//! Offsets are character offsets into the content, not byte offsets.

/// Characters that end a sentence when followed by whitespace.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Characters a preview may be cut in front of when no sentence boundary is in range.
const SOFT_BREAKS: [char; 3] = [',', ' ', '\n'];

/// Finds where a "show more" fold should fall in `text`, searching `[min_len, max_len]`.
///
/// Order of preference:
/// 1. the end of a sentence terminator plus its trailing whitespace, scanning forward;
/// 2. a comma, space or newline, scanning backward from `max_len`;
/// 3. `max_len` itself (clamped to the text length).
pub fn find_natural_breakpoint(text: &[char], min_len: usize, max_len: usize) -> usize {
    if let Some(position) = forward_sentence_boundary(text, min_len, max_len) {
        return position;
    }

    (min_len..=max_len)
        .rev()
        .find(|&i| text.get(i).is_some_and(|c| SOFT_BREAKS.contains(c)))
        .unwrap_or_else(|| max_len.min(text.len()))
}

fn forward_sentence_boundary(text: &[char], min_len: usize, max_len: usize) -> Option<usize> {
    let mut i = 0;
    while i < text.len() {
        let ends_sentence = SENTENCE_TERMINATORS.contains(&text[i])
            && text.get(i + 1).is_some_and(|c| c.is_whitespace());

        if !ends_sentence {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < text.len() && text[end].is_whitespace() {
            end += 1;
        }

        if end > max_len {
            return None;
        }
        if end >= min_len {
            return Some(end);
        }
        i = end;
    }
    None
}
