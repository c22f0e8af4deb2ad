//! Thread segmentation for length-limited microblog posts.
//!
//! Content is packed greedily into segments of at most `max_len` characters,
//! keeping paragraphs whole where possible, then sentences, then words.
//! A single word longer than `max_len` is the only thing ever cut mid-word.

/// Result of splitting content into thread segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadSplit {
    /// Segment texts without numbering, at most `max_segments` of them.
    pub segments: Vec<String>,
    /// Segments produced but discarded by the segment cap.
    pub dropped: usize,
}

/// Splits `content` into thread segments no longer than `max_len` characters.
pub fn split_into_segments(content: &str, max_len: usize, max_segments: usize) -> ThreadSplit {
    let max_len = max_len.max(1);
    let mut packer = SegmentPacker::new(max_len);

    for paragraph in paragraphs(content) {
        if char_len(&paragraph) <= max_len {
            packer.push(&paragraph, "\n\n");
            continue;
        }

        packer.flush();
        for sentence in sentences(&paragraph) {
            if char_len(&sentence) <= max_len {
                packer.push(&sentence, " ");
                continue;
            }

            packer.flush();
            for word in sentence.split_whitespace() {
                for piece in hard_split(word, max_len) {
                    packer.push(&piece, " ");
                }
            }
        }
    }

    let mut segments = packer.finish();
    let dropped = segments.len().saturating_sub(max_segments);
    segments.truncate(max_segments);

    ThreadSplit { segments, dropped }
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Greedy accumulator that starts a new segment whenever the next unit would overflow.
struct SegmentPacker {
    max_len: usize,
    segments: Vec<String>,
    current: String,
    current_len: usize,
}

impl SegmentPacker {
    fn new(max_len: usize) -> Self {
        Self {
            max_len,
            segments: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    /// Appends `unit` (already ≤ max_len) to the current segment using `joiner`,
    /// or starts a new segment if it does not fit.
    fn push(&mut self, unit: &str, joiner: &str) {
        let unit_len = char_len(unit);
        if unit_len == 0 {
            return;
        }

        if self.current.is_empty() {
            self.current.push_str(unit);
            self.current_len = unit_len;
            return;
        }

        if self.current_len + char_len(joiner) + unit_len <= self.max_len {
            self.current.push_str(joiner);
            self.current.push_str(unit);
            self.current_len += char_len(joiner) + unit_len;
        } else {
            self.flush();
            self.current.push_str(unit);
            self.current_len = unit_len;
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.segments
                .push(std::mem::take(&mut self.current).trim().to_string());
            self.current_len = 0;
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.segments
    }
}

/// Paragraphs are separated by one or more blank lines.
fn paragraphs(content: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut lines: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !lines.is_empty() {
                out.push(lines.join("\n").trim().to_string());
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        out.push(lines.join("\n").trim().to_string());
    }

    out.retain(|p| !p.is_empty());
    out
}

/// Sentences end at `.`, `!` or `?` followed by whitespace. Punctuation stays with its sentence.
fn sentences(paragraph: &str) -> Vec<String> {
    let chars: Vec<char> = paragraph.chars().collect();
    let mut out = Vec::new();
    let mut start = 0;

    for i in 0..chars.len() {
        let is_end = matches!(chars[i], '.' | '!' | '?')
            && chars.get(i + 1).is_some_and(|c| c.is_whitespace());
        if is_end {
            let sentence: String = chars[start..=i].iter().collect();
            out.push(sentence.trim().to_string());
            start = i + 1;
        }
    }
    if start < chars.len() {
        let tail: String = chars[start..].iter().collect();
        out.push(tail.trim().to_string());
    }

    out.retain(|s| !s.is_empty());
    out
}

/// Cuts a single oversized word into `max_len`-character pieces.
fn hard_split(word: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(max_len)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squash(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_short_paragraphs_share_a_segment() {
        let split = split_into_segments("First para.\n\nSecond para.", 270, 8);
        assert_eq!(split.segments, vec!["First para.\n\nSecond para."]);
        assert_eq!(split.dropped, 0);
    }

    #[test]
    fn test_paragraphs_kept_whole_when_they_fit() {
        let p1 = "a ".repeat(100).trim().to_string(); // 199 chars
        let p2 = "b ".repeat(100).trim().to_string();
        let content = format!("{p1}\n\n{p2}");
        let split = split_into_segments(&content, 270, 8);
        assert_eq!(split.segments, vec![p1, p2]);
    }

    #[test]
    fn test_long_paragraph_splits_on_sentences() {
        let s1 = format!("{}.", "word ".repeat(30).trim());
        let s2 = format!("{}!", "more ".repeat(30).trim());
        let s3 = format!("{}?", "last ".repeat(30).trim());
        let content = format!("{s1} {s2} {s3}");
        let split = split_into_segments(&content, 270, 8);

        assert!(split.segments.len() >= 2);
        for seg in &split.segments {
            assert!(char_len(seg) <= 270);
        }
        // punctuation preserved at sentence ends
        assert!(split.segments[0].ends_with('.') || split.segments[0].ends_with('!'));
        assert_eq!(squash(&split.segments.concat()), squash(&content));
    }

    #[test]
    fn test_oversized_sentence_splits_on_words() {
        let content = "bowling ".repeat(80); // one 639-char sentence
        let split = split_into_segments(&content, 270, 8);
        assert_eq!(split.segments.len(), 3);
        for seg in &split.segments {
            assert!(char_len(seg) <= 270);
            assert!(seg.split(' ').all(|w| w == "bowling"), "no word is cut");
        }
    }

    #[test]
    fn test_oversized_word_is_cut_as_last_resort() {
        let word = "s".repeat(600);
        let split = split_into_segments(&word, 270, 8);
        let lens: Vec<usize> = split.segments.iter().map(|s| char_len(s)).collect();
        assert_eq!(lens, vec![270, 270, 60]);
    }

    #[test]
    fn test_segment_cap_reports_dropped() {
        let content = (0..12)
            .map(|i| format!("{}{i}", "p".repeat(250)))
            .collect::<Vec<_>>()
            .join("\n\n");
        let split = split_into_segments(&content, 270, 8);
        assert_eq!(split.segments.len(), 8);
        assert_eq!(split.dropped, 4);
    }

    #[test]
    fn test_empty_content_has_no_segments() {
        let split = split_into_segments("   \n\n  ", 270, 8);
        assert!(split.segments.is_empty());
        assert_eq!(split.dropped, 0);
    }

    #[test]
    fn test_sentences_keep_terminators() {
        assert_eq!(
            sentences("Bend your knees. Stay low! Ready?"),
            vec!["Bend your knees.", "Stay low!", "Ready?"]
        );
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines_with_spaces() {
        assert_eq!(
            paragraphs("one\nstill one\n   \n\ntwo"),
            vec!["one\nstill one", "two"]
        );
    }
}
