use unicode_segmentation::UnicodeSegmentation;

use crate::document::Sentence;

/// U+037E, the Greek question mark. Not a sentence terminator under UAX #29.
const GREEK_QUESTION_MARK: char = '\u{037E}';

/// Splits text into trimmed, non-empty sentences on Unicode sentence boundaries.
#[derive(Debug, Clone, Default)]
pub struct SentenceSplitter;

impl SentenceSplitter {
    pub fn new() -> Self {
        Self
    }

    pub fn split(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();

        for (segment_start, segment) in text.split_sentence_bound_indices() {
            for (piece_start, piece) in split_after(segment, GREEK_QUESTION_MARK) {
                let trimmed = piece.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let leading = piece.len() - piece.trim_start().len();
                let start = segment_start + piece_start + leading;
                sentences.push(Sentence::new(
                    sentences.len(),
                    trimmed.to_string(),
                    (start, start + trimmed.len()),
                ));
            }
        }

        sentences
    }
}

/// Split `segment` after every occurrence of `terminator`, keeping it attached.
fn split_after(segment: &str, terminator: char) -> Vec<(usize, &str)> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for (idx, ch) in segment.char_indices() {
        if ch == terminator {
            let end = idx + ch.len_utf8();
            pieces.push((last, &segment[last..end]));
            last = end;
        }
    }

    if last < segment.len() {
        pieces.push((last, &segment[last..]));
    }

    pieces
}
