// SPDX-License-Identifier: MIT

//! Document ingestion - load raw text and split it into overlapping fragments
//!
//! The splitter tries coarse separators first (paragraphs, then lines, then
//! words) and only falls back to single characters for runs of text with no
//! separator at all. Sizes are counted in characters.

use crate::adk::error::KnowledgeError;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Recursive character splitter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, KnowledgeError> {
        if chunk_size == 0 || chunk_overlap >= chunk_size {
            return Err(KnowledgeError::config(format!(
                "invalid splitter: chunk_size={} chunk_overlap={}",
                chunk_size, chunk_overlap
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split text into fragments of at most `chunk_size` characters where possible
    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_with(text, &SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // First separator present in the text; "" always matches
        let idx = separators
            .iter()
            .position(|s| s.is_empty() || text.contains(s))
            .unwrap_or(separators.len() - 1);
        let separator = separators[idx];
        let remaining = &separators[idx + 1..];

        let splits: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        };

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in splits {
            if char_len(&piece) < self.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                chunks.extend(self.merge(&pending, separator));
                pending.clear();
            }

            if remaining.is_empty() {
                chunks.push(piece);
            } else {
                chunks.extend(self.split_with(&piece, remaining));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge(&pending, separator));
        }

        chunks
    }

    /// Greedily pack small pieces into chunks, carrying a tail of up to
    /// `chunk_overlap` characters into the next chunk
    fn merge(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0;

        for piece in pieces {
            let len = char_len(piece);
            let joiner = if window.is_empty() { 0 } else { sep_len };

            if total + len + joiner > self.chunk_size && !window.is_empty() {
                push_chunk(&mut chunks, &window, separator);

                loop {
                    let joiner = if window.is_empty() { 0 } else { sep_len };
                    let overflows = total > 0 && total + len + joiner > self.chunk_size;
                    if total <= self.chunk_overlap && !overflows {
                        break;
                    }
                    let Some(front) = window.pop_front() else {
                        break;
                    };
                    let freed_joiner = if window.is_empty() { 0 } else { sep_len };
                    total -= char_len(front) + freed_joiner;
                }
            }

            let joiner = if window.is_empty() { 0 } else { sep_len };
            window.push_back(piece);
            total += len + joiner;
        }

        push_chunk(&mut chunks, &window, separator);
        chunks
    }
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

fn push_chunk(chunks: &mut Vec<String>, window: &VecDeque<&str>, separator: &str) {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Decode an uploaded document and split it into fragments
pub fn chunk_bytes(data: &[u8], splitter: &TextSplitter) -> Result<Vec<String>, KnowledgeError> {
    let text = std::str::from_utf8(data)
        .map_err(|e| KnowledgeError::config(format!("document is not valid UTF-8: {}", e)))?;
    Ok(splitter.split(text))
}

/// Load a text file from disk and split it into fragments
pub fn load_and_chunk<P: AsRef<Path>>(
    path: P,
    splitter: &TextSplitter,
) -> Result<Vec<String>, KnowledgeError> {
    let data = fs::read(path)?;
    chunk_bytes(&data, splitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let splitter = TextSplitter::default();
        assert_eq!(splitter.split("hello world"), vec!["hello world"]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let splitter = TextSplitter::default();
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("\n\n  \n\n").is_empty());
    }

    #[test]
    fn test_paragraphs_packed_up_to_chunk_size() {
        let splitter = TextSplitter::new(12, 0).unwrap();
        let chunks = splitter.split("aaaa\n\nbbbb\n\ncccc");
        assert_eq!(chunks, vec!["aaaa\n\nbbbb", "cccc"]);
    }

    #[test]
    fn test_words_carry_overlap() {
        let splitter = TextSplitter::new(10, 4).unwrap();
        let chunks = splitter.split("one two three four");
        assert_eq!(chunks, vec!["one two", "two three", "four"]);
    }

    #[test]
    fn test_chunks_respect_size_limit() {
        let splitter = TextSplitter::new(20, 5).unwrap();
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
        for chunk in splitter.split(&text) {
            assert!(chunk.chars().count() <= 20, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn test_unbroken_run_falls_back_to_characters() {
        let splitter = TextSplitter::new(4, 0).unwrap();
        let chunks = splitter.split("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_multibyte_text_counts_characters() {
        let splitter = TextSplitter::new(3, 0).unwrap();
        let chunks = splitter.split("äöüß");
        assert_eq!(chunks, vec!["äöü", "ß"]);
    }

    #[test]
    fn test_invalid_splitter_settings() {
        assert!(TextSplitter::new(0, 0).is_err());
        assert!(TextSplitter::new(10, 10).is_err());
    }

    #[test]
    fn test_chunk_bytes_rejects_invalid_utf8() {
        let splitter = TextSplitter::default();
        assert!(chunk_bytes(&[0xff, 0xfe], &splitter).is_err());
    }

    #[test]
    fn test_load_and_chunk_missing_file() {
        let splitter = TextSplitter::default();
        let err = load_and_chunk("/nonexistent/knowledge.txt", &splitter).unwrap_err();
        assert!(matches!(err, KnowledgeError::Io(_)));
    }
}
