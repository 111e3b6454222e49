//! Recursive separator-based text chunking
//!
//! Splits text with the highest-priority separator first; any piece
//! that still exceeds the chunk size is split again with the next
//! separator, bottoming out in a hard byte split. Small pieces are then
//! merged back together up to the chunk size, carrying trailing pieces
//! of at most `chunk_overlap` bytes into the next chunk so context
//! survives the boundary.

use std::collections::VecDeque;

use crate::config::ChunkingConfig;
use crate::types::Chunk;

/// A contiguous slice of the source text plus its byte offset
#[derive(Debug, Clone, Copy)]
struct Segment<'a> {
    offset: usize,
    text: &'a str,
}

impl Segment<'_> {
    fn len(&self) -> usize {
        self.text.len()
    }

    fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Text chunker with configurable size, overlap, and separators
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
    separators: Vec<String>,
}

impl TextChunker {
    /// Create a chunker with the default separators (newline, period,
    /// comma; hard split as the terminal fallback).
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self::with_separators(chunk_size, chunk_overlap, ChunkingConfig::default().separators)
    }

    /// Create a chunker with an explicit separator priority list
    pub fn with_separators(
        chunk_size: usize,
        chunk_overlap: usize,
        separators: Vec<String>,
    ) -> Self {
        assert!(chunk_size > 0, "chunk_size must be non-zero");
        assert!(
            chunk_overlap < chunk_size,
            "chunk_overlap must be smaller than chunk_size"
        );

        // The hard split is the implicit empty separator
        let separators = separators.into_iter().filter(|s| !s.is_empty()).collect();

        Self {
            chunk_size,
            chunk_overlap,
            separators,
        }
    }

    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::with_separators(
            config.chunk_size,
            config.chunk_overlap,
            config.separators.clone(),
        )
    }

    /// Split `text` into ordered chunks with strictly increasing start
    /// offsets. Identical input and parameters always produce the
    /// identical sequence.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut segments = Vec::new();
        self.collect_segments(
            Segment { offset: 0, text },
            &self.separators,
            &mut segments,
        );

        self.merge_segments(text, &segments)
    }

    /// Recursively split `segment` until every piece fits `chunk_size`.
    ///
    /// Each separator occurrence stays attached to the end of its
    /// preceding piece, so pieces are contiguous and cover the segment.
    fn collect_segments<'a>(
        &self,
        segment: Segment<'a>,
        separators: &[String],
        out: &mut Vec<Segment<'a>>,
    ) {
        if segment.len() <= self.chunk_size {
            out.push(segment);
            return;
        }

        let Some((separator, rest)) = separators.split_first() else {
            self.hard_split(segment, out);
            return;
        };

        let mut piece_start = 0;
        for (at, _) in segment.text.match_indices(separator.as_str()) {
            let piece_end = at + separator.len();
            self.collect_segments(
                Segment {
                    offset: segment.offset + piece_start,
                    text: &segment.text[piece_start..piece_end],
                },
                rest,
                out,
            );
            piece_start = piece_end;
        }

        if piece_start == 0 {
            // Separator absent; fall through to the next one
            self.collect_segments(segment, rest, out);
        } else if piece_start < segment.text.len() {
            self.collect_segments(
                Segment {
                    offset: segment.offset + piece_start,
                    text: &segment.text[piece_start..],
                },
                rest,
                out,
            );
        }
    }

    /// Terminal case: split at `chunk_size` bytes, backing up to the
    /// nearest UTF-8 character boundary.
    fn hard_split<'a>(&self, segment: Segment<'a>, out: &mut Vec<Segment<'a>>) {
        let mut start = 0;
        while start < segment.text.len() {
            let mut end = (start + self.chunk_size).min(segment.text.len());
            while end > start && !segment.text.is_char_boundary(end) {
                end -= 1;
            }
            if end == start {
                // chunk_size smaller than one character; take the character
                end = segment.text[start..]
                    .chars()
                    .next()
                    .map(|c| start + c.len_utf8())
                    .unwrap_or(segment.text.len());
            }

            out.push(Segment {
                offset: segment.offset + start,
                text: &segment.text[start..end],
            });
            start = end;
        }
    }

    /// Greedily merge adjacent segments up to `chunk_size`, carrying
    /// trailing segments totaling at most `chunk_overlap` bytes into
    /// the next chunk.
    fn merge_segments(&self, text: &str, segments: &[Segment]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<Segment> = VecDeque::new();
        let mut total = 0usize;

        for &segment in segments {
            if !window.is_empty() && total + segment.len() > self.chunk_size {
                self.emit(text, &window, &mut chunks);

                // Drop from the front until the carried overlap fits and
                // the incoming segment does too
                while total > self.chunk_overlap
                    || (total + segment.len() > self.chunk_size && total > 0)
                {
                    match window.pop_front() {
                        Some(front) => total -= front.len(),
                        None => break,
                    }
                }
            }

            window.push_back(segment);
            total += segment.len();
        }

        if !window.is_empty() {
            self.emit(text, &window, &mut chunks);
        }

        chunks
    }

    /// Emit the current window as one chunk: the contiguous span of its
    /// segments, boundary-trimmed, with the offset of the first
    /// retained byte. Whitespace-only windows emit nothing.
    fn emit(&self, text: &str, window: &VecDeque<Segment>, chunks: &mut Vec<Chunk>) {
        let (Some(front), Some(back)) = (window.front(), window.back()) else {
            return;
        };

        let span = &text[front.offset..back.end()];
        let trimmed = span.trim();
        if trimmed.is_empty() {
            return;
        }

        let leading = span.len() - span.trim_start().len();
        chunks.push(Chunk::new(trimmed, front.offset + leading));
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::from_config(&ChunkingConfig::default())
    }
}
