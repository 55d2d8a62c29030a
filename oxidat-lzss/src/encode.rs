//! LZSS compression.
//!
//! A greedy encoder that produces streams [`crate::decompress`] accepts. It
//! mirrors the decoder's window exactly (zero-filled, cursor at `N - F`),
//! so matches may point into never-written positions or overlap the bytes
//! they produce.

use crate::decode::{MAX_MATCH, THRESHOLD, WINDOW_SIZE};
use oxidat_core::RingBuffer;

/// Shortest match worth encoding (a pair costs two bytes).
pub const MIN_MATCH: usize = THRESHOLD + 1;

/// A match found in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Match {
    /// Absolute window position of the first byte.
    position: usize,
    /// Number of bytes the match produces.
    length: usize,
}

/// One-shot LZSS encoder.
#[derive(Debug)]
pub struct LzssEncoder {
    /// Mirror of the decoder's window.
    ring: RingBuffer,
}

impl LzssEncoder {
    /// Create an encoder with a zero-filled window.
    pub fn new() -> Self {
        Self {
            ring: RingBuffer::allegro(),
        }
    }

    /// Encode `input` into a stream of flag groups.
    pub fn encode(mut self, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(input.len() + input.len() / 8 + 1);
        let mut pos = 0;

        while pos < input.len() {
            let flag_index = out.len();
            out.push(0);
            let mut flags = 0u8;

            for bit in 0..8 {
                if pos >= input.len() {
                    break;
                }

                match self.find_match(&input[pos..]) {
                    Some(m) => {
                        out.push((m.position & 0xFF) as u8);
                        out.push((((m.position >> 4) & 0xF0) | (m.length - MIN_MATCH)) as u8);
                        for &byte in &input[pos..pos + m.length] {
                            self.ring.write_byte(byte);
                        }
                        pos += m.length;
                    }
                    None => {
                        flags |= 1 << bit;
                        out.push(input[pos]);
                        self.ring.write_byte(input[pos]);
                        pos += 1;
                    }
                }
            }

            out[flag_index] = flags;
        }

        out
    }

    /// Find the longest match for the start of `lookahead`.
    fn find_match(&self, lookahead: &[u8]) -> Option<Match> {
        let max_len = lookahead.len().min(MAX_MATCH);
        if max_len < MIN_MATCH {
            return None;
        }

        let cursor = self.ring.position();
        let mask = WINDOW_SIZE - 1;
        let mut best: Option<Match> = None;

        // Simple brute-force search over the whole window
        for position in 0..WINDOW_SIZE {
            let mut len = 0;
            while len < max_len {
                let source = (position + len) & mask;
                // Bytes this match has already written by the time it reads
                // `source` come from the lookahead, not the current window.
                let written = source.wrapping_sub(cursor) & mask;
                let byte = if written < len {
                    lookahead[written]
                } else {
                    self.ring.read_at(source)
                };
                if byte != lookahead[len] {
                    break;
                }
                len += 1;
            }

            if len >= MIN_MATCH && best.is_none_or(|b| len > b.length) {
                best = Some(Match {
                    position,
                    length: len,
                });
                if len == max_len {
                    break;
                }
            }
        }

        best
    }
}

impl Default for LzssEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compress `input` into an LZSS stream.
///
/// # Example
///
/// ```rust
/// use oxidat_lzss::{DecodeMode, compress, decompress};
///
/// let data = b"abcabcabcabcabcabc";
/// let packed = compress(data);
/// assert!(packed.len() < data.len());
/// assert_eq!(decompress(&packed, DecodeMode::Bounded(data.len())).unwrap(), data);
/// ```
pub fn compress(input: &[u8]) -> Vec<u8> {
    LzssEncoder::new().encode(input)
}
