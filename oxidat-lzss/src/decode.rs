//! LZSS decompression.
//!
//! The stream is a sequence of groups: one flag byte, read LSB first, then
//! up to eight items. A set bit is a literal byte; a clear bit is a two-byte
//! back-reference `(i, j)` into a 4 KB window:
//!
//! ```text
//! position = i | ((j & 0xF0) << 4)      12 bits, absolute window index
//! length   = (j & 0x0F) + THRESHOLD     copied as length + 1 bytes (3..=18)
//! ```
//!
//! The window starts zero-filled with its write cursor at `N - F`. Running
//! out of input where a flag byte, literal, or pair is due ends the stream.

use oxidat_core::error::{DatError, Result};
use oxidat_core::ringbuffer::{RingBuffer, sizes};

/// Window size in bytes.
pub const WINDOW_SIZE: usize = sizes::ALLEGRO_WINDOW;

/// Upper bound on the number of bytes a single match copies.
pub const MAX_MATCH: usize = sizes::ALLEGRO_LOOKAHEAD;

/// Match lengths are stored biased by this value.
pub const THRESHOLD: usize = 2;

/// A flag byte followed by eight matches expands 17 bytes into 144.
const MAX_EXPANSION: usize = 9;

/// How far a decompression run goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Stop at exactly this many output bytes; a shorter result is an error.
    Bounded(usize),
    /// Decode until the input is exhausted.
    Unbounded,
}

impl DecodeMode {
    fn target(self) -> Option<usize> {
        match self {
            Self::Bounded(n) => Some(n),
            Self::Unbounded => None,
        }
    }
}

/// One-shot LZSS decoder.
///
/// Each decoder owns a fresh window; [`LzssDecoder::decode`] consumes it.
#[derive(Debug)]
pub struct LzssDecoder {
    /// History window.
    ring: RingBuffer,
    /// Flag register: the low byte holds pending flag bits, the high byte
    /// counts how many remain.
    flags: u32,
    /// Decoded bytes.
    output: Vec<u8>,
}

impl LzssDecoder {
    /// Create a decoder with a zero-filled window.
    pub fn new() -> Self {
        Self {
            ring: RingBuffer::allegro(),
            flags: 0,
            output: Vec::new(),
        }
    }

    /// Decode `input` according to `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`DatError::SizeMismatch`] if `mode` is bounded and the input
    /// ends before the target length is reached.
    pub fn decode(mut self, input: &[u8], mode: DecodeMode) -> Result<Vec<u8>> {
        let target = mode.target();
        if target == Some(0) {
            return Ok(Vec::new());
        }

        let hint = input.len().saturating_mul(MAX_EXPANSION);
        self.output.reserve(target.map_or(input.len(), |t| t.min(hint)));

        let mut pos = 0;
        while self.next_flag(input, &mut pos) {
            if self.flags & 1 != 0 {
                let Some(&byte) = input.get(pos) else {
                    break;
                };
                pos += 1;
                self.ring.write_byte(byte);
                self.output.push(byte);
            } else {
                let Some(&[i, j]) = input.get(pos..pos + 2) else {
                    break;
                };
                pos += 2;

                let position = usize::from(i) | ((usize::from(j) & 0xF0) << 4);
                let length = (usize::from(j) & 0x0F) + THRESHOLD;

                let output = &mut self.output;
                self.ring.copy_from(position, length + 1, |byte| {
                    output.push(byte);
                    target.is_none_or(|t| output.len() < t)
                });
            }

            if target.is_some_and(|t| self.output.len() >= t) {
                return Ok(self.output);
            }
        }

        match target {
            Some(expected) if self.output.len() != expected => {
                Err(DatError::size_mismatch(expected, self.output.len()))
            }
            _ => Ok(self.output),
        }
    }

    /// Shift the flag register, reloading it from the input when empty.
    ///
    /// Returns `false` when a fresh flag byte is due but the input is spent.
    fn next_flag(&mut self, input: &[u8], pos: &mut usize) -> bool {
        self.flags >>= 1;
        if self.flags & 0x100 == 0 {
            let Some(&byte) = input.get(*pos) else {
                return false;
            };
            *pos += 1;
            self.flags = u32::from(byte) | 0xFF00;
        }
        true
    }
}

impl Default for LzssDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompress an LZSS block.
///
/// # Example
///
/// ```rust
/// use oxidat_lzss::{DecodeMode, decompress};
///
/// // One flag byte (all literals) followed by three literal bytes.
/// let stream = [0xFF, b'a', b'b', b'c'];
/// assert_eq!(decompress(&stream, DecodeMode::Bounded(3)).unwrap(), b"abc");
/// assert_eq!(decompress(&stream, DecodeMode::Unbounded).unwrap(), b"abc");
/// ```
pub fn decompress(input: &[u8], mode: DecodeMode) -> Result<Vec<u8>> {
    LzssDecoder::new().decode(input, mode)
}

/// Decompress an LZSS stream of unknown length until the input runs out.
pub fn decompress_to_end(input: &[u8]) -> Result<Vec<u8>> {
    decompress(input, DecodeMode::Unbounded)
}
