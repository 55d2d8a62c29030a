//! Ring buffer (sliding window) for LZSS decompression.
//!
//! Unlike distance-based LZ77 windows, Okumura-style LZSS addresses history
//! by absolute position inside a fixed, zero-initialized window whose write
//! cursor starts a few bytes before the end. Back-references may point at
//! positions that were never written; those read as zero.

/// Common window parameters.
pub mod sizes {
    /// Window size used by Allegro packfiles (4 KB).
    pub const ALLEGRO_WINDOW: usize = 4096;
    /// Maximum match length, which also offsets the initial write cursor.
    pub const ALLEGRO_LOOKAHEAD: usize = 18;
}

/// A fixed-size circular window addressed by absolute position.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    /// The underlying buffer.
    buffer: Vec<u8>,
    /// Current write position (next byte will be written here).
    position: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
}

impl RingBuffer {
    /// Create a zero-filled window with the write cursor at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a power of 2 or is zero.
    pub fn new(capacity: usize, start: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "Capacity must be a power of 2, got {}",
            capacity
        );

        Self {
            buffer: vec![0; capacity],
            position: start & (capacity - 1),
            mask: capacity - 1,
        }
    }

    /// Create the 4 KB window used by Allegro packfiles, cursor at `N - F`.
    pub fn allegro() -> Self {
        Self::new(
            sizes::ALLEGRO_WINDOW,
            sizes::ALLEGRO_WINDOW - sizes::ALLEGRO_LOOKAHEAD,
        )
    }

    /// Get the capacity of the window.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Get the current write position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Write a single byte at the cursor and advance it.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & self.mask;
    }

    /// Read the byte at an absolute window position (wrapped).
    #[inline]
    pub fn read_at(&self, index: usize) -> u8 {
        self.buffer[index & self.mask]
    }

    /// Copy `length` bytes starting at absolute position `start`.
    ///
    /// Every copied byte is written back at the cursor before the next one is
    /// read, so a source range overlapping the cursor repeats freshly written
    /// data. `sink` receives each byte and returns `false` to stop early.
    /// Returns the number of bytes copied.
    pub fn copy_from(
        &mut self,
        start: usize,
        length: usize,
        mut sink: impl FnMut(u8) -> bool,
    ) -> usize {
        for k in 0..length {
            let byte = self.read_at(start + k);
            self.write_byte(byte);
            if !sink(byte) {
                return k + 1;
            }
        }
        length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ringbuffer_starts_zeroed() {
        let ring = RingBuffer::allegro();
        assert_eq!(ring.capacity(), 4096);
        assert_eq!(ring.position(), 4096 - 18);
        assert!((0..4096).all(|i| ring.read_at(i) == 0));
    }

    #[test]
    fn test_ringbuffer_wrap() {
        let mut ring = RingBuffer::new(8, 6);
        for byte in 1..=4 {
            ring.write_byte(byte);
        }

        assert_eq!(ring.position(), 2);
        assert_eq!(ring.read_at(6), 1);
        assert_eq!(ring.read_at(7), 2);
        assert_eq!(ring.read_at(0), 3);
        assert_eq!(ring.read_at(9), 4);
    }

    #[test]
    fn test_ringbuffer_copy_overlap() {
        let mut ring = RingBuffer::new(16, 0);
        ring.write_byte(b'A');
        ring.write_byte(b'B');

        let mut out = Vec::new();
        let copied = ring.copy_from(0, 6, |b| {
            out.push(b);
            true
        });

        assert_eq!(copied, 6);
        assert_eq!(out, b"ABABAB");
    }

    #[test]
    fn test_ringbuffer_copy_stops_early() {
        let mut ring = RingBuffer::new(16, 0);
        ring.write_byte(b'x');

        let mut out = Vec::new();
        let copied = ring.copy_from(0, 10, |b| {
            out.push(b);
            out.len() < 3
        });

        assert_eq!(copied, 3);
        assert_eq!(out, b"xxx");
        assert_eq!(ring.position(), 4);
    }
}
