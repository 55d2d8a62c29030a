//! Sequential big-endian reader over an in-memory buffer.
//!
//! Datafiles are decoded entirely from memory, so the reader borrows an
//! immutable slice and only tracks a cursor. All multi-byte integers are
//! big-endian. Reads that run past the end of the buffer fail with
//! [`DatError::TruncatedStream`] and leave the cursor where it was.

use crate::error::{DatError, Result};
use crate::fourcc::FourCc;

/// A cursor over an immutable byte buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Whether every byte has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// The unread part of the buffer, without consuming it.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if count > available {
            return Err(DatError::truncated(self.position, count, available));
        }
        let start = self.position;
        self.position += count;
        Ok(&self.data[start..start + count])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a big-endian `u16`.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    /// Read a big-endian two's complement `i32`.
    pub fn read_i32_be(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    /// Read a four-character code.
    pub fn read_fourcc(&mut self) -> Result<FourCc> {
        Ok(FourCc::new(self.take_array()?))
    }

    /// Read `count` raw bytes, borrowed from the underlying buffer.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(count)
    }

    /// Consume and return every unread byte.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let rest = self.rest();
        self.position = self.data.len();
        rest
    }

    /// Look at the next four bytes without consuming them.
    ///
    /// Returns `None` when fewer than four bytes remain.
    pub fn peek_fourcc(&self) -> Option<FourCc> {
        let bytes: [u8; 4] = self.rest().get(..4)?.try_into().ok()?;
        Some(FourCc::new(bytes))
    }

    /// Skip `count` bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }
}
