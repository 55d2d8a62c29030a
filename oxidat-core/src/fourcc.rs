//! Four-character codes.
//!
//! Allegro datafiles identify every record kind with a 4-byte ASCII tag
//! stored big-endian, so `"BMP "` is the integer `0x424D5020`.

use std::fmt;

/// A 4-byte tag identifying a record, object type, or property kind.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FourCc([u8; 4]);

impl FourCc {
    /// Create a tag from its four bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Create a tag from a 4-byte literal such as `b"FILE"`.
    pub const fn from_bytes(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }

    /// Create a tag from its big-endian integer value.
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    /// The big-endian integer value of this tag.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// The raw bytes of this tag.
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Whether every byte is printable ASCII (space included).
    pub fn is_printable(&self) -> bool {
        self.0.iter().all(|b| (0x20..0x7F).contains(b))
    }

    /// The tag as text, with non-printable bytes replaced by `.`.
    pub fn to_display_string(&self) -> String {
        self.0
            .iter()
            .map(|&b| if (0x20..0x7F).contains(&b) { b as char } else { '.' })
            .collect()
    }
}

impl From<[u8; 4]> for FourCc {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<u32> for FourCc {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_printable() {
            write!(f, "{}", self.to_display_string())
        } else {
            write!(f, "{:#010x}", self.to_u32())
        }
    }
}

impl fmt::Debug for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FourCc(\"{}\")", self.to_display_string())
    }
}
