//! Whole-file packing.
//!
//! A datafile on disk starts with a 4-byte pack indicator. Packed files carry
//! the entire datafile stream as one LZSS block with no recorded length.

use crate::tags;
use log::debug;
use oxidat_core::{ByteReader, DatError, FourCc, Result, TagContext};
use oxidat_lzss::decompress_to_end;
use std::borrow::Cow;

/// Whole-file packing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackKind {
    /// The stream is LZSS-compressed (`slh!`).
    Packed,
    /// The stream is stored as-is (`slh.`).
    Unpacked,
}

impl PackKind {
    /// Map a pack indicator to a packing mode.
    pub fn from_indicator(tag: FourCc) -> Option<Self> {
        match tag {
            tags::PACKED => Some(Self::Packed),
            tags::UNPACKED => Some(Self::Unpacked),
            _ => None,
        }
    }

    /// The indicator written for this mode.
    pub fn indicator(self) -> FourCc {
        match self {
            Self::Packed => tags::PACKED,
            Self::Unpacked => tags::UNPACKED,
        }
    }

    /// Read the pack indicator at the start of a file.
    pub fn detect(data: &[u8]) -> Result<Self> {
        let tag = ByteReader::new(data).read_fourcc()?;
        Self::from_indicator(tag)
            .ok_or_else(|| DatError::unknown_tag(TagContext::PackIndicator, tag))
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Packed => "packed",
            Self::Unpacked => "unpacked",
        }
    }
}

/// Strip the pack indicator and return the datafile stream.
///
/// Unpacked files are borrowed; packed files are decompressed until the
/// input ends.
pub fn unpack(data: &[u8]) -> Result<Cow<'_, [u8]>> {
    let kind = PackKind::detect(data)?;
    let body = &data[4..];
    debug!("pack indicator {}: {} body bytes", kind.name(), body.len());

    match kind {
        PackKind::Unpacked => Ok(Cow::Borrowed(body)),
        PackKind::Packed => {
            let stream = decompress_to_end(body)?;
            debug!("unpacked stream: {} bytes", stream.len());
            Ok(Cow::Owned(stream))
        }
    }
}
