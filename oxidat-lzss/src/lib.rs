//! # OxiDat LZSS
//!
//! Pure Rust implementation of the LZSS variant used by Allegro 4 packfiles
//! and datafiles (Haruhiko Okumura's 1989 `LZSS.C` parameters):
//!
//! - 4096-byte window, zero-filled, write cursor starting at `4096 - 18`
//! - flag bytes read LSB first, set bit = literal, clear bit = match
//! - 12-bit absolute positions and 4-bit lengths copied as `length + 3` bytes
//!
//! Blocks are decoded either to a known length ([`DecodeMode::Bounded`], as
//! for individual compressed objects) or until the input ends
//! ([`DecodeMode::Unbounded`], as for a packed file body).
//!
//! ## Example
//!
//! ```rust
//! use oxidat_lzss::{DecodeMode, compress, decompress};
//!
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//! let packed = compress(data);
//!
//! let unpacked = decompress(&packed, DecodeMode::Bounded(data.len())).unwrap();
//! assert_eq!(unpacked, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;

// Re-exports
pub use decode::{
    DecodeMode, LzssDecoder, MAX_MATCH, THRESHOLD, WINDOW_SIZE, decompress, decompress_to_end,
};
pub use encode::{LzssEncoder, MIN_MATCH, compress};
