//! # OxiDat Core
//!
//! Core components for the OxiDat datafile library.
//!
//! This crate provides the fundamental building blocks shared by the codec
//! and container layers:
//!
//! - [`reader`]: Sequential big-endian reader with non-consuming lookahead
//! - [`fourcc`]: Four-character record and type tags
//! - [`ringbuffer`]: Zero-initialized LZSS window addressed by position
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Tools                                               │
//! │     oxidat CLI (list, info, detect, extract)            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Container                                           │
//! │     Pack detection, object tree parsing, writer         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Codec                                               │
//! │     Allegro LZSS (bounded / unbounded)                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L0: Core (this crate)                                   │
//! │     ByteReader, FourCc, RingBuffer, DatError            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxidat_core::{ByteReader, FourCc};
//!
//! let data = b"propNAME\x00\x00\x00\x03abc";
//! let mut reader = ByteReader::new(data);
//!
//! assert_eq!(reader.peek_fourcc(), Some(FourCc::from_bytes(b"prop")));
//! assert_eq!(reader.position(), 0);
//!
//! reader.skip(4).unwrap();
//! assert_eq!(reader.read_fourcc().unwrap(), FourCc::from_bytes(b"NAME"));
//! assert_eq!(reader.read_u32_be().unwrap(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod fourcc;
#[cfg(feature = "mmap")]
pub mod mmap;
pub mod reader;
pub mod ringbuffer;

// Re-exports for convenience
pub use error::{DatError, Resource, Result, TagContext};
pub use fourcc::FourCc;
pub use reader::ByteReader;
pub use ringbuffer::RingBuffer;

#[cfg(feature = "mmap")]
pub use mmap::MappedFile;
