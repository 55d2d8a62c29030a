//! # OxiDat Datafile
//!
//! Reader and writer for Allegro 4 datafiles (`.dat`), the asset containers
//! produced by the Allegro grabber and shipped by games such as Eador.
//!
//! A file is a pack indicator followed by a datafile stream, optionally
//! compressed as a whole. The stream holds a list of objects; each object
//! carries tagged properties and a payload that is either stored or LZSS
//! compressed. Objects of type `FILE` nest a further object list.
//!
//! ## Example
//!
//! ```rust
//! use oxidat_datafile::{load, tags};
//!
//! let mut file = b"slh.ALL.".to_vec();
//! file.extend_from_slice(&1u32.to_be_bytes());
//! file.extend_from_slice(b"propNAME\0\0\0\x05hello");
//! file.extend_from_slice(b"DATA\0\0\0\x03\0\0\0\x03abc");
//!
//! let dat = load(&file).unwrap();
//! let obj = dat.find("hello").unwrap();
//! assert_eq!(obj.kind(), tags::DATA);
//! assert_eq!(obj.payload(), Some(&b"abc"[..]));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod model;
pub mod pack;
pub mod parse;
pub mod stats;
pub mod tags;
pub mod write;

// Re-exports
pub use config::ParseConfig;
pub use model::{Datafile, DepthFirst, Object, ObjectBody, Property};
pub use pack::{PackKind, unpack};
pub use parse::{
    DatafileParser, PayloadEncoding, parse_datafile, parse_object_list, parse_properties,
};
pub use stats::DatafileStats;
pub use write::{DatafileWriter, ObjectCompression};

use oxidat_core::Result;
use std::fs;
use std::path::Path;

/// Parse a complete datafile held in memory.
pub fn load(data: &[u8]) -> Result<Datafile> {
    DatafileParser::default().parse(data)
}

/// Read and parse a datafile from disk.
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Datafile> {
    let data = fs::read(path)?;
    load(&data)
}

/// Parse a datafile straight from a read-only memory mapping.
#[cfg(feature = "mmap")]
pub fn load_mmap<P: AsRef<Path>>(path: P) -> Result<Datafile> {
    let mapped = oxidat_core::MappedFile::open(path)?;
    load(&mapped)
}
