//! Memory-mapped file support for OxiDat.
//!
//! Datafiles are always decoded from one contiguous buffer. For large game
//! archives, mapping the file avoids copying it into a `Vec` first.
//!
//! # Example
//!
//! ```no_run
//! use oxidat_core::mmap::MappedFile;
//!
//! let file = MappedFile::open("game.dat")?;
//! println!("{} bytes mapped", file.len());
//! # Ok::<(), oxidat_core::error::DatError>(())
//! ```
//!
//! # Safety
//!
//! Memory-mapped files can be dangerous if the underlying file is modified by
//! another process while mapped. This implementation uses read-only mappings
//! to minimize risks.

use crate::error::Result;
use memmap2::Mmap;
use std::fs::File;
use std::ops::Deref;
use std::path::Path;

/// A read-only memory mapping of a whole file.
#[derive(Debug)]
pub struct MappedFile {
    mmap: Mmap,
}

impl MappedFile {
    /// Open and map the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DatError::Io`] if the file cannot be opened or
    /// mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_file(&file)
    }

    /// Map an already-open file.
    pub fn from_file(file: &File) -> Result<Self> {
        // SAFETY: read-only mapping; the caller must not modify the file while
        // the mapping is alive.
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self { mmap })
    }

    /// Length of the mapped file in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Whether the mapped file is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// The mapped bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.mmap
    }
}

impl Deref for MappedFile {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}
