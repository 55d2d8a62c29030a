//! Error types for OxiDat operations.
//!
//! Every failure while decoding a datafile aborts the whole load, so each
//! variant carries enough context (offsets, expected and actual values) to
//! diagnose a corrupt file from the message alone.

use crate::fourcc::FourCc;
use std::fmt;
use std::io;
use thiserror::Error;

/// Which recognized tag a [`DatError::UnknownFormatTag`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagContext {
    /// The 4-byte pack indicator at the very start of a file.
    PackIndicator,
    /// The `ALL.` magic at the start of the datafile stream.
    DatafileMagic,
}

impl fmt::Display for TagContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PackIndicator => write!(f, "pack indicator"),
            Self::DatafileMagic => write!(f, "datafile magic"),
        }
    }
}

/// A resource bounded by the parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Nesting depth of container objects.
    NestingDepth,
    /// Total number of objects in the tree.
    ObjectCount,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NestingDepth => write!(f, "container nesting depth"),
            Self::ObjectCount => write!(f, "object count"),
        }
    }
}

/// The main error type for OxiDat operations.
#[derive(Debug, Error)]
pub enum DatError {
    /// I/O error while reading a datafile from disk.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A fixed-size field or declared byte range runs past the end of the buffer.
    #[error(
        "Truncated stream at offset {offset}: need {needed} bytes, {available} available"
    )]
    TruncatedStream {
        /// Offset within the current buffer where the read started.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes left in the buffer.
        available: usize,
    },

    /// Bounded decompression produced a different length than declared.
    #[error("Size mismatch: expected {expected} decompressed bytes, got {actual}")]
    SizeMismatch {
        /// Declared output length.
        expected: usize,
        /// Length actually produced.
        actual: usize,
    },

    /// A pack indicator or datafile magic was not recognized.
    #[error(
        "Unknown {context}: {} ({:#010x})",
        .found.to_display_string(),
        .found.to_u32()
    )]
    UnknownFormatTag {
        /// Which tag was being checked.
        context: TagContext,
        /// The tag that was found instead.
        found: FourCc,
    },

    /// A configured parsing bound was exceeded.
    #[error("Resource exhausted: {resource} exceeds limit {limit}")]
    ResourceExhaustion {
        /// The bounded resource.
        resource: Resource,
        /// The configured limit.
        limit: usize,
    },

    /// An object kind that cannot be written with the given body.
    #[error("Object kind {kind} cannot be written as {role}")]
    ReservedKind {
        /// The offending object kind.
        kind: FourCc,
        /// What the object would have been written as.
        role: &'static str,
    },

    /// A length is too large for the 32-bit field that must encode it.
    #[error("Value {value} does not fit the {field} field")]
    FieldOverflow {
        /// Name of the record field.
        field: &'static str,
        /// The value that was too large.
        value: usize,
    },
}

/// Result type alias for OxiDat operations.
pub type Result<T> = std::result::Result<T, DatError>;

impl DatError {
    /// Create a truncated stream error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::TruncatedStream {
            offset,
            needed,
            available,
        }
    }

    /// Create a size mismatch error.
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::SizeMismatch { expected, actual }
    }

    /// Create an unknown format tag error.
    pub fn unknown_tag(context: TagContext, found: FourCc) -> Self {
        Self::UnknownFormatTag { context, found }
    }

    /// Create a resource exhaustion error.
    pub fn exhausted(resource: Resource, limit: usize) -> Self {
        Self::ResourceExhaustion { resource, limit }
    }

    /// Create a reserved kind error.
    pub fn reserved_kind(kind: FourCc, role: &'static str) -> Self {
        Self::ReservedKind { kind, role }
    }

    /// Create a field overflow error.
    pub fn field_overflow(field: &'static str, value: usize) -> Self {
        Self::FieldOverflow { field, value }
    }
}
