//! Container parsing.
//!
//! Record layout (all integers big-endian):
//!
//! ```text
//! stream    = "ALL." count:u32 object*count
//! object    = property* type:4 comp_size:u32 size:i32 payload:comp_size
//! property  = "prop" id:4 len:u32 value:len
//! FILE body = count:u32 object*count
//! ```
//!
//! A negative `size` marks an LZSS-compressed payload whose decompressed
//! length is `|size|`.

use crate::config::ParseConfig;
use crate::model::{Datafile, Object, Property};
use crate::pack::unpack;
use crate::tags;
use log::{debug, trace};
use oxidat_core::{ByteReader, DatError, Resource, Result, TagContext};
use oxidat_lzss::{DecodeMode, decompress};
use std::borrow::Cow;

/// Smallest possible object record: type, comp_size and size with no
/// properties and no payload.
const MIN_OBJECT_RECORD: usize = 12;

/// How an object's payload bytes are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// Payload bytes are used verbatim.
    Stored,
    /// Payload bytes are an LZSS block of the given decompressed length.
    Compressed {
        /// Decompressed length.
        expected_len: usize,
    },
}

impl PayloadEncoding {
    /// Interpret the signed size field of an object record.
    ///
    /// ```rust
    /// use oxidat_datafile::PayloadEncoding;
    ///
    /// assert_eq!(PayloadEncoding::from_size_field(10), PayloadEncoding::Stored);
    /// assert_eq!(
    ///     PayloadEncoding::from_size_field(-10),
    ///     PayloadEncoding::Compressed { expected_len: 10 }
    /// );
    /// ```
    pub fn from_size_field(size: i32) -> Self {
        if size < 0 {
            Self::Compressed {
                expected_len: size.unsigned_abs() as usize,
            }
        } else {
            Self::Stored
        }
    }
}

/// Datafile parser with configurable limits.
#[derive(Debug, Clone, Default)]
pub struct DatafileParser {
    config: ParseConfig,
}

impl DatafileParser {
    /// Create a parser.
    pub fn new(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Active limits.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parse a complete file, starting at the pack indicator.
    pub fn parse(&self, data: &[u8]) -> Result<Datafile> {
        let stream = unpack(data)?;
        self.parse_stream(&stream)
    }

    /// Parse a datafile stream, starting at the `ALL.` magic.
    pub fn parse_stream(&self, stream: &[u8]) -> Result<Datafile> {
        let mut reader = ByteReader::new(stream);
        let magic = reader.read_fourcc()?;
        if magic != tags::DAT_MAGIC {
            return Err(DatError::unknown_tag(TagContext::DatafileMagic, magic));
        }

        let count = reader.read_u32_be()?;
        debug!("datafile: {} root objects", count);

        let objects = self.parse_object_list(&mut reader, count)?;
        if !reader.is_at_end() {
            debug!(
                "ignoring {} trailing bytes after root objects",
                reader.remaining()
            );
        }
        Ok(Datafile::new(objects))
    }

    /// Parse `count` objects from the reader as a root-level list.
    pub fn parse_object_list(
        &self,
        reader: &mut ByteReader<'_>,
        count: u32,
    ) -> Result<Vec<Object>> {
        let mut walk = Walk {
            config: &self.config,
            objects: 0,
        };
        walk.object_list(reader, count, 0)
    }
}

/// Parse a datafile stream with default limits.
pub fn parse_datafile(stream: &[u8]) -> Result<Datafile> {
    DatafileParser::default().parse_stream(stream)
}

/// Parse `count` objects with default limits.
pub fn parse_object_list(reader: &mut ByteReader<'_>, count: u32) -> Result<Vec<Object>> {
    DatafileParser::default().parse_object_list(reader, count)
}

/// Parse consecutive property records.
///
/// Stops without consuming anything at the first lookahead that is not
/// `prop`, including when fewer than four bytes remain.
pub fn parse_properties(reader: &mut ByteReader<'_>) -> Result<Vec<Property>> {
    let mut properties = Vec::new();
    while reader.peek_fourcc() == Some(tags::PROP) {
        reader.skip(4)?;
        let id = reader.read_fourcc()?;
        let len = reader.read_u32_be()? as usize;
        let value = reader.read_bytes(len)?;
        properties.push(Property::new(id, value));
    }
    Ok(properties)
}

/// Per-parse state shared across recursion levels.
struct Walk<'c> {
    config: &'c ParseConfig,
    objects: usize,
}

impl Walk<'_> {
    fn object_list(
        &mut self,
        reader: &mut ByteReader<'_>,
        count: u32,
        depth: usize,
    ) -> Result<Vec<Object>> {
        if depth > self.config.max_depth {
            return Err(DatError::exhausted(
                Resource::NestingDepth,
                self.config.max_depth,
            ));
        }

        let count = count as usize;
        let capacity = count.min(reader.remaining() / MIN_OBJECT_RECORD);
        let mut objects = Vec::with_capacity(capacity);
        for _ in 0..count {
            objects.push(self.object(reader, depth)?);
        }
        Ok(objects)
    }

    fn object(&mut self, reader: &mut ByteReader<'_>, depth: usize) -> Result<Object> {
        self.objects += 1;
        if self.objects > self.config.max_objects {
            return Err(DatError::exhausted(
                Resource::ObjectCount,
                self.config.max_objects,
            ));
        }

        let properties = parse_properties(reader)?;
        let kind = reader.read_fourcc()?;
        let comp_size = reader.read_u32_be()? as usize;
        let encoding = PayloadEncoding::from_size_field(reader.read_i32_be()?);
        let raw = reader.read_bytes(comp_size)?;

        trace!(
            "object {} at depth {}: {} properties, {} bytes, {:?}",
            kind,
            depth,
            properties.len(),
            comp_size,
            encoding
        );

        let payload: Cow<'_, [u8]> = match encoding {
            PayloadEncoding::Stored => Cow::Borrowed(raw),
            PayloadEncoding::Compressed { expected_len } => {
                Cow::Owned(decompress(raw, DecodeMode::Bounded(expected_len))?)
            }
        };

        if kind == tags::FILE {
            let mut nested = ByteReader::new(&payload);
            let count = nested.read_u32_be()?;
            let children = self.object_list(&mut nested, count, depth + 1)?;
            Ok(Object::container(properties, children))
        } else {
            Ok(Object::new(kind, properties, payload.into_owned()))
        }
    }
}
