//! Datafile serialization.

use crate::model::{Datafile, Object, ObjectBody};
use crate::pack::PackKind;
use crate::tags;
use log::debug;
use oxidat_core::{DatError, Result};
use oxidat_lzss::compress;
use std::fs;
use std::path::Path;

/// Per-object payload storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectCompression {
    /// Store every payload verbatim.
    #[default]
    Stored,
    /// LZSS-compress every non-empty payload.
    Compressed,
    /// Compress only when it makes the payload smaller.
    Auto,
}

/// Serializes a [`Datafile`] tree back to the on-disk format.
///
/// Property order and duplicates are preserved, so parsing the output yields
/// a tree equal to the input.
///
/// ```rust
/// use oxidat_core::FourCc;
/// use oxidat_datafile::{Datafile, DatafileWriter, Object, PackKind, load};
///
/// let dat = Datafile::new(vec![Object::new(
///     FourCc::from_bytes(b"DATA"),
///     Vec::new(),
///     b"hello hello hello".to_vec(),
/// )]);
///
/// let bytes = DatafileWriter::new()
///     .with_packing(PackKind::Packed)
///     .write(&dat)
///     .unwrap();
/// assert_eq!(load(&bytes).unwrap(), dat);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DatafileWriter {
    packing: PackKind,
    compression: ObjectCompression,
}

impl DatafileWriter {
    /// Unpacked file with stored objects.
    pub fn new() -> Self {
        Self {
            packing: PackKind::Unpacked,
            compression: ObjectCompression::Stored,
        }
    }

    /// Set whole-file packing.
    pub fn with_packing(mut self, packing: PackKind) -> Self {
        self.packing = packing;
        self
    }

    /// Set per-object compression.
    pub fn with_compression(mut self, compression: ObjectCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Serialize a complete file, pack indicator included.
    pub fn write(&self, datafile: &Datafile) -> Result<Vec<u8>> {
        let stream = self.write_stream(datafile)?;
        let body = match self.packing {
            PackKind::Unpacked => stream,
            PackKind::Packed => compress(&stream),
        };
        debug!(
            "wrote {} datafile: {} body bytes",
            self.packing.name(),
            body.len()
        );

        let mut out = Vec::with_capacity(4 + body.len());
        out.extend_from_slice(self.packing.indicator().as_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Serialize the datafile stream, starting at the `ALL.` magic.
    pub fn write_stream(&self, datafile: &Datafile) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.extend_from_slice(tags::DAT_MAGIC.as_bytes());
        self.write_list(&mut out, datafile.objects())?;
        Ok(out)
    }

    /// Serialize to a file on disk.
    pub fn write_path<P: AsRef<Path>>(&self, datafile: &Datafile, path: P) -> Result<()> {
        let bytes = self.write(datafile)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn write_list(&self, out: &mut Vec<u8>, objects: &[Object]) -> Result<()> {
        put_u32(out, "object count", objects.len())?;
        for object in objects {
            self.write_object(out, object)?;
        }
        Ok(())
    }

    fn write_object(&self, out: &mut Vec<u8>, object: &Object) -> Result<()> {
        // `prop` would read back as a property record, a `FILE` leaf as a
        // container.
        let kind = object.kind();
        if kind == tags::PROP {
            return Err(DatError::reserved_kind(kind, "an object"));
        }
        if kind == tags::FILE && !object.is_container() {
            return Err(DatError::reserved_kind(kind, "a leaf"));
        }

        for prop in object.properties() {
            out.extend_from_slice(tags::PROP.as_bytes());
            out.extend_from_slice(prop.id().as_bytes());
            put_u32(out, "property length", prop.value().len())?;
            out.extend_from_slice(prop.value());
        }

        let body = match object.body() {
            ObjectBody::Payload(data) => data.clone(),
            ObjectBody::Children(children) => {
                let mut nested = Vec::new();
                self.write_list(&mut nested, children)?;
                nested
            }
        };
        let size = i32::try_from(body.len())
            .map_err(|_| DatError::field_overflow("size", body.len()))?;

        out.extend_from_slice(kind.as_bytes());
        match self.pack_payload(&body) {
            Some(packed) => {
                put_u32(out, "comp_size", packed.len())?;
                out.extend_from_slice(&(-size).to_be_bytes());
                out.extend_from_slice(&packed);
            }
            None => {
                put_u32(out, "comp_size", body.len())?;
                out.extend_from_slice(&size.to_be_bytes());
                out.extend_from_slice(&body);
            }
        }
        Ok(())
    }

    /// Compressed payload, or `None` to store it.
    fn pack_payload(&self, body: &[u8]) -> Option<Vec<u8>> {
        // A zero size field reads back as stored.
        if body.is_empty() {
            return None;
        }
        match self.compression {
            ObjectCompression::Stored => None,
            ObjectCompression::Compressed => Some(compress(body)),
            ObjectCompression::Auto => Some(compress(body)).filter(|p| p.len() < body.len()),
        }
    }
}

impl Default for DatafileWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn put_u32(out: &mut Vec<u8>, field: &'static str, value: usize) -> Result<()> {
    let value = u32::try_from(value).map_err(|_| DatError::field_overflow(field, value))?;
    out.extend_from_slice(&value.to_be_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Property;
    use oxidat_core::FourCc;

    fn leaf(payload: &[u8]) -> Object {
        Object::new(
            tags::DATA,
            vec![Property::new(tags::NAME, "blob")],
            payload.to_vec(),
        )
    }

    #[test]
    fn test_stored_layout() {
        let dat = Datafile::new(vec![Object::new(
            FourCc::from_bytes(b"TEST"),
            Vec::new(),
            b"abc".to_vec(),
        )]);
        let bytes = DatafileWriter::new().write(&dat).unwrap();

        let mut expected = b"slh.ALL.".to_vec();
        expected.extend_from_slice(&1u32.to_be_bytes());
        expected.extend_from_slice(b"TEST");
        expected.extend_from_slice(&3u32.to_be_bytes());
        expected.extend_from_slice(&3i32.to_be_bytes());
        expected.extend_from_slice(b"abc");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_property_layout() {
        let dat = Datafile::new(vec![leaf(b"")]);
        let stream = DatafileWriter::new().write_stream(&dat).unwrap();
        assert_eq!(&stream[8..16], b"propNAME");
        assert_eq!(&stream[16..20], &4u32.to_be_bytes());
        assert_eq!(&stream[20..24], b"blob");
        assert_eq!(&stream[24..28], b"DATA");
    }

    #[test]
    fn test_compressed_size_is_negative() {
        let payload = vec![7u8; 200];
        let dat = Datafile::new(vec![Object::new(tags::DATA, Vec::new(), payload)]);
        let stream = DatafileWriter::new()
            .with_compression(ObjectCompression::Compressed)
            .write_stream(&dat)
            .unwrap();

        let size = i32::from_be_bytes([stream[16], stream[17], stream[18], stream[19]]);
        assert_eq!(size, -200);
    }

    #[test]
    fn test_empty_payload_is_stored() {
        let dat = Datafile::new(vec![Object::new(tags::DATA, Vec::new(), Vec::new())]);
        let stream = DatafileWriter::new()
            .with_compression(ObjectCompression::Compressed)
            .write_stream(&dat)
            .unwrap();
        assert_eq!(&stream[12..20], &[0u8; 8]);
    }

    #[test]
    fn test_file_leaf_is_rejected() {
        let dat = Datafile::new(vec![Object::new(tags::FILE, Vec::new(), b"abc".to_vec())]);
        assert!(matches!(
            DatafileWriter::new().write(&dat),
            Err(DatError::ReservedKind {
                kind: tags::FILE,
                ..
            })
        ));
    }

    #[test]
    fn test_prop_kind_is_rejected() {
        let nested = Object::new(tags::PROP, Vec::new(), b"abcdefgh".to_vec());
        let dat = Datafile::new(vec![Object::container(Vec::new(), vec![nested])]);
        assert!(matches!(
            DatafileWriter::new().write(&dat),
            Err(DatError::ReservedKind {
                kind: tags::PROP,
                ..
            })
        ));
    }

    #[test]
    fn test_auto_keeps_incompressible() {
        let writer = DatafileWriter::new().with_compression(ObjectCompression::Auto);
        assert!(writer.pack_payload(b"xyz").is_none());
        assert!(writer.pack_payload(&[0u8; 64]).is_some());
    }
}
