//! Well-known four-character codes.
//!
//! Values follow the Allegro 4 grabber (`allegro/datafile.h`). Only
//! [`DAT_MAGIC`], [`PROP`], [`FILE`] and the pack indicators affect parsing;
//! the rest are provided for consumers walking the tree.

use oxidat_core::FourCc;

/// Pack indicator of a file whose body is one LZSS stream (`F_PACK_MAGIC`).
pub const PACKED: FourCc = FourCc::from_bytes(b"slh!");

/// Pack indicator of a file whose body is stored as-is (`F_NOPACK_MAGIC`).
pub const UNPACKED: FourCc = FourCc::from_bytes(b"slh.");

/// Magic at the start of every datafile stream.
pub const DAT_MAGIC: FourCc = FourCc::from_bytes(b"ALL.");

/// Marks a property record.
pub const PROP: FourCc = FourCc::from_bytes(b"prop");

/// Container object: its payload is a nested object list.
pub const FILE: FourCc = FourCc::from_bytes(b"FILE");

// Object types

/// Arbitrary binary data.
pub const DATA: FourCc = FourCc::from_bytes(b"DATA");
/// Bitmap font.
pub const FONT: FourCc = FourCc::from_bytes(b"FONT");
/// Digital sample.
pub const SAMPLE: FourCc = FourCc::from_bytes(b"SAMP");
/// MIDI file.
pub const MIDI: FourCc = FourCc::from_bytes(b"MIDI");
/// GUS patch.
pub const PATCH: FourCc = FourCc::from_bytes(b"PAT ");
/// FLI/FLC animation.
pub const FLI: FourCc = FourCc::from_bytes(b"FLIC");
/// Bitmap.
pub const BITMAP: FourCc = FourCc::from_bytes(b"BMP ");
/// Run-length encoded sprite.
pub const RLE_SPRITE: FourCc = FourCc::from_bytes(b"RLE ");
/// Compiled sprite.
pub const C_SPRITE: FourCc = FourCc::from_bytes(b"CMP ");
/// Mode-X compiled sprite.
pub const XC_SPRITE: FourCc = FourCc::from_bytes(b"XCMP");
/// 256-color palette.
pub const PALETTE: FourCc = FourCc::from_bytes(b"PAL ");

// Property ids

/// Object name.
pub const NAME: FourCc = FourCc::from_bytes(b"NAME");
/// Source file the object was grabbed from.
pub const ORIG: FourCc = FourCc::from_bytes(b"ORIG");
/// Timestamp of the source file.
pub const DATE: FourCc = FourCc::from_bytes(b"DATE");
/// Grab position, x.
pub const XPOS: FourCc = FourCc::from_bytes(b"XPOS");
/// Grab position, y.
pub const YPOS: FourCc = FourCc::from_bytes(b"YPOS");
/// Grab size, width.
pub const XSIZ: FourCc = FourCc::from_bytes(b"XSIZ");
/// Grab size, height.
pub const YSIZ: FourCc = FourCc::from_bytes(b"YSIZ");

/// Human-readable description of a known object type.
pub fn describe(kind: FourCc) -> Option<&'static str> {
    let description = match kind {
        FILE => "nested datafile",
        DATA => "binary data",
        FONT => "font",
        SAMPLE => "sample",
        MIDI => "MIDI file",
        PATCH => "GUS patch",
        FLI => "FLI/FLC animation",
        BITMAP => "bitmap",
        RLE_SPRITE => "RLE sprite",
        C_SPRITE => "compiled sprite",
        XC_SPRITE => "mode-X compiled sprite",
        PALETTE => "palette",
        _ => return None,
    };
    Some(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_indicators() {
        assert_eq!(PACKED.to_u32(), 0x736C_6821);
        assert_eq!(UNPACKED.to_u32(), 0x736C_682E);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(BITMAP), Some("bitmap"));
        assert_eq!(describe(FourCc::from_bytes(b"TEST")), None);
    }
}
