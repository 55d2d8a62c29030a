//! Conversion of Allegro bitmap objects to Windows BMP.
//!
//! A `BMP ` object payload is `bits:i16 width:u16 height:u16` (big-endian)
//! followed by top-down pixel rows. Only true-color depths are converted:
//! 24-bit RGB and 32-bit RGBA (`-32` marks a 32-bit image with alpha).

use oxidat_core::ByteReader;

/// Decoded true-color image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// Top-down RGB triples.
    pub pixels: Vec<u8>,
}

impl RgbImage {
    /// Decode an Allegro bitmap payload, `None` for unsupported depths or
    /// short pixel data.
    pub fn from_allegro(payload: &[u8]) -> Option<Self> {
        let mut reader = ByteReader::new(payload);
        let bits = reader.read_u16_be().ok()? as i16;
        let width = reader.read_u16_be().ok()?;
        let height = reader.read_u16_be().ok()?;

        let stride = match bits {
            24 => 3,
            32 | -32 => 4,
            _ => return None,
        };
        if width == 0 || height == 0 {
            return None;
        }

        let count = usize::from(width) * usize::from(height);
        let data = reader.read_bytes(count * stride).ok()?;
        let pixels = data
            .chunks_exact(stride)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Encode as a bottom-up 24-bit BMP file.
    pub fn to_bmp(&self) -> Vec<u8> {
        const HEADER_SIZE: u32 = 54;
        let width = usize::from(self.width);
        let row_bytes = width * 3;
        let padding = (4 - row_bytes % 4) % 4;
        let image_size = ((row_bytes + padding) * usize::from(self.height)) as u32;

        let mut out = Vec::with_capacity((HEADER_SIZE + image_size) as usize);

        // BITMAPFILEHEADER
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(HEADER_SIZE + image_size).to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&HEADER_SIZE.to_le_bytes());

        // BITMAPINFOHEADER
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&u32::from(self.width).to_le_bytes());
        out.extend_from_slice(&u32::from(self.height).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&image_size.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&[0; 8]);

        for row in self.pixels.chunks_exact(row_bytes).rev() {
            for px in row.chunks_exact(3) {
                out.extend_from_slice(&[px[2], px[1], px[0]]);
            }
            out.extend(std::iter::repeat_n(0u8, padding));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(bits: i16, width: u16, height: u16, pixels: &[u8]) -> Vec<u8> {
        let mut out = bits.to_be_bytes().to_vec();
        out.extend_from_slice(&width.to_be_bytes());
        out.extend_from_slice(&height.to_be_bytes());
        out.extend_from_slice(pixels);
        out
    }

    #[test]
    fn test_decode_24() {
        let image = RgbImage::from_allegro(&payload(24, 2, 1, &[1, 2, 3, 4, 5, 6])).unwrap();
        assert_eq!(image.width, 2);
        assert_eq!(image.pixels, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_decode_32_drops_alpha() {
        let image = RgbImage::from_allegro(&payload(-32, 1, 2, &[1, 2, 3, 255, 4, 5, 6, 0]))
            .unwrap();
        assert_eq!(image.pixels, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_unsupported() {
        assert!(RgbImage::from_allegro(&payload(8, 1, 1, &[0])).is_none());
        assert!(RgbImage::from_allegro(&payload(24, 2, 2, &[0; 6])).is_none());
        assert!(RgbImage::from_allegro(&payload(24, 0, 5, &[])).is_none());
        assert!(RgbImage::from_allegro(b"\0\x18").is_none());
    }

    #[test]
    fn test_bmp_layout() {
        let image = RgbImage {
            width: 1,
            height: 2,
            pixels: vec![10, 20, 30, 40, 50, 60],
        };
        let bmp = image.to_bmp();

        // One pixel rows are padded from 3 to 4 bytes.
        assert_eq!(bmp.len(), 54 + 8);
        assert_eq!(&bmp[0..2], b"BM");
        assert_eq!(u32::from_le_bytes([bmp[2], bmp[3], bmp[4], bmp[5]]), 62);
        // Bottom row first, stored BGR.
        assert_eq!(&bmp[54..58], &[60, 50, 40, 0]);
        assert_eq!(&bmp[58..62], &[30, 20, 10, 0]);
    }
}
