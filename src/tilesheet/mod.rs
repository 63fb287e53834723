//! Decoder for the fixed-layout RGBA5551 tile sheet format
//!
//! A sheet is a grid of 16x16-pixel tiles laid out 10 to a row. Each
//! pixel is a big-endian 16-bit word packing 5 bits each of red, green
//! and blue plus a 1-bit alpha. Pixels are stored tile by tile, not
//! scanline by scanline, so decoding maps each pixel index back to its
//! absolute position in the image.

use byteorder::{BigEndian, ByteOrder};

pub const TILE_SIZE: usize = 16;
pub const TILE_AREA: usize = TILE_SIZE * TILE_SIZE;
pub const TILES_PER_ROW: usize = 10;

/// Length of the image region consumed from a texture blob.
pub const SHEET_LEN: usize = 0x87B8;

/// Side of the square block each decoded pixel is painted as.
pub const SCALE: usize = 4;

/// A single decoded pixel. `x` and `y` are already scaled by
/// [`SCALE`] and address the top-left corner of the pixel's block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: usize,
    pub y: usize,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0 or 1; a 0 paints nothing.
    pub a: u8,
}

/// Decodes a tile sheet into a lazy sequence of pixels.
///
/// One pixel is produced per two input bytes; a trailing odd byte is
/// silently ignored, so truncated or padded sheets decode without
/// error (a buffer shorter than two bytes produces nothing).
pub fn decode(buf: &[u8]) -> Pixels<'_> {
    Pixels { buf, index: 0 }
}

pub struct Pixels<'a> {
    buf: &'a [u8],
    index: usize,
}

impl<'a> Iterator for Pixels<'a> {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        if (self.index + 1) * 2 > self.buf.len() {
            return None;
        }

        let i = self.index;
        self.index += 1;

        // Reading the word as an unsigned big-endian u16 sidesteps the
        // sign extension a signed byte read would smear over the high bits.
        let word = BigEndian::read_u16(&self.buf[i * 2..]);
        let (x, y) = sheet_coords(i);
        let (r, g, b, a) = unpack_5551(word);

        Some(Pixel {
            x: x * SCALE,
            y: y * SCALE,
            r,
            g,
            b,
            a,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buf.len() / 2 - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Pixels<'a> {}

/// Maps a pixel index to its unscaled position in the image.
fn sheet_coords(i: usize) -> (usize, usize) {
    let tile = i / TILE_AREA;
    let tile_row = tile / TILES_PER_ROW;

    let x = i % TILE_SIZE + TILE_SIZE * (tile - TILES_PER_ROW * tile_row);
    let y = i / TILE_SIZE - TILE_SIZE * tile + TILE_SIZE * tile_row;

    (x, y)
}

fn unpack_5551(word: u16) -> (u8, u8, u8, u8) {
    let r5 = (word & 0xF800) >> 11; // 1111 1000 0000 0000
    let g5 = (word & 0x07C0) >> 6; //  0000 0111 1100 0000
    let b5 = (word & 0x003E) >> 1; //  0000 0000 0011 1110
    let a = (word & 0x0001) as u8; //  0000 0000 0000 0001

    (scale_channel(r5), scale_channel(g5), scale_channel(b5), a)
}

// Truncating, not rounding: 31 -> 255, 16 -> 131, 0 -> 0.
fn scale_channel(c5: u16) -> u8 {
    (c5 as u32 * 255 / 31) as u8
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_buffer_produces_nothing() {
        assert_eq!(decode(&[]).count(), 0);
    }

    #[test]
    fn single_byte_produces_nothing() {
        assert_eq!(decode(&[0xFF]).count(), 0);
    }

    #[test]
    fn trailing_odd_byte_is_ignored() {
        let pixels: Vec<Pixel> = decode(&[0xFF, 0xFF, 0x12]).collect();
        assert_eq!(pixels.len(), 1);
    }

    #[test]
    fn all_ones_is_opaque_white_at_origin() {
        let pixels: Vec<Pixel> = decode(&[0xFF, 0xFF]).collect();
        assert_eq!(
            pixels,
            vec![Pixel {
                x: 0,
                y: 0,
                r: 255,
                g: 255,
                b: 255,
                a: 1,
            }]
        );
    }

    #[test]
    fn all_zeroes_is_transparent_black() {
        let pixels: Vec<Pixel> = decode(&[0x00, 0x00]).collect();
        assert_eq!(
            pixels,
            vec![Pixel {
                x: 0,
                y: 0,
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            }]
        );
    }

    #[test]
    fn high_bit_of_first_byte_lands_in_red() {
        // 0x80 0x01 must read as the word 0x8001 (red = 16, alpha set),
        // not pick up sign bits from the first byte.
        let pixels: Vec<Pixel> = decode(&[0x80, 0x01]).collect();
        assert_eq!(
            pixels,
            vec![Pixel {
                x: 0,
                y: 0,
                r: 131,
                g: 0,
                b: 0,
                a: 1,
            }]
        );
    }

    #[test]
    fn channel_scale_truncates() {
        assert_eq!(scale_channel(0), 0);
        assert_eq!(scale_channel(16), 131); // floor(16 / 31 * 255)
        assert_eq!(scale_channel(31), 255);
    }

    #[test]
    fn coordinates_walk_tiles_before_scanlines() {
        assert_eq!(sheet_coords(0), (0, 0));
        assert_eq!(sheet_coords(15), (15, 0));
        // next index wraps to the tile's second scanline
        assert_eq!(sheet_coords(16), (0, 1));
        assert_eq!(sheet_coords(255), (15, 15));
        // second tile sits to the right of the first
        assert_eq!(sheet_coords(256), (16, 0));
        // eleventh tile starts the second tile row
        assert_eq!(sheet_coords(TILE_AREA * TILES_PER_ROW), (0, 16));
    }

    #[test]
    fn mapping_is_periodic_per_tile_row() {
        // One full tile row is 16 * 10 * 16 pixel indices; a tile row
        // later the x is unchanged and the y has moved down one tile.
        let stride = TILE_SIZE * TILES_PER_ROW * TILE_SIZE;
        for &i in &[0, 7, 133, 256, 1029, 2559] {
            let (x0, y0) = sheet_coords(i);
            let (x1, y1) = sheet_coords(i + stride);
            assert_eq!((x1, y1), (x0, y0 + TILE_SIZE));
        }
    }

    #[test]
    fn full_sheet_stays_in_bounds() {
        let sheet = vec![0xFF; SHEET_LEN];
        let mut count = 0;
        for px in decode(&sheet) {
            assert_eq!(px.x % SCALE, 0);
            assert_eq!(px.y % SCALE, 0);
            assert!(px.x + SCALE <= 1000, "x = {}", px.x);
            assert!(px.y + SCALE <= 1000, "y = {}", px.y);
            count += 1;
        }
        assert_eq!(count, SHEET_LEN / 2);
    }

    #[test]
    fn size_hint_is_exact() {
        let buf = [0u8; 10];
        let mut pixels = decode(&buf);
        assert_eq!(pixels.len(), 5);
        pixels.next();
        assert_eq!(pixels.len(), 4);
    }
}
