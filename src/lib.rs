//! Tools for pulling texture data out of N64 ROM images:
//! finding and decompressing the MIO0 blocks embedded in a ROM,
//! and decoding the decompressed data as an RGBA5551 tile sheet.

mod bitstream;
pub mod bitmap;
pub mod mio0;
pub mod rom;
pub mod tilesheet;
