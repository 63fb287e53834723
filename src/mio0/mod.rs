//! Functions for decompressing MIO0-formatted data
//!
//! A MIO0 block starts with a 0x10-byte big-endian header: the magic
//! `MIO0`, the decompressed length, and the offsets (from the start of
//! the block) of the back-reference pairs and of the raw bytes. The
//! layout bitstream follows the header: a 1 bit copies one raw byte,
//! a 0 bit expands one back-reference pair.

use crate::bitstream::IBitStream;
use byteorder::{BigEndian, ByteOrder, ReadBytesExt};
use std::fmt;

pub const MAGIC: &[u8; 4] = b"MIO0";
pub const HEADER_LEN: usize = 0x10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub decompressed_len: u32,
    pub compressed_offset: u32,
    pub raw_offset: u32,
}

impl Header {
    pub fn parse(block: &[u8]) -> Result<Header, Mio0Error> {
        if block.len() < HEADER_LEN {
            return Err(Mio0Error::TruncatedHeader);
        }

        if &block[..4] != MAGIC {
            let mut magic = [0; 4];
            magic.copy_from_slice(&block[..4]);
            return Err(Mio0Error::BadMagic(magic));
        }

        Ok(Header {
            decompressed_len: BigEndian::read_u32(&block[0x4..]),
            compressed_offset: BigEndian::read_u32(&block[0x8..]),
            raw_offset: BigEndian::read_u32(&block[0xC..]),
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Mio0Error {
    /// The block ends before the 0x10-byte header does.
    TruncatedHeader,
    /// The block does not start with `MIO0`.
    BadMagic([u8; 4]),
    /// A header offset points past the end of the block.
    OffsetPastEnd { offset: u32, block_len: usize },
    /// A back-reference reaches before the start of the output.
    DistanceTooFar { distance: usize, written: usize },
    /// A back-reference would write past the declared decompressed length.
    LengthOverrun { length: usize, written: usize },
    /// The layout, pair, or raw stream ran dry mid-decode.
    TruncatedStream,
}

impl fmt::Display for Mio0Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mio0Error::TruncatedHeader => write!(f, "block is shorter than a MIO0 header"),
            Mio0Error::BadMagic(magic) => write!(
                f,
                "bad magic {:02X} {:02X} {:02X} {:02X}, expected \"MIO0\"",
                magic[0], magic[1], magic[2], magic[3]
            ),
            Mio0Error::OffsetPastEnd { offset, block_len } => write!(
                f,
                "header offset {:#x} is past the end of the block ({} bytes)",
                offset, block_len
            ),
            Mio0Error::DistanceTooFar { distance, written } => write!(
                f,
                "back-reference distance {} with only {} bytes written",
                distance, written
            ),
            Mio0Error::LengthOverrun { length, written } => write!(
                f,
                "writing {} bytes at offset {} would overrun the declared length",
                length, written
            ),
            Mio0Error::TruncatedStream => write!(f, "input ended in the middle of the block"),
        }
    }
}

impl std::error::Error for Mio0Error {}

fn take_u8(src: &mut &[u8]) -> Result<u8, Mio0Error> {
    src.read_u8().map_err(|_| Mio0Error::TruncatedStream)
}

/// Decompresses a MIO0 block. `block` must start at the magic; bytes
/// past the end of the block's data regions are ignored, so handing in
/// the whole remainder of a ROM is fine.
pub fn decode(block: &[u8]) -> Result<Vec<u8>, Mio0Error> {
    let header = Header::parse(block)?;

    log::debug!(
        "MIO0: {} bytes decompressed, pairs at {:#x}, raw at {:#x}",
        header.decompressed_len,
        header.compressed_offset,
        header.raw_offset
    );

    for &offset in &[header.compressed_offset, header.raw_offset] {
        if offset as usize > block.len() {
            return Err(Mio0Error::OffsetPastEnd {
                offset,
                block_len: block.len(),
            });
        }
    }

    let mut layout = &block[HEADER_LEN..];
    let mut pairs = &block[header.compressed_offset as usize..];
    let mut raw = &block[header.raw_offset as usize..];

    let total = header.decompressed_len as usize;
    let mut out = Vec::with_capacity(total);
    let mut bits = IBitStream::<u8, BigEndian>::new();

    while out.len() < total {
        let is_raw = bits
            .get(&mut layout)
            .map_err(|_| Mio0Error::TruncatedStream)?;

        if is_raw {
            let byte = take_u8(&mut raw)?;
            out.push(byte);
        } else {
            let hi = take_u8(&mut pairs)?;
            let lo = take_u8(&mut pairs)?;

            let length = (hi >> 4) as usize + 3;
            let distance = (((hi & 0x0F) as usize) << 8 | lo as usize) + 1;

            if distance > out.len() {
                return Err(Mio0Error::DistanceTooFar {
                    distance,
                    written: out.len(),
                });
            }
            if out.len() + length > total {
                return Err(Mio0Error::LengthOverrun {
                    length,
                    written: out.len(),
                });
            }

            // Byte at a time; the reference may overlap the bytes
            // being written (distance 1 repeats a single byte).
            for _ in 0..length {
                let byte = out[out.len() - distance];
                out.push(byte);
            }
        }
    }

    Ok(out)
}
