//! ROM-level helpers: signature validation and locating MIO0 blocks.

use crate::mio0;
use std::fmt;

/// First four bytes of a `.z64` (big-endian) ROM.
pub const SIGNATURE: [u8; 4] = [0x80, 0x37, 0x12, 0x40];
/// The same signature as it appears in a byte-swapped `.v64` ROM.
pub const SIGNATURE_BYTE_SWAPPED: [u8; 4] = [0x37, 0x80, 0x40, 0x12];

#[derive(Debug, PartialEq, Eq)]
pub enum RomError {
    /// The file is too small to hold a signature.
    TooSmall,
    /// A `.v64` byte-swapped ROM; only `.z64` is supported.
    ByteSwapped,
    UnknownSignature([u8; 4]),
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RomError::TooSmall => write!(f, "file too small to be a ROM"),
            RomError::ByteSwapped => {
                write!(f, "byte-swapped ROM, please convert to '.z64' format")
            }
            RomError::UnknownSignature(sig) => write!(
                f,
                "unknown ROM signature {:02x} {:02x} {:02x} {:02x}",
                sig[0], sig[1], sig[2], sig[3]
            ),
        }
    }
}

impl std::error::Error for RomError {}

/// Checks that `rom` starts with the big-endian `.z64` signature,
/// diagnosing the byte-swapped variant separately.
pub fn check_signature(rom: &[u8]) -> Result<(), RomError> {
    if rom.len() < SIGNATURE.len() {
        return Err(RomError::TooSmall);
    }

    let sig = &rom[..SIGNATURE.len()];
    if sig == SIGNATURE {
        Ok(())
    } else if sig == SIGNATURE_BYTE_SWAPPED {
        Err(RomError::ByteSwapped)
    } else {
        let mut found = [0; 4];
        found.copy_from_slice(sig);
        Err(RomError::UnknownSignature(found))
    }
}

/// Returns the offset of every `MIO0` magic in the ROM. The offsets
/// are candidates; [`mio0::decode`] decides whether each one is a
/// well-formed block.
pub fn find_mio0(rom: &[u8]) -> Vec<usize> {
    rom.windows(mio0::MAGIC.len())
        .enumerate()
        .filter(|(_, window)| window == mio0::MAGIC)
        .map(|(offset, _)| offset)
        .collect()
}
