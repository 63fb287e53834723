use byteorder::{ByteOrder, ReadBytesExt};
use num_traits::PrimInt;
use std::marker::PhantomData;

/// Says that a type can be read from with integers of a certain
/// size in either byte ordering. Blanket-implemented for every
/// `Read`, so it does not need to be implemented by the user.
pub trait ReadOrdered<T: PrimInt>: ReadBytesExt {
    fn read_ordered<Order: ByteOrder>(&mut self) -> std::io::Result<T>;
}

macro_rules! make_impl {
    { $inttype:ty, $funcname:ident } => {
        impl<T: ReadBytesExt> ReadOrdered<$inttype> for T {
            fn read_ordered<Order: ByteOrder>(&mut self) -> std::io::Result<$inttype> {
                self.$funcname::<Order>()
            }
        }
    };
}

// u8 is special cased in byteorder because it doesn't need an ordering
impl<T: ReadBytesExt> ReadOrdered<u8> for T {
    fn read_ordered<Order: ByteOrder>(&mut self) -> std::io::Result<u8> {
        self.read_u8()
    }
}

make_impl! { u16, read_u16 }
make_impl! { u32, read_u32 }

pub struct IBitStream<T: PrimInt, Order: ByteOrder> {
    read_bits: u32,
    byte_buffer: T,
    _order: PhantomData<Order>,
}

impl<T: PrimInt, Order: ByteOrder> IBitStream<T, Order> {
    fn bit_width() -> u32 {
        T::zero().count_zeros()
    }

    pub fn new() -> Self {
        IBitStream {
            read_bits: 0,
            byte_buffer: T::zero(),
            _order: PhantomData,
        }
    }

    fn check_buffer<R: ReadOrdered<T> + ?Sized>(&mut self, src: &mut R) -> std::io::Result<()> {
        if self.read_bits != 0 {
            return Ok(());
        }

        self.byte_buffer = src.read_ordered::<Order>()?;
        self.read_bits = Self::bit_width();
        Ok(())
    }

    /// Gets a single bit from the stream, most significant bit first.
    /// Remembers previously read bits, and gets a new word from the
    /// actual stream once all bits in the current word have been read.
    pub fn get<R: ReadOrdered<T> + ?Sized>(&mut self, src: &mut R) -> std::io::Result<bool> {
        self.check_buffer(src)?;
        self.read_bits -= 1;
        let bit = (self.byte_buffer >> self.read_bits as usize) & T::one();
        self.byte_buffer = self.byte_buffer ^ (bit << self.read_bits as usize);
        Ok(bit != T::zero())
    }
}

impl<T: PrimInt, Order: ByteOrder> Default for IBitStream<T, Order> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use byteorder::BigEndian;

    #[test]
    fn msb_first() {
        let mut src: &[u8] = &[0b1010_0001];
        let mut bits = IBitStream::<u8, BigEndian>::new();

        let expected = [true, false, true, false, false, false, false, true];
        for &bit in expected.iter() {
            assert_eq!(bits.get(&mut src).unwrap(), bit);
        }
    }

    #[test]
    fn exhausted_stream_is_an_error() {
        let mut src: &[u8] = &[0xFF];
        let mut bits = IBitStream::<u8, BigEndian>::new();

        for _ in 0..8 {
            bits.get(&mut src).unwrap();
        }
        assert!(bits.get(&mut src).is_err());
    }
}
