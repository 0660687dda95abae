//! Byte and bit level primitives shared by every block codec.

use core::ops::RangeInclusive;

use nom::{
    bits::{bits, complete::take as take_bits},
    bytes::complete::take,
    sequence::tuple,
};

use crate::error::{EdidError, ParseResult, Result};

/// Size of every EDID block.
pub const BLOCK_SIZE: usize = 128;

/// Computes the byte that makes the sum of all 128 bytes of `block` a multiple of 256.
///
/// The last byte of `block` is ignored, so the same function both generates and verifies.
pub fn checksum(block: &[u8; BLOCK_SIZE]) -> u8 {
    let sum = block[..BLOCK_SIZE - 1]
        .iter()
        .fold(0u8, |acc, b| acc.wrapping_add(*b));
    0u8.wrapping_sub(sum)
}

/// Checks the checksum stored in the last byte of `block`.
pub fn verify_checksum(block: &[u8; BLOCK_SIZE]) -> Result<()> {
    let computed = checksum(block);
    let stored = block[BLOCK_SIZE - 1];
    if computed == stored {
        Ok(())
    } else {
        Err(EdidError::ChecksumMismatch { stored, computed })
    }
}

/// Borrows `input` as a full block, or reports how long it actually was.
pub(crate) fn as_block(input: &[u8]) -> Result<&[u8; BLOCK_SIZE]> {
    input
        .try_into()
        .map_err(|_| EdidError::TotalSizeNotBlockMultiple(input.len()))
}

/// Reads `N` bytes into an owned array.
pub(crate) fn array<const N: usize>(input: &[u8]) -> ParseResult<'_, [u8; N]> {
    let (remaining, bytes) = take(N)(input)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok((remaining, out))
}

/// Splits one byte into its `hi_bits` most significant bits and the remaining low bits.
pub(crate) fn split_byte(input: &[u8], hi_bits: usize) -> ParseResult<'_, (u8, u8)> {
    bits::<_, _, EdidError, EdidError, _>(tuple((
        take_bits(hi_bits),
        take_bits(8 - hi_bits),
    )))(input)
}

/// Splits one byte into its high and low nibble.
pub(crate) fn nibbles(input: &[u8]) -> ParseResult<'_, (u8, u8)> {
    split_byte(input, 4)
}

/// Inverse of [`split_byte`].
pub(crate) fn join_byte(hi: u8, lo: u8, hi_bits: usize) -> u8 {
    let lo_bits = 8 - hi_bits;
    let lo_mask = ((1u16 << lo_bits) - 1) as u8;
    (((hi as u16) << lo_bits) as u8) | (lo & lo_mask)
}

/// Packs fields MSB first into a growing byte buffer.
///
/// This is the writing counterpart of the `nom::bits` readers used by the decoders.
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends the `width` least significant bits of `value`.
    pub(crate) fn write(&mut self, value: u32, width: usize) -> &mut Self {
        for shift in (0..width).rev() {
            if self.bit_len % 8 == 0 {
                self.bytes.push(0);
            }
            if (value >> shift) & 1 == 1 {
                let last = self.bytes.len() - 1;
                self.bytes[last] |= 0x80 >> (self.bit_len % 8);
            }
            self.bit_len += 1;
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Vec<u8> {
        self.bit_len = 0;
        core::mem::take(&mut self.bytes)
    }
}

/// Fails with [`EdidError::ValueOutOfRange`] unless `value` lies in `range`.
pub(crate) fn check_range<T>(field: &'static str, value: T, range: RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + Copy + Into<i64>,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(EdidError::out_of_range(field, value))
    }
}

/// Splits a value into its low byte and the bits above it, checking that it fits `width` bits.
pub(crate) fn split_wide(field: &'static str, value: u16, width: u32) -> Result<(u8, u8)> {
    check_range(field, value, 0..=((1u32 << width) - 1) as u16)?;
    Ok(((value & 0xFF) as u8, (value >> 8) as u8))
}
