//! per - bit-level buffer shared by all APER encode/decode operations

use bitvec::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PerCodecError {
    #[error("PER buffer exhausted: wanted {wanted} bits, {remaining} remaining")]
    BufferExhausted { wanted: usize, remaining: usize },
    #[error("invalid CHOICE index {0}")]
    InvalidChoiceIndex(u128),
    #[error("invalid ENUMERATED value {0}")]
    InvalidEnumerated(u128),
    #[error("value {value} outside PER constraint [{lb}, {ub}]")]
    ConstraintViolation { value: i128, lb: i128, ub: i128 },
    #[error("length {0} requires fragmentation, which is not supported")]
    LengthTooLarge(usize),
    #[error("malformed REAL content: {0}")]
    MalformedReal(String),
    #[error("{0}")]
    Other(String),
}

/// Bit-oriented buffer for Aligned PER.  Encoding appends to the end;
/// decoding reads from a cursor that only moves forward.
pub struct PerCodecData {
    bits: BitVec<u8, Msb0>,
    offset: usize,
}

impl PerCodecData {
    pub fn new_aper() -> Self {
        PerCodecData {
            bits: BitVec::new(),
            offset: 0,
        }
    }

    pub fn from_slice_aper(bytes: &[u8]) -> Self {
        PerCodecData {
            bits: BitVec::from_slice(bytes),
            offset: 0,
        }
    }

    /// Finish encoding, padding the trailing partial octet with zeros.
    /// A PER encoding is never empty on the wire, so an empty buffer
    /// becomes a single zero octet.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.bits.is_empty() {
            return vec![0];
        }
        while self.bits.len() % 8 != 0 {
            self.bits.push(false);
        }
        self.bits.set_uninitialized(false);
        self.bits.into_vec()
    }

    pub fn length_in_bytes(&self) -> usize {
        self.bits.len().div_ceil(8)
    }

    pub fn remaining_bits(&self) -> usize {
        self.bits.len() - self.offset
    }

    pub fn align_encode(&mut self) {
        while self.bits.len() % 8 != 0 {
            self.bits.push(false);
        }
    }

    pub fn align_decode(&mut self) -> Result<(), PerCodecError> {
        let aligned = self.offset.div_ceil(8) * 8;
        if aligned > self.bits.len() {
            return Err(PerCodecError::BufferExhausted {
                wanted: aligned - self.offset,
                remaining: self.remaining_bits(),
            });
        }
        self.offset = aligned;
        Ok(())
    }

    pub fn append_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn append_bits(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.bits
            .extend_from_bitslice(BitSlice::<u8, Msb0>::from_slice(bytes));
    }

    /// Append the low `width` bits of `value`, most significant first.
    pub fn append_uint_bits(&mut self, value: u128, width: usize) {
        for i in (0..width).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    fn check(&self, wanted: usize) -> Result<(), PerCodecError> {
        if self.remaining_bits() < wanted {
            Err(PerCodecError::BufferExhausted {
                wanted,
                remaining: self.remaining_bits(),
            })
        } else {
            Ok(())
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, PerCodecError> {
        self.check(1)?;
        let bit = self.bits[self.offset];
        self.offset += 1;
        Ok(bit)
    }

    pub fn read_bits(&mut self, count: usize) -> Result<BitVec<u8, Msb0>, PerCodecError> {
        self.check(count)?;
        let out = self.bits[self.offset..self.offset + count].to_bitvec();
        self.offset += count;
        Ok(out)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, PerCodecError> {
        let bits = self.read_bits(count * 8)?;
        Ok(bits.into_vec())
    }

    pub fn read_uint_bits(&mut self, width: usize) -> Result<u128, PerCodecError> {
        self.check(width)?;
        let mut value = 0u128;
        for _ in 0..width {
            value = (value << 1) | (self.bits[self.offset] as u128);
            self.offset += 1;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_bits_round_trip() {
        let mut data = PerCodecData::new_aper();
        data.append_uint_bits(0b101101, 6);
        data.append_uint_bits(3, 2);
        let bytes = data.into_bytes();
        assert_eq!(bytes, vec![0b10110111]);

        let mut data = PerCodecData::from_slice_aper(&bytes);
        assert_eq!(data.read_uint_bits(6).unwrap(), 0b101101);
        assert_eq!(data.read_uint_bits(2).unwrap(), 3);
    }

    #[test]
    fn empty_encoding_is_one_octet() {
        let data = PerCodecData::new_aper();
        assert_eq!(data.into_bytes(), vec![0]);
    }

    #[test]
    fn exhaustion_reported() {
        let mut data = PerCodecData::from_slice_aper(&[0xff]);
        data.read_uint_bits(8).unwrap();
        assert!(matches!(
            data.read_bit(),
            Err(PerCodecError::BufferExhausted { .. })
        ));
    }

    #[test]
    fn align_pads_with_zeros() {
        let mut data = PerCodecData::new_aper();
        data.append_bit(true);
        data.align_encode();
        data.append_bytes(&[0xab]);
        assert_eq!(data.into_bytes(), vec![0x80, 0xab]);
    }
}
