//! asn1-per - ASN.1 Aligned PER (APER) encode/decode primitives

mod decode;
mod encode;
mod per;

pub use decode::*;
pub use encode::*;
pub use per::{PerCodecData, PerCodecError};

// Grammar crates downstream always need these alongside the codec.
pub use bitvec::{bitvec, order::Msb0, slice::BitSlice, vec::BitVec};
pub use nonempty::{nonempty, NonEmpty};
pub use num_enum::{IntoPrimitive, TryFromPrimitive};

/// A type with a defined APER encoding.
pub trait AperCodec: Sized {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError>;
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError>;
}

/// Whole-message serialization on top of `AperCodec`.
pub trait SerDes: Sized {
    fn into_bytes(self) -> Result<Vec<u8>, PerCodecError>;
    fn from_bytes(bytes: &[u8]) -> Result<Self, PerCodecError>;
}

impl<T: AperCodec> SerDes for T {
    fn into_bytes(self) -> Result<Vec<u8>, PerCodecError> {
        let mut data = PerCodecData::new_aper();
        self.aper_encode(&mut data)?;
        Ok(data.into_bytes())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, PerCodecError> {
        let mut data = PerCodecData::from_slice_aper(bytes);
        Self::aper_decode(&mut data)
    }
}

/// SEQUENCE OF with a constrained size range.
pub fn encode_seq_of<T: AperCodec>(
    data: &mut PerCodecData,
    lb: usize,
    ub: usize,
    items: &[T],
) -> Result<(), PerCodecError> {
    encode_length_determinant(data, Some(lb), Some(ub), items.len())?;
    for item in items {
        item.aper_encode(data)?;
    }
    Ok(())
}

pub fn decode_seq_of<T: AperCodec>(
    data: &mut PerCodecData,
    lb: usize,
    ub: usize,
) -> Result<Vec<T>, PerCodecError> {
    let count = decode_length_determinant(data, Some(lb), Some(ub))?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(T::aper_decode(data)?);
    }
    Ok(items)
}

/// SEQUENCE (SIZE(1..ub)) OF, the common shape in this grammar.
pub fn encode_nonempty<T: AperCodec>(
    data: &mut PerCodecData,
    ub: usize,
    items: &NonEmpty<T>,
) -> Result<(), PerCodecError> {
    encode_length_determinant(data, Some(1), Some(ub), items.len())?;
    for item in items {
        item.aper_encode(data)?;
    }
    Ok(())
}

pub fn decode_nonempty<T: AperCodec>(
    data: &mut PerCodecData,
    ub: usize,
) -> Result<NonEmpty<T>, PerCodecError> {
    NonEmpty::from_vec(decode_seq_of(data, 1, ub)?)
        .ok_or_else(|| PerCodecError::Other("SEQUENCE (SIZE(1..)) decoded empty".to_string()))
}
