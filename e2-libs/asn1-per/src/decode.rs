//! decode - APER decode routines mirroring the encode set

use crate::per::{PerCodecData, PerCodecError};
use bitvec::prelude::*;

pub fn decode_bool(data: &mut PerCodecData) -> Result<bool, PerCodecError> {
    data.read_bit()
}

pub fn decode_integer(
    data: &mut PerCodecData,
    lb: Option<i128>,
    ub: Option<i128>,
    extensible: bool,
) -> Result<i128, PerCodecError> {
    if extensible && data.read_bit()? {
        return Err(PerCodecError::Other(
            "INTEGER extension values not supported".to_string(),
        ));
    }
    match (lb, ub) {
        (Some(lb), Some(ub)) => {
            let range = (ub - lb + 1) as u128;
            let offset = if range == 1 {
                0
            } else if range < 256 {
                let width = (128 - (range - 1).leading_zeros()) as usize;
                data.read_uint_bits(width)?
            } else if range == 256 {
                data.align_decode()?;
                data.read_uint_bits(8)?
            } else if range <= 65536 {
                data.align_decode()?;
                data.read_uint_bits(16)?
            } else {
                let max_octets = crate::encode::min_unsigned_octets(range - 1).len();
                let octets = decode_integer(data, Some(1), Some(max_octets as i128), false)?;
                data.align_decode()?;
                data.read_uint_bits(octets as usize * 8)?
            };
            Ok(lb + offset as i128)
        }
        (Some(lb), None) => {
            let octets = decode_length_determinant(data, None, None)?;
            data.align_decode()?;
            let value = data.read_uint_bits(octets * 8)?;
            Ok(lb + value as i128)
        }
        _ => {
            let octets = decode_length_determinant(data, None, None)?;
            data.align_decode()?;
            let raw = data.read_uint_bits(octets * 8)?;
            Ok(sign_extend(raw, octets))
        }
    }
}

fn sign_extend(raw: u128, octets: usize) -> i128 {
    let shift = 128 - octets * 8;
    ((raw << shift) as i128) >> shift
}

pub fn decode_length_determinant(
    data: &mut PerCodecData,
    lb: Option<usize>,
    ub: Option<usize>,
) -> Result<usize, PerCodecError> {
    match (lb, ub) {
        (Some(lb), Some(ub)) if ub < 65536 => {
            Ok(decode_integer(data, Some(lb as i128), Some(ub as i128), false)? as usize)
        }
        _ => {
            data.align_decode()?;
            let first = data.read_uint_bits(8)? as usize;
            if first < 128 {
                Ok(first)
            } else if first & 0xc0 == 0x80 {
                let second = data.read_uint_bits(8)? as usize;
                Ok(((first & 0x3f) << 8) | second)
            } else {
                Err(PerCodecError::LengthTooLarge(first))
            }
        }
    }
}

pub fn decode_choice_idx(
    data: &mut PerCodecData,
    lb: i128,
    ub: i128,
    extensible: bool,
) -> Result<i128, PerCodecError> {
    if extensible && data.read_bit()? {
        return Err(PerCodecError::Other(
            "CHOICE extension alternatives not supported".to_string(),
        ));
    }
    decode_integer(data, Some(lb), Some(ub), false)
}

/// Returns the OPTIONAL presence bitmap.
pub fn decode_sequence_header(
    data: &mut PerCodecData,
    extensible: bool,
    num_optionals: usize,
) -> Result<Vec<bool>, PerCodecError> {
    if extensible && data.read_bit()? {
        return Err(PerCodecError::Other(
            "SEQUENCE extension additions not supported".to_string(),
        ));
    }
    let mut optionals = Vec::with_capacity(num_optionals);
    for _ in 0..num_optionals {
        optionals.push(data.read_bit()?);
    }
    Ok(optionals)
}

pub fn decode_enumerated(
    data: &mut PerCodecData,
    lb: i128,
    ub: i128,
    extensible: bool,
) -> Result<i128, PerCodecError> {
    if extensible && data.read_bit()? {
        return Err(PerCodecError::Other(
            "ENUMERATED extension values not supported".to_string(),
        ));
    }
    decode_integer(data, Some(lb), Some(ub), false)
}

pub fn decode_octetstring(
    data: &mut PerCodecData,
    lb: Option<usize>,
    ub: Option<usize>,
    extensible: bool,
) -> Result<Vec<u8>, PerCodecError> {
    if extensible && data.read_bit()? {
        return Err(PerCodecError::Other(
            "OCTET STRING extension sizes not supported".to_string(),
        ));
    }
    match (lb, ub) {
        (Some(lb), Some(ub)) if lb == ub => {
            if lb > 2 {
                data.align_decode()?;
            }
            let bits = data.read_bits(lb * 8)?;
            Ok(bits.into_vec())
        }
        _ => {
            let length = decode_length_determinant(data, lb, ub)?;
            if length == 0 {
                return Ok(vec![]);
            }
            data.align_decode()?;
            data.read_bytes(length)
        }
    }
}

pub fn decode_bitstring(
    data: &mut PerCodecData,
    lb: Option<usize>,
    ub: Option<usize>,
    extensible: bool,
) -> Result<BitVec<u8, Msb0>, PerCodecError> {
    if extensible && data.read_bit()? {
        return Err(PerCodecError::Other(
            "BIT STRING extension sizes not supported".to_string(),
        ));
    }
    match (lb, ub) {
        (Some(lb), Some(ub)) if lb == ub => {
            if lb > 16 {
                data.align_decode()?;
            }
            data.read_bits(lb)
        }
        _ => {
            let length = decode_length_determinant(data, lb, ub)?;
            if length == 0 {
                return Ok(BitVec::new());
            }
            data.align_decode()?;
            data.read_bits(length)
        }
    }
}

pub fn decode_visible_string(data: &mut PerCodecData) -> Result<String, PerCodecError> {
    let length = decode_length_determinant(data, None, None)?;
    data.align_decode()?;
    let bytes = data.read_bytes(length)?;
    String::from_utf8(bytes).map_err(|e| PerCodecError::Other(format!("bad VisibleString: {e}")))
}

pub fn decode_real(data: &mut PerCodecData) -> Result<f64, PerCodecError> {
    let length = decode_length_determinant(data, None, None)?;
    data.align_decode()?;
    let content = data.read_bytes(length)?;
    real_from_content_octets(&content)
}

fn real_from_content_octets(content: &[u8]) -> Result<f64, PerCodecError> {
    let Some((&header, rest)) = content.split_first() else {
        return Ok(0.0);
    };
    match header {
        0x40 => return Ok(f64::INFINITY),
        0x41 => return Ok(f64::NEG_INFINITY),
        0x42 => return Ok(f64::NAN),
        0x43 => return Ok(-0.0),
        _ => {}
    }
    if header & 0x80 == 0 {
        return Err(PerCodecError::MalformedReal(
            "only base-2 binary encoding is supported".to_string(),
        ));
    }
    if header & 0x30 != 0 {
        return Err(PerCodecError::MalformedReal(format!(
            "unsupported base/scale in header {header:#04x}"
        )));
    }
    let exponent_len = (header & 0x03) as usize + 1;
    if exponent_len == 4 || rest.len() <= exponent_len {
        return Err(PerCodecError::MalformedReal(format!(
            "content too short for exponent length {exponent_len}"
        )));
    }
    let (exponent_octets, mantissa_octets) = rest.split_at(exponent_len);

    let mut exponent = 0i128;
    for &b in exponent_octets {
        exponent = (exponent << 8) | b as i128;
    }
    let shift = 128 - exponent_len * 8;
    exponent = ((exponent as u128) << shift) as i128 >> shift;

    let mut mantissa = 0u128;
    for &b in mantissa_octets {
        mantissa = (mantissa << 8) | b as u128;
    }

    let sign = if header & 0x40 != 0 { -1.0 } else { 1.0 };
    Ok(sign * mantissa as f64 * (exponent as f64).exp2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::*;

    #[test]
    fn integer_round_trips() {
        for (lb, ub, value) in [
            (Some(0), Some(7), 5),
            (Some(0), Some(255), 200),
            (Some(0), Some(65535), 40000),
            (Some(0), Some(4294967295), 123456789),
            (Some(0), None, 99),
            (None, None, -42),
        ] {
            let mut data = PerCodecData::new_aper();
            encode_integer(&mut data, lb, ub, false, value).unwrap();
            let bytes = data.into_bytes();
            let mut data = PerCodecData::from_slice_aper(&bytes);
            assert_eq!(decode_integer(&mut data, lb, ub, false).unwrap(), value);
        }
    }

    #[test]
    fn length_determinant_round_trips() {
        for value in [0usize, 1, 127, 128, 300, 16383] {
            let mut data = PerCodecData::new_aper();
            encode_length_determinant(&mut data, None, None, value).unwrap();
            let bytes = data.into_bytes();
            let mut data = PerCodecData::from_slice_aper(&bytes);
            assert_eq!(
                decode_length_determinant(&mut data, None, None).unwrap(),
                value
            );
        }
    }

    #[test]
    fn sequence_header_rejects_extension_additions() {
        let mut data = PerCodecData::new_aper();
        data.append_bit(true);
        let bytes = data.into_bytes();
        let mut data = PerCodecData::from_slice_aper(&bytes);
        assert!(decode_sequence_header(&mut data, true, 0).is_err());
    }

    #[test]
    fn octetstring_round_trips() {
        let payload = vec![0xde, 0xad, 0xbe, 0xef];
        let mut data = PerCodecData::new_aper();
        encode_octetstring(&mut data, None, None, false, &payload).unwrap();
        let bytes = data.into_bytes();
        let mut data = PerCodecData::from_slice_aper(&bytes);
        assert_eq!(decode_octetstring(&mut data, None, None, false).unwrap(), payload);
    }

    #[test]
    fn bitstring_round_trips_mid_octet() {
        let mut bits: BitVec<u8, Msb0> = BitVec::new();
        for i in 0..36 {
            bits.push(i % 3 == 0);
        }
        let mut data = PerCodecData::new_aper();
        data.append_bit(true);
        encode_bitstring(&mut data, Some(36), Some(36), false, &bits).unwrap();
        let bytes = data.into_bytes();
        let mut data = PerCodecData::from_slice_aper(&bytes);
        assert!(data.read_bit().unwrap());
        assert_eq!(
            decode_bitstring(&mut data, Some(36), Some(36), false).unwrap(),
            bits
        );
    }

    #[test]
    fn visible_string_round_trips() {
        let mut data = PerCodecData::new_aper();
        encode_visible_string(&mut data, "PM.Cell.1").unwrap();
        let bytes = data.into_bytes();
        let mut data = PerCodecData::from_slice_aper(&bytes);
        assert_eq!(decode_visible_string(&mut data).unwrap(), "PM.Cell.1");
    }

    #[test]
    fn real_round_trips() {
        for value in [0.0, 1.0, -1.0, 10.0, 0.1, -273.15, 1e9, f64::INFINITY] {
            let mut data = PerCodecData::new_aper();
            encode_real(&mut data, value).unwrap();
            let bytes = data.into_bytes();
            let mut data = PerCodecData::from_slice_aper(&bytes);
            assert_eq!(decode_real(&mut data).unwrap(), value);
        }
    }
}
