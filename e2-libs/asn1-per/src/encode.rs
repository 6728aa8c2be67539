//! encode - APER encode routines for the field types the grammar uses

use crate::per::{PerCodecData, PerCodecError};
use bitvec::prelude::*;

/// Minimal big-endian unsigned representation (at least one octet).
pub fn min_unsigned_octets(value: u128) -> Vec<u8> {
    let octets = ((128 - value.leading_zeros()).div_ceil(8).max(1)) as usize;
    value.to_be_bytes()[16 - octets..].to_vec()
}

/// Minimal big-endian two's-complement representation (at least one octet).
pub fn min_signed_octets(value: i128) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < 15 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] < 0x80)
            || (bytes[start] == 0xff && bytes[start + 1] >= 0x80);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

pub fn encode_bool(data: &mut PerCodecData, value: bool) -> Result<(), PerCodecError> {
    data.append_bit(value);
    Ok(())
}

/// INTEGER, optionally constrained and/or extensible.  Values outside
/// the extension root are not produced by this stack.
pub fn encode_integer(
    data: &mut PerCodecData,
    lb: Option<i128>,
    ub: Option<i128>,
    extensible: bool,
    value: i128,
) -> Result<(), PerCodecError> {
    if extensible {
        data.append_bit(false);
    }
    match (lb, ub) {
        (Some(lb), Some(ub)) => {
            if value < lb || value > ub {
                return Err(PerCodecError::ConstraintViolation { value, lb, ub });
            }
            let range = (ub - lb + 1) as u128;
            let offset = (value - lb) as u128;
            if range == 1 {
                // Single-value constraint encodes to nothing.
            } else if range < 256 {
                let width = (128 - (range - 1).leading_zeros()) as usize;
                data.append_uint_bits(offset, width);
            } else if range == 256 {
                data.align_encode();
                data.append_bytes(&[offset as u8]);
            } else if range <= 65536 {
                data.align_encode();
                data.append_bytes(&(offset as u16).to_be_bytes());
            } else {
                let octets = min_unsigned_octets(offset);
                let max_octets = min_unsigned_octets(range - 1).len();
                encode_integer(data, Some(1), Some(max_octets as i128), false, octets.len() as i128)?;
                data.align_encode();
                data.append_bytes(&octets);
            }
        }
        (Some(lb), None) => {
            let octets = min_unsigned_octets((value - lb) as u128);
            encode_length_determinant(data, None, None, octets.len())?;
            data.align_encode();
            data.append_bytes(&octets);
        }
        _ => {
            let octets = min_signed_octets(value);
            encode_length_determinant(data, None, None, octets.len())?;
            data.align_encode();
            data.append_bytes(&octets);
        }
    }
    Ok(())
}

/// Length determinant.  Constrained lengths below 64k encode as a
/// constrained whole number; the general form covers up to 16383
/// (fragmentation is not supported).
pub fn encode_length_determinant(
    data: &mut PerCodecData,
    lb: Option<usize>,
    ub: Option<usize>,
    value: usize,
) -> Result<(), PerCodecError> {
    match (lb, ub) {
        (Some(lb), Some(ub)) if ub < 65536 => {
            encode_integer(data, Some(lb as i128), Some(ub as i128), false, value as i128)
        }
        _ => {
            data.align_encode();
            if value < 128 {
                data.append_bytes(&[value as u8]);
            } else if value < 16384 {
                data.append_bytes(&(0x8000u16 | value as u16).to_be_bytes());
            } else {
                return Err(PerCodecError::LengthTooLarge(value));
            }
            Ok(())
        }
    }
}

pub fn encode_choice_idx(
    data: &mut PerCodecData,
    lb: i128,
    ub: i128,
    extensible: bool,
    idx: i128,
) -> Result<(), PerCodecError> {
    if extensible {
        data.append_bit(false);
    }
    encode_integer(data, Some(lb), Some(ub), false, idx)
}

/// SEQUENCE preamble: extension bit (if any) then the OPTIONAL bitmap.
pub fn encode_sequence_header(
    data: &mut PerCodecData,
    extensible: bool,
    optionals: &[bool],
) -> Result<(), PerCodecError> {
    if extensible {
        data.append_bit(false);
    }
    for &present in optionals {
        data.append_bit(present);
    }
    Ok(())
}

pub fn encode_enumerated(
    data: &mut PerCodecData,
    lb: i128,
    ub: i128,
    extensible: bool,
    value: i128,
) -> Result<(), PerCodecError> {
    if extensible {
        data.append_bit(false);
    }
    encode_integer(data, Some(lb), Some(ub), false, value)
}

pub fn encode_octetstring(
    data: &mut PerCodecData,
    lb: Option<usize>,
    ub: Option<usize>,
    extensible: bool,
    bytes: &[u8],
) -> Result<(), PerCodecError> {
    if extensible {
        data.append_bit(false);
    }
    match (lb, ub) {
        (Some(lb), Some(ub)) if lb == ub => {
            if bytes.len() != lb {
                return Err(PerCodecError::ConstraintViolation {
                    value: bytes.len() as i128,
                    lb: lb as i128,
                    ub: ub as i128,
                });
            }
            // Fixed-size strings of one or two octets stay unaligned.
            if lb > 2 {
                data.align_encode();
            }
            data.append_bytes(bytes);
        }
        _ => {
            encode_length_determinant(data, lb, ub, bytes.len())?;
            if !bytes.is_empty() {
                data.align_encode();
                data.append_bytes(bytes);
            }
        }
    }
    Ok(())
}

pub fn encode_bitstring(
    data: &mut PerCodecData,
    lb: Option<usize>,
    ub: Option<usize>,
    extensible: bool,
    bits: &BitSlice<u8, Msb0>,
) -> Result<(), PerCodecError> {
    if extensible {
        data.append_bit(false);
    }
    match (lb, ub) {
        (Some(lb), Some(ub)) if lb == ub => {
            if bits.len() != lb {
                return Err(PerCodecError::ConstraintViolation {
                    value: bits.len() as i128,
                    lb: lb as i128,
                    ub: ub as i128,
                });
            }
            // Fixed-size strings up to 16 bits stay unaligned.
            if lb > 16 {
                data.align_encode();
            }
            data.append_bits(bits);
        }
        _ => {
            encode_length_determinant(data, lb, ub, bits.len())?;
            if !bits.is_empty() {
                data.align_encode();
                data.append_bits(bits);
            }
        }
    }
    Ok(())
}

/// VisibleString with no size constraint: each character takes a full
/// aligned octet.
pub fn encode_visible_string(data: &mut PerCodecData, value: &str) -> Result<(), PerCodecError> {
    encode_length_determinant(data, None, None, value.len())?;
    data.align_encode();
    data.append_bytes(value.as_bytes());
    Ok(())
}

/// REAL: BER base-2 content octets behind a general length determinant,
/// which is how the reference encoder emits measurement record values.
pub fn encode_real(data: &mut PerCodecData, value: f64) -> Result<(), PerCodecError> {
    let content = real_content_octets(value);
    encode_length_determinant(data, None, None, content.len())?;
    data.align_encode();
    data.append_bytes(&content);
    Ok(())
}

fn real_content_octets(value: f64) -> Vec<u8> {
    if value == 0.0 {
        if value.is_sign_negative() {
            return vec![0x43];
        }
        return vec![];
    }
    if value.is_nan() {
        return vec![0x42];
    }
    if value.is_infinite() {
        return vec![if value > 0.0 { 0x40 } else { 0x41 }];
    }

    let bits = value.to_bits();
    let sign = (bits >> 63) & 1;
    let raw_exponent = ((bits >> 52) & 0x7ff) as i128;
    let raw_mantissa = (bits & 0x000f_ffff_ffff_ffff) as u128;
    let (mut mantissa, mut exponent) = if raw_exponent == 0 {
        (raw_mantissa, -1074i128)
    } else {
        (raw_mantissa | (1 << 52), raw_exponent - 1075)
    };
    while mantissa & 1 == 0 {
        mantissa >>= 1;
        exponent += 1;
    }

    let exponent_octets = min_signed_octets(exponent);
    let mantissa_octets = min_unsigned_octets(mantissa);
    let mut header = 0x80u8 | ((sign as u8) << 6);
    header |= (exponent_octets.len() as u8) - 1;

    let mut out = vec![header];
    out.extend_from_slice(&exponent_octets);
    out.extend_from_slice(&mantissa_octets);
    out
}
