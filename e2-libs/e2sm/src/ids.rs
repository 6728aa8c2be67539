//! ids - bit-packers for the standardized node and cell identifiers
//!
//! Each packer turns an unsigned integer into the exact BIT STRING layout
//! its field uses on the wire, and each unpacker is its inverse.  Field
//! widths follow 3GPP TS 38.413 (AMF identifiers), TS 38.473 (NR cell
//! identity) and TS 36.413 (eNB identifiers).  A value outside the field's
//! domain is a caller bug and panics.

use asn1_per::{BitSlice, BitVec, Msb0};

pub fn pack_bits(value: u64, width: usize, field: &str) -> BitVec<u8, Msb0> {
    if width < 64 && value >= 1u64 << width {
        panic!("{field} value {value} does not fit in a {width}-bit field");
    }
    let mut bits = BitVec::with_capacity(width);
    for i in (0..width).rev() {
        bits.push((value >> i) & 1 == 1);
    }
    bits
}

pub fn unpack_bits(bits: &BitSlice<u8, Msb0>, width: usize, field: &str) -> u64 {
    if bits.len() != width {
        panic!(
            "{field} bit string is {} bits long, expected {width}",
            bits.len()
        );
    }
    bits.iter().fold(0u64, |acc, bit| (acc << 1) | *bit as u64)
}

pub fn amf_region_id(value: u8) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 8, "AMF region ID")
}

pub fn unpack_amf_region_id(bits: &BitSlice<u8, Msb0>) -> u8 {
    unpack_bits(bits, 8, "AMF region ID") as u8
}

pub fn amf_set_id(value: u16) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 10, "AMF set ID")
}

pub fn unpack_amf_set_id(bits: &BitSlice<u8, Msb0>) -> u16 {
    unpack_bits(bits, 10, "AMF set ID") as u16
}

pub fn amf_pointer(value: u8) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 6, "AMF pointer")
}

pub fn unpack_amf_pointer(bits: &BitSlice<u8, Msb0>) -> u8 {
    unpack_bits(bits, 6, "AMF pointer") as u8
}

pub fn gnb_id(value: u32) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 32, "gNB ID")
}

pub fn unpack_gnb_id(bits: &BitSlice<u8, Msb0>) -> u32 {
    unpack_bits(bits, 32, "gNB ID") as u32
}

/// 36-bit NR cell identity.  In its 5-octet representation the last 4
/// bits are padding, which is where the reference left-shift-by-4 of
/// 16-bit simulation cell IDs comes from.
pub fn nr_cell_identity(value: u64) -> BitVec<u8, Msb0> {
    if value >= 1 << 36 {
        panic!("NR cell identity {value} does not fit in a 36-bit field");
    }
    pack_bits(value, 36, "NR cell identity")
}

pub fn unpack_nr_cell_identity(bits: &BitSlice<u8, Msb0>) -> u64 {
    unpack_bits(bits, 36, "NR cell identity")
}

/// Simulation cell IDs are 16-bit; anything wider never round-trips back
/// into the simulator's cell table, so the unpacker insists on it.
pub fn nr_cell_id(value: u16) -> BitVec<u8, Msb0> {
    nr_cell_identity(value as u64)
}

pub fn unpack_nr_cell_id(bits: &BitSlice<u8, Msb0>) -> u16 {
    let value = unpack_nr_cell_identity(bits);
    if value > u16::MAX as u64 {
        panic!("NR cell identity {value} is wider than a simulation cell ID");
    }
    value as u16
}

pub fn eutra_cell_identity(value: u32) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 28, "E-UTRA cell identity")
}

pub fn unpack_eutra_cell_identity(bits: &BitSlice<u8, Msb0>) -> u32 {
    unpack_bits(bits, 28, "E-UTRA cell identity") as u32
}

pub fn macro_enb_id(value: u32) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 20, "macro eNB ID")
}

pub fn unpack_macro_enb_id(bits: &BitSlice<u8, Msb0>) -> u32 {
    unpack_bits(bits, 20, "macro eNB ID") as u32
}

pub fn home_enb_id(value: u32) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 28, "home eNB ID")
}

pub fn unpack_home_enb_id(bits: &BitSlice<u8, Msb0>) -> u32 {
    unpack_bits(bits, 28, "home eNB ID") as u32
}

pub fn short_macro_enb_id(value: u32) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 18, "short macro eNB ID")
}

pub fn unpack_short_macro_enb_id(bits: &BitSlice<u8, Msb0>) -> u32 {
    unpack_bits(bits, 18, "short macro eNB ID") as u32
}

pub fn long_macro_enb_id(value: u32) -> BitVec<u8, Msb0> {
    pack_bits(value as u64, 21, "long macro eNB ID")
}

pub fn unpack_long_macro_enb_id(bits: &BitSlice<u8, Msb0>) -> u32 {
    unpack_bits(bits, 21, "long macro eNB ID") as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packers_round_trip() {
        for region in [0u8, 1, 63, 255] {
            assert_eq!(unpack_amf_region_id(&amf_region_id(region)), region);
        }
        for set in [0u16, 1, 512, 1023] {
            assert_eq!(unpack_amf_set_id(&amf_set_id(set)), set);
        }
        for pointer in [0u8, 1, 63] {
            assert_eq!(unpack_amf_pointer(&amf_pointer(pointer)), pointer);
        }
        for id in [0u32, 1, 0xdead_beef, u32::MAX] {
            assert_eq!(unpack_gnb_id(&gnb_id(id)), id);
        }
        for id in [0u64, 1, (1 << 36) - 1] {
            assert_eq!(unpack_nr_cell_identity(&nr_cell_identity(id)), id);
        }
        for id in [0u32, (1 << 28) - 1] {
            assert_eq!(unpack_eutra_cell_identity(&eutra_cell_identity(id)), id);
            assert_eq!(unpack_home_enb_id(&home_enb_id(id)), id);
        }
        for id in [0u32, (1 << 20) - 1] {
            assert_eq!(unpack_macro_enb_id(&macro_enb_id(id)), id);
        }
        for id in [0u32, (1 << 18) - 1] {
            assert_eq!(unpack_short_macro_enb_id(&short_macro_enb_id(id)), id);
        }
        for id in [0u32, (1 << 21) - 1] {
            assert_eq!(unpack_long_macro_enb_id(&long_macro_enb_id(id)), id);
        }
    }

    #[test]
    fn nr_cell_id_boundaries() {
        for id in [0u16, 15, 16, u16::MAX] {
            let bits = nr_cell_id(id);
            assert_eq!(bits.len(), 36);
            // 5 octets with 4 trailing padding bits.
            let octets = bits.len().div_ceil(8);
            assert_eq!(octets, 5);
            assert_eq!(octets * 8 - bits.len(), 4);
            assert_eq!(unpack_nr_cell_id(&bits), id);
        }
    }

    #[test]
    #[should_panic(expected = "AMF set ID")]
    fn amf_set_id_domain_is_checked() {
        amf_set_id(1024);
    }

    #[test]
    #[should_panic(expected = "AMF pointer")]
    fn amf_pointer_domain_is_checked() {
        amf_pointer(64);
    }

    #[test]
    #[should_panic(expected = "NR cell identity")]
    fn nr_cell_identity_domain_is_checked() {
        nr_cell_identity(1 << 36);
    }

    #[test]
    #[should_panic(expected = "macro eNB ID")]
    fn macro_enb_id_domain_is_checked() {
        macro_enb_id(1 << 20);
    }
}
