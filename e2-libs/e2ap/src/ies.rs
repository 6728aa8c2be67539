//! ies - E2AP information elements and the protocol-IE field framing

use asn1_per::*;

pub const PROCEDURE_CODE_RIC_CONTROL: u8 = 4;
pub const PROCEDURE_CODE_RIC_INDICATION: u8 = 5;
pub const PROCEDURE_CODE_RIC_SUBSCRIPTION: u8 = 8;

/// ProtocolIE-ID values from the E2AP constant table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum IeId {
    RanFunctionId = 5,
    RicActionAdmittedItem = 14,
    RicActionId = 15,
    RicActionsAdmitted = 17,
    RicActionToBeSetupItem = 19,
    RicCallProcessId = 20,
    RicControlAckRequest = 21,
    RicControlHeader = 22,
    RicControlMessage = 23,
    RicIndicationHeader = 25,
    RicIndicationMessage = 26,
    RicIndicationSn = 27,
    RicIndicationType = 28,
    RicRequestId = 29,
    RicSubscriptionDetails = 30,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Criticality {
    Reject = 0,
    Ignore = 1,
    Notify = 2,
}

impl AperCodec for Criticality {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_enumerated(data, 0, 2, false, u8::from(*self) as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let raw = decode_enumerated(data, 0, 2, false)?;
        Criticality::try_from(raw as u8).map_err(|_| PerCodecError::InvalidEnumerated(raw as u128))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RicRequestId {
    pub requestor_id: u16,
    pub instance_id: u16,
}

impl AperCodec for RicRequestId {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_integer(data, Some(0), Some(65535), false, self.requestor_id as i128)?;
        encode_integer(data, Some(0), Some(65535), false, self.instance_id as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(RicRequestId {
            requestor_id: decode_integer(data, Some(0), Some(65535), false)? as u16,
            instance_id: decode_integer(data, Some(0), Some(65535), false)? as u16,
        })
    }
}

/// RANfunctionID, INTEGER (0..4095).
pub fn encode_ran_function_id(data: &mut PerCodecData, id: u16) -> Result<(), PerCodecError> {
    encode_integer(data, Some(0), Some(4095), false, id as i128)
}

pub fn decode_ran_function_id(data: &mut PerCodecData) -> Result<u16, PerCodecError> {
    Ok(decode_integer(data, Some(0), Some(4095), false)? as u16)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RicIndicationType {
    Report = 0,
    Insert = 1,
}

impl AperCodec for RicIndicationType {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_enumerated(data, 0, 1, true, u8::from(*self) as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let raw = decode_enumerated(data, 0, 1, true)?;
        RicIndicationType::try_from(raw as u8)
            .map_err(|_| PerCodecError::InvalidEnumerated(raw as u128))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RicControlAckRequest {
    NoAck = 0,
    Ack = 1,
    NAck = 2,
}

impl AperCodec for RicControlAckRequest {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_enumerated(data, 0, 2, true, u8::from(*self) as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let raw = decode_enumerated(data, 0, 2, true)?;
        RicControlAckRequest::try_from(raw as u8)
            .map_err(|_| PerCodecError::InvalidEnumerated(raw as u128))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RicActionType {
    Report = 0,
    Insert = 1,
    Policy = 2,
}

impl AperCodec for RicActionType {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_enumerated(data, 0, 2, true, u8::from(*self) as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let raw = decode_enumerated(data, 0, 2, true)?;
        RicActionType::try_from(raw as u8)
            .map_err(|_| PerCodecError::InvalidEnumerated(raw as u128))
    }
}

/// Open type: a length determinant followed by the value's own aligned
/// APER encoding as opaque octets.
pub fn encode_open_type(data: &mut PerCodecData, bytes: &[u8]) -> Result<(), PerCodecError> {
    encode_octetstring(data, None, None, false, bytes)
}

pub fn decode_open_type(data: &mut PerCodecData) -> Result<Vec<u8>, PerCodecError> {
    decode_octetstring(data, None, None, false)
}

/// Write one ProtocolIE-Field: id, criticality, then the value produced
/// by `f` framed as an open type.
pub fn encode_ie<F>(
    data: &mut PerCodecData,
    id: IeId,
    criticality: Criticality,
    f: F,
) -> Result<(), PerCodecError>
where
    F: FnOnce(&mut PerCodecData) -> Result<(), PerCodecError>,
{
    encode_integer(data, Some(0), Some(65535), false, u16::from(id) as i128)?;
    criticality.aper_encode(data)?;
    let mut inner = PerCodecData::new_aper();
    f(&mut inner)?;
    encode_open_type(data, &inner.into_bytes())
}

/// Read one ProtocolIE-Field, returning the raw id so the caller can
/// dispatch and skip ids it does not know.
pub fn decode_ie(data: &mut PerCodecData) -> Result<(u16, Criticality, Vec<u8>), PerCodecError> {
    let id = decode_integer(data, Some(0), Some(65535), false)? as u16;
    let criticality = Criticality::aper_decode(data)?;
    let payload = decode_open_type(data)?;
    Ok((id, criticality, payload))
}

/// SEQUENCE (SIZE(0..65535)) OF ProtocolIE-Field length prefix.
pub fn encode_ie_count(data: &mut PerCodecData, count: usize) -> Result<(), PerCodecError> {
    encode_length_determinant(data, Some(0), Some(65535), count)
}

pub fn decode_ie_count(data: &mut PerCodecData) -> Result<usize, PerCodecError> {
    decode_length_determinant(data, Some(0), Some(65535))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ric_request_id_round_trips() {
        let id = RicRequestId {
            requestor_id: 1001,
            instance_id: 0,
        };
        let mut data = PerCodecData::new_aper();
        id.aper_encode(&mut data).unwrap();
        let mut data = PerCodecData::from_slice_aper(&data.into_bytes());
        assert_eq!(RicRequestId::aper_decode(&mut data).unwrap(), id);
    }

    #[test]
    fn ie_framing_round_trips() {
        let mut data = PerCodecData::new_aper();
        encode_ie(&mut data, IeId::RanFunctionId, Criticality::Reject, |inner| {
            encode_ran_function_id(inner, 200)
        })
        .unwrap();
        let mut data = PerCodecData::from_slice_aper(&data.into_bytes());
        let (id, criticality, payload) = decode_ie(&mut data).unwrap();
        assert_eq!(IeId::try_from(id), Ok(IeId::RanFunctionId));
        assert_eq!(criticality, Criticality::Reject);
        let mut inner = PerCodecData::from_slice_aper(&payload);
        assert_eq!(decode_ran_function_id(&mut inner).unwrap(), 200);
    }

    #[test]
    fn unknown_ie_id_is_not_an_ie_id() {
        assert!(IeId::try_from(999u16).is_err());
    }
}
