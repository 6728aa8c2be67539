//! pdu - the E2AP PDU CHOICE and the RIC procedure messages inside it

use crate::ies::*;
use asn1_per::*;

#[derive(Clone, Debug, PartialEq)]
pub enum E2apPdu {
    InitiatingMessage(InitiatingMessage),
    SuccessfulOutcome(SuccessfulOutcome),
    UnsuccessfulOutcome(UnsuccessfulOutcome),
}

impl AperCodec for E2apPdu {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            E2apPdu::InitiatingMessage(x) => {
                encode_choice_idx(data, 0, 2, true, 0)?;
                x.aper_encode(data)
            }
            E2apPdu::SuccessfulOutcome(x) => {
                encode_choice_idx(data, 0, 2, true, 1)?;
                x.aper_encode(data)
            }
            E2apPdu::UnsuccessfulOutcome(x) => {
                encode_choice_idx(data, 0, 2, true, 2)?;
                x.aper_encode(data)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 2, true)? {
            0 => Ok(E2apPdu::InitiatingMessage(InitiatingMessage::aper_decode(
                data,
            )?)),
            1 => Ok(E2apPdu::SuccessfulOutcome(SuccessfulOutcome::aper_decode(
                data,
            )?)),
            2 => Ok(E2apPdu::UnsuccessfulOutcome(
                UnsuccessfulOutcome::aper_decode(data)?,
            )),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InitiatingMessage {
    RicControlRequest(RicControlRequest),
    RicIndication(RicIndication),
    RicSubscriptionRequest(RicSubscriptionRequest),
}

impl AperCodec for InitiatingMessage {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        let (code, inner) = match self {
            InitiatingMessage::RicControlRequest(m) => {
                (PROCEDURE_CODE_RIC_CONTROL, encode_to_bytes(m)?)
            }
            InitiatingMessage::RicIndication(m) => {
                (PROCEDURE_CODE_RIC_INDICATION, encode_to_bytes(m)?)
            }
            InitiatingMessage::RicSubscriptionRequest(m) => {
                (PROCEDURE_CODE_RIC_SUBSCRIPTION, encode_to_bytes(m)?)
            }
        };
        encode_integer(data, Some(0), Some(255), false, code as i128)?;
        Criticality::Reject.aper_encode(data)?;
        encode_open_type(data, &inner)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let code = decode_integer(data, Some(0), Some(255), false)? as u8;
        let _criticality = Criticality::aper_decode(data)?;
        let payload = decode_open_type(data)?;
        let mut inner = PerCodecData::from_slice_aper(&payload);
        match code {
            PROCEDURE_CODE_RIC_CONTROL => Ok(InitiatingMessage::RicControlRequest(
                RicControlRequest::aper_decode(&mut inner)?,
            )),
            PROCEDURE_CODE_RIC_INDICATION => Ok(InitiatingMessage::RicIndication(
                RicIndication::aper_decode(&mut inner)?,
            )),
            PROCEDURE_CODE_RIC_SUBSCRIPTION => Ok(InitiatingMessage::RicSubscriptionRequest(
                RicSubscriptionRequest::aper_decode(&mut inner)?,
            )),
            x => Err(PerCodecError::Other(format!(
                "unsupported initiating procedure code {x}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SuccessfulOutcome {
    RicSubscriptionResponse(RicSubscriptionResponse),
}

impl AperCodec for SuccessfulOutcome {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        let SuccessfulOutcome::RicSubscriptionResponse(m) = self;
        encode_integer(
            data,
            Some(0),
            Some(255),
            false,
            PROCEDURE_CODE_RIC_SUBSCRIPTION as i128,
        )?;
        Criticality::Reject.aper_encode(data)?;
        encode_open_type(data, &encode_to_bytes(m)?)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let code = decode_integer(data, Some(0), Some(255), false)? as u8;
        let _criticality = Criticality::aper_decode(data)?;
        let payload = decode_open_type(data)?;
        let mut inner = PerCodecData::from_slice_aper(&payload);
        match code {
            PROCEDURE_CODE_RIC_SUBSCRIPTION => Ok(SuccessfulOutcome::RicSubscriptionResponse(
                RicSubscriptionResponse::aper_decode(&mut inner)?,
            )),
            x => Err(PerCodecError::Other(format!(
                "unsupported successful outcome procedure code {x}"
            ))),
        }
    }
}

/// Failures are carried through undecoded; this node never interprets
/// or originates them.
#[derive(Clone, Debug, PartialEq)]
pub struct UnsuccessfulOutcome {
    pub procedure_code: u8,
    pub criticality: Criticality,
    pub payload: Vec<u8>,
}

impl AperCodec for UnsuccessfulOutcome {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_integer(data, Some(0), Some(255), false, self.procedure_code as i128)?;
        self.criticality.aper_encode(data)?;
        encode_open_type(data, &self.payload)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        Ok(UnsuccessfulOutcome {
            procedure_code: decode_integer(data, Some(0), Some(255), false)? as u8,
            criticality: Criticality::aper_decode(data)?,
            payload: decode_open_type(data)?,
        })
    }
}

fn encode_to_bytes<T: AperCodec>(value: &T) -> Result<Vec<u8>, PerCodecError> {
    let mut inner = PerCodecData::new_aper();
    value.aper_encode(&mut inner)?;
    Ok(inner.into_bytes())
}

/// RIC Control Request, kept as the IE list the RIC sent so the caller
/// can walk it and decide what to do with ids it does not recognize.
#[derive(Clone, Debug, PartialEq)]
pub struct RicControlRequest {
    pub ies: Vec<RicControlIe>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RicControlIe {
    RicRequestId(RicRequestId),
    RanFunctionId(u16),
    RicCallProcessId(Vec<u8>),
    RicControlHeader(Vec<u8>),
    RicControlMessage(Vec<u8>),
    RicControlAckRequest(RicControlAckRequest),
    Unknown(u16),
}

impl AperCodec for RicControlRequest {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_ie_count(data, self.ies.len())?;
        for ie in &self.ies {
            match ie {
                RicControlIe::RicRequestId(id) => {
                    encode_ie(data, IeId::RicRequestId, Criticality::Reject, |inner| {
                        id.aper_encode(inner)
                    })?
                }
                RicControlIe::RanFunctionId(id) => {
                    encode_ie(data, IeId::RanFunctionId, Criticality::Reject, |inner| {
                        encode_ran_function_id(inner, *id)
                    })?
                }
                RicControlIe::RicCallProcessId(bytes) => {
                    encode_ie(data, IeId::RicCallProcessId, Criticality::Reject, |inner| {
                        encode_octetstring(inner, None, None, false, bytes)
                    })?
                }
                RicControlIe::RicControlHeader(bytes) => {
                    encode_ie(data, IeId::RicControlHeader, Criticality::Reject, |inner| {
                        encode_octetstring(inner, None, None, false, bytes)
                    })?
                }
                RicControlIe::RicControlMessage(bytes) => {
                    encode_ie(data, IeId::RicControlMessage, Criticality::Reject, |inner| {
                        encode_octetstring(inner, None, None, false, bytes)
                    })?
                }
                RicControlIe::RicControlAckRequest(ack) => encode_ie(
                    data,
                    IeId::RicControlAckRequest,
                    Criticality::Reject,
                    |inner| ack.aper_encode(inner),
                )?,
                RicControlIe::Unknown(id) => {
                    return Err(PerCodecError::Other(format!(
                        "cannot encode unrecognized control request IE {id}"
                    )));
                }
            }
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        let count = decode_ie_count(data)?;
        let mut ies = Vec::with_capacity(count);
        for _ in 0..count {
            let (raw_id, _criticality, payload) = decode_ie(data)?;
            let mut inner = PerCodecData::from_slice_aper(&payload);
            ies.push(match IeId::try_from(raw_id) {
                Ok(IeId::RicRequestId) => {
                    RicControlIe::RicRequestId(RicRequestId::aper_decode(&mut inner)?)
                }
                Ok(IeId::RanFunctionId) => {
                    RicControlIe::RanFunctionId(decode_ran_function_id(&mut inner)?)
                }
                Ok(IeId::RicCallProcessId) => {
                    RicControlIe::RicCallProcessId(decode_octetstring(&mut inner, None, None, false)?)
                }
                Ok(IeId::RicControlHeader) => {
                    RicControlIe::RicControlHeader(decode_octetstring(&mut inner, None, None, false)?)
                }
                Ok(IeId::RicControlMessage) => RicControlIe::RicControlMessage(decode_octetstring(
                    &mut inner, None, None, false,
                )?),
                Ok(IeId::RicControlAckRequest) => RicControlIe::RicControlAckRequest(
                    RicControlAckRequest::aper_decode(&mut inner)?,
                ),
                _ => RicControlIe::Unknown(raw_id),
            });
        }
        Ok(RicControlRequest { ies })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicIndication {
    pub ric_request_id: RicRequestId,
    pub ran_function_id: u16,
    pub ric_action_id: u8,
    pub ric_indication_sn: Option<u16>,
    pub ric_indication_type: RicIndicationType,
    pub ric_indication_header: Vec<u8>,
    pub ric_indication_message: Vec<u8>,
    pub ric_call_process_id: Option<Vec<u8>>,
}

impl AperCodec for RicIndication {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        let count = 6
            + self.ric_indication_sn.is_some() as usize
            + self.ric_call_process_id.is_some() as usize;
        encode_ie_count(data, count)?;
        encode_ie(data, IeId::RicRequestId, Criticality::Reject, |inner| {
            self.ric_request_id.aper_encode(inner)
        })?;
        encode_ie(data, IeId::RanFunctionId, Criticality::Reject, |inner| {
            encode_ran_function_id(inner, self.ran_function_id)
        })?;
        encode_ie(data, IeId::RicActionId, Criticality::Reject, |inner| {
            encode_integer(inner, Some(0), Some(255), false, self.ric_action_id as i128)
        })?;
        if let Some(sn) = self.ric_indication_sn {
            encode_ie(data, IeId::RicIndicationSn, Criticality::Reject, |inner| {
                encode_integer(inner, Some(0), Some(65535), false, sn as i128)
            })?;
        }
        encode_ie(data, IeId::RicIndicationType, Criticality::Reject, |inner| {
            self.ric_indication_type.aper_encode(inner)
        })?;
        encode_ie(
            data,
            IeId::RicIndicationHeader,
            Criticality::Reject,
            |inner| encode_octetstring(inner, None, None, false, &self.ric_indication_header),
        )?;
        encode_ie(
            data,
            IeId::RicIndicationMessage,
            Criticality::Reject,
            |inner| encode_octetstring(inner, None, None, false, &self.ric_indication_message),
        )?;
        if let Some(call_process_id) = &self.ric_call_process_id {
            encode_ie(data, IeId::RicCallProcessId, Criticality::Reject, |inner| {
                encode_octetstring(inner, None, None, false, call_process_id)
            })?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        let count = decode_ie_count(data)?;
        let mut ric_request_id = None;
        let mut ran_function_id = None;
        let mut ric_action_id = None;
        let mut ric_indication_sn = None;
        let mut ric_indication_type = None;
        let mut ric_indication_header = None;
        let mut ric_indication_message = None;
        let mut ric_call_process_id = None;
        for _ in 0..count {
            let (raw_id, _criticality, payload) = decode_ie(data)?;
            let mut inner = PerCodecData::from_slice_aper(&payload);
            match IeId::try_from(raw_id) {
                Ok(IeId::RicRequestId) => {
                    ric_request_id = Some(RicRequestId::aper_decode(&mut inner)?)
                }
                Ok(IeId::RanFunctionId) => {
                    ran_function_id = Some(decode_ran_function_id(&mut inner)?)
                }
                Ok(IeId::RicActionId) => {
                    ric_action_id =
                        Some(decode_integer(&mut inner, Some(0), Some(255), false)? as u8)
                }
                Ok(IeId::RicIndicationSn) => {
                    ric_indication_sn =
                        Some(decode_integer(&mut inner, Some(0), Some(65535), false)? as u16)
                }
                Ok(IeId::RicIndicationType) => {
                    ric_indication_type = Some(RicIndicationType::aper_decode(&mut inner)?)
                }
                Ok(IeId::RicIndicationHeader) => {
                    ric_indication_header =
                        Some(decode_octetstring(&mut inner, None, None, false)?)
                }
                Ok(IeId::RicIndicationMessage) => {
                    ric_indication_message =
                        Some(decode_octetstring(&mut inner, None, None, false)?)
                }
                Ok(IeId::RicCallProcessId) => {
                    ric_call_process_id = Some(decode_octetstring(&mut inner, None, None, false)?)
                }
                _ => continue,
            }
        }
        Ok(RicIndication {
            ric_request_id: ric_request_id
                .ok_or_else(|| PerCodecError::Other("indication missing RICrequestID".into()))?,
            ran_function_id: ran_function_id
                .ok_or_else(|| PerCodecError::Other("indication missing RANfunctionID".into()))?,
            ric_action_id: ric_action_id
                .ok_or_else(|| PerCodecError::Other("indication missing RICactionID".into()))?,
            ric_indication_sn,
            ric_indication_type: ric_indication_type
                .ok_or_else(|| PerCodecError::Other("indication missing RICindicationType".into()))?,
            ric_indication_header: ric_indication_header.ok_or_else(|| {
                PerCodecError::Other("indication missing RICindicationHeader".into())
            })?,
            ric_indication_message: ric_indication_message.ok_or_else(|| {
                PerCodecError::Other("indication missing RICindicationMessage".into())
            })?,
            ric_call_process_id,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicSubscriptionRequest {
    pub ric_request_id: RicRequestId,
    pub ran_function_id: u16,
    pub subscription_details: RicSubscriptionDetails,
}

impl AperCodec for RicSubscriptionRequest {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_ie_count(data, 3)?;
        encode_ie(data, IeId::RicRequestId, Criticality::Reject, |inner| {
            self.ric_request_id.aper_encode(inner)
        })?;
        encode_ie(data, IeId::RanFunctionId, Criticality::Reject, |inner| {
            encode_ran_function_id(inner, self.ran_function_id)
        })?;
        encode_ie(
            data,
            IeId::RicSubscriptionDetails,
            Criticality::Reject,
            |inner| self.subscription_details.aper_encode(inner),
        )
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        let count = decode_ie_count(data)?;
        let mut ric_request_id = None;
        let mut ran_function_id = None;
        let mut subscription_details = None;
        for _ in 0..count {
            let (raw_id, _criticality, payload) = decode_ie(data)?;
            let mut inner = PerCodecData::from_slice_aper(&payload);
            match IeId::try_from(raw_id) {
                Ok(IeId::RicRequestId) => {
                    ric_request_id = Some(RicRequestId::aper_decode(&mut inner)?)
                }
                Ok(IeId::RanFunctionId) => {
                    ran_function_id = Some(decode_ran_function_id(&mut inner)?)
                }
                Ok(IeId::RicSubscriptionDetails) => {
                    subscription_details = Some(RicSubscriptionDetails::aper_decode(&mut inner)?)
                }
                _ => continue,
            }
        }
        Ok(RicSubscriptionRequest {
            ric_request_id: ric_request_id
                .ok_or_else(|| PerCodecError::Other("subscription missing RICrequestID".into()))?,
            ran_function_id: ran_function_id
                .ok_or_else(|| PerCodecError::Other("subscription missing RANfunctionID".into()))?,
            subscription_details: subscription_details.ok_or_else(|| {
                PerCodecError::Other("subscription missing RICsubscriptionDetails".into())
            })?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicSubscriptionDetails {
    pub ric_event_trigger_definition: Vec<u8>,
    pub ric_actions_to_be_setup: NonEmpty<RicActionToBeSetupItem>,
}

impl AperCodec for RicSubscriptionDetails {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_octetstring(data, None, None, false, &self.ric_event_trigger_definition)?;
        encode_length_determinant(data, Some(1), Some(16), self.ric_actions_to_be_setup.len())?;
        for action in &self.ric_actions_to_be_setup {
            encode_ie(
                data,
                IeId::RicActionToBeSetupItem,
                Criticality::Ignore,
                |inner| action.aper_encode(inner),
            )?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        let ric_event_trigger_definition = decode_octetstring(data, None, None, false)?;
        let count = decode_length_determinant(data, Some(1), Some(16))?;
        let mut actions = Vec::with_capacity(count);
        for _ in 0..count {
            let (_raw_id, _criticality, payload) = decode_ie(data)?;
            let mut inner = PerCodecData::from_slice_aper(&payload);
            actions.push(RicActionToBeSetupItem::aper_decode(&mut inner)?);
        }
        Ok(RicSubscriptionDetails {
            ric_event_trigger_definition,
            ric_actions_to_be_setup: NonEmpty::from_vec(actions).ok_or_else(|| {
                PerCodecError::Other("empty RICactions-ToBeSetup-List".into())
            })?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicActionToBeSetupItem {
    pub ric_action_id: u8,
    pub ric_action_type: RicActionType,
    pub ric_action_definition: Option<Vec<u8>>,
    pub ric_subsequent_action: Option<RicSubsequentAction>,
}

impl AperCodec for RicActionToBeSetupItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[
                self.ric_action_definition.is_some(),
                self.ric_subsequent_action.is_some(),
            ],
        )?;
        encode_integer(data, Some(0), Some(255), false, self.ric_action_id as i128)?;
        self.ric_action_type.aper_encode(data)?;
        if let Some(definition) = &self.ric_action_definition {
            encode_octetstring(data, None, None, false, definition)?;
        }
        if let Some(subsequent) = &self.ric_subsequent_action {
            subsequent.aper_encode(data)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(RicActionToBeSetupItem {
            ric_action_id: decode_integer(data, Some(0), Some(255), false)? as u8,
            ric_action_type: RicActionType::aper_decode(data)?,
            ric_action_definition: if optionals[0] {
                Some(decode_octetstring(data, None, None, false)?)
            } else {
                None
            },
            ric_subsequent_action: if optionals[1] {
                Some(RicSubsequentAction::aper_decode(data)?)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RicSubsequentActionType {
    Continue = 0,
    Wait = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RicSubsequentAction {
    pub action_type: RicSubsequentActionType,
    /// RICtimeToWait index (zero, w1ms, .., w60s).
    pub time_to_wait: u8,
}

impl AperCodec for RicSubsequentAction {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_enumerated(data, 0, 1, true, u8::from(self.action_type) as i128)?;
        encode_enumerated(data, 0, 17, true, self.time_to_wait as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        let raw = decode_enumerated(data, 0, 1, true)?;
        Ok(RicSubsequentAction {
            action_type: RicSubsequentActionType::try_from(raw as u8)
                .map_err(|_| PerCodecError::InvalidEnumerated(raw as u128))?,
            time_to_wait: decode_enumerated(data, 0, 17, true)? as u8,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicSubscriptionResponse {
    pub ric_request_id: RicRequestId,
    pub ran_function_id: u16,
    pub ric_actions_admitted: NonEmpty<u8>,
}

impl AperCodec for RicSubscriptionResponse {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_ie_count(data, 3)?;
        encode_ie(data, IeId::RicRequestId, Criticality::Reject, |inner| {
            self.ric_request_id.aper_encode(inner)
        })?;
        encode_ie(data, IeId::RanFunctionId, Criticality::Reject, |inner| {
            encode_ran_function_id(inner, self.ran_function_id)
        })?;
        encode_ie(data, IeId::RicActionsAdmitted, Criticality::Reject, |inner| {
            encode_length_determinant(inner, Some(1), Some(16), self.ric_actions_admitted.len())?;
            for action_id in &self.ric_actions_admitted {
                encode_ie(
                    inner,
                    IeId::RicActionAdmittedItem,
                    Criticality::Ignore,
                    |item| {
                        encode_sequence_header(item, true, &[])?;
                        encode_integer(item, Some(0), Some(255), false, *action_id as i128)
                    },
                )?;
            }
            Ok(())
        })
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        let count = decode_ie_count(data)?;
        let mut ric_request_id = None;
        let mut ran_function_id = None;
        let mut ric_actions_admitted = None;
        for _ in 0..count {
            let (raw_id, _criticality, payload) = decode_ie(data)?;
            let mut inner = PerCodecData::from_slice_aper(&payload);
            match IeId::try_from(raw_id) {
                Ok(IeId::RicRequestId) => {
                    ric_request_id = Some(RicRequestId::aper_decode(&mut inner)?)
                }
                Ok(IeId::RanFunctionId) => {
                    ran_function_id = Some(decode_ran_function_id(&mut inner)?)
                }
                Ok(IeId::RicActionsAdmitted) => {
                    let n = decode_length_determinant(&mut inner, Some(1), Some(16))?;
                    let mut ids = Vec::with_capacity(n);
                    for _ in 0..n {
                        let (_item_id, _criticality, item_payload) = decode_ie(&mut inner)?;
                        let mut item = PerCodecData::from_slice_aper(&item_payload);
                        decode_sequence_header(&mut item, true, 0)?;
                        ids.push(decode_integer(&mut item, Some(0), Some(255), false)? as u8);
                    }
                    ric_actions_admitted = NonEmpty::from_vec(ids);
                }
                _ => continue,
            }
        }
        Ok(RicSubscriptionResponse {
            ric_request_id: ric_request_id
                .ok_or_else(|| PerCodecError::Other("response missing RICrequestID".into()))?,
            ran_function_id: ran_function_id
                .ok_or_else(|| PerCodecError::Other("response missing RANfunctionID".into()))?,
            ric_actions_admitted: ric_actions_admitted.ok_or_else(|| {
                PerCodecError::Other("response missing RICactions-Admitted-List".into())
            })?,
        })
    }
}
