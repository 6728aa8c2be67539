//! rc - E2SM-RC control header/message grammar and RAN parameter extraction

use crate::kpm::{RanFunctionName, UeId};
use asn1_per::*;
use slog::{Logger, debug, warn};

#[derive(Clone, Debug, PartialEq)]
pub enum E2SmRcControlHeader {
    Format1(ControlHeaderFormat1),
}

impl AperCodec for E2SmRcControlHeader {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        let E2SmRcControlHeader::Format1(x) = self;
        encode_choice_idx(data, 0, 0, true, 0)?;
        x.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 0, true)? {
            0 => Ok(E2SmRcControlHeader::Format1(
                ControlHeaderFormat1::aper_decode(data)?,
            )),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlHeaderFormat1 {
    pub ue_id: UeId,
    pub ric_style_type: i64,
    pub control_action_id: i64, // (1..65535)
}

impl AperCodec for ControlHeaderFormat1 {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.ue_id.aper_encode(data)?;
        encode_integer(data, None, None, false, self.ric_style_type as i128)?;
        encode_integer(data, Some(1), Some(65535), true, self.control_action_id as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(ControlHeaderFormat1 {
            ue_id: UeId::aper_decode(data)?,
            ric_style_type: decode_integer(data, None, None, false)? as i64,
            control_action_id: decode_integer(data, Some(1), Some(65535), true)? as i64,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum E2SmRcControlMessage {
    Format1(ControlMessageFormat1),
}

impl AperCodec for E2SmRcControlMessage {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        let E2SmRcControlMessage::Format1(x) = self;
        encode_choice_idx(data, 0, 0, true, 0)?;
        x.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 0, true)? {
            0 => Ok(E2SmRcControlMessage::Format1(
                ControlMessageFormat1::aper_decode(data)?,
            )),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlMessageFormat1 {
    pub ran_parameters_list: NonEmpty<RanParameterItem>,
}

impl AperCodec for ControlMessageFormat1 {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_nonempty(data, 65535, &self.ran_parameters_list)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(ControlMessageFormat1 {
            ran_parameters_list: decode_nonempty(data, 65535)?,
        })
    }
}

/// One node of the RAN parameter tree.
#[derive(Clone, Debug, PartialEq)]
pub struct RanParameterItem {
    /// RANParameter-ID, INTEGER (1..4294967295).
    pub ran_parameter_id: u64,
    pub ran_parameter_value_type: RanParameterValueType,
}

impl AperCodec for RanParameterItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_integer(
            data,
            Some(1),
            Some(4294967295),
            false,
            self.ran_parameter_id as i128,
        )?;
        self.ran_parameter_value_type.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(RanParameterItem {
            ran_parameter_id: decode_integer(data, Some(1), Some(4294967295), false)? as u64,
            ran_parameter_value_type: RanParameterValueType::aper_decode(data)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RanParameterValueType {
    /// Key element carrying a value.
    ElementTrue(RanParameterValue),
    /// Non-key element; the value is optional.
    ElementFalse(Option<RanParameterValue>),
    Structure(RanParameterStructure),
    List(RanParameterList),
}

impl AperCodec for RanParameterValueType {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            RanParameterValueType::ElementTrue(value) => {
                encode_choice_idx(data, 0, 3, true, 0)?;
                encode_sequence_header(data, true, &[])?;
                value.aper_encode(data)
            }
            RanParameterValueType::ElementFalse(value) => {
                encode_choice_idx(data, 0, 3, true, 1)?;
                encode_sequence_header(data, true, &[value.is_some()])?;
                if let Some(value) = value {
                    value.aper_encode(data)?;
                }
                Ok(())
            }
            RanParameterValueType::Structure(structure) => {
                encode_choice_idx(data, 0, 3, true, 2)?;
                structure.aper_encode(data)
            }
            RanParameterValueType::List(list) => {
                encode_choice_idx(data, 0, 3, true, 3)?;
                list.aper_encode(data)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 3, true)? {
            0 => {
                decode_sequence_header(data, true, 0)?;
                Ok(RanParameterValueType::ElementTrue(
                    RanParameterValue::aper_decode(data)?,
                ))
            }
            1 => {
                let optionals = decode_sequence_header(data, true, 1)?;
                Ok(RanParameterValueType::ElementFalse(if optionals[0] {
                    Some(RanParameterValue::aper_decode(data)?)
                } else {
                    None
                }))
            }
            2 => Ok(RanParameterValueType::Structure(
                RanParameterStructure::aper_decode(data)?,
            )),
            3 => Ok(RanParameterValueType::List(RanParameterList::aper_decode(
                data,
            )?)),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RanParameterStructure {
    pub sequence_of_ran_parameters: Vec<RanParameterItem>,
}

impl AperCodec for RanParameterStructure {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[!self.sequence_of_ran_parameters.is_empty()])?;
        if !self.sequence_of_ran_parameters.is_empty() {
            encode_seq_of(data, 1, 65535, &self.sequence_of_ran_parameters)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(RanParameterStructure {
            sequence_of_ran_parameters: if optionals[0] {
                decode_seq_of(data, 1, 65535)?
            } else {
                vec![]
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RanParameterList {
    pub list_of_ran_parameters: Vec<RanParameterStructure>,
}

impl AperCodec for RanParameterList {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[!self.list_of_ran_parameters.is_empty()])?;
        if !self.list_of_ran_parameters.is_empty() {
            encode_seq_of(data, 1, 65535, &self.list_of_ran_parameters)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(RanParameterList {
            list_of_ran_parameters: if optionals[0] {
                decode_seq_of(data, 1, 65535)?
            } else {
                vec![]
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RanParameterValue {
    Boolean(bool),
    Int(i64),
    Real(f64),
    BitString(BitVec<u8, Msb0>),
    OctetString(Vec<u8>),
    PrintableString(String),
}

impl AperCodec for RanParameterValue {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            RanParameterValue::Boolean(value) => {
                encode_choice_idx(data, 0, 5, true, 0)?;
                encode_bool(data, *value)
            }
            RanParameterValue::Int(value) => {
                encode_choice_idx(data, 0, 5, true, 1)?;
                encode_integer(data, None, None, false, *value as i128)
            }
            RanParameterValue::Real(value) => {
                encode_choice_idx(data, 0, 5, true, 2)?;
                encode_real(data, *value)
            }
            RanParameterValue::BitString(bits) => {
                encode_choice_idx(data, 0, 5, true, 3)?;
                encode_bitstring(data, None, None, false, bits)
            }
            RanParameterValue::OctetString(bytes) => {
                encode_choice_idx(data, 0, 5, true, 4)?;
                encode_octetstring(data, None, None, false, bytes)
            }
            RanParameterValue::PrintableString(s) => {
                encode_choice_idx(data, 0, 5, true, 5)?;
                encode_visible_string(data, s)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 5, true)? {
            0 => Ok(RanParameterValue::Boolean(decode_bool(data)?)),
            1 => Ok(RanParameterValue::Int(
                decode_integer(data, None, None, false)? as i64,
            )),
            2 => Ok(RanParameterValue::Real(decode_real(data)?)),
            3 => Ok(RanParameterValue::BitString(decode_bitstring(
                data, None, None, false,
            )?)),
            4 => Ok(RanParameterValue::OctetString(decode_octetstring(
                data, None, None, false,
            )?)),
            5 => Ok(RanParameterValue::PrintableString(decode_visible_string(
                data,
            )?)),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

/// Flat leaf produced by [`extract_ran_parameters`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractedRanParameter {
    pub id: u64,
    pub value: ExtractedValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExtractedValue {
    Nothing,
    Int(i64),
    OctetString(Vec<u8>),
}

/// Recursively flatten a RAN parameter tree into its typed leaves.
///
/// Pure: the input is only read, so calling this twice yields identical
/// output.  Element values other than integer and octet string are
/// skipped, as is the list arm, which no RIC-side producer emits yet.
pub fn extract_ran_parameters(
    item: &RanParameterItem,
    logger: &Logger,
) -> Vec<ExtractedRanParameter> {
    let mut leaves = Vec::new();
    match &item.ran_parameter_value_type {
        RanParameterValueType::ElementTrue(value) => {
            extract_element(item.ran_parameter_id, value, &mut leaves, logger)
        }
        RanParameterValueType::ElementFalse(Some(value)) => {
            extract_element(item.ran_parameter_id, value, &mut leaves, logger)
        }
        RanParameterValueType::ElementFalse(None) => {
            leaves.push(ExtractedRanParameter {
                id: item.ran_parameter_id,
                value: ExtractedValue::Nothing,
            });
        }
        RanParameterValueType::Structure(structure) => {
            for child in &structure.sequence_of_ran_parameters {
                leaves.extend(extract_ran_parameters(child, logger));
            }
        }
        RanParameterValueType::List(_) => {
            warn!(
                logger,
                "RAN parameter list arm not supported, skipping";
                "ran_parameter_id" => item.ran_parameter_id
            );
        }
    }
    leaves
}

fn extract_element(
    id: u64,
    value: &RanParameterValue,
    leaves: &mut Vec<ExtractedRanParameter>,
    logger: &Logger,
) {
    match value {
        RanParameterValue::Int(value) => leaves.push(ExtractedRanParameter {
            id,
            value: ExtractedValue::Int(*value),
        }),
        RanParameterValue::OctetString(bytes) => leaves.push(ExtractedRanParameter {
            id,
            value: ExtractedValue::OctetString(bytes.clone()),
        }),
        other => {
            debug!(
                logger,
                "unsupported RAN parameter element value, skipping";
                "ran_parameter_id" => id,
                "value" => ?other
            );
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RanControlParameterItem {
    pub ran_parameter_id: u64,
    pub ran_parameter_name: String,
}

impl AperCodec for RanControlParameterItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_integer(
            data,
            Some(1),
            Some(4294967295),
            false,
            self.ran_parameter_id as i128,
        )?;
        encode_visible_string(data, &self.ran_parameter_name)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(RanControlParameterItem {
            ran_parameter_id: decode_integer(data, Some(1), Some(4294967295), false)? as u64,
            ran_parameter_name: decode_visible_string(data)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicControlActionItem {
    pub control_action_id: i64,
    pub control_action_name: String,
    pub ran_control_parameters_list: Vec<RanControlParameterItem>,
}

impl AperCodec for RicControlActionItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[!self.ran_control_parameters_list.is_empty()])?;
        encode_integer(data, Some(1), Some(65535), true, self.control_action_id as i128)?;
        encode_visible_string(data, &self.control_action_name)?;
        if !self.ran_control_parameters_list.is_empty() {
            encode_seq_of(data, 1, 65535, &self.ran_control_parameters_list)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(RicControlActionItem {
            control_action_id: decode_integer(data, Some(1), Some(65535), true)? as i64,
            control_action_name: decode_visible_string(data)?,
            ran_control_parameters_list: if optionals[0] {
                decode_seq_of(data, 1, 65535)?
            } else {
                vec![]
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicControlStyleItem {
    pub style_type: i64,
    pub style_name: String,
    pub control_action_list: Vec<RicControlActionItem>,
    pub control_header_format_type: i64,
    pub control_message_format_type: i64,
}

impl AperCodec for RicControlStyleItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[!self.control_action_list.is_empty()])?;
        encode_integer(data, None, None, false, self.style_type as i128)?;
        encode_visible_string(data, &self.style_name)?;
        if !self.control_action_list.is_empty() {
            encode_seq_of(data, 1, 65535, &self.control_action_list)?;
        }
        encode_integer(data, None, None, false, self.control_header_format_type as i128)?;
        encode_integer(data, None, None, false, self.control_message_format_type as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(RicControlStyleItem {
            style_type: decode_integer(data, None, None, false)? as i64,
            style_name: decode_visible_string(data)?,
            control_action_list: if optionals[0] {
                decode_seq_of(data, 1, 65535)?
            } else {
                vec![]
            },
            control_header_format_type: decode_integer(data, None, None, false)? as i64,
            control_message_format_type: decode_integer(data, None, None, false)? as i64,
        })
    }
}

/// RC service model capability descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct E2SmRcRanFunctionDefinition {
    pub ran_function_name: RanFunctionName,
    pub ric_control_style_list: Vec<RicControlStyleItem>,
}

impl AperCodec for E2SmRcRanFunctionDefinition {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[!self.ric_control_style_list.is_empty()])?;
        self.ran_function_name.aper_encode(data)?;
        if !self.ric_control_style_list.is_empty() {
            encode_seq_of(data, 1, 63, &self.ric_control_style_list)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(E2SmRcRanFunctionDefinition {
            ran_function_name: RanFunctionName::aper_decode(data)?,
            ric_control_style_list: if optionals[0] {
                decode_seq_of(data, 1, 63)?
            } else {
                vec![]
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discard_logger() -> Logger {
        Logger::root(slog::Discard, slog::o!())
    }

    fn int_element(id: u64, value: i64) -> RanParameterItem {
        RanParameterItem {
            ran_parameter_id: id,
            ran_parameter_value_type: RanParameterValueType::ElementTrue(RanParameterValue::Int(
                value,
            )),
        }
    }

    #[test]
    fn control_message_round_trips() {
        let message = E2SmRcControlMessage::Format1(ControlMessageFormat1 {
            ran_parameters_list: nonempty![
                int_element(1, 5),
                RanParameterItem {
                    ran_parameter_id: 2,
                    ran_parameter_value_type: RanParameterValueType::ElementTrue(
                        RanParameterValue::OctetString(b"1110".to_vec()),
                    ),
                }
            ],
        });
        let bytes = message.clone().into_bytes().unwrap();
        assert_eq!(E2SmRcControlMessage::from_bytes(&bytes).unwrap(), message);
    }

    #[test]
    fn extractor_flattens_nested_structures() {
        // Structure -> Structure -> Element(Integer)
        let tree = RanParameterItem {
            ran_parameter_id: 1,
            ran_parameter_value_type: RanParameterValueType::Structure(RanParameterStructure {
                sequence_of_ran_parameters: vec![RanParameterItem {
                    ran_parameter_id: 2,
                    ran_parameter_value_type: RanParameterValueType::Structure(
                        RanParameterStructure {
                            sequence_of_ran_parameters: vec![int_element(3, 77)],
                        },
                    ),
                }],
            }),
        };
        let leaves = extract_ran_parameters(&tree, &discard_logger());
        assert_eq!(
            leaves,
            vec![ExtractedRanParameter {
                id: 3,
                value: ExtractedValue::Int(77),
            }]
        );
    }

    #[test]
    fn extractor_is_idempotent_and_preserves_order() {
        let tree = RanParameterItem {
            ran_parameter_id: 10,
            ran_parameter_value_type: RanParameterValueType::Structure(RanParameterStructure {
                sequence_of_ran_parameters: vec![
                    int_element(11, 1),
                    RanParameterItem {
                        ran_parameter_id: 12,
                        ran_parameter_value_type: RanParameterValueType::ElementTrue(
                            RanParameterValue::Boolean(true),
                        ),
                    },
                    int_element(13, 3),
                ],
            }),
        };
        let logger = discard_logger();
        let first = extract_ran_parameters(&tree, &logger);
        let second = extract_ran_parameters(&tree, &logger);
        assert_eq!(first, second);
        // Boolean element is skipped, not errored.
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id, 11);
        assert_eq!(first[1].id, 13);
    }

    #[test]
    fn list_arm_is_skipped() {
        let tree = RanParameterItem {
            ran_parameter_id: 1,
            ran_parameter_value_type: RanParameterValueType::List(RanParameterList {
                list_of_ran_parameters: vec![RanParameterStructure {
                    sequence_of_ran_parameters: vec![int_element(2, 9)],
                }],
            }),
        };
        assert!(extract_ran_parameters(&tree, &discard_logger()).is_empty());
    }

    #[test]
    fn element_false_without_value_is_a_nothing_leaf() {
        let tree = RanParameterItem {
            ran_parameter_id: 4,
            ran_parameter_value_type: RanParameterValueType::ElementFalse(None),
        };
        let leaves = extract_ran_parameters(&tree, &discard_logger());
        assert_eq!(
            leaves,
            vec![ExtractedRanParameter {
                id: 4,
                value: ExtractedValue::Nothing,
            }]
        );
    }

    #[test]
    fn control_header_round_trips() {
        use crate::ids;
        use crate::kpm::{Guami, PlmnIdentity};
        let header = E2SmRcControlHeader::Format1(ControlHeaderFormat1 {
            ue_id: UeId {
                amf_ue_ngap_id: 1,
                guami: Guami {
                    plmn_identity: PlmnIdentity::from_str_bytes("111"),
                    amf_region_id: ids::amf_region_id(1),
                    amf_set_id: ids::amf_set_id(1),
                    amf_pointer: ids::amf_pointer(0),
                },
                ran_ue_id: None,
            },
            ric_style_type: 3,
            control_action_id: 1,
        });
        let bytes = header.clone().into_bytes().unwrap();
        assert_eq!(E2SmRcControlHeader::from_bytes(&bytes).unwrap(), header);
    }
}
