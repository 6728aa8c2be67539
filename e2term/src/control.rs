//! control - inbound RIC control request handling
//!
//! Decodes the E2AP control request into a flat view the RAN model can
//! act on.  Malformed service-model payloads are logged and leave the
//! corresponding field empty; only a PDU that is not a control request
//! at all is an error.

use anyhow::{Result, bail};
use asn1_per::SerDes;
use e2ap::{E2apPdu, InitiatingMessage, RicControlAckRequest, RicControlIe};
use e2sm::{
    ControlHeaderFormat1, E2SmRcControlHeader, E2SmRcControlMessage, ExtractedRanParameter,
    ExtractedValue, extract_ran_parameters,
};
use slog::{Logger, debug, warn};

/// The RIC application a control request originates from, keyed by the
/// requestor ID convention the controller uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestType {
    /// Traffic steering (requestor 1001).
    Ts,
    /// QoS management (requestor 1002).
    Qos,
    /// RAN control (requestor 1024).
    Rc,
    Other(u16),
}

impl From<u16> for RequestType {
    fn from(requestor_id: u16) -> Self {
        match requestor_id {
            1001 => RequestType::Ts,
            1002 => RequestType::Qos,
            1024 => RequestType::Rc,
            other => RequestType::Other(other),
        }
    }
}

/// A decoded control request, flattened for the RAN model.
#[derive(Clone, Debug)]
pub struct RicControlMessage {
    pub request_type: RequestType,
    pub requestor_id: u16,
    pub instance_id: u16,
    pub ran_function_id: u16,
    /// Absent when the header payload failed to decode.
    pub header: Option<ControlHeaderFormat1>,
    /// Flattened leaves of every top-level RAN parameter tree.
    pub ran_parameters: Vec<ExtractedRanParameter>,
    /// Traffic steering only: the target cell, recovered from the first
    /// octet string parameter.
    pub secondary_cell_id: Option<String>,
    pub ack_request: Option<RicControlAckRequest>,
}

impl RicControlMessage {
    pub fn decode(pdu: &E2apPdu, logger: &Logger) -> Result<RicControlMessage> {
        let E2apPdu::InitiatingMessage(InitiatingMessage::RicControlRequest(request)) = pdu else {
            bail!("PDU is not a RIC control request");
        };

        let mut request_id = None;
        let mut ran_function_id = None;
        let mut header_bytes = None;
        let mut message_bytes = None;
        let mut ack_request = None;
        for ie in &request.ies {
            match ie {
                RicControlIe::RicRequestId(id) => request_id = Some(*id),
                RicControlIe::RanFunctionId(id) => ran_function_id = Some(*id),
                RicControlIe::RicControlHeader(bytes) => header_bytes = Some(bytes.as_slice()),
                RicControlIe::RicControlMessage(bytes) => message_bytes = Some(bytes.as_slice()),
                RicControlIe::RicControlAckRequest(ack) => ack_request = Some(*ack),
                RicControlIe::RicCallProcessId(_) => {}
                RicControlIe::Unknown(id) => {
                    warn!(logger, "ignoring unknown control request IE"; "ie_id" => *id);
                }
            }
        }
        let request_id = request_id
            .ok_or_else(|| anyhow::anyhow!("control request without a RIC request ID"))?;
        let ran_function_id = ran_function_id
            .ok_or_else(|| anyhow::anyhow!("control request without a RAN function ID"))?;
        let request_type = RequestType::from(request_id.requestor_id);

        let header = header_bytes.and_then(|bytes| {
            match E2SmRcControlHeader::from_bytes(bytes) {
                Ok(E2SmRcControlHeader::Format1(format)) => Some(format),
                Err(e) => {
                    warn!(logger, "control header failed to decode, dropping it";
                        "error" => %e);
                    None
                }
            }
        });

        let ran_parameters = match message_bytes {
            Some(bytes) => match E2SmRcControlMessage::from_bytes(bytes) {
                Ok(E2SmRcControlMessage::Format1(format)) => format
                    .ran_parameters_list
                    .iter()
                    .flat_map(|item| extract_ran_parameters(item, logger))
                    .collect(),
                Err(e) => {
                    warn!(logger, "control message failed to decode, dropping it";
                        "error" => %e);
                    Vec::new()
                }
            },
            None => {
                warn!(logger, "control request without a control message IE");
                Vec::new()
            }
        };

        let secondary_cell_id = if request_type == RequestType::Ts {
            secondary_cell_id_from(&ran_parameters)
        } else {
            None
        };

        if let Some(ack) = ack_request {
            debug!(logger, "control request asks for an acknowledgement"; "ack" => ?ack);
        }

        Ok(RicControlMessage {
            request_type,
            requestor_id: request_id.requestor_id,
            instance_id: request_id.instance_id,
            ran_function_id,
            header,
            ran_parameters,
            secondary_cell_id,
            ack_request,
        })
    }
}

/// Traffic steering encodes the handover target as the last character of
/// the cell identity string carried in the first octet string parameter.
fn secondary_cell_id_from(parameters: &[ExtractedRanParameter]) -> Option<String> {
    parameters.iter().find_map(|parameter| {
        let ExtractedValue::OctetString(bytes) = &parameter.value else {
            return None;
        };
        String::from_utf8_lossy(bytes)
            .chars()
            .last()
            .map(|c| c.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use asn1_per::nonempty;
    use e2ap::{RicControlRequest, RicRequestId};
    use e2sm::{
        ControlMessageFormat1, RanParameterItem, RanParameterStructure, RanParameterValue,
        RanParameterValueType,
    };
    use slog::o;

    fn discard_logger() -> Logger {
        Logger::root(slog::Discard, o!())
    }

    fn control_request_pdu(requestor_id: u16, message: E2SmRcControlMessage) -> E2apPdu {
        E2apPdu::InitiatingMessage(InitiatingMessage::RicControlRequest(RicControlRequest {
            ies: vec![
                RicControlIe::RicRequestId(RicRequestId {
                    requestor_id,
                    instance_id: 0,
                }),
                RicControlIe::RanFunctionId(300),
                RicControlIe::RicControlMessage(message.into_bytes().unwrap()),
                RicControlIe::RicControlAckRequest(RicControlAckRequest::NoAck),
            ],
        }))
    }

    fn octet_string_parameter(id: u64, value: &[u8]) -> RanParameterItem {
        RanParameterItem {
            ran_parameter_id: id,
            ran_parameter_value_type: RanParameterValueType::ElementTrue(
                RanParameterValue::OctetString(value.to_vec()),
            ),
        }
    }

    #[test]
    fn traffic_steering_request_yields_the_target_cell() {
        let logger = discard_logger();
        let pdu = control_request_pdu(
            1001,
            E2SmRcControlMessage::Format1(ControlMessageFormat1 {
                ran_parameters_list: nonempty![octet_string_parameter(4, b"1110X")],
            }),
        );
        let decoded = RicControlMessage::decode(&pdu, &logger).unwrap();
        assert_eq!(decoded.request_type, RequestType::Ts);
        assert_eq!(decoded.ran_function_id, 300);
        assert_eq!(decoded.secondary_cell_id.as_deref(), Some("X"));
        assert_eq!(decoded.ack_request, Some(RicControlAckRequest::NoAck));
    }

    #[test]
    fn nested_parameters_are_flattened() {
        let logger = discard_logger();
        let pdu = control_request_pdu(
            1024,
            E2SmRcControlMessage::Format1(ControlMessageFormat1 {
                ran_parameters_list: nonempty![RanParameterItem {
                    ran_parameter_id: 1,
                    ran_parameter_value_type: RanParameterValueType::Structure(
                        RanParameterStructure {
                            sequence_of_ran_parameters: vec![RanParameterItem {
                                ran_parameter_id: 3,
                                ran_parameter_value_type: RanParameterValueType::ElementTrue(
                                    RanParameterValue::Int(40),
                                ),
                            }],
                        },
                    ),
                }],
            }),
        );
        let decoded = RicControlMessage::decode(&pdu, &logger).unwrap();
        assert_eq!(decoded.request_type, RequestType::Rc);
        assert_eq!(decoded.ran_parameters.len(), 1);
        assert_eq!(decoded.ran_parameters[0].id, 3);
        assert_eq!(decoded.ran_parameters[0].value, ExtractedValue::Int(40));
        // no octet string parameter and not a TS request
        assert_eq!(decoded.secondary_cell_id, None);
    }

    #[test]
    fn unparseable_control_message_is_not_fatal() {
        let logger = discard_logger();
        let pdu = E2apPdu::InitiatingMessage(InitiatingMessage::RicControlRequest(
            RicControlRequest {
                ies: vec![
                    RicControlIe::RicRequestId(RicRequestId {
                        requestor_id: 55,
                        instance_id: 1,
                    }),
                    RicControlIe::RanFunctionId(300),
                    RicControlIe::RicControlMessage(vec![0xff, 0xff, 0xff]),
                ],
            },
        ));
        let decoded = RicControlMessage::decode(&pdu, &logger).unwrap();
        assert_eq!(decoded.request_type, RequestType::Other(55));
        assert!(decoded.ran_parameters.is_empty());
        assert_eq!(decoded.header, None);
    }

    #[test]
    fn non_control_pdu_is_rejected() {
        let logger = discard_logger();
        let pdu = E2apPdu::UnsuccessfulOutcome(e2ap::UnsuccessfulOutcome {
            procedure_code: 4,
            criticality: e2ap::Criticality::Reject,
            payload: vec![],
        });
        assert!(RicControlMessage::decode(&pdu, &logger).is_err());
    }
}
