//! transport - seam between the E2 termination and the wire
//!
//! The node does not own a socket; the surrounding process supplies an
//! [`E2Transport`] and feeds inbound bytes through [`dispatch_inbound`].

use anyhow::Result;
use asn1_per::SerDes;
use e2ap::{E2apPdu, InitiatingMessage, RicSubscriptionRequest};
use slog::{Logger, warn};

/// Outbound half: advertising RAN functions and sending PDUs.
pub trait E2Transport {
    fn register_function_description(
        &mut self,
        ran_function_id: u16,
        description: Vec<u8>,
    ) -> Result<()>;

    fn send_pdu(&mut self, pdu: E2apPdu) -> Result<()>;
}

/// Inbound half, implemented by the RAN model.
pub trait E2Handler {
    /// A subscription request arrived; the returned PDU is sent back.
    fn handle_subscription_request(&mut self, request: &RicSubscriptionRequest)
    -> Option<E2apPdu>;

    fn handle_control_request(&mut self, pdu: &E2apPdu);
}

/// Decode one inbound PDU and route it.  Undecodable bytes and
/// procedures the node does not take part in are logged and dropped.
pub fn dispatch_inbound(
    bytes: &[u8],
    handler: &mut impl E2Handler,
    logger: &Logger,
) -> Option<E2apPdu> {
    let pdu = match E2apPdu::from_bytes(bytes) {
        Ok(pdu) => pdu,
        Err(e) => {
            warn!(logger, "inbound PDU failed to decode, dropping it"; "error" => %e);
            return None;
        }
    };
    match &pdu {
        E2apPdu::InitiatingMessage(InitiatingMessage::RicSubscriptionRequest(request)) => {
            handler.handle_subscription_request(request)
        }
        E2apPdu::InitiatingMessage(InitiatingMessage::RicControlRequest(_)) => {
            handler.handle_control_request(&pdu);
            None
        }
        other => {
            warn!(logger, "unexpected inbound PDU, dropping it"; "pdu" => ?other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::process_subscription_request;
    use asn1_per::nonempty;
    use e2ap::{
        RicActionToBeSetupItem, RicActionType, RicRequestId, RicSubscriptionDetails,
        SuccessfulOutcome,
    };
    use slog::o;

    struct RecordingHandler {
        logger: Logger,
        control_requests: usize,
    }

    impl E2Handler for RecordingHandler {
        fn handle_subscription_request(
            &mut self,
            request: &RicSubscriptionRequest,
        ) -> Option<E2apPdu> {
            let (_, response) = process_subscription_request(request, &self.logger);
            Some(response)
        }

        fn handle_control_request(&mut self, _pdu: &E2apPdu) {
            self.control_requests += 1;
        }
    }

    #[test]
    fn subscription_request_produces_a_response() {
        let logger = Logger::root(slog::Discard, o!());
        let request = E2apPdu::InitiatingMessage(InitiatingMessage::RicSubscriptionRequest(
            RicSubscriptionRequest {
                ric_request_id: RicRequestId {
                    requestor_id: 1001,
                    instance_id: 0,
                },
                ran_function_id: 200,
                subscription_details: RicSubscriptionDetails {
                    ric_event_trigger_definition: vec![0x00],
                    ric_actions_to_be_setup: nonempty![RicActionToBeSetupItem {
                        ric_action_id: 2,
                        ric_action_type: RicActionType::Report,
                        ric_action_definition: None,
                        ric_subsequent_action: None,
                    }],
                },
            },
        ));
        let bytes = request.into_bytes().unwrap();
        let mut handler = RecordingHandler {
            logger: logger.clone(),
            control_requests: 0,
        };
        let response = dispatch_inbound(&bytes, &mut handler, &logger).unwrap();
        let E2apPdu::SuccessfulOutcome(SuccessfulOutcome::RicSubscriptionResponse(response)) =
            response
        else {
            panic!("expected a subscription response");
        };
        assert_eq!(response.ric_actions_admitted, nonempty![2]);
    }

    #[test]
    fn garbage_is_dropped() {
        let logger = Logger::root(slog::Discard, o!());
        let mut handler = RecordingHandler {
            logger: logger.clone(),
            control_requests: 0,
        };
        assert!(dispatch_inbound(&[0xde, 0xad], &mut handler, &logger).is_none());
        assert_eq!(handler.control_requests, 0);
    }
}
