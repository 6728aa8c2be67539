//! subscription - RIC subscription handling and indication dispatch
//!
//! The node admits every action the RIC asks for; report generation is
//! driven by the RAN model, so there is nothing to refuse at setup time.

use crate::indication::SubscriptionParameters;
use e2ap::{
    E2apPdu, InitiatingMessage, RicIndication, RicIndicationType, RicRequestId,
    RicSubscriptionRequest, RicSubscriptionResponse, SuccessfulOutcome,
};
use slog::{Logger, info};

/// What the node retains from an accepted subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionInfo {
    pub ric_request_id: RicRequestId,
    pub ran_function_id: u16,
    pub action_ids: Vec<u8>,
    pub parameters: SubscriptionParameters,
}

/// Admit all requested actions and build the response to send back.
pub fn process_subscription_request(
    request: &RicSubscriptionRequest,
    logger: &Logger,
) -> (SubscriptionInfo, E2apPdu) {
    let admitted = request
        .subscription_details
        .ric_actions_to_be_setup
        .clone()
        .map(|action| action.ric_action_id);
    info!(logger, "admitting subscription";
        "requestor_id" => request.ric_request_id.requestor_id,
        "ran_function_id" => request.ran_function_id,
        "actions" => admitted.len());
    let info = SubscriptionInfo {
        ric_request_id: request.ric_request_id,
        ran_function_id: request.ran_function_id,
        action_ids: admitted.iter().copied().collect(),
        parameters: SubscriptionParameters::default(),
    };
    let response = E2apPdu::SuccessfulOutcome(SuccessfulOutcome::RicSubscriptionResponse(
        RicSubscriptionResponse {
            ric_request_id: request.ric_request_id,
            ran_function_id: request.ran_function_id,
            ric_actions_admitted: admitted,
        },
    ));
    (info, response)
}

/// Wrap encoded service-model payloads in a RIC indication PDU.
pub fn ric_indication_pdu(
    subscription: &SubscriptionInfo,
    action_id: u8,
    sequence_number: u16,
    header: Vec<u8>,
    message: Vec<u8>,
) -> E2apPdu {
    E2apPdu::InitiatingMessage(InitiatingMessage::RicIndication(RicIndication {
        ric_request_id: subscription.ric_request_id,
        ran_function_id: subscription.ran_function_id,
        ric_action_id: action_id,
        ric_indication_sn: Some(sequence_number),
        ric_indication_type: RicIndicationType::Report,
        ric_indication_header: header,
        ric_indication_message: message,
        ric_call_process_id: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use asn1_per::nonempty;
    use e2ap::{RicActionToBeSetupItem, RicActionType, RicSubscriptionDetails};
    use slog::o;

    fn discard_logger() -> Logger {
        Logger::root(slog::Discard, o!())
    }

    #[test]
    fn all_requested_actions_are_admitted() {
        let request = RicSubscriptionRequest {
            ric_request_id: RicRequestId {
                requestor_id: 1001,
                instance_id: 7,
            },
            ran_function_id: 200,
            subscription_details: RicSubscriptionDetails {
                ric_event_trigger_definition: vec![0x01, 0x02],
                ric_actions_to_be_setup: nonempty![
                    RicActionToBeSetupItem {
                        ric_action_id: 1,
                        ric_action_type: RicActionType::Report,
                        ric_action_definition: None,
                        ric_subsequent_action: None,
                    },
                    RicActionToBeSetupItem {
                        ric_action_id: 4,
                        ric_action_type: RicActionType::Report,
                        ric_action_definition: None,
                        ric_subsequent_action: None,
                    }
                ],
            },
        };
        let (info, response) = process_subscription_request(&request, &discard_logger());
        assert_eq!(info.action_ids, vec![1, 4]);
        assert_eq!(info.parameters.granularity(), 100);
        let E2apPdu::SuccessfulOutcome(SuccessfulOutcome::RicSubscriptionResponse(response)) =
            response
        else {
            panic!("expected a subscription response");
        };
        assert_eq!(response.ric_request_id.requestor_id, 1001);
        assert_eq!(response.ran_function_id, 200);
        assert_eq!(response.ric_actions_admitted, nonempty![1, 4]);
    }

    #[test]
    fn indication_pdu_carries_the_subscription_identity() {
        let subscription = SubscriptionInfo {
            ric_request_id: RicRequestId {
                requestor_id: 1002,
                instance_id: 3,
            },
            ran_function_id: 201,
            action_ids: vec![0],
            parameters: SubscriptionParameters::default(),
        };
        let pdu = ric_indication_pdu(&subscription, 0, 42, vec![0xaa], vec![0xbb, 0xcc]);
        let E2apPdu::InitiatingMessage(InitiatingMessage::RicIndication(indication)) = pdu else {
            panic!("expected a RIC indication");
        };
        assert_eq!(indication.ric_request_id.requestor_id, 1002);
        assert_eq!(indication.ric_indication_sn, Some(42));
        assert_eq!(indication.ric_indication_type, RicIndicationType::Report);
        assert_eq!(indication.ric_indication_header, vec![0xaa]);
    }
}
