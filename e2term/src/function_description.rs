//! function_description - encoded RAN function capability descriptors
//!
//! Built once at startup and registered with the transport so the RIC
//! learns which service models this node speaks.

use asn1_per::SerDes;
use e2sm::{
    E2SmKpmRanFunctionDescription, E2SmRcRanFunctionDefinition, RanControlParameterItem,
    RanFunctionName, RicControlActionItem, RicControlStyleItem, RicEventTriggerStyleItem,
    RicReportStyleItem,
};

/// The KPM monitoring capability: periodic reports of the EPC-connected
/// measurement containers.
pub fn kpm_function_description() -> Vec<u8> {
    let description = E2SmKpmRanFunctionDescription {
        ran_function_name: RanFunctionName {
            short_name: "ORAN-WG3-KPM".to_string(),
            oid: "OID123".to_string(),
            description: "KPM monitor".to_string(),
            instance: Some(0),
        },
        event_trigger_style_list: vec![RicEventTriggerStyleItem {
            style_type: 1,
            style_name: "Periodic report".to_string(),
            format_type: 1,
        }],
        report_style_list: vec![RicReportStyleItem {
            style_type: 1,
            style_name: "O-CU-CP Measurement Container for the EPC connected deployment"
                .to_string(),
            indication_header_format_type: 1,
            indication_message_format_type: 1,
        }],
    };
    description
        .into_bytes()
        .unwrap_or_else(|e| panic!("failed to encode E2SM-KPM-RANfunction-Description: {e}"))
}

/// The RAN control capability: DRB split ratio control and handover
/// control, both in the radio bearer control family.
pub fn rc_function_description() -> Vec<u8> {
    let definition = E2SmRcRanFunctionDefinition {
        ran_function_name: RanFunctionName {
            short_name: "ORAN-WG3-RC".to_string(),
            oid: "OID123".to_string(),
            description: "RIC Control Definitions".to_string(),
            instance: Some(0),
        },
        ric_control_style_list: vec![
            RicControlStyleItem {
                style_type: 1,
                style_name: "Radio Bearer Control".to_string(),
                control_action_list: vec![RicControlActionItem {
                    control_action_id: 6,
                    control_action_name: "DRB split ratio control".to_string(),
                    ran_control_parameters_list: vec![
                        RanControlParameterItem {
                            ran_parameter_id: 3,
                            ran_parameter_name: "Downlink PDCP Data Split".to_string(),
                        },
                        RanControlParameterItem {
                            ran_parameter_id: 2,
                            ran_parameter_name: "Uplink PDCP Data Split Threshold".to_string(),
                        },
                    ],
                }],
                control_header_format_type: 1,
                control_message_format_type: 1,
            },
            RicControlStyleItem {
                style_type: 3,
                style_name: "Radio Bearer Control".to_string(),
                control_action_list: vec![RicControlActionItem {
                    control_action_id: 1,
                    control_action_name: "Handover control".to_string(),
                    ran_control_parameters_list: vec![
                        RanControlParameterItem {
                            ran_parameter_id: 4,
                            ran_parameter_name: "NR CGI".to_string(),
                        },
                        RanControlParameterItem {
                            ran_parameter_id: 6,
                            ran_parameter_name: "E-UTRA CGI".to_string(),
                        },
                    ],
                }],
                control_header_format_type: 1,
                control_message_format_type: 1,
            },
        ],
    };
    definition
        .into_bytes()
        .unwrap_or_else(|e| panic!("failed to encode E2SM-RC-RANFunctionDefinition: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpm_description_decodes_back() {
        let decoded =
            E2SmKpmRanFunctionDescription::from_bytes(&kpm_function_description()).unwrap();
        assert_eq!(decoded.ran_function_name.short_name, "ORAN-WG3-KPM");
        assert_eq!(decoded.event_trigger_style_list.len(), 1);
        assert_eq!(
            decoded.event_trigger_style_list[0].style_name,
            "Periodic report"
        );
        assert_eq!(decoded.report_style_list.len(), 1);
    }

    #[test]
    fn rc_definition_advertises_both_control_styles() {
        let decoded = E2SmRcRanFunctionDefinition::from_bytes(&rc_function_description()).unwrap();
        assert_eq!(decoded.ran_function_name.short_name, "ORAN-WG3-RC");
        let styles = &decoded.ric_control_style_list;
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0].style_type, 1);
        assert_eq!(styles[0].control_action_list[0].control_action_id, 6);
        assert_eq!(styles[1].style_type, 3);
        assert_eq!(
            styles[1].control_action_list[0].control_action_name,
            "Handover control"
        );
        assert_eq!(
            styles[1].control_action_list[0].ran_control_parameters_list[0].ran_parameter_name,
            "NR CGI"
        );
    }
}
