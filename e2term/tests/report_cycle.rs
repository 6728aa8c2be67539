//! End-to-end report and control cycles over the E2AP wire encoding.

use asn1_per::SerDes;
use e2ap::{E2apPdu, InitiatingMessage, RicControlIe, RicControlRequest, RicRequestId};
use e2sm::{
    ControlMessageFormat1, E2SmKpmIndicationHeader, E2SmKpmIndicationMessage,
    E2SmRcControlMessage, GlobalE2NodeId, MeasurementType, PfContainer, PlmnIdentity,
    RanParameterItem, RanParameterStructure, RanParameterValue, RanParameterValueType,
};
use e2term::helper::{DuCellPmValues, DuUePmValues, IndicationMessageHelper, IndicationMessageKind};
use e2term::indication::{CellResourceReport, PerQciReport, ServedPlmnPerCell};
use e2term::rrc_measurements::{
    add_neighbour_cell_measurement, three_gpp_map_sinr, ue_specific_sinr_neigh,
    ue_specific_sinr_serving,
};
use e2term::subscription::{SubscriptionInfo, ric_indication_pdu};
use e2term::{
    IndicationHeaderValues, KpmIndicationHeader, NodeType, RequestType, RicControlMessage,
    SubscriptionParameters, UeIdentityProvider,
};
use slog::{Drain, Logger, o};

fn test_logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build();
    let drain = std::sync::Mutex::new(drain).fuse();
    let drain = slog_envlogger::new(drain);
    Logger::root(drain, o!())
}

fn test_identity() -> UeIdentityProvider {
    UeIdentityProvider::new(PlmnIdentity::from_str_bytes("111"), 1, 1, 0, [9u8; 8])
}

#[test]
fn cu_cp_report_round_trips_as_format3() {
    let logger = test_logger();
    let mut helper = IndicationMessageHelper::new(IndicationMessageKind::CuCp, false);
    helper.fill_cu_cp_values(100);
    for (imsi, serving_cell, neigh_cell) in [("0001", 2i64, 3i64), ("0002", 3, 2)] {
        let serving =
            ue_specific_sinr_serving(serving_cell, serving_cell, three_gpp_map_sinr(21.0));
        let mut neigh = ue_specific_sinr_neigh();
        add_neighbour_cell_measurement(&mut neigh, neigh_cell, three_gpp_map_sinr(14.0), &logger);
        helper.add_cu_cp_ue_pm_item(imsi, 1, 0, serving, neigh);
    }
    let message = helper.into_message(
        &SubscriptionParameters::default(),
        &test_identity(),
        &logger,
    );

    let decoded = E2SmKpmIndicationMessage::from_bytes(message.bytes()).unwrap();
    let E2SmKpmIndicationMessage::Format3(format) = decoded else {
        panic!("expected a Format 3 report");
    };
    assert_eq!(format.ue_meas_report_list.len(), 2);
    for report in &format.ue_meas_report_list {
        // 2 DRB counters, 1 serving entry, 1 neighbor entry
        assert_eq!(report.meas_report.meas_data.len(), 4);
        assert_eq!(report.meas_report.granul_period, Some(100));
    }
    let first = format.ue_meas_report_list.first();
    assert_eq!(first.ue_id.amf_ue_ngap_id, 1);
    let names: Vec<&str> = first
        .meas_report
        .meas_info_list
        .as_ref()
        .unwrap()
        .iter()
        .map(|info| match &info.meas_type {
            MeasurementType::Name(name) => name.as_str(),
            MeasurementType::Id(_) => panic!("expected named measurements"),
        })
        .collect();
    assert!(names.contains(&"L3servingSINR3gpp_cell_2_UEID_0001"));
    assert!(names.contains(&"L3neighSINRListOf_UEID_0001_of_Cell_-3"));
}

#[test]
fn du_report_round_trips_as_format1() {
    let logger = test_logger();
    let mut helper = IndicationMessageHelper::new(IndicationMessageKind::Du, false);
    for (cell, plm, usage) in [(2u16, "111", (1i64, 2i64)), (3, "444", (3, 4))] {
        helper.add_du_cell_res_rep_pm_item(CellResourceReport {
            plm_id: plm.to_string(),
            nr_cell_id: cell,
            dl_available_prbs: 6,
            ul_available_prbs: 6,
            served_plmn_per_cell: vec![ServedPlmnPerCell {
                plm_id: plm.to_string(),
                per_qci_reports: vec![PerQciReport {
                    qci: 1,
                    dl_prb_usage: usage.0,
                    ul_prb_usage: usage.1,
                }],
            }],
        });
    }
    helper.fill_du_values("DuCell2");
    helper.add_du_ue_pm_item("0003", DuUePmValues::default());
    helper.add_du_cell_pm_item(DuCellPmValues::default());
    // per-UE items push the builder onto the Format 3 path; drop them to
    // exercise the flat report
    let mut values = helper.into_values();
    values.ue_indications.clear();
    let message = e2term::KpmIndicationMessage::new(
        values,
        &SubscriptionParameters::default(),
        &test_identity(),
        &logger,
    );

    let decoded = E2SmKpmIndicationMessage::from_bytes(message.bytes()).unwrap();
    let E2SmKpmIndicationMessage::Format1(format) = decoded else {
        panic!("expected a Format 1 report");
    };
    assert_eq!(format.cell_object_id, "DuCell2");
    assert!(format.list_of_pm_information.is_some());
    let Some(PfContainer::ODu(du)) = &format.pm_containers.first().performance_container else {
        panic!("expected a DU container");
    };
    assert_eq!(du.cell_resource_report_list.len(), 2);
    let second = &du.cell_resource_report_list[1];
    assert_eq!(second.nrcgi.plmn_identity, PlmnIdentity::from_str_bytes("444"));
    let qci = second.served_plmn_per_cell_list.first().du_pm_epc.as_ref();
    let report = qci.unwrap().per_qci_report_list.first();
    assert_eq!(report.dl_prb_usage, Some(3));
    assert_eq!(report.ul_prb_usage, Some(4));
}

#[test]
fn indication_header_survives_the_wire_for_every_node_type() {
    let logger = test_logger();
    for node_type in [NodeType::Gnb, NodeType::EnGnb, NodeType::NgEnb, NodeType::Enb] {
        let header = KpmIndicationHeader::new(
            node_type,
            &IndicationHeaderValues {
                gnb_id: 7,
                nr_cell_id: 4,
                plm_id: "111".to_string(),
                timestamp: 1_700_000_000_000_000,
            },
            &logger,
        );
        let decoded = E2SmKpmIndicationHeader::from_bytes(header.bytes()).unwrap();
        let E2SmKpmIndicationHeader::Format1(format) = decoded;
        assert_eq!(format.collection_start_time.as_micros(), 1_700_000_000_000_000);
        match (node_type, &format.global_e2node_id) {
            (NodeType::Gnb, GlobalE2NodeId::Gnb(_))
            | (NodeType::EnGnb, GlobalE2NodeId::EnGnb(_))
            | (NodeType::NgEnb, GlobalE2NodeId::NgEnb(_))
            | (NodeType::Enb, GlobalE2NodeId::Enb(_)) => {}
            (node_type, id) => panic!("{node_type:?} decoded as {id:?}"),
        }
    }
}

#[test]
fn indication_pdu_wraps_the_service_model_payloads() {
    let logger = test_logger();
    let header = KpmIndicationHeader::new(
        NodeType::Gnb,
        &IndicationHeaderValues {
            gnb_id: 1,
            nr_cell_id: 2,
            plm_id: "111".to_string(),
            timestamp: 42,
        },
        &logger,
    );
    let mut helper = IndicationMessageHelper::new(IndicationMessageKind::CuUp, false);
    helper.fill_cu_up_values("111");
    helper.add_cu_up_ue_pm_item("0001", 10, 2);
    let message = helper.into_message(
        &SubscriptionParameters::default(),
        &test_identity(),
        &logger,
    );

    let subscription = SubscriptionInfo {
        ric_request_id: RicRequestId {
            requestor_id: 1001,
            instance_id: 0,
        },
        ran_function_id: 200,
        action_ids: vec![0],
        parameters: SubscriptionParameters::default(),
    };
    let pdu = ric_indication_pdu(
        &subscription,
        0,
        1,
        header.into_bytes(),
        message.into_bytes(),
    );
    let bytes = pdu.into_bytes().unwrap();
    let decoded = E2apPdu::from_bytes(&bytes).unwrap();
    let E2apPdu::InitiatingMessage(InitiatingMessage::RicIndication(indication)) = decoded else {
        panic!("expected a RIC indication");
    };
    assert_eq!(indication.ric_request_id.requestor_id, 1001);
    assert_eq!(indication.ric_indication_sn, Some(1));
    // the inner payloads decode on their own
    E2SmKpmIndicationHeader::from_bytes(&indication.ric_indication_header).unwrap();
    E2SmKpmIndicationMessage::from_bytes(&indication.ric_indication_message).unwrap();
}

#[test]
fn traffic_steering_control_request_over_the_wire() {
    let logger = test_logger();
    let control_message = E2SmRcControlMessage::Format1(ControlMessageFormat1 {
        ran_parameters_list: asn1_per::nonempty![RanParameterItem {
            ran_parameter_id: 1,
            ran_parameter_value_type: RanParameterValueType::Structure(RanParameterStructure {
                sequence_of_ran_parameters: vec![RanParameterItem {
                    ran_parameter_id: 4,
                    ran_parameter_value_type: RanParameterValueType::ElementTrue(
                        RanParameterValue::OctetString(b"1110X".to_vec()),
                    ),
                }],
            }),
        }],
    });
    let pdu = E2apPdu::InitiatingMessage(InitiatingMessage::RicControlRequest(
        RicControlRequest {
            ies: vec![
                RicControlIe::RicRequestId(RicRequestId {
                    requestor_id: 1001,
                    instance_id: 0,
                }),
                RicControlIe::RanFunctionId(300),
                RicControlIe::RicControlMessage(control_message.into_bytes().unwrap()),
            ],
        },
    ));
    let bytes = pdu.into_bytes().unwrap();

    let decoded_pdu = E2apPdu::from_bytes(&bytes).unwrap();
    let control = RicControlMessage::decode(&decoded_pdu, &logger).unwrap();
    assert_eq!(control.request_type, RequestType::Ts);
    assert_eq!(control.ran_function_id, 300);
    assert_eq!(control.ran_parameters.len(), 1);
    assert_eq!(control.secondary_cell_id.as_deref(), Some("X"));
}
