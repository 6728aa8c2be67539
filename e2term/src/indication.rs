//! indication - KPM indication header and message builders
//!
//! The message builder is the heart of the outbound path: it turns the
//! per-report measurement values into the Format 3 per-UE report grammar
//! (or the flat Format 1 report when no UE indications exist) and owns
//! the encoded bytes.  Encode failures on this path are fatal; a
//! malformed outbound structure is a programming bug, never retried.

use crate::measurement::MeasurementItemList;
use asn1_per::{SerDes, nonempty};
use e2sm::{ids, *};
use slog::{Logger, debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Gnb,
    EnGnb,
    NgEnb,
    Enb,
}

/// Input to the header builder, consumed once.
#[derive(Clone, Debug)]
pub struct IndicationHeaderValues {
    pub gnb_id: u32,
    pub nr_cell_id: u16,
    pub plm_id: String,
    /// Collection start time, microseconds since the epoch.
    pub timestamp: u64,
}

/// An encoded E2SM-KPM indication header.
pub struct KpmIndicationHeader {
    encoded: Vec<u8>,
}

impl KpmIndicationHeader {
    /// Build and encode the header.  The eNB flavors carry a 20-bit
    /// macro identity, so `gnb_id` must fit 20 bits for those arms.
    pub fn new(node_type: NodeType, values: &IndicationHeaderValues, logger: &Logger) -> Self {
        let plmn_identity = PlmnIdentity::from_str_bytes(&values.plm_id);
        let global_e2node_id = match node_type {
            NodeType::Gnb => GlobalE2NodeId::Gnb(GlobalE2NodeGnbId {
                plmn_identity,
                gnb_id: GnbIdChoice::GnbId(ids::gnb_id(values.gnb_id)),
            }),
            NodeType::EnGnb => GlobalE2NodeId::EnGnb(GlobalE2NodeEnGnbId {
                plmn_identity,
                gnb_id: GnbIdChoice::GnbId(ids::gnb_id(values.gnb_id)),
            }),
            NodeType::NgEnb => GlobalE2NodeId::NgEnb(GlobalE2NodeNgEnbId {
                plmn_identity,
                enb_id: EnbId::Macro(ids::macro_enb_id(values.gnb_id)),
            }),
            NodeType::Enb => GlobalE2NodeId::Enb(GlobalE2NodeEnbId {
                plmn_identity,
                enb_id: EnbId::Macro(ids::macro_enb_id(values.gnb_id)),
            }),
        };
        let header = E2SmKpmIndicationHeader::Format1(IndicationHeaderFormat1 {
            global_e2node_id,
            collection_start_time: TimeStamp::from_micros(values.timestamp),
        });
        debug!(logger, "building indication header";
            "node_type" => ?node_type, "nr_cell_id" => values.nr_cell_id);
        let encoded = header
            .into_bytes()
            .unwrap_or_else(|e| panic!("failed to encode E2SM-KPM-IndicationHeader: {e}"));
        KpmIndicationHeader { encoded }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.encoded
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.encoded
    }
}

/// Granularity and other per-subscription knobs; absent values fall
/// back to defaults.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubscriptionParameters {
    pub granularity_period_ms: Option<u64>,
}

impl SubscriptionParameters {
    pub fn granularity(&self) -> u64 {
        self.granularity_period_ms.unwrap_or(100)
    }
}

/// Source of the placeholder UE identity sub-fields the Format 3 path
/// needs.  Injectable so tests are deterministic.
#[derive(Clone, Debug)]
pub struct UeIdentityProvider {
    pub plmn: PlmnIdentity,
    pub amf_region_id: u8,
    pub amf_set_id: u16,
    pub amf_pointer: u8,
    pub ran_ue_id: [u8; 8],
}

impl UeIdentityProvider {
    pub fn new(
        plmn: PlmnIdentity,
        amf_region_id: u8,
        amf_set_id: u16,
        amf_pointer: u8,
        ran_ue_id: [u8; 8],
    ) -> Self {
        UeIdentityProvider {
            plmn,
            amf_region_id,
            amf_set_id,
            amf_pointer,
            ran_ue_id,
        }
    }

    pub fn random(plmn: PlmnIdentity) -> Self {
        UeIdentityProvider {
            plmn,
            amf_region_id: rand::random(),
            amf_set_id: rand::random_range(0..1024),
            amf_pointer: rand::random_range(0..64),
            ran_ue_id: rand::random(),
        }
    }

    fn guami(&self) -> Guami {
        Guami {
            plmn_identity: self.plmn.clone(),
            amf_region_id: ids::amf_region_id(self.amf_region_id),
            amf_set_id: ids::amf_set_id(self.amf_set_id),
            amf_pointer: ids::amf_pointer(self.amf_pointer),
        }
    }
}

/// Input to the message builder, consumed once.  The container variant
/// decides which fill routine runs; exactly one of the three executes.
#[derive(Clone, Debug)]
pub struct IndicationMessageValues {
    pub cell_object_id: String,
    pub pm_container: PmContainerValues,
    pub cell_measurement_items: Option<MeasurementItemList>,
    pub ue_indications: Vec<MeasurementItemList>,
}

#[derive(Clone, Debug)]
pub enum PmContainerValues {
    CuUp(CuUpContainerValues),
    CuCp(CuCpContainerValues),
    Du(DuContainerValues),
}

#[derive(Clone, Debug)]
pub struct CuUpContainerValues {
    pub plm_id: String,
    pub pdcp_bytes_dl: i64,
    pub pdcp_bytes_ul: i64,
}

#[derive(Clone, Debug)]
pub struct CuCpContainerValues {
    pub num_active_ues: i64,
}

#[derive(Clone, Debug)]
pub struct DuContainerValues {
    pub cell_resource_reports: Vec<CellResourceReport>,
}

#[derive(Clone, Debug)]
pub struct CellResourceReport {
    pub plm_id: String,
    pub nr_cell_id: u16,
    pub dl_available_prbs: i64,
    pub ul_available_prbs: i64,
    pub served_plmn_per_cell: Vec<ServedPlmnPerCell>,
}

#[derive(Clone, Debug)]
pub struct ServedPlmnPerCell {
    pub plm_id: String,
    pub per_qci_reports: Vec<PerQciReport>,
}

#[derive(Clone, Debug)]
pub struct PerQciReport {
    pub qci: i64,
    pub dl_prb_usage: i64,
    pub ul_prb_usage: i64,
}

/// Measurement names that carry an L3 RRC measurement payload and need
/// semantic routing into the serving or neighbor SINR sub-trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RrcMeasurementKind {
    ServingCellQuality,
    NeighbourCellQuality,
}

impl RrcMeasurementKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HO.SrcCellQual.RS-SINR.UEID" => Some(RrcMeasurementKind::ServingCellQuality),
            "HO.TrgtCellQual.RS-SINR.UEID" => Some(RrcMeasurementKind::NeighbourCellQuality),
            _ => None,
        }
    }
}

/// An encoded E2SM-KPM indication message.
pub struct KpmIndicationMessage {
    encoded: Vec<u8>,
}

impl KpmIndicationMessage {
    /// Assemble and encode the indication message.  UE indications take
    /// the Format 3 per-UE path; without them the flat Format 1 report
    /// is produced from the container values.
    pub fn new(
        values: IndicationMessageValues,
        params: &SubscriptionParameters,
        identity: &UeIdentityProvider,
        logger: &Logger,
    ) -> Self {
        let message = if values.ue_indications.is_empty() {
            build_format1(&values)
        } else {
            match build_format3(&values, params, identity, logger) {
                Some(format3) => format3,
                None => {
                    warn!(
                        logger,
                        "no usable UE measurement reports, falling back to the flat report"
                    );
                    build_format1(&values)
                }
            }
        };
        let encoded = message
            .into_bytes()
            .unwrap_or_else(|e| panic!("failed to encode E2SM-KPM-IndicationMessage: {e}"));
        KpmIndicationMessage { encoded }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.encoded
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.encoded
    }
}

/// Reinterpret the subject identifier as a 40-bit NG-AP AMF UE ID:
/// decimal strings are parsed, anything else folds its bytes.
fn derive_amf_ue_ngap_id(subject: &str) -> u64 {
    let raw = subject
        .parse::<u64>()
        .unwrap_or_else(|_| subject.bytes().fold(0u64, |acc, b| (acc << 8) | b as u64));
    raw & 0xff_ffff_ffff
}

fn build_format3(
    values: &IndicationMessageValues,
    params: &SubscriptionParameters,
    identity: &UeIdentityProvider,
    logger: &Logger,
) -> Option<E2SmKpmIndicationMessage> {
    let mut reports = Vec::new();
    for ue_indication in &values.ue_indications {
        let subject = ue_indication.subject_id();
        let mut info_items = Vec::new();
        let mut data_items = Vec::new();
        let mut push = |name: String, record: MeasurementRecordItem| {
            info_items.push(MeasurementInfoItem {
                meas_type: MeasurementType::Name(name),
            });
            data_items.push(MeasurementDataItem {
                meas_record: nonempty![record],
            });
        };
        for item in ue_indication.items() {
            match &item.value {
                MeasurementValue::Int(v) => {
                    push(item.name.clone(), MeasurementRecordItem::Integer(*v as u64))
                }
                MeasurementValue::Real(v) => {
                    push(item.name.clone(), MeasurementRecordItem::Real(*v))
                }
                MeasurementValue::NoValue => {
                    push(item.name.clone(), MeasurementRecordItem::NoValue)
                }
                MeasurementValue::Rrc(l3) => match RrcMeasurementKind::from_name(&item.name) {
                    Some(RrcMeasurementKind::ServingCellQuality) => {
                        append_serving_entries(l3, subject, &mut push, logger)
                    }
                    Some(RrcMeasurementKind::NeighbourCellQuality) => {
                        append_neighbour_entries(l3, subject, &mut push, logger)
                    }
                    None => {
                        warn!(logger, "unhandled RRC measurement name, skipping";
                            "name" => item.name.as_str());
                    }
                },
            }
        }
        let Some(meas_data) = asn1_per::NonEmpty::from_vec(data_items) else {
            warn!(logger, "UE indication produced no measurements, skipping";
                "subject" => subject);
            continue;
        };
        reports.push(UeMeasReportItem {
            ue_id: UeId {
                amf_ue_ngap_id: derive_amf_ue_ngap_id(subject),
                guami: identity.guami(),
                ran_ue_id: Some(identity.ran_ue_id),
            },
            meas_report: MeasurementReport {
                meas_data,
                meas_info_list: asn1_per::NonEmpty::from_vec(info_items),
                granul_period: Some(params.granularity()),
            },
        });
    }
    Some(E2SmKpmIndicationMessage::Format3(
        IndicationMessageFormat3 {
            ue_meas_report_list: asn1_per::NonEmpty::from_vec(reports)?,
        },
    ))
}

/// One data record per serving-cell measurement, renamed to embed the
/// cell and subject identities.
fn append_serving_entries(
    l3: &L3RrcMeasurements,
    subject: &str,
    push: &mut impl FnMut(String, MeasurementRecordItem),
    logger: &Logger,
) {
    let Some(ServingCellMeasurements::NrMeasResultServingMoList(list)) =
        &l3.serving_cell_measurements
    else {
        debug!(logger, "serving-cell report without NR serving MO list, skipping";
            "subject" => subject);
        return;
    };
    for mo in list {
        let Some(sinr) = mo
            .meas_result_serving_cell
            .cell_results
            .results_ssb_cell
            .as_ref()
            .and_then(|r| r.sinr)
        else {
            debug!(logger, "serving MO without an SSB SINR result, skipping";
                "serv_cell_id" => mo.serv_cell_id);
            continue;
        };
        push(
            format!("L3servingSINR3gpp_cell_{}_UEID_{}", mo.serv_cell_id, subject),
            MeasurementRecordItem::Integer(sinr as u64),
        );
    }
}

/// One data record per neighbor.  Neighbor cell IDs are negated in the
/// composite name as the sentinel distinguishing them from serving
/// entries; downstream consumers rely on the sign.
fn append_neighbour_entries(
    l3: &L3RrcMeasurements,
    subject: &str,
    push: &mut impl FnMut(String, MeasurementRecordItem),
    logger: &Logger,
) {
    let Some(MeasResultNeighCells::ListNr(list)) = &l3.meas_result_neigh_cells else {
        debug!(logger, "neighbor-cell report without an NR list, skipping";
            "subject" => subject);
        return;
    };
    for neigh in list {
        let Some(cell_id) = neigh.phys_cell_id else {
            debug!(logger, "neighbor entry without a cell id, skipping");
            continue;
        };
        let Some(sinr) = neigh
            .cell_results
            .results_ssb_cell
            .as_ref()
            .and_then(|r| r.sinr)
        else {
            debug!(logger, "neighbor entry without an SSB SINR result, skipping";
                "neigh_cell_id" => cell_id);
            continue;
        };
        push(
            format!("L3neighSINRListOf_UEID_{}_of_Cell_{}", subject, -cell_id),
            MeasurementRecordItem::Integer(sinr as u64),
        );
    }
}

fn build_format1(values: &IndicationMessageValues) -> E2SmKpmIndicationMessage {
    let performance_container = match &values.pm_container {
        PmContainerValues::CuUp(cu_up) => fill_o_cu_up_container(cu_up),
        PmContainerValues::CuCp(cu_cp) => fill_o_cu_cp_container(cu_cp),
        PmContainerValues::Du(du) => fill_o_du_container(du),
    };
    let list_of_pm_information = values.cell_measurement_items.as_ref().and_then(|items| {
        asn1_per::NonEmpty::from_vec(
            items
                .items()
                .iter()
                .map(|item| PmInfoItem {
                    pm_type: MeasurementType::Name(item.name.clone()),
                    pm_val: item.value.clone(),
                })
                .collect(),
        )
    });
    E2SmKpmIndicationMessage::Format1(IndicationMessageFormat1 {
        pm_containers: nonempty![PmContainersItem {
            performance_container: Some(performance_container),
            the_ran_container: None,
        }],
        cell_object_id: values.cell_object_id.clone(),
        list_of_pm_information,
    })
}

fn fill_o_cu_up_container(values: &CuUpContainerValues) -> PfContainer {
    PfContainer::OCuUp(OCuUpPfContainer {
        gnb_cu_up_name: None,
        pf_container_list: nonempty![PfContainerListItem {
            interface_type: NiType::X2U,
            o_cu_up_pm_container: CuUpMeasurementContainer {
                plmn_list: nonempty![PlmnIdItem {
                    plmn_identity: PlmnIdentity::from_str_bytes(&values.plm_id),
                    cu_up_pm_epc: Some(EpcCuUpPmFormat {
                        per_qci_report_list: nonempty![PerQciReportItemFormat {
                            drbqci: 0,
                            pdcp_bytes_dl: Some(values.pdcp_bytes_dl),
                            pdcp_bytes_ul: Some(values.pdcp_bytes_ul),
                        }],
                    }),
                }],
            },
        }],
    })
}

fn fill_o_cu_cp_container(values: &CuCpContainerValues) -> PfContainer {
    PfContainer::OCuCp(OCuCpPfContainer {
        gnb_cu_cp_name: None,
        number_of_active_ues: Some(values.num_active_ues),
    })
}

fn fill_o_du_container(values: &DuContainerValues) -> PfContainer {
    let reports = values
        .cell_resource_reports
        .iter()
        .map(|report| {
            let served = report
                .served_plmn_per_cell
                .iter()
                .map(|served| {
                    let qci_reports = served
                        .per_qci_reports
                        .iter()
                        .map(|qci| {
                            assert!(
                                (0..=100).contains(&qci.dl_prb_usage),
                                "DL PRB usage {} outside [0, 100]",
                                qci.dl_prb_usage
                            );
                            assert!(
                                (0..=100).contains(&qci.ul_prb_usage),
                                "UL PRB usage {} outside [0, 100]",
                                qci.ul_prb_usage
                            );
                            PerQciReportItem {
                                qci: qci.qci,
                                dl_prb_usage: Some(qci.dl_prb_usage),
                                ul_prb_usage: Some(qci.ul_prb_usage),
                            }
                        })
                        .collect::<Vec<_>>();
                    ServedPlmnPerCellListItem {
                        plmn_identity: PlmnIdentity::from_str_bytes(&served.plm_id),
                        du_pm_epc: asn1_per::NonEmpty::from_vec(qci_reports)
                            .map(|per_qci_report_list| EpcDuPmContainer {
                                per_qci_report_list,
                            }),
                    }
                })
                .collect::<Vec<_>>();
            CellResourceReportListItem {
                nrcgi: NrCgi {
                    plmn_identity: PlmnIdentity::from_str_bytes(&report.plm_id),
                    nr_cell_identity: ids::nr_cell_id(report.nr_cell_id),
                },
                dl_total_of_available_prbs: Some(report.dl_available_prbs),
                ul_total_of_available_prbs: Some(report.ul_available_prbs),
                served_plmn_per_cell_list: asn1_per::NonEmpty::from_vec(served)
                    .expect("DU cell resource report needs at least one served PLMN"),
            }
        })
        .collect::<Vec<_>>();
    PfContainer::ODu(ODuPfContainer {
        cell_resource_report_list: asn1_per::NonEmpty::from_vec(reports)
            .expect("DU container needs at least one cell resource report"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slog::o;

    fn discard_logger() -> Logger {
        Logger::root(slog::Discard, o!())
    }

    fn test_identity() -> UeIdentityProvider {
        UeIdentityProvider::new(PlmnIdentity::from_str_bytes("111"), 1, 1, 0, [7u8; 8])
    }

    #[test]
    fn header_arm_matches_the_node_type() {
        let logger = discard_logger();
        let values = IndicationHeaderValues {
            gnb_id: 1,
            nr_cell_id: 2,
            plm_id: "111".to_string(),
            timestamp: 1_000_000,
        };
        for (node_type, want_gnb_arm) in [
            (NodeType::Gnb, true),
            (NodeType::EnGnb, true),
            (NodeType::NgEnb, false),
            (NodeType::Enb, false),
        ] {
            let header = KpmIndicationHeader::new(node_type, &values, &logger);
            assert!(!header.bytes().is_empty());
            let decoded = E2SmKpmIndicationHeader::from_bytes(header.bytes()).unwrap();
            let E2SmKpmIndicationHeader::Format1(format) = decoded;
            assert_eq!(format.collection_start_time.as_micros(), 1_000_000);
            let is_gnb_arm = matches!(
                format.global_e2node_id,
                GlobalE2NodeId::Gnb(_) | GlobalE2NodeId::EnGnb(_)
            );
            assert_eq!(is_gnb_arm, want_gnb_arm, "{node_type:?}");
        }
    }

    #[test]
    fn ue_indications_select_format3() {
        let logger = discard_logger();
        let mut ue = MeasurementItemList::new_for_subject("0042");
        ue.add_item("DRB.UEThpDl.UEID", MeasurementValue::Real(12.5));
        ue.add_item("RRU.PrbUsedDl.UEID", MeasurementValue::Int(30));
        let message = KpmIndicationMessage::new(
            IndicationMessageValues {
                cell_object_id: "NRCellCU".to_string(),
                pm_container: PmContainerValues::CuCp(CuCpContainerValues { num_active_ues: 1 }),
                cell_measurement_items: None,
                ue_indications: vec![ue],
            },
            &SubscriptionParameters::default(),
            &test_identity(),
            &logger,
        );
        let decoded = E2SmKpmIndicationMessage::from_bytes(message.bytes()).unwrap();
        let E2SmKpmIndicationMessage::Format3(format) = decoded else {
            panic!("expected Format 3");
        };
        assert_eq!(format.ue_meas_report_list.len(), 1);
        let report = &format.ue_meas_report_list.first().meas_report;
        assert_eq!(report.meas_data.len(), 2);
        assert_eq!(report.granul_period, Some(100));
        assert_eq!(
            format.ue_meas_report_list.first().ue_id.amf_ue_ngap_id,
            42
        );
    }

    #[test]
    fn rrc_measurements_are_renamed_per_cell() {
        let logger = discard_logger();
        let serving = crate::rrc_measurements::ue_specific_sinr_serving(2, 2, 90);
        let mut neigh = crate::rrc_measurements::ue_specific_sinr_neigh();
        crate::rrc_measurements::add_neighbour_cell_measurement(&mut neigh, 3, 55, &logger);
        crate::rrc_measurements::add_neighbour_cell_measurement(&mut neigh, 4, 50, &logger);

        let mut ue = MeasurementItemList::new_for_subject("0007");
        ue.add_item("HO.SrcCellQual.RS-SINR.UEID", MeasurementValue::Rrc(serving));
        ue.add_item("HO.TrgtCellQual.RS-SINR.UEID", MeasurementValue::Rrc(neigh));

        let message = KpmIndicationMessage::new(
            IndicationMessageValues {
                cell_object_id: "NRCellCU".to_string(),
                pm_container: PmContainerValues::CuCp(CuCpContainerValues { num_active_ues: 1 }),
                cell_measurement_items: None,
                ue_indications: vec![ue],
            },
            &SubscriptionParameters::default(),
            &test_identity(),
            &logger,
        );
        let decoded = E2SmKpmIndicationMessage::from_bytes(message.bytes()).unwrap();
        let E2SmKpmIndicationMessage::Format3(format) = decoded else {
            panic!("expected Format 3");
        };
        let report = &format.ue_meas_report_list.first().meas_report;
        let names: Vec<String> = report
            .meas_info_list
            .as_ref()
            .unwrap()
            .iter()
            .map(|info| match &info.meas_type {
                MeasurementType::Name(name) => name.clone(),
                MeasurementType::Id(id) => id.to_string(),
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "L3servingSINR3gpp_cell_2_UEID_0007",
                "L3neighSINRListOf_UEID_0007_of_Cell_-3",
                "L3neighSINRListOf_UEID_0007_of_Cell_-4",
            ]
        );
        assert_eq!(report.meas_data.len(), 3);
    }

    #[test]
    fn no_ue_indications_selects_format1() {
        let logger = discard_logger();
        let message = KpmIndicationMessage::new(
            IndicationMessageValues {
                cell_object_id: "NRCellCU".to_string(),
                pm_container: PmContainerValues::CuCp(CuCpContainerValues {
                    num_active_ues: 100,
                }),
                cell_measurement_items: None,
                ue_indications: vec![],
            },
            &SubscriptionParameters::default(),
            &test_identity(),
            &logger,
        );
        let decoded = E2SmKpmIndicationMessage::from_bytes(message.bytes()).unwrap();
        let E2SmKpmIndicationMessage::Format1(format) = decoded else {
            panic!("expected Format 1");
        };
        assert_eq!(format.cell_object_id, "NRCellCU");
        let Some(PfContainer::OCuCp(cu_cp)) =
            &format.pm_containers.first().performance_container
        else {
            panic!("expected CU-CP container");
        };
        assert_eq!(cu_cp.number_of_active_ues, Some(100));
    }

    #[test]
    #[should_panic(expected = "outside [0, 100]")]
    fn prb_usage_above_100_is_fatal() {
        fill_o_du_container(&DuContainerValues {
            cell_resource_reports: vec![CellResourceReport {
                plm_id: "111".to_string(),
                nr_cell_id: 1,
                dl_available_prbs: 50,
                ul_available_prbs: 50,
                served_plmn_per_cell: vec![ServedPlmnPerCell {
                    plm_id: "111".to_string(),
                    per_qci_reports: vec![PerQciReport {
                        qci: 1,
                        dl_prb_usage: 101,
                        ul_prb_usage: 1,
                    }],
                }],
            }],
        });
    }

    #[test]
    #[should_panic(expected = "outside [0, 100]")]
    fn negative_prb_usage_is_fatal() {
        fill_o_du_container(&DuContainerValues {
            cell_resource_reports: vec![CellResourceReport {
                plm_id: "111".to_string(),
                nr_cell_id: 1,
                dl_available_prbs: 50,
                ul_available_prbs: 50,
                served_plmn_per_cell: vec![ServedPlmnPerCell {
                    plm_id: "111".to_string(),
                    per_qci_reports: vec![PerQciReport {
                        qci: 1,
                        dl_prb_usage: 1,
                        ul_prb_usage: -1,
                    }],
                }],
            }],
        });
    }

    #[test]
    fn subject_ids_fold_to_forty_bits() {
        assert_eq!(derive_amf_ue_ngap_id("42"), 42);
        assert_eq!(derive_amf_ue_ngap_id("0007"), 7);
        // non-decimal subjects fold their bytes, masked to 40 bits
        let folded = derive_amf_ue_ngap_id("ue-x");
        assert!(folded < 1 << 40);
        assert_ne!(folded, 0);
    }
}
