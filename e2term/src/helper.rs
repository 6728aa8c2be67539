//! helper - staged assembly of indication message values
//!
//! One helper instance per report cycle: construct it for the node kind,
//! run the fill routine for the PM container, add per-UE and per-cell
//! items, then turn it into an encoded message.  The reduced-PM flag
//! suppresses the bulky item sets and keeps only the headline values.

use crate::indication::{
    CellResourceReport, CuCpContainerValues, CuUpContainerValues, DuContainerValues,
    IndicationMessageValues, KpmIndicationMessage, PmContainerValues, SubscriptionParameters,
    UeIdentityProvider,
};
use crate::measurement::MeasurementItemList;
use e2sm::{L3RrcMeasurements, MeasurementValue};
use slog::Logger;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicationMessageKind {
    CuUp,
    CuCp,
    Du,
}

/// Downlink MAC statistics for one UE, in report units.
#[derive(Clone, Debug, Default)]
pub struct DuUePmValues {
    pub mac_pdu: i64,
    pub mac_pdu_initial: i64,
    pub mac_qpsk: i64,
    pub mac_16qam: i64,
    pub mac_64qam: i64,
    pub mac_retx: i64,
    pub mac_volume: i64,
    pub mac_prb: f64,
    pub mcs_bin1: i64,
    pub mcs_bin2: i64,
    pub mcs_bin3: i64,
    pub mcs_bin4: i64,
    pub mcs_bin5: i64,
    pub mcs_bin6: i64,
    pub sinr_bin1: i64,
    pub sinr_bin2: i64,
    pub sinr_bin3: i64,
    pub sinr_bin4: i64,
    pub sinr_bin5: i64,
    pub sinr_bin6: i64,
    pub sinr_bin7: i64,
    pub rlc_buffer_occupancy: i64,
    pub drb_throughput_dl: f64,
}

/// Cell-wide counterparts of [`DuUePmValues`].
#[derive(Clone, Debug, Default)]
pub struct DuCellPmValues {
    pub mac_pdu: i64,
    pub mac_pdu_initial: i64,
    pub mac_qpsk: i64,
    pub mac_16qam: i64,
    pub mac_64qam: i64,
    pub prb_utilization_dl: f64,
    pub mac_retx: i64,
    pub mac_volume: i64,
    pub mcs_bin1: i64,
    pub mcs_bin2: i64,
    pub mcs_bin3: i64,
    pub mcs_bin4: i64,
    pub mcs_bin5: i64,
    pub mcs_bin6: i64,
    pub sinr_bin1: i64,
    pub sinr_bin2: i64,
    pub sinr_bin3: i64,
    pub sinr_bin4: i64,
    pub sinr_bin5: i64,
    pub sinr_bin6: i64,
    pub sinr_bin7: i64,
    pub rlc_buffer_occupancy: i64,
    pub mean_active_ue_dl: i64,
}

pub struct IndicationMessageHelper {
    kind: IndicationMessageKind,
    reduced_pm_values: bool,
    cell_object_id: String,
    pm_container: Option<PmContainerValues>,
    du_cell_resource_reports: Vec<CellResourceReport>,
    cell_measurement_items: Option<MeasurementItemList>,
    ue_indications: Vec<MeasurementItemList>,
}

impl IndicationMessageHelper {
    pub fn new(kind: IndicationMessageKind, reduced_pm_values: bool) -> Self {
        IndicationMessageHelper {
            kind,
            reduced_pm_values,
            // CU-CP reports always refer to the NR cell CU function
            cell_object_id: match kind {
                IndicationMessageKind::CuCp => "NRCellCU".to_string(),
                _ => String::new(),
            },
            pm_container: None,
            du_cell_resource_reports: Vec::new(),
            cell_measurement_items: None,
            ue_indications: Vec::new(),
        }
    }

    pub fn fill_cu_up_values(&mut self, plm_id: impl Into<String>) {
        assert_eq!(
            self.kind,
            IndicationMessageKind::CuUp,
            "wrong fill routine for this helper"
        );
        self.pm_container = Some(PmContainerValues::CuUp(CuUpContainerValues {
            plm_id: plm_id.into(),
            pdcp_bytes_dl: 0,
            pdcp_bytes_ul: 0,
        }));
    }

    pub fn fill_cu_cp_values(&mut self, num_active_ues: u16) {
        assert_eq!(
            self.kind,
            IndicationMessageKind::CuCp,
            "wrong fill routine for this helper"
        );
        self.pm_container = Some(PmContainerValues::CuCp(CuCpContainerValues {
            num_active_ues: num_active_ues as i64,
        }));
    }

    pub fn fill_du_values(&mut self, cell_object_id: impl Into<String>) {
        assert_eq!(
            self.kind,
            IndicationMessageKind::Du,
            "wrong fill routine for this helper"
        );
        self.cell_object_id = cell_object_id.into();
        self.pm_container = Some(PmContainerValues::Du(DuContainerValues {
            cell_resource_reports: std::mem::take(&mut self.du_cell_resource_reports),
        }));
    }

    /// Queue a DU cell resource report; [`Self::fill_du_values`] moves
    /// the queued reports into the container.
    pub fn add_du_cell_res_rep_pm_item(&mut self, report: CellResourceReport) {
        self.du_cell_resource_reports.push(report);
    }

    pub fn add_cu_up_ue_pm_item(
        &mut self,
        subject: impl Into<String>,
        tx_pdcp_pdu_bytes_nr_rlc: i64,
        tx_pdcp_pdu_nr_rlc: i64,
    ) {
        let mut ue = MeasurementItemList::new_for_subject(subject);
        if !self.reduced_pm_values {
            // PDCP PDU volume split with the NR leg, in kbit
            ue.add_item(
                "QosFlow.PdcpPduVolumeDL_Filter.UEID",
                MeasurementValue::Int(tx_pdcp_pdu_bytes_nr_rlc),
            );
            ue.add_item(
                "DRB.PdcpPduNbrDl.Qos.UEID",
                MeasurementValue::Int(tx_pdcp_pdu_nr_rlc),
            );
        }
        self.ue_indications.push(ue);
    }

    pub fn add_cu_cp_ue_pm_item(
        &mut self,
        subject: impl Into<String>,
        num_drb: i64,
        drb_rel_act: i64,
        serving: L3RrcMeasurements,
        neigh: L3RrcMeasurements,
    ) {
        let mut ue = MeasurementItemList::new_for_subject(subject);
        if !self.reduced_pm_values {
            ue.add_item("DRB.EstabSucc.5QI.UEID", MeasurementValue::Int(num_drb));
            ue.add_item("DRB.RelActNbr.5QI.UEID", MeasurementValue::Int(drb_rel_act));
        }
        ue.add_item("HO.SrcCellQual.RS-SINR.UEID", MeasurementValue::Rrc(serving));
        ue.add_item("HO.TrgtCellQual.RS-SINR.UEID", MeasurementValue::Rrc(neigh));
        self.ue_indications.push(ue);
    }

    pub fn add_du_ue_pm_item(&mut self, subject: impl Into<String>, values: DuUePmValues) {
        let mut ue = MeasurementItemList::new_for_subject(subject);
        if !self.reduced_pm_values {
            ue.add_item("TB.TotNbrDl.1.UEID", MeasurementValue::Int(values.mac_pdu));
            ue.add_item(
                "TB.TotNbrDlInitial.UEID",
                MeasurementValue::Int(values.mac_pdu_initial),
            );
            ue.add_item(
                "TB.TotNbrDlInitial.Qpsk.UEID",
                MeasurementValue::Int(values.mac_qpsk),
            );
            ue.add_item(
                "TB.TotNbrDlInitial.16Qam.UEID",
                MeasurementValue::Int(values.mac_16qam),
            );
            ue.add_item(
                "TB.TotNbrDlInitial.64Qam.UEID",
                MeasurementValue::Int(values.mac_64qam),
            );
            ue.add_item(
                "TB.ErrTotalNbrDl.1.UEID",
                MeasurementValue::Int(values.mac_retx),
            );
            ue.add_item(
                "QosFlow.PdcpPduVolumeDL_Filter.UEID",
                MeasurementValue::Int(values.mac_volume),
            );
            ue.add_item(
                "RRU.PrbUsedDl.UEID",
                MeasurementValue::Int(values.mac_prb.ceil() as i64),
            );
            ue.add_item(
                "CARR.PDSCHMCSDist.Bin1.UEID",
                MeasurementValue::Int(values.mcs_bin1),
            );
            ue.add_item(
                "CARR.PDSCHMCSDist.Bin2.UEID",
                MeasurementValue::Int(values.mcs_bin2),
            );
            ue.add_item(
                "CARR.PDSCHMCSDist.Bin3.UEID",
                MeasurementValue::Int(values.mcs_bin3),
            );
            ue.add_item(
                "CARR.PDSCHMCSDist.Bin4.UEID",
                MeasurementValue::Int(values.mcs_bin4),
            );
            ue.add_item(
                "CARR.PDSCHMCSDist.Bin5.UEID",
                MeasurementValue::Int(values.mcs_bin5),
            );
            ue.add_item(
                "CARR.PDSCHMCSDist.Bin6.UEID",
                MeasurementValue::Int(values.mcs_bin6),
            );
            ue.add_item(
                "L1M.RS-SINR.Bin34.UEID",
                MeasurementValue::Int(values.sinr_bin1),
            );
            ue.add_item(
                "L1M.RS-SINR.Bin46.UEID",
                MeasurementValue::Int(values.sinr_bin2),
            );
            ue.add_item(
                "L1M.RS-SINR.Bin58.UEID",
                MeasurementValue::Int(values.sinr_bin3),
            );
            ue.add_item(
                "L1M.RS-SINR.Bin70.UEID",
                MeasurementValue::Int(values.sinr_bin4),
            );
            ue.add_item(
                "L1M.RS-SINR.Bin82.UEID",
                MeasurementValue::Int(values.sinr_bin5),
            );
            ue.add_item(
                "L1M.RS-SINR.Bin94.UEID",
                MeasurementValue::Int(values.sinr_bin6),
            );
            ue.add_item(
                "L1M.RS-SINR.Bin127.UEID",
                MeasurementValue::Int(values.sinr_bin7),
            );
            ue.add_item(
                "DRB.BufferSize.Qos.UEID",
                MeasurementValue::Int(values.rlc_buffer_occupancy),
            );
        }
        ue.add_item(
            "DRB.UEThpDl.UEID",
            MeasurementValue::Real(values.drb_throughput_dl),
        );
        self.ue_indications.push(ue);
    }

    pub fn add_du_cell_pm_item(&mut self, values: DuCellPmValues) {
        let mut cell = MeasurementItemList::new();
        if !self.reduced_pm_values {
            cell.add_item("TB.TotNbrDl.1", MeasurementValue::Int(values.mac_pdu));
            cell.add_item(
                "TB.TotNbrDlInitial",
                MeasurementValue::Int(values.mac_pdu_initial),
            );
        }
        cell.add_item(
            "TB.TotNbrDlInitial.Qpsk",
            MeasurementValue::Int(values.mac_qpsk),
        );
        cell.add_item(
            "TB.TotNbrDlInitial.16Qam",
            MeasurementValue::Int(values.mac_16qam),
        );
        cell.add_item(
            "TB.TotNbrDlInitial.64Qam",
            MeasurementValue::Int(values.mac_64qam),
        );
        cell.add_item(
            "RRU.PrbUsedDl",
            MeasurementValue::Int(values.prb_utilization_dl.ceil() as i64),
        );
        if !self.reduced_pm_values {
            cell.add_item("TB.ErrTotalNbrDl.1", MeasurementValue::Int(values.mac_retx));
            cell.add_item(
                "QosFlow.PdcpPduVolumeDL_Filter",
                MeasurementValue::Int(values.mac_volume),
            );
            cell.add_item(
                "CARR.PDSCHMCSDist.Bin1",
                MeasurementValue::Int(values.mcs_bin1),
            );
            cell.add_item(
                "CARR.PDSCHMCSDist.Bin2",
                MeasurementValue::Int(values.mcs_bin2),
            );
            cell.add_item(
                "CARR.PDSCHMCSDist.Bin3",
                MeasurementValue::Int(values.mcs_bin3),
            );
            cell.add_item(
                "CARR.PDSCHMCSDist.Bin4",
                MeasurementValue::Int(values.mcs_bin4),
            );
            cell.add_item(
                "CARR.PDSCHMCSDist.Bin5",
                MeasurementValue::Int(values.mcs_bin5),
            );
            cell.add_item(
                "CARR.PDSCHMCSDist.Bin6",
                MeasurementValue::Int(values.mcs_bin6),
            );
            cell.add_item("L1M.RS-SINR.Bin34", MeasurementValue::Int(values.sinr_bin1));
            cell.add_item("L1M.RS-SINR.Bin46", MeasurementValue::Int(values.sinr_bin2));
            cell.add_item("L1M.RS-SINR.Bin58", MeasurementValue::Int(values.sinr_bin3));
            cell.add_item("L1M.RS-SINR.Bin70", MeasurementValue::Int(values.sinr_bin4));
            cell.add_item("L1M.RS-SINR.Bin82", MeasurementValue::Int(values.sinr_bin5));
            cell.add_item("L1M.RS-SINR.Bin94", MeasurementValue::Int(values.sinr_bin6));
            cell.add_item(
                "L1M.RS-SINR.Bin127",
                MeasurementValue::Int(values.sinr_bin7),
            );
            cell.add_item(
                "DRB.BufferSize.Qos",
                MeasurementValue::Int(values.rlc_buffer_occupancy),
            );
        }
        cell.add_item(
            "DRB.MeanActiveUeDl",
            MeasurementValue::Int(values.mean_active_ue_dl),
        );
        self.cell_measurement_items = Some(cell);
    }

    /// The accumulated values.  The matching fill routine must have run.
    pub fn into_values(self) -> IndicationMessageValues {
        IndicationMessageValues {
            cell_object_id: self.cell_object_id,
            pm_container: self
                .pm_container
                .expect("fill routine not called before building the message"),
            cell_measurement_items: self.cell_measurement_items,
            ue_indications: self.ue_indications,
        }
    }

    /// Build and encode the indication message from the accumulated
    /// values, consuming the helper.
    pub fn into_message(
        self,
        params: &SubscriptionParameters,
        identity: &UeIdentityProvider,
        logger: &Logger,
    ) -> KpmIndicationMessage {
        KpmIndicationMessage::new(self.into_values(), params, identity, logger)
    }
}
