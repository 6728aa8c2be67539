//! rrc - L3 RRC measurement subset carried inside KPM measurement values
//!
//! Models the L3-RRC-Measurements tree used for handover/SINR reporting:
//! an RRC event, optional serving-cell measurements and optional
//! neighbor-cell lists, with the per-cell SSB/CSI-RS quantity results.

use asn1_per::*;

/// Neighbor lists are capped at 8 entries by the standard.
pub const MAX_NEIGHBOUR_MEAS_ITEMS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RrcEvent {
    B1 = 0,
    A3 = 1,
    A5 = 2,
    Periodic = 3,
}

impl AperCodec for RrcEvent {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_enumerated(data, 0, 3, true, u8::from(*self) as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let raw = decode_enumerated(data, 0, 3, true)?;
        RrcEvent::try_from(raw as u8).map_err(|_| PerCodecError::InvalidEnumerated(raw as u128))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct L3RrcMeasurements {
    pub rrc_event: RrcEvent,
    pub serving_cell_measurements: Option<ServingCellMeasurements>,
    pub meas_result_neigh_cells: Option<MeasResultNeighCells>,
}

impl L3RrcMeasurements {
    pub fn new(rrc_event: RrcEvent) -> Self {
        L3RrcMeasurements {
            rrc_event,
            serving_cell_measurements: None,
            meas_result_neigh_cells: None,
        }
    }
}

impl AperCodec for L3RrcMeasurements {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[
                self.serving_cell_measurements.is_some(),
                self.meas_result_neigh_cells.is_some(),
            ],
        )?;
        self.rrc_event.aper_encode(data)?;
        if let Some(serving) = &self.serving_cell_measurements {
            serving.aper_encode(data)?;
        }
        if let Some(neigh) = &self.meas_result_neigh_cells {
            neigh.aper_encode(data)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(L3RrcMeasurements {
            rrc_event: RrcEvent::aper_decode(data)?,
            serving_cell_measurements: if optionals[0] {
                Some(ServingCellMeasurements::aper_decode(data)?)
            } else {
                None
            },
            meas_result_neigh_cells: if optionals[1] {
                Some(MeasResultNeighCells::aper_decode(data)?)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ServingCellMeasurements {
    /// NR serving cells, one entry per serving measurement object.
    NrMeasResultServingMoList(NonEmpty<MeasResultServMo>),
    /// EUTRA primary cell arm.
    EutraMeasResultPCell(MeasResultPCell),
}

impl AperCodec for ServingCellMeasurements {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            ServingCellMeasurements::NrMeasResultServingMoList(list) => {
                encode_choice_idx(data, 0, 1, true, 0)?;
                encode_nonempty(data, 32, list)
            }
            ServingCellMeasurements::EutraMeasResultPCell(pcell) => {
                encode_choice_idx(data, 0, 1, true, 1)?;
                pcell.aper_encode(data)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 1, true)? {
            0 => Ok(ServingCellMeasurements::NrMeasResultServingMoList(
                decode_nonempty(data, 32)?,
            )),
            1 => Ok(ServingCellMeasurements::EutraMeasResultPCell(
                MeasResultPCell::aper_decode(data)?,
            )),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasResultServMo {
    /// ServCellIndex, INTEGER (0..31).
    pub serv_cell_id: i64,
    pub meas_result_serving_cell: MeasResultNr,
    pub meas_result_best_neigh_cell: Option<MeasResultNr>,
}

impl AperCodec for MeasResultServMo {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.meas_result_best_neigh_cell.is_some()])?;
        encode_integer(data, Some(0), Some(31), false, self.serv_cell_id as i128)?;
        self.meas_result_serving_cell.aper_encode(data)?;
        if let Some(best_neigh) = &self.meas_result_best_neigh_cell {
            best_neigh.aper_encode(data)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(MeasResultServMo {
            serv_cell_id: decode_integer(data, Some(0), Some(31), false)? as i64,
            meas_result_serving_cell: MeasResultNr::aper_decode(data)?,
            meas_result_best_neigh_cell: if optionals[0] {
                Some(MeasResultNr::aper_decode(data)?)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasResultNr {
    /// PhysCellId, INTEGER (0..1007).
    pub phys_cell_id: Option<i64>,
    pub cell_results: CellResults,
}

impl AperCodec for MeasResultNr {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.phys_cell_id.is_some()])?;
        if let Some(id) = self.phys_cell_id {
            encode_integer(data, Some(0), Some(1007), false, id as i128)?;
        }
        self.cell_results.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(MeasResultNr {
            phys_cell_id: if optionals[0] {
                Some(decode_integer(data, Some(0), Some(1007), false)? as i64)
            } else {
                None
            },
            cell_results: CellResults::aper_decode(data)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellResults {
    pub results_ssb_cell: Option<MeasQuantityResults>,
    pub results_csi_rs_cell: Option<MeasQuantityResults>,
}

impl AperCodec for CellResults {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[
                self.results_ssb_cell.is_some(),
                self.results_csi_rs_cell.is_some(),
            ],
        )?;
        if let Some(ssb) = &self.results_ssb_cell {
            ssb.aper_encode(data)?;
        }
        if let Some(csi_rs) = &self.results_csi_rs_cell {
            csi_rs.aper_encode(data)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(CellResults {
            results_ssb_cell: if optionals[0] {
                Some(MeasQuantityResults::aper_decode(data)?)
            } else {
                None
            },
            results_csi_rs_cell: if optionals[1] {
                Some(MeasQuantityResults::aper_decode(data)?)
            } else {
                None
            },
        })
    }
}

/// RSRP/RSRQ/SINR report ranges per 3GPP TS 38.331.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasQuantityResults {
    pub rsrp: Option<i64>, // (0..127)
    pub rsrq: Option<i64>, // (0..127)
    pub sinr: Option<i64>, // (0..127)
}

impl AperCodec for MeasQuantityResults {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[self.rsrp.is_some(), self.rsrq.is_some(), self.sinr.is_some()],
        )?;
        for value in [self.rsrp, self.rsrq, self.sinr].into_iter().flatten() {
            encode_integer(data, Some(0), Some(127), false, value as i128)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 3)?;
        let mut values = [None, None, None];
        for (i, present) in optionals.iter().enumerate() {
            if *present {
                values[i] = Some(decode_integer(data, Some(0), Some(127), false)? as i64);
            }
        }
        Ok(MeasQuantityResults {
            rsrp: values[0],
            rsrq: values[1],
            sinr: values[2],
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MeasResultNeighCells {
    ListNr(NonEmpty<MeasResultNr>),
    ListEutra(NonEmpty<MeasResultEutra>),
}

impl AperCodec for MeasResultNeighCells {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            MeasResultNeighCells::ListNr(list) => {
                encode_choice_idx(data, 0, 1, true, 0)?;
                encode_nonempty(data, MAX_NEIGHBOUR_MEAS_ITEMS, list)
            }
            MeasResultNeighCells::ListEutra(list) => {
                encode_choice_idx(data, 0, 1, true, 1)?;
                encode_nonempty(data, MAX_NEIGHBOUR_MEAS_ITEMS, list)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 1, true)? {
            0 => Ok(MeasResultNeighCells::ListNr(decode_nonempty(
                data,
                MAX_NEIGHBOUR_MEAS_ITEMS,
            )?)),
            1 => Ok(MeasResultNeighCells::ListEutra(decode_nonempty(
                data,
                MAX_NEIGHBOUR_MEAS_ITEMS,
            )?)),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasResultEutra {
    /// EUTRA PhysCellId, INTEGER (0..503).
    pub phys_cell_id: i64,
    pub rsrp: Option<i64>,
    pub rsrq: Option<i64>,
    pub sinr: Option<i64>,
}

impl AperCodec for MeasResultEutra {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[self.rsrp.is_some(), self.rsrq.is_some(), self.sinr.is_some()],
        )?;
        encode_integer(data, Some(0), Some(503), false, self.phys_cell_id as i128)?;
        for value in [self.rsrp, self.rsrq, self.sinr].into_iter().flatten() {
            encode_integer(data, Some(0), Some(127), false, value as i128)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 3)?;
        let phys_cell_id = decode_integer(data, Some(0), Some(503), false)? as i64;
        let mut values = [None, None, None];
        for (i, present) in optionals.iter().enumerate() {
            if *present {
                values[i] = Some(decode_integer(data, Some(0), Some(127), false)? as i64);
            }
        }
        Ok(MeasResultEutra {
            phys_cell_id,
            rsrp: values[0],
            rsrq: values[1],
            sinr: values[2],
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasResultPCell {
    /// EUTRA PhysCellId, INTEGER (0..503).
    pub eutra_phys_cell_id: i64,
    pub rsrp_result: i64, // (0..97)
    pub rsrq_result: i64, // (0..34)
}

impl AperCodec for MeasResultPCell {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_integer(data, Some(0), Some(503), false, self.eutra_phys_cell_id as i128)?;
        encode_integer(data, Some(0), Some(97), false, self.rsrp_result as i128)?;
        encode_integer(data, Some(0), Some(34), false, self.rsrq_result as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(MeasResultPCell {
            eutra_phys_cell_id: decode_integer(data, Some(0), Some(503), false)? as i64,
            rsrp_result: decode_integer(data, Some(0), Some(97), false)? as i64,
            rsrq_result: decode_integer(data, Some(0), Some(34), false)? as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l3_measurements_round_trip() {
        let l3 = L3RrcMeasurements {
            rrc_event: RrcEvent::B1,
            serving_cell_measurements: Some(ServingCellMeasurements::NrMeasResultServingMoList(
                nonempty![MeasResultServMo {
                    serv_cell_id: 3,
                    meas_result_serving_cell: MeasResultNr {
                        phys_cell_id: Some(3),
                        cell_results: CellResults {
                            results_ssb_cell: Some(MeasQuantityResults {
                                rsrp: None,
                                rsrq: None,
                                sinr: Some(87),
                            }),
                            results_csi_rs_cell: None,
                        },
                    },
                    meas_result_best_neigh_cell: None,
                }],
            )),
            meas_result_neigh_cells: Some(MeasResultNeighCells::ListNr(nonempty![
                MeasResultNr {
                    phys_cell_id: Some(5),
                    cell_results: CellResults {
                        results_ssb_cell: Some(MeasQuantityResults {
                            rsrp: None,
                            rsrq: None,
                            sinr: Some(60),
                        }),
                        results_csi_rs_cell: None,
                    },
                },
                MeasResultNr {
                    phys_cell_id: Some(6),
                    cell_results: CellResults {
                        results_ssb_cell: Some(MeasQuantityResults {
                            rsrp: None,
                            rsrq: None,
                            sinr: Some(45),
                        }),
                        results_csi_rs_cell: None,
                    },
                }
            ])),
        };
        let bytes = l3.clone().into_bytes().unwrap();
        assert_eq!(L3RrcMeasurements::from_bytes(&bytes).unwrap(), l3);
    }

    #[test]
    fn eutra_pcell_round_trips() {
        let l3 = L3RrcMeasurements {
            rrc_event: RrcEvent::Periodic,
            serving_cell_measurements: Some(ServingCellMeasurements::EutraMeasResultPCell(
                MeasResultPCell {
                    eutra_phys_cell_id: 100,
                    rsrp_result: 80,
                    rsrq_result: 30,
                },
            )),
            meas_result_neigh_cells: None,
        };
        let bytes = l3.clone().into_bytes().unwrap();
        assert_eq!(L3RrcMeasurements::from_bytes(&bytes).unwrap(), l3);
    }
}
