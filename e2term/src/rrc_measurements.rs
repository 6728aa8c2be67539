//! rrc_measurements - convenience constructors for UE-specific SINR reports

use e2sm::{
    CellResults, L3RrcMeasurements, MAX_NEIGHBOUR_MEAS_ITEMS, MeasQuantityResults,
    MeasResultNeighCells, MeasResultNr, MeasResultServMo, RrcEvent, ServingCellMeasurements,
};
use slog::{Logger, error};

/// Map an SINR in dB onto the 3GPP TS 38.133 report range: [-23, 40] dB
/// maps linearly onto [0, 127], clamped at both ends.
pub fn three_gpp_map_sinr(sinr_db: f64) -> i64 {
    let input_start = -23.0;
    let input_end = 40.0;
    let output_end = 127.0;
    let slope = output_end / (input_end - input_start);
    if sinr_db < input_start {
        0
    } else if sinr_db > input_end {
        output_end as i64
    } else {
        (slope * (sinr_db - input_start)).round() as i64
    }
}

fn sinr_only_result(mapped_sinr: i64) -> CellResults {
    CellResults {
        results_ssb_cell: Some(MeasQuantityResults {
            rsrp: None,
            rsrq: None,
            sinr: Some(mapped_sinr),
        }),
        results_csi_rs_cell: None,
    }
}

/// Serving-cell SINR report: one NR serving measurement object carrying
/// an SSB SINR result.  `mapped_sinr` is a [0, 127] report value from
/// [`three_gpp_map_sinr`].
pub fn ue_specific_sinr_serving(
    serving_cell_id: i64,
    phys_cell_id: i64,
    mapped_sinr: i64,
) -> L3RrcMeasurements {
    let mut l3 = L3RrcMeasurements::new(RrcEvent::B1);
    l3.serving_cell_measurements = Some(ServingCellMeasurements::NrMeasResultServingMoList(
        asn1_per::nonempty![MeasResultServMo {
            serv_cell_id: serving_cell_id,
            meas_result_serving_cell: MeasResultNr {
                phys_cell_id: Some(phys_cell_id),
                cell_results: sinr_only_result(mapped_sinr),
            },
            meas_result_best_neigh_cell: None,
        }],
    ));
    l3
}

/// Empty neighbor-cell report, to be filled one cell at a time with
/// [`add_neighbour_cell_measurement`].
pub fn ue_specific_sinr_neigh() -> L3RrcMeasurements {
    L3RrcMeasurements::new(RrcEvent::B1)
}

/// Append one NR neighbor SINR entry.  The standard caps the list at 8
/// items; entries past the cap are dropped with an error log.
pub fn add_neighbour_cell_measurement(
    l3: &mut L3RrcMeasurements,
    neigh_cell_id: i64,
    mapped_sinr: i64,
    logger: &Logger,
) {
    let entry = MeasResultNr {
        phys_cell_id: Some(neigh_cell_id),
        cell_results: sinr_only_result(mapped_sinr),
    };
    match &mut l3.meas_result_neigh_cells {
        None => {
            l3.meas_result_neigh_cells =
                Some(MeasResultNeighCells::ListNr(asn1_per::nonempty![entry]));
        }
        Some(MeasResultNeighCells::ListNr(list)) => {
            if list.len() == MAX_NEIGHBOUR_MEAS_ITEMS {
                error!(
                    logger,
                    "neighbor measurement list is full, dropping entry";
                    "max_items" => MAX_NEIGHBOUR_MEAS_ITEMS,
                    "neigh_cell_id" => neigh_cell_id
                );
                return;
            }
            list.push(entry);
        }
        Some(MeasResultNeighCells::ListEutra(_)) => {
            error!(
                logger,
                "neighbor measurement list carries EUTRA entries, dropping NR entry";
                "neigh_cell_id" => neigh_cell_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slog::o;

    fn discard_logger() -> Logger {
        Logger::root(slog::Discard, o!())
    }

    #[test]
    fn sinr_mapping_covers_the_report_range() {
        assert_eq!(three_gpp_map_sinr(-30.0), 0);
        assert_eq!(three_gpp_map_sinr(-23.0), 0);
        assert_eq!(three_gpp_map_sinr(40.0), 127);
        assert_eq!(three_gpp_map_sinr(50.0), 127);
        // midpoint of the input range lands on the midpoint of the output
        assert_eq!(three_gpp_map_sinr(8.5), 64);
    }

    #[test]
    fn serving_report_has_one_serving_mo() {
        let l3 = ue_specific_sinr_serving(3, 3, 87);
        let Some(ServingCellMeasurements::NrMeasResultServingMoList(list)) =
            &l3.serving_cell_measurements
        else {
            panic!("expected NR serving MO list");
        };
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().serv_cell_id, 3);
        assert_eq!(
            list.first()
                .meas_result_serving_cell
                .cell_results
                .results_ssb_cell
                .as_ref()
                .unwrap()
                .sinr,
            Some(87)
        );
    }

    #[test]
    fn neighbour_list_is_capped_at_eight() {
        let logger = discard_logger();
        let mut l3 = ue_specific_sinr_neigh();
        for cell in 0..10 {
            add_neighbour_cell_measurement(&mut l3, cell, 60, &logger);
        }
        let Some(MeasResultNeighCells::ListNr(list)) = &l3.meas_result_neigh_cells else {
            panic!("expected NR neighbor list");
        };
        assert_eq!(list.len(), MAX_NEIGHBOUR_MEAS_ITEMS);
    }
}
