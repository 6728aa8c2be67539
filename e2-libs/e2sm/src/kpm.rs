//! kpm - E2SM-KPM indication header/message grammar and RAN function description

use crate::rrc::L3RrcMeasurements;
use asn1_per::*;

/// PLMN identity, 3 octets of BCD-packed MCC/MNC.
#[derive(Clone, Debug, PartialEq)]
pub struct PlmnIdentity(pub [u8; 3]);

impl PlmnIdentity {
    /// The simulator hands PLMN IDs around as short digit strings.
    pub fn from_str_bytes(s: &str) -> Self {
        let mut id = [0u8; 3];
        for (i, b) in s.bytes().take(3).enumerate() {
            id[i] = b;
        }
        PlmnIdentity(id)
    }
}

impl AperCodec for PlmnIdentity {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_octetstring(data, Some(3), Some(3), false, &self.0)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let bytes = decode_octetstring(data, Some(3), Some(3), false)?;
        Ok(PlmnIdentity([bytes[0], bytes[1], bytes[2]]))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NrCgi {
    pub plmn_identity: PlmnIdentity,
    /// 36-bit NR cell identity, built via `ids::nr_cell_id`.
    pub nr_cell_identity: BitVec<u8, Msb0>,
}

impl AperCodec for NrCgi {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.plmn_identity.aper_encode(data)?;
        encode_bitstring(data, Some(36), Some(36), false, &self.nr_cell_identity)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(NrCgi {
            plmn_identity: PlmnIdentity::aper_decode(data)?,
            nr_cell_identity: decode_bitstring(data, Some(36), Some(36), false)?,
        })
    }
}

/// Global E2 node identity, one arm per node flavor.
#[derive(Clone, Debug, PartialEq)]
pub enum GlobalE2NodeId {
    Gnb(GlobalE2NodeGnbId),
    EnGnb(GlobalE2NodeEnGnbId),
    NgEnb(GlobalE2NodeNgEnbId),
    Enb(GlobalE2NodeEnbId),
}

impl AperCodec for GlobalE2NodeId {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            GlobalE2NodeId::Gnb(x) => {
                encode_choice_idx(data, 0, 3, true, 0)?;
                x.aper_encode(data)
            }
            GlobalE2NodeId::EnGnb(x) => {
                encode_choice_idx(data, 0, 3, true, 1)?;
                x.aper_encode(data)
            }
            GlobalE2NodeId::NgEnb(x) => {
                encode_choice_idx(data, 0, 3, true, 2)?;
                x.aper_encode(data)
            }
            GlobalE2NodeId::Enb(x) => {
                encode_choice_idx(data, 0, 3, true, 3)?;
                x.aper_encode(data)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 3, true)? {
            0 => Ok(GlobalE2NodeId::Gnb(GlobalE2NodeGnbId::aper_decode(data)?)),
            1 => Ok(GlobalE2NodeId::EnGnb(GlobalE2NodeEnGnbId::aper_decode(
                data,
            )?)),
            2 => Ok(GlobalE2NodeId::NgEnb(GlobalE2NodeNgEnbId::aper_decode(
                data,
            )?)),
            3 => Ok(GlobalE2NodeId::Enb(GlobalE2NodeEnbId::aper_decode(data)?)),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobalE2NodeGnbId {
    pub plmn_identity: PlmnIdentity,
    pub gnb_id: GnbIdChoice,
}

impl AperCodec for GlobalE2NodeGnbId {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.plmn_identity.aper_encode(data)?;
        self.gnb_id.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(GlobalE2NodeGnbId {
            plmn_identity: PlmnIdentity::aper_decode(data)?,
            gnb_id: GnbIdChoice::aper_decode(data)?,
        })
    }
}

/// BIT STRING (SIZE(22..32)); this stack always emits the full 32 bits.
#[derive(Clone, Debug, PartialEq)]
pub enum GnbIdChoice {
    GnbId(BitVec<u8, Msb0>),
}

impl AperCodec for GnbIdChoice {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        let GnbIdChoice::GnbId(bits) = self;
        encode_choice_idx(data, 0, 0, true, 0)?;
        encode_bitstring(data, Some(22), Some(32), false, bits)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 0, true)? {
            0 => Ok(GnbIdChoice::GnbId(decode_bitstring(
                data,
                Some(22),
                Some(32),
                false,
            )?)),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobalE2NodeEnGnbId {
    pub plmn_identity: PlmnIdentity,
    pub gnb_id: GnbIdChoice,
}

impl AperCodec for GlobalE2NodeEnGnbId {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.plmn_identity.aper_encode(data)?;
        self.gnb_id.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(GlobalE2NodeEnGnbId {
            plmn_identity: PlmnIdentity::aper_decode(data)?,
            gnb_id: GnbIdChoice::aper_decode(data)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobalE2NodeNgEnbId {
    pub plmn_identity: PlmnIdentity,
    pub enb_id: EnbId,
}

impl AperCodec for GlobalE2NodeNgEnbId {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.plmn_identity.aper_encode(data)?;
        self.enb_id.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(GlobalE2NodeNgEnbId {
            plmn_identity: PlmnIdentity::aper_decode(data)?,
            enb_id: EnbId::aper_decode(data)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobalE2NodeEnbId {
    pub plmn_identity: PlmnIdentity,
    pub enb_id: EnbId,
}

impl AperCodec for GlobalE2NodeEnbId {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.plmn_identity.aper_encode(data)?;
        self.enb_id.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(GlobalE2NodeEnbId {
            plmn_identity: PlmnIdentity::aper_decode(data)?,
            enb_id: EnbId::aper_decode(data)?,
        })
    }
}

/// eNB identity; the fixed widths are what distinguishes the arms on
/// the wire, so the packers in [`crate::ids`] must be used to build them.
#[derive(Clone, Debug, PartialEq)]
pub enum EnbId {
    Macro(BitVec<u8, Msb0>),      // SIZE(20)
    Home(BitVec<u8, Msb0>),       // SIZE(28)
    ShortMacro(BitVec<u8, Msb0>), // SIZE(18)
    LongMacro(BitVec<u8, Msb0>),  // SIZE(21)
}

impl AperCodec for EnbId {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        let (idx, bits, size) = match self {
            EnbId::Macro(bits) => (0, bits, 20),
            EnbId::Home(bits) => (1, bits, 28),
            EnbId::ShortMacro(bits) => (2, bits, 18),
            EnbId::LongMacro(bits) => (3, bits, 21),
        };
        encode_choice_idx(data, 0, 3, true, idx)?;
        encode_bitstring(data, Some(size), Some(size), false, bits)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let idx = decode_choice_idx(data, 0, 3, true)?;
        let size = match idx {
            0 => 20,
            1 => 28,
            2 => 18,
            3 => 21,
            x => return Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        };
        let bits = decode_bitstring(data, Some(size), Some(size), false)?;
        Ok(match idx {
            0 => EnbId::Macro(bits),
            1 => EnbId::Home(bits),
            2 => EnbId::ShortMacro(bits),
            _ => EnbId::LongMacro(bits),
        })
    }
}

/// Collection start time: microseconds since the epoch, big-endian.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeStamp(pub [u8; 8]);

impl TimeStamp {
    pub fn from_micros(timestamp: u64) -> Self {
        TimeStamp(timestamp.to_be_bytes())
    }
    pub fn as_micros(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }
}

impl AperCodec for TimeStamp {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_octetstring(data, Some(8), Some(8), false, &self.0)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let bytes = decode_octetstring(data, Some(8), Some(8), false)?;
        let mut ts = [0u8; 8];
        ts.copy_from_slice(&bytes);
        Ok(TimeStamp(ts))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum E2SmKpmIndicationHeader {
    Format1(IndicationHeaderFormat1),
}

impl AperCodec for E2SmKpmIndicationHeader {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        let E2SmKpmIndicationHeader::Format1(x) = self;
        encode_choice_idx(data, 0, 0, true, 0)?;
        x.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 0, true)? {
            0 => Ok(E2SmKpmIndicationHeader::Format1(
                IndicationHeaderFormat1::aper_decode(data)?,
            )),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndicationHeaderFormat1 {
    pub global_e2node_id: GlobalE2NodeId,
    pub collection_start_time: TimeStamp,
}

impl AperCodec for IndicationHeaderFormat1 {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.global_e2node_id.aper_encode(data)?;
        self.collection_start_time.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(IndicationHeaderFormat1 {
            global_e2node_id: GlobalE2NodeId::aper_decode(data)?,
            collection_start_time: TimeStamp::aper_decode(data)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum E2SmKpmIndicationMessage {
    Format1(IndicationMessageFormat1),
    Format3(IndicationMessageFormat3),
}

impl AperCodec for E2SmKpmIndicationMessage {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            E2SmKpmIndicationMessage::Format1(x) => {
                encode_choice_idx(data, 0, 1, true, 0)?;
                x.aper_encode(data)
            }
            E2SmKpmIndicationMessage::Format3(x) => {
                encode_choice_idx(data, 0, 1, true, 1)?;
                x.aper_encode(data)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 1, true)? {
            0 => Ok(E2SmKpmIndicationMessage::Format1(
                IndicationMessageFormat1::aper_decode(data)?,
            )),
            1 => Ok(E2SmKpmIndicationMessage::Format3(
                IndicationMessageFormat3::aper_decode(data)?,
            )),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

/// Flat cell-level report carrying the performance containers.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicationMessageFormat1 {
    pub pm_containers: NonEmpty<PmContainersItem>,
    pub cell_object_id: String,
    pub list_of_pm_information: Option<NonEmpty<PmInfoItem>>,
}

impl AperCodec for IndicationMessageFormat1 {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.list_of_pm_information.is_some()])?;
        encode_nonempty(data, 512, &self.pm_containers)?;
        encode_visible_string(data, &self.cell_object_id)?;
        if let Some(list) = &self.list_of_pm_information {
            encode_nonempty(data, 2048, list)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(IndicationMessageFormat1 {
            pm_containers: decode_nonempty(data, 512)?,
            cell_object_id: decode_visible_string(data)?,
            list_of_pm_information: if optionals[0] {
                Some(decode_nonempty(data, 2048)?)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PmContainersItem {
    pub performance_container: Option<PfContainer>,
    pub the_ran_container: Option<Vec<u8>>,
}

impl AperCodec for PmContainersItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[
                self.performance_container.is_some(),
                self.the_ran_container.is_some(),
            ],
        )?;
        if let Some(container) = &self.performance_container {
            container.aper_encode(data)?;
        }
        if let Some(ran_container) = &self.the_ran_container {
            encode_octetstring(data, None, None, false, ran_container)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(PmContainersItem {
            performance_container: if optionals[0] {
                Some(PfContainer::aper_decode(data)?)
            } else {
                None
            },
            the_ran_container: if optionals[1] {
                Some(decode_octetstring(data, None, None, false)?)
            } else {
                None
            },
        })
    }
}

/// Performance container, one arm per architectural split.
#[derive(Clone, Debug, PartialEq)]
pub enum PfContainer {
    OCuCp(OCuCpPfContainer),
    OCuUp(OCuUpPfContainer),
    ODu(ODuPfContainer),
}

impl AperCodec for PfContainer {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            PfContainer::OCuCp(x) => {
                encode_choice_idx(data, 0, 2, true, 0)?;
                x.aper_encode(data)
            }
            PfContainer::OCuUp(x) => {
                encode_choice_idx(data, 0, 2, true, 1)?;
                x.aper_encode(data)
            }
            PfContainer::ODu(x) => {
                encode_choice_idx(data, 0, 2, true, 2)?;
                x.aper_encode(data)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 2, true)? {
            0 => Ok(PfContainer::OCuCp(OCuCpPfContainer::aper_decode(data)?)),
            1 => Ok(PfContainer::OCuUp(OCuUpPfContainer::aper_decode(data)?)),
            2 => Ok(PfContainer::ODu(ODuPfContainer::aper_decode(data)?)),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OCuCpPfContainer {
    pub gnb_cu_cp_name: Option<String>,
    pub number_of_active_ues: Option<i64>,
}

impl AperCodec for OCuCpPfContainer {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.gnb_cu_cp_name.is_some()])?;
        if let Some(name) = &self.gnb_cu_cp_name {
            encode_visible_string(data, name)?;
        }
        // cu-CP Resource Status sub-sequence
        encode_sequence_header(data, true, &[self.number_of_active_ues.is_some()])?;
        if let Some(n) = self.number_of_active_ues {
            encode_integer(data, Some(0), Some(65536), false, n as i128)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        let gnb_cu_cp_name = if optionals[0] {
            Some(decode_visible_string(data)?)
        } else {
            None
        };
        let optionals = decode_sequence_header(data, true, 1)?;
        let number_of_active_ues = if optionals[0] {
            Some(decode_integer(data, Some(0), Some(65536), false)? as i64)
        } else {
            None
        };
        Ok(OCuCpPfContainer {
            gnb_cu_cp_name,
            number_of_active_ues,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OCuUpPfContainer {
    pub gnb_cu_up_name: Option<String>,
    pub pf_container_list: NonEmpty<PfContainerListItem>,
}

impl AperCodec for OCuUpPfContainer {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.gnb_cu_up_name.is_some()])?;
        if let Some(name) = &self.gnb_cu_up_name {
            encode_visible_string(data, name)?;
        }
        encode_nonempty(data, 3, &self.pf_container_list)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        let gnb_cu_up_name = if optionals[0] {
            Some(decode_visible_string(data)?)
        } else {
            None
        };
        Ok(OCuUpPfContainer {
            gnb_cu_up_name,
            pf_container_list: decode_nonempty(data, 3)?,
        })
    }
}

/// Network interface flavor of a CU-UP measurement set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum NiType {
    X2U = 0,
    XnU = 1,
    F1U = 2,
}

impl AperCodec for NiType {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_enumerated(data, 0, 2, true, u8::from(*self) as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let raw = decode_enumerated(data, 0, 2, true)?;
        NiType::try_from(raw as u8).map_err(|_| PerCodecError::InvalidEnumerated(raw as u128))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PfContainerListItem {
    pub interface_type: NiType,
    pub o_cu_up_pm_container: CuUpMeasurementContainer,
}

impl AperCodec for PfContainerListItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.interface_type.aper_encode(data)?;
        self.o_cu_up_pm_container.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(PfContainerListItem {
            interface_type: NiType::aper_decode(data)?,
            o_cu_up_pm_container: CuUpMeasurementContainer::aper_decode(data)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CuUpMeasurementContainer {
    pub plmn_list: NonEmpty<PlmnIdItem>,
}

impl AperCodec for CuUpMeasurementContainer {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_nonempty(data, 12, &self.plmn_list)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(CuUpMeasurementContainer {
            plmn_list: decode_nonempty(data, 12)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlmnIdItem {
    pub plmn_identity: PlmnIdentity,
    pub cu_up_pm_epc: Option<EpcCuUpPmFormat>,
}

impl AperCodec for PlmnIdItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.cu_up_pm_epc.is_some()])?;
        self.plmn_identity.aper_encode(data)?;
        if let Some(epc) = &self.cu_up_pm_epc {
            epc.aper_encode(data)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(PlmnIdItem {
            plmn_identity: PlmnIdentity::aper_decode(data)?,
            cu_up_pm_epc: if optionals[0] {
                Some(EpcCuUpPmFormat::aper_decode(data)?)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpcCuUpPmFormat {
    pub per_qci_report_list: NonEmpty<PerQciReportItemFormat>,
}

impl AperCodec for EpcCuUpPmFormat {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_nonempty(data, 256, &self.per_qci_report_list)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(EpcCuUpPmFormat {
            per_qci_report_list: decode_nonempty(data, 256)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PerQciReportItemFormat {
    pub drbqci: i64,
    pub pdcp_bytes_dl: Option<i64>,
    pub pdcp_bytes_ul: Option<i64>,
}

impl AperCodec for PerQciReportItemFormat {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[self.pdcp_bytes_dl.is_some(), self.pdcp_bytes_ul.is_some()],
        )?;
        encode_integer(data, Some(0), Some(255), true, self.drbqci as i128)?;
        if let Some(dl) = self.pdcp_bytes_dl {
            encode_integer(data, None, None, false, dl as i128)?;
        }
        if let Some(ul) = self.pdcp_bytes_ul {
            encode_integer(data, None, None, false, ul as i128)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(PerQciReportItemFormat {
            drbqci: decode_integer(data, Some(0), Some(255), true)? as i64,
            pdcp_bytes_dl: if optionals[0] {
                Some(decode_integer(data, None, None, false)? as i64)
            } else {
                None
            },
            pdcp_bytes_ul: if optionals[1] {
                Some(decode_integer(data, None, None, false)? as i64)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ODuPfContainer {
    pub cell_resource_report_list: NonEmpty<CellResourceReportListItem>,
}

impl AperCodec for ODuPfContainer {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_nonempty(data, 512, &self.cell_resource_report_list)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(ODuPfContainer {
            cell_resource_report_list: decode_nonempty(data, 512)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellResourceReportListItem {
    pub nrcgi: NrCgi,
    pub dl_total_of_available_prbs: Option<i64>,
    pub ul_total_of_available_prbs: Option<i64>,
    pub served_plmn_per_cell_list: NonEmpty<ServedPlmnPerCellListItem>,
}

impl AperCodec for CellResourceReportListItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[
                self.dl_total_of_available_prbs.is_some(),
                self.ul_total_of_available_prbs.is_some(),
            ],
        )?;
        self.nrcgi.aper_encode(data)?;
        if let Some(dl) = self.dl_total_of_available_prbs {
            encode_integer(data, Some(0), Some(273), true, dl as i128)?;
        }
        if let Some(ul) = self.ul_total_of_available_prbs {
            encode_integer(data, Some(0), Some(273), true, ul as i128)?;
        }
        encode_nonempty(data, 512, &self.served_plmn_per_cell_list)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(CellResourceReportListItem {
            nrcgi: NrCgi::aper_decode(data)?,
            dl_total_of_available_prbs: if optionals[0] {
                Some(decode_integer(data, Some(0), Some(273), true)? as i64)
            } else {
                None
            },
            ul_total_of_available_prbs: if optionals[1] {
                Some(decode_integer(data, Some(0), Some(273), true)? as i64)
            } else {
                None
            },
            served_plmn_per_cell_list: decode_nonempty(data, 512)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServedPlmnPerCellListItem {
    pub plmn_identity: PlmnIdentity,
    pub du_pm_epc: Option<EpcDuPmContainer>,
}

impl AperCodec for ServedPlmnPerCellListItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.du_pm_epc.is_some()])?;
        self.plmn_identity.aper_encode(data)?;
        if let Some(epc) = &self.du_pm_epc {
            epc.aper_encode(data)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(ServedPlmnPerCellListItem {
            plmn_identity: PlmnIdentity::aper_decode(data)?,
            du_pm_epc: if optionals[0] {
                Some(EpcDuPmContainer::aper_decode(data)?)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpcDuPmContainer {
    pub per_qci_report_list: NonEmpty<PerQciReportItem>,
}

impl AperCodec for EpcDuPmContainer {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_nonempty(data, 256, &self.per_qci_report_list)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(EpcDuPmContainer {
            per_qci_report_list: decode_nonempty(data, 256)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PerQciReportItem {
    pub qci: i64,
    /// Percentages; the grammar constrains both to 0..100.
    pub dl_prb_usage: Option<i64>,
    pub ul_prb_usage: Option<i64>,
}

impl AperCodec for PerQciReportItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[self.dl_prb_usage.is_some(), self.ul_prb_usage.is_some()],
        )?;
        encode_integer(data, Some(0), Some(255), true, self.qci as i128)?;
        if let Some(dl) = self.dl_prb_usage {
            encode_integer(data, Some(0), Some(100), false, dl as i128)?;
        }
        if let Some(ul) = self.ul_prb_usage {
            encode_integer(data, Some(0), Some(100), false, ul as i128)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(PerQciReportItem {
            qci: decode_integer(data, Some(0), Some(255), true)? as i64,
            dl_prb_usage: if optionals[0] {
                Some(decode_integer(data, Some(0), Some(100), false)? as i64)
            } else {
                None
            },
            ul_prb_usage: if optionals[1] {
                Some(decode_integer(data, Some(0), Some(100), false)? as i64)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MeasurementType {
    Name(String),
    Id(i64),
}

impl AperCodec for MeasurementType {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            MeasurementType::Name(name) => {
                encode_choice_idx(data, 0, 1, true, 0)?;
                encode_visible_string(data, name)
            }
            MeasurementType::Id(id) => {
                encode_choice_idx(data, 0, 1, true, 1)?;
                encode_integer(data, Some(1), Some(65536), true, *id as i128)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 1, true)? {
            0 => Ok(MeasurementType::Name(decode_visible_string(data)?)),
            1 => Ok(MeasurementType::Id(
                decode_integer(data, Some(1), Some(65536), true)? as i64,
            )),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MeasurementValue {
    Int(i64),
    Real(f64),
    NoValue,
    Rrc(L3RrcMeasurements),
}

impl AperCodec for MeasurementValue {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            MeasurementValue::Int(value) => {
                encode_choice_idx(data, 0, 3, true, 0)?;
                encode_integer(data, None, None, false, *value as i128)
            }
            MeasurementValue::Real(value) => {
                encode_choice_idx(data, 0, 3, true, 1)?;
                encode_real(data, *value)
            }
            MeasurementValue::NoValue => encode_choice_idx(data, 0, 3, true, 2),
            MeasurementValue::Rrc(value) => {
                encode_choice_idx(data, 0, 3, true, 3)?;
                value.aper_encode(data)
            }
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 3, true)? {
            0 => Ok(MeasurementValue::Int(
                decode_integer(data, None, None, false)? as i64,
            )),
            1 => Ok(MeasurementValue::Real(decode_real(data)?)),
            2 => Ok(MeasurementValue::NoValue),
            3 => Ok(MeasurementValue::Rrc(L3RrcMeasurements::aper_decode(data)?)),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

/// Named measurement carried in the flat Format 1 report.
#[derive(Clone, Debug, PartialEq)]
pub struct PmInfoItem {
    pub pm_type: MeasurementType,
    pub pm_val: MeasurementValue,
}

impl AperCodec for PmInfoItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.pm_type.aper_encode(data)?;
        self.pm_val.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(PmInfoItem {
            pm_type: MeasurementType::aper_decode(data)?,
            pm_val: MeasurementValue::aper_decode(data)?,
        })
    }
}

/// Per-UE measurement report list, the primary outbound format.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicationMessageFormat3 {
    pub ue_meas_report_list: NonEmpty<UeMeasReportItem>,
}

impl AperCodec for IndicationMessageFormat3 {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_nonempty(data, 65535, &self.ue_meas_report_list)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(IndicationMessageFormat3 {
            ue_meas_report_list: decode_nonempty(data, 65535)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UeMeasReportItem {
    pub ue_id: UeId,
    pub meas_report: MeasurementReport,
}

impl AperCodec for UeMeasReportItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.ue_id.aper_encode(data)?;
        self.meas_report.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(UeMeasReportItem {
            ue_id: UeId::aper_decode(data)?,
            meas_report: MeasurementReport::aper_decode(data)?,
        })
    }
}

/// gNB-flavor UE identity: NG-AP AMF UE ID plus the serving GUAMI.
#[derive(Clone, Debug, PartialEq)]
pub struct UeId {
    /// INTEGER (0..2^40-1) per NGAP.
    pub amf_ue_ngap_id: u64,
    pub guami: Guami,
    pub ran_ue_id: Option<[u8; 8]>,
}

impl AperCodec for UeId {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.ran_ue_id.is_some()])?;
        encode_integer(
            data,
            Some(0),
            Some(1099511627775),
            false,
            self.amf_ue_ngap_id as i128,
        )?;
        self.guami.aper_encode(data)?;
        if let Some(ran_ue_id) = &self.ran_ue_id {
            encode_octetstring(data, Some(8), Some(8), false, ran_ue_id)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(UeId {
            amf_ue_ngap_id: decode_integer(data, Some(0), Some(1099511627775), false)? as u64,
            guami: Guami::aper_decode(data)?,
            ran_ue_id: if optionals[0] {
                let bytes = decode_octetstring(data, Some(8), Some(8), false)?;
                let mut id = [0u8; 8];
                id.copy_from_slice(&bytes);
                Some(id)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Guami {
    pub plmn_identity: PlmnIdentity,
    pub amf_region_id: BitVec<u8, Msb0>, // SIZE(8)
    pub amf_set_id: BitVec<u8, Msb0>,    // SIZE(10)
    pub amf_pointer: BitVec<u8, Msb0>,   // SIZE(6)
}

impl AperCodec for Guami {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.plmn_identity.aper_encode(data)?;
        encode_bitstring(data, Some(8), Some(8), false, &self.amf_region_id)?;
        encode_bitstring(data, Some(10), Some(10), false, &self.amf_set_id)?;
        encode_bitstring(data, Some(6), Some(6), false, &self.amf_pointer)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(Guami {
            plmn_identity: PlmnIdentity::aper_decode(data)?,
            amf_region_id: decode_bitstring(data, Some(8), Some(8), false)?,
            amf_set_id: decode_bitstring(data, Some(10), Some(10), false)?,
            amf_pointer: decode_bitstring(data, Some(6), Some(6), false)?,
        })
    }
}

/// The measurement report nested in each Format 3 entry: parallel info
/// and data lists plus the reporting granularity.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementReport {
    pub meas_data: NonEmpty<MeasurementDataItem>,
    pub meas_info_list: Option<NonEmpty<MeasurementInfoItem>>,
    pub granul_period: Option<u64>,
}

impl AperCodec for MeasurementReport {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[self.meas_info_list.is_some(), self.granul_period.is_some()],
        )?;
        encode_nonempty(data, 65535, &self.meas_data)?;
        if let Some(list) = &self.meas_info_list {
            encode_nonempty(data, 65535, list)?;
        }
        if let Some(period) = self.granul_period {
            encode_integer(data, Some(1), Some(4294967295), false, period as i128)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(MeasurementReport {
            meas_data: decode_nonempty(data, 65535)?,
            meas_info_list: if optionals[0] {
                Some(decode_nonempty(data, 65535)?)
            } else {
                None
            },
            granul_period: if optionals[1] {
                Some(decode_integer(data, Some(1), Some(4294967295), false)? as u64)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementInfoItem {
    pub meas_type: MeasurementType,
}

impl AperCodec for MeasurementInfoItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        self.meas_type.aper_encode(data)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(MeasurementInfoItem {
            meas_type: MeasurementType::aper_decode(data)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementDataItem {
    pub meas_record: NonEmpty<MeasurementRecordItem>,
}

impl AperCodec for MeasurementDataItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_nonempty(data, 65535, &self.meas_record)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(MeasurementDataItem {
            meas_record: decode_nonempty(data, 65535)?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MeasurementRecordItem {
    Integer(u64),
    Real(f64),
    NoValue,
}

impl AperCodec for MeasurementRecordItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        match self {
            MeasurementRecordItem::Integer(value) => {
                encode_choice_idx(data, 0, 2, true, 0)?;
                encode_integer(data, Some(0), Some(u64::MAX as i128), false, *value as i128)
            }
            MeasurementRecordItem::Real(value) => {
                encode_choice_idx(data, 0, 2, true, 1)?;
                encode_real(data, *value)
            }
            MeasurementRecordItem::NoValue => encode_choice_idx(data, 0, 2, true, 2),
        }
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        match decode_choice_idx(data, 0, 2, true)? {
            0 => Ok(MeasurementRecordItem::Integer(decode_integer(
                data,
                Some(0),
                Some(u64::MAX as i128),
                false,
            )? as u64)),
            1 => Ok(MeasurementRecordItem::Real(decode_real(data)?)),
            2 => Ok(MeasurementRecordItem::NoValue),
            x => Err(PerCodecError::InvalidChoiceIndex(x as u128)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RanFunctionName {
    pub short_name: String,
    pub oid: String,
    pub description: String,
    pub instance: Option<i64>,
}

impl AperCodec for RanFunctionName {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[self.instance.is_some()])?;
        encode_visible_string(data, &self.short_name)?;
        encode_visible_string(data, &self.oid)?;
        encode_visible_string(data, &self.description)?;
        if let Some(instance) = self.instance {
            encode_integer(data, None, None, false, instance as i128)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 1)?;
        Ok(RanFunctionName {
            short_name: decode_visible_string(data)?,
            oid: decode_visible_string(data)?,
            description: decode_visible_string(data)?,
            instance: if optionals[0] {
                Some(decode_integer(data, None, None, false)? as i64)
            } else {
                None
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicEventTriggerStyleItem {
    pub style_type: i64,
    pub style_name: String,
    pub format_type: i64,
}

impl AperCodec for RicEventTriggerStyleItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_integer(data, None, None, false, self.style_type as i128)?;
        encode_visible_string(data, &self.style_name)?;
        encode_integer(data, None, None, false, self.format_type as i128)
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(RicEventTriggerStyleItem {
            style_type: decode_integer(data, None, None, false)? as i64,
            style_name: decode_visible_string(data)?,
            format_type: decode_integer(data, None, None, false)? as i64,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RicReportStyleItem {
    pub style_type: i64,
    pub style_name: String,
    pub indication_header_format_type: i64,
    pub indication_message_format_type: i64,
}

impl AperCodec for RicReportStyleItem {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(data, true, &[])?;
        encode_integer(data, None, None, false, self.style_type as i128)?;
        encode_visible_string(data, &self.style_name)?;
        encode_integer(
            data,
            None,
            None,
            false,
            self.indication_header_format_type as i128,
        )?;
        encode_integer(
            data,
            None,
            None,
            false,
            self.indication_message_format_type as i128,
        )
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        decode_sequence_header(data, true, 0)?;
        Ok(RicReportStyleItem {
            style_type: decode_integer(data, None, None, false)? as i64,
            style_name: decode_visible_string(data)?,
            indication_header_format_type: decode_integer(data, None, None, false)? as i64,
            indication_message_format_type: decode_integer(data, None, None, false)? as i64,
        })
    }
}

/// KPM service model capability descriptor, encoded once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct E2SmKpmRanFunctionDescription {
    pub ran_function_name: RanFunctionName,
    pub event_trigger_style_list: Vec<RicEventTriggerStyleItem>,
    pub report_style_list: Vec<RicReportStyleItem>,
}

impl AperCodec for E2SmKpmRanFunctionDescription {
    fn aper_encode(&self, data: &mut PerCodecData) -> Result<(), PerCodecError> {
        encode_sequence_header(
            data,
            true,
            &[
                !self.event_trigger_style_list.is_empty(),
                !self.report_style_list.is_empty(),
            ],
        )?;
        self.ran_function_name.aper_encode(data)?;
        if !self.event_trigger_style_list.is_empty() {
            encode_seq_of(data, 1, 63, &self.event_trigger_style_list)?;
        }
        if !self.report_style_list.is_empty() {
            encode_seq_of(data, 1, 63, &self.report_style_list)?;
        }
        Ok(())
    }
    fn aper_decode(data: &mut PerCodecData) -> Result<Self, PerCodecError> {
        let optionals = decode_sequence_header(data, true, 2)?;
        Ok(E2SmKpmRanFunctionDescription {
            ran_function_name: RanFunctionName::aper_decode(data)?,
            event_trigger_style_list: if optionals[0] {
                decode_seq_of(data, 1, 63)?
            } else {
                vec![]
            },
            report_style_list: if optionals[1] {
                decode_seq_of(data, 1, 63)?
            } else {
                vec![]
            },
        })
    }
}
