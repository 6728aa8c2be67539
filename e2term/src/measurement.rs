//! measurement - named measurement items collected per report cycle

use e2sm::MeasurementValue;

/// One named measurement.  The value variant decides which ASN.1 arm
/// the builders put it in later.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementItem {
    pub name: String,
    pub value: MeasurementValue,
}

/// Ordered list of measurements, optionally scoped to one subject (a UE
/// identity string for per-UE lists, absent for cell-scoped lists).
/// Duplicate names are allowed; the wire format is a list, not a map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementItemList {
    subject_id: Option<String>,
    items: Vec<MeasurementItem>,
}

impl MeasurementItemList {
    /// A cell-scoped list with no subject identity.
    pub fn new() -> Self {
        Default::default()
    }

    pub fn new_for_subject(subject_id: impl Into<String>) -> Self {
        MeasurementItemList {
            subject_id: Some(subject_id.into()),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, name: impl Into<String>, value: MeasurementValue) {
        let name = name.into();
        assert!(!name.is_empty(), "measurement name must not be empty");
        self.items.push(MeasurementItem { name, value });
    }

    /// The subject identity.  Calling this on a cell-scoped list is a
    /// caller bug.
    pub fn subject_id(&self) -> &str {
        self.subject_id
            .as_deref()
            .expect("subject_id() called on a measurement list with no subject")
    }

    pub fn has_subject(&self) -> bool {
        self.subject_id.is_some()
    }

    pub fn items(&self) -> &[MeasurementItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_keep_insertion_order_and_duplicates() {
        let mut list = MeasurementItemList::new_for_subject("0001");
        list.add_item("RRU.PrbUsedDl.UEID", MeasurementValue::Int(10));
        list.add_item("DRB.UEThpDl.UEID", MeasurementValue::Real(1.5));
        list.add_item("RRU.PrbUsedDl.UEID", MeasurementValue::Int(12));
        assert_eq!(list.len(), 3);
        assert_eq!(list.items()[0].name, "RRU.PrbUsedDl.UEID");
        assert_eq!(list.items()[2].value, MeasurementValue::Int(12));
        assert_eq!(list.subject_id(), "0001");
    }

    #[test]
    #[should_panic(expected = "no subject")]
    fn subject_id_on_cell_scoped_list_panics() {
        MeasurementItemList::new().subject_id();
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn empty_name_is_rejected() {
        MeasurementItemList::new().add_item("", MeasurementValue::Int(0));
    }
}
