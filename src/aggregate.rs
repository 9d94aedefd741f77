use crate::records::ApartmentRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which field identifies a logical unit within an inspection set.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryKeyMode {
    Apartment,
    Pavement,
}

/// Per-set summary backing the dropdown.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct InspectionSetMeta {
    pub id: String,
    pub primary_key_mode: PrimaryKeyMode,
    pub nonconformance_total: i64,
}

impl InspectionSetMeta {
    /// Dropdown label, annotated with the NC total when there is one.
    pub fn dropdown_label(&self) -> String {
        if self.nonconformance_total > 0 {
            format!("{} ({} NC)", self.id, self.nonconformance_total)
        } else {
            self.id.clone()
        }
    }
}

/// Summarize one inspection set across the full record list.
///
/// The set is pavement-keyed only when every one of its records carries a
/// non-empty pavement origin; a single record without one forces apartment
/// mode no matter where it sits in the list. Under apartment mode the
/// pavement-replicated rows are dropped before counting. Duplicate rows for
/// the same key contribute the maximum non-conformance count observed, not
/// the sum, and the set total is the sum of those per-key maxima.
pub fn aggregate_inspection_set(records: &[ApartmentRecord], set_id: &str) -> InspectionSetMeta {
    let set_records: Vec<&ApartmentRecord> =
        records.iter().filter(|r| r.fvs == set_id).collect();

    let all_have_pavement =
        !set_records.is_empty() && set_records.iter().all(|r| r.has_pavement());
    let mode = if all_have_pavement {
        PrimaryKeyMode::Pavement
    } else {
        PrimaryKeyMode::Apartment
    };

    let mut per_key: HashMap<&str, i64> = HashMap::new();
    for record in &set_records {
        if mode == PrimaryKeyMode::Apartment && record.has_pavement() {
            continue;
        }
        let Some(key) = record.unit_key(mode) else {
            continue;
        };
        let entry = per_key.entry(key).or_insert(0);
        *entry = (*entry).max(record.nonconformances);
    }

    InspectionSetMeta {
        id: set_id.to_string(),
        primary_key_mode: mode,
        nonconformance_total: per_key.values().sum(),
    }
}
