use crate::aggregate::PrimaryKeyMode;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One apartment row as exported by the inspection system.
///
/// Rows are scoped to an inspection set (`fvs`) and may repeat: the export
/// replicates a pavement-keyed inspection once per apartment on that floor,
/// and re-synchronizations can duplicate apartment rows outright. Consumers
/// deduplicate, they never assume one row per unit.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct ApartmentRecord {
    pub fvs: String,
    pub apartment: String,
    #[serde(default)]
    pub pavement: Option<String>,
    #[serde(default)]
    pub duration_initial: i64,
    #[serde(default)]
    pub duration_total: i64,
    #[serde(default)]
    pub termination_date_initial: Option<String>,
    #[serde(default)]
    pub termination_date_final: Option<String>,
    #[serde(default)]
    pub completion_percent: f64,
    #[serde(default)]
    pub pending_items: i64,
    #[serde(default)]
    pub nonconformances: i64,
    #[serde(default)]
    pub reopenings: Vec<Reopening>,
    #[serde(default)]
    pub inspection_id: Option<String>,
}

/// One re-inspection cycle opened after a non-conforming close.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Reopening {
    pub code: String,
    pub opening_date: String,
    #[serde(default)]
    pub pending_items: i64,
    #[serde(default)]
    pub nonconformances: i64,
}

impl ApartmentRecord {
    /// The grouping key for the record under the given mode.
    pub fn unit_key(&self, mode: PrimaryKeyMode) -> Option<&str> {
        match mode {
            PrimaryKeyMode::Apartment => Some(&self.apartment),
            PrimaryKeyMode::Pavement => self.pavement.as_deref().filter(|p| !p.is_empty()),
        }
    }

    pub(crate) fn has_pavement(&self) -> bool {
        self.pavement.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Format an ISO `YYYY-MM-DD` date the way the dashboard shows dates,
/// `DD/MM/YYYY`. Anything chrono cannot parse comes back unchanged.
pub fn format_date_br(raw: &str) -> String {
    let day = raw.split('T').next().unwrap_or(raw);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Build the unit index for one inspection-set selection.
///
/// Rebuilt from the full record list on every selection change; nothing is
/// carried over from the previous selection. Cells are labeled with
/// apartment ids, so the index is keyed by apartment id whatever the set's
/// aggregation mode; a pavement-keyed set still colors each apartment cell
/// through its replicated row. Duplicate rows keep the first occurrence
/// except the non-conformance count, which takes the maximum observed so a
/// stale duplicate cannot hide a defect.
pub fn build_unit_index(
    records: &[ApartmentRecord],
    fvs: &str,
) -> HashMap<String, ApartmentRecord> {
    let mut index: HashMap<String, ApartmentRecord> = HashMap::new();

    for record in records.iter().filter(|r| r.fvs == fvs) {
        match index.get_mut(&record.apartment) {
            Some(existing) => {
                existing.nonconformances = existing.nonconformances.max(record.nonconformances);
            }
            None => {
                index.insert(record.apartment.clone(), record.clone());
            }
        }
    }

    index
}
