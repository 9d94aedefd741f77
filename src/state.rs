use crate::records::ApartmentRecord;
use serde::Serialize;

/// Units without a record in the selected inspection set.
pub const COLOR_NO_DATA: &str = "#BDBDBD";
/// Units with open non-conformances, highlight mode.
pub const COLOR_ALERT: &str = "#E53935";
/// Service not yet terminated for the first time.
pub const COLOR_IN_PROGRESS: &str = "#42A5F5";
/// Terminated, fully complete, nothing pending, nothing non-conforming.
pub const COLOR_COMPLETE: &str = "#66BB6A";
/// Terminated but with leftover completion, pendings, or non-conformances.
pub const COLOR_ATTENTION: &str = "#FDD835";

/// The render decision for one apartment cell.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct UnitState {
    pub fill_color: &'static str,
    pub center_label: String,
    pub clickable: bool,
}

/// Decide fill, label, and clickability for one unit.
///
/// With the highlight flag on, only the non-conformance count matters.
/// With it off, the cases are ordered and the first match wins; there is
/// no blending between them:
///
/// 1. no initial termination date -> in progress
/// 2. 100% complete, zero pending, zero NC -> complete
/// 3. anything else -> attention
pub fn resolve_unit_state(record: Option<&ApartmentRecord>, nc_mode: bool) -> UnitState {
    let Some(record) = record else {
        return UnitState {
            fill_color: COLOR_NO_DATA,
            center_label: String::new(),
            clickable: false,
        };
    };

    if nc_mode {
        let flagged = record.nonconformances > 0;
        return UnitState {
            fill_color: if flagged { COLOR_ALERT } else { COLOR_NO_DATA },
            center_label: if flagged {
                record.duration_total.to_string()
            } else {
                String::new()
            },
            clickable: flagged,
        };
    }

    let fill_color = match record {
        r if r.termination_date_initial.is_none() => COLOR_IN_PROGRESS,
        r if r.completion_percent == 100.0 && r.pending_items == 0 && r.nonconformances == 0 => {
            COLOR_COMPLETE
        }
        _ => COLOR_ATTENTION,
    };

    UnitState {
        fill_color,
        center_label: record.duration_total.to_string(),
        clickable: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ApartmentRecord {
        ApartmentRecord {
            fvs: "FVS-01".to_string(),
            apartment: "A101".to_string(),
            pavement: None,
            duration_initial: 10,
            duration_total: 12,
            termination_date_initial: Some("2024-01-01".to_string()),
            termination_date_final: None,
            completion_percent: 100.0,
            pending_items: 0,
            nonconformances: 0,
            reopenings: Vec::new(),
            inspection_id: None,
        }
    }

    #[test]
    fn absent_record_is_gray_and_inert() {
        let state = resolve_unit_state(None, false);
        assert_eq!(state.fill_color, COLOR_NO_DATA);
        assert_eq!(state.center_label, "");
        assert!(!state.clickable);

        // Same in highlight mode.
        assert_eq!(resolve_unit_state(None, true).fill_color, COLOR_NO_DATA);
    }

    #[test]
    fn unterminated_unit_is_blue_regardless_of_other_fields() {
        let mut r = record();
        r.termination_date_initial = None;
        r.completion_percent = 100.0;
        r.pending_items = 0;
        r.nonconformances = 7;

        let state = resolve_unit_state(Some(&r), false);
        assert_eq!(state.fill_color, COLOR_IN_PROGRESS);
        assert_eq!(state.center_label, "12");
        assert!(state.clickable);
    }

    #[test]
    fn fully_closed_unit_is_green() {
        let r = record();
        assert_eq!(resolve_unit_state(Some(&r), false).fill_color, COLOR_COMPLETE);
    }

    #[test]
    fn any_leftover_turns_yellow() {
        let mut pending = record();
        pending.pending_items = 1;
        assert_eq!(
            resolve_unit_state(Some(&pending), false).fill_color,
            COLOR_ATTENTION
        );

        let mut partial = record();
        partial.completion_percent = 95.0;
        assert_eq!(
            resolve_unit_state(Some(&partial), false).fill_color,
            COLOR_ATTENTION
        );

        let mut flagged = record();
        flagged.nonconformances = 1;
        assert_eq!(
            resolve_unit_state(Some(&flagged), false).fill_color,
            COLOR_ATTENTION
        );
    }

    #[test]
    fn highlight_mode_flags_open_nonconformances() {
        let mut r = record();
        r.nonconformances = 3;

        let state = resolve_unit_state(Some(&r), true);
        assert_eq!(state.fill_color, COLOR_ALERT);
        assert_eq!(state.center_label, "12");
        assert!(state.clickable);
    }

    #[test]
    fn highlight_mode_mutes_clean_units() {
        let state = resolve_unit_state(Some(&record()), true);
        assert_eq!(state.fill_color, COLOR_NO_DATA);
        assert_eq!(state.center_label, "");
        assert!(!state.clickable);
    }
}
