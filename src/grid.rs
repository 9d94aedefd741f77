use serde::{Deserialize, Serialize};

/// Canonical label for cells the floor plan leaves unused.
///
/// The spreadsheet marks holes in the plan (stairwells, shafts, missing
/// units) with the token `vazio` in any casing; normalization folds every
/// spelling onto this constant.
pub const EMPTY_SENTINEL: &str = "VAZIO";

/// Marker prefixed to a label on the first cell of a merged run.
pub const MERGE_MARKER: char = '!';

/// Normalized floor-plan grid, row-major.
///
/// Only the grid portion of the sheet lives here; the two leading metadata
/// columns (row label, row-height hint) are split off by the loader.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct FloorGrid {
    pub rows: usize,
    pub cols: usize,
    pub labels: Vec<String>,
}

impl FloorGrid {
    /// Build a grid from already-expanded, already-normalized rows.
    ///
    /// Every row must have the same non-zero column count. Ragged input is
    /// rejected here so the grouper can index freely.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, String> {
        let cols = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err("floor-plan grid has no columns".to_string()),
        };

        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(format!(
                    "ragged grid: row {} has {} columns, expected {}",
                    r,
                    row.len(),
                    cols
                ));
            }
        }

        let row_count = rows.len();
        let mut labels = Vec::with_capacity(row_count * cols);
        for row in rows {
            labels.extend(row);
        }

        Ok(FloorGrid {
            rows: row_count,
            cols,
            labels,
        })
    }

    pub fn label(&self, row: usize, col: usize) -> &str {
        &self.labels[row * self.cols + col]
    }
}

/// Carry-forward fill over one raw row.
///
/// The spreadsheet export represents a merged run of cells as one leading
/// value followed by blanks; scanning left to right, each blank inherits
/// the last non-blank value seen in the row. Blanks before the first value
/// stay blank.
pub fn expand_row(cells: &[String]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(cells.len());
    let mut carry: Option<&str> = None;

    for cell in cells {
        if cell.trim().is_empty() {
            expanded.push(carry.unwrap_or("").to_string());
        } else {
            carry = Some(cell);
            expanded.push(cell.clone());
        }
    }

    expanded
}

/// Normalize one raw cell label.
///
/// Trims whitespace, folds any casing of the empty token onto
/// [`EMPTY_SENTINEL`], and strips one leading [`MERGE_MARKER`] if present.
/// Blank input stays blank.
pub fn normalize_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.eq_ignore_ascii_case("vazio") {
        return EMPTY_SENTINEL.to_string();
    }

    match trimmed.strip_prefix(MERGE_MARKER) {
        Some(rest) => rest.to_string(),
        None => trimmed.to_string(),
    }
}
