use crate::geometry::{DEFAULT_COL_WIDTH, DEFAULT_ROW_HEIGHT, parse_size_hint};
use crate::grid::{FloorGrid, expand_row, normalize_label};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::Path;

/// First grid column in the sheet. Column 0 is the row label (pavement
/// name), column 1 the row-height hint; the header row carries the
/// column-width hints from this offset on.
pub const GRID_COL_OFFSET: usize = 2;

/// Parsed plan sheet: the normalized grid plus the layout hints that came
/// with it.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlanSheet {
    pub grid: FloorGrid,
    pub row_labels: Vec<String>,
    pub col_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
}

/// Parse the floor-plan CSV export.
///
/// Row 0 is the header; its cells from [`GRID_COL_OFFSET`] on are the
/// column-width hints and fix the grid's column count. Each remaining row
/// contributes a row label, a height hint, and one grid row, which is
/// carry-forward expanded and label-normalized. A data row whose grid
/// portion does not match the header's column count is rejected so the
/// grouper never sees a ragged grid.
///
/// # Examples
/// ```
/// use fvs_dashboard::loader::parse_plan_csv;
///
/// let csv = ",,50,60\nTerreo,30,A101,A101\nPav 1,40,!A201,\n";
/// let sheet = parse_plan_csv(csv).unwrap();
/// assert_eq!(sheet.grid.rows, 2);
/// assert_eq!(sheet.grid.label(1, 1), "A201");
/// ```
pub fn parse_plan_csv(text: &str) -> Result<PlanSheet, Box<dyn Error + Send + Sync>> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err("plan CSV is empty".into());
    }

    let header = parse_csv_row(lines[0]);
    if header.len() <= GRID_COL_OFFSET {
        return Err("plan CSV header has no grid columns".into());
    }
    let col_widths: Vec<f64> = header[GRID_COL_OFFSET..]
        .iter()
        .map(|cell| parse_size_hint(cell, DEFAULT_COL_WIDTH))
        .collect();
    let cols = col_widths.len();

    let mut row_labels = Vec::new();
    let mut row_heights = Vec::new();
    let mut grid_rows = Vec::new();

    for (line_no, line) in lines.iter().enumerate().skip(1) {
        let cells = parse_csv_row(line);
        if cells.len() != cols + GRID_COL_OFFSET {
            return Err(format!(
                "ragged plan CSV: line {} has {} grid columns, header has {}",
                line_no + 1,
                cells.len().saturating_sub(GRID_COL_OFFSET),
                cols
            )
            .into());
        }

        row_labels.push(cells[0].trim().to_string());
        row_heights.push(parse_size_hint(&cells[1], DEFAULT_ROW_HEIGHT));

        let expanded = expand_row(&cells[GRID_COL_OFFSET..]);
        grid_rows.push(expanded.iter().map(|c| normalize_label(c)).collect());
    }

    if grid_rows.is_empty() {
        return Err("plan CSV has no data rows".into());
    }

    let grid = FloorGrid::from_rows(grid_rows)?;
    Ok(PlanSheet {
        grid,
        row_labels,
        col_widths,
        row_heights,
    })
}

/// Read and parse a plan sheet from disk.
pub fn load_plan(filepath: impl AsRef<Path>) -> Result<PlanSheet, Box<dyn Error + Send + Sync>> {
    let text = fs::read_to_string(filepath)?;
    parse_plan_csv(&text)
}

// Split a CSV row into fields, honoring quoted fields and doubled quotes.
fn parse_csv_row(line: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if let Some(&next) = chars.peek() {
                    if next == '"' && in_quotes {
                        // Doubled quote inside a quoted field.
                        current_field.push('"');
                        chars.next();
                    } else {
                        in_quotes = !in_quotes;
                    }
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                result.push(current_field);
                current_field = String::new();
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    result.push(current_field);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Bloco A,,50,60,70
Pav 2,40,A201,A201,VAZIO
Pav 1,30,!A101,,A102
Terreo,,Hall,Hall,Hall
";

    #[test]
    fn parses_hints_and_grid() {
        let sheet = parse_plan_csv(SAMPLE).unwrap();

        assert_eq!(sheet.col_widths, vec![50.0, 60.0, 70.0]);
        // Missing height hint falls back.
        assert_eq!(sheet.row_heights, vec![40.0, 30.0, DEFAULT_ROW_HEIGHT]);
        assert_eq!(sheet.row_labels, vec!["Pav 2", "Pav 1", "Terreo"]);

        assert_eq!(sheet.grid.rows, 3);
        assert_eq!(sheet.grid.cols, 3);
        // Marker stripped, carry-forward applied.
        assert_eq!(sheet.grid.label(1, 0), "A101");
        assert_eq!(sheet.grid.label(1, 1), "A101");
        assert_eq!(sheet.grid.label(1, 2), "A102");
        assert_eq!(sheet.grid.label(0, 2), "VAZIO");
    }

    #[test]
    fn missing_width_hints_fall_back() {
        let sheet = parse_plan_csv(",,50,,wide\nPav 1,30,A,A,A\n").unwrap();
        assert_eq!(
            sheet.col_widths,
            vec![50.0, DEFAULT_COL_WIDTH, DEFAULT_COL_WIDTH]
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = parse_plan_csv(",,50,60\nPav 1,30,A101\n").unwrap_err();
        assert!(err.to_string().contains("ragged"));
    }

    #[test]
    fn rejects_empty_and_headerless_input() {
        assert!(parse_plan_csv("").is_err());
        assert!(parse_plan_csv("label,height\n").is_err());
        assert!(parse_plan_csv(",,50,60\n").is_err());
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let sheet = parse_plan_csv(",,50\n\"Pav 1, Bloco A\",30,A101\n").unwrap();
        assert_eq!(sheet.row_labels, vec!["Pav 1, Bloco A"]);
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let sheet = load_plan(file.path()).unwrap();
        assert_eq!(sheet.grid.rows, 3);
    }
}
