use crate::region::Region;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fallback column width in pixels when the header hint is missing or not
/// numeric.
pub const DEFAULT_COL_WIDTH: f64 = 50.0;
/// Fallback row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 30.0;

lazy_static! {
    // Positive number, decimal comma or point accepted.
    static ref SIZE_HINT_REGEX: Regex = Regex::new(r"^[0-9]+([.,][0-9]+)?$").unwrap();
}

/// Pixel rectangle, origin at the top-left of the canvas.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Parse one size hint cell.
///
/// The sheet writes sizes the way the spreadsheet UI shows them, so a
/// decimal comma is as likely as a decimal point. Anything that is not a
/// positive number falls back to the given default.
pub fn parse_size_hint(raw: &str, fallback: f64) -> f64 {
    let trimmed = raw.trim();
    if !SIZE_HINT_REGEX.is_match(trimmed) {
        return fallback;
    }
    let value = trimmed.replace(',', ".").parse::<f64>().unwrap_or(fallback);
    if value > 0.0 { value } else { fallback }
}

/// Prefix sums over the sizes: `offsets[i]` is where slot `i` starts and
/// the final entry is the total extent.
pub fn cumulative_offsets(sizes: &[f64]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(sizes.len() + 1);
    let mut total = 0.0;
    offsets.push(0.0);
    for size in sizes {
        total += size;
        offsets.push(total);
    }
    offsets
}

/// Bounding pixel rectangle of a region's member cells.
///
/// Spans from the min column/row origin to the offset one past the max, so
/// a visually rectangular region tiles its cells exactly. The offsets must
/// come from [`cumulative_offsets`] over the full hint lists.
pub fn map_geometry(region: &Region, col_offsets: &[f64], row_offsets: &[f64]) -> Rect {
    let mut min_row = usize::MAX;
    let mut max_row = 0;
    let mut min_col = usize::MAX;
    let mut max_col = 0;

    for &(row, col) in &region.cells {
        min_row = min_row.min(row);
        max_row = max_row.max(row);
        min_col = min_col.min(col);
        max_col = max_col.max(col);
    }

    let x = col_offsets[min_col];
    let y = row_offsets[min_row];
    Rect {
        x,
        y,
        width: col_offsets[max_col + 1] - x,
        height: row_offsets[max_row + 1] - y,
    }
}

/// Whether the region's cells fill their bounding row/column span.
///
/// The bounding-box geometry assumes every same-label region is visually
/// rectangular; an L-shaped or hollow region still gets its bounding box,
/// which may overlap siblings, so callers warn on a `false` here.
pub fn is_rectangular(region: &Region) -> bool {
    let mut min_row = usize::MAX;
    let mut max_row = 0;
    let mut min_col = usize::MAX;
    let mut max_col = 0;

    for &(row, col) in &region.cells {
        min_row = min_row.min(row);
        max_row = max_row.max(row);
        min_col = min_col.min(col);
        max_col = max_col.max(col);
    }

    let span = (max_row - min_row + 1) * (max_col - min_col + 1);
    region.cells.len() == span
}
