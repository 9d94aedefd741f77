use crate::geometry::{Rect, cumulative_offsets, map_geometry};
use crate::loader::PlanSheet;
use crate::records::ApartmentRecord;
use crate::region::{Region, build_regions};
use crate::state::resolve_unit_state;
use serde::Serialize;
use std::collections::HashMap;

/// One horizontal band of the canvas, for the floor-label axis.
#[derive(Clone, Serialize, Debug)]
pub struct RowBand {
    pub label: String,
    pub y: f64,
    pub height: f64,
}

/// The fully mapped floor plan: regions with their pixel rectangles, the
/// row axis, and the canvas extent.
#[derive(Clone, Serialize, Debug)]
pub struct FloorPlan {
    pub regions: Vec<Region>,
    pub rects: Vec<Rect>,
    pub row_bands: Vec<RowBand>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

/// The complete draw instruction for one region, ready for a renderer.
#[derive(Clone, Serialize, Debug)]
pub struct CellRender {
    pub label: String,
    pub rect: Rect,
    pub fill_color: &'static str,
    pub center_label: String,
    pub clickable: bool,
}

/// Map a parsed sheet onto pixel space.
///
/// With no regions at all there is nothing to size the canvas by, so it
/// falls back to the raw hint counts instead of the cumulative extent.
pub fn build_floor_plan(sheet: &PlanSheet) -> FloorPlan {
    let col_offsets = cumulative_offsets(&sheet.col_widths);
    let row_offsets = cumulative_offsets(&sheet.row_heights);

    let regions = build_regions(&sheet.grid);
    let rects: Vec<Rect> = regions
        .iter()
        .map(|region| map_geometry(region, &col_offsets, &row_offsets))
        .collect();

    let row_bands = sheet
        .row_labels
        .iter()
        .zip(&sheet.row_heights)
        .zip(&row_offsets)
        .map(|((label, &height), &y)| RowBand {
            label: label.clone(),
            y,
            height,
        })
        .collect();

    let (canvas_width, canvas_height) = if regions.is_empty() {
        (sheet.col_widths.len() as f64, sheet.row_heights.len() as f64)
    } else {
        (
            *col_offsets.last().unwrap_or(&0.0),
            *row_offsets.last().unwrap_or(&0.0),
        )
    };

    FloorPlan {
        regions,
        rects,
        row_bands,
        canvas_width,
        canvas_height,
    }
}

/// Color every region of the plan for the current selection.
///
/// The unit index is the one built for the selected inspection set; a
/// region whose label has no entry renders as the no-data state.
pub fn render_cells(
    plan: &FloorPlan,
    unit_index: &HashMap<String, ApartmentRecord>,
    nc_mode: bool,
) -> Vec<CellRender> {
    plan.regions
        .iter()
        .zip(&plan.rects)
        .map(|(region, rect)| {
            let state = resolve_unit_state(unit_index.get(&region.label), nc_mode);
            CellRender {
                label: region.label.clone(),
                rect: *rect,
                fill_color: state.fill_color,
                center_label: state.center_label,
                clickable: state.clickable,
            }
        })
        .collect()
}
