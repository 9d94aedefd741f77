use fvs_dashboard::aggregate::aggregate_inspection_set;
use fvs_dashboard::loader::parse_plan_csv;
use fvs_dashboard::plan::{build_floor_plan, render_cells};
use fvs_dashboard::records::{ApartmentRecord, build_unit_index};
use fvs_dashboard::state::{COLOR_ALERT, COLOR_COMPLETE, COLOR_IN_PROGRESS};

const PLAN_CSV: &str = "\
Bloco A,,50,60,70
Pav 2,40,!A201,,A202
Pav 1,40,A101,A102,A102
Terreo,30,VAZIO,Hall,VAZIO
";

fn record(apartment: &str) -> ApartmentRecord {
    serde_json::from_value(serde_json::json!({
        "fvs": "FVS-01",
        "apartment": apartment,
        "duration_initial": 10,
        "duration_total": 14,
        "termination_date_initial": "2024-01-15",
        "completion_percent": 100.0,
        "pending_items": 0,
        "nonconformances": 0,
    }))
    .unwrap()
}

fn main() {
    println!("=== Floor-Plan Pipeline Test ===\n");

    println!("Test 1: CSV parse and grid expansion");
    let sheet = parse_plan_csv(PLAN_CSV).unwrap();
    assert_eq!(sheet.grid.rows, 3);
    assert_eq!(sheet.grid.cols, 3);
    assert_eq!(sheet.grid.label(0, 1), "A201");
    println!("Sheet parsed: {}x{} grid - PASS\n", sheet.grid.rows, sheet.grid.cols);

    println!("Test 2: Region grouping");
    let plan = build_floor_plan(&sheet);
    let labels: Vec<&str> = plan.regions.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["A201", "A202", "A101", "A102", "Hall"]);
    println!("{} regions in seed order - PASS\n", plan.regions.len());

    println!("Test 3: Pixel geometry");
    assert_eq!(plan.canvas_width, 180.0);
    assert_eq!(plan.canvas_height, 110.0);
    // A201 covers the first two columns of the top band.
    assert_eq!(plan.rects[0].width, 110.0);
    assert_eq!(plan.rects[0].height, 40.0);
    println!("Canvas {}x{} - PASS\n", plan.canvas_width, plan.canvas_height);

    println!("Test 4: Unit states, normal mode");
    let mut records = vec![record("A201"), record("A101"), record("A102")];
    records[1].termination_date_initial = None;
    records[2].nonconformances = 2;

    let meta = aggregate_inspection_set(&records, "FVS-01");
    assert_eq!(meta.nonconformance_total, 2);

    let index = build_unit_index(&records, "FVS-01");
    let cells = render_cells(&plan, &index, false);
    assert_eq!(cells[0].fill_color, COLOR_COMPLETE);
    assert_eq!(cells[2].fill_color, COLOR_IN_PROGRESS);
    assert_eq!(cells[0].center_label, "14");
    println!("Normal-mode colors - PASS\n");

    println!("Test 5: Unit states, non-conformance mode");
    let highlighted = render_cells(&plan, &index, true);
    assert_eq!(highlighted[3].fill_color, COLOR_ALERT);
    assert!(highlighted[3].clickable);
    assert!(!highlighted[0].clickable);
    println!("Highlight-mode colors - PASS\n");

    println!("All tests completed.");
}
