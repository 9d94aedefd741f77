#![cfg(feature = "web")]
#![cfg(not(tarpaulin_include))]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::aggregate::aggregate_inspection_set;
use crate::fetch::{self, DataSources};
use crate::geometry::is_rectangular;
use crate::loader::parse_plan_csv;
use crate::plan::{FloorPlan, build_floor_plan, render_cells};
use crate::records::{ApartmentRecord, build_unit_index, format_date_br};

/// Shared state: source locations plus the page-session cache.
///
/// Each source is fetched once and kept for the life of the process; a
/// failed fetch leaves the other entries untouched. There is one logical
/// writer per entry (the first request that needs it), so a plain mutex
/// around the whole cache is enough.
pub struct AppState {
    sources: DataSources,
    cache: Mutex<DataCache>,
}

#[derive(Default)]
struct DataCache {
    plan: Option<FloorPlan>,
    fvs_list: Option<Vec<String>>,
    records: Option<Vec<ApartmentRecord>>,
}

#[derive(Deserialize)]
struct ModeQuery {
    nc: Option<bool>,
}

pub async fn run(sources: DataSources) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        sources,
        cache: Mutex::new(DataCache::default()),
    });

    let app = Router::new()
        .route("/", get(serve_dashboard))
        .route("/api/fvs", get(list_fvs))
        .route("/api/plan/:fvs", get(get_plan))
        .route("/api/unit/:fvs/:apartment", get(get_unit))
        .with_state(state);

    let port = std::env::var("FVS_PORT").unwrap_or_else(|_| "3000".to_string());
    let listener = TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    log::info!("dashboard listening on http://127.0.0.1:{}", port);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_dashboard() -> Html<&'static str> {
    Html(include_str!("./static/dashboard.html"))
}

/// Inspection-set dropdown data. With `nc=true` only sets that still have
/// open non-conformances are listed.
async fn list_fvs(
    Query(params): Query<ModeQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let fvs_list = match cached_fvs_list(&state).await {
        Ok(list) => list,
        Err(message) => return error_response(&message),
    };
    let records = match cached_records(&state).await {
        Ok(records) => records,
        Err(message) => return error_response(&message),
    };

    let nc_mode = params.nc.unwrap_or(false);
    let sets: Vec<serde_json::Value> = fvs_list
        .iter()
        .map(|id| aggregate_inspection_set(&records, id))
        .filter(|meta| !nc_mode || meta.nonconformance_total > 0)
        .map(|meta| {
            serde_json::json!({
                "id": meta.id,
                "label": meta.dropdown_label(),
                "primary_key_mode": meta.primary_key_mode,
                "nonconformance_total": meta.nonconformance_total,
            })
        })
        .collect();

    Json(serde_json::json!({ "sets": sets })).into_response()
}

/// Geometry plus per-cell render decisions for one inspection set.
async fn get_plan(
    Path(fvs): Path<String>,
    Query(params): Query<ModeQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let plan = match cached_plan(&state).await {
        Ok(plan) => plan,
        Err(message) => return error_response(&message),
    };
    let records = match cached_records(&state).await {
        Ok(records) => records,
        Err(message) => return error_response(&message),
    };

    // The unit index is rebuilt from scratch for every selection.
    let meta = aggregate_inspection_set(&records, &fvs);
    let unit_index = build_unit_index(&records, &fvs);
    let cells = render_cells(&plan, &unit_index, params.nc.unwrap_or(false));

    Json(serde_json::json!({
        "fvs": fvs,
        "primary_key_mode": meta.primary_key_mode,
        "canvas": { "width": plan.canvas_width, "height": plan.canvas_height },
        "rows": plan.row_bands,
        "cells": cells,
    }))
    .into_response()
}

/// Detail-modal payload for one unit of one inspection set.
async fn get_unit(
    Path((fvs, apartment)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let records = match cached_records(&state).await {
        Ok(records) => records,
        Err(message) => return error_response(&message),
    };

    let unit_index = build_unit_index(&records, &fvs);
    let Some(record) = unit_index.get(&apartment) else {
        return error_response(&format!("no record for unit {} in {}", apartment, fvs));
    };

    let reopenings: Vec<serde_json::Value> = record
        .reopenings
        .iter()
        .map(|r| {
            serde_json::json!({
                "code": r.code,
                "opening_date": format_date_br(&r.opening_date),
                "pending_items": r.pending_items,
                "nonconformances": r.nonconformances,
            })
        })
        .collect();

    Json(serde_json::json!({
        "fvs": fvs,
        "apartment": record.apartment,
        "pavement": record.pavement,
        "duration_initial": record.duration_initial,
        "duration_total": record.duration_total,
        "termination_date_initial": record.termination_date_initial.as_deref().map(format_date_br),
        "termination_date_final": record.termination_date_final.as_deref().map(format_date_br),
        "completion_percent": record.completion_percent,
        "pending_items": record.pending_items,
        "nonconformances": record.nonconformances,
        "inspection_id": record.inspection_id,
        "reopenings": reopenings,
    }))
    .into_response()
}

fn error_response(message: &str) -> Response {
    Json(serde_json::json!({ "error": message })).into_response()
}

async fn cached_plan(state: &AppState) -> Result<FloorPlan, String> {
    if let Some(plan) = state.cache.lock().unwrap().plan.clone() {
        return Ok(plan);
    }

    let text = fetch::fetch_text(&state.sources.grid_csv)
        .await
        .map_err(|e| {
            log::warn!("grid fetch failed: {}", e);
            format!("failed to load floor-plan grid: {}", e)
        })?;
    let sheet = parse_plan_csv(&text).map_err(|e| e.to_string())?;
    let plan = build_floor_plan(&sheet);

    for region in plan.regions.iter().filter(|r| !is_rectangular(r)) {
        log::warn!(
            "region {} is not rectangular; its bounding box may overlap neighbors",
            region.label
        );
    }

    state.cache.lock().unwrap().plan = Some(plan.clone());
    Ok(plan)
}

async fn cached_records(state: &AppState) -> Result<Vec<ApartmentRecord>, String> {
    if let Some(records) = state.cache.lock().unwrap().records.clone() {
        return Ok(records);
    }

    let records = fetch::fetch_records(&state.sources.records)
        .await
        .map_err(|e| {
            log::warn!("record fetch failed: {}", e);
            format!("failed to load apartment records: {}", e)
        })?;

    state.cache.lock().unwrap().records = Some(records.clone());
    Ok(records)
}

async fn cached_fvs_list(state: &AppState) -> Result<Vec<String>, String> {
    if let Some(list) = state.cache.lock().unwrap().fvs_list.clone() {
        return Ok(list);
    }

    let list = fetch::fetch_fvs_list(&state.sources.fvs_list)
        .await
        .map_err(|e| {
            log::warn!("FVS list fetch failed: {}", e);
            format!("failed to load inspection-set list: {}", e)
        })?;

    state.cache.lock().unwrap().fvs_list = Some(list.clone());
    Ok(list)
}
