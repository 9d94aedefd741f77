/*!
# FVS Floor-Plan Dashboard

A browser-based dashboard that renders a building floor plan as a grid of
colored apartment cells, driven by construction-inspection (FVS) progress
data.

## Overview

The floor plan comes from a spreadsheet CSV export that uses the merged-cell
convention: each merged run of cells carries its value once and leaves the
rest blank. The core expands that sparse grid, groups same-label cells into
apartment regions, maps them onto pixel coordinates from per-column and
per-row size hints, and colors each region from the selected inspection
set's records under two semantic modes (normal progress and non-conformance
highlighting).

## Architecture

The pipeline is a chain of pure, synchronous stages over already-resident
data:

- **Grid Builder** - carry-forward expansion and label normalization
- **Region Grouper** - breadth-first flood fill into apartment regions
- **Coordinate Mapper** - size hints to cumulative offsets and bounding boxes
- **Unit State Resolver** - strict-priority color and label decision per unit
- **Inspection Aggregator** - per-set dedup and non-conformance totals

The web layer fetches the three data sources (plan CSV, inspection-set list
JSON, apartment-record JSON), caches them for the session, and serves the
render decisions to an embedded single-page renderer.

## Modules

- **grid**: raw row expansion and label normalization
- **region**: flood-fill grouping into regions
- **geometry**: size-hint parsing, cumulative offsets, bounding rectangles
- **records**: apartment-record model, unit index, date formatting
- **state**: per-unit color/label/clickability resolution
- **aggregate**: inspection-set summaries for the dropdown
- **loader**: plan CSV parsing
- **plan**: pipeline assembly and render decisions
- **fetch**: data-source client (feature `web`)
- **app**: routing and shared cache (feature `web`)

## REST API Endpoints

- `GET /` - dashboard page
- `GET /api/fvs?nc=<bool>` - annotated inspection-set list
- `GET /api/plan/{fvs}?nc=<bool>` - canvas, row axis, per-cell decisions
- `GET /api/unit/{fvs}/{apartment}` - detail-modal payload
*/

pub mod aggregate;
#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod fetch;
pub mod geometry;
pub mod grid;
pub mod loader;
pub mod plan;
pub mod records;
pub mod region;
pub mod state;

/// Re-export the core types to make the pipeline easier to drive.
pub use aggregate::*;
pub use geometry::*;
pub use grid::*;
pub use loader::*;
pub use plan::*;
pub use records::*;
pub use region::*;
pub use state::*;
