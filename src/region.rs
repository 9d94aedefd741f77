use crate::grid::{EMPTY_SENTINEL, FloorGrid};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One apartment region: a maximal 4-connected run of grid positions that
/// share the same normalized label.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Region {
    pub label: String,
    pub cells: Vec<(usize, usize)>,
}

/// Group the grid into regions by breadth-first flood fill.
///
/// Positions are scanned in row-major order; each unvisited position whose
/// label is neither blank nor the empty sentinel seeds a fill over its
/// 4-directional neighbors with the identical label. Regions come out in
/// seed order, which keeps paint order deterministic.
pub fn build_regions(grid: &FloorGrid) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut visited = vec![false; grid.rows * grid.cols];
    let mut queue = VecDeque::new();

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let index = row * grid.cols + col;
            if visited[index] {
                continue;
            }
            let label = grid.label(row, col);
            if label.is_empty() || label == EMPTY_SENTINEL {
                continue;
            }

            visited[index] = true;
            queue.push_back((row, col));
            let mut cells = Vec::new();

            while let Some((r, c)) = queue.pop_front() {
                cells.push((r, c));
                for (nr, nc) in neighbors(r, c, grid.rows, grid.cols) {
                    let n_index = nr * grid.cols + nc;
                    if !visited[n_index] && grid.label(nr, nc) == label {
                        visited[n_index] = true;
                        queue.push_back((nr, nc));
                    }
                }
            }

            regions.push(Region {
                label: label.to_string(),
                cells,
            });
        }
    }

    regions
}

fn neighbors(row: usize, col: usize, rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(4);
    if row > 0 {
        out.push((row - 1, col));
    }
    if row + 1 < rows {
        out.push((row + 1, col));
    }
    if col > 0 {
        out.push((row, col - 1));
    }
    if col + 1 < cols {
        out.push((row, col + 1));
    }
    out
}
