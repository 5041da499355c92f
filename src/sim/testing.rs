//! Test helpers: reference distance transforms and map builders

use super::field::ClearanceField;
use super::pose::Pose2D;

/// Leaves the thresholded grid untouched
pub fn identity_transform(_cells: &mut [f64], _rows: usize, _cols: usize, _resolution: f64) {}

/// Exact Euclidean distance between cell centres, O(n^2)
///
/// Grids without any occupied cell keep the free sentinel.
pub fn brute_force_transform(cells: &mut [f64], rows: usize, cols: usize, resolution: f64) {
    let occupied: Vec<(usize, usize)> = (0..rows * cols)
        .filter(|&i| cells[i] == 0.0)
        .map(|i| (i / cols, i % cols))
        .collect();
    if occupied.is_empty() {
        return;
    }

    for row in 0..rows {
        for col in 0..cols {
            let i = row * cols + col;
            if cells[i] == 0.0 {
                continue;
            }
            let nearest = occupied
                .iter()
                .map(|&(r, c)| {
                    let dr = r as f64 - row as f64;
                    let dc = c as f64 - col as f64;
                    (dr * dr + dc * dc).sqrt()
                })
                .fold(f64::INFINITY, f64::min);
            cells[i] = nearest * resolution;
        }
    }
}

/// Raw occupancy: free interior, one-cell occupied border
pub fn walled_room(rows: usize, cols: usize) -> Vec<f64> {
    let mut raw = vec![0.0; rows * cols];
    for row in 0..rows {
        for col in 0..cols {
            if row == 0 || col == 0 || row == rows - 1 || col == cols - 1 {
                raw[row * cols + col] = 100.0;
            }
        }
    }
    raw
}

/// 10 x 10 world-unit room at the origin, 0.25 resolution
pub fn room_field() -> ClearanceField {
    let raw = walled_room(40, 40);
    ClearanceField::from_occupancy(
        &raw,
        40,
        40,
        0.25,
        Pose2D::default(),
        50.0,
        &brute_force_transform,
    )
    .expect("valid room")
}

/// Everything free; the distance transform sees no obstacle
pub fn open_field(rows: usize, cols: usize, resolution: f64) -> ClearanceField {
    let raw = vec![0.0; rows * cols];
    ClearanceField::from_occupancy(
        &raw,
        rows,
        cols,
        resolution,
        Pose2D::default(),
        50.0,
        &brute_force_transform,
    )
    .expect("valid open map")
}

/// Logger for tests; repeated calls are harmless
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
