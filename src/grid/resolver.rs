use crate::foundation::{
    core::Canvas,
    error::{MosaicError, MosaicResult},
};

const SQUARENESS_WEIGHT: f64 = 0.7;
const BALANCE_WEIGHT: f64 = 0.3;

/// How far above an infeasible item count the neighbor scan looks (exclusive).
const FEASIBLE_SCAN_WINDOW: u32 = 200;

/// One odd×odd factor pair of an item count.
///
/// `(rows, cols)` and `(cols, rows)` are distinct candidates: they describe
/// different physical orientations of the same factorization, and the scorer
/// rates them differently on a non-square canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridCandidate {
    /// Row count (odd).
    pub rows: u32,
    /// Column count (odd).
    pub cols: u32,
}

/// The chosen mosaic layout: an odd×odd grid with a unique center cell.
///
/// Both dimensions are odd by construction, so `(rows / 2, cols / 2)` always
/// names exactly one cell. The center coordinates are recomputed from the
/// dimensions on every access rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridSpec {
    rows: u32,
    cols: u32,
}

impl GridSpec {
    /// Build a spec from explicit dimensions; both must be odd and positive.
    pub fn new(rows: u32, cols: u32) -> MosaicResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(MosaicError::validation("grid dimensions must be positive"));
        }
        if rows % 2 == 0 || cols % 2 == 0 {
            return Err(MosaicError::validation(format!(
                "grid dimensions must both be odd, got {rows}x{cols}"
            )));
        }
        Ok(Self { rows, cols })
    }

    /// Row count.
    pub fn rows(self) -> u32 {
        self.rows
    }

    /// Column count.
    pub fn cols(self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    pub fn cell_count(self) -> u32 {
        self.rows * self.cols
    }

    /// Row of the center cell (0-indexed).
    pub fn center_row(self) -> u32 {
        self.rows / 2
    }

    /// Column of the center cell (0-indexed).
    pub fn center_col(self) -> u32 {
        self.cols / 2
    }

    /// Whether `(row, col)` is the unique center cell.
    pub fn is_center(self, row: u32, col: u32) -> bool {
        row == self.center_row() && col == self.center_col()
    }

    /// Cell dimensions in pixels on the given canvas, as `(width, height)`.
    pub fn cell_size(self, canvas: Canvas) -> (f64, f64) {
        (
            f64::from(canvas.width) / f64::from(self.cols),
            f64::from(canvas.height) / f64::from(self.rows),
        )
    }
}

/// Nearest item counts around an infeasible one that admit an odd×odd grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeasibleNeighbors {
    /// Closest feasible count strictly below the requested one, if any.
    pub below: Option<u32>,
    /// Closest feasible count strictly above, within the scan window.
    pub above: Option<u32>,
}

/// Outcome of grid resolution.
///
/// Infeasibility is an expected result, not an error: every even item count
/// lands here, and the neighbors tell the caller how many clips to add or
/// remove to get a working wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GridResolution {
    /// A best-scoring odd×odd grid was found.
    Resolved(GridSpec),
    /// No odd×odd factorization exists for the item count.
    Infeasible(FeasibleNeighbors),
}

/// Enumerate every odd×odd factor pair of `n`, ascending by row count.
///
/// Both orientations of each factorization are emitted. The result is empty
/// for `n == 0` and for every even `n`; any odd `n >= 1` has at least
/// `(1, n)` and `(n, 1)`.
pub fn find_odd_factor_pairs(n: u32) -> Vec<GridCandidate> {
    let mut pairs = Vec::new();
    let mut rows = 1u32;
    while rows <= n {
        if n % rows == 0 {
            let cols = n / rows;
            if cols % 2 == 1 {
                pairs.push(GridCandidate { rows, cols });
            }
        }
        rows += 2;
    }
    pairs
}

/// Score a candidate layout on a canvas; higher is better.
///
/// `squareness` peaks at 1.0 when cells come out square and degrades linearly
/// with cell aspect deviation (unclamped, extreme ratios go negative).
/// `balance` is 1.0 for a square grid shape and shrinks toward 0 for long
/// thin grids. The 70/30 blend is a fixed design constant.
pub fn score_grid_candidate(candidate: GridCandidate, canvas: Canvas) -> f64 {
    let cell_w = f64::from(canvas.width) / f64::from(candidate.cols);
    let cell_h = f64::from(canvas.height) / f64::from(candidate.rows);
    let squareness = 1.0 - (1.0 - cell_w / cell_h).abs();

    let smaller = candidate.rows.min(candidate.cols);
    let larger = candidate.rows.max(candidate.cols);
    let balance = f64::from(smaller) / f64::from(larger);

    squareness * SQUARENESS_WEIGHT + balance * BALANCE_WEIGHT
}

/// Pick the best-scoring odd×odd grid for `item_count` clips on `canvas`.
///
/// Exhaustive over the (always small) candidate set. Ties keep the
/// first-seen candidate because the comparison is strict. Returns
/// [`GridResolution::Infeasible`] with nearest feasible counts when no
/// candidate exists; inputs of zero are validation errors.
#[tracing::instrument]
pub fn resolve_optimal_grid(item_count: u32, canvas: Canvas) -> MosaicResult<GridResolution> {
    if item_count == 0 {
        return Err(MosaicError::validation("item count must be positive"));
    }
    if canvas.width == 0 || canvas.height == 0 {
        return Err(MosaicError::validation("canvas dimensions must be positive"));
    }

    let candidates = find_odd_factor_pairs(item_count);
    if candidates.is_empty() {
        let neighbors = find_nearest_feasible_counts(item_count);
        tracing::debug!(item_count, ?neighbors, "no odd factor pair exists");
        return Ok(GridResolution::Infeasible(neighbors));
    }

    let mut best = candidates[0];
    let mut best_score = score_grid_candidate(best, canvas);
    for &candidate in &candidates[1..] {
        let score = score_grid_candidate(candidate, canvas);
        if score > best_score {
            best_score = score;
            best = candidate;
        }
    }
    tracing::debug!(
        rows = best.rows,
        cols = best.cols,
        score = best_score,
        "grid resolved"
    );
    Ok(GridResolution::Resolved(GridSpec::new(best.rows, best.cols)?))
}

/// Find the closest feasible item counts below and above `item_count`.
///
/// The downward scan always terminates (1 factors as `(1, 1)`); the upward
/// scan is bounded to `item_count + 200` and reports `None` past it.
pub fn find_nearest_feasible_counts(item_count: u32) -> FeasibleNeighbors {
    let below = (1..item_count)
        .rev()
        .find(|&count| !find_odd_factor_pairs(count).is_empty());
    let above = (item_count.saturating_add(1)..item_count.saturating_add(FEASIBLE_SCAN_WINDOW))
        .find(|&count| !find_odd_factor_pairs(count).is_empty());
    FeasibleNeighbors { below, above }
}

/// Choose the largest odd overlay grid size that fits centered in the grid.
///
/// Fixed thresholds keep a margin of cells around the overlay. `None` means
/// the grid is too small to host an image reveal at all; the caller must
/// disable the feature even if an image was supplied.
pub fn select_overlay_grid_size(rows: u32, cols: u32) -> Option<u32> {
    let cells = u64::from(rows) * u64::from(cols);
    let min_dim = rows.min(cols);

    if min_dim >= 11 && cells >= 121 {
        return Some(7);
    }
    if min_dim >= 9 && cells >= 81 {
        return Some(5);
    }
    if min_dim >= 7 && cells >= 49 {
        return Some(3);
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/grid/resolver.rs"]
mod tests;
