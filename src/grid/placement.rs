use kurbo::Point;

use crate::{
    foundation::core::Canvas,
    foundation::error::{MosaicError, MosaicResult},
    grid::resolver::GridSpec,
};

/// Half-open row/column range of a centered overlay inside the full grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OverlayBounds {
    /// First grid row covered by the overlay.
    pub start_row: u32,
    /// One past the last covered row.
    pub end_row: u32,
    /// First grid column covered by the overlay.
    pub start_col: u32,
    /// One past the last covered column.
    pub end_col: u32,
}

impl OverlayBounds {
    /// Whether grid cell `(row, col)` lies under the overlay.
    pub fn contains(self, row: u32, col: u32) -> bool {
        self.start_row <= row && row < self.end_row && self.start_col <= col && col < self.end_col
    }
}

/// Center point of cell `(row, col)` on the canvas.
///
/// Host layers are anchored at their center, so this is the position to
/// assign to the cell's layer.
pub fn cell_center(spec: GridSpec, canvas: Canvas, row: u32, col: u32) -> Point {
    let (cell_w, cell_h) = spec.cell_size(canvas);
    Point::new(
        (f64::from(col) + 0.5) * cell_w,
        (f64::from(row) + 0.5) * cell_h,
    )
}

/// Uniform cover-fit scale factor that makes a source fill a target box.
///
/// Takes the larger of the two axis ratios so no empty space remains;
/// overflow on the other axis is expected and cropped by the host viewport.
pub fn scale_to_fill(
    source_w: f64,
    source_h: f64,
    target_w: f64,
    target_h: f64,
) -> MosaicResult<f64> {
    if source_w <= 0.0 || source_h <= 0.0 || target_w <= 0.0 || target_h <= 0.0 {
        return Err(MosaicError::validation(format!(
            "cannot scale to fill: source {source_w}x{source_h}, target {target_w}x{target_h}"
        )));
    }
    Ok((target_w / source_w).max(target_h / source_h))
}

/// Row/column range of a centered `size`×`size` overlay inside the grid.
///
/// `size` must be odd so the overlay shares the grid's center cell, and the
/// grid must leave at least one cell of margin on every side.
pub fn overlay_bounds(spec: GridSpec, size: u32) -> MosaicResult<OverlayBounds> {
    if size == 0 || size % 2 == 0 {
        return Err(MosaicError::validation(format!(
            "overlay size must be a positive odd number, got {size}"
        )));
    }
    if size + 2 > spec.rows().min(spec.cols()) {
        return Err(MosaicError::validation(format!(
            "{size}x{size} overlay does not fit inside a {}x{} grid with margin",
            spec.rows(),
            spec.cols()
        )));
    }

    let half = size / 2;
    Ok(OverlayBounds {
        start_row: spec.center_row() - half,
        end_row: spec.center_row() + half + 1,
        start_col: spec.center_col() - half,
        end_col: spec.center_col() + half + 1,
    })
}

/// Position of the scaled full image inside one overlay piece's viewport.
///
/// Every piece holds its own copy of the image scaled to cover the whole
/// overlay area; only a cell-sized window of it shows through. The image
/// center is shifted opposite to the piece's offset from the overlay center,
/// so the windows tile seamlessly: the top-left piece shifts the image right
/// and down, the bottom-right piece left and up.
pub fn piece_image_position(
    size: u32,
    piece_row: u32,
    piece_col: u32,
    cell_w: f64,
    cell_h: f64,
) -> Point {
    let center_index = f64::from(size / 2);
    let col_offset = f64::from(piece_col) - center_index;
    let row_offset = f64::from(piece_row) - center_index;
    Point::new(
        cell_w / 2.0 - col_offset * cell_w,
        cell_h / 2.0 - row_offset * cell_h,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/grid/placement.rs"]
mod tests;
