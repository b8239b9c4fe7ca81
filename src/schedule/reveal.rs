use rand::Rng;

use crate::{
    foundation::core::Fps,
    foundation::error::{MosaicError, MosaicResult},
    grid::resolver::GridSpec,
};

/// Minimum gap in seconds between the last regular cell and the center cell.
pub const CENTER_GAP_SECS: f64 = 0.5;

/// How long before the final cell disappears the image reveal begins, seconds.
pub const IMAGE_LEAD_SECS: f64 = 3.0;

/// Default length of the image reveal window, seconds.
pub const IMAGE_REVEAL_DURATION_SECS: f64 = 3.0;

/// Timing knobs for the staggered reveal, all in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimingParams {
    /// How long every cell loops before the reveal window opens.
    pub base_duration: f64,
    /// Length of the reveal window after the base loop.
    pub effect_duration: f64,
    /// Head room inside the window; regular cells never disappear earlier
    /// than `base_duration + fade_out_duration`.
    pub fade_out_duration: f64,
}

impl TimingParams {
    /// Build params converting the fade-out head room from host frames to
    /// seconds at the given frame rate.
    pub fn from_fade_out_frames(
        base_duration: f64,
        effect_duration: f64,
        fade_out_frames: u64,
        fps: Fps,
    ) -> Self {
        Self {
            base_duration,
            effect_duration,
            fade_out_duration: fps.frames_to_secs(fade_out_frames),
        }
    }

    /// Check that the sampling window for regular cells is non-degenerate.
    ///
    /// Regular cells sample from `[base + fade, base + effect - 0.5)`; that
    /// interval is empty or reversed when `effect - fade <= 0.5`.
    pub fn validate(self) -> MosaicResult<()> {
        if self.base_duration <= 0.0 || self.effect_duration <= 0.0 {
            return Err(MosaicError::validation(
                "base and effect durations must be positive",
            ));
        }
        if self.fade_out_duration < 0.0 {
            return Err(MosaicError::validation(
                "fade-out duration must not be negative",
            ));
        }
        if self.effect_duration - self.fade_out_duration <= CENTER_GAP_SECS {
            return Err(MosaicError::timing(format!(
                "reveal window is degenerate: effect {}s minus fade {}s leaves no room before the {CENTER_GAP_SECS}s center gap",
                self.effect_duration, self.fade_out_duration
            )));
        }
        Ok(())
    }

    /// When the center cell, and with it the whole wall, disappears.
    pub fn center_end_time(self) -> f64 {
        self.base_duration + self.effect_duration
    }
}

/// Disappearance time for cell `(row, col)`.
///
/// The center cell always returns exactly `base + effect`, for any RNG state:
/// it must outlive every other cell. Every other cell draws an independent
/// uniform time from `[base + fade, base + effect - 0.5)`. Draws are not
/// deduplicated; two cells snapping out at the same instant is acceptable.
///
/// Callers must have validated `params` (see [`TimingParams::validate`]);
/// [`RevealSchedule::generate`] does so.
pub fn cell_disappearance_time<R: Rng + ?Sized>(
    rng: &mut R,
    row: u32,
    col: u32,
    spec: GridSpec,
    params: TimingParams,
) -> f64 {
    if spec.is_center(row, col) {
        return params.center_end_time();
    }
    let min_end = params.base_duration + params.fade_out_duration;
    let max_end = params.center_end_time() - CENTER_GAP_SECS;
    min_end + rng.random::<f64>() * (max_end - min_end)
}

/// Appearance time for one overlay piece: `start + uniform(0, duration)`.
///
/// Independent per call; no ordering between pieces is guaranteed.
pub fn image_piece_reveal_time<R: Rng + ?Sized>(
    rng: &mut R,
    start_time: f64,
    reveal_duration: f64,
) -> f64 {
    start_time + rng.random::<f64>() * reveal_duration
}

/// When the image reveal window opens: [`IMAGE_LEAD_SECS`] before the last
/// cell disappears (`base + effect` when staggered, `base` otherwise).
pub fn image_reveal_start_time(base_duration: f64, effect_duration: f64, staggered: bool) -> f64 {
    let last_cell_time = if staggered {
        base_duration + effect_duration
    } else {
        base_duration
    };
    last_cell_time - IMAGE_LEAD_SECS
}

/// Total composition duration in seconds.
///
/// Long enough for the last cell to disappear and, when an image is present,
/// for its reveal window to play out in full regardless of loop settings.
pub fn total_composition_duration(
    base_duration: f64,
    effect_duration: f64,
    staggered: bool,
    has_image: bool,
    image_reveal_duration: f64,
) -> f64 {
    let last_cell_time = if staggered {
        base_duration + effect_duration
    } else {
        base_duration
    };
    let mut duration = last_cell_time;
    if has_image {
        let image_end = (last_cell_time - IMAGE_LEAD_SECS) + image_reveal_duration;
        duration = duration.max(image_end);
    }
    duration
}

/// One cell's disappearance entry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellReveal {
    /// Grid row of the cell.
    pub row: u32,
    /// Grid column of the cell.
    pub col: u32,
    /// Absolute time the cell snaps out, seconds.
    pub disappear_at: f64,
}

/// Disappearance times for every cell of a grid, center strictly last.
///
/// Entries are stored in row-major order, one per cell.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealSchedule {
    grid: GridSpec,
    cells: Vec<CellReveal>,
}

impl RevealSchedule {
    /// Generate a schedule for every cell of `spec`.
    ///
    /// Validates `params` first, then draws one time per cell from `rng`.
    /// Rerunning with a differently seeded RNG gives a different schedule;
    /// the center entry is identical across all of them.
    #[tracing::instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(
        spec: GridSpec,
        params: TimingParams,
        rng: &mut R,
    ) -> MosaicResult<Self> {
        params.validate()?;

        let mut cells = Vec::with_capacity(spec.cell_count() as usize);
        for row in 0..spec.rows() {
            for col in 0..spec.cols() {
                cells.push(CellReveal {
                    row,
                    col,
                    disappear_at: cell_disappearance_time(rng, row, col, spec, params),
                });
            }
        }
        tracing::debug!(
            cells = cells.len(),
            center_end = params.center_end_time(),
            "reveal schedule generated"
        );
        Ok(Self { grid: spec, cells })
    }

    /// Grid this schedule was generated for.
    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    /// All cell entries in row-major order.
    pub fn cells(&self) -> &[CellReveal] {
        &self.cells
    }

    /// Disappearance time for `(row, col)`, if the cell exists.
    pub fn time_for(&self, row: u32, col: u32) -> Option<f64> {
        if row >= self.grid.rows() || col >= self.grid.cols() {
            return None;
        }
        let idx = (row * self.grid.cols() + col) as usize;
        Some(self.cells[idx].disappear_at)
    }

    /// Time the center cell, and with it the wall, disappears.
    pub fn center_time(&self) -> f64 {
        let idx = (self.grid.center_row() * self.grid.cols() + self.grid.center_col()) as usize;
        self.cells[idx].disappear_at
    }
}

/// One overlay piece's appearance entry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PieceReveal {
    /// Row of the piece within the overlay grid.
    pub piece_row: u32,
    /// Column of the piece within the overlay grid.
    pub piece_col: u32,
    /// Absolute time the piece snaps in, seconds.
    pub appear_at: f64,
}

/// Appearance times for every piece of an N×N image overlay.
///
/// Every time lies in `[start_time, start_time + reveal_duration)`. There is
/// deliberately no ordering or uniqueness between pieces: each draw is
/// independent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageRevealSchedule {
    size: u32,
    start_time: f64,
    reveal_duration: f64,
    pieces: Vec<PieceReveal>,
}

impl ImageRevealSchedule {
    /// Generate appearance times for a `size`×`size` overlay.
    ///
    /// `size` must be one of the supported overlay grid sizes (3, 5, 7) as
    /// chosen by [`crate::select_overlay_grid_size`].
    #[tracing::instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(
        size: u32,
        start_time: f64,
        reveal_duration: f64,
        rng: &mut R,
    ) -> MosaicResult<Self> {
        if !matches!(size, 3 | 5 | 7) {
            return Err(MosaicError::validation(format!(
                "unsupported overlay grid size {size}"
            )));
        }
        if reveal_duration <= 0.0 {
            return Err(MosaicError::timing(
                "image reveal duration must be positive",
            ));
        }

        let mut pieces = Vec::with_capacity((size * size) as usize);
        for piece_row in 0..size {
            for piece_col in 0..size {
                pieces.push(PieceReveal {
                    piece_row,
                    piece_col,
                    appear_at: image_piece_reveal_time(rng, start_time, reveal_duration),
                });
            }
        }
        Ok(Self {
            size,
            start_time,
            reveal_duration,
            pieces,
        })
    }

    /// Overlay grid size N.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Start of the reveal window, seconds.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Length of the reveal window, seconds.
    pub fn reveal_duration(&self) -> f64 {
        self.reveal_duration
    }

    /// All piece entries in row-major order.
    pub fn pieces(&self) -> &[PieceReveal] {
        &self.pieces
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/reveal.rs"]
mod tests;
