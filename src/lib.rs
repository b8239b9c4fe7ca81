//! Mosaicwall is the layout and scheduling core for video mosaic walls.
//!
//! A mosaic wall places one looping clip per cell of an odd×odd grid, then
//! optionally snaps cells out one by one over a staggered reveal window and
//! reveals a still image piece by piece across a centered sub-grid. This crate
//! computes the pure arithmetic behind that wall; driving a host compositor
//! with the result is the caller's job.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `item count + canvas -> GridSpec` (or infeasible + nearest
//!    feasible counts)
//! 2. **Place**: `GridSpec + canvas -> cell centers, cover-fit scales, overlay
//!    bounds, piece windows`
//! 3. **Schedule**: `GridSpec + timing -> RevealSchedule / ImageRevealSchedule`
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure**: no IO and no shared state; the only non-determinism is the
//!   caller-supplied [`rand::Rng`] the schedulers draw from, so a seeded RNG
//!   makes every schedule reproducible.
//! - **Center-last**: the center cell's disappearance time is the unique
//!   global maximum of every schedule this crate produces.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod grid;
mod schedule;

pub use foundation::core::{Canvas, Fps, HOST_FRAME_RATE, Point, Vec2};
pub use foundation::error::{MosaicError, MosaicResult};
pub use grid::placement::{
    OverlayBounds, cell_center, overlay_bounds, piece_image_position, scale_to_fill,
};
pub use grid::resolver::{
    FeasibleNeighbors, GridCandidate, GridResolution, GridSpec, find_nearest_feasible_counts,
    find_odd_factor_pairs, resolve_optimal_grid, score_grid_candidate, select_overlay_grid_size,
};
pub use schedule::reveal::{
    CENTER_GAP_SECS, CellReveal, IMAGE_LEAD_SECS, IMAGE_REVEAL_DURATION_SECS, ImageRevealSchedule,
    PieceReveal, RevealSchedule, TimingParams, cell_disappearance_time, image_piece_reveal_time,
    image_reveal_start_time, total_composition_duration,
};
