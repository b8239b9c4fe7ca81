use super::*;
use crate::{GridSpec, HOST_FRAME_RATE};
use rand::{SeedableRng, rngs::StdRng};

fn params() -> TimingParams {
    TimingParams {
        base_duration: 60.0,
        effect_duration: 10.0,
        fade_out_duration: 1.0,
    }
}

fn spec(rows: u32, cols: u32) -> GridSpec {
    GridSpec::new(rows, cols).unwrap()
}

#[test]
fn center_cell_always_ends_exactly_last() {
    let grid = spec(5, 5);
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        let t = cell_disappearance_time(&mut rng, 2, 2, grid, params());
        assert_eq!(t, 70.0);
    }
}

#[test]
fn non_center_samples_stay_inside_the_window() {
    // Window is [61.0, 69.5): base + fade up to base + effect minus the gap.
    let grid = spec(5, 5);
    let mut rng = StdRng::seed_from_u64(7);
    let mut min_seen = f64::MAX;
    let mut max_seen = f64::MIN;
    for _ in 0..10_000 {
        let t = cell_disappearance_time(&mut rng, 0, 3, grid, params());
        assert!(t >= 61.0, "sample {t} below window");
        assert!(t < 69.5, "sample {t} at or past window end");
        min_seen = min_seen.min(t);
        max_seen = max_seen.max(t);
    }
    // 10k draws must cover the interval, not cluster in a corner.
    assert!(min_seen < 61.0 + 0.05 * 8.5);
    assert!(max_seen > 69.5 - 0.05 * 8.5);
}

#[test]
fn schedule_covers_every_cell_with_center_as_unique_maximum() {
    let grid = spec(3, 3);
    let mut rng = StdRng::seed_from_u64(42);
    let schedule = RevealSchedule::generate(grid, params(), &mut rng).unwrap();

    assert_eq!(schedule.cells().len(), 9);
    assert_eq!(schedule.grid(), grid);
    assert_eq!(schedule.center_time(), 70.0);
    assert_eq!(schedule.time_for(1, 1), Some(70.0));
    assert_eq!(schedule.time_for(3, 0), None);
    assert_eq!(schedule.time_for(0, 3), None);

    let mut at_max = 0;
    for cell in schedule.cells() {
        if cell.disappear_at == 70.0 {
            at_max += 1;
            assert!(grid.is_center(cell.row, cell.col));
        } else {
            // Regular cells keep at least the configured gap before the center
            // and never fire before the fade head room.
            assert!(cell.disappear_at >= 61.0);
            assert!(cell.disappear_at < 70.0 - CENTER_GAP_SECS);
        }
    }
    assert_eq!(at_max, 1);
}

#[test]
fn same_seed_reproduces_the_schedule() {
    let grid = spec(3, 3);
    let a = RevealSchedule::generate(grid, params(), &mut StdRng::seed_from_u64(9)).unwrap();
    let b = RevealSchedule::generate(grid, params(), &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn degenerate_window_is_a_timing_error() {
    let mut rng = StdRng::seed_from_u64(0);
    let bad = TimingParams {
        base_duration: 60.0,
        effect_duration: 1.0,
        fade_out_duration: 1.0,
    };
    let err = RevealSchedule::generate(spec(3, 3), bad, &mut rng).unwrap_err();
    assert!(matches!(err, MosaicError::Timing(_)), "got {err}");

    // Exactly at the gap is still degenerate: the interval is empty.
    let edge = TimingParams {
        base_duration: 60.0,
        effect_duration: 1.5,
        fade_out_duration: 1.0,
    };
    assert!(edge.validate().is_err());

    let ok = TimingParams {
        base_duration: 60.0,
        effect_duration: 1.6,
        fade_out_duration: 1.0,
    };
    assert!(ok.validate().is_ok());
}

#[test]
fn negative_or_zero_durations_are_validation_errors() {
    let bad = TimingParams {
        base_duration: 0.0,
        effect_duration: 10.0,
        fade_out_duration: 1.0,
    };
    assert!(matches!(bad.validate(), Err(MosaicError::Validation(_))));

    let bad = TimingParams {
        base_duration: 60.0,
        effect_duration: 10.0,
        fade_out_duration: -1.0,
    };
    assert!(matches!(bad.validate(), Err(MosaicError::Validation(_))));
}

#[test]
fn fade_out_frames_convert_at_host_rate() {
    let p = TimingParams::from_fade_out_frames(60.0, 10.0, 30, HOST_FRAME_RATE);
    assert_eq!(p.fade_out_duration, 1.0);
    assert_eq!(p.center_end_time(), 70.0);
}

#[test]
fn total_duration_accounts_for_the_image_tail() {
    // Default 3s reveal ends exactly when the center cell disappears.
    assert_eq!(
        total_composition_duration(60.0, 10.0, true, true, IMAGE_REVEAL_DURATION_SECS),
        70.0
    );
    assert_eq!(total_composition_duration(60.0, 10.0, true, false, 3.0), 70.0);
    assert_eq!(total_composition_duration(60.0, 10.0, false, true, 3.0), 60.0);

    // A longer reveal extends the composition past the last cell.
    assert_eq!(total_composition_duration(60.0, 10.0, true, true, 10.0), 77.0);
    assert_eq!(
        total_composition_duration(10.0, 10.0, false, true, 12.0),
        19.0
    );
}

#[test]
fn image_reveal_window_leads_the_final_cell() {
    assert_eq!(image_reveal_start_time(60.0, 10.0, true), 67.0);
    assert_eq!(image_reveal_start_time(60.0, 10.0, false), 57.0);
}

#[test]
fn image_pieces_appear_inside_the_reveal_window() {
    let mut rng = StdRng::seed_from_u64(3);
    let schedule = ImageRevealSchedule::generate(5, 67.0, 3.0, &mut rng).unwrap();
    assert_eq!(schedule.size(), 5);
    assert_eq!(schedule.pieces().len(), 25);
    assert_eq!(schedule.start_time(), 67.0);
    for piece in schedule.pieces() {
        assert!(piece.appear_at >= 67.0);
        assert!(piece.appear_at < 70.0);
    }

    // Independent draws per piece: no ordering between coordinates.
    let mut rng = StdRng::seed_from_u64(3);
    let again = ImageRevealSchedule::generate(5, 67.0, 3.0, &mut rng).unwrap();
    assert_eq!(schedule, again);
}

#[test]
fn image_schedule_rejects_unsupported_sizes() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(ImageRevealSchedule::generate(4, 67.0, 3.0, &mut rng).is_err());
    assert!(ImageRevealSchedule::generate(9, 67.0, 3.0, &mut rng).is_err());
    assert!(ImageRevealSchedule::generate(5, 67.0, 0.0, &mut rng).is_err());
    assert!(ImageRevealSchedule::generate(3, 67.0, 3.0, &mut rng).is_ok());
}

#[test]
fn piece_sampling_spans_the_window() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut min_seen = f64::MAX;
    let mut max_seen = f64::MIN;
    for _ in 0..10_000 {
        let t = image_piece_reveal_time(&mut rng, 67.0, 3.0);
        assert!((67.0..70.0).contains(&t));
        min_seen = min_seen.min(t);
        max_seen = max_seen.max(t);
    }
    assert!(min_seen < 67.0 + 0.15);
    assert!(max_seen > 70.0 - 0.15);
}
