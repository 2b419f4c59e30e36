//! End-to-end recovery: synthetic sensor traffic for a known pose inside
//! a rectangular floor plan, pushed through the wire decoder, the sample
//! filter, and both pose estimators.

use crossbeam_channel::bounded;
use rand::rngs::StdRng;
use rand::SeedableRng;

use vastu_loc::io::{encode_frame, FRAME_LEN, SAMPLES_PER_FRAME};
use vastu_loc::math::normalize_degrees;
use vastu_loc::{
    CancelToken, DecodeStream, GridSearchConfig, GridSearchEstimator, Measurement,
    MeasurementFilter, MeasurementFilterConfig, OccupancyGrid, PacketDecoder,
    ParticleFilterConfig, ParticleFilterEstimator, Point2D,
};

const ROOM_W: f32 = 8.0;
const ROOM_H: f32 = 6.0;

const TRUTH_ORIENTATION_DEG: f32 = 30.0;
const TRUTH_X: f32 = 4.0;
const TRUTH_Y: f32 = 3.0;

/// Returns are pulled slightly off the wall so every decoded point lands
/// strictly inside the plan, clear of boundary cells.
const RANGE_INSET_M: f32 = 0.05;

/// One full revolution at one degree per sample.
const FRAME_COUNT: usize = 30;

/// Mid-wall frame whose payload gets flipped in the byte stream.
const CORRUPTED_FRAME: usize = 2;

/// Leading junk without a header byte anywhere.
const GARBAGE_PREFIX: &[u8] = &[0xFF, 0x00, 0x11, 0x99, 0xAB];

fn room() -> OccupancyGrid {
    let plan = [
        Point2D::new(0.0, 0.0),
        Point2D::new(ROOM_W, 0.0),
        Point2D::new(ROOM_W, ROOM_H),
        Point2D::new(0.0, ROOM_H),
    ];
    OccupancyGrid::from_polygon(&plan, 0.5).unwrap()
}

/// Range from the sensor to the nearest wall along world bearing
/// `direction_deg`, minus the inset.
fn wall_range_m(direction_deg: f32) -> f32 {
    let rad = direction_deg.to_radians();
    let (dx, dy) = (rad.sin(), rad.cos());

    let mut t = f32::INFINITY;
    if dx > 1e-6 {
        t = t.min((ROOM_W - TRUTH_X) / dx);
    } else if dx < -1e-6 {
        t = t.min(-TRUTH_X / dx);
    }
    if dy > 1e-6 {
        t = t.min((ROOM_H - TRUTH_Y) / dy);
    } else if dy < -1e-6 {
        t = t.min(-TRUTH_Y / dy);
    }
    t - RANGE_INSET_M
}

/// Encode the revolution the sensor would capture at the truth pose.
fn capture_frames() -> Vec<[u8; FRAME_LEN]> {
    (0..FRAME_COUNT)
        .map(|f| {
            let start_deg = (f * SAMPLES_PER_FRAME) as u16;
            let mut samples = [(0u16, 0u8); SAMPLES_PER_FRAME];
            for (i, slot) in samples.iter_mut().enumerate() {
                let bearing_deg = (start_deg as usize + i) as f32;
                let range_m = wall_range_m(bearing_deg + TRUTH_ORIENTATION_DEG);
                *slot = ((range_m * 1000.0).round() as u16, 200);
            }
            encode_frame(
                360,
                start_deg * 100,
                (start_deg + SAMPLES_PER_FRAME as u16 - 1) * 100,
                &samples,
                f as u16,
            )
        })
        .collect()
}

/// The capture as transport bytes: garbage, then the frames, with one
/// frame corrupted mid-payload.
fn capture_bytes() -> Vec<u8> {
    let mut bytes = GARBAGE_PREFIX.to_vec();
    for (f, frame) in capture_frames().iter().enumerate() {
        let mut frame = *frame;
        if f == CORRUPTED_FRAME {
            frame[10] ^= 0xFF;
        }
        bytes.extend_from_slice(&frame);
    }
    bytes
}

fn decode_capture() -> (Vec<Measurement>, PacketDecoder) {
    let mut decoder = PacketDecoder::new();
    let mut measurements = Vec::new();
    decoder.feed(&capture_bytes(), &mut measurements);
    (measurements, decoder)
}

#[test]
fn test_grid_search_recovers_pose_from_capture() {
    let (measurements, decoder) = decode_capture();
    assert_eq!(decoder.frames_decoded(), (FRAME_COUNT - 1) as u64);
    assert_eq!(decoder.frames_dropped(), 1);
    assert_eq!(
        decoder.bytes_consumed(),
        (GARBAGE_PREFIX.len() + FRAME_COUNT * FRAME_LEN) as u64
    );
    assert_eq!(measurements.len(), (FRAME_COUNT - 1) * SAMPLES_PER_FRAME);

    let filter = MeasurementFilter::new(MeasurementFilterConfig::default());
    let kept = filter.apply(&measurements);
    assert_eq!(kept.len(), measurements.len());

    let grid = room();
    let estimator = GridSearchEstimator::new(GridSearchConfig {
        orientation_step_deg: 10.0,
        ..Default::default()
    });
    let result = estimator.estimate(&kept, &grid, None, &CancelToken::new());

    let est = result.estimate.expect("search should localize the capture");
    assert_eq!(est.orientation_deg, TRUTH_ORIENTATION_DEG);
    assert_eq!(est.translation, Point2D::new(TRUTH_X, TRUTH_Y));
    // The shrunk cloud still fills the interior, so the smallest scale
    // candidate reaches the full score first and keeps it on ties.
    assert_eq!(est.scale, 0.9);
    assert_eq!(result.score, kept.len() as f32);
    // 36 orientations x 5 scales x 13 rows x 17 columns.
    assert_eq!(result.combinations, 36 * 5 * 13 * 17);
    assert!(!result.cancelled);
}

#[test]
fn test_particle_filter_recovers_pose_from_capture() {
    let (measurements, _) = decode_capture();
    let filter = MeasurementFilter::new(MeasurementFilterConfig::default());
    let kept = filter.apply(&measurements);

    let grid = room();
    let estimator = ParticleFilterEstimator::new(ParticleFilterConfig {
        particle_count: 2000,
        iterations: 25,
        ..Default::default()
    });
    let mut rng = StdRng::seed_from_u64(42);
    let result = estimator.estimate(&kept, &grid, &mut rng, &CancelToken::new());

    let est = result.estimate.expect("filter should localize the capture");
    assert!(
        est.translation.distance(&Point2D::new(TRUTH_X, TRUTH_Y)) <= 1.0,
        "translation {:?} too far from truth",
        est.translation
    );
    // The rectangle admits symmetric fits; accept any quarter turn.
    let orientation_error = (0..4)
        .map(|k| {
            normalize_degrees(est.orientation_deg - TRUTH_ORIENTATION_DEG - k as f32 * 90.0).abs()
        })
        .fold(f32::INFINITY, f32::min);
    assert!(
        orientation_error <= 15.0,
        "orientation {} not near a symmetric fit of {}",
        est.orientation_deg,
        TRUTH_ORIENTATION_DEG
    );
    assert!(result.score > 0.0);
    assert_eq!(result.combinations, 2000 * 25);
    assert!(!result.cancelled);
}

#[test]
fn test_decode_stream_reports_capture_stats() {
    let (bytes_tx, bytes_rx) = bounded(16);
    let (stream, measurement_rx) = DecodeStream::spawn(bytes_rx, 512);

    for chunk in capture_bytes().chunks(64) {
        bytes_tx.send(chunk.to_vec()).unwrap();
    }
    drop(bytes_tx);

    let measurements: Vec<Measurement> = measurement_rx.iter().collect();
    assert_eq!(measurements.len(), (FRAME_COUNT - 1) * SAMPLES_PER_FRAME);

    let stats = stream.join().unwrap();
    assert_eq!(stats.frames_decoded, (FRAME_COUNT - 1) as u64);
    assert_eq!(stats.frames_dropped, 1);
    assert_eq!(
        stats.bytes_consumed,
        (GARBAGE_PREFIX.len() + FRAME_COUNT * FRAME_LEN) as u64
    );
}
