//! Benchmark occupancy queries and pose search performance.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;
use vastu_loc::{
    CancelToken, GridSearchConfig, GridSearchEstimator, Measurement, OccupancyGrid,
    ParticleFilterConfig, ParticleFilterEstimator, Point2D, PoseEstimate,
};

const ROOM_W: f32 = 8.0;
const ROOM_H: f32 = 6.0;

fn room_plan() -> [Point2D; 4] {
    [
        Point2D::new(0.0, 0.0),
        Point2D::new(ROOM_W, 0.0),
        Point2D::new(ROOM_W, ROOM_H),
        Point2D::new(0.0, ROOM_H),
    ]
}

/// Sweep a sensor at `(x, y)` would capture in the room, with bearings
/// spread evenly over the full circle.
fn room_sweep(x: f32, y: f32, num_points: usize) -> Vec<Measurement> {
    (0..num_points)
        .map(|i| {
            let bearing = i as f32 * 360.0 / num_points as f32;
            let rad = bearing.to_radians();
            let (dx, dy) = (rad.sin(), rad.cos());

            let mut t = f32::INFINITY;
            // Right wall
            if dx > 1e-6 {
                t = t.min((ROOM_W - x) / dx);
            }
            // Left wall
            if dx < -1e-6 {
                t = t.min(-x / dx);
            }
            // Top wall
            if dy > 1e-6 {
                t = t.min((ROOM_H - y) / dy);
            }
            // Bottom wall
            if dy < -1e-6 {
                t = t.min(-y / dy);
            }

            let range_mm = ((t - 0.05) * 1000.0) as u32;
            Measurement::new(bearing, range_mm, 200, 0)
        })
        .collect()
}

fn bench_grid_build(c: &mut Criterion) {
    let plan = room_plan();
    let mut group = c.benchmark_group("grid_build_cell_size");

    for cell_size in [0.25, 0.5, 1.0].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(cell_size),
            cell_size,
            |b, &cell| {
                b.iter(|| {
                    let grid = OccupancyGrid::from_polygon(black_box(&plan), cell).unwrap();
                    black_box(grid)
                })
            },
        );
    }

    group.finish();
}

fn bench_occupancy_queries(c: &mut Criterion) {
    let grid = OccupancyGrid::from_polygon(&room_plan(), 0.5).unwrap();
    let points: Vec<Point2D> = room_sweep(4.0, 3.0, 360)
        .iter()
        .map(|m| {
            let p = m.to_point();
            Point2D::new(4.0 + p.x, 3.0 + p.y)
        })
        .collect();

    c.bench_function("occupancy_query_360pts", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for p in &points {
                if grid.is_occupied(black_box(p.x), black_box(p.y)) {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
}

fn bench_grid_search(c: &mut Criterion) {
    let grid = OccupancyGrid::from_polygon(&room_plan(), 0.5).unwrap();
    let estimator = GridSearchEstimator::new(GridSearchConfig {
        orientation_step_deg: 10.0,
        ..Default::default()
    });
    let token = CancelToken::new();

    let mut group = c.benchmark_group("grid_search_resolution");
    for num_points in [180, 360, 720].iter() {
        let sweep = room_sweep(4.0, 3.0, *num_points);

        group.bench_with_input(
            BenchmarkId::from_parameter(num_points),
            num_points,
            |b, _| {
                b.iter(|| {
                    let result =
                        estimator.estimate(black_box(&sweep), &grid, None, &token);
                    black_box(result)
                })
            },
        );
    }
    group.finish();

    // A prior collapses 36 orientation candidates down to 4.
    let sweep = room_sweep(4.0, 3.0, 360);
    let prior = PoseEstimate::new(0.0, 1.0, Point2D::new(4.0, 3.0));
    c.bench_function("grid_search_360pts_with_prior", |b| {
        b.iter(|| {
            let result = estimator.estimate(black_box(&sweep), &grid, Some(&prior), &token);
            black_box(result)
        })
    });
}

fn bench_particle_filter(c: &mut Criterion) {
    let grid = OccupancyGrid::from_polygon(&room_plan(), 0.5).unwrap();
    let sweep = room_sweep(4.0, 3.0, 360);
    let estimator = ParticleFilterEstimator::new(ParticleFilterConfig::default());
    let token = CancelToken::new();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("particle_filter_1000x20", |b| {
        b.iter(|| {
            let result = estimator.estimate(black_box(&sweep), &grid, &mut rng, &token);
            black_box(result)
        })
    });
}

criterion_group!(
    benches,
    bench_grid_build,
    bench_occupancy_queries,
    bench_grid_search,
    bench_particle_filter
);
criterion_main!(benches);
