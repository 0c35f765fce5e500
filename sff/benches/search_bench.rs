use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sff::config::SFFConfig;
use sff::opt::search::{SearchOutcome, SearchParams, search};
use sheetnest::geometry::primitives::{Point, Region, SPolygon};

criterion_main!(benches);
criterion_group!(benches, search_bench, parallel_search_bench);

const N_OBSTACLES: [usize; 4] = [0, 4, 16, 36];

fn square(x: f64, y: f64, size: f64) -> Region {
    let points = vec![
        Point(x, y),
        Point(x + size, y),
        Point(x + size, y + size),
        Point(x, y + size),
    ];
    Region::Single(SPolygon::new(points).expect("square is a valid polygon"))
}

/// Squares of 25x25 on a regular grid, starting from the bottom left corner of the sheet
fn obstacles(n: usize) -> Vec<Region> {
    let per_row = 6;
    (0..n)
        .map(|i| square((i % per_row) as f64 * 30.0, (i / per_row) as f64 * 30.0, 25.0))
        .collect()
}

fn arrow() -> Region {
    let points = [
        (0.0, 10.0),
        (25.0, 10.0),
        (25.0, 0.0),
        (40.0, 15.0),
        (25.0, 30.0),
        (25.0, 20.0),
        (0.0, 20.0),
    ]
    .into_iter()
    .map(|(x, y)| Point(x, y))
    .collect();
    Region::Single(SPolygon::new(points).expect("arrow is a valid polygon"))
}

/// Benchmark how long it takes to find the first fit for a piece, on sheets with an increasing number of pieces already placed.
fn search_bench(c: &mut Criterion) {
    let params = SearchParams::from_config(&SFFConfig::default());
    let piece = arrow();

    let mut group = c.benchmark_group("search_first_fit");
    for n in N_OBSTACLES {
        let obstacles = obstacles(n);
        let obstacle_refs = obstacles.iter().collect::<Vec<_>>();

        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| match search(&piece, &obstacle_refs, &params) {
                SearchOutcome::Placed(c) => c.n_evaluated,
                SearchOutcome::NoFit { n_evaluated, .. } => n_evaluated,
            })
        });
    }
    group.finish();
}

/// Same as [`search_bench`], but with the rotations evaluated in parallel and a finer rotation step.
fn parallel_search_bench(c: &mut Criterion) {
    let config = SFFConfig {
        rotation_step: 15.0,
        ..SFFConfig::default()
    };
    let piece = arrow();

    let mut group = c.benchmark_group("search_first_fit_rotations");
    for parallel in [false, true] {
        let params = SearchParams {
            parallel,
            ..SearchParams::from_config(&config)
        };
        let obstacles = obstacles(36);
        let obstacle_refs = obstacles.iter().collect::<Vec<_>>();

        group.bench_function(BenchmarkId::from_parameter(parallel), |b| {
            b.iter(|| match search(&piece, &obstacle_refs, &params) {
                SearchOutcome::Placed(c) => c.n_evaluated,
                SearchOutcome::NoFit { n_evaluated, .. } => n_evaluated,
            })
        });
    }
    group.finish();
}
