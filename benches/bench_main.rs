//! Benchmarks for the scheduled search and the propagator against a
//! synthetic grid network. Pattern count and
//! trips-per-pattern are the dominant cost drivers for this kind of
//! routing core, so the grid is parameterized on both.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use raptor_core::model::types::{Pattern, Stop, StopTime, TargetLink, Transfer};
use raptor_core::{propagate, scheduled_search, TransitNetwork};

const ROWS: usize = 20;
const STOPS_PER_ROW: usize = 20;
const TRIPS_PER_PATTERN: usize = 40;
const HEADWAY_SECONDS: u32 = 300;
const STOP_DWELL_SECONDS: u32 = 60;

/// A grid of `ROWS` horizontal patterns, each visiting `STOPS_PER_ROW`
/// stops, with a vertical transfer connecting each stop to the stop
/// directly below it in the next row.
fn build_grid_network() -> TransitNetwork {
    let num_stops = ROWS * STOPS_PER_ROW;
    let mut stops = Vec::with_capacity(num_stops);
    let mut transfers = Vec::new();
    let mut stop_patterns = Vec::new();
    let mut stop_targets = Vec::new();

    for row in 0..ROWS {
        for col in 0..STOPS_PER_ROW {
            let stop_id = row * STOPS_PER_ROW + col;
            let transfers_start = transfers.len();
            if row + 1 < ROWS {
                transfers.push(Transfer {
                    to_stop: (row + 1) * STOPS_PER_ROW + col,
                    distance_millimeters: 20_000,
                });
            }
            let transfers_len = transfers.len() - transfers_start;

            let patterns_start = stop_patterns.len();
            stop_patterns.push(row);
            let patterns_len = stop_patterns.len() - patterns_start;

            let targets_start = stop_targets.len();
            stop_targets.push(TargetLink {
                target: stop_id,
                distance_millimeters: 0,
            });
            let targets_len = stop_targets.len() - targets_start;

            stops.push(Stop {
                transfers_start,
                transfers_len,
                patterns_start,
                patterns_len,
                targets_start,
                targets_len,
            });
        }
    }

    let mut pattern_stops = Vec::with_capacity(ROWS * STOPS_PER_ROW);
    let mut patterns = Vec::with_capacity(ROWS);
    let mut stop_times = Vec::with_capacity(ROWS * TRIPS_PER_PATTERN * STOPS_PER_ROW);

    for row in 0..ROWS {
        let stops_start = pattern_stops.len();
        for col in 0..STOPS_PER_ROW {
            pattern_stops.push(row * STOPS_PER_ROW + col);
        }

        let trips_start = stop_times.len();
        for trip in 0..TRIPS_PER_PATTERN {
            let base = 6 * 3600 + trip as u32 * HEADWAY_SECONDS;
            for col in 0..STOPS_PER_ROW {
                let t = base + col as u32 * STOP_DWELL_SECONDS;
                stop_times.push(StopTime {
                    arrival: t,
                    departure: t,
                });
            }
        }

        patterns.push(Pattern {
            stops_start,
            num_stops: STOPS_PER_ROW,
            trips_start,
            num_trips: TRIPS_PER_PATTERN,
            is_frequency_based: false,
        });
    }

    TransitNetwork {
        stops,
        pattern_stops,
        patterns,
        stop_times,
        stop_patterns,
        transfers,
        stop_targets,
    }
}

fn bench_scheduled_search(c: &mut Criterion) {
    let network = build_grid_network();
    c.bench_function("scheduled_search_grid", |b| {
        b.iter(|| {
            scheduled_search(
                black_box(&network),
                black_box(&[(0, 0)]),
                black_box(6 * 3600),
                black_box(8),
                black_box(3 * 3600),
                black_box(1300),
            )
            .unwrap()
        })
    });
}

fn bench_propagator(c: &mut Criterion) {
    let network = build_grid_network();
    let num_stops = network.num_stops();
    let baseline = vec![u32::MAX; num_stops];
    let iterations: Vec<Vec<u32>> = (0..35)
        .map(|i| (0..num_stops).map(|s| (s as u32 + i) * 10).collect())
        .collect();

    c.bench_function("propagate_grid", |b| {
        b.iter(|| {
            propagate(
                black_box(&network),
                black_box(&iterations),
                black_box(&baseline),
                black_box(1300),
                black_box(3600),
                |times| times.iter().map(|&t| t as i64).sum(),
            )
        })
    });
}

criterion_group!(benches, bench_scheduled_search, bench_propagator);
criterion_main!(benches);
