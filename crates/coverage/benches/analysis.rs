//! Benchmarks for distance predicates and the full coverage analysis.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use danang_coverage::{
    analyze_coverage, distance_km, AnalysisOptions, Boundary, ClusterStrategy, Layer, Office, Point, ServiceRadius,
};

fn create_offices(count: usize) -> Vec<Office> {
    (0..count)
        .map(|i| {
            // Spread offices over a grid around central Da Nang
            let lat = 15.95 + (i as f64 * 0.013) % 0.25;
            let lng = 108.05 + (i as f64 * 0.017) % 0.25;
            let layer = match i % 3 {
                0 => Layer::A,
                1 => Layer::B,
                _ => Layer::C,
            };
            let radius = match layer {
                Layer::A => ServiceRadius::Dual { reception_km: 5.0, management_km: 10.0 },
                Layer::B => ServiceRadius::Single(3.0),
                Layer::C => ServiceRadius::Single(2.0),
            };
            Office::new(format!("o-{}", i), format!("Office {}", i), Point::new(lat, lng), layer, radius)
        })
        .collect()
}

fn create_boundaries(count: usize) -> Vec<Boundary> {
    (0..count)
        .map(|i| {
            let lat = 15.95 + (i / 10) as f64 * 0.025;
            let lng = 108.05 + (i % 10) as f64 * 0.025;
            let ring = (0..24)
                .map(|k| {
                    let angle = k as f64 / 24.0 * std::f64::consts::TAU;
                    Point::new(lat + 0.01 * angle.sin(), lng + 0.01 * angle.cos())
                })
                .collect();
            Boundary::new(format!("Ward {}", i), vec![ring])
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let han_market = Point::new(16.0685, 108.2240);
    let son_tra = Point::new(16.1063, 108.2522);

    c.bench_function("haversine_single", |b| {
        b.iter(|| distance_km(black_box(&han_market), black_box(&son_tra)))
    });
}

fn bench_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_coverage");
    let boundaries = create_boundaries(100);

    for size in [10, 50, 200].iter() {
        let offices = create_offices(*size);

        group.bench_with_input(BenchmarkId::new("greedy", size), size, |b, _| {
            let options = AnalysisOptions::default();
            b.iter(|| analyze_coverage(black_box(&offices), black_box(&boundaries), &options))
        });

        group.bench_with_input(BenchmarkId::new("connected", size), size, |b, _| {
            let options = AnalysisOptions::default().clustering(ClusterStrategy::ConnectedComponents);
            b.iter(|| analyze_coverage(black_box(&offices), black_box(&boundaries), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_analysis);
criterion_main!(benches);
