use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use winding_core::{WindingParams, generate};

pub fn bench_generate(c: &mut Criterion) {
    let mut g = c.benchmark_group("generate");
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p winding_core --bench generate
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let cases = [
        ("balanced", WindingParams::new(72, 8, 3)),
        ("balanced_short", WindingParams::new(72, 8, 3).short_pitch(2)),
        ("round_robin", WindingParams::new(78, 8, 3)),
        ("large_balanced", WindingParams::new(9_600, 32, 3)),
    ];
    for (name, params) in cases {
        g.bench_with_input(BenchmarkId::new(name, params.slots), &params, |b, p| {
            b.iter(|| {
                let d = generate(black_box(p)).expect("valid bench params");
                black_box(d.stats.total_coils());
            });
        });
    }
    g.finish();
}

pub fn bench_chains(c: &mut Criterion) {
    let design = generate(&WindingParams::new(9_600, 32, 3)).expect("valid bench params");
    c.bench_function("series_chains_9600", |b| {
        b.iter(|| black_box(design.series_chains().len()));
    });
}

criterion_group!(winding, bench_generate, bench_chains);
criterion_main!(winding);
