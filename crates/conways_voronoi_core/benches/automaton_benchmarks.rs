use criterion::{black_box, criterion_group, criterion_main, Criterion};
use conways_voronoi_core::algorithms::Algorithm;
use conways_voronoi_core::automaton::Automaton;
use conways_voronoi_core::config::AutomatonConfig;
use conways_voronoi_core::noise::{NoiseConfig, NoiseSampler};

/// One call of every mixer.
fn bench_mixers(c: &mut Criterion) {
    let mut group = c.benchmark_group("mix");
    for algorithm in Algorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            let mut seed = 1337i64;
            b.iter(|| {
                seed = algorithm.mix(black_box(seed));
                seed
            })
        });
    }
    group.finish();
}

fn bench_noise_map(c: &mut Criterion) {
    let mut sampler = NoiseSampler::new(NoiseConfig::default());

    c.bench_function("noise_map_101x26_2_octaves", |b| {
        b.iter(|| {
            let field = sampler.sample_noise_map(101, 26, 2);
            black_box(field)
        })
    });
}

/// Steps the default 100x25 grid; reseeds every 500 generations so the
/// population does not die out.
fn bench_step(c: &mut Criterion) {
    let mut sampler = NoiseSampler::new(NoiseConfig::default());
    let mut automaton = Automaton::new(AutomatonConfig::default()).unwrap();
    automaton.seed(&mut sampler, 2, 1.0, 156).unwrap();

    c.bench_function("step_100x25", |b| {
        b.iter(|| {
            if automaton.generation() >= 500 {
                automaton.seed(&mut sampler, 2, 1.0, 156).unwrap();
            }
            let report = automaton.step(&mut sampler);
            black_box(report)
        })
    });
}

/// A step where the governor fires on almost every row.
fn bench_step_with_culling(c: &mut Criterion) {
    let mut sampler = NoiseSampler::new(NoiseConfig::default());
    let config = AutomatonConfig {
        max_active_count: 20,
        ..Default::default()
    };
    let mut automaton = Automaton::new(config).unwrap();

    c.bench_function("step_100x25_cap_20", |b| {
        b.iter(|| {
            automaton.seed(&mut sampler, 2, 0.6, 400).unwrap();
            let report = automaton.step(&mut sampler);
            black_box(report)
        })
    });
}

criterion_group!(
    benches,
    bench_mixers,
    bench_noise_map,
    bench_step,
    bench_step_with_culling
);
criterion_main!(benches);
