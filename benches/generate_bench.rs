//! Benchmarks for header profile generation.
//!
//! Measures persona selection plus template assembly, with and without the
//! override and suppression layer doing real work.
//!
//! Run with: `cargo bench --bench generate_bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use guise::{generate_with, BrowserRestriction, GenerationOptions, OsTarget};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let mut rng = StdRng::seed_from_u64(0);

    let plain = GenerationOptions::default();
    group.bench_function("default", |b| {
        b.iter(|| generate_with(black_box(&plain), &mut rng));
    });

    let layered = GenerationOptions::default()
        .with_os(OsTarget::Random)
        .with_browser(BrowserRestriction::Chrome)
        .with_custom_headers("User-Agent=scanner X-Trace=1 X-Run=42")
        .with_suppressed_headers("DNT Sec-GPC Cache-Control")
        .with_target_url("https://example.com:8443/login");
    group.bench_function("overrides_and_suppression", |b| {
        b.iter(|| generate_with(black_box(&layered), &mut rng));
    });

    group.finish();
}

fn bench_to_header_map(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let profile = generate_with(&GenerationOptions::default(), &mut rng);
    c.bench_function("to_header_map", |b| {
        b.iter(|| black_box(&profile).to_header_map());
    });
}

criterion_group!(benches, bench_generate, bench_to_header_map);
criterion_main!(benches);
