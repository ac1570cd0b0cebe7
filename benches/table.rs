use archmage::SimdToken;
use criterion::{BenchmarkGroup, Criterion, Throughput, measurement::WallTime};
use etcdxt::{EndpointBits, Generator, GeneratorConfig, ScanStrategy, Solution, TableLayout};

// === SIMD tier detection ===

fn probe<T: SimdToken>() -> &'static str {
    if T::summon().is_some() {
        "available"
    } else {
        "not available"
    }
}

fn print_simd_info() {
    eprintln!("=== SIMD Tier Detection ===");
    #[cfg(target_arch = "x86_64")]
    {
        eprintln!(
            "  SSE4.2 (x86-64-v2):      {}",
            probe::<archmage::X64V2Token>()
        );
    }
    #[cfg(target_arch = "aarch64")]
    {
        eprintln!(
            "  NEON:                    {}",
            probe::<archmage::NeonToken>()
        );
    }
    #[cfg(target_arch = "wasm32")]
    {
        eprintln!(
            "  WASM SIMD128:            {}",
            probe::<archmage::Wasm128Token>()
        );
    }
    eprintln!("  Scalar:                  always available");
    eprintln!("===========================");
}

// === Scalar disable/enable via archmage ===

fn disable_all_simd() {
    let _ = archmage::dangerously_disable_tokens_except_wasm(true);
}

fn enable_all_simd() {
    let _ = archmage::dangerously_disable_tokens_except_wasm(false);
}

/// One intensity block with 3 variants: batched (best SIMD), batched with
/// SIMD disabled, and the plain scalar scan.
fn bench_block(group: &mut BenchmarkGroup<WallTime>, config: &GeneratorConfig) {
    let batched = Generator::new(config.clone().with_strategy(ScanStrategy::Batched)).unwrap();
    let scalar = Generator::new(config.clone().with_strategy(ScanStrategy::Scalar)).unwrap();
    let layout: TableLayout = batched.layout();
    let mut out = vec![Solution::default(); layout.intensity_len()];

    group.throughput(Throughput::Elements(layout.intensity_len() as u64));

    group.bench_function("batched", |b| {
        b.iter(|| batched.generate_intensity(3, &mut out).unwrap());
    });

    disable_all_simd();
    group.bench_function("batched_scalar", |b| {
        b.iter(|| batched.generate_intensity(3, &mut out).unwrap());
    });
    enable_all_simd();

    group.bench_function("scalar_scan", |b| {
        b.iter(|| scalar.generate_intensity(3, &mut out).unwrap());
    });
}

fn bench_green_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("intensity_block_6bit");
    group.sample_size(10);
    bench_block(&mut group, &GeneratorConfig::default());
    group.finish();
}

fn bench_red_blue_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("intensity_block_5bit");
    bench_block(
        &mut group,
        &GeneratorConfig::default().with_bits(EndpointBits::Five),
    );
    group.finish();
}

fn bench_no_early_exit(c: &mut Criterion) {
    let mut group = c.benchmark_group("intensity_block_5bit_full_scan");
    bench_block(
        &mut group,
        &GeneratorConfig::default()
            .with_bits(EndpointBits::Five)
            .with_early_exit(false),
    );
    group.finish();
}

// === Custom main for tier detection before criterion runs ===

fn main() {
    print_simd_info();

    let mut criterion = Criterion::default().configure_from_args();
    bench_green_block(&mut criterion);
    bench_red_blue_block(&mut criterion);
    bench_no_early_exit(&mut criterion);
    criterion.final_summary();
}
