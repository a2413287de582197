//! # HC Attestation Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | ChainState hash | < 10µs |
//! | Mainnet header validation | < 50µs per header |
//! | Aggregation | linear in segment count |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use hc_attestation::{
    aggregate, validate_batch, BitcoinHeaderValidator, ChainState, Digest, MockBlock,
    MockHeaderValidator, TaskResult, PINS_V1,
};
use hc_tests::fixtures::mainnet_headers;

// ============================================================================
// Chain state hashing
// ============================================================================

fn bench_state_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain-state-hash");

    let genesis = ChainState::genesis();
    group.bench_function("genesis", |b| b.iter(|| black_box(genesis.hash())));

    let full = ChainState {
        prev_timestamps: (0..11).map(|i| 1_231_006_505 + i * 600).collect(),
        ..ChainState::genesis()
    };
    group.bench_function("full_timestamps", |b| b.iter(|| black_box(full.hash())));

    group.finish();
}

// ============================================================================
// Header validation
// ============================================================================

fn bench_header_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("header-validation");

    let validator = BitcoinHeaderValidator::default();
    let genesis = ChainState::genesis();
    let headers = mainnet_headers();
    group.throughput(Throughput::Elements(headers.len() as u64));
    group.bench_function("mainnet_1_to_3", |b| {
        b.iter(|| black_box(validate_batch(&validator, &genesis, &headers).is_ok()))
    });

    for size in [100usize, 1000, 2016] {
        let blocks = MockBlock::chain(genesis.best_block_hash, genesis.epoch_start_time, size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("mock_batch", size), &blocks, |b, blocks| {
            b.iter(|| {
                let validator = MockHeaderValidator::default();
                black_box(validate_batch(&validator, &genesis, blocks).is_ok())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Aggregation
// ============================================================================

fn contiguous_results(count: u32) -> Vec<TaskResult> {
    (0..count)
        .map(|i| TaskResult {
            identity: PINS_V1.task_identity(),
            prev_height: i * 2016,
            new_height: (i + 1) * 2016,
            prev_state_hash: Digest::new([i; 8]),
            new_state_hash: Digest::new([i + 1; 8]),
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for count in [10u32, 100, 1000] {
        let results = contiguous_results(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &results, |b, results| {
            b.iter(|| black_box(aggregate(results, &PINS_V1).is_ok()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_state_hash, bench_header_validation, bench_aggregate);
criterion_main!(benches);
