//! # ledger-evm Router Benchmarks
//!
//! | Group | Measures |
//! |-------|----------|
//! | `identity` | PEM parse + SPKI hash per invocation |
//! | `address` | Contract address derivation |
//! | `router` | Full deploy / call / getCode against the in-memory ledger |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use ledger_evm::prelude::*;
use ledger_evm_tests::fixtures::*;

fn bench_identity(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity");
    let resolver = X509IdentityResolver::new();
    let creator = creator(EC_CERT);

    group.bench_function("resolve_x509", |b| {
        b.iter(|| black_box(resolver.resolve(black_box(&creator))))
    });
    group.finish();
}

fn bench_address(c: &mut Criterion) {
    let mut group = c.benchmark_group("address");
    let caller = Address::new([0xab; 20]);

    group.bench_function("derive_contract_address", |b| {
        let mut sequence = 0u64;
        b.iter(|| {
            sequence = sequence.wrapping_add(1);
            black_box(derive_contract_address(caller, sequence))
        })
    });
    group.finish();
}

fn bench_router(c: &mut Criterion) {
    let mut group = c.benchmark_group("router");
    let creator = creator(EC_CERT);

    group.bench_function("deploy", |b| {
        b.iter_batched(
            Harness::new,
            |mut h| black_box(h.deploy(&creator, DEPLOY_BYTECODE)),
            BatchSize::SmallInput,
        )
    });

    let mut h = Harness::new();
    let address = h.deploy_simple_storage(&creator);
    let set = set_input(42);

    group.bench_function("call_set", |b| {
        b.iter(|| black_box(h.invoke(&creator, &address, &set)))
    });
    group.bench_function("call_get", |b| {
        b.iter(|| black_box(h.invoke(&creator, &address, GET_SELECTOR)))
    });
    group.bench_function("get_code", |b| b.iter(|| black_box(h.get_code(&address))));

    let mut tar = Harness::with_config(RouterConfig {
        code_encoding: CodeEncoding::TarGz,
        ..RouterConfig::default()
    });
    let enveloped = tar.deploy_simple_storage(&creator);
    group.bench_function("get_code_tar_gz", |b| {
        b.iter(|| black_box(tar.get_code(&enveloped)))
    });

    group.finish();
}

criterion_group!(benches, bench_identity, bench_address, bench_router);
criterion_main!(benches);
