// Signing & sender recovery benchmarks for the NOVA signer.
//
// Covers secp256k1 keypair generation, signing-hash construction,
// transaction signing, uncached recovery, and cached sender lookups under
// contention.

use alloy_primitives::{Address, U256};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use nova_signer::crypto::Keypair;
use nova_signer::signer::{Eip155Signer, Signer};
use nova_signer::transaction::{sender, sign_tx, Transaction, TransactionBuilder, TxType};

fn legacy_tx(nonce: u64) -> Transaction {
    TransactionBuilder::new(TxType::Legacy)
        .nonce(nonce)
        .gas_price(U256::from(25_000_000_000u64))
        .gas(21_000)
        .to(Address::repeat_byte(0x35))
        .value(U256::from(1_000_000_000_000_000_000u64))
        .build()
}

fn bench_keypair_generation(c: &mut Criterion) {
    c.bench_function("secp256k1/keypair_generate", |b| {
        b.iter(Keypair::generate);
    });
}

fn bench_signing_hash(c: &mut Criterion) {
    let signer = Eip155Signer::for_chain(8217u64);
    let tx = legacy_tx(42);

    c.bench_function("eip155/signing_hash", |b| {
        b.iter(|| signer.hash(&tx));
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    let signer = Eip155Signer::for_chain(8217u64);
    let keypair = Keypair::generate();
    let tx = legacy_tx(42);

    c.bench_function("eip155/sign_transaction", |b| {
        b.iter(|| sign_tx(&tx, &signer, &keypair).unwrap());
    });
}

fn bench_recover_uncached(c: &mut Criterion) {
    let signer = Eip155Signer::for_chain(8217u64);
    let keypair = Keypair::generate();
    let signed = sign_tx(&legacy_tx(42), &signer, &keypair).unwrap();

    c.bench_function("eip155/recover_sender", |b| {
        b.iter(|| signer.sender(&signed).unwrap());
    });
}

fn bench_sender_cached(c: &mut Criterion) {
    let signer = Eip155Signer::for_chain(8217u64);
    let keypair = Keypair::generate();
    let signed = sign_tx(&legacy_tx(42), &signer, &keypair).unwrap();
    sender(&signer, &signed).unwrap();

    c.bench_function("eip155/sender_cached", |b| {
        b.iter(|| sender(&signer, &signed).unwrap());
    });
}

fn bench_sender_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("eip155/sender_batch");
    let signer = Eip155Signer::for_chain(8217u64);

    for size in [10, 50, 100] {
        let keypair = Keypair::generate();
        let txs: Vec<_> = (0..size)
            .map(|i| sign_tx(&legacy_tx(i), &signer, &keypair).unwrap())
            .collect();

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txs, |b, txs| {
            // Fresh copies so every iteration pays for recovery.
            b.iter_batched(
                || txs.iter().map(|tx| tx.with_signatures(tx.signatures().to_vec())).collect::<Vec<_>>(),
                |txs| {
                    for tx in &txs {
                        sender(&signer, tx).unwrap();
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_signing_hash,
    bench_sign_transaction,
    bench_recover_uncached,
    bench_sender_cached,
    bench_sender_batch,
);
criterion_main!(benches);
