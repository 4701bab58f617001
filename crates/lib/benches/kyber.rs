//! Kyber KEM and PKE benchmarks across all parameter sets.

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kyber_rs::{
    Kyber512, Kyber768, Kyber1024, ParameterSet, decapsulate, encapsulate_derand, keypair_derand,
    pke,
};

fn fixed_keygen_coins(tag: u8) -> [u8; 64] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(37)))
}

fn fixed_enc_coins(tag: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(53)))
}

fn bench_kem<P: ParameterSet>(c: &mut Criterion, tag: u8) {
    let keygen_coins = fixed_keygen_coins(tag);
    let enc_coins = fixed_enc_coins(tag);
    let (pk, sk) = keypair_derand::<P>(&keygen_coins);
    let (ct, _) = encapsulate_derand::<P>(&pk, &enc_coins);

    let mut group = c.benchmark_group("kem");
    group.bench_function(BenchmarkId::new("keypair_derand", P::NAME), |b| {
        b.iter(|| black_box(keypair_derand::<P>(black_box(&keygen_coins))));
    });
    group.bench_function(BenchmarkId::new("encapsulate_derand", P::NAME), |b| {
        b.iter(|| black_box(encapsulate_derand::<P>(black_box(&pk), black_box(&enc_coins))));
    });
    group.bench_function(BenchmarkId::new("decapsulate", P::NAME), |b| {
        b.iter(|| black_box(decapsulate::<P>(black_box(&sk), black_box(&ct))));
    });
    group.finish();
}

fn bench_pke<P: ParameterSet>(c: &mut Criterion, tag: u8) {
    let seed = fixed_enc_coins(tag);
    let coins = fixed_enc_coins(tag.wrapping_add(1));
    let msg = fixed_enc_coins(tag.wrapping_add(2));
    let (pk, sk) = pke::keypair_derand::<P>(&seed);
    let Ok(ct) = pke::encrypt_derand::<P>(&pk, &msg, &coins) else {
        return;
    };

    let mut group = c.benchmark_group("pke");
    group.bench_function(BenchmarkId::new("encrypt_derand", P::NAME), |b| {
        b.iter(|| black_box(pke::encrypt_derand::<P>(black_box(&pk), &msg, black_box(&coins))));
    });
    group.bench_function(BenchmarkId::new("decrypt", P::NAME), |b| {
        b.iter(|| black_box(pke::decrypt::<P>(black_box(&sk), black_box(&ct))));
    });
    group.finish();
}

fn kyber_benches(c: &mut Criterion) {
    bench_kem::<Kyber512>(c, 1);
    bench_kem::<Kyber768>(c, 2);
    bench_kem::<Kyber1024>(c, 3);

    bench_pke::<Kyber512>(c, 4);
    bench_pke::<Kyber768>(c, 5);
    bench_pke::<Kyber1024>(c, 6);
}

criterion_group!(benches, kyber_benches);
criterion_main!(benches);
