// Key derivation, signing and encryption benchmarks for the wallet core.
//
// Covers passphrase → account derivation for both curves, message signing
// and verification, payload signing at sizes around the hash threshold, and
// ECDH + AES-GCM message encryption.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use comhub_wallet::account::signing::{sign, sign_bytes, verify};
use comhub_wallet::{Curve, WalletAccount};

const CURVES: [Curve; 2] = [Curve::Sr25519, Curve::Ecdsa];

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_account");
    for curve in CURVES {
        group.bench_function(curve.as_str(), |b| {
            b.iter(|| WalletAccount::from_password("correct horse battery staple", curve));
        });
    }
    group.finish();
}

fn bench_sign_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign_message");
    for curve in CURVES {
        let account = WalletAccount::from_password("bench", curve).unwrap();
        group.bench_function(curve.as_str(), |b| {
            b.iter(|| sign(&account, "stake 10 on validator 5EUgRLKB"));
        });
    }
    group.finish();
}

fn bench_verify_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify_message");
    for curve in CURVES {
        let account = WalletAccount::from_password("bench", curve).unwrap();
        let message = "stake 10 on validator 5EUgRLKB";
        let signature = sign(&account, message).unwrap().to_hex();
        let public_key = account.public_key_hex();
        group.bench_function(curve.as_str(), |b| {
            b.iter(|| verify(message, &signature, &public_key, curve));
        });
    }
    group.finish();
}

fn bench_sign_payload(c: &mut Criterion) {
    let account = WalletAccount::from_password("bench", Curve::Sr25519).unwrap();
    let mut group = c.benchmark_group("sign_payload");

    for size in [64usize, 256, 257, 4096] {
        let payload = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| sign_bytes(&account, payload));
        });
    }
    group.finish();
}

fn bench_encrypt_message(c: &mut Criterion) {
    let alice = WalletAccount::from_password("alice", Curve::Ecdsa).unwrap();
    let bob = WalletAccount::from_password("bob", Curve::Ecdsa).unwrap();
    let bob_key = bob.public_key_hex();
    let alice_key = alice.public_key_hex();
    let blob = alice.encrypt_message("meet at block 1200", &bob_key).unwrap();

    c.bench_function("ecdh_aes_gcm/encrypt", |b| {
        b.iter(|| alice.encrypt_message("meet at block 1200", &bob_key));
    });
    c.bench_function("ecdh_aes_gcm/decrypt", |b| {
        b.iter(|| bob.decrypt_message(&blob, &alice_key));
    });
}

criterion_group!(
    benches,
    bench_derivation,
    bench_sign_message,
    bench_verify_message,
    bench_sign_payload,
    bench_encrypt_message,
);
criterion_main!(benches);
