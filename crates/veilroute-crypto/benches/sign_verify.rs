use criterion::{criterion_group, criterion_main, Criterion};

use veilroute_crypto::{SigningKeyType, SigningPrivateKey, SigningPublicKey};

fn bench_sign_verify(c: &mut Criterion) {
    veilroute_crypto::init().unwrap();

    let message = vec![0xA5u8; 1024];
    for key_type in [
        SigningKeyType::DsaSha1,
        SigningKeyType::EcdsaSha256P256,
        SigningKeyType::EcdsaSha384P384,
        SigningKeyType::EdDsaSha512Ed25519,
    ] {
        let private = SigningPrivateKey::generate(key_type).unwrap();
        let public = SigningPublicKey::from_private(&private).unwrap();
        let signature = private.sign(&message).unwrap();

        c.bench_function(&format!("sign/{:?}", key_type), |b| {
            b.iter(|| private.sign(&message).unwrap())
        });
        c.bench_function(&format!("verify/{:?}", key_type), |b| {
            b.iter(|| public.verify(&message, &signature))
        });
    }
}

criterion_group!(benches, bench_sign_verify);
criterion_main!(benches);
