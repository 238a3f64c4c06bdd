// Licensed under the Apache-2.0 license

use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{Pss, RsaPrivateKey, RsaPublicKey};
use secengine_drivers::{
    CallerToken, EngineConfig, Endianness, RsaKey, SeError, SecurityEngine, ShaAlgorithm,
};
use secengine_emu_periph::SeEmulator;
use sha2::{Digest, Sha256, Sha384};
use std::sync::OnceLock;

const KEY_BITS: usize = 3072;

struct TestKey {
    reference: RsaPrivateKey,
    modulus: Vec<u8>,
    public_exponent: Vec<u8>,
    private_exponent: Vec<u8>,
}

impl TestKey {
    fn public(&self) -> RsaKey {
        RsaKey::new_public(&self.modulus, &self.public_exponent).unwrap()
    }

    fn private(&self) -> RsaKey {
        self.public()
            .with_private_exponent(&self.private_exponent)
            .unwrap()
    }
}

fn test_key() -> &'static TestKey {
    static KEY: OnceLock<TestKey> = OnceLock::new();
    KEY.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(0x3072);
        let reference = RsaPrivateKey::new(&mut rng, KEY_BITS).unwrap();
        TestKey {
            modulus: reference.n().to_bytes_be(),
            public_exponent: reference.e().to_bytes_be(),
            private_exponent: reference.d().to_bytes_be(),
            reference,
        }
    })
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine(emu: &SeEmulator) -> SecurityEngine<&SeEmulator> {
    SecurityEngine::new(emu, CallerToken::new(0x11).unwrap(), EngineConfig::default())
}

fn reference_signature(hash: &[u8], algorithm: ShaAlgorithm, seed: u64) -> Vec<u8> {
    let key = &test_key().reference;
    let mut rng = StdRng::seed_from_u64(seed);
    match algorithm {
        ShaAlgorithm::Sha256 => key.sign_with_rng(&mut rng, Pss::new::<Sha256>(), hash),
        ShaAlgorithm::Sha384 => key.sign_with_rng(&mut rng, Pss::new::<Sha384>(), hash),
        _ => unreachable!(),
    }
    .unwrap()
}

#[test]
fn test_reference_signatures_verify() {
    init_logging();
    let emu = SeEmulator::new();
    let engine = engine(&emu);
    let key = test_key().public();
    assert_eq!(key.modulus_bits(), KEY_BITS);

    for (algorithm, hash) in [
        (ShaAlgorithm::Sha256, Sha256::digest(b"pss message").to_vec()),
        (ShaAlgorithm::Sha384, Sha384::digest(b"pss message").to_vec()),
    ] {
        let sig = reference_signature(&hash, algorithm, 7);
        let salt_len = algorithm.digest_size();
        assert!(engine
            .rsa_pss_verify(&key, &sig, Endianness::Big, &hash, algorithm, salt_len)
            .unwrap());

        let mut sig_le = sig.clone();
        sig_le.reverse();
        assert!(engine
            .rsa_pss_verify(&key, &sig_le, Endianness::Little, &hash, algorithm, salt_len)
            .unwrap());
    }
}

#[test]
fn test_corrupted_input_rejected() {
    init_logging();
    let emu = SeEmulator::new();
    let engine = engine(&emu);
    let key = test_key().public();
    let hash = Sha256::digest(b"corruption").to_vec();
    let sig = reference_signature(&hash, ShaAlgorithm::Sha256, 11);
    let verify = |key: &RsaKey, sig: &[u8], hash: &[u8]| {
        engine
            .rsa_pss_verify(key, sig, Endianness::Big, hash, ShaAlgorithm::Sha256, 32)
            .unwrap()
    };
    assert!(verify(&key, &sig, &hash));

    for idx in [0, 1, 100, 191, 300, 383] {
        let mut bad = sig.clone();
        bad[idx] ^= 0x04;
        assert!(!verify(&key, &bad, &hash), "signature byte {}", idx);
    }

    for idx in [1, 50, 200, 382] {
        let mut modulus = test_key().modulus.clone();
        modulus[idx] ^= 0x20;
        let bad_key = RsaKey::new_public(&modulus, &test_key().public_exponent).unwrap();
        assert!(!verify(&bad_key, &sig, &hash), "modulus byte {}", idx);
    }

    for idx in 0..hash.len() {
        let mut bad = hash.clone();
        bad[idx] ^= 0x80;
        assert!(!verify(&key, &sig, &bad), "hash byte {}", idx);
    }
}

#[test]
fn test_engine_signature_accepted_by_reference() {
    init_logging();
    let emu = SeEmulator::new();
    let engine = engine(&emu);
    let key = test_key().private();
    assert!(key.has_private_exponent());
    let public = RsaPublicKey::from(&test_key().reference);

    let hash = Sha384::digest(b"signed by the engine").to_vec();
    let salt = [0xa5u8; 48];
    let sig = engine
        .rsa_pss_sign(&key, &hash, ShaAlgorithm::Sha384, &salt)
        .unwrap();
    assert_eq!(sig.len(), KEY_BITS / 8);
    public
        .verify(Pss::new::<Sha384>(), &hash, sig.as_bytes())
        .unwrap();
    assert!(engine
        .rsa_pss_verify(&key, sig.as_bytes(), Endianness::Big, &hash, ShaAlgorithm::Sha384, 48)
        .unwrap());
}

#[test]
fn test_size_errors() {
    init_logging();
    let emu = SeEmulator::new();
    let engine = engine(&emu);
    let key = test_key().public();
    let hash = Sha256::digest(b"sizes").to_vec();
    let sig = reference_signature(&hash, ShaAlgorithm::Sha256, 13);

    assert_eq!(
        engine.rsa_pss_verify(&key, &sig[1..], Endianness::Big, &hash, ShaAlgorithm::Sha256, 32),
        Err(SeError::DRIVER_RSA_SIGNATURE_SIZE)
    );
    assert_eq!(
        engine.rsa_pss_verify(&key, &sig, Endianness::Big, &hash[1..], ShaAlgorithm::Sha256, 32),
        Err(SeError::DRIVER_RSA_PSS_HASH_SIZE)
    );
    assert_eq!(
        engine.rsa_pss_verify(&key, &sig, Endianness::Big, &hash, ShaAlgorithm::Sha256, usize::MAX),
        Ok(false)
    );
    assert_eq!(
        engine.rsa_pss_sign(&key, &hash, ShaAlgorithm::Sha256, &[0; 32]),
        Err(SeError::DRIVER_RSA_MISSING_PRIVATE_EXPONENT)
    );
}
