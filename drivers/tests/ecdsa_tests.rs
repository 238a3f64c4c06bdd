// Licensed under the Apache-2.0 license

use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use rand::rngs::StdRng;
use rand::SeedableRng;
use secengine_drivers::{
    CallerToken, CurveId, EcInt, EcPoint, EcdsaSignature, EngineConfig, SecurityEngine,
    ShaAlgorithm,
};
use secengine_emu_periph::SeEmulator;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn engine(emu: &SeEmulator) -> SecurityEngine<&SeEmulator> {
    SecurityEngine::new(emu, CallerToken::new(0x21).unwrap(), EngineConfig::default())
}

fn p256_verify(public: &EcPoint, hash: &[u8], sig: &EcdsaSignature) -> bool {
    let point = p256::EncodedPoint::from_affine_coordinates(
        p256::FieldBytes::from_slice(public.x.as_bytes()),
        p256::FieldBytes::from_slice(public.y.as_bytes()),
        false,
    );
    let key = p256::ecdsa::VerifyingKey::from_encoded_point(&point).unwrap();
    let sig = p256::ecdsa::Signature::from_scalars(
        *p256::FieldBytes::from_slice(sig.r.as_bytes()),
        *p256::FieldBytes::from_slice(sig.s.as_bytes()),
    )
    .unwrap();
    key.verify_prehash(hash, &sig).is_ok()
}

fn p384_verify(public: &EcPoint, hash: &[u8], sig: &EcdsaSignature) -> bool {
    let point = p384::EncodedPoint::from_affine_coordinates(
        p384::FieldBytes::from_slice(public.x.as_bytes()),
        p384::FieldBytes::from_slice(public.y.as_bytes()),
        false,
    );
    let key = p384::ecdsa::VerifyingKey::from_encoded_point(&point).unwrap();
    let sig = p384::ecdsa::Signature::from_scalars(
        *p384::FieldBytes::from_slice(sig.r.as_bytes()),
        *p384::FieldBytes::from_slice(sig.s.as_bytes()),
    )
    .unwrap();
    key.verify_prehash(hash, &sig).is_ok()
}

#[test]
fn test_keygen_sign_verify_round_trips() {
    init_logging();
    let emu = SeEmulator::new();
    let engine = engine(&emu);
    let mut rng = StdRng::seed_from_u64(0x0ecd_5a00);

    for (curve, algorithm) in [
        (CurveId::P256, ShaAlgorithm::Sha256),
        (CurveId::P384, ShaAlgorithm::Sha384),
    ] {
        for i in 0..100u32 {
            let message = format!("round trip message {}", i);
            let hash = engine.sha_digest(algorithm, message.as_bytes()).unwrap();
            let pair = engine.ec_keygen(curve, &mut rng).unwrap();
            assert!(!pair.private.is_zero());

            let sig = engine
                .ecdsa_sign_with_rng(curve, &pair.private, hash.as_bytes(), &mut rng)
                .unwrap();
            assert!(engine
                .ecdsa_verify(curve, &pair.public, hash.as_bytes(), &sig)
                .unwrap());

            let reference = match curve {
                CurveId::P256 => p256_verify(&pair.public, hash.as_bytes(), &sig),
                _ => p384_verify(&pair.public, hash.as_bytes(), &sig),
            };
            assert!(reference, "{:?} round trip {}", curve, i);
        }
    }
}

#[test]
fn test_verify_reference_signatures() {
    init_logging();
    let emu = SeEmulator::new();
    let engine = engine(&emu);
    let mut rng = StdRng::seed_from_u64(0x0ecd_5a01);

    for i in 0..10u8 {
        let signing_key = p256::ecdsa::SigningKey::random(&mut rng);
        let encoded = signing_key.verifying_key().to_encoded_point(false);
        let public = EcPoint::new(
            EcInt::from_be_slice(encoded.x().unwrap()).unwrap(),
            EcInt::from_be_slice(encoded.y().unwrap()).unwrap(),
        );
        let hash = [i; 32];
        let sig: p256::ecdsa::Signature = signing_key.sign_prehash(&hash).unwrap();
        let (r, s) = sig.split_bytes();
        let mut sig = EcdsaSignature::new(
            EcInt::from_be_slice(&r).unwrap(),
            EcInt::from_be_slice(&s).unwrap(),
        );
        assert!(engine.ecdsa_verify(CurveId::P256, &public, &hash, &sig).unwrap());

        sig.s.set_le_word(0, sig.s.le_word(0) ^ 0x10);
        assert!(!engine.ecdsa_verify(CurveId::P256, &public, &hash, &sig).unwrap());
    }
}

#[test]
fn test_unsupported_curve() {
    let emu = SeEmulator::new();
    let engine = engine(&emu);
    let d = EcInt::from_be_slice(&[1; 32]).unwrap();
    assert_eq!(
        engine.ecdsa_sign(CurveId::Ed25519, &d, &d, &[0; 32]),
        Err(secengine_drivers::SeError::DRIVER_PKA_UNSUPPORTED_CURVE)
    );
}

#[test]
fn test_point_multiply_by_order() {
    let emu = SeEmulator::new();
    let engine = engine(&emu);
    for curve in [CurveId::P192, CurveId::P521, CurveId::Secp256k1, CurveId::BrainpoolP224r1] {
        let params = secengine_drivers::EcCurve::get(curve).unwrap();
        let inf = engine
            .ec_point_multiply(curve, &params.n, &params.generator())
            .unwrap();
        assert!(inf.is_infinity(), "{:?}", curve);
    }
}
