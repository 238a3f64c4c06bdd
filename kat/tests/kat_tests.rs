// Licensed under the Apache-2.0 license

use secengine_drivers::{
    CallerToken, EngineConfig, EngineSelector, HashEngine, OperationClass, Pka,
};
use secengine_emu_periph::SeEmulator;
use secengine_kat::{
    CryptoKat, EccPointKat, EcdsaP256Kat, Mgf1Kat, RsaPssKat, SeError, Sha1Kat, Sha512Kat,
};

fn with_engines(emu: &SeEmulator, f: impl FnOnce(&mut HashEngine<'_, '_, SeEmulator>, &mut Pka<'_, '_, SeEmulator>)) {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = EngineConfig::default();
    let token = CallerToken::new(0x0b).unwrap();
    let pka_guard = EngineSelector::acquire(emu, OperationClass::Rsa, token, &config).unwrap();
    let sha_guard = EngineSelector::acquire(emu, OperationClass::Sha, token, &config).unwrap();
    let mut pka = Pka::new(&pka_guard, &config).unwrap();
    let mut sha = HashEngine::new(&sha_guard, &config).unwrap();
    f(&mut sha, &mut pka);
}

#[test]
fn test_all_kats_pass() {
    let emu = SeEmulator::new();
    with_engines(&emu, |sha, pka| {
        CryptoKat::default().execute(sha, pka).unwrap();
    });
}

#[test]
fn test_individual_kats() {
    let emu = SeEmulator::new();
    with_engines(&emu, |sha, pka| {
        Mgf1Kat::default().execute(sha).unwrap();
        EccPointKat::default().execute(pka).unwrap();
        EcdsaP256Kat::default().execute(pka).unwrap();
        RsaPssKat::default().execute(pka, sha).unwrap();
    });
}

#[test]
fn test_sha_fault_reported() {
    let emu = SeEmulator::new();
    with_engines(&emu, |sha, _| {
        emu.with_bus(|bus| bus.sha_mut().fail_next_task(secengine_registers::sha::SHA_ERR_BUS));
        assert_eq!(
            Sha1Kat::default().execute(sha),
            Err(SeError::KAT_SHA1_DIGEST_MISMATCH)
        );
        Sha1Kat::default().execute(sha).unwrap();

        emu.with_bus(|bus| bus.sha_mut().fail_next_task(secengine_registers::sha::SHA_ERR_BUS));
        assert_eq!(
            Sha512Kat::default().execute(sha),
            Err(SeError::KAT_SHA512_DIGEST_MISMATCH)
        );
    });
}

#[test]
fn test_pka_fault_reported() {
    let emu = SeEmulator::new();
    with_engines(&emu, |_, pka| {
        emu.with_bus(|bus| bus.pka_mut().fail_next_op(secengine_registers::pka::PKA_ERR_OPERAND));
        assert_eq!(
            EccPointKat::default().execute(pka),
            Err(SeError::KAT_ECC_POINT_MULTIPLY_MISMATCH)
        );
        emu.with_bus(|bus| bus.pka_mut().fail_next_op(secengine_registers::pka::PKA_ERR_OPERAND));
        assert_eq!(
            EcdsaP256Kat::default().execute(pka),
            Err(SeError::KAT_ECDSA_P256_SIGNATURE_MISMATCH)
        );
    });
}
