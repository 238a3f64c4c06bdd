/*++

Licensed under the Apache-2.0 license.

File Name:

    security_engine.rs

Abstract:

    File contains the security engine facade. Each call acquires the
    engines it needs, runs one complete operation and releases them.

--*/

use crate::ecc_keygen::{self, EcKeyPair};
use crate::{
    ecdsa, mgf1, rsa_pss, CallerToken, CurveId, EcCurve, EcInt, EcPoint, EcdsaSignature,
    EngineConfig, EngineSelector, Endianness, HashEngine, OperationClass, Pka, RsaInt, RsaKey,
    SeResult, ShaAlgorithm, ShaDigest,
};
use rand_core::{CryptoRng, RngCore};
use secengine_registers::RegisterPort;

pub struct SecurityEngine<P: RegisterPort> {
    port: P,
    token: CallerToken,
    config: EngineConfig,
}

impl<P: RegisterPort> SecurityEngine<P> {
    /// Create a facade over `port`.
    ///
    /// # Arguments
    ///
    /// * `port` - Register port of the engine devices
    /// * `token` - Identity written to the engine mutexes
    /// * `config` - Poll budgets and retry bounds
    pub fn new(port: P, token: CallerToken, config: EngineConfig) -> Self {
        Self {
            port,
            token,
            config,
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn with_pka<T>(
        &self,
        class: OperationClass,
        f: impl FnOnce(&mut Pka<'_, '_, P>) -> SeResult<T>,
    ) -> SeResult<T> {
        let guard = EngineSelector::acquire(&self.port, class, self.token, &self.config)?;
        let mut pka = Pka::new(&guard, &self.config)?;
        f(&mut pka)
    }

    fn with_sha<T>(&self, f: impl FnOnce(&mut HashEngine<'_, '_, P>) -> SeResult<T>) -> SeResult<T> {
        let guard = EngineSelector::acquire(&self.port, OperationClass::Sha, self.token, &self.config)?;
        let mut sha = HashEngine::new(&guard, &self.config)?;
        f(&mut sha)
    }

    /// Hold the PKA and then the hash engine for the duration of `f`.
    fn with_pka_and_sha<T>(
        &self,
        f: impl FnOnce(&mut Pka<'_, '_, P>, &mut HashEngine<'_, '_, P>) -> SeResult<T>,
    ) -> SeResult<T> {
        let pka_guard = EngineSelector::acquire(&self.port, OperationClass::Rsa, self.token, &self.config)?;
        let sha_guard = EngineSelector::acquire(&self.port, OperationClass::Sha, self.token, &self.config)?;
        let mut pka = Pka::new(&pka_guard, &self.config)?;
        let mut sha = HashEngine::new(&sha_guard, &self.config)?;
        f(&mut pka, &mut sha)
    }

    /// Digest of `data`
    pub fn sha_digest(&self, algorithm: ShaAlgorithm, data: &[u8]) -> SeResult<ShaDigest> {
        self.with_sha(|sha| sha.digest(algorithm, data))
    }

    /// Fill `mask` with MGF1 output over `seed`.
    pub fn mgf1(&self, algorithm: ShaAlgorithm, seed: &[u8], mask: &mut [u8]) -> SeResult<()> {
        self.with_sha(|sha| mgf1::mgf1(sha, algorithm, seed, mask))
    }

    /// ECDSA signature with a caller supplied nonce
    pub fn ecdsa_sign(
        &self,
        curve: CurveId,
        priv_key: &EcInt,
        k: &EcInt,
        hash: &[u8],
    ) -> SeResult<EcdsaSignature> {
        let curve = EcCurve::get(curve)?;
        self.with_pka(OperationClass::Ecc, |pka| ecdsa::sign(pka, curve, priv_key, k, hash))
    }

    /// ECDSA signature with nonces drawn from `rng`
    pub fn ecdsa_sign_with_rng<R: RngCore + CryptoRng>(
        &self,
        curve: CurveId,
        priv_key: &EcInt,
        hash: &[u8],
        rng: &mut R,
    ) -> SeResult<EcdsaSignature> {
        let curve = EcCurve::get(curve)?;
        self.with_pka(OperationClass::Ecc, |pka| {
            ecdsa::sign_with_retry(pka, curve, priv_key, hash, rng)
        })
    }

    pub fn ecdsa_verify(
        &self,
        curve: CurveId,
        pub_key: &EcPoint,
        hash: &[u8],
        signature: &EcdsaSignature,
    ) -> SeResult<bool> {
        let curve = EcCurve::get(curve)?;
        self.with_pka(OperationClass::Ecc, |pka| {
            ecdsa::verify(pka, curve, pub_key, hash, signature)
        })
    }

    pub fn ec_keygen<R: RngCore + CryptoRng>(&self, curve: CurveId, rng: &mut R) -> SeResult<EcKeyPair> {
        let curve = EcCurve::get(curve)?;
        self.with_pka(OperationClass::Ecc, |pka| ecc_keygen::key_pair(pka, curve, rng))
    }

    /// k * P
    pub fn ec_point_multiply(&self, curve: CurveId, k: &EcInt, point: &EcPoint) -> SeResult<EcPoint> {
        let curve = EcCurve::get(curve)?;
        self.with_pka(OperationClass::Ecc, |pka| pka.point_multiply(curve, k, point))
    }

    pub fn rsa_pss_verify(
        &self,
        key: &RsaKey,
        signature: &[u8],
        sig_order: Endianness,
        m_hash: &[u8],
        algorithm: ShaAlgorithm,
        salt_len: usize,
    ) -> SeResult<bool> {
        self.with_pka_and_sha(|pka, sha| {
            rsa_pss::pss_verify(pka, sha, key, signature, sig_order, m_hash, algorithm, salt_len)
        })
    }

    pub fn rsa_pss_sign(
        &self,
        key: &RsaKey,
        m_hash: &[u8],
        algorithm: ShaAlgorithm,
        salt: &[u8],
    ) -> SeResult<RsaInt> {
        self.with_pka_and_sha(|pka, sha| rsa_pss::pss_sign(pka, sha, key, m_hash, algorithm, salt))
    }
}
