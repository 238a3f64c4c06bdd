/*++

Licensed under the Apache-2.0 license.

File Name:

    ecdsa.rs

Abstract:

    File contains ECDSA signing and verification composed from the PKA
    modular arithmetic and point operations.

--*/

use crate::array::bytes_eq;
use crate::ecc_keygen::random_scalar;
use crate::{EcCurve, EcInt, EcPoint, EcdsaSignature, Pka, SeError, SeResult};
use rand_core::{CryptoRng, RngCore};
use secengine_registers::RegisterPort;

fn check_scalar(curve: &EcCurve, scalar: &EcInt) -> SeResult<()> {
    if scalar.len() != curve.len {
        return Err(SeError::DRIVER_ECDSA_WIDTH_MISMATCH);
    }
    if scalar.is_zero() || !scalar.is_below(&curve.n)? {
        return Err(SeError::DRIVER_ECDSA_INVALID_SCALAR);
    }
    Ok(())
}

fn hash_scalar(curve: &EcCurve, hash: &[u8]) -> SeResult<EcInt> {
    if hash.is_empty() {
        return Err(SeError::DRIVER_ECDSA_INVALID_HASH);
    }
    EcInt::from_hash(hash, curve.len)
}

/// Sign `hash` with private key `priv_key` and nonce `k`.
///
/// The nonce is used as given. A zero `r` or `s` fails with a retryable
/// error; the caller must pick a fresh nonce.
///
/// # Arguments
///
/// * `pka` - PKA driver
/// * `curve` - Curve
/// * `priv_key` - Private key in [1, n-1]
/// * `k` - Nonce in [1, n-1]
/// * `hash` - Message hash, truncated or left-padded to the curve width
///
/// # Returns
///
/// * `EcdsaSignature` - Big-endian signature
pub fn sign<P: RegisterPort>(
    pka: &mut Pka<'_, '_, P>,
    curve: &EcCurve,
    priv_key: &EcInt,
    k: &EcInt,
    hash: &[u8],
) -> SeResult<EcdsaSignature> {
    check_scalar(curve, priv_key)?;
    check_scalar(curve, k)?;
    let h = hash_scalar(curve, hash)?;
    let n = &curve.n;

    let point = pka.point_multiply(curve, k, &curve.generator())?;
    if point.is_infinity() {
        return Err(SeError::DRIVER_ECDSA_SIGN_R_ZERO);
    }
    let r = pka.reduce(&point.x, n)?;
    if r.is_zero() {
        return Err(SeError::DRIVER_ECDSA_SIGN_R_ZERO);
    }
    pka.keep_alive();

    let mut d = pka.reduce(priv_key, n)?;
    let h = pka.reduce(&h, n)?;
    let mut k_inv = pka.invert(k, n)?;
    let u1 = pka.mod_mul(&r, &d, n);
    d.zeroize();
    let u2 = pka.mod_add(&h, &u1?, n)?;
    let s = pka.mod_mul(&k_inv, &u2, n);
    k_inv.zeroize();
    let s = s?;
    if s.is_zero() {
        return Err(SeError::DRIVER_ECDSA_SIGN_S_ZERO);
    }

    log::debug!("{:?}: signature generated", curve.id);
    Ok(EcdsaSignature::new(r, s))
}

/// Sign `hash`, drawing a fresh nonce from `rng` after every retryable
/// failure, at most `sign_attempts` times.
pub fn sign_with_retry<P: RegisterPort, R: RngCore + CryptoRng>(
    pka: &mut Pka<'_, '_, P>,
    curve: &EcCurve,
    priv_key: &EcInt,
    hash: &[u8],
    rng: &mut R,
) -> SeResult<EcdsaSignature> {
    let attempts = pka.config().sign_attempts;
    let draws = pka.config().keygen_attempts;
    for attempt in 0..attempts {
        let mut k = random_scalar(curve, rng, draws)?;
        let result = sign(pka, curve, priv_key, &k, hash);
        k.zeroize();
        match result {
            Err(err) if err.is_retryable() => {
                log::warn!("{:?}: signing attempt {} needs a new nonce", curve.id, attempt + 1);
            }
            result => return result,
        }
    }
    Err(SeError::DRIVER_ECDSA_SIGN_RETRIES_EXHAUSTED)
}

/// Verify `signature` over `hash` with public key `pub_key`.
///
/// Returns `Ok(false)` for any signature or key that does not verify.
/// Errors are reserved for malformed arguments and engine failures.
///
/// # Arguments
///
/// * `pka` - PKA driver
/// * `curve` - Curve
/// * `pub_key` - Public key, in either byte order
/// * `hash` - Message hash
/// * `signature` - Signature, in either byte order
pub fn verify<P: RegisterPort>(
    pka: &mut Pka<'_, '_, P>,
    curve: &EcCurve,
    pub_key: &EcPoint,
    hash: &[u8],
    signature: &EcdsaSignature,
) -> SeResult<bool> {
    let signature = signature.to_big_endian();
    let pub_key = pub_key.to_big_endian();
    let (r, s) = (&signature.r, &signature.s);
    let n = &curve.n;

    if r.len() != curve.len || s.len() != curve.len {
        return Err(SeError::DRIVER_ECDSA_WIDTH_MISMATCH);
    }
    if !pub_key.is_infinity() && (pub_key.x.len() != curve.len || pub_key.y.len() != curve.len) {
        return Err(SeError::DRIVER_ECDSA_WIDTH_MISMATCH);
    }
    let h = hash_scalar(curve, hash)?;

    if r.is_zero() || s.is_zero() || !r.is_below(n)? || !s.is_below(n)? {
        return Ok(false);
    }
    if pub_key.is_infinity() || !pka.point_verify(curve, &pub_key)? {
        log::debug!("{:?}: public key is not on the curve", curve.id);
        return Ok(false);
    }

    let s_inv = pka.invert(s, n)?;
    let h = pka.reduce(&h, n)?;
    let u1 = pka.mod_mul(&h, &s_inv, n)?;
    let u2 = pka.mod_mul(r, &s_inv, n)?;
    pka.keep_alive();

    let point = pka.shamir_trick(curve, &u1, &curve.generator(), &u2, &pub_key)?;
    if point.is_infinity() {
        return Ok(false);
    }

    // R'.x is compared without a further reduction modulo n.
    Ok(bytes_eq(point.x.as_bytes(), r.as_bytes()))
}
