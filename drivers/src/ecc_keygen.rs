/*++

Licensed under the Apache-2.0 license.

File Name:

    ecc_keygen.rs

Abstract:

    File contains EC key pair generation on the PKA point unit.

--*/

use crate::{EcCurve, EcInt, EcPoint, Pka, SeError, SeResult};
use rand_core::{CryptoRng, RngCore};
use secengine_registers::RegisterPort;

/// EC key pair
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EcKeyPair {
    /// Scalar d in [1, n-1]
    pub private: EcInt,

    /// Q = d * G
    pub public: EcPoint,
}

/// Draw a scalar uniformly from [1, n-1] by rejection sampling.
///
/// The candidate is masked to the bit length of the order before the range
/// check, so each draw succeeds with probability above one half.
///
/// # Arguments
///
/// * `curve` - Curve
/// * `rng` - Random source
/// * `attempts` - Draws before giving up
pub fn random_scalar<R: RngCore + CryptoRng>(
    curve: &EcCurve,
    rng: &mut R,
    attempts: u32,
) -> SeResult<EcInt> {
    let len = curve.len;
    let top_bits = curve.order_bits() - 8 * (len - 1);
    let mask = ((1u16 << top_bits) - 1) as u8;

    let mut buf = [0u8; EcInt::CAPACITY];
    for _ in 0..attempts {
        if rng.try_fill_bytes(&mut buf[..len]).is_err() {
            log::warn!("random source failed");
            break;
        }
        buf[0] &= mask;
        let mut candidate = EcInt::from_be_slice(&buf[..len])?;
        if !candidate.is_zero() && candidate.is_below(&curve.n)? {
            buf.fill(0);
            return Ok(candidate);
        }
        candidate.zeroize();
    }
    buf.fill(0);
    Err(SeError::DRIVER_ECC_KEYGEN_RNG_EXHAUSTED)
}

/// Derive the public key of `private` and check that it lies on the curve.
pub fn public_key<P: RegisterPort>(
    pka: &mut Pka<'_, '_, P>,
    curve: &EcCurve,
    private: &EcInt,
) -> SeResult<EcPoint> {
    if private.len() != curve.len {
        return Err(SeError::DRIVER_ECC_KEYGEN_WIDTH_MISMATCH);
    }
    let public = pka.point_multiply(curve, private, &curve.generator())?;
    if public.is_infinity() || !pka.point_verify(curve, &public)? {
        log::warn!("{:?}: derived public key failed the curve check", curve.id);
        return Err(SeError::DRIVER_ECC_KEYGEN_PUBKEY_INVALID);
    }
    Ok(public)
}

/// Generate a key pair.
///
/// # Arguments
///
/// * `pka` - PKA driver
/// * `curve` - Curve
/// * `rng` - Random source
pub fn key_pair<P: RegisterPort, R: RngCore + CryptoRng>(
    pka: &mut Pka<'_, '_, P>,
    curve: &EcCurve,
    rng: &mut R,
) -> SeResult<EcKeyPair> {
    let mut private = random_scalar(curve, rng, pka.config().keygen_attempts)?;
    match public_key(pka, curve, &private) {
        Ok(public) => {
            log::debug!("{:?}: key pair generated", curve.id);
            Ok(EcKeyPair { private, public })
        }
        Err(err) => {
            private.zeroize();
            Err(err)
        }
    }
}
