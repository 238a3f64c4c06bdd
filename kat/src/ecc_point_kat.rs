/*++

Licensed under the Apache-2.0 license.

File Name:

    ecc_point_kat.rs

Abstract:

    File contains the Known Answer Test (KAT) for EC point multiplication.

--*/

use crate::ecdsa_p256_kat::{priv_key, PUB_X, PUB_Y};
use secengine_drivers::{CurveId, EcCurve, Pka, RegisterPort, SeError, SeResult};

#[derive(Default, Debug)]
pub struct EccPointKat {}

impl EccPointKat {
    /// Derive the public key of the P-256 signing vector and compare it with
    /// the published Q.
    ///
    /// # Arguments
    ///
    /// * `pka` - PKA driver
    ///
    /// # Returns
    ///
    /// * `SeResult` - Result denoting the KAT outcome.
    pub fn execute<P: RegisterPort>(&self, pka: &mut Pka<'_, '_, P>) -> SeResult<()> {
        let curve = EcCurve::get(CurveId::P256)?;
        let mut d = priv_key();
        let public = pka.point_multiply(curve, &d, &curve.generator());
        d.zeroize();

        let public = public.map_err(|_| SeError::KAT_ECC_POINT_MULTIPLY_MISMATCH)?;
        if public.is_infinity() || public.x.as_bytes() != PUB_X || public.y.as_bytes() != PUB_Y {
            Err(SeError::KAT_ECC_POINT_MULTIPLY_MISMATCH)?;
        }
        Ok(())
    }
}
