/*++

Licensed under the Apache-2.0 license.

File Name:

    ecdsa_p256_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for ECDSA P-256 signing and
    verification.

--*/

use hex_literal::hex;
use secengine_drivers::ecdsa;
use secengine_drivers::{
    CurveId, EcCurve, EcInt, EcPoint, EcdsaSignature, Pka, RegisterPort, SeError, SeResult,
};

const PRIV_KEY: [u8; 32] = hex!("519b423d715f8b581f4fa8ee59f4771a5b44c8130b4e3eacca54a56dda72b464");

const NONCE: [u8; 32] = hex!("94a1bbb14b906a61a280f245f9e93c7f3b4a6247824f5d33b9670787642a68de");

const HASH: [u8; 32] = hex!("44acf6b7e36c1342c2c5897204fe09504e1e2efb1a900377dbc4e7a6a133ec56");

pub(crate) const PUB_X: [u8; 32] =
    hex!("1ccbe91c075fc7f4f033bfa248db8fccd3565de94bbfb12f3c59ff46c271bf83");

pub(crate) const PUB_Y: [u8; 32] =
    hex!("ce4014c68811f9a21a1fdb2c0e6113e06db7ca93b7404e78dc7ccd5ca89a4ca9");

const SIG_R: [u8; 32] = hex!("f3ac8061b514795b8843e3d6629527ed2afd6b1f6a555a7acabb5e6f79c8c2ac");

const SIG_S: [u8; 32] = hex!("8bf77819ca05a6b2786c76262bf7371cef97b218e96f175a3ccdda2acc058903");

pub(crate) const fn priv_key() -> EcInt {
    EcInt::from_be_const(&PRIV_KEY)
}

#[derive(Default, Debug)]
pub struct EcdsaP256Kat {}

impl EcdsaP256Kat {
    /// This function executes the Known Answer Tests (aka KAT) for ECDSA P-256.
    ///
    /// Test vector source:
    /// NIST CAVP 186-3 SigGen, P-256 with SHA-256
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
        self.kat_signature_generate(pka, curve)?;
        self.kat_signature_verify(pka, curve)
    }

    fn kat_signature_generate<P: RegisterPort>(
        &self,
        pka: &mut Pka<'_, '_, P>,
        curve: &EcCurve,
    ) -> SeResult<()> {
        let mut priv_key = priv_key();
        let signature = ecdsa::sign(pka, curve, &priv_key, &EcInt::from_be_const(&NONCE), &HASH)
            .map_err(|_| SeError::KAT_ECDSA_P256_SIGNATURE_MISMATCH);
        priv_key.zeroize();

        let signature = signature?;
        if signature.r.as_bytes() != SIG_R || signature.s.as_bytes() != SIG_S {
            Err(SeError::KAT_ECDSA_P256_SIGNATURE_MISMATCH)?;
        }
        Ok(())
    }

    fn kat_signature_verify<P: RegisterPort>(
        &self,
        pka: &mut Pka<'_, '_, P>,
        curve: &EcCurve,
    ) -> SeResult<()> {
        let pub_key = EcPoint::new(EcInt::from_be_const(&PUB_X), EcInt::from_be_const(&PUB_Y));
        let signature = EcdsaSignature::new(
            EcInt::from_be_const(&SIG_R),
            EcInt::from_be_const(&SIG_S),
        );
        if !ecdsa::verify(pka, curve, &pub_key, &HASH, &signature)
            .map_err(|_| SeError::KAT_ECDSA_P256_VERIFY_FAILURE)?
        {
            Err(SeError::KAT_ECDSA_P256_VERIFY_FAILURE)?;
        }
        Ok(())
    }
}
