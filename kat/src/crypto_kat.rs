/*++

Licensed under the Apache-2.0 license.

File Name:

    crypto_kat.rs

Abstract:

    File contains function to execute all the Known Answer Tests (KAT) for cryptography operations.

--*/

use crate::{
    EccPointKat, EcdsaP256Kat, Mgf1Kat, RsaPssKat, Sha1Kat, Sha256Kat, Sha384Kat, Sha512Kat,
};
use secengine_drivers::{HashEngine, Pka, RegisterPort, SeResult};

#[derive(Default, Debug)]
pub struct CryptoKat {}

impl CryptoKat {
    /// This function executes all the Known Answer Tests (aka KAT).
    ///
    /// # Arguments
    ///
    /// * `sha` - Hash engine driver
    /// * `pka` - PKA driver
    ///
    /// # Returns
    ///
    /// * `SeResult` - Result denoting the KAT outcome.
    pub fn execute<P: RegisterPort, Q: RegisterPort>(
        &self,
        sha: &mut HashEngine<'_, '_, P>,
        pka: &mut Pka<'_, '_, Q>,
    ) -> SeResult<()> {
        log::debug!("running known answer tests");
        Sha1Kat::default().execute(sha)?;
        Sha256Kat::default().execute(sha)?;
        Sha384Kat::default().execute(sha)?;
        Sha512Kat::default().execute(sha)?;
        Mgf1Kat::default().execute(sha)?;
        EccPointKat::default().execute(pka)?;
        EcdsaP256Kat::default().execute(pka)?;
        RsaPssKat::default().execute(pka, sha)?;
        log::debug!("known answer tests passed");
        Ok(())
    }
}
