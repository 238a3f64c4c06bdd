/*++

Licensed under the Apache-2.0 license.

File Name:

    sha384_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for SHA-384.

--*/

use hex_literal::hex;
use secengine_drivers::{HashEngine, RegisterPort, SeError, SeResult, ShaAlgorithm};

const EXPECTED_DIGEST: [u8; 48] = hex!(
    "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed"
    "8086072ba1e7cc2358baeca134c825a7"
);

#[derive(Default, Debug)]
pub struct Sha384Kat {}

impl Sha384Kat {
    /// This function executes the Known Answer Tests (aka KAT) for SHA-384.
    ///
    /// Test vector source:
    /// FIPS 180-2 Appendix D.1
    ///
    /// # Arguments
    ///
    /// * `sha` - Hash engine driver
    ///
    /// # Returns
    ///
    /// * `SeResult` - Result denoting the KAT outcome.
    pub fn execute<P: RegisterPort>(&self, sha: &mut HashEngine<'_, '_, P>) -> SeResult<()> {
        let digest = sha
            .digest(ShaAlgorithm::Sha384, b"abc")
            .map_err(|_| SeError::KAT_SHA384_DIGEST_MISMATCH)?;
        if digest.as_bytes() != EXPECTED_DIGEST {
            Err(SeError::KAT_SHA384_DIGEST_MISMATCH)?;
        }
        Ok(())
    }
}
