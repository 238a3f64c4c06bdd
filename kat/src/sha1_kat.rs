/*++

Licensed under the Apache-2.0 license.

File Name:

    sha1_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for SHA-1 on the hash engine.

--*/

use hex_literal::hex;
use secengine_drivers::{HashEngine, RegisterPort, SeError, SeResult, ShaAlgorithm};

const EXPECTED_DIGEST: [u8; 20] = hex!("a9993e364706816aba3e25717850c26c9cd0d89d");

#[derive(Default, Debug)]
pub struct Sha1Kat {}

impl Sha1Kat {
    /// This function executes the Known Answer Tests (aka KAT) for SHA-1.
    ///
    /// Test vector source:
    /// FIPS 180-2 Appendix A ("abc")
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
            .digest(ShaAlgorithm::Sha1, b"abc")
            .map_err(|_| SeError::KAT_SHA1_DIGEST_MISMATCH)?;
        if digest.as_bytes() != EXPECTED_DIGEST {
            Err(SeError::KAT_SHA1_DIGEST_MISMATCH)?;
        }
        Ok(())
    }
}
