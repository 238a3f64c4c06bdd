/*++

Licensed under the Apache-2.0 license.

File Name:

    sha512_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for SHA-512 and its
    truncated variants.

--*/

use hex_literal::hex;
use secengine_drivers::{HashEngine, RegisterPort, SeError, SeResult, ShaAlgorithm};

const SHA512_DIGEST: [u8; 64] = hex!(
    "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a"
    "2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
);

const SHA512_224_DIGEST: [u8; 28] =
    hex!("4634270f707b6a54daae7530460842e20e37ed265ceee9a43e8924aa");

const SHA512_256_DIGEST: [u8; 32] =
    hex!("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23");

#[derive(Default, Debug)]
pub struct Sha512Kat {}

impl Sha512Kat {
    /// This function executes the Known Answer Tests (aka KAT) for SHA-512,
    /// SHA-512/224 and SHA-512/256.
    ///
    /// Test vector source:
    /// FIPS 180-4 examples ("abc")
    ///
    /// # Arguments
    ///
    /// * `sha` - Hash engine driver
    ///
    /// # Returns
    ///
    /// * `SeResult` - Result denoting the KAT outcome.
    pub fn execute<P: RegisterPort>(&self, sha: &mut HashEngine<'_, '_, P>) -> SeResult<()> {
        let vectors: [(ShaAlgorithm, &[u8], SeError); 3] = [
            (
                ShaAlgorithm::Sha512,
                &SHA512_DIGEST,
                SeError::KAT_SHA512_DIGEST_MISMATCH,
            ),
            (
                ShaAlgorithm::Sha512_224,
                &SHA512_224_DIGEST,
                SeError::KAT_SHA512_224_DIGEST_MISMATCH,
            ),
            (
                ShaAlgorithm::Sha512_256,
                &SHA512_256_DIGEST,
                SeError::KAT_SHA512_256_DIGEST_MISMATCH,
            ),
        ];
        for (algorithm, expected, err) in vectors {
            let digest = sha.digest(algorithm, b"abc").map_err(|_| err)?;
            if digest.as_bytes() != expected {
                Err(err)?;
            }
        }
        Ok(())
    }
}
