/*++

Licensed under the Apache-2.0 license.

File Name:

    sha256_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for SHA-224 and SHA-256.

--*/

use hex_literal::hex;
use secengine_drivers::{HashEngine, RegisterPort, SeError, SeResult, ShaAlgorithm};

const SHA224_DIGEST: [u8; 28] =
    hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7");

const SHA256_DIGEST: [u8; 32] =
    hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");

// Two block message of FIPS 180-2 Appendix B.2
const TWO_BLOCK_MSG: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

const TWO_BLOCK_DIGEST: [u8; 32] =
    hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1");

#[derive(Default, Debug)]
pub struct Sha256Kat {}

impl Sha256Kat {
    /// This function executes the Known Answer Tests (aka KAT) for SHA-224
    /// and SHA-256.
    ///
    /// Test vector source:
    /// FIPS 180-2 Appendix B and FIPS 180-4 examples
    ///
    /// # Arguments
    ///
    /// * `sha` - Hash engine driver
    ///
    /// # Returns
    ///
    /// * `SeResult` - Result denoting the KAT outcome.
    pub fn execute<P: RegisterPort>(&self, sha: &mut HashEngine<'_, '_, P>) -> SeResult<()> {
        self.kat_sha224(sha)?;
        self.kat_sha256(sha)
    }

    fn kat_sha224<P: RegisterPort>(&self, sha: &mut HashEngine<'_, '_, P>) -> SeResult<()> {
        let digest = sha
            .digest(ShaAlgorithm::Sha224, b"abc")
            .map_err(|_| SeError::KAT_SHA224_DIGEST_MISMATCH)?;
        if digest.as_bytes() != SHA224_DIGEST {
            Err(SeError::KAT_SHA224_DIGEST_MISMATCH)?;
        }
        Ok(())
    }

    fn kat_sha256<P: RegisterPort>(&self, sha: &mut HashEngine<'_, '_, P>) -> SeResult<()> {
        for (msg, expected) in [(&b"abc"[..], SHA256_DIGEST), (TWO_BLOCK_MSG, TWO_BLOCK_DIGEST)] {
            let digest = sha
                .digest(ShaAlgorithm::Sha256, msg)
                .map_err(|_| SeError::KAT_SHA256_DIGEST_MISMATCH)?;
            if digest.as_bytes() != expected {
                Err(SeError::KAT_SHA256_DIGEST_MISMATCH)?;
            }
        }
        Ok(())
    }
}
