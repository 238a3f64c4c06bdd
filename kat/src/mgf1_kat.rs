/*++

Licensed under the Apache-2.0 license.

File Name:

    mgf1_kat.rs

Abstract:

    File contains the Known Answer Test (KAT) for MGF1 over SHA-384.

--*/

use hex_literal::hex;
use secengine_drivers::mgf1::mgf1;
use secengine_drivers::{HashEngine, RegisterPort, SeError, SeResult, ShaAlgorithm};

const SEED: &[u8] = b"abc";

// Spans two counter blocks.
const EXPECTED_MASK: [u8; 64] = hex!(
    "a18a184a7abbdab7098707e091f3b588f10f5b7cd0f9cfdeff93d7b46c6ae4b9"
    "c5af706cb3d23492ae4a0ef2df8ee439f2ba583fcde04b44c92b29679d3ae576"
);

#[derive(Default, Debug)]
pub struct Mgf1Kat {}

impl Mgf1Kat {
    pub fn execute<P: RegisterPort>(&self, sha: &mut HashEngine<'_, '_, P>) -> SeResult<()> {
        let mut mask = [0u8; 64];
        mgf1(sha, ShaAlgorithm::Sha384, SEED, &mut mask)
            .map_err(|_| SeError::KAT_MGF1_MASK_MISMATCH)?;
        if mask != EXPECTED_MASK {
            Err(SeError::KAT_MGF1_MASK_MISMATCH)?;
        }
        Ok(())
    }
}
