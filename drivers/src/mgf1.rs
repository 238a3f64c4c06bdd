/*++

Licensed under the Apache-2.0 license.

File Name:

    mgf1.rs

Abstract:

    File contains the MGF1 mask generation function built on the hash engine.

--*/

use crate::{HashEngine, SeError, SeResult, ShaAlgorithm};
use secengine_registers::RegisterPort;

/// Longest supported seed in bytes
pub const MGF1_MAX_SEED_LEN: usize = 128;

/// Fill `mask` with MGF1 output: the concatenation of
/// Hash(seed || counter) for counter = 0, 1, ... truncated to `mask.len()`.
///
/// # Arguments
///
/// * `sha` - Hash engine driver
/// * `algorithm` - Hash algorithm
/// * `seed` - Seed
/// * `mask` - Output buffer; its length is the mask length
pub fn mgf1<P: RegisterPort>(
    sha: &mut HashEngine<'_, '_, P>,
    algorithm: ShaAlgorithm,
    seed: &[u8],
    mask: &mut [u8],
) -> SeResult<()> {
    if seed.len() > MGF1_MAX_SEED_LEN {
        return Err(SeError::DRIVER_MGF1_SEED_TOO_LONG);
    }
    let hash_len = algorithm.digest_size();
    if mask.len() as u64 > (hash_len as u64) << 32 {
        return Err(SeError::DRIVER_MGF1_MASK_TOO_LONG);
    }

    let mut input = [0u8; MGF1_MAX_SEED_LEN + 4];
    input[..seed.len()].copy_from_slice(seed);
    let input_len = seed.len() + 4;

    for (counter, out) in mask.chunks_mut(hash_len).enumerate() {
        input[seed.len()..input_len].copy_from_slice(&(counter as u32).to_be_bytes());
        let digest = sha.digest(algorithm, &input[..input_len])?;
        out.copy_from_slice(&digest.as_bytes()[..out.len()]);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CallerToken, EngineConfig, EngineSelector, OperationClass};
    use secengine_emu_periph::SeEmulator;
    use sha2::{Digest, Sha384};

    fn with_sha(f: impl FnOnce(&mut HashEngine<'_, '_, SeEmulator>)) {
        let emu = SeEmulator::new();
        let config = EngineConfig::default();
        let token = CallerToken::new(8).unwrap();
        let guard = EngineSelector::acquire(&emu, OperationClass::Sha, token, &config).unwrap();
        let mut sha = HashEngine::new(&guard, &config).unwrap();
        f(&mut sha);
    }

    fn software_mgf1(seed: &[u8], len: usize) -> Vec<u8> {
        let mut out = Vec::new();
        let mut counter = 0u32;
        while out.len() < len {
            let mut hasher = Sha384::new();
            hasher.update(seed);
            hasher.update(counter.to_be_bytes());
            out.extend_from_slice(&hasher.finalize());
            counter += 1;
        }
        out.truncate(len);
        out
    }

    #[test]
    fn test_mask_lengths() {
        with_sha(|sha| {
            let seed = [0xa5u8; 48];
            for len in [0usize, 1, 47, 48, 49, 300] {
                let mut mask = vec![0u8; len];
                mgf1(sha, ShaAlgorithm::Sha384, &seed, &mut mask).unwrap();
                assert_eq!(mask, software_mgf1(&seed, len));

                let mut again = vec![0u8; len];
                mgf1(sha, ShaAlgorithm::Sha384, &seed, &mut again).unwrap();
                assert_eq!(mask, again);
            }
        });
    }

    #[test]
    fn test_seed_too_long() {
        with_sha(|sha| {
            let mut mask = [0u8; 16];
            assert_eq!(
                mgf1(sha, ShaAlgorithm::Sha256, &[0u8; MGF1_MAX_SEED_LEN + 1], &mut mask),
                Err(SeError::DRIVER_MGF1_SEED_TOO_LONG)
            );
        });
    }
}
