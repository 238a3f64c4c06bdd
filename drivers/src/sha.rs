/*++

Licensed under the Apache-2.0 license.

File Name:

    sha.rs

Abstract:

    File contains the task driver of the SHA hash engine.

    A message is hashed as a sequence of engine tasks. Every task but the
    last covers a whole number of blocks; the engine pads the message when
    its count of remaining bits reaches zero.

--*/

use crate::{EngineConfig, EngineGuard, SeError, SeResult};
use secengine_registers::sha::*;
use secengine_registers::{DeviceId, RegisterPort};
use tock_registers::fields::FieldValue;
use tock_registers::LocalRegisterCopy;

/// SHA algorithm
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl ShaAlgorithm {
    /// Block size in bytes
    pub const fn block_size(&self) -> usize {
        if self.is_wide() {
            128
        } else {
            64
        }
    }

    /// Digest size in bytes
    pub const fn digest_size(&self) -> usize {
        match self {
            ShaAlgorithm::Sha1 => 20,
            ShaAlgorithm::Sha224 | ShaAlgorithm::Sha512_224 => 28,
            ShaAlgorithm::Sha256 | ShaAlgorithm::Sha512_256 => 32,
            ShaAlgorithm::Sha384 => 48,
            ShaAlgorithm::Sha512 => 64,
        }
    }

    const fn is_wide(&self) -> bool {
        matches!(
            self,
            ShaAlgorithm::Sha384
                | ShaAlgorithm::Sha512
                | ShaAlgorithm::Sha512_224
                | ShaAlgorithm::Sha512_256
        )
    }

    fn config(&self) -> FieldValue<u32, ShaConfig::Register> {
        match self {
            ShaAlgorithm::Sha1 => ShaConfig::ALGORITHM::Sha1,
            ShaAlgorithm::Sha224 => ShaConfig::ALGORITHM::Sha224,
            ShaAlgorithm::Sha256 => ShaConfig::ALGORITHM::Sha256,
            ShaAlgorithm::Sha384 => ShaConfig::ALGORITHM::Sha384,
            ShaAlgorithm::Sha512 => ShaConfig::ALGORITHM::Sha512,
            ShaAlgorithm::Sha512_224 => ShaConfig::ALGORITHM::Sha512_224,
            ShaAlgorithm::Sha512_256 => ShaConfig::ALGORITHM::Sha512_256,
        }
    }

    /// Initial hash value software must load instead of the engine's
    /// built-in one. The engine seeds both SHA-512/t variants with the
    /// SHA-512 IV.
    const fn software_iv(&self) -> Option<&'static [u64; 8]> {
        match self {
            ShaAlgorithm::Sha512_224 => Some(&SHA512_224_IV),
            ShaAlgorithm::Sha512_256 => Some(&SHA512_256_IV),
            _ => None,
        }
    }
}

/// SHA-512/224 Initial Hash Vectors
const SHA512_224_IV: [u64; 8] = [
    0x8c3d37c819544da2,
    0x73e1996689dcd4d6,
    0x1dfab7ae32ff9c82,
    0x679dd514582f9fcf,
    0x0f6d2b697bd44da8,
    0x77e36f7304c48942,
    0x3f9d85a86a1d36c8,
    0x1112e6ad91d692a1,
];

/// SHA-512/256 Initial Hash Vectors
const SHA512_256_IV: [u64; 8] = [
    0x22312194fc2bf72c,
    0x9f555fa3c84c64c2,
    0x2393b86b6f53b151,
    0x963877195940eabd,
    0x96283ee2a88effe3,
    0xbe5e1e2553863992,
    0x2b0199fc2c85b8aa,
    0x0eb72ddc81c52ca2,
];

/// Largest task size, a multiple of every block size
const MAX_TASK_BYTES: usize = SHA_MAX_IN_SIZE as usize;

/// Message digest of up to 64 bytes
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ShaDigest {
    len: usize,
    bytes: [u8; 64],
}

impl ShaDigest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl AsRef<[u8]> for ShaDigest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Engine state as seen by the driver
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EngineState {
    Idle,

    /// A task was started and never completed
    Busy,

    /// The engine halted or reported an error
    Halted,
}

/// Bookkeeping of one message
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HashContext {
    algorithm: ShaAlgorithm,
    total_len: u64,
    remaining: u64,
    first_chunk: bool,
    state: EngineState,
}

impl HashContext {
    pub fn algorithm(&self) -> ShaAlgorithm {
        self.algorithm
    }

    /// Bytes not yet submitted
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Total message length in bytes
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// State of the engine after the last chunk. Anything but `Idle`
    /// means the message failed and the engine must be initialized again.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns true once every byte has been hashed.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0 && !self.first_chunk
    }
}

/// SHA hash engine driver
pub struct HashEngine<'g, 'p, P: RegisterPort> {
    guard: &'g EngineGuard<'p, P>,
    config: EngineConfig,
    ctx: Option<HashContext>,
}

impl<'g, 'p, P: RegisterPort> HashEngine<'g, 'p, P> {
    /// Create a driver over an acquired SE0 engine.
    ///
    /// # Arguments
    ///
    /// * `guard` - Mutex guard of the hash engine device
    /// * `config` - Poll budgets
    pub fn new(guard: &'g EngineGuard<'p, P>, config: &EngineConfig) -> SeResult<Self> {
        if guard.device() != DeviceId::Se0 {
            return Err(SeError::DRIVER_SHA_WRONG_ENGINE);
        }
        Ok(Self {
            guard,
            config: *config,
            ctx: None,
        })
    }

    /// Context of the message in progress
    pub fn context(&self) -> Option<&HashContext> {
        self.ctx.as_ref()
    }

    fn engine_state(&self) -> EngineState {
        let status = LocalRegisterCopy::<u32, ShaStatus::Register>::new(self.guard.read(SHA_STATUS));
        match status.read_as_enum(ShaStatus::STATE) {
            Some(ShaStatus::STATE::Value::Idle) => EngineState::Idle,
            Some(ShaStatus::STATE::Value::Busy) => EngineState::Busy,
            _ => EngineState::Halted,
        }
    }

    fn write_bits(&self, base: u32, bits: u128) {
        for word in 0..SHA_MSG_LENGTH_WORDS {
            self.guard
                .write(base + word * 4, (bits >> (32 * word)) as u32);
        }
    }

    /// Bring the engine to a clean idle state and program the length of a
    /// new message.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - SHA algorithm
    /// * `total_len` - Message length in bytes
    pub fn init(&mut self, algorithm: ShaAlgorithm, total_len: u64) -> SeResult<()> {
        self.ctx = None;

        if self.engine_state() == EngineState::Busy {
            log::debug!("SHA engine busy at init, halting");
            self.guard.write(SHA_CTRL, ShaCtrl::HALT::SET.value);
            if !self
                .guard
                .poll_until(self.config.sha_reset_polls, |_| {
                    self.engine_state() != EngineState::Busy
                })
            {
                return Err(SeError::DRIVER_SHA_RESET_TIMEOUT);
            }
        }

        self.guard.write(SHA_CTRL, ShaCtrl::SOFT_RESET::SET.value);
        let mut state = EngineState::Busy;
        if !self.guard.poll_until(self.config.sha_reset_polls, |_| {
            state = self.engine_state();
            state != EngineState::Busy
        }) {
            log::warn!("SHA engine did not leave reset");
            return Err(SeError::DRIVER_SHA_RESET_TIMEOUT);
        }
        if state == EngineState::Halted {
            log::warn!("SHA engine halted after reset");
            return Err(SeError::DRIVER_SHA_ENGINE_HALTED);
        }

        // Soft reset leaves the length counters untouched.
        self.write_bits(SHA_MSG_LENGTH, 0);
        self.write_bits(SHA_MSG_LEFT, 0);

        let bits = (total_len as u128) * 8;
        self.guard.write(SHA_CONFIG, algorithm.config().value);
        self.write_bits(SHA_MSG_LENGTH, bits);
        self.write_bits(SHA_MSG_LEFT, bits);

        self.ctx = Some(HashContext {
            algorithm,
            total_len,
            remaining: total_len,
            first_chunk: true,
            state: EngineState::Idle,
        });
        Ok(())
    }

    fn load_iv(&self, iv: &[u64; 8]) {
        for (i, word) in iv.iter().enumerate() {
            let offset = SHA_HASH_RESULT + (i as u32) * 8;
            self.guard.write(offset, *word as u32);
            self.guard.write(offset + 4, (*word >> 32) as u32);
        }
    }

    /// Hash the next chunk of the message.
    ///
    /// # Arguments
    ///
    /// * `data` - Chunk; a multiple of the block size unless it is the last
    /// * `is_last` - Whether `data` ends the message
    /// * `use_default_iv` - Seed the first chunk with the engine's built-in IV
    pub fn insert_chunk(&mut self, data: &[u8], is_last: bool, use_default_iv: bool) -> SeResult<()> {
        let mut ctx = match self.ctx {
            Some(ctx) if ctx.state == EngineState::Idle && !ctx.is_complete() => ctx,
            _ => return Err(SeError::DRIVER_SHA_INVALID_STATE),
        };
        let algorithm = ctx.algorithm;
        let len = data.len() as u64;

        if data.len() > MAX_TASK_BYTES {
            return Err(SeError::DRIVER_SHA_MAX_DATA);
        }
        if len > ctx.remaining {
            return Err(SeError::DRIVER_SHA_CHUNK_OVERRUN);
        }
        let ends_message = len == ctx.remaining;
        if is_last != ends_message {
            return Err(SeError::DRIVER_SHA_LAST_CHUNK_MISMATCH);
        }
        if !is_last && len == 0 {
            return Err(SeError::DRIVER_SHA_EMPTY_CHUNK);
        }
        if !is_last && data.len() % algorithm.block_size() != 0 {
            return Err(SeError::DRIVER_SHA_UNALIGNED_CHUNK);
        }

        let mut config = algorithm.config();
        if ctx.first_chunk {
            match algorithm.software_iv() {
                Some(iv) => self.load_iv(iv),
                None if use_default_iv => config = config + ShaConfig::HW_INIT_HASH::SET,
                None => {}
            }
        }
        self.guard.write(SHA_CONFIG, config.value);

        let addr = self.guard.dma_address(data);
        self.guard.write(SHA_IN_ADDR, addr as u32);
        self.guard.write(SHA_IN_ADDR_HI, (addr >> 32) as u32);
        self.guard.write(SHA_IN_SIZE, data.len() as u32);

        let op = ShaOperation::START::SET + ShaOperation::LAST_BUF.val(is_last as u32);

        // Terminal on failure: the context keeps the failed state until the
        // next init.
        ctx.state = EngineState::Busy;
        self.ctx = Some(ctx);
        self.guard.write(SHA_OPERATION, op.value);

        let budget = self
            .config
            .sha_task_polls(data.len(), algorithm.block_size());
        let mut state = EngineState::Busy;
        if !self.guard.poll_until(budget, |_| {
            state = self.engine_state();
            state != EngineState::Busy
        }) {
            log::warn!("SHA task of {} bytes timed out", data.len());
            return Err(SeError::DRIVER_SHA_TASK_TIMEOUT);
        }
        if state == EngineState::Halted {
            log::warn!("SHA engine halted during task");
            self.set_state(EngineState::Halted);
            return Err(SeError::DRIVER_SHA_ENGINE_HALTED);
        }
        let err = self.guard.read(SHA_ERR_STATUS);
        if err != SHA_ERR_NONE {
            log::warn!("SHA engine error {:#x}", err);
            self.set_state(EngineState::Halted);
            return Err(SeError::DRIVER_SHA_ENGINE_FAULT);
        }

        ctx.remaining -= len;
        ctx.first_chunk = false;
        ctx.state = EngineState::Idle;
        self.ctx = Some(ctx);
        Ok(())
    }

    fn set_state(&mut self, state: EngineState) {
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.state = state;
        }
    }

    /// Read the digest of a completed message.
    ///
    /// # Arguments
    ///
    /// * `zeroize` - Clear the result registers after reading them
    pub fn read_digest(&mut self, zeroize: bool) -> SeResult<ShaDigest> {
        let ctx = match self.ctx {
            Some(ctx) if ctx.state == EngineState::Idle && ctx.is_complete() => ctx,
            _ => return Err(SeError::DRIVER_SHA_INVALID_STATE),
        };
        let algorithm = ctx.algorithm;
        let mut digest = ShaDigest {
            len: algorithm.digest_size(),
            bytes: [0u8; 64],
        };

        if algorithm.is_wide() {
            // Each 64-bit state word is split across two registers, low half
            // first. SHA-512/224 ends on the high half of the fourth word.
            for (i, out) in digest.bytes.chunks_exact_mut(8).enumerate() {
                let offset = SHA_HASH_RESULT + (i as u32) * 8;
                let lo = self.guard.read(offset);
                let hi = self.guard.read(offset + 4);
                out[..4].copy_from_slice(&hi.to_be_bytes());
                out[4..].copy_from_slice(&lo.to_be_bytes());
            }
        } else {
            for (i, out) in digest.bytes[..32].chunks_exact_mut(4).enumerate() {
                out.copy_from_slice(&self.guard.read(SHA_HASH_RESULT + (i as u32) * 4).to_be_bytes());
            }
        }
        digest.bytes[digest.len..].fill(0);

        if zeroize {
            for word in 0..SHA_HASH_RESULT_WORDS {
                self.guard.write(SHA_HASH_RESULT + word * 4, 0);
            }
        }
        self.ctx = None;
        Ok(digest)
    }

    /// Compute the digest of `data` in as few tasks as possible.
    ///
    /// # Arguments
    ///
    /// * `algorithm` - SHA algorithm
    /// * `data` - Message
    pub fn digest(&mut self, algorithm: ShaAlgorithm, data: &[u8]) -> SeResult<ShaDigest> {
        self.init(algorithm, data.len() as u64)?;
        let mut rest = data;
        loop {
            let (chunk, tail) = rest.split_at(rest.len().min(MAX_TASK_BYTES));
            self.insert_chunk(chunk, tail.is_empty(), true)?;
            rest = tail;
            if rest.is_empty() {
                break;
            }
        }
        self.read_digest(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CallerToken, EngineSelector, OperationClass};
    use secengine_emu_periph::SeEmulator;
    use sha2::Digest;

    fn config() -> EngineConfig {
        EngineConfig {
            sha_task_base_polls: 2_000,
            sha_reset_polls: 200,
            ..EngineConfig::DEFAULT
        }
    }

    fn with_sha(emu: &SeEmulator, f: impl FnOnce(&mut HashEngine<'_, '_, SeEmulator>)) {
        let config = config();
        let token = CallerToken::new(4).unwrap();
        let guard = EngineSelector::acquire(emu, OperationClass::Sha, token, &config).unwrap();
        let mut sha = HashEngine::new(&guard, &config).unwrap();
        f(&mut sha);
    }

    fn reference(algorithm: ShaAlgorithm, data: &[u8]) -> Vec<u8> {
        match algorithm {
            ShaAlgorithm::Sha1 => sha1::Sha1::digest(data).to_vec(),
            ShaAlgorithm::Sha224 => sha2::Sha224::digest(data).to_vec(),
            ShaAlgorithm::Sha256 => sha2::Sha256::digest(data).to_vec(),
            ShaAlgorithm::Sha384 => sha2::Sha384::digest(data).to_vec(),
            ShaAlgorithm::Sha512 => sha2::Sha512::digest(data).to_vec(),
            ShaAlgorithm::Sha512_224 => sha2::Sha512_224::digest(data).to_vec(),
            ShaAlgorithm::Sha512_256 => sha2::Sha512_256::digest(data).to_vec(),
        }
    }

    const ALL: [ShaAlgorithm; 7] = [
        ShaAlgorithm::Sha1,
        ShaAlgorithm::Sha224,
        ShaAlgorithm::Sha256,
        ShaAlgorithm::Sha384,
        ShaAlgorithm::Sha512,
        ShaAlgorithm::Sha512_224,
        ShaAlgorithm::Sha512_256,
    ];

    const TWO_BLOCK_256: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";
    const TWO_BLOCK_512: &[u8] = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmnhijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";

    #[test]
    fn test_digest_vectors() {
        let emu = SeEmulator::new();
        with_sha(&emu, |sha| {
            for algorithm in ALL {
                for data in [&b""[..], b"abc", TWO_BLOCK_256, TWO_BLOCK_512] {
                    let digest = sha.digest(algorithm, data).unwrap();
                    assert_eq!(digest.len(), algorithm.digest_size());
                    assert_eq!(digest.as_bytes(), &reference(algorithm, data)[..], "{:?}", algorithm);
                }
            }
        });
    }

    #[test]
    fn test_two_chunks_match_one() {
        let emu = SeEmulator::new();
        let data: Vec<u8> = (0..300u32).map(|i| i as u8).collect();
        with_sha(&emu, |sha| {
            for algorithm in [ShaAlgorithm::Sha256, ShaAlgorithm::Sha384, ShaAlgorithm::Sha512_224] {
                let block = algorithm.block_size();
                sha.init(algorithm, data.len() as u64).unwrap();
                sha.insert_chunk(&data[..block], false, true).unwrap();
                assert_eq!(sha.context().unwrap().remaining(), (data.len() - block) as u64);
                sha.insert_chunk(&data[block..], true, true).unwrap();
                assert!(sha.context().unwrap().is_complete());
                let chunked = sha.read_digest(false).unwrap();
                assert_eq!(chunked, sha.digest(algorithm, &data).unwrap());
            }
        });
        assert_eq!(emu.with_bus(|bus| bus.sha().tasks()), 9);
    }

    #[test]
    fn test_length_registers_reprogrammed() {
        let emu = SeEmulator::new();
        with_sha(&emu, |sha| {
            sha.digest(ShaAlgorithm::Sha256, &[0x11; 200]).unwrap();
            sha.init(ShaAlgorithm::Sha256, 10).unwrap();
        });
        assert_eq!(emu.with_bus(|bus| bus.sha().msg_length()), 80);
        assert_eq!(emu.with_bus(|bus| bus.sha().msg_left()), 80);
    }

    #[test]
    fn test_chunk_validation() {
        let emu = SeEmulator::new();
        with_sha(&emu, |sha| {
            sha.init(ShaAlgorithm::Sha384, 256).unwrap();
            assert_eq!(
                sha.insert_chunk(&[0; 64], false, true),
                Err(SeError::DRIVER_SHA_UNALIGNED_CHUNK)
            );
            assert_eq!(
                sha.insert_chunk(&[0; 384], true, true),
                Err(SeError::DRIVER_SHA_CHUNK_OVERRUN)
            );
            assert_eq!(
                sha.insert_chunk(&[0; 128], true, true),
                Err(SeError::DRIVER_SHA_LAST_CHUNK_MISMATCH)
            );
            assert_eq!(
                sha.insert_chunk(&[0; 256], false, true),
                Err(SeError::DRIVER_SHA_LAST_CHUNK_MISMATCH)
            );
            assert_eq!(
                sha.insert_chunk(&[], false, true),
                Err(SeError::DRIVER_SHA_EMPTY_CHUNK)
            );
            assert_eq!(sha.read_digest(false), Err(SeError::DRIVER_SHA_INVALID_STATE));
        });
        assert_eq!(emu.with_bus(|bus| bus.sha().tasks()), 0);
        assert_eq!(
            SeError::DRIVER_SHA_UNALIGNED_CHUNK.kind(),
            Some(secengine_error::ErrorKind::InvalidConfig)
        );
    }

    #[test]
    fn test_insert_without_init() {
        let emu = SeEmulator::new();
        with_sha(&emu, |sha| {
            assert_eq!(
                sha.insert_chunk(b"abc", true, true),
                Err(SeError::DRIVER_SHA_INVALID_STATE)
            );
        });
    }

    #[test]
    fn test_read_digest_zeroizes() {
        let emu = SeEmulator::new();
        with_sha(&emu, |sha| {
            sha.init(ShaAlgorithm::Sha512, 3).unwrap();
            sha.insert_chunk(b"abc", true, true).unwrap();
            let digest = sha.read_digest(true).unwrap();
            assert_eq!(digest.as_bytes(), &reference(ShaAlgorithm::Sha512, b"abc")[..]);
            assert_eq!(sha.read_digest(false), Err(SeError::DRIVER_SHA_INVALID_STATE));
        });
        assert!(emu.with_bus(|bus| bus.sha().result().iter().all(|w| *w == 0)));
    }

    #[test]
    fn test_wrong_engine() {
        let emu = SeEmulator::new();
        let config = config();
        let token = CallerToken::new(4).unwrap();
        let guard = EngineSelector::acquire(&emu, OperationClass::Ecc, token, &config).unwrap();
        assert_eq!(
            HashEngine::new(&guard, &config).err(),
            Some(SeError::DRIVER_SHA_WRONG_ENGINE)
        );
    }

    #[test]
    fn test_engine_fault_is_terminal() {
        let emu = SeEmulator::new();
        emu.with_bus(|bus| bus.sha_mut().fail_next_task(SHA_ERR_BUS));
        with_sha(&emu, |sha| {
            sha.init(ShaAlgorithm::Sha256, 3).unwrap();
            assert_eq!(
                sha.insert_chunk(b"abc", true, true),
                Err(SeError::DRIVER_SHA_ENGINE_FAULT)
            );
            let ctx = sha.context().unwrap();
            assert_eq!(ctx.state(), EngineState::Halted);
            assert_eq!(ctx.remaining(), 3);
            assert_eq!(
                sha.insert_chunk(b"abc", true, true),
                Err(SeError::DRIVER_SHA_INVALID_STATE)
            );
            assert_eq!(sha.read_digest(false).err(), Some(SeError::DRIVER_SHA_INVALID_STATE));
            let digest = sha.digest(ShaAlgorithm::Sha256, b"abc").unwrap();
            assert_eq!(digest.as_bytes(), &reference(ShaAlgorithm::Sha256, b"abc")[..]);
        });
    }

    #[test]
    fn test_hung_task_times_out_and_recovers() {
        let emu = SeEmulator::new();
        emu.with_bus(|bus| bus.sha_mut().hang_next_task());
        with_sha(&emu, |sha| {
            sha.init(ShaAlgorithm::Sha1, 3).unwrap();
            let err = sha.insert_chunk(b"abc", true, true).unwrap_err();
            assert_eq!(err, SeError::DRIVER_SHA_TASK_TIMEOUT);
            assert_eq!(err.kind(), Some(secengine_error::ErrorKind::Timeout));
            assert_eq!(sha.context().unwrap().state(), EngineState::Busy);

            // The engine is still busy; init halts and resets it.
            let digest = sha.digest(ShaAlgorithm::Sha1, b"abc").unwrap();
            assert_eq!(digest.as_bytes(), &reference(ShaAlgorithm::Sha1, b"abc")[..]);
        });
    }

    #[test]
    fn test_reset_timeout() {
        let emu = SeEmulator::new();
        emu.with_bus(|bus| bus.sha_mut().hang_next_reset());
        with_sha(&emu, |sha| {
            assert_eq!(
                sha.init(ShaAlgorithm::Sha256, 3),
                Err(SeError::DRIVER_SHA_RESET_TIMEOUT)
            );
        });
    }

    #[test]
    fn test_halted_after_reset() {
        let emu = SeEmulator::new();
        emu.with_bus(|bus| bus.sha_mut().set_stuck_halted(true));
        with_sha(&emu, |sha| {
            let err = sha.init(ShaAlgorithm::Sha256, 3).unwrap_err();
            assert_eq!(err, SeError::DRIVER_SHA_ENGINE_HALTED);
            assert_eq!(err.kind(), Some(secengine_error::ErrorKind::EngineError));
        });
    }
}
