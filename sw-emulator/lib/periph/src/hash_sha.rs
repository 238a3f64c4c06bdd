/*++

Licensed under the Apache-2.0 license.

File Name:

    hash_sha.rs

Abstract:

    File contains the SHA hash engine peripheral of device SE0.

    A task hashes IN_SIZE bytes fetched by DMA from IN_ADDR. The engine
    counts MSG_LEFT down and pads the message once it reaches zero. The hash
    state carries over between tasks through the HASH_RESULT registers.

--*/

use crate::DmaMemory;
use secengine_emu_crypto::{ShaCore, ShaMode};
use secengine_registers::sha::*;
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::InMemoryRegister;
use tock_registers::LocalRegisterCopy;

/// Ticks needed to start any task
const TASK_TICKS: u64 = 16;

/// Ticks per hashed block
const BLOCK_TICKS: u64 = 1;

/// Ticks needed to complete a soft reset
const RESET_TICKS: u64 = 4;

#[derive(Debug, Clone)]
struct PendingTask {
    ready_at: u64,
    result: [u32; ShaCore::RESULT_WORDS],
    msg_left: u128,
    err: u32,
}

#[derive(Debug, Clone)]
enum Pending {
    Task(PendingTask),
    Reset { ready_at: u64 },
}

/// SHA engine peripheral
pub struct HashSha {
    config: InMemoryRegister<u32, ShaConfig::Register>,
    status: InMemoryRegister<u32, ShaStatus::Register>,
    msg_length: [u32; 4],
    msg_left: [u32; 4],
    in_addr: u64,
    in_size: u32,
    err: u32,
    result: [u32; ShaCore::RESULT_WORDS],
    pending: Option<Pending>,

    /// Number of tasks started, including failed ones
    tasks: u32,

    /// Faults armed for the next task or reset
    hang_next_task: bool,
    hang_next_reset: bool,
    fail_next_task: Option<u32>,
    stuck_halted: bool,
}

impl Default for HashSha {
    fn default() -> Self {
        Self::new()
    }
}

impl HashSha {
    pub fn new() -> Self {
        Self {
            config: InMemoryRegister::new(0),
            status: InMemoryRegister::new(0),
            msg_length: [0; 4],
            msg_left: [0; 4],
            in_addr: 0,
            in_size: 0,
            err: SHA_ERR_NONE,
            result: [0; ShaCore::RESULT_WORDS],
            pending: None,
            tasks: 0,
            hang_next_task: false,
            hang_next_reset: false,
            fail_next_task: None,
            stuck_halted: false,
        }
    }

    /// The next task never completes.
    pub fn hang_next_task(&mut self) {
        self.hang_next_task = true;
    }

    /// The next soft reset never completes.
    pub fn hang_next_reset(&mut self) {
        self.hang_next_reset = true;
    }

    /// The next task completes with `code` in ERR_STATUS.
    pub fn fail_next_task(&mut self, code: u32) {
        self.fail_next_task = Some(code);
    }

    /// Keep the engine halted, even across soft resets.
    pub fn set_stuck_halted(&mut self, stuck: bool) {
        self.stuck_halted = stuck;
        if stuck {
            self.pending = None;
            self.status.write(ShaStatus::STATE::Halted);
        }
    }

    /// Number of tasks started
    pub fn tasks(&self) -> u32 {
        self.tasks
    }

    /// Remaining message bits as seen by the engine
    pub fn msg_left(&self) -> u128 {
        join_u128(&self.msg_left)
    }

    /// Total message bits as programmed
    pub fn msg_length(&self) -> u128 {
        join_u128(&self.msg_length)
    }

    /// Hash result registers
    pub fn result(&self) -> &[u32; ShaCore::RESULT_WORDS] {
        &self.result
    }

    fn is_idle(&self) -> bool {
        self.status.read(ShaStatus::STATE) == ShaStatus::STATE::Idle.value
    }

    pub fn read(&self, offset: u32) -> Option<u32> {
        let val = match offset {
            SHA_CONFIG => self.config.get(),
            SHA_MSG_LENGTH..=0x01c => self.msg_length[((offset - SHA_MSG_LENGTH) / 4) as usize],
            SHA_MSG_LEFT..=0x02c => self.msg_left[((offset - SHA_MSG_LEFT) / 4) as usize],
            SHA_IN_ADDR => self.in_addr as u32,
            SHA_IN_ADDR_HI => (self.in_addr >> 32) as u32,
            SHA_IN_SIZE => self.in_size,
            SHA_OPERATION | SHA_CTRL => 0,
            SHA_STATUS => self.status.get(),
            SHA_ERR_STATUS => self.err,
            SHA_HASH_RESULT..=0x13c => self.result[((offset - SHA_HASH_RESULT) / 4) as usize],
            _ => return None,
        };
        Some(val)
    }

    /// Handle a register write.
    ///
    /// # Arguments
    ///
    /// * `offset` - Register offset
    /// * `val` - Value written
    /// * `owned` - Whether the device mutex is currently held
    /// * `now` - Current engine tick
    /// * `dma` - Memory behind the DMA master
    pub fn write(&mut self, offset: u32, val: u32, owned: bool, now: u64, dma: &DmaMemory) -> bool {
        if !owned {
            // Programming without the mutex is dropped by the bus fabric.
            if offset == SHA_OPERATION {
                self.err = SHA_ERR_NO_MUTEX;
            }
            return true;
        }
        match offset {
            SHA_CONFIG => self.config.set(val),
            SHA_MSG_LENGTH..=0x01c => {
                self.msg_length[((offset - SHA_MSG_LENGTH) / 4) as usize] = val
            }
            SHA_MSG_LEFT..=0x02c => self.msg_left[((offset - SHA_MSG_LEFT) / 4) as usize] = val,
            SHA_IN_ADDR => self.in_addr = (self.in_addr & !0xffff_ffff) | val as u64,
            SHA_IN_ADDR_HI => self.in_addr = (self.in_addr & 0xffff_ffff) | ((val as u64) << 32),
            SHA_IN_SIZE => self.in_size = val,
            SHA_OPERATION => {
                let op = LocalRegisterCopy::<u32, ShaOperation::Register>::new(val);
                if op.is_set(ShaOperation::START) && self.is_idle() {
                    self.start_task(op.is_set(ShaOperation::LAST_BUF), now, dma);
                }
            }
            SHA_CTRL => {
                let ctrl = LocalRegisterCopy::<u32, ShaCtrl::Register>::new(val);
                if ctrl.is_set(ShaCtrl::SOFT_RESET) {
                    self.soft_reset(now);
                } else if ctrl.is_set(ShaCtrl::HALT) {
                    self.halt();
                }
            }
            SHA_HASH_RESULT..=0x13c => {
                if self.is_idle() {
                    self.result[((offset - SHA_HASH_RESULT) / 4) as usize] = val;
                }
            }
            SHA_STATUS | SHA_ERR_STATUS => {}
            _ => return false,
        }
        true
    }

    fn mode(&self) -> Option<ShaMode> {
        let mode = match self.config.read_as_enum(ShaConfig::ALGORITHM)? {
            ShaConfig::ALGORITHM::Value::Sha1 => ShaMode::Sha1,
            ShaConfig::ALGORITHM::Value::Sha224 => ShaMode::Sha224,
            ShaConfig::ALGORITHM::Value::Sha256 => ShaMode::Sha256,
            ShaConfig::ALGORITHM::Value::Sha384 => ShaMode::Sha384,
            ShaConfig::ALGORITHM::Value::Sha512 => ShaMode::Sha512,
            ShaConfig::ALGORITHM::Value::Sha512_224 => ShaMode::Sha512_224,
            ShaConfig::ALGORITHM::Value::Sha512_256 => ShaMode::Sha512_256,
        };
        Some(mode)
    }

    fn start_task(&mut self, last_buf: bool, now: u64, dma: &DmaMemory) {
        self.tasks += 1;
        self.err = SHA_ERR_NONE;

        let Some(mode) = self.mode() else {
            self.err = SHA_ERR_CONFIG;
            return;
        };
        if self.in_size > SHA_MAX_IN_SIZE {
            self.err = SHA_ERR_CONFIG;
            return;
        }
        let size = self.in_size as usize;
        let size_bits = (size as u128) * 8;
        let left = self.msg_left();
        if size_bits > left {
            self.err = SHA_ERR_OVERRUN;
            return;
        }
        let left = left - size_bits;
        let is_final = left == 0;
        if last_buf != is_final {
            self.err = SHA_ERR_LAST_BUF;
            return;
        }
        if !is_final && size % mode.block_size() != 0 {
            self.err = SHA_ERR_UNALIGNED;
            return;
        }
        let data: &[u8] = if size == 0 {
            &[]
        } else {
            match dma.fetch(self.in_addr, size) {
                Some(data) => data,
                None => {
                    self.err = SHA_ERR_BUS;
                    return;
                }
            }
        };

        let mut core = if self.config.is_set(ShaConfig::HW_INIT_HASH) {
            ShaCore::with_builtin_iv(mode)
        } else {
            ShaCore::from_result_words(mode, &self.result)
        };
        let full = size - size % mode.block_size();
        core.compress(&data[..full]);
        if is_final {
            core.finalize(&data[full..], self.msg_length());
        }

        let blocks = (size / mode.block_size()) as u64 + 1;
        let ready_at = if self.hang_next_task {
            self.hang_next_task = false;
            u64::MAX
        } else {
            now + TASK_TICKS + blocks * BLOCK_TICKS
        };
        self.pending = Some(Pending::Task(PendingTask {
            ready_at,
            result: core.result_words(),
            msg_left: left,
            err: self.fail_next_task.take().unwrap_or(SHA_ERR_NONE),
        }));
        self.status.write(ShaStatus::STATE::Busy);
    }

    fn soft_reset(&mut self, now: u64) {
        // MSG_LENGTH and MSG_LEFT survive a soft reset.
        self.config.set(0);
        self.in_addr = 0;
        self.in_size = 0;
        self.err = SHA_ERR_NONE;
        let ready_at = if self.hang_next_reset {
            self.hang_next_reset = false;
            u64::MAX
        } else {
            now + RESET_TICKS
        };
        self.pending = Some(Pending::Reset { ready_at });
        self.status.write(ShaStatus::STATE::Busy);
    }

    fn halt(&mut self) {
        if let Some(Pending::Task(_)) = self.pending {
            self.pending = None;
            self.status.write(ShaStatus::STATE::Halted);
        }
    }

    /// Abort any in-flight work after a watchdog reset.
    pub fn abort(&mut self) {
        self.pending = None;
        self.config.set(0);
        self.err = SHA_ERR_ABORTED;
        self.status.write(if self.stuck_halted {
            ShaStatus::STATE::Halted
        } else {
            ShaStatus::STATE::Idle
        });
    }

    /// Complete pending work whose deadline has passed.
    pub fn poll(&mut self, now: u64) {
        let ready_at = match &self.pending {
            Some(Pending::Task(task)) => task.ready_at,
            Some(Pending::Reset { ready_at }) => *ready_at,
            None => return,
        };
        if now < ready_at {
            return;
        }
        match self.pending.take() {
            Some(Pending::Task(task)) => {
                self.result = task.result;
                self.msg_left = split_u128(task.msg_left);
                self.err = task.err;
                self.status.write(ShaStatus::STATE::Idle);
            }
            Some(Pending::Reset { .. }) => {
                self.status.write(if self.stuck_halted {
                    ShaStatus::STATE::Halted
                } else {
                    ShaStatus::STATE::Idle
                });
            }
            None => {}
        }
    }
}

fn join_u128(words: &[u32; 4]) -> u128 {
    words
        .iter()
        .rev()
        .fold(0u128, |acc, word| (acc << 32) | *word as u128)
}

fn split_u128(val: u128) -> [u32; 4] {
    [
        val as u32,
        (val >> 32) as u32,
        (val >> 64) as u32,
        (val >> 96) as u32,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::Digest;

    fn program(sha: &mut HashSha, mode: u32, total_bytes: usize, hw_init: bool) {
        let dma = DmaMemory::new();
        let config = ShaConfig::ALGORITHM.val(mode) + ShaConfig::HW_INIT_HASH.val(hw_init as u32);
        sha.write(SHA_CONFIG, config.value, true, 0, &dma);
        for (i, word) in split_u128(total_bytes as u128 * 8).iter().enumerate() {
            sha.write(SHA_MSG_LENGTH + 4 * i as u32, *word, true, 0, &dma);
            sha.write(SHA_MSG_LEFT + 4 * i as u32, *word, true, 0, &dma);
        }
    }

    fn start(sha: &mut HashSha, dma: &DmaMemory, addr: u64, size: u32, last: bool, now: u64) {
        sha.write(SHA_IN_ADDR, addr as u32, true, now, dma);
        sha.write(SHA_IN_ADDR_HI, (addr >> 32) as u32, true, now, dma);
        sha.write(SHA_IN_SIZE, size, true, now, dma);
        let op = ShaOperation::START::SET + ShaOperation::LAST_BUF.val(last as u32);
        sha.write(SHA_OPERATION, op.value, true, now, dma);
    }

    fn run_task(sha: &mut HashSha, data: &[u8], last: bool, now: &mut u64) {
        let mut dma = DmaMemory::new();
        let addr = dma.map(data);
        start(sha, &dma, addr, data.len() as u32, last, *now);
        for _ in 0..10_000 {
            *now += 1;
            sha.poll(*now);
            if sha.is_idle() {
                return;
            }
        }
        panic!("task did not complete");
    }

    fn digest_bytes(sha: &HashSha, len: usize) -> Vec<u8> {
        sha.result()
            .iter()
            .take(len / 4)
            .flat_map(|w| w.to_be_bytes())
            .collect()
    }

    #[test]
    fn test_sha256_two_tasks() {
        let data = [0x5au8; 200];
        let mut sha = HashSha::new();
        let mut now = 0;
        program(&mut sha, ShaConfig::ALGORITHM::Sha256.value, data.len(), true);
        run_task(&mut sha, &data[..128], false, &mut now);
        assert_eq!(sha.err, SHA_ERR_NONE);
        assert_eq!(sha.msg_left(), 72 * 8);

        sha.write(SHA_CONFIG, ShaConfig::ALGORITHM::Sha256.value, true, now, &DmaMemory::new());
        run_task(&mut sha, &data[128..], true, &mut now);
        assert_eq!(sha.err, SHA_ERR_NONE);
        assert_eq!(sha.msg_left(), 0);
        assert_eq!(digest_bytes(&sha, 32), sha2::Sha256::digest(data).to_vec());
    }

    #[test]
    fn test_unaligned_intermediate_task_rejected() {
        let data = [0u8; 100];
        let mut sha = HashSha::new();
        let mut now = 0;
        program(&mut sha, ShaConfig::ALGORITHM::Sha256.value, data.len(), true);
        run_task(&mut sha, &data[..30], false, &mut now);
        assert_eq!(sha.err, SHA_ERR_UNALIGNED);
        assert_eq!(sha.msg_left(), 800);
    }

    #[test]
    fn test_last_buf_mismatch_rejected() {
        let data = [0u8; 64];
        let mut sha = HashSha::new();
        let mut now = 0;
        program(&mut sha, ShaConfig::ALGORITHM::Sha256.value, 128, true);
        run_task(&mut sha, &data, true, &mut now);
        assert_eq!(sha.err, SHA_ERR_LAST_BUF);
    }

    #[test]
    fn test_soft_reset_keeps_length_registers() {
        let mut sha = HashSha::new();
        program(&mut sha, ShaConfig::ALGORITHM::Sha1.value, 10, true);
        sha.write(SHA_CTRL, ShaCtrl::SOFT_RESET::SET.value, true, 0, &DmaMemory::new());
        sha.poll(RESET_TICKS);
        assert!(sha.is_idle());
        assert_eq!(sha.read(SHA_CONFIG), Some(0));
        assert_eq!(sha.msg_length(), 80);
        assert_eq!(sha.msg_left(), 80);
    }

    #[test]
    fn test_writes_without_mutex_dropped() {
        let dma = DmaMemory::new();
        let mut sha = HashSha::new();
        sha.write(SHA_CONFIG, 3, false, 0, &dma);
        assert_eq!(sha.read(SHA_CONFIG), Some(0));
        sha.write(SHA_OPERATION, ShaOperation::START::SET.value, false, 0, &dma);
        assert_eq!(sha.read(SHA_ERR_STATUS), Some(SHA_ERR_NO_MUTEX));
        assert_eq!(sha.tasks(), 0);
    }

    #[test]
    fn test_halt_stops_hung_task() {
        let data = [0u8; 64];
        let mut sha = HashSha::new();
        program(&mut sha, ShaConfig::ALGORITHM::Sha256.value, 64, true);
        sha.hang_next_task();
        let mut dma = DmaMemory::new();
        let addr = dma.map(&data);
        start(&mut sha, &dma, addr, 64, true, 0);
        sha.poll(1_000_000);
        assert_eq!(
            sha.read(SHA_STATUS),
            Some(ShaStatus::STATE::Busy.value)
        );
        sha.write(SHA_CTRL, ShaCtrl::HALT::SET.value, true, 0, &dma);
        assert_eq!(
            sha.read(SHA_STATUS),
            Some(ShaStatus::STATE::Halted.value)
        );
    }

    #[test]
    fn test_unmapped_address_is_bus_error() {
        let data = [0u8; 64];
        let mut dma = DmaMemory::new();
        let addr = dma.map(&data);
        for (addr, size) in [(0x10, 64), (addr, 65), (addr + 32, 64)] {
            let mut sha = HashSha::new();
            program(&mut sha, ShaConfig::ALGORITHM::Sha256.value, size as usize, true);
            start(&mut sha, &dma, addr, size, true, 0);
            assert_eq!(sha.read(SHA_ERR_STATUS), Some(SHA_ERR_BUS));
            assert_eq!(sha.read(SHA_STATUS), Some(ShaStatus::STATE::Idle.value));
        }
    }
}
