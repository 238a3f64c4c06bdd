/*++

Licensed under the Apache-2.0 license.

File Name:

    config.rs

Abstract:

    File contains the tunables shared by the security engine drivers.

    Timeouts are expressed as poll budgets: the number of status register
    reads a driver performs before giving up.

--*/

use secengine_registers::mutex::MUTEX_WATCHDOG_RESET_VALUE;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EngineConfig {
    /// Status polls allowed for a soft reset or halt to settle
    pub sha_reset_polls: u32,

    /// Status polls allowed for any SHA task
    pub sha_task_base_polls: u32,

    /// Additional status polls per message block of a SHA task
    pub sha_task_polls_per_block: u32,

    /// Status polls allowed for one PKA operation
    pub pka_op_polls: u32,

    /// Request attempts before mutex acquisition times out
    pub mutex_acquire_polls: u32,

    /// Watchdog timeout programmed on acquisition, in engine ticks
    pub watchdog_ticks: u32,

    /// A keep-alive is written every this many status polls
    pub keep_alive_interval: u32,

    /// Random draws before private key generation gives up
    pub keygen_attempts: u32,

    /// Nonces tried before signing gives up
    pub sign_attempts: u32,
}

impl EngineConfig {
    pub const DEFAULT: Self = Self {
        sha_reset_polls: 10_000,
        sha_task_base_polls: 100_000,
        sha_task_polls_per_block: 64,
        pka_op_polls: 1_000_000,
        mutex_acquire_polls: 2_000_000,
        watchdog_ticks: MUTEX_WATCHDOG_RESET_VALUE,
        keep_alive_interval: 1024,
        keygen_attempts: 16,
        sign_attempts: 8,
    };

    /// Poll budget of a SHA task hashing `bytes` bytes in blocks of `block_size`.
    pub fn sha_task_polls(&self, bytes: usize, block_size: usize) -> u32 {
        let blocks = (bytes / block_size) as u32 + 2;
        self.sha_task_base_polls
            .saturating_add(blocks.saturating_mul(self.sha_task_polls_per_block))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
