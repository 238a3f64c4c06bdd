/*++

Licensed under the Apache-2.0 license.

File Name:

    hw_mutex.rs

Abstract:

    File contains the hardware mutex and watchdog present in every emulated
    security engine device.

--*/

use secengine_registers::mutex::*;
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::InMemoryRegister;

/// Hardware mutex of one device
pub struct HwMutex {
    /// Status register
    status: InMemoryRegister<u32, MutexStatus::Register>,

    /// Watchdog timeout in ticks, zero disables the watchdog
    watchdog: u32,

    /// Ticks since acquisition or the last keep-alive
    idle_ticks: u64,

    /// Number of times the watchdog reset the device
    expirations: u32,
}

impl Default for HwMutex {
    fn default() -> Self {
        Self::new()
    }
}

impl HwMutex {
    pub fn new() -> Self {
        Self {
            status: InMemoryRegister::new(0),
            watchdog: MUTEX_WATCHDOG_RESET_VALUE,
            idle_ticks: 0,
            expirations: 0,
        }
    }

    /// Returns the owning token if the mutex is locked.
    pub fn owner(&self) -> Option<u8> {
        if self.status.is_set(MutexStatus::LOCKED) {
            Some(self.status.read(MutexStatus::OWNER) as u8)
        } else {
            None
        }
    }

    pub fn is_locked(&self) -> bool {
        self.owner().is_some()
    }

    /// Number of watchdog expirations since creation
    pub fn expirations(&self) -> u32 {
        self.expirations
    }

    /// Current watchdog timeout in ticks
    pub fn watchdog(&self) -> u32 {
        self.watchdog
    }

    /// Lock the mutex on behalf of an agent outside the emulated CPU.
    pub fn force_lock(&mut self, token: u8) {
        self.lock(token);
    }

    fn lock(&mut self, token: u8) {
        self.status
            .write(MutexStatus::LOCKED::SET + MutexStatus::OWNER.val(token as u32));
        self.idle_ticks = 0;
    }

    pub fn read(&self, offset: u32) -> Option<u32> {
        match offset {
            MUTEX_STATUS => Some(self.status.get()),
            MUTEX_WATCHDOG => Some(self.watchdog),
            MUTEX_REQUEST | MUTEX_RELEASE | MUTEX_KEEPALIVE => Some(0),
            _ => None,
        }
    }

    /// Handle a write to the mutex block. Returns false if `offset` is not a
    /// mutex register.
    pub fn write(&mut self, offset: u32, val: u32) -> bool {
        let token = (val & 0xff) as u8;
        match offset {
            MUTEX_REQUEST => {
                if token != 0 && !self.is_locked() {
                    self.lock(token);
                }
            }
            MUTEX_RELEASE => {
                if self.owner() == Some(token) {
                    self.status.set(0);
                }
            }
            MUTEX_KEEPALIVE => {
                if self.owner() == Some(token) {
                    self.idle_ticks = 0;
                }
            }
            MUTEX_WATCHDOG => {
                if self.is_locked() {
                    self.watchdog = val;
                }
            }
            MUTEX_STATUS => {}
            _ => return false,
        }
        true
    }

    /// Advance the watchdog by `ticks`. Returns true if it expired, in which
    /// case the mutex has been released and the device must be reset.
    pub fn tick(&mut self, ticks: u64) -> bool {
        if !self.is_locked() || self.watchdog == 0 {
            return false;
        }
        self.idle_ticks += ticks;
        if self.idle_ticks < self.watchdog as u64 {
            return false;
        }
        self.status.write(MutexStatus::WDT_EXPIRED::SET);
        self.idle_ticks = 0;
        self.expirations += 1;
        true
    }
}
