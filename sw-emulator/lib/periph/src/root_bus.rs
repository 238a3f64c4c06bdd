/*++

Licensed under the Apache-2.0 license.

File Name:

    root_bus.rs

Abstract:

    File contains the root bus of the emulated security engine and the
    thread safe register port wrapping it.

--*/

use crate::{DmaMemory, HashSha, HwMutex, Pka};
use secengine_registers::{DeviceId, RegisterPort};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Engine ticks consumed by one register access
const ACCESS_TICKS: u64 = 1;

/// Devices of the security engine and the shared tick counter
pub struct SeBus {
    now: u64,
    se0_mutex: HwMutex,
    sha: HashSha,
    pka1_mutex: HwMutex,
    pka: Pka,
    rng1_mutex: HwMutex,
    dma: DmaMemory,
}

impl Default for SeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SeBus {
    pub fn new() -> Self {
        Self {
            now: 0,
            se0_mutex: HwMutex::new(),
            sha: HashSha::new(),
            pka1_mutex: HwMutex::new(),
            pka: Pka::new(),
            rng1_mutex: HwMutex::new(),
            dma: DmaMemory::new(),
        }
    }

    /// Current engine tick
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn mutex(&self, device: DeviceId) -> &HwMutex {
        match device {
            DeviceId::Se0 => &self.se0_mutex,
            DeviceId::Pka1 => &self.pka1_mutex,
            DeviceId::Rng1 => &self.rng1_mutex,
        }
    }

    pub fn mutex_mut(&mut self, device: DeviceId) -> &mut HwMutex {
        match device {
            DeviceId::Se0 => &mut self.se0_mutex,
            DeviceId::Pka1 => &mut self.pka1_mutex,
            DeviceId::Rng1 => &mut self.rng1_mutex,
        }
    }

    pub fn sha(&self) -> &HashSha {
        &self.sha
    }

    pub fn sha_mut(&mut self) -> &mut HashSha {
        &mut self.sha
    }

    pub fn pka(&self) -> &Pka {
        &self.pka
    }

    pub fn pka_mut(&mut self) -> &mut Pka {
        &mut self.pka
    }

    pub fn dma_mut(&mut self) -> &mut DmaMemory {
        &mut self.dma
    }

    /// Let `ticks` engine ticks elapse.
    pub fn advance(&mut self, ticks: u64) {
        self.now = self.now.saturating_add(ticks);
        for device in DeviceId::ALL {
            if self.mutex_mut(device).tick(ticks) {
                log::debug!("watchdog expired on {:?}, resetting device", device);
                match device {
                    DeviceId::Se0 => self.sha.abort(),
                    DeviceId::Pka1 => self.pka.abort(),
                    DeviceId::Rng1 => {}
                }
            }
        }
        self.sha.poll(self.now);
        self.pka.poll(self.now);
    }

    pub fn read(&mut self, device: DeviceId, offset: u32) -> u32 {
        self.advance(ACCESS_TICKS);
        let val = match self.mutex(device).read(offset) {
            Some(val) => Some(val),
            None => match device {
                DeviceId::Se0 => self.sha.read(offset),
                DeviceId::Pka1 => self.pka.read(offset),
                DeviceId::Rng1 => None,
            },
        };
        val.unwrap_or_else(|| {
            log::debug!("read of unmapped register {:?}:{:#x}", device, offset);
            0
        })
    }

    pub fn write(&mut self, device: DeviceId, offset: u32, val: u32) {
        self.advance(ACCESS_TICKS);
        if self.mutex_mut(device).write(offset, val) {
            return;
        }
        let owned = self.mutex(device).is_locked();
        let now = self.now;
        let mapped = match device {
            DeviceId::Se0 => self.sha.write(offset, val, owned, now, &self.dma),
            DeviceId::Pka1 => self.pka.write(offset, val, owned, now),
            DeviceId::Rng1 => false,
        };
        if !mapped {
            log::debug!("write to unmapped register {:?}:{:#x}", device, offset);
        }
    }
}

/// Emulated security engine, shareable between threads.
#[derive(Default)]
pub struct SeEmulator {
    bus: Mutex<SeBus>,
}

impl SeEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SeBus> {
        self.bus.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the bus, for inspection and fault
    /// injection.
    pub fn with_bus<R>(&self, f: impl FnOnce(&mut SeBus) -> R) -> R {
        f(&mut self.lock())
    }

    /// Let `ticks` engine ticks elapse.
    pub fn advance(&self, ticks: u64) {
        self.lock().advance(ticks)
    }

    /// Current engine tick
    pub fn now(&self) -> u64 {
        self.lock().now()
    }
}

impl RegisterPort for SeEmulator {
    fn get_reg(&self, device: DeviceId, offset: u32) -> u32 {
        self.lock().read(device, offset)
    }

    fn set_reg(&self, device: DeviceId, offset: u32, value: u32) {
        self.lock().write(device, offset, value)
    }

    fn dma_address(&self, data: &[u8]) -> u64 {
        self.lock().dma_mut().map(data)
    }
}
