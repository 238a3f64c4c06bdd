/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the register port abstraction shared by the drivers and
    the emulator, along with the register layouts of the security engine
    devices.

--*/
#![cfg_attr(not(test), no_std)]

pub mod mutex;
pub mod pka;
pub mod sha;

/// Register-mapped devices of the security engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DeviceId {
    /// Hash engine device. Also carries an asymmetric context, unused here.
    Se0,

    /// Public key accelerator: MAU, EC point unit and modular exponentiation.
    Pka1,

    /// Random number generator device. Only its mutex block is modelled.
    Rng1,
}

impl DeviceId {
    pub const ALL: [DeviceId; 3] = [DeviceId::Se0, DeviceId::Pka1, DeviceId::Rng1];
}

/// 32-bit register access to the security engine devices.
///
/// Offsets are byte offsets from the base of the device. Implementations
/// must tolerate concurrent callers; exclusive use of an engine is arbitrated
/// by the engine mutex, not by the port.
pub trait RegisterPort {
    /// Read the 32-bit register at `offset` of `device`.
    fn get_reg(&self, device: DeviceId, offset: u32) -> u32;

    /// Write `value` to the 32-bit register at `offset` of `device`.
    fn set_reg(&self, device: DeviceId, offset: u32, value: u32);

    /// Address the engine's DMA master uses to fetch `data`.
    ///
    /// `data` must stay borrowed and unmodified until the task that reads it
    /// completes.
    fn dma_address(&self, data: &[u8]) -> u64 {
        data.as_ptr() as usize as u64
    }
}

impl<T: RegisterPort + ?Sized> RegisterPort for &T {
    fn get_reg(&self, device: DeviceId, offset: u32) -> u32 {
        (**self).get_reg(device, offset)
    }

    fn set_reg(&self, device: DeviceId, offset: u32, value: u32) {
        (**self).set_reg(device, offset, value)
    }

    fn dma_address(&self, data: &[u8]) -> u64 {
        (**self).dma_address(data)
    }
}

/// Register port backed by memory mapped I/O.
pub struct MmioPort {
    se0: usize,
    pka1: usize,
    rng1: usize,
}

impl MmioPort {
    /// Create a port for devices mapped at the given base addresses.
    ///
    /// # Safety
    ///
    /// Each base must be the address of the corresponding device's register
    /// window, valid for volatile 32-bit access for the lifetime of the port.
    pub const unsafe fn new(se0: usize, pka1: usize, rng1: usize) -> Self {
        Self { se0, pka1, rng1 }
    }

    fn reg_ptr(&self, device: DeviceId, offset: u32) -> *mut u32 {
        let base = match device {
            DeviceId::Se0 => self.se0,
            DeviceId::Pka1 => self.pka1,
            DeviceId::Rng1 => self.rng1,
        };
        (base + offset as usize) as *mut u32
    }
}

impl RegisterPort for MmioPort {
    fn get_reg(&self, device: DeviceId, offset: u32) -> u32 {
        // SAFETY: the constructor contract guarantees the window is mapped.
        unsafe { core::ptr::read_volatile(self.reg_ptr(device, offset)) }
    }

    fn set_reg(&self, device: DeviceId, offset: u32, value: u32) {
        // SAFETY: the constructor contract guarantees the window is mapped.
        unsafe { core::ptr::write_volatile(self.reg_ptr(device, offset), value) }
    }
}
