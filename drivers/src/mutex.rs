/*++

Licensed under the Apache-2.0 license.

File Name:

    mutex.rs

Abstract:

    File contains the engine selector and the scoped guard over the
    hardware mutex of a security engine device.

--*/

use crate::{wait, EngineConfig, SeError, SeResult};
use secengine_registers::mutex::*;
use secengine_registers::{DeviceId, RegisterPort};
use tock_registers::LocalRegisterCopy;

/// Class of cryptographic operation, used to pick the engine device
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OperationClass {
    /// ECDSA, EC key generation and EC point arithmetic
    Ecc,

    /// RSA modular exponentiation
    Rsa,

    /// SHA digests and MGF1
    Sha,
}

/// Identity written to the mutex registers. Unique per concurrent caller.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CallerToken(u8);

impl CallerToken {
    pub fn new(token: u8) -> SeResult<Self> {
        if token == 0 {
            return Err(SeError::DRIVER_MUTEX_INVALID_TOKEN);
        }
        Ok(Self(token))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

pub struct EngineSelector;

impl EngineSelector {
    /// Device serving operations of class `class`
    pub const fn select(class: OperationClass) -> DeviceId {
        match class {
            OperationClass::Ecc | OperationClass::Rsa => DeviceId::Pka1,
            OperationClass::Sha => DeviceId::Se0,
        }
    }

    /// Acquire exclusive use of the device serving `class`.
    ///
    /// # Arguments
    ///
    /// * `port` - Register port
    /// * `class` - Operation class
    /// * `token` - Caller identity
    /// * `config` - Poll budgets and watchdog timeout
    ///
    /// # Returns
    ///
    /// * `EngineGuard` - Guard releasing the mutex when dropped
    pub fn acquire<'p, P: RegisterPort>(
        port: &'p P,
        class: OperationClass,
        token: CallerToken,
        config: &EngineConfig,
    ) -> SeResult<EngineGuard<'p, P>> {
        EngineGuard::acquire(port, Self::select(class), token, config)
    }
}

/// Exclusive use of one engine device.
///
/// The mutex is released when the guard is dropped, on every exit path.
pub struct EngineGuard<'p, P: RegisterPort> {
    port: &'p P,
    device: DeviceId,
    token: CallerToken,
    keep_alive_interval: u32,
}

impl<'p, P: RegisterPort> EngineGuard<'p, P> {
    /// Acquire the mutex of `device`.
    pub fn acquire(
        port: &'p P,
        device: DeviceId,
        token: CallerToken,
        config: &EngineConfig,
    ) -> SeResult<Self> {
        let owned = |status: u32| {
            let status = LocalRegisterCopy::<u32, MutexStatus::Register>::new(status);
            status.is_set(MutexStatus::LOCKED)
                && status.read(MutexStatus::OWNER) == token.get() as u32
        };
        let acquired = wait::until_with_budget(config.mutex_acquire_polls, 0, || {}, || {
            port.set_reg(device, MUTEX_REQUEST, token.get() as u32);
            owned(port.get_reg(device, MUTEX_STATUS))
        });
        if !acquired {
            log::warn!("{:?}: mutex acquisition timed out", device);
            return Err(SeError::DRIVER_MUTEX_ACQUIRE_TIMEOUT);
        }
        port.set_reg(device, MUTEX_WATCHDOG, config.watchdog_ticks);
        log::trace!("{:?}: mutex acquired by {:#x}", device, token.get());

        Ok(Self {
            port,
            device,
            token,
            keep_alive_interval: config.keep_alive_interval,
        })
    }

    pub fn device(&self) -> DeviceId {
        self.device
    }

    pub fn token(&self) -> CallerToken {
        self.token
    }

    /// Read register `offset` of the guarded device.
    pub fn read(&self, offset: u32) -> u32 {
        self.port.get_reg(self.device, offset)
    }

    /// Write register `offset` of the guarded device.
    pub fn write(&self, offset: u32, value: u32) {
        self.port.set_reg(self.device, offset, value)
    }

    /// Address the engine uses to fetch `data`
    pub fn dma_address(&self, data: &[u8]) -> u64 {
        self.port.dma_address(data)
    }

    /// Reset the watchdog.
    pub fn keep_alive(&self) {
        self.write(MUTEX_KEEPALIVE, self.token.get() as u32);
    }

    /// Returns true if the mutex is still held by this guard.
    pub fn is_held(&self) -> bool {
        let status = LocalRegisterCopy::<u32, MutexStatus::Register>::new(self.read(MUTEX_STATUS));
        status.is_set(MutexStatus::LOCKED)
            && status.read(MutexStatus::OWNER) == self.token.get() as u32
    }

    /// Poll `predicate` within `budget` status reads, keeping the watchdog
    /// alive meanwhile.
    pub fn poll_until<F>(&self, budget: u32, mut predicate: F) -> bool
    where
        F: FnMut(&Self) -> bool,
    {
        wait::until_with_budget(budget, self.keep_alive_interval, || self.keep_alive(), || {
            predicate(self)
        })
    }
}

impl<P: RegisterPort> Drop for EngineGuard<'_, P> {
    fn drop(&mut self) {
        let status = LocalRegisterCopy::<u32, MutexStatus::Register>::new(self.read(MUTEX_STATUS));
        if status.is_set(MutexStatus::WDT_EXPIRED) {
            log::warn!("{:?}: watchdog expired while the mutex was held", self.device);
        }
        self.write(MUTEX_RELEASE, self.token.get() as u32);
        log::trace!("{:?}: mutex released by {:#x}", self.device, self.token.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secengine_emu_periph::SeEmulator;

    fn config() -> EngineConfig {
        EngineConfig {
            mutex_acquire_polls: 100,
            ..EngineConfig::DEFAULT
        }
    }

    #[test]
    fn test_selector() {
        assert_eq!(EngineSelector::select(OperationClass::Ecc), DeviceId::Pka1);
        assert_eq!(EngineSelector::select(OperationClass::Rsa), DeviceId::Pka1);
        assert_eq!(EngineSelector::select(OperationClass::Sha), DeviceId::Se0);
    }

    #[test]
    fn test_zero_token_rejected() {
        assert_eq!(
            CallerToken::new(0),
            Err(SeError::DRIVER_MUTEX_INVALID_TOKEN)
        );
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let emu = SeEmulator::new();
        let token = CallerToken::new(5).unwrap();
        {
            let guard =
                EngineSelector::acquire(&emu, OperationClass::Sha, token, &config()).unwrap();
            assert!(guard.is_held());
            assert_eq!(
                emu.with_bus(|bus| bus.mutex(DeviceId::Se0).owner()),
                Some(5)
            );
            assert_eq!(
                emu.with_bus(|bus| bus.mutex(DeviceId::Se0).watchdog()),
                MUTEX_WATCHDOG_RESET_VALUE
            );
        }
        assert_eq!(emu.with_bus(|bus| bus.mutex(DeviceId::Se0).owner()), None);
    }

    #[test]
    fn test_acquire_timeout_while_held() {
        let emu = SeEmulator::new();
        emu.with_bus(|bus| bus.mutex_mut(DeviceId::Pka1).force_lock(9));
        let token = CallerToken::new(5).unwrap();
        let result = EngineSelector::acquire(&emu, OperationClass::Ecc, token, &config());
        assert_eq!(result.err(), Some(SeError::DRIVER_MUTEX_ACQUIRE_TIMEOUT));
        assert_eq!(emu.with_bus(|bus| bus.mutex(DeviceId::Pka1).owner()), Some(9));
    }

    #[test]
    fn test_acquire_after_watchdog_reclaims() {
        let emu = SeEmulator::new();
        emu.with_bus(|bus| {
            let mutex = bus.mutex_mut(DeviceId::Pka1);
            mutex.force_lock(9);
            mutex.write(MUTEX_WATCHDOG, 50);
        });
        let token = CallerToken::new(5).unwrap();
        let guard = EngineSelector::acquire(&emu, OperationClass::Rsa, token, &config()).unwrap();
        assert!(guard.is_held());
        assert_eq!(emu.with_bus(|bus| bus.mutex(DeviceId::Pka1).expirations()), 1);
    }

    #[test]
    fn test_keep_alive_holds_off_watchdog() {
        let emu = SeEmulator::new();
        let cfg = EngineConfig {
            watchdog_ticks: 100,
            keep_alive_interval: 16,
            ..config()
        };
        let token = CallerToken::new(1).unwrap();
        let guard = EngineSelector::acquire(&emu, OperationClass::Sha, token, &cfg).unwrap();
        assert!(!guard.poll_until(1000, |g| g.read(MUTEX_STATUS) == 0));
        assert!(guard.is_held());
    }
}
