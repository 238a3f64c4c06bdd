/*++

Licensed under the Apache-2.0 license.

File Name:

    mutex.rs

Abstract:

    File contains the layout of the hardware mutex block present in every
    security engine device.

    Writing a caller token to REQUEST locks an unlocked mutex for that
    token. Writing the owning token to RELEASE unlocks it. While locked, the
    watchdog counts engine ticks without a KEEPALIVE write from the owner;
    when the count reaches WATCHDOG the device is reset, the mutex released
    and STATUS.WDT_EXPIRED set until the next successful acquisition.

--*/

use tock_registers::register_bitfields;

pub const MUTEX_REQUEST: u32 = 0x0f00;
pub const MUTEX_STATUS: u32 = 0x0f04;
pub const MUTEX_RELEASE: u32 = 0x0f08;
pub const MUTEX_WATCHDOG: u32 = 0x0f0c;
pub const MUTEX_KEEPALIVE: u32 = 0x0f10;

/// Watchdog timeout loaded on reset, in engine ticks.
pub const MUTEX_WATCHDOG_RESET_VALUE: u32 = 1_600_000;

register_bitfields! [
    u32,

    /// Mutex request, release and keep-alive registers
    pub MutexToken [
        TOKEN OFFSET(0) NUMBITS(8) [],
    ],

    /// Mutex status register
    pub MutexStatus [
        LOCKED OFFSET(0) NUMBITS(1) [],
        OWNER OFFSET(8) NUMBITS(8) [],
        WDT_EXPIRED OFFSET(16) NUMBITS(1) [],
    ],
];
