/*++

Licensed under the Apache-2.0 license.

File Name:

    sha.rs

Abstract:

    File contains the register layout of the SHA hash engine in device SE0.

--*/

use tock_registers::register_bitfields;

pub const SHA_CONFIG: u32 = 0x000;

/// Total message length in bits, four words, least significant word first.
pub const SHA_MSG_LENGTH: u32 = 0x010;

/// Bits of the message not yet hashed, four words, least significant word first.
pub const SHA_MSG_LEFT: u32 = 0x020;

pub const SHA_IN_ADDR: u32 = 0x030;
pub const SHA_IN_ADDR_HI: u32 = 0x034;
pub const SHA_IN_SIZE: u32 = 0x038;
pub const SHA_OPERATION: u32 = 0x040;
pub const SHA_STATUS: u32 = 0x044;
pub const SHA_ERR_STATUS: u32 = 0x048;
pub const SHA_CTRL: u32 = 0x04c;

/// Hash state, sixteen words. Each word holds one 32-bit state word, or one
/// half of a 64-bit state word with the low half at the even index.
pub const SHA_HASH_RESULT: u32 = 0x100;

pub const SHA_MSG_LENGTH_WORDS: u32 = 4;
pub const SHA_HASH_RESULT_WORDS: u32 = 16;

/// Largest byte count accepted by a single task.
pub const SHA_MAX_IN_SIZE: u32 = 0x00ff_ff80;

/// SHA_ERR_STATUS codes
pub const SHA_ERR_NONE: u32 = 0;
pub const SHA_ERR_UNALIGNED: u32 = 1;
pub const SHA_ERR_OVERRUN: u32 = 2;
pub const SHA_ERR_NO_MUTEX: u32 = 3;
pub const SHA_ERR_BUS: u32 = 4;
pub const SHA_ERR_ABORTED: u32 = 5;
pub const SHA_ERR_CONFIG: u32 = 6;
pub const SHA_ERR_LAST_BUF: u32 = 7;

register_bitfields! [
    u32,

    /// SHA configuration register
    pub ShaConfig [
        ALGORITHM OFFSET(0) NUMBITS(4) [
            Sha1 = 1,
            Sha224 = 2,
            Sha256 = 3,
            Sha384 = 4,
            Sha512 = 5,
            Sha512_224 = 6,
            Sha512_256 = 7,
        ],
        HW_INIT_HASH OFFSET(8) NUMBITS(1) [],
    ],

    /// SHA operation register
    pub ShaOperation [
        START OFFSET(0) NUMBITS(1) [],
        LAST_BUF OFFSET(1) NUMBITS(1) [],
    ],

    /// SHA status register
    pub ShaStatus [
        STATE OFFSET(0) NUMBITS(2) [
            Idle = 0,
            Busy = 1,
            Halted = 2,
        ],
    ],

    /// SHA control register
    pub ShaCtrl [
        SOFT_RESET OFFSET(0) NUMBITS(1) [],
        HALT OFFSET(1) NUMBITS(1) [],
    ],
];
