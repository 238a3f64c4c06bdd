/*++

Licensed under the Apache-2.0 license.

File Name:

    pka.rs

Abstract:

    File contains the register layout of the public key accelerator in
    device PKA1.

    Operands live in four banks (A..D) of four slots each. A slot holds one
    operand of up to 128 words, least significant word first.

--*/

use tock_registers::register_bitfields;

pub const PKA_CTRL: u32 = 0x000;
pub const PKA_OPERAND_WORDS: u32 = 0x004;
pub const PKA_STATUS: u32 = 0x008;
pub const PKA_ERR_STATUS: u32 = 0x00c;
pub const PKA_FLAGS: u32 = 0x010;
pub const PKA_SOFT_RESET: u32 = 0x014;

pub const PKA_BANK_BASE: u32 = 0x1000;
pub const PKA_SLOT_WORDS: u32 = 128;
pub const PKA_SLOTS_PER_BANK: u32 = 4;
const PKA_SLOT_STRIDE: u32 = PKA_SLOT_WORDS * 4;
const PKA_BANK_STRIDE: u32 = PKA_SLOT_STRIDE * PKA_SLOTS_PER_BANK;

/// PKA_ERR_STATUS codes
pub const PKA_ERR_NONE: u32 = 0;
pub const PKA_ERR_OPERAND: u32 = 1;
pub const PKA_ERR_NOT_INVERTIBLE: u32 = 2;
pub const PKA_ERR_NO_MUTEX: u32 = 3;
pub const PKA_ERR_OPCODE: u32 = 4;
pub const PKA_ERR_ABORTED: u32 = 5;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bank {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

/// Location of an operand inside the bank memory.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Slot {
    pub bank: Bank,
    pub index: u32,
}

impl Slot {
    pub const fn new(bank: Bank, index: u32) -> Self {
        Self { bank, index }
    }

    /// Byte offset of word `word` of this slot.
    pub const fn word_offset(&self, word: u32) -> u32 {
        PKA_BANK_BASE
            + (self.bank as u32) * PKA_BANK_STRIDE
            + self.index * PKA_SLOT_STRIDE
            + word * 4
    }

    /// Decode a register offset back into a slot and word index.
    pub const fn decode(offset: u32) -> Option<(Slot, u32)> {
        if offset < PKA_BANK_BASE || offset >= PKA_BANK_BASE + 4 * PKA_BANK_STRIDE {
            return None;
        }
        let rel = offset - PKA_BANK_BASE;
        let bank = match rel / PKA_BANK_STRIDE {
            0 => Bank::A,
            1 => Bank::B,
            2 => Bank::C,
            _ => Bank::D,
        };
        let index = (rel % PKA_BANK_STRIDE) / PKA_SLOT_STRIDE;
        let word = (rel % PKA_SLOT_STRIDE) / 4;
        Some((Slot { bank, index }, word))
    }
}

/// Operand assignment used by every opcode.
pub mod operand {
    use super::{Bank, Slot};

    /// Modulus, field prime or RSA modulus
    pub const MODULUS: Slot = Slot::new(Bank::D, 0);
    /// Curve coefficient a
    pub const CURVE_A: Slot = Slot::new(Bank::D, 1);
    /// Curve coefficient b
    pub const CURVE_B: Slot = Slot::new(Bank::D, 2);

    /// First operand, exponentiation base, or point P1 x. Receives the result.
    pub const X: Slot = Slot::new(Bank::A, 0);
    /// Second operand or point P1 y. Receives the result y.
    pub const Y: Slot = Slot::new(Bank::B, 0);

    /// Point P2 x
    pub const P2_X: Slot = Slot::new(Bank::A, 1);
    /// Point P2 y
    pub const P2_Y: Slot = Slot::new(Bank::B, 1);

    /// Scalar k1 or exponent
    pub const K1: Slot = Slot::new(Bank::C, 0);
    /// Scalar k2
    pub const K2: Slot = Slot::new(Bank::C, 1);
}

register_bitfields! [
    u32,

    /// PKA control register
    pub PkaCtrl [
        OPCODE OFFSET(0) NUMBITS(8) [
            ModReduce = 0x01,
            ModInvert = 0x02,
            ModMul = 0x03,
            ModAdd = 0x04,
            ModExp = 0x05,
            EcPointMul = 0x10,
            EcPointVerify = 0x11,
            EcShamir = 0x12,
        ],
        START OFFSET(31) NUMBITS(1) [],
    ],

    /// PKA status register
    pub PkaStatus [
        BUSY OFFSET(0) NUMBITS(1) [],
        DONE OFFSET(1) NUMBITS(1) [],
        ERROR OFFSET(2) NUMBITS(1) [],
    ],

    /// PKA result flags
    pub PkaFlags [
        ZERO OFFSET(0) NUMBITS(1) [],
        INFINITY OFFSET(1) NUMBITS(1) [],
        ON_CURVE OFFSET(2) NUMBITS(1) [],
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_offsets() {
        assert_eq!(operand::X.word_offset(0), 0x1000);
        assert_eq!(operand::Y.word_offset(0), 0x1800);
        assert_eq!(operand::K2.word_offset(1), 0x2204);
        assert_eq!(operand::CURVE_B.word_offset(127), 0x2dfc);
    }

    #[test]
    fn test_slot_decode() {
        for slot in [operand::MODULUS, operand::P2_Y, operand::K1] {
            for word in [0, 5, 127] {
                assert_eq!(Slot::decode(slot.word_offset(word)), Some((slot, word)));
            }
        }
        assert_eq!(Slot::decode(0x0fff), None);
        assert_eq!(Slot::decode(0x3000), None);
    }
}
