/*++

Licensed under the Apache-2.0 license.

File Name:

    pka.rs

Abstract:

    File contains the public key accelerator peripheral of device PKA1.

--*/

use num_bigint::BigUint;
use num_traits::Zero;
use secengine_emu_crypto::{
    from_le_words, mod_add, mod_exp, mod_inverse, mod_mul, mod_reduce, to_le_words, AffinePoint,
    WeierstrassCurve,
};
use secengine_registers::pka::*;
use tock_registers::fields::TryFromValue;
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::InMemoryRegister;
use tock_registers::LocalRegisterCopy;

/// Ticks needed by modular arithmetic operations
const MAU_TICKS: u64 = 20;

/// Ticks needed by point operations
const POINT_TICKS: u64 = 200;

/// Ticks needed by modular exponentiation
const EXP_TICKS: u64 = 400;

const SLOT_COUNT: usize = 16;

#[derive(Debug, Clone)]
struct PendingOp {
    ready_at: u64,
    outputs: Vec<(Slot, Vec<u32>)>,
    flags: u32,
    err: u32,
}

/// Public key accelerator peripheral
pub struct Pka {
    ctrl: u32,
    operand_words: u32,
    status: InMemoryRegister<u32, PkaStatus::Register>,
    err: u32,
    flags: InMemoryRegister<u32, PkaFlags::Register>,
    slots: Vec<[u32; PKA_SLOT_WORDS as usize]>,
    pending: Option<PendingOp>,

    /// Number of operations started, per opcode
    ops: Vec<(u32, u32)>,

    hang_next_op: bool,
    fail_next_op: Option<u32>,
    zero_next_op: Option<u32>,
}

impl Default for Pka {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_index(slot: Slot) -> usize {
    (slot.bank as usize) * PKA_SLOTS_PER_BANK as usize + slot.index as usize
}

impl Pka {
    pub fn new() -> Self {
        Self {
            ctrl: 0,
            operand_words: 0,
            status: InMemoryRegister::new(0),
            err: PKA_ERR_NONE,
            flags: InMemoryRegister::new(0),
            slots: vec![[0u32; PKA_SLOT_WORDS as usize]; SLOT_COUNT],
            pending: None,
            ops: Vec::new(),
            hang_next_op: false,
            fail_next_op: None,
            zero_next_op: None,
        }
    }

    /// The next operation never completes.
    pub fn hang_next_op(&mut self) {
        self.hang_next_op = true;
    }

    /// The next operation completes with `code` in ERR_STATUS.
    pub fn fail_next_op(&mut self, code: u32) {
        self.fail_next_op = Some(code);
    }

    /// The next operation with `opcode` yields zero in every output slot.
    pub fn zero_next_op(&mut self, opcode: u32) {
        self.zero_next_op = Some(opcode);
    }

    /// Number of operations started with `opcode`
    pub fn op_count(&self, opcode: u32) -> u32 {
        self.ops
            .iter()
            .find(|(op, _)| *op == opcode)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    fn is_busy(&self) -> bool {
        self.status.is_set(PkaStatus::BUSY)
    }

    pub fn read(&self, offset: u32) -> Option<u32> {
        if let Some((slot, word)) = Slot::decode(offset) {
            return Some(self.slots[slot_index(slot)][word as usize]);
        }
        let val = match offset {
            PKA_CTRL => self.ctrl,
            PKA_OPERAND_WORDS => self.operand_words,
            PKA_STATUS => self.status.get(),
            PKA_ERR_STATUS => self.err,
            PKA_FLAGS => self.flags.get(),
            PKA_SOFT_RESET => 0,
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
    pub fn write(&mut self, offset: u32, val: u32, owned: bool, now: u64) -> bool {
        if !owned {
            if offset == PKA_CTRL {
                self.status.write(PkaStatus::ERROR::SET);
                self.err = PKA_ERR_NO_MUTEX;
            }
            return true;
        }
        if let Some((slot, word)) = Slot::decode(offset) {
            if !self.is_busy() {
                self.slots[slot_index(slot)][word as usize] = val;
            }
            return true;
        }
        match offset {
            PKA_CTRL => {
                self.ctrl = val;
                let ctrl = LocalRegisterCopy::<u32, PkaCtrl::Register>::new(val);
                if ctrl.is_set(PkaCtrl::START) && !self.is_busy() {
                    self.start(ctrl.read(PkaCtrl::OPCODE), now);
                }
            }
            PKA_OPERAND_WORDS => self.operand_words = val,
            PKA_SOFT_RESET => {
                if val & 1 != 0 {
                    self.reset();
                }
            }
            PKA_STATUS | PKA_ERR_STATUS | PKA_FLAGS => {}
            _ => return false,
        }
        true
    }

    fn reset(&mut self) {
        self.pending = None;
        self.ctrl = 0;
        self.operand_words = 0;
        self.status.set(0);
        self.err = PKA_ERR_NONE;
        self.flags.set(0);
        for slot in self.slots.iter_mut() {
            slot.fill(0);
        }
    }

    /// Abort any in-flight operation after a watchdog reset.
    pub fn abort(&mut self) {
        self.reset();
        self.status.write(PkaStatus::ERROR::SET);
        self.err = PKA_ERR_ABORTED;
    }

    fn operand(&self, slot: Slot) -> BigUint {
        let words = self.operand_words as usize;
        from_le_words(&self.slots[slot_index(slot)][..words])
    }

    fn point(&self, x: Slot, y: Slot) -> AffinePoint {
        AffinePoint::Affine {
            x: self.operand(x),
            y: self.operand(y),
        }
    }

    fn curve(&self) -> WeierstrassCurve {
        WeierstrassCurve::new(
            self.operand(operand::MODULUS),
            self.operand(operand::CURVE_A),
            self.operand(operand::CURVE_B),
        )
    }

    fn start(&mut self, opcode: u32, now: u64) {
        match self.ops.iter_mut().find(|(op, _)| *op == opcode) {
            Some((_, count)) => *count += 1,
            None => self.ops.push((opcode, 1)),
        }
        self.flags.set(0);
        self.err = PKA_ERR_NONE;

        match self.execute(opcode) {
            Ok((mut outputs, mut flags, ticks)) => {
                if self.zero_next_op == Some(opcode) {
                    self.zero_next_op = None;
                    for (_, words) in outputs.iter_mut() {
                        words.fill(0);
                    }
                    flags = PkaFlags::ZERO::SET.value;
                }
                let ready_at = if self.hang_next_op {
                    self.hang_next_op = false;
                    u64::MAX
                } else {
                    now + ticks
                };
                self.pending = Some(PendingOp {
                    ready_at,
                    outputs,
                    flags,
                    err: self.fail_next_op.take().unwrap_or(PKA_ERR_NONE),
                });
                self.status.write(PkaStatus::BUSY::SET);
            }
            Err(err) => {
                self.err = err;
                self.status.write(PkaStatus::ERROR::SET);
            }
        }
    }

    fn scalar_output(&self, value: &BigUint) -> Result<(Vec<(Slot, Vec<u32>)>, u32), u32> {
        let words = to_le_words(value, self.operand_words as usize).ok_or(PKA_ERR_OPERAND)?;
        let flags = if value.is_zero() {
            PkaFlags::ZERO::SET.value
        } else {
            0
        };
        Ok((vec![(operand::X, words)], flags))
    }

    fn point_output(&self, point: &AffinePoint) -> Result<(Vec<(Slot, Vec<u32>)>, u32), u32> {
        let len = self.operand_words as usize;
        match point {
            AffinePoint::Infinity => Ok((
                vec![(operand::X, vec![0; len]), (operand::Y, vec![0; len])],
                PkaFlags::INFINITY::SET.value,
            )),
            AffinePoint::Affine { x, y } => {
                let x = to_le_words(x, len).ok_or(PKA_ERR_OPERAND)?;
                let y = to_le_words(y, len).ok_or(PKA_ERR_OPERAND)?;
                Ok((vec![(operand::X, x), (operand::Y, y)], 0))
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn execute(&self, opcode: u32) -> Result<(Vec<(Slot, Vec<u32>)>, u32, u64), u32> {
        if self.operand_words == 0 || self.operand_words > PKA_SLOT_WORDS {
            return Err(PKA_ERR_OPERAND);
        }
        let m = self.operand(operand::MODULUS);
        if m.is_zero() {
            return Err(PKA_ERR_OPERAND);
        }
        let x = self.operand(operand::X);

        let Some(opcode) = PkaCtrl::OPCODE::Value::try_from_value(opcode) else {
            return Err(PKA_ERR_OPCODE);
        };
        let (outputs, flags, ticks) = match opcode {
            PkaCtrl::OPCODE::Value::ModReduce => {
                let r = mod_reduce(&x, &m).ok_or(PKA_ERR_OPERAND)?;
                let (out, flags) = self.scalar_output(&r)?;
                (out, flags, MAU_TICKS)
            }
            PkaCtrl::OPCODE::Value::ModInvert => {
                let r = mod_inverse(&x, &m).ok_or(PKA_ERR_NOT_INVERTIBLE)?;
                let (out, flags) = self.scalar_output(&r)?;
                (out, flags, MAU_TICKS)
            }
            PkaCtrl::OPCODE::Value::ModMul => {
                let r = mod_mul(&x, &self.operand(operand::Y), &m).ok_or(PKA_ERR_OPERAND)?;
                let (out, flags) = self.scalar_output(&r)?;
                (out, flags, MAU_TICKS)
            }
            PkaCtrl::OPCODE::Value::ModAdd => {
                let r = mod_add(&x, &self.operand(operand::Y), &m).ok_or(PKA_ERR_OPERAND)?;
                let (out, flags) = self.scalar_output(&r)?;
                (out, flags, MAU_TICKS)
            }
            PkaCtrl::OPCODE::Value::ModExp => {
                let r = mod_exp(&x, &self.operand(operand::K1), &m).ok_or(PKA_ERR_OPERAND)?;
                let (out, flags) = self.scalar_output(&r)?;
                (out, flags, EXP_TICKS + self.operand_words as u64)
            }
            PkaCtrl::OPCODE::Value::EcPointMul => {
                let curve = self.curve();
                let p = self.point(operand::X, operand::Y);
                let r = curve.multiply(&self.operand(operand::K1), &p);
                let (out, flags) = self.point_output(&r)?;
                (out, flags, POINT_TICKS)
            }
            PkaCtrl::OPCODE::Value::EcPointVerify => {
                let curve = self.curve();
                let p = self.point(operand::X, operand::Y);
                let flags = if curve.is_on_curve(&p) {
                    PkaFlags::ON_CURVE::SET.value
                } else {
                    0
                };
                (Vec::new(), flags, MAU_TICKS)
            }
            PkaCtrl::OPCODE::Value::EcShamir => {
                let curve = self.curve();
                let p1 = self.point(operand::X, operand::Y);
                let p2 = self.point(operand::P2_X, operand::P2_Y);
                let r = curve.shamir(
                    &self.operand(operand::K1),
                    &p1,
                    &self.operand(operand::K2),
                    &p2,
                );
                let (out, flags) = self.point_output(&r)?;
                (out, flags, POINT_TICKS)
            }
        };
        Ok((outputs, flags, ticks))
    }

    /// Complete a pending operation whose deadline has passed.
    pub fn poll(&mut self, now: u64) {
        match &self.pending {
            Some(op) if now >= op.ready_at => {}
            _ => return,
        }
        let Some(op) = self.pending.take() else {
            return;
        };
        if op.err != PKA_ERR_NONE {
            self.err = op.err;
            self.status.write(PkaStatus::ERROR::SET);
            return;
        }
        for (slot, words) in op.outputs {
            let dst = &mut self.slots[slot_index(slot)];
            dst[..words.len()].copy_from_slice(&words);
        }
        self.flags.set(op.flags);
        self.status.write(PkaStatus::DONE::SET);
    }
}
