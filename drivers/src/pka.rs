/*++

Licensed under the Apache-2.0 license.

File Name:

    pka.rs

Abstract:

    File contains the driver of the public key accelerator: the modular
    arithmetic unit, the EC point unit and modular exponentiation.

    Operands are exchanged with the engine as little-endian words. The
    conversion from and to big-endian integers happens here and nowhere else.

--*/

use crate::{EcCurve, EcInt, EcPoint, EngineConfig, EngineGuard, FixedWidthInteger, SeError, SeResult};
use secengine_registers::pka::*;
use secengine_registers::{DeviceId, RegisterPort};
use tock_registers::fields::FieldValue;
use tock_registers::LocalRegisterCopy;

/// Result flags of the last operation
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PkaResultFlags {
    pub zero: bool,
    pub infinity: bool,
    pub on_curve: bool,
}

/// Public key accelerator driver
pub struct Pka<'g, 'p, P: RegisterPort> {
    guard: &'g EngineGuard<'p, P>,
    config: EngineConfig,
}

impl<'g, 'p, P: RegisterPort> Pka<'g, 'p, P> {
    /// Create a driver over an acquired PKA1 engine.
    ///
    /// # Arguments
    ///
    /// * `guard` - Mutex guard of the PKA device
    /// * `config` - Poll budgets
    pub fn new(guard: &'g EngineGuard<'p, P>, config: &EngineConfig) -> SeResult<Self> {
        if guard.device() != DeviceId::Pka1 {
            return Err(SeError::DRIVER_PKA_WRONG_ENGINE);
        }
        Ok(Self {
            guard,
            config: *config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Reset the watchdog between the steps of a long sequence.
    pub fn keep_alive(&self) {
        self.guard.keep_alive();
    }

    fn write_operand<const N: usize>(&self, slot: Slot, value: &FixedWidthInteger<N>, words: usize) {
        for word in 0..words {
            self.guard
                .write(slot.word_offset(word as u32), value.le_word(word));
        }
    }

    fn read_operand<const N: usize>(&self, slot: Slot, len: usize) -> SeResult<FixedWidthInteger<N>> {
        let mut value = FixedWidthInteger::<N>::zero(len)?;
        for word in 0..value.word_len() {
            value.set_le_word(word, self.guard.read(slot.word_offset(word as u32)));
        }
        Ok(value)
    }

    /// Start `opcode` over `words` word operands and wait for completion.
    fn execute(
        &self,
        opcode: FieldValue<u32, PkaCtrl::Register>,
        words: usize,
    ) -> SeResult<PkaResultFlags> {
        if words == 0 || words > PKA_SLOT_WORDS as usize {
            return Err(SeError::DRIVER_PKA_OPERAND_TOO_LARGE);
        }
        self.guard.write(PKA_OPERAND_WORDS, words as u32);
        self.guard
            .write(PKA_CTRL, (opcode + PkaCtrl::START::SET).value);

        let mut status = LocalRegisterCopy::<u32, PkaStatus::Register>::new(0);
        if !self.guard.poll_until(self.config.pka_op_polls, |g| {
            status.set(g.read(PKA_STATUS));
            !status.is_set(PkaStatus::BUSY)
        }) {
            log::warn!("PKA operation {:#x} timed out", opcode.value);
            return Err(SeError::DRIVER_PKA_TIMEOUT);
        }

        if status.is_set(PkaStatus::ERROR) || !status.is_set(PkaStatus::DONE) {
            let err = self.guard.read(PKA_ERR_STATUS);
            return Err(match err {
                PKA_ERR_NOT_INVERTIBLE => SeError::DRIVER_PKA_NOT_INVERTIBLE,
                PKA_ERR_ABORTED => SeError::DRIVER_PKA_ABORTED,
                _ => {
                    log::warn!("PKA operation {:#x} failed: {:#x}", opcode.value, err);
                    SeError::DRIVER_PKA_ENGINE_FAULT
                }
            });
        }

        let flags = LocalRegisterCopy::<u32, PkaFlags::Register>::new(self.guard.read(PKA_FLAGS));
        Ok(PkaResultFlags {
            zero: flags.is_set(PkaFlags::ZERO),
            infinity: flags.is_set(PkaFlags::INFINITY),
            on_curve: flags.is_set(PkaFlags::ON_CURVE),
        })
    }

    fn check_modulus<const N: usize>(m: &FixedWidthInteger<N>) -> SeResult<()> {
        if m.is_zero() {
            return Err(SeError::DRIVER_PKA_ZERO_MODULUS);
        }
        Ok(())
    }

    fn check_width<const N: usize>(
        a: &FixedWidthInteger<N>,
        b: &FixedWidthInteger<N>,
    ) -> SeResult<()> {
        if a.len() != b.len() {
            return Err(SeError::DRIVER_PKA_OPERAND_SIZE_MISMATCH);
        }
        Ok(())
    }

    fn binary_op<const N: usize>(
        &self,
        opcode: FieldValue<u32, PkaCtrl::Register>,
        x: &FixedWidthInteger<N>,
        y: Option<&FixedWidthInteger<N>>,
        m: &FixedWidthInteger<N>,
    ) -> SeResult<FixedWidthInteger<N>> {
        Self::check_width(x, m)?;
        if let Some(y) = y {
            Self::check_width(y, m)?;
        }
        Self::check_modulus(m)?;

        let words = m.word_len();
        self.write_operand(operand::MODULUS, m, words);
        self.write_operand(operand::X, x, words);
        if let Some(y) = y {
            self.write_operand(operand::Y, y, words);
        }
        self.execute(opcode, words)?;
        self.read_operand(operand::X, m.len())
    }

    /// x mod m
    pub fn reduce<const N: usize>(
        &mut self,
        x: &FixedWidthInteger<N>,
        m: &FixedWidthInteger<N>,
    ) -> SeResult<FixedWidthInteger<N>> {
        self.binary_op(PkaCtrl::OPCODE::ModReduce, x, None, m)
    }

    /// x^-1 mod m. Fails with `DRIVER_PKA_NOT_INVERTIBLE` if gcd(x, m) != 1.
    pub fn invert<const N: usize>(
        &mut self,
        x: &FixedWidthInteger<N>,
        m: &FixedWidthInteger<N>,
    ) -> SeResult<FixedWidthInteger<N>> {
        self.binary_op(PkaCtrl::OPCODE::ModInvert, x, None, m)
    }

    /// x * y mod m
    pub fn mod_mul<const N: usize>(
        &mut self,
        x: &FixedWidthInteger<N>,
        y: &FixedWidthInteger<N>,
        m: &FixedWidthInteger<N>,
    ) -> SeResult<FixedWidthInteger<N>> {
        self.binary_op(PkaCtrl::OPCODE::ModMul, x, Some(y), m)
    }

    /// x + y mod m
    pub fn mod_add<const N: usize>(
        &mut self,
        x: &FixedWidthInteger<N>,
        y: &FixedWidthInteger<N>,
        m: &FixedWidthInteger<N>,
    ) -> SeResult<FixedWidthInteger<N>> {
        self.binary_op(PkaCtrl::OPCODE::ModAdd, x, Some(y), m)
    }

    /// base ^ exponent mod m
    ///
    /// # Arguments
    ///
    /// * `base` - Base, of the width of `m`
    /// * `exponent` - Exponent, of the width of `m`
    /// * `m` - Modulus
    pub fn mod_exp<const N: usize>(
        &mut self,
        base: &FixedWidthInteger<N>,
        exponent: &FixedWidthInteger<N>,
        m: &FixedWidthInteger<N>,
    ) -> SeResult<FixedWidthInteger<N>> {
        Self::check_width(base, m)?;
        Self::check_width(exponent, m)?;
        Self::check_modulus(m)?;

        let words = m.word_len();
        self.write_operand(operand::MODULUS, m, words);
        self.write_operand(operand::X, base, words);
        self.write_operand(operand::K1, exponent, words);
        self.execute(PkaCtrl::OPCODE::ModExp, words)?;
        self.read_operand(operand::X, m.len())
    }

    fn load_curve(&self, curve: &EcCurve) -> usize {
        let words = curve.p.word_len();
        self.write_operand(operand::MODULUS, &curve.p, words);
        self.write_operand(operand::CURVE_A, &curve.a, words);
        self.write_operand(operand::CURVE_B, &curve.b, words);
        words
    }

    fn check_point(curve: &EcCurve, point: &EcPoint) -> SeResult<()> {
        if point.is_infinity() {
            return Err(SeError::DRIVER_PKA_POINT_AT_INFINITY);
        }
        if point.x.len() != curve.len || point.y.len() != curve.len {
            return Err(SeError::DRIVER_PKA_OPERAND_SIZE_MISMATCH);
        }
        Ok(())
    }

    fn check_scalar(curve: &EcCurve, k: &EcInt) -> SeResult<()> {
        if k.len() != curve.len {
            return Err(SeError::DRIVER_PKA_OPERAND_SIZE_MISMATCH);
        }
        Ok(())
    }

    fn read_point(&self, curve: &EcCurve, flags: PkaResultFlags) -> SeResult<EcPoint> {
        if flags.infinity {
            return EcPoint::infinity(curve.len);
        }
        Ok(EcPoint::new(
            self.read_operand(operand::X, curve.len)?,
            self.read_operand(operand::Y, curve.len)?,
        ))
    }

    /// k * P on `curve`
    ///
    /// # Arguments
    ///
    /// * `curve` - Curve
    /// * `k` - Scalar, of the curve width
    /// * `point` - Finite point, in either byte order
    pub fn point_multiply(&mut self, curve: &EcCurve, k: &EcInt, point: &EcPoint) -> SeResult<EcPoint> {
        let point = point.to_big_endian();
        Self::check_scalar(curve, k)?;
        Self::check_point(curve, &point)?;

        let words = self.load_curve(curve);
        self.write_operand(operand::X, &point.x, words);
        self.write_operand(operand::Y, &point.y, words);
        self.write_operand(operand::K1, k, words);
        let flags = self.execute(PkaCtrl::OPCODE::EcPointMul, words)?;
        self.read_point(curve, flags)
    }

    /// Returns true if `point` satisfies the curve equation.
    pub fn point_verify(&mut self, curve: &EcCurve, point: &EcPoint) -> SeResult<bool> {
        let point = point.to_big_endian();
        if point.is_infinity() {
            return Ok(false);
        }
        Self::check_point(curve, &point)?;

        let words = self.load_curve(curve);
        self.write_operand(operand::X, &point.x, words);
        self.write_operand(operand::Y, &point.y, words);
        let flags = self.execute(PkaCtrl::OPCODE::EcPointVerify, words)?;
        Ok(flags.on_curve)
    }

    /// k1 * P1 + k2 * P2 in a single interleaved pass
    pub fn shamir_trick(
        &mut self,
        curve: &EcCurve,
        k1: &EcInt,
        p1: &EcPoint,
        k2: &EcInt,
        p2: &EcPoint,
    ) -> SeResult<EcPoint> {
        let p1 = p1.to_big_endian();
        let p2 = p2.to_big_endian();
        Self::check_scalar(curve, k1)?;
        Self::check_scalar(curve, k2)?;
        Self::check_point(curve, &p1)?;
        Self::check_point(curve, &p2)?;

        let words = self.load_curve(curve);
        self.write_operand(operand::X, &p1.x, words);
        self.write_operand(operand::Y, &p1.y, words);
        self.write_operand(operand::P2_X, &p2.x, words);
        self.write_operand(operand::P2_Y, &p2.y, words);
        self.write_operand(operand::K1, k1, words);
        self.write_operand(operand::K2, k2, words);
        let flags = self.execute(PkaCtrl::OPCODE::EcShamir, words)?;
        self.read_point(curve, flags)
    }
}
