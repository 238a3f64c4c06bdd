/*++

Licensed under the Apache-2.0 license.

File Name:

    array.rs

Abstract:

    File contains the fixed width integer container used to pass scalars,
    coordinates and RSA values to the engines.

--*/

use crate::{SeError, SeResult};

/// Byte order of an integer at an API boundary
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Endianness {
    Big,
    Little,
}

/// Unsigned integer of up to `CAP` bytes.
///
/// The value occupies the first `len` bytes of the buffer, most significant
/// byte first unless the owner records otherwise. Bytes past `len` are zero.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FixedWidthInteger<const CAP: usize> {
    len: usize,
    bytes: [u8; CAP],
}

/// Scalar or coordinate of the largest supported curve (P-521)
pub type EcInt = FixedWidthInteger<66>;

/// Value of the largest supported RSA modulus (4096 bits)
pub type RsaInt = FixedWidthInteger<512>;

impl<const CAP: usize> FixedWidthInteger<CAP> {
    /// Largest supported length in bytes
    pub const CAPACITY: usize = CAP;

    /// Build a constant from big-endian bytes. Fails the build if the input
    /// does not fit.
    pub const fn from_be_const(src: &[u8]) -> Self {
        assert!(!src.is_empty() && src.len() <= CAP);
        let mut bytes = [0u8; CAP];
        let mut i = 0;
        while i < src.len() {
            bytes[i] = src[i];
            i += 1;
        }
        Self {
            len: src.len(),
            bytes,
        }
    }

    /// Zero value of width `len`
    pub fn zero(len: usize) -> SeResult<Self> {
        Self::check_len(len)?;
        Ok(Self {
            len,
            bytes: [0u8; CAP],
        })
    }

    fn check_len(len: usize) -> SeResult<()> {
        if len == 0 {
            return Err(SeError::DRIVER_INT_ZERO_LENGTH);
        }
        if len > CAP {
            return Err(SeError::DRIVER_INT_TOO_LARGE);
        }
        Ok(())
    }

    /// Copy `src` as is. The width is the length of `src`.
    pub fn from_bytes(src: &[u8]) -> SeResult<Self> {
        let mut result = Self::zero(src.len())?;
        result.bytes[..src.len()].copy_from_slice(src);
        Ok(result)
    }

    /// Big-endian integer of width `src.len()`
    pub fn from_be_slice(src: &[u8]) -> SeResult<Self> {
        Self::from_bytes(src)
    }

    /// Convert little-endian bytes to a big-endian integer of width `src.len()`
    pub fn from_le_slice(src: &[u8]) -> SeResult<Self> {
        let mut result = Self::from_bytes(src)?;
        result.reverse();
        Ok(result)
    }

    /// Big-endian integer of width `len` holding the value of `src`.
    ///
    /// Shorter inputs are left-padded with zeros. Longer inputs are accepted
    /// only if the excess leading bytes are zero.
    ///
    /// # Arguments
    ///
    /// * `src` - Big-endian value
    /// * `len` - Width of the result
    pub fn from_be_padded(src: &[u8], len: usize) -> SeResult<Self> {
        let mut result = Self::zero(len)?;
        if src.len() > len {
            let excess = src.len() - len;
            if src[..excess].iter().any(|b| *b != 0) {
                return Err(SeError::DRIVER_INT_VALUE_OVERFLOW);
            }
            result.bytes[..len].copy_from_slice(&src[excess..]);
        } else {
            result.bytes[len - src.len()..len].copy_from_slice(src);
        }
        Ok(result)
    }

    /// Fit a message hash to a `len` byte curve scalar.
    ///
    /// Longer hashes keep their leftmost `len` bytes. Shorter hashes are
    /// left-padded with zeros.
    pub fn from_hash(hash: &[u8], len: usize) -> SeResult<Self> {
        if hash.len() >= len {
            Self::from_bytes(&hash[..len])
        } else {
            Self::from_be_padded(hash, len)
        }
    }

    /// Width in bytes
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The significant bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Reverse the byte order of the significant bytes in place.
    pub fn reverse(&mut self) {
        self.bytes[..self.len].reverse();
    }

    /// Copy with the byte order of the significant bytes reversed
    pub fn reversed(&self) -> Self {
        let mut result = *self;
        result.reverse();
        result
    }

    pub fn is_zero(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }

    /// Number of significant bits of a big-endian value
    pub fn bit_len(&self) -> usize {
        match self.as_bytes().iter().position(|b| *b != 0) {
            Some(idx) => (self.len - idx) * 8 - self.bytes[idx].leading_zeros() as usize,
            None => 0,
        }
    }

    /// Returns true if this big-endian value is strictly below `bound`.
    ///
    /// Widths must match.
    pub fn is_below(&self, bound: &Self) -> SeResult<bool> {
        if self.len != bound.len {
            return Err(SeError::DRIVER_INT_VALUE_OVERFLOW);
        }
        Ok(self.as_bytes() < bound.as_bytes())
    }

    /// Little-endian word `idx` of a big-endian value. Words past the width
    /// read as zero.
    pub fn le_word(&self, idx: usize) -> u32 {
        let mut word = 0u32;
        for byte in 0..4 {
            let pos = idx * 4 + byte;
            if pos < self.len {
                word |= (self.bytes[self.len - 1 - pos] as u32) << (8 * byte);
            }
        }
        word
    }

    /// Set little-endian word `idx` of a big-endian value. Bytes that fall
    /// outside the width are discarded.
    pub fn set_le_word(&mut self, idx: usize, word: u32) {
        for byte in 0..4 {
            let pos = idx * 4 + byte;
            if pos < self.len {
                self.bytes[self.len - 1 - pos] = (word >> (8 * byte)) as u8;
            }
        }
    }

    /// Number of 32-bit words needed to hold the width
    pub fn word_len(&self) -> usize {
        self.len.div_ceil(4)
    }

    /// Clear the value, keeping the width.
    pub fn zeroize(&mut self) {
        self.bytes.fill(0);
    }
}

/// Byte-wise equality of two buffers.
pub(crate) fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    cfg_if::cfg_if! {
        if #[cfg(feature = "ct-compare")] {
            use subtle::ConstantTimeEq;
            a.ct_eq(b).into()
        } else {
            a == b
        }
    }
}
