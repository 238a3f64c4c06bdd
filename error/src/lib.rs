/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains API and macros used by the security engine drivers for
    error handling.

    Error codes are laid out as 0xCCCC_KKNN where CCCC names the component
    that raised the error, KK is the `ErrorKind` and NN disambiguates
    errors of the same kind within a component.

--*/
#![cfg_attr(not(any(feature = "std", test)), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Security Engine Error Type
/// Derives debug, copy, clone, eq, and partial eq
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SeError(pub NonZeroU32);

/// Broad classification of an error, encoded in bits 8..16 of the code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Caller supplied arguments that can never succeed.
    InvalidArgument = 0x01,

    /// Unsupported algorithm, curve or engine configuration.
    InvalidConfig = 0x02,

    /// The engine reported an error or entered an unexpected state.
    EngineError = 0x03,

    /// A poll budget elapsed before the engine signalled completion.
    Timeout = 0x04,

    /// A signing attempt produced r == 0 or s == 0. Retry with a fresh nonce.
    RetryableZero = 0x05,

    /// The random source could not produce an acceptable value.
    RngFailure = 0x08,

    /// A known answer test produced an unexpected result.
    SelfTest = 0x09,
}

impl ErrorKind {
    const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::InvalidArgument),
            0x02 => Some(Self::InvalidConfig),
            0x03 => Some(Self::EngineError),
            0x04 => Some(Self::Timeout),
            0x05 => Some(Self::RetryableZero),
            0x08 => Some(Self::RngFailure),
            0x09 => Some(Self::SelfTest),
            _ => None,
        }
    }
}

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: SeError = SeError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(& 'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl SeError {
    /// Create an error; intended to only be used from const contexts, as we don't want
    /// runtime panics if val is zero. The preferred way to get a SeError from a u32 is to
    /// use `SeError::try_from()` from the `TryFrom` trait impl.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("SeError cannot be 0"),
        }
    }

    /// Kind of the error, or `None` for codes outside the standard layout.
    pub const fn kind(&self) -> Option<ErrorKind> {
        ErrorKind::from_code(((self.0.get() >> 8) & 0xff) as u8)
    }

    /// Component identifier held in the upper half of the code.
    pub const fn component(&self) -> u16 {
        (self.0.get() >> 16) as u16
    }

    /// Returns true if a signing attempt may be repeated with a fresh nonce.
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), Some(ErrorKind::RetryableZero))
    }

    define_error_constants![
        // SHA hash engine
        (
            DRIVER_SHA_CHUNK_OVERRUN,
            0x0001_0101,
            "SHA chunk is longer than the bytes left in the message"
        ),
        (
            DRIVER_SHA_LAST_CHUNK_MISMATCH,
            0x0001_0102,
            "SHA last-chunk flag does not match the bytes left in the message"
        ),
        (
            DRIVER_SHA_MAX_DATA,
            0x0001_0103,
            "SHA chunk exceeds the maximum engine task size"
        ),
        (
            DRIVER_SHA_EMPTY_CHUNK,
            0x0001_0104,
            "SHA zero length chunk before the end of the message"
        ),
        (
            DRIVER_SHA_UNALIGNED_CHUNK,
            0x0001_0201,
            "SHA non-final chunk is not a multiple of the block size"
        ),
        (
            DRIVER_SHA_INVALID_STATE,
            0x0001_0202,
            "SHA operation issued in the wrong context state"
        ),
        (
            DRIVER_SHA_WRONG_ENGINE,
            0x0001_0203,
            "SHA driver was handed a guard for an engine without a hash unit"
        ),
        (
            DRIVER_SHA_ENGINE_HALTED,
            0x0001_0301,
            "SHA engine is halted"
        ),
        (
            DRIVER_SHA_ENGINE_FAULT,
            0x0001_0302,
            "SHA engine reported an error"
        ),
        (
            DRIVER_SHA_RESET_TIMEOUT,
            0x0001_0401,
            "SHA engine did not return to idle after reset"
        ),
        (
            DRIVER_SHA_TASK_TIMEOUT,
            0x0001_0402,
            "SHA task did not complete within the poll budget"
        ),
        // PKA modular arithmetic unit and EC point unit
        (
            DRIVER_PKA_OPERAND_SIZE_MISMATCH,
            0x0002_0101,
            "PKA operands have different widths"
        ),
        (
            DRIVER_PKA_ZERO_MODULUS,
            0x0002_0102,
            "PKA modulus is zero"
        ),
        (
            DRIVER_PKA_POINT_AT_INFINITY,
            0x0002_0103,
            "PKA input point is the point at infinity"
        ),
        (
            DRIVER_PKA_OPERAND_TOO_LARGE,
            0x0002_0104,
            "PKA operand exceeds the engine operand width"
        ),
        (
            DRIVER_PKA_UNSUPPORTED_CURVE,
            0x0002_0201,
            "PKA curve is not supported by the point unit"
        ),
        (
            DRIVER_PKA_WRONG_ENGINE,
            0x0002_0202,
            "PKA driver was handed a guard for an engine without a PKA unit"
        ),
        (
            DRIVER_PKA_ENGINE_FAULT,
            0x0002_0301,
            "PKA engine reported an error"
        ),
        (
            DRIVER_PKA_NOT_INVERTIBLE,
            0x0002_0302,
            "PKA operand has no inverse modulo the modulus"
        ),
        (
            DRIVER_PKA_ABORTED,
            0x0002_0303,
            "PKA operation was aborted by a watchdog reset"
        ),
        (
            DRIVER_PKA_TIMEOUT,
            0x0002_0401,
            "PKA operation did not complete within the poll budget"
        ),
        // ECDSA
        (
            DRIVER_ECDSA_INVALID_SCALAR,
            0x0003_0101,
            "ECDSA private key or nonce is outside [1, n-1]"
        ),
        (
            DRIVER_ECDSA_WIDTH_MISMATCH,
            0x0003_0102,
            "ECDSA operand width does not match the curve"
        ),
        (
            DRIVER_ECDSA_INVALID_HASH,
            0x0003_0103,
            "ECDSA message hash is empty"
        ),
        (
            DRIVER_ECDSA_SIGN_R_ZERO,
            0x0003_0501,
            "ECDSA signature component r is zero"
        ),
        (
            DRIVER_ECDSA_SIGN_S_ZERO,
            0x0003_0502,
            "ECDSA signature component s is zero"
        ),
        (
            DRIVER_ECDSA_SIGN_RETRIES_EXHAUSTED,
            0x0003_0801,
            "ECDSA signing gave up after the maximum number of nonces"
        ),
        // RSA and MGF1
        (
            DRIVER_RSA_INVALID_MODULUS,
            0x0004_0101,
            "RSA modulus is empty, even or too large"
        ),
        (
            DRIVER_RSA_SIGNATURE_SIZE,
            0x0004_0102,
            "RSA signature length does not match the modulus"
        ),
        (
            DRIVER_RSA_MISSING_PRIVATE_EXPONENT,
            0x0004_0103,
            "RSA signing requested with a public key"
        ),
        (
            DRIVER_RSA_PSS_HASH_SIZE,
            0x0004_0104,
            "RSA-PSS message hash length does not match the hash algorithm"
        ),
        (
            DRIVER_RSA_PSS_ENCODING_ERROR,
            0x0004_0105,
            "RSA-PSS modulus too small for the hash and salt lengths"
        ),
        (
            DRIVER_MGF1_MASK_TOO_LONG,
            0x0004_0106,
            "MGF1 mask length exceeds 2^32 hash outputs"
        ),
        (
            DRIVER_MGF1_SEED_TOO_LONG,
            0x0004_0107,
            "MGF1 seed exceeds the supported length"
        ),
        // Engine mutex
        (
            DRIVER_MUTEX_INVALID_TOKEN,
            0x0005_0101,
            "Engine mutex caller token is zero"
        ),
        (
            DRIVER_MUTEX_ACQUIRE_TIMEOUT,
            0x0005_0401,
            "Engine mutex could not be acquired within the poll budget"
        ),
        // EC key generation
        (
            DRIVER_ECC_KEYGEN_WIDTH_MISMATCH,
            0x0006_0101,
            "EC key generation output width does not match the curve"
        ),
        (
            DRIVER_ECC_KEYGEN_PUBKEY_INVALID,
            0x0006_0301,
            "EC key generation produced a public key that is not on the curve"
        ),
        (
            DRIVER_ECC_KEYGEN_RNG_EXHAUSTED,
            0x0006_0801,
            "EC key generation could not draw a private key below the order"
        ),
        // Fixed width integers
        (
            DRIVER_INT_TOO_LARGE,
            0x0008_0101,
            "Integer does not fit the fixed width container"
        ),
        (
            DRIVER_INT_ZERO_LENGTH,
            0x0008_0102,
            "Integer has zero length"
        ),
        (
            DRIVER_INT_VALUE_OVERFLOW,
            0x0008_0103,
            "Integer value does not fit the requested width"
        ),
        // Known answer tests
        (
            KAT_SHA1_DIGEST_MISMATCH,
            0x0009_0901,
            "KAT: SHA-1 digest mismatch"
        ),
        (
            KAT_SHA224_DIGEST_MISMATCH,
            0x0009_0902,
            "KAT: SHA-224 digest mismatch"
        ),
        (
            KAT_SHA256_DIGEST_MISMATCH,
            0x0009_0903,
            "KAT: SHA-256 digest mismatch"
        ),
        (
            KAT_SHA384_DIGEST_MISMATCH,
            0x0009_0904,
            "KAT: SHA-384 digest mismatch"
        ),
        (
            KAT_SHA512_DIGEST_MISMATCH,
            0x0009_0905,
            "KAT: SHA-512 digest mismatch"
        ),
        (
            KAT_SHA512_224_DIGEST_MISMATCH,
            0x0009_0906,
            "KAT: SHA-512/224 digest mismatch"
        ),
        (
            KAT_SHA512_256_DIGEST_MISMATCH,
            0x0009_0907,
            "KAT: SHA-512/256 digest mismatch"
        ),
        (
            KAT_ECDSA_P256_SIGNATURE_MISMATCH,
            0x0009_0908,
            "KAT: ECDSA P-256 signature mismatch"
        ),
        (
            KAT_ECDSA_P256_VERIFY_FAILURE,
            0x0009_0909,
            "KAT: ECDSA P-256 verification failure"
        ),
        (
            KAT_ECC_POINT_MULTIPLY_MISMATCH,
            0x0009_090a,
            "KAT: EC point multiplication mismatch"
        ),
        (
            KAT_RSA_PSS_VERIFY_FAILURE,
            0x0009_090b,
            "KAT: RSA-PSS sign/verify consistency failure"
        ),
        (
            KAT_RSA_PSS_SIGNATURE_MISMATCH,
            0x0009_090c,
            "KAT: RSA-PSS signature mismatch"
        ),
        (KAT_MGF1_MASK_MISMATCH, 0x0009_090d, "KAT: MGF1 mask mismatch"),
    ];
}

impl From<core::num::NonZeroU32> for crate::SeError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::SeError(val)
    }
}

impl From<SeError> for core::num::NonZeroU32 {
    fn from(val: SeError) -> Self {
        val.0
    }
}

impl From<SeError> for u32 {
    fn from(val: SeError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for SeError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(SeError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type SeResult<T> = Result<T, SeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_try_from() {
        assert!(SeError::try_from(0).is_err());
        assert_eq!(
            Ok(SeError::DRIVER_SHA_CHUNK_OVERRUN),
            SeError::try_from(0x0001_0101)
        );
    }

    #[test]
    fn test_error_constants_uniqueness() {
        let constants = SeError::all_constants();
        let mut error_values = HashSet::new();
        let mut duplicates = Vec::new();

        for (name, value) in constants {
            if !error_values.insert(value) {
                duplicates.push((name, value));
            }
        }

        assert!(
            duplicates.is_empty(),
            "Found duplicate error codes: {:?}",
            duplicates
        );
    }

    #[test]
    fn test_every_constant_has_a_kind() {
        for (name, value) in SeError::all_constants() {
            let err = SeError::try_from(value).unwrap();
            assert!(err.kind().is_some(), "{name} has no kind");
        }
    }

    #[test]
    fn test_kind_decoding() {
        assert_eq!(
            SeError::DRIVER_SHA_TASK_TIMEOUT.kind(),
            Some(ErrorKind::Timeout)
        );
        assert_eq!(
            SeError::DRIVER_SHA_UNALIGNED_CHUNK.kind(),
            Some(ErrorKind::InvalidConfig)
        );
        assert_eq!(SeError::DRIVER_PKA_TIMEOUT.component(), 0x0002);
        assert!(SeError::DRIVER_ECDSA_SIGN_S_ZERO.is_retryable());
        assert!(!SeError::DRIVER_ECDSA_SIGN_RETRIES_EXHAUSTED.is_retryable());
        assert_eq!(SeError::try_from(0x0001_7f01).unwrap().kind(), None);
    }
}
