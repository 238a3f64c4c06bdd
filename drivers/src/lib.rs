/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Security Engine driver library.

--*/

#![cfg_attr(not(any(feature = "std", test)), no_std)]

mod array;
mod config;
mod ecc;
pub mod ecc_keygen;
pub mod ecdsa;
pub mod mgf1;
mod mutex;
mod pka;
pub mod rsa_pss;
mod security_engine;
mod sha;
pub mod wait;

pub use array::{EcInt, Endianness, FixedWidthInteger, RsaInt};
pub use config::EngineConfig;
pub use ecc::{CurveId, EcCurve, EcPoint, EcPointFlags, EcdsaSignature, SignatureFlags};
pub use ecc_keygen::EcKeyPair;
pub use mutex::{CallerToken, EngineGuard, EngineSelector, OperationClass};
pub use pka::{Pka, PkaResultFlags};
pub use rsa_pss::RsaKey;
pub use secengine_error::{ErrorKind, SeError, SeResult};
pub use secengine_registers::{DeviceId, RegisterPort};
pub use security_engine::SecurityEngine;
pub use sha::{EngineState, HashContext, HashEngine, ShaAlgorithm, ShaDigest};
