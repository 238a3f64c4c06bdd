/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Security Engine Known Answer Tests.

--*/

#![no_std]

mod crypto_kat;
mod ecc_point_kat;
mod ecdsa_p256_kat;
mod mgf1_kat;
mod rsa_pss_kat;
mod sha1_kat;
mod sha256_kat;
mod sha384_kat;
mod sha512_kat;

pub use crypto_kat::CryptoKat;
pub use ecc_point_kat::EccPointKat;
pub use ecdsa_p256_kat::EcdsaP256Kat;
pub use mgf1_kat::Mgf1Kat;
pub use rsa_pss_kat::RsaPssKat;
pub use secengine_drivers::{SeError, SeResult};
pub use sha1_kat::Sha1Kat;
pub use sha256_kat::Sha256Kat;
pub use sha384_kat::Sha384Kat;
pub use sha512_kat::Sha512Kat;
