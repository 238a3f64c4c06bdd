/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the Security Engine Emulator Crypto library.

--*/

mod bignum;
mod sha;
mod weierstrass;

pub use bignum::{from_le_words, mod_add, mod_exp, mod_inverse, mod_mul, mod_reduce, to_le_words};

pub use sha::ShaCore;
pub use sha::ShaMode;

pub use weierstrass::AffinePoint;
pub use weierstrass::WeierstrassCurve;
