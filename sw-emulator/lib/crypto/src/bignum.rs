/*++

Licensed under the Apache-2.0 license.

File Name:

    bignum.rs

Abstract:

    File contains the modular arithmetic used by the emulated public key
    accelerator.

--*/

use num_bigint::BigUint;
use num_traits::Zero;

/// Build an integer from little-endian 32-bit words.
pub fn from_le_words(words: &[u32]) -> BigUint {
    BigUint::from_slice(words)
}

/// Export an integer as exactly `len` little-endian 32-bit words.
///
/// Returns `None` if the value does not fit.
pub fn to_le_words(value: &BigUint, len: usize) -> Option<Vec<u32>> {
    let mut words = value.to_u32_digits();
    if words.len() > len {
        return None;
    }
    words.resize(len, 0);
    Some(words)
}

/// x mod m, or `None` for a zero modulus
pub fn mod_reduce(x: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    Some(x % m)
}

/// Multiplicative inverse of x modulo m, or `None` if gcd(x, m) != 1
pub fn mod_inverse(x: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let x = x % m;
    if x.is_zero() {
        return None;
    }
    x.modinv(m)
}

/// x * y mod m
pub fn mod_mul(x: &BigUint, y: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    Some((x * y) % m)
}

/// x + y mod m
pub fn mod_add(x: &BigUint, y: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    Some((x + y) % m)
}

/// base ^ exp mod m
pub fn mod_exp(base: &BigUint, exp: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    Some(base.modpow(exp, m))
}
