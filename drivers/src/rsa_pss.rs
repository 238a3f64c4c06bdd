/*++

Licensed under the Apache-2.0 license.

File Name:

    rsa_pss.rs

Abstract:

    File contains RSA exponentiation on the PKA and the RSASSA-PSS signature
    scheme (RFC 8017 section 8.1) built on it.

--*/

use crate::array::bytes_eq;
use crate::mgf1::mgf1;
use crate::{Endianness, HashEngine, Pka, RsaInt, SeError, SeResult, ShaAlgorithm, ShaDigest};
use secengine_registers::RegisterPort;

const PSS_TRAILER: u8 = 0xbc;
const PSS_PREFIX_LEN: usize = 8;
const MAX_HASH_LEN: usize = 64;

/// RSA key of up to 4096 bits
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RsaKey {
    modulus: RsaInt,
    public_exponent: RsaInt,
    private_exponent: Option<RsaInt>,
}

impl RsaKey {
    /// Public key from big-endian modulus and exponent.
    ///
    /// # Arguments
    ///
    /// * `modulus` - Odd modulus; its length is the key size in bytes
    /// * `exponent` - Public exponent, at most as long as the modulus
    pub fn new_public(modulus: &[u8], exponent: &[u8]) -> SeResult<Self> {
        let modulus = RsaInt::from_be_slice(modulus).map_err(|_| SeError::DRIVER_RSA_INVALID_MODULUS)?;
        let odd = modulus.as_bytes()[modulus.len() - 1] & 1 == 1;
        if !odd || modulus.as_bytes()[0] == 0 {
            return Err(SeError::DRIVER_RSA_INVALID_MODULUS);
        }
        let public_exponent = RsaInt::from_be_padded(exponent, modulus.len())?;
        Ok(Self {
            modulus,
            public_exponent,
            private_exponent: None,
        })
    }

    /// Attach the big-endian private exponent.
    pub fn with_private_exponent(mut self, exponent: &[u8]) -> SeResult<Self> {
        self.private_exponent = Some(RsaInt::from_be_padded(exponent, self.modulus.len())?);
        Ok(self)
    }

    pub fn modulus(&self) -> &RsaInt {
        &self.modulus
    }

    /// Key size in bytes
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.modulus.len()
    }

    /// Bit length of the modulus
    pub fn modulus_bits(&self) -> usize {
        self.modulus.bit_len()
    }

    pub fn has_private_exponent(&self) -> bool {
        self.private_exponent.is_some()
    }
}

/// input ^ e mod n
pub fn rsa_public<P: RegisterPort>(
    pka: &mut Pka<'_, '_, P>,
    key: &RsaKey,
    input: &RsaInt,
) -> SeResult<RsaInt> {
    pka.mod_exp(input, &key.public_exponent, &key.modulus)
}

/// input ^ d mod n
pub fn rsa_private<P: RegisterPort>(
    pka: &mut Pka<'_, '_, P>,
    key: &RsaKey,
    input: &RsaInt,
) -> SeResult<RsaInt> {
    let exponent = key
        .private_exponent
        .as_ref()
        .ok_or(SeError::DRIVER_RSA_MISSING_PRIVATE_EXPONENT)?;
    pka.mod_exp(input, exponent, &key.modulus)
}

/// Layout of an encoded message for one key and parameter set
struct PssLayout {
    /// Bytes of EM
    em_len: usize,

    /// Bytes of the masked data block
    db_len: usize,

    /// Zero bits required at the top of EM
    zero_bits: usize,
}

impl PssLayout {
    fn new(key: &RsaKey, hash_len: usize, salt_len: usize) -> Option<Self> {
        let em_bits = key.modulus_bits() - 1;
        let em_len = em_bits.div_ceil(8);
        let min_len = hash_len.checked_add(salt_len)?.checked_add(2)?;
        if em_len < min_len {
            return None;
        }
        Some(Self {
            em_len,
            db_len: em_len - hash_len - 1,
            zero_bits: 8 * em_len - em_bits,
        })
    }

    /// Mask of the bits of the first EM byte that may be set
    fn top_mask(&self) -> u8 {
        0xff >> self.zero_bits
    }
}

/// H = Hash(0x00 * 8 || m_hash || salt)
fn pss_hash<P: RegisterPort>(
    sha: &mut HashEngine<'_, '_, P>,
    algorithm: ShaAlgorithm,
    m_hash: &[u8],
    salt: &[u8],
) -> SeResult<ShaDigest> {
    let mut m_prime = [0u8; PSS_PREFIX_LEN + MAX_HASH_LEN + RsaInt::CAPACITY];
    let len = PSS_PREFIX_LEN + m_hash.len() + salt.len();
    m_prime[PSS_PREFIX_LEN..PSS_PREFIX_LEN + m_hash.len()].copy_from_slice(m_hash);
    m_prime[PSS_PREFIX_LEN + m_hash.len()..len].copy_from_slice(salt);
    sha.digest(algorithm, &m_prime[..len])
}

/// Verify an RSASSA-PSS signature.
///
/// Every step of the encoding check runs regardless of earlier failures.
///
/// # Arguments
///
/// * `pka` - PKA driver
/// * `sha` - Hash engine driver
/// * `key` - Public key
/// * `signature` - Signature, as long as the modulus
/// * `sig_order` - Byte order of `signature`
/// * `m_hash` - Message hash
/// * `algorithm` - Hash algorithm of `m_hash`, MGF1 and the encoding
/// * `salt_len` - Expected salt length
///
/// # Returns
///
/// * `bool` - True if the signature is valid
#[allow(clippy::too_many_arguments)]
pub fn pss_verify<P: RegisterPort, Q: RegisterPort>(
    pka: &mut Pka<'_, '_, P>,
    sha: &mut HashEngine<'_, '_, Q>,
    key: &RsaKey,
    signature: &[u8],
    sig_order: Endianness,
    m_hash: &[u8],
    algorithm: ShaAlgorithm,
    salt_len: usize,
) -> SeResult<bool> {
    let hash_len = algorithm.digest_size();
    if signature.len() != key.len() {
        return Err(SeError::DRIVER_RSA_SIGNATURE_SIZE);
    }
    if m_hash.len() != hash_len {
        return Err(SeError::DRIVER_RSA_PSS_HASH_SIZE);
    }
    let Some(layout) = PssLayout::new(key, hash_len, salt_len) else {
        log::debug!("salt of {} bytes does not fit the key", salt_len);
        return Ok(false);
    };

    let mut sig = RsaInt::from_bytes(signature)?;
    if sig_order == Endianness::Little {
        sig.reverse();
    }
    if !sig.is_below(&key.modulus)? {
        return Ok(false);
    }

    let m = rsa_public(pka, key, &sig)?;
    let k = key.len();
    let (prefix, em) = m.as_bytes().split_at(k - layout.em_len);
    let mut valid = prefix.iter().all(|b| *b == 0);

    valid &= em[layout.em_len - 1] == PSS_TRAILER;
    let (masked_db, rest) = em.split_at(layout.db_len);
    let h = &rest[..hash_len];
    valid &= masked_db[0] & !layout.top_mask() == 0;

    let mut db = [0u8; RsaInt::CAPACITY];
    let db = &mut db[..layout.db_len];
    mgf1(sha, algorithm, h, db)?;
    for (d, m) in db.iter_mut().zip(masked_db) {
        *d ^= *m;
    }
    db[0] &= layout.top_mask();

    let ps_len = layout.db_len - salt_len - 1;
    valid &= db[..ps_len].iter().fold(0u8, |acc, b| acc | *b) == 0;
    valid &= db[ps_len] == 0x01;
    let salt = &db[ps_len + 1..];

    let h_prime = pss_hash(sha, algorithm, m_hash, salt)?;
    valid &= bytes_eq(h_prime.as_bytes(), h);
    db.fill(0);

    log::debug!("PSS signature verification: {}", valid);
    Ok(valid)
}

/// Produce an RSASSA-PSS signature with the private exponent of `key`.
///
/// # Arguments
///
/// * `pka` - PKA driver
/// * `sha` - Hash engine driver
/// * `key` - Key with a private exponent
/// * `m_hash` - Message hash
/// * `algorithm` - Hash algorithm
/// * `salt` - Salt
///
/// # Returns
///
/// * `RsaInt` - Big-endian signature, as long as the modulus
pub fn pss_sign<P: RegisterPort, Q: RegisterPort>(
    pka: &mut Pka<'_, '_, P>,
    sha: &mut HashEngine<'_, '_, Q>,
    key: &RsaKey,
    m_hash: &[u8],
    algorithm: ShaAlgorithm,
    salt: &[u8],
) -> SeResult<RsaInt> {
    let hash_len = algorithm.digest_size();
    if !key.has_private_exponent() {
        return Err(SeError::DRIVER_RSA_MISSING_PRIVATE_EXPONENT);
    }
    if m_hash.len() != hash_len {
        return Err(SeError::DRIVER_RSA_PSS_HASH_SIZE);
    }
    let layout =
        PssLayout::new(key, hash_len, salt.len()).ok_or(SeError::DRIVER_RSA_PSS_ENCODING_ERROR)?;

    let h = pss_hash(sha, algorithm, m_hash, salt)?;

    // EM = maskedDB || H || 0xbc, right-aligned in a modulus sized buffer.
    let k = key.len();
    let mut buf = [0u8; RsaInt::CAPACITY];
    let em = &mut buf[k - layout.em_len..k];
    let (db, rest) = em.split_at_mut(layout.db_len);
    mgf1(sha, algorithm, h.as_bytes(), db)?;
    let ps_len = layout.db_len - salt.len() - 1;
    db[ps_len] ^= 0x01;
    for (d, s) in db[ps_len + 1..].iter_mut().zip(salt) {
        *d ^= *s;
    }
    db[0] &= layout.top_mask();
    rest[..hash_len].copy_from_slice(h.as_bytes());
    rest[hash_len] = PSS_TRAILER;

    let m = RsaInt::from_bytes(&buf[..k])?;
    rsa_private(pka, key, &m)
}
