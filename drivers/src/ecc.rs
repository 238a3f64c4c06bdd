/*++

Licensed under the Apache-2.0 license.

File Name:

    ecc.rs

Abstract:

    File contains the curve table and the point and signature types shared
    by the EC drivers.

--*/

use crate::{EcInt, Endianness, SeError, SeResult};
use bitflags::bitflags;
use hex_literal::hex;

/// Curve identifier
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CurveId {
    P192,
    P256,
    P384,
    P521,
    Secp256k1,
    BrainpoolP224r1,

    /// Not a short Weierstrass curve; not supported by the PKA point unit
    Curve25519,

    /// Not a short Weierstrass curve; not supported by the PKA point unit
    Ed25519,
}

/// Short Weierstrass curve y^2 = x^3 + ax + b over GF(p)
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EcCurve {
    pub id: CurveId,

    /// Width in bytes of coordinates and scalars
    pub len: usize,

    /// Field prime
    pub p: EcInt,

    /// Order of the generator
    pub n: EcInt,

    pub a: EcInt,
    pub b: EcInt,
    pub gx: EcInt,
    pub gy: EcInt,
}

impl EcCurve {
    /// Look up the parameters of `id`.
    pub fn get(id: CurveId) -> SeResult<&'static EcCurve> {
        match id {
            CurveId::P192 => Ok(&P192),
            CurveId::P256 => Ok(&P256),
            CurveId::P384 => Ok(&P384),
            CurveId::P521 => Ok(&P521),
            CurveId::Secp256k1 => Ok(&SECP256K1),
            CurveId::BrainpoolP224r1 => Ok(&BRAINPOOL_P224R1),
            CurveId::Curve25519 | CurveId::Ed25519 => Err(SeError::DRIVER_PKA_UNSUPPORTED_CURVE),
        }
    }

    /// Base point
    pub fn generator(&self) -> EcPoint {
        EcPoint::new(self.gx, self.gy)
    }

    /// Bit length of the order
    pub fn order_bits(&self) -> usize {
        self.n.bit_len()
    }
}

bitflags! {
    /// Encoding flags of a point
    pub struct EcPointFlags: u32 {
        /// The point at infinity; coordinates are ignored
        const INFINITY = 1 << 0;

        /// Coordinates are stored least significant byte first
        const LITTLE_ENDIAN = 1 << 1;
    }
}

bitflags! {
    /// Encoding flags of a signature
    pub struct SignatureFlags: u32 {
        /// r and s are stored least significant byte first
        const LITTLE_ENDIAN = 1 << 0;
    }
}

/// Point on a curve
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EcPoint {
    pub x: EcInt,
    pub y: EcInt,
    pub flags: EcPointFlags,
}

impl EcPoint {
    /// Finite point from big-endian coordinates
    pub fn new(x: EcInt, y: EcInt) -> Self {
        Self {
            x,
            y,
            flags: EcPointFlags::empty(),
        }
    }

    /// The point at infinity for a curve of width `len`
    pub fn infinity(len: usize) -> SeResult<Self> {
        Ok(Self {
            x: EcInt::zero(len)?,
            y: EcInt::zero(len)?,
            flags: EcPointFlags::INFINITY,
        })
    }

    /// Finite point from encoded coordinates of equal width
    ///
    /// # Arguments
    ///
    /// * `x` - x coordinate
    /// * `y` - y coordinate
    /// * `endianness` - Byte order of both coordinates
    pub fn from_bytes(x: &[u8], y: &[u8], endianness: Endianness) -> SeResult<Self> {
        if x.len() != y.len() {
            return Err(SeError::DRIVER_PKA_OPERAND_SIZE_MISMATCH);
        }
        let mut point = Self::new(EcInt::from_bytes(x)?, EcInt::from_bytes(y)?);
        if endianness == Endianness::Little {
            point.flags.insert(EcPointFlags::LITTLE_ENDIAN);
        }
        Ok(point)
    }

    pub fn is_infinity(&self) -> bool {
        self.flags.contains(EcPointFlags::INFINITY)
    }

    pub fn endianness(&self) -> Endianness {
        if self.flags.contains(EcPointFlags::LITTLE_ENDIAN) {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    /// Copy with big-endian coordinates
    pub fn to_big_endian(&self) -> Self {
        if self.endianness() == Endianness::Big {
            return *self;
        }
        let mut point = Self {
            x: self.x.reversed(),
            y: self.y.reversed(),
            flags: self.flags,
        };
        point.flags.remove(EcPointFlags::LITTLE_ENDIAN);
        point
    }

    /// Copy with little-endian coordinates
    pub fn to_little_endian(&self) -> Self {
        if self.endianness() == Endianness::Little {
            return *self;
        }
        let mut point = Self {
            x: self.x.reversed(),
            y: self.y.reversed(),
            flags: self.flags,
        };
        point.flags.insert(EcPointFlags::LITTLE_ENDIAN);
        point
    }
}

/// ECDSA signature
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EcdsaSignature {
    pub r: EcInt,
    pub s: EcInt,
    pub flags: SignatureFlags,
}

impl EcdsaSignature {
    /// Signature from big-endian components
    pub fn new(r: EcInt, s: EcInt) -> Self {
        Self {
            r,
            s,
            flags: SignatureFlags::empty(),
        }
    }

    /// Copy with big-endian components
    pub fn to_big_endian(&self) -> Self {
        if !self.flags.contains(SignatureFlags::LITTLE_ENDIAN) {
            return *self;
        }
        Self::new(self.r.reversed(), self.s.reversed())
    }

    /// Copy with little-endian components
    pub fn to_little_endian(&self) -> Self {
        if self.flags.contains(SignatureFlags::LITTLE_ENDIAN) {
            return *self;
        }
        Self {
            r: self.r.reversed(),
            s: self.s.reversed(),
            flags: SignatureFlags::LITTLE_ENDIAN,
        }
    }
}

/// NIST P-192
pub const P192: EcCurve = EcCurve {
    id: CurveId::P192,
    len: 24,
    p: EcInt::from_be_const(&hex!("fffffffffffffffffffffffffffffffeffffffffffffffff")),
    n: EcInt::from_be_const(&hex!("ffffffffffffffffffffffff99def836146bc9b1b4d22831")),
    a: EcInt::from_be_const(&hex!("fffffffffffffffffffffffffffffffefffffffffffffffc")),
    b: EcInt::from_be_const(&hex!("64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1")),
    gx: EcInt::from_be_const(&hex!("188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012")),
    gy: EcInt::from_be_const(&hex!("07192b95ffc8da78631011ed6b24cdd573f977a11e794811")),
};

/// NIST P-256
pub const P256: EcCurve = EcCurve {
    id: CurveId::P256,
    len: 32,
    p: EcInt::from_be_const(&hex!("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff")),
    n: EcInt::from_be_const(&hex!("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")),
    a: EcInt::from_be_const(&hex!("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc")),
    b: EcInt::from_be_const(&hex!("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b")),
    gx: EcInt::from_be_const(&hex!("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296")),
    gy: EcInt::from_be_const(&hex!("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5")),
};

/// NIST P-384
pub const P384: EcCurve = EcCurve {
    id: CurveId::P384,
    len: 48,
    p: EcInt::from_be_const(&hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff")),
    n: EcInt::from_be_const(&hex!("ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973")),
    a: EcInt::from_be_const(&hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000fffffffc")),
    b: EcInt::from_be_const(&hex!("b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef")),
    gx: EcInt::from_be_const(&hex!("aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7")),
    gy: EcInt::from_be_const(&hex!("3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f")),
};

/// NIST P-521
pub const P521: EcCurve = EcCurve {
    id: CurveId::P521,
    len: 66,
    p: EcInt::from_be_const(&hex!("01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")),
    n: EcInt::from_be_const(&hex!("01fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409")),
    a: EcInt::from_be_const(&hex!("01fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffc")),
    b: EcInt::from_be_const(&hex!("0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00")),
    gx: EcInt::from_be_const(&hex!("00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66")),
    gy: EcInt::from_be_const(&hex!("011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650")),
};

/// secp256k1
pub const SECP256K1: EcCurve = EcCurve {
    id: CurveId::Secp256k1,
    len: 32,
    p: EcInt::from_be_const(&hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f")),
    n: EcInt::from_be_const(&hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")),
    a: EcInt::from_be_const(&hex!("0000000000000000000000000000000000000000000000000000000000000000")),
    b: EcInt::from_be_const(&hex!("0000000000000000000000000000000000000000000000000000000000000007")),
    gx: EcInt::from_be_const(&hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")),
    gy: EcInt::from_be_const(&hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8")),
};

/// brainpoolP224r1
pub const BRAINPOOL_P224R1: EcCurve = EcCurve {
    id: CurveId::BrainpoolP224r1,
    len: 28,
    p: EcInt::from_be_const(&hex!("d7c134aa264366862a18302575d1d787b09f075797da89f57ec8c0ff")),
    n: EcInt::from_be_const(&hex!("d7c134aa264366862a18302575d0fb98d116bc4b6ddebca3a5a7939f")),
    a: EcInt::from_be_const(&hex!("68a5e62ca9ce6c1c299803a6c1530b514e182ad8b0042a59cad29f43")),
    b: EcInt::from_be_const(&hex!("2580f63ccfe44138870713b1a92369e33e2135d266dbb372386c400b")),
    gx: EcInt::from_be_const(&hex!("0d9029ad2c7e5cf4340823b2a87dc68c9e4ce3174c1e6efdee12c07d")),
    gy: EcInt::from_be_const(&hex!("58aa56f772c0726f24c6b89e4ecdac24354b9e99caa3f6d3761402cd")),
};
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_widths() {
        for (id, len, bits) in [
            (CurveId::P192, 24, 192),
            (CurveId::P256, 32, 256),
            (CurveId::P384, 48, 384),
            (CurveId::P521, 66, 521),
            (CurveId::Secp256k1, 32, 256),
            (CurveId::BrainpoolP224r1, 28, 224),
        ] {
            let curve = EcCurve::get(id).unwrap();
            assert_eq!(curve.id, id);
            assert_eq!(curve.len, len);
            assert_eq!(curve.order_bits(), bits);
            for value in [curve.p, curve.n, curve.a, curve.b, curve.gx, curve.gy] {
                assert_eq!(value.len(), len);
            }
            assert!(curve.gx.is_below(&curve.p).unwrap());
            assert!(curve.gy.is_below(&curve.p).unwrap());
        }
    }

    #[test]
    fn test_unsupported_curves() {
        assert_eq!(
            EcCurve::get(CurveId::Curve25519),
            Err(SeError::DRIVER_PKA_UNSUPPORTED_CURVE)
        );
        assert_eq!(
            EcCurve::get(CurveId::Ed25519),
            Err(SeError::DRIVER_PKA_UNSUPPORTED_CURVE)
        );
    }

    #[test]
    fn test_point_byte_order() {
        let point = EcPoint::from_bytes(&[1, 2, 3], &[4, 5, 6], Endianness::Little).unwrap();
        assert_eq!(point.endianness(), Endianness::Little);
        let be = point.to_big_endian();
        assert_eq!(be.x.as_bytes(), &[3, 2, 1]);
        assert_eq!(be.y.as_bytes(), &[6, 5, 4]);
        assert_eq!(be.endianness(), Endianness::Big);
        assert_eq!(be.to_little_endian(), point);
        assert_eq!(be.to_big_endian(), be);

        assert!(EcPoint::from_bytes(&[1, 2], &[3], Endianness::Big).is_err());
    }

    #[test]
    fn test_infinity() {
        let inf = EcPoint::infinity(32).unwrap();
        assert!(inf.is_infinity());
        assert!(inf.x.is_zero() && inf.y.is_zero());
        assert!(!P256.generator().is_infinity());
    }

    #[test]
    fn test_signature_byte_order() {
        let sig = EcdsaSignature::new(
            EcInt::from_be_slice(&[1, 2]).unwrap(),
            EcInt::from_be_slice(&[3, 4]).unwrap(),
        );
        let le = sig.to_little_endian();
        assert_eq!(le.r.as_bytes(), &[2, 1]);
        assert_eq!(le.s.as_bytes(), &[4, 3]);
        assert_eq!(le.to_big_endian(), sig);
    }
}
