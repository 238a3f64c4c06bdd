/*++

Licensed under the Apache-2.0 license.

File Name:

    weierstrass.rs

Abstract:

    File contains affine point arithmetic on short Weierstrass curves
    y^2 = x^3 + ax + b over a prime field, as performed by the emulated EC
    point unit.

--*/

use num_bigint::BigUint;
use num_traits::Zero;

/// Affine point or the point at infinity
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AffinePoint {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

/// Curve parameters
#[derive(Debug, Clone)]
pub struct WeierstrassCurve {
    pub p: BigUint,
    pub a: BigUint,
    pub b: BigUint,
}

impl WeierstrassCurve {
    pub fn new(p: BigUint, a: BigUint, b: BigUint) -> Self {
        Self { p, a, b }
    }

    fn sub(&self, x: &BigUint, y: &BigUint) -> BigUint {
        ((x % &self.p) + &self.p - (y % &self.p)) % &self.p
    }

    fn div(&self, num: &BigUint, den: &BigUint) -> Option<BigUint> {
        let inv = (den % &self.p).modinv(&self.p)?;
        Some((num * inv) % &self.p)
    }

    /// Returns true if `point` is a valid affine point of the curve.
    pub fn is_on_curve(&self, point: &AffinePoint) -> bool {
        match point {
            AffinePoint::Infinity => false,
            AffinePoint::Affine { x, y } => {
                if self.p.is_zero() || x >= &self.p || y >= &self.p {
                    return false;
                }
                let lhs = (y * y) % &self.p;
                let rhs = (x * x * x + &self.a * x + &self.b) % &self.p;
                lhs == rhs
            }
        }
    }

    pub fn double(&self, point: &AffinePoint) -> AffinePoint {
        let (x, y) = match point {
            AffinePoint::Infinity => return AffinePoint::Infinity,
            AffinePoint::Affine { x, y } => (x, y),
        };
        if (y % &self.p).is_zero() {
            return AffinePoint::Infinity;
        }
        let three = BigUint::from(3u32);
        let num = (&three * x * x + &self.a) % &self.p;
        let den = (BigUint::from(2u32) * y) % &self.p;
        let lambda = match self.div(&num, &den) {
            Some(lambda) => lambda,
            None => return AffinePoint::Infinity,
        };
        let x3 = self.sub(&(&lambda * &lambda), &(BigUint::from(2u32) * x));
        let y3 = self.sub(&(&lambda * self.sub(x, &x3)), y);
        AffinePoint::Affine { x: x3, y: y3 }
    }

    pub fn add(&self, lhs: &AffinePoint, rhs: &AffinePoint) -> AffinePoint {
        let ((x1, y1), (x2, y2)) = match (lhs, rhs) {
            (AffinePoint::Infinity, _) => return rhs.clone(),
            (_, AffinePoint::Infinity) => return lhs.clone(),
            (AffinePoint::Affine { x: x1, y: y1 }, AffinePoint::Affine { x: x2, y: y2 }) => {
                ((x1, y1), (x2, y2))
            }
        };
        if (x1 % &self.p) == (x2 % &self.p) {
            if ((y1 + y2) % &self.p).is_zero() {
                return AffinePoint::Infinity;
            }
            return self.double(lhs);
        }
        let lambda = match self.div(&self.sub(y2, y1), &self.sub(x2, x1)) {
            Some(lambda) => lambda,
            None => return AffinePoint::Infinity,
        };
        let x3 = self.sub(&self.sub(&(&lambda * &lambda), x1), x2);
        let y3 = self.sub(&(&lambda * self.sub(x1, &x3)), y1);
        AffinePoint::Affine { x: x3, y: y3 }
    }

    /// k * point, by double-and-add from the most significant bit
    pub fn multiply(&self, k: &BigUint, point: &AffinePoint) -> AffinePoint {
        let mut acc = AffinePoint::Infinity;
        for bit in (0..k.bits()).rev() {
            acc = self.double(&acc);
            if k.bit(bit) {
                acc = self.add(&acc, point);
            }
        }
        acc
    }

    /// k1 * p1 + k2 * p2 with a single interleaved doubling chain
    pub fn shamir(
        &self,
        k1: &BigUint,
        p1: &AffinePoint,
        k2: &BigUint,
        p2: &AffinePoint,
    ) -> AffinePoint {
        let sum = self.add(p1, p2);
        let bits = k1.bits().max(k2.bits());
        let mut acc = AffinePoint::Infinity;
        for bit in (0..bits).rev() {
            acc = self.double(&acc);
            match (k1.bit(bit), k2.bit(bit)) {
                (true, true) => acc = self.add(&acc, &sum),
                (true, false) => acc = self.add(&acc, p1),
                (false, true) => acc = self.add(&acc, p2),
                (false, false) => {}
            }
        }
        acc
    }
}

impl AffinePoint {
    pub fn is_infinity(&self) -> bool {
        matches!(self, AffinePoint::Infinity)
    }
}
