//! Quadratic extension Fq2 = Fq[u] / (u^2 + 1).
//!
//! q ≡ 3 (mod 4), so -1 is a non-residue and u^q = -u. Elements are written
//! `c0 + c1*u`.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::basefield::Fq;
use crate::codec::{parse_complete, TextReader};
use crate::error::DeserializeError;
use crate::field::Field;

#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fq2 {
    pub c0: Fq,
    pub c1: Fq,
}

impl Fq2 {
    pub const ZERO: Self = Fq2 {
        c0: Fq::ZERO,
        c1: Fq::ZERO,
    };

    pub const ONE: Self = Fq2 {
        c0: Fq::ONE,
        c1: Fq::ZERO,
    };

    #[inline]
    pub const fn new(c0: Fq, c1: Fq) -> Self {
        Fq2 { c0, c1 }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    /// Multiply both components by a base field element.
    #[inline]
    pub fn mul_by_fq(&self, a: Fq) -> Self {
        Fq2::new(self.c0 * a, self.c1 * a)
    }

    /// (c0 + c1*u)^2 = (c0 + c1)(c0 - c1) + 2*c0*c1*u
    #[inline]
    pub fn square(&self) -> Self {
        let t = self.c0 * self.c1;
        Fq2::new((self.c0 + self.c1) * (self.c0 - self.c1), t.double())
    }

    /// 1 / (c0 + c1*u) = (c0 - c1*u) / (c0^2 + c1^2)
    pub fn inverse(&self) -> Option<Self> {
        let norm_inv = (self.c0.square() + self.c1.square()).inverse()?;
        Some(Fq2::new(self.c0 * norm_inv, -(self.c1 * norm_inv)))
    }

    /// x^q, which is conjugation.
    #[inline]
    pub fn frobenius_map(&self) -> Self {
        Fq2::new(self.c0, -self.c1)
    }
}

impl From<Fq> for Fq2 {
    fn from(c0: Fq) -> Self {
        Fq2::new(c0, Fq::ZERO)
    }
}

impl Field for Fq2 {
    const ZERO: Self = Fq2::new(Fq::ZERO, Fq::ZERO);
    const ONE: Self = Fq2::new(Fq::ONE, Fq::ZERO);

    #[inline]
    fn is_zero(&self) -> bool {
        Fq2::is_zero(self)
    }

    #[inline]
    fn square(&self) -> Self {
        Fq2::square(self)
    }

    fn inverse(&self) -> Option<Self> {
        Fq2::inverse(self)
    }

    #[inline]
    fn frobenius_map(&self) -> Self {
        Fq2::frobenius_map(self)
    }

    fn read_text(reader: &mut TextReader<'_>) -> Result<Self, DeserializeError> {
        let c0 = Fq::read_text(reader)?;
        let c1 = Fq::read_text(reader)?;
        Ok(Fq2::new(c0, c1))
    }
}

impl Add for Fq2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Fq2::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl AddAssign for Fq2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fq2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Fq2::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl SubAssign for Fq2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fq2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Fq2::new(-self.c0, -self.c1)
    }
}

impl Mul for Fq2 {
    type Output = Self;

    /// Karatsuba: three base field multiplications.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let v0 = self.c0 * rhs.c0;
        let v1 = self.c1 * rhs.c1;
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - v0 - v1;
        Fq2::new(v0 - v1, c1)
    }
}

impl MulAssign for Fq2 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// `c0 c1`
impl Display for Fq2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.c0, self.c1)
    }
}

impl Debug for Fq2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fq2({} + {}*u)", self.c0, self.c1)
    }
}

impl FromStr for Fq2 {
    type Err = DeserializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete(s, |reader| Self::read_text(reader))
    }
}
