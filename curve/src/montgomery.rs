//! Prime fields below 2^255 in Montgomery form.
//!
//! An element is stored as `value * R mod p` with `R = 2^256`, as four
//! little-endian `u64` limbs. Concrete fields provide their constants through
//! [`FieldParams`]; see `basefield` and `scalarfield`.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::{Product, Sum};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use num_bigint::BigUint;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{parse_complete, TextReader};
use crate::error::DeserializeError;
use crate::field::Field;

/// Constants describing a Montgomery prime field.
pub trait FieldParams:
    Copy + Clone + Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// Modulus p, little-endian. Must be below 2^255.
    const MODULUS: [u64; 4];
    /// R = 2^256 mod p.
    const R: [u64; 4];
    /// R^2 = 2^512 mod p.
    const R2: [u64; 4];
    /// -p^{-1} mod 2^64.
    const INV: u64;
}

/// Element of the prime field described by `P`.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct Fp<P: FieldParams> {
    /// Montgomery form: value * R mod p.
    limbs: [u64; 4],
    _params: PhantomData<P>,
}

impl<P: FieldParams> Fp<P> {
    pub const ZERO: Self = Self::from_montgomery_limbs([0, 0, 0, 0]);

    pub const ONE: Self = Self::from_montgomery_limbs(P::R);

    #[inline]
    const fn from_montgomery_limbs(limbs: [u64; 4]) -> Self {
        Fp {
            limbs,
            _params: PhantomData,
        }
    }

    /// Create a field element from a small integer.
    #[inline]
    pub fn from_u64(val: u64) -> Self {
        // val * R^2 * R^{-1} = val * R, reduced mod p
        Self::from_montgomery_limbs(montgomery_mul([val, 0, 0, 0], P::R2, P::MODULUS, P::INV))
    }

    /// Create a field element from canonical little-endian limbs.
    ///
    /// Returns `None` unless `limbs < p`.
    pub fn from_canonical_limbs(limbs: [u64; 4]) -> Option<Self> {
        Self::from_reduced_limbs(limbs)
    }

    #[inline]
    fn from_reduced_limbs(limbs: [u64; 4]) -> Option<Self> {
        if !is_canonical(limbs, P::MODULUS) {
            return None;
        }
        Some(Self::from_montgomery_limbs(montgomery_mul(
            limbs,
            P::R2,
            P::MODULUS,
            P::INV,
        )))
    }

    /// Canonical little-endian limbs of the value.
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 4] {
        montgomery_mul(self.limbs, [1, 0, 0, 0], P::MODULUS, P::INV)
    }

    /// The field modulus.
    pub fn modulus() -> BigUint {
        limbs_to_biguint(P::MODULUS)
    }

    /// Convert an integer into the field. Returns `None` unless `value < p`.
    pub fn from_biguint(value: &BigUint) -> Option<Self> {
        let digits = value.to_u64_digits();
        if digits.len() > 4 {
            return None;
        }
        let mut limbs = [0u64; 4];
        limbs[..digits.len()].copy_from_slice(&digits);
        Self::from_reduced_limbs(limbs)
    }

    /// The canonical integer value.
    pub fn to_biguint(&self) -> BigUint {
        limbs_to_biguint(self.to_canonical_limbs())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0, 0, 0, 0]
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Multiplicative inverse via Fermat's little theorem: a^{-1} = a^{p-2}.
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let exp = sub_mod_raw(P::MODULUS, [2, 0, 0, 0]);
        Some(self.pow_vartime(&exp))
    }

    /// Variable-time exponentiation by little-endian limbs.
    pub fn pow_vartime(&self, exp: &[u64]) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;

        for &limb in exp {
            let mut remaining = limb;
            for _ in 0..64 {
                if remaining & 1 == 1 {
                    result *= base;
                }
                base = base.square();
                remaining >>= 1;
            }
        }

        result
    }
}

fn limbs_to_biguint(limbs: [u64; 4]) -> BigUint {
    let mut bytes = Vec::with_capacity(32);
    for limb in limbs {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }
    BigUint::from_bytes_le(&bytes)
}

/// Add two reduced values mod m.
#[inline]
const fn add_mod(a: [u64; 4], b: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);

    let (s0, borrow) = r0.overflowing_sub(m[0]);
    let (s1, borrow) = borrowing_sub(r1, m[1], borrow);
    let (s2, borrow) = borrowing_sub(r2, m[2], borrow);
    let (s3, borrow) = borrowing_sub(r3, m[3], borrow);

    if carry || !borrow {
        [s0, s1, s2, s3]
    } else {
        [r0, r1, r2, r3]
    }
}

/// Subtract two reduced values mod m.
#[inline]
const fn sub_mod(a: [u64; 4], b: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);

    if borrow {
        let (r0, carry) = r0.overflowing_add(m[0]);
        let (r1, carry) = carrying_add(r1, m[1], carry);
        let (r2, carry) = carrying_add(r2, m[2], carry);
        let (r3, _) = carrying_add(r3, m[3], carry);
        [r0, r1, r2, r3]
    } else {
        [r0, r1, r2, r3]
    }
}

/// Plain 256-bit subtraction, caller guarantees a >= b.
#[inline]
const fn sub_mod_raw(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, _) = borrowing_sub(a[3], b[3], borrow);
    [r0, r1, r2, r3]
}

#[inline]
const fn neg_mod(a: [u64; 4], m: [u64; 4]) -> [u64; 4] {
    if a[0] == 0 && a[1] == 0 && a[2] == 0 && a[3] == 0 {
        return [0, 0, 0, 0];
    }
    sub_mod(m, a, m)
}

/// True when `limbs < m`.
#[inline]
const fn is_canonical(limbs: [u64; 4], m: [u64; 4]) -> bool {
    let (_, borrow) = limbs[0].overflowing_sub(m[0]);
    let (_, borrow) = borrowing_sub(limbs[1], m[1], borrow);
    let (_, borrow) = borrowing_sub(limbs[2], m[2], borrow);
    let (_, borrow) = borrowing_sub(limbs[3], m[3], borrow);
    borrow
}

#[inline]
const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

#[inline]
const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// Montgomery multiplication: (a * b * R^{-1}) mod m.
#[inline]
fn montgomery_mul(a: [u64; 4], b: [u64; 4], m: [u64; 4], inv: u64) -> [u64; 4] {
    let mut t = [0u64; 8];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    for i in 0..4 {
        let k = t[i].wrapping_mul(inv);
        let mut carry = 0u128;

        for j in 0..4 {
            let product = (k as u128) * (m[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for j in 4..8 - i {
            let sum = (t[i + j] as u128) + carry;
            t[i + j] = sum as u64;
            carry = sum >> 64;
        }
    }

    let result = [t[4], t[5], t[6], t[7]];
    if is_canonical(result, m) {
        result
    } else {
        sub_mod_raw(result, m)
    }
}

impl<P: FieldParams> Field for Fp<P> {
    const ZERO: Self = Self::from_montgomery_limbs([0, 0, 0, 0]);
    const ONE: Self = Self::from_montgomery_limbs(P::R);

    #[inline]
    fn is_zero(&self) -> bool {
        Fp::is_zero(self)
    }

    #[inline]
    fn square(&self) -> Self {
        Fp::square(self)
    }

    fn inverse(&self) -> Option<Self> {
        Fp::inverse(self)
    }

    /// The Frobenius map is the identity on a prime field.
    #[inline]
    fn frobenius_map(&self) -> Self {
        *self
    }

    fn pow_vartime(&self, exp: &[u64]) -> Self {
        Fp::pow_vartime(self, exp)
    }

    fn read_text(reader: &mut TextReader<'_>) -> Result<Self, DeserializeError> {
        let value = reader.read_integer()?;
        Self::from_biguint(&value).ok_or_else(|| DeserializeError::OutOfRange(value.to_string()))
    }
}

impl<P: FieldParams> Distribution<Fp<P>> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp<P> {
        let top_mask = u64::MAX >> P::MODULUS[3].leading_zeros();
        loop {
            let limbs = [
                rng.random::<u64>(),
                rng.random::<u64>(),
                rng.random::<u64>(),
                rng.random::<u64>() & top_mask,
            ];

            if let Some(element) = Fp::from_reduced_limbs(limbs) {
                return element;
            }
        }
    }
}

impl<P: FieldParams> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_montgomery_limbs(add_mod(self.limbs, rhs.limbs, P::MODULUS))
    }
}

impl<P: FieldParams> AddAssign for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FieldParams> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_montgomery_limbs(sub_mod(self.limbs, rhs.limbs, P::MODULUS))
    }
}

impl<P: FieldParams> SubAssign for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FieldParams> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_montgomery_limbs(neg_mod(self.limbs, P::MODULUS))
    }
}

impl<P: FieldParams> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_montgomery_limbs(montgomery_mul(self.limbs, rhs.limbs, P::MODULUS, P::INV))
    }
}

impl<P: FieldParams> MulAssign for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: FieldParams> Sum for Fp<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<P: FieldParams> Product for Fp<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<P: FieldParams> Hash for Fp<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}

/// Canonical decimal value.
impl<P: FieldParams> Display for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl<P: FieldParams> Debug for Fp<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({})", self)
    }
}

impl<P: FieldParams> FromStr for Fp<P> {
    type Err = DeserializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete(s, |reader| Self::read_text(reader))
    }
}

impl<P: FieldParams> Serialize for Fp<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, P: FieldParams> Deserialize<'de> for Fp<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
