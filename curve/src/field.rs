use core::fmt::{Debug, Display};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::codec::TextReader;
use crate::error::DeserializeError;

/// Field arithmetic consumed by the curve layer.
///
/// `Display` must produce the text read back by [`Field::read_text`]: a
/// sequence of whitespace-separated tokens with no leading or trailing
/// whitespace.
pub trait Field:
    Sized
    + Copy
    + Debug
    + Display
    + PartialEq
    + Eq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
{
    const ZERO: Self;
    const ONE: Self;

    fn is_zero(&self) -> bool;

    fn square(&self) -> Self;

    #[inline]
    fn double(&self) -> Self {
        *self + *self
    }

    /// Multiplicative inverse, `None` for zero.
    fn inverse(&self) -> Option<Self>;

    /// Raise to the power of the base-field characteristic.
    fn frobenius_map(&self) -> Self;

    /// Variable-time exponentiation by little-endian limbs.
    fn pow_vartime(&self, exp: &[u64]) -> Self {
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

    /// Read one element from a token stream.
    fn read_text(reader: &mut TextReader<'_>) -> Result<Self, DeserializeError>;
}
