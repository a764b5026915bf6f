use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use num_bigint::BigUint;

/// Unsigned integers usable as multipliers of group elements.
pub trait ScalarBits {
    /// Little-endian 64-bit limbs of the value.
    fn to_u64_limbs(&self) -> Vec<u64>;
}

impl ScalarBits for BigUint {
    fn to_u64_limbs(&self) -> Vec<u64> {
        self.to_u64_digits()
    }
}

impl ScalarBits for u64 {
    fn to_u64_limbs(&self) -> Vec<u64> {
        vec![*self]
    }
}

pub trait Group:
    Sized
    + Copy
    + PartialEq
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Neg<Output = Self>
{
    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator() -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    /// An equal element in whatever form makes [`Group::add_normalized`] cheapest.
    #[inline]
    fn normalize(&self) -> Self {
        *self
    }

    /// Add an element produced by [`Group::normalize`].
    #[inline]
    fn add_normalized(&self, other: &Self) -> Self {
        *self + *other
    }

    fn batch_normalize(points: &mut [Self]) {
        for point in points.iter_mut() {
            *point = point.normalize();
        }
    }

    /// Double-and-add, most significant bit first.
    fn scalar_mul<S: ScalarBits + ?Sized>(&self, scalar: &S) -> Self {
        let limbs = scalar.to_u64_limbs();
        let base = self.normalize();
        let mut result = Self::identity();

        for &limb in limbs.iter().rev() {
            for shift in (0..64).rev() {
                result = result.double();
                if (limb >> shift) & 1 == 1 {
                    result = result.add_normalized(&base);
                }
            }
        }

        result
    }

    /// Fixed 4-bit window, table normalized in one batch.
    fn scalar_mul_windowed<S: ScalarBits + ?Sized>(&self, scalar: &S) -> Self {
        if self.is_identity() {
            return Self::identity();
        }

        let mut table = [Self::identity(); 16];
        table[1] = *self;

        for i in 2..16 {
            table[i] = if i % 2 == 0 {
                table[i / 2].double()
            } else {
                table[i - 1] + table[1]
            };
        }
        Self::batch_normalize(&mut table);

        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();

        for &limb in scalar_limbs.iter().rev() {
            for shift in (0..64).step_by(4).rev() {
                result = result.double();
                result = result.double();
                result = result.double();
                result = result.double();

                let window = ((limb >> shift) & 0xF) as usize;
                if window != 0 {
                    result = result.add_normalized(&table[window]);
                }
            }
        }

        result
    }

    /// Sum of `scalars[i] * points[i]`.
    fn multi_scalar_mul<S: ScalarBits>(points: &[Self], scalars: &[S]) -> Self {
        assert_eq!(
            points.len(),
            scalars.len(),
            "Points and scalars must have same length"
        );

        let mut result = Self::identity();
        for (point, scalar) in points.iter().zip(scalars.iter()) {
            result = result + point.scalar_mul(scalar);
        }
        result
    }
}
