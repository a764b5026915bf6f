use core::fmt::{self, Display, Formatter};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use core::str::FromStr;

use num_bigint::BigUint;
use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{parse_complete, AFFINE_FLAG, IDENTITY_FLAG};
use crate::error::DeserializeError;
use crate::field::Field;
use crate::group::{Group, ScalarBits};
use crate::params::{
    public_params, CurveConfig, G1Config, G2Config, TwistParameters, TwistedCurveConfig,
};
use crate::random::RandomField;
use crate::ScalarField;

/// Point on a short Weierstrass curve y^2 = x^3 + b with a = 0.
///
/// Jacobian (X:Y:Z) represents the affine point (X/Z^2, Y/Z^3). A point held
/// in affine form is "special" and can be the second operand of
/// [`CurvePoint::mixed_add`]. Equality compares the represented points.
#[derive(Copy, Clone, Debug)]
pub struct CurvePoint<C: CurveConfig> {
    repr: Repr<C::Base>,
}

#[derive(Copy, Clone, Debug)]
enum Repr<F> {
    Identity,
    Affine { x: F, y: F },
    /// Z is never zero.
    Jacobian { x: F, y: F, z: F },
}

pub type G1 = CurvePoint<G1Config>;
pub type G2 = CurvePoint<G2Config>;

impl<C: CurveConfig> CurvePoint<C> {
    /// The identity.
    #[inline]
    pub fn zero() -> Self {
        CurvePoint {
            repr: Repr::Identity,
        }
    }

    /// The configured generator.
    ///
    /// # Panics
    ///
    /// Panics if the public parameters have not been initialized.
    #[inline]
    pub fn one() -> Self {
        C::group(public_params()).generator()
    }

    /// Affine point from coordinates, without checking the curve equation.
    #[inline]
    pub fn from_affine(x: C::Base, y: C::Base) -> Self {
        CurvePoint {
            repr: Repr::Affine { x, y },
        }
    }

    /// Affine point from coordinates that must satisfy the curve equation.
    pub fn from_affine_checked(x: C::Base, y: C::Base) -> Result<Self, DeserializeError> {
        let point = Self::from_affine(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(DeserializeError::NotOnCurve)
        }
    }

    /// Jacobian point; `z = 0` gives the identity.
    #[inline]
    pub fn from_jacobian(x: C::Base, y: C::Base, z: C::Base) -> Self {
        if z.is_zero() {
            Self::zero()
        } else {
            CurvePoint {
                repr: Repr::Jacobian { x, y, z },
            }
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Identity)
    }

    /// True for the identity and for points held in affine form.
    #[inline]
    pub fn is_special(&self) -> bool {
        !matches!(self.repr, Repr::Jacobian { .. })
    }

    /// Affine coordinates, `None` for the identity.
    pub fn affine_coordinates(&self) -> Option<(C::Base, C::Base)> {
        match self.special().repr {
            Repr::Affine { x, y } => Some((x, y)),
            _ => None,
        }
    }

    /// Jacobian coordinates, with Z = 1 for affine points. `None` for the identity.
    #[inline]
    pub fn jacobian_coordinates(&self) -> Option<(C::Base, C::Base, C::Base)> {
        match self.repr {
            Repr::Identity => None,
            Repr::Affine { x, y } => Some((x, y, <C::Base as Field>::ONE)),
            Repr::Jacobian { x, y, z } => Some((x, y, z)),
        }
    }

    /// Normalize to affine form in place.
    pub fn to_special(&mut self) {
        if let Repr::Jacobian { x, y, z } = self.repr {
            self.repr = match z.inverse() {
                Some(z_inv) => {
                    let z_inv2 = z_inv.square();
                    Repr::Affine {
                        x: x * z_inv2,
                        y: y * z_inv2 * z_inv,
                    }
                }
                None => Repr::Identity,
            };
        }
    }

    #[inline]
    pub fn special(mut self) -> Self {
        self.to_special();
        self
    }

    /// Normalize every point with one field inversion.
    pub fn batch_to_special(points: &mut [Self]) {
        let mut prefix = Vec::with_capacity(points.len());
        let mut acc = <C::Base as Field>::ONE;
        for point in points.iter() {
            if let Repr::Jacobian { z, .. } = point.repr {
                prefix.push(acc);
                acc *= z;
            }
        }

        let Some(mut acc_inv) = acc.inverse() else {
            return;
        };

        for point in points.iter_mut().rev() {
            if let Repr::Jacobian { x, y, z } = point.repr {
                let Some(before) = prefix.pop() else {
                    return;
                };
                let z_inv = acc_inv * before;
                acc_inv *= z;

                let z_inv2 = z_inv.square();
                point.repr = Repr::Affine {
                    x: x * z_inv2,
                    y: y * z_inv2 * z_inv,
                };
            }
        }
    }

    pub fn negate(self) -> Self {
        let repr = match self.repr {
            Repr::Identity => Repr::Identity,
            Repr::Affine { x, y } => Repr::Affine { x, y: -y },
            Repr::Jacobian { x, y, z } => Repr::Jacobian { x, y: -y, z },
        };
        CurvePoint { repr }
    }

    /// dbl-2009-l.
    pub fn dbl(self) -> Self {
        let (x, y, z) = match self.jacobian_coordinates() {
            None => return self,
            Some(coords) => coords,
        };
        if y.is_zero() {
            return Self::zero();
        }

        let a = x.square();
        let b = y.square();
        let c = b.square();
        let d = ((x + b).square() - a - c).double();
        let e = a.double() + a;

        let x3 = e.square() - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = (y * z).double();

        Self::from_jacobian(x3, y3, z3)
    }

    /// add-2007-bl. Equal operands are handed to [`CurvePoint::dbl`].
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Self) -> Self {
        let (x1, y1, z1) = match self.jacobian_coordinates() {
            None => return other,
            Some(coords) => coords,
        };
        let (x2, y2, z2) = match other.jacobian_coordinates() {
            None => return self,
            Some(coords) => coords,
        };

        let z1z1 = z1.square();
        let z2z2 = z2.square();
        let u1 = x1 * z2z2;
        let u2 = x2 * z1z1;
        let s1 = y1 * z2 * z2z2;
        let s2 = y2 * z1 * z1z1;

        let h = u2 - u1;
        let r = s2 - s1;
        if h.is_zero() {
            return if r.is_zero() { self.dbl() } else { Self::zero() };
        }

        let i = h.double().square();
        let j = h * i;
        let r = r.double();
        let v = u1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((z1 + z2).square() - z1z1 - z2z2) * h;

        Self::from_jacobian(x3, y3, z3)
    }

    /// madd-2007-bl. `other` must be special.
    pub fn mixed_add(self, other: Self) -> Self {
        debug_assert!(other.is_special(), "mixed_add needs a special second operand");

        let (x2, y2) = match other.repr {
            Repr::Identity => return self,
            Repr::Affine { x, y } => (x, y),
            Repr::Jacobian { .. } => return self.add(other),
        };
        let (x1, y1, z1) = match self.jacobian_coordinates() {
            None => return other,
            Some(coords) => coords,
        };

        let z1z1 = z1.square();
        let u2 = x2 * z1z1;
        let s2 = y2 * z1 * z1z1;

        let h = u2 - x1;
        let r = s2 - y1;
        if h.is_zero() {
            return if r.is_zero() { self.dbl() } else { Self::zero() };
        }

        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = r.double();
        let v = x1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (y1 * j).double();
        let z3 = (z1 + h).square() - z1z1 - hh;

        Self::from_jacobian(x3, y3, z3)
    }

    /// MSB-first double-and-add with mixed additions.
    #[inline]
    pub fn scalar_mul<S: ScalarBits + ?Sized>(self, scalar: &S) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }

    /// Checks the curve equation against the installed parameters.
    pub fn is_on_curve(&self) -> bool {
        C::group(public_params()).is_on_curve(self)
    }

    /// r * self == 0.
    pub fn is_in_subgroup(&self) -> bool {
        self.scalar_mul(Self::order()).is_zero()
    }

    /// The group order r.
    pub fn order() -> &'static BigUint {
        public_params().order()
    }

    /// The base field characteristic q.
    pub fn base_field_char() -> &'static BigUint {
        public_params().base_field_char()
    }

    /// `k * one()` for a uniformly random non-zero `k`. Never the identity.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let k = ScalarField::random(rng);
            if !k.is_zero() {
                return Self::one().scalar_mul(&k);
            }
        }
    }

    /// [`CurvePoint::random`] with the thread-local generator.
    pub fn random_element() -> Self {
        Self::random(&mut rand::rng())
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Parse exactly one point. Fails on trailing input.
    pub fn from_text(text: &str) -> Result<Self, DeserializeError> {
        parse_complete(text, |reader| reader.read_point())
    }
}

impl<C: TwistedCurveConfig> CurvePoint<C> {
    /// Frobenius endomorphism, equal to `base_field_char() * self`.
    pub fn mul_by_q(self) -> Self {
        self.mul_by_q_with(C::twist(public_params()))
    }

    pub(crate) fn mul_by_q_with(self, twist: &TwistParameters<C::Base>) -> Self {
        let repr = match self.repr {
            Repr::Identity => Repr::Identity,
            Repr::Affine { x, y } => Repr::Affine {
                x: twist.mul_by_q_x() * x.frobenius_map(),
                y: twist.mul_by_q_y() * y.frobenius_map(),
            },
            Repr::Jacobian { x, y, z } => Repr::Jacobian {
                x: twist.mul_by_q_x() * x.frobenius_map(),
                y: twist.mul_by_q_y() * y.frobenius_map(),
                z: z.frobenius_map(),
            },
        };
        CurvePoint { repr }
    }
}

impl<C: CurveConfig> PartialEq for CurvePoint<C> {
    /// X1*Z2^2 == X2*Z1^2 and Y1*Z2^3 == Y2*Z1^3.
    fn eq(&self, other: &Self) -> bool {
        match (self.jacobian_coordinates(), other.jacobian_coordinates()) {
            (None, None) => true,
            (None, Some(_)) | (Some(_), None) => false,
            (Some((x1, y1, z1)), Some((x2, y2, z2))) => {
                let z1z1 = z1.square();
                let z2z2 = z2.square();
                x1 * z2z2 == x2 * z1z1 && y1 * z2 * z2z2 == y2 * z1 * z1z1
            }
        }
    }
}

impl<C: CurveConfig> Eq for CurvePoint<C> {}

impl<C: CurveConfig> Default for CurvePoint<C> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<C: CurveConfig> Group for CurvePoint<C> {
    #[inline]
    fn identity() -> Self {
        Self::zero()
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_zero()
    }

    #[inline]
    fn generator() -> Self {
        Self::one()
    }

    #[inline]
    fn double(&self) -> Self {
        self.dbl()
    }

    #[inline]
    fn negate(&self) -> Self {
        CurvePoint::negate(*self)
    }

    #[inline]
    fn normalize(&self) -> Self {
        self.special()
    }

    #[inline]
    fn add_normalized(&self, other: &Self) -> Self {
        self.mixed_add(*other)
    }

    fn batch_normalize(points: &mut [Self]) {
        Self::batch_to_special(points)
    }
}

impl<C: CurveConfig> Add for CurvePoint<C> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        CurvePoint::add(self, other)
    }
}

impl<C: CurveConfig> AddAssign for CurvePoint<C> {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<C: CurveConfig> Sub for CurvePoint<C> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl<C: CurveConfig> SubAssign for CurvePoint<C> {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl<C: CurveConfig> Neg for CurvePoint<C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl<C: CurveConfig> Sum for CurvePoint<C> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, p| acc + p)
    }
}

macro_rules! impl_scalar_mul {
    ($($scalar:ty),* $(,)?) => {
        $(
            impl<C: CurveConfig> Mul<$scalar> for CurvePoint<C> {
                type Output = Self;

                fn mul(self, scalar: $scalar) -> Self {
                    self.scalar_mul(&scalar)
                }
            }

            impl<C: CurveConfig> Mul<&$scalar> for CurvePoint<C> {
                type Output = Self;

                fn mul(self, scalar: &$scalar) -> Self {
                    self.scalar_mul(scalar)
                }
            }

            impl<C: CurveConfig> Mul<CurvePoint<C>> for $scalar {
                type Output = CurvePoint<C>;

                fn mul(self, point: CurvePoint<C>) -> CurvePoint<C> {
                    point.scalar_mul(&self)
                }
            }

            impl<C: CurveConfig> Mul<CurvePoint<C>> for &$scalar {
                type Output = CurvePoint<C>;

                fn mul(self, point: CurvePoint<C>) -> CurvePoint<C> {
                    point.scalar_mul(self)
                }
            }
        )*
    };
}

impl_scalar_mul!(BigUint, u64, ScalarField);

/// `1` for the identity, otherwise `0 <x> <y>` in affine coordinates.
impl<C: CurveConfig> Display for CurvePoint<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.affine_coordinates() {
            None => f.write_str(IDENTITY_FLAG),
            Some((x, y)) => write!(f, "{} {} {}", AFFINE_FLAG, x, y),
        }
    }
}

impl<C: CurveConfig> FromStr for CurvePoint<C> {
    type Err = DeserializeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl<C: CurveConfig> Serialize for CurvePoint<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, C: CurveConfig> Deserialize<'de> for CurvePoint<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::init_public_params;
    use crate::{Fq, Fq2};

    fn setup() {
        init_public_params().expect("alt_bn128 parameters");
    }

    #[test]
    fn test_zero_is_special() {
        let o = G1::zero();
        assert!(o.is_zero());
        assert!(o.is_special());
        assert_eq!(o.affine_coordinates(), None);
        assert_eq!(o.jacobian_coordinates(), None);
    }

    #[test]
    fn test_from_jacobian_zero_z_is_identity() {
        let p = G1::from_jacobian(Fq::ONE, Fq::from_u64(2), Fq::ZERO);
        assert!(p.is_zero());
    }

    #[test]
    fn test_projective_equality() {
        setup();
        let g = G1::one();
        let z = Fq::from_u64(5);
        let z2 = z.square();
        let scaled = G1::from_jacobian(Fq::ONE * z2, Fq::from_u64(2) * z2 * z, z);
        assert!(!scaled.is_special());
        assert_eq!(scaled, g);
        assert_eq!(g, scaled);
        assert_ne!(scaled, G1::zero());
        assert_eq!(scaled.special().affine_coordinates(), Some((Fq::ONE, Fq::from_u64(2))));
    }

    #[test]
    fn test_generator_coordinates() {
        setup();
        assert_eq!(G1::one().to_text(), "0 1 2");
        let (x, _) = G2::one().affine_coordinates().expect("affine generator");
        assert_eq!(
            x.c0.to_string(),
            "10857046999023057135944570762232829481370756359578518086990519993285655852781"
        );
    }

    #[test]
    fn test_dbl_matches_add() {
        setup();
        let g = G1::one();
        assert_eq!(g.dbl(), g.add(g));
        assert_eq!(g.dbl(), g.mixed_add(g));
        assert!(g.dbl().is_on_curve());
    }

    #[test]
    fn test_one_plus_two_is_three() {
        setup();
        let one = G1::one();
        let two = one.dbl();
        let three = 3u64 * one;
        assert_eq!(one.add(two), three);
        assert_eq!(two.add(one), three);
    }

    #[test]
    fn test_zero_ordinate_doubles_to_zero() {
        let p = G1::from_affine(Fq::from_u64(7), Fq::ZERO);
        assert!(p.dbl().is_zero());
    }

    #[test]
    fn test_add_inverse_is_zero() {
        setup();
        let p = G2::one().dbl();
        assert!(p.add(p.negate()).is_zero());
        assert!(p.mixed_add(p.negate().special()).is_zero());
        assert_eq!(p.negate().negate(), p);
    }

    #[test]
    fn test_batch_to_special() {
        setup();
        let g = G2::one();
        let mut points = vec![g.dbl(), G2::zero(), g, g.dbl().dbl(), g.dbl() + g];
        let expected = points.clone();
        G2::batch_to_special(&mut points);
        for (normalized, original) in points.iter().zip(expected.iter()) {
            assert!(normalized.is_special());
            assert_eq!(normalized, original);
        }
        assert!(points[1].is_zero());
    }

    #[test]
    fn test_from_affine_checked() {
        setup();
        assert!(G1::from_affine_checked(Fq::ONE, Fq::from_u64(2)).is_ok());
        assert_eq!(
            G1::from_affine_checked(Fq::ONE, Fq::ONE),
            Err(DeserializeError::NotOnCurve)
        );
    }

    #[test]
    fn test_scalar_mul_operator_forms() {
        setup();
        let g = G1::one();
        let k = ScalarField::from_u64(11);
        let big = BigUint::from(11u8);
        let expected = g.scalar_mul(&11u64);
        assert_eq!(g * k, expected);
        assert_eq!(k * g, expected);
        assert_eq!(g * &big, expected);
        assert_eq!(&big * g, expected);
        assert_eq!(big * g, expected);
        assert_eq!(g * 11u64, expected);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "mixed_add needs a special second operand")]
    fn test_mixed_add_rejects_jacobian_operand() {
        setup();
        let g = G2::one();
        let _ = g.mixed_add(g.dbl());
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn test_mixed_add_jacobian_operand_falls_back_to_add() {
        setup();
        let g = G2::one();
        let jacobian = g.dbl();
        assert!(!jacobian.is_special());
        assert_eq!(g.mixed_add(jacobian), g + jacobian);
        assert_eq!(jacobian.mixed_add(jacobian), jacobian.dbl());
    }

    #[test]
    fn test_mul_by_q_identity() {
        setup();
        assert!(G2::zero().mul_by_q().is_zero());
    }

    #[test]
    fn test_mul_by_q_keeps_affine_form() {
        setup();
        let g = G2::one();
        assert!(g.mul_by_q().is_special());
        assert_eq!(g.dbl().mul_by_q(), g.mul_by_q().dbl());
    }

    #[test]
    fn test_text_rejects_off_curve() {
        setup();
        assert_eq!(
            "0 1 1".parse::<G1>(),
            Err(DeserializeError::NotOnCurve)
        );
        assert_eq!(
            "2 1 2".parse::<G1>(),
            Err(DeserializeError::InvalidFlag("2".to_string()))
        );
        assert_eq!(
            "1 0".parse::<G1>(),
            Err(DeserializeError::TrailingInput("0".to_string()))
        );
        assert_eq!("0 1".parse::<G1>(), Err(DeserializeError::UnexpectedEnd));
    }

    #[test]
    fn test_g2_text() {
        setup();
        let g = G2::one();
        let text = g.dbl().to_text();
        assert_eq!(text.split_whitespace().count(), 5);
        assert_eq!(G2::from_text(&text), Ok(g.dbl()));
        let point = Fq2::new(Fq::ONE, Fq::ONE);
        assert!(G2::from_affine_checked(point, point).is_err());
    }
}
