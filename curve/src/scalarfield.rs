//! Scalar field of alt_bn128, the integers modulo the group order
//! r = 21888242871839275222246405745257275088548364400416034343698204186575808495617

use crate::group::ScalarBits;
use crate::montgomery::{FieldParams, Fp};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrParams;

impl FieldParams for FrParams {
    const MODULUS: [u64; 4] = [
        0x43e1f593f0000001,
        0x2833e84879b97091,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];

    const R: [u64; 4] = [
        0xac96341c4ffffffb,
        0x36fc76959f60cd29,
        0x666ea36f7879462e,
        0x0e0a77c19a07df2f,
    ];

    const R2: [u64; 4] = [
        0x1bb8e645ae216da7,
        0x53fe3ab1e35c59e3,
        0x8c49833d53bb8085,
        0x0216d0b17f4e44a5,
    ];

    const INV: u64 = 0xc2e1f593efffffff;
}

/// Scalar field element for the curve groups.
pub type ScalarField = Fp<FrParams>;

impl ScalarBits for ScalarField {
    fn to_u64_limbs(&self) -> Vec<u64> {
        self.to_canonical_limbs().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn test_zero_one() {
        assert_eq!(ScalarField::ZERO + ScalarField::ZERO, ScalarField::ZERO);
        assert_eq!(ScalarField::ONE * ScalarField::ONE, ScalarField::ONE);
        assert_eq!(ScalarField::ZERO * ScalarField::ONE, ScalarField::ZERO);
        assert_eq!(ScalarField::ONE + ScalarField::ZERO, ScalarField::ONE);
    }

    #[test]
    fn test_addition() {
        let a = ScalarField::from_u64(5);
        let b = ScalarField::from_u64(7);
        assert_eq!(a + b, ScalarField::from_u64(12));
    }

    #[test]
    fn test_negation() {
        let a = ScalarField::from_u64(5);
        assert_eq!(a + (-a), ScalarField::ZERO);
    }

    #[test]
    fn test_modulus_matches_group_order() {
        let expected: BigUint =
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
                .parse()
                .expect("decimal");
        assert_eq!(ScalarField::modulus(), expected);
    }

    #[test]
    fn test_scalar_bits_are_canonical() {
        let minus_one = -ScalarField::ONE;
        let limbs = minus_one.to_u64_limbs();
        assert_eq!(limbs.len(), 4);
        assert_eq!(limbs[0], 0x43e1f593f0000000);
        assert_eq!(ScalarField::from_u64(9).to_u64_limbs(), vec![9, 0, 0, 0]);
    }
}
