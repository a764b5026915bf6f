//! Base field of alt_bn128.
//! q = 21888242871839275222246405745257275088696311157297823662689037894645226208583

use crate::montgomery::{FieldParams, Fp};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FqParams;

impl FieldParams for FqParams {
    const MODULUS: [u64; 4] = [
        0x3c208c16d87cfd47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];

    const R: [u64; 4] = [
        0xd35d438dc58f0d9d,
        0x0a78eb28f5c70b3d,
        0x666ea36f7879462c,
        0x0e0a77c19a07df2f,
    ];

    const R2: [u64; 4] = [
        0xf32cfc5b538afa89,
        0xb5e71911d44501fb,
        0x47ab1eff0a417ff6,
        0x06d89f71cab8351f,
    ];

    const INV: u64 = 0x87d20782e4866389;
}

/// alt_bn128 base field element.
pub type Fq = Fp<FqParams>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;

    const MODULUS_DECIMAL: &str =
        "21888242871839275222246405745257275088696311157297823662689037894645226208583";

    #[test]
    fn test_modulus() {
        assert_eq!(Fq::modulus().to_string(), MODULUS_DECIMAL);
    }

    #[test]
    fn test_small_arithmetic() {
        let a = Fq::from_u64(6);
        let b = Fq::from_u64(7);
        assert_eq!(a * b, Fq::from_u64(42));
        assert_eq!(b - a, Fq::ONE);
        assert_eq!(a - b, -Fq::ONE);
        assert_eq!(a.square(), Fq::from_u64(36));
    }

    #[test]
    fn test_decimal_text() {
        let minus_one = -Fq::ONE;
        let text = minus_one.to_string();
        assert_eq!(
            text,
            "21888242871839275222246405745257275088696311157297823662689037894645226208582"
        );
        assert_eq!(text.parse::<Fq>(), Ok(minus_one));
        assert_eq!("0".parse::<Fq>(), Ok(Fq::ZERO));
    }

    #[test]
    fn test_decimal_text_rejects_malformed() {
        assert!("".parse::<Fq>().is_err());
        assert!("-1".parse::<Fq>().is_err());
        assert!("+1".parse::<Fq>().is_err());
        assert!("0x10".parse::<Fq>().is_err());
        assert!("1_000".parse::<Fq>().is_err());
        assert!("1 2".parse::<Fq>().is_err());
        assert!(MODULUS_DECIMAL.parse::<Fq>().is_err());
    }

    #[test]
    fn test_trait_inverse() {
        let seven = Fq::from_u64(7);
        let inv = Field::inverse(&seven).expect("non-zero");
        assert_eq!(seven * inv, Fq::ONE);
        assert_eq!(Field::frobenius_map(&seven), seven);
    }
}
