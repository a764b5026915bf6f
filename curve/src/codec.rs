//! Whitespace-separated text encoding for field elements and points.
//!
//! Grammar:
//!
//! ```text
//! point    := "1"                 identity
//!           | "0" <field> <field> affine x, y
//! Fq       := unsigned decimal below the modulus
//! Fq2      := <Fq> <Fq>           c0, c1
//! ```

use core::str::SplitWhitespace;

use num_bigint::BigUint;

use crate::error::DeserializeError;
use crate::field::Field;
use crate::params::{public_params, CurveConfig, GroupParameters};
use crate::point::CurvePoint;

/// Flag written in place of coordinates for the identity.
pub const IDENTITY_FLAG: &str = "1";
/// Flag preceding the affine coordinates of any other point.
pub const AFFINE_FLAG: &str = "0";

/// Reads successive values from one text stream.
///
/// ```ignore
/// let mut reader = TextReader::new("0 1 2 1");
/// let g: G1 = reader.read_point()?;
/// let o: G1 = reader.read_point()?;
/// reader.finish()?;
/// ```
#[derive(Clone, Debug)]
pub struct TextReader<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> TextReader<'a> {
    pub fn new(input: &'a str) -> Self {
        TextReader {
            tokens: input.split_whitespace(),
        }
    }

    pub fn next_token(&mut self) -> Result<&'a str, DeserializeError> {
        self.tokens.next().ok_or(DeserializeError::UnexpectedEnd)
    }

    /// Fails if any token is left.
    pub fn finish(mut self) -> Result<(), DeserializeError> {
        match self.tokens.next() {
            None => Ok(()),
            Some(token) => Err(DeserializeError::TrailingInput(token.to_string())),
        }
    }

    /// Read an unsigned decimal integer with no sign, prefix or separators.
    pub fn read_integer(&mut self) -> Result<BigUint, DeserializeError> {
        let token = self.next_token()?;
        if !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DeserializeError::InvalidInteger(token.to_string()));
        }
        BigUint::parse_bytes(token.as_bytes(), 10)
            .ok_or_else(|| DeserializeError::InvalidInteger(token.to_string()))
    }

    pub fn read_field<F: Field>(&mut self) -> Result<F, DeserializeError> {
        F::read_text(self)
    }

    /// Read a point, checking it against the installed public parameters.
    ///
    /// # Panics
    ///
    /// Panics if the public parameters have not been initialized.
    pub fn read_point<C: CurveConfig>(&mut self) -> Result<CurvePoint<C>, DeserializeError> {
        self.read_point_in(C::group(public_params()))
    }

    /// Read a point, checking the curve equation and subgroup membership
    /// against explicitly supplied group parameters.
    pub fn read_point_in<C: CurveConfig>(
        &mut self,
        group: &GroupParameters<C>,
    ) -> Result<CurvePoint<C>, DeserializeError> {
        match self.next_token()? {
            IDENTITY_FLAG => Ok(CurvePoint::zero()),
            AFFINE_FLAG => {
                let x = self.read_field()?;
                let y = self.read_field()?;
                let point = CurvePoint::from_affine(x, y);
                if !group.is_on_curve(&point) {
                    return Err(DeserializeError::NotOnCurve);
                }
                if !group.is_in_subgroup(&point) {
                    return Err(DeserializeError::NotInSubgroup);
                }
                Ok(point)
            }
            flag => Err(DeserializeError::InvalidFlag(flag.to_string())),
        }
    }
}

/// Parse exactly one value from `input`.
pub(crate) fn parse_complete<T>(
    input: &str,
    read: impl FnOnce(&mut TextReader<'_>) -> Result<T, DeserializeError>,
) -> Result<T, DeserializeError> {
    let mut reader = TextReader::new(input);
    let value = read(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fq, Fq2};

    #[test]
    fn test_integer_tokens() {
        let mut reader = TextReader::new("  12\n007\t");
        assert_eq!(reader.read_integer(), Ok(BigUint::from(12u8)));
        assert_eq!(reader.read_integer(), Ok(BigUint::from(7u8)));
        assert_eq!(reader.read_integer(), Err(DeserializeError::UnexpectedEnd));
    }

    #[test]
    fn test_rejects_signed_integer() {
        let mut reader = TextReader::new("-3");
        assert_eq!(
            reader.read_integer(),
            Err(DeserializeError::InvalidInteger("-3".to_string()))
        );
    }

    #[test]
    fn test_reads_mixed_fields() {
        let mut reader = TextReader::new("5 9 1");
        let a: Fq = reader.read_field().expect("Fq");
        let b: Fq2 = reader.read_field().expect("Fq2");
        assert_eq!(a, Fq::from_u64(5));
        assert_eq!(b, Fq2::new(Fq::from_u64(9), Fq::ONE));
        assert_eq!(reader.finish(), Ok(()));
    }

    #[test]
    fn test_parse_complete_rejects_trailing() {
        assert_eq!(
            parse_complete("4 5", |r| r.read_field::<Fq>()),
            Err(DeserializeError::TrailingInput("5".to_string()))
        );
    }
}
