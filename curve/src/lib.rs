//! Group arithmetic on the alt_bn128 pairing groups.
//!
//! G1 is the curve y^2 = x^3 + 3 over the base field Fq. G2 lives on the
//! sextic twist y^2 = x^3 + 3/xi over Fq2 with xi = 9 + u. Both groups have
//! prime order r. Points are [`CurvePoint`] values in affine or Jacobian form
//! and support the group law, scalar multiplication, the Frobenius map on G2
//! and a whitespace-separated text encoding.
//!
//! Curve constants are installed once per process with
//! [`init_public_params`] before any point is built from the generators.

mod basefield;
mod codec;
mod error;
mod extension;
mod field;
mod group;
mod montgomery;
mod params;
mod point;
mod random;
mod scalarfield;


pub use basefield::{Fq, FqParams};
pub use codec::{TextReader, AFFINE_FLAG, IDENTITY_FLAG};
pub use error::{DeserializeError, ParamsError};
pub use extension::Fq2;
pub use field::Field;
pub use group::{Group, ScalarBits};
pub use montgomery::{FieldParams, Fp};
pub use params::{
    init_public_params, init_public_params_with, try_public_params, CurveConfig, G1Config,
    G2Config, GroupParameters, ParameterSet, PublicParameters, TwistParameters,
    TwistedCurveConfig,
};
pub use point::{CurvePoint, G1, G2};
pub use random::RandomField;
pub use scalarfield::{FrParams, ScalarField};
