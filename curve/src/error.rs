//! Error types for parameter setup and point decoding.

use thiserror::Error;

/// Errors raised while decoding field elements or points from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializeError {
    /// The input ended before a complete value was read.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// The leading point token was neither the identity nor the affine flag.
    #[error("invalid point flag `{0}`")]
    InvalidFlag(String),

    /// A coordinate token is not an unsigned decimal integer.
    #[error("`{0}` is not an unsigned decimal integer")]
    InvalidInteger(String),

    /// A coordinate is not below the field modulus.
    #[error("`{0}` is not below the field modulus")]
    OutOfRange(String),

    /// The decoded coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// The point is on the curve but outside the prime-order subgroup.
    #[error("point is not in the prime-order subgroup")]
    NotInSubgroup,

    /// Input continued after a complete value.
    #[error("unexpected trailing input `{0}`")]
    TrailingInput(String),
}

/// Errors raised while building or installing the public parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// A parameter-dependent operation ran before `init_public_params`.
    #[error("public parameters have not been initialized; call init_public_params() first")]
    Uninitialized,

    /// The process-wide parameters were already initialized from a different set.
    #[error("public parameters already initialized from `{installed}`, refusing `{requested}`")]
    Conflict { installed: String, requested: String },

    /// The configured modulus is not the modulus of the compiled base field.
    #[error("base field modulus {0} does not match the compiled base field")]
    ModulusMismatch(String),

    /// A constant could not be parsed.
    #[error("invalid parameter `{name}`: {source}")]
    InvalidConstant {
        name: &'static str,
        #[source]
        source: DeserializeError,
    },

    /// The group order must be greater than one.
    #[error("group order must be greater than one")]
    DegenerateOrder,

    /// The configured group order is not the modulus of the compiled scalar field.
    #[error("group order {0} does not match the compiled scalar field")]
    OrderMismatch(String),

    /// A generator is the identity or does not satisfy its curve equation.
    #[error("{0} generator is not a point on the curve")]
    GeneratorOffCurve(&'static str),

    /// A generator multiplied by the group order is not the identity.
    #[error("{0} generator does not have the configured group order")]
    WrongOrder(&'static str),

    /// The twist coefficient is zero.
    #[error("twist coefficient is not invertible")]
    SingularTwist,

    /// The Frobenius twist constants disagree with multiplication by q.
    #[error("Frobenius endomorphism disagrees with multiplication by the base field characteristic")]
    FrobeniusMismatch,
}
