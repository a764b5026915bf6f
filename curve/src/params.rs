//! Curve constants and the process-wide parameter slot.
//!
//! [`PublicParameters`] is an ordinary immutable value built from a textual
//! [`ParameterSet`]. The point API resolves it through [`CurveConfig`] from a
//! slot that is filled once by [`init_public_params`] and read-only
//! afterwards.

use core::fmt::Debug;
use std::sync::OnceLock;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::codec::{parse_complete, TextReader};
use crate::error::{DeserializeError, ParamsError};
use crate::field::Field;
use crate::point::CurvePoint;
use crate::{Fq, Fq2, ScalarField};

/// Static description of one curve group.
pub trait CurveConfig: Copy + Clone + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Field holding the point coordinates.
    type Base: Field;

    const NAME: &'static str;

    /// Whether the curve has points outside the order-r subgroup.
    const HAS_COFACTOR: bool;

    /// This group's constants inside a full parameter object.
    fn group(params: &PublicParameters) -> &GroupParameters<Self>;
}

/// A group on the sextic twist, which carries a Frobenius endomorphism.
pub trait TwistedCurveConfig: CurveConfig {
    fn twist(params: &PublicParameters) -> &TwistParameters<Self::Base>;
}

/// y^2 = x^3 + b over Fq.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct G1Config;

impl CurveConfig for G1Config {
    type Base = Fq;

    const NAME: &'static str = "G1";

    const HAS_COFACTOR: bool = false;

    #[inline]
    fn group(params: &PublicParameters) -> &GroupParameters<Self> {
        &params.g1
    }
}

/// y^2 = x^3 + b/xi over Fq2.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct G2Config;

impl CurveConfig for G2Config {
    type Base = Fq2;

    const NAME: &'static str = "G2";

    const HAS_COFACTOR: bool = true;

    #[inline]
    fn group(params: &PublicParameters) -> &GroupParameters<Self> {
        &params.g2
    }
}

impl TwistedCurveConfig for G2Config {
    #[inline]
    fn twist(params: &PublicParameters) -> &TwistParameters<Fq2> {
        &params.twist
    }
}

/// Curve coefficient, generator and order of one group.
#[derive(Clone, Debug)]
pub struct GroupParameters<C: CurveConfig> {
    coeff_b: C::Base,
    generator: CurvePoint<C>,
    order: BigUint,
}

impl<C: CurveConfig> GroupParameters<C> {
    fn new(coeff_b: C::Base, generator: CurvePoint<C>, order: &BigUint) -> Self {
        GroupParameters {
            coeff_b,
            generator,
            order: order.clone(),
        }
    }

    #[inline]
    pub fn coeff_b(&self) -> C::Base {
        self.coeff_b
    }

    #[inline]
    pub fn generator(&self) -> CurvePoint<C> {
        self.generator
    }

    #[inline]
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Y^2 = X^3 + b*Z^6 in Jacobian coordinates. The identity is on every curve.
    pub fn is_on_curve(&self, point: &CurvePoint<C>) -> bool {
        match point.jacobian_coordinates() {
            None => true,
            Some((x, y, z)) => {
                let z2 = z.square();
                let z6 = z2.square() * z2;
                y.square() == x.square() * x + self.coeff_b * z6
            }
        }
    }

    /// r * point == 0. Always true on a curve without cofactor, given the
    /// point is on the curve.
    pub fn is_in_subgroup(&self, point: &CurvePoint<C>) -> bool {
        !C::HAS_COFACTOR || point.scalar_mul(&self.order).is_zero()
    }

    fn validate(&self) -> Result<(), ParamsError> {
        if self.generator.is_zero() || !self.is_on_curve(&self.generator) {
            return Err(ParamsError::GeneratorOffCurve(C::NAME));
        }
        debug!(group = C::NAME, "generator satisfies the curve equation");

        if !self.generator.scalar_mul(&self.order).is_zero() {
            return Err(ParamsError::WrongOrder(C::NAME));
        }
        debug!(group = C::NAME, "generator has the configured order");
        Ok(())
    }
}

/// Twist coefficient xi and the constants of the Frobenius map on the twist.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TwistParameters<F> {
    twist: F,
    mul_by_q_x: F,
    mul_by_q_y: F,
}

impl<F: Field> TwistParameters<F> {
    /// Derive xi^((q-1)/3) and xi^((q-1)/2).
    fn new(twist: F, characteristic: &BigUint) -> Self {
        let q_minus_one = characteristic - 1u32;
        let exp_x = (&q_minus_one / 3u32).to_u64_digits();
        let exp_y = (&q_minus_one / 2u32).to_u64_digits();

        TwistParameters {
            twist,
            mul_by_q_x: twist.pow_vartime(&exp_x),
            mul_by_q_y: twist.pow_vartime(&exp_y),
        }
    }

    #[inline]
    pub fn twist(&self) -> F {
        self.twist
    }

    #[inline]
    pub fn mul_by_q_x(&self) -> F {
        self.mul_by_q_x
    }

    #[inline]
    pub fn mul_by_q_y(&self) -> F {
        self.mul_by_q_y
    }
}

/// Textual description of a parameter set, in the field text format.
///
/// Generators are written as affine coordinates without the point flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub name: String,
    pub base_field_modulus: String,
    pub group_order: String,
    pub g1_coeff_b: String,
    pub g1_generator: String,
    pub twist: String,
    pub g2_generator: String,
}

impl ParameterSet {
    pub fn alt_bn128() -> Self {
        ParameterSet {
            name: "alt_bn128".to_string(),
            base_field_modulus:
                "21888242871839275222246405745257275088696311157297823662689037894645226208583"
                    .to_string(),
            group_order:
                "21888242871839275222246405745257275088548364400416034343698204186575808495617"
                    .to_string(),
            g1_coeff_b: "3".to_string(),
            g1_generator: "1 2".to_string(),
            twist: "9 1".to_string(),
            g2_generator: concat!(
                "10857046999023057135944570762232829481370756359578518086990519993285655852781 ",
                "11559732032986387107991004021392285783925812861821192530917403151452391805634 ",
                "8495653923123431417604973247489272438418190587263600148770280649306958101930 ",
                "4082367875863433681332203403145435568316851327593401208105741076214120093531",
            )
            .to_string(),
        }
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::alt_bn128()
    }
}

/// Validated constants for both groups.
#[derive(Clone, Debug)]
pub struct PublicParameters {
    source: ParameterSet,
    base_field_char: BigUint,
    order: BigUint,
    g1: GroupParameters<G1Config>,
    g2: GroupParameters<G2Config>,
    twist: TwistParameters<Fq2>,
}

impl PublicParameters {
    /// Parse and validate a parameter set.
    ///
    /// Checks that the modulus and order match the compiled fields, that both
    /// generators lie on their curves with the configured order, that the
    /// twist is invertible and that the Frobenius constants agree with
    /// multiplication by q on the G2 generator.
    pub fn from_parameter_set(set: &ParameterSet) -> Result<Self, ParamsError> {
        debug!(name = %set.name, "building public parameters");

        let base_field_char = parse_constant("base_field_modulus", &set.base_field_modulus, |r| {
            r.read_integer()
        })?;
        if base_field_char != Fq::modulus() {
            return Err(ParamsError::ModulusMismatch(base_field_char.to_string()));
        }
        debug!("base field modulus matches the compiled field");

        let order = parse_constant("group_order", &set.group_order, |r| r.read_integer())?;
        if order <= BigUint::from(1u8) {
            return Err(ParamsError::DegenerateOrder);
        }
        if order != ScalarField::modulus() {
            return Err(ParamsError::OrderMismatch(order.to_string()));
        }
        debug!(bits = order.bits(), "group order matches the compiled scalar field");

        let g1_b: Fq = parse_constant("g1_coeff_b", &set.g1_coeff_b, |r| r.read_field())?;
        let g1 = GroupParameters::new(
            g1_b,
            parse_generator("g1_generator", &set.g1_generator)?,
            &order,
        );
        g1.validate()?;

        let twist: Fq2 = parse_constant("twist", &set.twist, |r| r.read_field())?;
        let twist_inv = twist.inverse().ok_or(ParamsError::SingularTwist)?;
        let g2 = GroupParameters::new(
            Fq2::from(g1_b) * twist_inv,
            parse_generator("g2_generator", &set.g2_generator)?,
            &order,
        );
        g2.validate()?;

        let twist = TwistParameters::new(twist, &base_field_char);
        if g2.generator.mul_by_q_with(&twist) != g2.generator.scalar_mul(&base_field_char) {
            return Err(ParamsError::FrobeniusMismatch);
        }
        debug!("Frobenius constants agree with multiplication by q");

        Ok(PublicParameters {
            source: set.clone(),
            base_field_char,
            order,
            g1,
            g2,
            twist,
        })
    }

    pub fn name(&self) -> &str {
        &self.source.name
    }

    /// The set these parameters were built from.
    pub fn parameter_set(&self) -> &ParameterSet {
        &self.source
    }

    pub fn base_field_char(&self) -> &BigUint {
        &self.base_field_char
    }

    pub fn order(&self) -> &BigUint {
        &self.order
    }

    pub fn g1(&self) -> &GroupParameters<G1Config> {
        &self.g1
    }

    pub fn g2(&self) -> &GroupParameters<G2Config> {
        &self.g2
    }

    pub fn twist(&self) -> &TwistParameters<Fq2> {
        &self.twist
    }
}

fn parse_constant<T>(
    name: &'static str,
    text: &str,
    read: impl FnOnce(&mut TextReader<'_>) -> Result<T, DeserializeError>,
) -> Result<T, ParamsError> {
    parse_complete(text, read).map_err(|source| ParamsError::InvalidConstant { name, source })
}

fn parse_generator<C: CurveConfig>(
    name: &'static str,
    text: &str,
) -> Result<CurvePoint<C>, ParamsError> {
    parse_constant(name, text, |reader| {
        let x = reader.read_field()?;
        let y = reader.read_field()?;
        Ok(CurvePoint::from_affine(x, y))
    })
}

static PUBLIC_PARAMS: OnceLock<PublicParameters> = OnceLock::new();

/// Install the alt_bn128 parameters. See [`init_public_params_with`].
pub fn init_public_params() -> Result<&'static PublicParameters, ParamsError> {
    init_public_params_with(&ParameterSet::alt_bn128())
}

/// Install the process-wide parameters.
///
/// Repeating the call with an equal set returns the installed parameters.
/// A different set is refused with [`ParamsError::Conflict`]. Safe to call
/// from several threads at once.
pub fn init_public_params_with(
    set: &ParameterSet,
) -> Result<&'static PublicParameters, ParamsError> {
    let installed = match PUBLIC_PARAMS.get() {
        Some(installed) => installed,
        None => {
            let params = PublicParameters::from_parameter_set(set)?;
            PUBLIC_PARAMS.get_or_init(|| {
                info!(
                    name = %params.name(),
                    order_bits = params.order.bits(),
                    "public parameters initialized"
                );
                params
            })
        }
    };

    if installed.source == *set {
        Ok(installed)
    } else {
        warn!(
            installed = %installed.name(),
            requested = %set.name,
            "refusing to replace initialized public parameters"
        );
        Err(ParamsError::Conflict {
            installed: installed.name().to_string(),
            requested: set.name.clone(),
        })
    }
}

pub fn try_public_params() -> Result<&'static PublicParameters, ParamsError> {
    PUBLIC_PARAMS.get().ok_or(ParamsError::Uninitialized)
}

/// # Panics
///
/// Panics if [`init_public_params`] has not been called.
pub(crate) fn public_params() -> &'static PublicParameters {
    match PUBLIC_PARAMS.get() {
        Some(params) => params,
        None => panic!("{}", ParamsError::Uninitialized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(set: &ParameterSet) -> Result<PublicParameters, ParamsError> {
        PublicParameters::from_parameter_set(set)
    }

    #[test]
    fn test_default_set_is_valid() {
        let params = build(&ParameterSet::default()).expect("alt_bn128 parameters");
        assert_eq!(params.name(), "alt_bn128");
        assert_eq!(params.base_field_char(), &Fq::modulus());
        assert_eq!(params.order(), &ScalarField::modulus());
        assert_eq!(params.g1().coeff_b(), Fq::from_u64(3));
        assert_eq!(
            params.g1().generator().affine_coordinates(),
            Some((Fq::ONE, Fq::from_u64(2)))
        );
    }

    #[test]
    fn test_twist_coefficient() {
        let params = build(&ParameterSet::default()).expect("alt_bn128 parameters");
        let xi = params.twist().twist();
        assert_eq!(xi, Fq2::new(Fq::from_u64(9), Fq::ONE));
        assert_eq!(params.g2().coeff_b() * xi, Fq2::from(Fq::from_u64(3)));
    }

    #[test]
    fn test_frobenius_constants() {
        let params = build(&ParameterSet::default()).expect("alt_bn128 parameters");
        let twist = params.twist();
        let xi = twist.twist();
        let q_minus_one = (Fq::modulus() - 1u32).to_u64_digits();
        let xi_q_minus_one = xi.pow_vartime(&q_minus_one);

        let cx = twist.mul_by_q_x();
        let cy = twist.mul_by_q_y();
        assert_eq!(cx.square() * cx, xi_q_minus_one);
        assert_eq!(cy.square(), xi_q_minus_one);
    }

    #[test]
    fn test_rejects_wrong_modulus() {
        let mut set = ParameterSet::default();
        set.base_field_modulus = set.group_order.clone();
        assert_eq!(
            build(&set).err(),
            Some(ParamsError::ModulusMismatch(set.group_order.clone()))
        );
    }

    #[test]
    fn test_rejects_degenerate_order() {
        let mut set = ParameterSet::default();
        set.group_order = "1".to_string();
        assert_eq!(build(&set).err(), Some(ParamsError::DegenerateOrder));
        set.group_order = "0".to_string();
        assert_eq!(build(&set).err(), Some(ParamsError::DegenerateOrder));
    }

    #[test]
    fn test_rejects_foreign_order() {
        let mut set = ParameterSet::default();
        set.group_order = "7".to_string();
        assert_eq!(
            build(&set).err(),
            Some(ParamsError::OrderMismatch("7".to_string()))
        );
    }

    #[test]
    fn test_rejects_malformed_constant() {
        let mut set = ParameterSet::default();
        set.g1_coeff_b = "three".to_string();
        assert_eq!(
            build(&set).err(),
            Some(ParamsError::InvalidConstant {
                name: "g1_coeff_b",
                source: DeserializeError::InvalidInteger("three".to_string()),
            })
        );

        let mut set = ParameterSet::default();
        set.g2_generator = "1 2 3".to_string();
        assert_eq!(
            build(&set).err(),
            Some(ParamsError::InvalidConstant {
                name: "g2_generator",
                source: DeserializeError::UnexpectedEnd,
            })
        );
    }

    #[test]
    fn test_rejects_generator_off_curve() {
        let mut set = ParameterSet::default();
        set.g1_generator = "1 3".to_string();
        assert_eq!(build(&set).err(), Some(ParamsError::GeneratorOffCurve("G1")));

        let mut set = ParameterSet::default();
        set.g2_generator = "1 0 2 0".to_string();
        assert_eq!(build(&set).err(), Some(ParamsError::GeneratorOffCurve("G2")));
    }

    #[test]
    fn test_changed_coefficient_moves_generators_off_curve() {
        let mut set = ParameterSet::default();
        set.g1_coeff_b = "4".to_string();
        assert_eq!(build(&set).err(), Some(ParamsError::GeneratorOffCurve("G1")));
    }

    #[test]
    fn test_rejects_singular_twist() {
        let mut set = ParameterSet::default();
        set.twist = "0 0".to_string();
        assert_eq!(build(&set).err(), Some(ParamsError::SingularTwist));
    }

    #[test]
    fn test_rejects_wrong_generator_order() {
        let params = build(&ParameterSet::default()).expect("alt_bn128 parameters");
        let g1 = params.g1();
        let g1 = GroupParameters::new(g1.coeff_b(), g1.generator(), &BigUint::from(7u8));
        assert_eq!(g1.validate(), Err(ParamsError::WrongOrder("G1")));

        let g2 = params.g2();
        let g2 = GroupParameters::new(
            g2.coeff_b(),
            g2.generator(),
            &(ScalarField::modulus() - 1u32),
        );
        assert_eq!(g2.validate(), Err(ParamsError::WrongOrder("G2")));
    }

    // (1, y) on the twist, outside the order-r subgroup.
    const TWIST_POINT_OFF_SUBGROUP: &str = concat!(
        "1 0 ",
        "18278151005453108793778860132295291098363647455926340152056652516292830556603 ",
        "5912654199736721486680175016176231956195085055698687135131307249486702594212",
    );

    #[test]
    fn test_subgroup_membership() {
        let params = build(&ParameterSet::default()).expect("alt_bn128 parameters");
        let g2 = params.g2();
        assert!(g2.is_in_subgroup(&g2.generator()));
        assert!(g2.is_in_subgroup(&CurvePoint::zero()));
        assert!(params.g1().is_in_subgroup(&params.g1().generator()));

        let point = parse_generator::<G2Config>("point", TWIST_POINT_OFF_SUBGROUP)
            .expect("coordinates");
        assert!(g2.is_on_curve(&point));
        assert!(!g2.is_in_subgroup(&point));
    }

    #[test]
    fn test_on_curve_accepts_identity() {
        let params = build(&ParameterSet::default()).expect("alt_bn128 parameters");
        assert!(params.g1().is_on_curve(&CurvePoint::zero()));
        assert!(!params
            .g1()
            .is_on_curve(&CurvePoint::from_affine(Fq::ONE, Fq::ONE)));
    }

    #[test]
    fn test_parameter_set_serde() {
        let set = ParameterSet::alt_bn128();
        let json = serde_json::to_string(&set).expect("serialize");
        let back: ParameterSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, set);
    }
}
