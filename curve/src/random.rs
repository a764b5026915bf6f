use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::montgomery::{FieldParams, Fp};
use crate::Fq2;

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl<P: FieldParams> RandomField for Fp<P> {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

impl RandomField for Fq2 {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Fq2::new(StandardUniform.sample(rng), StandardUniform.sample(rng))
    }
}
