//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::accel::{
    accelerate, AccelerationConfig, AccelerationError, AcceleratorKind,
    ChangWynnAlgorithm, EpsilonAlgorithm, Estimate, RhoAlgorithm,
    ShanksTransform, ShanksTransformAlternating, Status, ThetaAlgorithm,
};
#[doc(no_inline)]
pub use crate::misc::ConvergentSequence;
#[doc(no_inline)]
pub use crate::series::*;
#[doc(no_inline)]
pub use crate::traits::{Numeric, Real, Series, SeriesAcceleration};
