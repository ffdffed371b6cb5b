//! Convergence acceleration of infinite series.
//!
//! A [`Series`](traits::Series) yields its terms one index at a time. An
//! accelerator wraps a series, pulls one term per
//! [`advance`](traits::SeriesAcceleration::advance), and extrapolates the
//! limit from the partial sums seen so far:
//!
//! - [`EpsilonAlgorithm`](accel::EpsilonAlgorithm): Wynn's epsilon algorithm,
//!   for linear and alternating convergence
//! - [`RhoAlgorithm`](accel::RhoAlgorithm): Wynn's rho algorithm, for
//!   logarithmic convergence
//! - [`ShanksTransform`](accel::ShanksTransform): iterated Aitken Δ²
//! - [`ShanksTransformAlternating`](accel::ShanksTransformAlternating): a
//!   Shanks-type transform that uses the alternating terms as remainder
//!   estimates
//! - [`ThetaAlgorithm`](accel::ThetaAlgorithm): Brezinski's theta algorithm
//! - [`ChangWynnAlgorithm`](accel::ChangWynnAlgorithm): the epsilon
//!   algorithm with a numerator weighted by the partial sums, for linear and
//!   logarithmic convergence
//!
//! # Example
//!
//! ```
//! use shanks::prelude::*;
//!
//! let series = Pi4Series::new(4.0_f64);
//!
//! // a million terms of the raw series still miss the sixth digit
//! let raw = series.partial_sum(1_000_000).unwrap();
//! assert!((raw - std::f64::consts::PI).abs() > 1E-7);
//!
//! let mut eps = EpsilonAlgorithm::new(series, AccelerationConfig::default());
//! let est = eps.run().unwrap();
//!
//! assert_eq!(est.status, Status::Converged);
//! assert!(est.terms < 30);
//! assert!((est.value - std::f64::consts::PI).abs() < 1E-11);
//! ```
pub mod accel;
pub mod consts;
pub mod misc;
pub mod prelude;
pub mod result;
pub mod series;
pub mod traits;

mod test;
