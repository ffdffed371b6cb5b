//! Geometric and binomial series
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use super::elementary::ratio_series;
use super::{
    argument_series, finite, pow_index, running_product, running_sum,
    SeriesError,
};
use crate::traits::{Real, Series};

argument_series!(
    /// 1 / (1 - x) = Σ x<sup>n</sup>, for |x| < 1
    ///
    /// # Example
    ///
    /// ```
    /// use shanks::prelude::*;
    ///
    /// let geom = Inverse1mxSeries::new(0.5_f64);
    ///
    /// assert_eq!(geom.partial_sum(3).unwrap(), 1.875);
    /// assert_eq!(geom.limit(), Some(2.0));
    /// ```
    Inverse1mxSeries
);

argument_series!(
    /// x / (1 - x)² = Σ (n+1) x<sup>n+1</sup>, for |x| < 1
    X1mxSquaredSeries
);

argument_series!(
    /// 1 / √(1 - 4x) = Σ C(2n, n) x<sup>n</sup>, for |x| < ¼
    InverseSqrt1m4xSeries
);

/// (1 + x)<sup>α</sup> = Σ C(α, n) x<sup>n</sup>, for |x| < 1 and any real α.
///
/// For a non-negative integer α the series terminates: every term past
/// n = α is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct BinomialSeries<T> {
    x: T,
    alpha: T,
}

impl<T> BinomialSeries<T> {
    /// Create the series of (1 + x)<sup>α</sup>
    #[inline]
    pub fn new(x: T, alpha: T) -> Self {
        Self { x, alpha }
    }
}

impl<T: Copy> BinomialSeries<T> {
    /// Get the exponent α
    #[inline]
    pub fn alpha(&self) -> T {
        self.alpha
    }
}

impl<T: Real> Series<T> for Inverse1mxSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        finite(pow_index(self.x, n), n)
    }

    fn limit(&self) -> Option<T> {
        Some((T::one() - self.x).recip())
    }
}

impl<T: Real> Series<T> for X1mxSquaredSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        finite(T::from_index(n + 1) * pow_index(self.x, n + 1), n)
    }

    fn limit(&self) -> Option<T> {
        let one_m_x = T::one() - self.x;
        Some(self.x / (one_m_x * one_m_x))
    }
}

ratio_series!(
    InverseSqrt1m4xSeries,
    |x| T::one(),
    |k| {
        let two = T::one() + T::one();
        two * (two * k - T::one()) * x / k
    },
    (T::one() - T::from_index(4) * x).sqrt().recip()
);

impl<T: Real> Series<T> for BinomialSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let (x, alpha) = (self.x, self.alpha);
        let term =
            running_product(T::one(), n, |k| (alpha - k + T::one()) * x / k);
        finite(term, n)
    }

    fn nth_partial_sum(&self, n: usize) -> Result<T, SeriesError> {
        let (x, alpha) = (self.x, self.alpha);
        let sum = running_sum(T::one(), n, |k| (alpha - k + T::one()) * x / k);
        finite(sum, n)
    }

    fn limit(&self) -> Option<T> {
        Some((T::one() + self.x).powf(self.alpha))
    }
}
