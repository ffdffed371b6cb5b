//! Series converging to numerical constants.
//!
//! The argument of each series is a scale factor: the series with argument
//! `x` has terms `x * a_n` and sums to `x` times the constant.
use super::{alternating_sign, argument_series, finite, SeriesError};
use crate::traits::{Real, Series};

macro_rules! constant_series {
    ($(#[$meta:meta])* $name: ident, |$n: ident| $term: expr, $value: expr) => {
        argument_series!($(#[$meta])* $name);

        impl<T: Real> Series<T> for $name<T> {
            fn x(&self) -> T {
                self.x
            }

            fn nth_term(&self, $n: usize) -> Result<T, SeriesError> {
                let term: T = $term;
                finite(self.x * term, $n)
            }

            fn limit(&self) -> Option<T> {
                let value: T = $value;
                Some(self.x * value)
            }
        }
    };
}

#[inline]
fn idx<T: Real>(n: usize) -> T {
    T::from_index(n)
}

constant_series!(
    /// ln 2 = Σ (-1)<sup>n</sup> / (n+1), the alternating harmonic series
    ///
    /// # Example
    ///
    /// ```
    /// use shanks::prelude::*;
    ///
    /// let series = Ln2Series::new(1.0_f64);
    ///
    /// assert_eq!(series.partial_sum(1).unwrap(), 0.5);
    /// assert_eq!(series.limit(), Some(std::f64::consts::LN_2));
    /// ```
    Ln2Series,
    |n| alternating_sign::<T>(n) / idx(n + 1),
    T::LN_2()
);

constant_series!(
    /// π/4 = Σ (-1)<sup>n</sup> / (2n+1), the Leibniz series
    Pi4Series,
    |n| alternating_sign::<T>(n) / idx(2 * n + 1),
    T::FRAC_PI_4()
);

constant_series!(
    /// π/3 = Σ 1 / ((n+1)(2n+1)(4n+1))
    Pi3Series,
    |n| T::one() / (idx::<T>(n + 1) * idx(2 * n + 1) * idx(4 * n + 1)),
    T::FRAC_PI_3()
);

constant_series!(
    /// π²/6 - 1 = Σ 1 / ((n+1)² (n+2))
    PiSquared6M1Series,
    |n| {
        let k: T = idx(n + 1);
        T::one() / (k * k * idx(n + 2))
    },
    T::PI() * T::PI() / idx(6) - T::one()
);

constant_series!(
    /// 3 - π = Σ (-1)<sup>n+1</sup> / ((n+1)(n+2)(2n+3))
    ThreeMinusPiSeries,
    |n| {
        alternating_sign::<T>(n + 1)
            / (idx::<T>(n + 1) * idx(n + 2) * idx(2 * n + 3))
    },
    idx::<T>(3) - T::PI()
);

constant_series!(
    /// 1/12 = Σ 1 / ((2n+1)(2n+3)(2n+5))
    OneTwelfthSeries,
    |n| T::one() / (idx::<T>(2 * n + 1) * idx(2 * n + 3) * idx(2 * n + 5)),
    T::one() / idx(12)
);

constant_series!(
    /// π/8 - 1/3 = Σ (-1)<sup>n</sup> / ((2n+1)(2n+3)(2n+5))
    EighthPiM13Series,
    |n| {
        alternating_sign::<T>(n)
            / (idx::<T>(2 * n + 1) * idx(2 * n + 3) * idx(2 * n + 5))
    },
    T::PI() / idx(8) - T::one() / idx(3)
);

constant_series!(
    /// 4 ln 2 - 3 = Σ (-1)<sup>n+1</sup> / ((n+1)² (n+2)²)
    FourLn2M3Series,
    |n| {
        let k: T = idx(n + 1);
        let kp1: T = idx(n + 2);
        alternating_sign::<T>(n + 1) / (k * k * kp1 * kp1)
    },
    idx::<T>(4) * T::LN_2() - idx(3)
);

constant_series!(
    /// -1/4 = Σ (-1)<sup>k</sup> / (k² + 2k), summed from k = 1
    MinusOneQuarterSeries,
    |n| {
        let k: T = idx(n + 1);
        alternating_sign::<T>(n + 1) / (k * k + idx::<T>(2) * k)
    },
    -T::one() / idx(4)
);

constant_series!(
    /// 1 = Σ 1 / ((n+1)(n+2)), a telescoping series
    OneSeries,
    |n| T::one() / (idx::<T>(n + 1) * idx(n + 2)),
    T::one()
);

constant_series!(
    /// π²/3 - 3 = Σ 1 / ((n+1)² (n+2)²)
    OneThirdPiSquaredM3Series,
    |n| {
        let k: T = idx(n + 1);
        let kp1: T = idx(n + 2);
        T::one() / (k * k * kp1 * kp1)
    },
    T::PI() * T::PI() / idx(3) - idx(3)
);
