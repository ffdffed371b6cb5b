//! Taylor series of the exponential, trigonometric, and hyperbolic functions
use super::{argument_series, finite, running_product, running_sum, SeriesError};
use crate::traits::{Real, Series};

argument_series!(
    /// e<sup>x</sup> = Σ x<sup>n</sup> / n!
    ///
    /// # Example
    ///
    /// ```
    /// use shanks::prelude::*;
    ///
    /// let exp = ExpSeries::new(1.0_f64);
    /// let sum = exp.partial_sum(20).unwrap();
    ///
    /// assert!((sum - std::f64::consts::E).abs() < 1E-14);
    /// ```
    ExpSeries
);

argument_series!(
    /// sin x = Σ (-1)<sup>n</sup> x<sup>2n+1</sup> / (2n+1)!
    SinSeries
);

argument_series!(
    /// cos x = Σ (-1)<sup>n</sup> x<sup>2n</sup> / (2n)!
    CosSeries
);

argument_series!(
    /// sinh x = Σ x<sup>2n+1</sup> / (2n+1)!
    SinhSeries
);

argument_series!(
    /// cosh x = Σ x<sup>2n</sup> / (2n)!
    CoshSeries
);

argument_series!(
    /// (sinh x + sin x) / 2 = Σ x<sup>4n+1</sup> / (4n+1)!
    MeanSinhSinSeries
);

/// Implements `Series` for a term of the form `first * Π ratio(k)`
macro_rules! ratio_series {
    ($name: ident, |$x: ident| $first: expr, |$k: ident| $ratio: expr, $limit: expr) => {
        impl<T: Real> Series<T> for $name<T> {
            fn x(&self) -> T {
                self.x
            }

            fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
                let $x = self.x;
                let term = running_product($first, n, |$k| $ratio);
                finite(term, n)
            }

            fn nth_partial_sum(&self, n: usize) -> Result<T, SeriesError> {
                let $x = self.x;
                let sum = running_sum($first, n, |$k| $ratio);
                finite(sum, n)
            }

            fn limit(&self) -> Option<T> {
                let $x = self.x;
                Some($limit)
            }
        }
    };
}

pub(super) use ratio_series;

fn two<T: Real>() -> T {
    T::one() + T::one()
}

ratio_series!(ExpSeries, |x| T::one(), |k| x / k, x.exp());

ratio_series!(
    SinSeries,
    |x| x,
    |k| -x * x / (two::<T>() * k * (two::<T>() * k + T::one())),
    x.sin()
);

ratio_series!(
    CosSeries,
    |x| T::one(),
    |k| -x * x / ((two::<T>() * k - T::one()) * two::<T>() * k),
    x.cos()
);

ratio_series!(
    SinhSeries,
    |x| x,
    |k| x * x / (two::<T>() * k * (two::<T>() * k + T::one())),
    x.sinh()
);

ratio_series!(
    CoshSeries,
    |x| T::one(),
    |k| x * x / ((two::<T>() * k - T::one()) * two::<T>() * k),
    x.cosh()
);

ratio_series!(
    MeanSinhSinSeries,
    |x| x,
    |k| {
        let four_k = two::<T>() * two::<T>() * k;
        let x2 = x * x;
        x2 * x2
            / ((four_k - two::<T>())
                * (four_k - T::one())
                * four_k
                * (four_k + T::one()))
    },
    (x.sinh() + x.sin()) / two::<T>()
);
