//! Logarithm and inverse trigonometric series
use super::{
    alternating_sign, argument_series, finite, pow_index, running_product,
    SeriesError,
};
use crate::traits::{Real, Series};

argument_series!(
    /// -ln(1 - x) = Σ x<sup>n+1</sup> / (n+1), for -1 ≤ x < 1
    ///
    /// Converges slowly as x approaches 1.
    Ln1mxSeries
);

argument_series!(
    /// ½ ln((1 + x) / (1 - x)) = atanh x = Σ x<sup>2n+1</sup> / (2n+1), for
    /// |x| < 1
    HalfLnRatioSeries
);

argument_series!(
    /// 4 arctan x = 4 Σ (-1)<sup>n</sup> x<sup>2n+1</sup> / (2n+1), for
    /// |x| ≤ 1
    FourArctanSeries
);

argument_series!(
    /// ½ asin 2x = Σ C(2n, n) x<sup>2n+1</sup> / (2n+1), for |x| ≤ ½
    HalfAsinTwoXSeries
);

argument_series!(
    /// 2 asin²(x/2) = Σ x<sup>2n</sup> / (n² C(2n, n)), summed from n = 1,
    /// for |x| ≤ 2
    TwoArcsinSquareSeries
);

impl<T: Real> Series<T> for Ln1mxSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        finite(pow_index(self.x, n + 1) / T::from_index(n + 1), n)
    }

    fn limit(&self) -> Option<T> {
        Some(-(-self.x).ln_1p())
    }
}

impl<T: Real> Series<T> for HalfLnRatioSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let power = 2 * n + 1;
        finite(pow_index(self.x, power) / T::from_index(power), n)
    }

    fn limit(&self) -> Option<T> {
        Some(self.x.atanh())
    }
}

impl<T: Real> Series<T> for FourArctanSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let power = 2 * n + 1;
        let four = T::from_index(4);
        let term = four * alternating_sign::<T>(n) * pow_index(self.x, power)
            / T::from_index(power);
        finite(term, n)
    }

    fn limit(&self) -> Option<T> {
        Some(T::from_index(4) * self.x.atan())
    }
}

impl<T: Real> Series<T> for HalfAsinTwoXSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let x2 = self.x * self.x;
        let two = T::from_index(2);
        // C(2k, k) / C(2k - 2, k - 1) = 2(2k - 1) / k
        let numer = running_product(self.x, n, |k| {
            two * (two * k - T::one()) * x2 / k
        });
        finite(numer / T::from_index(2 * n + 1), n)
    }

    fn limit(&self) -> Option<T> {
        let two = T::from_index(2);
        Some((two * self.x).asin() / two)
    }
}

impl<T: Real> Series<T> for TwoArcsinSquareSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let x2 = self.x * self.x;
        let two = T::from_index(2);
        let term = running_product(x2 / two, n, |k| {
            x2 * k * k / ((two * k + T::one()) * (two * k + two))
        });
        finite(term, n)
    }

    fn limit(&self) -> Option<T> {
        let half_asin = (self.x / T::from_index(2)).asin();
        Some(T::from_index(2) * half_asin * half_asin)
    }
}
