//! Fourier series of polynomials on [-π, π]
use super::{alternating_sign, argument_series, finite, SeriesError};
use crate::traits::{Real, Series};

argument_series!(
    /// (3x² - π²) / 12 = Σ (-1)<sup>k</sup> cos(kx) / k², summed from k = 1,
    /// for |x| ≤ π
    QuadraticFourierSeries
);

argument_series!(
    /// x(x² - π²) / 12 = Σ (-1)<sup>k</sup> sin(kx) / k³, summed from k = 1,
    /// for |x| ≤ π
    CubicFourierSeries
);

impl<T: Real> Series<T> for QuadraticFourierSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let k = T::from_index(n + 1);
        finite(alternating_sign::<T>(n + 1) * (k * self.x).cos() / (k * k), n)
    }

    fn limit(&self) -> Option<T> {
        let x2 = self.x * self.x;
        Some((T::from_index(3) * x2 - T::PI() * T::PI()) / T::from_index(12))
    }
}

impl<T: Real> Series<T> for CubicFourierSeries<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let k = T::from_index(n + 1);
        let term = alternating_sign::<T>(n + 1) * (k * self.x).sin() / (k * k * k);
        finite(term, n)
    }

    fn limit(&self) -> Option<T> {
        let x2 = self.x * self.x;
        Some(self.x * (x2 - T::PI() * T::PI()) / T::from_index(12))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    mod quadratic {
        use super::*;
        crate::test_series_consistency!(QuadraticFourierSeries::new(1.0_f64));
    }

    mod cubic {
        use super::*;
        crate::test_series_consistency!(CubicFourierSeries::new(-2.0_f64));
    }

    #[test]
    fn quadratic_at_zero_is_alternating_basel() {
        let series = QuadraticFourierSeries::new(0.0_f64);
        assert_eq!(series.term(0).unwrap(), -1.0);
        assert_eq!(series.term(1).unwrap(), 0.25);
        assert::close(series.limit().unwrap(), -PI * PI / 12.0, 1E-15);
    }

    #[test]
    fn cubic_vanishes_at_the_ends() {
        let series = CubicFourierSeries::new(PI);
        assert::close(series.limit().unwrap(), 0.0, 1E-14);
        series
            .terms()
            .take(10)
            .for_each(|term| assert::close(term, 0.0, 1E-14));
    }

    #[test]
    fn partial_sums_approach_limits() {
        let quad = QuadraticFourierSeries::new(0.5_f64);
        let cubic = CubicFourierSeries::new(0.5_f64);
        // tails are O(1/n^2) and O(1/n^3)
        assert::close(
            quad.partial_sum(2_000).unwrap(),
            quad.limit().unwrap(),
            1E-5,
        );
        assert::close(
            cubic.partial_sum(2_000).unwrap(),
            cubic.limit().unwrap(),
            1E-9,
        );
    }
}
