//! Series of the error function and the principal branch of Lambert W
use num_traits::Float;

use super::{
    alternating_sign, argument_series, finite, pow_index, running_product,
    SeriesError,
};
use crate::traits::{Real, Series};

/// Iteration cap for the closed form of W₀. Halley's method needs fewer than
/// ten steps anywhere on the principal branch.
const LAMBERT_W_MAX_ITER: usize = 100;

argument_series!(
    /// √π/2 · erf x = Σ (-1)<sup>n</sup> x<sup>2n+1</sup> / (n! (2n+1))
    ///
    /// # Example
    ///
    /// ```
    /// use shanks::prelude::*;
    ///
    /// let erf = ErfSeries::new(0.5_f64);
    /// let sum = erf.partial_sum(12).unwrap();
    ///
    /// assert!((sum - erf.limit().unwrap()).abs() < 1E-14);
    /// ```
    ErfSeries
);

argument_series!(
    /// e<sup>x²</sup> erf x = Σ x<sup>2n+1</sup> / Γ(n + 3/2)
    ExpSquaredErfSeries
);

argument_series!(
    /// W₀(x) = Σ (-n)<sup>n-1</sup> x<sup>n</sup> / n!, summed from n = 1,
    /// for |x| < 1/e
    LambertW0Series
);

impl<T> Series<T> for ErfSeries<T>
where
    T: Real + special::Error,
{
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let x2 = self.x * self.x;
        let power = running_product(self.x, n, |k| -x2 / k);
        finite(power / T::from_index(2 * n + 1), n)
    }

    fn limit(&self) -> Option<T> {
        let two = T::one() + T::one();
        Some(T::PI().sqrt() / two * self.x.error())
    }
}

impl<T> Series<T> for ExpSquaredErfSeries<T>
where
    T: Real + special::Error + special::Gamma,
{
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        let shape = T::from_index(2 * n + 3) / T::from_index(2);
        finite(pow_index(self.x, 2 * n + 1) / shape.gamma(), n)
    }

    fn limit(&self) -> Option<T> {
        Some((self.x * self.x).exp() * self.x.error())
    }
}

impl<T: Real> Series<T> for LambertW0Series<T> {
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        // (-(n+1))^n x^(n+1) / (n+1)!, built as x/(n+1) Π -(n+1)x/j
        let np1 = T::from_index(n + 1);
        let magnitude =
            running_product(self.x / np1, n, |j| np1 * self.x / j);
        finite(alternating_sign::<T>(n) * magnitude, n)
    }

    fn limit(&self) -> Option<T> {
        lambert_w0(self.x)
    }
}

/// Solve w e<sup>w</sup> = x on the principal branch with Halley's method
fn lambert_w0<T: Real>(x: T) -> Option<T> {
    let one = T::one();
    let two = one + one;
    if x < -(-one).exp() {
        return None;
    }
    let mut w = x;
    for _ in 0..LAMBERT_W_MAX_ITER {
        let ew = w.exp();
        let f = w * ew - x;
        let dw = f / (ew * (w + one) - (w + two) * f / (two * w + two));
        w = w - dw;
        if !w.is_finite() {
            return None;
        }
        if Float::abs(dw) <= T::unit_roundoff() * Float::abs(w) {
            return Some(w);
        }
    }
    Some(w)
}
