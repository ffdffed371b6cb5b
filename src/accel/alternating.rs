//! Shanks-type acceleration specialized to alternating series
use log::{debug, trace};

use super::table::DiagonalTable;
use super::{AccelerationConfig, AccelerationError, Estimate, Progress, Status};
use crate::traits::{magnitude, Numeric, Series, SeriesAcceleration};

/// Shift of the row index in the remainder estimate, 1 by convention
const BETA: usize = 1;

/// Acceleration of alternating series using the terms themselves as
/// remainder estimates.
///
/// For an alternating series the error of S<sub>n</sub> is well modeled by
/// a<sub>n</sub> times a slowly varying function of n. Dividing the partial
/// sums by their terms and eliminating that function order by order (Levin's
/// t-transform) avoids differencing the partial sums, which is where the
/// plain Shanks step loses digits on alternating data. Order 1 coincides
/// with the alternating Shanks step
///
/// S' = S<sub>n</sub> + a<sub>n</sub> a<sub>n+1</sub> / (a<sub>n</sub> - a<sub>n+1</sub>)
///
/// and order k uses k + 1 terms.
///
/// The usual construction of the higher orders applies Aitken's Δ² process
/// repeatedly to the order 1 sequence, as
/// [`ShanksTransform`](super::ShanksTransform) does to the partial sums.
/// Each repetition differences values that already agree in more digits,
/// so the cancellation grows with the order. Here the higher orders come
/// from the t-transform instead, which keeps dividing by the raw terms.
///
/// Terms of equal sign end the extrapolation with [`Status::Degenerate`]
/// unless the partial sums have already converged.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// let series = Ln2Series::new(1.0_f64);
/// let mut alt = ShanksTransformAlternating::new(series, AccelerationConfig::default());
///
/// let est = alt.run().unwrap();
///
/// assert_eq!(est.status, Status::Converged);
/// assert!((est.value - std::f64::consts::LN_2).abs() < 1E-12);
/// ```
#[derive(Debug, Clone)]
pub struct ShanksTransformAlternating<T, S> {
    series: S,
    /// Numerators and denominators of the transform
    table: DiagonalTable<(T, T)>,
    /// Sign reference for the next term
    last_term: Option<T>,
    progress: Progress<T>,
}

impl<T: Numeric, S: Series<T>> ShanksTransformAlternating<T, S> {
    /// Wrap `series` in a new accelerator
    pub fn new(series: S, config: AccelerationConfig<T>) -> Self {
        Self {
            series,
            table: DiagonalTable::new(config.retain_full_table()),
            last_term: None,
            progress: Progress::new("alternating shanks", config),
        }
    }

    /// The series being accelerated
    pub fn series(&self) -> &S {
        &self.series
    }

    /// `true` if the terms do not alternate at the latest term
    fn sign_repeats(&self, term: T) -> bool {
        self.last_term.map_or(false, |last| {
            (last.is_positive() && term.is_positive())
                || (last.is_negative() && term.is_negative())
        })
    }

    fn extend(&mut self, term: T, sum: T) -> Estimate<T> {
        let n = self.table.diagonal();
        let mut cell = (sum / term, T::one() / term);
        self.table.push(cell);
        let mut candidate = (sum, 0);

        for k in 1..=n {
            let Some((p_left, q_left)) = self.table.previous(k - 1) else {
                break;
            };
            let coef = coefficient::<T>(n - k, k);
            let q = cell.1 - coef * q_left;
            if T::is_near_zero(q, magnitude(cell.1, coef * q_left)) {
                let stable = self.progress.agrees_with_extrapolated(candidate.0);
                trace!("alternating shanks: vanishing denominator at order {}", k);
                self.table.commit();
                return self.progress.freeze(Some(candidate), stable);
            }
            cell = (cell.0 - coef * p_left, q);
            self.table.push(cell);
            candidate = (cell.0 / q, k);
            self.progress.record(k, candidate.0);
        }
        self.table.commit();

        match candidate {
            (_, 0) => self.progress.collect(),
            (value, order) => self.progress.extrapolate(value, order),
        }
    }
}

/// Weight of the previous diagonal when eliminating order `k` at row `n`:
/// (β+n)/(β+n+k) · ((β+n+k-1)/(β+n+k))<sup>k-2</sup>
fn coefficient<T: Numeric>(n: usize, k: usize) -> T {
    if k == 1 {
        return T::one();
    }
    let low = T::from_index(BETA + n);
    let high = T::from_index(BETA + n + k);
    let ratio = T::from_index(BETA + n + k - 1) / high;
    low / high * num_traits::pow(ratio, k - 2)
}

impl<T, S> SeriesAcceleration<T> for ShanksTransformAlternating<T, S>
where
    T: Numeric,
    S: Series<T>,
{
    fn advance(&mut self) -> Result<Estimate<T>, AccelerationError> {
        if let Some(est) = self.progress.frozen() {
            return Ok(est);
        }
        let (term, sum) = self.progress.pull(&self.series)?;
        if let Some(est) = self.progress.screen_repeat() {
            return Ok(est);
        }
        if self.table.diagonal() == 0 && term.is_zero() {
            // nothing to divide by yet; start the table at the next term
            return Ok(self.progress.collect());
        }
        if T::is_near_zero(term, magnitude(term, sum)) {
            trace!("alternating shanks: vanishing term");
            let stable = self.progress.agrees_with_extrapolated(sum)
                || self.progress.raw_stable();
            return Ok(self.progress.freeze(None, stable));
        }
        if self.sign_repeats(term) {
            debug!(
                "alternating shanks: term {} repeats the sign",
                self.progress.terms() - 1
            );
            let stable = self.progress.raw_stable();
            return Ok(self.progress.freeze(None, stable));
        }
        self.last_term = Some(term);
        Ok(self.extend(term, sum))
    }

    fn estimate(&self, order: usize) -> Result<T, AccelerationError> {
        self.progress.estimate(order)
    }

    fn current_state(&self) -> Status {
        self.progress.status()
    }

    fn best(&self) -> Option<Estimate<T>> {
        self.progress.best()
    }

    fn terms_consumed(&self) -> usize {
        self.progress.terms()
    }

    fn order(&self) -> usize {
        self.progress.order()
    }

    fn config(&self) -> &AccelerationConfig<T> {
        self.progress.config()
    }

    fn retained_cells(&self) -> usize {
        self.table.cells()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::ShanksTransform;
    use crate::series::{
        ExpSeries, FourArctanSeries, Ln2Series, Pi4Series, TermFn,
        ThreeMinusPiSeries,
    };
    use std::f64::consts::{LN_2, PI};

    fn config(max_terms: usize) -> AccelerationConfig<f64> {
        AccelerationConfig::new(max_terms, 1E-12).unwrap()
    }

    fn terms_to_reach<A: SeriesAcceleration<f64>>(
        mut accel: A,
        target: f64,
        tol: f64,
    ) -> Option<usize> {
        loop {
            let est = accel.advance().unwrap();
            if (est.value - target).abs() < tol {
                return Some(est.terms);
            }
            if est.status.is_terminal() {
                return None;
            }
        }
    }

    #[test]
    fn coefficients() {
        assert_eq!(coefficient::<f64>(5, 1), 1.0);
        // (1 + 0)/(1 + 2) at k = 2
        assert::close(coefficient::<f64>(0, 2), 1.0 / 3.0, 1E-16);
        // 2/5 (4/5)^1 at n = 1, k = 3
        assert::close(coefficient::<f64>(1, 3), 0.32, 1E-16);
    }

    #[test]
    fn order_one_is_the_alternating_shanks_step() {
        let series = Ln2Series::new(1.0_f64);
        let mut alt = ShanksTransformAlternating::new(series, config(64));
        alt.advance().unwrap();
        for n in 0..5_usize {
            alt.advance().unwrap();
            let a0 = series.term(n).unwrap();
            let a1 = series.term(n + 1).unwrap();
            let expected = series.partial_sum(n).unwrap() + a0 * a1 / (a0 - a1);
            assert::close(alt.estimate(1).unwrap(), expected, 1E-14);
        }
    }

    #[test]
    fn beats_shanks_on_the_alternating_harmonic_series() {
        let alt = ShanksTransformAlternating::new(Ln2Series::new(1.0), config(60));
        let shanks = ShanksTransform::new(Ln2Series::new(1.0), config(60));
        let n_alt = terms_to_reach(alt, LN_2, 1E-6).unwrap();
        let n_shanks = terms_to_reach(shanks, LN_2, 1E-6).unwrap();
        assert!(n_alt < n_shanks);
    }

    #[test]
    fn accelerates_alternating_constants() {
        let mut alt =
            ShanksTransformAlternating::new(Pi4Series::new(4.0_f64), config(64));
        assert::close(alt.run().unwrap().value, PI, 1E-12);

        let mut alt = ShanksTransformAlternating::new(
            ThreeMinusPiSeries::new(1.0_f64),
            config(64),
        );
        assert::close(alt.run().unwrap().value, 3.0 - PI, 1E-12);

        let mut alt = ShanksTransformAlternating::new(
            FourArctanSeries::new(0.9_f64),
            config(64),
        );
        assert::close(alt.run().unwrap().value, 4.0 * 0.9_f64.atan(), 1E-12);
    }

    #[test]
    fn equal_signs_are_degenerate() {
        let mut alt =
            ShanksTransformAlternating::new(ExpSeries::new(1.0_f64), config(64));
        assert_eq!(alt.advance().unwrap().status, Status::Collecting);
        let est = alt.advance().unwrap();
        assert_eq!(est.status, Status::Degenerate);
        assert_eq!(est.value, 2.0);
        assert_eq!(alt.terms_consumed(), 2);
    }

    #[test]
    fn constant_sequence_converges_without_degenerating() {
        let series = TermFn::new(|n: usize| if n == 0 { 3.25 } else { 0.0 });
        let mut alt = ShanksTransformAlternating::new(series, config(64));
        assert_eq!(alt.advance().unwrap().status, Status::Collecting);
        assert_eq!(alt.advance().unwrap().status, Status::Collecting);
        let est = alt.advance().unwrap();
        assert_eq!(est.status, Status::Converged);
        assert_eq!(est.value, 3.25);
    }

    #[test]
    fn all_zero_series_converges_to_zero() {
        let mut alt =
            ShanksTransformAlternating::new(TermFn::new(|_| 0.0_f64), config(64));
        let est = alt.run().unwrap();
        assert_eq!(est.status, Status::Converged);
        assert_eq!((est.value, est.terms), (0.0, 2));
    }

    #[test]
    fn zero_term_after_extrapolating_is_degenerate() {
        // 1 - 1/2 + 0 + 1/8: order 1 gives 2/3 before the sum stalls
        let terms = [1.0, -0.5, 0.0, 0.125, -0.1];
        let series = TermFn::new(move |n: usize| terms[n.min(4)]);
        let mut alt = ShanksTransformAlternating::new(series, config(64));
        alt.advance().unwrap();
        let second = alt.advance().unwrap();
        assert_eq!(second.status, Status::Extrapolating);
        let est = alt.advance().unwrap();
        assert_eq!(est.status, Status::Degenerate);
        assert_eq!(est.value, second.value);
        assert::close(est.value, 2.0 / 3.0, 1E-15);
    }

    #[test]
    fn leading_zero_term_is_skipped() {
        // 0 - 1 + 1/2 - 1/3 + ... = -ln 2
        let series = TermFn::new(|n: usize| {
            if n == 0 {
                0.0
            } else {
                Ln2Series::new(-1.0).term(n - 1).unwrap()
            }
        });
        let mut alt = ShanksTransformAlternating::new(series, config(64));
        let first = alt.advance().unwrap();
        assert_eq!((first.value, first.status), (0.0, Status::Collecting));
        let est = alt.run().unwrap();
        assert_eq!(est.status, Status::Converged);
        assert::close(est.value, -LN_2, 1E-12);
    }

    #[test]
    fn window_and_full_table_agree() {
        let mut window =
            ShanksTransformAlternating::new(Ln2Series::new(1.0_f64), config(64));
        let mut full = ShanksTransformAlternating::new(
            Ln2Series::new(1.0_f64),
            config(64).with_full_table(true),
        );
        for _ in 0..8 {
            assert_eq!(window.advance().unwrap(), full.advance().unwrap());
        }
        assert_eq!(window.retained_cells(), 8);
        assert_eq!(full.retained_cells(), 36);
    }
}
