//! Wynn's epsilon algorithm
use log::trace;

use super::table::DiagonalTable;
use super::{AccelerationConfig, AccelerationError, Estimate, Progress, Status};
use crate::traits::{magnitude, Numeric, Series, SeriesAcceleration};

/// [Wynn's epsilon algorithm](https://en.wikipedia.org/wiki/Shanks_transformation#Wynn's_epsilon_algorithm),
/// the recursive form of the Shanks transformation.
///
/// Column 0 of the table holds the raw partial sums and
///
/// ε<sub>k+1</sub><sup>(n)</sup> = ε<sub>k-1</sub><sup>(n+1)</sup> + 1 / (ε<sub>k</sub><sup>(n+1)</sup> - ε<sub>k</sub><sup>(n)</sup>)
///
/// with ε<sub>-1</sub> = 0. Even columns are estimates of the limit; column
/// 2m is exact for sequences with m geometric error components, so a
/// geometric series is summed exactly from three terms on.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// let series = Inverse1mxSeries::new(0.5_f64);
/// let mut eps = EpsilonAlgorithm::new(series, AccelerationConfig::default());
///
/// let est = eps.run().unwrap();
///
/// assert_eq!(est.value, 2.0);
/// assert_eq!(est.status, Status::Converged);
/// assert!(est.terms <= 6);
/// ```
#[derive(Debug, Clone)]
pub struct EpsilonAlgorithm<T, S> {
    series: S,
    table: DiagonalTable<T>,
    progress: Progress<T>,
}

impl<T: Numeric, S: Series<T>> EpsilonAlgorithm<T, S> {
    /// Wrap `series` in a new accelerator
    pub fn new(series: S, config: AccelerationConfig<T>) -> Self {
        Self {
            series,
            table: DiagonalTable::new(config.retain_full_table()),
            progress: Progress::new("epsilon", config),
        }
    }

    /// The series being accelerated
    pub fn series(&self) -> &S {
        &self.series
    }
}

/// Extend a Wynn table by the anti-diagonal ending in the partial sum `sum`.
///
/// Shared by the Wynn-type algorithms, which only differ in the numerator
/// of the recurrence for column `k`.
pub(crate) fn extend_wynn<T, F>(
    table: &mut DiagonalTable<T>,
    progress: &mut Progress<T>,
    sum: T,
    numerator: F,
) -> Estimate<T>
where
    T: Numeric,
    F: Fn(usize) -> T,
{
    let n = table.diagonal();
    table.push(sum);
    let mut cell = sum;
    let mut candidate = (sum, 0);

    for k in 1..=n {
        // cell (k - 1) of this diagonal against cell (k - 1) of the last
        let Some(left) = table.previous(k - 1) else {
            break;
        };
        let diff = cell - left;
        if T::is_near_zero(diff, magnitude(cell, left)) {
            // converged only if the stall confirms an earlier estimate
            let stable = progress.agrees_with_extrapolated(candidate.0)
                || progress.raw_stable();
            trace!("wynn: vanishing difference in column {} of row {}", k - 1, n);
            table.commit();
            return progress.freeze(Some(candidate), stable);
        }
        let corner = k
            .checked_sub(2)
            .and_then(|j| table.previous(j))
            .unwrap_or_else(T::zero);
        cell = corner + numerator(k) / diff;
        table.push(cell);
        if k % 2 == 0 {
            candidate = (cell, k / 2);
            progress.record(k / 2, cell);
        }
    }
    table.commit();

    match candidate {
        (_, 0) => progress.collect(),
        (value, order) => progress.extrapolate(value, order),
    }
}

impl<T: Numeric, S: Series<T>> SeriesAcceleration<T> for EpsilonAlgorithm<T, S> {
    fn advance(&mut self) -> Result<Estimate<T>, AccelerationError> {
        if let Some(est) = self.progress.frozen() {
            return Ok(est);
        }
        let (_, sum) = self.progress.pull(&self.series)?;
        if let Some(est) = self.progress.screen_repeat() {
            return Ok(est);
        }
        Ok(extend_wynn(&mut self.table, &mut self.progress, sum, |_| {
            T::one()
        }))
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
