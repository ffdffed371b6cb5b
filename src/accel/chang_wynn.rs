//! The Chang–Wynn generalization of the epsilon algorithm
use log::trace;
use std::collections::VecDeque;

use super::epsilon::extend_wynn;
use super::table::DiagonalTable;
use super::{AccelerationConfig, AccelerationError, Estimate, Progress, Status};
use crate::traits::{magnitude, Numeric, Series, SeriesAcceleration};

/// Epsilon algorithm with a row-dependent numerator.
///
/// The recurrence of the [`EpsilonAlgorithm`](super::EpsilonAlgorithm)
/// becomes
///
/// ε<sub>k+1</sub><sup>(n)</sup> = ε<sub>k-1</sub><sup>(n+1)</sup> + (1 - k + k F<sup>(n)</sup>) / (ε<sub>k</sub><sup>(n+1)</sup> - ε<sub>k</sub><sup>(n)</sup>)
///
/// with the weight
///
/// F<sup>(n)</sup> = Δ²S<sub>n+1</sub> Δ²S<sub>n</sub> / (ΔS<sub>n+2</sub> Δ²S<sub>n</sub> - ΔS<sub>n</sub> Δ²S<sub>n+1</sub>)
///
/// which is 1 for a geometric series, where the algorithm reduces to
/// epsilon. Elsewhere the weight adapts the table to the sequence and it
/// handles logarithmic convergence as well as linear convergence.
///
/// F<sup>(n)</sup> looks three partial sums ahead, so the table trails the
/// latest partial sum by one term: order m needs 2m + 2 terms. Every row of
/// the table needs its weight, so the weights are kept even without the
/// full table.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// // π²/6 - 1 with an O(1/n²) tail
/// let series = PiSquared6M1Series::new(1.0_f64);
/// let mut cw = ChangWynnAlgorithm::new(series, AccelerationConfig::default());
///
/// let est = cw.run().unwrap();
///
/// assert_eq!(est.status, Status::Converged);
/// assert!((est.value - series.limit().unwrap()).abs() < 1E-11);
/// ```
#[derive(Debug, Clone)]
pub struct ChangWynnAlgorithm<T, S> {
    series: S,
    table: DiagonalTable<T>,
    /// The latest four partial sums
    sums: VecDeque<T>,
    /// F<sup>(n)</sup> for every row n computed so far
    weights: Vec<T>,
    progress: Progress<T>,
}

impl<T: Numeric, S: Series<T>> ChangWynnAlgorithm<T, S> {
    /// Wrap `series` in a new accelerator
    pub fn new(series: S, config: AccelerationConfig<T>) -> Self {
        Self {
            series,
            table: DiagonalTable::new(config.retain_full_table()),
            sums: VecDeque::with_capacity(4),
            weights: Vec::new(),
            progress: Progress::new("chang-wynn", config),
        }
    }

    /// The series being accelerated
    pub fn series(&self) -> &S {
        &self.series
    }
}

/// F<sup>(n)</sup> from S<sub>n</sub> ..= S<sub>n+3</sub>. `None` if the
/// denominator vanishes.
fn weight<T: Numeric>(s: [T; 4]) -> Option<T> {
    let d0 = s[1] - s[0];
    let d1 = s[2] - s[1];
    let d2 = s[3] - s[2];
    let dd0 = d1 - d0;
    let dd1 = d2 - d1;
    let x = d2 * dd0;
    let y = d0 * dd1;
    let denom = x - y;
    if T::is_near_zero(denom, magnitude(x, y)) {
        None
    } else {
        Some(dd1 * dd0 / denom)
    }
}

/// Numerator producing column `k` >= 2 at a row of weight `weight`
#[inline]
fn numerator<T: Numeric>(k: usize, weight: T) -> T {
    T::one() + T::from_index(k - 1) * (weight - T::one())
}

impl<T, S> SeriesAcceleration<T> for ChangWynnAlgorithm<T, S>
where
    T: Numeric,
    S: Series<T>,
{
    fn advance(&mut self) -> Result<Estimate<T>, AccelerationError> {
        if let Some(est) = self.progress.frozen() {
            return Ok(est);
        }
        let (_, sum) = self.progress.pull(&self.series)?;
        if let Some(est) = self.progress.screen_repeat() {
            return Ok(est);
        }
        self.sums.push_back(sum);
        if self.sums.len() > 4 {
            self.sums.pop_front();
        }

        if self.sums.len() == 4 {
            let sums = [self.sums[0], self.sums[1], self.sums[2], self.sums[3]];
            match weight(sums) {
                Some(w) => self.weights.push(w),
                None => {
                    trace!("chang-wynn: vanishing weight denominator");
                    let stable = self.progress.raw_stable();
                    return Ok(self.progress.freeze(None, stable));
                }
            }
        }

        if self.sums.len() < 2 {
            return Ok(self.progress.collect());
        }
        let lagged = self.sums[self.sums.len() - 2];
        // row of column k on the diagonal ending in `lagged`
        let diagonal = self.table.diagonal();
        let weights = &self.weights;
        Ok(extend_wynn(&mut self.table, &mut self.progress, lagged, |k| {
            if k == 1 {
                T::one()
            } else {
                numerator(k, weights[diagonal - k])
            }
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
        self.table.cells() + self.weights.len()
    }
}
