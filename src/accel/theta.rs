//! Brezinski's theta algorithm
use log::trace;

use super::table::Column;
use super::{AccelerationConfig, AccelerationError, Estimate, Progress, Status};
use crate::traits::{magnitude, Numeric, Series, SeriesAcceleration};

/// Brezinski's theta algorithm.
///
/// An epsilon table whose even columns are corrected by a Δ² step of the
/// odd column before them:
///
/// θ<sub>2k+1</sub><sup>(n)</sup> = θ<sub>2k-1</sub><sup>(n+1)</sup> + 1 / Δθ<sub>2k</sub><sup>(n)</sup>
///
/// θ<sub>2k+2</sub><sup>(n)</sup> = θ<sub>2k</sub><sup>(n+1)</sup> + Δθ<sub>2k</sub><sup>(n+1)</sup> Δθ<sub>2k+1</sub><sup>(n+1)</sup> / Δ²θ<sub>2k+1</sub><sup>(n)</sup>
///
/// with θ<sub>-1</sub> = 0, θ<sub>0</sub><sup>(n)</sup> = S<sub>n</sub> and
/// Δ acting on n. Even columns are estimates of the limit and order k needs
/// 3k + 1 terms. The correction makes it accelerate logarithmic convergence
/// as well as linear convergence, though with less stability than rho on
/// the former.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// let series = OneTwelfthSeries::new(1.0_f64);
/// let mut theta = ThetaAlgorithm::new(series, AccelerationConfig::default());
///
/// let est = theta.run().unwrap();
///
/// assert_eq!(est.status, Status::Converged);
/// assert!((est.value - 1.0 / 12.0).abs() < 1E-14);
/// ```
#[derive(Debug, Clone)]
pub struct ThetaAlgorithm<T, S> {
    series: S,
    /// Column j of the table; only the latest three values without the full
    /// table
    columns: Vec<Column<T>>,
    progress: Progress<T>,
}

impl<T: Numeric, S: Series<T>> ThetaAlgorithm<T, S> {
    /// Wrap `series` in a new accelerator
    pub fn new(series: S, config: AccelerationConfig<T>) -> Self {
        Self {
            series,
            columns: Vec::new(),
            progress: Progress::new("theta", config),
        }
    }

    /// The series being accelerated
    pub fn series(&self) -> &S {
        &self.series
    }

    fn push(&mut self, j: usize, value: T) {
        if j == self.columns.len() {
            let retain_all = self.progress.config().retain_full_table();
            self.columns.push(Column::new(retain_all));
        }
        self.columns[j].push(value);
        if j % 2 == 0 {
            self.progress.record(j / 2, value);
        }
    }

    fn vanish(&mut self, candidate: (T, usize), j: usize) -> Estimate<T> {
        let stable = self.progress.agrees_with_extrapolated(candidate.0)
            || self.progress.raw_stable();
        trace!("theta: vanishing difference below column {}", j);
        self.progress.freeze(Some(candidate), stable)
    }
}

impl<T: Numeric, S: Series<T>> SeriesAcceleration<T> for ThetaAlgorithm<T, S> {
    fn advance(&mut self) -> Result<Estimate<T>, AccelerationError> {
        if let Some(est) = self.progress.frozen() {
            return Ok(est);
        }
        let (_, sum) = self.progress.pull(&self.series)?;
        if let Some(est) = self.progress.screen_repeat() {
            return Ok(est);
        }
        self.push(0, sum);
        let mut candidate = (sum, 0);

        // Column j gains a value whenever column j - 1 did. The latest value
        // of column j then sits at row N - 1, N - 3, N - 4, N - 6, ... for
        // j = 1, 2, 3, 4, ..., which is what the offsets below pick.
        let mut j = 1;
        loop {
            let below = &self.columns[j - 1];
            let cell = if j % 2 == 1 {
                let (Some(left), Some(right)) = (below.back(1), below.back(0))
                else {
                    break;
                };
                let corner = match j {
                    1 => T::zero(),
                    _ => match self.columns[j - 2].back(2) {
                        Some(corner) => corner,
                        None => break,
                    },
                };
                let diff = right - left;
                if T::is_near_zero(diff, magnitude(left, right)) {
                    return Ok(self.vanish(candidate, j));
                }
                corner + T::one() / diff
            } else {
                let Some((a, b, c)) = below.last_three() else {
                    break;
                };
                let even = &self.columns[j - 2];
                let (Some(e1), Some(e2)) = (even.back(2), even.back(1)) else {
                    break;
                };
                let second = (c - b) - (b - a);
                if T::is_near_zero(second, magnitude(magnitude(a, b), c)) {
                    return Ok(self.vanish(candidate, j));
                }
                e1 + (e2 - e1) * (c - b) / second
            };
            self.push(j, cell);
            if j % 2 == 0 {
                candidate = (cell, j / 2);
            }
            j += 1;
        }

        Ok(match candidate {
            (_, 0) => self.progress.collect(),
            (value, order) => self.progress.extrapolate(value, order),
        })
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
        self.columns.iter().map(Column::len).sum()
    }
}
