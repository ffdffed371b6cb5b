//! Iterated Aitken Δ² / Shanks transformation
use log::trace;

use super::table::Column;
use super::{AccelerationConfig, AccelerationError, Estimate, Progress, Status};
use crate::traits::{magnitude, Numeric, Series, SeriesAcceleration};

/// The [Shanks transformation](https://en.wikipedia.org/wiki/Shanks_transformation)
/// applied repeatedly to its own output.
///
/// Order j is Aitken's Δ² process applied to order j - 1:
///
/// S' = S<sub>n+1</sub> - (S<sub>n+1</sub> - S<sub>n</sub>)² / (S<sub>n+1</sub> - 2S<sub>n</sub> + S<sub>n-1</sub>)
///
/// Each new partial sum cascades one new value into every order whose
/// predecessor has at least three values, so 2j + 1 terms give order j.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// let series = Pi4Series::new(4.0_f64);
/// let mut shanks = ShanksTransform::new(series, AccelerationConfig::default());
///
/// let est = shanks.run().unwrap();
///
/// assert!((est.value - std::f64::consts::PI).abs() < 1E-10);
/// ```
#[derive(Debug, Clone)]
pub struct ShanksTransform<T, S> {
    series: S,
    columns: Vec<Column<T>>,
    progress: Progress<T>,
}

impl<T: Numeric, S: Series<T>> ShanksTransform<T, S> {
    /// Wrap `series` in a new accelerator
    pub fn new(series: S, config: AccelerationConfig<T>) -> Self {
        Self {
            series,
            columns: Vec::new(),
            progress: Progress::new("shanks", config),
        }
    }

    /// The series being accelerated
    pub fn series(&self) -> &S {
        &self.series
    }

    fn push(&mut self, order: usize, value: T) {
        if order == self.columns.len() {
            let retain_all = self.progress.config().retain_full_table();
            self.columns.push(Column::new(retain_all));
        }
        self.columns[order].push(value);
        self.progress.record(order, value);
    }
}

impl<T: Numeric, S: Series<T>> SeriesAcceleration<T> for ShanksTransform<T, S> {
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

        let mut order = 1;
        while let Some((a, b, c)) =
            self.columns.get(order - 1).and_then(Column::last_three)
        {
            let delta = c - b;
            let denom = delta - (b - a);
            if T::is_near_zero(denom, magnitude(magnitude(a, b), c)) {
                let stable = self.progress.agrees_with_extrapolated(c)
                    || self.progress.raw_stable();
                trace!("shanks: vanishing second difference at order {}", order);
                return Ok(self.progress.freeze(Some(candidate), stable));
            }
            let value = c - delta * delta / denom;
            self.push(order, value);
            candidate = (value, order);
            order += 1;
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
