//! Wynn's rho algorithm
use super::epsilon::extend_wynn;
use super::table::DiagonalTable;
use super::{AccelerationConfig, AccelerationError, Estimate, Progress, Status};
use crate::traits::{Numeric, Series, SeriesAcceleration};

/// Wynn's rho algorithm.
///
/// Same table as the [`EpsilonAlgorithm`](super::EpsilonAlgorithm) with the
/// interpolation points x<sub>n</sub> = n + 1 entering the recurrence
///
/// ρ<sub>k+1</sub><sup>(n)</sup> = ρ<sub>k-1</sub><sup>(n+1)</sup> + (x<sub>n+k+1</sub> - x<sub>n</sub>) / (ρ<sub>k</sub><sup>(n+1)</sup> - ρ<sub>k</sub><sup>(n)</sup>)
///
/// It extrapolates sequences whose error decays like a power of 1/n, e.g.
/// ζ-type series, which the epsilon algorithm barely improves. It does
/// poorly on alternating series.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// // π²/6 - 1 with an O(1/n²) tail
/// let series = PiSquared6M1Series::new(1.0_f64);
/// let mut rho = RhoAlgorithm::new(series, AccelerationConfig::default());
///
/// let est = rho.run().unwrap();
///
/// assert_eq!(est.status, Status::Converged);
/// assert!((est.value - series.limit().unwrap()).abs() < 1E-10);
/// ```
#[derive(Debug, Clone)]
pub struct RhoAlgorithm<T, S> {
    series: S,
    table: DiagonalTable<T>,
    progress: Progress<T>,
}

impl<T: Numeric, S: Series<T>> RhoAlgorithm<T, S> {
    /// Wrap `series` in a new accelerator
    pub fn new(series: S, config: AccelerationConfig<T>) -> Self {
        Self {
            series,
            table: DiagonalTable::new(config.retain_full_table()),
            progress: Progress::new("rho", config),
        }
    }

    /// The series being accelerated
    pub fn series(&self) -> &S {
        &self.series
    }
}

impl<T: Numeric, S: Series<T>> SeriesAcceleration<T> for RhoAlgorithm<T, S> {
    fn advance(&mut self) -> Result<Estimate<T>, AccelerationError> {
        if let Some(est) = self.progress.frozen() {
            return Ok(est);
        }
        let (_, sum) = self.progress.pull(&self.series)?;
        if let Some(est) = self.progress.screen_repeat() {
            return Ok(est);
        }
        // x_{n+k} - x_n = k
        Ok(extend_wynn(
            &mut self.table,
            &mut self.progress,
            sum,
            T::from_index,
        ))
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
    use crate::accel::EpsilonAlgorithm;
    use crate::consts::BASEL;
    use crate::series::{OneSeries, PiSquared6M1Series, TermFn};

    fn config(max_terms: usize) -> AccelerationConfig<f64> {
        AccelerationConfig::new(max_terms, 1E-12).unwrap()
    }

    #[test]
    fn accelerates_logarithmic_convergence() {
        let series = PiSquared6M1Series::new(1.0_f64);
        let mut rho = RhoAlgorithm::new(series, config(64));
        let est = rho.run().unwrap();
        assert_eq!(est.status, Status::Converged);
        assert::close(est.value, BASEL - 1.0, 1E-10);
        assert!(est.terms < 30);
    }

    #[test]
    fn beats_epsilon_on_logarithmic_convergence() {
        let series = PiSquared6M1Series::new(1.0_f64);
        let mut rho = RhoAlgorithm::new(series, config(20));
        let mut eps = EpsilonAlgorithm::new(series, config(20));
        let rho_est = rho.run().unwrap();
        let eps_est = eps.run().unwrap();
        let limit = BASEL - 1.0;
        assert!((rho_est.value - limit).abs() < (eps_est.value - limit).abs());
    }

    #[test]
    fn basel_series_from_term_fn() {
        let series = TermFn::new(|n: usize| 1.0 / ((n + 1) * (n + 1)) as f64);
        let mut rho = RhoAlgorithm::new(series, config(64));
        let est = rho.run().unwrap();
        assert::close(est.value, BASEL, 1E-9);
    }

    #[test]
    fn telescoping_series() {
        let mut rho = RhoAlgorithm::new(OneSeries::new(1.0_f64), config(64));
        let est = rho.run().unwrap();
        assert_eq!(est.status, Status::Converged);
        assert::close(est.value, 1.0, 1E-12);
    }

    #[test]
    fn constant_sequence_converges_without_degenerating() {
        let series = TermFn::new(|n: usize| if n == 0 { -1.5 } else { 0.0 });
        let mut rho = RhoAlgorithm::new(series, config(64));
        rho.advance().unwrap();
        assert_eq!(rho.advance().unwrap().status, Status::Collecting);
        let est = rho.advance().unwrap();
        assert_eq!(est.status, Status::Converged);
        assert_eq!((est.value, est.terms), (-1.5, 3));
        assert_eq!(rho.series().limit(), None);
    }
}
