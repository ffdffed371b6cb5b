//! Convergence accelerators
//!
//! Every accelerator owns a [`Series`], pulls one term per call to
//! [`advance`](SeriesAcceleration::advance), and grows its extrapolation
//! table incrementally. The bookkeeping common to all of them (term budget,
//! state machine, convergence test, per-order estimates) lives in
//! [`Progress`].
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use log::{debug, trace};
use std::fmt;

use crate::series::SeriesError;
use crate::traits::{magnitude, Numeric, Series, SeriesAcceleration};

mod alternating;
mod chang_wynn;
mod config;
mod epsilon;
mod rho;
mod shanks;
mod table;
mod theta;

pub use alternating::ShanksTransformAlternating;
pub use chang_wynn::ChangWynnAlgorithm;
pub use config::{AccelerationConfig, ConfigError};
pub use epsilon::EpsilonAlgorithm;
pub use rho::RhoAlgorithm;
pub use shanks::ShanksTransform;
pub use theta::ThetaAlgorithm;

/// Life cycle of an accelerator.
///
/// `Converged`, `Degenerate`, and `NoConvergence` are terminal: once
/// reached, the estimate is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum Status {
    /// Too few terms for an extrapolated value
    Collecting,
    /// Producing refined estimates
    Extrapolating,
    /// Successive estimates agree to within the tolerance
    Converged,
    /// A recurrence step would divide by a vanishing difference
    Degenerate,
    /// The term budget ran out before convergence
    NoConvergence,
}

impl Status {
    /// `true` if the accelerator will not improve its estimate any further
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converged | Self::Degenerate | Self::NoConvergence)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Collecting => "collecting",
            Self::Extrapolating => "extrapolating",
            Self::Converged => "converged",
            Self::Degenerate => "degenerate",
            Self::NoConvergence => "no convergence",
        };
        write!(f, "{s}")
    }
}

/// An estimate of the limit paired with the state that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Estimate<T> {
    /// The estimated limit
    pub value: T,
    /// The accelerator's state after producing `value`
    pub status: Status,
    /// Extrapolation order of `value`. Zero for a raw partial sum.
    pub order: usize,
    /// Raw terms consumed to produce `value`
    pub terms: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum AccelerationError {
    /// The series failed to produce a term
    Series(SeriesError),
    /// No value has been computed at the requested order yet
    OrderUnavailable {
        order: usize,
        /// The highest order computed so far, if any
        highest: Option<usize>,
    },
}

impl From<SeriesError> for AccelerationError {
    fn from(err: SeriesError) -> Self {
        Self::Series(err)
    }
}

impl std::error::Error for AccelerationError {}

impl fmt::Display for AccelerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Series(err) => write!(f, "series error: {err}"),
            Self::OrderUnavailable {
                order,
                highest: Some(highest),
            } => write!(
                f,
                "order {order} is unavailable (highest computed: {highest})"
            ),
            Self::OrderUnavailable {
                order,
                highest: None,
            } => write!(
                f,
                "order {order} is unavailable (nothing computed yet)"
            ),
        }
    }
}

/// State shared by every accelerator: the running partial sum, the status,
/// and the latest value at every extrapolation order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Progress<T> {
    name: &'static str,
    config: AccelerationConfig<T>,
    status: Status,
    terms: usize,
    sum: T,
    last_term: Option<T>,
    /// The term and the partial sum before the latest pull
    previous_term: Option<T>,
    previous_sum: T,
    /// A partial sum repeated before anything was extrapolated; the next
    /// term decides between a constant tail and a zero term
    pending_repeat: bool,
    best: Option<Estimate<T>>,
    /// Last extrapolated value and its order
    extrapolated: Option<(T, usize)>,
    by_order: Vec<T>,
}

impl<T: Numeric> Progress<T> {
    pub(crate) fn new(name: &'static str, config: AccelerationConfig<T>) -> Self {
        Self {
            name,
            config,
            status: Status::Collecting,
            terms: 0,
            sum: T::zero(),
            last_term: None,
            previous_term: None,
            previous_sum: T::zero(),
            pending_repeat: false,
            best: None,
            extrapolated: None,
            by_order: Vec::new(),
        }
    }

    /// The frozen estimate, if the status is terminal
    pub(crate) fn frozen(&self) -> Option<Estimate<T>> {
        self.best.filter(|_| self.status.is_terminal())
    }

    /// Pull the next term. Returns the term and the new partial sum.
    pub(crate) fn pull<S>(&mut self, series: &S) -> Result<(T, T), AccelerationError>
    where
        S: Series<T>,
    {
        let term = series.nth_term(self.terms)?;
        self.previous_term = self.last_term;
        self.previous_sum = self.sum;
        self.sum = self.sum + term;
        self.terms += 1;
        self.last_term = Some(term);
        self.record(0, self.sum);
        trace!(
            "{}: n = {}, term = {:?}, sum = {:?}",
            self.name,
            self.terms - 1,
            term,
            self.sum
        );
        Ok((term, self.sum))
    }

    /// `true` if the last two raw terms are within the tolerance, i.e. the
    /// partial sums have stayed put over more than one step
    pub(crate) fn raw_stable(&self) -> bool {
        let small = |term: Option<T>| {
            term.map_or(false, |a| a.abs() <= self.config.tolerance())
        };
        small(self.last_term) && small(self.previous_term)
    }

    /// Screen the partial sum just pulled for a repeat of the previous one.
    ///
    /// A repeated sum makes every difference of the table vanish, but a
    /// single zero term says nothing about the tail. The repeat converges
    /// only if it confirms the last extrapolated value or the raw sums were
    /// already standing still. Before anything has been extrapolated the
    /// decision waits for the next term, which converges if it repeats the
    /// sum again and is degenerate otherwise.
    ///
    /// Returns the estimate to report, or `None` if the table may be
    /// extended with the new sum.
    pub(crate) fn screen_repeat(&mut self) -> Option<Estimate<T>> {
        let repeated = self.terms > 1
            && T::is_near_zero(
                self.sum - self.previous_sum,
                magnitude(self.sum, self.previous_sum),
            );

        if !repeated {
            if self.pending_repeat {
                debug!(
                    "{}: partial sum moved again after a repeat at term {}",
                    self.name,
                    self.terms - 2
                );
                return Some(self.freeze(None, false));
            }
            return None;
        }

        let tolerance = self.config.tolerance();
        if self.agrees_with_extrapolated(self.sum) {
            Some(self.freeze(None, true))
        } else if self.pending_repeat
            || self.previous_term.map_or(false, |a| a.abs() <= tolerance)
        {
            Some(self.finish(Estimate {
                value: self.sum,
                status: Status::Converged,
                order: 0,
                terms: self.terms,
            }))
        } else if self.extrapolated.is_none() {
            trace!("{}: repeated partial sum, waiting for the next term", self.name);
            self.pending_repeat = true;
            Some(self.collect())
        } else {
            debug!(
                "{}: partial sum repeats at term {} away from the extrapolation",
                self.name,
                self.terms - 1
            );
            Some(self.freeze(None, false))
        }
    }

    /// `true` if `value` is within the tolerance of the last extrapolated
    /// value
    pub(crate) fn agrees_with_extrapolated(&self, value: T) -> bool {
        self.extrapolated.map_or(false, |(prev, _)| {
            T::is_within_tolerance(prev, value, self.config.tolerance())
        })
    }

    /// Remember `value` as the latest estimate of order `order`
    pub(crate) fn record(&mut self, order: usize, value: T) {
        if order < self.by_order.len() {
            self.by_order[order] = value;
        } else {
            self.by_order.push(value);
        }
    }

    /// Report the raw partial sum while the table is too small to
    /// extrapolate
    pub(crate) fn collect(&mut self) -> Estimate<T> {
        self.finish(Estimate {
            value: self.sum,
            status: Status::Collecting,
            order: 0,
            terms: self.terms,
        })
    }

    /// Report an extrapolated value, converging if it agrees with the
    /// previous one
    pub(crate) fn extrapolate(&mut self, value: T, order: usize) -> Estimate<T> {
        let status = match self.extrapolated {
            Some((prev, _))
                if T::is_within_tolerance(prev, value, self.config.tolerance()) =>
            {
                Status::Converged
            }
            _ => Status::Extrapolating,
        };
        self.extrapolated = Some((value, order));
        self.finish(Estimate {
            value,
            status,
            order,
            terms: self.terms,
        })
    }

    /// Stop after a vanishing denominator.
    ///
    /// `candidate` is the best value of the current step. Unless it is
    /// extrapolated, the last extrapolated value is kept, and failing that
    /// the raw sum. `stable` selects between `Converged` and `Degenerate`.
    pub(crate) fn freeze(
        &mut self,
        candidate: Option<(T, usize)>,
        stable: bool,
    ) -> Estimate<T> {
        let (value, order) = candidate
            .filter(|&(_, order)| order > 0)
            .or(self.extrapolated)
            .unwrap_or((self.sum, 0));
        let status = if stable {
            Status::Converged
        } else {
            Status::Degenerate
        };
        self.finish(Estimate {
            value,
            status,
            order,
            terms: self.terms,
        })
    }

    fn finish(&mut self, mut estimate: Estimate<T>) -> Estimate<T> {
        if !estimate.status.is_terminal()
            && self.terms >= self.config.max_terms()
        {
            estimate.status = Status::NoConvergence;
        }
        if estimate.status != self.status {
            debug!(
                "{}: {} -> {} after {} terms (order = {}, value = {:?})",
                self.name,
                self.status,
                estimate.status,
                self.terms,
                estimate.order,
                estimate.value
            );
        }
        self.status = estimate.status;
        self.best = Some(estimate);
        estimate
    }

    pub(crate) fn estimate(&self, order: usize) -> Result<T, AccelerationError> {
        self.by_order.get(order).copied().ok_or(
            AccelerationError::OrderUnavailable {
                order,
                highest: self.by_order.len().checked_sub(1),
            },
        )
    }

    #[inline]
    pub(crate) fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub(crate) fn best(&self) -> Option<Estimate<T>> {
        self.best
    }

    #[inline]
    pub(crate) fn terms(&self) -> usize {
        self.terms
    }

    #[inline]
    pub(crate) fn order(&self) -> usize {
        self.best.map_or(0, |est| est.order)
    }

    #[inline]
    pub(crate) fn config(&self) -> &AccelerationConfig<T> {
        &self.config
    }
}

/// Run-time choice of accelerator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum AcceleratorKind {
    /// [`EpsilonAlgorithm`]
    Epsilon,
    /// [`RhoAlgorithm`]
    Rho,
    /// [`ShanksTransform`]
    Shanks,
    /// [`ShanksTransformAlternating`]
    ShanksAlternating,
    /// [`ThetaAlgorithm`]
    Theta,
    /// [`ChangWynnAlgorithm`]
    ChangWynn,
}

impl AcceleratorKind {
    /// Every accelerator
    pub const ALL: [AcceleratorKind; 6] = [
        AcceleratorKind::Epsilon,
        AcceleratorKind::Rho,
        AcceleratorKind::Shanks,
        AcceleratorKind::ShanksAlternating,
        AcceleratorKind::Theta,
        AcceleratorKind::ChangWynn,
    ];
}

impl fmt::Display for AcceleratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Epsilon => "epsilon",
            Self::Rho => "rho",
            Self::Shanks => "shanks",
            Self::ShanksAlternating => "alternating shanks",
            Self::Theta => "theta",
            Self::ChangWynn => "chang-wynn",
        };
        write!(f, "{s}")
    }
}

/// Wrap `series` in the accelerator selected by `kind`.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// let config = AccelerationConfig::default();
///
/// let alternating = [
///     AcceleratorKind::Epsilon,
///     AcceleratorKind::Shanks,
///     AcceleratorKind::ShanksAlternating,
/// ];
/// for kind in alternating {
///     let mut accel = accelerate(kind, Ln2Series::new(1.0_f64), config);
///     let est = accel.run().unwrap();
///     assert!((est.value - std::f64::consts::LN_2).abs() < 1E-10);
/// }
///
/// // rho and its relatives are for sums whose tail decays like a power of 1/n
/// let series = PiSquared6M1Series::new(1.0_f64);
/// for kind in [AcceleratorKind::Rho, AcceleratorKind::ChangWynn] {
///     let mut accel = accelerate(kind, series, config);
///     let est = accel.run().unwrap();
///     assert!((est.value - series.limit().unwrap()).abs() < 1E-10);
/// }
/// ```
pub fn accelerate<'a, T, S>(
    kind: AcceleratorKind,
    series: S,
    config: AccelerationConfig<T>,
) -> Box<dyn SeriesAcceleration<T> + 'a>
where
    T: Numeric + 'a,
    S: Series<T> + 'a,
{
    match kind {
        AcceleratorKind::Epsilon => {
            Box::new(EpsilonAlgorithm::new(series, config))
        }
        AcceleratorKind::Rho => Box::new(RhoAlgorithm::new(series, config)),
        AcceleratorKind::Shanks => {
            Box::new(ShanksTransform::new(series, config))
        }
        AcceleratorKind::ShanksAlternating => {
            Box::new(ShanksTransformAlternating::new(series, config))
        }
        AcceleratorKind::Theta => Box::new(ThetaAlgorithm::new(series, config)),
        AcceleratorKind::ChangWynn => {
            Box::new(ChangWynnAlgorithm::new(series, config))
        }
    }
}
