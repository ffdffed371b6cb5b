//! Numeric contracts, series, and accelerator traits
use std::fmt::Debug;

use num_traits::{Float, FloatConst, FromPrimitive, Num, PrimInt, Signed};

use crate::accel::{AccelerationConfig, AccelerationError, Estimate, Status};
use crate::misc::ConvergentSequence;
use crate::series::SeriesError;

/// The arithmetic an accelerator needs from its value type.
///
/// Accelerators only ever add, subtract, multiply, divide, compare, and take
/// absolute values. The two tolerance tests are the only places where the
/// precision of the type enters the algorithms.
pub trait Numeric:
    Copy + Debug + PartialOrd + Num + Signed + FromPrimitive
{
    /// The relative rounding unit of the type, e.g. `f64::EPSILON`
    fn unit_roundoff() -> Self;

    /// Exact conversion of a table index into the value type
    fn from_index(n: usize) -> Self;

    /// `true` if `a` and `b` differ by no more than `tol`
    #[inline]
    fn is_within_tolerance(a: Self, b: Self, tol: Self) -> bool {
        (a - b).abs() <= tol
    }

    /// `true` if `value` is lost in the rounding noise of a quantity of
    /// magnitude `scale`. Used to detect divisions by a difference of two
    /// numerically identical values.
    #[inline]
    fn is_near_zero(value: Self, scale: Self) -> bool {
        value.abs() <= Self::unit_roundoff() * scale.abs()
    }
}

macro_rules! impl_numeric {
    ($kind: ty) => {
        impl Numeric for $kind {
            #[inline]
            fn unit_roundoff() -> Self {
                <$kind>::EPSILON
            }

            #[inline]
            fn from_index(n: usize) -> Self {
                n as $kind
            }
        }
    };
}

impl_numeric!(f32);
impl_numeric!(f64);

/// A [`Numeric`] with transcendental functions and constants.
///
/// Series formulas and their closed forms are written against this trait.
pub trait Real: Numeric + Float + FloatConst {}

impl<T> Real for T where T: Numeric + Float + FloatConst {}

/// Larger of two magnitudes
#[inline]
pub(crate) fn magnitude<T: Numeric>(a: T, b: T) -> T {
    let (a, b) = (a.abs(), b.abs());
    if a > b {
        a
    } else {
        b
    }
}

fn checked_index<K: PrimInt>(n: K) -> Result<usize, SeriesError> {
    n.to_usize().ok_or_else(|| SeriesError::InvalidIndex {
        index: n.to_i128().unwrap_or(i128::MAX),
    })
}

/// An infinite series of values `a_0 + a_1 + a_2 + ...` for a fixed argument.
///
/// Implementors only need to provide the argument and the `n`-th term.
/// Series are immutable after construction: asking for the same index twice
/// always yields the same value.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// let series = ExpSeries::new(1.0_f64);
///
/// assert_eq!(series.term(0).unwrap(), 1.0);
/// assert!((series.partial_sum(3).unwrap() - 8.0 / 3.0).abs() < 1E-15);
/// assert!(series.term(-1).is_err());
/// ```
pub trait Series<T: Numeric> {
    /// The argument the series was constructed with
    fn x(&self) -> T;

    /// The `n`-th addend
    fn nth_term(&self, n: usize) -> Result<T, SeriesError>;

    /// The sum of the first `n + 1` terms.
    ///
    /// The default sums the terms in order.
    fn nth_partial_sum(&self, n: usize) -> Result<T, SeriesError> {
        (0..=n).try_fold(T::zero(), |acc, k| Ok(acc + self.nth_term(k)?))
    }

    /// The value of the series in closed form, if it has one
    fn limit(&self) -> Option<T> {
        None
    }

    /// The `n`-th addend for any integral index.
    ///
    /// Fails with [`SeriesError::InvalidIndex`] if `n` is negative or does
    /// not fit in a `usize`.
    fn term<K: PrimInt>(&self, n: K) -> Result<T, SeriesError>
    where
        Self: Sized,
    {
        self.nth_term(checked_index(n)?)
    }

    /// The `n`-th partial sum for any integral index.
    fn partial_sum<K: PrimInt>(&self, n: K) -> Result<T, SeriesError>
    where
        Self: Sized,
    {
        self.nth_partial_sum(checked_index(n)?)
    }

    /// Lazily iterate the terms. Stops at the first term that cannot be
    /// computed.
    fn terms<'a>(&'a self) -> impl Iterator<Item = T> + 'a
    where
        Self: Sized,
        T: 'a,
    {
        (0..).map_while(move |n| self.nth_term(n).ok())
    }

    /// Lazily iterate the partial sums
    fn partial_sums<'a>(&'a self) -> impl Iterator<Item = T> + 'a
    where
        Self: Sized,
        T: 'a,
    {
        self.terms().partial_sums()
    }
}

impl<T, S> Series<T> for &S
where
    T: Numeric,
    S: Series<T> + ?Sized,
{
    fn x(&self) -> T {
        (**self).x()
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        (**self).nth_term(n)
    }

    fn nth_partial_sum(&self, n: usize) -> Result<T, SeriesError> {
        (**self).nth_partial_sum(n)
    }

    fn limit(&self) -> Option<T> {
        (**self).limit()
    }
}

/// A convergence accelerator driving a [`Series`].
///
/// Each call to [`advance`](SeriesAcceleration::advance) pulls one more
/// partial sum from the series, extends the internal table, and reports the
/// best estimate of the limit together with the accelerator's [`Status`].
pub trait SeriesAcceleration<T: Numeric> {
    /// Consume the next term and return the updated best estimate.
    ///
    /// Once the accelerator reaches a terminal status, further calls return
    /// the frozen estimate and pull nothing from the series.
    fn advance(&mut self) -> Result<Estimate<T>, AccelerationError>;

    /// The most refined value computed at extrapolation order `order`.
    ///
    /// Order 0 is the raw partial sum.
    fn estimate(&self, order: usize) -> Result<T, AccelerationError>;

    /// Where the accelerator is in its life cycle
    fn current_state(&self) -> Status;

    /// The latest estimate, `None` before the first call to `advance`
    fn best(&self) -> Option<Estimate<T>>;

    /// Number of raw terms pulled from the series so far
    fn terms_consumed(&self) -> usize;

    /// Extrapolation order of the current best estimate
    fn order(&self) -> usize;

    /// The configuration the accelerator was built with
    fn config(&self) -> &AccelerationConfig<T>;

    /// Number of table cells currently held in memory
    fn retained_cells(&self) -> usize;

    /// Advance until the status is terminal and return the final estimate.
    ///
    /// Terminates after at most `max_terms` calls to `advance`.
    fn run(&mut self) -> Result<Estimate<T>, AccelerationError> {
        loop {
            let est = self.advance()?;
            if est.status.is_terminal() {
                return Ok(est);
            }
        }
    }
}

impl<T, A> SeriesAcceleration<T> for Box<A>
where
    T: Numeric,
    A: SeriesAcceleration<T> + ?Sized,
{
    fn advance(&mut self) -> Result<Estimate<T>, AccelerationError> {
        (**self).advance()
    }

    fn estimate(&self, order: usize) -> Result<T, AccelerationError> {
        (**self).estimate(order)
    }

    fn current_state(&self) -> Status {
        (**self).current_state()
    }

    fn best(&self) -> Option<Estimate<T>> {
        (**self).best()
    }

    fn terms_consumed(&self) -> usize {
        (**self).terms_consumed()
    }

    fn order(&self) -> usize {
        (**self).order()
    }

    fn config(&self) -> &AccelerationConfig<T> {
        (**self).config()
    }

    fn retained_cells(&self) -> usize {
        (**self).retained_cells()
    }
}
