//! Series whose partial sums feed the accelerators
//!
//! Every series is a small immutable value holding its argument. Terms are
//! zero-based and computed from scratch on each call, so a series can be
//! shared between any number of accelerators.
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::traits::{Numeric, Series};

mod constants;
mod elementary;
mod fourier;
mod logarithmic;
mod rational;
mod special;

pub use constants::*;
pub use elementary::*;
pub use fourier::*;
pub use logarithmic::*;
pub use rational::*;
pub use special::*;

/// An encounterable error when computing a term of a series
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum SeriesError {
    /// The requested index is negative or does not fit in a `usize`
    InvalidIndex { index: i128 },
    /// The term overflowed or is NaN
    TermNotFinite { index: usize },
}

impl std::error::Error for SeriesError {}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index } => {
                write!(f, "invalid term index: {index}")
            }
            Self::TermNotFinite { index } => {
                write!(f, "term {index} is not finite")
            }
        }
    }
}

/// Declares a series type parameterized only by its argument `x`
macro_rules! argument_series {
    ($(#[$meta:meta])* $name: ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[cfg_attr(
            feature = "serde1",
            derive(serde::Serialize, serde::Deserialize)
        )]
        #[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
        pub struct $name<T> {
            x: T,
        }

        impl<T> $name<T> {
            /// Create the series for argument `x`
            #[inline]
            pub fn new(x: T) -> Self {
                Self { x }
            }
        }
    };
}

pub(crate) use argument_series;

/// `first * f(1) * f(2) * ... * f(n)`.
///
/// Factorial-type terms are built as running products so that neither the
/// power nor the factorial overflows on its own.
///
/// Nothing is cached between calls, so the `n`-th term costs `n`
/// multiplications and pulling the first `n` terms one index at a time
/// costs O(n²). That is cheap next to the accelerators, whose tables are
/// O(n²) in time anyway; use [`running_sum`] when a whole partial sum is
/// wanted in one pass.
#[inline]
pub(crate) fn running_product<T, F>(first: T, n: usize, f: F) -> T
where
    T: Numeric,
    F: Fn(T) -> T,
{
    (1..=n).fold(first, |acc, k| acc * f(T::from_index(k)))
}

/// Sum of the first `n + 1` terms of a [`running_product`] sequence, in
/// O(n) multiplications
#[inline]
pub(crate) fn running_sum<T, F>(first: T, n: usize, f: F) -> T
where
    T: Numeric,
    F: Fn(T) -> T,
{
    (1..=n)
        .fold((first, first), |(sum, term), k| {
            let term = term * f(T::from_index(k));
            (sum + term, term)
        })
        .0
}

/// (-1)<sup>n</sup>
#[inline]
pub(crate) fn alternating_sign<T: Numeric>(n: usize) -> T {
    if n % 2 == 0 {
        T::one()
    } else {
        -T::one()
    }
}

/// x<sup>n</sup> by repeated squaring
#[inline]
pub(crate) fn pow_index<T: Numeric>(x: T, n: usize) -> T {
    num_traits::pow(x, n)
}

#[inline]
pub(crate) fn finite<T: crate::traits::Real>(
    value: T,
    index: usize,
) -> Result<T, SeriesError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SeriesError::TermNotFinite { index })
    }
}

/// A series defined by an arbitrary term function.
///
/// Useful for one-off formulas and for synthetic sequences.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
///
/// // 1 + 1/4 + 1/9 + ...
/// let basel = TermFn::new(|n: usize| 1.0 / ((n + 1) * (n + 1)) as f64)
///     .with_limit(std::f64::consts::PI.powi(2) / 6.0);
///
/// assert_eq!(basel.term(1).unwrap(), 0.25);
/// assert!(basel.limit().is_some());
/// ```
#[derive(Clone)]
pub struct TermFn<T, F> {
    x: T,
    limit: Option<T>,
    f: F,
}

impl<T, F> TermFn<T, F>
where
    T: Numeric,
    F: Fn(usize) -> T,
{
    /// Create a series whose `n`-th term is `f(n)`
    pub fn new(f: F) -> Self {
        Self {
            x: T::zero(),
            limit: None,
            f,
        }
    }

    /// Record the argument the term function was built for
    #[must_use]
    pub fn with_x(mut self, x: T) -> Self {
        self.x = x;
        self
    }

    /// Record the known value of the series
    #[must_use]
    pub fn with_limit(mut self, limit: T) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<T: fmt::Debug, F> fmt::Debug for TermFn<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermFn")
            .field("x", &self.x)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl<T, F> Series<T> for TermFn<T, F>
where
    T: Numeric,
    F: Fn(usize) -> T,
{
    fn x(&self) -> T {
        self.x
    }

    fn nth_term(&self, n: usize) -> Result<T, SeriesError> {
        Ok((self.f)(n))
    }

    fn limit(&self) -> Option<T> {
        self.limit
    }
}
