#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::{DEFAULT_MAX_TERMS, DEFAULT_TOLERANCE};
use crate::traits::Numeric;

/// Parameters shared by every accelerator
///
/// # Example
///
/// ```
/// use shanks::accel::{AccelerationConfig, ConfigError};
///
/// let config = AccelerationConfig::new(32, 1E-10)
///     .unwrap()
///     .with_full_table(true);
///
/// assert_eq!(config.max_terms(), 32);
/// assert!(config.retain_full_table());
///
/// assert_eq!(
///     AccelerationConfig::new(0, 1E-10),
///     Err(ConfigError::MaxTermsTooLow { max_terms: 0 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct AccelerationConfig<T> {
    /// Upper bound on raw terms pulled from the series
    max_terms: usize,
    /// Successive estimates closer than this are converged
    tolerance: T,
    /// Keep every table cell instead of the two latest diagonals
    retain_full_table: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ConfigError {
    /// The term budget must allow at least one term
    MaxTermsTooLow { max_terms: usize },
    /// The tolerance is infinite or NaN
    ToleranceNotFinite,
    /// The tolerance is negative
    ToleranceTooLow,
}

impl<T: Numeric> AccelerationConfig<T> {
    /// Create a new configuration that keeps only a sliding window of the
    /// extrapolation table.
    ///
    /// # Arguments
    /// - max_terms: the most raw terms an accelerator may pull
    /// - tolerance: convergence threshold on successive estimates
    pub fn new(max_terms: usize, tolerance: T) -> Result<Self, ConfigError> {
        if max_terms == 0 {
            Err(ConfigError::MaxTermsTooLow { max_terms })
        } else if (tolerance - tolerance) != T::zero() {
            // x - x is NaN for both NaN and ±∞
            Err(ConfigError::ToleranceNotFinite)
        } else if tolerance < T::zero() {
            Err(ConfigError::ToleranceTooLow)
        } else {
            Ok(Self::new_unchecked(max_terms, tolerance))
        }
    }

    /// Creates a new configuration without checking whether the parameters
    /// are valid.
    #[inline]
    #[must_use]
    pub fn new_unchecked(max_terms: usize, tolerance: T) -> Self {
        Self {
            max_terms,
            tolerance,
            retain_full_table: false,
        }
    }

    /// Choose between retaining the full table and a minimal window
    #[must_use]
    pub fn with_full_table(self, retain_full_table: bool) -> Self {
        Self {
            retain_full_table,
            ..self
        }
    }

    /// Upper bound on raw terms pulled from the series
    #[inline]
    pub fn max_terms(&self) -> usize {
        self.max_terms
    }

    /// Convergence threshold on successive estimates
    #[inline]
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// `true` if every table cell is kept
    #[inline]
    pub fn retain_full_table(&self) -> bool {
        self.retain_full_table
    }
}

impl<T: Numeric> Default for AccelerationConfig<T> {
    fn default() -> Self {
        // Every float type represents the default tolerance, if only
        // approximately
        let tolerance = T::from_f64(DEFAULT_TOLERANCE).unwrap_or_else(T::zero);
        Self::new_unchecked(DEFAULT_MAX_TERMS, tolerance)
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxTermsTooLow { max_terms } => {
                write!(f, "max_terms ({max_terms}) must be at least 1")
            }
            Self::ToleranceNotFinite => {
                write!(f, "tolerance must be finite")
            }
            Self::ToleranceTooLow => {
                write!(f, "tolerance must be non-negative")
            }
        }
    }
}
