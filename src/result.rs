use std::fmt;
use std::result;

use crate::accel::{AccelerationError, ConfigError};
use crate::series::SeriesError;

pub type Result<T> = result::Result<T, Error>;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    /// A term was requested at an index that is not a valid `usize`
    InvalidIndex,
    /// A term or partial sum overflowed or is otherwise not finite
    NotFinite,
    /// An estimate was requested at an order not computed yet
    OrderUnavailable,
    /// An accelerator configuration is out of range
    InvalidConfig,
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::InvalidIndex => "invalid index",
            ErrorKind::NotFinite => "not finite",
            ErrorKind::OrderUnavailable => "order unavailable",
            ErrorKind::InvalidConfig => "invalid config",
        }
    }
}

/// Any error raised by the crate, for callers that do not care which layer
/// it came from.
///
/// # Example
///
/// ```
/// use shanks::prelude::*;
/// use shanks::result::{ErrorKind, Result};
///
/// fn sum_ln2(max_terms: usize) -> Result<f64> {
///     let config = AccelerationConfig::new(max_terms, 1E-10)?;
///     let mut eps = EpsilonAlgorithm::new(Ln2Series::new(1.0), config);
///     Ok(eps.run()?.value)
/// }
///
/// assert!(sum_ln2(64).is_ok());
/// assert_eq!(sum_ln2(0).unwrap_err().kind(), ErrorKind::InvalidConfig);
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            msg: String::from(msg),
            kind,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        self.msg.as_str()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.msg)
    }
}

impl std::error::Error for Error {}

impl From<SeriesError> for Error {
    fn from(err: SeriesError) -> Self {
        let kind = match err {
            SeriesError::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            SeriesError::TermNotFinite { .. } => ErrorKind::NotFinite,
        };
        Error::new(kind, &err.to_string())
    }
}

impl From<AccelerationError> for Error {
    fn from(err: AccelerationError) -> Self {
        match err {
            AccelerationError::Series(err) => err.into(),
            AccelerationError::OrderUnavailable { .. } => {
                Error::new(ErrorKind::OrderUnavailable, &err.to_string())
            }
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::new(ErrorKind::InvalidConfig, &err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_errors_keep_their_kind() {
        let err: Error = SeriesError::InvalidIndex { index: -3 }.into();
        assert_eq!(err.kind(), ErrorKind::InvalidIndex);
        assert_eq!(err.description(), "invalid term index: -3");

        let err: Error = AccelerationError::Series(
            SeriesError::TermNotFinite { index: 7 },
        )
        .into();
        assert_eq!(err.kind(), ErrorKind::NotFinite);
    }

    #[test]
    fn order_and_config_errors() {
        let err: Error = AccelerationError::OrderUnavailable {
            order: 4,
            highest: Some(1),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::OrderUnavailable);

        let err: Error = ConfigError::MaxTermsTooLow { max_terms: 0 }.into();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(err.to_string().starts_with("invalid config: "));
    }
}
