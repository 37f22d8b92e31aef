//! Unified error types for the pool core.
//!
//! Every fallible pool operation returns [`PoolError`]. Failures are
//! detected before any state is touched, so an `Err` always means the pool
//! is exactly as it was before the call.

use thiserror::Error;

/// Coarse classification of a [`PoolError`], convenient for matching
/// without caring about the detail message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied value is out of range.
    InvalidArgument,
    /// The operation is not allowed in the pool's current lifecycle state.
    InvalidState,
    /// An intermediate or final value does not fit its representation.
    ArithmeticOverflow,
}

/// Error returned by pool, config, and domain operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Non-positive amount, share count out of range, or a value that
    /// rounds to nothing.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Operation attempted on an uninitialized pool, or double
    /// initialization.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Multiplication, addition, or conversion exceeded the numeric range.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),
}

impl PoolError {
    /// Returns the [`ErrorKind`] of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::ArithmeticOverflow(_) => ErrorKind::ArithmeticOverflow,
        }
    }

    /// Returns the static detail message.
    #[must_use]
    pub const fn detail(&self) -> &'static str {
        match self {
            Self::InvalidArgument(msg) | Self::InvalidState(msg) | Self::ArithmeticOverflow(msg) => {
                msg
            }
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, PoolError>;
