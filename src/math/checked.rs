//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] turns the `Option`-returning `checked_*` methods on
//! [`Amount`] and [`Shares`] into `Result`s carrying a
//! [`PoolError::ArithmeticOverflow`] with a caller-chosen context message,
//! so pool code can use `?` throughout.
//!
//! # Examples
//!
//! ```
//! use pair_amm::domain::Amount;
//! use pair_amm::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200), "reserve_a overflow");
//! assert_eq!(sum, Ok(Amount::new(300)));
//! assert!(Amount::MAX.safe_add(&Amount::new(1), "reserve_a overflow").is_err());
//! ```

use crate::domain::{Amount, Shares};
use crate::error::PoolError;

/// Fallible arithmetic for domain wrapper types.
///
/// No method panics or saturates; every failure becomes
/// [`PoolError::ArithmeticOverflow`] tagged with `context`.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ArithmeticOverflow`] on overflow.
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, PoolError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ArithmeticOverflow`] on underflow.
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self, PoolError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, PoolError> {
        self.checked_add(other)
            .ok_or(PoolError::ArithmeticOverflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self, PoolError> {
        self.checked_sub(other)
            .ok_or(PoolError::ArithmeticOverflow(context))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, PoolError> {
        self.checked_add(other)
            .ok_or(PoolError::ArithmeticOverflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self, PoolError> {
        self.checked_sub(other)
            .ok_or(PoolError::ArithmeticOverflow(context))
    }
}
