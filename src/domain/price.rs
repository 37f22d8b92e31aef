//! Deterministic fixed-point exchange rate.

use core::fmt;

use fixed::types::I80F48;

use super::{Amount, Rounding};
use crate::error::PoolError;
use crate::math::mul_div;

/// Number of fractional bits in an [`I80F48`].
const FRAC_BITS: u32 = 48;

/// Exchange rate `quote / base` as an [`I80F48`] fixed-point ratio.
///
/// Prices are computed from integer amounts with an explicit [`Rounding`]
/// direction and are bit-for-bit reproducible; no floating point is
/// involved. Resolution is `2^-48`.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, Price, Rounding};
///
/// let p = Price::from_ratio(Amount::new(200_000), Amount::new(100_000), Rounding::Down)
///     .expect("valid ratio");
/// assert_eq!(p, Price::from_int(2));
/// assert_eq!(p.to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(I80F48);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(I80F48::ZERO);

    /// One to one.
    pub const ONE: Self = Self(I80F48::ONE);

    /// Whole-number price.
    #[must_use]
    pub fn from_int(value: u32) -> Self {
        Self(I80F48::from_num(value))
    }

    /// Returns the underlying fixed-point value.
    #[must_use]
    pub const fn get(&self) -> I80F48 {
        self.0
    }

    /// Computes `quote / base`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidState`] if `base` is zero.
    /// - [`PoolError::ArithmeticOverflow`] if the ratio is `2^79` or larger.
    pub fn from_ratio(quote: Amount, base: Amount, rounding: Rounding) -> crate::error::Result<Self> {
        if base.is_zero() {
            return Err(PoolError::InvalidState("price of an empty reserve"));
        }
        let bits = mul_div(quote.get(), 1u128 << FRAC_BITS, base.get(), rounding)
            .map_err(|_| PoolError::ArithmeticOverflow("price exceeds fixed-point range"))?;
        let bits = i128::try_from(bits)
            .map_err(|_| PoolError::ArithmeticOverflow("price exceeds fixed-point range"))?;
        Ok(Self(I80F48::from_bits(bits)))
    }

    /// Lossy conversion for display and reporting.
    #[must_use]
    pub fn to_f64_lossy(&self) -> f64 {
        self.0.to_num::<f64>()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
