//! 256-bit intermediates for products of two `u128` values.
//!
//! Reserves and amounts are `u128`, so any product of two of them fits in a
//! [`U256`]. Every `a * b / d` in the pool goes through [`mul_div`], which
//! only fails when the final quotient does not fit back into `u128`.

use ethnum::U256;

use crate::domain::Rounding;
use crate::error::PoolError;

/// Computes `a * b / d` with a 256-bit intermediate and explicit rounding.
///
/// # Errors
///
/// Returns [`PoolError::ArithmeticOverflow`] if `d` is zero or the quotient
/// exceeds `u128::MAX`.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Rounding;
/// use pair_amm::math::mul_div;
///
/// // 200_000 * 9_970 / 109_970, floored
/// assert_eq!(mul_div(200_000, 9_970, 109_970, Rounding::Down), Ok(18_132));
/// // u128::MAX * 2 / 4 overflows a u128 product but not the quotient
/// assert_eq!(mul_div(u128::MAX, 2, 4, Rounding::Down), Ok(u128::MAX / 2));
/// ```
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> crate::error::Result<u128> {
    if d == 0 {
        return Err(PoolError::ArithmeticOverflow("division by zero"));
    }
    let numerator = U256::from(a) * U256::from(b);
    let denominator = U256::from(d);
    let mut quotient = numerator / denominator;
    if rounding.is_up() && numerator % denominator != U256::ZERO {
        quotient += U256::ONE;
    }
    narrow(quotient).ok_or(PoolError::ArithmeticOverflow("mul_div result exceeds u128"))
}

/// Exact product of two `u128` values.
#[must_use]
pub fn wide_mul(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Floor square root of `a * b`.
///
/// The result always fits in `u128` because `a * b < 2^256`.
///
/// # Examples
///
/// ```
/// use pair_amm::math::sqrt_product;
///
/// assert_eq!(sqrt_product(100_000, 200_000), 141_421);
/// assert_eq!(sqrt_product(u128::MAX, u128::MAX), u128::MAX);
/// ```
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    let n = wide_mul(a, b);
    if n == U256::ZERO {
        return 0;
    }
    // Newton's method from above; the iterate decreases monotonically to floor(sqrt(n)).
    let mut x = n;
    let mut y = (x >> 1u32) + (x & U256::ONE);
    while y < x {
        x = y;
        y = (x + n / x) >> 1u32;
    }
    // x <= sqrt(2^256 - 1) < 2^128
    x.as_u128()
}

fn narrow(value: U256) -> Option<u128> {
    if value > U256::from(u128::MAX) {
        None
    } else {
        Some(value.as_u128())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounding() {
        assert_eq!(mul_div(10, 1, 3, Rounding::Down), Ok(3));
        assert_eq!(mul_div(10, 1, 3, Rounding::Up), Ok(4));
        assert_eq!(mul_div(10, 3, 3, Rounding::Up), Ok(10));
    }

    #[test]
    fn mul_div_zero_divisor() {
        assert!(matches!(
            mul_div(1, 1, 0, Rounding::Down),
            Err(PoolError::ArithmeticOverflow(_))
        ));
    }

    #[test]
    fn mul_div_quotient_overflow() {
        assert!(mul_div(u128::MAX, u128::MAX, 1, Rounding::Down).is_err());
        assert_eq!(
            mul_div(u128::MAX, u128::MAX, u128::MAX, Rounding::Down),
            Ok(u128::MAX)
        );
    }

    #[test]
    fn sqrt_exact_squares() {
        assert_eq!(sqrt_product(0, 5), 0);
        assert_eq!(sqrt_product(1, 1), 1);
        assert_eq!(sqrt_product(1_000_000, 1_000_000), 1_000_000);
        assert_eq!(sqrt_product(4, 9), 6);
    }

    #[test]
    fn sqrt_floors() {
        // sqrt(2) = 1.41…, sqrt(8) = 2.82…, sqrt(99) = 9.94…
        assert_eq!(sqrt_product(1, 2), 1);
        assert_eq!(sqrt_product(2, 4), 2);
        assert_eq!(sqrt_product(9, 11), 9);
    }

    #[test]
    fn sqrt_brackets_root() {
        for (a, b) in [(7_u128, 13_u128), (123_456, 789_012), (u128::MAX, 3)] {
            let r = sqrt_product(a, b);
            let n = wide_mul(a, b);
            assert!(wide_mul(r, r) <= n);
            assert!(U256::from(r + 1) * U256::from(r + 1) > n);
        }
    }

    #[test]
    fn wide_mul_no_overflow() {
        let p = wide_mul(u128::MAX, u128::MAX);
        assert!(p > U256::from(u128::MAX));
    }
}
