//! Arithmetic utilities for pool calculations.
//!
//! - [`CheckedArithmetic`]: `Result`-returning add/sub on domain types.
//! - [`mul_div`], [`wide_mul`], [`sqrt_product`]: 256-bit intermediates
//!   (via [`ethnum`]) so products of two reserves never overflow.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use ethnum::U256;
pub use wide::{mul_div, sqrt_product, wide_mul};
