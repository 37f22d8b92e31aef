//! The constant-product pool and its companions.
//!
//! | Item | Role |
//! |------|------|
//! | [`Pool`] | Reserve accounting, share issuance, fee-bearing swaps |
//! | [`SharedPool`] | `Pool` behind one exclusive lock, with rollback |
//! | [`provider_fee_share`] / [`split_fees`] | Pro-rata fee attribution |

mod constant_product;
mod fees;
mod shared;

#[cfg(test)]
#[allow(clippy::panic)]
mod proptest_properties;

pub use constant_product::Pool;
pub use fees::{provider_fee_share, split_fees, ProviderFees};
pub use shared::SharedPool;
