//! Explicit rounding direction for division.

/// Rounding direction for every division the pool performs.
///
/// Amounts paid out of the pool and shares minted round [`Down`](Self::Down);
/// fees charged round [`Up`](Self::Up). Either way the pool never gives away
/// more than the exact formula allows.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
