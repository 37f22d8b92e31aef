//! Pool sides and swap directions.

use core::fmt;

/// One of the two reserves of a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Asset A.
    A,
    /// Asset B.
    B,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Which asset a swap takes in.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Side, SwapDirection};
///
/// let dir = SwapDirection::AToB;
/// assert_eq!(dir.input(), Side::A);
/// assert_eq!(dir.output(), Side::B);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Sell asset A, receive asset B.
    AToB,
    /// Sell asset B, receive asset A.
    BToA,
}

impl SwapDirection {
    /// Direction whose input is `side`.
    #[must_use]
    pub const fn selling(side: Side) -> Self {
        match side {
            Side::A => Self::AToB,
            Side::B => Self::BToA,
        }
    }

    /// The side the pool receives.
    #[must_use]
    pub const fn input(&self) -> Side {
        match self {
            Self::AToB => Side::A,
            Self::BToA => Side::B,
        }
    }

    /// The side the pool pays out.
    #[must_use]
    pub const fn output(&self) -> Side {
        self.input().opposite()
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.input(), self.output())
    }
}
