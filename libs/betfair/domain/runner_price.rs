//! Runner price domain entities
//!
//! A `RunnerPrice` is one quoted (price, size) pair on one side of a
//! runner's book. It is the atomic unit of book depth.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// Side - Back or Lay
// =============================================================================

/// Side of a bet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Betting for an outcome
    Back,
    /// Betting against an outcome
    Lay,
}

impl Side {
    /// Convert to API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Back => "BACK",
            Side::Lay => "LAY",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BACK" => Ok(Side::Back),
            "LAY" => Ok(Side::Lay),
            other => Err(format!("unknown side: {}", other)),
        }
    }
}

// =============================================================================
// RunnerPrice
// =============================================================================

/// One available (price, size) quote on one side of a runner's book
///
/// Equality and hashing cover the full (side, price, size) tuple and compare
/// the floats bitwise, so `Eq` and `Hash` stay consistent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunnerPrice {
    side: Side,
    price: f64,
    size: f64,
}

impl RunnerPrice {
    pub fn new(side: Side, price: f64, size: f64) -> Self {
        Self { side, price, size }
    }

    /// Placeholder returned by best-price queries when a side has no quotes
    pub fn sentinel(side: Side) -> Self {
        Self::new(side, 0.0, 0.0)
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// True for the zero price/size placeholder
    pub fn is_sentinel(&self) -> bool {
        self.price == 0.0 && self.size == 0.0
    }

    /// True when this quote represents real liquidity
    pub fn has_liquidity(&self) -> bool {
        self.price > 0.0 && self.size > 0.0
    }
}

impl PartialEq for RunnerPrice {
    fn eq(&self, other: &Self) -> bool {
        self.side == other.side
            && self.price.to_bits() == other.price.to_bits()
            && self.size.to_bits() == other.size.to_bits()
    }
}

impl Eq for RunnerPrice {}

impl Hash for RunnerPrice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.side.hash(state);
        self.price.to_bits().hash(state);
        self.size.to_bits().hash(state);
    }
}

impl fmt::Display for RunnerPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2} ({:.2})", self.side, self.price, self.size)
    }
}

// =============================================================================
// Tests
// =============================================================================
