//! Runner domain entity
//!
//! A runner is one selection within a market. It owns the back and lay
//! quotes from the most recent price book.

use super::runner_price::{RunnerPrice, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selection identifier assigned by the exchange
pub type RunnerId = u64;

/// Selection within a market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    id: RunnerId,
    name: String,
    handicap: f64,
    available_to_back: Vec<RunnerPrice>,
    available_to_lay: Vec<RunnerPrice>,
}

impl Runner {
    /// Create a runner with no prices. The name is trimmed.
    pub fn new(id: RunnerId, name: impl AsRef<str>, handicap: f64) -> Self {
        Self {
            id,
            name: name.as_ref().trim().to_string(),
            handicap,
            available_to_back: Vec::new(),
            available_to_lay: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> RunnerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn handicap(&self) -> f64 {
        self.handicap
    }

    pub fn back_prices(&self) -> &[RunnerPrice] {
        &self.available_to_back
    }

    pub fn lay_prices(&self) -> &[RunnerPrice] {
        &self.available_to_lay
    }

    /// Replace the back side wholesale
    pub fn update_back_prices(&mut self, prices: Vec<RunnerPrice>) {
        self.available_to_back = prices;
    }

    /// Replace the lay side wholesale
    pub fn update_lay_prices(&mut self, prices: Vec<RunnerPrice>) {
        self.available_to_lay = prices;
    }

    /// Highest back price, or the BACK sentinel when nothing is quoted
    pub fn best_back_price(&self) -> RunnerPrice {
        self.available_to_back
            .iter()
            .copied()
            .reduce(|best, p| if p.price() > best.price() { p } else { best })
            .unwrap_or_else(|| RunnerPrice::sentinel(Side::Back))
    }

    /// Lowest lay price, or the LAY sentinel when nothing is quoted
    pub fn best_lay_price(&self) -> RunnerPrice {
        self.available_to_lay
            .iter()
            .copied()
            .reduce(|best, p| if p.price() < best.price() { p } else { best })
            .unwrap_or_else(|| RunnerPrice::sentinel(Side::Lay))
    }

    /// Back quotes followed by lay quotes, in stored order
    pub fn all_available_prices(&self) -> Vec<RunnerPrice> {
        self.available_to_back
            .iter()
            .chain(self.available_to_lay.iter())
            .copied()
            .collect()
    }

    /// Format best prices for logging
    pub fn format_summary(&self) -> String {
        let fmt_price = |p: RunnerPrice| {
            if p.is_sentinel() {
                "N/A".to_string()
            } else {
                format!("{:.2} ({:.2})", p.price(), p.size())
            }
        };

        format!(
            "{} | Back: {} | Lay: {}",
            self,
            fmt_price(self.best_back_price()),
            fmt_price(self.best_lay_price())
        )
    }
}

impl fmt::Display for Runner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
