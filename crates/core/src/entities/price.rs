use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bond;

/// Internal price for an instrument: mid plus full bid/offer width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub bond: Bond,
    pub mid: Decimal,
    pub spread: Decimal,
}

impl Price {
    pub fn new(bond: Bond, mid: Decimal, spread: Decimal) -> Self {
        Self { bond, mid, spread }
    }

    /// Bid implied by the mid and spread.
    pub fn bid(&self) -> Decimal {
        self.mid - self.spread / Decimal::TWO
    }

    /// Offer implied by the mid and spread.
    pub fn offer(&self) -> Decimal {
        self.mid + self.spread / Decimal::TWO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CUSIP: {}, Mid: {}, Spread: {}",
            self.bond.cusip, self.mid, self.spread
        )
    }
}
