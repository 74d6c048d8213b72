use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bond;

/// PV01 risk for one instrument: the per-unit PV01 from the static
/// table and the aggregate position quantity it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pv01 {
    pub bond: Bond,
    pub pv01: Decimal,
    pub quantity: i64,
}

impl Pv01 {
    pub fn new(bond: Bond, pv01: Decimal, quantity: i64) -> Self {
        Self {
            bond,
            pv01,
            quantity,
        }
    }

    /// Monetary risk of the position: pv01 × quantity.
    pub fn exposure(&self) -> Decimal {
        self.pv01 * Decimal::from(self.quantity)
    }
}

impl fmt::Display for Pv01 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CUSIP: {}, PV01: {}, Quantity: {}",
            self.bond.cusip, self.pv01, self.quantity
        )
    }
}

/// A named group of instruments for risk aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedSector {
    pub name: String,
    pub bonds: Vec<Bond>,
}

impl BucketedSector {
    pub fn new(name: impl Into<String>, bonds: Vec<Bond>) -> Self {
        Self {
            name: name.into(),
            bonds,
        }
    }
}

/// Rolled-up risk for a bucketed sector. The pv01 field carries the
/// full Σ pv01·quantity of the bucket; quantity is fixed at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedRisk {
    pub sector: BucketedSector,
    pub pv01: Decimal,
    pub quantity: i64,
}

impl BucketedRisk {
    pub fn new(sector: BucketedSector, pv01: Decimal) -> Self {
        Self {
            sector,
            pv01,
            quantity: 1,
        }
    }
}

impl fmt::Display for BucketedRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sector: {}, PV01: {}, Quantity: {}",
            self.sector.name, self.pv01, self.quantity
        )
    }
}
