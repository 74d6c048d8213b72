//! Static reference data: the seven on-the-run US Treasuries, their
//! PV01 values, and the standard maturity sectors used for risk
//! bucketing.
//!
//! The catalog is built once at startup and shared read-only; services
//! take it by reference so tests can inject a reduced table.

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use thiserror::Error;

use crate::entities::{Bond, BucketedSector};

/// Raised when an identifier is missing from the static table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown instrument: {0}")]
pub struct UnknownBond(pub String);

/// Lookup table from CUSIP to instrument and PV01.
#[derive(Debug, Clone)]
pub struct BondCatalog {
    bonds: IndexMap<String, Bond>,
    pv01: HashMap<String, Decimal>,
}

impl BondCatalog {
    pub fn new() -> Self {
        Self {
            bonds: IndexMap::new(),
            pv01: HashMap::new(),
        }
    }

    /// The current on-the-run treasury curve, 2Y out to 30Y.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.add(
            Bond::new("91282CFX4", "T", dec!(0.04500), date(2024, 11, 30)),
            dec!(0.0188),
        );
        catalog.add(
            Bond::new("91282CGA3", "T", dec!(0.04000), date(2025, 12, 15)),
            dec!(0.0276),
        );
        catalog.add(
            Bond::new("91282CFZ9", "T", dec!(0.03875), date(2027, 11, 30)),
            dec!(0.0452),
        );
        catalog.add(
            Bond::new("91282CFY2", "T", dec!(0.03875), date(2029, 11, 30)),
            dec!(0.0617),
        );
        catalog.add(
            Bond::new("91282CFV8", "T", dec!(0.04125), date(2032, 11, 15)),
            dec!(0.0862),
        );
        catalog.add(
            Bond::new("912810TM0", "T", dec!(0.04000), date(2042, 11, 15)),
            dec!(0.1442),
        );
        catalog.add(
            Bond::new("912810TL2", "T", dec!(0.04000), date(2052, 11, 15)),
            dec!(0.1992),
        );
        catalog
    }

    pub fn add(&mut self, bond: Bond, pv01: Decimal) {
        self.pv01.insert(bond.cusip.clone(), pv01);
        self.bonds.insert(bond.cusip.clone(), bond);
    }

    /// Instrument for a CUSIP. A miss is a hard error for callers.
    pub fn bond(&self, cusip: &str) -> Result<&Bond, UnknownBond> {
        self.bonds
            .get(cusip)
            .ok_or_else(|| UnknownBond(cusip.to_string()))
    }

    /// PV01 for a CUSIP.
    pub fn pv01(&self, cusip: &str) -> Result<Decimal, UnknownBond> {
        self.pv01
            .get(cusip)
            .copied()
            .ok_or_else(|| UnknownBond(cusip.to_string()))
    }

    pub fn bonds(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.values()
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// 2Y and 3Y sector.
    pub fn front_end(&self) -> BucketedSector {
        self.sector_by_maturity("FrontEnd", date(2023, 1, 1), date(2026, 12, 31))
    }

    /// 5Y, 7Y, and 10Y sector.
    pub fn belly(&self) -> BucketedSector {
        self.sector_by_maturity("Belly", date(2027, 1, 1), date(2033, 12, 31))
    }

    /// 20Y and 30Y sector.
    pub fn long_end(&self) -> BucketedSector {
        self.sector_by_maturity("LongEnd", date(2034, 1, 1), date(2060, 12, 31))
    }

    fn sector_by_maturity(&self, name: &str, from: NaiveDate, to: NaiveDate) -> BucketedSector {
        let bonds = self
            .bonds
            .values()
            .filter(|bond| bond.maturity >= from && bond.maturity <= to)
            .cloned()
            .collect();
        BucketedSector::new(name, bonds)
    }
}

impl Default for BondCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("static maturity date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve() {
        let catalog = BondCatalog::with_defaults();
        assert_eq!(catalog.len(), 7);

        let two_year = catalog.bond("91282CFX4").unwrap();
        assert_eq!(two_year.coupon, dec!(0.045));
        assert_eq!(two_year.maturity, date(2024, 11, 30));

        assert_eq!(catalog.pv01("91282CFY2").unwrap(), dec!(0.0617));
    }

    #[test]
    fn test_unknown_cusip_is_an_error() {
        let catalog = BondCatalog::with_defaults();
        assert_eq!(
            catalog.bond("123456789").unwrap_err(),
            UnknownBond("123456789".to_string())
        );
        assert!(catalog.pv01("123456789").is_err());
    }

    #[test]
    fn test_maturity_sectors_partition_the_curve() {
        let catalog = BondCatalog::with_defaults();
        let front = catalog.front_end();
        let belly = catalog.belly();
        let long = catalog.long_end();

        assert_eq!(front.bonds.len(), 2);
        assert_eq!(belly.bonds.len(), 3);
        assert_eq!(long.bonds.len(), 2);
        assert_eq!(
            front.bonds.len() + belly.bonds.len() + long.bonds.len(),
            catalog.len()
        );
    }
}
