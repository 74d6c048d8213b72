use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier scheme for a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BondIdType {
    Cusip,
    Isin,
}

/// A US Treasury instrument.
///
/// Immutable once constructed; instruments are produced only by the
/// reference-data catalog and keyed everywhere by CUSIP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub cusip: String,
    pub id_type: BondIdType,
    pub ticker: String,
    pub coupon: Decimal,
    pub maturity: NaiveDate,
}

impl Bond {
    pub fn new(
        cusip: impl Into<String>,
        ticker: impl Into<String>,
        coupon: Decimal,
        maturity: NaiveDate,
    ) -> Self {
        Self {
            cusip: cusip.into(),
            id_type: BondIdType::Cusip,
            ticker: ticker.into(),
            coupon,
            maturity,
        }
    }

    pub fn cusip(&self) -> &str {
        &self.cusip
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.ticker, self.coupon, self.maturity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bond_keyed_by_cusip() {
        let maturity = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        let bond = Bond::new("91282CFX4", "T", dec!(0.045), maturity);
        assert_eq!(bond.cusip(), "91282CFX4");
        assert_eq!(bond.id_type, BondIdType::Cusip);
    }
}
