use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Bond;
use crate::value_objects::TradeSide;

/// A booked trade on a particular trading book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub bond: Bond,
    pub trade_id: String,
    pub price: Decimal,
    pub book: String,
    pub quantity: i64,
    pub side: TradeSide,
}

impl Trade {
    pub fn new(
        bond: Bond,
        trade_id: impl Into<String>,
        price: Decimal,
        book: impl Into<String>,
        quantity: i64,
        side: TradeSide,
    ) -> Self {
        Self {
            bond,
            trade_id: trade_id.into(),
            price,
            book: book.into(),
            quantity,
            side,
        }
    }

    /// Quantity with the sell side negated.
    pub fn signed_quantity(&self) -> i64 {
        self.side.sign() * self.quantity
    }
}
