use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bond;
use crate::value_objects::{format_fractional, Side};

/// One leg of a streamed two-way quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStreamOrder {
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub side: Side,
}

impl PriceStreamOrder {
    pub fn new(price: Decimal, visible_quantity: i64, hidden_quantity: i64, side: Side) -> Self {
        Self {
            price,
            visible_quantity,
            hidden_quantity,
            side,
        }
    }
}

impl fmt::Display for PriceStreamOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Side: {}, Price: {}, Visible quantity: {}, Hidden quantity: {}",
            self.side,
            format_fractional(self.price),
            self.visible_quantity,
            self.hidden_quantity
        )
    }
}

/// A streamed two-way market for one instrument.
///
/// Invariant: the bid leg is `Side::Bid`, the offer leg `Side::Offer`,
/// and the bid price never exceeds the offer price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStream {
    pub bond: Bond,
    pub bid: PriceStreamOrder,
    pub offer: PriceStreamOrder,
}

impl PriceStream {
    pub fn new(bond: Bond, bid: PriceStreamOrder, offer: PriceStreamOrder) -> Self {
        Self { bond, bid, offer }
    }
}

impl fmt::Display for PriceStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CUSIP: {}, {}, {}", self.bond.cusip, self.bid, self.offer)
    }
}
