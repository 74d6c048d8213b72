use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bond;
use crate::value_objects::{format_fractional, Side};

/// Order types supported on the execution venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Fok,
    Ioc,
    Market,
    Limit,
    Stop,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderType::Fok => "FOK",
            OrderType::Ioc => "IOC",
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::Stop => "STOP",
        };
        write!(f, "{}", name)
    }
}

/// An order ready to be placed on an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOrder {
    pub bond: Bond,
    pub side: Side,
    pub order_id: String,
    pub order_type: OrderType,
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub parent_order_id: String,
    pub is_child_order: bool,
}

impl ExecutionOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bond: Bond,
        side: Side,
        order_id: impl Into<String>,
        order_type: OrderType,
        price: Decimal,
        visible_quantity: i64,
        hidden_quantity: i64,
        parent_order_id: impl Into<String>,
        is_child_order: bool,
    ) -> Self {
        Self {
            bond,
            side,
            order_id: order_id.into(),
            order_type,
            price,
            visible_quantity,
            hidden_quantity,
            parent_order_id: parent_order_id.into(),
            is_child_order,
        }
    }

    /// Total quantity across the visible and hidden portions.
    pub fn total_quantity(&self) -> i64 {
        self.visible_quantity + self.hidden_quantity
    }
}

impl fmt::Display for ExecutionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CUSIP: {}, Side: {}, Order ID: {}, Order type: {}, Price: {}, \
             Visible quantity: {}, Hidden quantity: {}, Parent order ID: {}, Is child order: {}",
            self.bond.cusip,
            self.side,
            self.order_id,
            self.order_type,
            format_fractional(self.price),
            self.visible_quantity,
            self.hidden_quantity,
            self.parent_order_id,
            self.is_child_order
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        let bond = Bond::new(
            "91282CFX4",
            "T",
            dec!(0.045),
            NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
        );
        let order = ExecutionOrder::new(
            bond,
            Side::Bid,
            "0",
            OrderType::Market,
            dec!(99.50390625),
            1_500_000,
            0,
            "NA",
            false,
        );
        assert_eq!(
            order.to_string(),
            "CUSIP: 91282CFX4, Side: bid, Order ID: 0, Order type: MARKET, Price: 99-161, \
             Visible quantity: 1500000, Hidden quantity: 0, Parent order ID: NA, \
             Is child order: false"
        );
    }
}
