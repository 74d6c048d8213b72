use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Bond;
use crate::value_objects::Side;

/// A single depth entry: price, quantity, and side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub price: Decimal,
    pub quantity: i64,
    pub side: Side,
}

impl Order {
    pub fn new(price: Decimal, quantity: i64, side: Side) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// The best bid and offer of an order book, taken by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidOffer {
    pub bid: Order,
    pub offer: Order,
}

impl BidOffer {
    pub fn spread(&self) -> Decimal {
        self.offer.price - self.bid.price
    }
}

/// Order book depth for one instrument, bid and offer stacks in
/// arrival order. Keyed by CUSIP; latest snapshot wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub bond: Bond,
    pub bid_stack: Vec<Order>,
    pub offer_stack: Vec<Order>,
}

impl OrderBook {
    pub fn new(bond: Bond, bid_stack: Vec<Order>, offer_stack: Vec<Order>) -> Self {
        Self {
            bond,
            bid_stack,
            offer_stack,
        }
    }

    /// Best bid (highest price) and best offer (lowest price) by linear
    /// scan, ties broken by first occurrence. `None` when either stack
    /// is empty.
    pub fn best_bid_offer(&self) -> Option<BidOffer> {
        let bid = self
            .bid_stack
            .iter()
            .reduce(|best, order| if order.price > best.price { order } else { best })?;
        let offer = self
            .offer_stack
            .iter()
            .reduce(|best, order| if order.price < best.price { order } else { best })?;
        Some(BidOffer {
            bid: bid.clone(),
            offer: offer.clone(),
        })
    }

    /// Sum quantities at each price level and rebuild both stacks,
    /// one entry per level in first-seen order.
    pub fn aggregate(&self) -> OrderBook {
        fn collapse(stack: &[Order], side: Side) -> Vec<Order> {
            let mut levels: IndexMap<Decimal, i64> = IndexMap::new();
            for order in stack {
                *levels.entry(order.price).or_insert(0) += order.quantity;
            }
            levels
                .into_iter()
                .map(|(price, quantity)| Order::new(price, quantity, side))
                .collect()
        }

        OrderBook {
            bond: self.bond.clone(),
            bid_stack: collapse(&self.bid_stack, Side::Bid),
            offer_stack: collapse(&self.offer_stack, Side::Offer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bond() -> Bond {
        Bond::new(
            "91282CFX4",
            "T",
            dec!(0.045),
            NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
        )
    }

    fn book() -> OrderBook {
        OrderBook::new(
            bond(),
            vec![
                Order::new(dec!(99.496), 1_000_000, Side::Bid),
                Order::new(dec!(99.500), 2_000_000, Side::Bid),
                Order::new(dec!(99.500), 3_000_000, Side::Bid),
            ],
            vec![
                Order::new(dec!(99.508), 1_500_000, Side::Offer),
                Order::new(dec!(99.504), 2_500_000, Side::Offer),
            ],
        )
    }

    #[test]
    fn test_best_bid_offer() {
        let best = book().best_bid_offer().unwrap();
        // Highest bid, ties to the first occurrence
        assert_eq!(best.bid.price, dec!(99.500));
        assert_eq!(best.bid.quantity, 2_000_000);
        // Lowest offer
        assert_eq!(best.offer.price, dec!(99.504));
        assert_eq!(best.offer.quantity, 2_500_000);
        assert_eq!(best.spread(), dec!(0.004));
    }

    #[test]
    fn test_empty_side_has_no_best() {
        let empty = OrderBook::new(bond(), Vec::new(), book().offer_stack);
        assert!(empty.best_bid_offer().is_none());
    }

    #[test]
    fn test_aggregate_collapses_levels() {
        let aggregated = book().aggregate();
        assert_eq!(aggregated.bid_stack.len(), 2);
        assert_eq!(aggregated.bid_stack[0].price, dec!(99.496));
        assert_eq!(aggregated.bid_stack[1].price, dec!(99.500));
        assert_eq!(aggregated.bid_stack[1].quantity, 5_000_000);
        assert_eq!(aggregated.offer_stack.len(), 2);
    }
}
