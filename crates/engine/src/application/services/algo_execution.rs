use bondflow_core::{ExecutionOrder, OrderBook, OrderType, Side};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::application::bus::{Listener, ServiceCore};

/// Two ticks: the widest spread the algo will cross.
const MAX_CROSSABLE_SPREAD: Decimal = dec!(0.0078125);

/// Crosses the spread whenever a book update shows it at or inside
/// two ticks (1/128).
///
/// Passes alternate direction starting with a buy: a buy lifts the
/// best offer (a BID-side market order at the offer price for the
/// offer quantity), a sell hits the best bid. Order ids are the
/// decimal rendering of a monotonic counter.
pub struct AlgoExecutionService {
    core: ServiceCore<ExecutionOrder>,
    is_buy: bool,
    next_id: u64,
}

impl AlgoExecutionService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
            is_buy: true,
            next_id: 0,
        }
    }

    pub fn on_order_book(&mut self, book: &OrderBook) {
        let Some(best) = book.best_bid_offer() else {
            debug!(cusip = %book.bond.cusip, "book missing a side, no execution");
            return;
        };
        if best.spread() > MAX_CROSSABLE_SPREAD {
            return;
        }

        let order_id = self.next_id.to_string();
        let order = if self.is_buy {
            ExecutionOrder::new(
                book.bond.clone(),
                Side::Bid,
                order_id,
                OrderType::Market,
                best.offer.price,
                best.offer.quantity,
                0,
                "NA",
                false,
            )
        } else {
            ExecutionOrder::new(
                book.bond.clone(),
                Side::Offer,
                order_id,
                OrderType::Market,
                best.bid.price,
                best.bid.quantity,
                0,
                "NA",
                false,
            )
        };
        self.is_buy = !self.is_buy;
        self.next_id += 1;

        debug!(cusip = %order.bond.cusip, order_id = %order.order_id, side = %order.side, "crossing spread");
        self.core.publish(order);
    }

    pub fn get_data(&self, cusip: &str) -> Option<&ExecutionOrder> {
        self.core.get(cusip)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<ExecutionOrder>>) {
        self.core.add_listener(listener);
    }
}

impl Default for AlgoExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bus::{handle, Handle, OnAdd};
    use bondflow_core::{parse_fractional, Bond, BondCatalog, Order};

    fn bond() -> Bond {
        BondCatalog::with_defaults().bond("91282CFX4").unwrap().clone()
    }

    fn book(bid: &str, bid_qty: i64, offer: &str, offer_qty: i64) -> OrderBook {
        OrderBook::new(
            bond(),
            vec![Order::new(parse_fractional(bid).unwrap(), bid_qty, Side::Bid)],
            vec![Order::new(parse_fractional(offer).unwrap(), offer_qty, Side::Offer)],
        )
    }

    fn service_with_sink() -> (AlgoExecutionService, Handle<Vec<ExecutionOrder>>) {
        let orders: Handle<Vec<ExecutionOrder>> = handle(Vec::new());
        let mut service = AlgoExecutionService::new();
        let sink = orders.clone();
        service.add_listener(Box::new(OnAdd(move |order: &ExecutionOrder| {
            sink.borrow_mut().push(order.clone());
        })));
        (service, orders)
    }

    #[test]
    fn test_wide_spread_produces_no_order() {
        let (mut service, orders) = service_with_sink();
        // 3/256 spread is wider than 1/128
        service.on_order_book(&book("99-160", 1_000, "99-163", 1_500));
        assert!(orders.borrow().is_empty());
    }

    #[test]
    fn test_narrow_spread_alternates_sides() {
        let (mut service, orders) = service_with_sink();
        let narrow = book("99-160", 1_000, "99-161", 1_500);

        service.on_order_book(&narrow);
        service.on_order_book(&book("99-160", 1_000, "99-163", 1_500));
        service.on_order_book(&narrow);

        let orders = orders.borrow();
        assert_eq!(orders.len(), 2);

        // First pass lifts the offer
        assert_eq!(orders[0].side, Side::Bid);
        assert_eq!(orders[0].price, parse_fractional("99-161").unwrap());
        assert_eq!(orders[0].visible_quantity, 1_500);
        assert_eq!(orders[0].order_id, "0");
        assert_eq!(orders[0].order_type, OrderType::Market);
        assert_eq!(orders[0].hidden_quantity, 0);
        assert_eq!(orders[0].parent_order_id, "NA");
        assert!(!orders[0].is_child_order);

        // Second pass hits the bid
        assert_eq!(orders[1].side, Side::Offer);
        assert_eq!(orders[1].price, parse_fractional("99-160").unwrap());
        assert_eq!(orders[1].visible_quantity, 1_000);
        assert_eq!(orders[1].order_id, "1");
    }

    #[test]
    fn test_spread_exactly_two_ticks_executes() {
        let (mut service, orders) = service_with_sink();
        service.on_order_book(&book("99-160", 1_000, "99-162", 500));
        assert_eq!(orders.borrow().len(), 1);
    }

    #[test]
    fn test_one_sided_book_is_dropped() {
        let (mut service, orders) = service_with_sink();
        let one_sided = OrderBook::new(
            bond(),
            Vec::new(),
            vec![Order::new(parse_fractional("99-161").unwrap(), 500, Side::Offer)],
        );
        service.on_order_book(&one_sided);
        assert!(orders.borrow().is_empty());
    }
}
