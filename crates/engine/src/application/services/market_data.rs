use bondflow_core::{BidOffer, OrderBook};
use tracing::debug;

use crate::application::bus::{Listener, ServiceCore};

/// Latest order-book depth per instrument.
///
/// Book snapshots arrive pre-batched from the market-data feed; this
/// service stores the latest per CUSIP, fans it out, and answers
/// best-bid/offer and aggregated-depth queries by value.
pub struct MarketDataService {
    core: ServiceCore<OrderBook>,
}

impl MarketDataService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    pub fn on_message(&mut self, book: OrderBook) {
        debug!(
            cusip = %book.bond.cusip,
            bids = book.bid_stack.len(),
            offers = book.offer_stack.len(),
            "order book update"
        );
        self.core.publish(book);
    }

    pub fn get_data(&self, cusip: &str) -> Option<&OrderBook> {
        self.core.get(cusip)
    }

    /// Best bid and offer of the stored book, by value.
    pub fn best_bid_offer(&self, cusip: &str) -> Option<BidOffer> {
        self.core.get(cusip).and_then(OrderBook::best_bid_offer)
    }

    /// Depth of the stored book collapsed to one entry per price
    /// level, by value.
    pub fn aggregate_market_data(&self, cusip: &str) -> Option<OrderBook> {
        self.core.get(cusip).map(OrderBook::aggregate)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<OrderBook>>) {
        self.core.add_listener(listener);
    }
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}
