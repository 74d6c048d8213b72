use bondflow_core::{ExecutionOrder, Trade};
use tracing::debug;

use crate::application::bus::{Listener, ServiceCore};

const BOOKS: [&str; 3] = ["TRSY1", "TRSY2", "TRSY3"];

/// Books trades onto the treasury trading books.
///
/// Trades arrive two ways: straight from the trade file, and derived
/// from executions. Execution-derived trades rotate through TRSY1,
/// TRSY2, TRSY3 on a monotonic counter; a BID-side execution books as
/// a buy, an OFFER-side execution as a sell, for the full visible plus
/// hidden quantity.
pub struct TradeBookingService {
    core: ServiceCore<Trade>,
    booked: u64,
}

impl TradeBookingService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
            booked: 0,
        }
    }

    pub fn on_message(&mut self, trade: Trade) {
        debug!(trade_id = %trade.trade_id, book = %trade.book, "booking trade");
        self.core.publish(trade);
    }

    pub fn book_execution(&mut self, order: &ExecutionOrder) {
        let book = BOOKS[(self.booked % BOOKS.len() as u64) as usize];
        self.booked += 1;

        let trade = Trade::new(
            order.bond.clone(),
            format!("TRADE-EXECUTE-{}", order.order_id),
            order.price,
            book,
            order.total_quantity(),
            order.side.trade_side(),
        );
        self.on_message(trade);
    }

    pub fn get_data(&self, trade_id: &str) -> Option<&Trade> {
        self.core.get(trade_id)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<Trade>>) {
        self.core.add_listener(listener);
    }
}

impl Default for TradeBookingService {
    fn default() -> Self {
        Self::new()
    }
}
