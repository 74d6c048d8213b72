use bondflow_core::{Position, Trade};
use tracing::debug;

use crate::application::bus::{Listener, ServiceCore};

/// Signed positions per instrument and trading book.
///
/// Each trade adds its signed quantity (sells negate) to the trade's
/// book, creating the position on first sight, and the updated
/// position fans out to risk and persistence.
pub struct PositionService {
    core: ServiceCore<Position>,
}

impl PositionService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    pub fn add_trade(&mut self, trade: &Trade) {
        let mut position = self
            .core
            .get(trade.bond.cusip())
            .cloned()
            .unwrap_or_else(|| Position::new(trade.bond.clone()));
        position.add(&trade.book, trade.signed_quantity());
        debug!(
            cusip = %trade.bond.cusip,
            book = %trade.book,
            aggregate = position.aggregate(),
            "position update"
        );
        self.core.publish(position);
    }

    pub fn get_data(&self, cusip: &str) -> Option<&Position> {
        self.core.get(cusip)
    }

    /// Aggregate position across books, zero when unseen.
    pub fn aggregate(&self, cusip: &str) -> i64 {
        self.core.get(cusip).map(Position::aggregate).unwrap_or(0)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<Position>>) {
        self.core.add_listener(listener);
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}
