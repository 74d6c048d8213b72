use bondflow_core::ExecutionOrder;
use tracing::debug;

use crate::application::bus::{Listener, ServiceCore};

/// Places algo orders in the market.
///
/// A passthrough: each order received from algo-execution is stored
/// and re-emitted to this service's listeners (trade booking and the
/// execution record writer).
pub struct ExecutionService {
    core: ServiceCore<ExecutionOrder>,
}

impl ExecutionService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    pub fn execute_order(&mut self, order: &ExecutionOrder) {
        debug!(cusip = %order.bond.cusip, order_id = %order.order_id, "executing order");
        self.core.publish(order.clone());
    }

    pub fn get_data(&self, cusip: &str) -> Option<&ExecutionOrder> {
        self.core.get(cusip)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<ExecutionOrder>>) {
        self.core.add_listener(listener);
    }
}

impl Default for ExecutionService {
    fn default() -> Self {
        Self::new()
    }
}
