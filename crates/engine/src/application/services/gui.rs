use bondflow_core::Price;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::application::bus::{Listener, ServiceCore};
use crate::infrastructure::clock::SharedClock;

/// Rate-limited price publication for the GUI.
///
/// At most one price passes per throttle window; anything arriving
/// inside the window is dropped and never retried. The gate opens
/// relative to construction time, so the very first price can be
/// suppressed too.
pub struct GuiService {
    core: ServiceCore<Price>,
    clock: SharedClock,
    throttle: Duration,
    last_emit: DateTime<Utc>,
}

impl GuiService {
    pub fn new(clock: SharedClock, throttle: Duration) -> Self {
        let last_emit = clock.now();
        Self {
            core: ServiceCore::new(),
            clock,
            throttle,
            last_emit,
        }
    }

    pub fn on_price(&mut self, price: &Price) {
        let now = self.clock.now();
        if now - self.last_emit <= self.throttle {
            debug!(cusip = %price.bond.cusip, "price inside throttle window, dropped");
            return;
        }
        self.last_emit = now;
        self.core.publish(price.clone());
    }

    pub fn get_data(&self, cusip: &str) -> Option<&Price> {
        self.core.get(cusip)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<Price>>) {
        self.core.add_listener(listener);
    }
}
