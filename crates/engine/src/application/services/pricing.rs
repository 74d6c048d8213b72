use bondflow_core::Price;
use tracing::debug;

use crate::application::bus::{Listener, ServiceCore};

/// Latest internal price per instrument, fanned out on every update.
pub struct PricingService {
    core: ServiceCore<Price>,
}

impl PricingService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    pub fn on_message(&mut self, price: Price) {
        debug!(cusip = %price.bond.cusip, mid = %price.mid, "price update");
        self.core.publish(price);
    }

    pub fn get_data(&self, cusip: &str) -> Option<&Price> {
        self.core.get(cusip)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<Price>>) {
        self.core.add_listener(listener);
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bus::{handle, OnAdd};
    use bondflow_core::BondCatalog;
    use rust_decimal_macros::dec;

    #[test]
    fn test_stores_latest_and_fans_out() {
        let catalog = BondCatalog::with_defaults();
        let bond = catalog.bond("91282CFX4").unwrap().clone();
        let seen = handle(0usize);

        let mut service = PricingService::new();
        let counter = seen.clone();
        service.add_listener(Box::new(OnAdd(move |_: &Price| *counter.borrow_mut() += 1)));

        service.on_message(Price::new(bond.clone(), dec!(99.5), dec!(0.03125)));
        service.on_message(Price::new(bond, dec!(99.6), dec!(0.03125)));

        assert_eq!(*seen.borrow(), 2);
        assert_eq!(service.get_data("91282CFX4").unwrap().mid, dec!(99.6));
    }
}
