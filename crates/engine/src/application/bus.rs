//! The dataflow substrate: a keyed latest-value store with synchronous
//! listener fan-out.
//!
//! Every pipeline service owns one `ServiceCore` (composition, not
//! inheritance) and exposes its own ingestion methods on top of it.
//! Edges of the static graph are `Listener` boxes registered on the
//! upstream service; most are `OnAdd` closures holding a non-owning
//! `Handle` to the downstream service.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bondflow_core::{
    ExecutionOrder, Inquiry, OrderBook, Position, Price, PriceStream, Pv01, Trade,
};

/// Shared, single-threaded handle to a service.
pub type Handle<T> = Rc<RefCell<T>>;

pub fn handle<T>(service: T) -> Handle<T> {
    Rc::new(RefCell::new(service))
}

/// A record with a store key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Callbacks fired by a service when its store changes.
///
/// The pipeline only drives `on_add`; the remove and update events are
/// part of the interface but unused, so they default to no-ops.
pub trait Listener<V> {
    fn on_add(&mut self, record: &V);

    fn on_remove(&mut self, _record: &V) {}

    fn on_update(&mut self, _record: &V) {}
}

/// Adapter turning a closure into an add-only listener.
pub struct OnAdd<F>(pub F);

impl<V, F> Listener<V> for OnAdd<F>
where
    F: FnMut(&V),
{
    fn on_add(&mut self, record: &V) {
        (self.0)(record)
    }
}

/// Keyed latest-value store with registered listeners.
///
/// `publish` upserts the record and invokes every listener's `on_add`
/// on the same call stack, in registration order. No buffering, no
/// deduplication.
pub struct ServiceCore<V> {
    records: HashMap<String, V>,
    listeners: Vec<Box<dyn Listener<V>>>,
}

impl<V: Keyed + Clone> ServiceCore<V> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Upsert the record and fan it out to every listener.
    pub fn publish(&mut self, record: V) {
        self.records.insert(record.key().to_string(), record.clone());
        for listener in &mut self.listeners {
            listener.on_add(&record);
        }
    }

    /// Upsert without notifying listeners.
    pub fn store(&mut self, record: V) {
        self.records.insert(record.key().to_string(), record);
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.records.get(key)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<V>>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<V: Keyed + Clone> Default for ServiceCore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyed for Price {
    fn key(&self) -> &str {
        &self.bond.cusip
    }
}

impl Keyed for OrderBook {
    fn key(&self) -> &str {
        &self.bond.cusip
    }
}

impl Keyed for PriceStream {
    fn key(&self) -> &str {
        &self.bond.cusip
    }
}

impl Keyed for ExecutionOrder {
    fn key(&self) -> &str {
        &self.bond.cusip
    }
}

impl Keyed for Trade {
    fn key(&self) -> &str {
        &self.trade_id
    }
}

impl Keyed for Position {
    fn key(&self) -> &str {
        &self.bond.cusip
    }
}

impl Keyed for Pv01 {
    fn key(&self) -> &str {
        &self.bond.cusip
    }
}

impl Keyed for Inquiry {
    fn key(&self) -> &str {
        &self.inquiry_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondflow_core::BondCatalog;
    use rust_decimal_macros::dec;

    fn price(mid: rust_decimal::Decimal) -> Price {
        let catalog = BondCatalog::with_defaults();
        Price::new(catalog.bond("91282CFX4").unwrap().clone(), mid, dec!(0.03125))
    }

    #[test]
    fn test_publish_upserts_latest() {
        let mut core: ServiceCore<Price> = ServiceCore::new();
        core.publish(price(dec!(99.5)));
        core.publish(price(dec!(99.6)));

        assert_eq!(core.len(), 1);
        assert_eq!(core.get("91282CFX4").unwrap().mid, dec!(99.6));
        assert!(core.get("912810TL2").is_none());
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let seen: Handle<Vec<String>> = handle(Vec::new());
        let mut core: ServiceCore<Price> = ServiceCore::new();

        for tag in ["first", "second"] {
            let seen = seen.clone();
            core.add_listener(Box::new(OnAdd(move |_: &Price| {
                seen.borrow_mut().push(tag.to_string());
            })));
        }
        core.publish(price(dec!(99.5)));

        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_store_does_not_fan_out() {
        let seen: Handle<usize> = handle(0);
        let mut core: ServiceCore<Price> = ServiceCore::new();
        let counter = seen.clone();
        core.add_listener(Box::new(OnAdd(move |_: &Price| *counter.borrow_mut() += 1)));

        core.store(price(dec!(99.5)));
        assert_eq!(*seen.borrow(), 0);
        assert_eq!(core.len(), 1);
    }
}
