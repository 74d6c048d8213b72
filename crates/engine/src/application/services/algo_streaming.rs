use bondflow_core::{Price, PriceStream, PriceStreamOrder, Side};
use tracing::debug;

use crate::application::bus::{Listener, ServiceCore};

const BASE_VISIBLE_QUANTITY: i64 = 10_000_000;

/// Derives a streamed two-way quote from each internal price.
///
/// Bid and offer sit half the spread either side of the mid. The
/// visible size alternates between 10M and 20M on successive prices
/// (starting at 10M) so the stream does not advertise a constant
/// clip; the hidden size always shows twice the visible.
pub struct AlgoStreamingService {
    core: ServiceCore<PriceStream>,
    double_size: bool,
}

impl AlgoStreamingService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
            double_size: false,
        }
    }

    pub fn publish_price(&mut self, price: &Price) {
        let visible = if self.double_size {
            2 * BASE_VISIBLE_QUANTITY
        } else {
            BASE_VISIBLE_QUANTITY
        };
        let hidden = 2 * visible;
        self.double_size = !self.double_size;

        let stream = PriceStream::new(
            price.bond.clone(),
            PriceStreamOrder::new(price.bid(), visible, hidden, Side::Bid),
            PriceStreamOrder::new(price.offer(), visible, hidden, Side::Offer),
        );
        debug!(cusip = %stream.bond.cusip, bid = %stream.bid.price, offer = %stream.offer.price, "stream update");
        self.core.publish(stream);
    }

    pub fn get_data(&self, cusip: &str) -> Option<&PriceStream> {
        self.core.get(cusip)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<PriceStream>>) {
        self.core.add_listener(listener);
    }
}

impl Default for AlgoStreamingService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bus::{handle, Handle, OnAdd};
    use bondflow_core::BondCatalog;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_derivation_and_size_alternation() {
        let catalog = BondCatalog::with_defaults();
        let bond = catalog.bond("91282CFX4").unwrap().clone();
        let streams: Handle<Vec<PriceStream>> = handle(Vec::new());

        let mut service = AlgoStreamingService::new();
        let sink = streams.clone();
        service.add_listener(Box::new(OnAdd(move |stream: &PriceStream| {
            sink.borrow_mut().push(stream.clone());
        })));

        let price = Price::new(bond, dec!(100.0), dec!(0.03125));
        service.publish_price(&price);
        service.publish_price(&price);
        service.publish_price(&price);

        let streams = streams.borrow();
        assert_eq!(streams[0].bid.price, dec!(99.984375));
        assert_eq!(streams[0].offer.price, dec!(100.015625));
        assert_eq!(streams[0].bid.visible_quantity, 10_000_000);
        assert_eq!(streams[0].bid.hidden_quantity, 20_000_000);

        assert_eq!(streams[1].bid.visible_quantity, 20_000_000);
        assert_eq!(streams[1].bid.hidden_quantity, 40_000_000);

        assert_eq!(streams[2].bid.visible_quantity, 10_000_000);

        for stream in streams.iter() {
            assert_eq!(stream.bid.side, Side::Bid);
            assert_eq!(stream.offer.side, Side::Offer);
            assert!(stream.bid.price <= stream.offer.price);
        }
    }
}
