use bondflow_core::PriceStream;

use crate::application::bus::{Listener, ServiceCore};

/// Publishes two-way price streams downstream.
///
/// A passthrough: each stream received from algo-streaming is stored
/// and re-emitted unchanged to this service's own listeners.
pub struct StreamingService {
    core: ServiceCore<PriceStream>,
}

impl StreamingService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    pub fn publish_price(&mut self, stream: &PriceStream) {
        self.core.publish(stream.clone());
    }

    pub fn get_data(&self, cusip: &str) -> Option<&PriceStream> {
        self.core.get(cusip)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<PriceStream>>) {
        self.core.add_listener(listener);
    }
}

impl Default for StreamingService {
    fn default() -> Self {
        Self::new()
    }
}
