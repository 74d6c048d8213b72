use bondflow_core::{Inquiry, InquiryState};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::application::bus::{Listener, ServiceCore};
use crate::error::{EngineError, Result};

/// Customer inquiry state machine, keyed by inquiry id.
///
/// A Received inquiry is stored and its Received snapshot fanned out,
/// then the quote passes run to completion inside the service:
/// Received → Quoted → Done. The intermediate and final states are
/// stored without fan-out, so listeners observe each inquiry exactly
/// once, in the state it arrived. Terminal records from the feed are
/// stored as-is.
pub struct InquiryService {
    core: ServiceCore<Inquiry>,
}

impl InquiryService {
    pub fn new() -> Self {
        Self {
            core: ServiceCore::new(),
        }
    }

    pub fn on_message(&mut self, inquiry: Inquiry) {
        match inquiry.state {
            InquiryState::Received => {
                debug!(inquiry_id = %inquiry.inquiry_id, "inquiry received, quoting");
                self.core.publish(inquiry.clone());
                let mut quoted = inquiry;
                quoted.state = InquiryState::Quoted;
                self.complete(quoted);
            }
            InquiryState::Quoted => self.complete(inquiry),
            InquiryState::Done | InquiryState::Rejected | InquiryState::CustomerRejected => {
                self.core.store(inquiry);
            }
        }
    }

    fn complete(&mut self, mut inquiry: Inquiry) {
        inquiry.state = InquiryState::Done;
        self.core.store(inquiry);
    }

    /// Set the price on a Received inquiry and re-run the machine.
    pub fn send_quote(&mut self, inquiry_id: &str, price: Decimal) {
        let Some(mut inquiry) = self.core.get(inquiry_id).cloned() else {
            warn!(inquiry_id, "quote for unknown inquiry");
            return;
        };
        if inquiry.state != InquiryState::Received {
            warn!(inquiry_id, state = %inquiry.state, "quote for non-received inquiry ignored");
            return;
        }
        inquiry.price = price;
        self.on_message(inquiry);
    }

    /// Move a stored inquiry to Rejected. Transitions out of a
    /// terminal state are a programming error.
    pub fn reject_inquiry(&mut self, inquiry_id: &str) -> Result<()> {
        let Some(mut inquiry) = self.core.get(inquiry_id).cloned() else {
            return Err(EngineError::InvalidTransition(format!(
                "unknown inquiry {}",
                inquiry_id
            )));
        };
        if inquiry.state.is_terminal() {
            return Err(EngineError::InvalidTransition(format!(
                "inquiry {} already {}",
                inquiry_id, inquiry.state
            )));
        }
        inquiry.state = InquiryState::Rejected;
        self.core.store(inquiry);
        Ok(())
    }

    pub fn get_data(&self, inquiry_id: &str) -> Option<&Inquiry> {
        self.core.get(inquiry_id)
    }

    pub fn add_listener(&mut self, listener: Box<dyn Listener<Inquiry>>) {
        self.core.add_listener(listener);
    }
}

impl Default for InquiryService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bus::{handle, Handle, OnAdd};
    use bondflow_core::{BondCatalog, TradeSide};
    use rust_decimal_macros::dec;

    fn inquiry(id: &str, state: InquiryState) -> Inquiry {
        let bond = BondCatalog::with_defaults().bond("91282CFX4").unwrap().clone();
        Inquiry::new(id, bond, TradeSide::Buy, 1_000_000, dec!(99.5), state)
    }

    fn service_with_sink() -> (InquiryService, Handle<Vec<Inquiry>>) {
        let seen: Handle<Vec<Inquiry>> = handle(Vec::new());
        let mut service = InquiryService::new();
        let sink = seen.clone();
        service.add_listener(Box::new(OnAdd(move |inquiry: &Inquiry| {
            sink.borrow_mut().push(inquiry.clone());
        })));
        (service, seen)
    }

    #[test]
    fn test_received_reaches_done_and_fans_out_once() {
        let (mut service, seen) = service_with_sink();
        service.on_message(inquiry("INQ1", InquiryState::Received));

        // Listeners saw the Received snapshot only
        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].state, InquiryState::Received);

        // The store holds the completed inquiry
        assert_eq!(
            service.get_data("INQ1").unwrap().state,
            InquiryState::Done
        );
    }

    #[test]
    fn test_quoted_from_feed_completes_silently() {
        let (mut service, seen) = service_with_sink();
        service.on_message(inquiry("INQ2", InquiryState::Quoted));

        assert!(seen.borrow().is_empty());
        assert_eq!(service.get_data("INQ2").unwrap().state, InquiryState::Done);
    }

    #[test]
    fn test_terminal_states_are_stored_without_fan_out() {
        let (mut service, seen) = service_with_sink();
        service.on_message(inquiry("INQ3", InquiryState::Rejected));

        assert!(seen.borrow().is_empty());
        assert_eq!(
            service.get_data("INQ3").unwrap().state,
            InquiryState::Rejected
        );
    }

    #[test]
    fn test_send_quote_sets_price_and_completes() {
        let (mut service, seen) = service_with_sink();
        // Park a Received inquiry without running the machine
        service.core.store(inquiry("INQ4", InquiryState::Received));

        service.send_quote("INQ4", dec!(100.015625));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].price, dec!(100.015625));
        assert_eq!(service.get_data("INQ4").unwrap().state, InquiryState::Done);
    }

    #[test]
    fn test_reject_from_terminal_state_is_an_error() {
        let (mut service, _seen) = service_with_sink();
        service.on_message(inquiry("INQ5", InquiryState::Received));

        let err = service.reject_inquiry("INQ5").unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition(_)));
    }

    #[test]
    fn test_reject_pending_inquiry() {
        let (mut service, _seen) = service_with_sink();
        service.core.store(inquiry("INQ6", InquiryState::Received));

        service.reject_inquiry("INQ6").unwrap();
        assert_eq!(
            service.get_data("INQ6").unwrap().state,
            InquiryState::Rejected
        );
    }
}
