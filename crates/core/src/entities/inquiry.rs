use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Bond;
use crate::value_objects::{format_fractional, TradeSide};

/// Lifecycle state of a customer inquiry.
///
/// Received inquiries are quoted and completed; Done, Rejected, and
/// CustomerRejected are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryState {
    Received,
    Quoted,
    Done,
    Rejected,
    CustomerRejected,
}

impl InquiryState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            InquiryState::Done | InquiryState::Rejected | InquiryState::CustomerRejected
        )
    }
}

impl fmt::Display for InquiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InquiryState::Received => "RECEIVED",
            InquiryState::Quoted => "QUOTED",
            InquiryState::Done => "DONE",
            InquiryState::Rejected => "REJECTED",
            InquiryState::CustomerRejected => "CUSTOMER_REJECTED",
        };
        write!(f, "{}", name)
    }
}

/// A customer request for quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub inquiry_id: String,
    pub bond: Bond,
    pub side: TradeSide,
    pub quantity: i64,
    pub price: Decimal,
    pub state: InquiryState,
}

impl Inquiry {
    pub fn new(
        inquiry_id: impl Into<String>,
        bond: Bond,
        side: TradeSide,
        quantity: i64,
        price: Decimal,
        state: InquiryState,
    ) -> Self {
        Self {
            inquiry_id: inquiry_id.into(),
            bond,
            side,
            quantity,
            price,
            state,
        }
    }
}

impl fmt::Display for Inquiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inquiry ID: {}, Side: {}, Price: {}, Quantity: {}, State: {}",
            self.inquiry_id,
            self.side,
            format_fractional(self.price),
            self.quantity,
            self.state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_terminal_states() {
        assert!(!InquiryState::Received.is_terminal());
        assert!(!InquiryState::Quoted.is_terminal());
        assert!(InquiryState::Done.is_terminal());
        assert!(InquiryState::Rejected.is_terminal());
        assert!(InquiryState::CustomerRejected.is_terminal());
    }

    #[test]
    fn test_display() {
        let bond = Bond::new(
            "91282CFX4",
            "T",
            dec!(0.045),
            NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
        );
        let inquiry = Inquiry::new(
            "INQ1",
            bond,
            TradeSide::Buy,
            1_000_000,
            dec!(99.5),
            InquiryState::Received,
        );
        assert_eq!(
            inquiry.to_string(),
            "Inquiry ID: INQ1, Side: BUY, Price: 99-160, Quantity: 1000000, State: RECEIVED"
        );
    }
}
