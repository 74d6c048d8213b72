//! Domain model for the bondflow treasury trading pipeline.
//!
//! This crate holds the pure domain layer: value objects (sides, the
//! fractional price codec), the records that flow through the pipeline
//! (prices, order books, price streams, execution orders, trades,
//! positions, risk, inquiries), and the static reference data for the
//! seven on-the-run US Treasuries.
//!
//! Everything here is synchronous and side-effect free; file I/O and
//! service wiring live in the `bondflow` engine crate.

pub mod entities;
pub mod reference;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{
    BidOffer, Bond, BondIdType, BucketedRisk, BucketedSector, ExecutionOrder, Inquiry,
    InquiryState, Order, OrderBook, OrderType, Position, Price, PriceStream, PriceStreamOrder,
    Pv01, Trade,
};
pub use reference::{BondCatalog, UnknownBond};
pub use value_objects::{
    format_fractional, parse_fractional, PriceFormatError, Side, TradeSide,
};
