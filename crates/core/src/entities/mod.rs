mod bond;
mod execution;
mod inquiry;
mod order_book;
mod position;
mod price;
mod price_stream;
mod risk;
mod trade;

pub use bond::{Bond, BondIdType};
pub use execution::{ExecutionOrder, OrderType};
pub use inquiry::{Inquiry, InquiryState};
pub use order_book::{BidOffer, Order, OrderBook};
pub use position::Position;
pub use price::Price;
pub use price_stream::{PriceStream, PriceStreamOrder};
pub use risk::{BucketedRisk, BucketedSector, Pv01};
pub use trade::Trade;
