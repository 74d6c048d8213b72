//! Subscriber connectors for the four CSV input files.
//!
//! Each feed deserializes headerless CSV into a raw record type, then
//! converts fields through the fractional codec and the bond catalog
//! before handing the domain record to its service. Malformed records
//! and unknown instruments are logged and skipped; transport-level
//! I/O failures abort the subscription.

use bondflow_core::{
    parse_fractional, Bond, BondCatalog, Inquiry, InquiryState, Order, OrderBook, Price, Side,
    Trade, TradeSide,
};
use serde::Deserialize;
use std::io::Read;
use tracing::{debug, warn};

use crate::application::bus::Handle;
use crate::application::services::{
    InquiryService, MarketDataService, PricingService, TradeBookingService,
};
use crate::error::Result;

/// Depth lines per order-book snapshot.
pub const DEPTH_BATCH: usize = 10;

/// Outcome of one subscription: records delivered and records skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    pub accepted: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    cusip: String,
    mid: String,
    spread: String,
}

#[derive(Debug, Deserialize)]
struct TradeRecord {
    cusip: String,
    trade_id: String,
    price: String,
    book: String,
    quantity: i64,
    side: TradeSide,
}

#[derive(Debug, Deserialize)]
struct DepthRecord {
    cusip: String,
    price: String,
    quantity: i64,
    side: Side,
}

#[derive(Debug, Deserialize)]
struct InquiryRecord {
    inquiry_id: String,
    cusip: String,
    side: TradeSide,
    quantity: i64,
    price: String,
    state: InquiryState,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Log and skip a record-level failure, or abort on transport errors.
fn record_or_fatal(err: csv::Error, feed: &str, stats: &mut FeedStats) -> Result<()> {
    if err.is_io_error() {
        return Err(err.into());
    }
    warn!(feed, %err, "skipping malformed record");
    stats.skipped += 1;
    Ok(())
}

/// Feed `prices.txt` lines (`cusip,mid,spread`) into pricing.
pub fn subscribe_prices<R: Read>(
    reader: R,
    catalog: &BondCatalog,
    service: &Handle<PricingService>,
) -> Result<FeedStats> {
    let mut stats = FeedStats::default();
    for record in csv_reader(reader).deserialize::<PriceRecord>() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                record_or_fatal(err, "prices", &mut stats)?;
                continue;
            }
        };
        match convert_price(&record, catalog) {
            Ok(price) => {
                service.borrow_mut().on_message(price);
                stats.accepted += 1;
            }
            Err(reason) => {
                warn!(feed = "prices", %reason, "skipping record");
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

fn convert_price(record: &PriceRecord, catalog: &BondCatalog) -> std::result::Result<Price, String> {
    let bond = catalog.bond(&record.cusip).map_err(|err| err.to_string())?;
    let mid = parse_fractional(&record.mid).map_err(|err| err.to_string())?;
    let spread = parse_fractional(&record.spread).map_err(|err| err.to_string())?;
    Ok(Price::new(bond.clone(), mid, spread))
}

/// Feed `trades.txt` lines (`cusip,trade_id,price,book,quantity,side`)
/// into trade booking.
pub fn subscribe_trades<R: Read>(
    reader: R,
    catalog: &BondCatalog,
    service: &Handle<TradeBookingService>,
) -> Result<FeedStats> {
    let mut stats = FeedStats::default();
    for record in csv_reader(reader).deserialize::<TradeRecord>() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                record_or_fatal(err, "trades", &mut stats)?;
                continue;
            }
        };
        match convert_trade(&record, catalog) {
            Ok(trade) => {
                service.borrow_mut().on_message(trade);
                stats.accepted += 1;
            }
            Err(reason) => {
                warn!(feed = "trades", %reason, "skipping record");
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

fn convert_trade(record: &TradeRecord, catalog: &BondCatalog) -> std::result::Result<Trade, String> {
    let bond = catalog.bond(&record.cusip).map_err(|err| err.to_string())?;
    let price = parse_fractional(&record.price).map_err(|err| err.to_string())?;
    Ok(Trade::new(
        bond.clone(),
        record.trade_id.clone(),
        price,
        record.book.clone(),
        record.quantity,
        record.side,
    ))
}

/// Feed `marketdata.txt` depth lines (`cusip,price,quantity,side`) into
/// market data, packaging every ten lines as one order-book snapshot.
///
/// The tenth line of a batch names the book's instrument; a batch
/// whose lines disagree on CUSIP is dropped whole. A trailing partial
/// batch at end of file is dropped.
pub fn subscribe_market_data<R: Read>(
    reader: R,
    catalog: &BondCatalog,
    service: &Handle<MarketDataService>,
) -> Result<FeedStats> {
    let mut stats = FeedStats::default();
    let mut batch: Vec<DepthRecord> = Vec::with_capacity(DEPTH_BATCH);

    for record in csv_reader(reader).deserialize::<DepthRecord>() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                record_or_fatal(err, "marketdata", &mut stats)?;
                continue;
            }
        };
        batch.push(record);
        if batch.len() < DEPTH_BATCH {
            continue;
        }

        match convert_book(&batch, catalog) {
            Ok(book) => {
                service.borrow_mut().on_message(book);
                stats.accepted += 1;
            }
            Err(reason) => {
                warn!(feed = "marketdata", %reason, "skipping order book batch");
                stats.skipped += 1;
            }
        }
        batch.clear();
    }

    if !batch.is_empty() {
        debug!(
            feed = "marketdata",
            lines = batch.len(),
            "dropping trailing partial batch"
        );
    }
    Ok(stats)
}

fn convert_book(
    batch: &[DepthRecord],
    catalog: &BondCatalog,
) -> std::result::Result<OrderBook, String> {
    let cusip = &batch[batch.len() - 1].cusip;
    if batch.iter().any(|record| &record.cusip != cusip) {
        return Err(format!("mixed identifiers in batch keyed by {}", cusip));
    }
    let bond: &Bond = catalog.bond(cusip).map_err(|err| err.to_string())?;

    let mut bid_stack = Vec::new();
    let mut offer_stack = Vec::new();
    for record in batch {
        let price = parse_fractional(&record.price).map_err(|err| err.to_string())?;
        let order = Order::new(price, record.quantity, record.side);
        match record.side {
            Side::Bid => bid_stack.push(order),
            Side::Offer => offer_stack.push(order),
        }
    }
    Ok(OrderBook::new(bond.clone(), bid_stack, offer_stack))
}

/// Feed `inquiries.txt` lines
/// (`inquiry_id,cusip,side,quantity,price,state`) into the inquiry
/// service.
pub fn subscribe_inquiries<R: Read>(
    reader: R,
    catalog: &BondCatalog,
    service: &Handle<InquiryService>,
) -> Result<FeedStats> {
    let mut stats = FeedStats::default();
    for record in csv_reader(reader).deserialize::<InquiryRecord>() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                record_or_fatal(err, "inquiries", &mut stats)?;
                continue;
            }
        };
        match convert_inquiry(&record, catalog) {
            Ok(inquiry) => {
                service.borrow_mut().on_message(inquiry);
                stats.accepted += 1;
            }
            Err(reason) => {
                warn!(feed = "inquiries", %reason, "skipping record");
                stats.skipped += 1;
            }
        }
    }
    Ok(stats)
}

fn convert_inquiry(
    record: &InquiryRecord,
    catalog: &BondCatalog,
) -> std::result::Result<Inquiry, String> {
    let bond = catalog.bond(&record.cusip).map_err(|err| err.to_string())?;
    let price = parse_fractional(&record.price).map_err(|err| err.to_string())?;
    Ok(Inquiry::new(
        record.inquiry_id.clone(),
        bond.clone(),
        record.side,
        record.quantity,
        price,
        record.state,
    ))
}
