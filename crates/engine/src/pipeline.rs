//! Pipeline assembly and the run loop.
//!
//! `Pipeline::build` constructs every service, wires the static edge
//! set, and opens the six output writers. The graph is immutable after
//! build; `run` then drains the four input files to end of file in
//! order: prices, trades, market data, inquiries.

use std::fs::File;
use std::rc::Rc;

use bondflow_core::{BondCatalog, ExecutionOrder, Inquiry, OrderBook, Position, Price, PriceStream, Pv01, Trade};
use chrono::Duration;
use tracing::info;

use crate::application::bus::{handle, Handle, OnAdd};
use crate::application::services::{
    AlgoExecutionService, AlgoStreamingService, ExecutionService, GuiService, InquiryService,
    MarketDataService, PositionService, PricingService, RiskService, StreamingService,
    TradeBookingService,
};
use crate::error::Result;
use crate::infrastructure::clock::SharedClock;
use crate::infrastructure::config::{
    PipelineConfig, ALL_INQUIRIES_FILE, EXECUTIONS_FILE, GUI_FILE, INQUIRIES_FILE,
    MARKET_DATA_FILE, POSITIONS_FILE, PRICES_FILE, RISK_FILE, STREAMING_FILE, TRADES_FILE,
};
use crate::infrastructure::feeds::{
    subscribe_inquiries, subscribe_market_data, subscribe_prices, subscribe_trades, FeedStats,
};
use crate::infrastructure::persistence::RecordWriter;

/// Per-feed record counts for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub prices: FeedStats,
    pub trades: FeedStats,
    pub market_data: FeedStats,
    pub inquiries: FeedStats,
}

/// The fully wired service graph.
pub struct Pipeline {
    pub pricing: Handle<PricingService>,
    pub algo_streaming: Handle<AlgoStreamingService>,
    pub streaming: Handle<StreamingService>,
    pub gui: Handle<GuiService>,
    pub market_data: Handle<MarketDataService>,
    pub algo_execution: Handle<AlgoExecutionService>,
    pub execution: Handle<ExecutionService>,
    pub trade_booking: Handle<TradeBookingService>,
    pub positions: Handle<PositionService>,
    pub risk: Handle<RiskService>,
    pub inquiries: Handle<InquiryService>,
    catalog: Rc<BondCatalog>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn build(
        config: PipelineConfig,
        catalog: Rc<BondCatalog>,
        clock: SharedClock,
    ) -> Result<Self> {
        let pricing = handle(PricingService::new());
        let algo_streaming = handle(AlgoStreamingService::new());
        let streaming = handle(StreamingService::new());
        let gui = handle(GuiService::new(
            clock.clone(),
            Duration::milliseconds(config.gui_throttle_ms as i64),
        ));
        let market_data = handle(MarketDataService::new());
        let algo_execution = handle(AlgoExecutionService::new());
        let execution = handle(ExecutionService::new());
        let trade_booking = handle(TradeBookingService::new());
        let positions = handle(PositionService::new());
        let risk = handle(RiskService::new(catalog.clone()));
        let inquiries = handle(InquiryService::new());

        // Streaming leg: pricing -> algo streaming -> streaming -> file,
        // with the throttled GUI tee off pricing.
        {
            let downstream = algo_streaming.clone();
            pricing.borrow_mut().add_listener(Box::new(OnAdd(
                move |price: &Price| downstream.borrow_mut().publish_price(price),
            )));
        }
        {
            let downstream = gui.clone();
            pricing.borrow_mut().add_listener(Box::new(OnAdd(
                move |price: &Price| downstream.borrow_mut().on_price(price),
            )));
        }
        {
            let downstream = streaming.clone();
            algo_streaming.borrow_mut().add_listener(Box::new(OnAdd(
                move |stream: &PriceStream| downstream.borrow_mut().publish_price(stream),
            )));
        }
        streaming
            .borrow_mut()
            .add_listener(Box::new(RecordWriter::<PriceStream>::create(
                config.output_path(STREAMING_FILE),
                clock.clone(),
            )?));
        gui.borrow_mut()
            .add_listener(Box::new(RecordWriter::<Price>::create(
                config.output_path(GUI_FILE),
                clock.clone(),
            )?));

        // Execution leg: market data -> algo execution -> execution ->
        // trade booking -> positions -> risk, persisting at each stage.
        {
            let downstream = algo_execution.clone();
            market_data.borrow_mut().add_listener(Box::new(OnAdd(
                move |book: &OrderBook| downstream.borrow_mut().on_order_book(book),
            )));
        }
        {
            let downstream = execution.clone();
            algo_execution.borrow_mut().add_listener(Box::new(OnAdd(
                move |order: &ExecutionOrder| downstream.borrow_mut().execute_order(order),
            )));
        }
        {
            let downstream = trade_booking.clone();
            execution.borrow_mut().add_listener(Box::new(OnAdd(
                move |order: &ExecutionOrder| downstream.borrow_mut().book_execution(order),
            )));
        }
        execution
            .borrow_mut()
            .add_listener(Box::new(RecordWriter::<ExecutionOrder>::create(
                config.output_path(EXECUTIONS_FILE),
                clock.clone(),
            )?));
        {
            let downstream = positions.clone();
            trade_booking.borrow_mut().add_listener(Box::new(OnAdd(
                move |trade: &Trade| downstream.borrow_mut().add_trade(trade),
            )));
        }
        {
            let downstream = risk.clone();
            positions.borrow_mut().add_listener(Box::new(OnAdd(
                move |position: &Position| downstream.borrow_mut().add_position(position),
            )));
        }
        positions
            .borrow_mut()
            .add_listener(Box::new(RecordWriter::<Position>::create(
                config.output_path(POSITIONS_FILE),
                clock.clone(),
            )?));
        risk.borrow_mut()
            .add_listener(Box::new(RecordWriter::<Pv01>::create(
                config.output_path(RISK_FILE),
                clock.clone(),
            )?));

        // Inquiry leg
        inquiries
            .borrow_mut()
            .add_listener(Box::new(RecordWriter::<Inquiry>::create(
                config.output_path(ALL_INQUIRIES_FILE),
                clock,
            )?));

        Ok(Self {
            pricing,
            algo_streaming,
            streaming,
            gui,
            market_data,
            algo_execution,
            execution,
            trade_booking,
            positions,
            risk,
            inquiries,
            catalog,
            config,
        })
    }

    /// Drain every input file to end of file.
    pub fn run(&self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        info!(file = PRICES_FILE, "subscribing prices");
        let prices = File::open(self.config.input_path(PRICES_FILE))?;
        summary.prices = subscribe_prices(prices, &self.catalog, &self.pricing)?;

        info!(file = TRADES_FILE, "subscribing trades");
        let trades = File::open(self.config.input_path(TRADES_FILE))?;
        summary.trades = subscribe_trades(trades, &self.catalog, &self.trade_booking)?;

        info!(file = MARKET_DATA_FILE, "subscribing market data");
        let depth = File::open(self.config.input_path(MARKET_DATA_FILE))?;
        summary.market_data = subscribe_market_data(depth, &self.catalog, &self.market_data)?;

        info!(file = INQUIRIES_FILE, "subscribing inquiries");
        let inquiries = File::open(self.config.input_path(INQUIRIES_FILE))?;
        summary.inquiries = subscribe_inquiries(inquiries, &self.catalog, &self.inquiries)?;

        Ok(summary)
    }

    pub fn catalog(&self) -> &BondCatalog {
        &self.catalog
    }
}
