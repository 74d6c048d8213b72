//! bondflow — a simulated US-Treasuries trading back-end.
//!
//! # Architecture
//!
//! The engine is a single-threaded publish/subscribe dataflow over the
//! domain types in `bondflow-core`:
//!
//! - **Application**: the keyed-store/listener substrate and the
//!   pipeline services (pricing, streaming, market data, execution,
//!   trade booking, positions, risk, inquiries, GUI throttle)
//! - **Infrastructure**: the clock, configuration, CSV feed
//!   subscribers, and the append-mode persistence writers
//!
//! `Pipeline::build` wires the static service graph; `Pipeline::run`
//! drains the four input files and appends derived records to the six
//! output files. Fan-out is synchronous: every record runs its full
//! downstream path before the next input line is read.

pub mod application;
pub mod error;
pub mod infrastructure;
pub mod pipeline;

// Re-export commonly used types
pub use application::bus::{handle, Handle, Keyed, Listener, OnAdd, ServiceCore};
pub use application::services::{
    AlgoExecutionService, AlgoStreamingService, ExecutionService, GuiService, InquiryService,
    MarketDataService, PositionService, PricingService, RiskService, StreamingService,
    TradeBookingService,
};
pub use error::{EngineError, Result};
pub use infrastructure::{
    Clock, FeedStats, ManualClock, PipelineConfig, RecordWriter, SharedClock, SystemClock,
};
pub use pipeline::{Pipeline, RunSummary};
