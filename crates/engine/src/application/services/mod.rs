mod algo_execution;
mod algo_streaming;
mod execution;
mod gui;
mod inquiry;
mod market_data;
mod position;
mod pricing;
mod risk;
mod streaming;
mod trade_booking;

pub use algo_execution::AlgoExecutionService;
pub use algo_streaming::AlgoStreamingService;
pub use execution::ExecutionService;
pub use gui::GuiService;
pub use inquiry::InquiryService;
pub use market_data::MarketDataService;
pub use position::PositionService;
pub use pricing::PricingService;
pub use risk::RiskService;
pub use streaming::StreamingService;
pub use trade_booking::TradeBookingService;
