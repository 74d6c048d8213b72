pub mod clock;
pub mod config;
pub mod feeds;
pub mod persistence;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use config::PipelineConfig;
pub use feeds::FeedStats;
pub use persistence::RecordWriter;
