mod fractional;
mod side;

pub use fractional::{format_fractional, parse_fractional, PriceFormatError};
pub use side::{Side, TradeSide};
