//! US Treasury fractional price codec.
//!
//! Treasuries quote in 32nds with an eighth-of-a-32nd tail: `99-162`
//! reads as 99 + 16/32 + 2/256. The tail digit runs 0..=7 and the
//! conventional `+` stands for 4 (half a 32nd). All arithmetic is done
//! in `Decimal`, which represents every 1/256 tick exactly.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while parsing a fractional price string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceFormatError {
    #[error("missing '-' separator in fractional price '{0}'")]
    MissingSeparator(String),

    #[error("fractional part of '{0}' must be exactly three characters")]
    BadLength(String),

    #[error("invalid handle in fractional price '{0}'")]
    BadHandle(String),

    #[error("32nds digit out of range in fractional price '{0}'")]
    BadThirtySeconds(String),

    #[error("256ths digit out of range in fractional price '{0}'")]
    BadTick(String),
}

const THIRTY_SECOND: Decimal = Decimal::from_parts(32, 0, 0, false, 0);
const TICKS_PER_POINT: Decimal = Decimal::from_parts(256, 0, 0, false, 0);

/// Parse a fractional price `xxx-yyz` into its decimal value.
pub fn parse_fractional(text: &str) -> Result<Decimal, PriceFormatError> {
    let (handle, frac) = text
        .split_once('-')
        .ok_or_else(|| PriceFormatError::MissingSeparator(text.to_string()))?;

    if frac.len() != 3 {
        return Err(PriceFormatError::BadLength(text.to_string()));
    }

    let handle: i64 = handle
        .parse()
        .map_err(|_| PriceFormatError::BadHandle(text.to_string()))?;

    let thirty_seconds: i64 = frac[..2]
        .parse()
        .map_err(|_| PriceFormatError::BadThirtySeconds(text.to_string()))?;
    if thirty_seconds > 31 {
        return Err(PriceFormatError::BadThirtySeconds(text.to_string()));
    }

    let ticks: i64 = match &frac[2..] {
        "+" => 4,
        digit => {
            let ticks = digit
                .parse()
                .map_err(|_| PriceFormatError::BadTick(text.to_string()))?;
            if ticks > 7 {
                return Err(PriceFormatError::BadTick(text.to_string()));
            }
            ticks
        }
    };

    Ok(Decimal::from(handle)
        + Decimal::from(thirty_seconds) / THIRTY_SECOND
        + Decimal::from(ticks) / TICKS_PER_POINT)
}

/// Render a decimal price in the fractional convention.
///
/// The 32nds are zero-padded to two digits and a tail of 4 renders as
/// `+`. The value is truncated to the 1/256 grid.
pub fn format_fractional(price: Decimal) -> String {
    use rust_decimal::prelude::ToPrimitive;

    let handle = price.floor();
    let total_ticks = ((price - handle) * TICKS_PER_POINT)
        .floor()
        .to_i64()
        .unwrap_or(0);
    let thirty_seconds = total_ticks / 8;
    let ticks = total_ticks % 8;

    let tail = if ticks == 4 {
        "+".to_string()
    } else {
        ticks.to_string()
    };
    format!("{}-{:02}{}", handle, thirty_seconds, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_fractional("99-160").unwrap(), dec!(99.5));
        assert_eq!(parse_fractional("100-000").unwrap(), dec!(100));
        assert_eq!(parse_fractional("99-317").unwrap(), dec!(99.99609375));
    }

    #[test]
    fn test_parse_plus_means_four_ticks() {
        // 99 + 16/32 + 4/256
        assert_eq!(parse_fractional("99-16+").unwrap(), dec!(99.515625));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            parse_fractional("99160"),
            Err(PriceFormatError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_fractional("99-16"),
            Err(PriceFormatError::BadLength(_))
        ));
        assert!(matches!(
            parse_fractional("xx-160"),
            Err(PriceFormatError::BadHandle(_))
        ));
        assert!(matches!(
            parse_fractional("99-330"),
            Err(PriceFormatError::BadThirtySeconds(_))
        ));
        assert!(matches!(
            parse_fractional("99-168"),
            Err(PriceFormatError::BadTick(_))
        ));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_fractional(dec!(99.5)), "99-160");
        assert_eq!(format_fractional(dec!(99.515625)), "99-16+");
        assert_eq!(format_fractional(dec!(100)), "100-000");
    }

    #[test]
    fn test_round_trip_covers_every_tick() {
        for thirty_seconds in 0..32 {
            for ticks in 0..8 {
                let tail = if ticks == 4 {
                    "+".to_string()
                } else {
                    ticks.to_string()
                };
                let text = format!("99-{:02}{}", thirty_seconds, tail);
                let value = parse_fractional(&text).unwrap();
                assert_eq!(format_fractional(value), text);
            }
        }
    }
}
