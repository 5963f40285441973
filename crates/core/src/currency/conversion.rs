//! USD-equivalent derivation.
//!
//! CRITICAL: Rounding strategy for converted amounts:
//! - TL amounts are divided by the historical TL→USD rate of the record
//! - Results are rounded to 4 decimal places with banker's rounding
//! - Foreign face values pass through unconverted

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use tahsilat_shared::types::Currency;

use crate::payment::InvalidRecordError;

/// Decimal places kept on derived USD amounts.
pub const USD_DECIMAL_PLACES: u32 = 4;

/// Returns the USD-equivalent of a collected amount.
///
/// Non-TL currencies are treated as already USD-comparable, so `EUR 100`
/// contributes `100` to `total_usd`.
///
/// # Errors
///
/// Returns an error if a TL amount has no positive exchange rate, or the
/// division overflows.
pub fn usd_equivalent(
    amount: Decimal,
    currency: &Currency,
    exchange_rate: Option<Decimal>,
) -> Result<Decimal, InvalidRecordError> {
    if !currency.is_local() {
        return Ok(amount);
    }

    let rate = exchange_rate.ok_or(InvalidRecordError::MissingExchangeRate)?;
    if rate <= Decimal::ZERO {
        return Err(InvalidRecordError::NonPositiveExchangeRate { rate });
    }

    amount
        .checked_div(rate)
        .map(|usd| round(usd, USD_DECIMAL_PLACES))
        .ok_or(InvalidRecordError::ConversionOverflow { amount, rate })
}

/// Rounds a value using banker's rounding (round half to even).
#[must_use]
pub fn round(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tl_divided_by_rate() {
        // 3000 TL / 30 = 100 USD
        let usd = usd_equivalent(dec!(3000), &Currency::Tl, Some(dec!(30))).unwrap();
        assert_eq!(usd, dec!(100));
    }

    #[test]
    fn test_tl_rounds_to_4_decimals() {
        // 1000 / 30 = 33.3333...
        let usd = usd_equivalent(dec!(1000), &Currency::Tl, Some(dec!(30))).unwrap();
        assert_eq!(usd, dec!(33.3333));

        // 2000 / 30 = 66.6666... → 66.6667
        let usd = usd_equivalent(dec!(2000), &Currency::Tl, Some(dec!(30))).unwrap();
        assert_eq!(usd, dec!(66.6667));
    }

    #[test]
    fn test_foreign_passes_through() {
        assert_eq!(
            usd_equivalent(dec!(500), &Currency::Usd, None).unwrap(),
            dec!(500)
        );
        // Rate is ignored for foreign currencies.
        assert_eq!(
            usd_equivalent(dec!(250.75), &Currency::Eur, Some(dec!(36.2))).unwrap(),
            dec!(250.75)
        );
    }

    #[test]
    fn test_tl_requires_rate() {
        assert_eq!(
            usd_equivalent(dec!(100), &Currency::Tl, None),
            Err(InvalidRecordError::MissingExchangeRate)
        );
        assert_eq!(
            usd_equivalent(dec!(100), &Currency::Tl, Some(Decimal::ZERO)),
            Err(InvalidRecordError::NonPositiveExchangeRate { rate: Decimal::ZERO })
        );
        assert!(usd_equivalent(dec!(100), &Currency::Tl, Some(dec!(-3))).is_err());
    }

    #[test]
    fn test_bankers_rounding() {
        assert_eq!(round(dec!(2.5), 0), dec!(2));
        assert_eq!(round(dec!(3.5), 0), dec!(4));
        assert_eq!(round(dec!(2.25), 1), dec!(2.2));
    }
}
