//! Business rule validation for stored payment records.

use rust_decimal::Decimal;

use super::error::InvalidRecordError;
use super::record::PaymentRecord;
use crate::currency::{USD_DECIMAL_PLACES, usd_equivalent};

/// Validates that a record may take part in aggregation.
///
/// # Errors
///
/// Returns the first rule the record violates.
pub fn validate_record(record: &PaymentRecord) -> Result<(), InvalidRecordError> {
    if record.customer_name.trim().is_empty() {
        return Err(InvalidRecordError::EmptyCustomerName);
    }

    if record.amount <= Decimal::ZERO {
        return Err(InvalidRecordError::NonPositiveAmount {
            amount: record.amount,
        });
    }

    if record.is_local_currency() {
        match record.exchange_rate {
            None => return Err(InvalidRecordError::MissingExchangeRate),
            Some(rate) if rate <= Decimal::ZERO => {
                return Err(InvalidRecordError::NonPositiveExchangeRate { rate });
            }
            Some(_) => {}
        }
    }

    // Stored values may round the last place differently.
    let expected = usd_equivalent(record.amount, &record.currency, record.exchange_rate)?;
    let slack = Decimal::new(1, USD_DECIMAL_PLACES);
    let consistent = record
        .amount_usd
        .checked_sub(expected)
        .is_some_and(|diff| diff.abs() <= slack);
    if !consistent || record.amount_usd < Decimal::ZERO {
        return Err(InvalidRecordError::InconsistentUsdAmount {
            expected,
            actual: record.amount_usd,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tahsilat_shared::types::{Currency, MethodName, ProjectKey};

    fn make_record(amount: Decimal, currency: Currency, rate: Option<Decimal>) -> PaymentRecord {
        let amount_usd = usd_equivalent(amount, &currency, rate).unwrap_or(amount);
        PaymentRecord {
            id: Some(1),
            customer_name: "Mehmet Demir".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            payment_method: MethodName::from_static(MethodName::CASH),
            account_name: "Kasa".to_string(),
            amount,
            currency,
            project: ProjectKey::new("MSM").unwrap(),
            amount_usd,
            exchange_rate: rate,
        }
    }

    #[test]
    fn test_valid_records() {
        assert!(validate_record(&make_record(dec!(100), Currency::Usd, None)).is_ok());
        assert!(validate_record(&make_record(dec!(100), Currency::Tl, Some(dec!(32.5)))).is_ok());
    }

    #[test]
    fn test_zero_and_negative_amounts() {
        assert_eq!(
            validate_record(&make_record(Decimal::ZERO, Currency::Usd, None)),
            Err(InvalidRecordError::NonPositiveAmount {
                amount: Decimal::ZERO
            })
        );
        assert!(matches!(
            validate_record(&make_record(dec!(-5), Currency::Usd, None)),
            Err(InvalidRecordError::NonPositiveAmount { .. })
        ));
    }

    #[test]
    fn test_tl_rate_rules() {
        assert_eq!(
            validate_record(&make_record(dec!(100), Currency::Tl, None)),
            Err(InvalidRecordError::MissingExchangeRate)
        );
        assert!(matches!(
            validate_record(&make_record(dec!(100), Currency::Tl, Some(Decimal::ZERO))),
            Err(InvalidRecordError::NonPositiveExchangeRate { .. })
        ));
    }

    #[test]
    fn test_foreign_rate_not_required() {
        // A stray rate on a USD record is ignored.
        assert!(validate_record(&make_record(dec!(100), Currency::Usd, Some(dec!(0)))).is_ok());
    }

    #[test]
    fn test_usd_amount_must_match_face_value() {
        let mut record = make_record(dec!(500), Currency::Usd, None);
        record.amount_usd = dec!(-100);
        assert_eq!(
            validate_record(&record),
            Err(InvalidRecordError::InconsistentUsdAmount {
                expected: dec!(500),
                actual: dec!(-100)
            })
        );
    }

    #[test]
    fn test_tl_usd_amount_must_match_rate() {
        let mut record = make_record(dec!(1000), Currency::Tl, Some(dec!(30)));
        assert_eq!(record.amount_usd, dec!(33.3333));
        assert!(validate_record(&record).is_ok());

        // Half-up rounding of the last place is tolerated.
        record.amount_usd = dec!(33.3334);
        assert!(validate_record(&record).is_ok());

        record.amount_usd = dec!(1000);
        assert!(matches!(
            validate_record(&record),
            Err(InvalidRecordError::InconsistentUsdAmount { .. })
        ));
    }

    #[test]
    fn test_extreme_usd_amount_does_not_panic() {
        let mut record = make_record(dec!(1), Currency::Usd, None);
        record.amount_usd = Decimal::MIN;
        assert!(matches!(
            validate_record(&record),
            Err(InvalidRecordError::InconsistentUsdAmount { .. })
        ));
    }

    #[test]
    fn test_blank_customer() {
        let mut record = make_record(dec!(100), Currency::Usd, None);
        record.customer_name = "   ".to_string();
        assert_eq!(
            validate_record(&record),
            Err(InvalidRecordError::EmptyCustomerName)
        );
    }
}
