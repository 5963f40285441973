//! Payment record domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tahsilat_shared::types::{Currency, MethodName, ProjectKey};

use super::error::InvalidRecordError;
use crate::currency::usd_equivalent;

/// A collected payment as stored in the ledger.
///
/// Records are appended at import time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Store-assigned identifier, if persisted.
    #[serde(default)]
    pub id: Option<i64>,
    /// Paying customer.
    pub customer_name: String,
    /// Date the payment was collected.
    pub payment_date: NaiveDate,
    /// Payment channel.
    pub payment_method: MethodName,
    /// Account the payment was booked to.
    pub account_name: String,
    /// Face value in `currency`.
    pub amount: Decimal,
    /// Currency of the face value.
    pub currency: Currency,
    /// Cost-center the payment belongs to.
    pub project: ProjectKey,
    /// USD-equivalent of `amount`.
    pub amount_usd: Decimal,
    /// Historical TL→USD rate for TL payments.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
}

impl PaymentRecord {
    /// Returns true if the face value is in the local currency.
    #[must_use]
    pub const fn is_local_currency(&self) -> bool {
        self.currency.is_local()
    }
}

/// A payment as delivered by the import step, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    /// Paying customer.
    pub customer_name: String,
    /// Date the payment was collected.
    pub payment_date: NaiveDate,
    /// Payment channel as written in the source sheet.
    pub payment_method: String,
    /// Account the payment was booked to.
    pub account_name: String,
    /// Face value.
    pub amount: Decimal,
    /// Currency code as written in the source sheet.
    pub currency: String,
    /// Project code.
    pub project: String,
    /// Historical TL→USD rate for the payment date.
    pub exchange_rate: Option<Decimal>,
}

impl NewPayment {
    /// Normalizes the import fields and derives `amount_usd`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is blank or the USD equivalent
    /// cannot be derived.
    pub fn into_record(self) -> Result<PaymentRecord, InvalidRecordError> {
        let customer_name = self.customer_name.trim().to_string();
        let payment_method = MethodName::normalized(&self.payment_method)
            .map_err(|_| InvalidRecordError::MissingField("payment_method"))?;
        let currency: Currency = self
            .currency
            .parse()
            .map_err(|_| InvalidRecordError::MissingField("currency"))?;
        let project = ProjectKey::new(&self.project)
            .map_err(|_| InvalidRecordError::MissingField("project"))?;
        let amount_usd = usd_equivalent(self.amount, &currency, self.exchange_rate)?;

        Ok(PaymentRecord {
            id: None,
            customer_name,
            payment_date: self.payment_date,
            payment_method,
            account_name: self.account_name.trim().to_string(),
            amount: self.amount,
            currency,
            project,
            amount_usd,
            exchange_rate: self.exchange_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_payment() -> NewPayment {
        NewPayment {
            customer_name: "  Ayşe Yılmaz ".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            payment_method: "havale".to_string(),
            account_name: " Yapı Kredi TL ".to_string(),
            amount: dec!(45000),
            currency: "tl".to_string(),
            project: "mkm".to_string(),
            exchange_rate: Some(dec!(36)),
        }
    }

    #[test]
    fn test_into_record_normalizes_fields() {
        let record = new_payment().into_record().unwrap();
        assert_eq!(record.customer_name, "Ayşe Yılmaz");
        assert_eq!(record.payment_method.as_str(), "Banka Havalesi");
        assert_eq!(record.account_name, "Yapı Kredi TL");
        assert_eq!(record.currency, Currency::Tl);
        assert_eq!(record.project.as_str(), "MKM");
        assert_eq!(record.amount_usd, dec!(1250));
        assert!(record.is_local_currency());
        assert_eq!(record.id, None);
    }

    #[test]
    fn test_into_record_foreign_currency() {
        let mut payment = new_payment();
        payment.currency = "USD".to_string();
        payment.amount = dec!(500);
        payment.exchange_rate = None;

        let record = payment.into_record().unwrap();
        assert_eq!(record.amount_usd, dec!(500));
        assert!(!record.is_local_currency());
    }

    #[test]
    fn test_into_record_rejects_blank_project() {
        let mut payment = new_payment();
        payment.project = "  ".to_string();
        assert_eq!(
            payment.into_record(),
            Err(InvalidRecordError::MissingField("project"))
        );
    }

    #[test]
    fn test_into_record_rejects_tl_without_rate() {
        let mut payment = new_payment();
        payment.exchange_rate = None;
        assert_eq!(
            payment.into_record(),
            Err(InvalidRecordError::MissingExchangeRate)
        );
    }
}
