//! Read access to the payment ledger.

use super::error::LedgerUnavailableError;
use super::query::LedgerQuery;
use crate::payment::PaymentRecord;

/// A store that can hand out point-in-time snapshots of payment records.
///
/// Implementations must return a consistent view for a single call and must
/// not retry internally; failures go back to the caller.
pub trait LedgerSource {
    /// Returns every record matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn snapshot(&self, query: &LedgerQuery) -> Result<Vec<PaymentRecord>, LedgerUnavailableError>;
}

/// Ledger held in memory, used by tests and offline diagnostics.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    records: Vec<PaymentRecord>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record, assigning the next id if it has none.
    pub fn append(&mut self, mut record: PaymentRecord) {
        if record.id.is_none() {
            record.id = Some(i64::try_from(self.records.len()).map_or(i64::MAX, |n| n + 1));
        }
        self.records.push(record);
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<PaymentRecord> for InMemoryLedger {
    fn from_iter<I: IntoIterator<Item = PaymentRecord>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for record in iter {
            ledger.append(record);
        }
        ledger
    }
}

impl LedgerSource for InMemoryLedger {
    fn snapshot(&self, query: &LedgerQuery) -> Result<Vec<PaymentRecord>, LedgerUnavailableError> {
        Ok(self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tahsilat_shared::types::{Currency, MethodName, ProjectKey};

    fn record(project: &str, month: u32) -> PaymentRecord {
        PaymentRecord {
            id: None,
            customer_name: "Test".to_string(),
            payment_date: NaiveDate::from_ymd_opt(2025, month, 10).unwrap(),
            payment_method: MethodName::from_static(MethodName::CASH),
            account_name: "Kasa".to_string(),
            amount: dec!(10),
            currency: Currency::Usd,
            project: ProjectKey::new(project).unwrap(),
            amount_usd: dec!(10),
            exchange_rate: None,
        }
    }

    #[test]
    fn test_append_assigns_ids() {
        let ledger: InMemoryLedger = [record("MKM", 1), record("MSM", 2)].into_iter().collect();
        assert_eq!(ledger.len(), 2);
        let ids: Vec<_> = ledger
            .snapshot(&LedgerQuery::year(2025))
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, [Some(1), Some(2)]);
    }

    #[test]
    fn test_snapshot_filters() {
        let ledger: InMemoryLedger = [record("MKM", 1), record("MSM", 1), record("MKM", 3)]
            .into_iter()
            .collect();

        let all = ledger.snapshot(&LedgerQuery::year(2025)).unwrap();
        assert_eq!(all.len(), 3);

        let mkm = ProjectKey::new("MKM").unwrap();
        let only_mkm = ledger
            .snapshot(&LedgerQuery::year(2025).for_project(mkm.clone()))
            .unwrap();
        assert_eq!(only_mkm.len(), 2);

        let mkm_march = ledger
            .snapshot(&LedgerQuery::year(2025).for_project(mkm).in_month(3))
            .unwrap();
        assert_eq!(mkm_march.len(), 1);

        assert!(ledger.snapshot(&LedgerQuery::year(2024)).unwrap().is_empty());
    }
}
