//! Async read access to the ledger for request handlers.

use async_trait::async_trait;
use tahsilat_core::ledger::{InMemoryLedger, LedgerQuery, LedgerSource, LedgerUnavailableError};
use tahsilat_core::payment::PaymentRecord;
use tahsilat_db::PaymentRepository;

/// Ledger store as seen by the HTTP layer.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Returns every record matching the query.
    async fn snapshot(
        &self,
        query: &LedgerQuery,
    ) -> Result<Vec<PaymentRecord>, LedgerUnavailableError>;
}

#[async_trait]
impl LedgerReader for PaymentRepository {
    async fn snapshot(
        &self,
        query: &LedgerQuery,
    ) -> Result<Vec<PaymentRecord>, LedgerUnavailableError> {
        Self::snapshot(self, query).await
    }
}

#[async_trait]
impl LedgerReader for InMemoryLedger {
    async fn snapshot(
        &self,
        query: &LedgerQuery,
    ) -> Result<Vec<PaymentRecord>, LedgerUnavailableError> {
        LedgerSource::snapshot(self, query)
    }
}
