//! Payment repository for ledger reads and import-time appends.

use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnAcquireErr, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tahsilat_core::ledger::{LedgerQuery, LedgerUnavailableError, ProjectFilter};
use tahsilat_core::payment::{InvalidRecordError, PaymentRecord, validate_record};
use tahsilat_shared::types::{Currency, EmptyNameError, MethodName, ProjectKey};
use tracing::{debug, error, info};

use crate::entities::payments;

/// Error types for appending payments.
#[derive(Debug, thiserror::Error)]
pub enum AppendError {
    /// A record breaks a validation rule; nothing was written.
    #[error("Record {index} is invalid: {reason}")]
    InvalidRecord {
        /// Position of the record in the batch.
        index: usize,
        /// The rule it broke.
        reason: InvalidRecordError,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A stored row that cannot be read back as a payment record.
#[derive(Debug, thiserror::Error)]
#[error("Payment row {id} is malformed: {source}")]
pub struct MalformedRowError {
    /// Row id.
    pub id: i64,
    /// Which field was blank.
    #[source]
    pub source: EmptyNameError,
}

impl TryFrom<payments::Model> for PaymentRecord {
    type Error = MalformedRowError;

    fn try_from(row: payments::Model) -> Result<Self, Self::Error> {
        let id = row.id;
        let malformed = |source| MalformedRowError { id, source };

        Ok(Self {
            id: Some(row.id),
            customer_name: row.customer_name,
            payment_date: row.payment_date,
            payment_method: MethodName::new(&row.payment_method).map_err(malformed)?,
            account_name: row.account_name,
            amount: row.amount,
            currency: row.currency.parse::<Currency>().map_err(malformed)?,
            project: ProjectKey::new(&row.project).map_err(malformed)?,
            amount_usd: row.amount_usd,
            exchange_rate: row.exchange_rate,
        })
    }
}

/// Maps a database error onto the ledger availability taxonomy.
#[must_use]
pub fn ledger_error(err: &DbErr) -> LedgerUnavailableError {
    match err {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => LedgerUnavailableError::Timeout,
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            LedgerUnavailableError::Unreachable(err.to_string())
        }
        _ => LedgerUnavailableError::Query(err.to_string()),
    }
}

/// Payment repository backed by the `payments` table.
#[derive(Debug)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads every record matching the query in a single statement.
    ///
    /// Rows come back ordered by date, then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query range is invalid, the database cannot be
    /// read, or a stored row is malformed.
    pub async fn snapshot(
        &self,
        query: &LedgerQuery,
    ) -> Result<Vec<PaymentRecord>, LedgerUnavailableError> {
        let (start, end) = query
            .date_range()
            .map_err(|e| LedgerUnavailableError::Query(e.to_string()))?;

        let mut select = payments::Entity::find()
            .filter(payments::Column::PaymentDate.gte(start))
            .filter(payments::Column::PaymentDate.lt(end));
        if let ProjectFilter::Only(project) = &query.project {
            select = select.filter(payments::Column::Project.eq(project.as_str()));
        }

        let rows = select
            .order_by_asc(payments::Column::PaymentDate)
            .order_by_asc(payments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!(error = %e, year = query.year, "Failed to read payments");
                ledger_error(&e)
            })?;

        debug!(year = query.year, rows = rows.len(), "Read payment snapshot");

        rows.into_iter()
            .map(|row| {
                PaymentRecord::try_from(row)
                    .map_err(|e| LedgerUnavailableError::Query(e.to_string()))
            })
            .collect()
    }

    /// Appends a batch of records in one transaction.
    ///
    /// The whole batch is rejected if any record is invalid. Store-assigned ids
    /// replace any `id` carried by the records.
    ///
    /// # Errors
    ///
    /// Returns an error if a record is invalid or the insert fails.
    pub async fn append(&self, records: Vec<PaymentRecord>) -> Result<u64, AppendError> {
        for (index, record) in records.iter().enumerate() {
            validate_record(record).map_err(|reason| AppendError::InvalidRecord { index, reason })?;
        }
        if records.is_empty() {
            return Ok(0);
        }

        let models = records.into_iter().map(|record| payments::ActiveModel {
            id: NotSet,
            customer_name: Set(record.customer_name),
            payment_date: Set(record.payment_date),
            payment_method: Set(record.payment_method.into()),
            account_name: Set(record.account_name),
            amount: Set(record.amount),
            currency: Set(record.currency.into()),
            project: Set(record.project.as_str().to_string()),
            amount_usd: Set(record.amount_usd),
            exchange_rate: Set(record.exchange_rate),
            created_at: NotSet,
        });

        let txn = self.db.begin().await?;
        let count = payments::Entity::insert_many(models)
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        info!(count, "Appended payments");
        Ok(count)
    }
}
