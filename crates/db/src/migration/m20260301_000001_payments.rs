//! Payments ledger migration.
//!
//! Creates the append-only payments table read by the report engine.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(PAYMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS payments CASCADE;")
            .await?;
        Ok(())
    }
}

const PAYMENTS_SQL: &str = r"
-- Collected payments, appended at import time and never updated
CREATE TABLE payments (
    id BIGSERIAL PRIMARY KEY,
    customer_name TEXT NOT NULL,
    payment_date DATE NOT NULL,
    payment_method VARCHAR(64) NOT NULL,
    account_name TEXT NOT NULL DEFAULT '',
    amount NUMERIC(20, 4) NOT NULL,
    currency VARCHAR(8) NOT NULL,
    project VARCHAR(32) NOT NULL,
    amount_usd NUMERIC(24, 4) NOT NULL,
    exchange_rate NUMERIC(20, 6),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_payment_method_not_blank CHECK (length(trim(payment_method)) > 0),
    CONSTRAINT chk_project_upper CHECK (project = upper(project) AND length(trim(project)) > 0),
    CONSTRAINT chk_currency_upper CHECK (currency = upper(currency) AND length(trim(currency)) > 0)
);

-- Yearly and monthly snapshots scan by date
CREATE INDEX idx_payments_date ON payments(payment_date);

-- Per-project snapshots
CREATE INDEX idx_payments_project_date ON payments(project, payment_date);
";
