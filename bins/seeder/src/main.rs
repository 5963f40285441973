//! Database seeder for Tahsilat development and testing.
//!
//! Appends a small demonstration ledger covering every known method, both
//! projects, TL and foreign payments and a week that crosses a month boundary.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, PaginatorTrait};
use tahsilat_core::payment::{NewPayment, PaymentRecord};
use tahsilat_db::{PaymentRepository, entities::payments};
use tahsilat_shared::AppConfig;

/// Demo rows: customer, date, method, account, amount, currency, project, TL→USD rate.
const DEMO_PAYMENTS: &[(&str, (i32, u32, u32), &str, &str, i64, &str, &str, Option<i64>)] = &[
    ("Ayşe Yılmaz", (2025, 1, 15), "Banka Havalesi", "Yapı Kredi TL", 100_000, "TL", "MKM", Some(3_000)),
    ("Mehmet Demir", (2025, 1, 20), "havale", "Yapı Kredi USD", 50_000, "USD", "MKM", None),
    ("Fatma Kaya", (2025, 2, 3), "Banka Havalesi", "Yapı Kredi TL", 200_000, "TL", "MSM", Some(3_000)),
    ("Ali Şahin", (2025, 3, 31), "Nakit", "Çarşı Kasa", 25_000, "USD", "MKM", None),
    ("Zeynep Arslan", (2025, 4, 2), "cash", "Kuyumcukent Kasa", 180_000, "TL", "MSM", Some(3_600)),
    ("Ali Şahin", (2025, 4, 4), "Çek", "Ofis", 75_000, "EUR", "MKM", None),
    ("Hasan Öztürk", (2025, 6, 12), "Nakit", "Ofis", 360_000, "TL", "MKM", Some(3_900)),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    println!("Connecting to database...");
    let db = tahsilat_db::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let existing = payments::Entity::find().count(&db).await?;
    if existing > 0 {
        println!("  Ledger already has {existing} payments, skipping...");
        return Ok(());
    }

    println!("Seeding demo payments...");
    let records = demo_records()?;
    let count = PaymentRepository::new(db).append(records).await?;

    println!("Seeded {count} payments. Seeding complete!");
    Ok(())
}

/// Builds the demo ledger through the import path.
fn demo_records() -> anyhow::Result<Vec<PaymentRecord>> {
    DEMO_PAYMENTS
        .iter()
        .map(|&(customer, (y, m, d), method, account, cents, currency, project, rate)| {
            let payment_date = NaiveDate::from_ymd_opt(y, m, d)
                .with_context(|| format!("Invalid demo date {y}-{m}-{d}"))?;
            let payment = NewPayment {
                customer_name: customer.to_string(),
                payment_date,
                payment_method: method.to_string(),
                account_name: account.to_string(),
                amount: Decimal::new(cents, 2),
                currency: currency.to_string(),
                project: project.to_string(),
                exchange_rate: rate.map(|r| Decimal::new(r, 2)),
            };
            payment
                .into_record()
                .with_context(|| format!("Invalid demo payment for {customer}"))
        })
        .collect()
}
