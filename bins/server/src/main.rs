//! Tahsilat API Server
//!
//! Main entry point for the payment reporting service.

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tahsilat_api::{AppState, create_router};
use tahsilat_db::{PaymentRepository, connect, migration::Migrator};
use tahsilat_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tahsilat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database and bring the schema up to date
    let db = connect(&config.database).await?;
    Migrator::up(&db, None).await?;
    info!("Migrations applied");

    info!(
        tolerance = %config.report.tolerance,
        known_methods = ?config.report.known_methods,
        known_projects = ?config.report.known_projects,
        "Report settings loaded"
    );

    // Create application state
    let state = AppState::new(PaymentRepository::new(db), &config.report);

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
