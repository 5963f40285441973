//! Tahsilat reconciliation verifier.
//!
//! Fetches a yearly report from the API (or reads a saved one), runs every
//! consistency check against it and prints a pass/fail line per check.
//!
//! Exit codes:
//!   0   Report read; all checks passed, or `--strict` not given
//!   1   Report could not be read, or `--strict` and a check failed
//!   2   Invalid arguments

mod render;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use tahsilat_core::reconcile::Reconciler;
use tahsilat_shared::ReportSettings;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::source::ReportSource;

/// Verify that the views of a yearly payment report agree.
#[derive(Debug, Parser)]
#[command(name = "tahsilat-verify", version)]
#[command(after_help = "\
Examples:
  tahsilat-verify --year 2025
  tahsilat-verify --year 2025 --base-url http://reports.internal:8080 --strict
  tahsilat-verify --year 2025 --file yearly-2025.json --tolerance 0.005")]
struct Cli {
    /// Calendar year of the report
    #[arg(long)]
    year: i32,

    /// API base URL the report is fetched from
    #[arg(
        long,
        env = "TAHSILAT_BASE_URL",
        default_value = "http://localhost:8080",
        conflicts_with = "file"
    )]
    base_url: String,

    /// Read the report from a saved JSON file instead of the API
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// Absolute tolerance for equality checks [default: configured report tolerance]
    #[arg(long)]
    tolerance: Option<Decimal>,

    /// Exit non-zero if any check fails
    #[arg(long)]
    strict: bool,
}

/// Configured report settings, with the tolerance overridden from the
/// command line when given.
fn verification_settings(tolerance: Option<Decimal>) -> anyhow::Result<(Decimal, ReportSettings)> {
    let settings = ReportSettings::load().context("Failed to load report settings")?;
    let tolerance = tolerance.unwrap_or(settings.tolerance);
    if tolerance <= Decimal::ZERO {
        anyhow::bail!("Tolerance must be positive, got {tolerance}");
    }
    Ok((tolerance, settings))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tahsilat_verify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let (tolerance, settings) = verification_settings(cli.tolerance)?;

    let source = match cli.file {
        Some(path) => ReportSource::File(path),
        None => ReportSource::Api(cli.base_url),
    };
    println!("📊 Verifying {} report from {source}", cli.year);

    let report = source.load(cli.year).await?;
    if report.year != cli.year {
        warn!(requested = cli.year, found = report.year, "Report year does not match");
    }

    let reconciliation = Reconciler::new(tolerance).reconcile(&report);
    let structure = render::structure_checks(&report, &settings.known_methods);

    print!("{}", render::render(&reconciliation, &structure));

    let all_passed = reconciliation.passed && structure.iter().all(|s| s.present);
    if cli.strict && !all_passed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
